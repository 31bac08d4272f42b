// changelog structure validation

use super::heading::SectionHeading;
use super::types::ChangelogDocument;
use crate::error::{Error, Result};
use semver::Version;

/// validate the section structure of a changelog
///
/// checks run in a fixed order and stop at the first kind of violation:
/// unreleased section count, version validity (and ceiling), version order.
/// the ceiling check is skipped when `current_version` is `None`.
pub fn validate_structure(
    document: &ChangelogDocument,
    current_version: Option<&Version>,
) -> Result<()> {
    let file = document.file_name();
    let headings = document.headings();

    check_unreleased_count(&headings, &file)?;
    let versions = parse_versions(&headings, current_version, &file)?;
    check_order(&versions, &file)?;

    log::debug!(
        "{} has a valid structure with {} released versions",
        file,
        versions.len()
    );
    Ok(())
}

fn check_unreleased_count(headings: &[SectionHeading], file: &str) -> Result<()> {
    match headings.iter().filter(|h| h.is_unreleased()).count() {
        0 => Err(Error::MissingUnreleasedSection {
            file: file.to_string(),
        }),
        1 => Ok(()),
        count => Err(Error::TooManyUnreleasedSections {
            file: file.to_string(),
            count,
        }),
    }
}

fn parse_versions<'a>(
    headings: &'a [SectionHeading],
    current_version: Option<&Version>,
    file: &str,
) -> Result<Vec<(&'a str, Version)>> {
    let mut versions = Vec::new();

    for heading in headings.iter().filter(|h| !h.is_unreleased()) {
        let version = Version::parse(&heading.label).map_err(|e| Error::InvalidVersion {
            label: heading.label.clone(),
            file: file.to_string(),
            reason: e.to_string(),
        })?;

        if let Some(current) = current_version
            && version > *current
        {
            return Err(Error::InvalidVersion {
                label: heading.label.clone(),
                file: file.to_string(),
                reason: format!("greater than the version being released ({})", current),
            });
        }

        versions.push((heading.label.as_str(), version));
    }

    Ok(versions)
}

fn check_order(versions: &[(&str, Version)], file: &str) -> Result<()> {
    for pair in versions.windows(2) {
        let (previous_label, previous) = &pair[0];
        let (next_label, next) = &pair[1];
        if next >= previous {
            return Err(Error::InvalidSectionOrder {
                file: file.to_string(),
                previous: previous_label.to_string(),
                next: next_label.to_string(),
            });
        }
    }
    Ok(())
}
