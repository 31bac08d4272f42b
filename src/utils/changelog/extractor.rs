// section extraction

use super::heading::{self, UNRELEASED};
use super::types::ChangelogDocument;
use crate::error::{Error, Result};
use semver::Version;

/// extract the trimmed entries of the section with the given label
///
/// the section ends at the next heading of any label, or at the end of
/// the document. content starts right after the heading line, so blank
/// lines between heading and entries are optional.
pub fn extract_section(document: &ChangelogDocument, label: &str) -> Result<String> {
    let text = &document.content;
    let section = heading::find_heading(text, label).ok_or_else(|| Error::MissingSection {
        label: label.to_string(),
        file: document.file_name(),
    })?;

    let end = heading::next_heading(text, section.content_start)
        .map(|next| next.start)
        .unwrap_or(text.len());

    let content = text[section.content_start..end].trim();
    if content.is_empty() {
        return Err(Error::EmptySection {
            label: label.to_string(),
            file: document.file_name(),
        });
    }

    Ok(content.to_string())
}

/// label of the section holding the notes for this release
///
/// increments and first releases read from "Unreleased", republishing an
/// existing version reads that version's own section.
pub fn release_section_label(
    document: &ChangelogDocument,
    version: &Version,
    is_increment: bool,
) -> String {
    if is_increment || !document.has_version_sections() {
        UNRELEASED.to_string()
    } else {
        version.to_string()
    }
}

/// extract the notes for a release using the section selection policy
pub fn select_release_section(
    document: &ChangelogDocument,
    version: &Version,
    is_increment: bool,
) -> Result<String> {
    let label = release_section_label(document, version, is_increment);
    log::debug!("extracting \"{}\" section from {}", label, document.file_name());
    extract_section(document, &label)
}
