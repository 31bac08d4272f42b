// latest release lookup from git tags

use super::config::ChangelogConfig;
use super::types::ChangelogDocument;
use crate::error::{Error, Result};
use gix::bstr::ByteSlice;
use semver::Version;
use std::path::Path;

const TAG_REF_PREFIX: &str = "refs/tags/";
const VERSION_PLACEHOLDER: &str = "{{version}}";

/// a git tag naming a released version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    pub name: String,
    pub version: Version,
}

/// version named by `tag`, e.g. `v1.2.0` under `v{{version}}`
///
/// tags not matching the format still count when they are a plain version
/// with an optional `v` prefix.
pub fn tag_version(tag: &str, tag_format: &str) -> Option<Version> {
    if let Some((prefix, suffix)) = tag_format.split_once(VERSION_PLACEHOLDER)
        && let Some(raw) = tag.strip_prefix(prefix).and_then(|t| t.strip_suffix(suffix))
        && let Ok(version) = Version::parse(raw)
    {
        return Some(version);
    }
    Version::parse(tag.trim_start_matches('v')).ok()
}

/// version tags of the repository containing `dir`, newest first
pub fn version_tags<P: AsRef<Path>>(dir: P, tag_format: &str) -> Result<Vec<VersionTag>> {
    let dir = dir.as_ref();
    let repo = gix::discover(dir).map_err(|_| Error::RepositoryNotFound {
        path: dir.to_path_buf(),
    })?;

    let references = repo.references().map_err(Error::git)?;
    let mut tags = Vec::new();
    for reference in references.tags().map_err(Error::git)? {
        let reference = reference.map_err(Error::Git)?;
        if let Ok(name) = reference.name().as_bstr().to_str()
            && let Some(name) = name.strip_prefix(TAG_REF_PREFIX)
            && let Some(version) = tag_version(name, tag_format)
        {
            tags.push(VersionTag {
                name: name.to_string(),
                version,
            });
        }
    }

    tags.sort_by(|a, b| b.version.cmp(&a.version));
    Ok(tags)
}

/// newest released version as the repository knows it
///
/// outside a git repository the newest changelog section stands in, which
/// would always satisfy strict latest, so that is refused when `strict` holds.
pub fn resolve_latest_release(
    document: &ChangelogDocument,
    config: &ChangelogConfig,
    strict: bool,
) -> Result<Option<VersionTag>> {
    let dir = match document.path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match version_tags(dir, &config.tag_format) {
        Ok(tags) => {
            let latest = tags.into_iter().next();
            log::debug!("latest version tag in {}: {:?}", dir.display(), latest);
            Ok(latest)
        }
        Err(Error::RepositoryNotFound { .. }) if strict => Err(Error::UnknownLatestVersion {
            file: document.file_name(),
        }),
        Err(Error::RepositoryNotFound { path }) => {
            log::warn!(
                "no git repository at {}, using the newest section of {}",
                path.display(),
                document.file_name()
            );
            match document.latest_version() {
                Some(version) => Ok(Some(VersionTag {
                    name: config.render_tag(&version)?,
                    version,
                })),
                None => Ok(None),
            }
        }
        Err(err) => Err(err),
    }
}
