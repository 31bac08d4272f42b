// changelog data structures

use super::heading::{self, SectionHeading};
use super::repository::RepositoryInfo;
use crate::error::{Error, Result};
use chrono::NaiveDate;
use semver::Version;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// line break sequence used by a changelog file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// detect the line ending from the first line break, `\n` if there is none
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(pos) if pos > 0 && text.as_bytes()[pos - 1] == b'\r' => LineEnding::CrLf,
            _ => LineEnding::Lf,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }
}

/// a changelog file loaded into memory
#[derive(Debug, Clone)]
pub struct ChangelogDocument {
    pub path: PathBuf,
    pub content: String,
    pub line_ending: LineEnding,
}

impl ChangelogDocument {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        let content = content.into();
        let line_ending = LineEnding::detect(&content);
        Self {
            path: path.into(),
            content,
            line_ending,
        }
    }

    /// read a changelog file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let document = Self::new(path, content);
        log::debug!(
            "loaded {} ({} bytes, {:?} line endings)",
            path.display(),
            document.content.len(),
            document.line_ending
        );
        Ok(document)
    }

    /// write the whole text back to the document's path
    pub fn save(&self, text: &str) -> Result<()> {
        fs::write(&self.path, text).map_err(|e| Error::FileWrite {
            path: self.path.clone(),
            source: e,
        })
    }

    /// file name used in diagnostics
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn headings(&self) -> Vec<SectionHeading> {
        heading::find_headings(&self.content)
    }

    pub fn has_section(&self, label: &str) -> bool {
        heading::find_heading(&self.content, label).is_some()
    }

    /// versions of all headings that parse as versions, in document order
    pub fn versions(&self) -> Vec<Version> {
        self.headings()
            .iter()
            .filter(|h| !h.is_unreleased())
            .filter_map(|h| Version::parse(&h.label).ok())
            .collect()
    }

    pub fn has_version_sections(&self) -> bool {
        self.headings().iter().any(|h| !h.is_unreleased())
    }

    /// newest released version, i.e. the first version heading
    pub fn latest_version(&self) -> Option<Version> {
        self.versions().into_iter().next()
    }
}

/// values the host supplies for one release operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseContext {
    /// version being released (or republished)
    pub version: Version,
    /// newest version released before this one
    pub latest_version: Option<Version>,
    pub tag_name: String,
    /// tag of the previous release, `None` for the very first release
    pub previous_tag: Option<String>,
    pub repository: Option<RepositoryInfo>,
    /// a new version is being cut, as opposed to republishing notes
    pub is_increment: bool,
    pub is_dry_run: bool,
}

impl ReleaseContext {
    pub fn new(version: Version) -> Self {
        Self {
            tag_name: version.to_string(),
            version,
            latest_version: None,
            previous_tag: None,
            repository: None,
            is_increment: true,
            is_dry_run: false,
        }
    }

    /// set the previous release, its tag defaults to the plain version
    pub fn latest_version(mut self, latest: Version) -> Self {
        if self.previous_tag.is_none() {
            self.previous_tag = Some(latest.to_string());
        }
        self.latest_version = Some(latest);
        self
    }

    /// set the previous release without deriving its tag, see [`Self::previous_tag`]
    pub fn previous_release(mut self, latest: Option<Version>) -> Self {
        self.latest_version = latest;
        self
    }

    pub fn tag_name(mut self, tag: impl Into<String>) -> Self {
        self.tag_name = tag.into();
        self
    }

    pub fn previous_tag(mut self, tag: Option<String>) -> Self {
        self.previous_tag = tag;
        self
    }

    pub fn repository(mut self, repository: RepositoryInfo) -> Self {
        self.repository = Some(repository);
        self
    }

    pub fn increment(mut self, is_increment: bool) -> Self {
        self.is_increment = is_increment;
        self
    }

    pub fn dry_run(mut self, is_dry_run: bool) -> Self {
        self.is_dry_run = is_dry_run;
        self
    }
}

/// summary of a release session handed back to the caller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseOutcome {
    pub path: PathBuf,
    pub version: Version,
    pub date: NaiveDate,
    pub notes: String,
    pub written: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_line_ending() {
        assert_eq!(LineEnding::detect("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("\r\n\r\n## [Unreleased]"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("no break"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\nb\r\n"), LineEnding::Lf);
    }

    #[test]
    fn test_file_name_for_diagnostics() {
        let document = ChangelogDocument::new("docs/CHANGELOG-FOO.md", "");
        assert_eq!(document.file_name(), "CHANGELOG-FOO.md");
    }

    #[test]
    fn test_latest_version() {
        let document = ChangelogDocument::new(
            "CHANGELOG.md",
            "## [Unreleased]\n\n## [1.2.0] - 2021-01-01\n\n## [1.1.0]\n",
        );
        assert_eq!(document.latest_version(), Some(Version::new(1, 2, 0)));
        assert!(document.has_version_sections());

        let empty = ChangelogDocument::new("CHANGELOG.md", "## [Unreleased]\n\n* A");
        assert_eq!(empty.latest_version(), None);
        assert!(!empty.has_version_sections());
    }

    #[test]
    fn test_previous_release_keeps_tag() {
        let context = ReleaseContext::new(Version::new(1, 0, 1))
            .previous_tag(Some("v1.0.0".to_string()))
            .previous_release(Some(Version::new(1, 0, 0)));
        assert_eq!(context.previous_tag.as_deref(), Some("v1.0.0"));
        assert_eq!(context.latest_version, Some(Version::new(1, 0, 0)));

        let derived = ReleaseContext::new(Version::new(1, 0, 1)).latest_version(Version::new(1, 0, 0));
        assert_eq!(derived.previous_tag.as_deref(), Some("1.0.0"));

        let first = ReleaseContext::new(Version::new(1, 0, 0)).previous_release(None);
        assert_eq!(first.previous_tag, None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ChangelogDocument::load(dir.path().join("CHANGELOG.md")).unwrap_err();
        match err {
            Error::FileRead { source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound)
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
