// release session tying the changelog operations together

use super::config::ChangelogConfig;
use super::extractor::{release_section_label, select_release_section};
use super::links::{build_links, sync_links};
use super::rewriter::{RewriteOptions, normalize, rewrite};
use super::types::{ChangelogDocument, ReleaseContext, ReleaseOutcome};
use super::validator::validate_structure;
use crate::error::{Error, Result};
use chrono::NaiveDate;

/// one release operation over one changelog file
///
/// the document is validated when the session is created, the release notes
/// are extracted once and cached, and the file is written at most once, at the
/// very end of [`ReleaseSession::publish`].
#[derive(Debug)]
pub struct ReleaseSession {
    document: ChangelogDocument,
    config: ChangelogConfig,
    context: ReleaseContext,
    notes: Option<String>,
}

impl ReleaseSession {
    /// load `config.filename` and validate it
    pub fn open(config: ChangelogConfig, context: ReleaseContext) -> Result<Self> {
        let document = ChangelogDocument::load(&config.filename)?;
        Self::new(document, config, context)
    }

    pub fn new(
        document: ChangelogDocument,
        config: ChangelogConfig,
        context: ReleaseContext,
    ) -> Result<Self> {
        validate_structure(&document, Some(&context.version))?;
        Ok(Self {
            document,
            config,
            context,
            notes: None,
        })
    }

    pub fn document(&self) -> &ChangelogDocument {
        &self.document
    }

    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    pub fn context(&self) -> &ReleaseContext {
        &self.context
    }

    /// the release notes of this operation
    pub fn release_notes(&mut self) -> Result<&str> {
        let notes = match self.notes.take() {
            Some(notes) => notes,
            None => {
                self.check_latest_section()?;
                select_release_section(
                    &self.document,
                    &self.context.version,
                    self.context.is_increment,
                )?
            }
        };
        Ok(self.notes.insert(notes).as_str())
    }

    /// label of the section the notes are read from
    pub fn notes_section(&self) -> String {
        release_section_label(
            &self.document,
            &self.context.version,
            self.context.is_increment,
        )
    }

    fn check_latest_section(&self) -> Result<()> {
        if !self.config.strict_latest || !self.context.is_increment {
            return Ok(());
        }

        match &self.context.latest_version {
            Some(latest) if !self.document.has_section(&latest.to_string()) => {
                Err(Error::MissingPreviousRelease {
                    version: latest.to_string(),
                    file: self.document.file_name(),
                })
            }
            _ => Ok(()),
        }
    }

    /// whether publishing changes the file at all
    pub fn should_write(&self) -> bool {
        self.context.is_increment && !self.context.is_dry_run && !self.config.keep_unreleased
    }

    /// new file content for a release on `date`, `None` when nothing is written
    pub fn render(&self, date: NaiveDate) -> Result<Option<String>> {
        if !self.should_write() {
            return Ok(None);
        }

        let options = RewriteOptions {
            add_unreleased: self.config.add_unreleased,
        };
        let eol = self.document.line_ending.as_str();
        let text = rewrite(&self.document, &self.context.version, date, options);

        if self.config.add_version_url
            && let Some(links) = build_links(&self.config, &self.context)?
        {
            return Ok(Some(sync_links(&text, eol, &links)));
        }

        Ok(Some(normalize(&text, eol)))
    }

    /// extract the notes and write the released changelog
    pub fn publish(mut self, date: NaiveDate) -> Result<ReleaseOutcome> {
        let notes = self.release_notes()?.to_string();
        let rendered = self.render(date)?;

        let written = match rendered {
            Some(text) => {
                self.document.save(&text)?;
                log::info!(
                    "released {} in {}",
                    self.context.version,
                    self.document.path.display()
                );
                true
            }
            None => {
                log::info!(
                    "leaving {} untouched (dry run: {}, keep unreleased: {}, increment: {})",
                    self.document.path.display(),
                    self.context.is_dry_run,
                    self.config.keep_unreleased,
                    self.context.is_increment
                );
                false
            }
        };

        Ok(ReleaseOutcome {
            path: self.document.path,
            version: self.context.version,
            date,
            notes,
            written,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::changelog::repository::RepositoryInfo;
    use semver::Version;

    const FULL: &str = "## [Unreleased]\n\n* A\n* B\n\n## [1.0.0] - 2020-05-02\n\n* C\n* D";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
    }

    fn session(content: &str, config: ChangelogConfig, context: ReleaseContext) -> Result<ReleaseSession> {
        ReleaseSession::new(ChangelogDocument::new("CHANGELOG.md", content), config, context)
    }

    fn patch_context() -> ReleaseContext {
        ReleaseContext::new(Version::new(1, 0, 1)).latest_version(Version::new(1, 0, 0))
    }

    #[test]
    fn test_notes_are_cached() {
        let mut session = session(FULL, ChangelogConfig::default(), patch_context()).unwrap();
        assert_eq!(session.release_notes().unwrap(), "* A\n* B");
        assert_eq!(session.release_notes().unwrap(), "* A\n* B");
        assert_eq!(session.notes_section(), "Unreleased");
    }

    #[test]
    fn test_strict_latest_requires_previous_section() {
        let mut strict = session("## [Unreleased]\n\n* A\n* B", ChangelogConfig::default(), patch_context()).unwrap();
        let err = strict.release_notes().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing section for previous release (\"1.0.0\") in CHANGELOG.md"
        );

        let config = ChangelogConfig::default().strict_latest(false);
        let mut relaxed = session("## [Unreleased]\n\n* A\n* B", config, patch_context()).unwrap();
        assert_eq!(relaxed.release_notes().unwrap(), "* A\n* B");
    }

    #[test]
    fn test_strict_latest_runs_before_empty_check() {
        let err = session("## [Unreleased]\n\n", ChangelogConfig::default(), patch_context())
            .unwrap()
            .release_notes()
            .unwrap_err();
        assert!(matches!(err, Error::MissingPreviousRelease { .. }));
    }

    #[test]
    fn test_republish_reads_version_section() {
        let context = ReleaseContext::new(Version::new(1, 0, 0)).increment(false);
        let mut session = session(FULL, ChangelogConfig::default(), context).unwrap();
        assert_eq!(session.release_notes().unwrap(), "* C\n* D");
        assert!(!session.should_write());
        assert_eq!(session.render(date()).unwrap(), None);
    }

    #[test]
    fn test_validation_uses_release_version() {
        let context = ReleaseContext::new(Version::new(0, 9, 0));
        let err = session(FULL, ChangelogConfig::default(), context).unwrap_err();
        assert!(matches!(err, Error::InvalidVersion { .. }));
    }

    #[test]
    fn test_render_release() {
        let session = session(FULL, ChangelogConfig::default(), patch_context()).unwrap();
        assert_eq!(
            session.render(date()).unwrap().unwrap(),
            "## [1.0.1] - 2024-03-07\n\n* A\n* B\n\n## [1.0.0] - 2020-05-02\n\n* C\n* D\n"
        );
    }

    #[test]
    fn test_render_leaves_intro_markup_alone() {
        let content = "# Changelog\n\nAdd entries under ## [Unreleased] before releasing.\n\n## [Unreleased]\n\n* A\n\n## [1.0.0]\n\n* C\n";
        let session = session(content, ChangelogConfig::default(), patch_context()).unwrap();

        assert_eq!(
            session.render(date()).unwrap().unwrap(),
            "# Changelog\n\nAdd entries under ## [Unreleased] before releasing.\n\n## [1.0.1] - 2024-03-07\n\n* A\n\n## [1.0.0]\n\n* C\n"
        );
    }

    #[test]
    fn test_render_skipped() {
        let dry_run = session(FULL, ChangelogConfig::default(), patch_context().dry_run(true)).unwrap();
        assert_eq!(dry_run.render(date()).unwrap(), None);

        let keep = session(
            FULL,
            ChangelogConfig::default().keep_unreleased(true),
            patch_context(),
        )
        .unwrap();
        assert_eq!(keep.render(date()).unwrap(), None);
    }

    #[test]
    fn test_render_with_links_and_unreleased() {
        let config = ChangelogConfig::default()
            .add_unreleased(true)
            .add_version_url(true);
        let context = patch_context().repository(RepositoryInfo::new("github.com", "user/project"));
        let session = session(FULL, config, context).unwrap();

        assert_eq!(
            session.render(date()).unwrap().unwrap(),
            "## [Unreleased]\n\n## [1.0.1] - 2024-03-07\n\n* A\n* B\n\n## [1.0.0] - 2020-05-02\n\n* C\n* D\n\n\
             [Unreleased]: https://github.com/user/project/compare/1.0.1...HEAD\n\
             [1.0.1]: https://github.com/user/project/compare/1.0.0...1.0.1\n"
        );
    }
}
