// reference link footer synchronization

use super::config::ChangelogConfig;
use super::heading::UNRELEASED;
use super::rewriter::normalize;
use super::template::{self, TemplateVars};
use super::types::ReleaseContext;
use crate::error::Result;

/// a `[label]: url` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFooterEntry {
    pub label: String,
    pub url: String,
    /// index of the line inside the document
    pub line: usize,
}

/// parse a reference link definition line
pub fn parse_link_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim().strip_prefix('[')?;
    let (label, url) = rest.split_once("]:")?;
    let url = url.trim();
    if label.is_empty() || url.is_empty() || label.contains('[') {
        return None;
    }
    Some((label, url))
}

fn link_line(label: &str, url: &str) -> String {
    format!("[{}]: {}", label, url)
}

/// document lines with their reference link definitions
#[derive(Debug, Clone)]
pub struct LinkFooter {
    lines: Vec<String>,
}

impl LinkFooter {
    pub fn parse(text: &str) -> Self {
        Self {
            lines: text.trim().lines().map(str::to_string).collect(),
        }
    }

    pub fn entries(&self) -> Vec<LinkFooterEntry> {
        self.lines
            .iter()
            .enumerate()
            .filter_map(|(line, text)| {
                parse_link_line(text).map(|(label, url)| LinkFooterEntry {
                    label: label.to_string(),
                    url: url.to_string(),
                    line,
                })
            })
            .collect()
    }

    /// line of the first link whose label matches, ignoring case
    pub fn find(&self, label: &str) -> Option<usize> {
        self.entries()
            .into_iter()
            .find(|entry| entry.label.eq_ignore_ascii_case(label))
            .map(|entry| entry.line)
    }

    fn trim_trailing_blank_lines(&mut self) {
        while self.lines.last().is_some_and(|line| line.trim().is_empty()) {
            self.lines.pop();
        }
    }

    /// point the unreleased link at `url`, appending it after a blank line if absent
    pub fn set_unreleased(&mut self, url: &str) {
        let line = link_line(UNRELEASED, url);
        match self.find(UNRELEASED) {
            Some(index) => self.lines[index] = line,
            None => {
                self.trim_trailing_blank_lines();
                self.lines.push(String::new());
                self.lines.push(line);
            }
        }
    }

    /// set the link of a version
    ///
    /// an existing link for the label is replaced. otherwise the link goes right
    /// before the previous version's link, or at the end of the document.
    pub fn set_version(&mut self, label: &str, url: &str, previous_label: Option<&str>) {
        let line = link_line(label, url);
        if let Some(index) = self.find(label) {
            self.lines[index] = line;
            return;
        }

        match previous_label.and_then(|previous| self.find(previous)) {
            Some(index) => self.lines.insert(index, line),
            None => {
                self.trim_trailing_blank_lines();
                self.lines.push(line);
            }
        }
    }

    pub fn render(&self, eol: &str) -> String {
        normalize(&self.lines.join(eol), eol)
    }
}

/// the two links written for a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseLinks {
    pub unreleased_url: String,
    pub version_label: String,
    pub version_url: String,
    pub previous_label: Option<String>,
}

/// render the release links from the url templates
///
/// returns `None` when there is no repository information to build urls from.
pub fn build_links(config: &ChangelogConfig, context: &ReleaseContext) -> Result<Option<ReleaseLinks>> {
    let formats = &config.version_url_formats;
    let mut vars = TemplateVars::new();

    match &context.repository {
        Some(repository) => {
            vars.set("host", repository.host.as_str())
                .set("repository", repository.repository.as_str());
        }
        None if formats.repository_url.is_none() => {
            log::warn!("no repository information available, skipping version links");
            return Ok(None);
        }
        None => {}
    }

    vars.set("tagName", context.tag_name.as_str())
        .set("head", config.head.as_str());
    if let Some(previous_tag) = &context.previous_tag {
        vars.set("previousTag", previous_tag.as_str());
    }

    let repository_url = template::render(formats.repository_url(), &vars)?;
    vars.set("repositoryUrl", repository_url);

    let unreleased_url = template::render(formats.unreleased_url(), &vars)?;
    let version_url = match context.previous_tag {
        Some(_) => template::render(formats.version_url(), &vars)?,
        None => template::render(formats.first_version_url(), &vars)?,
    };

    Ok(Some(ReleaseLinks {
        unreleased_url,
        version_label: context.version.to_string(),
        version_url,
        previous_label: context.latest_version.as_ref().map(|v| v.to_string()),
    }))
}

/// write the unreleased and new version links into the text
pub fn sync_links(text: &str, eol: &str, links: &ReleaseLinks) -> String {
    let mut footer = LinkFooter::parse(text);
    footer.set_unreleased(&links.unreleased_url);
    footer.set_version(
        &links.version_label,
        &links.version_url,
        links.previous_label.as_deref(),
    );
    footer.render(eol)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::changelog::repository::RepositoryInfo;
    use semver::Version;

    fn context() -> ReleaseContext {
        ReleaseContext::new(Version::new(1, 0, 1))
            .latest_version(Version::new(1, 0, 0))
            .repository(RepositoryInfo::new("github.com", "release-it/release-it"))
    }

    #[test]
    fn test_parse_link_line() {
        assert_eq!(
            parse_link_line("[1.0.0]: https://example.com/a"),
            Some(("1.0.0", "https://example.com/a"))
        );
        assert_eq!(parse_link_line("* [link](https://x)"), None);
        assert_eq!(parse_link_line("[Unreleased]:"), None);
    }

    #[test]
    fn test_build_links() {
        let links = build_links(&ChangelogConfig::default(), &context())
            .unwrap()
            .unwrap();
        assert_eq!(
            links.unreleased_url,
            "https://github.com/release-it/release-it/compare/1.0.1...HEAD"
        );
        assert_eq!(
            links.version_url,
            "https://github.com/release-it/release-it/compare/1.0.0...1.0.1"
        );
        assert_eq!(links.previous_label.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn test_build_links_first_release() {
        let context = ReleaseContext::new(Version::new(1, 0, 0))
            .repository(RepositoryInfo::new("github.com", "user/project"));
        let links = build_links(&ChangelogConfig::default(), &context)
            .unwrap()
            .unwrap();
        assert_eq!(
            links.version_url,
            "https://github.com/user/project/releases/tag/1.0.0"
        );
        assert_eq!(links.previous_label, None);
    }

    #[test]
    fn test_build_links_without_repository() {
        let context = ReleaseContext::new(Version::new(1, 0, 0));
        assert_eq!(build_links(&ChangelogConfig::default(), &context).unwrap(), None);
    }

    #[test]
    fn test_custom_repository_template_missing_placeholder() {
        let mut config = ChangelogConfig::default();
        config.version_url_formats.repository_url = Some("https://{{host}}/x".to_string());
        let context = ReleaseContext::new(Version::new(1, 0, 0));
        assert!(build_links(&config, &context).is_err());
    }

    #[test]
    fn test_sync_replaces_and_inserts() {
        let text = "## [1.0.1] - 2024-01-01\n\n* A\n\n## [1.0.0]\n\n* C\n\n[unreleased]: https://github.com/release-it/release-it/compare/1.0.0..main\n[1.0.0]: https://github.com/release-it/release-it/compare/0.0.0...1.0.0";
        let links = build_links(&ChangelogConfig::default(), &context())
            .unwrap()
            .unwrap();

        let synced = sync_links(text, "\n", &links);
        assert!(synced.ends_with(
            "* C\n\n[Unreleased]: https://github.com/release-it/release-it/compare/1.0.1...HEAD\n[1.0.1]: https://github.com/release-it/release-it/compare/1.0.0...1.0.1\n[1.0.0]: https://github.com/release-it/release-it/compare/0.0.0...1.0.0\n"
        ));
    }

    #[test]
    fn test_sync_appends_to_new_changelog() {
        let links = ReleaseLinks {
            unreleased_url: "https://h/u/p/compare/1.0.0...HEAD".to_string(),
            version_label: "1.0.0".to_string(),
            version_url: "https://h/u/p/releases/tag/1.0.0".to_string(),
            previous_label: None,
        };
        let synced = sync_links("## [1.0.0] - 2024-01-01\r\n\r\n* A\r\n\r\n", "\r\n", &links);
        assert_eq!(
            synced,
            "## [1.0.0] - 2024-01-01\r\n\r\n* A\r\n\r\n[Unreleased]: https://h/u/p/compare/1.0.0...HEAD\r\n[1.0.0]: https://h/u/p/releases/tag/1.0.0\r\n"
        );
    }

    #[test]
    fn test_sync_is_idempotent() {
        let text = "## [1.0.1]\n\n* A\n\n## [1.0.0]\n\n* C";
        let links = build_links(&ChangelogConfig::default(), &context())
            .unwrap()
            .unwrap();

        let once = sync_links(text, "\n", &links);
        let twice = sync_links(&once, "\n", &links);
        assert_eq!(once, twice);
        assert_eq!(LinkFooter::parse(&twice).entries().len(), 2);
    }
}
