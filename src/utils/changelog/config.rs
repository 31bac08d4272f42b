// changelog configuration

use super::template::{self, TemplateVars};
use crate::error::Result;
use semver::Version;
use serde::{Deserialize, Serialize};

pub const DEFAULT_REPOSITORY_URL: &str = "https://{{host}}/{{repository}}";
pub const DEFAULT_UNRELEASED_URL: &str = "{{repositoryUrl}}/compare/{{tagName}}...{{head}}";
pub const DEFAULT_VERSION_URL: &str = "{{repositoryUrl}}/compare/{{previousTag}}...{{tagName}}";
pub const DEFAULT_FIRST_VERSION_URL: &str = "{{repositoryUrl}}/releases/tag/{{tagName}}";

/// user overrides for the link templates, unset entries use the defaults
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VersionUrlFormats {
    pub repository_url: Option<String>,
    pub unreleased_url: Option<String>,
    pub version_url: Option<String>,
    pub first_version_url: Option<String>,
}

impl VersionUrlFormats {
    pub fn repository_url(&self) -> &str {
        self.repository_url
            .as_deref()
            .unwrap_or(DEFAULT_REPOSITORY_URL)
    }

    pub fn unreleased_url(&self) -> &str {
        self.unreleased_url
            .as_deref()
            .unwrap_or(DEFAULT_UNRELEASED_URL)
    }

    pub fn version_url(&self) -> &str {
        self.version_url.as_deref().unwrap_or(DEFAULT_VERSION_URL)
    }

    pub fn first_version_url(&self) -> &str {
        self.first_version_url
            .as_deref()
            .unwrap_or(DEFAULT_FIRST_VERSION_URL)
    }
}

/// configuration of a changelog release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// path of the changelog file (default: "CHANGELOG.md")
    pub filename: String,

    /// require a section for the latest released version
    pub strict_latest: bool,

    /// put a new empty unreleased section above the released one
    pub add_unreleased: bool,

    /// never rewrite the changelog on release
    pub keep_unreleased: bool,

    /// maintain the reference link footer
    pub add_version_url: bool,

    /// reference the unreleased link compares against
    pub head: String,

    /// template turning a version into a tag name
    pub tag_format: String,

    pub version_url_formats: VersionUrlFormats,
}

impl ChangelogConfig {
    /// create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filename(mut self, name: impl Into<String>) -> Self {
        self.filename = name.into();
        self
    }

    pub fn strict_latest(mut self, strict: bool) -> Self {
        self.strict_latest = strict;
        self
    }

    pub fn add_unreleased(mut self, add: bool) -> Self {
        self.add_unreleased = add;
        self
    }

    pub fn keep_unreleased(mut self, keep: bool) -> Self {
        self.keep_unreleased = keep;
        self
    }

    pub fn add_version_url(mut self, add: bool) -> Self {
        self.add_version_url = add;
        self
    }

    pub fn head(mut self, head: impl Into<String>) -> Self {
        self.head = head.into();
        self
    }

    pub fn tag_format(mut self, format: impl Into<String>) -> Self {
        self.tag_format = format.into();
        self
    }

    pub fn version_url_formats(mut self, formats: VersionUrlFormats) -> Self {
        self.version_url_formats = formats;
        self
    }

    /// tag name of `version` under `tag_format`
    pub fn render_tag(&self, version: &Version) -> Result<String> {
        let vars = TemplateVars::new().with("version", version.to_string());
        template::render(&self.tag_format, &vars)
    }
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            filename: "CHANGELOG.md".to_string(),
            strict_latest: true,
            add_unreleased: false,
            keep_unreleased: false,
            add_version_url: false,
            head: "HEAD".to_string(),
            tag_format: "{{version}}".to_string(),
            version_url_formats: VersionUrlFormats::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ChangelogConfig::default();
        assert_eq!(config.filename, "CHANGELOG.md");
        assert!(config.strict_latest);
        assert!(!config.add_unreleased);
        assert!(!config.keep_unreleased);
        assert!(!config.add_version_url);
        assert_eq!(config.head, "HEAD");
        assert_eq!(
            config.version_url_formats.version_url(),
            "{{repositoryUrl}}/compare/{{previousTag}}...{{tagName}}"
        );
    }

    #[test]
    fn test_render_tag() {
        let version = Version::new(1, 2, 0);
        assert_eq!(ChangelogConfig::default().render_tag(&version).unwrap(), "1.2.0");

        let config = ChangelogConfig::default().tag_format("v{{version}}");
        assert_eq!(config.render_tag(&version).unwrap(), "v1.2.0");

        let broken = ChangelogConfig::default().tag_format("{{name}}@{{version}}");
        assert!(broken.render_tag(&version).is_err());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: ChangelogConfig = toml::from_str(
            r#"
            add_version_url = true
            head = "main"

            [version_url_formats]
            first_version_url = "{{repositoryUrl}}/tree/{{tagName}}"
            "#,
        )
        .unwrap();

        assert!(config.add_version_url);
        assert!(config.strict_latest);
        assert_eq!(config.head, "main");
        assert_eq!(
            config.version_url_formats.first_version_url(),
            "{{repositoryUrl}}/tree/{{tagName}}"
        );
        assert_eq!(
            config.version_url_formats.repository_url(),
            DEFAULT_REPOSITORY_URL
        );
    }
}
