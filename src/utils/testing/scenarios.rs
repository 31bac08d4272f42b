// pre-defined changelog scenarios

use super::changelog_builder::{TestChangelog, TestChangelogBuilder, TestSection};

/// pre-defined changelog scenarios
pub enum ChangelogScenario {
    /// unreleased entries above a dated 1.0.0 release
    Standard,
    /// like `Standard` with a `# Changelog` title on top
    WithTitle,
    /// only an unreleased section, nothing released yet
    FirstRelease,
    /// heading without brackets, no unreleased section at all
    MissingUnreleased,
    /// unreleased section holding only blank lines
    EmptyUnreleased,
    /// no blank lines around headings
    Compact,
    /// windows line endings with leading blank lines
    Crlf,
    /// `Standard` plus an existing link footer
    WithLinks,
}

impl ChangelogScenario {
    pub fn builder(self) -> TestChangelogBuilder {
        match self {
            ChangelogScenario::Standard => Self::standard(),
            ChangelogScenario::WithTitle => Self::standard().title("Changelog"),
            ChangelogScenario::FirstRelease => TestChangelogBuilder::new()
                .section(TestSection::unreleased().entry("* Item A").entry("* Item B")),
            ChangelogScenario::MissingUnreleased => {
                TestChangelogBuilder::new().raw("## [FOO]\n\n* Item A\n* Item B")
            }
            ChangelogScenario::EmptyUnreleased => TestChangelogBuilder::new()
                .raw("## [Unreleased]\n\n\n\n## [1.0.0]\n\n* Item A\n* Item B"),
            ChangelogScenario::Compact => TestChangelogBuilder::new().raw(
                "## [Unreleased]\n* Item A\n* Item B\n## [1.0.0] - 2020-05-02\n* Item C\n* Item D",
            ),
            ChangelogScenario::Crlf => TestChangelogBuilder::new().raw(
                "\r\n\r\n## [Unreleased]\r\n\r\n* Item A\r\n* Item B\r\n\r\n## [1.0.0] - 2020-05-02\r\n\r\n* Item C\r\n* Item D",
            ),
            ChangelogScenario::WithLinks => Self::standard()
                .link(
                    "Unreleased",
                    "https://github.com/release-it/release-it/compare/1.0.0..HEAD",
                )
                .link(
                    "1.0.0",
                    "https://github.com/release-it/release-it/compare/0.0.0...1.0.0",
                ),
        }
    }

    /// write the scenario into a temporary directory
    pub fn build(self) -> Result<TestChangelog, Box<dyn std::error::Error>> {
        self.builder().build()
    }

    fn standard() -> TestChangelogBuilder {
        TestChangelogBuilder::new()
            .section(TestSection::unreleased().entry("* Item A").entry("* Item B"))
            .section(
                TestSection::new("1.0.0")
                    .date("2020-05-02")
                    .entry("* Item C")
                    .entry("* Item D"),
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_scenario() {
        let changelog = ChangelogScenario::Standard.build().unwrap();
        assert_eq!(
            changelog.read().unwrap(),
            "## [Unreleased]\n\n* Item A\n* Item B\n\n## [1.0.0] - 2020-05-02\n\n* Item C\n* Item D"
        );
    }

    #[test]
    fn test_with_links_scenario() {
        let text = ChangelogScenario::WithLinks.builder().render();
        assert!(text.ends_with(
            "* Item D\n\n[Unreleased]: https://github.com/release-it/release-it/compare/1.0.0..HEAD\n[1.0.0]: https://github.com/release-it/release-it/compare/0.0.0...1.0.0"
        ));
    }
}
