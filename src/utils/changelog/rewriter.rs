// release rewrite of the unreleased heading

use super::heading::{self, UNRELEASED, heading_markup};
use super::types::ChangelogDocument;
use chrono::{Local, NaiveDate};
use semver::Version;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteOptions {
    /// put a fresh, empty unreleased heading above the new version heading
    pub add_unreleased: bool,
}

/// today's local calendar date
pub fn release_date() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// `## [1.2.3] - 2024-01-31`
pub fn version_heading(version: &Version, date: NaiveDate) -> String {
    format!("{} - {}", heading_markup(&version.to_string()), format_date(date))
}

/// turn the unreleased heading into a dated version heading
///
/// only the first unreleased heading is replaced, using the same line-start
/// grammar as validation. without such a heading the text is returned as is.
pub fn rewrite(
    document: &ChangelogDocument,
    version: &Version,
    date: NaiveDate,
    options: RewriteOptions,
) -> String {
    let eol = document.line_ending.as_str();
    let mut block = String::new();
    if options.add_unreleased {
        block.push_str(&heading_markup(UNRELEASED));
        block.push_str(eol);
        block.push_str(eol);
    }
    block.push_str(&version_heading(version, date));

    let content = &document.content;
    let Some(found) = heading::find_heading(content, UNRELEASED) else {
        return content.clone();
    };
    let end = found.start + heading_markup(UNRELEASED).len();

    let mut text = String::with_capacity(content.len() + block.len());
    text.push_str(&content[..found.start]);
    text.push_str(&block);
    text.push_str(&content[end..]);
    text
}

/// trim the text and end it with exactly one line break
pub fn normalize(text: &str, eol: &str) -> String {
    let mut normalized = text.trim().to_string();
    normalized.push_str(eol);
    normalized
}
