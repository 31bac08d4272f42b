// section heading grammar: `## [label]` at the start of a line

pub const HEADING_PREFIX: &str = "## [";
pub const UNRELEASED: &str = "Unreleased";

/// a `## [label]` heading located inside a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeading {
    pub label: String,
    /// byte offset of the `#` starting the heading
    pub start: usize,
    /// byte offset right after the heading line's line break
    pub content_start: usize,
}

impl SectionHeading {
    pub fn is_unreleased(&self) -> bool {
        self.label == UNRELEASED
    }
}

/// heading markup for a label, without line break
pub fn heading_markup(label: &str) -> String {
    format!("{}{}]", HEADING_PREFIX, label)
}

fn is_line_start(text: &str, offset: usize) -> bool {
    offset == 0 || text.as_bytes()[offset - 1] == b'\n'
}

/// parse the heading starting at `start`, if the markup there is complete
fn heading_at(text: &str, start: usize) -> Option<SectionHeading> {
    let after_prefix = start + HEADING_PREFIX.len();
    let line_end = text[start..]
        .find('\n')
        .map(|pos| start + pos)
        .unwrap_or(text.len());

    let close = text[after_prefix..line_end].find(']')?;
    let label = &text[after_prefix..after_prefix + close];
    if label.is_empty() {
        return None;
    }

    let content_start = if line_end < text.len() {
        line_end + 1
    } else {
        text.len()
    };

    Some(SectionHeading {
        label: label.to_string(),
        start,
        content_start,
    })
}

/// find the first heading of any label at or after `from`
pub fn next_heading(text: &str, from: usize) -> Option<SectionHeading> {
    let mut cursor = from;
    while let Some(pos) = text[cursor..].find(HEADING_PREFIX) {
        let start = cursor + pos;
        if is_line_start(text, start)
            && let Some(heading) = heading_at(text, start)
        {
            return Some(heading);
        }
        cursor = start + HEADING_PREFIX.len();
    }
    None
}

/// all headings in document order
pub fn find_headings(text: &str) -> Vec<SectionHeading> {
    let mut headings = Vec::new();
    let mut cursor = 0;
    while let Some(heading) = next_heading(text, cursor) {
        cursor = heading.content_start;
        headings.push(heading);
    }
    headings
}

/// first heading with exactly this label
pub fn find_heading(text: &str, label: &str) -> Option<SectionHeading> {
    let mut cursor = 0;
    while let Some(heading) = next_heading(text, cursor) {
        if heading.label == label {
            return Some(heading);
        }
        cursor = heading.content_start;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_headings_in_order() {
        let text = "# Changelog\n\n## [Unreleased]\n\n* A\n\n## [1.0.0] - 2020-05-02\n\n* B";
        let headings = find_headings(text);

        let labels: Vec<&str> = headings.iter().map(|h| h.label.as_str()).collect();
        assert_eq!(labels, vec!["Unreleased", "1.0.0"]);
        assert_eq!(headings[0].start, 13);
        assert_eq!(&text[headings[0].content_start..], "\n* A\n\n## [1.0.0] - 2020-05-02\n\n* B");
    }

    #[test]
    fn test_heading_must_start_a_line() {
        let text = "see ## [1.0.0] inline\n### [2.0.0]\n## [0.1.0]";
        let headings = find_headings(text);

        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].label, "0.1.0");
        assert_eq!(headings[0].content_start, text.len());
    }

    #[test]
    fn test_crlf_content_start() {
        let text = "## [Unreleased]\r\n\r\n* A";
        let heading = find_heading(text, UNRELEASED).unwrap();
        assert_eq!(&text[heading.content_start..], "\r\n* A");
    }

    #[test]
    fn test_unterminated_markup_is_ignored() {
        let text = "## [Unreleased\n## []\n## [1.0.0]\n";
        let headings = find_headings(text);
        assert_eq!(headings.len(), 1);
        assert_eq!(headings[0].label, "1.0.0");
    }

    #[test]
    fn test_find_heading_is_case_sensitive() {
        let text = "## [unreleased]\n\n* A";
        assert!(find_heading(text, UNRELEASED).is_none());
        assert!(find_heading(text, "unreleased").is_some());
    }
}
