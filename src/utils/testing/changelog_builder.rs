// builder for creating changelog files in temporary directories

use crate::utils::changelog::{ChangelogConfig, LineEnding, UNRELEASED};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// represents one `## [label]` section to be written
#[derive(Debug, Clone)]
pub struct TestSection {
    pub label: String,
    pub date: Option<String>,
    pub entries: Vec<String>,
}

impl TestSection {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            date: None,
            entries: Vec::new(),
        }
    }

    pub fn unreleased() -> Self {
        Self::new(UNRELEASED)
    }

    pub fn date(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    pub fn entry(mut self, entry: impl Into<String>) -> Self {
        self.entries.push(entry.into());
        self
    }
}

/// builder for test changelogs
pub struct TestChangelogBuilder {
    file_name: String,
    title: Option<String>,
    sections: Vec<TestSection>,
    links: Vec<(String, String)>,
    line_ending: LineEnding,
    raw: Option<String>,
    git: bool,
    tags: Vec<String>,
}

impl TestChangelogBuilder {
    pub fn new() -> Self {
        Self {
            file_name: "CHANGELOG.md".to_string(),
            title: None,
            sections: Vec::new(),
            links: Vec::new(),
            line_ending: LineEnding::Lf,
            raw: None,
            git: false,
            tags: Vec::new(),
        }
    }

    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    /// add a `# title` line on top
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn section(mut self, section: TestSection) -> Self {
        self.sections.push(section);
        self
    }

    /// add a `[label]: url` footer line
    pub fn link(mut self, label: impl Into<String>, url: impl Into<String>) -> Self {
        self.links.push((label.into(), url.into()));
        self
    }

    pub fn crlf(mut self) -> Self {
        self.line_ending = LineEnding::CrLf;
        self
    }

    /// write this exact text instead of generating it from sections
    pub fn raw(mut self, content: impl Into<String>) -> Self {
        self.raw = Some(content.into());
        self
    }

    /// turn the temporary directory into a git repository
    pub fn git(mut self) -> Self {
        self.git = true;
        self
    }

    /// add a lightweight tag, implies [`Self::git`]
    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.git = true;
        self.tags.push(name.into());
        self
    }

    /// generated changelog text
    pub fn render(&self) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }

        let mut blocks = Vec::new();
        if let Some(title) = &self.title {
            blocks.push(format!("# {}", title));
        }

        for section in &self.sections {
            let mut heading = format!("## [{}]", section.label);
            if let Some(date) = &section.date {
                heading.push_str(&format!(" - {}", date));
            }
            blocks.push(heading);
            if !section.entries.is_empty() {
                blocks.push(section.entries.join("\n"));
            }
        }

        if !self.links.is_empty() {
            let links: Vec<String> = self
                .links
                .iter()
                .map(|(label, url)| format!("[{}]: {}", label, url))
                .collect();
            blocks.push(links.join("\n"));
        }

        blocks.join("\n\n").replace('\n', self.line_ending.as_str())
    }

    /// write the changelog into a fresh temporary directory
    pub fn build(self) -> Result<TestChangelog, Box<dyn std::error::Error>> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join(&self.file_name);
        let content = self.render();
        fs::write(&path, &content)?;

        if self.git {
            let repo = gix::init(temp_dir.path())?;
            // tags only need to resolve as refs, the target object is never read
            let target = gix::ObjectId::empty_tree(gix::hash::Kind::Sha1);
            let tags_dir = repo.git_dir().join("refs").join("tags");
            fs::create_dir_all(&tags_dir)?;
            for tag in &self.tags {
                fs::write(tags_dir.join(tag), format!("{}\n", target))?;
            }
        }

        Ok(TestChangelog {
            path,
            initial_content: content,
            temp_dir,
        })
    }
}

impl Default for TestChangelogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// a changelog file living in a temporary directory
pub struct TestChangelog {
    path: PathBuf,
    initial_content: String,
    temp_dir: TempDir,
}

impl TestChangelog {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// config pointing at this file
    pub fn config(&self) -> ChangelogConfig {
        ChangelogConfig::default().filename(self.path.to_string_lossy())
    }

    pub fn initial_content(&self) -> &str {
        &self.initial_content
    }

    pub fn read(&self) -> std::io::Result<String> {
        fs::read_to_string(&self.path)
    }

    /// whether the file still holds exactly what was written initially
    pub fn is_untouched(&self) -> std::io::Result<bool> {
        Ok(self.read()? == self.initial_content)
    }
}
