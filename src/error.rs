use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read file: {} ({source})", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write file: {} ({source})", .path.display())]
    FileWrite {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file: {} ({source})", .path.display())]
    ConfigParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing \"Unreleased\" section in {file}")]
    MissingUnreleasedSection { file: String },

    #[error("found {count} \"Unreleased\" sections in {file}, expected exactly one")]
    TooManyUnreleasedSections { file: String, count: usize },

    #[error("missing section \"{label}\" in {file}")]
    MissingSection { label: String, file: String },

    #[error("missing section for previous release (\"{version}\") in {file}")]
    MissingPreviousRelease { version: String, file: String },

    #[error("there are no entries under \"{label}\" section in {file}")]
    EmptySection { label: String, file: String },

    #[error("invalid version section \"{label}\" in {file}: {reason}")]
    InvalidVersion {
        label: String,
        file: String,
        reason: String,
    },

    #[error(
        "invalid section order in {file}: \"{previous}\" must be greater than \"{next}\" which follows it"
    )]
    InvalidSectionOrder {
        file: String,
        previous: String,
        next: String,
    },

    #[error("cannot substitute placeholder \"{placeholder}\" in url template \"{template}\"")]
    TemplateSubstitution {
        placeholder: String,
        template: String,
    },

    #[error("git repository not found in path: {}", .path.display())]
    RepositoryNotFound { path: PathBuf },

    #[error("git error: {0}")]
    Git(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error(
        "cannot determine the latest released version for {file}: no git repository, pass it explicitly or turn off strict latest"
    )]
    UnknownLatestVersion { file: String },

    #[error("cannot derive repository from remote url: {url}")]
    InvalidRemote { url: String },

    #[error("invalid increment: {value}, use 'major', 'minor', 'patch' or a version")]
    InvalidIncrement { value: String },
}

impl Error {
    pub fn template(placeholder: impl Into<String>, template: impl Into<String>) -> Self {
        Error::TemplateSubstitution {
            placeholder: placeholder.into(),
            template: template.into(),
        }
    }

    pub fn git<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self {
        Error::Git(Box::new(err))
    }

    /// check whether this error means the changelog structure itself is broken
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::MissingUnreleasedSection { .. }
                | Error::TooManyUnreleasedSections { .. }
                | Error::MissingSection { .. }
                | Error::MissingPreviousRelease { .. }
                | Error::InvalidVersion { .. }
                | Error::InvalidSectionOrder { .. }
        )
    }
}
