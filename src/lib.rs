pub mod error;
pub mod utils;

pub use error::*;
pub use utils::changelog::{
    ChangelogConfig, ChangelogDocument, Increment, LineEnding, ReleaseContext, ReleaseOutcome,
    ReleaseSession, RepositoryInfo, RewriteOptions, SectionHeading, UNRELEASED, VersionTag,
    VersionUrlFormats, build_links, extract_section, release_date, resolve_latest_release, rewrite,
    select_release_section, sync_links, validate_structure,
};
pub use utils::config::CONFIG_FILE_NAME;
