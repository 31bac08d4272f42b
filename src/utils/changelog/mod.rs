// keep a changelog release engine

pub mod config;
pub mod extractor;
pub mod heading;
pub mod increment;
pub mod links;
pub mod repository;
pub mod rewriter;
pub mod session;
pub mod tags;
pub mod template;
pub mod types;
pub mod validator;

pub use config::{ChangelogConfig, VersionUrlFormats};
pub use extractor::{extract_section, select_release_section};
pub use heading::{SectionHeading, UNRELEASED};
pub use increment::Increment;
pub use links::{LinkFooter, LinkFooterEntry, ReleaseLinks, build_links, sync_links};
pub use repository::RepositoryInfo;
pub use rewriter::{RewriteOptions, release_date, rewrite};
pub use session::ReleaseSession;
pub use tags::{VersionTag, resolve_latest_release, version_tags};
pub use types::{ChangelogDocument, LineEnding, ReleaseContext, ReleaseOutcome};
pub use validator::validate_structure;
