// testing utilities for generating changelog fixtures

pub mod changelog_builder;
pub mod scenarios;

pub use changelog_builder::{TestChangelog, TestChangelogBuilder, TestSection};
pub use scenarios::ChangelogScenario;
