use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use keep_changelog::{
    CONFIG_FILE_NAME, ChangelogConfig, ChangelogDocument, Increment, ReleaseContext,
    ReleaseSession, RepositoryInfo, VersionTag, release_date, resolve_latest_release,
    validate_structure,
};
use log::{LevelFilter, debug, error};
use semver::Version;
use std::path::PathBuf;
use std::process;
use std::str::FromStr;

#[derive(Parser)]
#[command(name = "keep-changelog")]
#[command(version, about = "release tool for Keep a Changelog files", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// configuration file (defaults to keep-changelog.toml in the current directory)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// changelog file, overrides the configured filename
    #[arg(long, global = true)]
    file: Option<PathBuf>,

    /// output format (json or human)
    #[arg(short, long, default_value = "human", global = true)]
    format: OutputFormat,

    /// log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Debug)]
enum OutputFormat {
    Json,
    Human,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "human" => Ok(OutputFormat::Human),
            _ => Err(format!(
                "invalid output format: {}, use 'json' or 'human'",
                s
            )),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// validate the changelog structure
    Check {
        /// version about to be released, no section may be newer
        #[arg(long, value_name = "VERSION")]
        next: Option<String>,
    },

    /// print the release notes for the next release
    Notes {
        #[command(flatten)]
        release: ReleaseArgs,

        /// do not require a section for the latest release
        #[arg(long)]
        no_strict_latest: bool,
    },

    /// turn the unreleased section into a dated release
    Release {
        #[command(flatten)]
        release: ReleaseArgs,

        /// do not require a section for the latest release
        #[arg(long)]
        no_strict_latest: bool,

        /// add a new empty unreleased section above the release
        #[arg(long)]
        add_unreleased: bool,

        /// leave the changelog file untouched
        #[arg(long)]
        keep_unreleased: bool,

        /// maintain the reference links at the end of the file
        #[arg(long)]
        add_version_url: bool,

        /// reference the unreleased link compares against
        #[arg(long)]
        head: Option<String>,

        /// show what would be released without writing anything
        #[arg(long)]
        dry_run: bool,

        /// release date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Args)]
struct ReleaseArgs {
    /// major, minor, patch or an explicit version
    #[arg(short, long, default_value = "patch")]
    increment: String,

    /// republish the notes of an already released version
    #[arg(long)]
    no_increment: bool,

    /// latest released version (defaults to the newest version tag in git)
    #[arg(long)]
    latest: Option<String>,

    /// tag name of the new release
    #[arg(long)]
    tag_name: Option<String>,

    /// tag name of the previous release
    #[arg(long)]
    previous_tag: Option<String>,

    /// repository host, e.g. github.com
    #[arg(long, requires = "repository")]
    host: Option<String>,

    /// repository identifier, e.g. owner/project
    #[arg(long, requires = "host")]
    repository: Option<String>,

    /// git remote url to derive host and repository from
    #[arg(long, conflicts_with_all = ["host", "repository"])]
    remote_url: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let log_level = LevelFilter::from_str(&cli.log_level).unwrap_or_else(|_| {
        eprintln!(
            "invalid log level: {}, using 'warn' instead",
            cli.log_level
        );
        LevelFilter::Warn
    });
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(log_level)
        .init();

    if let Err(err) = run(&cli) {
        error!("{:#}", err);
        let structural = err
            .downcast_ref::<keep_changelog::Error>()
            .is_some_and(|e| e.is_structural());
        process::exit(if structural { 2 } else { 1 });
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut config = load_config(cli)?;
    if let Some(file) = &cli.file {
        config.filename = file.to_string_lossy().into_owned();
    }
    debug!("using configuration {:?}", config);

    match &cli.command {
        Commands::Check { next } => handle_check(&config, &cli.format, next.as_deref()),
        Commands::Notes {
            release,
            no_strict_latest,
        } => {
            if *no_strict_latest {
                config.strict_latest = false;
            }
            handle_notes(config, &cli.format, release)
        }
        Commands::Release {
            release,
            no_strict_latest,
            add_unreleased,
            keep_unreleased,
            add_version_url,
            head,
            dry_run,
            date,
        } => {
            if *no_strict_latest {
                config.strict_latest = false;
            }
            config.add_unreleased |= *add_unreleased;
            config.keep_unreleased |= *keep_unreleased;
            config.add_version_url |= *add_version_url;
            if let Some(head) = head {
                config.head = head.clone();
            }
            let date = date.unwrap_or_else(release_date);
            handle_release(config, &cli.format, release, *dry_run, date)
        }
    }
}

fn load_config(cli: &Cli) -> Result<ChangelogConfig> {
    match &cli.config {
        Some(path) => ChangelogConfig::load_from_file(path)
            .with_context(|| format!("failed to load configuration {}", path.display())),
        None => ChangelogConfig::load_or_default(".")
            .with_context(|| format!("failed to load {}", CONFIG_FILE_NAME)),
    }
}

fn parse_version(value: &str) -> Result<Version> {
    Version::parse(value.trim_start_matches('v'))
        .with_context(|| format!("invalid version: {}", value))
}

fn render_tag(config: &ChangelogConfig, version: &Version) -> Result<String> {
    config
        .render_tag(version)
        .with_context(|| format!("invalid tag format: {}", config.tag_format))
}

/// assemble the release context the way a release host would
fn build_context(
    config: &ChangelogConfig,
    document: &ChangelogDocument,
    args: &ReleaseArgs,
) -> Result<ReleaseContext> {
    let latest = match &args.latest {
        Some(latest) => {
            let version = parse_version(latest)?;
            Some(VersionTag {
                name: render_tag(config, &version)?,
                version,
            })
        }
        None => {
            let strict = config.strict_latest && !args.no_increment;
            resolve_latest_release(document, config, strict)?
        }
    };
    let latest_tag = latest.as_ref().map(|tag| tag.name.clone());
    let latest = latest.map(|tag| tag.version);
    let increment: Increment = args.increment.parse()?;

    let version = if args.no_increment {
        match (&increment, &latest) {
            (Increment::Exact(version), _) => version.clone(),
            (_, Some(latest)) => latest.clone(),
            (_, None) => bail!("nothing has been released yet, cannot republish notes"),
        }
    } else {
        let base = latest.clone().unwrap_or_else(|| Version::new(0, 0, 0));
        increment.apply(&base)
    };

    let tag_name = match &args.tag_name {
        Some(tag) => tag.clone(),
        None => render_tag(config, &version)?,
    };
    let previous_tag = args.previous_tag.clone().or(latest_tag);

    let mut context = ReleaseContext::new(version)
        .tag_name(tag_name)
        .previous_tag(previous_tag)
        .previous_release(latest)
        .increment(!args.no_increment);

    if let (Some(host), Some(repository)) = (&args.host, &args.repository) {
        context = context.repository(RepositoryInfo::new(host, repository));
    } else if let Some(url) = &args.remote_url {
        context = context.repository(RepositoryInfo::parse_remote(url)?);
    }

    debug!("release context {:?}", context);
    Ok(context)
}

fn open_session(
    config: ChangelogConfig,
    args: &ReleaseArgs,
    dry_run: bool,
) -> Result<ReleaseSession> {
    let document = ChangelogDocument::load(&config.filename)?;
    let context = build_context(&config, &document, args)?.dry_run(dry_run);
    Ok(ReleaseSession::new(document, config, context)?)
}

fn handle_check(
    config: &ChangelogConfig,
    format: &OutputFormat,
    version: Option<&str>,
) -> Result<()> {
    let document = ChangelogDocument::load(&config.filename)?;
    let version = version.map(parse_version).transpose()?;
    validate_structure(&document, version.as_ref())?;

    let versions = document.versions();
    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "file": document.path,
                "valid": true,
                "versions": versions,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => {
            println!(
                "{}: ok ({} released versions)",
                document.file_name(),
                versions.len()
            );
        }
    }
    Ok(())
}

fn handle_notes(config: ChangelogConfig, format: &OutputFormat, args: &ReleaseArgs) -> Result<()> {
    let mut session = open_session(config, args, true)?;
    let section = session.notes_section();
    let version = session.context().version.clone();
    let notes = session.release_notes()?;

    match format {
        OutputFormat::Json => {
            let report = serde_json::json!({
                "version": version,
                "section": section,
                "notes": notes,
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Human => println!("{}", notes),
    }
    Ok(())
}

fn handle_release(
    config: ChangelogConfig,
    format: &OutputFormat,
    args: &ReleaseArgs,
    dry_run: bool,
    date: NaiveDate,
) -> Result<()> {
    let session = open_session(config, args, dry_run)?;
    let outcome = session.publish(date)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Human => {
            println!("release {} ({})", outcome.version, outcome.date);
            println!();
            println!("{}", outcome.notes);
            println!();
            if outcome.written {
                println!("updated {}", outcome.path.display());
            } else {
                println!("{} left untouched", outcome.path.display());
            }
        }
    }
    Ok(())
}
