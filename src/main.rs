use clap::{Args, Parser, Subcommand};
use librarian::commands;
use librarian::core::error::{LibrarianError, print_error};
use librarian::semver::{ChangeLevel, DeriveOptions};
use tracing_subscriber::EnvFilter;

/// Release tooling for client-library repositories
#[derive(Parser)]
#[command(name = "librarian")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct Cli {
  /// Increase log verbosity (-v info, -vv debug, -vvv trace)
  #[arg(short, long, global = true, action = clap::ArgAction::Count)]
  verbose: u8,

  /// Only log errors
  #[arg(short, long, global = true, conflicts_with = "verbose")]
  quiet: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Parse, derive and compare version strings
  #[command(subcommand)]
  Version(VersionCommands),

  /// Plan and record library releases from librarian.toml
  #[command(subcommand)]
  Release(ReleaseCommands),
}

/// Policy switches shared by derivation commands
#[derive(Args, Clone, Copy)]
struct PolicyFlags {
  /// Bump the version core of prereleases (restarts the prerelease number at 1)
  #[arg(long)]
  bump_version_core: bool,
  /// Before 1.0, treat minor changes as patches
  #[arg(long)]
  downgrade_pre_ga: bool,
}

impl From<PolicyFlags> for DeriveOptions {
  fn from(flags: PolicyFlags) -> Self {
    DeriveOptions {
      bump_version_core: flags.bump_version_core,
      downgrade_pre_ga_changes: flags.downgrade_pre_ga,
    }
  }
}

#[derive(Subcommand)]
enum VersionCommands {
  /// Show the parts of a version
  Parse {
    /// Version to parse (no leading 'v')
    #[arg(id = "version_arg", value_name = "VERSION")]
    version: String,
    /// Output the parsed version in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Print the next version for a change level
  Next {
    /// Current version
    #[arg(id = "version_arg", value_name = "VERSION")]
    version: String,
    /// Size of the change
    #[arg(long, value_parser = parse_level)]
    level: ChangeLevel,
    #[command(flatten)]
    policy: PolicyFlags,
  },

  /// Print the next version of a preview track
  Preview {
    /// Current preview version (must be a prerelease)
    preview: String,
    /// Current stable version
    stable: String,
    /// Before 1.0, treat minor changes as patches
    #[arg(long)]
    downgrade_pre_ga: bool,
  },

  /// Print the highest valid version (invalid entries are skipped)
  Max {
    /// Candidate versions
    versions: Vec<String>,
  },
}

#[derive(Subcommand)]
enum ReleaseCommands {
  /// Plan a release (classify changes, propose versions)
  Plan {
    /// Name of the library to plan (from librarian.toml `[[libraries]]`)
    name: Option<String>,
    /// Plan all configured libraries
    #[arg(short, long, conflicts_with = "name")]
    all: bool,
    /// Use this change level instead of classifying commits
    #[arg(long, value_parser = parse_level)]
    level: Option<ChangeLevel>,
    #[command(flatten)]
    policy: PolicyFlags,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  /// Record a release in librarian.toml
  Apply {
    /// Name of the library to release
    name: String,
    /// Use this change level instead of classifying commits
    #[arg(long, value_parser = parse_level)]
    level: Option<ChangeLevel>,
    #[command(flatten)]
    policy: PolicyFlags,
    /// Show what would happen without making changes
    #[arg(long)]
    dry_run: bool,
  },
}

fn parse_level(s: &str) -> Result<ChangeLevel, String> {
  s.parse()
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

/// Logs go to stderr; LIBRARIAN_LOG overrides the verbosity flags
fn init_tracing(verbose: u8, quiet: bool) {
  let level = match (quiet, verbose) {
    (true, _) => "error",
    (false, 0) => "warn",
    (false, 1) => "info",
    (false, 2) => "debug",
    (false, _) => "trace",
  };
  let filter = EnvFilter::try_from_env("LIBRARIAN_LOG").unwrap_or_else(|_| EnvFilter::new(level));

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = Cli::parse();
  init_tracing(cli.verbose, cli.quiet);

  let result = match cli.command {
    Commands::Version(version_cmd) => match version_cmd {
      VersionCommands::Parse { version, json } => commands::run_version_parse(version, json),
      VersionCommands::Next {
        version,
        level,
        policy,
      } => commands::run_version_next(version, level, policy.into()),
      VersionCommands::Preview {
        preview,
        stable,
        downgrade_pre_ga,
      } => commands::run_version_preview(
        preview,
        stable,
        DeriveOptions {
          bump_version_core: false,
          downgrade_pre_ga_changes: downgrade_pre_ga,
        },
      ),
      VersionCommands::Max { versions } => commands::run_version_max(versions),
    },

    Commands::Release(release_cmd) => match release_cmd {
      ReleaseCommands::Plan {
        name,
        all,
        level,
        policy,
        json,
      } => commands::run_release_plan(name, all, level, policy.into(), json),
      ReleaseCommands::Apply {
        name,
        level,
        policy,
        dry_run,
      } => commands::run_release_apply(name, level, policy.into(), dry_run),
    },
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: LibrarianError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
