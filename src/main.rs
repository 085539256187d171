use std::path::PathBuf;

use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use sporldata::{
    cli,
    config::{self, Config},
    error,
    types::{AlbumGroup, AlbumGroups, MatchPolicy},
    utils,
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  author=env!("CARGO_PKG_AUTHORS"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Collect track metadata and audio features into the dataset file
    Collect(CollectOptions),

    /// Show which catalog artist each configured name resolves to
    Artists(ArtistsOptions),

    /// Print the normalized form of a text
    Normalize(NormalizeOptions),

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct CollectOptions {
    /// Artist to collect; can be repeated and replaces the configured list
    #[clap(long = "artist", action = ArgAction::Append)]
    pub artists: Vec<String>,

    /// Dataset file to write
    #[clap(long)]
    pub output: Option<PathBuf>,

    /// Minimum pause between two track fetches in milliseconds
    #[clap(long)]
    pub pace_ms: Option<u64>,

    /// How to pick among artists sharing a name (exact, first)
    #[clap(long = "match", value_parser = utils::parse_match_policy)]
    pub match_policy: Option<MatchPolicy>,

    /// Album group(s) to include; can be repeated
    #[clap(
        long = "type",
        value_parser = utils::parse_album_group,
        action = ArgAction::Append,
        num_args = 1
    )]
    pub album_groups: Vec<AlbumGroup>,

    /// Normalize track, album and artist names to ASCII
    #[clap(long)]
    pub normalize: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ArtistsOptions {
    /// Artist to resolve; can be repeated and replaces the configured list
    #[clap(long = "artist", action = ArgAction::Append)]
    pub artists: Vec<String>,

    /// How to pick among artists sharing a name (exact, first)
    #[clap(long = "match", value_parser = utils::parse_match_policy)]
    pub match_policy: Option<MatchPolicy>,
}

#[derive(Parser, Debug, Clone)]
pub struct NormalizeOptions {
    text: String,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn apply_collect_options(config: &mut Config, opt: CollectOptions) {
    if !opt.artists.is_empty() {
        config.artist_names = opt.artists;
    }
    if let Some(output) = opt.output {
        config.output_path = output;
    }
    if let Some(pace) = opt.pace_ms {
        config.request_pace_ms = pace;
    }
    if let Some(policy) = opt.match_policy {
        config.match_policy = policy;
    }
    if !opt.album_groups.is_empty() {
        config.album_groups = AlbumGroups(opt.album_groups);
    }
    if opt.normalize {
        config.normalize_text = true;
    }
}

fn load_config() -> Config {
    match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration. Err: {}", e);
        }
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    match cli.command {
        Command::Collect(opt) => {
            let mut config = load_config();
            apply_collect_options(&mut config, opt);
            cli::collect(config).await
        }
        Command::Artists(opt) => {
            let mut config = load_config();
            if !opt.artists.is_empty() {
                config.artist_names = opt.artists;
            }
            if let Some(policy) = opt.match_policy {
                config.match_policy = policy;
            }
            cli::artists(config).await
        }
        Command::Normalize(opt) => cli::normalize(&opt.text),
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
    }
}
