//! webex-response - compose Webex bot messages from the command line
//!
//! Prints the JSON body a bot would post to the messages API.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde_json::Value;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use webex_response::config::Config;
use webex_response::models::{parse_card, response_custom_format, response_from_adaptive_card};
use webex_response::Response;

#[derive(Parser)]
#[command(name = "webex-response")]
#[command(about = "Compose Webex bot message payloads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Addressing and output options shared by the compose commands
#[derive(Args)]
struct Target {
    /// Destination room ID (overrides config)
    #[arg(short, long)]
    room: Option<String>,

    /// Parent message ID for a threaded reply (overrides config)
    #[arg(short, long)]
    parent: Option<String>,

    /// Print the full record, nulls included, instead of the wire body
    #[arg(long)]
    full: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compose a text/markdown/HTML message
    Compose {
        /// Plain-text body
        #[arg(short, long, default_value = "")]
        text: String,

        /// Markdown body
        #[arg(short, long, default_value = "")]
        markdown: String,

        /// HTML body
        #[arg(long)]
        html: Option<String>,

        /// File URL to attach (repeatable)
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Attachment as a JSON object (repeatable)
        #[arg(short, long = "attachment")]
        attachments: Vec<String>,

        #[command(flatten)]
        target: Target,
    },

    /// Wrap an adaptive card JSON file in a message
    Card {
        /// Path to the card JSON
        path: PathBuf,

        #[command(flatten)]
        target: Target,
    },

    /// Show or change stored defaults
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show the config file location and current values
    Show,

    /// Store default values
    Set {
        /// Default room ID
        #[arg(long)]
        room: Option<String>,

        /// Default parent message ID
        #[arg(long)]
        parent: Option<String>,

        /// Indent JSON output
        #[arg(long)]
        pretty: Option<bool>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging (stderr, so stdout stays pure JSON)
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Compose {
            text,
            markdown,
            html,
            files,
            attachments,
            target,
        } => {
            let attachments = attachments
                .iter()
                .map(|raw| serde_json::from_str::<Value>(raw))
                .collect::<Result<Vec<_>, _>>()
                .context("Attachment is not valid JSON")?;

            let mut response =
                response_custom_format(text, markdown, Some(files), Some(attachments));
            if let Some(html) = html {
                response.set_html(html);
            }
            print_response(response, &target, &load_or_default())?;
        }
        Commands::Card { path, target } => {
            tracing::info!("Loading card from {}", path.display());
            let raw = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let card = parse_card(&raw)?;
            print_response(response_from_adaptive_card(&card), &target, &load_or_default())?;
        }
        Commands::Config { action } => {
            let mut config = Config::load()?;
            match action {
                Some(ConfigAction::Set {
                    room,
                    parent,
                    pretty,
                }) => {
                    apply_settings(&mut config, room, parent, pretty);
                    config.save()?;
                    println!("Saved {}", Config::config_path()?.display());
                }
                Some(ConfigAction::Show) | None => {
                    println!("Config file: {}", Config::config_path()?.display());
                    println!("{}", toml::to_string_pretty(&config)?);
                }
            }
        }
    }

    Ok(())
}

/// Stored defaults for compose commands, which still work without a config file.
fn load_or_default() -> Config {
    or_default(Config::load())
}

fn or_default(loaded: Result<Config>) -> Config {
    loaded.unwrap_or_else(|e| {
        tracing::warn!("Could not load config, using defaults: {:#}", e);
        Config::default()
    })
}

/// Overwrite the settings given on the command line; the rest are kept.
fn apply_settings(
    config: &mut Config,
    room: Option<String>,
    parent: Option<String>,
    pretty: Option<bool>,
) {
    if room.is_some() {
        config.room_id = room;
    }
    if parent.is_some() {
        config.parent_id = parent;
    }
    if let Some(pretty) = pretty {
        config.pretty = pretty;
    }
}

/// Apply addressing from flags, then config, to `response`.
fn address(response: &mut Response, target: &Target, config: &Config) {
    if let Some(room) = target.room.as_ref().or(config.room_id.as_ref()) {
        response.set_room_id(room.as_str());
    }
    if let Some(parent) = target.parent.as_ref().or(config.parent_id.as_ref()) {
        response.set_parent_id(parent.as_str());
    }
}

fn render(response: &Response, full: bool, pretty: bool) -> Result<String> {
    let out = match (full, pretty) {
        (true, true) => response.to_json_pretty()?,
        (true, false) => response.to_json()?,
        (false, true) => serde_json::to_string_pretty(&response.as_dict())?,
        (false, false) => serde_json::to_string(&response.as_dict())?,
    };
    Ok(out)
}

fn print_response(mut response: Response, target: &Target, config: &Config) -> Result<()> {
    address(&mut response, target, config);
    if response.room_id().is_none() {
        tracing::warn!("No room ID set; the messages API will reject this body");
    }
    println!("{}", render(&response, target.full, config.pretty)?);
    Ok(())
}
