//! netconf-rpc CLI
//!
//! Renders request envelopes and classifies reply documents offline.
//! Configuration trees are read from JSON files.

use std::fs;
use std::path::Path;

use clap::{Parser, Subcommand};
use netconf_rpc::rpc::{datastore, decode_reply, MessageIdGenerator, RandomIdGenerator};
use netconf_rpc::{Configuration, Method, NetconfError, RpcMessage};
use tracing_subscriber::{fmt, EnvFilter};

/// netconf-rpc CLI
#[derive(Parser, Debug)]
#[command(name = "netconf-rpc")]
#[command(about = "Build NETCONF requests and inspect replies")]
#[command(version)]
struct Args {
    /// Use this message id instead of a random one
    #[arg(short, long, global = true)]
    message_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Lock a datastore
    Lock {
        #[arg(default_value = datastore::CANDIDATE)]
        target: String,
    },

    /// Unlock a datastore
    Unlock {
        #[arg(default_value = datastore::CANDIDATE)]
        target: String,
    },

    /// Fetch a datastore, optionally filtered by a configuration subtree
    GetConfig {
        #[arg(default_value = datastore::RUNNING)]
        source: String,

        /// JSON configuration tree used as a subtree filter (always reads running)
        #[arg(short, long, conflicts_with = "source")]
        filter: Option<String>,
    },

    /// Merge a configuration tree into candidate
    Edit {
        /// JSON configuration tree
        file: String,
    },

    /// Delete the direct children of an address book from candidate
    Delete {
        /// JSON configuration tree
        file: String,
    },

    /// Commit candidate
    Commit,

    /// Discard uncommitted changes
    Discard,

    /// Decode and classify a reply document
    Decode {
        /// File holding one rpc-reply
        file: String,

        /// Treat warnings as errors
        #[arg(short, long)]
        error_on_warning: bool,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,netconf_rpc=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), NetconfError> {
    let method = match args.command {
        Commands::Lock { target } => Method::lock(target),
        Commands::Unlock { target } => Method::unlock(target),
        Commands::GetConfig { source, filter: None } => Method::get_config(source),
        Commands::GetConfig { filter: Some(path), .. } => {
            Method::get_config_filtered(load_configuration(&path)?)
        }
        Commands::Edit { file } => Method::edit_config(load_configuration(&file)?),
        Commands::Delete { file } => Method::delete_config(load_configuration(&file)?),
        Commands::Commit => Method::commit(),
        Commands::Discard => Method::discard_changes(),
        Commands::Decode { file, error_on_warning } => {
            // Without an id the echoed message-id is not checked
            let message_id = args.message_id.unwrap_or_default();
            return print_reply(&file, &message_id, error_on_warning);
        }
    };

    let message_id = match args.message_id {
        Some(id) => id,
        None => RandomIdGenerator.next_id()?,
    };
    let message = RpcMessage::with_message_id(message_id, vec![method]);
    println!("{}", message.encode()?);
    Ok(())
}

fn load_configuration(path: impl AsRef<Path>) -> Result<Configuration, NetconfError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text)
        .map_err(|e| NetconfError::Config(format!("{}: {}", path.display(), e)))
}

fn print_reply(path: &str, message_id: &str, error_on_warning: bool) -> Result<(), NetconfError> {
    let raw = fs::read(path)?;
    let outcome = decode_reply(&raw, message_id, error_on_warning)?;

    println!("ok: {}", outcome.reply.is_ok());
    for error in outcome.reply.errors() {
        println!("{} (type={}, tag={}, path={})", error, error.error_type, error.tag, error.path);
    }
    if let Some(config) = outcome.reply.data() {
        let json = serde_json::to_string_pretty(config)
            .map_err(|e| NetconfError::Encode(e.to_string()))?;
        println!("{}", json);
    }

    match outcome.failure {
        Some(failure) => Err(NetconfError::Rpc(failure)),
        None => Ok(()),
    }
}
