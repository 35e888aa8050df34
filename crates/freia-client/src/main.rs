// ============================================
// File: crates/freia-client/src/main.rs
// ============================================
//! # Freia Client Entry Point
//!
//! ## Creation Reason
//! Command-line front end for the Freia chat client. Reads lines from
//! stdin, sends them, and prints the message log as it grows.
//!
//! ## Main Functionality
//! - CLI argument parsing with clap
//! - Logging initialization with tracing (stderr)
//! - Configuration loading
//! - Interactive chat loop on tokio
//!
//! ## Usage
//! ```bash
//! # Chat (passwords from the environment)
//! export FREIA_CHAT_PASSWORD=... FREIA_SERVER_PASSWORD=...
//! freia-client chat --address 127.0.0.1 --port 9000 --user alice
//!
//! # Chat with a profile file
//! freia-client chat --config ~/.config/freia/client.toml
//!
//! # Other commands
//! freia-client validate --config client.toml   # Validate a profile
//! freia-client check --address 1.2.3.4 --port 9000 --user bob
//! ```
//!
//! ## ⚠️ Important Note for Next Developer
//! - The `ConnectionManager` API is blocking; every call that can block
//!   (key derivation, connect, send, disconnect) runs on `spawn_blocking`
//! - Chat output goes to stdout, diagnostics to stderr
//!
//! ## Last Modified
//! v0.1.0 - Initial CLI implementation

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use clap::{Args, Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use freia_client::{ClientConfig, ConnectionManager};
use freia_common::{DefaultValidator, Validator};

/// Line that ends the chat session.
const QUIT_COMMAND: &str = "/quit";

// ============================================
// CLI Definition
// ============================================

/// Freia encrypted chat client
///
/// Messages are encrypted end-to-end with the chat password and again
/// for the relay with the server password.
#[derive(Parser, Debug)]
#[command(name = "freia-client")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Connect to a relay and chat on stdin/stdout
    ///
    /// Type a line to send it. `/quit` or end of input disconnects.
    Chat(ChatArgs),

    /// Validate a configuration file
    Validate {
        /// Path to configuration file
        #[arg(short, long)]
        config: PathBuf,
    },

    /// Check connection fields against the default validation rules
    Check {
        /// Relay IPv4 address
        #[arg(long)]
        address: String,

        /// Relay port
        #[arg(long)]
        port: String,

        /// Username
        #[arg(short, long)]
        user: String,
    },
}

#[derive(Args, Debug)]
struct ChatArgs {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Relay IPv4 address (overrides the file)
    #[arg(long)]
    address: Option<String>,

    /// Relay port (overrides the file)
    #[arg(long)]
    port: Option<String>,

    /// Username (overrides the file)
    #[arg(short, long)]
    user: Option<String>,

    /// Password shared with chat peers
    #[arg(long, env = "FREIA_CHAT_PASSWORD", hide_env_values = true)]
    chat_password: String,

    /// Password shared with the relay
    #[arg(long, env = "FREIA_SERVER_PASSWORD", hide_env_values = true)]
    server_password: String,
}

// ============================================
// Main
// ============================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = match cli.command {
        Commands::Chat(args) => cmd_chat(args).await,
        Commands::Validate { config } => cmd_validate(config).await,
        Commands::Check {
            address,
            port,
            user,
        } => cmd_check(&address, &port, &user),
    };

    // Handle errors
    if let Err(e) = result {
        init_logging("error");
        error!("{:#}", e);
        std::process::exit(1);
    }
}

// ============================================
// Commands
// ============================================

/// Runs an interactive chat session.
async fn cmd_chat(args: ChatArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => ClientConfig::load(path).await?,
        None => ClientConfig::default(),
    };
    config.apply_overrides(args.address, args.port, args.user);
    config.validate()?;

    init_logging(&config.logging.level);

    let username = config
        .identity
        .username
        .clone()
        .ok_or_else(|| anyhow!("no username: pass --user or set identity.username"))?;

    let client = Arc::new(ConnectionManager::with_options(config.connect_options()));

    // Key derivation is deliberately slow.
    let configured = {
        let client = Arc::clone(&client);
        let address = config.server.address.clone();
        let port = config.server.port.clone();
        let (chat_password, server_password) = (args.chat_password, args.server_password);
        tokio::task::spawn_blocking(move || {
            client.configure(&address, &port, &username, &chat_password, &server_password)
        })
        .await
        .context("configure task failed")?
    };
    if !configured {
        bail!("configuration rejected: check address, port, username and passwords");
    }

    let connected = {
        let client = Arc::clone(&client);
        tokio::task::spawn_blocking(move || client.connect())
            .await
            .context("connect task failed")?
    };
    if !connected {
        bail!(
            "could not connect to {}:{}",
            config.server.address,
            config.server.port
        );
    }

    info!("Chat session started");
    let printed = chat_loop(&client, &config).await?;

    {
        let client = Arc::clone(&client);
        tokio::task::spawn_blocking(move || client.disconnect())
            .await
            .context("disconnect task failed")?;
    }
    print_new(&client, printed);

    info!("Chat session ended");
    Ok(())
}

/// Forwards stdin lines and prints new log lines until the session ends.
///
/// Returns how many log lines have been printed.
async fn chat_loop(
    client: &Arc<ConnectionManager>,
    config: &ClientConfig,
) -> anyhow::Result<usize> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(config.poll_interval());
    let mut printed = 0;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                printed = print_new(client, printed);
                if !client.is_connected() {
                    break;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line.context("reading stdin")? else {
                    break;
                };
                if line.trim() == QUIT_COMMAND {
                    break;
                }
                let sender = Arc::clone(client);
                tokio::task::spawn_blocking(move || sender.send(&line))
                    .await
                    .context("send task failed")?;
                printed = print_new(client, printed);
            }
        }
    }

    Ok(printed)
}

/// Prints log lines after `printed` and returns the new count.
fn print_new(client: &ConnectionManager, printed: usize) -> usize {
    let fresh = client.messages_since(printed);
    for line in &fresh {
        println!("{line}");
    }
    printed + fresh.len()
}

/// Validates configuration file.
async fn cmd_validate(config_path: PathBuf) -> anyhow::Result<()> {
    init_logging("warn");

    let config = ClientConfig::load(&config_path).await?;

    println!("✅ Configuration is valid");
    println!();
    println!("Server:");
    println!("   Address:    {}", config.server.address);
    println!("   Port:       {}", config.server.port);
    println!();
    println!("Identity:");
    println!(
        "   Username:   {}",
        config.identity.username.as_deref().unwrap_or("(not set)")
    );
    println!();
    println!("Connection:");
    println!("   Connect Timeout:  {}s", config.connection.connect_timeout_secs);
    println!("   Poll Interval:    {}ms", config.connection.poll_interval_ms);
    println!();

    Ok(())
}

/// Reports the validator verdict for each connection field.
fn cmd_check(address: &str, port: &str, user: &str) -> anyhow::Result<()> {
    init_logging("warn");

    let validator = DefaultValidator::new();
    let verdicts = [
        ("Address", validator.is_valid_address(address)),
        ("Port", validator.is_valid_port(port)),
        ("Username", validator.is_valid_username(user)),
    ];

    for (field, ok) in verdicts {
        let mark = if ok { "✅" } else { "❌" };
        println!("{mark} {field}");
    }

    if verdicts.iter().all(|(_, ok)| *ok) {
        Ok(())
    } else {
        bail!("one or more fields are invalid")
    }
}

// ============================================
// Helper Functions
// ============================================

/// Initializes the tracing subscriber.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok();
}
