//! Hushwire command-line tool.
//!
//! Runs the messaging crypto operations on base64 text, for inspecting keys
//! and sealed messages during development.
//!
//! # Usage
//!
//! ```bash
//! hushwire keygen
//! hushwire derive --private <OWN_PRIVATE> --peer <PEER_PUBLIC>
//! hushwire seal --shared <SECRET> --chat chat-42 --sender alice "hello"
//! hushwire open --shared <SECRET> --chat chat-42 --sender alice <SEALED>
//! ```

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use hushwire_core::{CoreConfig, CoreError, CryptoService, MessageCrypto};
use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Hushwire messaging crypto tool
#[derive(Parser, Debug)]
#[command(name = "hushwire")]
#[command(about = "X25519 key agreement and ChaCha20-Poly1305 message sealing")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    /// Maximum plaintext size in bytes
    #[arg(long, default_value_t = CoreConfig::default().max_plaintext_bytes, global = true)]
    max_plaintext_bytes: usize,

    /// Maximum chat or sender identifier size in bytes
    #[arg(long, default_value_t = CoreConfig::default().max_identifier_bytes, global = true)]
    max_identifier_bytes: usize,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Generate an identity keypair
    Keygen,

    /// Print the public key for a private key
    PublicKey {
        /// Base64 private key
        #[arg(long)]
        private: String,
    },

    /// Derive the shared secret with a peer
    Derive {
        /// Our base64 private key
        #[arg(long)]
        private: String,

        /// Peer's base64 public key
        #[arg(long)]
        peer: String,
    },

    /// Seal a message
    Seal {
        /// Base64 shared secret
        #[arg(long)]
        shared: String,

        /// Chat identifier
        #[arg(long)]
        chat: String,

        /// Sender identifier
        #[arg(long)]
        sender: String,

        /// Message text
        plaintext: String,
    },

    /// Open a sealed message
    Open {
        /// Base64 shared secret
        #[arg(long)]
        shared: String,

        /// Chat identifier
        #[arg(long)]
        chat: String,

        /// Sender identifier
        #[arg(long)]
        sender: String,

        /// Base64 sealed message
        sealed: String,
    },
}

/// Errors reported by the command-line tool.
#[derive(Error, Debug)]
enum CliError {
    /// Crypto operation failed
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Writing output failed
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::Keygen => "keygen",
            Self::PublicKey { .. } => "public-key",
            Self::Derive { .. } => "derive",
            Self::Seal { .. } => "seal",
            Self::Open { .. } => "open",
        }
    }
}

impl Args {
    fn config(&self) -> CoreConfig {
        CoreConfig {
            max_plaintext_bytes: self.max_plaintext_bytes,
            max_identifier_bytes: self.max_identifier_bytes,
        }
    }
}

fn run(
    command: &Command,
    service: &impl MessageCrypto,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Keygen => {
            let pair = service.generate_identity_keypair()?;
            writeln!(out, "private: {}", pair.private_key.as_str())?;
            writeln!(out, "public:  {}", pair.public_key)?;
        },
        Command::PublicKey { private } => {
            writeln!(out, "{}", service.public_key_of(private)?)?;
        },
        Command::Derive { private, peer } => {
            let shared = service.derive_shared_secret(private, peer)?;
            writeln!(out, "{}", shared.as_str())?;
        },
        Command::Seal { shared, chat, sender, plaintext } => {
            writeln!(out, "{}", service.seal_message(shared, chat, sender, plaintext)?)?;
        },
        Command::Open { shared, chat, sender, sealed } => {
            writeln!(out, "{}", service.open_message(shared, chat, sender, sealed)?)?;
        },
    }
    Ok(())
}

fn main() -> Result<(), CliError> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let service = CryptoService::new(args.config());
    let limits = service.config();
    tracing::debug!(
        command = args.command.name(),
        max_plaintext_bytes = limits.max_plaintext_bytes,
        max_identifier_bytes = limits.max_identifier_bytes,
        "running command"
    );

    let result = run(&args.command, &service, &mut io::stdout().lock());
    if let Err(err) = &result {
        tracing::error!(error = %err, "command failed");
    }
    result
}
