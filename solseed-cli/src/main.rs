//! Solseed CLI
//!
//! Generates or restores a recovery phrase and derives Solana accounts from it.
//! Configuration comes from `SOLSEED_*` environment variables, overridden by flags.

mod display;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use solseed::account::AccountSequencer;
use solseed::crypto::mnemonic::parse_mnemonic;
use solseed::{Error, Session, WalletAccount, WalletConfig};

use display::{render_card, render_phrase, AccountView, RevealState};

#[derive(Parser)]
#[command(name = "solseed")]
#[command(about = "Deterministic Solana wallet derivation")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print JSON instead of text cards
    #[arg(long, global = true)]
    json: bool,

    /// Show secret keys (and the recovery phrase)
    #[arg(long, global = true)]
    reveal: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new recovery phrase and derive accounts from it
    New {
        /// Number of accounts to derive
        #[arg(short, long, default_value_t = 1)]
        accounts: u32,
        /// Phrase length in words (12, 15, 18, 21 or 24)
        #[arg(short, long)]
        words: Option<usize>,
    },
    /// Derive accounts from an existing recovery phrase
    Derive {
        /// Recovery phrase, quoted
        #[arg(short, long)]
        phrase: String,
        /// Number of accounts to derive
        #[arg(short, long, default_value_t = 1)]
        count: u32,
        /// First account index
        #[arg(short, long)]
        start: Option<u32>,
    },
    /// Check a recovery phrase's words and checksum
    Validate {
        /// Recovery phrase words
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },
    /// Print the derivation path of an account index
    Path { index: u32 },
}

#[derive(Serialize)]
struct SessionOutput<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    phrase: Option<String>,
    accounts: Vec<AccountView<'a>>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .init();

    let mut config = WalletConfig::from_env().context("loading SOLSEED_* configuration")?;
    info!("Solseed CLI v{}", solseed::VERSION);

    match &cli.command {
        Commands::New { accounts, words } => {
            if let Some(words) = words {
                config.word_count = *words;
            }
            let session = Session::create(&config)?;
            print_session(&cli, session, *accounts, true)?;
        }
        Commands::Derive { phrase, count, start } => {
            if let Some(start) = start {
                config.start_index = *start;
            }
            let session = Session::restore(phrase, &config)?;
            print_session(&cli, session, *count, false)?;
        }
        Commands::Validate { words } => match parse_mnemonic(&words.join(" ")) {
            Ok(mnemonic) => println!("valid ({} words)", mnemonic.word_count()),
            Err(Error::Checksum(_)) => bail!("invalid: checksum does not match"),
            Err(e) => bail!("invalid: {}", e),
        },
        Commands::Path { index } => {
            let sequencer = AccountSequencer::default().with_coin_type(config.coin_type);
            println!("{}", sequencer.path_for(*index)?);
        }
    }

    Ok(())
}

fn print_session(cli: &Cli, mut session: Session, count: u32, generated: bool) -> anyhow::Result<()> {
    let mut accounts = (0..count)
        .map(|_| session.create_account())
        .collect::<solseed::Result<Vec<WalletAccount>>>()?;

    let mut reveal = RevealState::default();
    if cli.reveal {
        for account in &accounts {
            reveal.toggle(account.index);
        }
    }
    reveal.apply(&mut accounts);

    // a freshly generated phrase is always shown once so it can be backed up
    let show_phrase = generated || cli.reveal;

    if cli.json {
        let output = SessionOutput {
            phrase: show_phrase.then(|| session.export_phrase()),
            accounts: accounts.iter().map(AccountView::from).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("{}\n", render_phrase(&session.export_phrase(), show_phrase));
    for account in &accounts {
        println!("{}\n", render_card(account));
    }
    Ok(())
}
