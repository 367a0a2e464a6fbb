//! stealth-demo - command line surface over the stealth-address core.
//!
//! Chain connection, transaction assembly, and announcement discovery stay
//! out of scope here; this binary only exercises key generation, address
//! display, payment computation, and scanning over announcements supplied
//! on stdin (one JSON object per line), the way a real wallet would wrap
//! around this crate once it owns an RPC connection.

use std::io::Read;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use stealthsol_core::account::Account;
use stealthsol_core::announcement::Announcement;
use stealthsol_core::payment::Payment;
use stealthsol_core::scanner;
use stealthsol_core::storage::EncryptedAccountFile;

#[derive(Parser)]
#[command(name = "stealth-demo")]
#[command(about = "Demo CLI for the stealth-address core (no chain connection)")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new stealth account and encrypt it to a file.
    Keygen {
        /// Path to write the encrypted account file. Defaults to
        /// `~/.stealthsol/account.enc.json`.
        #[arg(short, long)]
        out: Option<String>,
    },

    /// Show the meta-address for an encrypted account file.
    Address {
        #[arg(short, long)]
        file: Option<String>,
    },

    /// Compute a stealth payment for a recipient meta-address and print the
    /// resulting announcement JSON.
    Pay {
        /// Recipient meta-address, st:sol:... form.
        #[arg(short, long)]
        to: String,
    },

    /// Scan announcements (one JSON object per line on stdin) against an
    /// encrypted account file.
    Scan {
        #[arg(short, long)]
        file: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Keygen { out } => run_keygen(&resolve_path(out)?),
        Commands::Address { file } => run_address(&resolve_path(file)?),
        Commands::Pay { to } => run_pay(&to),
        Commands::Scan { file } => run_scan(&resolve_path(file)?),
    }
}

fn resolve_path(explicit: Option<String>) -> Result<String> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    stealthsol_core::storage::default_account_path()
        .map(|p| p.to_string_lossy().into_owned())
        .context("could not determine home directory; pass --file explicitly")
}

fn run_keygen(out: &str) -> Result<()> {
    let password = rpassword::prompt_password("New account password: ")
        .context("failed to read password")?;
    let confirm = rpassword::prompt_password("Confirm password: ")
        .context("failed to read password")?;
    if password != confirm {
        anyhow::bail!("passwords did not match");
    }

    let account = Account::generate();
    let encrypted = EncryptedAccountFile::encrypt(account.keys(), &password)
        .context("failed to encrypt generated keys")?;

    if let Some(parent) = std::path::Path::new(out).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_string_pretty(&encrypted)?)
        .with_context(|| format!("failed to write {out}"))?;

    println!("{}", "Stealth account generated.".green().bold());
    println!("Meta-address: {}", account.meta_address_string().yellow());
    println!("Encrypted keys written to: {out}");
    Ok(())
}

fn run_address(file: &str) -> Result<()> {
    let password = rpassword::prompt_password("Account password: ")
        .context("failed to read password")?;
    let account = load_account(file, &password)?;
    println!("{}", account.meta_address_string());
    Ok(())
}

fn run_pay(to: &str) -> Result<()> {
    let payment = Payment::for_meta_address_str(to).context("invalid recipient meta-address")?;
    println!(
        "{}",
        format!("Stealth address: {}", hex::encode(payment.stealth_address)).cyan()
    );
    println!("{}", payment.announcement().encode());
    Ok(())
}

fn run_scan(file: &str) -> Result<()> {
    let password = rpassword::prompt_password("Account password: ")
        .context("failed to read password")?;
    let account = load_account(file, &password)?;

    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("failed to read announcements from stdin")?;

    let announcements: Vec<Announcement> = input
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| Announcement::decode(line).ok())
        .collect();

    let found = scanner::scan(&account, announcements);

    if found.is_empty() {
        println!("{}", "No incoming payments found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Found {} payment(s):", found.len()).green().bold()
    );
    for payment in &found {
        println!("  {}", hex::encode(payment.stealth_address));
    }
    Ok(())
}

fn load_account(file: &str, password: &str) -> Result<Account> {
    let json = std::fs::read_to_string(file).with_context(|| format!("failed to read {file}"))?;
    let encrypted: EncryptedAccountFile =
        serde_json::from_str(&json).context("failed to parse account file")?;
    let keys = encrypted
        .decrypt(password)
        .map_err(|e| anyhow::anyhow!("failed to decrypt account: {e}"))?;
    Ok(Account::from_stealth_keys(keys))
}
