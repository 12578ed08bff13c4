#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use colored::*;
use meridian_wallet::transaction::{verify_transfer, TransferTx};
use meridian_wallet::wallet::Wallet;

#[derive(Parser)]
#[command(name = "meridian-wallet", about = "Meridian wallet operations")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a new wallet and print its identity
    Generate,
    /// Sign a transfer with a secret key and print the signed transaction
    Sign {
        /// Hex-encoded secret key of the sender
        #[arg(long)]
        secret: String,
        /// Recipient address
        #[arg(long)]
        recipient: String,
        /// Amount to transfer
        #[arg(long)]
        amount: f64,
    },
    /// Verify a transfer signature
    Verify {
        /// Hex-encoded signature (r || s)
        #[arg(long)]
        signature: String,
        /// Sender address
        #[arg(long)]
        sender: String,
        /// Recipient address
        #[arg(long)]
        recipient: String,
        /// Amount transferred
        #[arg(long)]
        amount: f64,
        /// Hex-encoded public key of the sender (x || y)
        #[arg(long)]
        public_key: String,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Generate => {
            let wallet = Wallet::new()?;
            println!("{}", "New wallet".bright_cyan().bold());
            println!("  address:    {}", wallet.address().bright_white());
            println!("  public key: {}", wallet.public_key_hex());
            println!("  secret key: {}", wallet.secret_key_hex().yellow());
            println!();
            println!(
                "{}",
                "Keep the secret key private; anyone holding it can spend from this address."
                    .yellow()
            );
        }
        Command::Sign {
            secret,
            recipient,
            amount,
        } => {
            let wallet = Wallet::from_secret_hex(&secret)?;
            let mut tx: TransferTx = wallet.new_transfer(&recipient, amount);
            tx.sign(wallet.keypair())?;
            println!("{}", serde_json::to_string_pretty(&tx)?);
        }
        Command::Verify {
            signature,
            sender,
            recipient,
            amount,
            public_key,
        } => {
            let public_key_bytes = hex::decode(&public_key)?;
            let valid = verify_transfer(&signature, &sender, &recipient, amount, &public_key_bytes)?;
            if valid {
                println!("{}", "Signature is valid".bright_green());
            } else {
                println!("{}", "Signature is NOT valid".bright_red());
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
