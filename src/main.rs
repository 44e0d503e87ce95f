use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use cosmos_stdtx::utils::{get_json_string, logging, parse_json};
use cosmos_stdtx::{
    AccountInfo, BroadcastMode, ClientConfig, KeyEncoding, TransactionBuilder, UnsignedMessageSet,
    UnsignedStdTx, Wallet, DEFAULT_HD_PATH, DEFAULT_PREFIX,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Build, sign and broadcast legacy Cosmos StdTx transactions
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate a fresh 24-word wallet and print it as JSON
    New {
        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,
    },

    /// Print the address for a mnemonic or private key
    Address {
        #[arg(long, env = "COSMOS_MNEMONIC", hide_env_values = true)]
        mnemonic: Option<String>,

        /// Raw private key, takes precedence over the mnemonic
        #[arg(long)]
        private_key: Option<String>,

        #[arg(long, default_value = "hex")]
        encoding: KeyEncoding,

        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        #[arg(long, default_value = DEFAULT_HD_PATH)]
        hd_path: String,
    },

    /// Print the canonical sign bytes for a transaction file
    SignDoc {
        /// UnsignedStdTx or {msgs, fee, memo} JSON file
        #[arg(long)]
        tx: PathBuf,

        #[arg(long)]
        chain_id: String,

        #[arg(long)]
        account_number: u64,

        #[arg(long)]
        sequence: u64,

        /// Also sign the document and print the signature
        #[arg(long, env = "COSMOS_MNEMONIC", hide_env_values = true)]
        mnemonic: Option<String>,

        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        #[arg(long, default_value = DEFAULT_HD_PATH)]
        hd_path: String,
    },

    /// Sign a transaction file with one or more mnemonics and submit it
    Broadcast {
        #[arg(long)]
        tx: PathBuf,

        #[arg(long)]
        chain_id: String,

        /// Repeat for additional signers, in signing order
        #[arg(long, env = "COSMOS_MNEMONIC", hide_env_values = true, required = true)]
        mnemonic: Vec<String>,

        #[arg(long, default_value = "sync")]
        mode: BroadcastMode,

        /// REST endpoint, overrides COSMOS_REST_ENDPOINT
        #[arg(long)]
        endpoint: Option<String>,

        #[arg(long, default_value = DEFAULT_PREFIX)]
        prefix: String,

        #[arg(long, default_value = DEFAULT_HD_PATH)]
        hd_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_from_env();
    let cli = Cli::parse();

    match cli.command {
        Command::New { prefix } => {
            let wallet = Wallet::new_random(&prefix)?;
            let output = serde_json::json!({
                "mnemonic": wallet.mnemonic(),
                "address": wallet.address(),
                "public_key": wallet.public_key_base64(),
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }

        Command::Address {
            mnemonic,
            private_key,
            encoding,
            prefix,
            hd_path,
        } => {
            let wallet = match (private_key, mnemonic) {
                (Some(key), _) => Wallet::from_private_key(&key, encoding, &prefix)?,
                (None, Some(phrase)) => Wallet::from_mnemonic(&phrase, &prefix, &hd_path)?,
                (None, None) => bail!("either --mnemonic or --private-key is required"),
            };
            println!("{}", wallet.address());
        }

        Command::SignDoc {
            tx,
            chain_id,
            account_number,
            sequence,
            mnemonic,
            prefix,
            hd_path,
        } => {
            let builder = TransactionBuilder::new(read_message_set(&tx)?, chain_id)?;
            let account = AccountInfo {
                account_number,
                sequence,
            };
            let bytes = builder.sign_document(account)?;
            println!("{}", String::from_utf8(bytes.clone())?);

            if let Some(phrase) = mnemonic {
                let wallet = Wallet::from_mnemonic(&phrase, &prefix, &hd_path)?;
                let signature = wallet.sign(&bytes);
                if !wallet.verify(&bytes, &signature) {
                    bail!("produced signature does not verify");
                }
                println!("{}", serde_json::to_string_pretty(&signature)?);
            }
        }

        Command::Broadcast {
            tx,
            chain_id,
            mnemonic,
            mode,
            endpoint,
            prefix,
            hd_path,
        } => {
            let mut config = ClientConfig::from_env()?;
            if let Some(endpoint) = endpoint {
                config = config.with_endpoint(&endpoint)?;
            }

            let mut builder =
                TransactionBuilder::new(read_message_set(&tx)?, chain_id)?.with_config(config);
            for phrase in &mnemonic {
                builder = builder.add_signer_from_mnemonic(phrase, &prefix, &hd_path);
            }

            let response = builder.broadcast(mode).await?;
            if let Some(hash) = get_json_string(&response, "txhash") {
                eprintln!("txhash: {}", hash);
            }
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

fn read_message_set(path: &Path) -> Result<UnsignedMessageSet> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value =
        parse_json(&raw).with_context(|| format!("{} is not valid JSON", path.display()))?;

    if value.get("type").is_some() && value.get("value").is_some() {
        let tx: UnsignedStdTx = serde_json::from_value(value)?;
        return Ok(tx.into_message_set());
    }

    let messages: UnsignedMessageSet = serde_json::from_value(value)?;
    Ok(messages)
}
