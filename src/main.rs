//! Command-line front end for the bytecrypt ciphers.

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use log::info;

use bytecrypt::api::{self, CipherKey};
use bytecrypt::rsa::KeyGenConfig;
use bytecrypt::util::file_ops::{format_file_size, read_file, write_file};
use bytecrypt::{Algorithm, Config, KeyStore, RsaOaep};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(
    after_help = "EXAMPLES:\n  \n# Encrypt a file with AES-128\nbytecrypt encrypt --algorithm aes --key 0123456789abcdef --input notes.txt --output notes.enc\n\n# Generate an RSA key pair in ./keys\nbytecrypt --keys-dir ./keys keygen --key-size 2048\n\n# Decrypt with the stored private key\nbytecrypt --keys-dir ./keys decrypt --algorithm rsa --input notes.enc --output notes.txt"
)]
struct Cli {
    /// Directory holding public_key.json and private_key.json
    #[arg(long, global = true, value_name = "DIR")]
    keys_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file
    Encrypt(CipherArgs),
    /// Decrypt a file
    Decrypt(CipherArgs),
    /// Generate and store a new RSA key pair
    Keygen {
        /// Modulus size in bits (even, at least 1024)
        #[arg(long)]
        key_size: Option<u32>,
    },
    /// Import a public key record ({"e", "n", "key_size"})
    ImportPublic {
        /// Path to the JSON record
        file: PathBuf,
    },
    /// Import a private key record ({"d", "n", "key_size"})
    ImportPrivate {
        /// Path to the JSON record
        file: PathBuf,
    },
    /// Print a stored key as a text block
    Export {
        /// Export the private key instead of the public key
        #[arg(long)]
        private: bool,
    },
}

#[derive(clap::Args)]
struct CipherArgs {
    /// One of aes, des, tripledes (3des) or rsa
    #[arg(short, long)]
    algorithm: Algorithm,

    /// Path to the input file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to the output file
    #[arg(short, long)]
    output: PathBuf,

    /// Symmetric key as text, used as its UTF-8 bytes
    #[arg(short, long, conflicts_with = "key_hex")]
    key: Option<String>,

    /// Symmetric key as hex
    #[arg(long, value_name = "HEX")]
    key_hex: Option<String>,
}

impl CipherArgs {
    fn secret(&self) -> Result<Vec<u8>> {
        match (&self.key, &self.key_hex) {
            (Some(text), _) => Ok(text.as_bytes().to_vec()),
            (None, Some(hex_key)) => {
                hex::decode(hex_key.trim()).context("--key-hex is not valid hex")
            }
            (None, None) => bail!("{} needs --key or --key-hex", self.algorithm),
        }
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::from_env().context("failed to read configuration")?;
    if let Some(dir) = cli.keys_dir {
        config = config.with_keys_dir(dir);
    }

    match cli.command {
        Commands::Encrypt(args) => transform(&config, &args, Direction::Encrypt),
        Commands::Decrypt(args) => transform(&config, &args, Direction::Decrypt),
        Commands::Keygen { key_size } => keygen(config, key_size),
        Commands::ImportPublic { file } => {
            let key = key_store(&config).import_public(&read_record(&file)?)?;
            println!("Imported {}-bit public key", key.key_size);
            Ok(())
        }
        Commands::ImportPrivate { file } => {
            let key = key_store(&config).import_private(&read_record(&file)?)?;
            println!("Imported {}-bit private key", key.key_size);
            Ok(())
        }
        Commands::Export { private } => export(&config, private),
    }
}

fn key_store(config: &Config) -> KeyStore {
    KeyStore::new(&config.keys_dir)
}

fn read_record(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn transform(config: &Config, args: &CipherArgs, direction: Direction) -> Result<()> {
    let input = read_file(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    let output = if args.algorithm == Algorithm::RsaOaep {
        // stored keys decide the modulus; generation settings are not validated here
        let keygen = KeyGenConfig::default().with_key_size(config.key_size);
        let mut rsa = RsaOaep::new(keygen).with_store(key_store(config));
        run_direction(args.algorithm, CipherKey::Rsa(&mut rsa), &input, direction)?
    } else {
        let secret = args.secret()?;
        run_direction(args.algorithm, CipherKey::Secret(&secret), &input, direction)?
    };

    write_file(&args.output, &output)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        "{} {} -> {} ({})",
        args.algorithm,
        args.input.display(),
        args.output.display(),
        format_file_size(output.len() as u64)
    );
    Ok(())
}

fn run_direction(
    algorithm: Algorithm,
    key: CipherKey<'_>,
    input: &[u8],
    direction: Direction,
) -> Result<Vec<u8>> {
    let output = match direction {
        Direction::Encrypt => api::encrypt(algorithm, key, input)
            .with_context(|| format!("{algorithm} encryption failed"))?,
        Direction::Decrypt => api::decrypt(algorithm, key, input)
            .with_context(|| format!("{algorithm} decryption failed"))?,
    };
    Ok(output)
}

fn keygen(config: Config, key_size: Option<u32>) -> Result<()> {
    let config = match key_size {
        Some(bits) => config.with_key_size(bits),
        None => config,
    };

    let mut rsa = RsaOaep::new(config.keygen()?).with_store(key_store(&config));
    let keypair = rsa.generate_keys().context("key generation failed")?;
    rsa.save_keys()
        .with_context(|| format!("failed to save keys to {}", config.keys_dir.display()))?;

    println!("{}", keypair.public_key.armored());
    Ok(())
}

fn export(config: &Config, private: bool) -> Result<()> {
    let store = key_store(config);
    let text = if private {
        match store.load_private()? {
            Some(key) => key.armored(),
            None => bail!("no private key in {}", store.dir().display()),
        }
    } else {
        match store.load_public()? {
            Some(key) => key.armored(),
            None => bail!("no public key in {}", store.dir().display()),
        }
    };

    println!("{text}");
    Ok(())
}
