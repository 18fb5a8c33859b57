use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use sealpass::{
    DEFAULT_STRATEGY, HashingConfig, PasswordHash, Policy, Strategy, StrategyLimits, TokenGenerator,
    TokenKeys, TokenValidator, config, crypto::SALT_LEN, pwd::StrategyInfo,
};
use serde::Serialize;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};
mod auth;

const LOG_ENV: &str = "SEALPASS_LOG";

#[derive(Debug, Parser)]
#[command(name = "sealpass")]
#[command(
    version,
    about = "Signed, encrypted, expiring tokens and versioned password hashes."
)]
struct Cli {
    /// Strategy new hashes are made with, and that stored hashes are
    /// compared against for the rehash signal
    #[arg(
        long,
        global = true,
        value_name = "ID",
        env = "SEALPASS_STRATEGY",
        default_value = DEFAULT_STRATEGY
    )]
    strategy: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Hashes a new password
    Hash {
        /// Salt length in bytes
        #[arg(long, env = "SEALPASS_SALT_LEN", default_value_t = SALT_LEN)]
        salt_len: usize,
    },

    /// Checks a password against a stored hash
    #[command(arg_required_else_help = true)]
    Verify { hash: String },

    /// Shows the strategy and sizes of a stored hash
    #[command(arg_required_else_help = true)]
    Inspect { hash: String },

    /// Prints a strategy identifier
    #[command(subcommand)]
    Strategy(StrategyCommand),

    /// Checks a password against the strength policy
    Policy {
        /// Minimum number of characters
        #[arg(long)]
        min_length: Option<usize>,
    },

    /// Issues and checks tokens
    #[command(subcommand)]
    Token(TokenCommand),
}

#[derive(Debug, Subcommand)]
enum StrategyCommand {
    /// PBKDF2 with HMAC-SHA256
    Pbkdf2 {
        #[arg(long, default_value_t = 1000)]
        iterations: u32,

        /// Derived key length in bytes
        #[arg(long, default_value_t = 64)]
        key_length: usize,
    },

    /// Argon2id
    Argon2id {
        /// Memory cost in KiB
        #[arg(long, default_value_t = 65536)]
        memory: u32,

        /// Time cost / iterations
        #[arg(long, default_value_t = 3)]
        time: u32,

        #[arg(long, default_value_t = 1)]
        parallelism: u32,

        /// Derived key length in bytes
        #[arg(long, default_value_t = 32)]
        key_length: usize,
    },
}

#[derive(Debug, clap::Args)]
struct KeyArgs {
    /// AES key, base64 (16, 24 or 32 bytes)
    #[arg(long, env = "SEALPASS_ENCRYPTION_KEY", hide_env_values = true)]
    encryption_key: String,

    /// HMAC key, base64
    #[arg(long, env = "SEALPASS_SIGNING_KEY", hide_env_values = true)]
    signing_key: String,
}

impl KeyArgs {
    fn to_token_keys(&self) -> Result<TokenKeys> {
        let encryption = config::decode_encryption_key("encryption key", &self.encryption_key)?;
        let signing = config::decode_key("signing key", &self.signing_key)?;
        Ok(TokenKeys::new(encryption.to_vec(), signing.to_vec()))
    }
}

#[derive(Debug, Subcommand)]
enum TokenCommand {
    /// Issues a token carrying PAYLOAD
    #[command(arg_required_else_help = true)]
    Issue {
        #[arg(long)]
        kind: String,

        /// Lifetime in seconds
        #[arg(long, value_name = "SECONDS")]
        ttl: u64,

        payload: String,

        #[command(flatten)]
        keys: KeyArgs,
    },

    /// Prints the payload of a valid token
    #[command(arg_required_else_help = true)]
    Check {
        #[arg(long)]
        kind: String,

        token: String,

        #[command(flatten)]
        keys: KeyArgs,
    },
}

#[derive(Debug, Serialize)]
struct Inspection {
    #[serde(flatten)]
    info: StrategyInfo,
    salt_len: usize,
    hash_len: usize,
    current: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .ok();
}

fn main() -> Result<()> {
    let env_files = config::load_env_files();
    init_logging();
    for path in &env_files {
        debug!(path = %path.display(), "loaded env file");
    }

    let args = Cli::parse();
    match args.command {
        Commands::Hash { salt_len } => {
            let config = HashingConfig {
                default_strategy: args.strategy,
                salt_len,
                ..HashingConfig::default()
            };
            let hasher = config.hasher().context("invalid hashing configuration")?;
            let password = auth::read_new_password()?;
            println!("{}", hasher.compute_hash(&password)?);
        }
        Commands::Verify { hash } => {
            let validator = HashingConfig::with_strategy(args.strategy)
                .validator()
                .context("invalid hashing configuration")?;
            let password = auth::read_password()?;
            let result = validator.validate_password(&password, &hash);
            if !result.matches {
                bail!("password does not match");
            }
            println!("match");
            if result.needs_upgrade {
                println!("rehash recommended");
            }
        }
        Commands::Inspect { hash } => {
            let record: PasswordHash = hash.parse()?;
            let strategy = Strategy::parse(record.strategy())?;
            let inspection = Inspection {
                info: strategy.info(),
                salt_len: record.salt().len(),
                hash_len: record.hash().len(),
                current: strategy.id() == args.strategy,
            };
            println!("{}", serde_json::to_string_pretty(&inspection)?);
        }
        Commands::Strategy(command) => {
            let strategy = match command {
                StrategyCommand::Pbkdf2 {
                    iterations,
                    key_length,
                } => Strategy::pbkdf2(iterations, key_length)?,
                StrategyCommand::Argon2id {
                    memory,
                    time,
                    parallelism,
                    key_length,
                } => Strategy::argon2id(memory, time, parallelism, key_length)?,
            };
            strategy.check_limits(&StrategyLimits::default())?;
            println!("{strategy}");
        }
        Commands::Policy { min_length } => {
            let policy = match min_length {
                Some(min) => Policy::default().with_min_length(min),
                None => Policy::default(),
            };
            let password = auth::read_password()?;
            if let Err(e) = policy.check(&password) {
                for violation in e.violations() {
                    eprintln!("{violation}");
                }
                bail!("password does not meet the policy");
            }
            println!("password meets the policy");
        }
        Commands::Token(TokenCommand::Issue {
            kind,
            ttl,
            payload,
            keys,
        }) => {
            let generator = TokenGenerator::new(keys.to_token_keys()?);
            let token = generator.generate(&kind, payload.as_bytes(), Duration::from_secs(ttl))?;
            println!("{token}");
        }
        Commands::Token(TokenCommand::Check { kind, token, keys }) => {
            let validator = TokenValidator::new(keys.to_token_keys()?);
            let payload = validator.validate(&kind, &token)?;
            let mut stdout = io::stdout().lock();
            stdout.write_all(&payload)?;
            stdout.write_all(b"\n")?;
        }
    }

    Ok(())
}
