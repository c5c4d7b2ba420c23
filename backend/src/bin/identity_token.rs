//! Operator tooling for the identity token key: issue and verify tokens,
//! print the active key fingerprint, and hash passwords for seeding.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::ffi::OsString;
use std::io::{self, BufRead};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use mockable::{Clock, DefaultClock, DefaultEnv, Env};
use ortho_config::OrthoConfig;
use podcast_identity::config::{
    BuildMode, IdentitySettings, SigningKey, signing_key_from_env,
};
use podcast_identity::domain::ports::{PasswordHasher, TokenIssuer};
use podcast_identity::domain::{Password, UserId};
use podcast_identity::outbound::crypto::{Argon2PasswordHasher, JwtTokenIssuer};
use tokio::runtime::Builder;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

/// `identity-token` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "identity-token",
    about = "Issue and inspect identity access tokens with the configured key",
    version
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Subcommand)]
enum Command {
    /// Sign a token for a user id and print it.
    Issue {
        /// Id placed in the token subject.
        #[arg(long = "user-id", value_name = "id")]
        user_id: UserId,
    },
    /// Verify a token and print the user id it was issued for.
    Verify {
        /// Encoded token.
        token: String,
    },
    /// Print the fingerprint of the active signing key.
    Fingerprint,
    /// Read a password from the first line of stdin and print its hash.
    HashPassword,
}

fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| io::Error::other(format!("create Tokio runtime: {error}")))?;
    runtime.block_on(async_main())
}

async fn async_main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let settings = load_settings()?;

    let output = match args.command {
        Command::HashPassword => {
            let plaintext = read_password(io::stdin().lock())?;
            hash_password(&settings, &plaintext).await?
        }
        command => {
            let key = load_key(&DefaultEnv::new(), BuildMode::from_debug_assertions())?;
            run_key_command(command, &key, &settings, Arc::new(DefaultClock))?
        }
    };

    println!("{output}");
    Ok(())
}

fn load_settings() -> io::Result<IdentitySettings> {
    IdentitySettings::load_from_iter([OsString::from("identity-token")])
        .map_err(|error| io::Error::other(format!("load identity settings: {error}")))
}

fn load_key(env: &impl Env, mode: BuildMode) -> io::Result<SigningKey> {
    signing_key_from_env(env, mode)
        .map_err(|error| io::Error::other(format!("load token key: {error}")))
}

fn run_key_command(
    command: Command,
    key: &SigningKey,
    settings: &IdentitySettings,
    clock: Arc<dyn Clock>,
) -> io::Result<String> {
    let issuer = JwtTokenIssuer::new(key, settings.token_ttl(), clock);
    match command {
        Command::Issue { user_id } => issuer
            .sign(&user_id)
            .map(|token| token.as_str().to_owned())
            .map_err(|error| io::Error::other(format!("issue token: {error}"))),
        Command::Verify { token } => issuer
            .verify(token.trim())
            .map(|user_id| format!("user_id={user_id}"))
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error)),
        Command::Fingerprint => Ok(key.fingerprint()),
        Command::HashPassword => Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "hash-password does not use the signing key",
        )),
    }
}

fn read_password(mut input: impl BufRead) -> io::Result<Password> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    let plaintext = line.trim_end_matches(['\r', '\n']);
    Password::new(plaintext).map_err(|error| io::Error::new(io::ErrorKind::InvalidInput, error))
}

async fn hash_password(settings: &IdentitySettings, plaintext: &Password) -> io::Result<String> {
    let hasher = Argon2PasswordHasher::new(settings.hash_workers());
    hasher
        .hash(plaintext)
        .await
        .map(|hash| hash.as_str().to_owned())
        .map_err(|error| io::Error::other(format!("hash password: {error}")))
}
