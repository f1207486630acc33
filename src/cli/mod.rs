//! CLI module: Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use clap::Parser;

use crate::config::{Backend, Settings};
use crate::errors::{Result, StoreError};
use crate::store::{Namespace, SecureStore};
use crate::vault::{MemoryVault, Vault};

/// KeySafe CLI: key-addressed secrets in the OS credential vault.
#[derive(Parser)]
#[command(
    name = "keysafe",
    about = "Store secrets in the operating system's credential vault",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Service namespace for entries (default: from .keysafe.toml or the app name)
    #[arg(long, env = "KEYSAFE_SERVICE", global = true)]
    pub service: Option<String>,

    /// Vault backend (default: from .keysafe.toml, else keyring)
    #[arg(long, value_enum, env = "KEYSAFE_BACKEND", global = true)]
    pub backend: Option<Backend>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Store a secret (add or replace)
    Set {
        /// Key to store the secret under (e.g. github-token)
        key: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
    },

    /// Print a secret's value
    Get {
        /// Key of the secret
        key: String,
    },

    /// List all keys in the service namespace
    List {
        /// Print keys as a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Delete a secret
    Delete {
        /// Key of the secret
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Resolve the service namespace, trying in order:
/// 1. `--service` / `KEYSAFE_SERVICE`
/// 2. `service` in `.keysafe.toml`
/// 3. The host application's identity, then the fixed fallback
pub fn resolve_namespace(cli: &Cli, settings: &Settings) -> Result<Namespace> {
    match cli.service.as_deref().or(settings.service.as_deref()) {
        Some(name) => Namespace::new(name),
        None => Ok(Namespace::from_host()),
    }
}

/// Build the vault for the selected backend (CLI flag over config file).
pub fn open_vault(cli: &Cli, settings: &Settings) -> Result<Box<dyn Vault>> {
    match cli.backend.unwrap_or(settings.backend) {
        Backend::Memory => Ok(Box::new(MemoryVault::new())),
        #[cfg(feature = "keyring-store")]
        Backend::Keyring => Ok(Box::new(crate::vault::KeyringVault::new())),
        #[cfg(not(feature = "keyring-store"))]
        Backend::Keyring => Err(StoreError::CommandFailed(
            "keyring backend not compiled in; rebuild with `--features keyring-store` or use `--backend memory`".into(),
        )),
    }
}

/// Open a store for the namespace and backend selected by CLI and config.
pub fn open_store(cli: &Cli, settings: &Settings) -> Result<SecureStore<Box<dyn Vault>>> {
    let namespace = resolve_namespace(cli, settings)?;
    let vault = open_vault(cli, settings)?;
    tracing::debug!(service = %namespace, "store opened");
    Ok(SecureStore::new(namespace, vault))
}

/// Prompt for a value without echoing it.
pub fn prompt_secret(prompt: &str) -> Result<String> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| StoreError::CommandFailed(format!("input prompt: {e}")))
}
