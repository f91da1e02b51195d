use clap::{Parser, Subcommand};

use crate::config::Environment;

#[derive(Parser)]
#[command(name = "bitgo")]
#[command(about = "BitGo REST API client", long_about = None)]
pub struct Cli {
    #[arg(short, long, help = "Path to the configuration file", default_value = "data/config.toml")]
    pub config_file: String,
    #[arg(short, long, help = "BitGo environment (test or prod), overrides the configuration file")]
    pub environment: Option<Environment>,
    #[arg(short, long, help = "Access token, overrides the configuration file and BITGO_ACCESS_TOKEN")]
    pub token: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Wallet listing, lookup and renaming
    Wallet {
        #[command(subcommand)]
        wallet_subcommand: WalletCommand,
    },
    /// Keychain listing and lookup
    Keychain {
        #[command(subcommand)]
        keychain_subcommand: KeychainCommand,
    },
    /// Pending approvals
    Approval {
        #[command(subcommand)]
        approval_subcommand: ApprovalCommand,
    },
    /// Wallet shares
    Share {
        #[command(subcommand)]
        share_subcommand: ShareCommand,
    },
}

#[derive(Subcommand)]
pub enum WalletCommand {
    /// List the wallets of the authenticated user
    List {
        #[arg(short, long, help = "Maximum number of wallets to return")]
        limit: Option<u32>,
        #[arg(short, long, help = "Number of wallets to skip")]
        skip: Option<u32>,
    },
    /// Show a single wallet
    Get {
        #[arg(help = "The wallet id (its base address)")]
        id: String,
    },
    /// Change the label of a wallet
    Rename {
        #[arg(help = "The wallet id (its base address)")]
        id: String,
        #[arg(short, long, help = "The new label")]
        label: String,
    },
}

#[derive(Subcommand)]
pub enum KeychainCommand {
    /// List the keychains of the authenticated user
    List,
    /// Show a single keychain
    Get {
        #[arg(help = "The extended public key")]
        xpub: String,
    },
}

#[derive(Subcommand)]
pub enum ApprovalCommand {
    /// List pending approvals, optionally for a single wallet
    List {
        #[arg(short, long, help = "Only show approvals of this wallet")]
        wallet_id: Option<String>,
    },
    /// Show a single pending approval
    Get { id: String },
    /// Approve a pending approval
    Approve {
        id: String,
        #[arg(short, long, help = "Two-factor authentication code")]
        otp: Option<String>,
    },
    /// Reject a pending approval
    Reject { id: String },
}

#[derive(Subcommand)]
pub enum ShareCommand {
    /// List incoming and outgoing wallet shares
    List,
    /// Show a single wallet share
    Get { id: String },
    /// Cancel an outgoing wallet share
    Cancel { id: String },
}
