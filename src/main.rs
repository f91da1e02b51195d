use std::path::Path;

use anyhow::Context;
use bitgo::{
    AccessToken, ApiClient, Params, Resource, ResourceKind,
    cli::{ApprovalCommand, Cli, Commands, KeychainCommand, ShareCommand, WalletCommand},
    config::loader::load_configuration,
    logging::init_logging,
    params,
    resources::{Keychain, PendingApproval, Wallet, WalletShare},
};
use clap::Parser;
use log::{debug, info};

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    init_logging()?;

    let mut sdk_config = load_configuration(Path::new(&cli.config_file))?;
    if let Some(environment) = cli.environment {
        sdk_config.client.environment = environment;
    }
    let token = cli
        .token
        .as_deref()
        .or(sdk_config.access_token())
        .map(AccessToken::from)
        .context("No access token given, pass --token or set BITGO_ACCESS_TOKEN")?;

    let client = ApiClient::new(sdk_config.client).context("Could not create BitGo client")?;
    info!(base_url:% = client.base_url(); "BitGo client ready");

    match cli.command {
        Commands::Wallet { wallet_subcommand } => match wallet_subcommand {
            WalletCommand::List { limit, skip } => {
                let mut filters = Params::new();
                if let Some(limit) = limit {
                    filters.insert("limit".to_string(), limit.into());
                }
                if let Some(skip) = skip {
                    filters.insert("skip".to_string(), skip.into());
                }
                let wallets = Wallet::list_all(&client, &token, filters).await?;
                print_all(&wallets)
            },
            WalletCommand::Get { id } => print(&Wallet::get(&client, &token, &id, Params::new()).await?),
            WalletCommand::Rename { id, label } => {
                let wallet = Wallet::update(&client, &token, &id, params! { "label" => label }).await?;
                print(&wallet)
            },
        },
        Commands::Keychain { keychain_subcommand } => match keychain_subcommand {
            KeychainCommand::List => print(&Keychain::list(&client, &token, Params::new()).await?),
            KeychainCommand::Get { xpub } => print(&Keychain::get(&client, &token, &xpub, Params::new()).await?),
        },
        Commands::Approval { approval_subcommand } => match approval_subcommand {
            ApprovalCommand::List { wallet_id } => {
                let mut filters = Params::new();
                if let Some(wallet_id) = wallet_id {
                    filters.insert("walletId".to_string(), wallet_id.into());
                }
                print_all(&PendingApproval::list_all(&client, &token, filters).await?)
            },
            ApprovalCommand::Get { id } => print(&PendingApproval::get(&client, &token, &id, Params::new()).await?),
            ApprovalCommand::Approve { id, otp } => {
                let approval = PendingApproval::get(&client, &token, &id, Params::new()).await?;
                let mut extra = Params::new();
                if let Some(otp) = otp {
                    extra.insert("otp".to_string(), otp.into());
                }
                print(&approval.approve(extra).await?)
            },
            ApprovalCommand::Reject { id } => {
                let approval = PendingApproval::get(&client, &token, &id, Params::new()).await?;
                print(&approval.reject(Params::new()).await?)
            },
        },
        Commands::Share { share_subcommand } => match share_subcommand {
            ShareCommand::List => print(&WalletShare::list_shares(&client, &token).await?),
            ShareCommand::Get { id } => print(&WalletShare::get(&client, &token, &id, Params::new()).await?),
            ShareCommand::Cancel { id } => print(&WalletShare::delete(&client, &token, &id).await?),
        },
    }
}

fn print<K: ResourceKind>(resource: &Resource<'_, K>) -> anyhow::Result<()> {
    debug!(resource = K::NAME; "Printing resource");
    println!("{}", serde_json::to_string_pretty(resource.properties())?);
    Ok(())
}

fn print_all<K: ResourceKind>(resources: &[Resource<'_, K>]) -> anyhow::Result<()> {
    let properties: Vec<_> = resources.iter().map(Resource::properties).collect();
    println!("{}", serde_json::to_string_pretty(&properties)?);
    Ok(())
}
