use anyhow::Result;
use clap::Parser;
use configure_vault::{
    chain::RpcChain,
    cli::Args,
    config::Config,
    dispatch::{self, Outcome},
    schema::{self, ProgramSchema},
    wallet,
};
use log::info;
use solana_sdk::signer::Signer;

fn print_outcome(config: &Config, outcome: &Outcome) {
    println!("vault pubkey : {}", outcome.addresses.vault);
    println!("vault user : {}", outcome.addresses.vault_user);
    println!("action {}", config.action());
    println!("tx sig {}", outcome.signature);
    println!("vault account {:#?}", outcome.vault);
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_args(Args::parse())?;

    let signer = wallet::read_keypair(&config.keypath)?;
    println!("using public key: {}", signer.pubkey());

    let chain = RpcChain::new(config.rpc_url.clone());
    info!("[configure-vault] cluster={:?} rpc={}", config.cluster, chain.url());

    let idl = schema::fetch_idl(&config.idl_url).await?;
    let schema = ProgramSchema::new(idl, drift_vaults_interface::ID);
    if let Some(version) = schema.idl.declared_version() {
        info!("[configure-vault] vaults IDL version={version}");
    }

    println!("vault name: {}", config.name);
    let outcome = dispatch::run(&chain, &schema, &signer, &config).await?;
    print_outcome(&config, &outcome);
    Ok(())
}
