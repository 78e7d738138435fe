use std::path::PathBuf;

use clap::{builder::BoolishValueParser, Parser, ValueEnum};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Initialize or update a Drift vault", long_about = None)]
pub struct Args {
    /// Keypair file (JSON byte array) of the vault manager
    #[arg(long, env = "ANCHOR_WALLET")]
    pub keypath: Option<PathBuf>,

    /// Vault name, at most 32 characters are used
    #[arg(long)]
    pub name: String,

    /// Cluster to talk to: devnet or mainnet
    #[arg(long, default_value = "devnet")]
    pub env: String,

    #[arg(long, value_enum)]
    pub action: Action,

    /// Annual management fee as a fraction, 0.2 = 20%
    #[arg(long, allow_negative_numbers = true)]
    pub management_fee: Option<f64>,

    /// Share of profits paid to the manager as a fraction
    #[arg(long, allow_negative_numbers = true)]
    pub profit_share: Option<f64>,

    /// Seconds between a withdraw request and its execution
    #[arg(long, allow_negative_numbers = true)]
    pub redeem_period: Option<i64>,

    /// Deposit cap in whole tokens
    #[arg(long, allow_negative_numbers = true)]
    pub max_tokens: Option<i64>,

    /// Smallest accepted deposit in whole tokens
    #[arg(long, allow_negative_numbers = true)]
    pub min_deposit_amount: Option<i64>,

    /// Restrict deposits to whitelisted depositors
    #[arg(long, value_parser = BoolishValueParser::new())]
    pub permissioned: Option<bool>,

    /// Address allowed to trade the vault's drift user
    #[arg(long)]
    pub delegate: Option<String>,

    /// Drift spot market the vault accepts deposits in (0 = USDC)
    #[arg(long, default_value_t = 0)]
    pub spot_market_index: u16,

    /// RPC endpoint, overrides the one selected by --env
    #[arg(long)]
    pub rpc_url: Option<String>,

    /// Location of the vaults program IDL
    #[arg(long, default_value = crate::config::VAULTS_IDL_URL)]
    pub idl_url: String,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    InitVault,
    UpdateDelegate,
    UpdateVault,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::InitVault => "init-vault",
            Action::UpdateDelegate => "update-delegate",
            Action::UpdateVault => "update-vault",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
