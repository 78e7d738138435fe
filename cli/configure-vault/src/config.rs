use std::{path::PathBuf, str::FromStr};

use anchor_lang::prelude::Pubkey;
use drift_vaults_interface::{
    pda::{self, NAME_LEN},
    UpdateVaultParams, VaultParams,
};
use log::warn;

use crate::{
    cli::{Action, Args},
    error::ValidationError,
};

pub const VAULTS_IDL_URL: &str =
    "https://raw.githubusercontent.com/drift-labs/drift-vaults/master/ts/sdk/src/idl/drift_vaults.json";

/// Fixed-point scale of fees and token amounts.
pub const PRECISION: i64 = 1_000_000;

pub const DEFAULT_MANAGEMENT_FEE: f64 = 0.2;
pub const DEFAULT_PROFIT_SHARE: f64 = 0.02;
pub const DEFAULT_REDEEM_PERIOD: i64 = 60 * 60 * 24 * 30;
pub const DEFAULT_MAX_TOKENS: i64 = 1_000_000;
pub const DEFAULT_MIN_DEPOSIT_AMOUNT: i64 = 100;
pub const DEFAULT_PERMISSIONED: bool = false;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cluster {
    Devnet,
    Mainnet,
}

impl Cluster {
    pub fn rpc_url(&self) -> &'static str {
        match self {
            Cluster::Devnet => "https://api.devnet.solana.com",
            Cluster::Mainnet => "https://api.mainnet-beta.solana.com",
        }
    }
}

impl FromStr for Cluster {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "devnet" => Ok(Cluster::Devnet),
            "mainnet" => Ok(Cluster::Mainnet),
            other => Err(ValidationError::UnsupportedEnv(other.to_string())),
        }
    }
}

/// Scales a fee fraction in [0, 1] to 1e6 precision, truncating.
pub fn fee_param(value: f64, field: &'static str) -> Result<u32, ValidationError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::FeeOutOfRange { field, value });
    }
    Ok((value * PRECISION as f64) as u32)
}

/// Scales a non-negative whole token amount to 1e6 precision.
pub fn token_amount_param(value: i64, field: &'static str) -> Result<u64, ValidationError> {
    if value < 0 {
        return Err(ValidationError::NegativeAmount { field, value });
    }
    value
        .checked_mul(PRECISION)
        .map(|scaled| scaled as u64)
        .ok_or(ValidationError::AmountOverflow { field, value })
}

/// Vault terms as the operator typed them, before defaults and scaling.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VaultOptions {
    pub management_fee: Option<f64>,
    pub profit_share: Option<f64>,
    pub redeem_period: Option<i64>,
    pub max_tokens: Option<i64>,
    pub min_deposit_amount: Option<i64>,
    pub permissioned: Option<bool>,
}

/// Fully populated vault terms, still unscaled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VaultTerms {
    pub management_fee: f64,
    pub profit_share: f64,
    pub redeem_period: i64,
    pub max_tokens: i64,
    pub min_deposit_amount: i64,
    pub permissioned: bool,
}

impl VaultOptions {
    pub fn from_args(args: &Args) -> Self {
        Self {
            management_fee: args.management_fee,
            profit_share: args.profit_share,
            redeem_period: args.redeem_period,
            max_tokens: args.max_tokens,
            min_deposit_amount: args.min_deposit_amount,
            permissioned: args.permissioned,
        }
    }

    /// Terms of a new vault: every omitted field takes its default.
    pub fn with_init_defaults(&self) -> VaultTerms {
        VaultTerms {
            management_fee: self.management_fee.unwrap_or(DEFAULT_MANAGEMENT_FEE),
            profit_share: self.profit_share.unwrap_or(DEFAULT_PROFIT_SHARE),
            redeem_period: self.redeem_period.unwrap_or(DEFAULT_REDEEM_PERIOD),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            min_deposit_amount: self
                .min_deposit_amount
                .unwrap_or(DEFAULT_MIN_DEPOSIT_AMOUNT),
            permissioned: self.permissioned.unwrap_or(DEFAULT_PERMISSIONED),
        }
    }

    /// Update parameters: omitted fields stay `None` and are left unchanged
    /// on chain. The hurdle rate is not supported yet and never sent.
    pub fn to_update_params(&self) -> Result<UpdateVaultParams, ValidationError> {
        Ok(UpdateVaultParams {
            redeem_period: self.redeem_period,
            max_tokens: self
                .max_tokens
                .map(|v| token_amount_param(v, "max tokens"))
                .transpose()?,
            min_deposit_amount: self
                .min_deposit_amount
                .map(|v| token_amount_param(v, "min deposit amount"))
                .transpose()?,
            management_fee: self
                .management_fee
                .map(|v| fee_param(v, "management fee").map(i64::from))
                .transpose()?,
            profit_share: self
                .profit_share
                .map(|v| fee_param(v, "profit share"))
                .transpose()?,
            hurdle_rate: None,
            permissioned: self.permissioned,
        })
    }
}

impl VaultTerms {
    pub fn to_params(
        &self,
        name: [u8; NAME_LEN],
        spot_market_index: u16,
    ) -> Result<VaultParams, ValidationError> {
        Ok(VaultParams {
            name,
            spot_market_index,
            redeem_period: self.redeem_period,
            max_tokens: token_amount_param(self.max_tokens, "max tokens")?,
            min_deposit_amount: token_amount_param(self.min_deposit_amount, "min deposit amount")?,
            management_fee: i64::from(fee_param(self.management_fee, "management fee")?),
            profit_share: fee_param(self.profit_share, "profit share")?,
            hurdle_rate: 0,
            permissioned: self.permissioned,
        })
    }
}

/// The validated request for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    InitVault(VaultParams),
    UpdateVault(UpdateVaultParams),
    UpdateDelegate(Pubkey),
}

impl Request {
    pub fn action(&self) -> Action {
        match self {
            Request::InitVault(_) => Action::InitVault,
            Request::UpdateVault(_) => Action::UpdateVault,
            Request::UpdateDelegate(_) => Action::UpdateDelegate,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub keypath: PathBuf,
    pub name: String,
    pub vault_name: [u8; NAME_LEN],
    pub cluster: Cluster,
    pub rpc_url: String,
    pub idl_url: String,
    pub spot_market_index: u16,
    pub request: Request,
}

impl Config {
    /// Validates the command line. Performs no I/O.
    pub fn from_args(args: Args) -> Result<Self, ValidationError> {
        let keypath = args.keypath.clone().ok_or(ValidationError::MissingKeypath)?;

        if args.name.chars().count() > NAME_LEN {
            warn!(
                "[config] vault name longer than {NAME_LEN} characters, only {:?} is used",
                args.name.chars().take(NAME_LEN).collect::<String>()
            );
        }
        let vault_name = pda::encode_name(&args.name).map_err(ValidationError::UnencodableName)?;

        let options = VaultOptions::from_args(&args);
        let request = match args.action {
            Action::InitVault => Request::InitVault(
                options
                    .with_init_defaults()
                    .to_params(vault_name, args.spot_market_index)?,
            ),
            Action::UpdateVault => Request::UpdateVault(options.to_update_params()?),
            Action::UpdateDelegate => {
                let delegate = args
                    .delegate
                    .as_deref()
                    .map(str::trim)
                    .filter(|d| !d.is_empty())
                    .ok_or(ValidationError::MissingDelegate)?;
                let delegate = Pubkey::from_str(delegate)
                    .map_err(|_| ValidationError::InvalidDelegate(delegate.to_string()))?;
                Request::UpdateDelegate(delegate)
            }
        };

        let cluster: Cluster = args.env.parse()?;
        let rpc_url = args
            .rpc_url
            .unwrap_or_else(|| cluster.rpc_url().to_string());

        Ok(Self {
            keypath,
            name: args.name,
            vault_name,
            cluster,
            rpc_url,
            idl_url: args.idl_url,
            spot_market_index: args.spot_market_index,
            request,
        })
    }

    pub fn action(&self) -> Action {
        self.request.action()
    }
}
