use anchor_lang::{prelude::*, Discriminator, InstructionData};

use super::{NamedAccounts, VaultInstruction};
use crate::{sighash, FieldLayout};

/// Parameters of a new vault.
///
/// Fees are in 1e6 precision (200_000 = 20%), token amounts in the spot
/// market's precision.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct VaultParams {
    /// Encoded vault name, see [`crate::pda::encode_name`]
    pub name: [u8; 32],
    pub spot_market_index: u16,
    pub redeem_period: i64,
    pub max_tokens: u64,
    pub min_deposit_amount: u64,
    pub management_fee: i64,
    pub profit_share: u32,
    pub hurdle_rate: u32,
    pub permissioned: bool,
}

impl FieldLayout for VaultParams {
    const NAME: &'static str = "VaultParams";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "spot_market_index",
        "redeem_period",
        "max_tokens",
        "min_deposit_amount",
        "management_fee",
        "profit_share",
        "hurdle_rate",
        "permissioned",
    ];
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct InitializeVaultArgs {
    pub params: VaultParams,
}

pub const INITIALIZE_VAULT_DISCRIMINATOR: [u8; 8] = sighash(b"global:initialize_vault");

impl Discriminator for InitializeVaultArgs {
    const DISCRIMINATOR: &'static [u8] = &INITIALIZE_VAULT_DISCRIMINATOR;
}

impl InstructionData for InitializeVaultArgs {}

impl VaultInstruction for InitializeVaultArgs {
    const NAME: &'static str = "initialize_vault";
    const ARGS: &'static [&'static str] = &["params"];
    const LAYOUTS: &'static [(&'static str, &'static [&'static str])] =
        &[(VaultParams::NAME, VaultParams::FIELDS)];
}

/// Accounts of `initialize_vault`. The manager signs and pays for the vault,
/// its token account and the drift user/user stats it creates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeVault {
    pub drift_spot_market: Pubkey,
    pub drift_spot_market_mint: Pubkey,
    pub drift_user_stats: Pubkey,
    pub drift_user: Pubkey,
    pub drift_state: Pubkey,
    pub vault: Pubkey,
    pub token_account: Pubkey,
    pub token_program: Pubkey,
    pub drift_program: Pubkey,
    pub manager: Pubkey,
    pub payer: Pubkey,
    pub rent: Pubkey,
    pub system_program: Pubkey,
}

impl NamedAccounts for InitializeVault {
    fn named_accounts(&self) -> Vec<(&'static str, Pubkey)> {
        vec![
            ("drift_spot_market", self.drift_spot_market),
            ("drift_spot_market_mint", self.drift_spot_market_mint),
            ("drift_user_stats", self.drift_user_stats),
            ("drift_user", self.drift_user),
            ("drift_state", self.drift_state),
            ("vault", self.vault),
            ("token_account", self.token_account),
            ("token_program", self.token_program),
            ("drift_program", self.drift_program),
            ("manager", self.manager),
            ("payer", self.payer),
            ("rent", self.rent),
            ("system_program", self.system_program),
        ]
    }
}
