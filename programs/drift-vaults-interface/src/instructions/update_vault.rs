use anchor_lang::{prelude::*, Discriminator, InstructionData};

use super::{NamedAccounts, VaultInstruction};
use crate::{sighash, FieldLayout};

/// Partial update of a vault's terms; `None` leaves a field unchanged.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct UpdateVaultParams {
    pub redeem_period: Option<i64>,
    pub max_tokens: Option<u64>,
    pub min_deposit_amount: Option<u64>,
    pub management_fee: Option<i64>,
    pub profit_share: Option<u32>,
    pub hurdle_rate: Option<u32>,
    pub permissioned: Option<bool>,
}

impl FieldLayout for UpdateVaultParams {
    const NAME: &'static str = "UpdateVaultParams";
    const FIELDS: &'static [&'static str] = &[
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
pub struct UpdateVaultArgs {
    pub params: UpdateVaultParams,
}

pub const UPDATE_VAULT_DISCRIMINATOR: [u8; 8] = sighash(b"global:update_vault");

impl Discriminator for UpdateVaultArgs {
    const DISCRIMINATOR: &'static [u8] = &UPDATE_VAULT_DISCRIMINATOR;
}

impl InstructionData for UpdateVaultArgs {}

impl VaultInstruction for UpdateVaultArgs {
    const NAME: &'static str = "update_vault";
    const ARGS: &'static [&'static str] = &["params"];
    const LAYOUTS: &'static [(&'static str, &'static [&'static str])] =
        &[(UpdateVaultParams::NAME, UpdateVaultParams::FIELDS)];
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateVault {
    pub vault: Pubkey,
    pub manager: Pubkey,
}

impl NamedAccounts for UpdateVault {
    fn named_accounts(&self) -> Vec<(&'static str, Pubkey)> {
        vec![("vault", self.vault), ("manager", self.manager)]
    }
}
