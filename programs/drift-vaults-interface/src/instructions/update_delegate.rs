use anchor_lang::{prelude::*, Discriminator, InstructionData};

use super::{NamedAccounts, VaultInstruction};
use crate::sighash;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateDelegateArgs {
    pub delegate: Pubkey,
}

pub const UPDATE_DELEGATE_DISCRIMINATOR: [u8; 8] = sighash(b"global:update_delegate");

impl Discriminator for UpdateDelegateArgs {
    const DISCRIMINATOR: &'static [u8] = &UPDATE_DELEGATE_DISCRIMINATOR;
}

impl InstructionData for UpdateDelegateArgs {}

impl VaultInstruction for UpdateDelegateArgs {
    const NAME: &'static str = "update_delegate";
    const ARGS: &'static [&'static str] = &["delegate"];
}

/// Accounts of `update_delegate`. The vault forwards the change to its
/// drift user through a CPI into the drift program.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpdateDelegate {
    pub drift_user: Pubkey,
    pub vault: Pubkey,
    pub drift_program: Pubkey,
    pub manager: Pubkey,
}

impl NamedAccounts for UpdateDelegate {
    fn named_accounts(&self) -> Vec<(&'static str, Pubkey)> {
        vec![
            ("drift_user", self.drift_user),
            ("vault", self.vault),
            ("drift_program", self.drift_program),
            ("manager", self.manager),
        ]
    }
}
