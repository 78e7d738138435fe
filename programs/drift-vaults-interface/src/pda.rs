//! Address derivations shared by the vaults and drift programs.
//!
//! Seed bytes and their order must match the programs' `seeds = [...]`
//! constraints exactly; a mismatch only surfaces when the transaction
//! executes.

use anchor_lang::prelude::*;

pub const VAULT_SEED: &[u8] = b"vault";
pub const VAULT_TOKEN_ACCOUNT_SEED: &[u8] = b"vault_token_account";
pub const DRIFT_USER_SEED: &[u8] = b"user";
pub const DRIFT_USER_STATS_SEED: &[u8] = b"user_stats";
pub const DRIFT_STATE_SEED: &[u8] = b"drift_state";
pub const DRIFT_SPOT_MARKET_SEED: &[u8] = b"spot_market";

pub const NAME_LEN: usize = 32;

/// Encodes a vault name as one byte per character, zero-filled.
///
/// Only the first [`NAME_LEN`] characters are encoded; the rest are dropped.
/// Returns the first encoded character whose code point does not fit in a
/// byte.
pub fn encode_name(name: &str) -> std::result::Result<[u8; NAME_LEN], char> {
    let mut buf = [0u8; NAME_LEN];
    for (slot, c) in buf.iter_mut().zip(name.chars()) {
        *slot = u8::try_from(u32::from(c)).map_err(|_| c)?;
    }
    Ok(buf)
}

pub fn vault_address(name: &[u8; NAME_LEN]) -> Pubkey {
    Pubkey::find_program_address(&[VAULT_SEED, name.as_ref()], &crate::ID).0
}

pub fn vault_token_account_address(vault: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(&[VAULT_TOKEN_ACCOUNT_SEED, vault.as_ref()], &crate::ID).0
}

/// Drift user of `authority` at `sub_account_id`.
pub fn drift_user_address(authority: &Pubkey, sub_account_id: u16) -> Pubkey {
    Pubkey::find_program_address(
        &[
            DRIFT_USER_SEED,
            authority.as_ref(),
            &sub_account_id.to_le_bytes(),
        ],
        &crate::drift::ID,
    )
    .0
}

pub fn drift_user_stats_address(authority: &Pubkey) -> Pubkey {
    Pubkey::find_program_address(
        &[DRIFT_USER_STATS_SEED, authority.as_ref()],
        &crate::drift::ID,
    )
    .0
}

pub fn drift_state_address() -> Pubkey {
    Pubkey::find_program_address(&[DRIFT_STATE_SEED], &crate::drift::ID).0
}

pub fn drift_spot_market_address(market_index: u16) -> Pubkey {
    Pubkey::find_program_address(
        &[DRIFT_SPOT_MARKET_SEED, &market_index.to_le_bytes()],
        &crate::drift::ID,
    )
    .0
}
