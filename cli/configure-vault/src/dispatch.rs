use anchor_lang::{prelude::Pubkey, system_program, AccountDeserialize};
use anyhow::{anyhow, Context, Result};
use drift_vaults_interface::{
    drift, pda, InitializeVault, InitializeVaultArgs, SpotMarket, UpdateDelegate,
    UpdateDelegateArgs, UpdateVault, UpdateVaultArgs, Vault, WithdrawRequest,
};
use log::info;
use solana_sdk::{
    instruction::Instruction,
    signature::{Keypair, Signature},
    signer::Signer,
    sysvar,
};

use crate::{
    chain::Chain,
    config::{Config, Request},
    error::SchemaError,
    schema::ProgramSchema,
};

/// Vaults use the drift user at sub account 0.
pub const VAULT_SUB_ACCOUNT_ID: u16 = 0;

/// Every address an action may touch, derived from the vault name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VaultAddresses {
    pub vault: Pubkey,
    pub vault_token_account: Pubkey,
    pub vault_user: Pubkey,
    pub vault_user_stats: Pubkey,
    pub drift_state: Pubkey,
    pub spot_market: Pubkey,
}

impl VaultAddresses {
    pub fn derive(name: &[u8; pda::NAME_LEN], spot_market_index: u16) -> Self {
        let vault = pda::vault_address(name);
        Self {
            vault,
            vault_token_account: pda::vault_token_account_address(&vault),
            vault_user: pda::drift_user_address(&vault, VAULT_SUB_ACCOUNT_ID),
            vault_user_stats: pda::drift_user_stats_address(&vault),
            drift_state: pda::drift_state_address(),
            spot_market: pda::drift_spot_market_address(spot_market_index),
        }
    }
}

/// Result of one run.
#[derive(Debug)]
pub struct Outcome {
    pub addresses: VaultAddresses,
    pub spot_market: SpotMarket,
    pub signature: Signature,
    pub vault: Vault,
}

/// Builds the instruction for `request`. Pure: no network access.
pub fn build_instruction(
    schema: &ProgramSchema,
    request: &Request,
    addresses: &VaultAddresses,
    spot_market: &SpotMarket,
    manager: Pubkey,
) -> Result<Instruction, SchemaError> {
    match request {
        Request::InitVault(params) => schema.instruction(
            &InitializeVaultArgs {
                params: params.clone(),
            },
            &InitializeVault {
                drift_spot_market: addresses.spot_market,
                drift_spot_market_mint: spot_market.mint,
                drift_user_stats: addresses.vault_user_stats,
                drift_user: addresses.vault_user,
                drift_state: addresses.drift_state,
                vault: addresses.vault,
                token_account: addresses.vault_token_account,
                token_program: anchor_spl::token::ID,
                drift_program: drift::ID,
                manager,
                payer: manager,
                rent: sysvar::rent::ID,
                system_program: system_program::ID,
            },
        ),
        Request::UpdateVault(params) => schema.instruction(
            &UpdateVaultArgs {
                params: params.clone(),
            },
            &UpdateVault {
                vault: addresses.vault,
                manager,
            },
        ),
        Request::UpdateDelegate(delegate) => schema.instruction(
            &UpdateDelegateArgs {
                delegate: *delegate,
            },
            &UpdateDelegate {
                drift_user: addresses.vault_user,
                vault: addresses.vault,
                drift_program: drift::ID,
                manager,
            },
        ),
    }
}

async fn fetch_account<C: Chain, T: AccountDeserialize>(
    chain: &C,
    address: &Pubkey,
    what: &str,
) -> Result<T> {
    let data = chain
        .account_data(address)
        .await
        .with_context(|| format!("fetching {what} {address}"))?;
    T::try_deserialize(&mut data.as_slice())
        .map_err(|e| anyhow!("decoding {what} {address}: {e}"))
}

/// Derives the vault's addresses, submits the requested action signed by
/// `signer` as manager, then reads the vault back. A vault layout the IDL
/// disagrees with is refused before anything is submitted.
pub async fn run<C: Chain>(
    chain: &C,
    schema: &ProgramSchema,
    signer: &Keypair,
    config: &Config,
) -> Result<Outcome> {
    let addresses = VaultAddresses::derive(&config.vault_name, config.spot_market_index);
    info!(
        "[vault] name={} vault={} user={} user_stats={}",
        config.name, addresses.vault, addresses.vault_user, addresses.vault_user_stats
    );

    let spot_market: SpotMarket =
        fetch_account(chain, &addresses.spot_market, "spot market").await?;
    info!(
        "[vault] spot_market index={} mint={}",
        config.spot_market_index, spot_market.mint
    );

    let instruction = build_instruction(
        schema,
        &config.request,
        &addresses,
        &spot_market,
        signer.pubkey(),
    )?;
    schema.check_layout::<Vault>()?;
    schema.check_layout::<WithdrawRequest>()?;
    info!("[vault] action={} submitting", config.action());
    let signature = chain
        .submit(instruction, signer)
        .await
        .with_context(|| format!("submitting {}", config.action()))?;

    let vault: Vault = fetch_account(chain, &addresses.vault, "vault").await?;

    Ok(Outcome {
        addresses,
        spot_market,
        signature,
        vault,
    })
}
