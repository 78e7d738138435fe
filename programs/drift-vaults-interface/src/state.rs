use anchor_lang::{prelude::*, AccountDeserialize, Discriminator, Owner};

use crate::{sighash, FieldLayout};

/// Vault account owned by the vaults program.
///
/// PDA seeds: [b"vault", name]. Field order follows the program's account
/// layout; trailing padding is reserved by the program.
#[account]
#[derive(Default, Debug)]
pub struct Vault {
    /// Fixed-width name, one byte per character, zero-filled
    pub name: [u8; 32],
    /// The vault's own address
    pub pubkey: Pubkey,
    /// Authority allowed to update the vault
    pub manager: Pubkey,
    /// Token account holding deposits in transit
    pub token_account: Pubkey,
    /// Drift user stats account owned by the vault
    pub user_stats: Pubkey,
    /// Drift user account owned by the vault
    pub user: Pubkey,
    /// Address allowed to trade the drift user
    pub delegate: Pubkey,
    /// Address allowed to liquidate the vault while a withdraw is overdue
    pub liquidation_delegate: Pubkey,
    /// Shares owned by depositors
    pub user_shares: u128,
    /// Shares owned by depositors and the manager
    pub total_shares: u128,
    /// Last time the management fee was charged
    pub last_fee_update_ts: i64,
    /// When the current liquidation started (0 = none)
    pub liquidation_start_ts: i64,
    /// Seconds a depositor waits between requesting and executing a withdraw
    pub redeem_period: i64,
    /// Value of all pending withdraw requests
    pub total_withdraw_requested: u64,
    /// Deposit cap in spot market precision (0 = uncapped)
    pub max_tokens: u64,
    /// Annual management fee, 1e6 precision
    pub management_fee: i64,
    /// Creation time
    pub init_ts: i64,
    /// Deposits minus withdraws, all depositors
    pub net_deposits: i64,
    /// Deposits minus withdraws, manager only
    pub manager_net_deposits: i64,
    pub total_deposits: u64,
    pub total_withdraws: u64,
    pub manager_total_deposits: u64,
    pub manager_total_withdraws: u64,
    /// Management fees collected so far
    pub manager_total_fee: i64,
    /// Profit share collected so far
    pub manager_total_profit_share: u64,
    /// Smallest accepted deposit in spot market precision
    pub min_deposit_amount: u64,
    /// Pending withdraw of the manager's own shares
    pub last_manager_withdraw_request: WithdrawRequest,
    /// Power of ten the shares were rebased by
    pub shares_base: u32,
    /// Share of profits paid to the manager, 1e6 precision
    pub profit_share: u32,
    /// Return depositors keep before profit share applies, 1e6 precision
    pub hurdle_rate: u32,
    /// Drift spot market the vault deposits into
    pub spot_market_index: u16,
    /// PDA bump
    pub bump: u8,
    /// Deposits restricted to whitelisted depositors
    pub permissioned: bool,
    pub padding: [u64; 8],
}

impl Vault {
    /// Name with the zero fill stripped.
    pub fn name(&self) -> String {
        self.name
            .iter()
            .take_while(|b| **b != 0)
            .map(|b| *b as char)
            .collect()
    }
}

impl FieldLayout for Vault {
    const NAME: &'static str = "Vault";
    const FIELDS: &'static [&'static str] = &[
        "name",
        "pubkey",
        "manager",
        "token_account",
        "user_stats",
        "user",
        "delegate",
        "liquidation_delegate",
        "user_shares",
        "total_shares",
        "last_fee_update_ts",
        "liquidation_start_ts",
        "redeem_period",
        "total_withdraw_requested",
        "max_tokens",
        "management_fee",
        "init_ts",
        "net_deposits",
        "manager_net_deposits",
        "total_deposits",
        "total_withdraws",
        "manager_total_deposits",
        "manager_total_withdraws",
        "manager_total_fee",
        "manager_total_profit_share",
        "min_deposit_amount",
        "last_manager_withdraw_request",
        "shares_base",
        "profit_share",
        "hurdle_rate",
        "spot_market_index",
        "bump",
        "permissioned",
        "padding",
    ];
}

/// A withdraw waiting out the vault's redeem period.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct WithdrawRequest {
    /// Shares to burn
    pub shares: u128,
    /// Token value of the shares when requested
    pub value: u64,
    /// Request time
    pub ts: i64,
}

impl FieldLayout for WithdrawRequest {
    const NAME: &'static str = "WithdrawRequest";
    const FIELDS: &'static [&'static str] = &["shares", "value", "ts"];
}

pub const SPOT_MARKET_DISCRIMINATOR: [u8; 8] = sighash(b"account:SpotMarket");

/// Leading fields of a Drift spot market account.
///
/// Only the addresses needed to initialize a vault are decoded; the rest of
/// the account is left unread.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct SpotMarket {
    /// The market's own address
    pub pubkey: Pubkey,
    /// Price oracle of the market's token
    pub oracle: Pubkey,
    /// Mint of the market's token
    pub mint: Pubkey,
    /// Drift token account holding the market's deposits
    pub vault: Pubkey,
}

impl Discriminator for SpotMarket {
    const DISCRIMINATOR: &'static [u8] = &SPOT_MARKET_DISCRIMINATOR;
}

impl Owner for SpotMarket {
    fn owner() -> Pubkey {
        crate::drift::ID
    }
}

impl AccountDeserialize for SpotMarket {
    fn try_deserialize(buf: &mut &[u8]) -> Result<Self> {
        let disc = Self::DISCRIMINATOR;
        if buf.len() < disc.len() {
            return Err(ErrorCode::AccountDiscriminatorNotFound.into());
        }
        if &buf[..disc.len()] != disc {
            return Err(ErrorCode::AccountDiscriminatorMismatch.into());
        }
        Self::try_deserialize_unchecked(buf)
    }

    fn try_deserialize_unchecked(buf: &mut &[u8]) -> Result<Self> {
        let mut data: &[u8] = buf
            .get(Self::DISCRIMINATOR.len()..)
            .ok_or(ErrorCode::AccountDidNotDeserialize)?;
        AnchorDeserialize::deserialize(&mut data)
            .map_err(|_| ErrorCode::AccountDidNotDeserialize.into())
    }
}
