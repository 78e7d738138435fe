use anchor_lang::prelude::*;

declare_id!("vAuLTsyrvSfZRuRB3XgvkPwNGgYSs9YRYymVebLKoxR");

pub mod instructions;
pub mod pda;
pub mod state;

pub use instructions::*;
pub use state::*;

/// The Drift v2 program that owns the vault's user, user stats and spot markets.
pub mod drift {
    use anchor_lang::prelude::*;

    declare_id!("dRiftyHA39MWEi3EZeoUZ3fxCMhb6UNbjVvsqXtjZvL");
}

/// Field names of a borsh-encoded type in encoding order, as the program's
/// IDL lists them under `types` or `accounts`.
pub trait FieldLayout {
    const NAME: &'static str;
    const FIELDS: &'static [&'static str];
}

/// Anchor sighash: first 8 bytes of `sha256(preimage)`.
///
/// Instructions use `global:<snake_case_name>`, accounts use
/// `account:<TypeName>`.
pub const fn sighash(preimage: &[u8]) -> [u8; 8] {
    let hash = sha2_const_stable::Sha256::new().update(preimage).finalize();
    [
        hash[0], hash[1], hash[2], hash[3], hash[4], hash[5], hash[6], hash[7],
    ]
}
