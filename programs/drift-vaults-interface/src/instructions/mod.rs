use anchor_lang::{prelude::*, InstructionData};

pub mod initialize_vault;
pub mod update_delegate;
pub mod update_vault;

pub use initialize_vault::*;
pub use update_delegate::*;
pub use update_vault::*;

/// Instruction arguments as the program's `#[program]` entrypoint declares
/// them.
pub trait VaultInstruction: InstructionData {
    /// Snake case instruction name.
    const NAME: &'static str;
    /// Argument names in encoding order.
    const ARGS: &'static [&'static str];
    /// Layouts of the user-defined argument types, keyed by type name.
    const LAYOUTS: &'static [(&'static str, &'static [&'static str])] = &[];
}

/// Account set of an instruction, keyed by the names the program's
/// `#[derive(Accounts)]` struct uses.
pub trait NamedAccounts {
    fn named_accounts(&self) -> Vec<(&'static str, Pubkey)>;
}
