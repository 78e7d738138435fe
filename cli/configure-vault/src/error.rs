use thiserror::Error;

/// Operator input the tool refuses before touching the network.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("{field} must be between 0 and 1")]
    FeeOutOfRange { field: &'static str, value: f64 },

    #[error("{field} must be greater than 0")]
    NegativeAmount { field: &'static str, value: i64 },

    #[error("{field} is too large to scale to 1e6 precision")]
    AmountOverflow { field: &'static str, value: i64 },

    #[error("update-delegate requires that you pass a delegate")]
    MissingDelegate,

    #[error("delegate {0} is not a valid public key")]
    InvalidDelegate(String),

    #[error("only devnet/mainnet env supported, got {0}")]
    UnsupportedEnv(String),

    #[error("need to provide keypath or set ANCHOR_WALLET")]
    MissingKeypath,

    #[error("vault name character {0:?} does not fit in a byte")]
    UnencodableName(char),
}

/// The fetched IDL does not describe the instruction the tool encodes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("instruction {0} not found in program IDL")]
    UnknownInstruction(String),

    #[error("instruction {instruction} expects account {account} which was not supplied")]
    MissingAccount {
        instruction: String,
        account: String,
    },

    #[error("instruction {instruction} takes arguments {expected:?}, IDL declares {found:?}")]
    ArgumentMismatch {
        instruction: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("instruction {0} declares an empty discriminator")]
    EmptyDiscriminator(String),

    #[error("type {0} is not defined in program IDL")]
    UndefinedType(String),

    #[error("{name} is laid out as {expected:?}, IDL declares {found:?}")]
    LayoutMismatch {
        name: String,
        expected: Vec<String>,
        found: Vec<String>,
    },
}
