//! The vaults program's published IDL and instruction assembly against it.
//!
//! Both the legacy (`isMut` / `isSigner`, camelCase) and the current
//! (`writable` / `signer`, snake_case, explicit discriminators) IDL formats
//! are accepted.
//!
//! Argument bytes are encoded by the typed structs of
//! `drift_vaults_interface`; the IDL's `types` and `accounts` sections are
//! checked against their field order so a reordered program layout is
//! refused instead of silently shifting values into other fields.

use anchor_lang::prelude::Pubkey;
use anyhow::Context;
use drift_vaults_interface::{FieldLayout, NamedAccounts, VaultInstruction};
use log::{debug, warn};
use serde::Deserialize;
use solana_sdk::instruction::{AccountMeta, Instruction};

use crate::error::SchemaError;

#[derive(Debug, Clone, Deserialize)]
pub struct Idl {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub metadata: Option<IdlMetadata>,
    pub instructions: Vec<IdlInstruction>,
    #[serde(default)]
    pub accounts: Vec<IdlTypeDef>,
    #[serde(default)]
    pub types: Vec<IdlTypeDef>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IdlMetadata {
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlInstruction {
    pub name: String,
    #[serde(default)]
    pub discriminator: Option<Vec<u8>>,
    pub accounts: Vec<IdlAccountItem>,
    #[serde(default)]
    pub args: Vec<IdlField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlField {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<IdlType>,
}

/// Only user-defined types are inspected; primitives and containers stay
/// raw JSON.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlType {
    Defined { defined: IdlDefined },
    Other(serde_json::Value),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlDefined {
    /// Legacy: `"defined": "VaultParams"`
    Name(String),
    /// Current: `"defined": { "name": "VaultParams" }`
    Path { name: String },
}

impl IdlType {
    pub fn defined_name(&self) -> Option<&str> {
        match self {
            IdlType::Defined {
                defined: IdlDefined::Name(name) | IdlDefined::Path { name },
            } => Some(name.as_str()),
            IdlType::Other(_) => None,
        }
    }
}

/// Entry of `types` or `accounts`. Current IDLs list accounts without a
/// `type` and describe them under `types` instead.
#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDef {
    pub name: String,
    #[serde(rename = "type", default)]
    pub ty: Option<IdlTypeDefTy>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlTypeDefTy {
    pub kind: String,
    #[serde(default)]
    pub fields: Option<IdlFields>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlFields {
    Named(Vec<IdlField>),
    Tuple(Vec<serde_json::Value>),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdlAccountItem {
    Composite(IdlAccounts),
    Single(IdlAccount),
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlAccounts {
    pub name: String,
    pub accounts: Vec<IdlAccountItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IdlAccount {
    pub name: String,
    #[serde(default, alias = "isMut")]
    pub writable: bool,
    #[serde(default, alias = "isSigner")]
    pub signer: bool,
    #[serde(default, alias = "isOptional")]
    pub optional: bool,
}

impl Idl {
    pub fn declared_address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .or_else(|| self.metadata.as_ref()?.address.as_deref())
    }

    pub fn declared_version(&self) -> Option<&str> {
        self.version
            .as_deref()
            .or_else(|| self.metadata.as_ref()?.version.as_deref())
    }

    /// Normalized field names of the struct `name`, from `types` or
    /// `accounts`.
    pub fn struct_fields(&self, name: &str) -> Option<Vec<String>> {
        let wanted = normalize(name);
        self.types
            .iter()
            .chain(&self.accounts)
            .filter(|def| normalize(&def.name) == wanted)
            .find_map(|def| match def.ty.as_ref()?.fields.as_ref()? {
                IdlFields::Named(fields) => {
                    Some(fields.iter().map(|f| normalize(&f.name)).collect())
                }
                IdlFields::Tuple(_) => None,
            })
    }
}

impl IdlInstruction {
    /// Accounts in the order the program reads them, composites flattened.
    pub fn flat_accounts(&self) -> Vec<&IdlAccount> {
        fn walk<'a>(items: &'a [IdlAccountItem], out: &mut Vec<&'a IdlAccount>) {
            for item in items {
                match item {
                    IdlAccountItem::Single(account) => out.push(account),
                    IdlAccountItem::Composite(group) => walk(&group.accounts, out),
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.accounts, &mut out);
        out
    }
}

/// `initializeVault`, `initialize_vault` and `InitializeVault` compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_lowercase)
        .collect()
}

pub async fn fetch_idl(url: &str) -> anyhow::Result<Idl> {
    let response = reqwest::get(url)
        .await
        .with_context(|| format!("fetching IDL from {url}"))?
        .error_for_status()
        .with_context(|| format!("fetching IDL from {url}"))?;
    response
        .json::<Idl>()
        .await
        .with_context(|| format!("decoding IDL from {url}"))
}

/// An IDL bound to the program id instructions are addressed to.
#[derive(Debug, Clone)]
pub struct ProgramSchema {
    pub program_id: Pubkey,
    pub idl: Idl,
}

impl ProgramSchema {
    pub fn new(idl: Idl, program_id: Pubkey) -> Self {
        if let Some(address) = idl.declared_address() {
            if address != program_id.to_string() {
                warn!("[schema] IDL declares address {address}, using {program_id}");
            }
        }
        Self { program_id, idl }
    }

    pub fn find(&self, name: &str) -> Result<&IdlInstruction, SchemaError> {
        let wanted = normalize(name);
        self.idl
            .instructions
            .iter()
            .find(|ix| normalize(&ix.name) == wanted)
            .ok_or_else(|| SchemaError::UnknownInstruction(name.to_string()))
    }

    /// Fails unless the IDL declares `name` with exactly `fields`, in order.
    fn check_fields(
        &self,
        instruction: &str,
        name: &str,
        fields: &[&str],
    ) -> Result<(), SchemaError> {
        let found = self
            .idl
            .struct_fields(name)
            .ok_or_else(|| SchemaError::UndefinedType(name.to_string()))?;
        let expected: Vec<String> = fields.iter().map(|f| normalize(f)).collect();
        if found != expected {
            return Err(SchemaError::ArgumentMismatch {
                instruction: format!("{instruction} ({name})"),
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Checks that the IDL lays out `T` the way it is decoded here.
    pub fn check_layout<T: FieldLayout>(&self) -> Result<(), SchemaError> {
        let found = self
            .idl
            .struct_fields(T::NAME)
            .ok_or_else(|| SchemaError::UndefinedType(T::NAME.to_string()))?;
        let expected: Vec<String> = T::FIELDS.iter().map(|f| normalize(f)).collect();
        if found != expected {
            return Err(SchemaError::LayoutMismatch {
                name: T::NAME.to_string(),
                expected,
                found,
            });
        }
        Ok(())
    }

    /// Builds `I` with account order and signer/writable flags taken from the
    /// IDL. Optional accounts that were not supplied are passed as the
    /// program id, the way Anchor marks an absent optional account.
    pub fn instruction<I: VaultInstruction>(
        &self,
        args: &I,
        accounts: &impl NamedAccounts,
    ) -> Result<Instruction, SchemaError> {
        let idl_ix = self.find(I::NAME)?;

        let found: Vec<String> = idl_ix.args.iter().map(|a| normalize(&a.name)).collect();
        let expected: Vec<String> = I::ARGS.iter().map(|a| normalize(a)).collect();
        if found != expected {
            return Err(SchemaError::ArgumentMismatch {
                instruction: I::NAME.to_string(),
                expected,
                found,
            });
        }

        for arg in &idl_ix.args {
            let Some(defined) = arg.ty.as_ref().and_then(IdlType::defined_name) else {
                continue;
            };
            let (name, fields) = I::LAYOUTS
                .iter()
                .find(|(name, _)| normalize(name) == normalize(defined))
                .ok_or_else(|| SchemaError::ArgumentMismatch {
                    instruction: I::NAME.to_string(),
                    expected: I::LAYOUTS.iter().map(|(name, _)| normalize(name)).collect(),
                    found: vec![normalize(defined)],
                })?;
            self.check_fields(I::NAME, name, fields)?;
        }

        let supplied: Vec<(String, Pubkey)> = accounts
            .named_accounts()
            .into_iter()
            .map(|(name, key)| (normalize(name), key))
            .collect();

        let metas = idl_ix
            .flat_accounts()
            .into_iter()
            .map(|account| {
                let wanted = normalize(&account.name);
                let key = supplied
                    .iter()
                    .find(|(name, _)| *name == wanted)
                    .map(|(_, key)| *key);
                let key = match key {
                    Some(key) => key,
                    None if account.optional => self.program_id,
                    None => {
                        return Err(SchemaError::MissingAccount {
                            instruction: I::NAME.to_string(),
                            account: account.name.clone(),
                        })
                    }
                };
                Ok(if account.writable {
                    AccountMeta::new(key, account.signer)
                } else {
                    AccountMeta::new_readonly(key, account.signer)
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut data = args.data();
        if let Some(discriminator) = &idl_ix.discriminator {
            if discriminator.is_empty() {
                return Err(SchemaError::EmptyDiscriminator(I::NAME.to_string()));
            }
            if discriminator.as_slice() != I::DISCRIMINATOR {
                debug!(
                    "[schema] {} uses IDL discriminator {:?}",
                    I::NAME,
                    discriminator
                );
            }
            data.splice(..I::DISCRIMINATOR.len(), discriminator.iter().copied());
        }

        Ok(Instruction {
            program_id: self.program_id,
            accounts: metas,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use drift_vaults_interface::{
        UpdateDelegate, UpdateDelegateArgs, UpdateVault, UpdateVaultArgs, UpdateVaultParams,
        Vault, UPDATE_DELEGATE_DISCRIMINATOR,
    };
    use anchor_lang::InstructionData;
    use serde_json::json;

    use super::*;

    const LEGACY: &str = r#"{
        "version": "0.1.0",
        "name": "drift_vaults",
        "instructions": [{
            "name": "updateDelegate",
            "accounts": [
                { "name": "vault", "isMut": true, "isSigner": false },
                { "name": "manager", "isMut": false, "isSigner": true },
                { "name": "driftUser", "isMut": true, "isSigner": false },
                { "name": "driftProgram", "isMut": false, "isSigner": false }
            ],
            "args": [{ "name": "delegate", "type": "publicKey" }]
        }],
        "metadata": { "address": "vAuLTsyrvSfZRuRB3XgvkPwNGgYSs9YRYymVebLKoxR" }
    }"#;

    const CURRENT: &str = r#"{
        "address": "vAuLTsyrvSfZRuRB3XgvkPwNGgYSs9YRYymVebLKoxR",
        "metadata": { "name": "drift_vaults", "version": "0.2.0", "spec": "0.1.0" },
        "instructions": [{
            "name": "update_delegate",
            "discriminator": [1, 2, 3, 4, 5, 6, 7, 8],
            "accounts": [
                { "name": "vault", "writable": true },
                {
                    "name": "drift",
                    "accounts": [
                        { "name": "drift_user", "writable": true },
                        { "name": "drift_program" }
                    ]
                },
                { "name": "manager", "signer": true },
                { "name": "referrer", "optional": true }
            ],
            "args": [{ "name": "delegate", "type": "pubkey" }]
        }]
    }"#;

    fn schema(json: &str) -> ProgramSchema {
        let idl: Idl = serde_json::from_str(json).unwrap();
        ProgramSchema::new(idl, drift_vaults_interface::ID)
    }

    fn accounts() -> UpdateDelegate {
        UpdateDelegate {
            drift_user: Pubkey::new_unique(),
            vault: Pubkey::new_unique(),
            drift_program: Pubkey::new_unique(),
            manager: Pubkey::new_unique(),
        }
    }

    #[test]
    fn legacy_idl_orders_accounts_and_flags() {
        let schema = schema(LEGACY);
        assert_eq!(schema.idl.declared_version(), Some("0.1.0"));
        let accounts = accounts();
        let args = UpdateDelegateArgs { delegate: Pubkey::new_unique() };

        let ix = schema.instruction(&args, &accounts).unwrap();
        assert_eq!(ix.program_id, drift_vaults_interface::ID);
        assert_eq!(
            ix.accounts,
            vec![
                AccountMeta::new(accounts.vault, false),
                AccountMeta::new_readonly(accounts.manager, true),
                AccountMeta::new(accounts.drift_user, false),
                AccountMeta::new_readonly(accounts.drift_program, false),
            ]
        );
        assert_eq!(&ix.data[..8], &UPDATE_DELEGATE_DISCRIMINATOR);
        assert_eq!(&ix.data[8..], args.delegate.as_ref());
    }

    #[test]
    fn current_idl_flattens_and_fills_optional() {
        let schema = schema(CURRENT);
        assert_eq!(schema.idl.declared_version(), Some("0.2.0"));
        let accounts = accounts();
        let args = UpdateDelegateArgs { delegate: Pubkey::new_unique() };

        let ix = schema.instruction(&args, &accounts).unwrap();
        let keys: Vec<Pubkey> = ix.accounts.iter().map(|m| m.pubkey).collect();
        assert_eq!(
            keys,
            vec![
                accounts.vault,
                accounts.drift_user,
                accounts.drift_program,
                accounts.manager,
                drift_vaults_interface::ID,
            ]
        );
        assert!(ix.accounts[3].is_signer);
        assert!(!ix.accounts[4].is_writable);
        assert_eq!(&ix.data[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(ix.data.len(), 8 + 32);
    }

    #[test]
    fn unknown_instruction_and_arg_drift_are_errors() {
        let mut idl: Idl = serde_json::from_str(LEGACY).unwrap();
        idl.instructions[0].args.push(IdlField { name: "extra".into(), ty: None });
        let schema = ProgramSchema::new(idl, drift_vaults_interface::ID);
        let args = UpdateDelegateArgs { delegate: Pubkey::new_unique() };

        assert!(matches!(
            schema.instruction(&args, &accounts()),
            Err(SchemaError::ArgumentMismatch { .. })
        ));
        assert_eq!(
            schema.find("initialize_vault").unwrap_err(),
            SchemaError::UnknownInstruction("initialize_vault".into())
        );
    }

    #[test]
    fn missing_required_account_is_an_error() {
        let mut idl: Idl = serde_json::from_str(LEGACY).unwrap();
        idl.instructions[0]
            .accounts
            .push(IdlAccountItem::Single(IdlAccount {
                name: "driftState".into(),
                writable: false,
                signer: false,
                optional: false,
            }));
        let schema = ProgramSchema::new(idl, drift_vaults_interface::ID);
        let args = UpdateDelegateArgs { delegate: Pubkey::new_unique() };

        assert_eq!(
            schema.instruction(&args, &accounts()).unwrap_err(),
            SchemaError::MissingAccount {
                instruction: "update_delegate".into(),
                account: "driftState".into(),
            }
        );
    }

    #[test]
    fn names_normalize_across_casing() {
        assert_eq!(normalize("driftSpotMarketMint"), normalize("drift_spot_market_mint"));
        assert_eq!(normalize("InitializeVault"), "initializevault");
    }

    /// Current-format IDL with `update_vault` whose params struct lists
    /// `fields` in the given order.
    fn update_vault_idl(fields: &[&str]) -> ProgramSchema {
        let fields: Vec<_> = fields
            .iter()
            .map(|name| json!({ "name": name, "type": { "option": "u64" } }))
            .collect();
        let idl = json!({
            "address": "vAuLTsyrvSfZRuRB3XgvkPwNGgYSs9YRYymVebLKoxR",
            "metadata": { "name": "drift_vaults", "version": "0.2.0", "spec": "0.1.0" },
            "instructions": [{
                "name": "update_vault",
                "accounts": [
                    { "name": "vault", "writable": true },
                    { "name": "manager", "signer": true }
                ],
                "args": [{ "name": "params", "type": { "defined": { "name": "UpdateVaultParams" } } }]
            }],
            "accounts": [{ "name": "Vault", "discriminator": [211, 8, 232, 43, 2, 152, 117, 119] }],
            "types": [{ "name": "UpdateVaultParams", "type": { "kind": "struct", "fields": fields } }]
        });
        ProgramSchema::new(serde_json::from_value(idl).unwrap(), drift_vaults_interface::ID)
    }

    fn update_vault() -> (UpdateVaultArgs, UpdateVault) {
        let args = UpdateVaultArgs {
            params: UpdateVaultParams {
                management_fee: Some(200_000),
                ..Default::default()
            },
        };
        let accounts = UpdateVault {
            vault: Pubkey::new_unique(),
            manager: Pubkey::new_unique(),
        };
        (args, accounts)
    }

    #[test]
    fn params_layout_matching_idl_is_encoded() {
        let schema = update_vault_idl(UpdateVaultParams::FIELDS);
        let (args, accounts) = update_vault();

        let ix = schema.instruction(&args, &accounts).unwrap();
        assert_eq!(ix.data, args.data());
    }

    #[test]
    fn reordered_params_layout_is_refused() {
        let schema = update_vault_idl(&[
            "redeem_period",
            "max_tokens",
            "management_fee",
            "min_deposit_amount",
            "profit_share",
            "hurdle_rate",
            "permissioned",
        ]);
        let (args, accounts) = update_vault();

        let (instruction, expected, found) = match schema.instruction(&args, &accounts) {
            Err(SchemaError::ArgumentMismatch { instruction, expected, found }) => {
                (instruction, expected, found)
            }
            other => panic!("expected argument mismatch, got {other:?}"),
        };
        assert_eq!(instruction, "update_vault (UpdateVaultParams)");
        assert_eq!(expected[2], "mindepositamount");
        assert_eq!(found[2], "managementfee");
    }

    #[test]
    fn undefined_params_type_is_refused() {
        let mut schema = update_vault_idl(UpdateVaultParams::FIELDS);
        schema.idl.types.clear();
        let (args, accounts) = update_vault();

        assert_eq!(
            schema.instruction(&args, &accounts).unwrap_err(),
            SchemaError::UndefinedType("UpdateVaultParams".into())
        );
    }

    #[test]
    fn account_without_layout_cannot_be_checked() {
        // current IDLs describe accounts under `types`
        let schema = update_vault_idl(UpdateVaultParams::FIELDS);
        assert_eq!(
            schema.check_layout::<Vault>().unwrap_err(),
            SchemaError::UndefinedType("Vault".into())
        );
    }
}
