use anchor_lang::prelude::Pubkey;
use anyhow::{anyhow, Context, Result};
use log::info;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    instruction::Instruction,
    signature::{Keypair, Signature},
    signer::Signer,
    transaction::Transaction,
};

/// The cluster as seen by the tool: read an account, land an instruction.
#[allow(async_fn_in_trait)]
pub trait Chain {
    /// Raw data of `address`. A missing account is an error.
    async fn account_data(&self, address: &Pubkey) -> Result<Vec<u8>>;

    /// Signs `instruction` with `signer` as fee payer and waits for it to
    /// land.
    async fn submit(&self, instruction: Instruction, signer: &Keypair) -> Result<Signature>;
}

pub struct RpcChain {
    client: RpcClient,
}

impl RpcChain {
    pub fn new(rpc_url: String) -> Self {
        let client = RpcClient::new_with_commitment(rpc_url, CommitmentConfig::processed());
        Self { client }
    }

    pub fn url(&self) -> String {
        self.client.url()
    }
}

impl Chain for RpcChain {
    async fn account_data(&self, address: &Pubkey) -> Result<Vec<u8>> {
        let account = self
            .client
            .get_account_with_commitment(address, self.client.commitment())
            .await
            .with_context(|| format!("fetching account {address}"))?
            .value
            .ok_or_else(|| anyhow!("account {address} does not exist"))?;
        Ok(account.data)
    }

    async fn submit(&self, instruction: Instruction, signer: &Keypair) -> Result<Signature> {
        let recent_blockhash = self
            .client
            .get_latest_blockhash()
            .await
            .context("fetching latest blockhash")?;
        let tx = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&signer.pubkey()),
            &[signer],
            recent_blockhash,
        );
        let signature = self
            .client
            .send_and_confirm_transaction(&tx)
            .await
            .context("sending transaction")?;
        info!("[chain] landed {signature}");
        Ok(signature)
    }
}
