//! Wallet seam: connection state, public key and transaction signing.
//!
//! The submitter only ever talks to this trait, so a browser-extension
//! bridge, a hardware signer or a plain local keypair all plug in the same
//! way.

use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::Keypair;
use solana_sdk::signer::Signer;
use solana_sdk::transaction::VersionedTransaction;

use crate::swap::error::SwapError;

#[async_trait]
pub trait WalletAdapter: Send + Sync {
    /// Whether the wallet is connected and able to sign.
    fn is_connected(&self) -> bool;

    fn pubkey(&self) -> Option<Pubkey>;

    /// Sign the transaction, returning the signed copy. Rejection or any
    /// signer failure surfaces as [`SwapError::Signing`].
    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, SwapError>;
}

/// Local keypair wallet, always connected.
pub struct KeypairWallet {
    keypair: Keypair,
}

impl KeypairWallet {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }
}

#[async_trait]
impl WalletAdapter for KeypairWallet {
    fn is_connected(&self) -> bool {
        true
    }

    fn pubkey(&self) -> Option<Pubkey> {
        Some(self.keypair.pubkey())
    }

    async fn sign_transaction(
        &self,
        transaction: VersionedTransaction,
    ) -> Result<VersionedTransaction, SwapError> {
        VersionedTransaction::try_new(transaction.message, &[&self.keypair])
            .map_err(|e| SwapError::Signing(e.to_string()))
    }
}
