use alloy_primitives::{Address, U256};
use clap::Args;
use common::crypto::{generate_message_to_sign, recover_signer, AccessSignature, CryptoError};
use common::paste::PasteError;

use crate::cli::op::{parse_address, parse_paste_id, ContextError, OpContext};

/// Check an access signature offline, or have the wallet produce one
#[derive(Args, Debug, Clone)]
pub struct Verify {
    #[arg(long = "paste", value_parser = parse_paste_id)]
    pub id: U256,

    /// Account expected to have signed; defaults to the connected wallet
    #[arg(long, value_parser = parse_address)]
    pub address: Option<Address>,

    /// 65-byte hex signature; when omitted the wallet is asked to sign
    #[arg(long)]
    pub signature: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Paste(#[from] PasteError),
    #[error(transparent)]
    Crypto(#[from] CryptoError),
    #[error("--address is required when verifying a signature offline")]
    MissingAddress,
}

/// Describe whether `signature` is `address`'s access signature for paste `id`
pub fn check(id: U256, address: Address, signature: &AccessSignature) -> String {
    let message = generate_message_to_sign(id, address);
    let mut lines = vec![format!("message:   {}", message)];
    match recover_signer(message.as_slice(), signature.bytes()) {
        Ok(recovered) if recovered == address => {
            lines.push(format!("signer:    {}", recovered));
            lines.push("valid".to_string());
        }
        Ok(recovered) => {
            lines.push(format!("signer:    {} (expected {})", recovered, address));
            lines.push("invalid".to_string());
        }
        Err(e) => {
            lines.push(format!("error:     {}", e));
            lines.push("invalid".to_string());
        }
    }
    lines.join("\n")
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Verify {
    type Error = VerifyError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        match &self.signature {
            Some(signature) => {
                let signature = AccessSignature::from_hex(signature)?;
                let address = self.address.ok_or(VerifyError::MissingAddress)?;
                Ok(check(self.id, address, &signature))
            }
            None => {
                let client = ctx.signer_client().await?;
                let address = client.signer()?;
                let signature = client.sign_access(self.id).await?;
                Ok(format!(
                    "signature: {}\n{}",
                    signature.to_hex(),
                    check(self.id, address, &signature)
                ))
            }
        }
    }
}
