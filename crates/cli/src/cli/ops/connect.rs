use clap::Args;
use common::session::{ConnectError, Session, SwitchError};

use crate::cli::op::{ContextError, OpContext};

/// Connect the wallet and report the session
#[derive(Args, Debug, Clone)]
pub struct Connect;

#[derive(Debug, thiserror::Error)]
pub enum ConnectOpError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Connect {
    type Error = ConnectOpError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let registry = ctx.registry()?;
        let session = Session::new(registry.clone(), Some(ctx.wallet()?));
        let info = session.connect().await?;

        let mut lines = vec![
            format!("Connected: {}", info.address),
            format!(
                "Network:   {} ({})",
                registry.network_name(info.chain_id),
                info.chain_id
            ),
        ];
        if info.chain_mismatch {
            lines.push(format!(
                "Warning:   unsupported network, run 'oxbin switch {}'",
                registry.default_network().name
            ));
        }
        if let Some(reason) = info.switch_error {
            lines.push(format!("Switch to the default network failed: {}", reason));
        }
        Ok(lines.join("\n"))
    }
}

/// Ask the wallet to move to another network
#[derive(Args, Debug, Clone)]
pub struct Switch {
    /// Network name or chain id
    pub network: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SwitchOpError {
    #[error(transparent)]
    Context(#[from] ContextError),
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Switch(#[from] SwitchError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Switch {
    type Error = SwitchOpError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let registry = ctx.registry()?;
        let target = registry
            .find(&self.network)
            .ok_or_else(|| ContextError::UnknownNetwork(self.network.clone()))?;

        let session = Session::new(registry.clone(), Some(ctx.wallet()?));
        session.connect().await?;
        session.switch_network(target.chain_id).await?;

        Ok(format!(
            "Switched to {} ({})",
            target.label, target.chain_id
        ))
    }
}
