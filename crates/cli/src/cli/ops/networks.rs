use clap::Args;

use crate::cli::op::{ContextError, OpContext};

#[derive(Args, Debug, Clone)]
pub struct Networks;

#[derive(Debug, thiserror::Error)]
pub enum NetworksError {
    #[error(transparent)]
    Context(#[from] ContextError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Networks {
    type Error = NetworksError;
    type Output = String;

    async fn execute(&self, ctx: &OpContext) -> Result<Self::Output, Self::Error> {
        let registry = ctx.registry()?;
        let selected = ctx.selected_network(&registry)?.chain_id;
        let default = registry.default_network().chain_id;

        let mut lines = Vec::new();
        for network in registry.iter() {
            let mut marks = Vec::new();
            if network.chain_id == default {
                marks.push("default");
            }
            if network.chain_id == selected {
                marks.push("selected");
            }
            let marks = if marks.is_empty() {
                String::new()
            } else {
                format!(" [{}]", marks.join(", "))
            };

            lines.push(format!(
                "{} ({}) {}{}",
                network.name, network.chain_id, network.label, marks
            ));
            lines.push(format!(
                "  contract:   {}",
                network
                    .contract_address
                    .map(|a| a.to_string())
                    .unwrap_or_else(|| "not configured".to_string())
            ));
            lines.push(format!("  abi:        {}", network.contract_abi));
            lines.push(format!("  key scheme: {}", network.key_scheme));
            if let Some(url) = &network.rpc_url {
                lines.push(format!("  rpc:        {}", url));
            }
        }

        Ok(lines.join("\n"))
    }
}
