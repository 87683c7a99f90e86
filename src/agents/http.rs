//! HTTP implementation of the agent gateway.

use super::{AgentGateway, AgentReply};
use crate::config::GatewayConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Invokes reasoning-service agents over HTTP.
///
/// POSTs `{agent_id, message}` to `<base_url>/agents/invoke` and decodes
/// the reply. No retries, no orchestrator-level timeout beyond the client's
/// own request timeout.
pub struct HttpAgentGateway {
    client: Client,
    invoke_url: String,
}

#[derive(Debug, Serialize)]
struct InvokeRequest<'a> {
    agent_id: &'a str,
    message: &'a str,
}

impl HttpAgentGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base = config.base_url.trim_end_matches('/');
        let invoke_url = format!("{}/agents/invoke", base);
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, invoke_url })
    }
}

#[async_trait]
impl AgentGateway for HttpAgentGateway {
    async fn invoke(&self, prompt: &str, agent_id: &str) -> Result<AgentReply> {
        let request = InvokeRequest {
            agent_id,
            message: prompt,
        };

        let response = self
            .client
            .post(&self.invoke_url)
            .json(&request)
            .send()
            .await
            .with_context(|| format!("Agent request failed: {}", agent_id))?;

        let response = response
            .error_for_status()
            .with_context(|| format!("Agent request rejected: {}", agent_id))?;

        let reply: AgentReply = response
            .json()
            .await
            .with_context(|| format!("Agent reply was not valid JSON: {}", agent_id))?;

        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GatewayConfig;

    #[test]
    fn test_invoke_url_strips_trailing_slash() {
        let config = GatewayConfig {
            base_url: "https://agents.example.com/".to_string(),
            ..GatewayConfig::default()
        };
        let gateway = HttpAgentGateway::new(&config).expect("gateway builds");
        assert_eq!(gateway.invoke_url, "https://agents.example.com/agents/invoke");
    }
}
