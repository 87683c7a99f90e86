//! The boundary to the external multi-agent reasoning service.
//!
//! The service is a black box reached through a single call shape: a
//! natural-language instruction plus an opaque routing id. What sub-agents
//! the id fans out to is the service's concern, not ours.

pub mod http;
pub mod prompt;

use anyhow::Result;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

/// Wire reply from the reasoning service. Every field is optional on the
/// wire; missing pieces default rather than fail - the normalizer deals
/// with whatever `result` turns out to be.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<AgentResponse>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgentResponse {
    #[serde(default)]
    pub result: Option<Value>,
}

impl AgentReply {
    /// The inner result payload, if the service sent one.
    pub fn into_result(self) -> Option<Value> {
        self.response.and_then(|r| r.result)
    }
}

/// A long-running call into the reasoning service.
///
/// Implementations must not retry: failure policy belongs to the caller,
/// and the workflow treats every failure as terminal for the attempt.
#[async_trait]
pub trait AgentGateway: Send + Sync {
    async fn invoke(&self, prompt: &str, agent_id: &str) -> Result<AgentReply>;
}
