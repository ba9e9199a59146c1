//! Execute callback plumbing: the per-request context handed to the agent
//! and the envelopes it answers with.

use serde::Serialize;
use std::sync::Arc;
use theoriq_types::{DialogItem, ExecuteRequestBody, ItemBlock, SourceType, TheoriqCost};

/// Agent callback registered with the router.
pub type ExecuteFn = Arc<
    dyn Fn(&ExecuteContext, &ExecuteRequestBody) -> Result<ExecuteResponse, ExecuteRuntimeError>
        + Send
        + Sync,
>;

/// What the agent knows about the request it is executing.
#[derive(Debug, Clone)]
pub struct ExecuteContext {
    pub request_id: String,
    pub request_sender_type: Option<SourceType>,
    pub request_sender_address: String,
    agent_address: String,
}

impl ExecuteContext {
    /// The sender is the author of the last dialog item.
    pub fn new(
        request_id: impl Into<String>,
        agent_address: impl Into<String>,
        body: &ExecuteRequestBody,
    ) -> Self {
        let last = body.last_item();
        Self {
            request_id: request_id.into(),
            request_sender_type: last.map(|item| item.source_type),
            request_sender_address: last.map(|item| item.source.clone()).unwrap_or_default(),
            agent_address: agent_address.into(),
        }
    }

    pub fn agent_address(&self) -> &str {
        &self.agent_address
    }

    /// Response authored by this agent.
    pub fn new_response(&self, blocks: Vec<ItemBlock>, cost: TheoriqCost) -> ExecuteResponse {
        ExecuteResponse {
            body: DialogItem::new(SourceType::Agent, self.agent_address.clone(), blocks),
            cost,
        }
    }

    pub fn runtime_error_response(&self, message: impl Into<String>) -> ExecuteRuntimeError {
        ExecuteRuntimeError::new(message)
    }
}

/// Successful execution: the agent's dialog item plus what it costs.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteResponse {
    pub body: DialogItem,
    pub cost: TheoriqCost,
}

/// Failed execution, serialized as `{"error":"RuntimeError","message":...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExecuteRuntimeError {
    pub error: &'static str,
    pub message: String,
}

impl ExecuteRuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: "RuntimeError",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use theoriq_types::Currency;

    fn body() -> ExecuteRequestBody {
        serde_json::from_value(json!({
            "dialog": {"items": [{
                "timestamp": "2024-05-01T12:00:00Z",
                "sourceType": "user",
                "source": "0xuser",
                "blocks": [{"type": "text", "data": {"text": "World"}}]
            }]}
        }))
        .unwrap()
    }

    #[test]
    fn test_sender_from_last_item() {
        let ctx = ExecuteContext::new("req-1", "0xagent", &body());
        assert_eq!(ctx.request_sender_type, Some(SourceType::User));
        assert_eq!(ctx.request_sender_address, "0xuser");
        assert_eq!(ctx.agent_address(), "0xagent");
    }

    #[test]
    fn test_empty_dialog_has_no_sender() {
        let ctx = ExecuteContext::new("req-2", "0xagent", &ExecuteRequestBody::default());
        assert_eq!(ctx.request_sender_type, None);
        assert!(ctx.request_sender_address.is_empty());
    }

    #[test]
    fn test_new_response_is_authored_by_agent() {
        let ctx = ExecuteContext::new("req-3", "0xagent", &body());
        let resp = ctx.new_response(
            vec![ItemBlock::text("hi")],
            TheoriqCost::new(1, Currency::Usdc),
        );
        assert_eq!(resp.body.source_type, SourceType::Agent);
        assert_eq!(resp.body.source, "0xagent");
        assert_eq!(resp.body.blocks.len(), 1);
    }

    #[test]
    fn test_runtime_error_shape() {
        let ctx = ExecuteContext::new("req-4", "0xagent", &body());
        let err = ctx.runtime_error_response("boom");
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            json!({"error": "RuntimeError", "message": "boom"})
        );
    }
}
