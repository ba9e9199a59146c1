//! The hello agent: greets whatever the caller last said.

use std::sync::Arc;
use theoriq_types::{Currency, ExecuteRequestBody, ItemBlock, TheoriqCost};
use tracing::{error, info};

use crate::context::{ExecuteContext, ExecuteFn, ExecuteResponse, ExecuteRuntimeError};
use crate::AgentError;

/// Fixed price of one greeting.
pub const COST: TheoriqCost = TheoriqCost {
    amount: 1,
    currency: Currency::Usdc,
};

pub fn greeting(text: &str) -> String {
    format!("Hello {text} from a Theoriq Agent!")
}

/// Execute callback. Any failure is logged and turned into a runtime error
/// carrying its message.
pub fn execute(
    context: &ExecuteContext,
    req: &ExecuteRequestBody,
) -> Result<ExecuteResponse, ExecuteRuntimeError> {
    let sender_type = context
        .request_sender_type
        .map(|t| t.as_str())
        .unwrap_or("unknown");
    info!(
        "Received request: {} from {} {}",
        context.request_id, sender_type, context.request_sender_address
    );

    match respond(context, req) {
        Ok(response) => Ok(response),
        Err(e) => {
            error!(req_id = %context.request_id, "Error processing request: {e}");
            Err(context.runtime_error_response(e.to_string()))
        }
    }
}

fn respond(context: &ExecuteContext, req: &ExecuteRequestBody) -> Result<ExecuteResponse, AgentError> {
    let last_item = req.last_item().ok_or(AgentError::EmptyDialog)?;
    let block = last_item.blocks.first().ok_or(AgentError::EmptyItem)?;
    let text = block
        .as_text()
        .ok_or_else(|| AgentError::NotText(block.block_type.clone()))?;

    Ok(context.new_response(vec![ItemBlock::text(greeting(text))], COST))
}

/// `execute` boxed for registration with the router.
pub fn execute_fn() -> ExecuteFn {
    Arc::new(execute)
}
