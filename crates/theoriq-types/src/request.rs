use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Dialog, DialogItem};

/// Body of an execute request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecuteRequestBody {
    pub dialog: Dialog,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration: Option<Value>,
}

impl ExecuteRequestBody {
    pub fn last_item(&self) -> Option<&DialogItem> {
        self.dialog.items.last()
    }
}
