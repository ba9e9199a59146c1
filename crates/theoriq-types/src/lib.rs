//! Dialog, block and cost types for the Theoriq agent protocol.
//! No HTTP or runtime dependency; shared by agents and their tests.

mod cost;
mod dialog;
mod error;
mod request;

pub use cost::{Currency, TheoriqCost};
pub use dialog::{Dialog, DialogItem, ItemBlock, SourceType, TEXT_BLOCK};
pub use error::TypesError;
pub use request::ExecuteRequestBody;
