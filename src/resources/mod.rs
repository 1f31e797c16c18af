//! Resource-specific operations.
//!
//! Each service borrows a [`CwClient`](crate::client::CwClient) and builds
//! on its generic verbs; the client itself knows nothing about tickets or
//! configurations.

mod configurations;
mod tickets;

pub use configurations::ConfigurationService;
pub use tickets::{MergeOutcome, TicketService};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::CwError;

/// Deserializes an optional payload into a model.
fn decode_opt<T: DeserializeOwned>(value: Option<Value>) -> Result<Option<T>, CwError> {
    value.map(serde_json::from_value).transpose().map_err(CwError::from)
}
