//! Ticket models for the ConnectWise Manage API.

use serde::{Deserialize, Serialize};

use super::{null_as_default, ref_id, ref_name, Reference};

/// A service ticket.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    /// Unique ticket ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Ticket summary line.
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,

    /// Record type (e.g., `ServiceTicket`, `ProjectTicket`).
    #[serde(default)]
    pub record_type: Option<String>,

    /// Service board.
    #[serde(default)]
    pub board: Option<Reference>,

    /// Company the ticket belongs to.
    #[serde(default)]
    pub company: Option<Reference>,

    /// Priority.
    #[serde(default)]
    pub priority: Option<Reference>,

    /// Status.
    #[serde(default)]
    pub status: Option<Reference>,

    /// Ticket type.
    #[serde(default, rename = "type")]
    pub ticket_type: Option<Reference>,

    /// Ticket subtype.
    #[serde(default)]
    pub sub_type: Option<Reference>,

    /// Ticket item.
    #[serde(default)]
    pub item: Option<Reference>,

    /// Source (e.g., email, phone).
    #[serde(default)]
    pub source: Option<Reference>,

    /// Service team.
    #[serde(default)]
    pub team: Option<Reference>,

    /// Owning member.
    #[serde(default)]
    pub owner: Option<Reference>,

    /// Contact at the company.
    #[serde(default)]
    pub contact: Option<Reference>,

    /// Company site.
    #[serde(default)]
    pub site: Option<Reference>,

    /// Initial description, only returned on creation.
    #[serde(default)]
    pub initial_description: Option<String>,

    /// Required-by date (raw API timestamp).
    #[serde(default)]
    pub required_date: Option<String>,

    /// Closed date (raw API timestamp).
    #[serde(default)]
    pub closed_date: Option<String>,

    /// Who closed the ticket.
    #[serde(default)]
    pub closed_by: Option<String>,

    /// Whether the ticket is closed.
    #[serde(default, deserialize_with = "null_as_default")]
    pub closed_flag: bool,

    /// Hours logged against the ticket.
    #[serde(default)]
    pub actual_hours: Option<f64>,

    /// Budgeted hours.
    #[serde(default)]
    pub budget_hours: Option<f64>,

    /// Whether the customer updated the ticket.
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_updated_flag: bool,

    /// Parent ticket, when merged.
    #[serde(default)]
    pub parent_ticket_id: Option<u64>,

    /// Whether the ticket has merged children.
    #[serde(default, deserialize_with = "null_as_default")]
    pub has_child_ticket: bool,

    /// Audit block (`_info`).
    #[serde(default, rename = "_info", deserialize_with = "null_as_default")]
    pub info: TicketInfo,
}

/// Audit timestamps the API nests under `_info`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketInfo {
    /// Date entered (raw API timestamp).
    #[serde(default)]
    pub date_entered: Option<String>,

    /// Last updated (raw API timestamp).
    #[serde(default)]
    pub last_updated: Option<String>,

    /// Who last updated the ticket.
    #[serde(default)]
    pub updated_by: Option<String>,
}

impl Ticket {
    /// Returns the company name, if present.
    pub fn company_name(&self) -> Option<&str> {
        ref_name(&self.company)
    }

    /// Returns the company ID, if present.
    pub fn company_id(&self) -> Option<u64> {
        ref_id(&self.company)
    }

    /// Returns the board name, if present.
    pub fn board_name(&self) -> Option<&str> {
        ref_name(&self.board)
    }

    /// Returns the status name, if present.
    pub fn status_name(&self) -> Option<&str> {
        ref_name(&self.status)
    }

    /// Returns the priority name, if present.
    pub fn priority_name(&self) -> Option<&str> {
        ref_name(&self.priority)
    }

    /// Returns the type name, if present.
    pub fn type_name(&self) -> Option<&str> {
        ref_name(&self.ticket_type)
    }

    /// Returns the source name, if present.
    pub fn source_name(&self) -> Option<&str> {
        ref_name(&self.source)
    }

    /// Returns the owner name, if present.
    pub fn owner_name(&self) -> Option<&str> {
        ref_name(&self.owner)
    }

    /// Returns the contact name, if present.
    pub fn contact_name(&self) -> Option<&str> {
        ref_name(&self.contact)
    }

    /// Returns true if the ticket is closed.
    pub fn is_closed(&self) -> bool {
        self.closed_flag
    }

    /// Returns when the ticket was entered.
    pub fn date_entered(&self) -> Option<&str> {
        self.info.date_entered.as_deref()
    }

    /// Returns when the ticket was last updated.
    pub fn last_updated(&self) -> Option<&str> {
        self.info.last_updated.as_deref()
    }

    /// Returns who last updated the ticket.
    pub fn updated_by(&self) -> Option<&str> {
        self.info.updated_by.as_deref()
    }
}

/// Payload for creating a ticket.
///
/// Unset ids are filled from the configured ticket defaults before sending.
/// Refs still unset after that are sent as `null`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTicket {
    /// Summary line.
    pub summary: String,

    /// Initial description body.
    pub initial_description: String,

    /// Service board.
    pub board: Option<Reference>,

    /// Company.
    pub company: Option<Reference>,

    /// Priority.
    pub priority: Option<Reference>,

    /// Ticket type.
    #[serde(rename = "type")]
    pub ticket_type: Option<Reference>,

    /// Initial status.
    pub status: Option<Reference>,

    /// Source.
    pub source: Option<Reference>,

    /// Configurations to attach once the ticket exists. Not sent.
    #[serde(skip)]
    pub config_ids: Vec<u64>,
}

impl NewTicket {
    /// Creates a ticket payload with a summary and description.
    pub fn new(summary: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            initial_description: description.into(),
            ..Default::default()
        }
    }

    /// Sets the company.
    pub fn with_company(mut self, id: u64) -> Self {
        self.company = Some(Reference::id(id));
        self
    }

    /// Sets the board.
    pub fn with_board(mut self, id: u64) -> Self {
        self.board = Some(Reference::id(id));
        self
    }

    /// Sets the priority.
    pub fn with_priority(mut self, id: u64) -> Self {
        self.priority = Some(Reference::id(id));
        self
    }

    /// Sets the status.
    pub fn with_status(mut self, id: u64) -> Self {
        self.status = Some(Reference::id(id));
        self
    }

    /// Sets the ticket type.
    pub fn with_type(mut self, id: u64) -> Self {
        self.ticket_type = Some(Reference::id(id));
        self
    }

    /// Sets the source.
    pub fn with_source(mut self, id: u64) -> Self {
        self.source = Some(Reference::id(id));
        self
    }

    /// Adds a configuration to attach after creation.
    pub fn with_configuration(mut self, config_id: u64) -> Self {
        self.config_ids.push(config_id);
        self
    }
}
