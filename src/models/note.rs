//! Ticket note models for the ConnectWise Manage API.

use serde::{Deserialize, Serialize};

use super::{null_as_default, ref_name, Reference};

/// A note attached to a service ticket.
///
/// Notes are either internal analysis (technicians only) or part of the
/// detail description visible to the customer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// Unique note ID.
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: u64,

    /// Ticket the note belongs to.
    #[serde(default, deserialize_with = "null_as_default")]
    pub ticket_id: u64,

    /// Note content.
    #[serde(default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Part of the customer-visible description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub detail_description_flag: bool,

    /// Internal analysis note.
    #[serde(default, deserialize_with = "null_as_default")]
    pub internal_analysis_flag: bool,

    /// Flagged as external.
    #[serde(default, deserialize_with = "null_as_default")]
    pub external_flag: bool,

    /// Created at (raw API timestamp).
    #[serde(default)]
    pub date_created: Option<String>,

    /// Who created the note.
    #[serde(default)]
    pub created_by: Option<String>,

    /// Member who wrote the note.
    #[serde(default)]
    pub member: Option<Reference>,

    /// Contact who wrote the note.
    #[serde(default)]
    pub contact: Option<Reference>,

    /// Whether the customer updated the ticket with this note.
    #[serde(default, deserialize_with = "null_as_default")]
    pub customer_updated_flag: bool,
}

impl Note {
    /// Returns true if the note is internal.
    pub fn is_internal(&self) -> bool {
        self.internal_analysis_flag
    }

    /// Returns true if the note is external.
    pub fn is_external(&self) -> bool {
        self.external_flag
    }

    /// Returns the author, member first then contact.
    pub fn author(&self) -> Option<&str> {
        ref_name(&self.member).or_else(|| ref_name(&self.contact))
    }
}

/// Request body for adding a note to a ticket.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    /// The note content.
    pub text: String,

    /// Customer-visible flag.
    pub detail_description_flag: bool,

    /// Internal flag.
    pub internal_analysis_flag: bool,
}

impl NewNote {
    /// Creates a note that is either internal or customer-visible.
    pub fn new(text: impl Into<String>, internal: bool) -> Self {
        Self {
            text: text.into(),
            detail_description_flag: !internal,
            internal_analysis_flag: internal,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_note_author_prefers_member() {
        let note: Note = serde_json::from_value(json!({
            "id": 1,
            "ticketId": 4821,
            "text": "Rebooted the router",
            "internalAnalysisFlag": true,
            "member": {"id": 3, "name": "Jane Tech"},
            "contact": {"id": 9, "name": "Bob Customer"}
        }))
        .unwrap();

        assert!(note.is_internal());
        assert!(!note.is_external());
        assert_eq!(note.author(), Some("Jane Tech"));
        assert_eq!(note.ticket_id, 4821);
    }

    #[test]
    fn test_note_accepts_null_fields() {
        let note: Note = serde_json::from_value(json!({
            "id": 2,
            "text": null,
            "internalAnalysisFlag": null,
            "externalFlag": null,
            "member": null,
            "contact": {"id": 9, "name": "Bob Customer"}
        }))
        .unwrap();

        assert_eq!(note.text, "");
        assert!(!note.is_internal());
        assert!(!note.is_external());
        assert_eq!(note.author(), Some("Bob Customer"));
    }

    #[test]
    fn test_new_note_flags() {
        assert_eq!(
            serde_json::to_value(NewNote::new("hello", true)).unwrap(),
            json!({"text": "hello", "detailDescriptionFlag": false, "internalAnalysisFlag": true})
        );
        assert_eq!(
            serde_json::to_value(NewNote::new("hello", false)).unwrap(),
            json!({"text": "hello", "detailDescriptionFlag": true, "internalAnalysisFlag": false})
        );
    }
}
