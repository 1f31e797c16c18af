//! Ticket operations.

use serde_json::{json, Value};

use super::{decode_opt, ConfigurationService};
use crate::client::CwClient;
use crate::config::TicketDefaults;
use crate::error::CwError;
use crate::models::{NewNote, NewTicket, Note, PatchOperation, Reference, Ticket};
use crate::query::Query;

const TICKETS: &str = "service/tickets";

/// Result of merging a child ticket into a parent.
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The child ticket after its status update, `None` if it was not found.
    pub child_ticket: Option<Ticket>,
    /// Raw response of the attach-children call.
    pub merge_response: Value,
}

/// Ticket operations on top of a [`CwClient`].
///
/// # Example
///
/// ```ignore
/// let tickets = TicketService::with_defaults(&client, config.ticket_defaults);
/// let ticket = tickets
///     .create_ticket(NewTicket::new("VPN down", "Users cannot connect"))
///     .await?;
/// ```
#[derive(Clone, Copy)]
pub struct TicketService<'a> {
    client: &'a CwClient,
    defaults: TicketDefaults,
}

impl<'a> TicketService<'a> {
    /// Creates a service without ticket defaults.
    pub fn new(client: &'a CwClient) -> Self {
        Self::with_defaults(client, TicketDefaults::default())
    }

    /// Creates a service that fills unset ids on new tickets from `defaults`.
    pub fn with_defaults(client: &'a CwClient, defaults: TicketDefaults) -> Self {
        Self { client, defaults }
    }

    /// Creates a ticket, then attaches the configurations it lists.
    ///
    /// # Errors
    ///
    /// Any error from the creation or attachment calls. If an attachment
    /// fails, the ticket has already been created.
    pub async fn create_ticket(&self, ticket: NewTicket) -> Result<Ticket, CwError> {
        let ticket = self.apply_defaults(ticket);

        let created = match self.client.create(TICKETS, &ticket).await? {
            Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
            Value::Array(_) => {
                return Err(CwError::Serialization(serde::de::Error::custom(
                    "ticket creation returned an empty list",
                )))
            }
            other => other,
        };
        let created: Ticket = serde_json::from_value(created)?;

        tracing::info!(ticket_id = created.id, "Created ticket");

        let configurations = ConfigurationService::new(self.client);
        for config_id in &ticket.config_ids {
            configurations
                .attach_configuration(created.id, *config_id)
                .await?;
        }

        Ok(created)
    }

    fn apply_defaults(&self, mut ticket: NewTicket) -> NewTicket {
        let d = &self.defaults;
        let fill = |slot: &mut Option<Reference>, default: Option<u64>| {
            if slot.is_none() {
                *slot = default.map(Reference::id);
            }
        };
        fill(&mut ticket.company, d.company_id);
        fill(&mut ticket.board, d.board_id);
        fill(&mut ticket.priority, d.priority_id);
        fill(&mut ticket.status, d.status_id);
        fill(&mut ticket.ticket_type, d.type_id);
        fill(&mut ticket.source, d.source_id);
        ticket
    }

    /// Gets a ticket by id, `None` if it does not exist.
    pub async fn get_ticket(&self, ticket_id: u64) -> Result<Option<Ticket>, CwError> {
        let endpoint = format!("{}/{}", TICKETS, ticket_id);
        decode_opt(self.client.fetch(&endpoint, &Query::new()).await?)
    }

    /// Gets every ticket matching `query`, across all pages.
    pub async fn get_tickets(&self, query: &Query) -> Result<Vec<Ticket>, CwError> {
        self.client.fetch_all_as(TICKETS, query).await
    }

    /// Sets the ticket status.
    pub async fn update_ticket_status(
        &self,
        ticket_id: u64,
        status_id: u64,
    ) -> Result<Option<Ticket>, CwError> {
        self.update_ticket_field(ticket_id, "/status", json!({ "id": status_id }))
            .await
    }

    /// Sets the ticket priority.
    pub async fn update_ticket_priority(
        &self,
        ticket_id: u64,
        priority_id: u64,
    ) -> Result<Option<Ticket>, CwError> {
        self.update_ticket_field(ticket_id, "/priority", json!({ "id": priority_id }))
            .await
    }

    /// Moves the ticket to another company.
    pub async fn update_ticket_company(
        &self,
        ticket_id: u64,
        company_id: u64,
    ) -> Result<Option<Ticket>, CwError> {
        self.update_ticket_field(ticket_id, "/company", json!({ "id": company_id }))
            .await
    }

    /// Replaces any ticket field (e.g., `/summary`).
    pub async fn update_ticket_field(
        &self,
        ticket_id: u64,
        field_path: &str,
        value: impl Into<Value>,
    ) -> Result<Option<Ticket>, CwError> {
        let ops = [PatchOperation::replace(field_path, value)];
        decode_opt(self.client.partial_update(TICKETS, ticket_id, &ops).await?)
    }

    /// Merges a child ticket into a parent.
    ///
    /// Sets the child's status first, then attaches it to the parent.
    pub async fn merge_ticket(
        &self,
        child_ticket_id: u64,
        parent_ticket_id: u64,
        child_status_id: u64,
    ) -> Result<MergeOutcome, CwError> {
        let child_ticket = self
            .update_ticket_status(child_ticket_id, child_status_id)
            .await?;

        let endpoint = format!("{}/{}/attachChildren", TICKETS, parent_ticket_id);
        let merge_response = self
            .client
            .create(&endpoint, &json!({ "childTicketIds": [child_ticket_id] }))
            .await?;

        Ok(MergeOutcome {
            child_ticket,
            merge_response,
        })
    }

    /// Adds a note to a ticket.
    pub async fn add_ticket_note(
        &self,
        ticket_id: u64,
        text: &str,
        internal: bool,
    ) -> Result<Note, CwError> {
        let endpoint = format!("{}/{}/notes", TICKETS, ticket_id);
        let note = self
            .client
            .create(&endpoint, &NewNote::new(text, internal))
            .await?;
        Ok(serde_json::from_value(note)?)
    }

    /// Gets every note on a ticket matching `query`.
    pub async fn get_ticket_notes(
        &self,
        ticket_id: u64,
        query: &Query,
    ) -> Result<Vec<Note>, CwError> {
        let endpoint = format!("{}/{}/notes", TICKETS, ticket_id);
        self.client.fetch_all_as(&endpoint, query).await
    }

    /// Returns the web URL for a ticket.
    pub fn ticket_url(&self, ticket_id: u64) -> String {
        self.client.ticket_url(ticket_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const API: &str = "/v4_6_release/apis/3.0";

    fn test_client(server: &MockServer) -> CwClient {
        let config = Config::new(server.uri(), "acme", "apiuser", "s3cret", "cid-123").unwrap();
        CwClient::new(&config).unwrap()
    }

    fn defaults() -> TicketDefaults {
        TicketDefaults {
            company_id: Some(19184),
            board_id: Some(12),
            priority_id: Some(8),
            status_id: None,
            type_id: Some(5),
            source_id: None,
        }
    }

    #[tokio::test]
    async fn test_create_ticket_applies_defaults_and_attaches_configs() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/service/tickets", API)))
            .and(body_json(json!({
                "summary": "Printer jam",
                "initialDescription": "Tray 2",
                "board": {"id": 12},
                "company": {"id": 19184},
                "priority": {"id": 1},
                "type": {"id": 5},
                "status": null,
                "source": null
            })))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(json!([{"id": 900, "summary": "Printer jam"}])),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{}/service/tickets/900/configurations", API)))
            .and(body_json(json!({"id": 31})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 31})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let tickets = TicketService::with_defaults(&client, defaults());
        let ticket = tickets
            .create_ticket(
                NewTicket::new("Printer jam", "Tray 2")
                    .with_priority(1)
                    .with_configuration(31),
            )
            .await
            .unwrap();

        assert_eq!(ticket.id, 900);
    }

    #[tokio::test]
    async fn test_get_ticket_absent() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let ticket = TicketService::new(&client).get_ticket(1).await.unwrap();
        assert!(ticket.is_none());
    }

    #[tokio::test]
    async fn test_get_tickets_paginates() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{}/service/tickets/count", API)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"count": 2})))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(format!("{}/service/tickets", API)))
            .and(query_param("page", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "summary": "a", "status": {"id": 1, "name": "New"}},
                {"id": 2, "summary": "b", "closedFlag": null, "owner": null}
            ])))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let tickets = TicketService::new(&client)
            .get_tickets(&Query::new())
            .await
            .unwrap();

        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[0].status_name(), Some("New"));
        assert_eq!(tickets[1].summary, "b");
        assert!(!tickets[1].is_closed());
    }

    #[tokio::test]
    async fn test_merge_ticket() {
        let server = MockServer::start().await;

        Mock::given(method("PATCH"))
            .and(path(format!("{}/service/tickets/20", API)))
            .and(body_json(json!([
                {"op": "replace", "path": "/status", "value": {"id": 99}}
            ])))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 20})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path(format!("{}/service/tickets/10/attachChildren", API)))
            .and(body_json(json!({"childTicketIds": [20]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let outcome = TicketService::new(&client)
            .merge_ticket(20, 10, 99)
            .await
            .unwrap();

        assert_eq!(outcome.child_ticket.unwrap().id, 20);
        assert_eq!(outcome.merge_response, json!({"success": true}));
    }

    #[tokio::test]
    async fn test_add_ticket_note() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(format!("{}/service/tickets/5/notes", API)))
            .and(body_json(json!({
                "text": "Called user",
                "detailDescriptionFlag": false,
                "internalAnalysisFlag": true
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 3, "ticketId": 5, "text": "Called user", "internalAnalysisFlag": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let note = TicketService::new(&client)
            .add_ticket_note(5, "Called user", true)
            .await
            .unwrap();
        assert!(note.is_internal());
        assert_eq!(note.ticket_id, 5);
    }

    #[tokio::test]
    async fn test_update_ticket_field_absent() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        let result = TicketService::new(&client)
            .update_ticket_field(404, "/summary", "renamed")
            .await
            .unwrap();
        assert!(result.is_none());
    }
}
