//! Configuration (asset) operations.

use serde_json::json;

use super::decode_opt;
use crate::client::CwClient;
use crate::error::CwError;
use crate::models::Configuration;
use crate::query::Query;

const CONFIGURATIONS: &str = "company/configurations";

/// Configuration operations on top of a [`CwClient`].
#[derive(Clone, Copy)]
pub struct ConfigurationService<'a> {
    client: &'a CwClient,
}

impl<'a> ConfigurationService<'a> {
    /// Creates the service.
    pub fn new(client: &'a CwClient) -> Self {
        Self { client }
    }

    fn ticket_configurations(ticket_id: u64) -> String {
        format!("service/tickets/{}/configurations", ticket_id)
    }

    /// Attaches a configuration to a ticket.
    pub async fn attach_configuration(
        &self,
        ticket_id: u64,
        config_id: u64,
    ) -> Result<Configuration, CwError> {
        let endpoint = Self::ticket_configurations(ticket_id);
        let result = self
            .client
            .create(&endpoint, &json!({ "id": config_id }))
            .await?;

        tracing::debug!(ticket_id, config_id, "Attached configuration");
        Ok(serde_json::from_value(result)?)
    }

    /// Detaches a configuration from a ticket.
    ///
    /// Returns `false` if the attachment does not exist.
    pub async fn detach_configuration(
        &self,
        ticket_id: u64,
        config_id: u64,
    ) -> Result<bool, CwError> {
        self.client
            .remove(&Self::ticket_configurations(ticket_id), config_id)
            .await
    }

    /// Gets every configuration attached to a ticket.
    pub async fn get_ticket_configurations(
        &self,
        ticket_id: u64,
    ) -> Result<Vec<Configuration>, CwError> {
        self.client
            .fetch_all_as(&Self::ticket_configurations(ticket_id), &Query::new())
            .await
    }

    /// Gets a configuration by id, `None` if it does not exist.
    pub async fn get_configuration(
        &self,
        config_id: u64,
    ) -> Result<Option<Configuration>, CwError> {
        let endpoint = format!("{}/{}", CONFIGURATIONS, config_id);
        decode_opt(self.client.fetch(&endpoint, &Query::new()).await?)
    }

    /// Gets every configuration matching `query`.
    pub async fn get_configurations(&self, query: &Query) -> Result<Vec<Configuration>, CwError> {
        self.client.fetch_all_as(CONFIGURATIONS, query).await
    }

    /// Gets every configuration belonging to a company.
    pub async fn get_company_configurations(
        &self,
        company_id: u64,
    ) -> Result<Vec<Configuration>, CwError> {
        let query = Query::new().with_conditions(format!("company/id={}", company_id));
        self.get_configurations(&query).await
    }
}
