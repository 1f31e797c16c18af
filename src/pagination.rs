//! Transparent pagination over ConnectWise collection endpoints.
//!
//! [`CwClient::fetch_all`] first asks `{endpoint}/count` how many records
//! match, then walks pages `1..=ceil(count / page_size)` in order and
//! concatenates the results. Pages are fetched one at a time.
//!
//! Absence is never an error here: a missing count endpoint, an unreadable
//! count, or a page answering 404 all degrade to an empty or partial result.
//! Typed errors from any request propagate unchanged.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::CwClient;
use crate::error::CwError;
use crate::query::Query;

/// Page size used when none (or zero) is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 1000;

/// Resolves the effective page size.
pub fn resolve_page_size(page_size: Option<u32>) -> u32 {
    page_size.filter(|&n| n > 0).unwrap_or(DEFAULT_PAGE_SIZE)
}

/// Number of pages needed to cover `count` records.
pub fn total_pages(count: u64, page_size: u32) -> u32 {
    let pages = count.div_ceil(u64::from(page_size.max(1)));
    u32::try_from(pages).unwrap_or(u32::MAX)
}

/// Extracts the record count from a count endpoint payload.
///
/// Accepts integers and numeric strings. Negative values count as zero.
/// Returns `None` when the payload is not an object or the field is
/// missing or unreadable.
pub fn parse_count(payload: &Value) -> Option<u64> {
    match payload.as_object()?.get("count")? {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|_| 0))
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.is_finite())
                    .map(|f| f.max(0.0).trunc() as u64)
            }),
        Value::String(s) => s.trim().parse::<i64>().ok().map(|n| n.max(0) as u64),
        _ => None,
    }
}

impl CwClient {
    /// Retrieves every record of a collection matching `query`.
    ///
    /// Uses the query's conditions, child conditions, fields, page size
    /// (default 1000) and ordering. Its `page` is ignored.
    ///
    /// # Returns
    ///
    /// Records in the order the API returned them. Empty if the count
    /// endpoint is absent or unreadable. If a page answers 404, the records
    /// gathered so far are returned.
    ///
    /// # Errors
    ///
    /// Any typed error from the count or page requests; partial results
    /// are discarded.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let notes = client
    ///     .fetch_all("service/tickets/4821/notes", &Query::new().with_order_by("id"))
    ///     .await?;
    /// ```
    pub async fn fetch_all(&self, endpoint: &str, query: &Query) -> Result<Vec<Value>, CwError> {
        let endpoint = endpoint.trim_matches('/');
        if endpoint.is_empty() {
            return Err(CwError::validation("endpoint must not be empty"));
        }
        let count_endpoint = format!("{}/count", endpoint);

        let count = match self.fetch(&count_endpoint, &query.conditions_only()).await? {
            Some(payload) => parse_count(&payload),
            None => {
                tracing::debug!(endpoint = %endpoint, "Count endpoint not found");
                return Ok(Vec::new());
            }
        };
        let Some(count) = count else {
            tracing::debug!(endpoint = %endpoint, "Count missing or unreadable");
            return Ok(Vec::new());
        };

        let page_size = resolve_page_size(query.page_size);
        let pages = total_pages(count, page_size);

        tracing::debug!(
            endpoint = %endpoint,
            count = count,
            page_size = page_size,
            pages = pages,
            "Paginating collection"
        );

        let mut records = Vec::new();
        for page in 1..=pages {
            let page_query = Query {
                page_size: Some(page_size),
                page: Some(page),
                ..query.clone()
            };

            match self.fetch(endpoint, &page_query).await? {
                None | Some(Value::Null) => {
                    tracing::debug!(endpoint = %endpoint, page = page, "Page not found, stopping");
                    break;
                }
                Some(Value::Array(items)) => records.extend(items),
                Some(record) => records.push(record),
            }
        }

        Ok(records)
    }

    /// Like [`fetch_all`](Self::fetch_all), deserializing each record.
    ///
    /// # Errors
    ///
    /// Also returns `CwError::Serialization` if a record does not match `T`.
    pub async fn fetch_all_as<T>(&self, endpoint: &str, query: &Query) -> Result<Vec<T>, CwError>
    where
        T: DeserializeOwned,
    {
        self.fetch_all(endpoint, query)
            .await?
            .into_iter()
            .map(|record| serde_json::from_value(record).map_err(CwError::from))
            .collect()
    }
}
