//! Query parameters for collection endpoints.
//!
//! ConnectWise collection endpoints accept `conditions`, `childconditions`,
//! `fields`, `pagesize`, `page` and `orderby`. Only parameters that were
//! explicitly supplied are sent; empty strings and zero numbers count as
//! not supplied.

/// Filter, projection and paging parameters for a GET request.
///
/// Use the builder methods to construct a query.
///
/// # Example
///
/// ```ignore
/// let query = Query::new()
///     .with_conditions("closedFlag=false")
///     .with_order_by("id desc")
///     .with_page_size(250);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Condition expression (e.g., `board/name="Service Desk"`).
    pub conditions: Option<String>,

    /// Child condition expression.
    pub child_conditions: Option<String>,

    /// Comma-separated field selection.
    pub fields: Option<String>,

    /// Records per page.
    pub page_size: Option<u32>,

    /// Page number, starting at 1.
    pub page: Option<u32>,

    /// Ordering expression.
    pub order_by: Option<String>,
}

impl Query {
    /// Creates an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the condition expression.
    pub fn with_conditions(mut self, conditions: impl Into<String>) -> Self {
        self.conditions = Some(conditions.into());
        self
    }

    /// Sets the child condition expression.
    pub fn with_child_conditions(mut self, child_conditions: impl Into<String>) -> Self {
        self.child_conditions = Some(child_conditions.into());
        self
    }

    /// Restricts the fields returned.
    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    /// Sets the page size.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the ordering expression.
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Returns a query carrying only the condition filters, as sent to
    /// count endpoints.
    pub fn conditions_only(&self) -> Self {
        Self {
            conditions: self.conditions.clone(),
            child_conditions: self.child_conditions.clone(),
            ..Self::default()
        }
    }

    /// Converts the query to name/value pairs, skipping unset parameters.
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        let strings = [
            ("conditions", &self.conditions),
            ("childconditions", &self.child_conditions),
            ("fields", &self.fields),
        ];
        for (name, value) in strings {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((name, v.to_string()));
            }
        }

        if let Some(size) = self.page_size.filter(|&n| n > 0) {
            pairs.push(("pagesize", size.to_string()));
        }
        if let Some(order) = self.order_by.as_deref().filter(|v| !v.is_empty()) {
            pairs.push(("orderby", order.to_string()));
        }
        if let Some(page) = self.page.filter(|&n| n > 0) {
            pairs.push(("page", page.to_string()));
        }

        pairs
    }
}
