//! Fetch and query options, and the query they compile to.
//!
//! Options are validated against the entity's allowed arguments before any
//! network call; a rejected option never reaches the transport.

use crate::entity::Entity;
use crate::error::{Error, Result};

/// Options for fetching one entity or one page of entities.
///
/// # Example
///
/// ```
/// use ptero_core::FetchOptions;
///
/// let opts = FetchOptions::new().force().include("nodes").page(2);
/// assert!(opts.force);
/// assert_eq!(opts.to_query().pairs(), vec![
///     ("include".to_string(), "nodes".to_string()),
///     ("page".to_string(), "2".to_string()),
/// ]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Skip the cache and always read from the panel.
    pub force: bool,

    /// Relationships to embed in the response.
    pub include: Vec<String>,

    /// Page to read.
    pub page: Option<u32>,

    /// Page size to request.
    pub per_page: Option<u32>,
}

impl FetchOptions {
    /// Create default options (cached reads, no includes, first page).
    pub fn new() -> Self {
        Self::default()
    }

    /// Bypass the cache.
    pub fn force(mut self) -> Self {
        self.force = true;
        self
    }

    /// Embed a relationship.
    pub fn include(mut self, relationship: impl Into<String>) -> Self {
        self.include.push(relationship.into());
        self
    }

    /// Read a specific page.
    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Request a specific page size.
    pub fn per_page(mut self, per_page: u32) -> Self {
        self.per_page = Some(per_page);
        self
    }

    /// The same options with paging controls removed.
    pub fn without_paging(&self) -> Self {
        Self {
            page: None,
            per_page: None,
            ..self.clone()
        }
    }

    /// Reject includes the entity does not support.
    pub fn validate<E: Entity>(&self) -> Result<()> {
        for include in &self.include {
            if !E::INCLUDES.contains(&include.as_str()) {
                return Err(Error::validation(format!(
                    "Invalid include '{}' for {}; expected one of: {}",
                    include,
                    E::KIND,
                    E::INCLUDES.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Compile into a transport query.
    pub fn to_query(&self) -> Query {
        Query {
            include: self.include.clone(),
            page: self.page,
            per_page: self.per_page,
            ..Query::default()
        }
    }
}

/// Options for a filtered or sorted collection query.
///
/// At least one of `filter` and `sort` is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Field to match the query entity against.
    pub filter: Option<String>,

    /// Field to sort by; a leading `-` sorts descending.
    pub sort: Option<String>,
}

impl QueryOptions {
    /// Create empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by a field.
    pub fn filter(mut self, field: impl Into<String>) -> Self {
        self.filter = Some(field.into());
        self
    }

    /// Sort by a field.
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Check the options against the entity's allowed arguments.
    ///
    /// # Errors
    ///
    /// `Validation` if neither a filter nor a sort is set, or if either
    /// names a field the entity does not allow.
    pub fn validate<E: Entity>(&self) -> Result<()> {
        if self.filter.is_none() && self.sort.is_none() {
            return Err(Error::validation("Sort or filter is required."));
        }

        if let Some(filter) = &self.filter {
            if !E::FILTERS.contains(&filter.as_str()) {
                return Err(Error::validation(format!(
                    "Invalid filter '{}' for {}",
                    filter,
                    E::KIND
                )));
            }
        }

        if let Some(sort) = &self.sort {
            let field = sort.strip_prefix('-').unwrap_or(sort);
            if !E::SORTS.contains(&field) {
                return Err(Error::validation(format!(
                    "Invalid sort '{}' for {}",
                    sort,
                    E::KIND
                )));
            }
        }

        Ok(())
    }

    /// Compile into a transport query, pairing the filter with `entity`.
    pub fn to_query(&self, entity: &str) -> Query {
        Query {
            filter: self
                .filter
                .as_ref()
                .map(|field| (field.clone(), entity.to_string())),
            sort: self.sort.clone(),
            ..Query::default()
        }
    }
}

/// The query-string arguments handed to the transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    /// Relationships to embed.
    pub include: Vec<String>,
    /// Page number.
    pub page: Option<u32>,
    /// Page size.
    pub per_page: Option<u32>,
    /// Field and value to filter on.
    pub filter: Option<(String, String)>,
    /// Sort field.
    pub sort: Option<String>,
}

impl Query {
    /// Check if the query carries no arguments.
    pub fn is_empty(&self) -> bool {
        *self == Query::default()
    }

    /// Encode as query-string pairs in the panel's conventions.
    pub fn pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if !self.include.is_empty() {
            pairs.push(("include".to_string(), self.include.join(",")));
        }
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(per_page) = self.per_page {
            pairs.push(("per_page".to_string(), per_page.to_string()));
        }
        if let Some((field, value)) = &self.filter {
            pairs.push((format!("filter[{}]", field), value.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        pairs
    }
}
