//! Data-layer table operations (`/rest/v1/{table}`).
//!
//! The data layer speaks PostgREST conventions: row filters are query
//! parameters of the form `column=eq.value`, ordering is
//! `order=column.desc`, and `Prefer: return=representation` makes writes
//! echo the affected rows back.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::{UpstreamClient, UpstreamError};

/// A query-string pair for a table operation.
pub type QueryPair = (String, String);

/// Build an equality row filter: `column=eq.value`.
pub fn eq(column: &str, value: impl std::fmt::Display) -> QueryPair {
    (column.to_string(), format!("eq.{value}"))
}

/// Build a descending order parameter: `order=column.desc`.
pub fn order_desc(column: &str) -> QueryPair {
    ("order".to_string(), format!("{column}.desc"))
}

/// Restrict the returned columns: `select=columns`.
pub fn select_columns(columns: &str) -> QueryPair {
    ("select".to_string(), columns.to_string())
}

impl UpstreamClient {
    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url())
    }

    /// Fetch rows from `table` matching the given query pairs, decoded
    /// into `T`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        query: &[QueryPair],
        bearer: &str,
    ) -> Result<Vec<T>, UpstreamError> {
        let request = self
            .authed(self.http().get(self.table_url(table)), bearer)
            .query(query)
            .header("Accept", "application/json");

        Self::parse_response(request.send().await?).await
    }

    /// Insert a row into `table`, returning the created row.
    pub async fn insert_returning(
        &self,
        table: &str,
        body: &impl Serialize,
        bearer: &str,
    ) -> Result<Value, UpstreamError> {
        let request = self
            .authed(self.http().post(self.table_url(table)), bearer)
            .header("Prefer", "return=representation")
            .json(body);

        // PostgREST returns an array even for a single-row insert.
        let mut rows: Vec<Value> = Self::parse_response(request.send().await?).await?;
        if rows.is_empty() {
            return Err(UpstreamError::Status {
                status: 500,
                body: format!("insert into {table} returned no representation"),
            });
        }
        Ok(rows.remove(0))
    }

    /// Insert a row into `table` without asking for the row back.
    pub async fn insert(
        &self,
        table: &str,
        body: &impl Serialize,
        bearer: &str,
    ) -> Result<(), UpstreamError> {
        let request = self
            .authed(self.http().post(self.table_url(table)), bearer)
            .header("Prefer", "return=minimal")
            .json(body);

        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    /// Partially update the rows matching `filters`.
    pub async fn update(
        &self,
        table: &str,
        filters: &[QueryPair],
        body: &impl Serialize,
        bearer: &str,
    ) -> Result<(), UpstreamError> {
        let request = self
            .authed(self.http().patch(self.table_url(table)), bearer)
            .query(filters)
            .json(body);

        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }

    /// Delete the rows matching `filters`.
    pub async fn delete(
        &self,
        table: &str,
        filters: &[QueryPair],
        bearer: &str,
    ) -> Result<(), UpstreamError> {
        let request = self
            .authed(self.http().delete(self.table_url(table)), bearer)
            .query(filters);

        Self::ensure_success(request.send().await?).await?;
        Ok(())
    }
}
