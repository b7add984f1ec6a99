//! Customer record operations.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Customer, CustomerUpdate, Page};
use crate::request::RequestSpec;

use super::ListQuery;

impl ApiClient {
    /// List customers, paged and optionally filtered.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn list_customers(&self, query: &ListQuery) -> ApiResult<Page<Customer>> {
        self.send(query.apply(RequestSpec::get("/customers"))).await
    }

    /// Fetch a single customer.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (404 for an unknown id).
    pub async fn get_customer(&self, id: Uuid) -> ApiResult<Customer> {
        self.send(RequestSpec::get(format!("/customers/{id}"))).await
    }

    /// Apply a partial update to a customer.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (422 for rejected fields).
    pub async fn update_customer(&self, id: Uuid, update: &CustomerUpdate) -> ApiResult<Customer> {
        let body = serde_json::to_value(update).map_err(support_common::PlatformError::from)?;
        self.send(RequestSpec::patch(format!("/customers/{id}")).with_json(body))
            .await
    }

    /// Delete a customer record.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn delete_customer(&self, id: Uuid) -> ApiResult<()> {
        self.execute(RequestSpec::delete(format!("/customers/{id}")))
            .await?;
        Ok(())
    }
}
