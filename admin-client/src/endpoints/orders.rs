//! Order history operations. Read-only in the dashboard.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Order, Page};
use crate::request::RequestSpec;

use super::ListQuery;

impl ApiClient {
    /// List orders, optionally restricted to one customer.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn list_orders(
        &self,
        query: &ListQuery,
        customer_id: Option<Uuid>,
    ) -> ApiResult<Page<Order>> {
        let mut spec = query.apply(RequestSpec::get("/orders"));
        if let Some(customer_id) = customer_id {
            spec = spec.with_query("customerId", customer_id.to_string());
        }
        self.send(spec).await
    }

    /// Fetch a single order.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn get_order(&self, id: Uuid) -> ApiResult<Order> {
        self.send(RequestSpec::get(format!("/orders/{id}"))).await
    }
}
