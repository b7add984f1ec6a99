//! Notification bell data.

use serde::Deserialize;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Notification, Page};
use crate::request::RequestSpec;

use super::ListQuery;

#[derive(Debug, Deserialize)]
struct UnreadCount {
    count: u64,
}

impl ApiClient {
    /// List notifications for the signed-in agent.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn list_notifications(
        &self,
        query: &ListQuery,
        unread_only: bool,
    ) -> ApiResult<Page<Notification>> {
        let mut spec = query.apply(RequestSpec::get("/notifications"));
        if unread_only {
            spec = spec.with_query("unread", "true");
        }
        self.send(spec).await
    }

    /// Number of unread notifications, for the bell badge.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn unread_notification_count(&self) -> ApiResult<u64> {
        let body: UnreadCount = self
            .send(RequestSpec::get("/notifications/unread-count"))
            .await?;
        Ok(body.count)
    }

    /// Mark one notification as read.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn mark_notification_read(&self, id: Uuid) -> ApiResult<()> {
        self.execute(RequestSpec::post(format!("/notifications/{id}/read")))
            .await?;
        Ok(())
    }

    /// Mark every notification as read.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn mark_all_notifications_read(&self) -> ApiResult<()> {
        self.execute(RequestSpec::post("/notifications/read-all"))
            .await?;
        Ok(())
    }
}
