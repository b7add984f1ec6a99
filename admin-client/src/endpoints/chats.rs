//! Chat inbox operations.

use uuid::Uuid;

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{ChatMessage, ChatStatus, ChatSummary, NewChatMessage, Page};
use crate::request::RequestSpec;

use super::ListQuery;

impl ApiClient {
    /// List chat conversations, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn list_chats(
        &self,
        query: &ListQuery,
        status: Option<ChatStatus>,
    ) -> ApiResult<Page<ChatSummary>> {
        let mut spec = query.apply(RequestSpec::get("/chats"));
        if let Some(status) = status {
            // Wire name, e.g. "open" / "resolved".
            let value = serde_json::to_value(status)
                .map_err(support_common::PlatformError::from)?
                .as_str()
                .unwrap_or_default()
                .to_string();
            spec = spec.with_query("status", value);
        }
        self.send(spec).await
    }

    /// Fetch one conversation summary.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn get_chat(&self, id: Uuid) -> ApiResult<ChatSummary> {
        self.send(RequestSpec::get(format!("/chats/{id}"))).await
    }

    /// List messages in a conversation, oldest first.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn list_chat_messages(
        &self,
        chat_id: Uuid,
        query: &ListQuery,
    ) -> ApiResult<Page<ChatMessage>> {
        self.send(query.apply(RequestSpec::get(format!("/chats/{chat_id}/messages"))))
            .await
    }

    /// Send an agent reply into a conversation.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn send_chat_message(
        &self,
        chat_id: Uuid,
        message: &NewChatMessage,
    ) -> ApiResult<ChatMessage> {
        let body = serde_json::to_value(message).map_err(support_common::PlatformError::from)?;
        self.send(RequestSpec::post(format!("/chats/{chat_id}/messages")).with_json(body))
            .await
    }

    /// Move a conversation to a new status.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (409 when the transition is
    /// not allowed).
    pub async fn set_chat_status(&self, chat_id: Uuid, status: ChatStatus) -> ApiResult<ChatSummary> {
        let body = serde_json::json!({ "status": status });
        self.send(RequestSpec::patch(format!("/chats/{chat_id}")).with_json(body))
            .await
    }
}
