//! Wire models for the admin REST API.
//!
//! Field names follow the backend's camelCase JSON. The `user` object on
//! session types stays opaque ([`serde_json::Value`]) because the backend
//! owns its shape; resource models here are the ones the dashboard renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Paginated list envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Records on this page
    pub items: Vec<T>,
    /// Total records across all pages
    pub total: u64,
    /// 1-based page number
    pub page: u32,
    /// Page size the backend applied
    pub page_size: u32,
}

/// A customer record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Customer id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
    /// Contact phone
    pub phone: Option<String>,
    /// Company name
    pub company: Option<String>,
    /// Agent notes, rich-text HTML from the dashboard editor
    pub notes: Option<String>,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

/// Partial customer update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// New contact phone
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// New company name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    /// New notes HTML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Replacement tag list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Chat conversation status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    /// Awaiting agent reply
    Open,
    /// Awaiting customer reply
    Pending,
    /// Closed as answered
    Resolved,
    /// Hidden from the default queue
    Archived,
}

/// Chat conversation summary as shown in the inbox list.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    /// Chat id
    pub id: Uuid,
    /// Customer on the conversation
    pub customer_id: Uuid,
    /// Subject line, when the channel supplies one
    pub subject: Option<String>,
    /// Conversation status
    pub status: ChatStatus,
    /// Unread message count for the signed-in agent
    pub unread_count: u32,
    /// Time of the most recent message
    pub last_message_at: Option<DateTime<Utc>>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// One message within a chat.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message id
    pub id: Uuid,
    /// Owning chat
    pub chat_id: Uuid,
    /// Authoring agent; `None` for customer messages
    pub author_id: Option<Uuid>,
    /// Message body HTML
    pub body: String,
    /// Attached files
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Send time
    pub sent_at: DateTime<Utc>,
}

/// An uploaded file referenced by a message.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// File id
    pub id: Uuid,
    /// Original file name
    pub file_name: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Download URL
    pub url: String,
}

/// Outgoing chat message.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChatMessage {
    /// Message body HTML
    pub body: String,
    /// Ids of previously uploaded attachments
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachment_ids: Vec<Uuid>,
}

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, payment outstanding
    Pending,
    /// Payment captured
    Paid,
    /// Handed to the carrier
    Shipped,
    /// Received by the customer
    Delivered,
    /// Cancelled before fulfilment
    Cancelled,
    /// Payment returned
    Refunded,
}

/// A customer order, read-only in the dashboard.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Order id
    pub id: Uuid,
    /// Purchasing customer
    pub customer_id: Uuid,
    /// Lifecycle status
    pub status: OrderStatus,
    /// Total in minor currency units
    pub total_cents: i64,
    /// ISO 4217 currency code
    pub currency: String,
    /// Placement time
    pub placed_at: DateTime<Utc>,
}

/// Headline numbers for the analytics landing page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsOverview {
    /// All conversations in the range
    pub total_chats: u64,
    /// Currently open conversations
    pub open_chats: u64,
    /// Conversations resolved in the range
    pub resolved_chats: u64,
    /// Mean seconds to first agent reply
    pub avg_first_response_secs: f64,
    /// Mean seconds to resolution
    pub avg_resolution_secs: f64,
    /// Mean satisfaction rating, when surveys ran
    pub satisfaction_score: Option<f64>,
}

/// One bucket of a time series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    /// Bucket start
    pub bucket: DateTime<Utc>,
    /// Bucket value
    pub value: f64,
}

/// An in-app notification.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Notification id
    pub id: Uuid,
    /// Short title
    pub title: String,
    /// Body text
    pub body: String,
    /// Whether the agent has seen it
    pub read: bool,
    /// Dashboard route the notification links to
    pub link: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// The signed-in agent's profile.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    /// Agent id
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Account email
    pub email: String,
    /// Avatar image URL
    pub avatar_url: Option<String>,
    /// Backend-defined preference object, stored opaquely
    #[serde(default)]
    pub preferences: Value,
}

/// Partial profile update; unset fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    /// New display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

/// A completed file upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// File id, referenced when attaching to messages
    pub id: Uuid,
    /// Original file name
    pub file_name: String,
    /// MIME type
    pub mime_type: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Download URL
    pub url: String,
}
