//! Analytics aggregates for the dashboard landing page.

use chrono::{DateTime, Utc};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{AnalyticsOverview, SeriesPoint};
use crate::request::RequestSpec;

/// Inclusive reporting window.
#[derive(Debug, Clone, Copy)]
pub struct DateRange {
    /// Window start
    pub from: DateTime<Utc>,
    /// Window end
    pub to: DateTime<Utc>,
}

impl DateRange {
    fn apply(self, spec: RequestSpec) -> RequestSpec {
        spec.with_query("from", self.from.to_rfc3339())
            .with_query("to", self.to.to_rfc3339())
    }
}

impl ApiClient {
    /// Headline numbers for the given window.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn analytics_overview(&self, range: DateRange) -> ApiResult<AnalyticsOverview> {
        self.send(range.apply(RequestSpec::get("/analytics/overview")))
            .await
    }

    /// Chat volume per day over the given window.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn chat_volume(&self, range: DateRange) -> ApiResult<Vec<SeriesPoint>> {
        self.send(range.apply(RequestSpec::get("/analytics/chat-volume")))
            .await
    }

    /// First-response time per day over the given window.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn response_times(&self, range: DateRange) -> ApiResult<Vec<SeriesPoint>> {
        self.send(range.apply(RequestSpec::get("/analytics/response-times")))
            .await
    }
}
