//! Signed-in agent account operations.

use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::{Profile, ProfileUpdate};
use crate::request::RequestSpec;

impl ApiClient {
    /// Fetch the signed-in agent's profile.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn profile(&self) -> ApiResult<Profile> {
        self.send(RequestSpec::get("/account/profile")).await
    }

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> ApiResult<Profile> {
        let body = serde_json::to_value(update).map_err(support_common::PlatformError::from)?;
        self.send(RequestSpec::patch("/account/profile").with_json(body))
            .await
    }

    /// Replace the agent's preference object.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error.
    pub async fn update_preferences(&self, preferences: Value) -> ApiResult<Profile> {
        self.send(RequestSpec::put("/account/preferences").with_json(preferences))
            .await
    }

    /// Change the account password. Requires the current password; this is
    /// an authenticated call, unlike the reset flow.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (401 when the current
    /// password is wrong).
    pub async fn change_password(
        &self,
        current: &SecretString,
        new: &SecretString,
    ) -> ApiResult<()> {
        let body = json!({
            "currentPassword": current.expose_secret(),
            "newPassword": new.expose_secret(),
        });
        self.execute(RequestSpec::post("/account/password").with_json(body))
            .await?;
        Ok(())
    }
}
