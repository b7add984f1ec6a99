//! File uploads (message attachments, customer avatars).

use crate::client::ApiClient;
use crate::error::ApiResult;
use crate::models::UploadedFile;
use crate::request::{FilePart, RequestSpec};

impl ApiClient {
    /// Upload one file as a multipart request.
    ///
    /// The multipart content type (and its boundary) is set by the
    /// transport; the executor attaches only the auth header.
    ///
    /// # Errors
    ///
    /// Fails with the classified backend error (422 for rejected content).
    pub async fn upload_file(&self, part: FilePart) -> ApiResult<UploadedFile> {
        self.send(RequestSpec::post("/uploads").with_multipart(vec![part]))
            .await
    }
}
