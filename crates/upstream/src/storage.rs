//! Object-storage calls (`/storage/v1`).
//!
//! Used for tournament logo uploads. Objects land in a public bucket, so
//! the public URL can be derived without a second round trip.

use crate::{UpstreamClient, UpstreamError};

impl UpstreamClient {
    /// Upload a raw object body to `bucket/name`.
    ///
    /// The caller's bearer token is forwarded so the storage layer can
    /// apply its own access policies.
    pub async fn upload_object(
        &self,
        bucket: &str,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
        bearer: &str,
    ) -> Result<(), UpstreamError> {
        let url = format!("{}/storage/v1/object/{bucket}/{name}", self.base_url());
        let request = self
            .authed(self.http().post(url), bearer)
            .header("Content-Type", content_type)
            .body(bytes);

        Self::ensure_success(request.send().await?).await?;

        tracing::info!(bucket, name, "Object uploaded");
        Ok(())
    }

    /// Public download URL for an object in a public bucket.
    pub fn public_object_url(&self, bucket: &str, name: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{bucket}/{name}",
            self.base_url()
        )
    }
}
