//! Document fetching seam.
//!
//! The audit core consumes already-fetched HTML; fetching is an external
//! collaborator behind [`DocumentFetcher`] so batch tests can substitute
//! canned documents or failures.

use std::io::Read;

use lumen_core::types::AuditError;

/// Fetch the raw HTML for a URL.
pub trait DocumentFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String, AuditError>;
}

/// HTTP fetcher backed by ureq. Blocking; batch tasks run it on the
/// blocking thread pool.
pub struct UreqFetcher;

impl DocumentFetcher for UreqFetcher {
    fn fetch(&self, url: &str) -> Result<String, AuditError> {
        let mut body = String::new();
        ureq::get(url)
            .header(
                "User-Agent",
                &format!("lumen/{}", env!("CARGO_PKG_VERSION")),
            )
            .call()
            .map_err(|e| AuditError::Fetch(e.to_string()))?
            .into_body()
            .into_reader()
            .read_to_string(&mut body)
            .map_err(|e| AuditError::Fetch(format!("failed to read response: {e}")))?;
        Ok(body)
    }
}
