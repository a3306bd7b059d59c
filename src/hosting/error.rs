//! Error types for hosting-service URL construction.

use thiserror::Error;

/// Errors raised while picking a hosting service or rendering its URLs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HostingError {
    /// The fetch URL's host does not map to a known hosting service.
    #[error("unsupported hosting service: {hostname} (looked up as '{key}')")]
    UnsupportedHostingService {
        /// Hostname after alias substitution.
        hostname: String,
        /// Lookup key derived from the hostname.
        key: String,
    },

    /// The hosting service cannot render the requested kind of page.
    #[error("hosting service {service} does not support {capability}")]
    UnsupportedCapability {
        /// Name of the hosting service.
        service: &'static str,
        /// Human-readable capability name.
        capability: &'static str,
    },

    /// The fetch URL does not name an owner and repository.
    #[error("fetch URL {url} cannot be mapped to a repository page: {reason}")]
    InvalidFetchUrl {
        /// The offending fetch URL.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },
}
