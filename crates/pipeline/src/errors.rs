//! Error and retry-policy types for the debate domain.
//!
//! [`DebateError`] covers conditions that abort a pipeline run. Upstream
//! model failures are classified by [`ClientError`] and propagated unchanged;
//! the pipeline never retries on its own.
//!
//! [`RetryPolicy`] is a cross-cutting concern: any error type that
//! participates in retry decisions must be able to produce a [`RetryPolicy`],
//! so callers layering retry with back-off can do so without inspecting
//! variants.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transcript::RoleTag;

// ---------------------------------------------------------------------------
// Retry semantics
// ---------------------------------------------------------------------------

/// Whether an error condition is safe to retry and, if so, after what delay.
///
/// Returned by infrastructure error types to let callers decide whether to
/// re-invoke an operation without escalating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RetryPolicy {
    /// The operation may be retried.
    ///
    /// `after` optionally specifies the minimum delay before retrying (e.g.
    /// derived from a `Retry-After` response header).
    Retryable {
        /// Minimum back-off before the next attempt. `None` means retry
        /// immediately or apply the caller's own back-off schedule.
        after: Option<Duration>,
    },
    /// The operation must not be retried; the run is reported as failed.
    NonRetryable,
}

// ---------------------------------------------------------------------------
// Pipeline-level errors
// ---------------------------------------------------------------------------

/// Errors that abort the current pipeline run.
///
/// There is no partial-result salvage: a failed stage means the whole run is
/// reported as failed to the caller.
#[derive(Debug, Error)]
pub enum DebateError {
    /// A transcript append was rejected (empty entry text).
    ///
    /// Fatal for the current run; surfaced to the caller as a request failure.
    #[error("invalid {role} transcript entry: {reason}")]
    InvalidEntry {
        /// Role the rejected entry was tagged with.
        role: RoleTag,
        /// Why the entry was rejected.
        reason: String,
    },

    /// Prompt binding was attempted before a Question entry exists.
    ///
    /// Indicates a runner bug; never expected in correct operation, and
    /// never retried.
    #[error("no question entry present in the transcript")]
    MissingQuestion,

    /// The external model call failed. Propagated unchanged; retry policy,
    /// if any, belongs to the caller.
    #[error("model call failed: {0}")]
    Client(#[from] ClientError),
}

// ---------------------------------------------------------------------------
// Model client errors
// ---------------------------------------------------------------------------

/// Typed failure classification for external model calls.
///
/// Variants are grouped by whether a caller-side retry could plausibly help;
/// [`ClientError::retry_policy`] encodes that grouping.
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum ClientError {
    // Fatal — don't retry.
    /// Credentials were rejected by the provider.
    #[error("authentication rejected: {0}")]
    AuthenticationFailed(String),

    /// The provider rejected the request as malformed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The provider returned a success status but the body could not be
    /// interpreted as a generation result.
    #[error("invalid response from provider: {0}")]
    InvalidResponse(String),

    // Retryable.
    /// The provider throttled the request.
    #[error("rate limited")]
    RateLimited {
        /// Back-off hint from the provider, when one was supplied.
        retry_after: Option<Duration>,
    },

    /// The provider reported an internal failure.
    #[error("server error {status}")]
    ServerError {
        /// HTTP status code returned.
        status: u16,
        /// Response body, for logs only — never shown to end users.
        body: String,
    },

    /// The request could not reach the provider.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The bounded per-call deadline elapsed.
    #[error("timeout after {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// Whether and when a caller may retry the failed call.
    pub fn retry_policy(&self) -> RetryPolicy {
        match self {
            Self::RateLimited { retry_after } => RetryPolicy::Retryable {
                after: *retry_after,
            },
            Self::ServerError { .. } | Self::NetworkError(_) | Self::Timeout(_) => {
                RetryPolicy::Retryable { after: None }
            }
            Self::AuthenticationFailed(_) | Self::InvalidRequest(_) | Self::InvalidResponse(_) => {
                RetryPolicy::NonRetryable
            }
        }
    }

    /// Short classification string for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed(_) => "authentication_failed",
            Self::InvalidRequest(_) => "invalid_request",
            Self::InvalidResponse(_) => "invalid_response",
            Self::RateLimited { .. } => "rate_limited",
            Self::ServerError { .. } => "server_error",
            Self::NetworkError(_) => "network_error",
            Self::Timeout(_) => "timeout",
        }
    }

    /// Classifies an HTTP status code into the appropriate variant.
    pub fn from_status(status: u16, body: String) -> Self {
        match status {
            401 | 403 => Self::AuthenticationFailed(body),
            400 => Self::InvalidRequest(body),
            429 => Self::RateLimited { retry_after: None },
            500..=599 => Self::ServerError { status, body },
            _ => Self::InvalidResponse(format!("unexpected status {status}: {body}")),
        }
    }
}
