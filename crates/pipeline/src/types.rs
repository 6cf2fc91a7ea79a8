//! Shared value types for the debate domain.
//!
//! These types carry meaningful values with invariants (output budgets are
//! non-zero, temperatures live in the range the model API accepts) and
//! participate in domain computations; callers never pass bare primitives
//! across the pipeline's seams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Run identity
// ---------------------------------------------------------------------------

/// Identifies a single pipeline run (one debate).
///
/// Generated fresh when a transcript is opened; propagated through spans and
/// log events so all activity from a single run can be correlated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunId(Uuid);

impl RunId {
    /// Generates a new random run identifier.
    pub fn new_random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a [`RunId`] from an existing UUID (e.g. deserialised state).
    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Returns the underlying [`Uuid`].
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Generation limits
// ---------------------------------------------------------------------------

/// Maximum number of output tokens one stage may generate.
///
/// A per-stage property, not a global constant: advocates get a tighter
/// budget than the judge so the verdict has room to summarise both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MaxOutputTokens(u32);

impl MaxOutputTokens {
    /// Creates a [`MaxOutputTokens`] budget.
    ///
    /// Returns `None` if `limit` is zero.
    #[must_use]
    pub fn new(limit: u32) -> Option<Self> {
        if limit == 0 {
            None
        } else {
            Some(Self(limit))
        }
    }

    /// Returns the underlying token count.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for MaxOutputTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ---------------------------------------------------------------------------

/// Sampling temperature for a model call.
///
/// The pipeline pins this to [`Temperature::deterministic`] so the same
/// inputs yield the same or near-same output from the underlying model.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Temperature(f64);

impl Temperature {
    /// Creates a [`Temperature`], returning `None` if `value` is outside the
    /// range `[0.0, 2.0]` the model API accepts.
    #[must_use]
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && (0.0..=2.0).contains(&value) {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Temperature zero: greedy, reproducible sampling.
    pub fn deterministic() -> Self {
        Self(0.0)
    }

    /// Returns the underlying `f64` value.
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// A UTC wall-clock timestamp.
///
/// Wraps [`chrono::DateTime<Utc>`] so callers never depend on `chrono` types
/// directly; the underlying representation can change without affecting the
/// domain API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Returns the current UTC time as a [`Timestamp`].
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a [`Timestamp`] from a [`DateTime<Utc>`].
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the underlying [`DateTime<Utc>`].
    pub fn as_datetime(self) -> DateTime<Utc> {
        self.0
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_output_tokens_rejects_zero() {
        assert!(MaxOutputTokens::new(0).is_none());
        assert_eq!(MaxOutputTokens::new(250).unwrap().as_u32(), 250);
    }

    #[test]
    fn temperature_bounds() {
        assert!(Temperature::new(-0.1).is_none());
        assert!(Temperature::new(2.1).is_none());
        assert!(Temperature::new(f64::NAN).is_none());
        assert_eq!(Temperature::deterministic().as_f64(), 0.0);
    }

    #[test]
    fn run_ids_are_unique() {
        assert_ne!(RunId::new_random(), RunId::new_random());
    }

    #[test]
    fn timestamp_display_is_rfc3339() {
        let ts = Timestamp::now();
        assert!(ts.to_string().contains('T'));
    }
}
