//! Filter criteria and evaluation result types.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One acceptance criterion of a [`RaddecFilter`](crate::RaddecFilter).
///
/// Serializes as the configuration key that enables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
pub enum Criterion {
    /// Raddec signature must be an accepted transmitter signature.
    #[serde(rename = "acceptedTransmitterSignatures")]
    TransmitterSignature,
    /// Raddec transmitter id type must be accepted.
    #[serde(rename = "acceptedTransmitterIdTypes")]
    TransmitterIdType,
    /// Raddec receiver signature must be accepted.
    #[serde(rename = "acceptedReceiverSignatures")]
    ReceiverSignature,
    /// Strongest receiver's id type must be accepted.
    #[serde(rename = "acceptedReceiverIdTypes")]
    ReceiverIdType,
    /// At least one raddec event must be accepted.
    #[serde(rename = "acceptedEvents")]
    Events,
    /// Strongest RSSI must be at least the bound.
    #[serde(rename = "minRSSI")]
    MinRssi,
    /// Strongest RSSI must be at most the bound.
    #[serde(rename = "maxRSSI")]
    MaxRssi,
}

impl Criterion {
    /// All criteria, in evaluation order.
    pub const ALL: [Self; 7] = [
        Self::TransmitterSignature,
        Self::TransmitterIdType,
        Self::ReceiverSignature,
        Self::ReceiverIdType,
        Self::Events,
        Self::MinRssi,
        Self::MaxRssi,
    ];

    /// The configuration key for this criterion.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::TransmitterSignature => "acceptedTransmitterSignatures",
            Self::TransmitterIdType => "acceptedTransmitterIdTypes",
            Self::ReceiverSignature => "acceptedReceiverSignatures",
            Self::ReceiverIdType => "acceptedReceiverIdTypes",
            Self::Events => "acceptedEvents",
            Self::MinRssi => "minRSSI",
            Self::MaxRssi => "maxRSSI",
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// The result of evaluating a raddec against a filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterDecision {
    /// Every configured criterion passed.
    Pass,
    /// The first configured criterion that failed.
    Reject(Criterion),
}

impl FilterDecision {
    /// Returns `true` for [`FilterDecision::Pass`].
    #[inline]
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// The criterion that rejected the raddec, if any.
    #[inline]
    #[must_use]
    pub const fn rejected_by(self) -> Option<Criterion> {
        match self {
            Self::Pass => None,
            Self::Reject(criterion) => Some(criterion),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_name_matches_key() {
        for criterion in Criterion::ALL {
            let json = serde_json::to_string(&criterion).unwrap();
            assert_eq!(json, format!("\"{}\"", criterion.key()));
        }
    }

    #[test]
    fn test_all_is_in_evaluation_order() {
        let mut sorted = Criterion::ALL;
        sorted.sort();
        assert_eq!(sorted, Criterion::ALL);
    }

    #[test]
    fn test_decision_accessors() {
        assert!(FilterDecision::Pass.is_pass());
        assert_eq!(FilterDecision::Pass.rejected_by(), None);

        let reject = FilterDecision::Reject(Criterion::Events);
        assert!(!reject.is_pass());
        assert_eq!(reject.rejected_by(), Some(Criterion::Events));
    }

    #[test]
    fn test_display_is_key() {
        assert_eq!(Criterion::MinRssi.to_string(), "minRSSI");
        assert_eq!(Criterion::ReceiverIdType.to_string(), "acceptedReceiverIdTypes");
    }
}
