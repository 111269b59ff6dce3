//! The raddec filter.
//!
//! A [`RaddecFilter`] is built once from a [`FilterConfig`] and is immutable
//! afterwards. Evaluation is a pure function of the configuration and the
//! raddec, so one filter can be shared across threads without locking.
//!
//! Evaluation order (must be preserved):
//! 1. Transmitter signature
//! 2. Transmitter id type
//! 3. Receiver signature
//! 4. Receiver id type (strongest receiver)
//! 5. Events
//! 6. Minimum RSSI (strongest receiver)
//! 7. Maximum RSSI (strongest receiver)
//!
//! Configured criteria combine under AND and the first failure short-circuits.
//! A criterion whose raddec field is missing fails closed.

use std::collections::BTreeSet;

use serde_json::Value;
use tracing::trace;

use crate::config::FilterConfig;
use crate::decision::{Criterion, FilterDecision};
use crate::raddec::Raddec;

/// Accepts or rejects raddecs against a fixed set of criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RaddecFilter {
    config: FilterConfig,
}

impl RaddecFilter {
    /// Create a filter from a typed configuration.
    #[must_use]
    pub const fn new(config: FilterConfig) -> Self {
        Self { config }
    }

    /// Create a filter from loose-typed parameters.
    ///
    /// Keys with the wrong shape leave their criterion unconfigured.
    /// See [`FilterConfig::from_value`].
    #[must_use]
    pub fn from_parameters(parameters: &Value) -> Self {
        Self::new(FilterConfig::from_value(parameters))
    }

    /// The configuration this filter applies.
    #[must_use]
    pub const fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Does the filter observe an `acceptedTransmitterSignatures` criterion?
    #[must_use]
    pub const fn has_accepted_transmitter_signatures(&self) -> bool {
        self.config.accepted_transmitter_signatures.is_some()
    }

    /// Does the filter observe an `acceptedTransmitterIdTypes` criterion?
    #[must_use]
    pub const fn has_accepted_transmitter_id_types(&self) -> bool {
        self.config.accepted_transmitter_id_types.is_some()
    }

    /// Does the filter observe an `acceptedReceiverSignatures` criterion?
    #[must_use]
    pub const fn has_accepted_receiver_signatures(&self) -> bool {
        self.config.accepted_receiver_signatures.is_some()
    }

    /// Does the filter observe an `acceptedReceiverIdTypes` criterion?
    #[must_use]
    pub const fn has_accepted_receiver_id_types(&self) -> bool {
        self.config.accepted_receiver_id_types.is_some()
    }

    /// Does the filter observe an `acceptedEvents` criterion?
    #[must_use]
    pub const fn has_accepted_events(&self) -> bool {
        self.config.accepted_events.is_some()
    }

    /// Does the filter observe a `minRSSI` criterion?
    #[must_use]
    pub const fn has_min_rssi(&self) -> bool {
        self.config.min_rssi.is_some()
    }

    /// Does the filter observe a `maxRSSI` criterion?
    #[must_use]
    pub const fn has_max_rssi(&self) -> bool {
        self.config.max_rssi.is_some()
    }

    /// Does the filter observe the given criterion?
    #[must_use]
    pub const fn has_criterion(&self, criterion: Criterion) -> bool {
        self.config.is_configured(criterion)
    }

    /// Configured criteria, in evaluation order.
    #[must_use]
    pub fn active_criteria(&self) -> Vec<Criterion> {
        Criterion::ALL
            .into_iter()
            .filter(|c| self.has_criterion(*c))
            .collect()
    }

    /// Does the given raddec pass every configured criterion?
    #[must_use]
    pub fn is_passing(&self, raddec: &Raddec) -> bool {
        self.evaluate(raddec).is_pass()
    }

    /// Evaluate a raddec, naming the first configured criterion it fails.
    #[must_use]
    pub fn evaluate(&self, raddec: &Raddec) -> FilterDecision {
        for criterion in Criterion::ALL {
            if let Some(false) = self.test(criterion, raddec) {
                trace!(
                    criterion = %criterion,
                    signature = raddec.signature.as_deref().unwrap_or_default(),
                    "Raddec rejected"
                );
                return FilterDecision::Reject(criterion);
            }
        }
        FilterDecision::Pass
    }

    /// `None` if the criterion is not configured, otherwise whether it passes.
    fn test(&self, criterion: Criterion, raddec: &Raddec) -> Option<bool> {
        let cfg = &self.config;
        let passed = match criterion {
            Criterion::TransmitterSignature => test_member(
                cfg.accepted_transmitter_signatures.as_ref()?,
                raddec.signature.as_ref(),
            ),
            Criterion::TransmitterIdType => test_member(
                cfg.accepted_transmitter_id_types.as_ref()?,
                raddec.transmitter_id_type.as_ref(),
            ),
            Criterion::ReceiverSignature => test_member(
                cfg.accepted_receiver_signatures.as_ref()?,
                raddec.receiver_signature.as_ref(),
            ),
            Criterion::ReceiverIdType => {
                let accepted = cfg.accepted_receiver_id_types.as_ref()?;
                raddec
                    .strongest()
                    .is_some_and(|o| accepted.contains(&o.receiver_id_type))
            }
            Criterion::Events => test_events(cfg.accepted_events.as_ref()?, raddec),
            Criterion::MinRssi => {
                let min = cfg.min_rssi?;
                raddec.strongest().is_some_and(|o| o.rssi >= min)
            }
            Criterion::MaxRssi => {
                let max = cfg.max_rssi?;
                raddec.strongest().is_some_and(|o| o.rssi <= max)
            }
        };
        Some(passed)
    }
}

impl From<FilterConfig> for RaddecFilter {
    fn from(config: FilterConfig) -> Self {
        Self::new(config)
    }
}

/// A missing value is never a member; an empty set has no members.
fn test_member<T: Ord>(accepted: &BTreeSet<T>, value: Option<&T>) -> bool {
    value.is_some_and(|v| accepted.contains(v))
}

fn test_events(accepted: &BTreeSet<String>, raddec: &Raddec) -> bool {
    accepted.iter().any(|event| raddec.has_event(event))
}
