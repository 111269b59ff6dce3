//! Filter configuration.
//!
//! [`FilterConfig`] is the fully-typed, immutable set of criteria a
//! [`RaddecFilter`](crate::RaddecFilter) applies. Each criterion is an
//! explicit `Option`: `None` means "not configured" and never rejects.
//!
//! Filter parameters usually arrive loose-typed (a JSON object from a
//! request body or a parameter file). [`FilterConfig::from_value`] is the
//! validation boundary for that input:
//! - A recognized key is adopted only if it has the expected shape: an
//!   array for the `accepted*` sets, an integer for `minRSSI`/`maxRSSI`.
//! - A key with any other shape is dropped (logged at `debug`), never an error.
//! - Unrecognized keys are ignored.
//! - Array elements of the wrong type can never match a raddec value and are
//!   dropped, but the criterion itself stays configured.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::Path;

use serde_json::{Map, Number, Value};
use tracing::{debug, info};

use crate::decision::Criterion;
use crate::error::{FilterError, Result};

/// The accepted criteria of a filter, each independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Accepted values of `raddec.signature`.
    pub accepted_transmitter_signatures: Option<BTreeSet<String>>,

    /// Accepted values of `raddec.transmitterIdType`.
    pub accepted_transmitter_id_types: Option<BTreeSet<u32>>,

    /// Accepted values of `raddec.receiverSignature`.
    pub accepted_receiver_signatures: Option<BTreeSet<String>>,

    /// Accepted `receiverIdType` of the strongest receiver.
    pub accepted_receiver_id_types: Option<BTreeSet<u32>>,

    /// Event tags of which a raddec must carry at least one.
    pub accepted_events: Option<BTreeSet<String>>,

    /// Inclusive lower bound on the strongest receiver's RSSI (dBm).
    pub min_rssi: Option<i32>,

    /// Inclusive upper bound on the strongest receiver's RSSI (dBm).
    pub max_rssi: Option<i32>,
}

impl FilterConfig {
    /// Build a configuration from loose-typed filter parameters.
    ///
    /// Never fails. A non-object input configures no criteria.
    #[must_use]
    pub fn from_value(parameters: &Value) -> Self {
        let Some(map) = parameters.as_object() else {
            if !parameters.is_null() {
                debug!(
                    found = value_kind(parameters),
                    "Filter parameters are not an object, no criteria configured"
                );
            }
            return Self::default();
        };

        Self {
            accepted_transmitter_signatures: string_set(map, Criterion::TransmitterSignature),
            accepted_transmitter_id_types: id_type_set(map, Criterion::TransmitterIdType),
            accepted_receiver_signatures: string_set(map, Criterion::ReceiverSignature),
            accepted_receiver_id_types: id_type_set(map, Criterion::ReceiverIdType),
            accepted_events: string_set(map, Criterion::Events),
            min_rssi: rssi_bound(map, Criterion::MinRssi),
            max_rssi: rssi_bound(map, Criterion::MaxRssi),
        }
    }

    /// Load filter parameters from a JSON or TOML file.
    ///
    /// Files with a `.toml` extension are parsed as TOML, everything else as
    /// JSON. The parsed document goes through [`FilterConfig::from_value`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist, cannot be read, or is not
    /// syntactically valid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(FilterError::FilterFileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read_to_string(path).map_err(|source| FilterError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let parameters = parse_parameters(path, &content)?;
        let config = Self::from_value(&parameters);

        info!(
            path = %path.display(),
            criteria = config.criterion_count(),
            "Loaded filter parameters"
        );
        Ok(config)
    }

    /// Load filter parameters, or an empty configuration if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        match Self::load(path) {
            Err(FilterError::FilterFileNotFound(path)) => {
                info!(path = %path.display(), "No filter parameter file, accepting all raddecs");
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Whether the given criterion is configured.
    #[must_use]
    pub const fn is_configured(&self, criterion: Criterion) -> bool {
        match criterion {
            Criterion::TransmitterSignature => self.accepted_transmitter_signatures.is_some(),
            Criterion::TransmitterIdType => self.accepted_transmitter_id_types.is_some(),
            Criterion::ReceiverSignature => self.accepted_receiver_signatures.is_some(),
            Criterion::ReceiverIdType => self.accepted_receiver_id_types.is_some(),
            Criterion::Events => self.accepted_events.is_some(),
            Criterion::MinRssi => self.min_rssi.is_some(),
            Criterion::MaxRssi => self.max_rssi.is_some(),
        }
    }

    /// Number of configured criteria.
    #[must_use]
    pub fn criterion_count(&self) -> usize {
        Criterion::ALL
            .into_iter()
            .filter(|c| self.is_configured(*c))
            .count()
    }

    /// Accept only the given transmitter signatures.
    #[must_use]
    pub fn with_accepted_transmitter_signatures<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_transmitter_signatures =
            Some(signatures.into_iter().map(Into::into).collect());
        self
    }

    /// Accept only the given transmitter id types.
    #[must_use]
    pub fn with_accepted_transmitter_id_types(mut self, id_types: impl IntoIterator<Item = u32>) -> Self {
        self.accepted_transmitter_id_types = Some(id_types.into_iter().collect());
        self
    }

    /// Accept only the given receiver signatures.
    #[must_use]
    pub fn with_accepted_receiver_signatures<I, S>(mut self, signatures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_receiver_signatures = Some(signatures.into_iter().map(Into::into).collect());
        self
    }

    /// Accept only raddecs whose strongest receiver has one of these id types.
    #[must_use]
    pub fn with_accepted_receiver_id_types(mut self, id_types: impl IntoIterator<Item = u32>) -> Self {
        self.accepted_receiver_id_types = Some(id_types.into_iter().collect());
        self
    }

    /// Accept only raddecs carrying at least one of these events.
    #[must_use]
    pub fn with_accepted_events<I, S>(mut self, events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_events = Some(events.into_iter().map(Into::into).collect());
        self
    }

    /// Set the inclusive minimum RSSI.
    #[must_use]
    pub fn with_min_rssi(mut self, rssi: i32) -> Self {
        self.min_rssi = Some(rssi);
        self
    }

    /// Set the inclusive maximum RSSI.
    #[must_use]
    pub fn with_max_rssi(mut self, rssi: i32) -> Self {
        self.max_rssi = Some(rssi);
        self
    }
}

// =============================================================================
// BOUNDARY VALIDATION
// =============================================================================

fn parse_parameters(path: &Path, content: &str) -> Result<Value> {
    let is_toml = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

    if is_toml {
        toml::from_str(content).map_err(|source| FilterError::ParseToml {
            path: path.to_path_buf(),
            source,
        })
    } else {
        serde_json::from_str(content).map_err(|source| FilterError::ParseJson {
            path: path.to_path_buf(),
            source,
        })
    }
}

fn array_field(map: &Map<String, Value>, criterion: Criterion) -> Option<&[Value]> {
    match map.get(criterion.key())? {
        Value::Array(values) => Some(values.as_slice()),
        other => {
            debug!(
                key = criterion.key(),
                found = value_kind(other),
                "Ignoring filter parameter, expected an array"
            );
            None
        }
    }
}

fn string_set(map: &Map<String, Value>, criterion: Criterion) -> Option<BTreeSet<String>> {
    let values = array_field(map, criterion)?;
    Some(
        values
            .iter()
            .filter_map(Value::as_str)
            .map(str::to_owned)
            .collect(),
    )
}

fn id_type_set(map: &Map<String, Value>, criterion: Criterion) -> Option<BTreeSet<u32>> {
    let values = array_field(map, criterion)?;
    Some(
        values
            .iter()
            .filter_map(Value::as_u64)
            .filter_map(|n| u32::try_from(n).ok())
            .collect(),
    )
}

fn rssi_bound(map: &Map<String, Value>, criterion: Criterion) -> Option<i32> {
    let value = map.get(criterion.key())?;
    let bound = match value {
        Value::Number(n) => integer(n),
        _ => None,
    };
    if bound.is_none() {
        debug!(
            key = criterion.key(),
            found = value_kind(value),
            "Ignoring filter parameter, expected an integer"
        );
    }
    bound
}

/// Integral JSON number within `i32` range. `-70.0` counts, `-70.5` does not.
#[allow(clippy::cast_possible_truncation)]
fn integer(n: &Number) -> Option<i32> {
    if let Some(i) = n.as_i64() {
        return i32::try_from(i).ok();
    }
    let f = n.as_f64()?;
    if f.fract().abs() > 0.0 || f < f64::from(i32::MIN) || f > f64::from(i32::MAX) {
        return None;
    }
    Some(f as i32)
}

const fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
