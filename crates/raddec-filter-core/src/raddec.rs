//! Raddec record shape.
//!
//! Raddecs are produced upstream (decoding/ingestion) and consumed read-only
//! here. Only the fields the filter inspects are modelled; unknown keys are
//! ignored on deserialization. Every top-level field is optional so that a
//! record missing any of them is still a valid input to the filter.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Well-known event tags carried in [`Raddec::events`].
pub mod events {
    /// First observation of a transmitter.
    pub const APPEARANCE: &str = "appearance";
    /// Strongest receiver changed.
    pub const DISPLACEMENT: &str = "displacement";
    /// New packets were decoded.
    pub const PACKETS: &str = "packets";
    /// Periodic update with no other change.
    pub const KEEP_ALIVE: &str = "keep-alive";
    /// Transmitter is no longer observed.
    pub const DISAPPEARANCE: &str = "disappearance";
}

/// A single radio decoding of a transmitter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(example = json!({
    "signature": "fee150bada55/2",
    "transmitterId": "fee150bada55",
    "transmitterIdType": 2,
    "receiverSignature": "001bc50940810000/1",
    "events": ["appearance"],
    "rssiSignature": [
        { "receiverId": "001bc50940810000", "receiverIdType": 1, "rssi": -63, "numberOfDecodings": 3 }
    ],
    "timestamp": 1_735_689_600_000_i64
}))]
pub struct Raddec {
    /// Transmitter signature (e.g. `"fee150bada55/2"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,

    /// Transmitter identifier without its type suffix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmitter_id: Option<String>,

    /// Code classifying the transmitter identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transmitter_id_type: Option<u32>,

    /// Signature of the reporting receiver context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiver_signature: Option<String>,

    /// Event tags describing this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<String>>,

    /// Per-receiver observations, strongest first.
    ///
    /// The ordering is a precondition supplied by the producer: element 0
    /// is taken as the strongest receiver without re-sorting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rssi_signature: Option<Vec<RssiObservation>>,

    /// Observation time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

/// One receiver's observation of the transmitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RssiObservation {
    /// Receiver identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "001bc50940810000")]
    pub receiver_id: Option<String>,

    /// Code classifying the receiver identifier.
    #[schema(example = 1)]
    pub receiver_id_type: u32,

    /// Received signal strength in dBm.
    #[schema(example = -63)]
    pub rssi: i32,

    /// Number of packets decoded by this receiver.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_decodings: Option<u32>,
}

impl RssiObservation {
    /// Create an observation with only the fields the filter inspects.
    #[must_use]
    pub const fn new(receiver_id_type: u32, rssi: i32) -> Self {
        Self {
            receiver_id: None,
            receiver_id_type,
            rssi,
            number_of_decodings: None,
        }
    }
}

impl Raddec {
    /// The strongest receiver's observation, if any.
    ///
    /// This is element 0 of `rssiSignature`.
    #[must_use]
    pub fn strongest(&self) -> Option<&RssiObservation> {
        self.rssi_signature.as_deref().and_then(<[_]>::first)
    }

    /// Whether the raddec carries the given event tag.
    #[must_use]
    pub fn has_event(&self, event: &str) -> bool {
        self.events
            .as_deref()
            .is_some_and(|events| events.iter().any(|e| e == event))
    }
}
