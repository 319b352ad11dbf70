//! Event payload shapes and their normalization into a wire mapping.
//!
//! Connectors hand the forwarder payloads of uneven shape: typed records,
//! ordered field lists, loose mappings, or values with no usable structure.
//! Rather than probing reflectively, the shape is declared up front as one
//! of a closed set of variants, each with its own conversion into the wire
//! `data` mapping. Conversion never fails: anything that does not normalize
//! cleanly becomes the empty mapping.

use serde::Serialize;
use serde_json::{Map, Value};

/// A domain-event payload in one of the known shape categories.
#[derive(Debug, Clone)]
pub enum EventPayload {
    /// A typed record serialized through its named fields.
    /// Expected to be a JSON object; anything else normalizes to empty.
    Record(Value),
    /// Field-name/value pairs in declaration order.
    Fields(Vec<(String, Value)>),
    /// An arbitrary key/value mapping.
    Mapping(Map<String, Value>),
    /// A payload with no convertible structure.
    Opaque,
}

impl EventPayload {
    /// Capture a typed record through its `Serialize` impl.
    ///
    /// A value that cannot be serialized (or does not serialize to an
    /// object) still produces a payload; it will normalize to the empty
    /// mapping rather than surfacing the failure.
    pub fn record<T: Serialize>(value: &T) -> Self {
        match serde_json::to_value(value) {
            Ok(v) => EventPayload::Record(v),
            Err(_) => EventPayload::Opaque,
        }
    }

    /// Capture ordered field-name/value pairs.
    pub fn fields(pairs: Vec<(String, Value)>) -> Self {
        EventPayload::Fields(pairs)
    }

    /// Capture a ready-made mapping.
    pub fn mapping(map: Map<String, Value>) -> Self {
        EventPayload::Mapping(map)
    }

    /// Normalize into the wire `data` mapping. Never fails; shapes that do
    /// not convert yield the empty mapping.
    pub fn into_map(self) -> Map<String, Value> {
        match self {
            EventPayload::Record(Value::Object(map)) => map,
            EventPayload::Record(_) => Map::new(),
            EventPayload::Fields(pairs) => pairs.into_iter().collect(),
            EventPayload::Mapping(map) => map,
            EventPayload::Opaque => Map::new(),
        }
    }
}
