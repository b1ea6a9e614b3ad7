//! Drag-to-reorder protocol.
//!
//! This module provides the gesture side of the engine:
//!
//! - [`DragPayload`]: the opaque key/value bundle carried by a pointer drag
//! - [`SpacerDragState`] and [`transition`]: the per-spacer state machine
//! - [`ReorderRequest`] and [`ReorderSink`]: the triple handed to the
//!   topology adapter on a successful drop
//!
//! The engine performs no reordering itself. A drop only identifies the two
//! keys that must end up flanking the moved entity; computing a new
//! canonical key (or renumbering the family) is the adapter's job, followed
//! by a fresh remove/add/link batch.
//!
//! # Gesture Flow
//!
//! ```ignore
//! use strata::drag::{DragPayload, DragResponse, mime};
//!
//! // The gesture source packages the dragged band's altitude:
//! let mut payload = DragPayload::new();
//! payload.set_key(mime::BAND, &altitude);
//!
//! // Pointer enters a spacer:
//! match engine.drag_enter(handle, &payload) {
//!     DragResponse::Accepted => { /* spacer is highlighted */ }
//!     DragResponse::Rejected => { /* no visual change */ }
//! }
//!
//! // Pointer released over the spacer:
//! engine.drop_payload(handle, &payload, &mut adapter);
//! ```

use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::keys::{Altitude, ColumnIndex, PointKey};

/// Payload tags recognized by the engine, one per family.
///
/// A family's spacers only look at their own tag; a payload missing the tag
/// is rejected without touching drag state.
pub mod mime {
    /// Prefix shared by all engine payload tags.
    pub const APPLICATION_PREFIX: &str = "application/x-strata-";
    /// A dragged column: JSON-encoded [`crate::keys::ColumnIndex`].
    pub const COLUMN: &str = "application/x-strata-column";
    /// A dragged band: JSON-encoded [`crate::keys::Altitude`].
    pub const BAND: &str = "application/x-strata-band";
    /// A dragged connection point: JSON-encoded [`crate::keys::PointKey`].
    pub const POINT: &str = "application/x-strata-point";
}

/// Errors decoding a gesture payload.
///
/// Always recoverable: the gesture is rejected silently and no drag state
/// changes. Never propagated past the gesture handler.
#[derive(Debug, thiserror::Error)]
pub enum DragError {
    /// The payload does not carry the tag this family requires.
    #[error("drag payload carries no {expected} entry")]
    MissingTag {
        /// The tag the receiving family expected.
        expected: &'static str,
    },

    /// The tagged entry is not a well-formed key.
    #[error("malformed drag payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Data carried by a drag gesture.
///
/// A payload holds one or more representations keyed by tag, so a single
/// drag can target several drop surfaces. The engine only defines the
/// family tags in [`mime`]; hosts may attach additional entries freely.
#[derive(Debug, Clone, Default)]
pub struct DragPayload {
    data: HashMap<String, Vec<u8>>,
}

impl DragPayload {
    /// Creates an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if no entries are present.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the available tags.
    pub fn formats(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(|s| s.as_str())
    }

    /// Checks if an entry is present for the given tag.
    pub fn has_format(&self, tag: &str) -> bool {
        self.data.contains_key(tag)
    }

    /// Gets the raw bytes for a tag.
    pub fn get_data(&self, tag: &str) -> Option<&[u8]> {
        self.data.get(tag).map(|v| v.as_slice())
    }

    /// Sets raw bytes for a tag.
    pub fn set_data(&mut self, tag: impl Into<String>, data: impl Into<Vec<u8>>) {
        self.data.insert(tag.into(), data.into());
    }

    /// Encodes a family key under `tag`.
    ///
    /// Serialization of the engine's key types cannot fail; a failure here
    /// would be a host-defined key type misbehaving, so it is silently
    /// skipped and the entry left absent.
    pub fn set_key<T: Serialize>(&mut self, tag: &'static str, key: &T) {
        if let Ok(bytes) = serde_json::to_vec(key) {
            self.data.insert(tag.to_owned(), bytes);
        }
    }

    /// Decodes the family key stored under `tag`.
    pub fn decode_key<T: DeserializeOwned>(&self, tag: &'static str) -> Result<T, DragError> {
        let bytes = self
            .get_data(tag)
            .ok_or(DragError::MissingTag { expected: tag })?;
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// Drag state of one spacer.
///
/// Initial and terminal state is `Idle`; `Highlighted` only exists between
/// an accepted drag-enter and the matching leave or drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpacerDragState {
    /// No gesture targets this spacer.
    #[default]
    Idle,
    /// An accepted gesture hovers over this spacer.
    Highlighted,
}

/// A gesture event delivered to one spacer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureEvent {
    /// Pointer carrying a payload entered the spacer.
    Enter,
    /// Pointer left the spacer (also the cancellation path).
    Leave,
    /// Payload was released over the spacer.
    Drop,
}

/// Result of feeding one gesture event through [`transition`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// The spacer's next state.
    pub state: SpacerDragState,
    /// Whether the event completes an accepted drop, so the caller must
    /// package and emit a [`ReorderRequest`].
    pub emit: bool,
}

/// Pure transition function of the per-spacer state machine.
///
/// `accepted` is the family drag-accept predicate evaluated against the
/// payload; it is only consulted on `Enter`. `Leave` is idempotent and
/// always lands in `Idle`, and a `Drop` on an `Idle` spacer (one whose
/// enter was rejected) emits nothing.
pub fn transition(
    state: SpacerDragState,
    event: GestureEvent,
    accepted: bool,
) -> Transition {
    use GestureEvent::*;
    use SpacerDragState::*;

    let (state, emit) = match (state, event) {
        (Idle, Enter) if accepted => (Highlighted, false),
        (Idle, Enter) => (Idle, false),
        // Re-entry during one gesture re-evaluates the predicate.
        (Highlighted, Enter) if accepted => (Highlighted, false),
        (Highlighted, Enter) => (Idle, false),
        (_, Leave) => (Idle, false),
        (Highlighted, Drop) => (Idle, true),
        (Idle, Drop) => (Idle, false),
    };
    Transition { state, emit }
}

/// Response to a drag-enter, for the gesture source's visual feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragResponse {
    /// The spacer accepted the payload and is now highlighted.
    Accepted,
    /// The payload was rejected; the spacer is unchanged.
    Rejected,
}

/// The triple emitted when a payload is dropped on a spacer.
///
/// `lower`/`upper` are the keys of the spacer's current flanking items —
/// `None` at a boundary. The adapter must place the moved entity strictly
/// between them (renumbering the family if no room exists) and then drive a
/// fresh remove/add/relink batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderRequest {
    /// Move a column between two column indices.
    Columns {
        /// The dragged column.
        moved: ColumnIndex,
        /// Index flanking the drop gap on the lower side.
        lower: Option<ColumnIndex>,
        /// Index flanking the drop gap on the upper side.
        upper: Option<ColumnIndex>,
    },
    /// Move a band between two altitudes.
    Bands {
        /// The dragged band.
        moved: Altitude,
        /// Altitude below the drop gap.
        lower: Option<Altitude>,
        /// Altitude above the drop gap.
        upper: Option<Altitude>,
    },
    /// Move a connection point within its role container.
    Points {
        /// The dragged point; its column and role identify the container.
        moved: PointKey,
        /// In-row order on the lower side of the drop gap.
        lower: Option<u32>,
        /// In-row order on the upper side of the drop gap.
        upper: Option<u32>,
    },
}

/// The topology adapter's reorder entry point.
///
/// The engine forwards every accepted drop here and does nothing else; the
/// adapter owns the canonical topology and decides how the request changes
/// it.
pub trait ReorderSink {
    /// Handle one reorder request.
    fn reorder(&mut self, request: ReorderRequest);
}
