//! Ordered layout and adjacency engine for block-and-band diagrams.
//!
//! `strata` maintains the structural layer of a diagram editor: three
//! ordered entity families (columns on a shared ribbon, bands stacked by
//! signed altitude, connection points per column and role) plus the derived
//! spacers between them. It computes no geometry itself — every `link()`
//! pass re-derives neighbors from sorted keys and emits anchor edges to a
//! host-owned constraint solver, and every accepted drag-drop is reported
//! to a host-owned topology adapter as a reorder request.
//!
//! # Example
//!
//! ```ignore
//! use strata::{AnchorLog, LayoutEngine};
//!
//! let mut engine = LayoutEngine::new();
//! engine.add_column(0)?;
//! engine.add_column(1)?;
//! engine.add_band(1, 0)?;
//!
//! let mut sink = AnchorLog::new();
//! engine.link(&mut sink);
//! // sink.edges() now holds the full anchor set for the solver.
//! ```

pub mod attributes;
pub mod container;
pub mod debug;
pub mod drag;
pub mod engine;
mod error;
pub mod families;
pub mod geometry;
pub mod keys;

pub use attributes::{BandAttributes, ColumnAttributes, PointAttributes, Rgba};
pub use container::{Family, Item, SpacerContainer};
pub use debug::AdjacencyDebug;
pub use drag::{
    DragError, DragPayload, DragResponse, GestureEvent, ReorderRequest, ReorderSink,
    SpacerDragState,
};
pub use engine::LayoutEngine;
pub use error::{LayoutError, Result};
pub use geometry::{
    AnchorEdge, AnchorLine, AnchorLog, AnchorNode, AnchorSink, FamilyKind, SpacerHandle,
    VerticalSide,
};
pub use keys::{Altitude, ColumnIndex, PointKey, Polarity, Role};
