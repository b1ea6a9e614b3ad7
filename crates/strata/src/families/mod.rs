//! The three entity families and their container policies.
//!
//! Each family is a zero-sized marker implementing
//! [`Family`](crate::container::Family), paired with a payload struct
//! holding the per-item state the adapter pushes in: attributes, peer
//! caches, and (for columns and points) the fixed sub-widgets the item
//! anchors internally.

mod band;
mod column;
mod point;

pub use band::{Band, Bands};
pub use column::{Column, Columns, LabelSpacer};
pub use point::{LinkIndicator, Point, Points};
