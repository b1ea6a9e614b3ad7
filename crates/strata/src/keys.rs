//! Ordering keys for the three entity families.
//!
//! Each family sorts by its own key type: Columns by a contiguous integer
//! index, Bands by a signed altitude whose sign selects the side of the
//! reference line, and ConnectionPoints by a composite key whose ordering
//! groups points by owning column and role before their in-row order. The
//! engine never invents keys — the adapter owns canonical key assignment and
//! the engine only sorts by them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Ordering key for the Columns family: a contiguous index, left to right.
pub type ColumnIndex = u32;

/// Ordering key for the Bands family.
///
/// Positive altitudes stack above the reference line, negative below;
/// larger magnitude is farther from the line. Altitude zero is the
/// reference line itself and is never assigned to a band.
pub type Altitude = i32;

/// Which side of the reference line a band occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Polarity {
    /// Above the reference line (altitude > 0).
    Positive,
    /// Below the reference line (altitude <= 0).
    Negative,
}

impl Polarity {
    /// The side an altitude falls on.
    pub fn of(altitude: Altitude) -> Self {
        if altitude > 0 {
            Self::Positive
        } else {
            Self::Negative
        }
    }
}

/// The role a connection point plays on its owning column.
///
/// Each column carries two role containers; a point is ordered only against
/// points sharing both its column and its role.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Outgoing side of a column.
    Emitter,
    /// Incoming side of a column.
    Collector,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Emitter => write!(f, "emitter"),
            Self::Collector => write!(f, "collector"),
        }
    }
}

/// Composite ordering key for the ConnectionPoints family.
///
/// Derives `Ord` field-by-field, so key-adjacent points with equal
/// `(column, role)` are exactly the in-row neighbors and a change in either
/// prefix field marks a chain boundary.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PointKey {
    /// The owning column's index.
    pub column: ColumnIndex,
    /// The role container on that column.
    pub role: Role,
    /// Position within the role container.
    pub order: u32,
}

impl PointKey {
    /// Build a key in `(column, role, order)` order.
    pub fn new(column: ColumnIndex, role: Role, order: u32) -> Self {
        Self {
            column,
            role,
            order,
        }
    }

    /// Whether `other` lives in the same role container.
    pub fn same_container(&self, other: &Self) -> bool {
        self.column == other.column && self.role == other.role
    }
}

impl fmt::Display for PointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.column, self.role, self.order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polarity_splits_at_zero() {
        assert_eq!(Polarity::of(3), Polarity::Positive);
        assert_eq!(Polarity::of(-3), Polarity::Negative);
        assert_eq!(Polarity::of(0), Polarity::Negative);
    }

    #[test]
    fn point_keys_group_by_container() {
        let a = PointKey::new(0, Role::Emitter, 5);
        let b = PointKey::new(0, Role::Emitter, 9);
        let c = PointKey::new(0, Role::Collector, 1);

        assert!(a.same_container(&b));
        assert!(!a.same_container(&c));
        // Role ordering keeps emitters of a column contiguous.
        assert!(a < b);
        assert!(a < c);
    }
}
