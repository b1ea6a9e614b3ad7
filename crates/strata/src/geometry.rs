//! Geometry boundary: the anchor vocabulary pushed to the external solver.
//!
//! The engine never computes pixel positions. Every `link()` pass emits a
//! set of directional anchor edges — "line A of node X coincides with line B
//! of node Y" — to an [`AnchorSink`] owned by the host. The sink is expected
//! to feed a constraint solver; the engine guarantees that exactly the
//! derived-neighbor edges plus the fixed side-anchors to owned sub-widgets
//! are issued, never ad hoc geometry.

use crate::keys::{Altitude, ColumnIndex, PointKey, Polarity, Role};

/// Anchor lines available on each node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorLine {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

impl AnchorLine {
    /// Check if this is a horizontal anchor line.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, AnchorLine::Left | AnchorLine::Right)
    }

    /// Check if this is a vertical anchor line.
    #[inline]
    pub fn is_vertical(&self) -> bool {
        !self.is_horizontal()
    }

    /// Get the opposite anchor line (Left<->Right, Top<->Bottom).
    pub fn opposite(&self) -> Self {
        match self {
            AnchorLine::Left => AnchorLine::Right,
            AnchorLine::Right => AnchorLine::Left,
            AnchorLine::Top => AnchorLine::Bottom,
            AnchorLine::Bottom => AnchorLine::Top,
        }
    }
}

/// The three entity families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FamilyKind {
    /// Vertical blocks ordered left to right.
    Columns,
    /// Horizontal bands stacked by altitude.
    Bands,
    /// Per-column connection points.
    Points,
}

impl std::fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Columns => write!(f, "columns"),
            Self::Bands => write!(f, "bands"),
            Self::Points => write!(f, "points"),
        }
    }
}

/// Addresses one spacer of one family.
///
/// Spacers are regenerated wholesale on every `link()`, so a handle is only
/// valid until the next re-link; the drag-gesture source receives fresh
/// handles with each rebuild.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpacerHandle {
    /// The family whose container owns the spacer.
    pub family: FamilyKind,
    /// Index into that container's current spacer sequence.
    pub index: usize,
}

/// A node the solver can anchor against.
///
/// This is the complete vocabulary of the geometry boundary: the engine's
/// outer frame, the two top-level containers, the items and spacers of each
/// family, and the fixed sub-widgets owned by items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorNode {
    /// The engine's outer frame.
    Frame,
    /// The shared reference block row the columns sit on.
    ColumnRibbon,
    /// The stack holding all bands, spanning the ribbon horizontally.
    BandStack,
    /// A column item.
    Column(ColumnIndex),
    /// A band item.
    Band(Altitude),
    /// A connection point item.
    Point(PointKey),
    /// A spacer of any family.
    Spacer(SpacerHandle),
    /// A column's top or bottom margin sub-widget.
    ColumnMargin {
        /// Owning column.
        column: ColumnIndex,
        /// Which margin.
        side: VerticalSide,
    },
    /// A column's central label spacer.
    ColumnLabel(ColumnIndex),
    /// One of a column's two role containers.
    RoleContainer {
        /// Owning column.
        column: ColumnIndex,
        /// Which container.
        role: Role,
    },
    /// A connection point's band link indicator.
    LinkIndicator {
        /// Owning point.
        point: PointKey,
        /// Which band side the indicator reaches toward.
        polarity: Polarity,
    },
}

/// Which of a column's two margins a node refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerticalSide {
    /// The margin above the role containers.
    Top,
    /// The margin below the role containers.
    Bottom,
}

/// Receiver for the anchor edges emitted during a `link()` pass.
///
/// Implemented by the host's constraint solver adapter. The engine calls
/// this synchronously while linking; implementations must not call back into
/// the engine.
pub trait AnchorSink {
    /// Record that `a_line` of `a` coincides with `b_line` of `b`.
    fn add_anchor(&mut self, a: AnchorNode, a_line: AnchorLine, b: AnchorNode, b_line: AnchorLine);
}

/// One recorded anchor edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnchorEdge {
    /// Source node.
    pub a: AnchorNode,
    /// Source line.
    pub a_line: AnchorLine,
    /// Target node.
    pub b: AnchorNode,
    /// Target line.
    pub b_line: AnchorLine,
}

/// An [`AnchorSink`] that records every edge.
///
/// Useful as a test double and for inspecting what a `link()` pass emitted
/// before wiring a real solver.
#[derive(Debug, Default)]
pub struct AnchorLog {
    edges: Vec<AnchorEdge>,
}

impl AnchorLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded edges, in emission order.
    pub fn edges(&self) -> &[AnchorEdge] {
        &self.edges
    }

    /// Discard all recorded edges.
    pub fn clear(&mut self) {
        self.edges.clear();
    }

    /// Whether the exact edge was recorded, in either direction.
    pub fn contains(
        &self,
        a: AnchorNode,
        a_line: AnchorLine,
        b: AnchorNode,
        b_line: AnchorLine,
    ) -> bool {
        self.edges.iter().any(|e| {
            (e.a == a && e.a_line == a_line && e.b == b && e.b_line == b_line)
                || (e.a == b && e.a_line == b_line && e.b == a && e.b_line == a_line)
        })
    }

    /// All edges touching `node`.
    pub fn edges_of(&self, node: AnchorNode) -> impl Iterator<Item = &AnchorEdge> {
        self.edges.iter().filter(move |e| e.a == node || e.b == node)
    }
}

impl AnchorSink for AnchorLog {
    fn add_anchor(&mut self, a: AnchorNode, a_line: AnchorLine, b: AnchorNode, b_line: AnchorLine) {
        self.edges.push(AnchorEdge { a, a_line, b, b_line });
    }
}
