//! The Columns family: vertical blocks ordered left to right on the ribbon.

use crate::attributes::ColumnAttributes;
use crate::container::{Family, Item};
use crate::drag::{DragError, DragPayload, ReorderRequest, mime};
use crate::geometry::{AnchorLine, AnchorNode, AnchorSink, FamilyKind, VerticalSide};
use crate::keys::{ColumnIndex, Role};

/// The central spacer holding a column's two role containers apart.
///
/// Its width is presentation state (it tracks
/// [`ColumnAttributes::spacer_width`] on attribute pushes) but its anchors
/// are structural: it is what keeps the collector on the left edge and the
/// emitter on the right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelSpacer {
    /// Current width, from the last attribute push.
    pub width: f32,
}

impl Default for LabelSpacer {
    fn default() -> Self {
        Self { width: 20.0 }
    }
}

/// Payload of a column item.
#[derive(Debug, Default)]
pub struct Column {
    /// Presentation bundle, adapter-pushed.
    pub attributes: ColumnAttributes,
    /// Adapter-declared left peer, validated against the derived order.
    pub left_peer: Option<ColumnIndex>,
    /// Adapter-declared right peer, validated against the derived order.
    pub right_peer: Option<ColumnIndex>,
    /// The central label spacer between the two role containers.
    pub label_spacer: LabelSpacer,
}

/// Family marker for columns.
pub struct Columns;

impl Family for Columns {
    const KIND: FamilyKind = FamilyKind::Columns;
    const MIME_TAG: &'static str = mime::COLUMN;

    type Key = ColumnIndex;
    type Payload = Column;

    fn decode_payload(payload: &DragPayload) -> Result<ColumnIndex, DragError> {
        payload.decode_key(Self::MIME_TAG)
    }

    // Any column may land in any column gap; the generic no-op check is the
    // only restriction.
    fn accepts_drop(
        _moved: ColumnIndex,
        _lower: Option<&Item<Self>>,
        _upper: Option<&Item<Self>>,
    ) -> bool {
        true
    }

    fn reorder_request(
        moved: ColumnIndex,
        lower: Option<ColumnIndex>,
        upper: Option<ColumnIndex>,
    ) -> ReorderRequest {
        ReorderRequest::Columns { moved, lower, upper }
    }

    /// A column's internal frame: margins pinned to its top and bottom
    /// edges, and the collector / label spacer / emitter row between them.
    fn link_item(item: &mut Item<Self>, sink: &mut dyn AnchorSink) {
        use AnchorLine::*;

        let column = item.key();
        let node = AnchorNode::Column(column);
        let top_margin = AnchorNode::ColumnMargin {
            column,
            side: VerticalSide::Top,
        };
        let bottom_margin = AnchorNode::ColumnMargin {
            column,
            side: VerticalSide::Bottom,
        };
        let label = AnchorNode::ColumnLabel(column);
        let collector = AnchorNode::RoleContainer {
            column,
            role: Role::Collector,
        };
        let emitter = AnchorNode::RoleContainer {
            column,
            role: Role::Emitter,
        };

        sink.add_anchor(top_margin, Top, node, Top);
        sink.add_anchor(top_margin, Left, node, Left);
        sink.add_anchor(top_margin, Right, node, Right);
        sink.add_anchor(bottom_margin, Bottom, node, Bottom);
        sink.add_anchor(bottom_margin, Left, node, Left);
        sink.add_anchor(bottom_margin, Right, node, Right);

        for row in [collector, label, emitter] {
            sink.add_anchor(row, Top, top_margin, Bottom);
            sink.add_anchor(row, Bottom, bottom_margin, Top);
        }
        sink.add_anchor(collector, Left, node, Left);
        sink.add_anchor(label, Left, collector, Right);
        sink.add_anchor(emitter, Left, label, Right);
        sink.add_anchor(emitter, Right, node, Right);
    }

    /// A column spacer fills the gap to its flanking columns, or runs out
    /// to the ribbon edge where a flank is absent.
    fn link_spacer(
        node: AnchorNode,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
        sink: &mut dyn AnchorSink,
    ) {
        use AnchorLine::*;

        match lower {
            Some(item) => {
                let left = AnchorNode::Column(item.key());
                sink.add_anchor(node, Left, left, Right);
                sink.add_anchor(node, Top, left, Top);
                sink.add_anchor(node, Bottom, left, Bottom);
            }
            None => {
                sink.add_anchor(node, Left, AnchorNode::ColumnRibbon, Left);
                sink.add_anchor(node, Top, AnchorNode::ColumnRibbon, Top);
                sink.add_anchor(node, Bottom, AnchorNode::ColumnRibbon, Bottom);
            }
        }
        match upper {
            Some(item) => {
                let right = AnchorNode::Column(item.key());
                sink.add_anchor(node, Right, right, Left);
                sink.add_anchor(node, Top, right, Top);
                sink.add_anchor(node, Bottom, right, Bottom);
            }
            None => {
                sink.add_anchor(node, Right, AnchorNode::ColumnRibbon, Right);
                sink.add_anchor(node, Top, AnchorNode::ColumnRibbon, Top);
                sink.add_anchor(node, Bottom, AnchorNode::ColumnRibbon, Bottom);
            }
        }
    }

    fn release(payload: &mut Column) {
        payload.left_peer = None;
        payload.right_peer = None;
    }
}
