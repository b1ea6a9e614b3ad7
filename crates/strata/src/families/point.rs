//! The ConnectionPoints family: per-column, per-role ordered points.

use crate::attributes::PointAttributes;
use crate::container::{Family, Item};
use crate::drag::{DragError, DragPayload, ReorderRequest, mime};
use crate::geometry::{AnchorLine, AnchorNode, AnchorSink, FamilyKind};
use crate::keys::{Altitude, PointKey, Polarity};

/// The indicator reaching from a point toward one of its linked bands.
///
/// Hidden whenever the point has no band on that side; the visibility flag
/// is recomputed on every link so a dropped band link clears it without any
/// separate bookkeeping.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LinkIndicator {
    /// Whether the indicator is shown (and anchored) at all.
    pub visible: bool,
}

/// Payload of a connection point item.
#[derive(Debug, Default)]
pub struct Point {
    /// Presentation bundle, adapter-pushed.
    pub attributes: PointAttributes,
    /// Adapter-declared in-row order of the point to the left.
    pub left_peer: Option<u32>,
    /// Adapter-declared in-row order of the point to the right.
    pub right_peer: Option<u32>,
    /// Altitude of the linked band above the reference line, if any.
    pub pos_band: Option<Altitude>,
    /// Altitude of the linked band below the reference line, if any.
    pub neg_band: Option<Altitude>,
    /// Indicator toward the positive-side band.
    pub up_link: LinkIndicator,
    /// Indicator toward the negative-side band.
    pub down_link: LinkIndicator,
}

/// Family marker for connection points.
pub struct Points;

impl Family for Points {
    const KIND: FamilyKind = FamilyKind::Points;
    const MIME_TAG: &'static str = mime::POINT;

    type Key = PointKey;
    type Payload = Point;

    /// Points chain per role container: a change of column or role between
    /// key-adjacent points starts a fresh spacer run.
    fn same_chain(a: &PointKey, b: &PointKey) -> bool {
        a.same_container(b)
    }

    fn decode_payload(payload: &DragPayload) -> Result<PointKey, DragError> {
        payload.decode_key(Self::MIME_TAG)
    }

    /// A point may only move within its own role container. The container
    /// a spacer belongs to is read off either flank; a spacer with no
    /// flanks at all belongs to no container and accepts nothing.
    fn accepts_drop(
        moved: PointKey,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
    ) -> bool {
        let Some(anchor) = lower.or(upper) else {
            return false;
        };
        moved.same_container(&anchor.key())
    }

    fn reorder_request(
        moved: PointKey,
        lower: Option<PointKey>,
        upper: Option<PointKey>,
    ) -> ReorderRequest {
        ReorderRequest::Points {
            moved,
            lower: lower.map(|k| k.order),
            upper: upper.map(|k| k.order),
        }
    }

    /// A point rides its role container vertically and carries one link
    /// indicator per linked band side.
    fn link_item(item: &mut Item<Self>, sink: &mut dyn AnchorSink) {
        use AnchorLine::*;

        let key = item.key();
        let node = AnchorNode::Point(key);
        let container = AnchorNode::RoleContainer {
            column: key.column,
            role: key.role,
        };
        sink.add_anchor(node, Top, container, Top);
        sink.add_anchor(node, Bottom, container, Bottom);

        let pos_band = item.payload().pos_band;
        let neg_band = item.payload().neg_band;

        item.payload_mut().up_link.visible = pos_band.is_some();
        if let Some(altitude) = pos_band {
            let indicator = AnchorNode::LinkIndicator {
                point: key,
                polarity: Polarity::Positive,
            };
            sink.add_anchor(indicator, Bottom, node, Top);
            sink.add_anchor(indicator, Top, AnchorNode::Band(altitude), Bottom);
            sink.add_anchor(indicator, Left, node, Left);
            sink.add_anchor(indicator, Right, node, Right);
        }

        item.payload_mut().down_link.visible = neg_band.is_some();
        if let Some(altitude) = neg_band {
            let indicator = AnchorNode::LinkIndicator {
                point: key,
                polarity: Polarity::Negative,
            };
            sink.add_anchor(indicator, Top, node, Bottom);
            sink.add_anchor(indicator, Bottom, AnchorNode::Band(altitude), Top);
            sink.add_anchor(indicator, Left, node, Left);
            sink.add_anchor(indicator, Right, node, Right);
        }
    }

    /// A point spacer fills the gap inside its role container, out to the
    /// container edge where a flank is absent.
    fn link_spacer(
        node: AnchorNode,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
        sink: &mut dyn AnchorSink,
    ) {
        use AnchorLine::*;

        let Some(anchor) = lower.or(upper) else {
            return;
        };
        let key = anchor.key();
        let container = AnchorNode::RoleContainer {
            column: key.column,
            role: key.role,
        };
        sink.add_anchor(node, Top, container, Top);
        sink.add_anchor(node, Bottom, container, Bottom);
        match lower {
            Some(item) => sink.add_anchor(node, Left, AnchorNode::Point(item.key()), Right),
            None => sink.add_anchor(node, Left, container, Left),
        }
        match upper {
            Some(item) => sink.add_anchor(node, Right, AnchorNode::Point(item.key()), Left),
            None => sink.add_anchor(node, Right, container, Right),
        }
    }

    fn release(payload: &mut Point) {
        payload.left_peer = None;
        payload.right_peer = None;
        payload.pos_band = None;
        payload.neg_band = None;
        payload.up_link.visible = false;
        payload.down_link.visible = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::SpacerContainer;
    use crate::geometry::AnchorLog;
    use crate::keys::Role;

    #[test]
    fn chains_split_per_role_container() {
        let mut container = SpacerContainer::<Points>::new();
        for key in [
            PointKey::new(0, Role::Emitter, 0),
            PointKey::new(0, Role::Emitter, 1),
            PointKey::new(0, Role::Collector, 0),
            PointKey::new(1, Role::Emitter, 0),
        ] {
            container.add_item(key, Point::default()).unwrap();
        }
        container.link(&mut AnchorLog::new());

        // Three chains: (0, emitter) with two points, (0, collector) and
        // (1, emitter) with one each.
        assert_eq!(container.spacer_count(), 3 + 2 + 2);
    }

    #[test]
    fn drop_stays_inside_the_container() {
        let mut container = SpacerContainer::<Points>::new();
        let home = PointKey::new(0, Role::Emitter, 0);
        let same_row = PointKey::new(0, Role::Emitter, 3);
        let other_role = PointKey::new(0, Role::Collector, 0);
        let other_column = PointKey::new(1, Role::Emitter, 0);
        for key in [home, same_row] {
            container.add_item(key, Point::default()).unwrap();
        }
        container.link(&mut AnchorLog::new());

        let anchor = container.get(home).unwrap();
        assert!(Points::accepts_drop(same_row, Some(anchor), None));
        assert!(!Points::accepts_drop(other_role, Some(anchor), None));
        assert!(!Points::accepts_drop(other_column, Some(anchor), None));
        assert!(!Points::accepts_drop(same_row, None, None));
    }
}
