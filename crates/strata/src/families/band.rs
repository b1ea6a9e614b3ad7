//! The Bands family: horizontal bands stacked by signed altitude.

use crate::attributes::BandAttributes;
use crate::container::{Family, Item};
use crate::drag::{DragError, DragPayload, ReorderRequest, mime};
use crate::geometry::{AnchorLine, AnchorNode, AnchorSink, FamilyKind};
use crate::keys::{Altitude, PointKey};

/// Payload of a band item.
#[derive(Debug, Default)]
pub struct Band {
    /// Draw-order rank, adapter-assigned.
    pub rank: u32,
    /// Presentation bundle, adapter-pushed.
    pub attributes: BandAttributes,
    /// Adapter-declared peer at the next higher altitude.
    pub top_peer: Option<Altitude>,
    /// Adapter-declared peer at the next lower altitude.
    pub bottom_peer: Option<Altitude>,
    /// Leftmost point the band connects to, for horizontal extent.
    pub leftmost_point: Option<PointKey>,
    /// Rightmost point the band connects to, for horizontal extent.
    pub rightmost_point: Option<PointKey>,
}

/// Family marker for bands.
pub struct Bands;

impl Family for Bands {
    const KIND: FamilyKind = FamilyKind::Bands;
    const MIME_TAG: &'static str = mime::BAND;

    type Key = Altitude;
    type Payload = Band;

    fn decode_payload(payload: &DragPayload) -> Result<Altitude, DragError> {
        payload.decode_key(Self::MIME_TAG)
    }

    /// A band may only land in a gap that touches its own side of the
    /// reference line. A gap at the stack boundary contributes nothing, so
    /// a drop there is accepted only if the other flank matches.
    fn accepts_drop(
        moved: Altitude,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
    ) -> bool {
        let lower_alt = lower.map(Item::key).unwrap_or(0);
        let upper_alt = upper.map(Item::key).unwrap_or(0);
        (moved > 0 && (lower_alt > 0 || upper_alt > 0))
            || (moved < 0 && (lower_alt < 0 || upper_alt < 0))
    }

    fn reorder_request(
        moved: Altitude,
        lower: Option<Altitude>,
        upper: Option<Altitude>,
    ) -> ReorderRequest {
        ReorderRequest::Bands { moved, lower, upper }
    }

    /// Horizontal extent: out to the cached endpoint points when the
    /// adapter has pushed them, to the stack edges otherwise.
    fn link_item(item: &mut Item<Self>, sink: &mut dyn AnchorSink) {
        use AnchorLine::*;

        let node = AnchorNode::Band(item.key());
        match item.payload().leftmost_point {
            Some(point) => sink.add_anchor(node, Left, AnchorNode::Point(point), Left),
            None => sink.add_anchor(node, Left, AnchorNode::BandStack, Left),
        }
        match item.payload().rightmost_point {
            Some(point) => sink.add_anchor(node, Right, AnchorNode::Point(point), Right),
            None => sink.add_anchor(node, Right, AnchorNode::BandStack, Right),
        }
    }

    /// Vertical placement of one band gap.
    ///
    /// Interior gaps sit directly between their flanking bands, even across
    /// the reference line. Boundary gaps close against the stack edge on
    /// the far side of the outermost band, or against the ribbon when the
    /// stack stops short of the reference line.
    fn link_spacer(
        node: AnchorNode,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
        sink: &mut dyn AnchorSink,
    ) {
        use AnchorLine::*;

        sink.add_anchor(node, Left, AnchorNode::BandStack, Left);
        sink.add_anchor(node, Right, AnchorNode::BandStack, Right);

        match upper {
            Some(item) => sink.add_anchor(node, Top, AnchorNode::Band(item.key()), Bottom),
            None => match lower {
                // Topmost gap: above a positive band lies the stack top,
                // above a negative one the underside of the ribbon.
                Some(item) if item.key() > 0 => {
                    sink.add_anchor(node, Top, AnchorNode::BandStack, Top)
                }
                Some(_) => sink.add_anchor(node, Top, AnchorNode::ColumnRibbon, Bottom),
                None => {}
            },
        }
        match lower {
            Some(item) => sink.add_anchor(node, Bottom, AnchorNode::Band(item.key()), Top),
            None => match upper {
                // Bottommost gap, mirrored.
                Some(item) if item.key() > 0 => {
                    sink.add_anchor(node, Bottom, AnchorNode::ColumnRibbon, Top)
                }
                Some(_) => sink.add_anchor(node, Bottom, AnchorNode::BandStack, Bottom),
                None => {}
            },
        }
    }

    fn release(payload: &mut Band) {
        payload.top_peer = None;
        payload.bottom_peer = None;
        payload.leftmost_point = None;
        payload.rightmost_point = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::SpacerContainer;
    use crate::geometry::AnchorLog;

    fn flank(container: &SpacerContainer<Bands>, altitude: Altitude) -> &Item<Bands> {
        container.get(altitude).unwrap()
    }

    #[test]
    fn drop_must_match_side() {
        let mut container = SpacerContainer::<Bands>::new();
        for altitude in [-2, -1, 1, 2] {
            container.add_item(altitude, Band::default()).unwrap();
        }
        container.link(&mut AnchorLog::new());

        // Gap between -1 and 1 touches both sides.
        assert!(Bands::accepts_drop(
            2,
            Some(flank(&container, -1)),
            Some(flank(&container, 1)),
        ));
        assert!(Bands::accepts_drop(
            -2,
            Some(flank(&container, -1)),
            Some(flank(&container, 1)),
        ));
        // Gap between 1 and 2 is strictly positive.
        assert!(!Bands::accepts_drop(
            -1,
            Some(flank(&container, 1)),
            Some(flank(&container, 2)),
        ));
        // Boundary gap below -2 is strictly negative.
        assert!(!Bands::accepts_drop(1, None, Some(flank(&container, -2))));
        assert!(Bands::accepts_drop(-1, None, Some(flank(&container, -2))));
    }
}
