//! The engine facade the topology adapter drives.
//!
//! [`LayoutEngine`] owns the three family containers and exposes the full
//! adapter surface: add/has/remove per family, settings and attribute
//! pushes, [`link`](LayoutEngine::link), and the spacer gesture entry
//! points. The adapter is expected to drive it in batches — any number of
//! removes, adds and settings pushes, then exactly one `link` to make the
//! structure consistent again.

use tracing::{debug, info};

use strata_core::{RegistryError, logging::targets};

use crate::attributes::{BandAttributes, ColumnAttributes, PointAttributes};
use crate::container::{Item, SpacerContainer};
use crate::drag::{DragPayload, DragResponse, ReorderSink};
use crate::error::Result;
use crate::families::{Band, Bands, Column, Columns, Point, Points};
use crate::geometry::{AnchorLine, AnchorNode, AnchorSink, FamilyKind, SpacerHandle};
use crate::keys::{Altitude, ColumnIndex, PointKey};

/// An ordered layout engine for one diagram.
#[derive(Debug, Default)]
pub struct LayoutEngine {
    columns: SpacerContainer<Columns>,
    bands: SpacerContainer<Bands>,
    points: SpacerContainer<Points>,
}

impl LayoutEngine {
    /// Creates an empty engine.
    pub fn new() -> Self {
        Self::default()
    }

    // ====== Columns ======

    /// Adds a column at `index`.
    pub fn add_column(&mut self, index: ColumnIndex) -> Result<()> {
        self.columns.add_item(index, Column::default())?;
        debug!(target: targets::ENGINE, index, "column added");
        Ok(())
    }

    /// Checks whether a column exists.
    pub fn has_column(&self, index: ColumnIndex) -> bool {
        self.columns.contains(index)
    }

    /// Removes a column, returning its released item.
    ///
    /// The column's points are not touched; the adapter removes those
    /// explicitly before or after, and the next link heals the chains.
    pub fn remove_column(&mut self, index: ColumnIndex) -> Result<Item<Columns>> {
        let item = self.columns.remove_item(index)?;
        debug!(target: targets::ENGINE, index, "column removed");
        Ok(item)
    }

    /// Looks up a column item.
    pub fn column(&self, index: ColumnIndex) -> Result<&Item<Columns>> {
        Ok(self.columns.get(index)?)
    }

    /// Caches the adapter's peer claims for a column.
    ///
    /// Accepted as pushed; the derived order from the next link is the
    /// structure that actually gets anchored, so a stale claim is
    /// overwritten rather than trusted.
    pub fn set_column_settings(
        &mut self,
        index: ColumnIndex,
        left_peer: Option<ColumnIndex>,
        right_peer: Option<ColumnIndex>,
    ) -> Result<()> {
        for peer in [left_peer, right_peer].into_iter().flatten() {
            if !self.columns.contains(peer) {
                return Err(RegistryError::missing(peer).into());
            }
        }
        let column = self.columns.get_mut(index)?.payload_mut();
        column.left_peer = left_peer;
        column.right_peer = right_peer;
        Ok(())
    }

    /// Pushes a column's presentation bundle.
    pub fn set_column_attributes(
        &mut self,
        index: ColumnIndex,
        attributes: ColumnAttributes,
    ) -> Result<()> {
        let column = self.columns.get_mut(index)?.payload_mut();
        column.label_spacer.width = attributes.spacer_width;
        column.attributes = attributes;
        Ok(())
    }

    // ====== Bands ======

    /// Adds a band at `altitude` with the given draw rank.
    pub fn add_band(&mut self, altitude: Altitude, rank: u32) -> Result<()> {
        let payload = Band {
            rank,
            ..Band::default()
        };
        self.bands.add_item(altitude, payload)?;
        debug!(target: targets::ENGINE, altitude, rank, "band added");
        Ok(())
    }

    /// Checks whether a band exists.
    pub fn has_band(&self, altitude: Altitude) -> bool {
        self.bands.contains(altitude)
    }

    /// Removes a band, returning its released item.
    pub fn remove_band(&mut self, altitude: Altitude) -> Result<Item<Bands>> {
        let item = self.bands.remove_item(altitude)?;
        debug!(target: targets::ENGINE, altitude, "band removed");
        Ok(item)
    }

    /// Looks up a band item.
    pub fn band(&self, altitude: Altitude) -> Result<&Item<Bands>> {
        Ok(self.bands.get(altitude)?)
    }

    /// Caches a band's peer claims and horizontal extent.
    ///
    /// Peer altitudes and endpoint points must already exist; the extent
    /// endpoints are what the band's left and right edges anchor to on the
    /// next link.
    pub fn set_band_settings(
        &mut self,
        altitude: Altitude,
        rank: u32,
        top_peer: Option<Altitude>,
        bottom_peer: Option<Altitude>,
        leftmost_point: Option<PointKey>,
        rightmost_point: Option<PointKey>,
    ) -> Result<()> {
        for peer in [top_peer, bottom_peer].into_iter().flatten() {
            if !self.bands.contains(peer) {
                return Err(RegistryError::missing(peer).into());
            }
        }
        for point in [leftmost_point, rightmost_point].into_iter().flatten() {
            if !self.points.contains(point) {
                return Err(RegistryError::missing(point).into());
            }
        }
        let band = self.bands.get_mut(altitude)?.payload_mut();
        band.rank = rank;
        band.top_peer = top_peer;
        band.bottom_peer = bottom_peer;
        band.leftmost_point = leftmost_point;
        band.rightmost_point = rightmost_point;
        Ok(())
    }

    /// Pushes a band's presentation bundle.
    pub fn set_band_attributes(
        &mut self,
        altitude: Altitude,
        attributes: BandAttributes,
    ) -> Result<()> {
        self.bands.get_mut(altitude)?.payload_mut().attributes = attributes;
        Ok(())
    }

    // ====== Connection points ======

    /// Adds a connection point.
    ///
    /// The owning column must already exist; a point with no column would
    /// have no role container to live in.
    pub fn add_point(&mut self, key: PointKey) -> Result<()> {
        if !self.columns.contains(key.column) {
            return Err(RegistryError::missing(key.column).into());
        }
        self.points.add_item(key, Point::default())?;
        debug!(target: targets::ENGINE, key = %key, "point added");
        Ok(())
    }

    /// Checks whether a point exists.
    pub fn has_point(&self, key: PointKey) -> bool {
        self.points.contains(key)
    }

    /// Removes a point, returning its released item.
    pub fn remove_point(&mut self, key: PointKey) -> Result<Item<Points>> {
        let item = self.points.remove_item(key)?;
        debug!(target: targets::ENGINE, key = %key, "point removed");
        Ok(item)
    }

    /// Looks up a point item.
    pub fn point(&self, key: PointKey) -> Result<&Item<Points>> {
        Ok(self.points.get(key)?)
    }

    /// Caches a point's peer claims and band links.
    ///
    /// Peer orders must name existing points in the same role container,
    /// and band altitudes must name existing bands; the latter drive the
    /// link indicators and their anchors on the next link.
    pub fn set_point_settings(
        &mut self,
        key: PointKey,
        left_peer: Option<u32>,
        right_peer: Option<u32>,
        pos_band: Option<Altitude>,
        neg_band: Option<Altitude>,
    ) -> Result<()> {
        for order in [left_peer, right_peer].into_iter().flatten() {
            let peer = PointKey::new(key.column, key.role, order);
            if !self.points.contains(peer) {
                return Err(RegistryError::missing(peer).into());
            }
        }
        for altitude in [pos_band, neg_band].into_iter().flatten() {
            if !self.bands.contains(altitude) {
                return Err(RegistryError::missing(altitude).into());
            }
        }
        let point = self.points.get_mut(key)?.payload_mut();
        point.left_peer = left_peer;
        point.right_peer = right_peer;
        point.pos_band = pos_band;
        point.neg_band = neg_band;
        Ok(())
    }

    /// Pushes a point's presentation bundle.
    pub fn set_point_attributes(&mut self, key: PointKey, attributes: PointAttributes) -> Result<()> {
        self.points.get_mut(key)?.payload_mut().attributes = attributes;
        Ok(())
    }

    // ====== Linking ======

    /// Rebuilds all derived structure and emits the full anchor edge set.
    ///
    /// Emits the fixed frame edges first, then links each container. The
    /// edge set is a pure function of the current items and settings, so
    /// linking twice without intervening mutation emits identical edges.
    pub fn link(&mut self, sink: &mut dyn AnchorSink) {
        use AnchorLine::*;

        sink.add_anchor(AnchorNode::ColumnRibbon, Top, AnchorNode::Frame, Top);
        sink.add_anchor(AnchorNode::ColumnRibbon, Left, AnchorNode::Frame, Left);
        sink.add_anchor(AnchorNode::BandStack, Left, AnchorNode::ColumnRibbon, Left);
        sink.add_anchor(AnchorNode::BandStack, Right, AnchorNode::ColumnRibbon, Right);

        self.columns.link(sink);
        self.bands.link(sink);
        self.points.link(sink);

        info!(
            target: targets::ENGINE,
            columns = self.columns.len(),
            bands = self.bands.len(),
            points = self.points.len(),
            "linked"
        );
    }

    /// The column container, for structure inspection.
    pub fn columns(&self) -> &SpacerContainer<Columns> {
        &self.columns
    }

    /// The band container, for structure inspection.
    pub fn bands(&self) -> &SpacerContainer<Bands> {
        &self.bands
    }

    /// The point container, for structure inspection.
    pub fn points(&self) -> &SpacerContainer<Points> {
        &self.points
    }

    /// Number of spacers a family currently carries.
    pub fn spacer_count(&self, family: FamilyKind) -> usize {
        match family {
            FamilyKind::Columns => self.columns.spacer_count(),
            FamilyKind::Bands => self.bands.spacer_count(),
            FamilyKind::Points => self.points.spacer_count(),
        }
    }

    // ====== Gestures ======

    /// Forwards a drag-enter to the addressed spacer.
    pub fn drag_enter(&mut self, handle: SpacerHandle, payload: &DragPayload) -> DragResponse {
        match handle.family {
            FamilyKind::Columns => self.columns.drag_enter(handle.index, payload),
            FamilyKind::Bands => self.bands.drag_enter(handle.index, payload),
            FamilyKind::Points => self.points.drag_enter(handle.index, payload),
        }
    }

    /// Forwards a drag-leave to the addressed spacer.
    pub fn drag_leave(&mut self, handle: SpacerHandle) {
        match handle.family {
            FamilyKind::Columns => self.columns.drag_leave(handle.index),
            FamilyKind::Bands => self.bands.drag_leave(handle.index),
            FamilyKind::Points => self.points.drag_leave(handle.index),
        }
    }

    /// Forwards a drop to the addressed spacer, handing any resulting
    /// reorder request to the adapter. Returns whether a request was
    /// emitted.
    pub fn drop_payload(
        &mut self,
        handle: SpacerHandle,
        payload: &DragPayload,
        sink: &mut dyn ReorderSink,
    ) -> bool {
        let request = match handle.family {
            FamilyKind::Columns => self.columns.drop_payload(handle.index, payload),
            FamilyKind::Bands => self.bands.drop_payload(handle.index, payload),
            FamilyKind::Points => self.points.drop_payload(handle.index, payload),
        };
        match request {
            Some(request) => {
                sink.reorder(request);
                true
            }
            None => {
                debug!(
                    target: targets::DRAG,
                    family = %handle.family,
                    index = handle.index,
                    "drop absorbed without reorder"
                );
                false
            }
        }
    }

    /// Whether the addressed spacer is highlighted by an active gesture.
    pub fn is_spacer_highlighted(&self, handle: SpacerHandle) -> bool {
        match handle.family {
            FamilyKind::Columns => self.columns.is_highlighted(handle.index),
            FamilyKind::Bands => self.bands.is_highlighted(handle.index),
            FamilyKind::Points => self.points.is_highlighted(handle.index),
        }
    }
}
