//! Ordered items separated by regenerated spacers.
//!
//! [`SpacerContainer`] is the structural core shared by all three entity
//! families. It owns the family's items in an [`EntityRegistry`] and a flat
//! vector of [`Spacer`]s, and on every [`link`](SpacerContainer::link) call
//! it rebuilds both the neighbor pointers and the spacer set from the sorted
//! key order alone. Nothing between links is trusted: a batch of adds and
//! removes leaves the container in a "structurally dirty" state that the
//! next link fully repairs.
//!
//! The family-specific parts — key decoding, drop acceptance, and the
//! anchor edges each item and spacer contributes — live behind the
//! [`Family`] trait, implemented once per entity family in
//! [`crate::families`].

use std::fmt;

use tracing::{debug, trace};

use strata_core::{EntityId, EntityRegistry, Result as RegistryResult, logging::targets};

use crate::drag::{
    DragError, DragPayload, DragResponse, GestureEvent, ReorderRequest, SpacerDragState,
    transition,
};
use crate::geometry::{AnchorNode, AnchorSink, FamilyKind, SpacerHandle};

// ====== Family Trait ======

/// The per-family policy plugged into [`SpacerContainer`].
///
/// A family is a zero-sized marker type; all state lives in its
/// [`Payload`](Family::Payload) carried by each [`Item`].
pub trait Family: Sized {
    /// Which of the three entity families this is.
    const KIND: FamilyKind;
    /// The payload tag this family's spacers decode.
    const MIME_TAG: &'static str;

    /// The family's ordering key.
    type Key: Copy + Ord + fmt::Debug + 'static;
    /// Per-item family state (attributes, peer caches, sub-entities).
    type Payload;

    /// Whether two consecutive keys belong to the same adjacency chain.
    ///
    /// Families whose key space is a single chain keep the default;
    /// multi-chain families split spacers and neighbor pointers wherever
    /// this returns false for consecutive sorted keys.
    fn same_chain(_a: &Self::Key, _b: &Self::Key) -> bool {
        true
    }

    /// Extracts this family's key from a gesture payload.
    fn decode_payload(payload: &DragPayload) -> std::result::Result<Self::Key, DragError>;

    /// Family-specific drop acceptance, beyond the generic no-op check.
    fn accepts_drop(
        moved: Self::Key,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
    ) -> bool;

    /// Packages an accepted drop as a request for the topology adapter.
    fn reorder_request(
        moved: Self::Key,
        lower: Option<Self::Key>,
        upper: Option<Self::Key>,
    ) -> ReorderRequest;

    /// Emits the anchor edges internal to one item.
    fn link_item(item: &mut Item<Self>, sink: &mut dyn AnchorSink);

    /// Emits the anchor edges tying one spacer to its flanking items, or to
    /// the family's frame edges where a flank is absent.
    fn link_spacer(
        node: AnchorNode,
        lower: Option<&Item<Self>>,
        upper: Option<&Item<Self>>,
        sink: &mut dyn AnchorSink,
    );

    /// Releases payload resources when the item leaves the container.
    fn release(_payload: &mut Self::Payload) {}
}

// ====== Items and Spacers ======

/// One entity in a container: its key, its family payload, and the neighbor
/// pointers derived by the last link.
pub struct Item<F: Family> {
    key: F::Key,
    payload: F::Payload,
    /// Neighbor toward smaller keys, if any.
    neighbor_below: Option<EntityId>,
    /// Neighbor toward larger keys, if any.
    neighbor_above: Option<EntityId>,
}

impl<F: Family> Item<F> {
    fn new(key: F::Key, payload: F::Payload) -> Self {
        Self {
            key,
            payload,
            neighbor_below: None,
            neighbor_above: None,
        }
    }

    /// The item's ordering key.
    pub fn key(&self) -> F::Key {
        self.key
    }

    /// The family payload.
    pub fn payload(&self) -> &F::Payload {
        &self.payload
    }

    /// The family payload, mutably.
    pub fn payload_mut(&mut self) -> &mut F::Payload {
        &mut self.payload
    }

    /// Neighbor id toward smaller keys, as of the last link.
    pub fn neighbor_below(&self) -> Option<EntityId> {
        self.neighbor_below
    }

    /// Neighbor id toward larger keys, as of the last link.
    pub fn neighbor_above(&self) -> Option<EntityId> {
        self.neighbor_above
    }

    /// Whether the item participates in layout. Always true today; kept so
    /// adapters written against the legacy surface keep compiling.
    pub fn is_used(&self) -> bool {
        true
    }

    fn release(&mut self) {
        self.neighbor_below = None;
        self.neighbor_above = None;
        F::release(&mut self.payload);
    }
}

impl<F: Family> fmt::Debug for Item<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item")
            .field("key", &self.key)
            .field("neighbor_below", &self.neighbor_below)
            .field("neighbor_above", &self.neighbor_above)
            .finish_non_exhaustive()
    }
}

/// One gap between consecutive items (or between a chain end and the frame).
///
/// Spacers are regenerated wholesale on every link, so they carry no key;
/// they are addressed by index through [`SpacerHandle`].
#[derive(Debug)]
pub struct Spacer {
    neighbor_below: Option<EntityId>,
    neighbor_above: Option<EntityId>,
    state: SpacerDragState,
}

impl Spacer {
    fn new(neighbor_below: Option<EntityId>, neighbor_above: Option<EntityId>) -> Self {
        Self {
            neighbor_below,
            neighbor_above,
            state: SpacerDragState::Idle,
        }
    }
}

// ====== Container ======

/// An ordered family of items with derived spacers between them.
pub struct SpacerContainer<F: Family> {
    registry: EntityRegistry<F::Key, Item<F>>,
    spacers: Vec<Spacer>,
}

impl<F: Family> Default for SpacerContainer<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Family> SpacerContainer<F> {
    /// Creates an empty container.
    pub fn new() -> Self {
        Self {
            registry: EntityRegistry::new(),
            spacers: Vec::new(),
        }
    }

    /// Inserts a new item. Spacers and neighbors stay stale until the next
    /// [`link`](Self::link).
    pub fn add_item(&mut self, key: F::Key, payload: F::Payload) -> RegistryResult<EntityId> {
        let id = self.registry.insert(key, Item::new(key, payload))?;
        trace!(target: targets::CONTAINER, family = %F::KIND, key = ?key, "item added");
        Ok(id)
    }

    /// Removes an item, releasing its payload first.
    ///
    /// The item's slot id is invalidated by the removal, so any neighbor
    /// pointer still naming it resolves to `None` until the next link
    /// repairs the chain.
    pub fn remove_item(&mut self, key: F::Key) -> RegistryResult<Item<F>> {
        let mut item = self.registry.remove(key)?;
        item.release();
        trace!(target: targets::CONTAINER, family = %F::KIND, key = ?key, "item removed");
        Ok(item)
    }

    /// Checks key presence.
    pub fn contains(&self, key: F::Key) -> bool {
        self.registry.contains(key)
    }

    /// Looks up an item by key.
    pub fn get(&self, key: F::Key) -> RegistryResult<&Item<F>> {
        self.registry.get(key)
    }

    /// Looks up an item by key, mutably.
    pub fn get_mut(&mut self, key: F::Key) -> RegistryResult<&mut Item<F>> {
        self.registry.get_mut(key)
    }

    /// Resolves a key to its slot id.
    pub fn id_of(&self, key: F::Key) -> RegistryResult<EntityId> {
        self.registry.id_of(key)
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    /// Returns true if no items are present.
    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// Number of spacers as of the last link.
    pub fn spacer_count(&self) -> usize {
        self.spacers.len()
    }

    /// Item keys in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = F::Key> + '_ {
        self.registry.keys()
    }

    /// The flanking keys of each spacer, in spacer-index order. `None`
    /// marks a chain boundary.
    pub fn spacer_flanks(&self) -> impl Iterator<Item = (Option<F::Key>, Option<F::Key>)> + '_ {
        self.spacers.iter().map(|s| {
            let below = s
                .neighbor_below
                .and_then(|id| self.registry.by_id(id))
                .map(Item::key);
            let above = s
                .neighbor_above
                .and_then(|id| self.registry.by_id(id))
                .map(Item::key);
            (below, above)
        })
    }

    /// Whether the spacer at `index` is highlighted by an active gesture.
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.spacers
            .get(index)
            .is_some_and(|s| s.state == SpacerDragState::Highlighted)
    }

    // ====== Linking ======

    /// Rebuilds neighbor pointers and spacers from sorted key order, then
    /// emits every item and spacer anchor edge into `sink`.
    ///
    /// Idempotent: linking twice without intervening mutation derives the
    /// same structure and the same edge set.
    pub fn link(&mut self, sink: &mut dyn AnchorSink) {
        self.spacers.clear();

        // Chains of slot ids, split where consecutive keys diverge.
        let mut chains: Vec<Vec<EntityId>> = Vec::new();
        let mut prev_key: Option<F::Key> = None;
        for (key, id) in self.registry.ids_ordered() {
            let new_chain = match prev_key {
                Some(prev) => !F::same_chain(&prev, &key),
                None => true,
            };
            if new_chain {
                chains.push(Vec::new());
            }
            if let Some(chain) = chains.last_mut() {
                chain.push(id);
            }
            prev_key = Some(key);
        }

        for chain in &chains {
            for (pos, &id) in chain.iter().enumerate() {
                let below = pos.checked_sub(1).map(|p| chain[p]);
                let above = chain.get(pos + 1).copied();
                if let Some(item) = self.registry.by_id_mut(id) {
                    item.neighbor_below = below;
                    item.neighbor_above = above;
                }
            }
            // One spacer per gap, plus one at each open chain end.
            self.spacers.push(Spacer::new(None, chain.first().copied()));
            for pair in chain.windows(2) {
                self.spacers.push(Spacer::new(Some(pair[0]), Some(pair[1])));
            }
            self.spacers.push(Spacer::new(chain.last().copied(), None));
        }

        debug!(
            target: targets::CONTAINER,
            family = %F::KIND,
            items = self.registry.len(),
            spacers = self.spacers.len(),
            "linked"
        );

        let ids: Vec<EntityId> = self.registry.ids_ordered().map(|(_, id)| id).collect();
        for id in ids {
            if let Some(item) = self.registry.by_id_mut(id) {
                F::link_item(item, sink);
            }
        }

        for (index, spacer) in self.spacers.iter().enumerate() {
            let node = AnchorNode::Spacer(SpacerHandle {
                family: F::KIND,
                index,
            });
            let below = spacer.neighbor_below.and_then(|id| self.registry.by_id(id));
            let above = spacer.neighbor_above.and_then(|id| self.registry.by_id(id));
            F::link_spacer(node, below, above, sink);
        }
    }

    // ====== Gestures ======

    /// Handles a payload entering the spacer at `index`.
    ///
    /// Unknown indices, undecodable payloads, and no-op drops (the moved
    /// key already flanks the spacer) are all absorbed as `Rejected`.
    pub fn drag_enter(&mut self, index: usize, payload: &DragPayload) -> DragResponse {
        let accepted = self.evaluate_drop(index, payload);
        let Some(spacer) = self.spacers.get_mut(index) else {
            return DragResponse::Rejected;
        };
        let t = transition(spacer.state, GestureEvent::Enter, accepted);
        spacer.state = t.state;
        if accepted {
            DragResponse::Accepted
        } else {
            DragResponse::Rejected
        }
    }

    /// Handles the pointer leaving the spacer at `index`. Idempotent.
    pub fn drag_leave(&mut self, index: usize) {
        if let Some(spacer) = self.spacers.get_mut(index) {
            let t = transition(spacer.state, GestureEvent::Leave, false);
            spacer.state = t.state;
        }
    }

    /// Handles a payload released over the spacer at `index`.
    ///
    /// Returns the reorder request if the spacer was highlighted; a drop on
    /// an idle spacer is absorbed.
    pub fn drop_payload(&mut self, index: usize, payload: &DragPayload) -> Option<ReorderRequest> {
        let Some(spacer) = self.spacers.get(index) else {
            return None;
        };
        let t = transition(spacer.state, GestureEvent::Drop, false);
        let (below_id, above_id) = (spacer.neighbor_below, spacer.neighbor_above);
        if let Some(spacer) = self.spacers.get_mut(index) {
            spacer.state = t.state;
        }
        if !t.emit {
            trace!(target: targets::DRAG, family = %F::KIND, index, "drop on idle spacer absorbed");
            return None;
        }
        // Highlighted implies the payload decoded on enter, but the drop
        // payload is decoded afresh rather than trusted.
        let moved = match F::decode_payload(payload) {
            Ok(moved) => moved,
            Err(err) => {
                debug!(target: targets::DRAG, family = %F::KIND, index, %err, "drop payload rejected");
                return None;
            }
        };
        let below = below_id.and_then(|id| self.registry.by_id(id)).map(Item::key);
        let above = above_id.and_then(|id| self.registry.by_id(id)).map(Item::key);
        debug!(
            target: targets::DRAG,
            family = %F::KIND,
            index,
            moved = ?moved,
            lower = ?below,
            upper = ?above,
            "reorder requested"
        );
        Some(F::reorder_request(moved, below, above))
    }

    /// The drop-accept predicate for one spacer and payload: decode, reject
    /// no-ops against the flanks, then ask the family.
    fn evaluate_drop(&self, index: usize, payload: &DragPayload) -> bool {
        let Some(spacer) = self.spacers.get(index) else {
            return false;
        };
        let moved = match F::decode_payload(payload) {
            Ok(moved) => moved,
            Err(err) => {
                trace!(target: targets::DRAG, family = %F::KIND, index, %err, "payload rejected");
                return false;
            }
        };
        let below = spacer.neighbor_below.and_then(|id| self.registry.by_id(id));
        let above = spacer.neighbor_above.and_then(|id| self.registry.by_id(id));
        // Dropping an item next to itself changes nothing.
        if below.is_some_and(|i| i.key() == moved) || above.is_some_and(|i| i.key() == moved) {
            return false;
        }
        F::accepts_drop(moved, below, above)
    }
}

impl<F: Family> fmt::Debug for SpacerContainer<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpacerContainer")
            .field("family", &F::KIND)
            .field("items", &self.registry.len())
            .field("spacers", &self.spacers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drag::mime;
    use crate::geometry::{AnchorLine, AnchorLog};

    /// Minimal single-chain family for exercising the container itself.
    struct Rungs;

    impl Family for Rungs {
        const KIND: FamilyKind = FamilyKind::Columns;
        const MIME_TAG: &'static str = mime::COLUMN;

        type Key = u32;
        type Payload = ();

        fn decode_payload(payload: &DragPayload) -> Result<u32, DragError> {
            payload.decode_key(Self::MIME_TAG)
        }

        fn accepts_drop(_moved: u32, _lower: Option<&Item<Self>>, _upper: Option<&Item<Self>>) -> bool {
            true
        }

        fn reorder_request(moved: u32, lower: Option<u32>, upper: Option<u32>) -> ReorderRequest {
            ReorderRequest::Columns { moved, lower, upper }
        }

        fn link_item(item: &mut Item<Self>, sink: &mut dyn AnchorSink) {
            let node = AnchorNode::Column(item.key());
            sink.add_anchor(node, AnchorLine::Top, node, AnchorLine::Top);
        }

        fn link_spacer(
            _node: AnchorNode,
            _lower: Option<&Item<Self>>,
            _upper: Option<&Item<Self>>,
            _sink: &mut dyn AnchorSink,
        ) {
        }
    }

    fn payload_for(key: u32) -> DragPayload {
        let mut payload = DragPayload::new();
        payload.set_key(mime::COLUMN, &key);
        payload
    }

    fn linked(keys: &[u32]) -> SpacerContainer<Rungs> {
        let mut container = SpacerContainer::<Rungs>::new();
        for &key in keys {
            container.add_item(key, ()).unwrap();
        }
        container.link(&mut AnchorLog::new());
        container
    }

    #[test]
    fn empty_container_links_to_nothing() {
        let container = linked(&[]);
        assert_eq!(container.spacer_count(), 0);
    }

    #[test]
    fn spacers_flank_every_item() {
        let container = linked(&[0, 1, 2]);
        assert!(container.get(0).unwrap().is_used());
        let flanks: Vec<_> = container.spacer_flanks().collect();
        assert_eq!(
            flanks,
            vec![
                (None, Some(0)),
                (Some(0), Some(1)),
                (Some(1), Some(2)),
                (Some(2), None),
            ]
        );
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let a = linked(&[2, 0, 1]);
        let b = linked(&[0, 1, 2]);
        let fa: Vec<_> = a.spacer_flanks().collect();
        let fb: Vec<_> = b.spacer_flanks().collect();
        assert_eq!(fa, fb);
    }

    #[test]
    fn removal_heals_across_the_gap() {
        let mut container = linked(&[0, 1, 2]);
        container.remove_item(1).unwrap();
        container.link(&mut AnchorLog::new());

        let flanks: Vec<_> = container.spacer_flanks().collect();
        assert_eq!(flanks, vec![(None, Some(0)), (Some(0), Some(2)), (Some(2), None)]);
    }

    #[test]
    fn stale_neighbor_ids_resolve_to_none() {
        let mut container = linked(&[0, 1]);
        // Remove without relinking: spacer 1 still names the old slot.
        container.remove_item(1).unwrap();
        let flanks: Vec<_> = container.spacer_flanks().collect();
        assert_eq!(flanks[1], (Some(0), None));
    }

    #[test]
    fn relink_is_idempotent() {
        let mut container = linked(&[3, 7]);
        let mut first = AnchorLog::new();
        container.link(&mut first);
        let mut second = AnchorLog::new();
        container.link(&mut second);
        assert_eq!(first.edges(), second.edges());
        assert_eq!(container.spacer_count(), 3);
    }

    #[test]
    fn drop_emits_flanking_keys() {
        let mut container = linked(&[0, 1, 2]);
        let payload = payload_for(0);
        assert_eq!(container.drag_enter(2, &payload), DragResponse::Accepted);
        assert!(container.is_highlighted(2));

        let request = container.drop_payload(2, &payload).unwrap();
        assert_eq!(
            request,
            ReorderRequest::Columns {
                moved: 0,
                lower: Some(1),
                upper: Some(2),
            }
        );
        assert!(!container.is_highlighted(2));
    }

    #[test]
    fn drop_next_to_self_is_rejected() {
        let mut container = linked(&[0, 1, 2]);
        let payload = payload_for(1);
        // Spacer 1 sits between 0 and 1; spacer 2 between 1 and 2.
        assert_eq!(container.drag_enter(1, &payload), DragResponse::Rejected);
        assert_eq!(container.drag_enter(2, &payload), DragResponse::Rejected);
        assert_eq!(container.drop_payload(1, &payload), None);
    }

    #[test]
    fn foreign_payload_is_rejected() {
        let mut container = linked(&[0, 1]);
        let mut payload = DragPayload::new();
        payload.set_key(mime::BAND, &-1i32);
        assert_eq!(container.drag_enter(0, &payload), DragResponse::Rejected);
    }

    #[test]
    fn leave_clears_highlight_and_is_idempotent() {
        let mut container = linked(&[0, 1]);
        let payload = payload_for(1);
        container.drag_enter(0, &payload);
        assert!(container.is_highlighted(0));
        container.drag_leave(0);
        container.drag_leave(0);
        assert!(!container.is_highlighted(0));
        assert_eq!(container.drop_payload(0, &payload), None);
    }

    #[test]
    fn unknown_spacer_index_is_absorbed() {
        let mut container = linked(&[0]);
        let payload = payload_for(0);
        assert_eq!(container.drag_enter(9, &payload), DragResponse::Rejected);
        container.drag_leave(9);
        assert_eq!(container.drop_payload(9, &payload), None);
    }
}
