//! Per-ground instance bookkeeping driven by tile events.

use std::collections::BTreeMap;

use groundwork_core::{GridCoord, GroundType};
use groundwork_world::{GridEngine, TileObserver};

/// Ordered instance lists keyed by ground type.
///
/// The position of a cell within its list is the instance index a renderer
/// would use for the matching instanced mesh. Removing an instance shifts the
/// later ones down by one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstanceLedger {
    instances: BTreeMap<GroundType, Vec<GridCoord>>,
    missing_removals: usize,
}

impl InstanceLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Instances currently tracked for `ground`, in creation order.
    #[must_use]
    pub fn instances(&self, ground: GroundType) -> &[GridCoord] {
        self.instances
            .get(&ground)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Instance index of `cell` within the list for `ground`.
    #[must_use]
    pub fn index_of(&self, ground: GroundType, cell: GridCoord) -> Option<usize> {
        self.instances(ground)
            .iter()
            .position(|instance| *instance == cell)
    }

    /// Total number of tracked instances.
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.values().map(Vec::len).sum()
    }

    /// Reports whether no instance is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of removal notifications that referred to an unknown instance.
    #[must_use]
    pub const fn missing_removals(&self) -> usize {
        self.missing_removals
    }

    /// Discards every instance and rebuilds the lists from the engine's
    /// occupied cells in row-major order.
    pub fn rebuild(&mut self, engine: &GridEngine) {
        self.instances.clear();
        self.missing_removals = 0;
        for (cell, ground) in engine.grid().occupied() {
            self.instances.entry(ground).or_default().push(cell);
        }
    }

    fn add(&mut self, cell: GridCoord, ground: GroundType) -> usize {
        let list = self.instances.entry(ground).or_default();
        list.push(cell);
        list.len() - 1
    }

    fn discard(&mut self, cell: GridCoord, ground: GroundType) {
        let position = self
            .instances
            .get(&ground)
            .and_then(|list| list.iter().position(|instance| *instance == cell));
        match (position, self.instances.get_mut(&ground)) {
            (Some(index), Some(list)) => {
                let _ = list.remove(index);
            }
            _ => {
                self.missing_removals += 1;
                tracing::warn!(%cell, %ground, "removal for untracked instance");
            }
        }
    }
}

impl TileObserver for InstanceLedger {
    fn on_tile_placed(&mut self, cell: GridCoord, ground: GroundType) {
        let index = self.add(cell, ground);
        tracing::trace!(%cell, %ground, index, "instance added");
    }

    fn on_tile_removed(&mut self, cell: GridCoord, previous: GroundType) {
        self.discard(cell, previous);
    }

    fn on_tile_changed(&mut self, cell: GridCoord, previous: GroundType, current: GroundType) {
        self.discard(cell, previous);
        let _ = self.add(cell, current);
    }
}
