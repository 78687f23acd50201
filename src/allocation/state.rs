use crate::{
    allocation::types::{SelectionMap, SelectionMode, TargetParams},
    inventory::types::{FloorId, TowerId},
};

/// Mutable planning state for a single floor. Selections never outlive the
/// floor they were made on.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AllocationState {
    pub tower_id: Option<TowerId>,
    pub floor_id: Option<FloorId>,
    pub mode: SelectionMode,
    pub params: TargetParams,
    pub selections: SelectionMap,
}

impl AllocationState {
    pub fn reset_mode(&mut self) {
        self.mode = SelectionMode::Manual;
        self.params = TargetParams::default();
        self.selections.clear();
    }

    pub fn select_tower(&mut self, tower_id: TowerId) {
        self.tower_id = Some(tower_id);
        self.floor_id = None;
        self.reset_mode();
    }

    pub fn select_floor(&mut self, floor_id: FloorId) {
        self.floor_id = Some(floor_id);
        self.reset_mode();
    }

    pub fn reset_location(&mut self) {
        self.tower_id = None;
        self.floor_id = None;
        self.reset_mode();
    }
}
