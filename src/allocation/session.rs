use crate::{
    allocation::{
        aggregate::{remaining_area, selected_area_total},
        allocator::GreedyAllocator,
        context::LeaseContext,
        error::{AllocationError, invalid_request, submission_rejected},
        guard::SnapshotAvailabilityGuard,
        payload::PayloadBuilder,
        ports::AvailabilityGuard,
        resolver::TargetResolver,
        segments::SegmentManager,
        state::AllocationState,
        types::{
            AllocationMode, AllocationPlan, AllocationSettings, LeaseItem, RateDefaults,
            SelectionAction, SelectionMode, SelectionSummary, SessionCommand, SessionEvent,
            SessionOutput, SubmissionPayload, TargetParams, UiSelection,
        },
        validation::{ValidationEngine, ValidationInput, ValidationReport},
    },
    inventory::{snapshot::AvailabilitySnapshot, types::Floor},
};

/// Planning session for one lease draft. Owns the snapshot, the lease context
/// and the selection for the currently selected floor; every derived figure is
/// recomputed from the current selection on read.
pub struct AllocationSession {
    snapshot: AvailabilitySnapshot,
    context: LeaseContext,
    settings: AllocationSettings,
    rates: RateDefaults,
    state: AllocationState,
    guard: Box<dyn AvailabilityGuard>,
}

impl AllocationSession {
    pub fn new(
        snapshot: AvailabilitySnapshot,
        context: LeaseContext,
        settings: AllocationSettings,
        rates: RateDefaults,
        guard: Box<dyn AvailabilityGuard>,
    ) -> Self {
        Self {
            snapshot,
            context,
            settings,
            rates,
            state: AllocationState::default(),
            guard,
        }
    }

    pub fn with_defaults(snapshot: AvailabilitySnapshot, context: LeaseContext) -> Self {
        Self::new(
            snapshot,
            context,
            AllocationSettings::default(),
            RateDefaults::default(),
            Box::new(SnapshotAvailabilityGuard),
        )
    }

    pub fn state(&self) -> &AllocationState {
        &self.state
    }

    pub fn snapshot(&self) -> &AvailabilitySnapshot {
        &self.snapshot
    }

    pub fn context(&self) -> &LeaseContext {
        &self.context
    }

    pub fn current_floor(&self) -> Option<&Floor> {
        let tower_id = self.state.tower_id.as_deref()?;
        let floor_id = self.state.floor_id.as_deref()?;
        self.snapshot.floor(tower_id, floor_id)
    }

    pub fn step(&mut self, command: SessionCommand) -> Result<SessionOutput, AllocationError> {
        let mut output = SessionOutput::default();

        match command {
            SessionCommand::ReplaceSnapshot { snapshot } => {
                snapshot.validate()?;
                self.snapshot = snapshot;
                self.state.reset_location();
                let snapshot_digest = self.snapshot.digest();
                tracing::info!(
                    target: "session",
                    snapshot_digest = %snapshot_digest,
                    towers = self.snapshot.towers.len(),
                    "snapshot_replaced"
                );
                output
                    .events
                    .push(SessionEvent::SnapshotReplaced { snapshot_digest });
                output.events.push(SessionEvent::SelectionCleared);
            }
            SessionCommand::SelectTower { tower_id } => {
                if self.snapshot.tower(&tower_id).is_none() {
                    return Err(invalid_request(format!("unknown tower '{}'", tower_id)));
                }
                self.state.select_tower(tower_id.clone());
                tracing::info!(target: "session", tower_id = %tower_id, "tower_selected");
                output.events.push(SessionEvent::TowerSelected { tower_id });
                output.events.push(SessionEvent::SelectionCleared);
            }
            SessionCommand::SelectFloor { floor_id } => {
                let tower_id = self
                    .state
                    .tower_id
                    .clone()
                    .ok_or_else(|| invalid_request("cannot select a floor before a tower"))?;
                self.snapshot.require_floor(&tower_id, &floor_id)?;
                self.state.select_floor(floor_id.clone());
                tracing::info!(
                    target: "session",
                    tower_id = %tower_id,
                    floor_id = %floor_id,
                    "floor_selected"
                );
                output.events.push(SessionEvent::FloorSelected { floor_id });
                output.events.push(SessionEvent::SelectionCleared);
            }
            SessionCommand::SelectManual => {
                self.require_floor()?;
                self.state.reset_mode();
                output.events.push(SessionEvent::ModeChanged {
                    selection_mode: SelectionMode::Manual,
                });
                output.events.push(SessionEvent::SelectionCleared);
            }
            SessionCommand::SelectFullFloor => {
                let plan = GreedyAllocator::fill_floor(self.require_floor()?);
                self.apply_plan(
                    SelectionMode::FullFloor,
                    TargetParams::default(),
                    plan,
                    &mut output,
                );
            }
            SessionCommand::SelectPercentFloor { percent } => {
                let params = TargetParams::for_percent(percent);
                let floor = self.require_floor()?;
                let target = TargetResolver::resolve(
                    SelectionMode::Percent,
                    floor.floor_available_area_sqft,
                    &params,
                )
                .unwrap_or(0.0);
                let plan = GreedyAllocator::allocate(floor, target);
                self.apply_plan(SelectionMode::Percent, params, plan, &mut output);
            }
            SessionCommand::SelectCustomArea { custom_area } => {
                let params = TargetParams::for_custom_area(custom_area);
                let floor = self.require_floor()?;
                let floor_available_area_sqft = floor.floor_available_area_sqft;
                let target = params.custom_area_sqft();

                if TargetResolver::custom_area_in_bounds(target, floor_available_area_sqft) {
                    let plan = GreedyAllocator::allocate(floor, target);
                    self.apply_plan(SelectionMode::CustomArea, params, plan, &mut output);
                } else {
                    self.state.mode = SelectionMode::CustomArea;
                    self.state.params = params;
                    self.state.selections.clear();
                    tracing::debug!(
                        target: "session",
                        target_area_sqft = target,
                        floor_available_area_sqft,
                        "custom_area_out_of_bounds"
                    );
                    output.events.push(SessionEvent::ModeChanged {
                        selection_mode: SelectionMode::CustomArea,
                    });
                    output.events.push(SessionEvent::SelectionCleared);
                    output.events.push(SessionEvent::AllocationSkipped {
                        target_area_sqft: target,
                        floor_available_area_sqft,
                    });
                }
            }
            SessionCommand::Edit { action } => {
                let (Some(tower_id), Some(floor_id)) =
                    (self.state.tower_id.as_deref(), self.state.floor_id.as_deref())
                else {
                    return Err(invalid_request("no floor is selected"));
                };
                let floor = self.snapshot.require_floor(tower_id, floor_id)?;
                SegmentManager::apply(&mut self.state.selections, floor, &action, &self.settings);
                tracing::debug!(
                    target: "session",
                    action = ?action,
                    selected_units = self.state.selections.len(),
                    "selection_edited"
                );
                output.events.push(SessionEvent::SelectionEdited {
                    unit_id: action.unit_id().clone(),
                });
            }
        }

        Ok(output)
    }

    pub fn select_tower(&mut self, tower_id: &str) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::SelectTower {
            tower_id: tower_id.to_string(),
        })
    }

    pub fn select_floor(&mut self, floor_id: &str) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::SelectFloor {
            floor_id: floor_id.to_string(),
        })
    }

    pub fn select_manual(&mut self) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::SelectManual)
    }

    pub fn select_full_floor(&mut self) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::SelectFullFloor)
    }

    pub fn select_percent_floor(&mut self, percent: f64) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::SelectPercentFloor { percent })
    }

    pub fn select_custom_area(
        &mut self,
        custom_area: impl Into<String>,
    ) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::SelectCustomArea {
            custom_area: custom_area.into(),
        })
    }

    pub fn toggle_unit(&mut self, unit_id: &str) -> Result<SessionOutput, AllocationError> {
        self.edit(SelectionAction::ToggleUnit {
            unit_id: unit_id.to_string(),
        })
    }

    pub fn set_unit_mode(
        &mut self,
        unit_id: &str,
        allocation_mode: AllocationMode,
    ) -> Result<SessionOutput, AllocationError> {
        self.edit(SelectionAction::SetUnitMode {
            unit_id: unit_id.to_string(),
            allocation_mode,
        })
    }

    pub fn add_segment(&mut self, unit_id: &str) -> Result<SessionOutput, AllocationError> {
        self.edit(SelectionAction::AddSegment {
            unit_id: unit_id.to_string(),
        })
    }

    pub fn update_segment(
        &mut self,
        unit_id: &str,
        index: usize,
        value: impl Into<String>,
    ) -> Result<SessionOutput, AllocationError> {
        self.edit(SelectionAction::UpdateSegment {
            unit_id: unit_id.to_string(),
            index,
            value: value.into(),
        })
    }

    pub fn remove_segment(
        &mut self,
        unit_id: &str,
        index: usize,
    ) -> Result<SessionOutput, AllocationError> {
        self.edit(SelectionAction::RemoveSegment {
            unit_id: unit_id.to_string(),
            index,
        })
    }

    pub fn edit(&mut self, action: SelectionAction) -> Result<SessionOutput, AllocationError> {
        self.step(SessionCommand::Edit { action })
    }

    pub fn target_area(&self) -> Option<f64> {
        let floor = self.current_floor()?;
        TargetResolver::resolve(
            self.state.mode,
            floor.floor_available_area_sqft,
            &self.state.params,
        )
    }

    pub fn selected_area_total(&self) -> f64 {
        self.current_floor()
            .map(|floor| selected_area_total(&self.state.selections, &floor.units))
            .unwrap_or(0.0)
    }

    pub fn remaining_area(&self) -> Option<f64> {
        remaining_area(self.target_area(), self.selected_area_total())
    }

    pub fn summary(&self) -> SelectionSummary {
        SelectionSummary {
            selection_mode: self.state.mode,
            target_area_sqft: self.target_area(),
            selected_area_sqft: self.selected_area_total(),
            remaining_area_sqft: self.remaining_area(),
            selected_unit_count: self.state.selections.len(),
        }
    }

    pub fn validation(&self) -> ValidationReport {
        let Some(floor) = self.current_floor() else {
            return ValidationReport::default();
        };

        ValidationEngine::evaluate(&ValidationInput {
            mode: self.state.mode,
            target_area_sqft: self.target_area(),
            floor_available_area_sqft: floor.floor_available_area_sqft,
            params: &self.state.params,
            selections: &self.state.selections,
            units: &floor.units,
        })
    }

    pub fn selection_invalid(&self) -> bool {
        self.validation().selection_invalid()
    }

    pub fn lease_items(&self) -> Vec<LeaseItem> {
        let rates = self.context.rate_defaults(&self.rates);
        PayloadBuilder::build_items(&self.snapshot, &self.state.selections, &rates)
    }

    /// Submission payload for the current selection, without the local gate.
    pub fn preview_submission(&self) -> SubmissionPayload {
        PayloadBuilder::build_submission(
            &self.context,
            &self.snapshot,
            self.ui_selection(),
            self.lease_items(),
        )
    }

    /// Builds the submission and discards the selection. Rejected locally when
    /// nothing leasable is selected, the selection is invalid, or the
    /// availability guard refuses the items.
    pub fn submit(&mut self) -> Result<SubmissionPayload, AllocationError> {
        self.require_floor()?;

        let payload = self.preview_submission();
        if payload.items.is_empty() {
            tracing::warn!(target: "session", "submission_rejected_empty");
            return Err(submission_rejected("no leasable units are selected"));
        }

        let report = self.validation();
        if report.selection_invalid() {
            let codes = report
                .blocking()
                .map(|issue| issue.code())
                .collect::<Vec<_>>()
                .join(", ");
            tracing::warn!(target: "session", issues = %codes, "submission_rejected_invalid");
            return Err(submission_rejected(format!(
                "selection is invalid: {codes}"
            )));
        }

        self.guard.confirm(&self.snapshot, &payload.items)?;

        tracing::info!(
            target: "session",
            lease_id = ?self.context.lease_id,
            items = payload.items.len(),
            selection_mode = ?self.state.mode,
            "submission_built"
        );
        self.state.reset_mode();
        Ok(payload)
    }

    fn ui_selection(&self) -> UiSelection {
        UiSelection {
            tower_id: self.state.tower_id.clone(),
            floor_id: self.state.floor_id.clone(),
            target_floor_area_sqft: self.target_area(),
            selection_mode: self.state.mode,
            snapshot_digest: Some(self.snapshot.digest()),
        }
    }

    fn require_floor(&self) -> Result<&Floor, AllocationError> {
        self.current_floor()
            .ok_or_else(|| invalid_request("no floor is selected"))
    }

    fn apply_plan(
        &mut self,
        mode: SelectionMode,
        params: TargetParams,
        plan: AllocationPlan,
        output: &mut SessionOutput,
    ) {
        self.state.mode = mode;
        self.state.params = params;
        self.state.selections = plan.selections;

        let target_area_sqft = self.target_area().unwrap_or(0.0);
        let selected_units = self.state.selections.len();
        tracing::debug!(
            target: "session",
            selection_mode = ?mode,
            target_area_sqft,
            remaining_area_sqft = plan.remaining_area_sqft,
            selected_units,
            "allocation_applied"
        );

        output.events.push(SessionEvent::ModeChanged {
            selection_mode: mode,
        });
        output.events.push(SessionEvent::AllocationApplied {
            target_area_sqft,
            remaining_area_sqft: plan.remaining_area_sqft,
            selected_units,
        });
    }
}
