use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::{
    allocation::{
        area::format_area,
        context::LeaseContext,
        error::{AllocationError, AllocationErrorKind},
        session::AllocationSession,
        types::{
            SelectionAction, SelectionMode, SelectionSummary, SessionCommand, SubmissionPayload,
        },
        validation::ValidationReport,
    },
    inventory::types::{FloorId, TowerId},
};

/// One planning run: where to lease, how to size it, and any manual edits
/// applied on top of the automatic allocation.
#[derive(Debug, Clone, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub lease: LeaseContext,
    pub tower_id: TowerId,
    pub floor_id: FloorId,
    #[serde(default)]
    pub selection_mode: SelectionMode,
    #[serde(default)]
    pub percent: Option<f64>,
    #[serde(default)]
    pub custom_area: Option<serde_json::Value>,
    #[serde(default)]
    pub edits: Vec<SelectionAction>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PlanOutcome {
    Submitted {
        payload: SubmissionPayload,
    },
    Rejected {
        reason: String,
        summary: SelectionSummary,
        validation: ValidationReport,
    },
}

impl PlanRequest {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read plan request {}", path.display()))?;
        json5::from_str(&content)
            .with_context(|| format!("failed to parse plan request {}", path.display()))
    }

    pub fn commands(&self) -> Vec<SessionCommand> {
        let mut commands = vec![
            SessionCommand::SelectTower {
                tower_id: self.tower_id.clone(),
            },
            SessionCommand::SelectFloor {
                floor_id: self.floor_id.clone(),
            },
        ];

        commands.push(match self.selection_mode {
            SelectionMode::Manual => SessionCommand::SelectManual,
            SelectionMode::FullFloor => SessionCommand::SelectFullFloor,
            SelectionMode::Percent => SessionCommand::SelectPercentFloor {
                percent: self.percent.unwrap_or(0.0),
            },
            SelectionMode::CustomArea => SessionCommand::SelectCustomArea {
                custom_area: self.custom_area_text(),
            },
        });

        commands.extend(
            self.edits
                .iter()
                .cloned()
                .map(|action| SessionCommand::Edit { action }),
        );
        commands
    }

    fn custom_area_text(&self) -> String {
        match &self.custom_area {
            Some(serde_json::Value::String(text)) => text.clone(),
            Some(serde_json::Value::Number(number)) => {
                number.as_f64().map(format_area).unwrap_or_default()
            }
            Some(serde_json::Value::Null) | None => String::new(),
            Some(other) => other.to_string(),
        }
    }
}

/// Drives the session through the request and attempts a submission. Local
/// rejections become [`PlanOutcome::Rejected`]; malformed requests are errors.
pub fn run_plan(
    session: &mut AllocationSession,
    request: &PlanRequest,
) -> Result<PlanOutcome, AllocationError> {
    for command in request.commands() {
        session.step(command)?;
    }

    let summary = session.summary();
    let validation = session.validation();
    match session.submit() {
        Ok(payload) => Ok(PlanOutcome::Submitted { payload }),
        Err(err)
            if matches!(
                err.kind,
                AllocationErrorKind::SubmissionRejected | AllocationErrorKind::AvailabilityConflict
            ) =>
        {
            Ok(PlanOutcome::Rejected {
                reason: err.message,
                summary,
                validation,
            })
        }
        Err(err) => Err(err),
    }
}
