use std::process::ExitCode;

use anyhow::{Context, Result};

use leasing_planner::{
    allocation::{AllocationSession, SnapshotAvailabilityGuard},
    cli::args_from_env,
    config::Config,
    inventory::AvailabilitySnapshot,
    logging::init_tracing,
    request::{PlanOutcome, PlanRequest, run_plan},
};

fn main() -> Result<ExitCode> {
    let args = args_from_env()?;
    let config = Config::load(&args.config_path)
        .with_context(|| format!("failed to load config from {}", args.config_path.display()))?;
    let _logging_guard = init_tracing(&config.logging)?;

    let snapshot = AvailabilitySnapshot::load(&args.snapshot_path)?;
    let request = PlanRequest::load(&args.request_path)?;

    let mut session = AllocationSession::new(
        snapshot,
        request.lease.clone(),
        config.allocation.clone(),
        config.rates.clone(),
        Box::new(SnapshotAvailabilityGuard),
    );
    let outcome = run_plan(&mut session, &request).context("planning request failed")?;

    let rendered =
        serde_json::to_string_pretty(&outcome).context("failed to render plan outcome")?;
    println!("{rendered}");

    if let PlanOutcome::Rejected { reason, .. } = outcome {
        tracing::warn!(target: "planner", reason = %reason, "plan_rejected");
        return Ok(ExitCode::from(2));
    }
    Ok(ExitCode::SUCCESS)
}
