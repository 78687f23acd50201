use std::{env, path::PathBuf};

use anyhow::{Result, anyhow};

const USAGE: &str =
    "usage: leasing-planner --snapshot <path> --request <path> [--config <path>]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerArgs {
    pub config_path: PathBuf,
    pub snapshot_path: PathBuf,
    pub request_path: PathBuf,
}

pub fn args_from_env() -> Result<PlannerArgs> {
    parse_args(env::args().skip(1))
}

pub fn parse_args(args: impl IntoIterator<Item = String>) -> Result<PlannerArgs> {
    let mut args = args.into_iter();
    let mut config_path = None;
    let mut snapshot_path = None;
    let mut request_path = None;

    while let Some(arg) = args.next() {
        let slot = match arg.as_str() {
            "--config" => &mut config_path,
            "--snapshot" => &mut snapshot_path,
            "--request" => &mut request_path,
            other => return Err(anyhow!("unknown argument: {other}. {USAGE}")),
        };
        let value = args
            .next()
            .ok_or_else(|| anyhow!("missing value for {arg}"))?;
        *slot = Some(PathBuf::from(value));
    }

    Ok(PlannerArgs {
        config_path: config_path.unwrap_or_else(|| PathBuf::from("./planner.jsonc")),
        snapshot_path: snapshot_path.ok_or_else(|| anyhow!("missing --snapshot. {USAGE}"))?,
        request_path: request_path.ok_or_else(|| anyhow!("missing --request. {USAGE}"))?,
    })
}
