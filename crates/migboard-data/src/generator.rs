//! Deterministic synthetic migration data.
//!
//! Every business function starts from a random baseline in its first month
//! and then follows a noisy linear trend. Trend noise is clamped so a month
//! never falls below the baseline.

use crate::table::MigrationTable;
use migboard_common::{add_months, round_to, MigboardError, MigrationRecord, Result};
use migboard_config::GeneratorConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::ops::Range;
use tracing::debug;

/// Range of the baseline workspace count.
pub const BASE_WORKSPACES: Range<u32> = 3..30;
/// Range of the baseline data volume in terabytes.
pub const BASE_VOLUME_TB: Range<f64> = 0.2..8.0;

const WORKSPACE_TREND: f64 = 0.6;
const WORKSPACE_NOISE: f64 = 1.5;
const VOLUME_TREND: f64 = 0.8;
const VOLUME_NOISE: f64 = 0.8;
const VOLUME_DECIMALS: i32 = 3;

/// Generates the synthetic table described by `settings`.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn generate(settings: &GeneratorConfig) -> Result<MigrationTable> {
    if settings.months == 0 {
        return Err(MigboardError::Config(
            "cannot generate a table with zero months".to_string(),
        ));
    }
    if settings.business_functions.is_empty() {
        return Err(MigboardError::Config(
            "cannot generate a table without business functions".to_string(),
        ));
    }

    let months = (0..settings.months)
        .map(|i| {
            add_months(settings.start_month, i).ok_or_else(|| {
                MigboardError::Config(format!(
                    "month {i} after {} is out of range",
                    settings.start_month
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut records = Vec::with_capacity(months.len() * settings.business_functions.len());

    for business_function in &settings.business_functions {
        let base_ws: u32 = rng.gen_range(BASE_WORKSPACES);
        let base_tb: f64 = rng.gen_range(BASE_VOLUME_TB);
        debug!(%business_function, base_ws, base_tb, "Drew baseline");

        for (i, &month) in months.iter().enumerate() {
            let (workspace_count, data_volume_tb) = if i == 0 {
                (base_ws, round_to(base_tb, VOLUME_DECIMALS))
            } else {
                let step = i as f64;
                let ws_delta = noise(step * WORKSPACE_TREND, WORKSPACE_NOISE)?.sample(&mut rng);
                let tb_delta = noise(step * VOLUME_TREND, VOLUME_NOISE)?.sample(&mut rng);
                (
                    base_ws.saturating_add(ws_delta.max(0.0).floor() as u32),
                    round_to(base_tb + tb_delta.max(0.0), VOLUME_DECIMALS),
                )
            };

            records.push(MigrationRecord::new(
                month,
                business_function.clone(),
                workspace_count,
                data_volume_tb,
            ));
        }
    }

    let table = MigrationTable::from_records(records);
    debug!(
        rows = table.len(),
        seed = settings.seed,
        "Generated synthetic migration table"
    );
    Ok(table)
}

fn noise(mean: f64, std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(mean, std_dev)
        .map_err(|e| MigboardError::Config(format!("invalid noise parameters: {e}")))
}
