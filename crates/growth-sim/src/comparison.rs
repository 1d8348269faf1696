//! Side-by-side runs of the leveraged and unleveraged strategies.

use growth_core::{
    validate_config, validate_parameters, SimConfig, SimulationParameters, SimulationResult,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use tracing::{debug, warn};

use crate::{simulate, SimError};

/// How much sooner the leveraged strategy reaches the target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Speedup {
    /// The leveraged run is unprofitable or was aborted.
    Unavailable,
    /// Only the leveraged run reaches the target.
    Unbounded,
    /// Ratio of unleveraged to leveraged days, one decimal place.
    Factor(Decimal),
}

/// Outcome of one strategy; an aborted run does not discard the other.
pub type StrategyRun = Result<SimulationResult, SimError>;

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Comparison {
    #[serde(serialize_with = "serialize_run")]
    pub leveraged: StrategyRun,
    #[serde(serialize_with = "serialize_run")]
    pub unleveraged: StrategyRun,
    pub speedup: Speedup,
}

#[derive(Serialize)]
#[serde(untagged)]
enum RunView<'a> {
    Completed(&'a SimulationResult),
    Aborted { outcome: &'static str, error: String },
}

fn serialize_run<S: Serializer>(run: &StrategyRun, s: S) -> Result<S::Ok, S::Error> {
    match run {
        Ok(r) => RunView::Completed(r),
        Err(e) => RunView::Aborted {
            outcome: "aborted",
            error: e.to_string(),
        },
    }
    .serialize(s)
}

/// Simulate `params` with and without leverage; all other fields identical.
///
/// Invalid parameters or configuration fail the whole comparison. Errors
/// raised while running one strategy are kept in that strategy's slot.
pub fn compare(params: &SimulationParameters, config: &SimConfig) -> Result<Comparison, SimError> {
    validate_parameters(params)?;
    validate_config(config)?;
    let leveraged = simulate(&params.with_leverage_flag(true), config);
    let unleveraged = simulate(&params.with_leverage_flag(false), config);
    for (name, run) in [("leveraged", &leveraged), ("unleveraged", &unleveraged)] {
        if let Err(e) = run {
            warn!(strategy = name, error = %e, "strategy aborted");
        }
    }
    let speedup = speedup(&leveraged, &unleveraged);
    debug!(?speedup, "comparison complete");
    Ok(Comparison {
        leveraged,
        unleveraged,
        speedup,
    })
}

fn days_to_target(run: &StrategyRun) -> Option<u64> {
    run.as_ref().ok().and_then(SimulationResult::days_to_target)
}

fn speedup(leveraged: &StrategyRun, unleveraged: &StrategyRun) -> Speedup {
    match (days_to_target(leveraged), days_to_target(unleveraged)) {
        (None, _) => Speedup::Unavailable,
        (Some(_), None) => Speedup::Unbounded,
        (Some(with), Some(without)) => {
            // with >= one cycle, never zero
            let ratio = Decimal::from(without) / Decimal::from(with);
            Speedup::Factor(
                ratio.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero),
            )
        }
    }
}

/// One point of the revenue-over-time chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Days when both runs are profitable, cycle index otherwise.
    pub x: u64,
    pub with_leverage: Option<Decimal>,
    pub without_leverage: Option<Decimal>,
}

/// Chart series for a comparison.
///
/// Both profitable: a zero point, then one point per unleveraged row keyed by
/// day. Only leveraged profitable: twice as many points as leveraged rows,
/// keyed by cycle, with the unleveraged loss extrapolated linearly. Otherwise
/// (including any aborted run) empty.
pub fn chart_series(cmp: &Comparison) -> Vec<ChartPoint> {
    match (&cmp.leveraged, &cmp.unleveraged) {
        (Ok(SimulationResult::Profitable(with)), Ok(SimulationResult::Profitable(without))) => {
            let origin = ChartPoint {
                x: 0,
                with_leverage: Some(Decimal::ZERO),
                without_leverage: Some(Decimal::ZERO),
            };
            std::iter::once(origin)
                .chain(without.schedule.iter().enumerate().map(|(i, row)| ChartPoint {
                    x: row.day_offset,
                    with_leverage: with.schedule.get(i).map(|r| r.revenue),
                    without_leverage: Some(row.revenue),
                }))
                .collect()
        }
        (
            Ok(SimulationResult::Profitable(with)),
            Ok(SimulationResult::Unprofitable { loss_per_cycle }),
        ) => (0..with.len() * 2)
            .map(|i| ChartPoint {
                x: i as u64,
                with_leverage: if i == 0 {
                    Some(Decimal::ZERO)
                } else {
                    with.schedule.get(i - 1).map(|r| r.revenue)
                },
                without_leverage: loss_per_cycle.checked_mul(Decimal::from(i)),
            })
            .collect(),
        _ => Vec::new(),
    }
}
