use growth_core::{
    validate_config, validate_parameters, GrowthSchedule, SimConfig, SimulationParameters,
    SimulationResult, ValidationError,
};
use growth_econ::CycleModel;
use tracing::{debug, trace, warn};

use crate::SimError;

/// Run the cycle simulation for one financing strategy.
///
/// Cycles are recorded while revenue stays below `target_multiple` times the
/// first-cycle revenue; a cycle whose profit cannot cover the prorated
/// withdrawal ends the run as [`SimulationResult::Unprofitable`] without being
/// recorded. Once the target is met one more row is appended unconditionally,
/// so the schedule always ends at or past the threshold.
///
/// The function is pure: identical inputs give identical results.
pub fn simulate(
    params: &SimulationParameters,
    config: &SimConfig,
) -> Result<SimulationResult, SimError> {
    validate_parameters(params)?;
    validate_config(config)?;
    let model = CycleModel::new(params)?;
    let withdrawal = model.withdrawal_per_cycle();
    let limit = u64::from(config.max_cycles);

    let mut capital = params.initial_capital;
    let initial_revenue = model.revenue(capital)?;
    if initial_revenue.is_zero() {
        return Err(ValidationError::ZeroInitialRevenue.into());
    }
    debug!(
        with_leverage = params.with_leverage,
        %initial_revenue,
        %withdrawal,
        target = %params.target_multiple,
        "simulation started"
    );

    let mut schedule = Vec::new();
    let mut cycles: u64 = 0;
    while model.growth_ratio(capital, initial_revenue)? < params.target_multiple {
        if model.profit(capital)? <= withdrawal {
            let loss_per_cycle = model.net_cash_flow(capital)?;
            debug!(cycles, %loss_per_cycle, "profit does not cover withdrawals");
            return Ok(SimulationResult::Unprofitable { loss_per_cycle });
        }
        // The closing row must still fit under the limit.
        if cycles + 1 >= limit {
            warn!(limit = config.max_cycles, %capital, "cycle limit reached");
            return Err(SimError::CycleLimitExceeded {
                limit: config.max_cycles,
            });
        }
        cycles += 1;
        let record = model.record(cycles, capital)?;
        trace!(
            day = record.day_offset,
            capital = %record.capital,
            revenue = %record.revenue,
            "cycle"
        );
        capital = record.new_capital;
        schedule.push(record);
    }

    cycles += 1;
    let closing = model.record(cycles, capital)?;
    trace!(
        day = closing.day_offset,
        capital = %closing.capital,
        revenue = %closing.revenue,
        "closing cycle"
    );
    schedule.push(closing);

    let days_to_target = u64::from(params.cash_conversion_cycle) * cycles;
    debug!(cycles, days_to_target, "target reached");
    Ok(SimulationResult::Profitable(GrowthSchedule {
        schedule,
        initial_revenue,
        days_to_target,
    }))
}
