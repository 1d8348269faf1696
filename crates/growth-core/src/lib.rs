#![deny(warnings)]

//! Core domain models and invariants for the growth calculator.
//!
//! This crate defines the serializable inputs and outputs of a cycle
//! simulation together with boundary validation of the parameter domains.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Inputs of one simulation run. All values are immutable for the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Whether debt financing is applied this run.
    pub with_leverage: bool,
    /// Starting equity (> 0).
    pub initial_capital: Decimal,
    /// Revenue multiple to reach relative to cycle-1 revenue (>= 1).
    pub target_multiple: Decimal,
    /// Fraction of the investment financed by debt, in [0, 1).
    pub debt_percentage: Decimal,
    /// Fraction of revenue retained as profit before fees, in [0, 1].
    pub profit_margin: Decimal,
    /// Revenue generated per unit of capital invested (> 0).
    pub sales_to_purchase_price_ratio: Decimal,
    /// Cost of debt charged on the debt amount each cycle (>= 0).
    pub fee_rate: Decimal,
    /// Cash withdrawn from the business per month (>= 0).
    pub withdrawals_per_month: Decimal,
    /// Duration of one operating cycle in days (> 0).
    pub cash_conversion_cycle: u32,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            with_leverage: true,
            initial_capital: Decimal::new(10_000, 0),
            target_multiple: Decimal::new(10, 0),
            debt_percentage: Decimal::new(75, 2),
            profit_margin: Decimal::new(2, 1),
            sales_to_purchase_price_ratio: Decimal::new(3, 0),
            fee_rate: Decimal::new(5, 2),
            withdrawals_per_month: Decimal::new(1_000, 0),
            cash_conversion_cycle: 150,
        }
    }
}

impl SimulationParameters {
    /// Same parameters with the leverage flag replaced.
    pub fn with_leverage_flag(&self, with_leverage: bool) -> Self {
        Self {
            with_leverage,
            ..self.clone()
        }
    }
}

/// One row of the growth schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleRecord {
    /// Cumulative days at the end of this cycle.
    pub day_offset: u64,
    /// Equity at the start of the cycle.
    pub capital: Decimal,
    pub debt: Decimal,
    pub revenue: Decimal,
    /// Profit after fees, before withdrawals.
    pub profit: Decimal,
    pub fee_amount: Decimal,
    /// Equity carried into the next cycle.
    pub new_capital: Decimal,
}

/// Schedule of a run that reached its target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthSchedule {
    /// Ordered rows; never empty.
    pub schedule: Vec<CycleRecord>,
    /// Revenue of the first cycle, the reference for the target multiple.
    pub initial_revenue: Decimal,
    pub days_to_target: u64,
}

impl GrowthSchedule {
    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    /// Last recorded row, at or past the target threshold.
    pub fn last(&self) -> Option<&CycleRecord> {
        self.schedule.last()
    }
}

/// Outcome of a simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SimulationResult {
    /// Profit cannot cover withdrawals; `loss_per_cycle` is <= 0.
    Unprofitable { loss_per_cycle: Decimal },
    /// Target reached.
    Profitable(GrowthSchedule),
}

impl SimulationResult {
    pub fn is_profitable(&self) -> bool {
        matches!(self, SimulationResult::Profitable(_))
    }

    pub fn schedule(&self) -> Option<&GrowthSchedule> {
        match self {
            SimulationResult::Profitable(s) => Some(s),
            SimulationResult::Unprofitable { .. } => None,
        }
    }

    pub fn days_to_target(&self) -> Option<u64> {
        self.schedule().map(|s| s.days_to_target)
    }

    pub fn loss_per_cycle(&self) -> Option<Decimal> {
        match self {
            SimulationResult::Unprofitable { loss_per_cycle } => Some(*loss_per_cycle),
            SimulationResult::Profitable(_) => None,
        }
    }
}

/// Simulation run configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Maximum number of schedule rows before the run is aborted.
    pub max_cycles: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { max_cycles: 10_000 }
    }
}

/// Validation errors for parameter domains.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Initial capital must be strictly positive.
    #[error("initial capital must be > 0, got {0}")]
    NonPositiveCapital(Decimal),
    #[error("target multiple must be >= 1, got {0}")]
    TargetBelowOne(Decimal),
    #[error("debt percentage must be within [0,1), got {0}")]
    DebtShareOutOfRange(Decimal),
    #[error("profit margin must be within [0,1], got {0}")]
    MarginOutOfRange(Decimal),
    #[error("sales to purchase price ratio must be > 0, got {0}")]
    NonPositiveSalesRatio(Decimal),
    #[error("fee rate must be >= 0, got {0}")]
    NegativeFee(Decimal),
    #[error("withdrawals per month must be >= 0, got {0}")]
    NegativeWithdrawals(Decimal),
    #[error("cash conversion cycle must be at least one day")]
    ZeroCycleLength,
    /// Growth ratio is undefined without first-cycle revenue.
    #[error("initial revenue is zero; growth ratio is undefined")]
    ZeroInitialRevenue,
    #[error("cycle limit must be at least 1")]
    ZeroCycleLimit,
}

/// Validate simulation parameters against their domains.
pub fn validate_parameters(p: &SimulationParameters) -> Result<(), ValidationError> {
    if p.initial_capital <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveCapital(p.initial_capital));
    }
    if p.target_multiple < Decimal::ONE {
        return Err(ValidationError::TargetBelowOne(p.target_multiple));
    }
    if p.debt_percentage < Decimal::ZERO || p.debt_percentage >= Decimal::ONE {
        return Err(ValidationError::DebtShareOutOfRange(p.debt_percentage));
    }
    if p.profit_margin < Decimal::ZERO || p.profit_margin > Decimal::ONE {
        return Err(ValidationError::MarginOutOfRange(p.profit_margin));
    }
    if p.sales_to_purchase_price_ratio <= Decimal::ZERO {
        return Err(ValidationError::NonPositiveSalesRatio(
            p.sales_to_purchase_price_ratio,
        ));
    }
    if p.fee_rate < Decimal::ZERO {
        return Err(ValidationError::NegativeFee(p.fee_rate));
    }
    if p.withdrawals_per_month < Decimal::ZERO {
        return Err(ValidationError::NegativeWithdrawals(p.withdrawals_per_month));
    }
    if p.cash_conversion_cycle == 0 {
        return Err(ValidationError::ZeroCycleLength);
    }
    Ok(())
}

/// Validate run configuration.
pub fn validate_config(cfg: &SimConfig) -> Result<(), ValidationError> {
    if cfg.max_cycles == 0 {
        return Err(ValidationError::ZeroCycleLimit);
    }
    Ok(())
}
