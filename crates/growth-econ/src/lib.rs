#![deny(warnings)]

//! Per-cycle financial model for the purchase-and-resell cycle.
//!
//! Every quantity of a cycle is a function of the equity at its start:
//! - debt raised against that equity (zero without leverage)
//! - revenue from reinvesting equity plus debt
//! - profit after the fee on debt
//! - equity carried into the next cycle after withdrawals
//!
//! All arithmetic is checked; results outside the `Decimal` range are errors.

use growth_core::{CycleRecord, SimulationParameters};
use rust_decimal::Decimal;
use thiserror::Error;

/// Days a monthly withdrawal rate is spread over.
pub const DAYS_PER_MONTH: u32 = 30;

/// Errors produced by the financial model.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EconError {
    #[error("decimal overflow while computing {0}")]
    Overflow(&'static str),
    #[error("division by zero while computing {0}")]
    DivisionByZero(&'static str),
}

fn mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, EconError> {
    a.checked_mul(b).ok_or(EconError::Overflow(what))
}

fn add(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, EconError> {
    a.checked_add(b).ok_or(EconError::Overflow(what))
}

fn sub(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, EconError> {
    a.checked_sub(b).ok_or(EconError::Overflow(what))
}

fn div(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, EconError> {
    if b.is_zero() {
        return Err(EconError::DivisionByZero(what));
    }
    a.checked_div(b).ok_or(EconError::Overflow(what))
}

/// Cycle formulas bound to one set of parameters.
///
/// Leverage on/off is a flag on the model, not a separate code path: with
/// `with_leverage = false` debt and fee are zero whatever the debt share and
/// fee rate are.
#[derive(Clone, Debug)]
pub struct CycleModel {
    with_leverage: bool,
    leverage_factor: Decimal,
    profit_margin: Decimal,
    sales_ratio: Decimal,
    fee_rate: Decimal,
    withdrawal_per_cycle: Decimal,
    cycle_days: u32,
}

impl CycleModel {
    /// Build the model, precomputing the constants of the run.
    ///
    /// Requires `debt_percentage != 1`; other domains are the caller's concern.
    pub fn new(p: &SimulationParameters) -> Result<Self, EconError> {
        let leverage_factor = if p.with_leverage {
            div(
                Decimal::ONE,
                sub(Decimal::ONE, p.debt_percentage, "leverage factor")?,
                "leverage factor",
            )?
        } else {
            Decimal::ONE
        };
        let withdrawal_per_cycle = div(
            mul(
                p.withdrawals_per_month,
                Decimal::from(p.cash_conversion_cycle),
                "withdrawal per cycle",
            )?,
            Decimal::from(DAYS_PER_MONTH),
            "withdrawal per cycle",
        )?;
        Ok(Self {
            with_leverage: p.with_leverage,
            leverage_factor,
            profit_margin: p.profit_margin,
            sales_ratio: p.sales_to_purchase_price_ratio,
            fee_rate: p.fee_rate,
            withdrawal_per_cycle,
            cycle_days: p.cash_conversion_cycle,
        })
    }

    /// `1 / (1 - debt_percentage)`, or 1 without leverage.
    pub fn leverage_factor(&self) -> Decimal {
        self.leverage_factor
    }

    /// Monthly withdrawals prorated onto one cycle.
    pub fn withdrawal_per_cycle(&self) -> Decimal {
        self.withdrawal_per_cycle
    }

    pub fn cycle_days(&self) -> u32 {
        self.cycle_days
    }

    pub fn debt(&self, capital: Decimal) -> Result<Decimal, EconError> {
        if !self.with_leverage {
            return Ok(Decimal::ZERO);
        }
        mul(self.leverage_factor - Decimal::ONE, capital, "debt")
    }

    pub fn investment(&self, capital: Decimal) -> Result<Decimal, EconError> {
        add(capital, self.debt(capital)?, "investment")
    }

    pub fn fee_amount(&self, capital: Decimal) -> Result<Decimal, EconError> {
        mul(self.fee_rate, self.debt(capital)?, "fee")
    }

    pub fn revenue(&self, capital: Decimal) -> Result<Decimal, EconError> {
        mul(self.sales_ratio, self.investment(capital)?, "revenue")
    }

    /// Margin on revenue minus the fee on debt, before withdrawals.
    pub fn profit(&self, capital: Decimal) -> Result<Decimal, EconError> {
        sub(
            mul(self.profit_margin, self.revenue(capital)?, "profit")?,
            self.fee_amount(capital)?,
            "profit",
        )
    }

    /// Profit left after withdrawals; the change in equity over one cycle.
    pub fn net_cash_flow(&self, capital: Decimal) -> Result<Decimal, EconError> {
        sub(self.profit(capital)?, self.withdrawal_per_cycle, "net cash flow")
    }

    /// Revenue at `capital` relative to `initial_revenue`.
    pub fn growth_ratio(
        &self,
        capital: Decimal,
        initial_revenue: Decimal,
    ) -> Result<Decimal, EconError> {
        div(self.revenue(capital)?, initial_revenue, "growth ratio")
    }

    /// Row for the `cycle`-th cycle (1-based) starting with `capital`.
    pub fn record(&self, cycle: u64, capital: Decimal) -> Result<CycleRecord, EconError> {
        Ok(CycleRecord {
            day_offset: u64::from(self.cycle_days)
                .checked_mul(cycle)
                .ok_or(EconError::Overflow("day offset"))?,
            capital,
            debt: self.debt(capital)?,
            revenue: self.revenue(capital)?,
            profit: self.profit(capital)?,
            fee_amount: self.fee_amount(capital)?,
            new_capital: add(capital, self.net_cash_flow(capital)?, "new capital")?,
        })
    }
}
