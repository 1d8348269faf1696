//! YAML scenario files: partial parameter sets layered over the defaults.

use anyhow::{Context, Result};
use growth_core::{SimConfig, SimulationParameters};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scenario file contents; absent fields keep the value underneath.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scenario {
    pub initial_capital: Option<Decimal>,
    pub target_multiple: Option<Decimal>,
    pub debt_percentage: Option<Decimal>,
    pub profit_margin: Option<Decimal>,
    pub sales_to_purchase_price_ratio: Option<Decimal>,
    pub fee_rate: Option<Decimal>,
    pub withdrawals_per_month: Option<Decimal>,
    pub cash_conversion_cycle: Option<u32>,
    pub max_cycles: Option<u32>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Overlay `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: Scenario) -> Scenario {
        Scenario {
            initial_capital: other.initial_capital.or(self.initial_capital),
            target_multiple: other.target_multiple.or(self.target_multiple),
            debt_percentage: other.debt_percentage.or(self.debt_percentage),
            profit_margin: other.profit_margin.or(self.profit_margin),
            sales_to_purchase_price_ratio: other
                .sales_to_purchase_price_ratio
                .or(self.sales_to_purchase_price_ratio),
            fee_rate: other.fee_rate.or(self.fee_rate),
            withdrawals_per_month: other.withdrawals_per_month.or(self.withdrawals_per_month),
            cash_conversion_cycle: other.cash_conversion_cycle.or(self.cash_conversion_cycle),
            max_cycles: other.max_cycles.or(self.max_cycles),
        }
    }

    pub fn apply(&self, base: SimulationParameters) -> SimulationParameters {
        SimulationParameters {
            with_leverage: base.with_leverage,
            initial_capital: self.initial_capital.unwrap_or(base.initial_capital),
            target_multiple: self.target_multiple.unwrap_or(base.target_multiple),
            debt_percentage: self.debt_percentage.unwrap_or(base.debt_percentage),
            profit_margin: self.profit_margin.unwrap_or(base.profit_margin),
            sales_to_purchase_price_ratio: self
                .sales_to_purchase_price_ratio
                .unwrap_or(base.sales_to_purchase_price_ratio),
            fee_rate: self.fee_rate.unwrap_or(base.fee_rate),
            withdrawals_per_month: self
                .withdrawals_per_month
                .unwrap_or(base.withdrawals_per_month),
            cash_conversion_cycle: self
                .cash_conversion_cycle
                .unwrap_or(base.cash_conversion_cycle),
        }
    }

    pub fn config(&self, base: SimConfig) -> SimConfig {
        SimConfig {
            max_cycles: self.max_cycles.unwrap_or(base.max_cycles),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let s = Scenario::parse("initial_capital: 50000\nprofit_margin: 0.15\n").unwrap();
        let p = s.apply(SimulationParameters::default());
        assert_eq!(p.initial_capital, Decimal::new(50_000, 0));
        assert_eq!(p.profit_margin, Decimal::new(15, 2));
        assert_eq!(p.target_multiple, Decimal::new(10, 0));
        assert_eq!(p.cash_conversion_cycle, 150);
        assert_eq!(s.config(SimConfig::default()), SimConfig::default());
    }

    #[test]
    fn later_layer_wins() {
        let file = Scenario::parse("fee_rate: 0.1\ncash_conversion_cycle: 60\nmax_cycles: 50\n")
            .unwrap();
        let flags = Scenario {
            fee_rate: Some(Decimal::new(2, 2)),
            ..Scenario::default()
        };
        let merged = file.merge(flags);
        let p = merged.apply(SimulationParameters::default());
        assert_eq!(p.fee_rate, Decimal::new(2, 2));
        assert_eq!(p.cash_conversion_cycle, 60);
        assert_eq!(merged.config(SimConfig::default()).max_cycles, 50);
    }

    #[test]
    fn unknown_field_is_an_error() {
        assert!(Scenario::parse("interest: 0.1\n").is_err());
    }
}
