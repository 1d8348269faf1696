#![deny(warnings)]

//! Headless CLI comparing leveraged and unleveraged growth for one scenario.

mod format;
mod report;
mod scenario;

use anyhow::{Context, Result};
use clap::Parser;
use growth_core::{SimConfig, SimulationParameters, SimulationResult};
use growth_sim::{chart_series, compare, ChartPoint, Comparison};
use rust_decimal::Decimal;
use scenario::Scenario;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "growth",
    about = "Compare debt-financed and self-financed growth over cash conversion cycles",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_SHA"), ")")
)]
struct Cli {
    /// YAML scenario file; flags below override its fields
    #[arg(long, env = "GROWTH_SCENARIO")]
    scenario: Option<PathBuf>,

    /// Starting equity
    #[arg(long)]
    initial_capital: Option<Decimal>,

    /// Revenue multiple to reach, relative to the first cycle
    #[arg(long)]
    target_multiple: Option<Decimal>,

    /// Share of each investment financed with debt, in [0,1)
    #[arg(long)]
    debt_percentage: Option<Decimal>,

    /// Share of revenue kept as profit, in [0,1]
    #[arg(long)]
    profit_margin: Option<Decimal>,

    /// Sales price to purchase price ratio
    #[arg(long)]
    sales_ratio: Option<Decimal>,

    /// Cost of debt per cycle as a share of the debt
    #[arg(long)]
    fee_rate: Option<Decimal>,

    /// Cash withdrawn per month
    #[arg(long)]
    withdrawals: Option<Decimal>,

    /// Cash conversion cycle in days
    #[arg(long)]
    cycle_days: Option<u32>,

    /// Abort a run after this many cycles
    #[arg(long)]
    max_cycles: Option<u32>,

    /// Print the comparison and chart series as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn overrides(&self) -> Scenario {
        Scenario {
            initial_capital: self.initial_capital,
            target_multiple: self.target_multiple,
            debt_percentage: self.debt_percentage,
            profit_margin: self.profit_margin,
            sales_to_purchase_price_ratio: self.sales_ratio,
            fee_rate: self.fee_rate,
            withdrawals_per_month: self.withdrawals,
            cash_conversion_cycle: self.cycle_days,
            max_cycles: self.max_cycles,
        }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    parameters: &'a SimulationParameters,
    comparison: &'a Comparison,
    chart: Vec<ChartPoint>,
}

impl<'a> JsonReport<'a> {
    fn new(parameters: &'a SimulationParameters, comparison: &'a Comparison) -> Self {
        Self {
            parameters,
            comparison,
            chart: chart_series(comparison),
        }
    }
}

/// Defaults, then the scenario file, then flags.
fn resolve(cli: &Cli) -> Result<(SimulationParameters, SimConfig)> {
    let file = match &cli.scenario {
        Some(path) => Scenario::load(path)?,
        None => Scenario::default(),
    };
    let layered = file.merge(cli.overrides());
    Ok((
        layered.apply(SimulationParameters::default()),
        layered.config(SimConfig::default()),
    ))
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays parseable
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(scenario = ?cli.scenario, "starting CLI");

    let (params, config) = resolve(&cli)?;
    let cmp = compare(&params, &config).context("simulation failed")?;
    info!(
        leveraged = cmp.leveraged.as_ref().is_ok_and(SimulationResult::is_profitable),
        unleveraged = cmp.unleveraged.as_ref().is_ok_and(SimulationResult::is_profitable),
        "comparison done"
    );

    if cli.json {
        let out = JsonReport::new(&params, &cmp);
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print!("{}", report::render(&params, &cmp));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    // Decimals serialize as strings; compare by value, not by scale.
    fn dec(v: &Value) -> Decimal {
        v.as_str().unwrap().parse().unwrap()
    }

    #[test]
    fn flags_override_scenario_file() {
        let path = std::env::temp_dir()
            .join(format!("growth-scenario-{}.yaml", std::process::id()));
        std::fs::write(&path, "initial_capital: 50000\nfee_rate: 0.1\nmax_cycles: 40\n").unwrap();
        let cli = Cli::try_parse_from([
            "growth",
            "--scenario",
            path.to_str().unwrap(),
            "--fee-rate",
            "0.02",
            "--cycle-days",
            "90",
        ])
        .unwrap();
        let resolved = resolve(&cli);
        std::fs::remove_file(&path).unwrap();
        let (p, cfg) = resolved.unwrap();
        assert_eq!(p.initial_capital, Decimal::new(50_000, 0));
        assert_eq!(p.fee_rate, Decimal::new(2, 2));
        assert_eq!(p.cash_conversion_cycle, 90);
        assert_eq!(p.target_multiple, Decimal::new(10, 0));
        assert_eq!(cfg.max_cycles, 40);
    }

    #[test]
    fn missing_scenario_file_is_an_error() {
        let cli = Cli::try_parse_from(["growth", "--scenario", "/nonexistent/growth.yaml"])
            .unwrap();
        assert!(resolve(&cli).is_err());
    }

    #[test]
    fn json_report_shape() {
        let cli = Cli::try_parse_from(["growth", "--json", "--max-cycles", "5"]).unwrap();
        assert!(cli.json);
        let (p, cfg) = resolve(&cli).unwrap();
        assert_eq!(cfg.max_cycles, 5);
        let cmp = compare(&p, &cfg).unwrap();
        let v = serde_json::to_value(JsonReport::new(&p, &cmp)).unwrap();

        assert_eq!(v["parameters"]["with_leverage"], true);
        assert_eq!(v["parameters"]["cash_conversion_cycle"], 150);
        assert_eq!(dec(&v["parameters"]["initial_capital"]), Decimal::new(10_000, 0));
        let with = &v["comparison"]["leveraged"];
        assert_eq!(with["outcome"], "profitable");
        assert_eq!(with["days_to_target"], 600);
        assert_eq!(with["schedule"].as_array().unwrap().len(), 4);
        assert_eq!(with["schedule"][0]["day_offset"], 150);
        assert_eq!(dec(&with["schedule"][0]["new_capital"]), Decimal::new(27_500, 0));
        assert_eq!(v["comparison"]["unleveraged"]["outcome"], "aborted");
        assert_eq!(v["comparison"]["speedup"]["kind"], "unbounded");
        // no chart without both runs finished
        assert_eq!(v["chart"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn json_chart_with_defaults() {
        let p = SimulationParameters::default();
        let cmp = compare(&p, &SimConfig::default()).unwrap();
        let v = serde_json::to_value(JsonReport::new(&p, &cmp)).unwrap();
        let chart = v["chart"].as_array().unwrap();
        assert_eq!(chart.len(), 11);
        assert_eq!(chart[1]["x"], 150);
        assert_eq!(dec(&chart[1]["with_leverage"]), Decimal::new(120_000, 0));
        assert_eq!(dec(&chart[1]["without_leverage"]), Decimal::new(30_000, 0));
        assert_eq!(chart[10]["with_leverage"], Value::Null);
        assert_eq!(v["comparison"]["speedup"]["kind"], "factor");
        assert_eq!(dec(&v["comparison"]["speedup"]["value"]), Decimal::new(25, 1));
    }
}
