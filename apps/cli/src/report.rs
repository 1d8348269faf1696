//! Text rendering of a leverage comparison.

use std::fmt::Write as _;

use growth_core::{GrowthSchedule, SimulationParameters, SimulationResult};
use growth_sim::{Comparison, Speedup, StrategyRun};

use crate::format::{format_compact, format_currency, format_percent};

const UNPROFITABLE: &str =
    "Project is unprofitable! Try increasing margin or lowering withdrawals.";

fn speedup_label(s: &Speedup) -> String {
    match s {
        Speedup::Unavailable => "–".to_string(),
        Speedup::Unbounded => "∞".to_string(),
        Speedup::Factor(x) => x.normalize().to_string(),
    }
}

fn days_label(run: &StrategyRun) -> String {
    match run.as_ref().ok().and_then(SimulationResult::days_to_target) {
        Some(d) => format!("{d}d"),
        None => "–".to_string(),
    }
}

/// Headline and per-strategy days to target.
pub fn render_summary(params: &SimulationParameters, cmp: &Comparison) -> String {
    let target = params.target_multiple.normalize();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Achieve your target revenue {}x faster by using {} of debt financing!",
        speedup_label(&cmp.speedup),
        format_percent(params.debt_percentage)
    );
    let _ = writeln!(
        out,
        "With Financing:    {:>8} to {target}x of initial revenue",
        days_label(&cmp.leveraged)
    );
    let _ = writeln!(
        out,
        "Without Financing: {:>8} to {target}x of initial revenue",
        days_label(&cmp.unleveraged)
    );
    out
}

fn render_table(out: &mut String, s: &GrowthSchedule) {
    let _ = writeln!(
        out,
        "{:>6} {:>16} {:>16} {:>16} {:>16} {:>14} {:>16}",
        "Days", "Capital", "Debt", "Revenue", "Profit", "Fee", "New Capital"
    );
    for row in &s.schedule {
        let _ = writeln!(
            out,
            "{:>6} {:>16} {:>16} {:>16} {:>16} {:>14} {:>16}",
            row.day_offset,
            format_currency(row.capital),
            format_currency(row.debt),
            format_currency(row.revenue),
            format_currency(row.profit),
            format_currency(row.fee_amount),
            format_currency(row.new_capital),
        );
    }
}

/// One strategy section: schedule table, unprofitable warning, or the error
/// that aborted the run.
pub fn render_result(title: &str, run: &StrategyRun) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    match run {
        Ok(SimulationResult::Profitable(s)) => {
            let _ = writeln!(
                out,
                "initial revenue {} | days to target {}",
                format_compact(s.initial_revenue),
                s.days_to_target
            );
            render_table(&mut out, s);
        }
        Ok(SimulationResult::Unprofitable { loss_per_cycle }) => {
            let _ = writeln!(out, "{UNPROFITABLE}");
            let _ = writeln!(
                out,
                "net cash flow per cycle: {}",
                format_currency(*loss_per_cycle)
            );
        }
        Err(e) => {
            let _ = writeln!(out, "run aborted: {e}");
        }
    }
    out
}

pub fn render(params: &SimulationParameters, cmp: &Comparison) -> String {
    let mut out = render_summary(params, cmp);
    out.push('\n');
    out.push_str(&render_result("With Financing", &cmp.leveraged));
    out.push('\n');
    out.push_str(&render_result("Without Financing", &cmp.unleveraged));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use growth_core::SimConfig;
    use rust_decimal::Decimal;

    #[test]
    fn default_report() {
        let p = SimulationParameters::default();
        let cmp = growth_sim::compare(&p, &SimConfig::default()).unwrap();
        let text = render(&p, &cmp);
        assert!(text.contains(
            "Achieve your target revenue 2.5x faster by using 75% of debt financing!"
        ));
        assert!(text.contains("600d to 10x"));
        assert!(text.contains("1500d to 10x"));
        assert!(text.contains("$27,500"));
        assert!(text.contains("initial revenue $120K"));
        assert!(!text.contains(UNPROFITABLE));
    }

    #[test]
    fn unprofitable_section() {
        let p = SimulationParameters {
            withdrawals_per_month: Decimal::new(2_000, 0),
            ..SimulationParameters::default()
        };
        let cmp = growth_sim::compare(&p, &SimConfig::default()).unwrap();
        let summary = render_summary(&p, &cmp);
        assert!(summary.contains("∞x faster"));
        assert!(summary.lines().any(|l| {
            l.starts_with("Without Financing:")
                && l.trim_end().ends_with("– to 10x of initial revenue")
        }));
        let section = render_result("Without Financing", &cmp.unleveraged);
        assert!(section.contains(UNPROFITABLE));
        assert!(section.contains("-$4,000"));
    }

    #[test]
    fn aborted_strategy_keeps_other_table() {
        let p = SimulationParameters::default();
        let cmp = growth_sim::compare(&p, &SimConfig { max_cycles: 5 }).unwrap();
        let text = render(&p, &cmp);
        assert!(text.contains("∞x faster"));
        assert!(text.contains("600d to 10x"));
        assert!(text.contains("$27,500"));
        assert!(text.contains(
            "run aborted: cycle limit of 5 exceeded before reaching the target"
        ));
    }
}
