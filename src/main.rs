//! Cash Flow Forecast CLI
//!
//! Projects a base series under toggled what-if scenarios and prints the
//! monthly balances, risk flags and cash-crunch alert.

use anyhow::{Context, Result};
use cashflow_forecast::{
    format::{format_compact_k, format_eur, format_signed_scenario_amount},
    projection::{BalanceStatus, ForecastConfig, ForecastEngine, DEFAULT_LOW_BALANCE_THRESHOLD},
    scenario::load_scenarios,
    series::load_series,
    BaseSeries, ScenarioSet,
};
use clap::Parser;
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cashflow-forecast", about = "Project cash balances under what-if scenarios.")]
struct Args {
    /// Base series CSV (month,income,expense,initial_balance); defaults to the six-month reference series
    #[arg(long)]
    series: Option<PathBuf>,

    /// Scenario definitions as a JSON array; defaults to the reference scenarios
    #[arg(long)]
    scenarios: Option<PathBuf>,

    /// Activate a scenario by id (repeatable)
    #[arg(short, long = "activate", value_name = "ID")]
    activate: Vec<String>,

    /// Activate every scenario
    #[arg(long)]
    all: bool,

    /// Low-balance threshold
    #[arg(long, default_value_t = DEFAULT_LOW_BALANCE_THRESHOLD)]
    threshold: f64,

    /// Also print each scenario's impact when applied alone
    #[arg(long)]
    impacts: bool,

    /// Write the projection to a CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<PathBuf>,

    /// Print the projection as JSON instead of a table
    #[arg(long)]
    json: bool,
}

/// Switch on `--all` and every `--activate` id; never switches a scenario off
fn apply_activations(scenarios: &mut ScenarioSet, args: &Args) -> Result<()> {
    if args.all {
        scenarios.activate_all();
    }
    for id in &args.activate {
        scenarios.set_active(id, true)?;
        log::info!("Scenario '{}' activated", id);
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let series = match &args.series {
        Some(path) => load_series(path).with_context(|| format!("loading series {}", path.display()))?,
        None => BaseSeries::reference(),
    };
    let mut scenarios = match &args.scenarios {
        Some(path) => load_scenarios(path).with_context(|| format!("loading scenarios {}", path.display()))?,
        None => ScenarioSet::reference(),
    };

    apply_activations(&mut scenarios, &args)?;

    let engine = ForecastEngine::new(ForecastConfig { low_balance_threshold: args.threshold });
    let result = engine.project_series(&series, &scenarios)?;

    if let Some(path) = &args.csv {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        result.write_csv(file).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Projection written to {}", path.display());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("Cash Flow Forecast");
    println!("==================\n");

    println!("Scenarios:");
    for scenario in scenarios.iter() {
        println!(
            "  [{}] {:<14} {:<9} {:>12}  {}",
            if scenario.active { "x" } else { " " },
            scenario.id,
            scenario.kind.label(),
            format_signed_scenario_amount(scenario),
            scenario.label,
        );
    }
    println!();

    println!("{:>6} {:>14} {:>14} {:>14} {:>9}  {}", "Month", "Income", "Expense", "Balance", "Compact", "Status");
    println!("{}", "-".repeat(72));
    for period in &result.periods {
        let status = match period.status() {
            BalanceStatus::Negative => "NEGATIVE",
            BalanceStatus::Low => "low",
            BalanceStatus::Healthy => "",
        };
        println!(
            "{:>6} {:>14} {:>14} {:>14} {:>9}  {}",
            period.month,
            format_eur(period.projected_income),
            format_eur(period.projected_expense),
            format_eur(period.projected_balance),
            format_compact_k(period.projected_balance),
            status,
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Opening Balance: {}", format_eur(summary.opening_balance));
    println!("  Total Income:    {}", format_eur(summary.total_income));
    println!("  Total Expense:   {}", format_eur(summary.total_expense));
    println!("  Closing Balance: {}", format_eur(summary.closing_balance));
    println!(
        "  Lowest Balance:  {} ({})",
        format_eur(summary.lowest_balance),
        summary.lowest_month.as_deref().unwrap_or("-"),
    );
    if summary.has_cash_crunch {
        println!(
            "\n  ALERT: cash crunch detected, balance goes negative in {}",
            summary.first_negative_month.as_deref().unwrap_or("-"),
        );
    }

    if args.impacts {
        let impacts = engine.scenario_impacts(series.periods(), scenarios.as_slice())?;
        println!("\nScenario impacts (applied alone):");
        for impact in &impacts {
            println!(
                "  {:<14} closing {:>14}  lowest {:>14}{}",
                impact.scenario_id,
                format_eur(impact.closing_balance_delta),
                format_eur(impact.lowest_balance),
                if impact.has_cash_crunch { "  crunch" } else { "" },
            );
        }
    }

    Ok(())
}
