//! ECONIndexer CLI
//!
//! Command-line interface for indexer calculations over the CSV rate store

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use econ_indexer::interest::{month_name, AdjustedRow, YearlyRateTable};
use econ_indexer::series::{register_month, save_store};
use econ_indexer::service::parse_date;
use econ_indexer::{AdjustmentSpec, Indicator, IndexerConfig, IndexerService, InterestMetrics};
use serde::Serialize;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "econ_indexer", version, about = "Compare investments with Brazilian economic indicators")]
struct Cli {
    /// Directory holding one <indicator>.csv per indicator (overrides ECON_INDEXER_DATA_PATH)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug)]
struct Window {
    /// Initial amount of money (R$)
    #[arg(long)]
    initial_value: f64,

    /// Initial date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    from: NaiveDate,

    /// Final date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    to: NaiveDate,
}

#[derive(Args, Debug)]
struct Adjustment {
    /// IPCA, CDI, SELIC, FGTS or POUPANCA
    #[arg(long)]
    indicator: String,

    /// 0=None; 1=Prefixed; 2=Proportional
    #[arg(long, default_value_t = 0)]
    rate_type: i64,

    /// Additional rate (%): annual spread if Prefixed, multiplier if Proportional
    #[arg(long, default_value_t = 0.0)]
    add_rate: f64,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Final value of an investment following an indicator
    FinalValue {
        #[command(flatten)]
        window: Window,
        #[command(flatten)]
        adjustment: Adjustment,
    },

    /// Interest value and rate of an indicator over a window
    Interest {
        #[command(flatten)]
        window: Window,
        #[command(flatten)]
        adjustment: Adjustment,
    },

    /// Interest value between two amounts
    InterestValue {
        #[arg(long)]
        initial_value: f64,
        #[arg(long)]
        final_value: f64,
    },

    /// Interest rate between two amounts
    InterestRate {
        #[arg(long)]
        initial_value: f64,
        #[arg(long)]
        final_value: f64,
    },

    /// Your interest value divided by the indicator's over the same window
    Benchmark {
        #[command(flatten)]
        window: Window,
        /// Final amount of money (R$)
        #[arg(long)]
        final_value: f64,
        #[arg(long, default_value = "CDI")]
        indicator: String,
    },

    /// Month-by-month adjusted series, written as CSV
    Series {
        #[command(flatten)]
        window: Window,
        #[command(flatten)]
        adjustment: Adjustment,
        /// Output CSV path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Yearly history table of an indicator
    Table {
        #[arg(long)]
        indicator: String,
    },

    /// Every indicator over the same window with its default additional rate
    Compare {
        #[command(flatten)]
        window: Window,
    },

    /// Register next month's rate (%) for every indicator
    Register {
        #[arg(long)]
        ipca: f64,
        #[arg(long)]
        cdi: f64,
        #[arg(long)]
        selic: f64,
        #[arg(long)]
        fgts: f64,
        #[arg(long)]
        poupanca: f64,
        /// Date to check the publication lag against (defaults to today)
        #[arg(long, value_parser = parse_date)]
        today: Option<NaiveDate>,
    },
}

#[derive(Serialize)]
struct CompareRow {
    indicator: Indicator,
    adjustment: AdjustmentSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    final_value: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    interest_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    yearly_equivalent_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn print_value<T: Serialize + std::fmt::Display>(json: bool, label: &str, value: T) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string(&value)?);
    } else {
        println!("{}: {}", label, value);
    }
    Ok(())
}

fn write_series_csv<W: io::Write>(rows: &[AdjustedRow], writer: W) -> anyhow::Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

fn print_table(table: &YearlyRateTable) {
    let header: String = (1..=12)
        .filter_map(month_name)
        .map(|name| format!("{:>9}", name.chars().take(3).collect::<String>()))
        .collect();
    println!("{} - {}", table.indicator, table.indicator.config().source_link);
    println!("{:>5}{} {:>10}", "Ano", header, "Anual(%)");
    println!("{}", "-".repeat(5 + 9 * 12 + 11));

    let fmt_rate = |rate: Option<f64>, width: usize| match rate {
        Some(r) => format!("{:>width$.4}", r, width = width),
        None => format!("{:>width$}", "-", width = width),
    };

    for row in &table.rows {
        let months: String = row.months.iter().map(|&m| fmt_rate(m, 9)).collect();
        println!("{:>5}{} {}", row.year, months, fmt_rate(row.yearly_rate, 10));
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let mut config = IndexerConfig::from_env();
    if let Some(dir) = cli.data_dir.clone() {
        config = config.with_data_path(dir);
    }

    // Arithmetic-only commands run without loading any rate data
    let load_service = || {
        IndexerService::from_config(&config)
            .with_context(|| format!("loading rate series from {}", config.data_path.display()))
    };

    match cli.command {
        Command::InterestValue { initial_value, final_value } => {
            let value = econ_indexer::interest::interest_value(initial_value, final_value);
            print_value(cli.json, "Interest value", value)?;
        }

        Command::InterestRate { initial_value, final_value } => {
            let rate = econ_indexer::interest::interest_rate(initial_value, final_value)?;
            print_value(cli.json, "Interest rate", rate)?;
        }

        Command::FinalValue { window, adjustment } => {
            let value = load_service()?.get_final_value(
                window.initial_value,
                window.from,
                window.to,
                &adjustment.indicator,
                adjustment.rate_type,
                adjustment.add_rate,
            )?;
            print_value(cli.json, "Final value", value)?;
        }

        Command::Interest { window, adjustment } => {
            let final_value = load_service()?.get_final_value(
                window.initial_value,
                window.from,
                window.to,
                &adjustment.indicator,
                adjustment.rate_type,
                adjustment.add_rate,
            )?;
            let metrics = InterestMetrics::from_values(window.initial_value, final_value)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&metrics)?);
            } else {
                println!("Final value:    {:.2}", final_value);
                println!("Interest value: {:.2}", metrics.interest_value);
                println!("Interest rate:  {:.4}%", metrics.interest_rate * 100.0);
            }
        }

        Command::Benchmark { window, final_value, indicator } => {
            let ratio = load_service()?.get_benchmarking(
                window.initial_value,
                final_value,
                window.from,
                window.to,
                &indicator,
            )?;
            print_value(cli.json, "Benchmarking ratio", ratio)?;
        }

        Command::Series { window, adjustment, output } => {
            let indicator: Indicator = adjustment.indicator.parse()?;
            let spec = AdjustmentSpec::from_code(adjustment.rate_type, adjustment.add_rate)?;
            let series = load_service()?.adjusted_series(indicator, window.initial_value, window.from, window.to, spec)?;

            match output {
                Some(path) => {
                    write_series_csv(series.rows(), std::fs::File::create(&path)?)?;
                    eprintln!("{} rows written to {}", series.len(), path.display());
                }
                None => write_series_csv(series.rows(), io::stdout())?,
            }

            let summary = series.summary()?;
            if cli.json {
                eprintln!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                eprintln!("\nSummary ({} {}):", summary.indicator, spec.rate_type.label());
                eprintln!("  Months: {}", summary.months);
                eprintln!("  Final index value: {:.2}", summary.final_base_value);
                eprintln!("  Final value: {:.2}", summary.final_value);
                eprintln!("  Interest rate: {:.4}%", summary.interest_rate * 100.0);
                eprintln!("  Yearly equivalent: {:.4}%", summary.yearly_equivalent_rate * 100.0);
            }
        }

        Command::Table { indicator } => {
            let table = load_service()?.yearly_table(indicator.parse()?)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print_table(&table);
            }
        }

        Command::Compare { window } => {
            let rows: Vec<CompareRow> = load_service()?
                .compare(window.initial_value, window.from, window.to)
                .into_iter()
                .map(|(indicator, summary)| {
                    let adjustment = indicator.config().default_adjustment;
                    match summary {
                        Ok(s) => CompareRow {
                            indicator,
                            adjustment,
                            final_value: Some(s.final_value),
                            interest_rate: Some(s.interest_rate),
                            yearly_equivalent_rate: Some(s.yearly_equivalent_rate),
                            error: None,
                        },
                        Err(e) => CompareRow {
                            indicator,
                            adjustment,
                            final_value: None,
                            interest_rate: None,
                            yearly_equivalent_rate: None,
                            error: Some(e.to_string()),
                        },
                    }
                })
                .collect();

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&rows)?);
            } else {
                println!("{:<9} {:<16} {:>8} {:>14} {:>12} {:>12}",
                    "Indicator", "Additional", "Rate(%)", "Final(R$)", "Total(%)", "Yearly(%)");
                println!("{}", "-".repeat(76));
                for row in &rows {
                    match (row.final_value, row.interest_rate, row.yearly_equivalent_rate) {
                        (Some(value), Some(rate), Some(yearly)) => println!(
                            "{:<9} {:<16} {:>8.2} {:>14.2} {:>12.4} {:>12.4}",
                            row.indicator.title(),
                            row.adjustment.rate_type.label(),
                            row.adjustment.rate_value,
                            value,
                            rate * 100.0,
                            yearly * 100.0,
                        ),
                        _ => println!(
                            "{:<9} {}",
                            row.indicator.title(),
                            row.error.as_deref().unwrap_or("unavailable")
                        ),
                    }
                }
            }
        }

        Command::Register { ipca, cdi, selic, fgts, poupanca, today } => {
            let mut service = load_service()?;
            let today = today.unwrap_or_else(|| chrono::Local::now().date_naive());
            let rates = [
                (Indicator::Ipca, ipca),
                (Indicator::Cdi, cdi),
                (Indicator::Selic, selic),
                (Indicator::Fgts, fgts),
                (Indicator::Poupanca, poupanca),
            ];

            let registered = register_month(service.store_mut(), &rates, today)?;
            save_store(service.store(), &config.data_path)
                .with_context(|| format!("saving rate series to {}", config.data_path.display()))?;
            print_value(cli.json, "Registered month", registered)?;
        }
    }

    Ok(())
}
