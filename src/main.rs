/// heatmon: prints the classified station report.
///
/// Usage: heatmon [--json] [--config FILE] [--stations-file FILE]
///                [--log-level LEVEL] [--default-station NAME]
///
/// Without `--json`, prints a table of stations (most severe first), the
/// per-tier distribution, the legend, the monthly trend and daily forecast
/// accuracy. With `--json`, prints the station verification report instead.

use std::process::ExitCode;

use chrono::Local;
use clap::Parser;

use heatmon_service::analysis::{accuracy, distribution, legend, trend};
use heatmon_service::config::{Cli, HeatmonConfig};
use heatmon_service::dashboard::DashboardState;
use heatmon_service::logging::{self, Source};
use heatmon_service::model::{HeatmonError, StationReading};
use heatmon_service::{classify, stations, verify};

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            logging::error(Source::System, None, &e.to_string());
            eprintln!("heatmon: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), HeatmonError> {
    let config = HeatmonConfig::load(cli)?;
    logging::init_logger(
        config.logging.min_level()?,
        config.logging.file.as_deref(),
        config.logging.timestamps,
    )?;
    config.log_effective();

    let readings = match &config.stations_file {
        Some(path) => Some(stations::load_stations(path)?),
        None => {
            logging::info(Source::Stations, None, "Using built-in station registry");
            None
        }
    };

    if cli.json {
        let report = match &readings {
            Some(list) => verify::verify_readings(list),
            None => verify::verify_readings(&stations::sample_readings()),
        };
        println!("{}", report.to_json()?);
        return Ok(());
    }

    let today = Local::now().date_naive();
    let mut state = match readings {
        Some(list) => DashboardState::new(list, today)?,
        None => DashboardState::from_registry(today)?,
    };
    if let Some(name) = &config.default_station {
        state.select_station(name)?;
    }

    print_report(&state)
}

fn print_report(state: &DashboardState) -> Result<(), HeatmonError> {
    let summary = state.current_summary()?;
    println!("Heat index report for {}", summary.date.format("%B %-d, %Y"));
    println!();
    println!(
        "Selected: {}  {:.1}°C  {}",
        summary.reading.name,
        summary.reading.temperature,
        summary.classification.label.to_uppercase()
    );
    println!("  Effects:    {}", summary.classification.health_effects);
    println!("  What to do: {}", summary.classification.recommended_action);
    println!();

    println!("{:<36} {:>8}  {:<16} {}", "Station", "Heat idx", "Level", "Daily fcst");
    println!("{}", "─".repeat(72));
    for reading in distribution::sort_by_severity(state.readings()) {
        print_station_row(reading)?;
    }
    println!();

    let dist = distribution::tier_distribution(state.readings());
    println!("Stations per level:");
    for entry in dist.counts.iter().rev() {
        println!("  {:<16} {:>3}  {}", entry.label, entry.count, entry.color);
    }
    println!();

    println!("Legend:");
    for row in legend::legend_rows() {
        println!("  {:<16} {:<10} {}", row.label, row.range, row.color);
    }
    println!();

    let months = trend::monthly_trend(&stations::SAMPLE_MONTHLY_TREND)?;
    println!("Monthly trend:");
    for point in months.points() {
        println!(
            "  {:>2}  {:>5.1}°C  {}",
            point.month, point.heat_index, point.classification.label
        );
    }
    let peak = months.peak();
    println!(
        "  Peak: month {} at {:.1}°C ({})",
        peak.month, peak.heat_index, peak.classification.label
    );
    println!();

    match accuracy::daily_forecast_accuracy(state.readings()) {
        Ok(m) => println!(
            "Daily forecast accuracy ({} stations): RMSE {:.2}  MAE {:.2}  R² {}  Bias {:+.2}",
            m.samples,
            m.rmse,
            m.mae,
            m.r_squared
                .map(|r| format!("{:.2}", r))
                .unwrap_or_else(|| "n/a".to_string()),
            m.bias
        ),
        Err(e) => logging::warn(Source::System, None, &format!("No accuracy metrics: {}", e)),
    }

    Ok(())
}

fn print_station_row(reading: &StationReading) -> Result<(), HeatmonError> {
    let c = classify(reading.temperature)?;
    let forecast = reading
        .daily_forecast
        .map(|f| format!("{:.1}°C", f))
        .unwrap_or_else(|| "-".to_string());
    println!(
        "{:<36} {:>6.1}°C  {:<16} {}",
        reading.name, reading.temperature, c.label, forecast
    );
    Ok(())
}
