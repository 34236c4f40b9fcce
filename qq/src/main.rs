//! QueueQuest - theme park itinerary planner
//!
//! CLI entry point for planning, wait lookups and live feed inspection.

use chrono::{NaiveDate, NaiveDateTime};
use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use serde::Serialize;
use tracing::{debug, info};

use queuequest::cli::{Cli, Command, DayArgs, OutputFormat, WeatherArgs};
use queuequest::config::Config;
use queuequest::domain::{Itinerary, PlanMode, PlanRequest, Provenance, StepKind};
use queuequest::live::LiveSnapshot;
use queuequest::oracle::{WaitEstimate, WeatherOverride};
use queuequest::oracle::scan::WaitSlot;
use queuequest::planner::{Comparison, parse_clock};
use queuequest::service::PlanningService;
use venuecatalog::Venue;

fn setup_logging(cli_log_level: Option<&str>) -> Result<()> {
    let level = match cli_log_level.map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") | None => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to WARN", other);
            tracing::Level::WARN
        }
    };

    // stdout carries plans and JSON; logs go to stderr
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    if cli.offline {
        debug!("main: offline, live feed and weather forecasts disabled");
        config.live.enabled = false;
        config.weather.enabled = false;
    }
    let service = PlanningService::from_config(&config)?;
    info!(venues = service.catalog().venues().len(), live = config.live.enabled, "QueueQuest starting");

    let format = cli.format;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Plan { day, wishlist } => {
            let request = wishlist.apply(day_request(&service, &day, PlanMode::Priority).await?)?;
            let itinerary = service.plan(&request).await?;
            emit(format, &itinerary, print_itinerary)
        }
        Command::MaxValue { day } => {
            let request = day_request(&service, &day, PlanMode::MaxValue).await?;
            let itinerary = service.plan(&request).await?;
            emit(format, &itinerary, print_itinerary)
        }
        Command::Compare { day, wishlist } => {
            let request = wishlist.apply(day_request(&service, &day, PlanMode::Priority).await?)?;
            let comparison = service.compare(&request).await?;
            emit(format, &comparison, print_comparison)
        }
        Command::Wait {
            venue,
            attraction,
            date,
            at,
            weather,
        } => {
            let now = venue_by_id(&service, &venue)?.now();
            let instant = match (date, at) {
                (None, None) => now,
                (date, Some(raw)) => parse_clock(date.unwrap_or(now.date()), &raw)?,
                (Some(date), None) => date.and_time(now.time()),
            };
            let weather = resolve_weather(&service, &weather, &venue, instant.date()).await?;
            let estimate = service
                .predict_wait(&venue, &attraction, instant, weather.as_ref())
                .await?;
            let report = WaitReport {
                attraction,
                at: instant,
                estimate,
                weather,
            };
            emit(format, &report, print_wait)
        }
        Command::BestTimes {
            venue,
            attraction,
            date,
            from_hour,
            to_hour,
            after,
        } => {
            let now = venue_by_id(&service, &venue)?.now();
            let date = date.unwrap_or(now.date());
            let (profile, best) = service.best_times(&venue, &attraction, date, from_hour, to_hour)?;
            let upcoming = match after.as_deref() {
                None => None,
                Some(raw) => {
                    let from = if raw.eq_ignore_ascii_case("now") {
                        date.and_time(now.time())
                    } else {
                        parse_clock(date, raw)?
                    };
                    let slot = service.best_future_wait(&venue, &attraction, from, None).await?;
                    Some(UpcomingReport { from, best: slot })
                }
            };
            let report = BestTimesReport {
                attraction,
                profile,
                best,
                upcoming,
            };
            emit(format, &report, print_best_times)
        }
        Command::Live { venue } => {
            let venue = venue_by_id(&service, &venue)?;
            let snapshot = service.snapshot(venue).await;
            emit(format, &snapshot.as_deref(), print_live)
        }
        Command::Transit { venue, from, to, pace } => {
            let minutes = service.transit_minutes(&venue, &from, &to, pace)?;
            let report = TransitReport { from, to, minutes };
            emit(format, &report, print_transit)
        }
    }
}

fn venue_by_id<'a>(service: &'a PlanningService, id: &str) -> Result<&'a Venue> {
    service.catalog().venue(id).ok_or_else(|| eyre!("Unknown venue: {}", id))
}

/// Explicit weather flags, or a forecast lookup for `--auto-weather`
async fn resolve_weather(
    service: &PlanningService,
    args: &WeatherArgs,
    venue: &str,
    date: NaiveDate,
) -> Result<Option<WeatherOverride>> {
    if args.auto_weather {
        return Ok(Some(service.weather_for(venue, date).await?));
    }
    Ok(args.resolve(date))
}

async fn day_request(service: &PlanningService, day: &DayArgs, mode: PlanMode) -> Result<PlanRequest> {
    let venue = venue_by_id(service, &day.venue)?;
    let request = day.request(venue, venue.now().date(), mode)?;
    if day.weather.auto_weather {
        let weather = service.weather_for(&venue.id, request.start.date()).await?;
        return Ok(request.with_weather(weather));
    }
    Ok(request)
}

fn emit<T: Serialize + ?Sized>(format: OutputFormat, value: &T, text: fn(&T)) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
            println!("{}", json);
        }
        OutputFormat::Text => text(value),
    }
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct WaitReport {
    attraction: String,
    at: NaiveDateTime,
    estimate: WaitEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    weather: Option<WeatherOverride>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct BestTimesReport {
    attraction: String,
    profile: Vec<WaitSlot>,
    best: Option<WaitSlot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    upcoming: Option<UpcomingReport>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct UpcomingReport {
    from: NaiveDateTime,
    best: Option<WaitSlot>,
}

#[derive(Serialize)]
#[serde(rename_all = "kebab-case")]
struct TransitReport {
    from: String,
    to: String,
    minutes: u32,
}

fn hhmm(t: NaiveDateTime) -> String {
    t.format("%H:%M").to_string()
}

fn kind_label(kind: StepKind) -> ColoredString {
    let label = format!("{:<6}", kind.to_string());
    match kind {
        StepKind::Must => label.red().bold(),
        StepKind::Should => label.yellow(),
        StepKind::Lunch => label.green(),
        StepKind::Score => label.cyan(),
    }
}

fn provenance_label(provenance: Provenance) -> ColoredString {
    let label = provenance.to_string();
    match provenance {
        Provenance::Live => label.green(),
        Provenance::Forecast => label.blue(),
        Provenance::Heuristic => label.yellow(),
        Provenance::Fixed => label.dimmed(),
    }
}

fn print_itinerary(itinerary: &Itinerary) {
    if itinerary.steps.is_empty() {
        println!("{}", "Nothing could be planned".yellow());
    }
    for step in &itinerary.steps {
        println!(
            "{} {} {:<28} walk {:>3}m  wait {:>3}m ({})  {}-{}  {}",
            hhmm(step.departure).bold(),
            kind_label(step.kind),
            step.attraction,
            step.transit_minutes,
            step.wait_minutes,
            provenance_label(step.provenance),
            hhmm(step.ride_start),
            hhmm(step.ride_end),
            step.note.dimmed()
        );
    }

    println!();
    println!(
        "{} rides, {}m waiting, {}m walking",
        itinerary.ride_count(),
        itinerary.total_wait_minutes(),
        itinerary.total_transit_minutes()
    );
    if !itinerary.closed.is_empty() {
        println!("{} {}", "Closed:".red(), itinerary.closed.join(", "));
    }
    if !itinerary.skipped.is_empty() {
        println!("{} {}", "Skipped:".yellow(), itinerary.skipped.join(", "));
    }
    if itinerary.lunch_dropped {
        println!("{}", "Lunch dropped: it does not fit before closing".yellow());
    }
}

fn print_comparison(comparison: &Comparison) {
    println!("{}", "Nearest first (queue-blind)".bold());
    print_itinerary(&comparison.baseline);
    println!();
    println!("{}", "Planned".bold());
    print_itinerary(&comparison.planned);
    println!();

    let saved = comparison.wait_saved_minutes();
    let saved = if saved >= 0 {
        format!("{}m less waiting", saved).green()
    } else {
        format!("{}m more waiting", -saved).red()
    };
    println!("{}, {:+} rides", saved, comparison.extra_rides());
}

fn print_wait(report: &WaitReport) {
    match report.estimate {
        WaitEstimate::Available { minutes, source } => println!(
            "{} at {}: {} min ({})",
            report.attraction.cyan(),
            hhmm(report.at),
            minutes,
            provenance_label(source.into())
        ),
        WaitEstimate::Closed => println!("{} at {}: {}", report.attraction.cyan(), hhmm(report.at), "closed".red()),
    }
    if let Some(weather) = &report.weather {
        println!(
            "  {}",
            format!(
                "assuming {:.0} C, {:.1} mm, {}",
                weather.temperature_c, weather.precipitation_mm, weather.sky
            )
            .dimmed()
        );
    }
}

fn print_best_times(report: &BestTimesReport) {
    println!("{}", report.attraction.cyan().bold());
    for slot in &report.profile {
        let marker = if Some(*slot) == report.best { "<- best" } else { "" };
        println!("  {}  {:>8}  {}", hhmm(slot.at), slot.estimate.to_string(), marker.green());
    }
    if report.best.is_none() {
        println!("{}", "Closed for the whole window".red());
    }
    if let Some(upcoming) = &report.upcoming {
        match upcoming.best {
            Some(slot) => println!(
                "From {} until closing: best at {} ({})",
                hhmm(upcoming.from),
                hhmm(slot.at),
                slot.estimate
            ),
            None => println!("From {} until closing: {}", hhmm(upcoming.from), "closed".red()),
        }
    }
}

fn print_live(snapshot: &Option<&LiveSnapshot>) {
    let Some(snapshot) = snapshot else {
        println!("{}", "No live data (offline, no feed, or feed unavailable)".yellow());
        return;
    };
    println!(
        "{} fetched {} ({}/{} open)",
        snapshot.venue.cyan(),
        snapshot.fetched_at.format("%Y-%m-%d %H:%M"),
        snapshot.open_count(),
        snapshot.len()
    );
    for (name, status) in &snapshot.statuses {
        if status.is_open {
            println!("  {:<32} {:>3} min", name, status.wait_minutes);
        } else {
            println!("  {:<32} {}", name, "closed".red());
        }
    }
}

fn print_transit(report: &TransitReport) {
    println!("{} -> {}: {} min", report.from, report.to, report.minutes);
}
