//! Long Island Sound raster viewer CLI.
//!
//! Command-line front end over the viewer session: point queries, transects,
//! timeseries, in-situ overlays, polygon statistics, and CSV/PNG export.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Table};
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::{fmt, EnvFilter};

use viewer_chart::{encode_png, render_colorbar, ChartKind, LineChart, MarkerCanvas, Series};
use viewer_common::{display_date, LatLng, Variable, ViewerError};
use viewer_protocol::PolygonStatsResponse;

use viewer::calendar::MonthGrid;
use viewer::config::ViewerConfig;
use viewer::export::{self, CsvExport};
use viewer::session::{Outcome, Session};
use viewer::state::ViewerState;
use viewer::tools::ActiveTool;

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 400;
const OVERLAY_WIDTH: u32 = 900;
const OVERLAY_HEIGHT: u32 = 600;
const COLORBAR_HEIGHT: u32 = 24;

/// Long Island Sound raster viewer
#[derive(Parser)]
#[command(name = "lis-viewer")]
#[command(about = "Browse the Long Island Sound OLCI raster archive", long_about = None)]
struct Cli {
    /// Path to config YAML file
    #[arg(short, long, default_value = "viewer.yaml", env = "VIEWER_CONFIG")]
    config: String,

    /// Log level
    #[arg(long, default_value = "warn", env = "RUST_LOG")]
    log_level: String,

    /// Variable to display
    #[arg(short, long, default_value = "cdom")]
    variable: Variable,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the raster value at a point
    Value {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Raster date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
    },
    /// Sample the raster along a line between two points
    Transect {
        #[arg(long)]
        start_lat: f64,
        #[arg(long)]
        start_lon: f64,
        #[arg(long)]
        end_lat: f64,
        #[arg(long)]
        end_lon: f64,
        /// Raster date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Write the profile as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Render the profile as a PNG chart
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Extract values at a point over a date range
    Timeseries {
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// First date of the range (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last date of the range, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Write the timeseries as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Render the timeseries as a PNG chart
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// Show in-situ observations for a date
    Overlay {
        /// Observation date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Render the overlay as a PNG image
        #[arg(long)]
        chart: Option<PathBuf>,
    },
    /// List dates with in-situ observations
    Dates,
    /// Compute raster statistics inside a polygon
    Polygon {
        /// Vertices as "lat,lon" pairs, e.g. -p 41.0,-73.0 -p 41.2,-72.8 ...
        #[arg(short = 'p', long = "point", required = true)]
        points: Vec<String>,
        /// Raster date (YYYY-MM-DD)
        #[arg(short, long)]
        date: NaiveDate,
        /// Write the statistics as CSV
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the month grid of the date picker
    Calendar {
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
        /// Highlight this date as selected
        #[arg(short, long)]
        selected: Option<NaiveDate>,
    },
    /// Render the color ramp for the current variable as a PNG strip
    Colorbar {
        /// Colormap name (turbo, viridis, magma)
        #[arg(long, default_value = "turbo")]
        colormap: viewer_common::Colormap,
        #[arg(long, default_value = "colorbar.png")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    fmt().with_env_filter(filter).with_target(false).init();

    let config = ViewerConfig::load(&cli.config)?;
    run(cli, config).await
}

async fn run(cli: Cli, config: ViewerConfig) -> anyhow::Result<()> {
    let today = chrono::Utc::now().date_naive();
    let mut state = ViewerState::new(&config, today);
    state.set_variable(cli.variable);
    let session = Session::new(&config)?;

    match cli.command {
        Commands::Value { lat, lon, date } => {
            state.set_date(date);
            state.tools.select(ActiveTool::PointQuery);
            let request = state
                .tools
                .handle_click(LatLng::new(lat, lon))
                .context("point query click produced no request")?;

            match session.execute(&state, request, None, None).await {
                Ok(Outcome::PointValue { point, value }) => {
                    let settings = state.variable().settings();
                    match value {
                        Some(v) => println!(
                            "{} at ({}, {}) on {}: {:.3} {}",
                            settings.label,
                            point.lat,
                            point.lon,
                            display_date(date),
                            v,
                            settings.units
                        ),
                        None => println!("No data at this location"),
                    }
                }
                Ok(_) => {}
                Err(e) => return report(e),
            }
        }

        Commands::Transect {
            start_lat,
            start_lon,
            end_lat,
            end_lon,
            date,
            csv,
            chart,
        } => {
            state.set_date(date);
            state.tools.select(ActiveTool::Transect);
            state.tools.handle_click(LatLng::new(start_lat, start_lon));
            let request = state
                .tools
                .handle_click(LatLng::new(end_lat, end_lon))
                .context("second transect click produced no request")?;

            match session.execute(&state, request, None, None).await {
                Ok(Outcome::Transect {
                    start,
                    end,
                    profile,
                }) => {
                    let samples = profile.valid_samples();
                    println!(
                        "Transect profile: {} samples, {} with data",
                        profile.values.len(),
                        samples.len()
                    );

                    if let Some(path) = csv {
                        let export =
                            export::transect_csv(&profile, start, end, state.variable());
                        write_csv(&export, &path)?;
                    }
                    if let Some(path) = chart {
                        let series = Series::with_points(
                            state.variable().settings().axis_label(),
                            samples
                                .iter()
                                .map(|(d, v)| viewer_chart::DataPoint::new(format!("{:.2}", d), *v))
                                .collect(),
                        );
                        let image =
                            LineChart::new(CHART_WIDTH, CHART_HEIGHT, ChartKind::Transect)
                                .render(&series)?;
                        write_png(&image, &path)?;
                    }
                }
                Ok(_) => {}
                Err(e) => return report(e),
            }
        }

        Commands::Timeseries {
            lat,
            lon,
            start,
            end,
            csv,
            chart,
        } => {
            state.tools.select(ActiveTool::Timeseries);
            let request = state
                .tools
                .handle_click(LatLng::new(lat, lon))
                .context("timeseries click produced no request")?;

            let pb = ProgressBar::new(0);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} dates")
                    .expect("Invalid progress bar template")
                    .progress_chars("##-"),
            );
            let mut on_progress = |done: usize, total: usize| {
                pb.set_length(total as u64);
                pb.set_position(done as u64);
            };

            let result = session
                .execute(&state, request, Some((start, end)), Some(&mut on_progress))
                .await;
            pb.finish_and_clear();

            match result {
                Ok(Outcome::Timeseries(ts)) => {
                    println!(
                        "Timeseries at ({}, {}): {} of {} dates with data",
                        ts.location.lat,
                        ts.location.lon,
                        ts.values.len(),
                        (end - start).num_days() + 1
                    );

                    if let Some(path) = csv {
                        let export = export::timeseries_csv(&ts, state.variable());
                        write_csv(&export, &path)?;
                    }
                    if let Some(path) = chart {
                        let series = Series::with_points(
                            state.variable().settings().axis_label(),
                            ts.dates
                                .iter()
                                .zip(ts.values.iter())
                                .map(|(d, v)| {
                                    viewer_chart::DataPoint::new(d.format("%Y-%m-%d").to_string(), *v)
                                })
                                .collect(),
                        );
                        let image =
                            LineChart::new(CHART_WIDTH, CHART_HEIGHT, ChartKind::Timeseries)
                                .render(&series)?;
                        write_png(&image, &path)?;
                    }
                }
                Ok(_) => {}
                Err(e) => return report(e),
            }
        }

        Commands::Overlay { date, chart } => {
            state.set_date(date);
            let request = state
                .tools
                .select(ActiveTool::InSituOverlay)
                .context("overlay selection produced no request")?;

            match session.execute(&state, request, None, None).await {
                Ok(Outcome::Overlay(points)) => {
                    println!(
                        "{} in-situ observations on {}",
                        points.len(),
                        display_date(date)
                    );
                    for (point, value) in &points {
                        println!("  ({:.4}, {:.4}): {:.3}", point.lat, point.lon, value);
                    }

                    if let Some(path) = chart {
                        let settings = state.variable().settings();
                        let ramp = state.colormap().ramp();
                        let mut canvas =
                            MarkerCanvas::new(OVERLAY_WIDTH, OVERLAY_HEIGHT, state.bounds());
                        for (point, value) in &points {
                            canvas.draw_marker(*point, *value, &ramp, settings.max)?;
                        }
                        write_png(&canvas.into_image(), &path)?;
                    }
                }
                Ok(_) => {}
                Err(e) => return report(e),
            }
        }

        Commands::Dates => {
            let dates = session.available_dates(&state).await.map_err(anyhow_err)?;
            if dates.is_empty() {
                println!("No in-situ observations for {}", state.variable());
            } else {
                println!("Dates with in-situ observations for {}:", state.variable());
                for date in dates {
                    println!("  {}", date.format("%Y-%m-%d"));
                }
            }
        }

        Commands::Polygon { points, date, csv } => {
            state.set_date(date);
            state.tools.select(ActiveTool::PolygonStats);
            for spec in &points {
                state.tools.handle_click(parse_point(spec)?);
            }
            let request = state
                .tools
                .complete_polygon()
                .map_err(anyhow_err)?
                .context("polygon tool produced no request")?;

            match session.execute(&state, request, None, None).await {
                Ok(Outcome::PolygonStats { polygon, stats }) => {
                    println!("{}", stats_table(&state, &stats));
                    if let Some(path) = csv {
                        let export =
                            export::polygon_stats_csv(&stats, &polygon, state.variable(), date);
                        write_csv(&export, &path)?;
                    }
                }
                Ok(_) => {}
                Err(e) => return report(e),
            }
        }

        Commands::Calendar {
            year,
            month,
            selected,
        } => {
            let grid = MonthGrid::build(year, month, selected, today).map_err(anyhow_err)?;
            print_calendar(&grid);
        }

        Commands::Colorbar { colormap, out } => {
            let settings = state.variable().settings();
            let image = render_colorbar(
                &colormap.ramp(),
                settings.max,
                CHART_WIDTH,
                COLORBAR_HEIGHT,
            )
            .map_err(anyhow_err)?;
            write_png(&image, &out)?;
        }
    }

    Ok(())
}

/// Show a backend failure the way the UI would: no-data results are a normal
/// message, everything else is an error.
fn report(e: ViewerError) -> anyhow::Result<()> {
    if e.is_no_data() {
        println!("{}", e.user_message());
        Ok(())
    } else {
        Err(anyhow::anyhow!(e.user_message()))
    }
}

fn anyhow_err(e: ViewerError) -> anyhow::Error {
    anyhow::anyhow!(e.user_message())
}

fn parse_point(spec: &str) -> anyhow::Result<LatLng> {
    let (lat, lon) = spec
        .split_once(',')
        .with_context(|| format!("Expected lat,lon but got: {}", spec))?;
    Ok(LatLng::new(
        lat.trim().parse().context("Invalid latitude")?,
        lon.trim().parse().context("Invalid longitude")?,
    ))
}

fn write_csv(export: &CsvExport, path: &PathBuf) -> anyhow::Result<()> {
    std::fs::write(path, &export.content)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn write_png(image: &image::RgbaImage, path: &PathBuf) -> anyhow::Result<()> {
    let bytes = encode_png(image).map_err(anyhow_err)?;
    std::fs::write(path, bytes)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn stats_table(state: &ViewerState, stats: &PolygonStatsResponse) -> String {
    let settings = state.variable().settings();
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_header(vec![format!(
            "Polygon Statistics: {} ({})",
            settings.label, settings.units
        )]);

    if let Some((mean, min, max, std)) = stats.stats() {
        table.add_row(vec!["Mean:", &format!("{:.3}", mean)]);
        table.add_row(vec!["Min:", &format!("{:.3}", min)]);
        table.add_row(vec!["Max:", &format!("{:.3}", max)]);
        table.add_row(vec!["Std Dev:", &format!("{:.3}", std)]);
    }
    table.add_row(vec!["Valid Pixels:", &format!("{}", stats.count)]);

    table.to_string()
}

fn print_calendar(grid: &MonthGrid) {
    println!("{}", grid.title());
    println!(" Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                if !cell.in_month {
                    "  . ".to_string()
                } else if cell.selected {
                    format!("[{:2}]", cell.date.day())
                } else {
                    format!(" {:2} ", cell.date.day())
                }
            })
            .collect();
        println!("{}", row.join(" "));
    }
}
