use chart_core::common::{enums::Panel, time::Time};
use chart_core::config::ChartConfig;
use chart_core::dashboard::RenderContext;
use chart_core::display::{IndicatorPanel, PriceInfo};
use chart_core::segment::reference::segment_series;
use chart_core::series::{build_chart_data, ChartData, KLineBar, OhlcvRecord};
use chart_core::wire::{ApiResponse, KlinePayload};
use clap::{Parser, Subcommand};
use csv::Reader;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "chart-cli")]
#[command(about = "Average-crossing chart segmentation over saved dashboard data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbosity level
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Split one panel of a chart payload into above/below segments
    Split {
        /// Chart payload, bare or wrapped in an API response
        #[arg(short, long)]
        input: PathBuf,

        /// price, volume or volatility
        #[arg(short, long, default_value = "price")]
        panel: Panel,
    },

    /// Print the stats of every panel
    Stats {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Indicator panel and price info of k-line bars (csv or json)
    Kline {
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Build a chart payload from an OHLCV csv file
    Chart {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long, default_value = "BTC")]
        symbol: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    if let Err(e) = run(cli) {
        error!("{}", e);
        return Err(e);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let config = match &cli.config {
        Some(path) => ChartConfig::from_json(&fs::read_to_string(path)?)?,
        None => ChartConfig::default(),
    };
    debug!(?config, "loaded config");

    match cli.command {
        Commands::Split { input, panel } => {
            let data: ChartData = read_payload(&input)?;
            data.check()?;
            let series = match panel {
                Panel::Price => data.price_series()?,
                Panel::Volume => data.volume_series()?,
                Panel::Volatility => data.volatility_series()?,
            };
            match segment_series(&series) {
                Some((reference, pair)) => {
                    info!(%panel, points = series.len(), "split panel");
                    let out = json!({
                        "panel": panel,
                        "reference": reference,
                        "above": pair.above,
                        "below": pair.below,
                    });
                    println!("{}", serde_json::to_string_pretty(&out)?);
                }
                None => println!("{} panel has no values", panel),
            }
        }
        Commands::Stats { input } => {
            let data: ChartData = read_payload(&input)?;
            let mut ctx = RenderContext::new(config);
            let view = ctx.apply_chart(&data)?;
            println!("{} ({})", view.symbol, view.timeframe);
            for panel in &view.panels {
                println!("{:<10} {}", panel.panel, panel.stats);
            }
        }
        Commands::Kline { input } => {
            let payload = if is_csv(&input) {
                KlinePayload::from_bars(read_bars(&input)?, &config.indicator)?
            } else {
                let payload: KlinePayload = read_payload(&input)?;
                payload.check()?;
                payload
            };
            info!(bars = payload.kline.len(), "loaded k-line");
            match PriceInfo::from_bars(&payload.kline) {
                Some(price) => println!("{}", price),
                None => println!("no bars"),
            }
            println!("{}", IndicatorPanel::latest(&payload.indicators));
        }
        Commands::Chart { input, symbol } => {
            let mut rdr = Reader::from_reader(File::open(&input)?);
            let records = rdr
                .deserialize()
                .collect::<Result<Vec<OhlcvRecord>, _>>()?;
            let data = build_chart_data(&records, &symbol, config.volatility_window)?;
            info!(
                symbol = %symbol,
                rows = data.price_data.len(),
                "built chart data"
            );
            println!("{}", serde_json::to_string_pretty(&ApiResponse::ok(data))?);
        }
    }

    Ok(())
}

fn is_csv(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("csv")
}

/// Endpoint payloads are saved either with their `{success, data}` envelope
/// or as the bare data
fn read_payload<T: DeserializeOwned>(path: &Path) -> Result<T, Box<dyn Error>> {
    let body = fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&body)?;
    if value.get("success").is_some() {
        Ok(ApiResponse::<T>::parse(&body)?)
    } else {
        Ok(serde_json::from_value(value)?)
    }
}

/// Rows of `date,open,high,low,close,volume` with a header line
fn read_bars(path: &Path) -> Result<Vec<KLineBar>, Box<dyn Error>> {
    let mut rdr = Reader::from_reader(File::open(path)?);
    let mut bars = Vec::new();
    for result in rdr.records() {
        let record = result?;
        bars.push(parse_bar(&record)?);
    }
    Ok(bars)
}

fn parse_bar(record: &csv::StringRecord) -> Result<KLineBar, Box<dyn Error>> {
    if record.len() < 6 {
        return Err(format!("expected 6 columns, got {}", record.len()).into());
    }
    Ok(KLineBar::new(
        Time::parse(&record[0])?,
        record[1].trim().parse()?,
        record[2].trim().parse()?,
        record[3].trim().parse()?,
        record[4].trim().parse()?,
        record[5].trim().parse()?,
    ))
}
