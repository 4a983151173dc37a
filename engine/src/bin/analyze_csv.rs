// Offline regime and technicals report for a CSV of candles; `--dump-indicators` writes per-bar values instead.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use engine::analysis::{RegimeClassifier, TechnicalsSummary};
use engine::data::{CandleCsvLoader, CsvFormat};
use engine::indicators::{IndicatorCalculator, IndicatorEngine};
use engine::Outcome;
use serde_json::json;
use shared::models::Candle;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "analyze-csv", version, about = "Classify the market regime of a candle CSV")]
struct Cli {
    /// CSV with a timestamp,open,high,low,close[,volume] header
    path: PathBuf,

    /// Symbol label for the report
    #[arg(long, default_value = "")]
    symbol: String,

    /// Timeframe label for the report
    #[arg(long, default_value = "")]
    timeframe: String,

    /// Field delimiter
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Numbers use ',' as the decimal mark and '.' for thousands
    #[arg(long, default_value_t = false)]
    decimal_comma: bool,

    /// Pretty-print the JSON report
    #[arg(long, default_value_t = false)]
    pretty: bool,

    /// Write per-bar indicator values as CSV instead of the report
    #[arg(long, default_value_t = false)]
    dump_indicators: bool,
}

fn reason_json<T>(outcome: &Outcome<T>) -> serde_json::Value {
    match outcome.fallback_reason() {
        Some(reason) => json!(reason.to_string()),
        None => serde_json::Value::Null,
    }
}

fn dump_indicators(candles: &[Candle]) -> anyhow::Result<()> {
    let engine = IndicatorEngine::new();
    let series = engine.compute(candles);
    let mut wtr = csv::Writer::from_writer(io::stdout().lock());

    // Columns are labelled with each calculator's configured name, e.g. "ADX(14)"
    let mut header = vec!["timestamp".to_string(), "close".to_string()];
    header.extend(engine.calculators().iter().map(|(_, calc)| calc.name().to_string()));
    wtr.write_record(&header)?;

    let cell = |value: Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    for (i, candle) in candles.iter().enumerate() {
        wtr.write_record([
            candle.timestamp.to_string(),
            candle.close.to_string(),
            cell(series.adx[i]),
            cell(series.atr[i]),
            cell(series.sma[i]),
            cell(series.macd_histogram[i]),
            cell(series.bb_width[i]),
            cell(series.rsi[i]),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    // stdout carries the report; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if !cli.delimiter.is_ascii() {
        anyhow::bail!("delimiter must be a single ASCII character, got {:?}", cli.delimiter);
    }
    let csv_format = CsvFormat { delimiter: cli.delimiter as u8, decimal_comma: cli.decimal_comma };

    let candles = CandleCsvLoader::load_candles_from_csv(&cli.path, csv_format)
        .with_context(|| format!("loading candles from {}", cli.path.display()))?;

    if cli.dump_indicators {
        return dump_indicators(&candles);
    }

    let regime = RegimeClassifier::new().classify(&candles);
    let technicals = TechnicalsSummary::new().summarize(&candles);

    let report = json!({
        "symbol": cli.symbol,
        "timeframe": cli.timeframe,
        "bars": candles.len(),
        "regime": regime.value(),
        "regime_fallback_reason": reason_json(&regime),
        "technicals": technicals.value(),
        "technicals_fallback_reason": reason_json(&technicals),
        "indicators": IndicatorEngine::new().catalog(),
    });

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", rendered);
    Ok(())
}
