//! wearvar CLI - Command-line interface for wearvar
//!
//! Commands:
//! - analyze: Import a sensor CSV and print a full variability report

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use wearvar::report::{ReportEncoder, ReportParameters};
use wearvar::{
    import_accelerometer_csv, import_sensor_csv, MetricsError, TimeSeriesTable,
    DEFAULT_TIMESTAMP_FORMAT, WEARVAR_VERSION,
};

/// wearvar - Variability metrics for longitudinal wearable sensor streams
#[derive(Parser)]
#[command(name = "wearvar")]
#[command(version = WEARVAR_VERSION)]
#[command(about = "Compute variability metrics from wearable sensor exports", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Import a sensor CSV and print a variability report as JSON
    Analyze {
        /// Input CSV file path
        #[arg(short, long)]
        input: PathBuf,

        /// Input file shape
        #[arg(long, default_value = "sensor")]
        format: InputFormat,

        /// Timestamp format (chrono strftime syntax)
        #[arg(long, default_value = DEFAULT_TIMESTAMP_FORMAT)]
        timestamp_format: String,

        /// Range band half-width, in standard deviations
        #[arg(long, default_value = "1.0")]
        sd_multiplier: f64,

        /// Time-per-sample multiplier for range durations
        #[arg(long, default_value = "1.0")]
        sample_rate: f64,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Two columns: timestamp, sensor value
    Sensor,
    /// Four columns: timestamp, x, y, z (collapsed to a magnitude scalar)
    Accelerometer,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            input,
            format,
            timestamp_format,
            sd_multiplier,
            sample_rate,
            output,
        } => match run_analyze(
            &input,
            format,
            &timestamp_format,
            sd_multiplier,
            sample_rate,
            &output,
        ) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("error: {e}");
                ExitCode::FAILURE
            }
        },
    }
}

fn run_analyze(
    input: &PathBuf,
    format: InputFormat,
    timestamp_format: &str,
    sd_multiplier: f64,
    sample_rate: f64,
    output: &PathBuf,
) -> Result<(), MetricsError> {
    let table: TimeSeriesTable = match format {
        InputFormat::Sensor => import_sensor_csv(input, timestamp_format)?,
        InputFormat::Accelerometer => import_accelerometer_csv(input, timestamp_format)?,
    };

    let encoder = ReportEncoder::new();
    let params = ReportParameters {
        sd_multiplier,
        sample_rate,
    };
    let report = encoder.encode(&table, params);

    if output.as_os_str() == "-" {
        // Pretty-print when a human is watching
        let json = if atty::is(atty::Stream::Stdout) {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        let mut stdout = io::stdout();
        writeln!(stdout, "{json}")?;
    } else {
        let json = serde_json::to_string_pretty(&report)?;
        fs::write(output, json)?;
    }

    Ok(())
}
