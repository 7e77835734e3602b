//! # sheetsum-cli
//!
//! Command-line interface for spreadsheet column summaries.

use anyhow::{bail, Context, Result};
use clap::Parser;
use sheetsum_core::{
    CsvRowSource, RowSource, SummaryGenerator, SummaryRow, ValueCoercer, XlsxRowSource,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// sheetsum - column sums and averages for spreadsheet files
#[derive(Parser)]
#[command(name = "sheetsum")]
#[command(author, version, about = "Column sum/avg summaries for spreadsheet files", long_about = None)]
struct Cli {
    /// Spreadsheet file to summarize (.xlsx, .csv or .tsv)
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Column to summarize (repeatable)
    #[arg(short = 'c', long = "column", value_name = "NAME", required = true)]
    columns: Vec<String>,

    /// Currency symbol to strip from numeric text (repeatable)
    #[arg(long = "currency", value_name = "SYMBOL")]
    currencies: Vec<String>,

    /// Output format (json, table)
    #[arg(short = 'f', long = "format", default_value = "table")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Output format for results.
#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    /// JSON output
    Json,
    /// Aligned table output (default)
    #[default]
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.verbose {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .init();
    }

    let source = open_source(&cli.file)?;
    let generator = SummaryGenerator::new(ValueCoercer::new(cli.currencies));
    let summary = generator
        .generate(source.as_ref(), &cli.columns)
        .with_context(|| format!("Failed to summarize {}", cli.file.display()))?;

    print_summary(&summary, cli.format)
}

/// Pick a row source implementation from the file extension.
fn open_source(path: &Path) -> Result<Box<dyn RowSource>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    match extension.as_str() {
        "xlsx" | "xlsm" => {
            let source = XlsxRowSource::open(path)
                .with_context(|| format!("Failed to open workbook {}", path.display()))?;
            Ok(Box::new(source))
        }
        "csv" => {
            let source = CsvRowSource::open(path)
                .with_context(|| format!("Failed to open CSV file {}", path.display()))?;
            Ok(Box::new(source))
        }
        "tsv" => {
            let source = CsvRowSource::open_with_delimiter(path, b'\t')
                .with_context(|| format!("Failed to open TSV file {}", path.display()))?;
            Ok(Box::new(source))
        }
        other => bail!("Unsupported file extension: '{other}'"),
    }
}

/// Print the summary in the selected format.
fn print_summary(summary: &[SummaryRow], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(summary)?);
        }
        OutputFormat::Table => {
            let width = summary
                .iter()
                .map(|row| row.column.len())
                .chain(std::iter::once("column".len()))
                .max()
                .unwrap_or_default();

            println!("{:<width$}  {:>20}  {:>20}", "column", "sum", "avg");
            for row in summary {
                println!("{:<width$}  {:>20}  {:>20}", row.column, row.sum, row.avg);
            }
        }
    }
    Ok(())
}
