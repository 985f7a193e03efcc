use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use comfy_table::Table;
use coolrate_core::{pipeline, DerivativeScope, PipelineConfig, PipelineSummary, SheetLayout};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Average temperature and cooling rate for a directory of probe recordings",
    long_about = None
)]
struct Cli {
    /// Directory containing the semicolon-separated sample files
    path: PathBuf,

    /// TOML file with pipeline settings; flags given here take precedence
    #[arg(long)]
    config: Option<PathBuf>,

    /// Workbook to write (overwritten if it exists)
    #[arg(long)]
    output: Option<PathBuf>,

    /// One combined sheet or one sheet per input file
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// Reset the cooling-rate derivative at each file or run it across all files
    #[arg(long, value_enum)]
    derivative: Option<DerivativeArg>,

    /// PNG file for the per-sample figure
    #[arg(long)]
    figure: Option<PathBuf>,

    /// Skip rendering the figure
    #[arg(long)]
    no_figure: bool,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    json_summary: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    Single,
    PerFile,
}

impl From<LayoutArg> for SheetLayout {
    fn from(value: LayoutArg) -> Self {
        match value {
            LayoutArg::Single => SheetLayout::Single,
            LayoutArg::PerFile => SheetLayout::PerFile,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum DerivativeArg {
    PerFile,
    Global,
}

impl From<DerivativeArg> for DerivativeScope {
    fn from(value: DerivativeArg) -> Self {
        match value {
            DerivativeArg::PerFile => DerivativeScope::PerFile,
            DerivativeArg::Global => DerivativeScope::Global,
        }
    }
}

impl Cli {
    fn pipeline_config(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => PipelineConfig::default(),
        };

        if let Some(output) = &self.output {
            config.output = output.clone();
        }
        if let Some(layout) = self.layout {
            config.layout = layout.into();
        }
        if let Some(derivative) = self.derivative {
            config.derivative = derivative.into();
        }
        if let Some(figure) = &self.figure {
            config.figure.path = figure.clone();
        }
        if self.no_figure {
            config.figure.enabled = false;
        }

        Ok(config)
    }
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = cli.pipeline_config()?;
    let summary = pipeline::run(&cli.path, &config)
        .with_context(|| format!("failed to process {}", cli.path.display()))?;

    info!(
        files = summary.file_count(),
        rows = summary.row_count,
        "Cooling analysis complete"
    );

    if cli.json_summary {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary_table(&summary));
        println!("Workbook: {}", summary.workbook.path.display());
        if let Some(path) = &summary.figure_path {
            println!("Figure:   {}", path.display());
        }
    }

    Ok(())
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env());
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn summary_table(summary: &PipelineSummary) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        "File",
        "Rows",
        "First Avg_Temp",
        "Last Avg_Temp",
        "Mean Cooling_Rate",
    ]);
    for sample in &summary.samples {
        table.add_row(vec![
            sample.file.clone(),
            sample.rows.to_string(),
            format_value(sample.first_avg_temp),
            format_value(sample.last_avg_temp),
            format_value(sample.mean_cooling_rate),
        ]);
    }
    table
}

fn format_value(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.3}"))
        .unwrap_or_else(|| "-".to_string())
}
