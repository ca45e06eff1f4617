use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use lobviz_rs::config;
use lobviz_rs::gen;
use lobviz_rs::loader;
use lobviz_rs::render::dashboard;
use lobviz_rs::render::theme::Theme;
use lobviz_rs::telemetry;
use lobviz_rs::transform::{depth, latency, trades};

#[derive(Parser)]
#[command(
    name = "lobviz",
    about = "Renders lob_engine CSV dumps into a dashboard image"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Load book/latency/trade CSVs from a directory and write the dashboard
    Render {
        data_dir: PathBuf,
        /// Output image path (defaults to <data-dir>/dashboard.png)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Config file name, without extension
        #[arg(long, default_value = "lobviz")]
        config: String,
    },
    /// Write synthetic sample CSVs, standing in for `lob_engine --dump-data`
    Gen {
        data_dir: PathBuf,
        #[arg(long, default_value_t = 100_000)]
        trades: usize,
        #[arg(long, default_value_t = 7)]
        seed: u64,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            data_dir,
            out,
            config: config_name,
        } => {
            let cfg = config::load_config(&config_name);
            telemetry::init_tracing(&cfg.logging);

            println!("Loading data from {}/...", data_dir.display());
            let data = loader::load_dir(&data_dir)
                .with_context(|| format!("loading datasets from {}", data_dir.display()))?;
            println!("  Book levels: {}", data.book.len());
            println!("  Latency samples: {}", data.latency.len());
            println!("  Trades: {}", data.trades.len());

            let depth_view = depth::build_depth(&data.book);
            let samples: Vec<u64> = data.latency.iter().map(|s| s.sample_ns).collect();
            let latency_summary = latency::summarize(&samples, cfg.render.clip_percentile);
            let trade_series = trades::reduce(&data.trades, &cfg.render);

            let out = out.unwrap_or_else(|| data_dir.join("dashboard.png"));
            dashboard::render_dashboard(
                &out,
                &depth_view,
                latency_summary.as_ref(),
                trade_series.as_ref(),
                &cfg.render,
                &Theme::default(),
            )
            .with_context(|| format!("rendering {}", out.display()))?;
            println!("Saved dashboard to {}", out.display());
        }
        Command::Gen {
            data_dir,
            trades: count,
            seed,
        } => {
            telemetry::init_tracing(&config::LoggingConfig::default());
            gen::write_sample_data(&data_dir, count, seed)?;
            println!("Wrote sample data to {}/", data_dir.display());
        }
    }

    Ok(())
}
