use crate::reports;
use clap::Args;
use fingerforge::api;
use fingerforge::config::Config;
use fingerforge::error::FfResult;
use fingerforge::loader;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct FingerArgs {
    #[command(flatten)]
    pub config: Config,

    /// Passage to finger (.csv or .json).
    #[arg(short, long)]
    pub input: String,

    /// Where to write the fingered passage (.csv or .json).
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the per-step diagnostics as JSON.
    #[arg(long)]
    pub report_json: Option<String>,

    #[arg(long, default_value_t = false)]
    pub quiet: bool,
}

pub fn run(args: &FingerArgs, config: &Config) -> FfResult<()> {
    let mut events = loader::load_passage(&args.input)?;

    info!(
        "🎹 Fingering {} events for the {} hand (size {})",
        events.len(),
        config.hand.side,
        config.hand.size
    );
    let report = api::finger_passage(&mut events, config)?;

    if !args.quiet {
        reports::print_fingering_table(&events, &report);
    }

    if let Some(path) = &args.output {
        loader::save_passage(path, &events)?;
    }
    if let Some(path) = &args.report_json {
        let writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(writer, &report)?;
        info!("📝 Step report written to {}", path);
    }
    Ok(())
}
