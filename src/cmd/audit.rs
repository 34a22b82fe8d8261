use crate::reports;
use clap::Args;
use fingerforge::api;
use fingerforge::config::Config;
use fingerforge::error::FfResult;
use fingerforge::loader;

#[derive(Args, Debug, Clone)]
pub struct AuditArgs {
    #[command(flatten)]
    pub config: Config,

    /// Fingered passage (.csv or .json); every event needs a finger.
    #[arg(short, long)]
    pub input: String,
}

pub fn run(args: &AuditArgs, config: &Config) -> FfResult<()> {
    let events = loader::load_passage(&args.input)?;

    println!("\n🔎 === FINGERING AUDIT === 🔎");
    let audit = api::audit_fingering(&events, config)?;
    reports::print_audit_report(&events, &audit);
    Ok(())
}
