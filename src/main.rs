use clap::{CommandFactory, FromArgMatches, Parser, Subcommand};
use fingerforge::config::Config;
use fingerforge::sizes::get_all_sizes;
use std::process;
use tracing::{error, info, Level};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config file; flags given on the command line override it.
    #[arg(global = true, long = "config")]
    config_file: Option<String>,

    #[arg(global = true, long, default_value_t = false)]
    debug: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decide a finger for every note of a passage.
    Finger(cmd::finger::FingerArgs),
    /// Score an existing fingering.
    Audit(cmd::audit::AuditArgs),
    /// List hand sizes and their spans.
    Sizes,
}

fn main() {
    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());

    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let (cli_config, sub_matches) = match &cli.command {
        Commands::Finger(args) => (&args.config, matches.subcommand_matches("finger")),
        Commands::Audit(args) => (&args.config, matches.subcommand_matches("audit")),
        Commands::Sizes => {
            reports::print_size_table(&get_all_sizes());
            return;
        }
    };

    let config = match (&cli.config_file, sub_matches) {
        (Some(path), Some(sub)) => {
            info!("⚙️  Loading config from: {}", path);
            let mut file_config = Config::load_from_file(path).unwrap_or_else(|e| {
                error!("{}", e);
                process::exit(1);
            });
            file_config.merge_from_cli(cli_config, sub);
            file_config
        }
        _ => cli_config.clone(),
    };

    let result = match &cli.command {
        Commands::Finger(args) => cmd::finger::run(args, &config),
        Commands::Audit(args) => cmd::audit::run(args, &config),
        Commands::Sizes => Ok(()),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}
