//! Console walkthrough of the deepcopy engine

use anyhow::{bail, Result};
use clap::{ArgAction, Parser};
use deepcopy::DeepCopier;
use deepcopy_demo::Scenario;
use log::LevelFilter;

#[derive(Parser)]
#[command(name = "deepcopy-demo")]
#[command(version)]
#[command(about = "Deep-copy sample object graphs and verify the copies", long_about = None)]
struct Cli {
    /// Scenario to run
    #[arg(short, long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,

    /// Increase log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let mut builder = pretty_env_logger::formatted_builder();
    builder.filter_level(level);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let copier = DeepCopier::new();
    let reports = cli.scenario.run(&copier)?;

    println!("\n******* THE END OF THE DEMO *******\n");
    let mut failed = 0;
    for report in &reports {
        println!("{}", report);
        if !report.passed() {
            failed += 1;
        }
    }
    if failed > 0 {
        bail!("{} of {} scenarios failed", failed, reports.len());
    }
    Ok(())
}
