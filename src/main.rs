use anyhow::Result;
use std::env;
use std::process;

use owed_breakdown::config::USAGE;
use owed_breakdown::{build_report, build_source, logging, SourceConfig};

fn main() {
    logging::init();

    let args: Vec<String> = env::args().skip(1).collect();

    let config = match SourceConfig::from_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        // Source errors carry their failure class up front
        match e.downcast_ref::<owed_breakdown::SourceError>() {
            Some(source_error) => {
                eprintln!("❌ {}: {}", source_error.class(), source_error);
                if let Some(hint) = source_error.hint() {
                    eprintln!("   {}", hint);
                }
            }
            None => eprintln!("❌ {:#}", e),
        }
        process::exit(1);
    }
}

fn run(config: &SourceConfig) -> Result<()> {
    let source = build_source(config)?;
    let report = build_report(source.as_ref())?;
    print!("{}", report);
    Ok(())
}
