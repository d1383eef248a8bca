use std::process;

use clap::Parser;
use log::{debug, error};

use order_gen::config::GeneratorConfig;
use order_gen::error::GenError;
use order_gen::generator::{with_thousands, OrderGenerator};

const RULE_WIDTH: usize = 60;

/// Every generation parameter is a constant of `order_gen::config`; the CLI only
/// offers `--help` and `--version`.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let _cli = Cli::parse();

    if let Err(e) = run(GeneratorConfig::default()) {
        debug!("Generation aborted: {:?}", e);
        error!("Order generation failed");
        eprintln!("\nError: {e}");
        process::exit(1);
    }
}

fn run(config: GeneratorConfig) -> Result<(), GenError> {
    let rule = "=".repeat(RULE_WIDTH);
    println!("{rule}");
    println!(
        "Generating {} order records",
        with_thousands(config.total_rows)
    );
    println!("Output file: {}", config.output_file.display());
    println!("Date range: {} to {}", config.start_date, config.end_date);
    println!("{rule}\n");

    let output_file = config.output_file.clone();
    let load_statement = config.load_data_statement();
    let mut generator = OrderGenerator::new(config)?;
    let summary = generator.write_to_path(&output_file, |progress| println!("{progress}"))?;

    println!("\n{rule}");
    println!("Data generation complete");
    println!("File: {}", summary.path.display());
    println!("Rows: {}", with_thousands(summary.rows));
    println!("Size: {:.1} MB", summary.megabytes());
    println!("Time: {:.2?}", summary.elapsed);
    println!("{rule}\n");

    let dashes = "-".repeat(RULE_WIDTH);
    println!("Next step: import with a GUI wizard or run the following SQL");
    println!("{dashes}");
    println!("{load_statement}");
    println!("{dashes}");

    Ok(())
}
