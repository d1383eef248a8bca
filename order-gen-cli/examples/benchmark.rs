//! Times generating one million order rows into a sink, so only sampling and
//! serialization are measured. Run with `RUST_LOG=warn cargo run --release --example benchmark`

use std::error::Error;
use std::io;
use std::time::Instant;

use log::warn;

use order_gen::config::GeneratorConfig;
use order_gen::generator::OrderGenerator;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = GeneratorConfig {
        total_rows: 1_000_000,
        batch_size: 250_000,
        ..GeneratorConfig::default()
    };
    let mut generator = OrderGenerator::new(config)?;

    let start = Instant::now();
    let rows = generator.write_csv(io::sink(), |progress| {
        warn!("{} after {:.2?}", progress, start.elapsed());
    })?;
    warn!("Generating {} rows took: {:.2?}", rows, start.elapsed());

    Ok(())
}
