//! Prints a handful of order rows to stdout, with a header row, to eyeball the format
//! before generating a full file. can be run with `cargo run --example preview`

use std::error::Error;
use std::io;

use csv::WriterBuilder;
use rand::rngs::StdRng;
use rand::SeedableRng;

use order_gen::config::GeneratorConfig;
use order_gen::generator::OrderGenerator;

const PREVIEW_ROWS: usize = 10;

fn main() -> Result<(), Box<dyn Error>> {
    let rng = StdRng::from_entropy();
    let mut generator = OrderGenerator::with_rng(GeneratorConfig::default(), rng)?;

    let mut writer = WriterBuilder::new().from_writer(io::stdout());
    for _ in 0..PREVIEW_ROWS {
        writer.serialize(generator.next_record())?;
    }
    writer.flush()?;

    Ok(())
}
