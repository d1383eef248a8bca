use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};
use rand::distributions::Distribution;
use rand::rngs::ThreadRng;
use rand::Rng;

use crate::config::GeneratorConfig;
use crate::error::GenError;
use crate::order::{self, OrderRecord};
use crate::sampler::OrderSampler;

/// Snapshot handed to the progress callback at every batch boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub written: u64,
    pub total: u64,
}

/// What a finished run wrote, measured after the file was flushed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationSummary {
    pub path: PathBuf,
    pub rows: u64,
    /// File size as reported by the filesystem
    pub bytes: u64,
    pub elapsed: Duration,
}

#[derive(Debug)]
pub struct OrderGenerator<R = ThreadRng> {
    config: GeneratorConfig,
    sampler: OrderSampler,
    rng: R,
}

impl Progress {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            self.written as f64 / self.total as f64 * 100.0
        }
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Progress: {:>10} / {} ({:>5.1}%)",
            with_thousands(self.written),
            with_thousands(self.total),
            self.percent()
        )
    }
}

impl GenerationSummary {
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn megabytes(&self) -> f64 {
        self.bytes as f64 / 1024.0 / 1024.0
    }
}

/// Formats `n` with `,` between every group of three digits.
#[must_use]
pub fn with_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

impl OrderGenerator<ThreadRng> {
    /// Generator backed by the unseeded thread-local RNG, so every run differs.
    ///
    /// # Errors
    /// Errors when `config` does not pass [`GeneratorConfig::validate`]
    pub fn new(config: GeneratorConfig) -> Result<Self, GenError> {
        OrderGenerator::with_rng(config, rand::thread_rng())
    }
}

impl<R: Rng> OrderGenerator<R> {
    /// # Errors
    /// Errors when `config` does not pass [`GeneratorConfig::validate`]
    pub fn with_rng(config: GeneratorConfig, rng: R) -> Result<Self, GenError> {
        let sampler = OrderSampler::new(&config)?;
        Ok(OrderGenerator {
            config,
            sampler,
            rng,
        })
    }

    #[must_use]
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    pub fn next_record(&mut self) -> OrderRecord {
        self.sampler.sample(&mut self.rng)
    }

    /// Writes `total_rows` freshly sampled records to `writer` and returns how many
    /// were written. `on_progress` runs after every `batch_size` rows.
    ///
    /// # Errors
    /// Errors when serializing a record or flushing `writer` fails
    pub fn write_csv<W: io::Write>(
        &mut self,
        writer: W,
        mut on_progress: impl FnMut(Progress),
    ) -> Result<u64, GenError> {
        let total = self.config.total_rows;
        let batch_size = self.config.batch_size;
        let mut writer = order::csv_writer(writer);

        for written in 1..=total {
            let record = self.sampler.sample(&mut self.rng);
            writer.serialize(&record)?;
            if written % batch_size == 0 {
                let progress = Progress { written, total };
                debug!("Batch boundary reached: {written}/{total} rows");
                on_progress(progress);
            }
        }
        writer.flush()?;

        Ok(total)
    }

    /// Creates (or truncates) `path` and fills it with the configured rows.
    ///
    /// # Errors
    /// Errors when `path` cannot be created, written or stat'ed afterwards.
    /// A partially written file is left in place.
    pub fn write_to_path(
        &mut self,
        path: impl AsRef<Path>,
        on_progress: impl FnMut(Progress),
    ) -> Result<GenerationSummary, GenError> {
        let path = path.as_ref();
        info!(
            "Generating {} order records into {}",
            self.config.total_rows,
            path.display()
        );
        let start = Instant::now();

        let file = File::create(path)?;
        let rows = self.write_csv(file, on_progress)?;
        let bytes = fs::metadata(path)?.len();

        let elapsed = start.elapsed();
        info!("Wrote {rows} rows ({bytes} bytes) in {elapsed:.2?}");

        Ok(GenerationSummary {
            path: path.to_path_buf(),
            rows,
            bytes,
            elapsed,
        })
    }
}
