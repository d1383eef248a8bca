use chrono::{Duration, NaiveDateTime};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rust_decimal::Decimal;

use crate::config::{GeneratorConfig, SECONDS_PER_DAY};
use crate::error::GenError;
use crate::order::{OrderRecord, OrderStatus, NUM_DECIMAL_PLACES};

/// Draws [`OrderRecord`]s with every field sampled independently and uniformly
/// from the ranges of a validated [`GeneratorConfig`].
#[derive(Debug, Clone)]
pub struct OrderSampler {
    user_ids: Uniform<u32>,
    statuses: Vec<OrderStatus>,
    status_index: Uniform<usize>,
    amounts: Uniform<f64>,
    /// Whole-cent bounds inside the amount range, rounding never leaves them
    cent_bounds: (i64, i64),
    day_offsets: Uniform<i64>,
    seconds_of_day: Uniform<i64>,
    window_start: NaiveDateTime,
}

impl OrderSampler {
    /// # Errors
    /// Errors when `config` does not pass [`GeneratorConfig::validate`]
    pub fn new(config: &GeneratorConfig) -> Result<Self, GenError> {
        config.validate()?;
        Ok(OrderSampler {
            user_ids: Uniform::new_inclusive(*config.user_ids.start(), *config.user_ids.end()),
            statuses: config.statuses.clone(),
            status_index: Uniform::new(0, config.statuses.len()),
            amounts: Uniform::new_inclusive(*config.amounts.start(), *config.amounts.end()),
            cent_bounds: config.cent_bounds(),
            day_offsets: Uniform::new_inclusive(0, config.days_range()),
            seconds_of_day: Uniform::new(0, SECONDS_PER_DAY),
            window_start: config.window_start(),
        })
    }
}

impl Distribution<OrderRecord> for OrderSampler {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> OrderRecord {
        let user_id = self.user_ids.sample(rng);
        let status = self.statuses[self.status_index.sample(rng)];
        let amount = round_to_cents(self.amounts.sample(rng), self.cent_bounds);
        let offset = Duration::days(self.day_offsets.sample(rng))
            + Duration::seconds(self.seconds_of_day.sample(rng));
        OrderRecord {
            user_id,
            status,
            amount,
            created_at: self.window_start + offset,
        }
    }
}

/// Rounds half away from zero to two places, like a price column expects, then
/// pulls the result back inside `(min_cents, max_cents)`.
fn round_to_cents(raw: f64, (min_cents, max_cents): (i64, i64)) -> Decimal {
    #[allow(clippy::cast_possible_truncation)]
    let cents = (raw * 100.0).round() as i64;
    Decimal::new(cents.clamp(min_cents, max_cents), NUM_DECIMAL_PLACES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn tiny_config() -> GeneratorConfig {
        GeneratorConfig {
            total_rows: 5,
            batch_size: 5,
            user_ids: 1..=100,
            amounts: 1.0..=1000.0,
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn test_round_to_cents() {
        let bounds = (100, 100_000);
        assert_eq!(round_to_cents(1.0, bounds).to_string(), "1.00");
        assert_eq!(round_to_cents(12.345_6, bounds).to_string(), "12.35");
        assert_eq!(round_to_cents(999.994, bounds).to_string(), "999.99");
        assert_eq!(round_to_cents(999.999, bounds).to_string(), "1000.00");
        assert_eq!(round_to_cents(1.004, (101, 150)).to_string(), "1.01");
        assert_eq!(round_to_cents(1.496, (101, 149)).to_string(), "1.49");
    }

    #[test]
    fn test_samples_stay_in_bounds() {
        let config = tiny_config();
        let sampler = OrderSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let min_amount = Decimal::new(100, NUM_DECIMAL_PLACES);
        let max_amount = Decimal::new(100_000, NUM_DECIMAL_PLACES);

        for record in sampler.sample_iter(&mut rng).take(10_000) {
            assert!(config.user_ids.contains(&record.user_id));
            assert!(config.statuses.contains(&record.status));
            assert!(record.amount >= min_amount && record.amount <= max_amount);
            assert_eq!(record.amount.scale(), NUM_DECIMAL_PLACES);
            assert!(record.created_at >= config.window_start());
            assert!(record.created_at <= config.window_end());
        }
    }

    #[test]
    fn test_off_cent_bounds_stay_in_range() {
        let config = GeneratorConfig {
            amounts: 1.001..=1.019,
            ..tiny_config()
        };
        let sampler = OrderSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(13);
        let min_amount = Decimal::new(1001, 3);
        let max_amount = Decimal::new(1019, 3);

        for record in sampler.sample_iter(&mut rng).take(1_000) {
            assert!(record.amount >= min_amount && record.amount <= max_amount);
            assert_eq!(record.amount.to_string(), "1.01");
        }
    }

    #[test]
    fn test_range_without_whole_cent_rejected() {
        let config = GeneratorConfig {
            amounts: 1.001..=1.004,
            ..tiny_config()
        };
        assert!(matches!(
            OrderSampler::new(&config),
            Err(GenError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overflowing_amount_span_rejected() {
        let config = GeneratorConfig {
            amounts: -f64::MAX..=f64::MAX,
            ..tiny_config()
        };
        assert!(OrderSampler::new(&config).is_err());
    }

    #[test]
    fn test_samples_cover_every_category() {
        let config = tiny_config();
        let sampler = OrderSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let records: Vec<OrderRecord> = (&mut rng).sample_iter(&sampler).take(1_000).collect();

        for status in OrderStatus::ALL {
            assert!(records.iter().any(|r| r.status == status));
        }
        let second_day = NaiveDate::from_ymd_opt(2025, 1, 2).unwrap();
        assert!(records.iter().any(|r| r.created_at.date() == second_day));
        assert!(records.iter().any(|r| r.created_at.date() < second_day));
    }

    #[test]
    fn test_restricted_status_set() {
        let config = GeneratorConfig {
            statuses: vec![OrderStatus::Paid],
            ..tiny_config()
        };
        let sampler = OrderSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        assert!(sampler
            .sample_iter(&mut rng)
            .take(100)
            .all(|r| r.status == OrderStatus::Paid));
    }

    #[test]
    fn test_degenerate_ranges() {
        let config = GeneratorConfig {
            user_ids: 9..=9,
            amounts: 2.5..=2.5,
            end_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            ..tiny_config()
        };
        let sampler = OrderSampler::new(&config).unwrap();
        let mut rng = StdRng::seed_from_u64(5);
        let record = sampler.sample(&mut rng);
        assert_eq!(record.user_id, 9);
        assert_eq!(record.amount.to_string(), "2.50");
        assert_eq!(record.created_at.date(), config.start_date);
    }

    #[test]
    fn test_same_seed_same_records() {
        let sampler = OrderSampler::new(&tiny_config()).unwrap();
        let first: Vec<OrderRecord> = (&sampler)
            .sample_iter(StdRng::seed_from_u64(42))
            .take(20)
            .collect();
        let second: Vec<OrderRecord> = (&sampler)
            .sample_iter(StdRng::seed_from_u64(42))
            .take(20)
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = GeneratorConfig {
            statuses: vec![],
            ..tiny_config()
        };
        assert!(OrderSampler::new(&config).is_err());
    }
}
