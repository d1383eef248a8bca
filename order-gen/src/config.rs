use std::ops::RangeInclusive;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::GenError;
use crate::order::OrderStatus;

pub const TOTAL_ROWS: u64 = 10_000_000;
/// Rows between two progress reports
pub const BATCH_SIZE: u64 = 1_000_000;
pub const OUTPUT_FILE: &str = "orders_data.csv";

pub const USER_ID_MIN: u32 = 1;
pub const USER_ID_MAX: u32 = 100_000;
pub const AMOUNT_MIN: f64 = 1.0;
pub const AMOUNT_MAX: f64 = 1000.0;
pub const START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 1, 1) {
    Some(date) => date,
    None => panic!("START_DATE is not a calendar date"),
};
pub const END_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2025, 12, 31) {
    Some(date) => date,
    None => panic!("END_DATE is not a calendar date"),
};

pub const SECONDS_PER_DAY: i64 = 86_400;
/// Largest amount magnitude whose cent count is still exact in an `f64`
pub const MAX_ABS_AMOUNT: f64 = 1e13;

/// Everything that shapes a generated order file. The [`Default`] is the fixed
/// fixture setup; other values exist for library callers and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorConfig {
    pub total_rows: u64,
    pub batch_size: u64,
    pub output_file: PathBuf,
    pub user_ids: RangeInclusive<u32>,
    pub statuses: Vec<OrderStatus>,
    pub amounts: RangeInclusive<f64>,
    /// First day of the `created_at` window
    pub start_date: NaiveDate,
    /// Last day of the `created_at` window, included up to 23:59:59
    pub end_date: NaiveDate,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            total_rows: TOTAL_ROWS,
            batch_size: BATCH_SIZE,
            output_file: PathBuf::from(OUTPUT_FILE),
            user_ids: USER_ID_MIN..=USER_ID_MAX,
            statuses: OrderStatus::ALL.to_vec(),
            amounts: AMOUNT_MIN..=AMOUNT_MAX,
            start_date: START_DATE,
            end_date: END_DATE,
        }
    }
}

impl GeneratorConfig {
    /// # Errors
    /// Errors with [`GenError::InvalidConfig`] when
    /// 1. `batch_size` is zero
    /// 2. a range has its lower bound above its upper bound, or a non-finite amount bound
    ///    (or one beyond [`MAX_ABS_AMOUNT`])
    /// 3. the amount range holds no whole cent
    /// 4. `statuses` is empty
    /// 5. `end_date` falls before `start_date`
    pub fn validate(&self) -> Result<(), GenError> {
        if self.batch_size == 0 {
            return Err(GenError::InvalidConfig("batch size must be positive".into()));
        }
        if self.user_ids.is_empty() {
            return Err(GenError::InvalidConfig(format!(
                "user id range {:?} is empty",
                self.user_ids
            )));
        }
        let (amount_min, amount_max) = (*self.amounts.start(), *self.amounts.end());
        if !amount_min.is_finite()
            || !amount_max.is_finite()
            || !(amount_max - amount_min).is_finite()
            || amount_min.abs() > MAX_ABS_AMOUNT
            || amount_max.abs() > MAX_ABS_AMOUNT
            || amount_min > amount_max
        {
            return Err(GenError::InvalidConfig(format!(
                "amount range {:?} is invalid",
                self.amounts
            )));
        }
        let (min_cents, max_cents) = self.cent_bounds();
        if min_cents > max_cents {
            return Err(GenError::InvalidConfig(format!(
                "amount range {:?} contains no whole cent",
                self.amounts
            )));
        }
        if self.statuses.is_empty() {
            return Err(GenError::InvalidConfig("status set is empty".into()));
        }
        if self.end_date < self.start_date {
            return Err(GenError::InvalidConfig(format!(
                "date window ends ({}) before it starts ({})",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }

    /// Smallest and largest cent counts inside the amount range. Only meaningful
    /// once the amount bounds are finite and within [`MAX_ABS_AMOUNT`].
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn cent_bounds(&self) -> (i64, i64) {
        let (amount_min, amount_max) = (*self.amounts.start(), *self.amounts.end());
        let mut min_cents = (amount_min * 100.0).round() as i64;
        if (min_cents as f64) / 100.0 < amount_min {
            min_cents += 1;
        }
        let mut max_cents = (amount_max * 100.0).round() as i64;
        if (max_cents as f64) / 100.0 > amount_max {
            max_cents -= 1;
        }
        (min_cents, max_cents)
    }

    /// Number of whole days between the window's first and last day
    #[must_use]
    pub fn days_range(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    #[must_use]
    pub fn window_start(&self) -> NaiveDateTime {
        self.start_date.and_time(NaiveTime::MIN)
    }

    #[must_use]
    pub fn window_end(&self) -> NaiveDateTime {
        self.end_date.and_time(NaiveTime::MIN) + Duration::seconds(SECONDS_PER_DAY - 1)
    }

    /// The MySQL statement that bulk loads the generated file into an `orders` table.
    #[must_use]
    pub fn load_data_statement(&self) -> String {
        format!(
            "LOAD DATA LOCAL INFILE '{}'\n\
             INTO TABLE orders\n\
             FIELDS TERMINATED BY ','\n\
             LINES TERMINATED BY '\\n'\n\
             (user_id, status, amount, created_at);",
            self.output_file.display()
        )
    }
}
