use std::fmt;
use std::io;

use chrono::NaiveDateTime;
use csv::{Terminator, WriterBuilder};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

pub const NUM_DECIMAL_PLACES: u32 = 2;
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lifecycle code of an order, written to the CSV as its integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    /// Awaiting payment (`0`)
    Pending,
    /// Paid (`1`)
    Paid,
    /// Completed (`2`)
    Completed,
}

/// One fictitious purchase order. Column order of the CSV follows field order here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    pub user_id: u32,
    pub status: OrderStatus,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: NaiveDateTime,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [
        OrderStatus::Pending,
        OrderStatus::Paid,
        OrderStatus::Completed,
    ];

    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Paid => 1,
            OrderStatus::Completed => 2,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for OrderStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

fn serialize_timestamp<S>(timestamp: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&timestamp.format(TIMESTAMP_FORMAT))
}

/// Builds the CSV writer used for order rows: no header row, `\n` line endings.
/// The writer buffers internally, so `inner` can be an unbuffered `File`.
#[must_use]
pub fn csv_writer<W: io::Write>(inner: W) -> csv::Writer<W> {
    WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(inner)
}
