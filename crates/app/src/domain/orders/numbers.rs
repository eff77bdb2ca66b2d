//! Order Numbers
//!
//! Human-facing order references of the form `ORD-YYYYMMDD-NNN`. Order identity is the UUID;
//! the number is for display and support only.

use jiff::Timestamp;
use mockall::automock;
use rand::Rng;

pub const ORDER_NUMBER_PREFIX: &str = "ORD";

const SUFFIX_RANGE: u16 = 1000;

#[automock]
pub trait OrderNumberGenerator: Send + Sync {
    /// Produce a candidate number for an order placed at `now`.
    fn generate(&self, now: Timestamp) -> String;
}

/// UTC date plus a random three-digit suffix.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomOrderNumbers;

impl OrderNumberGenerator for RandomOrderNumbers {
    fn generate(&self, now: Timestamp) -> String {
        let suffix = rand::thread_rng().gen_range(0..SUFFIX_RANGE);

        format_order_number(now, suffix)
    }
}

#[must_use]
pub fn format_order_number(now: Timestamp, suffix: u16) -> String {
    format!(
        "{ORDER_NUMBER_PREFIX}-{}-{:03}",
        now.strftime("%Y%m%d"),
        suffix % SUFFIX_RANGE
    )
}

/// Whether `value` has the `ORD-YYYYMMDD-NNN` shape.
#[must_use]
pub fn is_order_number(value: &str) -> bool {
    let mut parts = value.split('-');

    let (Some(prefix), Some(date), Some(suffix), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };

    prefix == ORDER_NUMBER_PREFIX
        && date.len() == 8
        && date.bytes().all(|b| b.is_ascii_digit())
        && suffix.len() == 3
        && suffix.bytes().all(|b| b.is_ascii_digit())
}
