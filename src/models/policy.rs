//! Lending policy and fine computation
//!
//! Fines are never stored. They are derived from the borrow timestamp and the
//! current time whenever a book is listed or returned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::money::Money;

const SECONDS_PER_DAY: f64 = 60.0 * 60.0 * 24.0;

/// Grace period and daily fine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LendingPolicy {
    /// Days a book may be kept before fines accrue
    #[serde(default = "default_borrow_limit_days")]
    pub borrow_limit_days: u32,

    /// Fine charged per overdue day (pro-rated for partial days)
    #[serde(default = "default_fine_per_day")]
    pub fine_per_day: Money,
}

fn default_borrow_limit_days() -> u32 {
    14
}

fn default_fine_per_day() -> Money {
    Money::from_cents(100)
}

impl Default for LendingPolicy {
    fn default() -> Self {
        Self {
            borrow_limit_days: default_borrow_limit_days(),
            fine_per_day: default_fine_per_day(),
        }
    }
}

impl LendingPolicy {
    /// Fractional days between two instants
    pub fn days_elapsed(borrowed_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
        (now - borrowed_at).num_seconds() as f64 / SECONDS_PER_DAY
    }

    /// Fine owed for a loan that started at `borrowed_at`, as of `now`; never negative
    pub fn fine_at(&self, borrowed_at: DateTime<Utc>, now: DateTime<Utc>) -> Money {
        let overdue_days = Self::days_elapsed(borrowed_at, now) - f64::from(self.borrow_limit_days);
        if overdue_days <= 0.0 {
            return Money::zero();
        }
        Money::from_fractional_cents(overdue_days * self.fine_per_day.cents() as f64)
            .max(Money::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_no_fine_within_limit() {
        let policy = LendingPolicy::default();
        for days in [0, 1, 7, 13, 14] {
            let fine = policy.fine_at(start(), start() + Duration::days(days));
            assert!(fine.is_zero(), "unexpected fine after {} days", days);
        }
    }

    #[test]
    fn test_fine_grows_linearly_after_limit() {
        let policy = LendingPolicy::default();
        assert_eq!(policy.fine_at(start(), start() + Duration::days(15)).cents(), 100);
        assert_eq!(policy.fine_at(start(), start() + Duration::days(20)).cents(), 600);
        assert_eq!(policy.fine_at(start(), start() + Duration::days(44)).cents(), 3000);
    }

    #[test]
    fn test_partial_days_are_pro_rated() {
        let policy = LendingPolicy::default();
        let now = start() + Duration::days(14) + Duration::hours(12);
        assert_eq!(policy.fine_at(start(), now).cents(), 50);
    }

    #[test]
    fn test_future_borrow_date_has_no_fine() {
        let policy = LendingPolicy::default();
        assert!(policy.fine_at(start(), start() - Duration::days(30)).is_zero());
    }

    #[test]
    fn test_custom_policy() {
        let policy = LendingPolicy {
            borrow_limit_days: 7,
            fine_per_day: Money::from_cents(25),
        };
        assert_eq!(policy.fine_at(start(), start() + Duration::days(11)).cents(), 100);
    }

    #[test]
    fn test_negative_rate_never_gives_negative_fine() {
        let policy = LendingPolicy {
            borrow_limit_days: 14,
            fine_per_day: Money::from_cents(-100),
        };
        assert!(policy.fine_at(start(), start() + Duration::days(20)).is_zero());
    }

    #[test]
    fn test_days_elapsed_fractional() {
        let days = LendingPolicy::days_elapsed(start(), start() + Duration::hours(36));
        assert!((days - 1.5).abs() < f64::EPSILON);
    }
}
