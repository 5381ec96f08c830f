use serde::Serialize;

use crate::passenger::{Passenger, Sex};

/// Whole-dataset figures shown on the summary cards.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct SummaryStats {
    pub total_passengers: usize,
    pub survived: usize,
    pub survival_rate: f64,

    pub male_count: usize,
    pub female_count: usize,
    pub female_ratio: f64,
}

impl SummaryStats {
    pub fn from_passengers(passengers: &[Passenger]) -> Self {
        let mut s = SummaryStats {
            total_passengers: passengers.len(),
            ..Default::default()
        };

        for p in passengers {
            if p.survived {
                s.survived += 1;
            }

            match p.sex {
                Sex::Male => s.male_count += 1,
                Sex::Female => s.female_count += 1,
                Sex::Unknown => {}
            }
        }

        s.survival_rate = Self::pct(s.survived, s.total_passengers);
        s.female_ratio = Self::pct(s.female_count, s.total_passengers);
        s
    }

    /// `part / total` as a percentage rounded to one decimal; 0.0 when `total` is 0.
    pub fn pct(part: usize, total: usize) -> f64 {
        if total == 0 {
            0.0
        } else {
            round1((part as f64 / total as f64) * 100.0)
        }
    }
}

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn passenger(survived: bool, sex: Sex) -> Passenger {
        Passenger {
            survived,
            sex,
            ..Default::default()
        }
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(SummaryStats::pct(10, 0), 0.0);
    }

    #[test]
    fn test_pct_rounds_to_one_decimal() {
        assert_eq!(SummaryStats::pct(50, 100), 50.0);
        assert_eq!(SummaryStats::pct(1, 3), 33.3);
        assert_eq!(SummaryStats::pct(2, 3), 66.7);
        assert_eq!(SummaryStats::pct(342, 891), 38.4);
    }

    #[test]
    fn test_from_passengers_empty() {
        let stats = SummaryStats::from_passengers(&[]);
        assert_eq!(stats, SummaryStats::default());
    }

    #[test]
    fn test_from_passengers_counts() {
        let passengers = vec![
            passenger(true, Sex::Female),
            passenger(false, Sex::Male),
            passenger(false, Sex::Male),
            passenger(true, Sex::Male),
        ];
        let stats = SummaryStats::from_passengers(&passengers);

        assert_eq!(stats.total_passengers, 4);
        assert_eq!(stats.survived, 2);
        assert_eq!(stats.survival_rate, 50.0);
        assert_eq!(stats.male_count, 3);
        assert_eq!(stats.female_count, 1);
        assert_eq!(stats.female_ratio, 25.0);
    }
}
