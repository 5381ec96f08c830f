//! Report settings.

use crate::aggregate::MIN_FAMILY_GROUP;

/// Number of passengers shown in the table preview by default.
pub const DEFAULT_TABLE_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    pub table_limit: usize,
    pub min_family_group: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            table_limit: DEFAULT_TABLE_LIMIT,
            min_family_group: MIN_FAMILY_GROUP,
        }
    }
}

impl ReportOptions {
    /// Defaults overridden by `REPORT_TABLE_LIMIT` and `REPORT_MIN_FAMILY_GROUP`
    /// when those are set to valid numbers.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F: Fn(&str) -> Option<String>>(lookup: F) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: usize| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(fallback)
        };

        Self {
            table_limit: read("REPORT_TABLE_LIMIT", defaults.table_limit),
            min_family_group: read("REPORT_MIN_FAMILY_GROUP", defaults.min_family_group),
        }
    }
}
