//! Time-related types for ESPN Fantasy Football seasons and weeks.

use crate::error::{FflError, Result};
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for Season years
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Season(pub u16);

impl Season {
    /// Month (1-based) from which the calendar year's NFL season is considered started.
    pub const START_MONTH: u32 = 8;

    pub fn new(year: u16) -> Self {
        Self(year)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The season in progress (or most recently finished) on `date`.
    pub fn on(date: NaiveDate) -> Self {
        let year = date.year() as u16;
        if date.month() >= Self::START_MONTH {
            Self(year)
        } else {
            Self(year - 1)
        }
    }

    pub fn current() -> Self {
        Self::on(Local::now().date_naive())
    }

    /// The `count` seasons ending with this one, oldest first.
    pub fn trailing(self, count: u16) -> Vec<Season> {
        let count = count.max(1).min(self.0);
        (self.0 + 1 - count..=self.0).map(Season).collect()
    }
}

impl Default for Season {
    fn default() -> Self {
        Self::current()
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Season {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

/// Type-safe wrapper for Week numbers (ESPN matchup periods)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Week(pub u16);

impl Week {
    pub fn new(week: u16) -> Self {
        Self(week)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }
}

impl Default for Week {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Week {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Week {
    type Err = FflError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_on_date() {
        let sept = NaiveDate::from_ymd_opt(2025, 9, 14).unwrap();
        assert_eq!(Season::on(sept), Season::new(2025));

        let jan = NaiveDate::from_ymd_opt(2026, 1, 4).unwrap();
        assert_eq!(Season::on(jan), Season::new(2025));

        let aug = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();
        assert_eq!(Season::on(aug), Season::new(2026));
    }

    #[test]
    fn test_trailing_seasons() {
        let seasons = Season::new(2025).trailing(3);
        assert_eq!(
            seasons,
            vec![Season::new(2023), Season::new(2024), Season::new(2025)]
        );

        assert_eq!(Season::new(2025).trailing(0), vec![Season::new(2025)]);
        assert_eq!(Season::new(2025).trailing(1), vec![Season::new(2025)]);
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("2023".parse::<Season>().unwrap(), Season::new(2023));
        assert!("twenty".parse::<Season>().is_err());
    }

    #[test]
    fn test_week_default_and_display() {
        assert_eq!(Week::default(), Week::new(1));
        assert_eq!(Week::new(17).to_string(), "17");
        assert_eq!("5".parse::<Week>().unwrap().as_u16(), 5);
    }

    #[test]
    fn test_ordering() {
        assert!(Season::new(2022) < Season::new(2023));
        assert!(Week::new(2) < Week::new(10));
    }
}
