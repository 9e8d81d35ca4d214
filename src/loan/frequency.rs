//! Compounding and payback frequencies
//!
//! Each frequency maps to its periods per year. The mapping is shared by the
//! amortized, deferred and bond calculations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LoanError;

/// How a nominal annual rate compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundFrequency {
    Annually,
    SemiAnnually,
    Quarterly,
    Monthly,
    SemiMonthly,
    BiWeekly,
    Weekly,
    Daily,
    Continuously,
}

/// How often payments are made on an amortized loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaybackFrequency {
    Daily,
    Weekly,
    BiWeekly,
    HalfMonth,
    Month,
    Quarter,
    HalfYear,
    Year,
}

const ALL_COMPOUND: [CompoundFrequency; 9] = [
    CompoundFrequency::Annually,
    CompoundFrequency::SemiAnnually,
    CompoundFrequency::Quarterly,
    CompoundFrequency::Monthly,
    CompoundFrequency::SemiMonthly,
    CompoundFrequency::BiWeekly,
    CompoundFrequency::Weekly,
    CompoundFrequency::Daily,
    CompoundFrequency::Continuously,
];

const ALL_PAYBACK: [PaybackFrequency; 8] = [
    PaybackFrequency::Daily,
    PaybackFrequency::Weekly,
    PaybackFrequency::BiWeekly,
    PaybackFrequency::HalfMonth,
    PaybackFrequency::Month,
    PaybackFrequency::Quarter,
    PaybackFrequency::HalfYear,
    PaybackFrequency::Year,
];

impl CompoundFrequency {
    /// Compounding periods per year, `None` for continuous compounding
    pub fn periods_per_year(&self) -> Option<u32> {
        match self {
            CompoundFrequency::Annually => Some(1),
            CompoundFrequency::SemiAnnually => Some(2),
            CompoundFrequency::Quarterly => Some(4),
            CompoundFrequency::Monthly => Some(12),
            CompoundFrequency::SemiMonthly => Some(24),
            CompoundFrequency::BiWeekly => Some(26),
            CompoundFrequency::Weekly => Some(52),
            CompoundFrequency::Daily => Some(365),
            CompoundFrequency::Continuously => None,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, CompoundFrequency::Continuously)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompoundFrequency::Annually => "annually",
            CompoundFrequency::SemiAnnually => "semiannually",
            CompoundFrequency::Quarterly => "quarterly",
            CompoundFrequency::Monthly => "monthly",
            CompoundFrequency::SemiMonthly => "semimonthly",
            CompoundFrequency::BiWeekly => "biweekly",
            CompoundFrequency::Weekly => "weekly",
            CompoundFrequency::Daily => "daily",
            CompoundFrequency::Continuously => "continuously",
        }
    }
}

impl PaybackFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaybackFrequency::Daily => 365,
            PaybackFrequency::Weekly => 52,
            PaybackFrequency::BiWeekly => 26,
            PaybackFrequency::HalfMonth => 24,
            PaybackFrequency::Month => 12,
            PaybackFrequency::Quarter => 4,
            PaybackFrequency::HalfYear => 2,
            PaybackFrequency::Year => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PaybackFrequency::Daily => "daily",
            PaybackFrequency::Weekly => "weekly",
            PaybackFrequency::BiWeekly => "biweekly",
            PaybackFrequency::HalfMonth => "halfmonth",
            PaybackFrequency::Month => "month",
            PaybackFrequency::Quarter => "quarter",
            PaybackFrequency::HalfYear => "halfyear",
            PaybackFrequency::Year => "year",
        }
    }
}

impl FromStr for CompoundFrequency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ALL_COMPOUND
            .into_iter()
            .find(|freq| freq.as_str() == name)
            .ok_or_else(|| LoanError::UnknownCompoundFrequency(s.to_string()))
    }
}

impl FromStr for PaybackFrequency {
    type Err = LoanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        ALL_PAYBACK
            .into_iter()
            .find(|freq| freq.as_str() == name)
            .ok_or_else(|| LoanError::UnknownPaybackFrequency(s.to_string()))
    }
}

impl fmt::Display for CompoundFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for PaybackFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compound_periods() {
        assert_eq!(CompoundFrequency::Annually.periods_per_year(), Some(1));
        assert_eq!(CompoundFrequency::SemiMonthly.periods_per_year(), Some(24));
        assert_eq!(CompoundFrequency::BiWeekly.periods_per_year(), Some(26));
        assert_eq!(CompoundFrequency::Daily.periods_per_year(), Some(365));
        assert_eq!(CompoundFrequency::Continuously.periods_per_year(), None);
    }

    #[test]
    fn test_payback_periods() {
        assert_eq!(PaybackFrequency::Daily.periods_per_year(), 365);
        assert_eq!(PaybackFrequency::HalfMonth.periods_per_year(), 24);
        assert_eq!(PaybackFrequency::Month.periods_per_year(), 12);
        assert_eq!(PaybackFrequency::HalfYear.periods_per_year(), 2);
        assert_eq!(PaybackFrequency::Year.periods_per_year(), 1);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Monthly".parse::<CompoundFrequency>().unwrap(), CompoundFrequency::Monthly);
        assert_eq!(
            " continuously ".parse::<CompoundFrequency>().unwrap(),
            CompoundFrequency::Continuously
        );
        assert_eq!("halfmonth".parse::<PaybackFrequency>().unwrap(), PaybackFrequency::HalfMonth);
    }

    #[test]
    fn test_unknown_names_rejected() {
        assert_eq!(
            "hourly".parse::<CompoundFrequency>(),
            Err(LoanError::UnknownCompoundFrequency("hourly".to_string()))
        );
        // Payback names differ from compounding names
        assert!("monthly".parse::<PaybackFrequency>().is_err());
    }

    #[test]
    fn test_display_matches_serde_names() {
        for freq in ALL_COMPOUND {
            let json = serde_json::to_string(&freq).unwrap();
            assert_eq!(json, format!("\"{}\"", freq));
        }
        for freq in ALL_PAYBACK {
            let json = serde_json::to_string(&freq).unwrap();
            assert_eq!(json, format!("\"{}\"", freq));
        }
    }

    #[test]
    fn test_every_variant_round_trips() {
        for freq in ALL_COMPOUND {
            assert_eq!(freq.as_str().parse::<CompoundFrequency>(), Ok(freq));
        }
        for freq in ALL_PAYBACK {
            assert_eq!(freq.as_str().parse::<PaybackFrequency>(), Ok(freq));
        }

        let periods: Vec<u32> = ALL_PAYBACK.iter().map(|f| f.periods_per_year()).collect();
        assert_eq!(periods, vec![365, 52, 26, 24, 12, 4, 2, 1]);
    }
}
