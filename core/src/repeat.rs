// SPDX-FileCopyrightText: 2025-2026 Cadence Developers
//
// SPDX-License-Identifier: Apache-2.0

//! Repeat rules and the next-occurrence computation.
//!
//! A rule is one of three compact forms:
//!
//! ```txt
//! d <n>          every n days, 1 <= n <= 400
//! y              every year on the same month and day
//! w <d>[,<d>]*   on the listed weekdays, Monday is 1 and Sunday is 7
//! ```

use std::fmt::{self, Display};
use std::num::IntErrorKind;
use std::str::FromStr;

use crate::TaskDate;

/// The largest accepted day interval.
pub const MAX_DAY_INTERVAL: u16 = 400;

const PREFIX_DAYS: &str = "d ";
const PREFIX_WEEKDAYS: &str = "w ";
const KW_YEARLY: &str = "y";

/// Errors of rule parsing and date computation. None of them is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepeatError {
    /// A date is not a valid `YYYYMMDD` day.
    #[error("invalid date `{0}`, expected YYYYMMDD")]
    DateMalformed(String),

    /// The rule is empty or matches none of the supported forms.
    #[error("unsupported or empty repeat specification `{0}`")]
    RuleMalformed(String),

    /// The day interval is not within `1..=400`.
    #[error("day interval `{0}` is out of range, expected 1 to {MAX_DAY_INTERVAL}")]
    RuleOutOfRange(String),

    /// The rule value cannot be resolved into a date.
    #[error("repeat rule `{0}` cannot be resolved")]
    RuleUnsupported(String),

    /// Date arithmetic went past the supported calendar.
    #[error("date is out of the supported range")]
    DateOutOfRange,
}

/// How a task repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatRule {
    /// Every `n` calendar days.
    DayInterval(u16),

    /// Every year on the anchor's month and day.
    Yearly,

    /// On the listed weekdays (1 to 7). The order is kept as written, the first
    /// day is where a week wraps to.
    WeeklyOnDays(Vec<u8>),
}

impl RepeatRule {
    /// Computes the next occurrence after `anchor` that satisfies `now`.
    ///
    /// Interval and yearly rules return the first occurrence not before `now`,
    /// weekly rules the first one strictly after `now`. The result is always
    /// later than `anchor`.
    pub fn next_occurrence(
        &self,
        now: TaskDate,
        anchor: TaskDate,
    ) -> Result<TaskDate, RepeatError> {
        match self {
            RepeatRule::DayInterval(days) => next_by_days(now, anchor, *days),
            RepeatRule::Yearly => next_by_year(now, anchor),
            RepeatRule::WeeklyOnDays(weekdays) => match weekdays.first() {
                Some(first) if weekdays.iter().all(|d| (1..=7).contains(d)) => {
                    next_by_weekdays(now, anchor, weekdays, *first)
                }
                _ => Err(RepeatError::RuleUnsupported(self.to_string())),
            },
        }
    }
}

impl Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::DayInterval(days) => write!(f, "{PREFIX_DAYS}{days}"),
            RepeatRule::Yearly => write!(f, "{KW_YEARLY}"),
            RepeatRule::WeeklyOnDays(weekdays) => {
                write!(f, "{PREFIX_WEEKDAYS}")?;
                for (i, day) in weekdays.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{day}")?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for RepeatRule {
    type Err = RepeatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(days) = s.strip_prefix(PREFIX_DAYS) {
            parse_day_interval(s, days).map(RepeatRule::DayInterval)
        } else if s == KW_YEARLY {
            Ok(RepeatRule::Yearly)
        } else if let Some(weekdays) = s.strip_prefix(PREFIX_WEEKDAYS) {
            parse_weekdays(weekdays)
                .map(RepeatRule::WeeklyOnDays)
                .ok_or_else(|| RepeatError::RuleMalformed(s.to_string()))
        } else {
            Err(RepeatError::RuleMalformed(s.to_string()))
        }
    }
}

impl serde::Serialize for RepeatRule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for RepeatRule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Parses a repeat rule.
pub fn parse_rule(s: &str) -> Result<RepeatRule, RepeatError> {
    s.parse()
}

/// Computes the next occurrence of `rule` after `anchor`, relative to `now`.
pub fn next_occurrence(
    now: TaskDate,
    anchor: TaskDate,
    rule: &str,
) -> Result<TaskDate, RepeatError> {
    if rule.is_empty() {
        return Err(RepeatError::RuleMalformed(String::new()));
    }

    parse_rule(rule)?.next_occurrence(now, anchor)
}

/// Same as [`next_occurrence`], with dates in and out as `YYYYMMDD` text.
pub fn next_date(now: &str, anchor: &str, rule: &str) -> Result<String, RepeatError> {
    if rule.is_empty() {
        return Err(RepeatError::RuleMalformed(String::new()));
    }

    let now = TaskDate::parse_stable(now)?;
    let anchor = TaskDate::parse_stable(anchor)?;
    next_occurrence(now, anchor, rule).map(|a| a.format_stable())
}

fn parse_day_interval(rule: &str, days: &str) -> Result<u16, RepeatError> {
    let out_of_range = || RepeatError::RuleOutOfRange(days.to_string());
    if !is_plain_number(days.strip_prefix('-').unwrap_or(days)) {
        return Err(RepeatError::RuleMalformed(rule.to_string()));
    }

    match days.parse::<i64>() {
        Ok(n) => u16::try_from(n)
            .ok()
            .filter(|n| (1..=MAX_DAY_INTERVAL).contains(n))
            .ok_or_else(out_of_range),
        Err(e) if matches!(e.kind(), IntErrorKind::PosOverflow | IntErrorKind::NegOverflow) => {
            Err(out_of_range())
        }
        Err(_) => Err(RepeatError::RuleMalformed(rule.to_string())),
    }
}

fn parse_weekdays(s: &str) -> Option<Vec<u8>> {
    s.split(',')
        .map(|a| match a.as_bytes() {
            [d @ b'1'..=b'7'] => Some(d - b'0'),
            _ => None,
        })
        .collect()
}

/// Digits only, without a sign or leading zeros.
fn is_plain_number(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) && (s == "0" || !s.starts_with('0'))
}

fn next_by_days(now: TaskDate, anchor: TaskDate, days: u16) -> Result<TaskDate, RepeatError> {
    if !(1..=MAX_DAY_INTERVAL).contains(&days) {
        return Err(RepeatError::RuleOutOfRange(days.to_string()));
    }

    let days = i64::from(days);
    let mut date = anchor.add_days(days)?;
    while date < now {
        date = date.add_days(days)?;
    }
    Ok(date)
}

fn next_by_year(now: TaskDate, anchor: TaskDate) -> Result<TaskDate, RepeatError> {
    let mut year = i32::from(anchor.year());
    loop {
        year += 1;
        // February 29 only exists in leap years
        if let Some(date) = anchor.with_year(year)?
            && date >= now
        {
            return Ok(date);
        }
    }
}

fn next_by_weekdays(
    now: TaskDate,
    anchor: TaskDate,
    weekdays: &[u8],
    first: u8,
) -> Result<TaskDate, RepeatError> {
    let step = |date: TaskDate| {
        let weekday = date.weekday();
        let delta = match weekdays.iter().map(|&d| d as i8).filter(|&d| d > weekday).min() {
            Some(day) => day - weekday,
            None => 7 - weekday + first as i8,
        };
        date.add_days(delta.into())
    };

    let mut date = step(anchor)?;
    while date <= now {
        date = step(date)?;
    }
    Ok(date)
}
