//! Core data structures for quality control findings.
//!
//! Defines the severity scale, the combinable reason tags and the [`Flag`]
//! record produced by every check.

use crate::error::{QcError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, BitOrAssign};
use std::str::FromStr;

// =============================================================================
// Severity
// =============================================================================

/// How bad a finding is; ordering is meaningful (higher = worse)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum Severity {
    Good = 0,
    Suspect = 1,
    Bad = 2,
    Missing = 3,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Good,
        Severity::Suspect,
        Severity::Bad,
        Severity::Missing,
    ];

    /// Wire name of the severity
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Good => "GOOD",
            Severity::Suspect => "SUSPECT",
            Severity::Bad => "BAD",
            Severity::Missing => "MISSING",
        }
    }

    pub fn level(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Severity {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self> {
        Severity::ALL
            .into_iter()
            .find(|severity| severity.name() == s)
            .ok_or_else(|| QcError::invalid_report(format!("unknown severity '{s}'")))
    }
}

// =============================================================================
// Reason
// =============================================================================

/// Set of independent, combinable reason tags
///
/// Built-in checks set exactly one tag per flag; `MANUAL` is reserved for
/// reviewer-created flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Reason(u8);

impl Reason {
    pub const NONE: Reason = Reason(0);
    pub const RANGE_CHECK: Reason = Reason(1 << 0);
    pub const SPIKE: Reason = Reason(1 << 1);
    pub const STUCK_SENSOR: Reason = Reason(1 << 2);
    pub const GAP: Reason = Reason(1 << 3);
    pub const RAMP_RATE: Reason = Reason(1 << 4);
    pub const DIRECTION_WRAP: Reason = Reason(1 << 5);
    pub const MANUAL: Reason = Reason(1 << 6);

    const NAMED: [(Reason, &'static str); 7] = [
        (Reason::RANGE_CHECK, "RANGE_CHECK"),
        (Reason::SPIKE, "SPIKE"),
        (Reason::STUCK_SENSOR, "STUCK_SENSOR"),
        (Reason::GAP, "GAP"),
        (Reason::RAMP_RATE, "RAMP_RATE"),
        (Reason::DIRECTION_WRAP, "DIRECTION_WRAP"),
        (Reason::MANUAL, "MANUAL"),
    ];

    const ALL_BITS: u8 = 0b0111_1111;

    pub fn bits(&self) -> u8 {
        self.0
    }

    /// Build a reason set from raw bits, rejecting unknown bits
    pub fn from_bits(bits: u8) -> Option<Self> {
        (bits & !Self::ALL_BITS == 0).then_some(Reason(bits))
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn contains(&self, other: Reason) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn intersects(&self, other: Reason) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: Reason) -> Reason {
        Reason(self.0 | other.0)
    }

    /// Names of the individual tags in this set, in bit order
    pub fn names(&self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(reason, _)| self.contains(*reason))
            .map(|(_, name)| *name)
            .collect()
    }

    /// Wire name: `NONE`, a single tag, or tags joined with `|`
    pub fn name(&self) -> String {
        if self.is_empty() {
            "NONE".to_string()
        } else {
            self.names().join("|")
        }
    }
}

impl BitOr for Reason {
    type Output = Reason;

    fn bitor(self, rhs: Reason) -> Reason {
        self.union(rhs)
    }
}

impl BitOrAssign for Reason {
    fn bitor_assign(&mut self, rhs: Reason) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for Reason {
    type Output = Reason;

    fn bitand(self, rhs: Reason) -> Reason {
        Reason(self.0 & rhs.0)
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Reason {
    type Err = QcError;

    fn from_str(s: &str) -> Result<Self> {
        let mut reason = Reason::NONE;
        for part in s.split('|').map(str::trim) {
            if part == "NONE" {
                continue;
            }
            let (tag, _) = Self::NAMED
                .iter()
                .find(|(_, name)| *name == part)
                .ok_or_else(|| QcError::invalid_report(format!("unknown reason '{part}'")))?;
            reason |= *tag;
        }
        Ok(reason)
    }
}

impl From<Reason> for String {
    fn from(reason: Reason) -> Self {
        reason.name()
    }
}

impl TryFrom<String> for Reason {
    type Error = QcError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

// =============================================================================
// Timestamps
// =============================================================================

/// ISO-8601 timestamps on the wire
///
/// Written as RFC 3339 in UTC. Read from RFC 3339 with any offset, or from
/// offset-less `YYYY-MM-DDTHH:MM:SS[.ffffff]` text taken as UTC.
pub mod iso8601 {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
        timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
    }

    pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(text) {
            return Some(timestamp.with_timezone(&Utc));
        }
        NAIVE_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn serialize<S: Serializer>(
        timestamp: &DateTime<Utc>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<DateTime<Utc>, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_timestamp(&text)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{text}'")))
    }

    /// Same encoding for optional timestamps; `null` means absent
    pub mod option {
        use super::{format_timestamp, parse_timestamp};
        use chrono::{DateTime, Utc};
        use serde::de::Error as _;
        use serde::{Deserialize, Deserializer, Serializer};

        pub fn serialize<S: Serializer>(
            timestamp: &Option<DateTime<Utc>>,
            serializer: S,
        ) -> Result<S::Ok, S::Error> {
            match timestamp {
                Some(timestamp) => serializer.serialize_str(&format_timestamp(timestamp)),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<DateTime<Utc>>, D::Error> {
            match Option::<String>::deserialize(deserializer)? {
                Some(text) => parse_timestamp(&text)
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("invalid timestamp '{text}'"))),
                None => Ok(None),
            }
        }
    }
}

// =============================================================================
// Flag
// =============================================================================

fn default_auto_generated() -> bool {
    true
}

/// One quality control finding for a single sample (or sample pair)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flag {
    /// Time of the flagged sample; absent when the series has no time axis
    #[serde(default, with = "iso8601::option")]
    pub timestamp: Option<DateTime<Utc>>,

    pub variable: String,

    pub severity: Severity,

    pub reason: Reason,

    /// Registry name of the check that produced the flag
    pub check_name: String,

    #[serde(default)]
    pub message: String,

    /// True until a reviewer confirms the flag
    #[serde(default = "default_auto_generated")]
    pub auto_generated: bool,
}

impl Flag {
    pub fn new(
        timestamp: Option<DateTime<Utc>>,
        variable: impl Into<String>,
        severity: Severity,
        reason: Reason,
        check_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            variable: variable.into(),
            severity,
            reason,
            check_name: check_name.into(),
            message: message.into(),
            auto_generated: true,
        }
    }

    /// Mark the flag as confirmed by a reviewer
    pub fn confirm(&mut self) {
        self.auto_generated = false;
    }
}
