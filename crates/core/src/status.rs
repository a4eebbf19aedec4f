//! Status vocabularies for listings, showings and inquiries.
//!
//! Statuses are stored as text; these enums are the single place where the
//! accepted values are spelled out. Each must match the check constraints in
//! the migrations.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Status given to a property created without one.
pub const DEFAULT_PROPERTY_STATUS: &str = "For Sale";

/// Lifecycle of a showing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShowingStatus {
    Requested,
    Confirmed,
    Completed,
    Cancelled,
}

impl ShowingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl FromStr for ShowingStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "requested" => Ok(Self::Requested),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(CoreError::Validation(format!(
                "Unknown showing status '{other}'. Expected one of: requested, confirmed, completed, cancelled"
            ))),
        }
    }
}

impl fmt::Display for ShowingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of an inquiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    Open,
    Answered,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Answered => "answered",
            Self::Closed => "closed",
        }
    }
}

impl FromStr for InquiryStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "answered" => Ok(Self::Answered),
            "closed" => Ok(Self::Closed),
            other => Err(CoreError::Validation(format!(
                "Unknown inquiry status '{other}'. Expected one of: open, answered, closed"
            ))),
        }
    }
}

impl fmt::Display for InquiryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn showing_status_round_trips_through_str() {
        for status in [
            ShowingStatus::Requested,
            ShowingStatus::Confirmed,
            ShowingStatus::Completed,
            ShowingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<ShowingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn unknown_statuses_are_rejected() {
        assert!("pending".parse::<ShowingStatus>().is_err());
        assert!("Answered".parse::<InquiryStatus>().is_err());
    }

    #[test]
    fn inquiry_status_display() {
        assert_eq!(InquiryStatus::Answered.to_string(), "answered");
    }
}
