//! Departure status as reported by the predictions feed.

use std::fmt;

use serde::{Serialize, Serializer};

/// Status of a predicted departure.
///
/// Known statuses get their own variant; anything else is kept as
/// [`DepartureStatus::Other`]. Each variant maps back to exactly the
/// upstream string it was parsed from, so a status always renders verbatim.
///
/// # Examples
///
/// ```
/// use commuter_server::domain::DepartureStatus;
///
/// assert_eq!(DepartureStatus::parse("Departed"), DepartureStatus::Departed);
/// assert_eq!(DepartureStatus::parse("Now boarding").as_str(), "Now boarding");
/// assert_eq!(DepartureStatus::parse("Track 5").as_str(), "Track 5");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DepartureStatus {
    OnTime,
    AllAboard,
    NowBoarding,
    Boarding,
    Departed,
    Delayed,
    Late,
    Cancelled,
    InfoToFollow,
    Tbd,
    Other(String),
}

impl DepartureStatus {
    /// Parse an upstream status string. Matching is exact.
    pub fn parse(s: &str) -> Self {
        match s {
            "On time" => Self::OnTime,
            "All aboard" => Self::AllAboard,
            "Now boarding" => Self::NowBoarding,
            "Boarding" => Self::Boarding,
            "Departed" => Self::Departed,
            "Delayed" => Self::Delayed,
            "Late" => Self::Late,
            "Cancelled" => Self::Cancelled,
            "Info to follow" => Self::InfoToFollow,
            "TBD" => Self::Tbd,
            other => Self::Other(other.to_string()),
        }
    }

    /// The upstream spelling of this status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::OnTime => "On time",
            Self::AllAboard => "All aboard",
            Self::NowBoarding => "Now boarding",
            Self::Boarding => "Boarding",
            Self::Departed => "Departed",
            Self::Delayed => "Delayed",
            Self::Late => "Late",
            Self::Cancelled => "Cancelled",
            Self::InfoToFollow => "Info to follow",
            Self::Tbd => "TBD",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for DepartureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for DepartureStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_statuses() {
        assert_eq!(DepartureStatus::parse("On time"), DepartureStatus::OnTime);
        assert_eq!(DepartureStatus::parse("Departed"), DepartureStatus::Departed);
        assert_eq!(DepartureStatus::parse("Delayed"), DepartureStatus::Delayed);
        assert_eq!(
            DepartureStatus::parse("Cancelled"),
            DepartureStatus::Cancelled
        );
        assert_eq!(DepartureStatus::parse("TBD"), DepartureStatus::Tbd);
    }

    #[test]
    fn parse_is_case_sensitive() {
        assert_eq!(
            DepartureStatus::parse("departed"),
            DepartureStatus::Other("departed".to_string())
        );
    }

    #[test]
    fn serializes_as_upstream_text() {
        let json = serde_json::to_string(&DepartureStatus::InfoToFollow).unwrap();
        assert_eq!(json, r#""Info to follow""#);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn any_status_renders_verbatim(s in ".{0,24}") {
                let parsed = DepartureStatus::parse(&s);
                prop_assert_eq!(parsed.as_str(), s.as_str());
            }
        }
    }
}
