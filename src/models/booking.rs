//! Booking model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{Decode, Encode, FromRow, Postgres};
use utoipa::{IntoParams, ToSchema};

use crate::models::{item::ItemSummary, user::UserSummary};

/// Owner-decision lifecycle of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum BookingStatus {
    Waiting,
    Approved,
    Rejected,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}

// SQLx conversion for BookingStatus (stored as VARCHAR)
impl sqlx::Type<Postgres> for BookingStatus {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<Postgres>>::type_info()
    }
}

impl<'r> Decode<'r, Postgres> for BookingStatus {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s: String = Decode::<Postgres>::decode(value)?;
        s.parse().map_err(|e: String| e.into())
    }
}

impl Encode<'_, Postgres> for BookingStatus {
    fn encode_by_ref(&self, buf: &mut sqlx::postgres::PgArgumentBuffer) -> sqlx::encode::IsNull {
        let s: String = self.as_str().to_string();
        <String as Encode<Postgres>>::encode(s, buf)
    }
}

/// Temporal/status filter for booking list endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingState {
    All,
    Current,
    Past,
    Future,
    Waiting,
    Rejected,
}

impl std::str::FromStr for BookingState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "PAST" => Ok(BookingState::Past),
            "FUTURE" => Ok(BookingState::Future),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            _ => Err(format!("Unknown state: {}", s)),
        }
    }
}

/// Booking row joined with its item and booker
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: i32,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: BookingStatus,
    pub item_id: i32,
    pub item_name: String,
    pub owner_id: i32,
    pub booker_id: i32,
    pub booker_name: String,
}

/// Create booking request
///
/// `start` and `end` stay optional so their absence can be reported with
/// the same error class the original API used instead of a decode failure.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBooking {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub item_id: i32,
}

/// Full booking representation returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub item: ItemSummary,
    pub booker: UserSummary,
    pub status: BookingStatus,
}

impl From<BookingRow> for BookingResponse {
    fn from(row: BookingRow) -> Self {
        BookingResponse {
            id: row.id,
            start: row.start_date,
            end: row.end_date,
            item: ItemSummary {
                id: row.item_id,
                name: row.item_name,
            },
            booker: UserSummary {
                id: row.booker_id,
                name: row.booker_name,
            },
            status: row.status,
        }
    }
}

/// Short booking representation used to annotate item views
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookingShort {
    pub id: i32,
    pub booker_id: i32,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Booking list query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct BookingListQuery {
    pub state: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_state() {
        assert_eq!("ALL".parse::<BookingState>().unwrap(), BookingState::All);
        assert_eq!("CURRENT".parse::<BookingState>().unwrap(), BookingState::Current);
        assert_eq!("PAST".parse::<BookingState>().unwrap(), BookingState::Past);
        assert_eq!("FUTURE".parse::<BookingState>().unwrap(), BookingState::Future);
        assert_eq!("WAITING".parse::<BookingState>().unwrap(), BookingState::Waiting);
        assert_eq!("REJECTED".parse::<BookingState>().unwrap(), BookingState::Rejected);
    }

    #[test]
    fn rejects_unknown_state() {
        assert!("BOGUS".parse::<BookingState>().is_err());
        // case-sensitive, as in the original API
        assert!("all".parse::<BookingState>().is_err());
    }

    #[test]
    fn status_round_trips_through_strings() {
        for status in [
            BookingStatus::Waiting,
            BookingStatus::Approved,
            BookingStatus::Rejected,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
        assert!("CANCELLED".parse::<BookingStatus>().is_err());
    }
}
