//! Booking ledger service

use chrono::{DateTime, Utc};

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingResponse, BookingState, BookingStatus, CreateBooking},
    repository::Repository,
};

#[derive(Clone)]
pub struct BookingsService {
    repository: Repository,
}

impl BookingsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a booking of an item on behalf of the requesting user
    pub async fn create_booking(
        &self,
        requester_id: i32,
        draft: CreateBooking,
    ) -> AppResult<BookingResponse> {
        tracing::info!("User {} requests a new booking", requester_id);
        let booker = self.repository.users.get_by_id(requester_id).await?;
        let (start, end) = validate_booking_dates(draft.start, draft.end)?;

        let item = self.repository.items.get_by_id(draft.item_id).await?;
        let owner = match self.repository.users.get_by_id(item.owner_id).await {
            Ok(owner) => owner,
            Err(AppError::NotFound(_)) => {
                return Err(AppError::Validation(format!(
                    "Owner of item {} could not be resolved",
                    item.id
                )))
            }
            Err(e) => return Err(e),
        };

        // Booking one's own item is reported as absence, matching the
        // original API contract.
        if owner.id == booker.id {
            return Err(AppError::NotFound(
                "Booking is not possible: the item belongs to the requesting user".to_string(),
            ));
        }

        if !item.available {
            return Err(AppError::Validation(format!(
                "Item with id {} is not available for booking",
                item.id
            )));
        }

        let booking = self
            .repository
            .bookings
            .create(booker.id, item.id, start, end)
            .await?;
        Ok(booking.into())
    }

    /// Approve or reject a waiting booking; only the item's owner may decide
    pub async fn update_booking_status(
        &self,
        user_id: i32,
        booking_id: i32,
        approved: bool,
    ) -> AppResult<BookingResponse> {
        tracing::info!("User {} updates status of booking {}", user_id, booking_id);
        let booking = self.repository.bookings.get_by_id(booking_id).await?;

        if booking.status != BookingStatus::Waiting {
            return Err(already_decided(booking.status));
        }

        if booking.owner_id != user_id {
            return Err(AppError::NotFound(
                "User is not the owner of the booked item".to_string(),
            ));
        }

        let status = if approved {
            BookingStatus::Approved
        } else {
            BookingStatus::Rejected
        };

        let affected = self
            .repository
            .bookings
            .set_status_if_waiting(booking_id, status)
            .await?;
        if affected == 0 {
            // A concurrent transition won the race; report the status it set.
            let current = self.repository.bookings.get_by_id(booking_id).await?;
            return Err(already_decided(current.status));
        }

        let updated = self.repository.bookings.get_by_id(booking_id).await?;
        Ok(updated.into())
    }

    /// Fetch one booking, visible to its booker and the item's owner only
    pub async fn get_booking_by_id(
        &self,
        user_id: i32,
        booking_id: i32,
    ) -> AppResult<BookingResponse> {
        let booking = self.repository.bookings.get_by_id(booking_id).await?;
        if user_id != booking.booker_id && user_id != booking.owner_id {
            return Err(AppError::NotFound(format!(
                "User {} cannot view booking {}",
                user_id, booking_id
            )));
        }
        Ok(booking.into())
    }

    /// Bookings made by a user, newest start first
    pub async fn get_bookings_by_booker(
        &self,
        booker_id: i32,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingResponse>> {
        check_page(from, size)?;
        self.repository.users.get_by_id(booker_id).await?;
        let state = parse_state(state)?;

        let bookings = self
            .repository
            .bookings
            .find_by_booker(booker_id, state, from, size)
            .await?;
        Ok(bookings.into_iter().map(Into::into).collect())
    }

    /// Bookings of all items owned by a user, newest start first
    pub async fn get_bookings_by_owner(
        &self,
        owner_id: i32,
        state: &str,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingResponse>> {
        check_page(from, size)?;
        self.repository.users.get_by_id(owner_id).await?;
        let state = parse_state(state)?;

        let bookings = self
            .repository
            .bookings
            .find_by_owner(owner_id, state, from, size)
            .await?;
        Ok(bookings.into_iter().map(Into::into).collect())
    }
}

fn already_decided(status: BookingStatus) -> AppError {
    AppError::Validation(format!(
        "Status change is not allowed because the booking status is \"{}\"",
        status
    ))
}

fn parse_state(state: &str) -> AppResult<BookingState> {
    state
        .parse::<BookingState>()
        // Literal body preserved from the original API contract
        .map_err(|_| AppError::UnsupportedStatus("Unknown state: UNSUPPORTED_STATUS".to_string()))
}

fn check_page(from: i64, size: i64) -> AppResult<()> {
    if from < 0 || size < 1 {
        return Err(AppError::Validation("Invalid page parameters".to_string()));
    }
    Ok(())
}

/// Check presence and ordering of the booking window. Missing dates are
/// reported as NOT_FOUND, bad ordering as VALIDATION, both as in the
/// original API.
fn validate_booking_dates(
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> AppResult<(DateTime<Utc>, DateTime<Utc>)> {
    let (start, end) = match (start, end) {
        (Some(start), Some(end)) => (start, end),
        _ => {
            return Err(AppError::NotFound(
                "Booking start and end must both be set".to_string(),
            ))
        }
    };

    if start > end {
        return Err(AppError::Validation(
            "Booking start must not be after its end".to_string(),
        ));
    }
    if start == end {
        return Err(AppError::Validation(
            "Booking start and end must not be equal".to_string(),
        ));
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn accepts_ordered_dates() {
        let start = Utc::now();
        let end = start + Duration::days(1);
        assert!(validate_booking_dates(Some(start), Some(end)).is_ok());
    }

    #[test]
    fn missing_dates_are_not_found() {
        let now = Utc::now();
        for (start, end) in [(None, Some(now)), (Some(now), None), (None, None)] {
            match validate_booking_dates(start, end) {
                Err(AppError::NotFound(_)) => {}
                other => panic!("expected NotFound, got {:?}", other.err()),
            }
        }
    }

    #[test]
    fn reversed_dates_are_validation_errors() {
        let start = Utc::now();
        let end = start - Duration::hours(2);
        match validate_booking_dates(Some(start), Some(end)) {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected Validation, got {:?}", other.err()),
        }
    }

    #[test]
    fn equal_dates_are_validation_errors() {
        let start = Utc::now();
        match validate_booking_dates(Some(start), Some(start)) {
            Err(AppError::Validation(_)) => {}
            other => panic!("expected Validation, got {:?}", other.err()),
        }
    }

    #[test]
    fn page_bounds_are_checked() {
        assert!(check_page(0, 10).is_ok());
        assert!(check_page(5, 1).is_ok());
        assert!(check_page(-1, 10).is_err());
        assert!(check_page(0, 0).is_err());
    }

    #[test]
    fn unknown_state_is_unsupported_status() {
        match parse_state("BOGUS") {
            Err(AppError::UnsupportedStatus(msg)) => {
                assert_eq!(msg, "Unknown state: UNSUPPORTED_STATUS");
            }
            other => panic!("expected UnsupportedStatus, got {:?}", other.err()),
        }
        assert!(parse_state("CURRENT").is_ok());
    }
}
