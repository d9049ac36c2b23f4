//! Bookings repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::booking::{BookingRow, BookingState, BookingStatus},
};

/// Booking joined with its item and booker; every read goes through this
/// projection so responses can embed the two summaries without extra queries.
const BOOKING_SELECT: &str = r#"
    SELECT b.id, b.start_date, b.end_date, b.status,
           i.id AS item_id, i.name AS item_name, i.owner_id,
           u.id AS booker_id, u.name AS booker_name
    FROM bookings b
    JOIN items i ON b.item_id = i.id
    JOIN users u ON b.booker_id = u.id
"#;

#[derive(Clone)]
pub struct BookingsRepository {
    pool: Pool<Postgres>,
}

impl BookingsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get booking by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<BookingRow> {
        let sql = format!("{BOOKING_SELECT} WHERE b.id = $1");
        sqlx::query_as::<_, BookingRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking with id {} not found", id)))
    }

    /// Create a new booking in WAITING status
    pub async fn create(
        &self,
        booker_id: i32,
        item_id: i32,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> AppResult<BookingRow> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO bookings (item_id, booker_id, start_date, end_date, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(item_id)
        .bind(booker_id)
        .bind(start)
        .bind(end)
        .bind(BookingStatus::Waiting)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Transition a booking out of WAITING. The status precondition is part
    /// of the statement, so two concurrent transitions cannot both commit.
    /// Returns the number of affected rows (0 when the booking was no longer
    /// WAITING).
    pub async fn set_status_if_waiting(&self, id: i32, status: BookingStatus) -> AppResult<u64> {
        let result = sqlx::query("UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3")
            .bind(status)
            .bind(id)
            .bind(BookingStatus::Waiting)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Page of bookings made by a user, filtered by state
    pub async fn find_by_booker(
        &self,
        booker_id: i32,
        state: BookingState,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingRow>> {
        self.find_page("b.booker_id", booker_id, state, from, size).await
    }

    /// Page of bookings of a user's items, filtered by state
    pub async fn find_by_owner(
        &self,
        owner_id: i32,
        state: BookingState,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingRow>> {
        self.find_page("i.owner_id", owner_id, state, from, size).await
    }

    async fn find_page(
        &self,
        scope_col: &str,
        user_id: i32,
        state: BookingState,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<BookingRow>> {
        let now = Utc::now();
        let order = "ORDER BY b.start_date DESC";

        let bookings = match state {
            BookingState::All => {
                let sql =
                    format!("{BOOKING_SELECT} WHERE {scope_col} = $1 {order} OFFSET $2 LIMIT $3");
                sqlx::query_as::<_, BookingRow>(&sql)
                    .bind(user_id)
                    .bind(from)
                    .bind(size)
                    .fetch_all(&self.pool)
                    .await?
            }
            BookingState::Current => {
                let sql = format!(
                    "{BOOKING_SELECT} WHERE {scope_col} = $1 \
                     AND b.start_date <= $2 AND b.end_date > $2 {order} OFFSET $3 LIMIT $4"
                );
                sqlx::query_as::<_, BookingRow>(&sql)
                    .bind(user_id)
                    .bind(now)
                    .bind(from)
                    .bind(size)
                    .fetch_all(&self.pool)
                    .await?
            }
            BookingState::Past => {
                let sql = format!(
                    "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.end_date < $2 {order} OFFSET $3 LIMIT $4"
                );
                sqlx::query_as::<_, BookingRow>(&sql)
                    .bind(user_id)
                    .bind(now)
                    .bind(from)
                    .bind(size)
                    .fetch_all(&self.pool)
                    .await?
            }
            BookingState::Future => {
                let sql = format!(
                    "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.start_date > $2 {order} OFFSET $3 LIMIT $4"
                );
                sqlx::query_as::<_, BookingRow>(&sql)
                    .bind(user_id)
                    .bind(now)
                    .bind(from)
                    .bind(size)
                    .fetch_all(&self.pool)
                    .await?
            }
            BookingState::Waiting | BookingState::Rejected => {
                let status = match state {
                    BookingState::Waiting => BookingStatus::Waiting,
                    _ => BookingStatus::Rejected,
                };
                let sql = format!(
                    "{BOOKING_SELECT} WHERE {scope_col} = $1 AND b.status = $2 {order} OFFSET $3 LIMIT $4"
                );
                sqlx::query_as::<_, BookingRow>(&sql)
                    .bind(user_id)
                    .bind(status)
                    .bind(from)
                    .bind(size)
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(bookings)
    }

    /// Most recent already-started, non-rejected booking of an item, visible
    /// only when the requesting user owns the item
    pub async fn find_last_for_item(
        &self,
        item_id: i32,
        owner_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingRow>> {
        let sql = format!(
            "{BOOKING_SELECT} WHERE b.item_id = $1 AND i.owner_id = $2 \
             AND b.status != $3 AND b.start_date < $4 \
             ORDER BY b.start_date DESC LIMIT 1"
        );
        let booking = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(item_id)
            .bind(owner_id)
            .bind(BookingStatus::Rejected)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    /// Earliest upcoming non-rejected booking of an item, visible only when
    /// the requesting user owns the item
    pub async fn find_next_for_item(
        &self,
        item_id: i32,
        owner_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<Option<BookingRow>> {
        let sql = format!(
            "{BOOKING_SELECT} WHERE b.item_id = $1 AND i.owner_id = $2 \
             AND b.status != $3 AND b.start_date > $4 \
             ORDER BY b.start_date LIMIT 1"
        );
        let booking = sqlx::query_as::<_, BookingRow>(&sql)
            .bind(item_id)
            .bind(owner_id)
            .bind(BookingStatus::Rejected)
            .bind(now)
            .fetch_optional(&self.pool)
            .await?;
        Ok(booking)
    }

    /// Whether a user has an approved booking of an item that already started
    pub async fn exists_approved_past(
        &self,
        booker_id: i32,
        item_id: i32,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM bookings
                WHERE booker_id = $1 AND item_id = $2
                  AND status = $3 AND start_date < $4
            )
            "#,
        )
        .bind(booker_id)
        .bind(item_id)
        .bind(BookingStatus::Approved)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
