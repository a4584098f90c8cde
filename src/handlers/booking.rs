use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::booking_status_history;
use crate::entities::course_price::PriceTier;
use crate::entities::user::UserRole;
use crate::entities::{course, course_price, course_translation, user};
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::utils::lang::normalize;
use crate::utils::pricing::{
    cancellation_allowed, discounted_price, tee_time_bookable, tee_time_slots, tier_for_tee_time,
    FeeBreakdown, ServiceSelection, CADDY_FEE_VND, CART_FEE_VND, INSURANCE_FEE_VND,
    RENT_CLUBS_FEE_VND,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct CourseOption {
    pub slug: String,
    pub name: String,
    pub weekday_price_vnd: i64,
    pub weekend_price_vnd: i64,
    pub twilight_price_vnd: i64,
}

#[derive(Debug, Serialize)]
pub struct ServicePrices {
    pub caddy_vnd: i64,
    pub cart_vnd: i64,
    pub rent_clubs_vnd: i64,
    pub insurance_vnd: i64,
}

#[derive(Debug, Serialize)]
pub struct BookingOptionsResponse {
    pub courses: Vec<CourseOption>,
    pub service_prices: ServicePrices,
    pub tee_times: Vec<String>,
}

/// Everything the booking form needs: courses with per-tier prices,
/// service add-on prices and the tee time slots.
pub async fn booking_options(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<BookingOptionsResponse>> {
    let lang = normalize(&lang);

    let courses = course::Entity::find().all(&state.db).await?;
    let translations = course_translation::Entity::find()
        .filter(course_translation::Column::Lang.eq(lang))
        .all(&state.db)
        .await?;
    let prices = course_price::Entity::find().all(&state.db).await?;

    let tier_price = |course_id: i32, tier: PriceTier| -> i64 {
        prices
            .iter()
            .find(|p| p.course_id == course_id && p.tier == tier)
            .map(|p| discounted_price(p.rack_price_vnd, p.discount_note.as_deref()))
            .unwrap_or(0)
    };

    let options = courses
        .iter()
        .filter_map(|c| {
            let text = translations.iter().find(|t| t.course_id == c.id)?;
            Some(CourseOption {
                slug: c.slug.clone(),
                name: text.name.clone(),
                weekday_price_vnd: tier_price(c.id, PriceTier::Weekday),
                weekend_price_vnd: tier_price(c.id, PriceTier::Weekend),
                twilight_price_vnd: tier_price(c.id, PriceTier::Twilight),
            })
        })
        .collect();

    Ok(Json(BookingOptionsResponse {
        courses: options,
        service_prices: ServicePrices {
            caddy_vnd: CADDY_FEE_VND,
            cart_vnd: CART_FEE_VND,
            rent_clubs_vnd: RENT_CLUBS_FEE_VND,
            insurance_vnd: INSURANCE_FEE_VND,
        },
        tee_times: tee_time_slots(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    pub course_slug: String,
    pub play_date: NaiveDate,
    /// Tee time in "HH:MM"
    pub play_time: String,
    pub players: i32,
    #[serde(default)]
    pub caddy: bool,
    #[serde(default)]
    pub cart: bool,
    #[serde(default)]
    pub rent_clubs: bool,
    pub notes: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub course_slug: String,
    pub course_name: String,
    pub play_date: NaiveDate,
    pub play_time: String,
    pub players: i32,
    pub has_caddy: bool,
    pub has_cart: bool,
    pub has_rent_clubs: bool,
    pub green_fee: i64,
    pub services_fee: i64,
    pub insurance_fee: i64,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: chrono::DateTime<Utc>,
}

impl BookingResponse {
    fn build(b: booking::Model, course_slug: String, course_name: String) -> Self {
        Self {
            id: b.id,
            course_slug,
            course_name,
            play_date: b.play_date,
            play_time: b.play_time.format("%H:%M").to_string(),
            players: b.players,
            has_caddy: b.has_caddy,
            has_cart: b.has_cart,
            has_rent_clubs: b.has_rent_clubs,
            green_fee: b.green_fee,
            services_fee: b.services_fee,
            insurance_fee: b.insurance_fee,
            total_amount: b.total_amount,
            status: b.status,
            notes: b.notes,
            created_at: b.created_at.with_timezone(&Utc),
        }
    }
}

/// Create a booking. The fee breakdown is computed server-side and frozen
/// on the row.
pub async fn create_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(lang): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let lang = normalize(&lang);

    if claims.role == UserRole::Admin {
        return Err(AppError::Forbidden(
            "Administrators cannot make bookings".to_string(),
        ));
    }

    if payload.players < 1 {
        return Err(AppError::BadRequest(
            "At least one player is required".to_string(),
        ));
    }

    let play_time = NaiveTime::parse_from_str(&payload.play_time, "%H:%M")
        .map_err(|_| AppError::BadRequest("Invalid tee time".to_string()))?;
    let play_at = payload.play_date.and_time(play_time);

    // Bookings run on the course's wall-clock time
    let now = Local::now().naive_local();
    if !tee_time_bookable(now, play_at) {
        return Err(AppError::BadRequest(
            "Tee time must be at least 30 minutes from now".to_string(),
        ));
    }

    let course = course::Entity::find()
        .filter(course::Column::Slug.eq(&payload.course_slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let tier = tier_for_tee_time(payload.play_date, play_time);
    let unit_price = course_price::Entity::find()
        .filter(course_price::Column::CourseId.eq(course.id))
        .filter(course_price::Column::Tier.eq(tier))
        .one(&state.db)
        .await?
        .map(|p| discounted_price(p.rack_price_vnd, p.discount_note.as_deref()))
        .unwrap_or(0);

    let services = ServiceSelection {
        caddy: payload.caddy,
        cart: payload.cart,
        rent_clubs: payload.rent_clubs,
    };
    let fees = FeeBreakdown::compute(unit_price, payload.players, services);

    let new_booking = booking::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(claims.sub),
        course_id: Set(course.id),
        play_date: Set(payload.play_date),
        play_time: Set(play_time),
        players: Set(payload.players),
        has_caddy: Set(payload.caddy),
        has_cart: Set(payload.cart),
        has_rent_clubs: Set(payload.rent_clubs),
        green_fee: Set(fees.green_fee),
        services_fee: Set(fees.services_fee),
        insurance_fee: Set(fees.insurance_fee),
        total_amount: Set(fees.total_amount),
        status: Set(BookingStatus::Pending),
        notes: Set(payload.notes.clone()),
        ..Default::default()
    };

    let saved = new_booking.insert(&state.db).await?;

    let course_name = course_translation::Entity::find()
        .filter(course_translation::Column::CourseId.eq(course.id))
        .filter(course_translation::Column::Lang.eq(lang))
        .one(&state.db)
        .await?
        .map(|t| t.name)
        .unwrap_or_else(|| course.slug.clone());

    if let Some(customer) = user::Entity::find_by_id(claims.sub).one(&state.db).await? {
        state
            .mailer
            .booking_created(&customer, &course_name, &saved)
            .await;
    }

    Ok(Json(BookingResponse::build(saved, course.slug, course_name)))
}

/// All bookings of the current user, newest first
pub async fn my_bookings(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(lang): Path<String>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let lang = normalize(&lang);

    let bookings = booking::Entity::find()
        .filter(booking::Column::UserId.eq(claims.sub))
        .order_by_desc(booking::Column::CreatedAt)
        .all(&state.db)
        .await?;
    let courses = course::Entity::find().all(&state.db).await?;
    let translations = course_translation::Entity::find()
        .filter(course_translation::Column::Lang.eq(lang))
        .all(&state.db)
        .await?;

    let responses = bookings
        .into_iter()
        .map(|b| {
            let course = courses.iter().find(|c| c.id == b.course_id);
            let slug = course.map(|c| c.slug.clone()).unwrap_or_default();
            let name = translations
                .iter()
                .find(|t| t.course_id == b.course_id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| slug.clone());
            BookingResponse::build(b, slug, name)
        })
        .collect();

    Ok(Json(responses))
}

/// A single booking, visible only to its owner
pub async fn booking_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((lang, id)): Path<(String, Uuid)>,
) -> AppResult<Json<BookingResponse>> {
    let lang = normalize(&lang);

    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You do not have access to this booking".to_string(),
        ));
    }

    let course = course::Entity::find_by_id(booking.course_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    let name = course_translation::Entity::find()
        .filter(course_translation::Column::CourseId.eq(course.id))
        .filter(course_translation::Column::Lang.eq(lang))
        .one(&state.db)
        .await?
        .map(|t| t.name)
        .unwrap_or_else(|| course.slug.clone());

    Ok(Json(BookingResponse::build(booking, course.slug, name)))
}

/// Cancel an upcoming booking. Allowed up to 24 hours before the tee time.
pub async fn cancel_booking(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((lang, id)): Path<(String, Uuid)>,
) -> AppResult<Json<BookingResponse>> {
    let lang = normalize(&lang);

    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.user_id != claims.sub {
        return Err(AppError::Forbidden(
            "You do not have access to this booking".to_string(),
        ));
    }

    if booking.status == BookingStatus::Cancelled {
        return Err(AppError::Conflict(
            "This booking is already cancelled".to_string(),
        ));
    }

    let now = Local::now().naive_local();
    if !cancellation_allowed(now, booking.play_datetime()) {
        return Err(AppError::BadRequest(
            "Bookings can only be cancelled up to 24 hours before the tee time".to_string(),
        ));
    }

    let old_status = booking.status;
    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(BookingStatus::Cancelled);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.db).await?;

    let history = booking_status_history::ActiveModel {
        booking_id: Set(updated.id),
        old_status: Set(old_status),
        new_status: Set(BookingStatus::Cancelled),
        changed_by: Set(claims.username.clone()),
        notes: Set(Some("Cancelled by customer".to_string())),
        ..Default::default()
    };
    history.insert(&state.db).await?;

    let course = course::Entity::find_by_id(updated.course_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;
    let name = course_translation::Entity::find()
        .filter(course_translation::Column::CourseId.eq(course.id))
        .filter(course_translation::Column::Lang.eq(lang))
        .one(&state.db)
        .await?
        .map(|t| t.name)
        .unwrap_or_else(|| course.slug.clone());

    if let Some(customer) = user::Entity::find_by_id(claims.sub).one(&state.db).await? {
        state
            .mailer
            .booking_cancelled(&customer, &name, &updated)
            .await;
    }

    Ok(Json(BookingResponse::build(updated, course.slug, name)))
}
