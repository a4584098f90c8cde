use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entities::booking::{self, BookingStatus};
use crate::entities::course_price::PriceTier;
use crate::entities::{
    booking_status_history, course, course_evaluation, course_price, course_translation, fx_rate,
    review, review_helpful, user,
};
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::utils::pricing::discounted_price;
use crate::AppState;

// ---------------------------------------------------------------------------
// Dashboard

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub courses: u64,
    pub customers: u64,
    pub reviews: u64,
    pub bookings_pending: u64,
    pub bookings_confirmed: u64,
    pub bookings_cancelled: u64,
    pub bookings_completed: u64,
    /// Revenue from confirmed bookings playing in the current month, VND
    pub monthly_revenue_vnd: i64,
    pub recent_bookings: Vec<BookingRow>,
}

#[derive(Debug, Serialize)]
pub struct BookingRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub course_slug: String,
    pub play_date: NaiveDate,
    pub play_time: String,
    pub players: i32,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

fn booking_row(b: &booking::Model, users: &[user::Model], courses: &[course::Model]) -> BookingRow {
    let customer = users.iter().find(|u| u.id == b.user_id);
    BookingRow {
        id: b.id,
        username: customer.map(|u| u.username.clone()).unwrap_or_default(),
        email: customer.map(|u| u.email.clone()).unwrap_or_default(),
        course_slug: courses
            .iter()
            .find(|c| c.id == b.course_id)
            .map(|c| c.slug.clone())
            .unwrap_or_default(),
        play_date: b.play_date,
        play_time: b.play_time.format("%H:%M").to_string(),
        players: b.players,
        total_amount: b.total_amount,
        status: b.status,
        created_at: b.created_at.with_timezone(&Utc),
    }
}

/// Revenue from confirmed bookings with a tee time in the given month.
fn monthly_confirmed_revenue(bookings: &[booking::Model], today: NaiveDate) -> i64 {
    bookings
        .iter()
        .filter(|b| {
            b.status == BookingStatus::Confirmed
                && b.play_date.year() == today.year()
                && b.play_date.month() == today.month()
        })
        .map(|b| b.total_amount)
        .sum()
}

/// Re-saving the current status is allowed and logged, but only an actual
/// transition emails the customer.
fn notifies_customer(old: BookingStatus, new: BookingStatus) -> bool {
    old != new
}

pub async fn dashboard(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
) -> AppResult<Json<DashboardStats>> {
    let courses = course::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;
    let reviews = review::Entity::find().all(&state.db).await?;
    let bookings = booking::Entity::find()
        .order_by_desc(booking::Column::CreatedAt)
        .all(&state.db)
        .await?;

    let count_status =
        |s: BookingStatus| bookings.iter().filter(|b| b.status == s).count() as u64;

    // Dashboard months run on the same wall clock as the booking checks
    let today = Local::now().date_naive();
    let monthly_revenue_vnd = monthly_confirmed_revenue(&bookings, today);

    let recent_bookings = bookings
        .iter()
        .take(10)
        .map(|b| booking_row(b, &users, &courses))
        .collect();

    Ok(Json(DashboardStats {
        courses: courses.len() as u64,
        customers: users
            .iter()
            .filter(|u| u.role == crate::entities::user::UserRole::User)
            .count() as u64,
        reviews: reviews.len() as u64,
        bookings_pending: count_status(BookingStatus::Pending),
        bookings_confirmed: count_status(BookingStatus::Confirmed),
        bookings_cancelled: count_status(BookingStatus::Cancelled),
        bookings_completed: count_status(BookingStatus::Completed),
        monthly_revenue_vnd,
        recent_bookings,
    }))
}

// ---------------------------------------------------------------------------
// Courses

pub async fn list_courses(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
) -> AppResult<Json<Vec<course::Model>>> {
    let courses = course::Entity::find()
        .order_by_asc(course::Column::Slug)
        .all(&state.db)
        .await?;
    Ok(Json(courses))
}

#[derive(Debug, Deserialize)]
pub struct CreateCourseRequest {
    pub slug: String,
    pub holes: Option<i32>,
    pub par: Option<i32>,
    pub length_yards: Option<i32>,
    pub opened_year: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub maps_url: Option<String>,
    pub scorecard_pdf: Option<String>,
}

pub async fn create_course(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Json(payload): Json<CreateCourseRequest>,
) -> AppResult<Json<course::Model>> {
    if payload.slug.trim().is_empty() {
        return Err(AppError::BadRequest("Slug must not be empty".to_string()));
    }

    let existing = course::Entity::find()
        .filter(course::Column::Slug.eq(&payload.slug))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "A course with this slug already exists".to_string(),
        ));
    }

    let new_course = course::ActiveModel {
        slug: Set(payload.slug.trim().to_string()),
        holes: Set(payload.holes),
        par: Set(payload.par),
        length_yards: Set(payload.length_yards),
        opened_year: Set(payload.opened_year),
        lat: Set(payload.lat),
        lng: Set(payload.lng),
        maps_url: Set(payload.maps_url),
        scorecard_pdf: Set(payload.scorecard_pdf),
        ..Default::default()
    };

    Ok(Json(new_course.insert(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateCourseRequest {
    pub slug: Option<String>,
    pub holes: Option<i32>,
    pub par: Option<i32>,
    pub length_yards: Option<i32>,
    pub opened_year: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub maps_url: Option<String>,
    pub scorecard_pdf: Option<String>,
}

pub async fn update_course(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
    Json(payload): Json<UpdateCourseRequest>,
) -> AppResult<Json<course::Model>> {
    let course = course::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let mut active: course::ActiveModel = course.into();
    if let Some(slug) = payload.slug {
        active.slug = Set(slug);
    }
    if payload.holes.is_some() {
        active.holes = Set(payload.holes);
    }
    if payload.par.is_some() {
        active.par = Set(payload.par);
    }
    if payload.length_yards.is_some() {
        active.length_yards = Set(payload.length_yards);
    }
    if payload.opened_year.is_some() {
        active.opened_year = Set(payload.opened_year);
    }
    if payload.lat.is_some() {
        active.lat = Set(payload.lat);
    }
    if payload.lng.is_some() {
        active.lng = Set(payload.lng);
    }
    if payload.maps_url.is_some() {
        active.maps_url = Set(payload.maps_url);
    }
    if payload.scorecard_pdf.is_some() {
        active.scorecard_pdf = Set(payload.scorecard_pdf);
    }

    Ok(Json(active.update(&state.db).await?))
}

/// Remove a course together with its translations, prices and evaluation.
/// Courses with bookings cannot be deleted.
pub async fn delete_course(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
) -> AppResult<Json<serde_json::Value>> {
    let course = course::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let has_bookings = booking::Entity::find()
        .filter(booking::Column::CourseId.eq(course.id))
        .one(&state.db)
        .await?
        .is_some();
    if has_bookings {
        return Err(AppError::Conflict(
            "Cannot delete a course that has bookings".to_string(),
        ));
    }

    course_translation::Entity::delete_many()
        .filter(course_translation::Column::CourseId.eq(course.id))
        .exec(&state.db)
        .await?;
    course_price::Entity::delete_many()
        .filter(course_price::Column::CourseId.eq(course.id))
        .exec(&state.db)
        .await?;
    course_evaluation::Entity::delete_many()
        .filter(course_evaluation::Column::CourseId.eq(course.id))
        .exec(&state.db)
        .await?;
    course::Entity::delete_by_id(course.id).exec(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Course deleted" })))
}

// ---------------------------------------------------------------------------
// Translations

#[derive(Debug, Deserialize)]
pub struct TranslationFilter {
    pub course_id: Option<i32>,
    pub lang: Option<String>,
}

pub async fn list_translations(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Query(filter): Query<TranslationFilter>,
) -> AppResult<Json<Vec<course_translation::Model>>> {
    let mut query = course_translation::Entity::find();
    if let Some(course_id) = filter.course_id {
        query = query.filter(course_translation::Column::CourseId.eq(course_id));
    }
    if let Some(lang) = filter.lang {
        query = query.filter(course_translation::Column::Lang.eq(lang));
    }

    Ok(Json(query.all(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTranslationRequest {
    pub name: Option<String>,
    pub designer_name: Option<String>,
    pub address: Option<String>,
    pub seo_title: Option<String>,
    pub seo_description: Option<String>,
    pub meta_keywords: Option<String>,
    pub overview: Option<String>,
    pub content: Option<String>,
    pub fee_note: Option<String>,
    pub best_season: Option<String>,
    pub tips_note: Option<String>,
}

pub async fn update_translation(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
    Json(payload): Json<UpdateTranslationRequest>,
) -> AppResult<Json<course_translation::Model>> {
    let translation = course_translation::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Translation not found".to_string()))?;

    let mut active: course_translation::ActiveModel = translation.into();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if payload.designer_name.is_some() {
        active.designer_name = Set(payload.designer_name);
    }
    if payload.address.is_some() {
        active.address = Set(payload.address);
    }
    if payload.seo_title.is_some() {
        active.seo_title = Set(payload.seo_title);
    }
    if payload.seo_description.is_some() {
        active.seo_description = Set(payload.seo_description);
    }
    if payload.meta_keywords.is_some() {
        active.meta_keywords = Set(payload.meta_keywords);
    }
    if payload.overview.is_some() {
        active.overview = Set(payload.overview);
    }
    if payload.content.is_some() {
        active.content = Set(payload.content);
    }
    if payload.fee_note.is_some() {
        active.fee_note = Set(payload.fee_note);
    }
    if payload.best_season.is_some() {
        active.best_season = Set(payload.best_season);
    }
    if payload.tips_note.is_some() {
        active.tips_note = Set(payload.tips_note);
    }

    Ok(Json(active.update(&state.db).await?))
}

// ---------------------------------------------------------------------------
// Prices

#[derive(Debug, Deserialize)]
pub struct PriceFilter {
    pub course_id: Option<i32>,
}

pub async fn list_prices(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Query(filter): Query<PriceFilter>,
) -> AppResult<Json<Vec<course_price::Model>>> {
    let mut query = course_price::Entity::find();
    if let Some(course_id) = filter.course_id {
        query = query.filter(course_price::Column::CourseId.eq(course_id));
    }

    Ok(Json(query.all(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct CreatePriceRequest {
    pub course_id: i32,
    pub tier: PriceTier,
    pub rack_price_vnd: i64,
    pub discount_note: Option<String>,
    #[serde(default)]
    pub inc_caddie: bool,
    #[serde(default)]
    pub inc_cart: bool,
    #[serde(default)]
    pub inc_tax: bool,
}

pub async fn create_price(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Json(payload): Json<CreatePriceRequest>,
) -> AppResult<Json<course_price::Model>> {
    if payload.rack_price_vnd < 0 {
        return Err(AppError::BadRequest(
            "Rack price must not be negative".to_string(),
        ));
    }

    course::Entity::find_by_id(payload.course_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let existing = course_price::Entity::find()
        .filter(course_price::Column::CourseId.eq(payload.course_id))
        .filter(course_price::Column::Tier.eq(payload.tier))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        return Err(AppError::Conflict(
            "This course already has a price for that tier".to_string(),
        ));
    }

    let discount_price_vnd =
        discounted_price(payload.rack_price_vnd, payload.discount_note.as_deref());

    let new_price = course_price::ActiveModel {
        course_id: Set(payload.course_id),
        tier: Set(payload.tier),
        rack_price_vnd: Set(payload.rack_price_vnd),
        discount_price_vnd: Set(discount_price_vnd),
        discount_note: Set(payload.discount_note),
        inc_caddie: Set(payload.inc_caddie),
        inc_cart: Set(payload.inc_cart),
        inc_tax: Set(payload.inc_tax),
        ..Default::default()
    };

    Ok(Json(new_price.insert(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceRequest {
    pub rack_price_vnd: Option<i64>,
    pub discount_note: Option<String>,
    pub inc_caddie: Option<bool>,
    pub inc_cart: Option<bool>,
    pub inc_tax: Option<bool>,
}

/// Update a price row. The discounted price is recomputed from the final
/// rack price and discount note.
pub async fn update_price(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
    Json(payload): Json<UpdatePriceRequest>,
) -> AppResult<Json<course_price::Model>> {
    let price = course_price::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Price not found".to_string()))?;

    let rack = payload.rack_price_vnd.unwrap_or(price.rack_price_vnd);
    if rack < 0 {
        return Err(AppError::BadRequest(
            "Rack price must not be negative".to_string(),
        ));
    }
    let note = match &payload.discount_note {
        Some(n) if n.trim().is_empty() => None,
        Some(n) => Some(n.clone()),
        None => price.discount_note.clone(),
    };

    let mut active: course_price::ActiveModel = price.into();
    active.rack_price_vnd = Set(rack);
    active.discount_note = Set(note.clone());
    active.discount_price_vnd = Set(discounted_price(rack, note.as_deref()));
    if let Some(inc_caddie) = payload.inc_caddie {
        active.inc_caddie = Set(inc_caddie);
    }
    if let Some(inc_cart) = payload.inc_cart {
        active.inc_cart = Set(inc_cart);
    }
    if let Some(inc_tax) = payload.inc_tax {
        active.inc_tax = Set(inc_tax);
    }

    Ok(Json(active.update(&state.db).await?))
}

pub async fn delete_price(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
) -> AppResult<Json<serde_json::Value>> {
    let result = course_price::Entity::delete_by_id(id).exec(&state.db).await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Price not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Price deleted" })))
}

// ---------------------------------------------------------------------------
// Evaluations

pub async fn list_evaluations(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
) -> AppResult<Json<Vec<course_evaluation::Model>>> {
    Ok(Json(course_evaluation::Entity::find().all(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateEvaluationRequest {
    pub design_layout: f64,
    pub turf_maintenance: f64,
    pub facilities_services: f64,
    pub landscape_environment: f64,
    pub playability_access: f64,
}

/// Set the editorial scores for a course, keyed by course id. Creates the
/// evaluation row when the course has none yet.
pub async fn update_evaluation(
    State(state): State<AppState>,
    Path((_lang, course_id)): Path<(String, i32)>,
    Json(payload): Json<UpdateEvaluationRequest>,
) -> AppResult<Json<course_evaluation::Model>> {
    let scores = [
        payload.design_layout,
        payload.turf_maintenance,
        payload.facilities_services,
        payload.landscape_environment,
        payload.playability_access,
    ];
    if scores.iter().any(|s| !(0.0..=5.0).contains(s)) {
        return Err(AppError::BadRequest(
            "Scores must be between 0 and 5".to_string(),
        ));
    }

    course::Entity::find_by_id(course_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let existing = course_evaluation::Entity::find()
        .filter(course_evaluation::Column::CourseId.eq(course_id))
        .one(&state.db)
        .await?;

    let saved = match existing {
        Some(eval) => {
            let mut active: course_evaluation::ActiveModel = eval.into();
            active.design_layout = Set(payload.design_layout);
            active.turf_maintenance = Set(payload.turf_maintenance);
            active.facilities_services = Set(payload.facilities_services);
            active.landscape_environment = Set(payload.landscape_environment);
            active.playability_access = Set(payload.playability_access);
            active.update(&state.db).await?
        }
        None => {
            let active = course_evaluation::ActiveModel {
                course_id: Set(course_id),
                design_layout: Set(payload.design_layout),
                turf_maintenance: Set(payload.turf_maintenance),
                facilities_services: Set(payload.facilities_services),
                landscape_environment: Set(payload.landscape_environment),
                playability_access: Set(payload.playability_access),
                ..Default::default()
            };
            active.insert(&state.db).await?
        }
    };

    Ok(Json(saved))
}

pub async fn delete_evaluation(
    State(state): State<AppState>,
    Path((_lang, course_id)): Path<(String, i32)>,
) -> AppResult<Json<serde_json::Value>> {
    let result = course_evaluation::Entity::delete_many()
        .filter(course_evaluation::Column::CourseId.eq(course_id))
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Evaluation not found".to_string()));
    }

    Ok(Json(serde_json::json!({ "message": "Evaluation deleted" })))
}

// ---------------------------------------------------------------------------
// FX rates

pub async fn list_fx_rates(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
) -> AppResult<Json<Vec<fx_rate::Model>>> {
    let rates = fx_rate::Entity::find()
        .order_by_desc(fx_rate::Column::RateDate)
        .all(&state.db)
        .await?;
    Ok(Json(rates))
}

#[derive(Debug, Deserialize)]
pub struct CreateFxRateRequest {
    pub rate_date: NaiveDate,
    pub currency: String,
    pub rate_to_vnd: f64,
    pub source: Option<String>,
}

pub async fn create_fx_rate(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Json(payload): Json<CreateFxRateRequest>,
) -> AppResult<Json<fx_rate::Model>> {
    if payload.rate_to_vnd <= 0.0 {
        return Err(AppError::BadRequest(
            "Rate must be positive".to_string(),
        ));
    }

    let new_rate = fx_rate::ActiveModel {
        rate_date: Set(payload.rate_date),
        currency: Set(payload.currency.to_uppercase()),
        rate_to_vnd: Set(payload.rate_to_vnd),
        source: Set(payload.source),
        ..Default::default()
    };

    Ok(Json(new_rate.insert(&state.db).await?))
}

#[derive(Debug, Deserialize)]
pub struct UpdateFxRateRequest {
    pub rate_date: Option<NaiveDate>,
    pub rate_to_vnd: Option<f64>,
    pub source: Option<String>,
}

pub async fn update_fx_rate(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
    Json(payload): Json<UpdateFxRateRequest>,
) -> AppResult<Json<fx_rate::Model>> {
    let rate = fx_rate::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("FX rate not found".to_string()))?;

    let mut active: fx_rate::ActiveModel = rate.into();
    if let Some(rate_date) = payload.rate_date {
        active.rate_date = Set(rate_date);
    }
    if let Some(value) = payload.rate_to_vnd {
        if value <= 0.0 {
            return Err(AppError::BadRequest("Rate must be positive".to_string()));
        }
        active.rate_to_vnd = Set(value);
    }
    if payload.source.is_some() {
        active.source = Set(payload.source);
    }

    Ok(Json(active.update(&state.db).await?))
}

// ---------------------------------------------------------------------------
// Bookings

#[derive(Debug, Deserialize)]
pub struct BookingFilter {
    pub status: Option<BookingStatus>,
    pub date: Option<NaiveDate>,
    pub course_id: Option<i32>,
}

#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    pub bookings: Vec<BookingRow>,
    pub total_count: usize,
    pub total_amount_vnd: i64,
}

pub async fn list_bookings(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Query(filter): Query<BookingFilter>,
) -> AppResult<Json<BookingListResponse>> {
    let mut query = booking::Entity::find().order_by_desc(booking::Column::CreatedAt);
    if let Some(status) = filter.status {
        query = query.filter(booking::Column::Status.eq(status));
    }
    if let Some(date) = filter.date {
        query = query.filter(booking::Column::PlayDate.eq(date));
    }
    if let Some(course_id) = filter.course_id {
        query = query.filter(booking::Column::CourseId.eq(course_id));
    }

    let bookings = query.all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;
    let courses = course::Entity::find().all(&state.db).await?;

    let total_amount_vnd = bookings.iter().map(|b| b.total_amount).sum();
    let rows: Vec<BookingRow> = bookings
        .iter()
        .map(|b| booking_row(b, &users, &courses))
        .collect();

    Ok(Json(BookingListResponse {
        total_count: rows.len(),
        total_amount_vnd,
        bookings: rows,
    }))
}

#[derive(Debug, Serialize)]
pub struct AdminBookingDetail {
    pub booking: booking::Model,
    pub customer: Option<CustomerInfo>,
    pub course_slug: String,
    pub history: Vec<booking_status_history::Model>,
}

#[derive(Debug, Serialize)]
pub struct CustomerInfo {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub full_name: Option<String>,
    pub phone: Option<String>,
}

pub async fn booking_detail(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, Uuid)>,
) -> AppResult<Json<AdminBookingDetail>> {
    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let customer = user::Entity::find_by_id(booking.user_id)
        .one(&state.db)
        .await?
        .map(|u| CustomerInfo {
            id: u.id,
            username: u.username,
            email: u.email,
            full_name: u.full_name,
            phone: u.phone,
        });

    let course_slug = course::Entity::find_by_id(booking.course_id)
        .one(&state.db)
        .await?
        .map(|c| c.slug)
        .unwrap_or_default();

    let history = booking_status_history::Entity::find()
        .filter(booking_status_history::Column::BookingId.eq(booking.id))
        .order_by_asc(booking_status_history::Column::CreatedAt)
        .all(&state.db)
        .await?;

    Ok(Json(AdminBookingDetail {
        booking,
        customer,
        course_slug,
        history,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookingStatusRequest {
    pub status: BookingStatus,
    pub notes: Option<String>,
}

/// Set a booking's status, record the write in the history log and notify
/// the customer when the status actually changed.
pub async fn update_booking_status(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((_lang, id)): Path<(String, Uuid)>,
    Json(payload): Json<UpdateBookingStatusRequest>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let old_status = booking.status;
    let mut active: booking::ActiveModel = booking.into();
    active.status = Set(payload.status);
    active.updated_at = Set(Utc::now().into());
    let updated = active.update(&state.db).await?;

    let history = booking_status_history::ActiveModel {
        booking_id: Set(updated.id),
        old_status: Set(old_status),
        new_status: Set(payload.status),
        changed_by: Set(claims.username.clone()),
        notes: Set(payload.notes.clone()),
        ..Default::default()
    };
    history.insert(&state.db).await?;

    let customer = user::Entity::find_by_id(updated.user_id).one(&state.db).await?;
    if let Some(customer) = customer.filter(|_| notifies_customer(old_status, payload.status)) {
        let course_name = course_translation::Entity::find()
            .filter(course_translation::Column::CourseId.eq(updated.course_id))
            .filter(course_translation::Column::Lang.eq("en"))
            .one(&state.db)
            .await?
            .map(|t| t.name)
            .unwrap_or_default();

        state
            .mailer
            .status_changed(
                &customer,
                &course_name,
                &updated,
                &old_status.to_value(),
                &payload.status.to_value(),
                payload.notes.as_deref().unwrap_or(""),
            )
            .await;
    }

    Ok(Json(updated))
}

#[derive(Debug, Deserialize)]
pub struct AddBookingNoteRequest {
    pub notes: String,
}

pub async fn add_booking_note(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, Uuid)>,
    Json(payload): Json<AddBookingNoteRequest>,
) -> AppResult<Json<booking::Model>> {
    let booking = booking::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    let mut active: booking::ActiveModel = booking.into();
    active.notes = Set(Some(payload.notes));
    active.updated_at = Set(Utc::now().into());

    Ok(Json(active.update(&state.db).await?))
}

// ---------------------------------------------------------------------------
// Reviews

#[derive(Debug, Deserialize)]
pub struct ReviewFilter {
    pub course_id: Option<i32>,
    pub rating: Option<i32>,
    /// Substring match on the comment
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AdminReviewRow {
    pub id: i32,
    pub course_slug: String,
    pub author: String,
    pub rating: i32,
    pub comment: String,
    pub images: Vec<String>,
    pub helpful_count: usize,
    pub created_at: DateTime<Utc>,
}

pub async fn list_reviews(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Query(filter): Query<ReviewFilter>,
) -> AppResult<Json<Vec<AdminReviewRow>>> {
    let mut query = review::Entity::find().order_by_desc(review::Column::CreatedAt);
    if let Some(course_id) = filter.course_id {
        query = query.filter(review::Column::CourseId.eq(course_id));
    }
    if let Some(rating) = filter.rating {
        query = query.filter(review::Column::Rating.eq(rating));
    }

    let reviews = query.all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;
    let courses = course::Entity::find().all(&state.db).await?;
    let votes = review_helpful::Entity::find().all(&state.db).await?;

    let needle = filter.q.map(|q| q.to_lowercase());
    let rows = reviews
        .into_iter()
        .filter(|r| {
            needle
                .as_deref()
                .is_none_or(|q| r.comment.to_lowercase().contains(q))
        })
        .map(|r| AdminReviewRow {
            id: r.id,
            course_slug: courses
                .iter()
                .find(|c| c.id == r.course_id)
                .map(|c| c.slug.clone())
                .unwrap_or_default(),
            author: users
                .iter()
                .find(|u| u.id == r.user_id)
                .map(|u| u.display_name().to_string())
                .unwrap_or_default(),
            rating: r.rating,
            comment: r.comment.clone(),
            images: r.image_list(),
            helpful_count: votes.iter().filter(|v| v.review_id == r.id).count(),
            created_at: r.created_at.with_timezone(&Utc),
        })
        .collect();

    Ok(Json(rows))
}

#[derive(Debug, Deserialize)]
pub struct AdminCreateReviewRequest {
    pub course_id: i32,
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
}

pub async fn create_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(_lang): Path<String>,
    Json(payload): Json<AdminCreateReviewRequest>,
) -> AppResult<Json<review::Model>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    course::Entity::find_by_id(payload.course_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    let images = if payload.images.is_empty() {
        None
    } else {
        Some(serde_json::to_string(&payload.images).map_err(|e| {
            AppError::Internal(format!("Failed to encode image list: {}", e))
        })?)
    };

    let new_review = review::ActiveModel {
        course_id: Set(payload.course_id),
        user_id: Set(claims.sub),
        rating: Set(payload.rating),
        comment: Set(payload.comment),
        images: Set(images),
        ..Default::default()
    };

    Ok(Json(new_review.insert(&state.db).await?))
}

#[derive(Debug, Serialize)]
pub struct AdminReviewDetail {
    pub review: review::Model,
    pub author: String,
    pub helpful_voters: Vec<String>,
}

pub async fn review_detail(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
) -> AppResult<Json<AdminReviewDetail>> {
    let review = review::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    let users = user::Entity::find().all(&state.db).await?;
    let author = users
        .iter()
        .find(|u| u.id == review.user_id)
        .map(|u| u.display_name().to_string())
        .unwrap_or_default();

    let helpful_voters = review_helpful::Entity::find()
        .filter(review_helpful::Column::ReviewId.eq(review.id))
        .all(&state.db)
        .await?
        .iter()
        .filter_map(|v| users.iter().find(|u| u.id == v.user_id))
        .map(|u| u.username.clone())
        .collect();

    Ok(Json(AdminReviewDetail {
        review,
        author,
        helpful_voters,
    }))
}

#[derive(Debug, Deserialize)]
pub struct UpdateReviewRequest {
    pub rating: Option<i32>,
    pub comment: Option<String>,
    pub images: Option<Vec<String>>,
}

pub async fn update_review(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
    Json(payload): Json<UpdateReviewRequest>,
) -> AppResult<Json<review::Model>> {
    let review = review::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    let mut active: review::ActiveModel = review.into();
    if let Some(rating) = payload.rating {
        if !(1..=5).contains(&rating) {
            return Err(AppError::BadRequest(
                "Rating must be between 1 and 5".to_string(),
            ));
        }
        active.rating = Set(rating);
    }
    if let Some(comment) = payload.comment {
        active.comment = Set(comment);
    }
    if let Some(images) = payload.images {
        let encoded = if images.is_empty() {
            None
        } else {
            Some(serde_json::to_string(&images).map_err(|e| {
                AppError::Internal(format!("Failed to encode image list: {}", e))
            })?)
        };
        active.images = Set(encoded);
    }
    active.updated_at = Set(Utc::now().into());

    Ok(Json(active.update(&state.db).await?))
}

/// Delete a review and its helpful votes
pub async fn delete_review(
    State(state): State<AppState>,
    Path((_lang, id)): Path<(String, i32)>,
) -> AppResult<Json<serde_json::Value>> {
    let review = review::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    review_helpful::Entity::delete_many()
        .filter(review_helpful::Column::ReviewId.eq(review.id))
        .exec(&state.db)
        .await?;
    review::Entity::delete_by_id(review.id).exec(&state.db).await?;

    Ok(Json(serde_json::json!({ "message": "Review deleted" })))
}

#[derive(Debug, Deserialize)]
pub struct BulkDeleteRequest {
    pub ids: Vec<i32>,
}

pub async fn bulk_delete_reviews(
    State(state): State<AppState>,
    Path(_lang): Path<String>,
    Json(payload): Json<BulkDeleteRequest>,
) -> AppResult<Json<serde_json::Value>> {
    if payload.ids.is_empty() {
        return Err(AppError::BadRequest("No review ids given".to_string()));
    }

    review_helpful::Entity::delete_many()
        .filter(review_helpful::Column::ReviewId.is_in(payload.ids.clone()))
        .exec(&state.db)
        .await?;
    let result = review::Entity::delete_many()
        .filter(review::Column::Id.is_in(payload.ids))
        .exec(&state.db)
        .await?;

    Ok(Json(serde_json::json!({ "deleted": result.rows_affected })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    fn booking_on(date: NaiveDate, status: BookingStatus, total_amount: i64) -> booking::Model {
        booking::Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: 1,
            play_date: date,
            play_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            players: 2,
            has_caddy: false,
            has_cart: false,
            has_rent_clubs: false,
            green_fee: 0,
            services_fee: 0,
            insurance_fee: 0,
            total_amount,
            status,
            notes: None,
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_revenue_counts_confirmed_only() {
        let bookings = vec![
            booking_on(date(2025, 6, 10), BookingStatus::Confirmed, 2_000_000),
            booking_on(date(2025, 6, 12), BookingStatus::Completed, 1_500_000),
            booking_on(date(2025, 6, 20), BookingStatus::Pending, 900_000),
            booking_on(date(2025, 6, 21), BookingStatus::Cancelled, 800_000),
        ];
        assert_eq!(
            monthly_confirmed_revenue(&bookings, date(2025, 6, 15)),
            2_000_000
        );
    }

    #[test]
    fn monthly_revenue_ignores_other_months() {
        let bookings = vec![
            booking_on(date(2025, 5, 31), BookingStatus::Confirmed, 2_000_000),
            booking_on(date(2025, 7, 1), BookingStatus::Confirmed, 3_000_000),
            booking_on(date(2024, 6, 15), BookingStatus::Confirmed, 4_000_000),
        ];
        assert_eq!(monthly_confirmed_revenue(&bookings, date(2025, 6, 15)), 0);
    }

    #[test]
    fn same_status_write_sends_no_email() {
        assert!(!notifies_customer(
            BookingStatus::Pending,
            BookingStatus::Pending
        ));
        assert!(notifies_customer(
            BookingStatus::Pending,
            BookingStatus::Confirmed
        ));
    }
}
