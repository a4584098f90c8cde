use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::{admin, auth, booking, review, site};
use crate::middleware::auth::{auth_middleware, require_admin, require_customer};
use crate::middleware::rate_limit::{create_public_governor, create_user_governor};
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    let public_governor = create_public_governor();
    let user_governor = create_user_governor();

    // Public routes (IP-based rate limiting)
    let auth_routes = Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/forgot-password", post(auth::forgot_password))
        .route("/reset-password", post(auth::reset_password))
        .layer(public_governor.clone());

    // Public localized site routes
    let site_routes = Router::new()
        .route("/{lang}/courses", get(site::list_courses))
        .route("/{lang}/courses/{slug}", get(site::course_detail))
        .route("/{lang}/home", get(site::home_seo))
        .layer(public_governor);

    // Customer routes (requires auth + customer role)
    let customer_routes = Router::new()
        .route("/{lang}/booking/options", get(booking::booking_options))
        .route("/{lang}/bookings", post(booking::create_booking))
        .route("/{lang}/bookings", get(booking::my_bookings))
        .route("/{lang}/bookings/{id}", get(booking::booking_detail))
        .route("/{lang}/bookings/{id}/cancel", post(booking::cancel_booking))
        .route("/{lang}/courses/{slug}/reviews", post(review::create_review))
        .route("/reviews/{id}/helpful", post(review::mark_helpful))
        .layer(user_governor)
        .layer(middleware::from_fn(require_customer))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Admin back-office routes (requires auth + admin role)
    let admin_routes = Router::new()
        .route("/dashboard", get(admin::dashboard))
        // Course management
        .route("/courses", get(admin::list_courses))
        .route("/courses", post(admin::create_course))
        .route("/courses/{id}", put(admin::update_course))
        .route("/courses/{id}", delete(admin::delete_course))
        // Translations
        .route("/translations", get(admin::list_translations))
        .route("/translations/{id}", put(admin::update_translation))
        // Prices
        .route("/prices", get(admin::list_prices))
        .route("/prices", post(admin::create_price))
        .route("/prices/{id}", put(admin::update_price))
        .route("/prices/{id}", delete(admin::delete_price))
        // Evaluations
        .route("/evaluations", get(admin::list_evaluations))
        .route("/evaluations/{id}", put(admin::update_evaluation))
        .route("/evaluations/{id}", delete(admin::delete_evaluation))
        // FX rates
        .route("/fx", get(admin::list_fx_rates))
        .route("/fx", post(admin::create_fx_rate))
        .route("/fx/{id}", put(admin::update_fx_rate))
        // Booking management
        .route("/bookings", get(admin::list_bookings))
        .route("/bookings/{id}", get(admin::booking_detail))
        .route("/bookings/{id}/status", post(admin::update_booking_status))
        .route("/bookings/{id}/note", post(admin::add_booking_note))
        // Review management
        .route("/reviews", get(admin::list_reviews))
        .route("/reviews", post(admin::create_review))
        .route("/reviews/bulk-delete", post(admin::bulk_delete_reviews))
        .route("/reviews/{id}", get(admin::review_detail))
        .route("/reviews/{id}", put(admin::update_review))
        .route("/reviews/{id}", delete(admin::delete_review))
        .layer(middleware::from_fn(require_admin))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .nest("/api/auth", auth_routes)
        .nest("/api", site_routes.merge(customer_routes))
        .nest("/api/{lang}/admin", admin_routes)
        .route("/sitemap.xml", get(site::sitemap))
        .route("/robots.txt", get(site::robots))
        .route("/debug-seo/{lang}", get(site::debug_seo))
        .with_state(state)
}
