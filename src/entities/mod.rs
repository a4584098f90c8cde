pub mod booking;
pub mod booking_status_history;
pub mod course;
pub mod course_evaluation;
pub mod course_price;
pub mod course_translation;
pub mod fx_rate;
pub mod review;
pub mod review_helpful;
pub mod static_page;
pub mod user;
