use axum::{
    extract::{Path, State},
    Extension, Json,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::Deserialize;

use crate::entities::{course, review, review_helpful};
use crate::error::{AppError, AppResult};
use crate::utils::jwt::Claims;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: i32,
    pub comment: String,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Post a review for a course
pub async fn create_review(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((_lang, slug)): Path<(String, String)>,
    Json(payload): Json<CreateReviewRequest>,
) -> AppResult<Json<review::Model>> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    if payload.comment.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Please write a comment".to_string(),
        ));
    }

    let course = course::Entity::find()
        .filter(course::Column::Slug.eq(&slug))
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
        course_id: Set(course.id),
        user_id: Set(claims.sub),
        rating: Set(payload.rating),
        comment: Set(payload.comment.trim().to_string()),
        images: Set(images),
        ..Default::default()
    };

    let saved = new_review.insert(&state.db).await?;
    Ok(Json(saved))
}

/// Mark a review as helpful. One vote per user.
pub async fn mark_helpful(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(id): Path<i32>,
) -> AppResult<Json<serde_json::Value>> {
    let review = review::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Review not found".to_string()))?;

    let existing = review_helpful::Entity::find()
        .filter(review_helpful::Column::ReviewId.eq(review.id))
        .filter(review_helpful::Column::UserId.eq(claims.sub))
        .one(&state.db)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(
            "You have already marked this review as helpful".to_string(),
        ));
    }

    let vote = review_helpful::ActiveModel {
        review_id: Set(review.id),
        user_id: Set(claims.sub),
        ..Default::default()
    };
    vote.insert(&state.db).await?;

    let helpful_count = review_helpful::Entity::find()
        .filter(review_helpful::Column::ReviewId.eq(review.id))
        .all(&state.db)
        .await?
        .len();

    Ok(Json(serde_json::json!({ "helpful_count": helpful_count })))
}
