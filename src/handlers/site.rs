use axum::{
    extract::{Path, Query, State},
    http::header,
    response::Html,
    Json,
};
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use serde::{Deserialize, Serialize};

use crate::entities::{
    course, course_evaluation, course_price, course_translation, review, review_helpful,
    static_page, user,
};
use crate::entities::course_price::PriceTier;
use crate::error::{AppError, AppResult};
use crate::utils::lang::{extract_city, normalize, SUPPORTED_LANGS};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CourseListQuery {
    /// Substring match on the localized address
    pub location: Option<String>,
    /// Minimum discount percentage across any tier
    pub discount: Option<i32>,
    /// Minimum average evaluation score
    pub rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CourseSummary {
    pub slug: String,
    pub name: String,
    pub address: Option<String>,
    pub avg_rating: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummary>,
    pub locations: Vec<String>,
}

/// List courses with optional location / discount / rating filters
pub async fn list_courses(
    State(state): State<AppState>,
    Path(lang): Path<String>,
    Query(filters): Query<CourseListQuery>,
) -> AppResult<Json<CourseListResponse>> {
    let lang = normalize(&lang);

    let courses = course::Entity::find().all(&state.db).await?;
    let translations = course_translation::Entity::find()
        .filter(course_translation::Column::Lang.eq(lang))
        .all(&state.db)
        .await?;
    let prices = course_price::Entity::find().all(&state.db).await?;
    let evaluations = course_evaluation::Entity::find().all(&state.db).await?;

    let mut summaries = Vec::new();
    for c in &courses {
        let Some(text) = translations.iter().find(|t| t.course_id == c.id) else {
            continue;
        };

        let avg_rating = evaluations
            .iter()
            .find(|e| e.course_id == c.id)
            .map(|e| e.average());

        if let Some(location) = &filters.location {
            let matched = text
                .address
                .as_deref()
                .is_some_and(|a| a.to_lowercase().contains(&location.to_lowercase()));
            if !matched {
                continue;
            }
        }

        if let Some(min_discount) = filters.discount {
            let best_discount = prices
                .iter()
                .filter(|p| p.course_id == c.id && p.rack_price_vnd > 0)
                .map(|p| 100.0 - (p.discount_price_vnd as f64 * 100.0 / p.rack_price_vnd as f64))
                .fold(0.0_f64, f64::max);
            if best_discount < f64::from(min_discount) {
                continue;
            }
        }

        if let Some(min_rating) = filters.rating {
            if avg_rating.unwrap_or(0.0) < min_rating {
                continue;
            }
        }

        summaries.push(CourseSummary {
            slug: c.slug.clone(),
            name: text.name.clone(),
            address: text.address.clone(),
            avg_rating,
        });
    }

    // Distinct city names for the location filter dropdown
    let mut locations: Vec<String> = translations
        .iter()
        .filter_map(|t| t.address.as_deref())
        .filter(|a| !a.trim().is_empty())
        .map(|a| extract_city(a, lang))
        .collect();
    locations.sort();
    locations.dedup();

    Ok(Json(CourseListResponse {
        courses: summaries,
        locations,
    }))
}

#[derive(Debug, Serialize)]
pub struct TierPrice {
    pub tier: PriceTier,
    pub rack_price_vnd: i64,
    pub discount_price_vnd: i64,
    pub discount_note: Option<String>,
    pub inc_caddie: bool,
    pub inc_cart: bool,
    pub inc_tax: bool,
}

#[derive(Debug, Serialize)]
pub struct EvaluationInfo {
    pub design_layout: f64,
    pub turf_maintenance: f64,
    pub facilities_services: f64,
    pub landscape_environment: f64,
    pub playability_access: f64,
    pub average: f64,
}

#[derive(Debug, Serialize)]
pub struct ReviewInfo {
    pub id: i32,
    pub author: String,
    pub rating: i32,
    pub comment: String,
    pub images: Vec<String>,
    pub helpful_count: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct CourseDetailResponse {
    pub slug: String,
    pub holes: Option<i32>,
    pub par: Option<i32>,
    pub length_yards: Option<i32>,
    pub opened_year: Option<i32>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub maps_url: Option<String>,
    pub scorecard_pdf: Option<String>,
    pub translation: course_translation::Model,
    pub prices: Vec<TierPrice>,
    pub evaluation: Option<EvaluationInfo>,
    pub reviews: Vec<ReviewInfo>,
}

/// Course detail page: facts, localized text, tier prices, evaluation
/// and customer reviews
pub async fn course_detail(
    State(state): State<AppState>,
    Path((lang, slug)): Path<(String, String)>,
) -> AppResult<Json<CourseDetailResponse>> {
    let lang = normalize(&lang);

    let course = course::Entity::find()
        .filter(course::Column::Slug.eq(&slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Course not found".to_string()))?;

    // Fall back to English when the requested translation is missing
    let translations = course_translation::Entity::find()
        .filter(course_translation::Column::CourseId.eq(course.id))
        .all(&state.db)
        .await?;
    let translation = translations
        .iter()
        .find(|t| t.lang == lang)
        .or_else(|| translations.iter().find(|t| t.lang == "en"))
        .cloned()
        .ok_or_else(|| AppError::NotFound("Course translation not found".to_string()))?;

    let prices: Vec<TierPrice> = course_price::Entity::find()
        .filter(course_price::Column::CourseId.eq(course.id))
        .all(&state.db)
        .await?
        .into_iter()
        .map(|p| TierPrice {
            tier: p.tier,
            rack_price_vnd: p.rack_price_vnd,
            discount_price_vnd: p.discount_price_vnd,
            discount_note: p.discount_note,
            inc_caddie: p.inc_caddie,
            inc_cart: p.inc_cart,
            inc_tax: p.inc_tax,
        })
        .collect();

    let evaluation = course_evaluation::Entity::find()
        .filter(course_evaluation::Column::CourseId.eq(course.id))
        .one(&state.db)
        .await?
        .map(|e| EvaluationInfo {
            design_layout: e.design_layout,
            turf_maintenance: e.turf_maintenance,
            facilities_services: e.facilities_services,
            landscape_environment: e.landscape_environment,
            playability_access: e.playability_access,
            average: e.average(),
        });

    let reviews = review::Entity::find()
        .filter(review::Column::CourseId.eq(course.id))
        .all(&state.db)
        .await?;
    let votes = review_helpful::Entity::find().all(&state.db).await?;
    let users = user::Entity::find().all(&state.db).await?;

    let review_infos: Vec<ReviewInfo> = reviews
        .into_iter()
        .map(|r| {
            let author = users
                .iter()
                .find(|u| u.id == r.user_id)
                .map(|u| u.display_name().to_string())
                .unwrap_or_default();
            let helpful_count = votes.iter().filter(|v| v.review_id == r.id).count();
            ReviewInfo {
                id: r.id,
                author,
                rating: r.rating,
                comment: r.comment.clone(),
                images: r.image_list(),
                helpful_count,
                created_at: r.created_at.with_timezone(&Utc),
            }
        })
        .collect();

    Ok(Json(CourseDetailResponse {
        slug: course.slug,
        holes: course.holes,
        par: course.par,
        length_yards: course.length_yards,
        opened_year: course.opened_year,
        lat: course.lat,
        lng: course.lng,
        maps_url: course.maps_url,
        scorecard_pdf: course.scorecard_pdf,
        translation,
        prices,
        evaluation,
        reviews: review_infos,
    }))
}

/// Localized SEO block for the home page
pub async fn home_seo(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Json<static_page::Model>> {
    let lang = normalize(&lang);

    let pages = static_page::Entity::find()
        .filter(static_page::Column::PageId.eq("home"))
        .all(&state.db)
        .await?;

    let page = pages
        .iter()
        .find(|p| p.lang == lang)
        .or_else(|| pages.iter().find(|p| p.lang == "en"))
        .cloned()
        .ok_or_else(|| AppError::NotFound("No SEO record found".to_string()))?;

    Ok(Json(page))
}

/// XML sitemap over all course slugs and supported languages
pub async fn sitemap(
    State(state): State<AppState>,
) -> AppResult<([(header::HeaderName, &'static str); 1], String)> {
    let courses = course::Entity::find().all(&state.db).await?;
    let base = state.config.public_base_url.trim_end_matches('/');

    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );
    for c in &courses {
        for lang in SUPPORTED_LANGS {
            xml.push_str(&format!(
                "  <url><loc>{}/{}/courses/{}/</loc></url>\n",
                base, lang, c.slug
            ));
        }
    }
    xml.push_str("</urlset>\n");

    Ok(([(header::CONTENT_TYPE, "application/xml")], xml))
}

/// robots.txt pointing crawlers at the sitemap
pub async fn robots(State(state): State<AppState>) -> ([(header::HeaderName, &'static str); 1], String) {
    let base = state.config.public_base_url.trim_end_matches('/');
    let body = format!(
        "User-agent: *\nAllow: /\n\nSitemap: {}/sitemap.xml\n",
        base
    );

    ([(header::CONTENT_TYPE, "text/plain")], body)
}

/// Inspect the stored SEO record for a language
pub async fn debug_seo(
    State(state): State<AppState>,
    Path(lang): Path<String>,
) -> AppResult<Html<String>> {
    if !crate::utils::lang::is_supported(&lang) {
        return Err(AppError::BadRequest("Unsupported language".to_string()));
    }

    let page = static_page::Entity::find()
        .filter(static_page::Column::PageId.eq("home"))
        .filter(static_page::Column::Lang.eq(&lang))
        .one(&state.db)
        .await?;

    let Some(page) = page else {
        return Ok(Html(format!(
            "<p>No SEO record found for lang = '{}'</p>",
            lang
        )));
    };

    Ok(Html(format!(
        "<h1>SEO for page_id = 'home' ({})</h1>\
         <ul>\
         <li><strong>Title:</strong> {}</li>\
         <li><strong>Description:</strong> {}</li>\
         <li><strong>Keywords:</strong> {}</li>\
         </ul>",
        lang,
        page.title,
        page.description,
        page.keywords.as_deref().unwrap_or(""),
    )))
}
