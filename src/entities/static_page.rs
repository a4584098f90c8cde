use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SEO text for a static page, one row per (page, language).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "static_page")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub page_id: String,
    pub lang: String,
    pub title: String,
    pub description: String,
    pub keywords: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
