use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Localized text for a golf course, one row per (course, language).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_translation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub lang: String,
    pub name: String,
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

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
