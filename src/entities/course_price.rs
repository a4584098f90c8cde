use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Pricing bucket a tee time falls into, selected by date and hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum PriceTier {
    #[sea_orm(string_value = "weekday")]
    Weekday,
    #[sea_orm(string_value = "weekend")]
    Weekend,
    #[sea_orm(string_value = "twilight")]
    Twilight,
}

/// Rack price for one (course, tier) pair, in whole VND. The discount is
/// kept as the free-text note it was entered as ("-30%") and re-parsed when
/// the discounted price is recomputed.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_price")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub tier: PriceTier,
    pub rack_price_vnd: i64,
    pub discount_price_vnd: i64,
    pub discount_note: Option<String>,
    pub inc_caddie: bool,
    pub inc_cart: bool,
    pub inc_tax: bool,
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
