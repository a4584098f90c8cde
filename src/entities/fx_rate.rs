use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Daily reference exchange rate used to display prices in other currencies.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "fx_rate")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub rate_date: Date,
    pub currency: String,
    pub rate_to_vnd: f64,
    pub source: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
