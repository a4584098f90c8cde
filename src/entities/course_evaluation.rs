use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Editorial evaluation of a course: five sub-scores, averaged on read.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "course_evaluation")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub design_layout: f64,
    pub turf_maintenance: f64,
    pub facilities_services: f64,
    pub landscape_environment: f64,
    pub playability_access: f64,
}

impl Model {
    /// Average of the five sub-scores, rounded to one decimal place.
    pub fn average(&self) -> f64 {
        let sum = self.design_layout
            + self.turf_maintenance
            + self.facilities_services
            + self.landscape_environment
            + self.playability_access;
        (sum / 5.0 * 10.0).round() / 10.0
    }
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_rounds_to_one_decimal() {
        let eval = Model {
            id: 1,
            course_id: 1,
            design_layout: 4.0,
            turf_maintenance: 4.5,
            facilities_services: 3.5,
            landscape_environment: 5.0,
            playability_access: 4.2,
        };
        assert_eq!(eval.average(), 4.2);
    }
}
