use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Customer review of a course. `images` is a JSON array of filenames
/// referencing uploaded media.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "review")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub course_id: i32,
    pub user_id: Uuid,
    pub rating: i32,
    pub comment: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub images: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Decode the stored JSON image list; junk decodes to an empty list.
    pub fn image_list(&self) -> Vec<String> {
        self.images
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
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
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::review_helpful::Entity")]
    HelpfulVotes,
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::review_helpful::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::HelpfulVotes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn review(images: Option<&str>) -> Model {
        Model {
            id: 1,
            course_id: 1,
            user_id: Uuid::new_v4(),
            rating: 5,
            comment: "Great greens".to_string(),
            images: images.map(String::from),
            created_at: Utc::now().into(),
            updated_at: Utc::now().into(),
        }
    }

    #[test]
    fn image_list_decodes_json_array() {
        let r = review(Some(r#"["a.jpg","b.png"]"#));
        assert_eq!(r.image_list(), vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn image_list_tolerates_junk_and_null() {
        assert!(review(Some("not json")).image_list().is_empty());
        assert!(review(None).image_list().is_empty());
    }
}
