use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "confirmed")]
    Confirmed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "completed")]
    Completed,
}

/// A tee-time booking with its fee breakdown frozen at creation time.
/// Bookings are never hard-deleted by user flows; they move through
/// statuses instead.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: i32,
    pub play_date: Date,
    pub play_time: Time,
    pub players: i32,
    pub has_caddy: bool,
    pub has_cart: bool,
    pub has_rent_clubs: bool,
    pub green_fee: i64,
    pub services_fee: i64,
    pub insurance_fee: i64,
    pub total_amount: i64,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn play_datetime(&self) -> chrono::NaiveDateTime {
        self.play_date.and_time(self.play_time)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::course::Entity",
        from = "Column::CourseId",
        to = "super::course::Column::Id"
    )]
    Course,
    #[sea_orm(has_many = "super::booking_status_history::Entity")]
    StatusHistory,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::course::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Course.def()
    }
}

impl Related<super::booking_status_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StatusHistory.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn status_values_are_lowercase_strings() {
        assert_eq!(
            serde_json::to_value(BookingStatus::Confirmed).unwrap(),
            "confirmed"
        );
        assert!(serde_json::from_value::<BookingStatus>(serde_json::json!("completed")).is_ok());
        assert!(serde_json::from_value::<BookingStatus>(serde_json::json!("bogus")).is_err());
    }

    #[test]
    fn play_datetime_combines_date_and_time() {
        let booking = Model {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            course_id: 1,
            play_date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            play_time: NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            players: 2,
            has_caddy: false,
            has_cart: false,
            has_rent_clubs: false,
            green_fee: 0,
            services_fee: 0,
            insurance_fee: 0,
            total_amount: 0,
            status: BookingStatus::Pending,
            notes: None,
            created_at: chrono::Utc::now().into(),
            updated_at: chrono::Utc::now().into(),
        };
        assert_eq!(
            booking.play_datetime(),
            NaiveDate::from_ymd_opt(2025, 6, 14)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap()
        );
    }
}
