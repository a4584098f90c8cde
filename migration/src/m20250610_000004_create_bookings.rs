use sea_orm_migration::{prelude::*, schema::*};

use super::m20250610_000001_create_users::User;
use super::m20250610_000002_create_courses::GolfCourse;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Booking::Table)
                    .if_not_exists()
                    .col(uuid(Booking::Id).primary_key())
                    .col(uuid(Booking::UserId).not_null())
                    .col(integer(Booking::CourseId).not_null())
                    .col(date(Booking::PlayDate).not_null())
                    .col(time(Booking::PlayTime).not_null())
                    .col(integer(Booking::Players).not_null().default(1))
                    .col(boolean(Booking::HasCaddy).not_null().default(false))
                    .col(boolean(Booking::HasCart).not_null().default(false))
                    .col(boolean(Booking::HasRentClubs).not_null().default(false))
                    .col(big_integer(Booking::GreenFee).not_null())
                    .col(big_integer(Booking::ServicesFee).not_null())
                    .col(big_integer(Booking::InsuranceFee).not_null())
                    .col(big_integer(Booking::TotalAmount).not_null())
                    .col(string_len(Booking::Status, 20).not_null())
                    .col(text_null(Booking::Notes))
                    .col(
                        timestamp_with_time_zone(Booking::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Booking::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_user")
                            .from(Booking::Table, Booking::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_course")
                            .from(Booking::Table, Booking::CourseId)
                            .to(GolfCourse::Table, GolfCourse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_user")
                    .table(Booking::Table)
                    .col(Booking::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_booking_status")
                    .table(Booking::Table)
                    .col(Booking::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(BookingStatusHistory::Table)
                    .if_not_exists()
                    .col(pk_auto(BookingStatusHistory::Id))
                    .col(uuid(BookingStatusHistory::BookingId).not_null())
                    .col(string_len(BookingStatusHistory::OldStatus, 20).not_null())
                    .col(string_len(BookingStatusHistory::NewStatus, 20).not_null())
                    .col(string_len(BookingStatusHistory::ChangedBy, 100).not_null())
                    .col(text_null(BookingStatusHistory::Notes))
                    .col(
                        timestamp_with_time_zone(BookingStatusHistory::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_status_history_booking")
                            .from(BookingStatusHistory::Table, BookingStatusHistory::BookingId)
                            .to(Booking::Table, Booking::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(BookingStatusHistory::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Booking::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Booking {
    Table,
    Id,
    UserId,
    CourseId,
    PlayDate,
    PlayTime,
    Players,
    HasCaddy,
    HasCart,
    HasRentClubs,
    GreenFee,
    ServicesFee,
    InsuranceFee,
    TotalAmount,
    Status,
    Notes,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum BookingStatusHistory {
    Table,
    Id,
    BookingId,
    OldStatus,
    NewStatus,
    ChangedBy,
    Notes,
    CreatedAt,
}
