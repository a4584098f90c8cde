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
                    .table(Review::Table)
                    .if_not_exists()
                    .col(pk_auto(Review::Id))
                    .col(integer(Review::CourseId).not_null())
                    .col(uuid(Review::UserId).not_null())
                    .col(integer(Review::Rating).not_null())
                    .col(text(Review::Comment).not_null())
                    // JSON array of image filenames
                    .col(text_null(Review::Images))
                    .col(
                        timestamp_with_time_zone(Review::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Review::UpdatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_course")
                            .from(Review::Table, Review::CourseId)
                            .to(GolfCourse::Table, GolfCourse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_user")
                            .from(Review::Table, Review::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReviewHelpful::Table)
                    .if_not_exists()
                    .col(pk_auto(ReviewHelpful::Id))
                    .col(integer(ReviewHelpful::ReviewId).not_null())
                    .col(uuid(ReviewHelpful::UserId).not_null())
                    .col(
                        timestamp_with_time_zone(ReviewHelpful::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_helpful_review")
                            .from(ReviewHelpful::Table, ReviewHelpful::ReviewId)
                            .to(Review::Table, Review::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_review_helpful_user")
                            .from(ReviewHelpful::Table, ReviewHelpful::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_review_helpful_review_user")
                    .table(ReviewHelpful::Table)
                    .col(ReviewHelpful::ReviewId)
                    .col(ReviewHelpful::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReviewHelpful::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Review::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Review {
    Table,
    Id,
    CourseId,
    UserId,
    Rating,
    Comment,
    Images,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
pub enum ReviewHelpful {
    Table,
    Id,
    ReviewId,
    UserId,
    CreatedAt,
}
