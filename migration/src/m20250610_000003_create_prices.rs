use sea_orm_migration::{prelude::*, schema::*};

use super::m20250610_000002_create_courses::GolfCourse;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CoursePrice::Table)
                    .if_not_exists()
                    .col(pk_auto(CoursePrice::Id))
                    .col(integer(CoursePrice::CourseId).not_null())
                    .col(string_len(CoursePrice::Tier, 20).not_null())
                    .col(big_integer(CoursePrice::RackPriceVnd).not_null())
                    .col(big_integer(CoursePrice::DiscountPriceVnd).not_null())
                    .col(string_len_null(CoursePrice::DiscountNote, 20))
                    .col(boolean(CoursePrice::IncCaddie).not_null().default(false))
                    .col(boolean(CoursePrice::IncCart).not_null().default(false))
                    .col(boolean(CoursePrice::IncTax).not_null().default(false))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_price_course")
                            .from(CoursePrice::Table, CoursePrice::CourseId)
                            .to(GolfCourse::Table, GolfCourse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseEvaluation::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseEvaluation::Id))
                    .col(integer(CourseEvaluation::CourseId).not_null())
                    .col(double(CourseEvaluation::DesignLayout).not_null())
                    .col(double(CourseEvaluation::TurfMaintenance).not_null())
                    .col(double(CourseEvaluation::FacilitiesServices).not_null())
                    .col(double(CourseEvaluation::LandscapeEnvironment).not_null())
                    .col(double(CourseEvaluation::PlayabilityAccess).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_evaluation_course")
                            .from(CourseEvaluation::Table, CourseEvaluation::CourseId)
                            .to(GolfCourse::Table, GolfCourse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(FxRate::Table)
                    .if_not_exists()
                    .col(pk_auto(FxRate::Id))
                    .col(date(FxRate::RateDate).not_null())
                    .col(string_len(FxRate::Currency, 10).not_null())
                    .col(double(FxRate::RateToVnd).not_null())
                    .col(string_null(FxRate::Source))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(FxRate::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CourseEvaluation::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(CoursePrice::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CoursePrice {
    Table,
    Id,
    CourseId,
    Tier,
    RackPriceVnd,
    DiscountPriceVnd,
    DiscountNote,
    IncCaddie,
    IncCart,
    IncTax,
}

#[derive(DeriveIden)]
pub enum CourseEvaluation {
    Table,
    Id,
    CourseId,
    DesignLayout,
    TurfMaintenance,
    FacilitiesServices,
    LandscapeEnvironment,
    PlayabilityAccess,
}

#[derive(DeriveIden)]
pub enum FxRate {
    Table,
    Id,
    RateDate,
    Currency,
    RateToVnd,
    Source,
}
