use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GolfCourse::Table)
                    .if_not_exists()
                    .col(pk_auto(GolfCourse::Id))
                    .col(string_len(GolfCourse::Slug, 100).not_null().unique_key())
                    .col(integer_null(GolfCourse::Holes))
                    .col(integer_null(GolfCourse::Par))
                    .col(integer_null(GolfCourse::LengthYards))
                    .col(integer_null(GolfCourse::OpenedYear))
                    .col(double_null(GolfCourse::Lat))
                    .col(double_null(GolfCourse::Lng))
                    .col(string_null(GolfCourse::MapsUrl))
                    .col(string_null(GolfCourse::ScorecardPdf))
                    .col(
                        timestamp_with_time_zone(GolfCourse::CreatedAt)
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(CourseTranslation::Table)
                    .if_not_exists()
                    .col(pk_auto(CourseTranslation::Id))
                    .col(integer(CourseTranslation::CourseId).not_null())
                    .col(string_len(CourseTranslation::Lang, 10).not_null())
                    .col(string_len(CourseTranslation::Name, 255).not_null())
                    .col(string_null(CourseTranslation::DesignerName))
                    .col(string_null(CourseTranslation::Address))
                    .col(string_null(CourseTranslation::SeoTitle))
                    .col(text_null(CourseTranslation::SeoDescription))
                    .col(string_null(CourseTranslation::MetaKeywords))
                    .col(text_null(CourseTranslation::Overview))
                    .col(text_null(CourseTranslation::Content))
                    .col(text_null(CourseTranslation::FeeNote))
                    .col(string_null(CourseTranslation::BestSeason))
                    .col(text_null(CourseTranslation::TipsNote))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_course_translation_course")
                            .from(CourseTranslation::Table, CourseTranslation::CourseId)
                            .to(GolfCourse::Table, GolfCourse::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_course_translation_course_lang")
                    .table(CourseTranslation::Table)
                    .col(CourseTranslation::CourseId)
                    .col(CourseTranslation::Lang)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CourseTranslation::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(GolfCourse::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GolfCourse {
    Table,
    Id,
    Slug,
    Holes,
    Par,
    LengthYards,
    OpenedYear,
    Lat,
    Lng,
    MapsUrl,
    ScorecardPdf,
    CreatedAt,
}

#[derive(DeriveIden)]
pub enum CourseTranslation {
    Table,
    Id,
    CourseId,
    Lang,
    Name,
    DesignerName,
    Address,
    SeoTitle,
    SeoDescription,
    MetaKeywords,
    Overview,
    Content,
    FeeNote,
    BestSeason,
    TipsNote,
}
