use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(StaticPage::Table)
                    .if_not_exists()
                    .col(pk_auto(StaticPage::Id))
                    .col(string_len(StaticPage::PageId, 50).not_null())
                    .col(string_len(StaticPage::Lang, 10).not_null())
                    .col(string_len(StaticPage::Title, 255).not_null())
                    .col(text(StaticPage::Description).not_null())
                    .col(string_null(StaticPage::Keywords))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_static_page_page_lang")
                    .table(StaticPage::Table)
                    .col(StaticPage::PageId)
                    .col(StaticPage::Lang)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Seed the default-language SEO block for the home page
        let insert = Query::insert()
            .into_table(StaticPage::Table)
            .columns([
                StaticPage::PageId,
                StaticPage::Lang,
                StaticPage::Title,
                StaticPage::Description,
                StaticPage::Keywords,
            ])
            .values_panic([
                "home".into(),
                "en".into(),
                "TEEtimeVN - Book Golf Tee Times in Vietnam".into(),
                "Browse Vietnam's top golf courses, compare rates and book your tee time online.".into(),
                "golf, tee time, vietnam, booking".into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StaticPage::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum StaticPage {
    Table,
    Id,
    PageId,
    Lang,
    Title,
    Description,
    Keywords,
}
