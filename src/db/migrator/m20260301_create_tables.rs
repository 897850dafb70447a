use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn create_from_entity<E>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: EntityTrait,
{
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let backend = manager.get_database_backend();
        let schema = Schema::new(backend);

        create_from_entity(manager, &schema, People).await?;
        create_from_entity(manager, &schema, UserAccounts).await?;
        create_from_entity(manager, &schema, ApprovalDocuments).await?;
        create_from_entity(manager, &schema, Profiles).await?;
        create_from_entity(manager, &schema, QueueState).await?;
        create_from_entity(manager, &schema, NumericProductCodes).await?;
        create_from_entity(manager, &schema, AlphanumericProductCodes).await?;
        create_from_entity(manager, &schema, Questions).await?;
        create_from_entity(manager, &schema, Comments).await?;
        create_from_entity(manager, &schema, ExamResults).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for table in [
            "exam_results",
            "comments",
            "questions",
            "alphanumeric_product_codes",
            "numeric_product_codes",
            "queue_state",
            "profiles",
            "approval_documents",
            "user_accounts",
            "people",
        ] {
            manager
                .drop_table(Table::drop().table(Alias::new(table)).if_exists().to_owned())
                .await?;
        }

        Ok(())
    }
}
