use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ActiveValue::Set, EntityTrait, PaginatorTrait};

use crate::entities::approval_documents::{self, DocumentStatus, SEEDED_DOCUMENT_COUNT};
use crate::entities::comments::{self, DEFAULT_COMMENTER};
use crate::entities::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        let now = chrono::Utc::now();

        if ApprovalDocuments::find().count(db).await? == 0 {
            let documents = (1..=SEEDED_DOCUMENT_COUNT).map(|i| approval_documents::ActiveModel {
                id: Set(i),
                title: Set(format!("Item {i}")),
                reason: Set(String::new()),
                status: Set(DocumentStatus::seeded(i)),
                created_at: Set(now),
                updated_at: Set(now),
            });
            ApprovalDocuments::insert_many(documents).exec(db).await?;
        }

        if Comments::find().count(db).await? == 0 {
            let greeting = comments::ActiveModel {
                commenter: Set(DEFAULT_COMMENTER.to_string()),
                message: Set("have a good day".to_string()),
                created_at: Set(now),
                ..Default::default()
            };
            Comments::insert(greeting).exec(db).await?;
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        Comments::delete_many().exec(db).await?;
        ApprovalDocuments::delete_many().exec(db).await?;
        Ok(())
    }
}
