use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "questions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// 1-based position, kept contiguous across deletes
    #[sea_orm(unique)]
    pub display_order: i32,

    pub question_text: String,
    pub choice1: String,
    pub choice2: String,
    pub choice3: String,
    pub choice4: String,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
