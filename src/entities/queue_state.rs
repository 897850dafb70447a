use sea_orm::entity::prelude::*;

/// Primary key of the only row
pub const CURSOR_ID: i32 = 1;

/// Index stored when no ticket has been issued
pub const NONE_ISSUED: i32 = -1;

/// Highest ticket index (`Z9`); the next issue wraps to 0
pub const MAX_INDEX: i32 = 259;

/// Single-row table holding the last issued ticket index.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "queue_state")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i32,

    /// -1 when no ticket has been issued since the last clear
    pub last_issued_index: i32,

    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
