use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "user_accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Username as typed at registration
    pub username: String,

    /// Lowercased username, used for lookup and uniqueness
    #[sea_orm(unique)]
    pub normalized_username: String,

    /// PBKDF2-HMAC-SHA256 derived key, base64
    pub password_hash: String,

    /// Random 16-byte salt, base64
    pub password_salt: String,

    #[sea_orm(default_value = 0)]
    pub failed_login_count: i32,

    pub lockout_end: Option<DateTimeUtc>,

    pub created_at: DateTimeUtc,

    pub last_login_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
