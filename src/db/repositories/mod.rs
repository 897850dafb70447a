use sea_orm::sea_query::{Expr, SimpleExpr};
use sea_orm::{ConnectionTrait, DbErr, EntityTrait, QueryFilter};

pub mod comment;
pub mod document;
pub mod exam;
pub mod people;
pub mod product_code;
pub mod profile;
pub mod question;
pub mod queue;
pub mod user;

/// Takes the SQLite write lock with an `UPDATE` that matches no rows.
///
/// Call it first in any transaction that reads before writing: a deferred
/// read lock cannot be upgraded while another writer is active, and that
/// upgrade fails immediately instead of waiting on the busy timeout.
pub(crate) async fn lock_for_write<E, C>(conn: &C, column: E::Column) -> Result<(), DbErr>
where
    E: EntityTrait,
    C: ConnectionTrait,
{
    E::update_many()
        .col_expr(column, SimpleExpr::from(Expr::col(column)))
        .filter(Expr::val(1).eq(0))
        .exec(conn)
        .await?;
    Ok(())
}
