pub mod attribute;
pub mod category;
pub mod product;

use sea_orm::{DbErr, SqlErr};

use crate::error::AppError;

/// Map a unique-constraint violation on a name column to `CONFLICT`.
fn name_conflict(err: DbErr, what: &str) -> AppError {
    if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
        AppError::Conflict(format!("{what} name is already in use"))
    } else {
        err.into()
    }
}
