// sqlx -> AppError mapping
// (orphan rules prevent From<sqlx::Error> for AppError here)

use todo_core::error::AppError;

/// Convert sqlx::Error to AppError with structured information
pub(crate) fn map_sqlx_error(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) => {
            // SQLite error codes: https://www.sqlite.org/rescode.html
            match db_err.code().as_deref() {
                Some("2067") | Some("1555") => AppError::Storage(format!(
                    "Unique constraint violation: {}",
                    db_err.message()
                )),
                Some("5") => AppError::Storage(format!(
                    "Database locked (SQLITE_BUSY): {}",
                    db_err.message()
                )),
                Some("13") => AppError::Storage(format!("Database full: {}", db_err.message())),
                Some(code) => {
                    AppError::Storage(format!("Database error [{}]: {}", code, db_err.message()))
                }
                None => AppError::Storage(format!("Database error: {}", db_err.message())),
            }
        }
        sqlx::Error::RowNotFound => AppError::Storage("Row not found".to_string()),
        sqlx::Error::ColumnNotFound(col) => {
            AppError::Storage(format!("Column not found: {}", col))
        }
        sqlx::Error::Configuration(e) => AppError::Config(format!("Invalid database URL: {}", e)),
        // Connection, pool, protocol errors
        _ => AppError::Storage(err.to_string()),
    }
}
