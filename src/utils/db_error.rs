//! Classification of database errors raised by SQLx.

/// Returns true when `e` is a unique-constraint violation on one of the
/// short code columns (`short_code` or `custom_alias`).
pub fn is_unique_violation_on_code(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(
        db_err.constraint(),
        Some("urls_short_code_key") | Some("urls_custom_alias_key")
    )
}
