//! Shared Diesel error mapping for the menu repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Unique constraint guarding account emails.
pub(crate) const USERS_EMAIL_KEY: &str = "users_email_key";
/// Unique constraint guarding restaurant slugs.
pub(crate) const RESTAURANTS_SLUG_KEY: &str = "restaurants_slug_key";

/// Map pool errors into a repository-specific connection error constructor.
pub(crate) fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map common Diesel error variants into query/connection constructors.
///
/// `NotFound` and query-builder failures map to query errors; a closed
/// connection maps to a connection error.
pub(crate) fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        _ => query("database error"),
    }
}

/// True when `error` is a unique violation raised by `constraint`.
///
/// Falls back to matching the message when the driver omits the constraint
/// name.
pub(crate) fn is_unique_violation_of(error: &DieselError, constraint: &str) -> bool {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => info
            .constraint_name()
            .map_or_else(|| info.message().contains(constraint), |name| name == constraint),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[derive(Debug, PartialEq, Eq)]
    enum Mapped {
        Query(&'static str),
        Connection(&'static str),
    }

    struct Info {
        message: &'static str,
        constraint: Option<&'static str>,
    }

    impl diesel::result::DatabaseErrorInformation for Info {
        fn message(&self) -> &str {
            self.message
        }
        fn details(&self) -> Option<&str> {
            None
        }
        fn hint(&self) -> Option<&str> {
            None
        }
        fn table_name(&self) -> Option<&str> {
            None
        }
        fn column_name(&self) -> Option<&str> {
            None
        }
        fn constraint_name(&self) -> Option<&str> {
            self.constraint
        }
        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn database_error(
        kind: DatabaseErrorKind,
        message: &'static str,
        constraint: Option<&'static str>,
    ) -> DieselError {
        DieselError::DatabaseError(kind, Box::new(Info { message, constraint }))
    }

    #[rstest]
    fn closed_connection_maps_to_connection() {
        let error = database_error(DatabaseErrorKind::ClosedConnection, "gone", None);
        let mapped = map_basic_diesel_error(error, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Connection("database connection error"));
    }

    #[rstest]
    fn other_failures_map_to_query() {
        let mapped = map_basic_diesel_error(DieselError::NotFound, Mapped::Query, Mapped::Connection);
        assert_eq!(mapped, Mapped::Query("record not found"));
    }

    #[rstest]
    fn pool_errors_keep_their_message() {
        let mapped: String = map_basic_pool_error(PoolError::checkout("busy"), |m| m);
        assert_eq!(mapped, "busy");
    }

    #[rstest]
    #[case(Some(RESTAURANTS_SLUG_KEY), "duplicate key", true)]
    #[case(Some(USERS_EMAIL_KEY), "duplicate key", false)]
    #[case(None, "duplicate key value violates unique constraint \"restaurants_slug_key\"", true)]
    fn unique_violation_matches_constraint(
        #[case] constraint: Option<&'static str>,
        #[case] message: &'static str,
        #[case] expected: bool,
    ) {
        let error = database_error(DatabaseErrorKind::UniqueViolation, message, constraint);
        assert_eq!(is_unique_violation_of(&error, RESTAURANTS_SLUG_KEY), expected);
    }

    #[rstest]
    fn non_unique_errors_never_match() {
        let error = database_error(
            DatabaseErrorKind::ForeignKeyViolation,
            "restaurants_slug_key",
            Some(RESTAURANTS_SLUG_KEY),
        );
        assert!(!is_unique_violation_of(&error, RESTAURANTS_SLUG_KEY));
    }
}
