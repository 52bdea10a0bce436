//! Conversions from external infrastructure errors into domain errors.

use healthprod_domain::HealthProdError;
use reqwest::Error as HttpError;
use rusqlite::Error as SqlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub HealthProdError);

impl From<InfraError> for HealthProdError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<HealthProdError> for InfraError {
    fn from(value: HealthProdError) -> Self {
        InfraError(value)
    }
}

/// Shorthand for `HealthProdError::from(InfraError::from(err))`.
pub(crate) fn to_domain<E>(err: E) -> HealthProdError
where
    InfraError: From<E>,
{
    InfraError::from(err).into()
}

trait IntoHealthProdError {
    fn into_healthprod(self) -> HealthProdError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → HealthProdError */
/* -------------------------------------------------------------------------- */

impl IntoHealthProdError for SqlError {
    fn into_healthprod(self) -> HealthProdError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        HealthProdError::Storage("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        HealthProdError::Storage("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067 | 1555) => {
                        HealthProdError::Storage("unique constraint violation".into())
                    }
                    (ErrorCode::CannotOpen, _) => {
                        HealthProdError::Storage(format!("unable to open database: {message}"))
                    }
                    (ErrorCode::ReadOnly, _) => {
                        HealthProdError::Storage("database is read-only".into())
                    }
                    _ => HealthProdError::Storage(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => {
                HealthProdError::NotFound("no rows returned by query".into())
            }
            RE::FromSqlConversionFailure(_, _, cause) => {
                HealthProdError::Storage(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                HealthProdError::Storage(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => HealthProdError::Config(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            other => HealthProdError::Storage(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        InfraError(value.into_healthprod())
    }
}

impl From<r2d2::Error> for InfraError {
    fn from(value: r2d2::Error) -> Self {
        InfraError(HealthProdError::Storage(format!("connection pool error: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → HealthProdError */
/* -------------------------------------------------------------------------- */

impl IntoHealthProdError for HttpError {
    fn into_healthprod(self) -> HealthProdError {
        if self.is_timeout() {
            return HealthProdError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return HealthProdError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => {
                    HealthProdError::Ai(format!("gateway rejected credentials: {message}"))
                }
                404 => HealthProdError::NotFound(message),
                400..=499 => HealthProdError::Validation(message),
                _ => HealthProdError::Network(message),
            };
        }

        if self.is_decode() {
            return HealthProdError::Ai(format!("malformed gateway response: {self}"));
        }

        HealthProdError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_healthprod())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
