//! Scheduler error types

use std::time::Duration;

use healthprod_domain::HealthProdError;
use thiserror::Error;

use crate::errors::InfraError;

#[derive(Debug, Error)]
pub enum SchedulerError {
    #[error("Scheduler already running")]
    AlreadyRunning,

    #[error("Scheduler not running")]
    NotRunning,

    /// The host has not granted notification permission
    #[error("Notifications are not permitted")]
    NotificationsDisabled,

    #[error("Operation timed out after {duration:?}")]
    Timeout { duration: Duration },

    #[error("Task join failed: {0}")]
    TaskJoinFailed(#[from] tokio::task::JoinError),
}

impl From<SchedulerError> for InfraError {
    fn from(err: SchedulerError) -> Self {
        let mapped = match err {
            SchedulerError::AlreadyRunning | SchedulerError::NotRunning => {
                HealthProdError::Validation(err.to_string())
            }
            SchedulerError::NotificationsDisabled => HealthProdError::Unsupported(err.to_string()),
            _ => HealthProdError::Internal(err.to_string()),
        };
        InfraError(mapped)
    }
}

impl From<SchedulerError> for HealthProdError {
    fn from(err: SchedulerError) -> Self {
        InfraError::from(err).into()
    }
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
