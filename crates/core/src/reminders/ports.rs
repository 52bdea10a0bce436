//! Port interface for user notifications

use healthprod_domain::Result;

/// Trait for posting a user-visible notification
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, body: &str) -> Result<()>;
}
