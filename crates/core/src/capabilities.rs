//! Startup capability negotiation

use healthprod_domain::{Capabilities, NotificationPermission};
use tracing::info;

/// Trait for querying optional host facilities
pub trait CapabilityProbe: Send + Sync {
    fn speech_recognition(&self) -> bool;

    fn speech_synthesis(&self) -> bool;

    fn notification_permission(&self) -> NotificationPermission;
}

/// Probe the host once and freeze the result.
pub fn negotiate_capabilities(probe: &dyn CapabilityProbe) -> Capabilities {
    let capabilities = Capabilities {
        speech_recognition: probe.speech_recognition(),
        speech_synthesis: probe.speech_synthesis(),
        notifications: probe.notification_permission(),
    };
    info!(
        speech_recognition = capabilities.speech_recognition,
        speech_synthesis = capabilities.speech_synthesis,
        notifications = ?capabilities.notifications,
        "Capabilities negotiated"
    );
    capabilities
}
