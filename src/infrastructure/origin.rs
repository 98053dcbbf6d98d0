//! Best-effort submitter origin for votes.
//!
//! The origin is an advisory audit token. Failing to determine it never fails
//! the vote: callers fall back to [`UNAVAILABLE_ORIGIN`].

use std::net::UdpSocket;

/// Stored in place of the origin when none can be determined.
pub const UNAVAILABLE_ORIGIN: &str = "unavailable";

/// Source of the origin token recorded with each vote.
pub trait OriginResolver: Send + Sync {
    /// Returns the origin token, or `None` if it cannot be determined.
    fn resolve(&self) -> Option<String>;
}

impl<F> OriginResolver for F
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn resolve(&self) -> Option<String> {
        self()
    }
}

/// Uses the address of the local interface that routes outbound traffic.
///
/// Connecting a UDP socket only selects a route; no packet is sent.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalAddressOrigin;

impl OriginResolver for LocalAddressOrigin {
    fn resolve(&self) -> Option<String> {
        let socket = UdpSocket::bind(("0.0.0.0", 0)).ok()?;
        socket.connect(("192.0.2.1", 9)).ok()?;
        let addr = socket.local_addr().ok()?;

        if addr.ip().is_unspecified() {
            return None;
        }
        Some(addr.ip().to_string())
    }
}

/// Resolves the origin, degrading to [`UNAVAILABLE_ORIGIN`].
pub fn resolve_or_unavailable(resolver: &dyn OriginResolver) -> String {
    match resolver.resolve() {
        Some(origin) if !origin.trim().is_empty() => origin,
        _ => {
            tracing::warn!("Submitter origin unavailable, recording placeholder");
            UNAVAILABLE_ORIGIN.to_string()
        }
    }
}
