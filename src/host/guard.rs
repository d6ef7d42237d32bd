//! Scoped display suspension

use super::Host;

/// Holds the host display suspended for as long as it lives
///
/// Restoration runs in `Drop`, so it happens exactly once on every exit
/// path: normal return, early `?` return, or unwinding. A failed suspend
/// is logged and still followed by a restore attempt.
pub struct DisplayGuard<'a, H: Host + ?Sized> {
    host: &'a mut H,
}

impl<'a, H: Host + ?Sized> DisplayGuard<'a, H> {
    /// Suspend the host display
    pub fn acquire(host: &'a mut H) -> Self {
        if let Err(e) = host.suspend() {
            tracing::warn!(error = %e, "failed to suspend display");
        }
        Self { host }
    }
}

impl<H: Host + ?Sized> Drop for DisplayGuard<'_, H> {
    fn drop(&mut self) {
        if let Err(e) = self.host.restore() {
            tracing::warn!(error = %e, "failed to restore display");
        }
    }
}
