//! Cooperative shutdown support via atomic flag (§5, "Cancellation &
//! timeouts").

use std::sync::atomic::{AtomicBool, Ordering};

/// Global shutdown flag, set by the CLI's SIGINT/SIGTERM handler.
pub fn shutdown_flag() -> &'static AtomicBool {
    static FLAG: AtomicBool = AtomicBool::new(false);
    &FLAG
}

/// Check if shutdown was requested. Network-bound stages check this between
/// records; the loader checks it between batches.
pub fn is_shutdown_requested() -> bool {
    shutdown_flag().load(Ordering::Relaxed)
}

/// Request shutdown (called from the signal handler).
pub fn request_shutdown() {
    shutdown_flag().store(true, Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_sets_flag() {
        request_shutdown();
        assert!(is_shutdown_requested());
    }
}
