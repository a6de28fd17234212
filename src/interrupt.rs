//! Ctrl-C handling for the drivers.
//!
//! The first SIGINT during a search does not kill the process: it raises a
//! shared flag that [`crate::solver::Searcher`] checks between expansions, so
//! the driver can still report the statistics gathered so far. Once the search
//! is over, [`restore_default`] hands SIGINT back to the default action.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::debug;

static FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

/// Installs the SIGINT handler (once) and returns the flag it raises.
///
/// On platforms without POSIX signals the flag is returned but never raised.
pub fn install_handler() -> Arc<AtomicBool> {
    let flag = Arc::clone(FLAG.get_or_init(|| Arc::new(AtomicBool::new(false))));

    #[cfg(unix)]
    unsafe {
        let h = handler as *const () as libc::sighandler_t;
        libc::signal(libc::SIGINT, h);
    }
    debug!("SIGINT handler installed");

    flag
}

/// Reinstates the default SIGINT action, so Ctrl-C terminates the process again.
pub fn restore_default() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_DFL);
    }
    debug!("SIGINT handler removed");
}

/// Lowers the flag so the next search starts uninterrupted.
pub fn reset(flag: &AtomicBool) {
    flag.store(false, Ordering::SeqCst);
}

#[cfg(unix)]
extern "C" fn handler(_: libc::c_int) {
    if let Some(flag) = FLAG.get() {
        flag.store(true, Ordering::SeqCst);
    }
}
