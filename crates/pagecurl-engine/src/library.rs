//! Process-wide engine library state.
//!
//! The engine library is initialized once per process and torn down once, after
//! every engine has been destroyed. A single atomic flag tracks the phase.

use std::sync::atomic::{AtomicU8, Ordering};

const UNINITIALIZED: u8 = 0;
const READY: u8 = 1;
const TORN_DOWN: u8 = 2;

static STATE: AtomicU8 = AtomicU8::new(UNINITIALIZED);

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LibraryError {
    #[error("engine library was already torn down in this process")]
    TornDown,
}

/// Initializes the engine library.
///
/// Returns `Ok(true)` for the call that performed initialization and `Ok(false)`
/// when the library was already initialized.
pub fn init() -> Result<bool, LibraryError> {
    match STATE.compare_exchange(UNINITIALIZED, READY, Ordering::AcqRel, Ordering::Acquire) {
        Ok(_) => {
            log::debug!("engine library initialized");
            Ok(true)
        }
        Err(READY) => Ok(false),
        Err(_) => Err(LibraryError::TornDown),
    }
}

/// Tears the library down. Returns `true` only for the call that did it.
pub fn teardown() -> bool {
    let done = STATE
        .compare_exchange(READY, TORN_DOWN, Ordering::AcqRel, Ordering::Acquire)
        .is_ok();
    if done {
        log::debug!("engine library torn down");
    }
    done
}

pub fn is_initialized() -> bool {
    STATE.load(Ordering::Acquire) == READY
}
