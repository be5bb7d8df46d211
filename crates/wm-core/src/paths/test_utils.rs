//! Serialised access to `WMARKET_DATA_DIR` for path tests.

use std::sync::{Mutex, MutexGuard};

use super::platform::DATA_DIR_ENV;

static DATA_DIR_LOCK: Mutex<()> = Mutex::new(());

/// Holds the data-dir override for the lifetime of a test.
///
/// Tests touching the variable run one at a time; the previous value is put
/// back when the guard drops.
pub struct DataDirOverride {
    previous: Option<String>,
    _lock: MutexGuard<'static, ()>,
}

impl DataDirOverride {
    #[allow(unsafe_code)]
    pub fn set(value: &str) -> Self {
        let lock = DATA_DIR_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let previous = std::env::var(DATA_DIR_ENV).ok();
        // Safe while DATA_DIR_LOCK is held: no other test reads the variable
        unsafe { std::env::set_var(DATA_DIR_ENV, value) };
        Self {
            previous,
            _lock: lock,
        }
    }
}

impl Drop for DataDirOverride {
    #[allow(unsafe_code)]
    fn drop(&mut self) {
        match self.previous.take() {
            Some(value) => unsafe { std::env::set_var(DATA_DIR_ENV, value) },
            None => unsafe { std::env::remove_var(DATA_DIR_ENV) },
        }
    }
}
