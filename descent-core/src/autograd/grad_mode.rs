//! Scoped control over gradient tracking.
//!
//! Tracking is a per-thread setting that can only be changed through a
//! [`NoGradGuard`]: creating one disables recording, dropping it restores
//! whatever setting was active before, so guards nest correctly.

use std::cell::Cell;
use std::marker::PhantomData;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Returns `true` if operations executed on this thread record graph history.
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(|flag| flag.get())
}

/// Disables gradient tracking on the current thread until the guard is dropped.
///
/// ```
/// use descent_core::autograd::{is_grad_enabled, no_grad};
///
/// assert!(is_grad_enabled());
/// {
///     let _guard = no_grad();
///     assert!(!is_grad_enabled());
/// }
/// assert!(is_grad_enabled());
/// ```
#[must_use = "gradient tracking is re-enabled as soon as the guard is dropped"]
pub struct NoGradGuard {
    previous: bool,
    // Tied to the thread whose flag it changed.
    _not_send: PhantomData<*const ()>,
}

impl NoGradGuard {
    pub fn new() -> Self {
        let previous = GRAD_ENABLED.with(|flag| flag.replace(false));
        NoGradGuard {
            previous,
            _not_send: PhantomData,
        }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        let previous = self.previous;
        GRAD_ENABLED.with(|flag| flag.set(previous));
    }
}

/// Shorthand for [`NoGradGuard::new`].
pub fn no_grad() -> NoGradGuard {
    NoGradGuard::new()
}

/// Runs `f` with gradient tracking disabled.
pub fn with_no_grad<R>(f: impl FnOnce() -> R) -> R {
    let _guard = NoGradGuard::new();
    f()
}
