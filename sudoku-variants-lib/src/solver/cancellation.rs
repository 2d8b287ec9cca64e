//! Cancelling long-running solver operations requires a [`Cancellation`].

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A polled check for whether to abort a solve.
///
/// Cancellation is cooperative: search loops poll it at every branch and
/// return whatever partial result they hold. It never interrupts the solver
/// mid-mutation, so a cancelled solver remains in a valid state.
///
/// The check is shared between worker threads, so it must be thread-safe.
///
/// ```
/// # use sudoku_variants_lib::solver::cancellation::Cancellation;
/// # use std::sync::Arc;
/// # use std::sync::atomic::{AtomicBool, Ordering};
/// let cancel_token = Arc::new(AtomicBool::new(false));
/// let cancellation = Cancellation::from_flag(&cancel_token);
///
/// assert!(!cancellation.check());
/// cancel_token.store(true, Ordering::SeqCst);
/// assert!(cancellation.check());
/// ```
#[derive(Clone)]
pub struct Cancellation {
    func: Arc<dyn Fn() -> bool + Send + Sync>,
}

impl Cancellation {
    /// Creates a new Cancellation from a checking function.
    pub fn new<F>(func: F) -> Self
    where
        F: (Fn() -> bool) + Send + Sync + 'static,
    {
        Self { func: Arc::new(func) }
    }

    /// Creates a Cancellation polling a shared atomic flag.
    pub fn from_flag(flag: &Arc<AtomicBool>) -> Self {
        let flag = Arc::clone(flag);
        Self::new(move || flag.load(Ordering::Relaxed))
    }

    /// Checks whether cancellation has been requested.
    pub fn check(&self) -> bool {
        (self.func)()
    }
}

impl Default for Cancellation {
    /// A cancellation that never triggers.
    fn default() -> Self {
        Self::new(|| false)
    }
}

impl<F> From<F> for Cancellation
where
    F: (Fn() -> bool) + Send + Sync + 'static,
{
    fn from(func: F) -> Self {
        Self::new(func)
    }
}

impl From<Option<Cancellation>> for Cancellation {
    fn from(cancellation: Option<Cancellation>) -> Self {
        cancellation.unwrap_or_default()
    }
}
