//! Mock provider implementations for testing.
//!
//! In-memory, scripted implementations of the provider traits for unit and
//! integration tests and for the demo binary.

pub mod notifier;
pub mod popup;
pub mod session;

pub use notifier::RecordingNotifier;
pub use popup::{MockIdentityPopup, PopupBehaviour};
pub use session::MockSessionGateway;

/// Lock a mutex, recovering the data if a panicking test poisoned it.
fn lock<T>(mutex: &std::sync::Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}
