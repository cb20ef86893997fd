//! # Thread-confined job scheduling.
//!
//! [`ConfinedScheduler`] plays the role of a UI main loop: a single named
//! thread that runs posted closures in order. Scopes built inside a
//! scheduled job are confined to that thread.

mod confined;

pub use confined::ConfinedScheduler;
