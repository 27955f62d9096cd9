// Shared utils: storage backends, timers, task spawning

pub mod storage;
pub mod task;
pub mod timer;

pub use storage::{CredentialStore, MemoryCredentialStore};
pub use task::spawn_local;
pub use timer::{sleep, Interval, Timeout};

#[cfg(target_arch = "wasm32")]
pub use storage::{DurableCredentialStore, EphemeralCredentialStore};
