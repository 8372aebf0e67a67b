//! Contracts between the core logic and its transport and shell.

mod navigator;
mod notices;
mod verify;

pub use navigator::{Location, Navigator};
pub use notices::Notices;
pub use verify::{SessionUser, VerifySession};
