//! Worker side of the app: a tokio runtime on its own thread that turns
//! queued commands into catalog fetches.

pub mod commands;
pub mod runtime;
