// CV interview: step table, state machine, and per-conversation driver.
// The HTTP surface lives in handlers.rs; everything else is synchronous and pure.

pub mod engine;
pub mod handlers;
pub mod questions;
pub mod store;
