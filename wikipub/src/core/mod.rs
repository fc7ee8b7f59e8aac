//! Pure, deterministic configuration logic.
//!
//! Nothing in here touches the filesystem or child processes, and the process
//! environment is only ever read once, as a snapshot. See [`crate::io`] for
//! the side-effecting half.

pub mod dotenv;
pub mod environment;
pub mod invocation;
pub mod normalize;
pub mod required;
