//! ffshot platform core.
//!
//! Decides which bundled ffmpeg build and launcher script serve the current
//! host. Host identity comes from a [`PlatformProbe`] so callers (and tests)
//! can substitute it.

pub mod distribution;
pub mod host;

pub use distribution::*;
pub use host::*;
