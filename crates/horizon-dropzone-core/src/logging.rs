//! Logging facilities for Horizon Dropzone.
//!
//! Horizon Dropzone uses the `tracing` crate for instrumentation. Libraries
//! never install a subscriber; to see logs, install one in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("horizon_dropzone=debug,horizon_dropzone_core=info")
//!         .init();
//! }
//! ```

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "horizon_dropzone_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "horizon_dropzone_core::signal";
    /// Main-thread queue target.
    pub const QUEUE: &str = "horizon_dropzone_core::queue";
    /// Worker pool target.
    pub const THREADPOOL: &str = "horizon_dropzone_core::threadpool";
    /// Drop-result fetcher target.
    pub const FETCH: &str = "horizon_dropzone::fetch";
    /// State container target.
    pub const STORE: &str = "horizon_dropzone::store";
    /// Window drop-target binding target.
    pub const DROP_TARGET: &str = "horizon_dropzone::drop_target";
    /// Widget view target.
    pub const VIEW: &str = "horizon_dropzone::view";
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring how long an operation takes.
#[derive(Debug)]
pub struct PerfSpan {
    #[allow(dead_code)]
    span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Create and enter a new performance span.
    pub fn new(name: &'static str) -> Self {
        let span = tracing::info_span!(target: "horizon_dropzone::perf", "perf", operation = name);
        Self {
            span: span.entered(),
        }
    }
}

#[macro_export]
macro_rules! dropzone_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "horizon_dropzone_core", $($arg)*)
    };
}

#[macro_export]
macro_rules! dropzone_warn {
    ($($arg:tt)*) => {
        tracing::warn!(target: "horizon_dropzone_core", $($arg)*)
    };
}
