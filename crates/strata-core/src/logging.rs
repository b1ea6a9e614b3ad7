//! Logging facilities for Strata.
//!
//! Strata uses the `tracing` crate for instrumentation. To see logs, install
//! a subscriber in the host application:
//!
//! ```ignore
//! tracing_subscriber::fmt::init();
//! ```
//!
//! Structural mutations (add/remove/link) log at `debug`, drag-gesture
//! transitions and rejected payloads at `trace`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem, e.g.
/// `RUST_LOG=strata::drag=trace`.
pub mod targets {
    /// Entity registry bookkeeping.
    pub const REGISTRY: &str = "strata_core::registry";
    /// Spacer container linking and neighbor derivation.
    pub const CONTAINER: &str = "strata::container";
    /// Engine facade operations.
    pub const ENGINE: &str = "strata::engine";
    /// Drag gesture state machine.
    pub const DRAG: &str = "strata::drag";
}
