//! Observability hooks for completion attempts, retries, and outcomes.
//!
//! ```rust
//! use pobserve::{MetricsObservabilityHooks, SafeCompletionHooks, TracingObservabilityHooks};
//!
//! let _hooks = SafeCompletionHooks::new(TracingObservabilityHooks);
//! let _metrics = MetricsObservabilityHooks;
//! ```

mod metrics_hooks;
mod safe_hooks;
mod tracing_hooks;

pub use metrics_hooks::MetricsObservabilityHooks;
pub use safe_hooks::{CombinedCompletionHooks, SafeCompletionHooks};
pub use tracing_hooks::TracingObservabilityHooks;

pub mod prelude {
    pub use crate::{
        CombinedCompletionHooks, MetricsObservabilityHooks, SafeCompletionHooks,
        TracingObservabilityHooks,
    };
}
