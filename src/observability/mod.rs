//! Crash reporting and per-thread analysis context.
//!
//! The pipeline marks each stage with [`set_phase`]; the CLI adds the input
//! name and language. If anything panics, the hook installed by
//! [`install_panic_hook`] prints that context.
//!
//! ```ignore
//! use algoscope::observability::{install_panic_hook, set_current_input};
//!
//! install_panic_hook();
//! let _input = set_current_input("search.js");
//! let result = algoscope::analyze(&source, "javascript")?;
//! ```

pub mod context;
pub mod panic_hook;

pub use context::{
    get_current_context, get_progress, increment_processed, reset_context, set_current_input,
    set_language, set_phase, set_progress, AnalysisContext, AnalysisPhase, ContextGuard,
};
pub use panic_hook::{install_panic_hook, CrashReport};
