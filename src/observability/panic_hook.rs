//! Panic hook that prints a crash report with the analysis context.
//!
//! The report names the phase, the input and its language, how many inputs
//! were finished, and the active tracing span, so a crash on one snippet in a
//! large batch can be reproduced from the report alone.

use super::context::{get_current_context, get_progress, AnalysisContext};
use std::fmt::Write as _;
use std::panic::PanicHookInfo;
use tracing::Span;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const RULE: &str = "================================================================";
const FIELD_WIDTH: usize = 60;

/// Install early in `main`, before any analysis runs.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let report = CrashReport::capture(info);
        eprintln!("{}", report.render());
    }));
}

/// Everything shown in a crash report, captured at panic time.
#[derive(Debug, Clone)]
pub struct CrashReport {
    pub message: String,
    pub location: Option<String>,
    pub context: AnalysisContext,
    pub span: Option<&'static str>,
    pub progress: (usize, usize),
    pub timestamp: String,
}

impl CrashReport {
    fn capture(info: &PanicHookInfo<'_>) -> Self {
        Self {
            message: panic_message(info),
            location: info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column())),
            context: get_current_context(),
            span: Span::current().metadata().map(|m| m.name()),
            progress: get_progress(),
            timestamp: chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "ALGOSCOPE CRASH REPORT");
        let _ = writeln!(out, "{RULE}");
        field(&mut out, "Version", VERSION);
        field(&mut out, "Platform", std::env::consts::OS);
        field(&mut out, "Time", &self.timestamp);
        field(&mut out, "Panic", &self.message);
        if let Some(location) = &self.location {
            field(&mut out, "Location", location);
        }

        let _ = writeln!(out, "{RULE}");
        match self.context.phase {
            Some(phase) => field(&mut out, "Phase", &phase.to_string()),
            None => field(&mut out, "Phase", "(not set, crash before analysis started)"),
        }
        if let Some(span) = self.span {
            field(&mut out, "Span", span);
        }
        if let Some(input) = &self.context.current_input {
            field(&mut out, "Input", input);
        }
        if let Some(language) = self.context.language {
            field(&mut out, "Language", language);
        }
        let (processed, total) = self.progress;
        if total > 0 {
            field(&mut out, "Progress", &format!("{processed} / {total} inputs"));
        }

        let _ = writeln!(out, "{RULE}");
        if std::env::var("RUST_BACKTRACE").is_ok() {
            let _ = writeln!(out, "{}", std::backtrace::Backtrace::capture());
        } else {
            let _ = writeln!(out, "Run with RUST_BACKTRACE=1 for a stack trace");
        }
        if let Some(input) = &self.context.current_input {
            let _ = writeln!(out, "Attach this report and the input {input} when filing an issue");
        }
        out
    }
}

fn field(out: &mut String, label: &str, value: &str) {
    let _ = writeln!(out, "  {label:<10} {}", truncate(value, FIELD_WIDTH));
}

fn panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Shortens to `max_len` characters, ending in `...` when cut.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observability::AnalysisPhase;

    fn report() -> CrashReport {
        CrashReport {
            message: "index out of bounds".into(),
            location: Some("src/structures/rules.rs:10:5".into()),
            context: AnalysisContext {
                phase: Some(AnalysisPhase::StructureDetection),
                current_input: Some("graph.py".into()),
                language: Some("python"),
            },
            span: None,
            progress: (3, 8),
            timestamp: "2026-01-01 00:00:00 UTC".into(),
        }
    }

    #[test]
    fn test_report_includes_context() {
        let text = report().render();
        assert!(text.contains("ALGOSCOPE CRASH REPORT"));
        assert!(text.contains("structure_detection"));
        assert!(text.contains("graph.py"));
        assert!(text.contains("python"));
        assert!(text.contains("3 / 8 inputs"));
        assert!(text.contains("src/structures/rules.rs:10:5"));
    }

    #[test]
    fn test_report_without_phase() {
        let mut crash = report();
        crash.context = AnalysisContext::new();
        crash.progress = (0, 0);
        let text = crash.render();
        assert!(text.contains("crash before analysis started"));
        assert!(!text.contains("Progress"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exactly10!", 10), "exactly10!");
        let long = truncate("this is a long string that needs truncation", 20);
        assert_eq!(long.chars().count(), 20);
        assert!(long.ends_with("..."));
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
    }
}
