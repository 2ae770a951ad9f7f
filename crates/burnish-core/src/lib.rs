//! Burnish Core
//!
//! Core linting and auto-fix engine over lossless syntax trees. This crate
//! provides the fundamental components: the syntax model, diagnostics with
//! exact source locations, the rule registry and walker, and the structural
//! fix engine with single-pass batch application.

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod fixer;
pub mod formatter;
pub mod registry;
pub mod result;
pub mod syntax; // Lossless syntax tree (Rowan-based)
pub mod walker;

// Re-export commonly used types
pub use config::{LintConfig, RuleConfig};
pub use diagnostics::{Diagnostic, Location, Severity, SourceMap};
pub use error::{BurnishError, ErrorKind};
pub use fixer::{Edit, FixOutcome, Fixer, SkippedFix, apply_all, apply_edit, node_at_location};
pub use formatter::{DefaultFormatter, Formatter, PassthroughFormatter};
pub use registry::{Rule, RuleCategory, RuleContext, RuleDescriptor, RuleRegistry};
pub use result::{Result, ResultExt};
pub use syntax::{
    CsLanguage, CsSyntaxElement, CsSyntaxKind, CsSyntaxNode, CsSyntaxToken, Parse, ParseError,
    parse,
};
pub use walker::{EngineWarning, WalkReport, Walker};

/// Initialize the tracing subscriber for logging
pub fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("burnish=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_file(true)
                .with_line_number(true),
        )
        .init();
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
