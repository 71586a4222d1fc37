//! Tagsum driver.
//!
//! Runs the pipeline over one `.tsum` file:
//!
//! ```text
//! lex → parse → lower (define variants, expand match sites) → eval
//! ```
//!
//! Commands render their results into a [`CommandOutput`] instead of
//! printing, so the binary and the integration tests share one code path.

pub mod commands;
mod options;

use std::sync::Once;

use tagsum_diagnostic::emitter::{DiagnosticEmitter, TerminalEmitter};
use tagsum_diagnostic::queue::{DiagnosticConfig, DiagnosticQueue};
use tagsum_diagnostic::Diagnostic;
use tagsum_ir::{Program, StringInterner};
use tracing::debug;

pub use options::{CompileOptions, OptionError};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call more than once. Enable with `RUST_LOG=tagsum_patterns=trace`
/// or `RUST_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(filter)
                .init();
        }
    });
}

/// Result of the front end over one file.
#[derive(Clone, Debug, Default)]
pub struct Compiled {
    /// Empty when lexing or parsing failed.
    pub program: Program,
    /// Sorted by position, warnings already promoted under `--deny-warnings`.
    pub diagnostics: Vec<Diagnostic>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl Compiled {
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }
}

/// Lex, parse and lower `source`.
///
/// Lowering is skipped when the file has lex or parse errors, since the
/// recovered syntax tree would only produce follow-on noise.
#[tracing::instrument(level = "debug", skip(source, interner, options))]
pub fn compile(
    path: &str,
    source: &str,
    interner: &StringInterner,
    options: &CompileOptions,
) -> Compiled {
    let mut queue = DiagnosticQueue::with_config(
        source,
        DiagnosticConfig {
            error_limit: options.error_limit,
            deduplicate: true,
        },
    );
    let mut report = |diagnostic: Diagnostic| {
        if options.deny_warnings {
            queue.add(diagnostic.deny());
        } else {
            queue.add(diagnostic);
        }
    };

    let lexed = tagsum_lexer::lex(source, interner);
    lexed
        .errors
        .iter()
        .for_each(|error| report(error.to_diagnostic()));

    let parsed = tagsum_parse::parse(&lexed.tokens, interner);
    parsed
        .errors
        .iter()
        .for_each(|error| report(error.to_diagnostic()));

    let program = if lexed.has_errors() || parsed.has_errors() {
        Program::default()
    } else {
        let lowered = tagsum_canon::lower_module(&parsed.module, interner);
        lowered.diagnostics.into_iter().for_each(&mut report);
        lowered.program
    };

    let error_count = queue.error_count();
    let warning_count = queue.warning_count();
    let diagnostics = queue.flush();
    debug!(errors = error_count, warnings = warning_count, "front end done");

    Compiled {
        program,
        diagnostics,
        error_count,
        warning_count,
    }
}

/// What a command produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

impl CommandOutput {
    pub fn failure(stderr: impl Into<String>) -> Self {
        CommandOutput {
            stdout: String::new(),
            stderr: stderr.into(),
            success: false,
        }
    }
}

/// Render diagnostics and their summary line for `path`.
pub fn render_diagnostics(
    path: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    options: &CompileOptions,
) -> String {
    let mut emitter = TerminalEmitter::with_color_mode(Vec::new(), options.color, options.tty)
        .with_source(path, source);
    emitter.emit_all(diagnostics);

    let errors = diagnostics.iter().filter(|d| d.is_error()).count();
    let warnings = diagnostics.iter().filter(|d| d.is_warning()).count();
    emitter.emit_summary(errors, warnings);
    emitter.flush();

    String::from_utf8_lossy(&emitter.into_inner()).into_owned()
}
