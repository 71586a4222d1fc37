use pretty_assertions::assert_eq;

use super::*;

const SOURCE: &str = "line one\nline two\nline three\n";

fn err(code: ErrorCode, start: u32) -> Diagnostic {
    Diagnostic::new(code)
        .with_message(format!("{code} at {start}"))
        .with_label(Span::new(start, start + 1), "here")
}

#[test]
fn test_flush_sorts_by_position() {
    let mut queue = DiagnosticQueue::new(SOURCE);
    queue.add(err(ErrorCode::E3004, 20));
    queue.add(err(ErrorCode::E3003, 2));
    queue.add(
        Diagnostic::new(ErrorCode::W3001)
            .with_message("non-exhaustive")
            .with_label(Span::new(10, 11), "here"),
    );

    assert_eq!(queue.error_count(), 2);
    assert_eq!(queue.warning_count(), 1);

    let codes: Vec<_> = queue.flush().into_iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![ErrorCode::E3003, ErrorCode::W3001, ErrorCode::E3004]
    );
    assert!(queue.is_empty());
    assert_eq!(queue.error_count(), 0);
}

#[test]
fn test_error_limit_reports_suppressed() {
    let config = DiagnosticConfig {
        error_limit: 2,
        deduplicate: true,
    };
    let mut queue = DiagnosticQueue::with_config(SOURCE, config);
    assert!(queue.add(err(ErrorCode::E1001, 0)));
    assert!(queue.add(err(ErrorCode::E1001, 9)));
    assert!(queue.limit_reached());
    assert!(!queue.add(err(ErrorCode::E1001, 18)));

    // Warnings still get through once errors are capped.
    assert!(queue.add(Diagnostic::new(ErrorCode::W3002).with_message("redundant")));

    let flushed = queue.flush();
    assert_eq!(flushed.len(), 4);
    assert_eq!(flushed[3].code, ErrorCode::E9002);
    assert!(flushed[3].message.contains("1 more"));
}

#[test]
fn test_deduplicates_identical_diagnostics() {
    let mut queue = DiagnosticQueue::new(SOURCE);
    assert!(queue.add(err(ErrorCode::E3008, 4)));
    assert!(!queue.add(err(ErrorCode::E3008, 4)));
    assert_eq!(queue.error_count(), 1);

    let mut unlimited = DiagnosticQueue::with_config(SOURCE, DiagnosticConfig::unlimited());
    assert!(unlimited.add(err(ErrorCode::E3008, 4)));
    assert!(unlimited.add(err(ErrorCode::E3008, 4)));
    assert_eq!(unlimited.error_count(), 2);
}

#[test]
fn test_position() {
    let queue = DiagnosticQueue::new(SOURCE);
    assert_eq!(queue.position(Span::new(0, 1)), (1, 1));
    assert_eq!(queue.position(Span::new(14, 15)), (2, 6));
}
