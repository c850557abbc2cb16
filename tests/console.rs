use stacklog::sink::ConsoleSink;
use stacklog::{Environment, StackLogger, Value};
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// An in-memory stdout stand-in that tests can read back.
#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<u8>>>);

impl Capture {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Capture {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn console_logger() -> (StackLogger, Capture) {
    let capture = Capture::default();
    let logger = StackLogger::new(Environment::Console, ConsoleSink::new(capture.clone()));
    (logger, capture)
}

/// Logs on behalf of its caller and reports its own logging line.
#[inline(never)]
fn helper(logger: &StackLogger, offset: usize) -> u32 {
    let line = line!() + 1;
    logger.log_stack_with_offset(offset, &[]);
    line
}

/// Logs for its caller from a tail position, then returns.
#[inline(never)]
fn forward(logger: &StackLogger, what: &str) {
    logger.log_stack_with_offset(1, &[Value::from(what)]);
    std::hint::black_box(())
}

#[test]
fn console_line_points_at_the_call() {
    let (logger, capture) = console_logger();
    let line = line!() + 1;
    logger.log_stack(&[Value::from("x"), Value::from(42)]);
    assert_eq!(
        capture.text(),
        format!("console (console.rs:{})\n\t[\"x\", 42]\n", line)
    );
}

#[test]
fn no_arguments_means_no_extra() {
    let (logger, capture) = console_logger();
    let line = line!() + 1;
    logger.log_stack(&[]);
    assert_eq!(capture.text(), format!("console (console.rs:{})\n", line));
}

#[test]
fn nested_arguments_render_deeply() {
    let (logger, capture) = console_logger();
    let line = line!() + 1;
    logger.log_stack(&[Value::from(1), Value::from(vec!["a", "b"])]);
    assert_eq!(
        capture.text(),
        format!("console (console.rs:{})\n\t[1, [\"a\", \"b\"]]\n", line)
    );
}

#[test]
fn offset_zero_is_the_direct_caller() {
    let (logger, capture) = console_logger();
    let line = line!() + 1;
    logger.log_stack_with_offset(0, &[]);
    assert_eq!(capture.text(), format!("console (console.rs:{})\n", line));

    let (logger, capture) = console_logger();
    let helper_line = helper(&logger, 0);
    assert_eq!(capture.text(), format!("console (console.rs:{})\n", helper_line));
}

#[test]
fn offset_one_is_the_callers_caller() {
    let (logger, capture) = console_logger();
    let line = line!() + 1;
    helper(&logger, 1);
    assert_eq!(capture.text(), format!("console (console.rs:{})\n", line));
}

#[test]
fn wrappers_do_not_shift_the_offset() {
    // StackLogger::log_stack forwards to log_stack_with_offset; in optimized builds
    // that hop is a tail call and one frame fewer is on the stack
    let (logger, capture) = console_logger();
    let line = line!() + 1;
    logger.log_stack(&[]);
    let line_direct = line!() + 1;
    logger.log_stack_with_offset(0, &[]);
    let line_forwarded = line!() + 1;
    forward(&logger, "from a helper");
    let text = capture.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines,
        vec![
            format!("console (console.rs:{})", line),
            format!("console (console.rs:{})", line_direct),
            format!("console (console.rs:{})", line_forwarded),
            "\t[\"from a helper\"]".to_string(),
        ]
    );
}

#[test]
fn offset_past_the_stack_writes_nothing() {
    let (logger, capture) = console_logger();
    logger.log_stack_with_offset(100_000, &[Value::from("never")]);
    logger.log_stack_with_offset(usize::MAX, &[]);
    helper(&logger, 100_000);
    assert_eq!(capture.text(), "");
}

#[test]
fn compact_format_on_a_console_sink() {
    let capture = Capture::default();
    let logger = StackLogger::new(Environment::Mobile, ConsoleSink::new(capture.clone()));
    let line = line!() + 1;
    logger.log_stack(&[Value::from('c')]);
    assert_eq!(
        capture.text(),
        format!("console.compact_format_on_a_console_sink(console.rs:{})\n\t['c']", line)
    );
}

#[test]
fn every_call_is_one_line() {
    let (logger, capture) = console_logger();
    for i in 0..3 {
        logger.log_stack(&[Value::from(i)]);
    }
    let text = capture.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "\t[0]");
    assert_eq!(lines[3], "\t[1]");
    assert_eq!(lines[5], "\t[2]");
    assert!(lines[0].starts_with("console (console.rs:"));
}

#[test]
fn process_wide_logger_is_the_console_logger() {
    assert_eq!(stacklog::logger().environment(), Environment::Console);
    assert!(std::ptr::eq(stacklog::logger(), stacklog::logger()));
    // goes to the real stdout; must not panic
    stacklog::log_stack(&[]);
    stacklog::log_stack_with_offset(usize::MAX, &[]);
    stacklog::stack_log!("smoke", 1, vec![2, 3]);
    stacklog::stack_log_with_offset!(0; Some("x"), None::<u8>);
}
