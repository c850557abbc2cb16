/*!
Clickable call-site logging for consoles, IDEs and Android logcat.

stacklog prints one line per call that names the code that made it: module, function,
file and line, plus any values you hand it. The line is shaped so that terminals, IDE
consoles and Android Studio's logcat view turn `(file.rs:42)` into a link back to the
call site.

# Quick Start

```
use stacklog::stack_log;

fn handle(request_id: u32) {
    stack_log!();                          // my_app::handle (main.rs:4)
    stack_log!("handling", request_id);    // my_app::handle (main.rs:5)
                                           //     ["handling", 7]
}
# handle(7);
```

The same thing without macros:

```
use stacklog::{log_stack, Value};

log_stack(&[Value::from("x"), Value::from(42)]);
```

# Output

The format depends on where the program runs, decided once when the binary is built:

| environment | destination          | line                                   |
|-------------|----------------------|----------------------------------------|
| Android     | logcat, tag `stackLog` | `{class}.{method}({file}:{line}){extra}` |
| elsewhere   | standard output      | `{class} ({file}:{line}){extra}\n`     |

`{class}` is the symbol path of the calling function minus its last segment and
`{method}` is that last segment (see [`StackFrame`]). `{extra}` is empty without
arguments; otherwise it is a newline, a tab, and the arguments rendered as a list,
recursively (see [`Value`]).

# Offsets

Helpers that log on behalf of their caller pass an offset, which walks further out the
stack:

```
use stacklog::{log_stack_with_offset, Value};

#[inline(never)]
fn trace_entry(what: &str) {
    // points at whoever called trace_entry, not at this line
    log_stack_with_offset(1, &[Value::from(what)]);
}
# trace_entry("demo");
```

# Failure

Logging never fails from the caller's point of view. If the calling frame cannot be
resolved (an offset past the top of the stack, or a binary whose symbols were stripped),
nothing is written. If the sink fails, the line is dropped. Enable the `diagnostics`
feature to have dropped lines reported on stderr.

Frames are found by symbolizing the stack, so meaningful output needs debug info
(`debug = true` or `debug = "line-tables-only"` in the profile). Functions inlined into
their caller are still reported when line tables are present.

# Feature Flags

- `diagnostics` - report lines dropped because of sink errors on stderr

# Module Organization

- [`sink`] - the [`LineSink`](sink::LineSink) capability, console and platform sinks
*/
mod format;
mod frame;
mod logger;
mod logging;
mod resolve;
pub mod sink;
mod value;

pub use format::{Environment, LineFormat};
pub use frame::StackFrame;
pub use logger::{StackLogger, logger};
pub use value::Value;

/// Logs the caller's location through the process-wide logger.
///
/// Same as `log_stack_with_offset(0, args)`.
#[inline(never)]
pub fn log_stack(args: &[Value]) {
    logger().log_stack_with_offset(0, args);
}

/// Logs the location `offset` frames above the caller through the process-wide logger.
///
/// `offset == 0` is the caller itself. Nothing is written when the offset reaches past
/// the top of the stack.
#[inline(never)]
pub fn log_stack_with_offset(offset: usize, args: &[Value]) {
    logger().log_stack_with_offset(offset, args);
}

/// Logs the calling location, converting each argument with [`Value::from`].
///
/// The expansion keeps the calling function's frame alive across the call, so a
/// `stack_log!` that is the last statement of a function still reports that function.
///
/// ```
/// # use stacklog::stack_log;
/// stack_log!();
/// stack_log!("ids", vec![1, 2, 3], Some('x'));
/// ```
#[macro_export]
macro_rules! stack_log {
    () => {{
        $crate::log_stack(&[]);
        ::core::hint::black_box(())
    }};
    ($($arg:expr),+ $(,)?) => {{
        $crate::log_stack(&[$($crate::Value::from($arg)),+]);
        ::core::hint::black_box(())
    }};
}

/// Like [`stack_log!`], with an offset before the arguments.
///
/// ```
/// # use stacklog::stack_log_with_offset;
/// stack_log_with_offset!(0);
/// stack_log_with_offset!(1; "reported for the caller");
/// ```
#[macro_export]
macro_rules! stack_log_with_offset {
    ($offset:expr) => {{
        $crate::log_stack_with_offset($offset, &[]);
        ::core::hint::black_box(())
    }};
    ($offset:expr; $($arg:expr),+ $(,)?) => {{
        $crate::log_stack_with_offset($offset, &[$($crate::Value::from($arg)),+]);
        ::core::hint::black_box(())
    }};
}
