//! Prints a few clickable lines to stdout.
//!
//! ```sh
//! cargo run --example console
//! ```

use stacklog::{Value, stack_log, stack_log_with_offset};

#[derive(serde::Serialize)]
struct Config {
    name: &'static str,
    retries: u8,
}

/// Reports where it was called from rather than its own location.
#[inline(never)]
fn checkpoint(label: &str) {
    stack_log_with_offset!(1; label);
}

fn main() {
    stack_log!();
    stack_log!("x", 42);
    stack_log!(1, vec!["a", "b"], Some(2.5), None::<i32>);
    stack_log!(Value::from_serialize(&Config { name: "demo", retries: 3 }));
    checkpoint("after setup");

    let worker = || stack_log!("inside a closure");
    worker();
}
