//! Logs from several threads at once; every line stays intact.
//!
//! ```sh
//! cargo run --example threads
//! ```

use stacklog::stack_log;

fn work(id: usize) {
    for step in 0..3 {
        stack_log!(id, step);
    }
}

fn main() {
    let handles: Vec<_> = (0..8).map(|id| std::thread::spawn(move || work(id))).collect();
    for handle in handles {
        let _ = handle.join();
    }
}
