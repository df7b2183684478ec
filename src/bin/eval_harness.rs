//! Agent-agnostic JSON evaluation harness.
//!
//! Reads JSON commands from stdin (one per line) and writes JSON
//! responses to stdout, flushed per line. Diagnostics go to stderr so the
//! protocol stream stays clean; set `RUST_LOG` to enable them.
//!
//! ```text
//! {"cmd": "reset", "env": "simple"}
//! {"cmd": "step", "action": "right"}
//! {"cmd": "quit"}
//! ```

use std::io;

use tracing_subscriber::EnvFilter;

use rulegrid::harness::{run, Session};

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut session = Session::new();
    run(&mut session, stdin.lock(), &mut stdout)
}
