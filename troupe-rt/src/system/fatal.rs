//! Last-resort failure reporting.
//!
//! Recoverable conditions surface as [`Result`](std::result::Result) values
//! from the public API. Everything else - a broken runtime invariant, the
//! cast limit breached, a task submitted to a stopped pool - is a contract
//! violation the library cannot recover from: one line goes to standard
//! error and the process terminates with a failure status.

// Layer 1: Standard library imports
use std::process;

// Layer 2: Third-party crate imports
use tracing::error;

// Layer 3: Internal module imports
// (none)

fn render(file: &str, line: u32, message: Option<&str>) -> String {
    match message {
        Some(msg) => format!("Error: {msg} at {file}, line {line}."),
        None => format!("Error at {file}, line {line}."),
    }
}

/// Write the failure line to standard error and terminate the process.
///
/// Invoked through the [`fatal!`](crate::fatal) macro, which supplies the
/// call site. Does not return.
pub fn report(file: &str, line: u32, message: Option<&str>) -> ! {
    let rendered = render(file, line, message);
    error!("{rendered}");
    eprintln!("{rendered}");
    process::exit(1);
}

/// Report an unrecoverable condition and terminate the process.
///
/// With no arguments the report names only the call site; with format
/// arguments the formatted message is included.
///
/// ```ignore
/// fatal!();
/// fatal!("cast limit of {} exceeded", limit);
/// ```
#[macro_export]
macro_rules! fatal {
    () => {
        $crate::system::fatal::report(file!(), line!(), ::core::option::Option::None)
    };
    ($($arg:tt)+) => {
        $crate::system::fatal::report(
            file!(),
            line!(),
            ::core::option::Option::Some(&::std::format!($($arg)+)),
        )
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_message() {
        let line = render("registry.rs", 42, Some("queue corrupted"));
        assert_eq!(line, "Error: queue corrupted at registry.rs, line 42.");
    }

    #[test]
    fn test_render_without_message() {
        let line = render("pool.rs", 7, None);
        assert_eq!(line, "Error at pool.rs, line 7.");
    }
}
