//! User-facing terminal output.
//!
//! Results go to stdout through [`sh_println!`](crate::sh_println); warnings and errors go to
//! stderr with a coloured prefix. Diagnostics that are not part of the result belong in
//! `tracing` events instead.

use std::{
    fmt,
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
};
use yansi::Paint;

static QUIET: AtomicBool = AtomicBool::new(false);

/// Suppresses stdout output and warnings. Errors are always printed.
pub fn set_quiet(quiet: bool) {
    QUIET.store(quiet, Ordering::Relaxed);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::Relaxed)
}

#[doc(hidden)]
pub fn print_out(args: fmt::Arguments<'_>) -> io::Result<()> {
    if is_quiet() {
        return Ok(());
    }
    let mut out = io::stdout().lock();
    out.write_fmt(args)?;
    out.write_all(b"\n")
}

#[doc(hidden)]
pub fn print_warn(args: fmt::Arguments<'_>) -> io::Result<()> {
    if is_quiet() {
        return Ok(());
    }
    writeln!(io::stderr().lock(), "{}{args}", "Warning: ".yellow().bold())
}

#[doc(hidden)]
pub fn print_err(args: fmt::Arguments<'_>) -> io::Result<()> {
    writeln!(io::stderr().lock(), "{}{args}", "Error: ".red().bold())
}

/// Prints a line to stdout unless quiet mode is on.
#[macro_export]
macro_rules! sh_println {
    () => {
        $crate::shell::print_out(format_args!(""))
    };
    ($($arg:tt)*) => {
        $crate::shell::print_out(format_args!($($arg)*))
    };
}

/// Prints a `Warning:` line to stderr unless quiet mode is on.
#[macro_export]
macro_rules! sh_warn {
    ($($arg:tt)*) => {
        $crate::shell::print_warn(format_args!($($arg)*))
    };
}

/// Prints an `Error:` line to stderr.
#[macro_export]
macro_rules! sh_err {
    ($($arg:tt)*) => {
        $crate::shell::print_err(format_args!($($arg)*))
    };
}
