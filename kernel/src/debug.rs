// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2022.

//! Support for in-kernel debugging.
//!
//! For printing, this module provides the `debug!` and `debug_verbose!`
//! macros. Output goes to a single process-wide writer that the board
//! registers once at boot with [`set_debug_writer`]. Until a writer is
//! registered, messages are dropped.
//!
//! Usage
//! -----
//!
//! ```rust,ignore
//! debug!("Yes the code gets here with value {}", i);
//! debug_verbose!("got here"); // includes message count, file, and line
//! ```
//!
//! Registering a writer:
//!
//! ```rust,ignore
//! static CONSOLE: &(dyn kernel::debug::IoWrite + Sync) = &board::EarlyConsole;
//! kernel::debug::set_debug_writer(&CONSOLE);
//! ```

use core::fmt::{self, Write};
use core::ptr;
use core::sync::atomic::{AtomicPtr, AtomicUsize, Ordering};

/// A sink for debug output.
pub trait IoWrite {
    /// Write `buf`, returning the number of bytes consumed.
    fn write(&self, buf: &[u8]) -> usize;
}

static DEBUG_WRITER: AtomicPtr<&'static (dyn IoWrite + Sync)> = AtomicPtr::new(ptr::null_mut());
static DEBUG_COUNT: AtomicUsize = AtomicUsize::new(0);

/// Install the writer used by `debug!`. Later calls replace the writer.
pub fn set_debug_writer(writer: &'static &'static (dyn IoWrite + Sync)) {
    DEBUG_WRITER.store(
        writer as *const &'static (dyn IoWrite + Sync) as *mut _,
        Ordering::Release,
    );
}

fn writer() -> Option<&'static (dyn IoWrite + Sync)> {
    let raw = DEBUG_WRITER.load(Ordering::Acquire);
    if raw.is_null() {
        None
    } else {
        // Only ever set from a `&'static &'static` in `set_debug_writer`.
        Some(unsafe { *raw })
    }
}

struct DebugWriterWrapper(&'static (dyn IoWrite + Sync));

impl Write for DebugWriterWrapper {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let mut bytes = s.as_bytes();
        while !bytes.is_empty() {
            let written = self.0.write(bytes);
            if written == 0 {
                return Err(fmt::Error);
            }
            bytes = &bytes[written.min(bytes.len())..];
        }
        Ok(())
    }
}

/// Number of messages emitted through the `debug!` macros so far.
pub fn debug_count() -> usize {
    DEBUG_COUNT.load(Ordering::Relaxed)
}

pub fn debug_print(args: fmt::Arguments) {
    if let Some(w) = writer() {
        let _ = DebugWriterWrapper(w).write_fmt(args);
    }
}

pub fn debug_println(args: fmt::Arguments) {
    DEBUG_COUNT.fetch_add(1, Ordering::Relaxed);
    if let Some(w) = writer() {
        let mut wrapper = DebugWriterWrapper(w);
        let _ = wrapper.write_fmt(args);
        let _ = wrapper.write_str("\r\n");
    }
}

pub fn debug_verbose_println(args: fmt::Arguments, file_line: &(&'static str, u32)) {
    let count = DEBUG_COUNT.fetch_add(1, Ordering::Relaxed);
    if let Some(w) = writer() {
        let (file, line) = *file_line;
        let mut wrapper = DebugWriterWrapper(w);
        let _ = write!(wrapper, "CAL_DEBUG({}): {}:{}: ", count, file, line);
        let _ = wrapper.write_fmt(args);
        let _ = wrapper.write_str("\r\n");
    }
}

/// In-kernel `println()` debugging.
#[macro_export]
macro_rules! debug {
    () => ({
        // Allow an empty debug!() to print the location when hit
        debug!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_println(format_args!($msg));
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_println(format_args!($fmt, $($arg)+));
    });
}

/// In-kernel `println()` debugging that includes the message count, file
/// and line.
#[macro_export]
macro_rules! debug_verbose {
    () => ({
        debug_verbose!("")
    });
    ($msg:expr $(,)?) => ({
        $crate::debug::debug_verbose_println(format_args!($msg), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
    ($fmt:expr, $($arg:tt)+) => ({
        $crate::debug::debug_verbose_println(format_args!($fmt, $($arg)+), {
            static _FILE_LINE: (&'static str, u32) = (file!(), line!());
            &_FILE_LINE
        })
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    struct CountingWriter {
        bytes: AtomicUsize,
    }

    impl IoWrite for CountingWriter {
        fn write(&self, buf: &[u8]) -> usize {
            self.bytes.fetch_add(buf.len(), Ordering::Relaxed);
            buf.len()
        }
    }

    static COUNTER: CountingWriter = CountingWriter {
        bytes: AtomicUsize::new(0),
    };
    static COUNTER_REF: &(dyn IoWrite + Sync) = &COUNTER;

    #[test]
    fn messages_reach_registered_writer() {
        set_debug_writer(&COUNTER_REF);
        let before_bytes = COUNTER.bytes.load(Ordering::Relaxed);
        let before_count = debug_count();
        debug!("pll {} locked", 3);
        assert!(debug_count() > before_count);
        // "pll 3 locked" plus the line terminator
        assert!(COUNTER.bytes.load(Ordering::Relaxed) >= before_bytes + 14);
    }
}
