// Copyright (c) 2018-2022 The Botho Foundation

//! Logging.
//!
//! Library code logs with the `tracing` macros directly:
//!
//! ```
//! tracing::debug!("Derived key {} at index {}", "0185adb4d8b730099c93", 0);
//! ```
//!
//! Binaries and tests install a subscriber once per process with
//! [`init_root_logging`] or [`init_test_logging`]. The filter is read from
//! `RUST_LOG`, falling back to `MW_LOG` and then to `info`.

use std::time::Instant;

/// Log how long the rest of the enclosing scope takes, at trace level.
///
/// ```
/// use mw_common::trace_time;
///
/// {
///     trace_time!("building {} outputs", 3);
///     // ...
/// }
/// ```
#[macro_export]
macro_rules! trace_time {
    ($($arg:tt)+) => {
        let _trace_time = $crate::logger::TraceTime::new(format!($($arg)+));
    };
}

/// Logs the time elapsed between its creation and its drop.
pub struct TraceTime {
    msg: String,
    start: Instant,
}

impl TraceTime {
    /// Start a timer with the given message.
    pub fn new(msg: String) -> Self {
        Self {
            msg,
            start: Instant::now(),
        }
    }
}

impl Drop for TraceTime {
    fn drop(&mut self) {
        let time_in_ms = self.start.elapsed().as_secs_f64() * 1000.0;

        let time = match time_in_ms as u64 {
            0..=3000 => format!("{time_in_ms:.2}ms"),
            3001..=60000 => format!("{:.2}s", time_in_ms / 1000.0),
            _ => format!("{:.2}m", time_in_ms / 1000.0 / 60.0),
        };

        tracing::trace!(duration_ms = time_in_ms, "{}: took {}", self.msg, time);
    }
}

cfg_if::cfg_if! {
    if #[cfg(feature = "loggers")] {
        mod loggers;
        pub use loggers::*;
    }
}
