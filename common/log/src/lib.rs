// MIT License
//
// Copyright (c) 2019-2023 Tobias Pfeiffer
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! A per-client-instance logger.
//!
//! Unlike the global `log` facade, nothing here is process-wide: each PEP
//! client owns one `Logger`, configured independently via its option setter,
//! so two clients running in the same process never fight over a single
//! global sink.

#![warn(clippy::all)]

use std::{fmt, io::Write, sync::Mutex};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub enum Level {
	None,
	Error,
	Warn,
	Info,
	Debug
}

impl Level {
	pub fn from_i32(v: i32) -> Option<Self> {
		Some(match v {
			0 => Level::None,
			1 => Level::Error,
			2 => Level::Warn,
			3 => Level::Info,
			4 => Level::Debug,
			_ => return None
		})
	}

	fn label(self) -> &'static str {
		match self {
			Level::None  => "NONE",
			Level::Error => "ERROR",
			Level::Warn  => "WARN",
			Level::Info  => "INFO",
			Level::Debug => "DEBUG"
		}
	}

	fn color(self) -> &'static str {
		match self {
			Level::None  => "\x1b[0m",
			Level::Error => "\x1b[31m",
			Level::Warn  => "\x1b[33m",
			Level::Info  => "\x1b[0m",
			Level::Debug => "\x1b[32m"
		}
	}
}

/// `LOG_HANDLER`: called instead of the default formatter when set.
pub type Handler = Box<dyn Fn(Level, fmt::Arguments) + Send + Sync>;

/// `LOG_OUT`: where the default formatter writes, when no handler is set.
pub type Sink = Box<dyn Write + Send>;

pub struct Logger {
	level:   Level,
	sink:    Mutex<Option<Sink>>,
	handler: Option<Handler>
}

impl Default for Logger {
	fn default() -> Self {
		Self { level: Level::Warn, sink: Mutex::new(None), handler: None }
	}
}

impl Logger {
	pub fn set_level(&mut self, level: Level) {
		self.level = level;
	}

	pub fn set_sink(&mut self, sink: Sink) {
		*self.sink.get_mut().unwrap_or_else(|e| e.into_inner()) = Some(sink);
	}

	pub fn set_handler(&mut self, handler: Handler) {
		self.handler = Some(handler);
	}

	pub fn enabled(&self, level: Level) -> bool {
		level != Level::None && level <= self.level
	}

	pub fn log(&self, level: Level, args: fmt::Arguments) {
		if !self.enabled(level) {
			return;
		}

		if let Some(handler) = &self.handler {
			handler(level, args);
			return;
		}

		let mut guard = self.sink.lock().unwrap_or_else(|e| e.into_inner());
		let date = chrono::Utc::now().format("%F %T%.3f");

		let line = format!("{}{} {:5}\x1b[0m {}\n", level.color(), date, level.label(), args);

		match guard.as_mut() {
			Some(sink) => { let _ = sink.write_all(line.as_bytes()); }
			None       => { let _ = std::io::stderr().write_all(line.as_bytes()); }
		}
	}
}

#[macro_export]
macro_rules! error {
	($logger:expr, $($arg:tt)+) => { $logger.log($crate::Level::Error, format_args!($($arg)+)) };
}

#[macro_export]
macro_rules! warn {
	($logger:expr, $($arg:tt)+) => { $logger.log($crate::Level::Warn, format_args!($($arg)+)) };
}

#[macro_export]
macro_rules! info {
	($logger:expr, $($arg:tt)+) => { $logger.log($crate::Level::Info, format_args!($($arg)+)) };
}

#[macro_export]
macro_rules! debug {
	($logger:expr, $($arg:tt)+) => { $logger.log($crate::Level::Debug, format_args!($($arg)+)) };
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn level_filtering() {
		let mut logger = Logger::default();
		logger.set_level(Level::Warn);
		assert!(logger.enabled(Level::Error));
		assert!(logger.enabled(Level::Warn));
		assert!(!logger.enabled(Level::Info));
		assert!(!logger.enabled(Level::Debug));

		logger.set_level(Level::None);
		assert!(!logger.enabled(Level::Error));
	}

	#[test]
	fn handler_overrides_sink() {
		use std::sync::{Arc, atomic::{AtomicUsize, Ordering}};

		let mut logger = Logger::default();
		logger.set_level(Level::Debug);
		let calls = Arc::new(AtomicUsize::new(0));
		let calls2 = calls.clone();
		logger.set_handler(Box::new(move |_, _| { calls2.fetch_add(1, Ordering::SeqCst); }));
		error!(logger, "test {}", 1);
		assert_eq!(calls.load(Ordering::SeqCst), 1);
	}
}
