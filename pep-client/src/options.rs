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

use std::fmt;
use std::time::Duration;

use crate::error::PepError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Replaces the original option setter's single untyped entry point: one
/// validating method per option, each returning `&mut Self` so calls chain.
/// There is no "unknown option" case since the method set is fixed at
/// compile time; `OPTION_INVALID` survives only for an out-of-range value
/// within a known option.
pub struct ClientOptions {
	pub(crate) endpoint_urls:          Vec<String>,
	pub(crate) pips_enabled:           bool,
	pub(crate) ohs_enabled:            bool,
	pub(crate) log_level:              pep_log::Level,
	pub(crate) log_sink:               Option<pep_log::Sink>,
	pub(crate) log_handler:            Option<pep_log::Handler>,
	pub(crate) endpoint_timeout:       Duration,
	pub(crate) endpoint_client_cert:   Option<String>,
	pub(crate) endpoint_server_capath: Option<String>,
	pub(crate) endpoint_server_cert:   Option<String>
}

impl fmt::Debug for ClientOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ClientOptions")
			.field("endpoint_urls", &self.endpoint_urls)
			.field("pips_enabled", &self.pips_enabled)
			.field("ohs_enabled", &self.ohs_enabled)
			.field("log_level", &self.log_level)
			.field("log_sink", &self.log_sink.as_ref().map(|_| "<sink>"))
			.field("log_handler", &self.log_handler.as_ref().map(|_| "<handler>"))
			.field("endpoint_timeout", &self.endpoint_timeout)
			.field("endpoint_client_cert", &self.endpoint_client_cert)
			.field("endpoint_server_capath", &self.endpoint_server_capath)
			.field("endpoint_server_cert", &self.endpoint_server_cert)
			.finish()
	}
}

impl Default for ClientOptions {
	fn default() -> Self {
		Self {
			endpoint_urls:          Vec::new(),
			pips_enabled:           true,
			ohs_enabled:            true,
			log_level:              pep_log::Level::Warn,
			log_sink:               None,
			log_handler:            None,
			endpoint_timeout:       DEFAULT_TIMEOUT,
			endpoint_client_cert:   None,
			endpoint_server_capath: None,
			endpoint_server_cert:   None
		}
	}
}

impl ClientOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// `ENDPOINT_URL`: appends one PDP endpoint to the failover list.
	pub fn endpoint_url(&mut self, url: impl Into<String>) -> &mut Self {
		self.endpoint_urls.push(url.into());
		self
	}

	/// `ENABLE_PIPS`.
	pub fn enable_pips(&mut self, enabled: bool) -> &mut Self {
		self.pips_enabled = enabled;
		self
	}

	/// `ENABLE_OBLIGATIONHANDLERS`.
	pub fn enable_obligation_handlers(&mut self, enabled: bool) -> &mut Self {
		self.ohs_enabled = enabled;
		self
	}

	/// `LOG_LEVEL`: an integer in {NONE, ERROR, WARN, INFO, DEBUG}. Out of
	/// range fails with `OptionInvalid`, the one case the Rust type system
	/// doesn't already rule out.
	pub fn log_level(&mut self, level: i32) -> Result<&mut Self, PepError> {
		self.log_level = pep_log::Level::from_i32(level)
			.ok_or_else(|| PepError::OptionInvalid(format!("log level {level} out of range")))?;
		Ok(self)
	}

	/// `LOG_OUT`.
	pub fn log_sink(&mut self, sink: pep_log::Sink) -> &mut Self {
		self.log_sink = Some(sink);
		self
	}

	/// `LOG_HANDLER`: supersedes `log_sink` entirely once set, mirroring
	/// `LOG_HANDLER` superseding `LOG_OUT` in the original option surface.
	pub fn log_handler(&mut self, handler: pep_log::Handler) -> &mut Self {
		self.log_handler = Some(handler);
		self
	}

	/// `ENDPOINT_TIMEOUT`, in seconds.
	pub fn endpoint_timeout(&mut self, secs: u64) -> &mut Self {
		self.endpoint_timeout = Duration::from_secs(secs);
		self
	}

	/// `ENDPOINT_CLIENT_CERT`.
	pub fn endpoint_client_cert(&mut self, path: impl Into<String>) -> &mut Self {
		self.endpoint_client_cert = Some(path.into());
		self
	}

	/// `ENDPOINT_SERVER_CAPATH`.
	pub fn endpoint_server_capath(&mut self, path: impl Into<String>) -> &mut Self {
		self.endpoint_server_capath = Some(path.into());
		self
	}

	/// `ENDPOINT_SERVER_CERT`.
	pub fn endpoint_server_cert(&mut self, path: impl Into<String>) -> &mut Self {
		self.endpoint_server_cert = Some(path.into());
		self
	}

	/// Any TLS field set without an `https://` endpoint is a transport
	/// misconfiguration: the shipped transport does not negotiate TLS, so
	/// a cert path would silently go unused.
	pub(crate) fn tls_configured_without_https(&self) -> bool {
		let any_tls = self.endpoint_client_cert.is_some()
			|| self.endpoint_server_capath.is_some()
			|| self.endpoint_server_cert.is_some();

		any_tls && self.endpoint_urls.iter().any(|url| !url.starts_with("https://"))
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn log_level_rejects_out_of_range_value() {
		let mut opts = ClientOptions::new();
		let err = opts.log_level(99).unwrap_err();
		assert!(matches!(err, PepError::OptionInvalid(_)));
	}

	#[test]
	fn log_level_accepts_every_valid_value() {
		let mut opts = ClientOptions::new();
		for level in 0..=4 {
			assert!(opts.log_level(level).is_ok());
		}
	}

	#[test]
	fn defaults_match_the_specified_option_surface() {
		let opts = ClientOptions::default();
		assert!(opts.pips_enabled);
		assert!(opts.ohs_enabled);
		assert_eq!(opts.endpoint_timeout, DEFAULT_TIMEOUT);
		assert!(opts.endpoint_urls.is_empty());
	}

	#[test]
	fn tls_field_without_https_is_flagged() {
		let mut opts = ClientOptions::new();
		opts.endpoint_url("http://pdp.example.org").endpoint_client_cert("/etc/client.pem");
		assert!(opts.tls_configured_without_https());
	}
}
