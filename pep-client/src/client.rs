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

use std::io::Write as _;
use std::time::Duration;

use pep_buffer::ByteBuffer;
use pep_model::{Request, Response};

use crate::error::PepError;
use crate::options::ClientOptions;
use crate::pip::{ObligationHandler, Pip};
use crate::transport::{BlockingHttpTransport, Transport};

/// One PEP client handle: an ordered PIP chain, an ordered OH chain, an
/// ordered failover URL list, a transport and a logger, all instance-local.
/// `authorize` takes `&mut self`, so the borrow checker alone enforces the
/// single-call-at-a-time contract; no runtime lock is needed.
pub struct Client {
	pips:         Vec<Box<dyn Pip>>,
	ohs:          Vec<Box<dyn ObligationHandler>>,
	urls:         Vec<String>,
	timeout:      Duration,
	pips_enabled: bool,
	ohs_enabled:  bool,
	logger:       pep_log::Logger,
	transport:    Box<dyn Transport>
}

impl Client {
	pub fn new(mut options: ClientOptions) -> Result<Self, PepError> {
		if options.tls_configured_without_https() {
			return Err(PepError::InitCurl("TLS option set without an https:// endpoint".into()));
		}

		let mut logger = pep_log::Logger::default();
		logger.set_level(options.log_level);
		if let Some(handler) = options.log_handler.take() {
			logger.set_handler(handler);
		} else if let Some(sink) = options.log_sink.take() {
			logger.set_sink(sink);
		}

		Ok(Self {
			pips:         Vec::new(),
			ohs:          Vec::new(),
			urls:         options.endpoint_urls,
			timeout:      options.endpoint_timeout,
			pips_enabled: options.pips_enabled,
			ohs_enabled:  options.ohs_enabled,
			logger,
			transport:    Box::new(BlockingHttpTransport)
		})
	}

	/// Swaps the shipped `BlockingHttpTransport` for another implementation,
	/// e.g. an in-process stub in tests.
	pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
		self.transport = transport;
		self
	}

	/// Registers a PIP, running its `init` exactly once. A non-zero return
	/// leaves the PIP unregistered.
	pub fn add_pip(&mut self, mut pip: Box<dyn Pip>) -> Result<(), PepError> {
		pip.init().map_err(|code| PepError::InitPip { id: pip.id().to_string(), code })?;
		self.pips.push(pip);
		Ok(())
	}

	/// Registers an obligation handler, running its `init` exactly once.
	pub fn add_obligation_handler(&mut self, mut oh: Box<dyn ObligationHandler>) -> Result<(), PepError> {
		oh.init().map_err(|code| PepError::InitOh { id: oh.id().to_string(), code })?;
		self.ohs.push(oh);
		Ok(())
	}

	pub fn authorize(&mut self, mut request: Request) -> Result<Response, PepError> {
		if self.pips_enabled {
			for pip in &mut self.pips {
				pip.process(&mut request).map_err(|code| PepError::AuthzPipProcess { id: pip.id().to_string(), code })?;
			}
		}

		let mut raw_request = ByteBuffer::new();
		pep_model::marshal_request(&mut raw_request, &request).map_err(|e| PepError::Marshalling(e.to_string()))?;

		let mut b64_request = ByteBuffer::from_vec(
			pep_buffer::base64::encode(raw_request.as_slice(), pep_buffer::base64::DEFAULT_LINE_LENGTH).into_bytes()
		);
		let mut b64_response = ByteBuffer::new();
		let mut raw_response = ByteBuffer::new();

		let mut response = None;

		for url in &self.urls {
			let transport_result = self.transport.send(url, self.timeout, b64_request.as_slice());

			let reply = match transport_result {
				Ok(reply) if reply.status == 200 => reply,
				Ok(reply) => {
					pep_log::warn!(self.logger, "PDP {} returned HTTP {}, trying next endpoint", url, reply.status);
					b64_request.rewind();
					b64_response.reset();
					raw_response.reset();
					continue;
				}
				Err(e) => {
					pep_log::warn!(self.logger, "PDP {} unreachable: {}, trying next endpoint", url, e);
					b64_request.rewind();
					b64_response.reset();
					raw_response.reset();
					continue;
				}
			};

			let _ = b64_response.write_all(&reply.body);

			let decoded = match pep_buffer::base64::decode(b64_response.as_slice()) {
				Ok(decoded) => decoded,
				Err(e) => {
					pep_log::warn!(self.logger, "PDP {} sent malformed base64: {}, trying next endpoint", url, e);
					b64_request.rewind();
					b64_response.reset();
					raw_response.reset();
					continue;
				}
			};

			let _ = raw_response.write_all(&decoded);

			match pep_model::unmarshal_response(&mut raw_response) {
				Ok(parsed) => {
					response = Some(parsed);
					break;
				}
				Err(e) => {
					pep_log::warn!(self.logger, "PDP {} sent malformed response: {}, trying next endpoint", url, e);
					b64_request.rewind();
					b64_response.reset();
					raw_response.reset();
					continue;
				}
			}
		}

		let mut response = response.ok_or(PepError::AuthzRequest { urls_tried: self.urls.len() })?;

		if self.ohs_enabled {
			for oh in &mut self.ohs {
				oh.process(&request, &mut response).map_err(|code| PepError::AuthzOhProcess { id: oh.id().to_string(), code })?;
			}
		}

		response.request = Some(request);
		Ok(response)
	}
}

/// Mirrors `pep_destroy`: every PIP and OH whose `init` succeeded gets
/// exactly one `destroy` call, in registration order, log-and-continue on
/// a non-zero return. `Drop` can't propagate a `Result`, which is the
/// teardown contract anyway — there is no caller left to hand a failure to.
impl Drop for Client {
	fn drop(&mut self) {
		for pip in &mut self.pips {
			if let Err(code) = pip.destroy() {
				pep_log::warn!(self.logger, "PIP {} destroy failed with code {}", pip.id(), code);
			}
		}
		for oh in &mut self.ohs {
			if let Err(code) = oh.destroy() {
				pep_log::warn!(self.logger, "obligation handler {} destroy failed with code {}", oh.id(), code);
			}
		}
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::io;

	struct StubTransport {
		status: u16,
		body:   Vec<u8>
	}

	impl Transport for StubTransport {
		fn send(&self, _url: &str, _timeout: Duration, _body: &[u8]) -> io::Result<crate::transport::TransportResponse> {
			Ok(crate::transport::TransportResponse { status: self.status, body: self.body.clone() })
		}
	}

	fn canned_response() -> Vec<u8> {
		let mut response = Response::new();
		response.results.push(pep_model::ResultEntry::new(pep_model::Decision::Permit));
		let mut raw = Vec::new();
		pep_model::marshal_response(&mut raw, &response).unwrap();
		pep_buffer::base64::encode(&raw, pep_buffer::base64::DEFAULT_LINE_LENGTH).into_bytes()
	}

	#[test]
	fn authorize_yields_permit_on_success() {
		let mut options = ClientOptions::new();
		options.endpoint_url("http://pdp.example.org");
		let mut client = Client::new(options).unwrap()
			.with_transport(Box::new(StubTransport { status: 200, body: canned_response() }));

		let response = client.authorize(Request::new()).unwrap();
		assert_eq!(response.results[0].decision, pep_model::Decision::Permit);
	}

	#[test]
	fn zero_endpoints_fails_without_any_transport_call() {
		let mut client = Client::new(ClientOptions::new()).unwrap();
		let err = client.authorize(Request::new()).unwrap_err();
		assert!(matches!(err, PepError::AuthzRequest { urls_tried: 0 }));
	}

	#[test]
	fn non_200_status_triggers_failover() {
		let mut options = ClientOptions::new();
		options.endpoint_url("http://a.example.org");
		let mut client = Client::new(options).unwrap()
			.with_transport(Box::new(StubTransport { status: 500, body: Vec::new() }));

		let err = client.authorize(Request::new()).unwrap_err();
		assert!(matches!(err, PepError::AuthzRequest { urls_tried: 1 }));
	}

	struct TrackingPip {
		destroyed: std::sync::Arc<std::sync::atomic::AtomicBool>
	}

	impl Pip for TrackingPip {
		fn id(&self) -> &str {
			"tracking-pip"
		}

		fn process(&mut self, _request: &mut Request) -> Result<(), i32> {
			Ok(())
		}

		fn destroy(&mut self) -> Result<(), i32> {
			self.destroyed.store(true, std::sync::atomic::Ordering::SeqCst);
			Ok(())
		}
	}

	#[test]
	fn dropping_the_client_destroys_every_registered_pip() {
		let destroyed = std::sync::Arc::new(std::sync::atomic::AtomicBool::new(false));
		let mut client = Client::new(ClientOptions::new()).unwrap();
		client.add_pip(Box::new(TrackingPip { destroyed: destroyed.clone() })).unwrap();

		drop(client);

		assert!(destroyed.load(std::sync::atomic::Ordering::SeqCst));
	}
}
