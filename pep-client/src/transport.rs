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

//! The HTTP transport boundary. `Transport` is the abstract contract the
//! pipeline depends on; `BlockingHttpTransport` is the one concrete
//! implementation the workspace ships, built on `pep-net`'s minimal
//! blocking HTTP/1.1 client plumbing.

use std::{io, time::Duration};

use pep_net::{buffered, http, tcp, utils::Connector as _};

pub const USER_AGENT: &str = concat!("PEP-C/", env!("CARGO_PKG_VERSION"));

pub struct TransportResponse {
	pub status: u16,
	pub body:   Vec<u8>
}

/// A single POST request/response exchange. Implementations need not be
/// HTTP at all (a mock, a TLS-terminating proxy, HTTP/2) as long as they
/// honour the URL/timeout/body-in, status/body-out contract.
pub trait Transport {
	fn send(&self, url: &str, timeout: Duration, body: &[u8]) -> io::Result<TransportResponse>;
}

/// Splits a bare `http://host[:port]/path` URL into its parts. No query
/// strings, no userinfo, no `https` support: TLS is explicitly out of
/// scope for the shipped transport (see `ClientOptions::tls_configured_without_https`).
struct ParsedUrl {
	host: String,
	port: u16,
	path: String
}

fn parse_url(url: &str) -> io::Result<ParsedUrl> {
	let rest = url.strip_prefix("http://").ok_or_else(|| invalid("only http:// endpoints are supported"))?;
	let (authority, path) = match rest.find('/') {
		Some(i) => (&rest[..i], &rest[i..]),
		None    => (rest, "/")
	};

	let (host, port) = match authority.rsplit_once(':') {
		Some((host, port)) => (host, port.parse().map_err(|_| invalid("malformed port"))?),
		None => (authority, http::DEFAULT_PORT)
	};

	if host.is_empty() {
		return Err(invalid("missing host"));
	}

	Ok(ParsedUrl { host: host.to_string(), port, path: path.to_string() })
}

fn invalid(msg: &str) -> io::Error {
	io::Error::new(io::ErrorKind::InvalidInput, msg)
}

#[derive(Default)]
pub struct BlockingHttpTransport;

impl Transport for BlockingHttpTransport {
	fn send(&self, url: &str, timeout: Duration, body: &[u8]) -> io::Result<TransportResponse> {
		let parsed = parse_url(url)?;

		let connector = buffered::Connector::new(tcp::Connector::new((parsed.host.as_str(), parsed.port), timeout));
		let mut stream = connector.connect()?;

		let head = http::RequestHead {
			method:      "POST",
			path:        &parsed.path,
			host:        &parsed.host,
			user_agent:  USER_AGENT,
			content_len: body.len()
		};

		http::write_request(&mut stream, &head, body)?;
		let response_head = http::read_response_head(&mut stream)?;
		let len = response_head.content_length().unwrap_or(0);
		let response_body = http::read_response_body(&mut stream, len)?;

		Ok(TransportResponse { status: response_head.status, body: response_body })
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn parses_host_port_and_path() {
		let parsed = parse_url("http://pdp.example.org:8443/authz").unwrap();
		assert_eq!(parsed.host, "pdp.example.org");
		assert_eq!(parsed.port, 8443);
		assert_eq!(parsed.path, "/authz");
	}

	#[test]
	fn defaults_to_port_80_and_root_path() {
		let parsed = parse_url("http://pdp.example.org").unwrap();
		assert_eq!(parsed.port, http::DEFAULT_PORT);
		assert_eq!(parsed.path, "/");
	}

	#[test]
	fn rejects_https() {
		assert!(parse_url("https://pdp.example.org").is_err());
	}
}
