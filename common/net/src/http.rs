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

//! Hyper Text Transfer Protocol version 1.1, client side, single request/response.
//!
//! [RFC 2616](https://datatracker.ietf.org/doc/html/rfc2616/)
//!
//! This is not a general-purpose HTTP/1.1 implementation: it knows how to
//! write one POST request with a known-length body and read back one
//! response. That is all a PEP client ever does with a connection.

use std::io::{self, BufRead, Write};

pub const DEFAULT_PORT:     u16 = 80;
pub const DEFAULT_PORT_TLS: u16 = 443;

#[derive(Clone, Debug)]
pub struct RequestHead<'a> {
	pub method:     &'a str,
	pub path:       &'a str,
	pub host:       &'a str,
	pub user_agent: &'a str,
	pub content_len: usize
}

#[derive(Clone, Debug)]
pub struct ResponseHead {
	pub status:  u16,
	pub headers: Vec<(String, String)>
}

impl ResponseHead {
	pub fn content_length(&self) -> Option<usize> {
		self.headers.iter()
			.find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
			.and_then(|(_, v)| v.trim().parse().ok())
	}
}

/// Writes the request line, a minimal fixed set of headers and the body.
pub fn write_request<T: Write>(stream: &mut T, head: &RequestHead, body: &[u8]) -> io::Result<()> {
	write!(stream, "{} {} HTTP/1.1\r\n", head.method, head.path)?;
	write!(stream, "host: {}\r\n", head.host)?;
	write!(stream, "user-agent: {}\r\n", head.user_agent)?;
	write!(stream, "content-type: application/octet-stream\r\n")?;
	write!(stream, "content-length: {}\r\n", head.content_len)?;
	write!(stream, "connection: close\r\n")?;
	write!(stream, "\r\n")?;
	stream.write_all(body)?;
	stream.flush()
}

/// Reads the status line and headers of a response. Leaves the stream
/// positioned at the start of the body.
pub fn read_response_head<T: BufRead>(stream: &mut T) -> io::Result<ResponseHead> {
	let mut line = String::new();
	stream.read_line(&mut line)?;
	let line = line.trim_end();

	let mut parts = line.splitn(3, ' ');
	let proto = parts.next().ok_or_else(|| invalid("missing HTTP version"))?;

	if !matches!(proto, "HTTP/1.0" | "HTTP/1.1") {
		return Err(invalid("unsupported HTTP version"));
	}

	let status = parts.next()
		.ok_or_else(|| invalid("missing status code"))?
		.parse()
		.map_err(|_| invalid("malformed status code"))?;

	let mut headers = Vec::new();

	loop {
		let mut line = String::new();
		stream.read_line(&mut line)?;
		let line = line.trim_end();

		if line.is_empty() {
			break;
		}

		let (name, value) = line.split_once(':').ok_or_else(|| invalid("malformed header"))?;
		headers.push((name.trim().to_string(), value.trim().to_string()));
	}

	Ok(ResponseHead { status, headers })
}

/// Reads exactly `len` bytes of response body.
pub fn read_response_body<T: BufRead>(stream: &mut T, len: usize) -> io::Result<Vec<u8>> {
	let mut buf = vec![0u8; len];
	stream.read_exact(&mut buf)?;
	Ok(buf)
}

fn invalid(msg: &str) -> io::Error {
	io::Error::new(io::ErrorKind::InvalidData, msg)
}
