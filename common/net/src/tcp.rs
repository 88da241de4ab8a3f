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

use std::{io, net, time::Duration};

/// Connects to a single resolved socket address with an upper bound on connect time.
///
/// `addr` is resolved eagerly; the first address that accepts a connection within
/// `timeout` wins. This mirrors the rest of the PEP transport: the overall request
/// timeout is a budget, not a per-phase guarantee.
pub struct Connector<T: net::ToSocketAddrs> {
	addr:    T,
	timeout: Duration
}

impl<T: net::ToSocketAddrs> Connector<T> {
	pub fn new(addr: T, timeout: Duration) -> Self {
		Self { addr, timeout }
	}
}

impl<T: net::ToSocketAddrs> crate::utils::Connector for Connector<T> {
	type Connection = net::TcpStream;

	fn connect(&self) -> io::Result<Self::Connection> {
		let addr = self.addr.to_socket_addrs()?
			.next()
			.ok_or_else(|| io::Error::new(io::ErrorKind::AddrNotAvailable, "no address resolved"))?;
		let stream = net::TcpStream::connect_timeout(&addr, self.timeout)?;
		stream.set_read_timeout(Some(self.timeout))?;
		stream.set_write_timeout(Some(self.timeout))?;
		Ok(stream)
	}
}
