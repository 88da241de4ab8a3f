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

use std::io;

const DEFAULT_BUF_LEN: usize = 0x1000;

/// Buffers the read half of a stream only. The PEP transport writes a whole
/// request (headers + body) in a single `write_all` per attempt, so there is
/// nothing for write buffering to coalesce; reading a status line and headers
/// one line at a time is the half that benefits, hence `io::BufReader<T>`
/// directly rather than a matching `BufWriter`.
pub struct BufStream<T: io::Read + io::Write>(io::BufReader<T>);

impl<T: io::Read + io::Write> BufStream<T> {
	pub fn new(inner: T) -> Self {
		Self::with_capacity(DEFAULT_BUF_LEN, inner)
	}

	pub fn with_capacity(capacity: usize, inner: T) -> Self {
		Self(io::BufReader::with_capacity(capacity, inner))
	}
}

impl<T: io::Read + io::Write> io::Read for BufStream<T> {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		self.0.read(buf)
	}

	fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
		self.0.read_exact(buf)
	}
}

impl<T: io::Read + io::Write> io::BufRead for BufStream<T> {
	fn fill_buf(&mut self) -> io::Result<&[u8]> {
		self.0.fill_buf()
	}

	fn consume(&mut self, amt: usize) {
		self.0.consume(amt)
	}

	fn read_until(&mut self, byte: u8, buf: &mut Vec<u8>) -> io::Result<usize> {
		self.0.read_until(byte, buf)
	}

	fn read_line(&mut self, buf: &mut String) -> io::Result<usize> {
		self.0.read_line(buf)
	}
}

impl<T: io::Read + io::Write> io::Write for BufStream<T> {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.get_mut().write(buf)
	}

	fn flush(&mut self) -> io::Result<()> {
		self.0.get_mut().flush()
	}

	fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
		self.0.get_mut().write_all(buf)
	}
}

pub struct Connector<T: crate::utils::Connector> where T::Connection: io::Read + io::Write {
	inner:   T,
	buf_len: usize
}

impl<T: crate::utils::Connector> Connector<T> where T::Connection: io::Read + io::Write {
	pub fn new(inner: T) -> Self {
		Self::with_capacity(inner, DEFAULT_BUF_LEN)
	}

	pub fn with_capacity(inner: T, capacity: usize) -> Self {
		Self { inner, buf_len: capacity }
	}
}

impl<T: crate::utils::Connector> crate::utils::Connector for Connector<T> where T::Connection: io::Read + io::Write {
	type Connection = BufStream<T::Connection>;

	fn connect(&self) -> io::Result<Self::Connection> {
		self.inner.connect()
			.map(|stream| BufStream::with_capacity(self.buf_len, stream))
	}
}
