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

const DEFAULT_CAPACITY: usize = 256;

/// A growable byte container with two independent cursors: a write cursor
/// (the logical length) and a read cursor. Filling, draining and rewinding
/// for a retry never reallocates unless the buffer actually grows.
///
/// Implements [`io::Read`] and [`io::Write`] so the Hessian codec, which is
/// generic over any reader/writer, can operate on it directly.
#[derive(Clone, Debug, Default)]
pub struct ByteBuffer {
	data:      Vec<u8>,
	write_pos: usize,
	read_pos:  usize
}

impl ByteBuffer {
	pub fn new() -> Self {
		Self::with_capacity(DEFAULT_CAPACITY)
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self { data: Vec::with_capacity(capacity), write_pos: 0, read_pos: 0 }
	}

	pub fn from_vec(data: Vec<u8>) -> Self {
		let write_pos = data.len();
		Self { data, write_pos, read_pos: 0 }
	}

	/// Appends a single byte, growing capacity if needed.
	pub fn put(&mut self, byte: u8) {
		if self.write_pos == self.data.len() {
			self.data.push(byte);
		} else {
			self.data[self.write_pos] = byte;
		}
		self.write_pos += 1;
	}

	/// Appends `src` at the write cursor, growing capacity if needed. Returns
	/// the number of bytes written (always `src.len()`; writes never fail).
	pub fn write_bytes(&mut self, src: &[u8]) -> usize {
		if self.write_pos == self.data.len() {
			self.data.extend_from_slice(src);
		} else {
			let end = self.write_pos + src.len();
			if end > self.data.len() {
				self.data.resize(end, 0);
			}
			self.data[self.write_pos..end].copy_from_slice(src);
		}
		self.write_pos += src.len();
		src.len()
	}

	/// Reads a single byte at the read cursor, advancing it. `None` at EOF.
	pub fn get(&mut self) -> Option<u8> {
		if self.eof() {
			return None;
		}
		let b = self.data[self.read_pos];
		self.read_pos += 1;
		Some(b)
	}

	/// Reads up to `dst.len()` bytes at the read cursor, advancing it.
	/// Returns the number of bytes actually read (may be less than
	/// `dst.len()` at EOF, never more).
	pub fn read_bytes(&mut self, dst: &mut [u8]) -> usize {
		let available = self.write_pos.saturating_sub(self.read_pos);
		let n = dst.len().min(available);
		dst[..n].copy_from_slice(&self.data[self.read_pos..self.read_pos + n]);
		self.read_pos += n;
		n
	}

	/// `true` iff the read cursor has caught up with the logical length.
	pub fn eof(&self) -> bool {
		self.read_pos >= self.write_pos
	}

	/// The logical length (the write cursor), irrespective of the read cursor.
	pub fn length(&self) -> usize {
		self.write_pos
	}

	pub fn is_empty(&self) -> bool {
		self.write_pos == 0
	}

	/// Resets the read cursor to the start; the write cursor and contents
	/// are preserved, so a failed attempt can be retried from byte 0.
	pub fn rewind(&mut self) {
		self.read_pos = 0;
	}

	/// Resets both cursors to zero; the logical length becomes zero. The
	/// underlying allocation is kept for reuse.
	pub fn reset(&mut self) {
		self.read_pos = 0;
		self.write_pos = 0;
	}

	pub fn as_slice(&self) -> &[u8] {
		&self.data[..self.write_pos]
	}

	pub fn into_vec(self) -> Vec<u8> {
		let mut data = self.data;
		data.truncate(self.write_pos);
		data
	}
}

impl io::Read for ByteBuffer {
	fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
		Ok(self.read_bytes(buf))
	}
}

impl io::Write for ByteBuffer {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		Ok(self.write_bytes(buf))
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}

impl From<Vec<u8>> for ByteBuffer {
	fn from(data: Vec<u8>) -> Self {
		Self::from_vec(data)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::io::{Read, Write};

	#[test]
	fn write_then_read_then_rewind_preserves_length() {
		let mut buf = ByteBuffer::new();
		buf.write_all(b"hello world").unwrap();
		assert_eq!(buf.length(), 11);

		let mut out = [0u8; 11];
		buf.read_exact(&mut out).unwrap();
		assert_eq!(&out, b"hello world");
		assert!(buf.eof());

		buf.rewind();
		assert!(!buf.eof());
		assert_eq!(buf.length(), 11);

		let mut out2 = [0u8; 11];
		buf.read_exact(&mut out2).unwrap();
		assert_eq!(&out2, b"hello world");
	}

	#[test]
	fn reset_clears_both_cursors_and_length() {
		let mut buf = ByteBuffer::new();
		buf.put(1);
		buf.put(2);
		buf.get();
		buf.reset();
		assert_eq!(buf.length(), 0);
		assert!(buf.eof());
		assert!(buf.is_empty());
	}

	#[test]
	fn grows_past_initial_capacity() {
		let mut buf = ByteBuffer::with_capacity(2);
		for i in 0..1000u32 {
			buf.put(i as u8);
		}
		assert_eq!(buf.length(), 1000);
	}

	#[test]
	fn get_returns_none_at_eof() {
		let mut buf = ByteBuffer::new();
		buf.put(42);
		assert_eq!(buf.get(), Some(42));
		assert_eq!(buf.get(), None);
	}

	proptest::proptest! {
		#[test]
		fn roundtrip_any_bytes(data: Vec<u8>) {
			let mut buf = ByteBuffer::new();
			buf.write_bytes(&data);
			buf.rewind();
			let mut out = vec![0u8; data.len()];
			let n = buf.read_bytes(&mut out);
			proptest::prop_assert_eq!(n, data.len());
			proptest::prop_assert_eq!(buf.length(), data.len());
			proptest::prop_assert_eq!(out, data);
		}
	}
}
