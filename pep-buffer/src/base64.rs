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

//! RFC 1113 base64, with the PEM-style optional line wrapping the original
//! PEP client used to fit the authorization body into mail-safe HTTP bodies.

const ALPHABET: &[u8; 64] =
	b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

const PAD: u8 = b'=';

/// Disables line wrapping entirely: the whole output is emitted on one line.
pub const NO_WRAP: usize = 0;

/// The line length the original PEP client wrapped encoded output at.
pub const DEFAULT_LINE_LENGTH: usize = 64;

fn decode_table() -> [i8; 256] {
	let mut table = [-1i8; 256];
	for (i, &b) in ALPHABET.iter().enumerate() {
		table[b as usize] = i as i8;
	}
	table
}

/// Encodes `input` as base64, inserting a `\r\n` every `line_length`
/// characters of output. `line_length` of [`NO_WRAP`] disables wrapping.
/// `line_length` is rounded down to a multiple of 4 (one base64 group) so
/// wraps never split a group across lines; a value less than 4 disables
/// wrapping.
pub fn encode(input: &[u8], line_length: usize) -> String {
	let line_length = if line_length < 4 { 0 } else { line_length - line_length % 4 };
	let mut out = String::with_capacity(input.len() * 4 / 3 + 4);
	let mut since_wrap = 0usize;

	for chunk in input.chunks(3) {
		let b0 = chunk[0];
		let b1 = chunk.get(1).copied();
		let b2 = chunk.get(2).copied();

		let n = (b0 as u32) << 16 | (b1.unwrap_or(0) as u32) << 8 | b2.unwrap_or(0) as u32;

		out.push(ALPHABET[(n >> 18 & 0x3f) as usize] as char);
		out.push(ALPHABET[(n >> 12 & 0x3f) as usize] as char);
		out.push(if b1.is_some() { ALPHABET[(n >> 6 & 0x3f) as usize] as char } else { PAD as char });
		out.push(if b2.is_some() { ALPHABET[(n & 0x3f) as usize] as char } else { PAD as char });

		since_wrap += 4;
		if line_length > 0 && since_wrap >= line_length {
			out.push_str("\r\n");
			since_wrap = 0;
		}
	}

	out
}

/// Decodes base64 text, tolerating embedded whitespace and line breaks (and
/// in fact any byte outside the alphabet) by skipping it, matching the
/// original decoder's leniency toward arbitrarily wrapped input.
pub fn decode(input: &[u8]) -> Result<Vec<u8>, DecodeError> {
	let table = decode_table();
	let mut out = Vec::with_capacity(input.len() * 3 / 4 + 3);
	let mut group = [0u8; 4];
	let mut group_len = 0usize;
	let mut padding = 0usize;

	for &b in input {
		if b == PAD {
			if group_len == 0 {
				continue;
			}
			padding += 1;
			group[group_len] = 0;
			group_len += 1;
		} else {
			let v = table[b as usize];
			if v < 0 {
				continue;
			}
			if padding > 0 {
				return Err(DecodeError::PaddingNotTrailing);
			}
			group[group_len] = v as u8;
			group_len += 1;
		}

		if group_len == 4 {
			let n = (group[0] as u32) << 18 | (group[1] as u32) << 12 | (group[2] as u32) << 6 | group[3] as u32;
			out.push((n >> 16) as u8);
			if padding < 2 {
				out.push((n >> 8) as u8);
			}
			if padding < 1 {
				out.push(n as u8);
			}
			group_len = 0;
			padding = 0;
		}
	}

	if group_len != 0 {
		return Err(DecodeError::TruncatedGroup);
	}

	Ok(out)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
	#[error("base64 padding byte ('=') appeared before the end of a group")]
	PaddingNotTrailing,
	#[error("base64 input ended mid-group")]
	TruncatedGroup
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn encodes_without_wrap() {
		assert_eq!(encode(b"hello world", NO_WRAP), "aGVsbG8gd29ybGQ=");
	}

	#[test]
	fn roundtrips_arbitrary_lengths() {
		for len in 0..=70 {
			let input: Vec<u8> = (0..len as u32).map(|i| (i % 256) as u8).collect();
			let encoded = encode(&input, DEFAULT_LINE_LENGTH);
			let decoded = decode(encoded.as_bytes()).unwrap();
			assert_eq!(decoded, input, "length {len}");
		}
	}

	#[test]
	fn wraps_at_requested_line_length() {
		let input = vec![0u8; 60];
		let encoded = encode(&input, 16);
		let longest_line = encoded.split("\r\n").map(str::len).max().unwrap();
		assert!(longest_line <= 16);
	}

	#[test]
	fn decode_tolerates_embedded_whitespace() {
		let encoded = "aGVs\r\nbG8g\r\nd29y\r\nbGQ=";
		assert_eq!(decode(encoded.as_bytes()).unwrap(), b"hello world");
	}

	#[test]
	fn decode_rejects_truncated_group() {
		assert!(matches!(decode(b"aGVsbG8"), Err(DecodeError::TruncatedGroup)));
	}

	#[test]
	fn line_length_rounds_down_to_group_multiple() {
		let input = vec![0u8; 12];
		let a = encode(&input, 10);
		let b = encode(&input, 8);
		assert_eq!(a, b);
	}

	proptest::proptest! {
		#[test]
		fn roundtrip_any_bytes(data: Vec<u8>, line_len in 0usize..128) {
			let encoded = encode(&data, line_len);
			let decoded = decode(encoded.as_bytes()).unwrap();
			proptest::prop_assert_eq!(decoded, data);
		}
	}
}
