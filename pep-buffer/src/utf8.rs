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

//! Hessian strings are length-prefixed by Unicode scalar value count, not by
//! byte count, so the codec needs to count and slice UTF-8 text by chars
//! rather than bytes.

/// Number of Unicode scalar values (`char`s) encoded in `s`. Equal to
/// `s.chars().count()`, spelled out so the leading-byte counting rule is
/// explicit at the call site for anyone porting the wire format.
pub fn char_count(s: &str) -> usize {
	s.bytes().filter(|&b| b & 0xc0 != 0x80).count()
}

/// Reads at most `max_chars` Unicode scalar values from the front of `s`,
/// returning the matched prefix and the remaining suffix. A malformed
/// continuation byte is treated as belonging to the preceding char, since by
/// construction `s` is valid UTF-8 and such a split cannot occur.
pub fn read_chars(s: &str, max_chars: usize) -> (&str, &str) {
	if max_chars == 0 {
		return ("", s);
	}

	let mut count = 0usize;
	for (i, _) in s.char_indices() {
		if count == max_chars {
			return (&s[..i], &s[i..]);
		}
		count += 1;
	}

	(s, "")
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn counts_ascii() {
		assert_eq!(char_count("hello"), 5);
	}

	#[test]
	fn counts_multi_byte_sequences() {
		assert_eq!(char_count("héllo"), 5); // 2-byte é
		assert_eq!(char_count("héllo世"), 6); // + 3-byte 世
		assert_eq!(char_count("a\u{1F600}b"), 3); // + 4-byte emoji
	}

	#[test]
	fn read_chars_splits_on_scalar_boundary() {
		let (head, tail) = read_chars("héllo", 2);
		assert_eq!(head, "h\u{e9}");
		assert_eq!(tail, "llo");
	}

	#[test]
	fn read_chars_max_exceeds_length_returns_all() {
		let (head, tail) = read_chars("hi", 10);
		assert_eq!(head, "hi");
		assert_eq!(tail, "");
	}

	#[test]
	fn read_chars_zero_returns_empty_head() {
		let (head, tail) = read_chars("hi", 0);
		assert_eq!(head, "");
		assert_eq!(tail, "hi");
	}
}
