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

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	#[error("unexpected end of input while reading a Hessian {0}")]
	Eof(&'static str),

	#[error("unknown Hessian wire tag: {0:#04x}")]
	UnknownTag(u8),

	#[error("expected a Hessian {expected} tag, found {found:#04x}")]
	UnexpectedTag { expected: &'static str, found: u8 },

	#[error("Hessian string was not valid UTF-8")]
	InvalidUtf8,

	#[error("Hessian Ref index {0} has no matching earlier composite")]
	DanglingRef(i32),

	#[error("{0} exceeds the 65,535-unit single-chunk limit")]
	ChunkTooLong(&'static str),

	#[error("underlying I/O error: {0}")]
	Io(#[from] io::Error)
}
