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

//! Hessian 1.0: a typed, tag-driven, self-describing binary format. Every
//! value on the wire starts with a one-byte tag identifying its type; this
//! crate reads and writes [`HessianValue`] trees against any `Read`/`Write`,
//! so it composes directly with `pep_buffer::ByteBuffer`.
//!
//! This codec does not emit `Ref`s on write: the XACML↔Hessian mapping in
//! `pep-model` only ever produces trees, never graphs with shared nodes, so
//! there is nothing to deduplicate. Reading honors `Ref`s a peer might send.

#![warn(clippy::all)]

mod error;
mod tag;
mod value;

pub use error::CodecError;
pub use value::{HessianList, HessianMap, HessianRemote, HessianValue, RefTable, read_value};
