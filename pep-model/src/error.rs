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

/// Everything that can go wrong projecting the XACML model onto, or back
/// out of, a Hessian tree.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
	#[error("Hessian value was not a Map tagged {expected:?} (found {found:?})")]
	WrongType { expected: &'static str, found: &'static str },

	#[error("Hessian Map is tagged {found:?}, expected {expected:?}")]
	WrongTypeName { expected: &'static str, found: String },

	#[error("field {0:?} is mandatory but missing")]
	MissingField(&'static str),

	#[error("field {field:?} should be a {expected}")]
	FieldTypeMismatch { field: &'static str, expected: &'static str },

	#[error("{0:?} is not a valid Decision")]
	InvalidDecision(String),

	#[error("{0} is not a valid FulfillOn value")]
	InvalidFulfillOn(i32),

	#[error("Hessian codec error: {0}")]
	Codec(#[from] pep_hessian::CodecError)
}
