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

/// Everything `Client` can fail with. `NULL_POINTER`, `MEMORY` and
/// `INIT_LISTS` from the original error taxonomy have no counterpart here:
/// a safe API has no nullable mandatory argument and the allocator aborts
/// the process rather than returning a null pointer.
#[derive(Debug, thiserror::Error)]
pub enum PepError {
	#[error("invalid option: {0}")]
	OptionInvalid(String),

	#[error("transport configuration failed: {0}")]
	InitCurl(String),

	#[error("PIP {id:?} failed to initialize (code {code})")]
	InitPip { id: String, code: i32 },

	#[error("obligation handler {id:?} failed to initialize (code {code})")]
	InitOh { id: String, code: i32 },

	#[error("failed to marshal the request: {0}")]
	Marshalling(String),

	#[error("failed to unmarshal the response: {0}")]
	Unmarshalling(String),

	#[error("PIP {id:?} rejected the request (code {code})")]
	AuthzPipProcess { id: String, code: i32 },

	#[error("obligation handler {id:?} rejected the response (code {code})")]
	AuthzOhProcess { id: String, code: i32 },

	#[error("all {urls_tried} endpoint(s) failed")]
	AuthzRequest { urls_tried: usize },

	#[error("transport failure: {0}")]
	AuthzCurl(String)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn every_variant_has_a_non_empty_display_message() {
		let errors: Vec<PepError> = vec![
			PepError::OptionInvalid("x".into()),
			PepError::InitCurl("x".into()),
			PepError::InitPip { id: "x".into(), code: 1 },
			PepError::InitOh { id: "x".into(), code: 1 },
			PepError::Marshalling("x".into()),
			PepError::Unmarshalling("x".into()),
			PepError::AuthzPipProcess { id: "x".into(), code: 1 },
			PepError::AuthzOhProcess { id: "x".into(), code: 1 },
			PepError::AuthzRequest { urls_tried: 2 },
			PepError::AuthzCurl("x".into())
		];

		for err in errors {
			assert!(!err.to_string().is_empty());
		}
	}
}
