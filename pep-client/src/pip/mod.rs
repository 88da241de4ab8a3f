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

//! Policy Information Point and Obligation Handler plug-in contracts.
//!
//! These replace the original function-table ABI (`{id, init, process,
//! destroy}` loaded from a shared object) with trait objects, the idiomatic
//! Rust equivalent of a stable function table when dynamic loading itself
//! is out of scope.

use pep_model::{Request, Response};

/// A Policy Information Point: enriches a request in place before it is
/// sent to the PDP, e.g. looking up additional Subject attributes.
pub trait Pip: Send {
	fn id(&self) -> &str;

	/// Invoked exactly once when the PIP is registered. A non-zero return
	/// prevents registration.
	fn init(&mut self) -> Result<(), i32> {
		Ok(())
	}

	/// Invoked once per `authorize` call, in registration order. A
	/// non-zero return aborts the whole call with `AUTHZ_PIP_PROCESS`.
	fn process(&mut self, request: &mut Request) -> Result<(), i32>;

	/// Invoked exactly once, during client teardown, for every PIP whose
	/// `init` succeeded. Failure is logged at WARN but never aborts
	/// teardown.
	fn destroy(&mut self) -> Result<(), i32> {
		Ok(())
	}
}

/// An Obligation Handler: post-processes a response after a decision has
/// been reached, e.g. stripping or acting on obligations.
pub trait ObligationHandler: Send {
	fn id(&self) -> &str;

	fn init(&mut self) -> Result<(), i32> {
		Ok(())
	}

	/// Invoked once per `authorize` call, in registration order, with the
	/// originating request and the response about to be returned. A
	/// non-zero return aborts the call with `AUTHZ_OH_PROCESS`.
	fn process(&mut self, request: &Request, response: &mut Response) -> Result<(), i32>;

	fn destroy(&mut self) -> Result<(), i32> {
		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use pep_model::{Attribute, Subject};

	struct AddSubjectAttribute;

	impl Pip for AddSubjectAttribute {
		fn id(&self) -> &str {
			"test.add-subject-attribute"
		}

		fn process(&mut self, request: &mut Request) -> Result<(), i32> {
			request.add_subject({
				let mut s = Subject::new();
				s.add_attribute(Attribute::new("urn:x:env").with_value("prod"));
				s
			});
			Ok(())
		}
	}

	#[test]
	fn pip_mutates_the_request_in_place() {
		let mut request = Request::new();
		let mut pip = AddSubjectAttribute;
		pip.process(&mut request).unwrap();
		assert_eq!(request.subjects.len(), 1);
		assert_eq!(request.subjects[0].attributes[0].id, "urn:x:env");
	}
}
