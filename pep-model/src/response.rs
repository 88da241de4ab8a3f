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

use crate::Request;

/// An authorization response: the PDP's verdict for each resource/action
/// pair in the originating request, plus a back reference to that request
/// (populated by the pipeline, not part of the wire envelope).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
	pub results: Vec<ResultEntry>,
	pub request: Option<Request>
}

impl Response {
	pub fn new() -> Self {
		Self::default()
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Decision {
	Deny,
	Permit,
	Indeterminate,
	NotApplicable
}

impl Decision {
	pub fn as_str(self) -> &'static str {
		match self {
			Decision::Deny          => "Deny",
			Decision::Permit        => "Permit",
			Decision::Indeterminate => "Indeterminate",
			Decision::NotApplicable => "NotApplicable"
		}
	}

	pub fn from_str(s: &str) -> Option<Self> {
		Some(match s {
			"Deny"          => Decision::Deny,
			"Permit"        => Decision::Permit,
			"Indeterminate" => Decision::Indeterminate,
			"NotApplicable" => Decision::NotApplicable,
			_ => return None
		})
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FulfillOn {
	Deny,
	Permit
}

impl FulfillOn {
	pub fn as_i32(self) -> i32 {
		match self {
			FulfillOn::Deny   => 0,
			FulfillOn::Permit => 1
		}
	}

	pub fn from_i32(v: i32) -> Option<Self> {
		Some(match v {
			0 => FulfillOn::Deny,
			1 => FulfillOn::Permit,
			_ => return None
		})
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultEntry {
	pub resource_id: Option<String>,
	pub decision:    Decision,
	pub status:      Status,
	pub obligations: Vec<Obligation>
}

impl ResultEntry {
	pub fn new(decision: Decision) -> Self {
		Self { decision, ..Self::default() }
	}
}

impl Default for Decision {
	fn default() -> Self {
		Decision::Indeterminate
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Status {
	pub message: String,
	pub code:    Option<StatusCode>
}

#[derive(Clone, Debug, PartialEq)]
pub struct StatusCode {
	pub code:     String,
	pub sub_code: Option<Box<StatusCode>>
}

impl StatusCode {
	pub fn new(code: impl Into<String>) -> Self {
		Self { code: code.into(), sub_code: None }
	}

	pub fn with_sub_code(mut self, sub_code: StatusCode) -> Self {
		self.sub_code = Some(Box::new(sub_code));
		self
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct Obligation {
	pub id:          String,
	pub fulfill_on:  FulfillOn,
	pub assignments: Vec<AttributeAssignment>
}

impl Obligation {
	pub fn new(id: impl Into<String>, fulfill_on: FulfillOn) -> Self {
		Self { id: id.into(), fulfill_on, assignments: Vec::new() }
	}

	pub fn add_assignment(&mut self, assignment: AttributeAssignment) -> &mut Self {
		self.assignments.push(assignment);
		self
	}
}

/// Mandatory id plus an ordered sequence of string values, exactly as the
/// original `pep_attribute_assignment_t` modeled it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeAssignment {
	pub id:     String,
	pub values: Vec<String>
}

impl AttributeAssignment {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), values: Vec::new() }
	}

	pub fn add_value(&mut self, value: impl Into<String>) -> &mut Self {
		self.values.push(value.into());
		self
	}

	pub fn with_value(mut self, value: impl Into<String>) -> Self {
		self.add_value(value);
		self
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn decision_strings_round_trip() {
		for d in [Decision::Deny, Decision::Permit, Decision::Indeterminate, Decision::NotApplicable] {
			assert_eq!(Decision::from_str(d.as_str()), Some(d));
		}
	}

	#[test]
	fn fulfill_on_integers_round_trip() {
		for f in [FulfillOn::Deny, FulfillOn::Permit] {
			assert_eq!(FulfillOn::from_i32(f.as_i32()), Some(f));
		}
	}

	#[test]
	fn obligation_strips_by_id() {
		let mut result = ResultEntry::new(Decision::Permit);
		result.obligations.push(Obligation::new("urn:x:drop", FulfillOn::Permit));
		result.obligations.push(Obligation::new("urn:x:keep", FulfillOn::Permit));

		result.obligations.retain(|o| o.id != "urn:x:drop");

		assert_eq!(result.obligations.len(), 1);
		assert_eq!(result.obligations[0].id, "urn:x:keep");
	}

	#[test]
	fn status_code_forms_a_chain() {
		let status = StatusCode::new("outer").with_sub_code(StatusCode::new("inner"));
		assert_eq!(status.sub_code.as_deref().unwrap().code, "inner");
	}
}
