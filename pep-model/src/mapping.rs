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

//! The deterministic projection of the XACML model onto Hessian `Map`
//! composites tagged with well-known class names, and back. Every entity
//! becomes a Map; sequences become Lists; absent optional fields become
//! `Null`; decisions become their canonical string, fulfillOn its integer.

use std::io::{Read, Write};

use pep_hessian::{HessianList, HessianMap, HessianValue, RefTable, read_value};

use crate::attribute::Attribute;
use crate::error::MappingError;
use crate::request::{Action, Environment, Request, Resource, Subject};
use crate::response::{AttributeAssignment, Decision, FulfillOn, Obligation, Response, ResultEntry, Status, StatusCode};

pub const TYPE_REQUEST:              &str = "org.glite.authz.pep.model.Request";
pub const TYPE_RESPONSE:             &str = "org.glite.authz.pep.model.Response";
pub const TYPE_SUBJECT:              &str = "org.glite.authz.pep.model.Subject";
pub const TYPE_RESOURCE:             &str = "org.glite.authz.pep.model.Resource";
pub const TYPE_ACTION:               &str = "org.glite.authz.pep.model.Action";
pub const TYPE_ENVIRONMENT:          &str = "org.glite.authz.pep.model.Environment";
pub const TYPE_ATTRIBUTE:            &str = "org.glite.authz.pep.model.Attribute";
pub const TYPE_RESULT:               &str = "org.glite.authz.pep.model.Result";
pub const TYPE_STATUS:               &str = "org.glite.authz.pep.model.Status";
pub const TYPE_STATUS_CODE:          &str = "org.glite.authz.pep.model.StatusCode";
pub const TYPE_OBLIGATION:           &str = "org.glite.authz.pep.model.Obligation";
pub const TYPE_ATTRIBUTE_ASSIGNMENT: &str = "org.glite.authz.pep.model.AttributeAssignment";

pub fn marshal_request(w: &mut impl Write, request: &Request) -> Result<(), MappingError> {
	request_to_hessian(request).write(w).map_err(MappingError::from)
}

pub fn unmarshal_request(r: &mut impl Read) -> Result<Request, MappingError> {
	let mut refs = RefTable::new();
	let value = read_value(r, &mut refs)?;
	hessian_to_request(&value)
}

pub fn marshal_response(w: &mut impl Write, response: &Response) -> Result<(), MappingError> {
	response_to_hessian(response).write(w).map_err(MappingError::from)
}

pub fn unmarshal_response(r: &mut impl Read) -> Result<Response, MappingError> {
	let mut refs = RefTable::new();
	let value = read_value(r, &mut refs)?;
	hessian_to_response(&value)
}

// --- building blocks -------------------------------------------------------

fn typed_map(type_name: &str, entries: Vec<(&str, HessianValue)>) -> HessianValue {
	HessianValue::Map(HessianMap {
		type_name: Some(type_name.to_string()),
		entries:   entries.into_iter().map(|(k, v)| (HessianValue::String(k.to_string()), v)).collect()
	})
}

fn str_val(s: &str) -> HessianValue {
	HessianValue::String(s.to_string())
}

fn opt_str_val(s: &Option<String>) -> HessianValue {
	match s {
		Some(s) => str_val(s),
		None    => HessianValue::Null
	}
}

fn list_val<'a>(elements: impl Iterator<Item = &'a str>) -> HessianValue {
	let elements: Vec<_> = elements.map(str_val).collect();
	HessianValue::List(HessianList { type_name: None, length_hint: Some(elements.len() as i32), elements })
}

fn composite_list_val(elements: Vec<HessianValue>) -> HessianValue {
	HessianValue::List(HessianList { type_name: None, length_hint: Some(elements.len() as i32), elements })
}

fn expect_map<'a>(value: &'a HessianValue, expected_type: &'static str) -> Result<&'a HessianMap, MappingError> {
	match value {
		HessianValue::Map(map) => {
			if let Some(found) = &map.type_name {
				if found != expected_type {
					return Err(MappingError::WrongTypeName { expected: expected_type, found: found.clone() });
				}
			}
			Ok(map)
		}
		other => Err(MappingError::WrongType { expected: "Map", found: variant_name(other) })
	}
}

fn variant_name(value: &HessianValue) -> &'static str {
	match value {
		HessianValue::Boolean(_) => "Boolean",
		HessianValue::Integer(_) => "Integer",
		HessianValue::Long(_)    => "Long",
		HessianValue::Double(_)  => "Double",
		HessianValue::Date(_)    => "Date",
		HessianValue::Null       => "Null",
		HessianValue::Binary(_)  => "Binary",
		HessianValue::String(_)  => "String",
		HessianValue::Ref(_)     => "Ref",
		HessianValue::List(_)    => "List",
		HessianValue::Map(_)     => "Map",
		HessianValue::Remote(_)  => "Remote"
	}
}

fn find<'a>(map: &'a HessianMap, key: &str) -> Option<&'a HessianValue> {
	map.entries.iter().find(|(k, _)| matches!(k, HessianValue::String(s) if s == key)).map(|(_, v)| v)
}

fn string_field(map: &HessianMap, key: &'static str) -> Result<String, MappingError> {
	match find(map, key) {
		Some(HessianValue::String(s)) => Ok(s.clone()),
		Some(_) => Err(MappingError::FieldTypeMismatch { field: key, expected: "String" }),
		None => Err(MappingError::MissingField(key))
	}
}

fn opt_string_field(map: &HessianMap, key: &'static str) -> Result<Option<String>, MappingError> {
	match find(map, key) {
		Some(HessianValue::String(s)) => Ok(Some(s.clone())),
		Some(HessianValue::Null) | None => Ok(None),
		Some(_) => Err(MappingError::FieldTypeMismatch { field: key, expected: "String or Null" })
	}
}

fn string_list_field(map: &HessianMap, key: &'static str) -> Result<Vec<String>, MappingError> {
	match find(map, key) {
		Some(HessianValue::List(list)) => list.elements.iter()
			.map(|e| match e {
				HessianValue::String(s) => Ok(s.clone()),
				_ => Err(MappingError::FieldTypeMismatch { field: key, expected: "String" })
			})
			.collect(),
		Some(HessianValue::Null) | None => Ok(Vec::new()),
		Some(_) => Err(MappingError::FieldTypeMismatch { field: key, expected: "List" })
	}
}

fn composite_list_field<'a>(map: &'a HessianMap, key: &'static str) -> Result<&'a [HessianValue], MappingError> {
	match find(map, key) {
		Some(HessianValue::List(list)) => Ok(&list.elements),
		Some(HessianValue::Null) | None => Ok(&[]),
		Some(_) => Err(MappingError::FieldTypeMismatch { field: key, expected: "List" })
	}
}

// --- Attribute ---------------------------------------------------------

fn attribute_to_hessian(attr: &Attribute) -> HessianValue {
	typed_map(TYPE_ATTRIBUTE, vec![
		("id", str_val(&attr.id)),
		("dataType", opt_str_val(&attr.data_type)),
		("issuer", opt_str_val(&attr.issuer)),
		("values", list_val(attr.values.iter().map(String::as_str)))
	])
}

fn hessian_to_attribute(value: &HessianValue) -> Result<Attribute, MappingError> {
	let map = expect_map(value, TYPE_ATTRIBUTE)?;
	Ok(Attribute {
		id:        string_field(map, "id")?,
		data_type: opt_string_field(map, "dataType")?,
		issuer:    opt_string_field(map, "issuer")?,
		values:    string_list_field(map, "values")?
	})
}

fn attribute_list_to_hessian(attrs: &[Attribute]) -> HessianValue {
	composite_list_val(attrs.iter().map(attribute_to_hessian).collect())
}

fn hessian_to_attribute_list(map: &HessianMap, key: &'static str) -> Result<Vec<Attribute>, MappingError> {
	composite_list_field(map, key)?.iter().map(hessian_to_attribute).collect()
}

// --- Request / Subject / Resource / Action / Environment ----------------

fn subject_to_hessian(subject: &Subject) -> HessianValue {
	typed_map(TYPE_SUBJECT, vec![
		("category", opt_str_val(&subject.category)),
		("attributes", attribute_list_to_hessian(&subject.attributes))
	])
}

fn hessian_to_subject(value: &HessianValue) -> Result<Subject, MappingError> {
	let map = expect_map(value, TYPE_SUBJECT)?;
	Ok(Subject { category: opt_string_field(map, "category")?, attributes: hessian_to_attribute_list(map, "attributes")? })
}

fn resource_to_hessian(resource: &Resource) -> HessianValue {
	typed_map(TYPE_RESOURCE, vec![
		("category", opt_str_val(&resource.category)),
		("attributes", attribute_list_to_hessian(&resource.attributes)),
		("content", opt_str_val(&resource.content))
	])
}

fn hessian_to_resource(value: &HessianValue) -> Result<Resource, MappingError> {
	let map = expect_map(value, TYPE_RESOURCE)?;
	Ok(Resource {
		category:   opt_string_field(map, "category")?,
		attributes: hessian_to_attribute_list(map, "attributes")?,
		content:    opt_string_field(map, "content")?
	})
}

fn action_to_hessian(action: &Action) -> HessianValue {
	typed_map(TYPE_ACTION, vec![
		("category", opt_str_val(&action.category)),
		("attributes", attribute_list_to_hessian(&action.attributes))
	])
}

fn hessian_to_action(value: &HessianValue) -> Result<Action, MappingError> {
	let map = expect_map(value, TYPE_ACTION)?;
	Ok(Action { category: opt_string_field(map, "category")?, attributes: hessian_to_attribute_list(map, "attributes")? })
}

fn environment_to_hessian(env: &Environment) -> HessianValue {
	typed_map(TYPE_ENVIRONMENT, vec![
		("category", opt_str_val(&env.category)),
		("attributes", attribute_list_to_hessian(&env.attributes))
	])
}

fn hessian_to_environment(value: &HessianValue) -> Result<Environment, MappingError> {
	let map = expect_map(value, TYPE_ENVIRONMENT)?;
	Ok(Environment { category: opt_string_field(map, "category")?, attributes: hessian_to_attribute_list(map, "attributes")? })
}

fn request_to_hessian(request: &Request) -> HessianValue {
	let action = match &request.action {
		Some(a) => action_to_hessian(a),
		None    => HessianValue::Null
	};
	let environment = match &request.environment {
		Some(e) => environment_to_hessian(e),
		None    => HessianValue::Null
	};

	typed_map(TYPE_REQUEST, vec![
		("subjects", composite_list_val(request.subjects.iter().map(subject_to_hessian).collect())),
		("resources", composite_list_val(request.resources.iter().map(resource_to_hessian).collect())),
		("action", action),
		("environment", environment)
	])
}

fn hessian_to_request(value: &HessianValue) -> Result<Request, MappingError> {
	let map = expect_map(value, TYPE_REQUEST)?;

	let subjects = composite_list_field(map, "subjects")?.iter().map(hessian_to_subject).collect::<Result<_, _>>()?;
	let resources = composite_list_field(map, "resources")?.iter().map(hessian_to_resource).collect::<Result<_, _>>()?;

	let action = match find(map, "action") {
		Some(HessianValue::Null) | None => None,
		Some(v) => Some(hessian_to_action(v)?)
	};
	let environment = match find(map, "environment") {
		Some(HessianValue::Null) | None => None,
		Some(v) => Some(hessian_to_environment(v)?)
	};

	Ok(Request { subjects, resources, action, environment })
}

// --- Response / Result / Status / Obligation / AttributeAssignment ------

fn status_code_to_hessian(code: &StatusCode) -> HessianValue {
	let sub = match &code.sub_code {
		Some(sub) => status_code_to_hessian(sub),
		None      => HessianValue::Null
	};
	typed_map(TYPE_STATUS_CODE, vec![("code", str_val(&code.code)), ("statusCode", sub)])
}

fn hessian_to_status_code(value: &HessianValue) -> Result<StatusCode, MappingError> {
	let map = expect_map(value, TYPE_STATUS_CODE)?;
	let code = string_field(map, "code")?;
	let sub_code = match find(map, "statusCode") {
		Some(HessianValue::Null) | None => None,
		Some(v) => Some(Box::new(hessian_to_status_code(v)?))
	};
	Ok(StatusCode { code, sub_code })
}

fn status_to_hessian(status: &Status) -> HessianValue {
	let code = match &status.code {
		Some(c) => status_code_to_hessian(c),
		None    => HessianValue::Null
	};
	typed_map(TYPE_STATUS, vec![("message", str_val(&status.message)), ("statusCode", code)])
}

fn hessian_to_status(value: &HessianValue) -> Result<Status, MappingError> {
	let map = expect_map(value, TYPE_STATUS)?;
	let message = string_field(map, "message")?;
	let code = match find(map, "statusCode") {
		Some(HessianValue::Null) | None => None,
		Some(v) => Some(hessian_to_status_code(v)?)
	};
	Ok(Status { message, code })
}

fn attribute_assignment_to_hessian(assignment: &AttributeAssignment) -> HessianValue {
	typed_map(TYPE_ATTRIBUTE_ASSIGNMENT, vec![
		("id", str_val(&assignment.id)),
		("values", list_val(assignment.values.iter().map(String::as_str)))
	])
}

fn hessian_to_attribute_assignment(value: &HessianValue) -> Result<AttributeAssignment, MappingError> {
	let map = expect_map(value, TYPE_ATTRIBUTE_ASSIGNMENT)?;
	Ok(AttributeAssignment { id: string_field(map, "id")?, values: string_list_field(map, "values")? })
}

fn obligation_to_hessian(obligation: &Obligation) -> HessianValue {
	typed_map(TYPE_OBLIGATION, vec![
		("id", str_val(&obligation.id)),
		("fulfillOn", HessianValue::Integer(obligation.fulfill_on.as_i32())),
		("assignments", composite_list_val(obligation.assignments.iter().map(attribute_assignment_to_hessian).collect()))
	])
}

fn hessian_to_obligation(value: &HessianValue) -> Result<Obligation, MappingError> {
	let map = expect_map(value, TYPE_OBLIGATION)?;
	let id = string_field(map, "id")?;

	let fulfill_on = match find(map, "fulfillOn") {
		Some(HessianValue::Integer(v)) => FulfillOn::from_i32(*v).ok_or(MappingError::InvalidFulfillOn(*v))?,
		Some(_) => return Err(MappingError::FieldTypeMismatch { field: "fulfillOn", expected: "Integer" }),
		None => return Err(MappingError::MissingField("fulfillOn"))
	};

	let assignments = composite_list_field(map, "assignments")?
		.iter()
		.map(hessian_to_attribute_assignment)
		.collect::<Result<_, _>>()?;

	Ok(Obligation { id, fulfill_on, assignments })
}

fn result_to_hessian(result: &ResultEntry) -> HessianValue {
	typed_map(TYPE_RESULT, vec![
		("resourceId", opt_str_val(&result.resource_id)),
		("decision", str_val(result.decision.as_str())),
		("status", status_to_hessian(&result.status)),
		("obligations", composite_list_val(result.obligations.iter().map(obligation_to_hessian).collect()))
	])
}

fn hessian_to_result(value: &HessianValue) -> Result<ResultEntry, MappingError> {
	let map = expect_map(value, TYPE_RESULT)?;

	let decision_str = string_field(map, "decision")?;
	let decision = Decision::from_str(&decision_str).ok_or_else(|| MappingError::InvalidDecision(decision_str.clone()))?;

	let status = match find(map, "status") {
		Some(v) => hessian_to_status(v)?,
		None => return Err(MappingError::MissingField("status"))
	};

	let obligations = composite_list_field(map, "obligations")?.iter().map(hessian_to_obligation).collect::<Result<_, _>>()?;

	Ok(ResultEntry { resource_id: opt_string_field(map, "resourceId")?, decision, status, obligations })
}

fn response_to_hessian(response: &Response) -> HessianValue {
	typed_map(TYPE_RESPONSE, vec![
		("results", composite_list_val(response.results.iter().map(result_to_hessian).collect()))
	])
}

fn hessian_to_response(value: &HessianValue) -> Result<Response, MappingError> {
	let map = expect_map(value, TYPE_RESPONSE)?;
	let results = composite_list_field(map, "results")?.iter().map(hessian_to_result).collect::<Result<_, _>>()?;
	Ok(Response { results, request: None })
}

#[cfg(test)]
mod test {
	use super::*;

	fn sample_request() -> Request {
		let mut req = Request::new();
		req.add_subject({
			let mut s = Subject::new();
			s.add_attribute(Attribute::new("urn:x:sub").with_value("alice"));
			s
		});
		req.add_resource(Resource::new().with_content("/a"));
		req
	}

	#[test]
	fn request_roundtrips_through_hessian() {
		let request = sample_request();
		let mut buf = Vec::new();
		marshal_request(&mut buf, &request).unwrap();
		let decoded = unmarshal_request(&mut &buf[..]).unwrap();
		assert_eq!(decoded, request);
	}

	#[test]
	fn request_with_action_and_environment_roundtrips() {
		let mut req = sample_request();
		req.action = Some({
			let mut a = Action::new();
			a.add_attribute(Attribute::new("urn:x:act").with_value("read"));
			a
		});
		req.environment = Some({
			let mut e = Environment::new();
			e.add_attribute(Attribute::new("urn:x:env").with_value("prod"));
			e
		});

		let mut buf = Vec::new();
		marshal_request(&mut buf, &req).unwrap();
		let decoded = unmarshal_request(&mut &buf[..]).unwrap();
		assert_eq!(decoded, req);
	}

	#[test]
	fn response_with_obligations_roundtrips() {
		let mut result = ResultEntry::new(Decision::Permit);
		result.status = Status { message: "ok".into(), code: Some(StatusCode::new("urn:oasis:status:ok")) };
		result.obligations.push({
			let mut ob = Obligation::new("urn:x:keep", FulfillOn::Permit);
			ob.add_assignment(AttributeAssignment::new("attr").with_value("v"));
			ob
		});

		let response = Response { results: vec![result], request: None };

		let mut buf = Vec::new();
		marshal_response(&mut buf, &response).unwrap();
		let decoded = unmarshal_response(&mut &buf[..]).unwrap();
		assert_eq!(decoded, response);
	}

	#[test]
	fn wrong_type_name_is_rejected() {
		let bogus = typed_map("not.a.request", vec![]);
		let mut buf = Vec::new();
		bogus.write(&mut buf).unwrap();
		let err = unmarshal_request(&mut &buf[..]).unwrap_err();
		assert!(matches!(err, MappingError::WrongTypeName { .. }));
	}

	#[test]
	fn missing_mandatory_field_is_rejected() {
		let bogus = typed_map(TYPE_ATTRIBUTE, vec![("values", list_val(std::iter::empty()))]);
		let err = hessian_to_attribute(&bogus).unwrap_err();
		assert!(matches!(err, MappingError::MissingField("id")));
	}
}
