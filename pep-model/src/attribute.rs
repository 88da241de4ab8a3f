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

/// The default data type XACML assigns an attribute when none is given.
pub const DEFAULT_DATATYPE: &str = "http://www.w3.org/2001/XMLSchema#string";

/// A single (id, type, issuer, values) attribute, the leaf of the XACML
/// model. Shared by Subject, Resource, Action and Environment.
#[derive(Clone, Debug, PartialEq)]
pub struct Attribute {
	pub id:        String,
	pub data_type: Option<String>,
	pub issuer:    Option<String>,
	pub values:    Vec<String>
}

impl Attribute {
	pub fn new(id: impl Into<String>) -> Self {
		Self { id: id.into(), data_type: None, issuer: None, values: Vec::new() }
	}

	/// The data type as it should be read back: the caller-supplied type,
	/// or XACML's default string type when none was set.
	pub fn data_type_or_default(&self) -> &str {
		self.data_type.as_deref().unwrap_or(DEFAULT_DATATYPE)
	}

	pub fn with_data_type(mut self, data_type: impl Into<String>) -> Self {
		self.data_type = Some(data_type.into());
		self
	}

	pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
		self.issuer = Some(issuer.into());
		self
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
	fn default_data_type_is_xacml_string() {
		let attr = Attribute::new("urn:x:sub");
		assert_eq!(attr.data_type_or_default(), DEFAULT_DATATYPE);
	}

	#[test]
	fn explicit_data_type_overrides_default() {
		let attr = Attribute::new("urn:x:sub").with_data_type("http://www.w3.org/2001/XMLSchema#integer");
		assert_eq!(attr.data_type_or_default(), "http://www.w3.org/2001/XMLSchema#integer");
	}

	#[test]
	fn values_preserve_insertion_order() {
		let attr = Attribute::new("urn:x:sub").with_value("a").with_value("b").with_value("c");
		assert_eq!(attr.values, vec!["a", "b", "c"]);
	}
}
