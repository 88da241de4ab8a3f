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

use crate::attribute::Attribute;

/// An authorization request: sets of Subjects and Resources, at most one
/// Action, at most one Environment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Request {
	pub subjects:    Vec<Subject>,
	pub resources:   Vec<Resource>,
	pub action:      Option<Action>,
	pub environment: Option<Environment>
}

impl Request {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_subject(&mut self, subject: Subject) -> &mut Self {
		self.subjects.push(subject);
		self
	}

	pub fn add_resource(&mut self, resource: Resource) -> &mut Self {
		self.resources.push(resource);
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Subject {
	pub category:   Option<String>,
	pub attributes: Vec<Attribute>
}

impl Subject {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_attribute(&mut self, attribute: Attribute) -> &mut Self {
		self.attributes.push(attribute);
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resource {
	pub category:   Option<String>,
	pub attributes: Vec<Attribute>,
	pub content:    Option<String>
}

impl Resource {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_attribute(&mut self, attribute: Attribute) -> &mut Self {
		self.attributes.push(attribute);
		self
	}

	pub fn with_content(mut self, content: impl Into<String>) -> Self {
		self.content = Some(content.into());
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Action {
	pub category:   Option<String>,
	pub attributes: Vec<Attribute>
}

impl Action {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_attribute(&mut self, attribute: Attribute) -> &mut Self {
		self.attributes.push(attribute);
		self
	}
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Environment {
	pub category:   Option<String>,
	pub attributes: Vec<Attribute>
}

impl Environment {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_attribute(&mut self, attribute: Attribute) -> &mut Self {
		self.attributes.push(attribute);
		self
	}
}
