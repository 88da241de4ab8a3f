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

//! The XACML request/response model and its wire projection onto Hessian.
//!
//! Every entity maps onto a Hessian `Map` tagged with a well-known
//! `org.glite.authz.pep.model.*` class name; see [`mapping`] for the exact
//! field layout of each one.

#![warn(clippy::all)]

mod attribute;
mod error;
mod mapping;
mod request;
mod response;

pub use attribute::{Attribute, DEFAULT_DATATYPE};
pub use error::MappingError;
pub use mapping::{marshal_request, marshal_response, unmarshal_request, unmarshal_response};
pub use request::{Action, Environment, Request, Resource, Subject};
pub use response::{AttributeAssignment, Decision, FulfillOn, Obligation, Response, ResultEntry, Status, StatusCode};
