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

//! A Policy Enforcement Point client: runs a request through a PIP chain,
//! marshals it to Hessian, Base64-wraps it, sends it to a Policy Decision
//! Point with failover across a configured list of endpoints, and runs the
//! resulting response through an Obligation Handler chain.

#![warn(clippy::all)]

mod client;
mod error;
mod options;
mod pip;
mod transport;

pub use client::Client;
pub use error::PepError;
pub use options::ClientOptions;
pub use pip::{ObligationHandler, Pip};
pub use transport::{BlockingHttpTransport, Transport, TransportResponse};

pub use pep_model::{
	Action, Attribute, AttributeAssignment, Decision, Environment, FulfillOn, Obligation, Request, Resource,
	Response, ResultEntry, Status, StatusCode, Subject
};
