use std::{
	io,
	sync::atomic::{AtomicUsize, Ordering},
	time::Duration
};

use pep_client::{
	Action, Attribute, Client, ClientOptions, Decision, Environment, FulfillOn, Obligation, ObligationHandler, Pip,
	Request, Resource, Response, ResultEntry, Subject, Transport, TransportResponse
};

fn marshal(response: &Response) -> Vec<u8> {
	let mut raw = Vec::new();
	pep_model::marshal_response(&mut raw, response).unwrap();
	pep_buffer::base64::encode(&raw, pep_buffer::base64::DEFAULT_LINE_LENGTH).into_bytes()
}

fn permit_response() -> Response {
	let mut response = Response::new();
	response.results.push(ResultEntry::new(Decision::Permit));
	response
}

struct FixedTransport {
	status: u16,
	body:   Vec<u8>,
	calls:  AtomicUsize
}

impl FixedTransport {
	fn new(status: u16, body: Vec<u8>) -> Self {
		Self { status, body, calls: AtomicUsize::new(0) }
	}
}

impl Transport for FixedTransport {
	fn send(&self, _url: &str, _timeout: Duration, _body: &[u8]) -> io::Result<TransportResponse> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		Ok(TransportResponse { status: self.status, body: self.body.clone() })
	}
}

/// Answers HTTP 500 for the first URL it sees and HTTP 200 for every other.
struct FirstUrlFailsTransport {
	body:  Vec<u8>,
	calls: std::sync::Arc<AtomicUsize>
}

impl Transport for FirstUrlFailsTransport {
	fn send(&self, url: &str, _timeout: Duration, _body: &[u8]) -> io::Result<TransportResponse> {
		self.calls.fetch_add(1, Ordering::SeqCst);
		let status = if url.ends_with("/a") { 500 } else { 200 };
		Ok(TransportResponse { status, body: self.body.clone() })
	}
}

fn sample_request() -> Request {
	let mut request = Request::new();
	request.add_subject({
		let mut s = Subject::new();
		s.add_attribute(Attribute::new("urn:x:sub").with_value("alice"));
		s
	});
	request.add_resource({
		let mut r = Resource::new();
		r.add_attribute(Attribute::new("urn:x:res").with_value("/a"));
		r
	});
	request
}

#[test]
fn permit_scenario() {
	let mut options = ClientOptions::new();
	options.endpoint_url("http://pdp.example.org/authz");
	let mut client = Client::new(options).unwrap()
		.with_transport(Box::new(FixedTransport::new(200, marshal(&permit_response()))));

	let response = client.authorize(sample_request()).unwrap();
	assert_eq!(response.results[0].decision, Decision::Permit);
}

#[test]
fn failover_scenario_makes_exactly_two_calls_and_takes_the_second_decision() {
	let mut options = ClientOptions::new();
	options.endpoint_url("http://pdp.example.org/a").endpoint_url("http://pdp.example.org/b");

	let calls = std::sync::Arc::new(AtomicUsize::new(0));
	let transport = FirstUrlFailsTransport { body: marshal(&permit_response()), calls: calls.clone() };
	let mut client = Client::new(options).unwrap().with_transport(Box::new(transport));

	let response = client.authorize(sample_request()).unwrap();
	assert_eq!(response.results[0].decision, Decision::Permit);
	assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn all_endpoints_failing_yields_authz_request_error() {
	let mut options = ClientOptions::new();
	options.endpoint_url("http://a.example.org").endpoint_url("http://b.example.org");
	let mut client = Client::new(options).unwrap()
		.with_transport(Box::new(FixedTransport::new(500, Vec::new())));

	let err = client.authorize(sample_request()).unwrap_err();
	assert!(matches!(err, pep_client::PepError::AuthzRequest { urls_tried: 2 }));
}

struct AddEnvironmentAttribute;

impl Pip for AddEnvironmentAttribute {
	fn id(&self) -> &str {
		"test.add-environment-attribute"
	}

	fn process(&mut self, request: &mut Request) -> Result<(), i32> {
		let mut env = Environment::new();
		env.add_attribute(Attribute::new("urn:x:env").with_value("prod"));
		request.environment = Some(env);
		Ok(())
	}
}

struct CapturingTransport {
	status:   u16,
	body:     Vec<u8>,
	captured: std::sync::Arc<std::sync::Mutex<Option<Vec<u8>>>>
}

impl Transport for CapturingTransport {
	fn send(&self, _url: &str, _timeout: Duration, body: &[u8]) -> io::Result<TransportResponse> {
		*self.captured.lock().unwrap() = Some(body.to_vec());
		Ok(TransportResponse { status: self.status, body: self.body.clone() })
	}
}

#[test]
fn pip_chain_mutation_is_visible_in_the_serialized_body() {
	let mut options = ClientOptions::new();
	options.endpoint_url("http://pdp.example.org/authz");

	let mut client = Client::new(options).unwrap();
	client.add_pip(Box::new(AddEnvironmentAttribute)).unwrap();

	let captured = std::sync::Arc::new(std::sync::Mutex::new(None));
	let mut client = client.with_transport(Box::new(CapturingTransport {
		status:   200,
		body:     marshal(&permit_response()),
		captured: captured.clone()
	}));

	client.authorize(sample_request()).unwrap();

	let captured_body = captured.lock().unwrap().take().unwrap();
	let raw = pep_buffer::base64::decode(&captured_body).unwrap();
	let decoded = pep_model::unmarshal_request(&mut &raw[..]).unwrap();
	assert_eq!(decoded.environment.unwrap().attributes[0].id, "urn:x:env");
}

struct StripObligation(&'static str);

impl ObligationHandler for StripObligation {
	fn id(&self) -> &str {
		"test.strip-obligation"
	}

	fn process(&mut self, _request: &Request, response: &mut Response) -> Result<(), i32> {
		for result in &mut response.results {
			result.obligations.retain(|o| o.id != self.0);
		}
		Ok(())
	}
}

#[test]
fn oh_chain_strips_the_configured_obligation() {
	let mut response = Response::new();
	let mut result = ResultEntry::new(Decision::Permit);
	result.obligations.push(Obligation::new("urn:x:drop", FulfillOn::Permit));
	result.obligations.push(Obligation::new("urn:x:keep", FulfillOn::Permit));
	response.results.push(result);

	let mut options = ClientOptions::new();
	options.endpoint_url("http://pdp.example.org/authz");
	let mut client = Client::new(options).unwrap()
		.with_transport(Box::new(FixedTransport::new(200, marshal(&response))));
	client.add_obligation_handler(Box::new(StripObligation("urn:x:drop"))).unwrap();

	let response = client.authorize(sample_request()).unwrap();
	assert_eq!(response.results[0].obligations.len(), 1);
	assert_eq!(response.results[0].obligations[0].id, "urn:x:keep");
}

#[test]
fn codec_round_trip_scenario() {
	let mut request = Request::new();
	for i in 0..3 {
		let mut s = Subject::new();
		for j in 0..3 {
			s.add_attribute(
				Attribute::new(format!("urn:x:sub:{i}:{j}")).with_value("a").with_value("b").with_value("c")
			);
		}
		request.add_subject(s);
	}
	for i in 0..2 {
		let mut r = Resource::new();
		for j in 0..3 {
			r.add_attribute(
				Attribute::new(format!("urn:x:res:{i}:{j}")).with_value("a").with_value("b").with_value("c")
			);
		}
		request.add_resource(r);
	}
	let mut action = Action::new();
	for j in 0..3 {
		action.add_attribute(Attribute::new(format!("urn:x:act:{j}")).with_value("a").with_value("b").with_value("c"));
	}
	request.action = Some(action);

	let mut environment = Environment::new();
	for j in 0..3 {
		environment.add_attribute(Attribute::new(format!("urn:x:env:{j}")).with_value("a").with_value("b").with_value("c"));
	}
	request.environment = Some(environment);

	let mut raw = Vec::new();
	pep_model::marshal_request(&mut raw, &request).unwrap();
	let encoded = pep_buffer::base64::encode(&raw, 64);
	let decoded_raw = pep_buffer::base64::decode(encoded.as_bytes()).unwrap();
	let decoded = pep_model::unmarshal_request(&mut &decoded_raw[..]).unwrap();

	assert_eq!(decoded, request);
}
