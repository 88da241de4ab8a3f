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

use std::io::{Read, Write};

use crate::error::CodecError;
use crate::tag;

/// A Hessian 1.0 value. Mirrors the wire grammar directly: each variant
/// knows how to write its own tag plus payload, and the free function
/// [`read_value`] dispatches on the tag byte to build one back.
#[derive(Clone, Debug, PartialEq)]
pub enum HessianValue {
	Boolean(bool),
	Integer(i32),
	Long(i64),
	Double(f64),
	Date(i64),
	Null,
	Binary(Vec<u8>),
	String(String),
	/// A back-reference to the n-th composite (List or Map) previously read
	/// in this document. Only ever produced by [`read_value`]; nothing in
	/// this codec emits Refs on write (see crate docs).
	Ref(i32),
	List(HessianList),
	Map(HessianMap),
	Remote(HessianRemote)
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct HessianList {
	pub type_name:    Option<String>,
	pub length_hint:  Option<i32>,
	pub elements:     Vec<HessianValue>
}

#[derive(Clone, Debug, PartialEq, Default)]
pub struct HessianMap {
	pub type_name: Option<String>,
	pub entries:   Vec<(HessianValue, HessianValue)>
}

#[derive(Clone, Debug, PartialEq)]
pub struct HessianRemote {
	pub type_name: String,
	pub url:       String
}

/// The per-document table of composites seen so far, in read order, so a
/// `Ref` tag can resolve to an earlier List or Map. Only List and Map are
/// ever entered into it (see DESIGN.md).
pub type RefTable = Vec<HessianValue>;

impl HessianValue {
	pub fn write(&self, w: &mut impl Write) -> Result<(), CodecError> {
		match self {
			HessianValue::Boolean(true)  => write_u8(w, tag::TRUE),
			HessianValue::Boolean(false) => write_u8(w, tag::FALSE),
			HessianValue::Integer(v) => { write_u8(w, tag::INTEGER)?; write_i32_body(w, *v) }
			HessianValue::Long(v)    => { write_u8(w, tag::LONG)?; write_i64_body(w, *v) }
			HessianValue::Double(v)  => { write_u8(w, tag::DOUBLE)?; write_i64_body(w, v.to_bits() as i64) }
			HessianValue::Date(v)    => { write_u8(w, tag::DATE)?; write_i64_body(w, *v) }
			HessianValue::Null       => write_u8(w, tag::NULL),
			HessianValue::Binary(b)  => { write_u8(w, tag::BINARY)?; write_binary_body(w, b) }
			HessianValue::String(s)  => { write_u8(w, tag::STRING)?; write_string_body(w, s) }
			HessianValue::Ref(idx)   => { write_u8(w, tag::REF)?; write_i32_body(w, *idx) }
			HessianValue::List(list) => write_list(w, list),
			HessianValue::Map(map)   => write_map(w, map),
			HessianValue::Remote(r)  => write_remote(w, r)
		}
	}
}

fn write_list(w: &mut impl Write, list: &HessianList) -> Result<(), CodecError> {
	write_u8(w, tag::LIST)?;
	if let Some(type_name) = &list.type_name {
		write_u8(w, tag::TYPE)?;
		write_string_body(w, type_name)?;
	}
	if let Some(hint) = list.length_hint {
		write_u8(w, tag::LENGTH)?;
		write_i32_body(w, hint)?;
	}
	for element in &list.elements {
		element.write(w)?;
	}
	write_u8(w, tag::END)
}

fn write_map(w: &mut impl Write, map: &HessianMap) -> Result<(), CodecError> {
	write_u8(w, tag::MAP)?;
	if let Some(type_name) = &map.type_name {
		write_u8(w, tag::TYPE)?;
		write_string_body(w, type_name)?;
	}
	for (key, value) in &map.entries {
		key.write(w)?;
		value.write(w)?;
	}
	write_u8(w, tag::END)
}

fn write_remote(w: &mut impl Write, remote: &HessianRemote) -> Result<(), CodecError> {
	write_u8(w, tag::REMOTE)?;
	write_u8(w, tag::TYPE)?;
	write_string_body(w, &remote.type_name)?;
	write_u8(w, tag::STRING)?;
	write_string_body(w, &remote.url)
}

/// Reads one tagged value, consulting/populating `refs` for composites and
/// `Ref` resolution.
pub fn read_value(r: &mut impl Read, refs: &mut RefTable) -> Result<HessianValue, CodecError> {
	let tag = read_u8(r)?;
	read_value_with_tag(tag, r, refs)
}

fn read_value_with_tag(tag: u8, r: &mut impl Read, refs: &mut RefTable) -> Result<HessianValue, CodecError> {
	match tag {
		self::tag::TRUE    => Ok(HessianValue::Boolean(true)),
		self::tag::FALSE   => Ok(HessianValue::Boolean(false)),
		self::tag::INTEGER => Ok(HessianValue::Integer(read_i32_body(r)?)),
		self::tag::LONG    => Ok(HessianValue::Long(read_i64_body(r)?)),
		self::tag::DOUBLE  => Ok(HessianValue::Double(f64::from_bits(read_i64_body(r)? as u64))),
		self::tag::DATE    => Ok(HessianValue::Date(read_i64_body(r)?)),
		self::tag::NULL    => Ok(HessianValue::Null),
		self::tag::BINARY  => Ok(HessianValue::Binary(read_binary_body(r)?)),
		self::tag::STRING  => Ok(HessianValue::String(read_string_body(r)?)),
		self::tag::REF => {
			let idx = read_i32_body(r)?;
			refs.get(idx as usize).cloned().ok_or(CodecError::DanglingRef(idx))
		}
		self::tag::LIST   => read_list_body(r, refs),
		self::tag::MAP    => read_map_body(r, refs),
		self::tag::REMOTE => read_remote_body(r),
		other => Err(CodecError::UnknownTag(other))
	}
}

fn read_list_body(r: &mut impl Read, refs: &mut RefTable) -> Result<HessianValue, CodecError> {
	let mut next = read_u8(r)?;

	let type_name = if next == tag::TYPE {
		let s = read_string_body(r)?;
		next = read_u8(r)?;
		Some(s)
	} else {
		None
	};

	let length_hint = if next == tag::LENGTH {
		let l = read_i32_body(r)?;
		next = read_u8(r)?;
		Some(l)
	} else {
		None
	};

	let mut elements = Vec::new();
	while next != tag::END {
		elements.push(read_value_with_tag(next, r, refs)?);
		next = read_u8(r)?;
	}

	let value = HessianValue::List(HessianList { type_name, length_hint, elements });
	refs.push(value.clone());
	Ok(value)
}

fn read_map_body(r: &mut impl Read, refs: &mut RefTable) -> Result<HessianValue, CodecError> {
	let mut next = read_u8(r)?;

	let type_name = if next == tag::TYPE {
		let s = read_string_body(r)?;
		next = read_u8(r)?;
		Some(s)
	} else {
		None
	};

	let mut entries = Vec::new();
	while next != tag::END {
		let key = read_value_with_tag(next, r, refs)?;
		let value = read_value(r, refs)?;
		entries.push((key, value));
		next = read_u8(r)?;
	}

	let value = HessianValue::Map(HessianMap { type_name, entries });
	refs.push(value.clone());
	Ok(value)
}

fn read_remote_body(r: &mut impl Read) -> Result<HessianValue, CodecError> {
	let t = read_u8(r)?;
	if t != tag::TYPE {
		return Err(CodecError::UnexpectedTag { expected: "'t'", found: t });
	}
	let type_name = read_string_body(r)?;

	let s = read_u8(r)?;
	if s != tag::STRING {
		return Err(CodecError::UnexpectedTag { expected: "'S'", found: s });
	}
	let url = read_string_body(r)?;

	Ok(HessianValue::Remote(HessianRemote { type_name, url }))
}

fn write_u8(w: &mut impl Write, b: u8) -> Result<(), CodecError> {
	w.write_all(&[b]).map_err(CodecError::from)
}

fn read_u8(r: &mut impl Read) -> Result<u8, CodecError> {
	let mut b = [0u8; 1];
	match r.read(&mut b)? {
		1 => Ok(b[0]),
		_ => Err(CodecError::Eof("tag"))
	}
}

fn write_i32_body(w: &mut impl Write, v: i32) -> Result<(), CodecError> {
	w.write_all(&v.to_be_bytes()).map_err(CodecError::from)
}

fn read_i32_body(r: &mut impl Read) -> Result<i32, CodecError> {
	let mut b = [0u8; 4];
	r.read_exact(&mut b).map_err(|_| CodecError::Eof("32-bit integer"))?;
	Ok(i32::from_be_bytes(b))
}

fn write_i64_body(w: &mut impl Write, v: i64) -> Result<(), CodecError> {
	w.write_all(&v.to_be_bytes()).map_err(CodecError::from)
}

fn read_i64_body(r: &mut impl Read) -> Result<i64, CodecError> {
	let mut b = [0u8; 8];
	r.read_exact(&mut b).map_err(|_| CodecError::Eof("64-bit integer"))?;
	Ok(i64::from_be_bytes(b))
}

fn write_binary_body(w: &mut impl Write, data: &[u8]) -> Result<(), CodecError> {
	let len: u16 = data.len().try_into().map_err(|_| CodecError::ChunkTooLong("binary chunk"))?;
	w.write_all(&len.to_be_bytes())?;
	w.write_all(data).map_err(CodecError::from)
}

fn read_binary_body(r: &mut impl Read) -> Result<Vec<u8>, CodecError> {
	let mut len_bytes = [0u8; 2];
	r.read_exact(&mut len_bytes).map_err(|_| CodecError::Eof("binary length"))?;
	let len = u16::from_be_bytes(len_bytes) as usize;
	let mut data = vec![0u8; len];
	r.read_exact(&mut data).map_err(|_| CodecError::Eof("binary payload"))?;
	Ok(data)
}

fn write_string_body(w: &mut impl Write, s: &str) -> Result<(), CodecError> {
	let char_count: u16 = pep_buffer::utf8::char_count(s)
		.try_into()
		.map_err(|_| CodecError::ChunkTooLong("string chunk"))?;
	w.write_all(&char_count.to_be_bytes())?;
	w.write_all(s.as_bytes()).map_err(CodecError::from)
}

fn read_string_body(r: &mut impl Read) -> Result<String, CodecError> {
	let mut len_bytes = [0u8; 2];
	r.read_exact(&mut len_bytes).map_err(|_| CodecError::Eof("string length"))?;
	let char_count = u16::from_be_bytes(len_bytes) as usize;

	let mut bytes = Vec::with_capacity(char_count);
	for _ in 0..char_count {
		let lead = read_u8(r)?;
		let extra = match lead {
			0x00..=0x7f => 0,
			0xc0..=0xdf => 1,
			0xe0..=0xef => 2,
			0xf0..=0xf7 => 3,
			_ => return Err(CodecError::InvalidUtf8)
		};
		bytes.push(lead);
		for _ in 0..extra {
			bytes.push(read_u8(r)?);
		}
	}

	String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
}

#[cfg(test)]
mod test {
	use super::*;

	fn roundtrip(value: HessianValue) -> HessianValue {
		let mut buf = Vec::new();
		value.write(&mut buf).unwrap();
		let mut refs = RefTable::new();
		let decoded = read_value(&mut &buf[..], &mut refs).unwrap();
		assert!(refs.is_empty() || matches!(value, HessianValue::List(_) | HessianValue::Map(_)));
		decoded
	}

	#[test]
	fn booleans_roundtrip() {
		assert_eq!(roundtrip(HessianValue::Boolean(true)), HessianValue::Boolean(true));
		assert_eq!(roundtrip(HessianValue::Boolean(false)), HessianValue::Boolean(false));
	}

	#[test]
	fn integer_extremes_roundtrip() {
		assert_eq!(roundtrip(HessianValue::Integer(i32::MIN)), HessianValue::Integer(i32::MIN));
		assert_eq!(roundtrip(HessianValue::Integer(i32::MAX)), HessianValue::Integer(i32::MAX));
	}

	#[test]
	fn long_double_date_null_roundtrip() {
		assert_eq!(roundtrip(HessianValue::Long(-1)), HessianValue::Long(-1));
		assert_eq!(roundtrip(HessianValue::Double(3.5)), HessianValue::Double(3.5));
		assert_eq!(roundtrip(HessianValue::Date(1_700_000_000_000)), HessianValue::Date(1_700_000_000_000));
		assert_eq!(roundtrip(HessianValue::Null), HessianValue::Null);
	}

	#[test]
	fn binary_roundtrips() {
		let v = HessianValue::Binary(vec![1, 2, 3, 4, 5]);
		assert_eq!(roundtrip(v.clone()), v);
	}

	#[test]
	fn string_with_multibyte_chars_roundtrips() {
		let v = HessianValue::String("héllo 世界 \u{1F600}".to_string());
		assert_eq!(roundtrip(v.clone()), v);
	}

	#[test]
	fn list_roundtrips_with_type_and_length_hint() {
		let list = HessianList {
			type_name:   Some("[string".to_string()),
			length_hint: Some(2),
			elements:    vec![HessianValue::String("a".into()), HessianValue::String("b".into())]
		};
		assert_eq!(roundtrip(HessianValue::List(list.clone())), HessianValue::List(list));
	}

	#[test]
	fn map_roundtrips_with_type() {
		let map = HessianMap {
			type_name: Some("org.glite.authz.pep.model.Request".to_string()),
			entries:   vec![(HessianValue::String("id".into()), HessianValue::String("urn:x:sub".into()))]
		};
		assert_eq!(roundtrip(HessianValue::Map(map.clone())), HessianValue::Map(map));
	}

	#[test]
	fn remote_roundtrips() {
		let remote = HessianRemote { type_name: "auth".to_string(), url: "http://pdp".to_string() };
		assert_eq!(roundtrip(HessianValue::Remote(remote.clone())), HessianValue::Remote(remote));
	}

	#[test]
	fn ref_resolves_to_earlier_list() {
		let mut buf = Vec::new();
		let inner = HessianValue::List(HessianList { type_name: None, length_hint: None, elements: vec![] });
		inner.write(&mut buf).unwrap();
		HessianValue::Ref(0).write(&mut buf).unwrap();

		let mut stream = &buf[..];
		let mut refs = RefTable::new();
		let first = read_value(&mut stream, &mut refs).unwrap();
		let second = read_value(&mut stream, &mut refs).unwrap();
		assert_eq!(first, inner);
		assert_eq!(second, inner);
	}

	#[test]
	fn unknown_tag_is_rejected() {
		let mut stream: &[u8] = &[0xffu8];
		let mut refs = RefTable::new();
		assert!(matches!(read_value(&mut stream, &mut refs), Err(CodecError::UnknownTag(0xff))));
	}

	proptest::proptest! {
		#[test]
		fn integer_roundtrip_any_value(v: i32) {
			proptest::prop_assert_eq!(roundtrip(HessianValue::Integer(v)), HessianValue::Integer(v));
		}

		#[test]
		fn string_roundtrip_any_value(s in "\\PC*") {
			proptest::prop_assert_eq!(roundtrip(HessianValue::String(s.clone())), HessianValue::String(s));
		}
	}
}
