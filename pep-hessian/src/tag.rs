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

//! The Hessian 1.0 wire tags this codec understands. One byte each, read as
//! the first byte of every value on the wire.

pub const TRUE:    u8 = b'T';
pub const FALSE:   u8 = b'F';
pub const INTEGER: u8 = b'I';
pub const LONG:    u8 = b'L';
pub const DOUBLE:  u8 = b'D';
pub const DATE:    u8 = b'd';
pub const NULL:    u8 = b'N';
pub const BINARY:  u8 = b'B';
pub const STRING:  u8 = b'S';
pub const REF:     u8 = b'R';
pub const LIST:    u8 = b'V';
pub const MAP:     u8 = b'M';
pub const REMOTE:  u8 = b'r';
pub const TYPE:    u8 = b't';
pub const LENGTH:  u8 = b'l';
pub const END:     u8 = b'z';
