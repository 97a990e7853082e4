// SPDX-FileCopyrightText: Copyright (c) 2025 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! JSON writer collaborator
//!
//! Payload serializers in this crate do not produce text themselves. They
//! drive a [`JsonWriter`] token by token, the writer owns the output and
//! decides about formatting and escaping.

use serde_json::Value as JsonValue;
use std::borrow::Cow;

/// Primitive JSON token.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonPrimitive<'a> {
    Null,
    Boolean(bool),
    Integer(i64),
    /// Always finite. Non-finite numbers are written as strings.
    Number(f64),
    String(Cow<'a, str>),
}

impl<'a> JsonPrimitive<'a> {
    /// String token borrowed from `value`.
    #[must_use]
    pub const fn str(value: &'a str) -> Self {
        Self::String(Cow::Borrowed(value))
    }
}

impl From<JsonPrimitive<'_>> for JsonValue {
    fn from(v: JsonPrimitive<'_>) -> Self {
        match v {
            JsonPrimitive::Null => Self::Null,
            JsonPrimitive::Boolean(v) => Self::Bool(v),
            JsonPrimitive::Integer(v) => Self::from(v),
            JsonPrimitive::Number(v) => Self::from(v),
            JsonPrimitive::String(v) => Self::String(v.into_owned()),
        }
    }
}

/// Streaming JSON writer.
///
/// Calls are made in document order. Every `write_name` inside an object
/// is followed by exactly one value (primitive, object or array).
pub trait JsonWriter {
    /// Error returned by the writer. Passed through serializers unchanged.
    type Error;

    /// Write `{`.
    ///
    /// # Errors
    ///
    /// Writer-specific.
    fn start_object(&mut self) -> Result<(), Self::Error>;

    /// Write `}`.
    ///
    /// # Errors
    ///
    /// Writer-specific.
    fn end_object(&mut self) -> Result<(), Self::Error>;

    /// Write `[`.
    ///
    /// # Errors
    ///
    /// Writer-specific.
    fn start_array(&mut self) -> Result<(), Self::Error>;

    /// Write `]`.
    ///
    /// # Errors
    ///
    /// Writer-specific.
    fn end_array(&mut self) -> Result<(), Self::Error>;

    /// Write property name of the next value.
    ///
    /// # Errors
    ///
    /// Writer-specific.
    fn write_name(&mut self, name: &str) -> Result<(), Self::Error>;

    /// Write primitive value.
    ///
    /// # Errors
    ///
    /// Writer-specific.
    fn write_value(&mut self, value: JsonPrimitive<'_>) -> Result<(), Self::Error>;
}
