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

//! Values written to JSON light payloads
//!
//! Only what type name computation needs is modelled: the runtime shape of
//! a value, the type name it carries and the author's explicit
//! `odata.type` override ([`SerializationTypeName`]).
//!
//! JSON has native representations for booleans, strings and numbers.
//! `Edm.Boolean`, `Edm.Int32`, `Edm.String` and finite `Edm.Double` values
//! are read back as the right type without annotation. Everything else
//! needs its type name when the reader cannot get it from the schema.
//!
//! ```rust
//! use odata_jsonlight_core::json::JsonPrimitive;
//! use odata_jsonlight_core::value::PrimitiveValue;
//!
//! assert!(PrimitiveValue::Int32(7).matches_json_type());
//! assert!(!PrimitiveValue::Int64(7).matches_json_type());
//! assert_eq!(
//!     PrimitiveValue::Int64(7).to_json_primitive().unwrap(),
//!     JsonPrimitive::str("7")
//! );
//! ```

use crate::edm::PrimitiveKind;
use crate::json::JsonPrimitive;
use rust_decimal::Decimal;
use std::borrow::Cow;
use std::fmt::Display;
use std::fmt::Error as FmtError;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;
use time::error::Format as FormatError;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use time::UtcOffset;
use uuid::Uuid;

/// `Edm.DateTimeOffset` value. Written as RFC 3339 text.
///
/// RFC 3339 offsets have no seconds part. Values with such an offset are
/// kept as the same instant in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdmDateTimeOffset(OffsetDateTime);

impl EdmDateTimeOffset {
    /// RFC 3339 text.
    ///
    /// # Errors
    ///
    /// Year is outside of `0000..=9999`.
    pub fn to_rfc3339(&self) -> Result<String, FormatError> {
        self.0.format(&Rfc3339)
    }
}

impl From<OffsetDateTime> for EdmDateTimeOffset {
    fn from(v: OffsetDateTime) -> Self {
        if v.offset().seconds_past_minute() == 0 {
            Self(v)
        } else {
            Self(v.to_offset(UtcOffset::UTC))
        }
    }
}

impl FromStr for EdmDateTimeOffset {
    type Err = time::error::Parse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s, &Rfc3339).map(Self)
    }
}

impl Display for EdmDateTimeOffset {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let s = self.to_rfc3339().map_err(|_| FmtError)?;
        f.write_str(&s)
    }
}

/// Primitive value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrimitiveValue {
    Boolean(bool),
    Byte(u8),
    SByte(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Single(f32),
    Double(f64),
    Decimal(Decimal),
    String(String),
    Guid(Uuid),
    DateTimeOffset(EdmDateTimeOffset),
}

const INFINITY: &str = "INF";
const NEGATIVE_INFINITY: &str = "-INF";
const NAN: &str = "NaN";

fn non_finite_literal(v: f64) -> &'static str {
    if v.is_nan() {
        NAN
    } else if v.is_sign_negative() {
        NEGATIVE_INFINITY
    } else {
        INFINITY
    }
}

impl PrimitiveValue {
    /// `Edm` type of the value.
    #[must_use]
    pub const fn kind(&self) -> PrimitiveKind {
        match self {
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Byte(_) => PrimitiveKind::Byte,
            Self::SByte(_) => PrimitiveKind::SByte,
            Self::Int16(_) => PrimitiveKind::Int16,
            Self::Int32(_) => PrimitiveKind::Int32,
            Self::Int64(_) => PrimitiveKind::Int64,
            Self::Single(_) => PrimitiveKind::Single,
            Self::Double(_) => PrimitiveKind::Double,
            Self::Decimal(_) => PrimitiveKind::Decimal,
            Self::String(_) => PrimitiveKind::String,
            Self::Guid(_) => PrimitiveKind::Guid,
            Self::DateTimeOffset(_) => PrimitiveKind::DateTimeOffset,
        }
    }

    /// The JSON token of the value is read back as this value's type
    /// without any annotation.
    #[must_use]
    pub fn matches_json_type(&self) -> bool {
        match self {
            Self::Boolean(_) | Self::Int32(_) | Self::String(_) => true,
            Self::Double(v) => v.is_finite(),
            _ => false,
        }
    }

    /// JSON token of the value.
    ///
    /// # Errors
    ///
    /// `DateTimeOffset` value that has no RFC 3339 text.
    pub fn to_json_primitive(&self) -> Result<JsonPrimitive<'_>, FormatError> {
        let token = match self {
            Self::Boolean(v) => JsonPrimitive::Boolean(*v),
            Self::Byte(v) => JsonPrimitive::Integer((*v).into()),
            Self::SByte(v) => JsonPrimitive::Integer((*v).into()),
            Self::Int16(v) => JsonPrimitive::Integer((*v).into()),
            Self::Int32(v) => JsonPrimitive::Integer((*v).into()),
            Self::Int64(v) => JsonPrimitive::String(Cow::Owned(v.to_string())),
            Self::Single(v) => Self::float(f64::from(*v)),
            Self::Double(v) => Self::float(*v),
            Self::Decimal(v) => JsonPrimitive::String(Cow::Owned(v.to_string())),
            Self::String(v) => JsonPrimitive::str(v),
            Self::Guid(v) => JsonPrimitive::String(Cow::Owned(v.hyphenated().to_string())),
            Self::DateTimeOffset(v) => JsonPrimitive::String(Cow::Owned(v.to_rfc3339()?)),
        };
        Ok(token)
    }

    fn float(v: f64) -> JsonPrimitive<'static> {
        if v.is_finite() {
            JsonPrimitive::Number(v)
        } else {
            JsonPrimitive::str(non_finite_literal(v))
        }
    }
}

/// Explicit type name chosen by the author of a value.
///
/// `SerializationTypeName(None)` suppresses the type name even where one
/// would be computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerializationTypeName(pub Option<String>);

impl SerializationTypeName {
    /// Annotation that writes `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self(Some(type_name.into()))
    }

    /// Annotation that writes no type name.
    #[must_use]
    pub const fn none() -> Self {
        Self(None)
    }

    /// Type name to write.
    #[must_use]
    pub fn type_name(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

/// Complex value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComplexValue {
    /// Full name of the complex type.
    pub type_name: Option<String>,
    /// Author override of the written type name.
    pub serialization_type_name: Option<SerializationTypeName>,
    /// Property values in write order.
    pub properties: Vec<(String, ODataValue)>,
}

impl ComplexValue {
    /// Complex value of the named type without properties.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            ..Self::default()
        }
    }

    /// Add property value.
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: ODataValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }
}

/// Collection value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollectionValue {
    /// Full name of the collection type (`Collection(...)`).
    pub type_name: Option<String>,
    /// Author override of the written type name.
    pub serialization_type_name: Option<SerializationTypeName>,
    /// Items.
    pub items: Vec<ODataValue>,
}

impl CollectionValue {
    /// Collection of the named type with the items.
    pub fn new(type_name: impl Into<String>, items: Vec<ODataValue>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            serialization_type_name: None,
            items,
        }
    }
}

/// Value of a property or a top-level value payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ODataValue {
    Null,
    Primitive(PrimitiveValue),
    Complex(ComplexValue),
    Collection(CollectionValue),
}

impl ODataValue {
    /// Author override of the type name, if any.
    #[must_use]
    pub const fn serialization_type_name(&self) -> Option<&SerializationTypeName> {
        match self {
            Self::Complex(v) => v.serialization_type_name.as_ref(),
            Self::Collection(v) => v.serialization_type_name.as_ref(),
            Self::Null | Self::Primitive(_) => None,
        }
    }

    /// Type name derived from the runtime value alone.
    #[must_use]
    pub fn type_name_from_value(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Primitive(v) => Some(v.kind().full_name().into()),
            Self::Complex(v) => v.type_name.clone(),
            Self::Collection(v) => v.type_name.clone(),
        }
    }

    /// Attach author override of the type name to complex and collection
    /// values. Other values are returned unchanged.
    #[must_use]
    pub fn with_serialization_type_name(mut self, annotation: SerializationTypeName) -> Self {
        match &mut self {
            Self::Complex(v) => v.serialization_type_name = Some(annotation),
            Self::Collection(v) => v.serialization_type_name = Some(annotation),
            Self::Null | Self::Primitive(_) => {}
        }
        self
    }
}

impl From<PrimitiveValue> for ODataValue {
    fn from(v: PrimitiveValue) -> Self {
        Self::Primitive(v)
    }
}

impl From<ComplexValue> for ODataValue {
    fn from(v: ComplexValue) -> Self {
        Self::Complex(v)
    }
}

impl From<CollectionValue> for ODataValue {
    fn from(v: CollectionValue) -> Self {
        Self::Collection(v)
    }
}

/// Entry being written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ODataEntry {
    /// Full name of the entity type of the entry.
    pub type_name: Option<String>,
    /// Author override of the written type name.
    pub serialization_type_name: Option<SerializationTypeName>,
}

impl ODataEntry {
    /// Entry of the named entity type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            serialization_type_name: None,
        }
    }

    /// Attach author override of the type name.
    #[must_use]
    pub fn with_serialization_type_name(mut self, annotation: SerializationTypeName) -> Self {
        self.serialization_type_name = Some(annotation);
        self
    }
}
