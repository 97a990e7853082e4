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

//! Type name oracles
//!
//! Decide which `odata.type` annotation, if any, is written for an entry
//! or a value. An explicit [`SerializationTypeName`] always wins. Beyond
//! that the variants differ in how much the reader is assumed to know:
//!
//! - [`TypeNameOracle::NoMetadata`]: nothing is written.
//! - [`TypeNameOracle::Minimal`]: only what the reader cannot infer from
//!   the schema and the context URI.
//! - [`TypeNameOracle::Full`]: everything that is not implied by the JSON
//!   token itself.
//!
//! [`SerializationTypeName`]: crate::value::SerializationTypeName

use crate::edm::EdmTypeRef;
use crate::value::ODataEntry;
use crate::value::ODataValue;
use crate::value::SerializationTypeName;

/// Type name oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeNameOracle {
    NoMetadata,
    Minimal,
    Full,
}

fn annotated(annotation: Option<&SerializationTypeName>) -> Option<Option<String>> {
    annotation.map(|v| v.type_name().map(String::from))
}

impl TypeNameOracle {
    /// Type name to write for an entry whose statically known type is
    /// `expected_type_name`.
    #[must_use]
    pub fn type_name_for_entry(
        self,
        expected_type_name: Option<&str>,
        entry: &ODataEntry,
    ) -> Option<String> {
        if let Some(type_name) = annotated(entry.serialization_type_name.as_ref()) {
            return type_name;
        }
        match self {
            Self::NoMetadata => None,
            Self::Minimal => entry
                .type_name
                .clone()
                .filter(|name| expected_type_name != Some(name.as_str())),
            Self::Full => entry.type_name.clone(),
        }
    }

    /// Type name to write for a value.
    ///
    /// `metadata_type` is the type declared in the schema for the
    /// property, `value_type` the type resolved for the runtime value.
    #[must_use]
    pub fn type_name_for_value(
        self,
        value: &ODataValue,
        metadata_type: Option<&EdmTypeRef>,
        value_type: Option<&EdmTypeRef>,
        is_open_property: bool,
    ) -> Option<String> {
        if let Some(type_name) = annotated(value.serialization_type_name()) {
            return type_name;
        }
        match self {
            Self::NoMetadata => None,
            Self::Minimal => minimal_value_type_name(value, metadata_type, value_type, is_open_property),
            Self::Full => match value_type {
                Some(value_type) if matches_json_type(value, value_type) => None,
                Some(value_type) => Some(value_type.full_name()),
                None => value.type_name_from_value(),
            },
        }
    }
}

fn minimal_value_type_name(
    value: &ODataValue,
    metadata_type: Option<&EdmTypeRef>,
    value_type: Option<&EdmTypeRef>,
    is_open_property: bool,
) -> Option<String> {
    if let Some(value_type) = value_type {
        let value_type_name = value_type.full_name();
        if metadata_type.map_or(false, |t| t.full_name() != value_type_name) {
            return Some(value_type_name);
        }
        if metadata_type.is_none() && is_derived_complex(value_type) {
            return Some(value_type_name);
        }
        if matches_json_type(value, value_type) {
            return None;
        }
    }
    if is_open_property {
        value.type_name_from_value()
    } else {
        None
    }
}

fn is_derived_complex(t: &EdmTypeRef) -> bool {
    matches!(t, EdmTypeRef::Complex(complex) if complex.base_type.is_some())
}

fn matches_json_type(value: &ODataValue, value_type: &EdmTypeRef) -> bool {
    match (value, value_type) {
        (ODataValue::Primitive(v), EdmTypeRef::Primitive(kind)) => {
            v.kind() == *kind && v.matches_json_type()
        }
        _ => false,
    }
}
