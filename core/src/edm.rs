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

//! EDM references and schema oracle
//!
//! The schema model itself is not part of this crate. Context URI parsing
//! and type name computation only need a handful of facts about it, which
//! are exchanged as small owned reference values:
//!
//! - [`EdmTypeRef`]: primitive, complex, entity or collection type.
//! - [`EntitySetRef`]: entity set together with its container and element type.
//! - [`NavigationPropertyRef`]: navigation property with its target type.
//!
//! A schema implementation exposes these through the [`SchemaOracle`]
//! trait. The oracle is read-only: it may be shared between concurrent
//! parses as long as the underlying schema does not change.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;

/// Prefix of collection type names.
pub const COLLECTION_PREFIX: &str = "Collection(";
/// Suffix of collection type names.
pub const COLLECTION_SUFFIX: &str = ")";

/// Name errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    InvalidQualifiedName(String),
    UnknownPrimitiveType(String),
}

impl Display for NameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidQualifiedName(v) => write!(f, "invalid qualified name {v}"),
            Self::UnknownPrimitiveType(v) => write!(f, "unknown primitive type {v}"),
        }
    }
}

impl std::error::Error for NameError {}

/// Namespace qualified name of a schema element (`Namespace.Name`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QualifiedName {
    namespace: String,
    name: String,
}

impl QualifiedName {
    /// Create qualified name from namespace and simple name.
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Namespace part (may contain dots).
    #[must_use]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Simple name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

fn is_simple_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    chars
        .next()
        .is_some_and(|first| first.is_alphabetic() || first == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl FromStr for QualifiedName {
    type Err = NameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (namespace, name) = s
            .rsplit_once('.')
            .ok_or_else(|| NameError::InvalidQualifiedName(s.into()))?;
        if namespace.split('.').all(is_simple_identifier) && is_simple_identifier(name) {
            Ok(Self::new(namespace, name))
        } else {
            Err(NameError::InvalidQualifiedName(s.into()))
        }
    }
}

impl Display for QualifiedName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Returns the item type name if `name` has the form `Collection(item)`.
#[must_use]
pub fn collection_item_type_name(name: &str) -> Option<&str> {
    name.strip_prefix(COLLECTION_PREFIX)
        .and_then(|v| v.strip_suffix(COLLECTION_SUFFIX))
}

/// `Edm` primitive types supported by JSON light values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    SByte,
    Int16,
    Int32,
    Int64,
    Single,
    Double,
    Decimal,
    String,
    Guid,
    DateTimeOffset,
}

impl PrimitiveKind {
    const ALL: [Self; 12] = [
        Self::Boolean,
        Self::Byte,
        Self::SByte,
        Self::Int16,
        Self::Int32,
        Self::Int64,
        Self::Single,
        Self::Double,
        Self::Decimal,
        Self::String,
        Self::Guid,
        Self::DateTimeOffset,
    ];

    /// Full name of the type in the `Edm` namespace.
    #[must_use]
    pub const fn full_name(self) -> &'static str {
        match self {
            Self::Boolean => "Edm.Boolean",
            Self::Byte => "Edm.Byte",
            Self::SByte => "Edm.SByte",
            Self::Int16 => "Edm.Int16",
            Self::Int32 => "Edm.Int32",
            Self::Int64 => "Edm.Int64",
            Self::Single => "Edm.Single",
            Self::Double => "Edm.Double",
            Self::Decimal => "Edm.Decimal",
            Self::String => "Edm.String",
            Self::Guid => "Edm.Guid",
            Self::DateTimeOffset => "Edm.DateTimeOffset",
        }
    }
}

impl FromStr for PrimitiveKind {
    type Err = NameError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.full_name() == s)
            .ok_or_else(|| NameError::UnknownPrimitiveType(s.into()))
    }
}

impl Display for PrimitiveKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        self.full_name().fmt(f)
    }
}

/// Reference to a complex or entity type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructuredTypeRef {
    /// Name of the type.
    pub name: QualifiedName,
    /// Direct base type, if the type is derived.
    pub base_type: Option<QualifiedName>,
}

impl StructuredTypeRef {
    /// Reference to a type without base type.
    #[must_use]
    pub const fn new(name: QualifiedName) -> Self {
        Self {
            name,
            base_type: None,
        }
    }

    /// Set base type.
    #[must_use]
    pub fn derived_from(mut self, base_type: QualifiedName) -> Self {
        self.base_type = Some(base_type);
        self
    }
}

/// Reference to any type a context URI can describe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EdmTypeRef {
    Primitive(PrimitiveKind),
    Complex(StructuredTypeRef),
    Entity(StructuredTypeRef),
    Collection(Box<EdmTypeRef>),
}

impl EdmTypeRef {
    /// Collection of `item` type.
    #[must_use]
    pub fn collection_of(item: Self) -> Self {
        Self::Collection(Box::new(item))
    }

    /// Name as it appears in context URIs and `odata.type` annotations.
    #[must_use]
    pub fn full_name(&self) -> String {
        match self {
            Self::Primitive(kind) => kind.full_name().into(),
            Self::Complex(t) | Self::Entity(t) => t.name.to_string(),
            Self::Collection(item) => {
                format!("{COLLECTION_PREFIX}{}{COLLECTION_SUFFIX}", item.full_name())
            }
        }
    }

    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection(_))
    }

    /// Type is an entity type or a collection of entities.
    #[must_use]
    pub fn is_entity_or_entity_collection(&self) -> bool {
        match self {
            Self::Entity(_) => true,
            Self::Collection(item) => item.is_entity_or_entity_collection(),
            _ => false,
        }
    }
}

impl Display for EdmTypeRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.full_name())
    }
}

/// Entity container that declares entity sets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityContainerRef {
    /// Namespace of the schema that declares the container.
    pub namespace: String,
    /// Container name.
    pub name: String,
    /// Default container of the service.
    pub is_default: bool,
}

/// Reference to an entity set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySetRef {
    /// Entity set name (unqualified).
    pub name: String,
    /// Declaring container.
    pub container: EntityContainerRef,
    /// Declared element type.
    pub element_type: StructuredTypeRef,
}

impl EntitySetRef {
    /// Name used in context URI fragments: bare name for sets of the
    /// default container, `Namespace.Container.Set` otherwise.
    #[must_use]
    pub fn context_name(&self) -> String {
        if self.container.is_default {
            self.name.clone()
        } else {
            format!(
                "{}.{}.{}",
                self.container.namespace, self.container.name, self.name
            )
        }
    }
}

/// Reference to a navigation property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationPropertyRef {
    /// Property name.
    pub name: String,
    /// Type that declares the property.
    pub declaring_type: QualifiedName,
    /// Target entity type or collection of target entity type.
    pub target_type: EdmTypeRef,
}

impl NavigationPropertyRef {
    /// Property is collection-valued.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        self.target_type.is_collection()
    }
}

/// Read-only view on the service schema.
pub trait SchemaOracle {
    /// Find entity set by the name used in context URIs (see
    /// [`EntitySetRef::context_name`]).
    fn resolve_entity_set(&self, name: &str) -> Option<EntitySetRef>;

    /// Find primitive, complex or entity type by full name.
    /// Collection type names are handled by the caller.
    fn resolve_type(&self, name: &str) -> Option<EdmTypeRef>;

    /// Element type of the entity set.
    fn element_type(&self, entity_set: &EntitySetRef) -> StructuredTypeRef {
        entity_set.element_type.clone()
    }

    /// Find navigation property declared on the entity type or any of
    /// its base types.
    fn find_navigation_property(
        &self,
        entity_type: &StructuredTypeRef,
        name: &str,
    ) -> Option<NavigationPropertyRef>;

    /// `derived` is `base` or inherits from it.
    fn is_assignable_from(&self, base: &StructuredTypeRef, derived: &StructuredTypeRef) -> bool;
}
