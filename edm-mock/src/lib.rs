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

//! In-memory schema for tests.
//!
//! ```rust
//! use odata_jsonlight_core::SchemaOracle;
//! use odata_jsonlight_edm_mock::Model;
//!
//! let model = Model::new()
//!     .container("NS", "Container", true)
//!     .entity_type("NS.Person", None)
//!     .unwrap()
//!     .entity_type("NS.Manager", Some("NS.Person"))
//!     .unwrap()
//!     .entity_set("Container", "People", "NS.Person")
//!     .unwrap();
//!
//! let people = model.resolve_entity_set("People").unwrap();
//! let manager = model.structured_type("NS.Manager").unwrap();
//! assert!(model.is_assignable_from(&people.element_type, &manager));
//! ```

pub mod writer;

#[doc(inline)]
pub use writer::JsonTextWriter;

use odata_jsonlight_core::edm::EdmTypeRef;
use odata_jsonlight_core::edm::EntityContainerRef;
use odata_jsonlight_core::edm::EntitySetRef;
use odata_jsonlight_core::edm::NameError;
use odata_jsonlight_core::edm::NavigationPropertyRef;
use odata_jsonlight_core::edm::PrimitiveKind;
use odata_jsonlight_core::edm::QualifiedName;
use odata_jsonlight_core::edm::StructuredTypeRef;
use odata_jsonlight_core::SchemaOracle;
use serde_json::Error as JsonError;
use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

#[derive(Debug)]
pub enum Error {
    InvalidName(NameError),
    DuplicateName(String),
    UnknownType(String),
    UnknownContainer(String),
    NotAnEntityType(String),
    UnexpectedToken(String),
    Injected(usize),
    BadJson(JsonError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::InvalidName(err) => write!(f, "invalid name: {err}"),
            Self::DuplicateName(name) => write!(f, "duplicate name: {name}"),
            Self::UnknownType(name) => write!(f, "unknown type: {name}"),
            Self::UnknownContainer(name) => write!(f, "unknown container: {name}"),
            Self::NotAnEntityType(name) => write!(f, "not an entity type: {name}"),
            Self::UnexpectedToken(token) => write!(f, "unexpected json token: {token}"),
            Self::Injected(n) => write!(f, "injected failure at token {n}"),
            Self::BadJson(err) => write!(f, "bad json: {err}"),
        }
    }
}

impl StdError for Error {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Complex,
    Entity,
}

/// In-memory schema implementing [`SchemaOracle`].
///
/// Types must be declared before they are used as base types, entity set
/// element types or navigation targets.
#[derive(Debug, Clone, Default)]
pub struct Model {
    containers: Vec<EntityContainerRef>,
    types: BTreeMap<String, (Kind, StructuredTypeRef)>,
    navigation_properties: Vec<NavigationPropertyRef>,
    entity_sets: Vec<EntitySetRef>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare entity container.
    #[must_use]
    pub fn container(mut self, namespace: &str, name: &str, is_default: bool) -> Self {
        self.containers.push(EntityContainerRef {
            namespace: namespace.into(),
            name: name.into(),
            is_default,
        });
        self
    }

    /// Declare entity type.
    ///
    /// # Errors
    ///
    /// Invalid or duplicate name, unknown base type.
    pub fn entity_type(self, name: &str, base: Option<&str>) -> Result<Self, Error> {
        self.structured(Kind::Entity, name, base)
    }

    /// Declare complex type.
    ///
    /// # Errors
    ///
    /// Invalid or duplicate name, unknown base type.
    pub fn complex_type(self, name: &str, base: Option<&str>) -> Result<Self, Error> {
        self.structured(Kind::Complex, name, base)
    }

    /// Declare navigation property of `owner` entity type targeting
    /// `target` entity type.
    ///
    /// # Errors
    ///
    /// Unknown owner or target, or they are not entity types.
    pub fn navigation(
        mut self,
        owner: &str,
        name: &str,
        target: &str,
        is_collection: bool,
    ) -> Result<Self, Error> {
        let owner = self.entity(owner)?.name;
        let target = EdmTypeRef::Entity(self.entity(target)?);
        self.navigation_properties.push(NavigationPropertyRef {
            name: name.into(),
            declaring_type: owner,
            target_type: if is_collection {
                EdmTypeRef::collection_of(target)
            } else {
                target
            },
        });
        Ok(self)
    }

    /// Declare entity set in the named container.
    ///
    /// # Errors
    ///
    /// Unknown container or element type.
    pub fn entity_set(
        mut self,
        container: &str,
        name: &str,
        element_type: &str,
    ) -> Result<Self, Error> {
        let container = self
            .containers
            .iter()
            .find(|c| c.name == container)
            .cloned()
            .ok_or_else(|| Error::UnknownContainer(container.into()))?;
        let element_type = self.entity(element_type)?;
        self.entity_sets.push(EntitySetRef {
            name: name.into(),
            container,
            element_type,
        });
        Ok(self)
    }

    /// Complex or entity type by full name.
    #[must_use]
    pub fn structured_type(&self, name: &str) -> Option<StructuredTypeRef> {
        self.types.get(name).map(|(_, t)| t.clone())
    }

    fn structured(
        mut self,
        kind: Kind,
        name: &str,
        base: Option<&str>,
    ) -> Result<Self, Error> {
        let qualified: QualifiedName = name.parse().map_err(Error::InvalidName)?;
        if self.types.contains_key(name) || name.parse::<PrimitiveKind>().is_ok() {
            return Err(Error::DuplicateName(name.into()));
        }
        let mut t = StructuredTypeRef::new(qualified);
        if let Some(base) = base {
            match self.types.get(base) {
                Some((base_kind, base_type)) if *base_kind == kind => {
                    t = t.derived_from(base_type.name.clone());
                }
                _ => return Err(Error::UnknownType(base.into())),
            }
        }
        self.types.insert(name.into(), (kind, t));
        Ok(self)
    }

    fn entity(&self, name: &str) -> Result<StructuredTypeRef, Error> {
        match self.types.get(name) {
            Some((Kind::Entity, t)) => Ok(t.clone()),
            Some((Kind::Complex, _)) => Err(Error::NotAnEntityType(name.into())),
            None => Err(Error::UnknownType(name.into())),
        }
    }

    fn base_of(&self, t: &StructuredTypeRef) -> Option<&StructuredTypeRef> {
        t.base_type
            .as_ref()
            .and_then(|base| self.types.get(&base.to_string()))
            .map(|(_, base)| base)
    }
}

impl SchemaOracle for Model {
    fn resolve_entity_set(&self, name: &str) -> Option<EntitySetRef> {
        self.entity_sets
            .iter()
            .find(|set| {
                set.context_name() == name
                    || format!("{}.{}.{}", set.container.namespace, set.container.name, set.name)
                        == name
            })
            .cloned()
    }

    fn resolve_type(&self, name: &str) -> Option<EdmTypeRef> {
        if let Ok(kind) = name.parse::<PrimitiveKind>() {
            return Some(EdmTypeRef::Primitive(kind));
        }
        self.types.get(name).map(|(kind, t)| match kind {
            Kind::Complex => EdmTypeRef::Complex(t.clone()),
            Kind::Entity => EdmTypeRef::Entity(t.clone()),
        })
    }

    fn find_navigation_property(
        &self,
        entity_type: &StructuredTypeRef,
        name: &str,
    ) -> Option<NavigationPropertyRef> {
        let mut current = Some(entity_type);
        while let Some(t) = current {
            if let Some(property) = self
                .navigation_properties
                .iter()
                .find(|p| p.declaring_type == t.name && p.name == name)
            {
                return Some(property.clone());
            }
            current = self.base_of(t);
        }
        None
    }

    fn is_assignable_from(&self, base: &StructuredTypeRef, derived: &StructuredTypeRef) -> bool {
        let mut current = Some(derived);
        while let Some(t) = current {
            if t.name == base.name {
                return true;
            }
            current = self.base_of(t);
        }
        false
    }
}
