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

use crate::context_uri::MetadataDocumentReference;
use crate::edm::EntitySetRef;
use crate::edm::StructuredTypeRef;
use crate::odata::COLLECTION_OF_REF;
use crate::odata::ITEM_SELECTOR;
use crate::odata::REF;
use crate::odata::SEGMENT_SEPARATOR;
use crate::odata::SELECT_QUERY_OPTION;
use crate::Error;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use tracing::trace;
use url::Url;

/// Characters escaped in `$select` clauses of built fragments.
const SELECT_CLAUSE: &AsciiSet = &CONTROLS.add(b'%');

/// Navigation property whose entity reference links are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceLinkContext<'a> {
    /// Context name of the source entity set.
    pub entity_set_name: &'a str,
    /// Type cast segment when the navigation property is declared on a
    /// derived type.
    pub type_cast: Option<&'a str>,
    /// Navigation property name. Without it no context URI is built.
    pub navigation_property_name: Option<&'a str>,
    /// Navigation property is collection-valued.
    pub is_collection_navigation: bool,
}

impl<'a> ReferenceLinkContext<'a> {
    /// Context for single-valued navigation property declared on the
    /// element type of the entity set.
    #[must_use]
    pub const fn new(entity_set_name: &'a str, navigation_property_name: Option<&'a str>) -> Self {
        Self {
            entity_set_name,
            type_cast: None,
            navigation_property_name,
            is_collection_navigation: false,
        }
    }

    /// Navigation property is declared on a derived type.
    #[must_use]
    pub const fn with_type_cast(mut self, type_cast: &'a str) -> Self {
        self.type_cast = Some(type_cast);
        self
    }

    /// Navigation property is collection-valued.
    #[must_use]
    pub const fn collection_navigation(mut self) -> Self {
        self.is_collection_navigation = true;
        self
    }
}

/// Context URI builder.
///
/// Every operation returns `None` when no context URI has to be written.
/// The variant is selected once per writer (see
/// [`crate::MetadataLevel::create_context_uri_builder`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextUriBuilder {
    /// Never builds anything.
    Null,
    /// Builds context URIs relative to the metadata document.
    Default(MetadataDocumentReference),
}

impl ContextUriBuilder {
    /// Create builder from writer configuration.
    ///
    /// # Errors
    ///
    /// `Error::MissingMetadataDocumentUri` if a response is written and no
    /// metadata document is configured. Requests without metadata document
    /// get the `Null` builder.
    pub fn from_settings(
        metadata_document: Option<&MetadataDocumentReference>,
        writing_response: bool,
    ) -> Result<Self, Error> {
        match metadata_document {
            Some(doc) => Ok(Self::Default(doc.clone())),
            None if writing_response => Err(Error::MissingMetadataDocumentUri),
            None => Ok(Self::Null),
        }
    }

    /// Metadata document used by the builder.
    #[must_use]
    pub const fn metadata_document(&self) -> Option<&MetadataDocumentReference> {
        match self {
            Self::Null => None,
            Self::Default(doc) => Some(doc),
        }
    }

    /// Context URI of a service document: the metadata document URI.
    #[must_use]
    pub fn build_service_document_uri(&self) -> Option<Url> {
        self.metadata_document().map(|doc| doc.base_uri().clone())
    }

    /// Context URI of a feed or an entry.
    ///
    /// Type cast segment is added only when the expected type differs
    /// from the element type of the entity set.
    #[must_use]
    pub fn build_feed_or_entry_uri(
        &self,
        entity_set_name: &str,
        element_type_name: &str,
        expected_type_name: Option<&str>,
        is_entry: bool,
    ) -> Option<Url> {
        let doc = self.metadata_document()?;
        if entity_set_name.is_empty() {
            return None;
        }
        let mut fragment = String::from(entity_set_name);
        if let Some(type_cast) = expected_type_name
            .filter(|name| !name.is_empty() && *name != element_type_name)
        {
            fragment.push(SEGMENT_SEPARATOR);
            fragment.push_str(type_cast);
        }
        if is_entry {
            fragment.push(SEGMENT_SEPARATOR);
            fragment.push_str(ITEM_SELECTOR);
        }
        if let Some(select) = doc.select_clause() {
            fragment.push_str(SELECT_QUERY_OPTION);
            fragment.extend(utf8_percent_encode(select.trim(), SELECT_CLAUSE));
        }
        Some(Self::finish(doc, &fragment))
    }

    /// Same as [`Self::build_feed_or_entry_uri`] for resolved schema
    /// references.
    #[must_use]
    pub fn build_feed_or_entry_uri_for(
        &self,
        entity_set: &EntitySetRef,
        expected_type: Option<&StructuredTypeRef>,
        is_entry: bool,
    ) -> Option<Url> {
        let expected_type_name = expected_type.map(|t| t.name.to_string());
        self.build_feed_or_entry_uri(
            &entity_set.context_name(),
            &entity_set.element_type.name.to_string(),
            expected_type_name.as_deref(),
            is_entry,
        )
    }

    /// Context URI of a property or a collection of the given type.
    #[must_use]
    pub fn build_value_uri(&self, type_name: Option<&str>) -> Option<Url> {
        let doc = self.metadata_document()?;
        type_name
            .filter(|name| !name.is_empty())
            .map(|name| Self::finish(doc, name))
    }

    /// Context URI of entity reference link payload.
    ///
    /// Without `navigation` the bare `$ref` / `Collection($ref)` forms are
    /// built. With it the fragment names the navigation property:
    /// `{entitySet}[/{typeCast}]/$ref/{navigationProperty}`, followed by
    /// `/@Element` when a single link of collection-valued navigation
    /// property is written.
    #[must_use]
    pub fn build_entity_reference_link_uri(
        &self,
        navigation: Option<&ReferenceLinkContext<'_>>,
        is_collection: bool,
    ) -> Option<Url> {
        let doc = self.metadata_document()?;
        let fragment = match navigation {
            None if is_collection => COLLECTION_OF_REF.to_string(),
            None => REF.to_string(),
            Some(navigation) => {
                let property = navigation.navigation_property_name?;
                let mut fragment = String::from(navigation.entity_set_name);
                if let Some(type_cast) = navigation.type_cast {
                    fragment.push(SEGMENT_SEPARATOR);
                    fragment.push_str(type_cast);
                }
                fragment.push(SEGMENT_SEPARATOR);
                fragment.push_str(REF);
                fragment.push(SEGMENT_SEPARATOR);
                fragment.push_str(property);
                if !is_collection && navigation.is_collection_navigation {
                    fragment.push(SEGMENT_SEPARATOR);
                    fragment.push_str(ITEM_SELECTOR);
                }
                fragment
            }
        };
        Some(Self::finish(doc, &fragment))
    }

    fn finish(doc: &MetadataDocumentReference, fragment: &str) -> Url {
        let uri = doc.with_fragment(fragment);
        trace!(uri = %uri, "context uri built");
        uri
    }
}
