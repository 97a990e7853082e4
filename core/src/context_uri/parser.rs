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

use crate::context_uri::ContextUriParseResult;
use crate::edm::collection_item_type_name;
use crate::edm::EdmTypeRef;
use crate::edm::EntitySetRef;
use crate::edm::NavigationPropertyRef;
use crate::edm::SchemaOracle;
use crate::edm::StructuredTypeRef;
use crate::odata::PayloadKind;
use crate::odata::COLLECTION_OF_REF;
use crate::odata::ITEM_SELECTOR;
use crate::odata::LINKS;
use crate::odata::NULL;
use crate::odata::QUERY_OPTION_SEPARATOR;
use crate::odata::REF;
use crate::odata::SEGMENT_SEPARATOR;
use crate::odata::SELECT_QUERY_OPTION;
use crate::Error;
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use tracing::debug;
use tracing::trace;
use url::Url;

/// Parse context URI against the schema.
///
/// # Errors
///
/// See [`ContextUriParser::parse`].
pub fn parse<M: SchemaOracle + ?Sized>(
    model: &M,
    context_uri: Option<&str>,
    expected: PayloadKind,
) -> Result<ContextUriParseResult, Error> {
    ContextUriParser::new(model).parse(context_uri, expected)
}

/// Context URI parser.
///
/// Holds only a reference to the schema. Every parse is independent.
pub struct ContextUriParser<'m, M: SchemaOracle + ?Sized> {
    model: &'m M,
}

impl<'m, M: SchemaOracle + ?Sized> ContextUriParser<'m, M> {
    /// Create parser for the schema.
    pub const fn new(model: &'m M) -> Self {
        Self { model }
    }

    /// Parse context URI and check the detected payload kind against
    /// `expected`. `PayloadKind::Unsupported` disables the check.
    ///
    /// # Errors
    ///
    /// - `Error::NullMetadataDocumentUri` if `context_uri` is `None`.
    /// - `Error::InvalidUri` if it is not an absolute URI.
    /// - Resolution errors if fragment segments are not found in the
    ///   schema.
    /// - `Error::PayloadKindMismatch` if the detected kind is not the
    ///   expected one.
    /// - `Error::InvalidSelectWithPayloadKind` if `$select` is attached to
    ///   anything other than a feed or an entry.
    pub fn parse(
        &self,
        context_uri: Option<&str>,
        expected: PayloadKind,
    ) -> Result<ContextUriParseResult, Error> {
        let raw = context_uri.ok_or(Error::NullMetadataDocumentUri)?;
        let context_uri =
            Url::parse(raw).map_err(|err| Error::InvalidUri(raw.into(), err.to_string()))?;
        let mut metadata_document_uri = context_uri.clone();
        metadata_document_uri.set_fragment(None);
        let fragment = decode_fragment(&context_uri)?;
        let (path, select_query_option) = extract_select_query_option(&fragment);
        debug!(
            context_uri = raw,
            fragment = %path,
            select = ?select_query_option,
            "parsing context uri"
        );

        let mut resolved = Resolved::default();
        let kind = self.parse_fragment(&path, &mut resolved)?;
        trace!(detected = %kind, "fragment resolved");
        drop(path);
        let result = ContextUriParseResult {
            context_uri,
            metadata_document_uri,
            fragment,
            select_query_option,
            edm_type: resolved.edm_type,
            entity_set: resolved.entity_set,
            navigation_property: resolved.navigation_property,
            is_null_property: resolved.is_null_property,
            detected_payload_kinds: Vec::new(),
        };
        finish(result, kind, expected)
    }

    fn parse_fragment(&self, fragment: &str, resolved: &mut Resolved) -> Result<PayloadKind, Error> {
        if fragment.is_empty() {
            return Ok(PayloadKind::ServiceDocument);
        }
        let segments = fragment.split(SEGMENT_SEPARATOR).collect::<Vec<_>>();
        if let Some(link) = match_reference_link_fragment(&segments) {
            return self.parse_reference_link(link, resolved);
        }
        match *segments.as_slice() {
            [segment] => self.parse_single_segment(segment, resolved),
            [entity_set, ITEM_SELECTOR] => {
                resolved.set_entity_set(self, self.resolve_entity_set(entity_set)?);
                Ok(PayloadKind::Entry)
            }
            [entity_set, type_cast] => {
                let entity_set = self.resolve_entity_set(entity_set)?;
                let cast = self.resolve_type_cast(&entity_set, type_cast)?;
                resolved.entity_set = Some(entity_set);
                resolved.edm_type = Some(EdmTypeRef::Entity(cast));
                Ok(PayloadKind::Feed)
            }
            [entity_set, type_cast, selector] => {
                let entity_set = self.resolve_entity_set(entity_set)?;
                let cast = self.resolve_type_cast(&entity_set, type_cast)?;
                if selector != ITEM_SELECTOR {
                    return Err(Error::InvalidItemSelectorSuffix(selector.into()));
                }
                resolved.entity_set = Some(entity_set);
                resolved.edm_type = Some(EdmTypeRef::Entity(cast));
                Ok(PayloadKind::Entry)
            }
            _ => Err(Error::TooManyFragmentSegments(fragment.into())),
        }
    }

    fn parse_single_segment(
        &self,
        segment: &str,
        resolved: &mut Resolved,
    ) -> Result<PayloadKind, Error> {
        if segment.eq_ignore_ascii_case(NULL) {
            resolved.is_null_property = true;
            return Ok(PayloadKind::Property);
        }
        if let Some(entity_set) = self.model.resolve_entity_set(segment) {
            resolved.set_entity_set(self, entity_set);
            return Ok(PayloadKind::Feed);
        }
        // Entity types are only reachable through entity sets.
        let edm_type = self
            .resolve_type_name(segment)
            .filter(|t| !t.is_entity_or_entity_collection())
            .ok_or_else(|| Error::UnresolvableEntitySetOrTypeName(segment.into()))?;
        let kind = if edm_type.is_collection() {
            PayloadKind::Collection
        } else {
            PayloadKind::Property
        };
        resolved.edm_type = Some(edm_type);
        Ok(kind)
    }

    fn parse_reference_link(
        &self,
        link: ReferenceLinkFragment<'_>,
        resolved: &mut Resolved,
    ) -> Result<PayloadKind, Error> {
        let link = match link {
            ReferenceLinkFragment::Single => return Ok(PayloadKind::EntityReferenceLink),
            ReferenceLinkFragment::Collection => return Ok(PayloadKind::EntityReferenceLinks),
            ReferenceLinkFragment::Navigation(link) => link,
        };
        let entity_set = self.resolve_entity_set(link.entity_set)?;
        let owner = match link.type_cast {
            Some(type_cast) => self.resolve_type_cast(&entity_set, type_cast)?,
            None => self.model.element_type(&entity_set),
        };
        let navigation_property = self.resolve_navigation_property(&owner, link.navigation_property)?;
        let kind = match (link.item_selector, navigation_property.is_collection()) {
            (None, true) => PayloadKind::EntityReferenceLinks,
            (None, false) | (Some(ITEM_SELECTOR), true) => PayloadKind::EntityReferenceLink,
            (Some(ITEM_SELECTOR), false) => {
                return Err(Error::InvalidSingletonNavPropertyForEntityReferenceLinkUri(
                    navigation_property.name,
                ))
            }
            (Some(suffix), _) => return Err(Error::InvalidEntityReferenceLinkSuffix(suffix.into())),
        };
        resolved.entity_set = Some(entity_set);
        resolved.navigation_property = Some(navigation_property);
        Ok(kind)
    }

    fn resolve_entity_set(&self, name: &str) -> Result<EntitySetRef, Error> {
        self.model
            .resolve_entity_set(name)
            .ok_or_else(|| Error::UnresolvableEntitySet(name.into()))
    }

    fn resolve_type_name(&self, name: &str) -> Option<EdmTypeRef> {
        match collection_item_type_name(name) {
            Some(item) => self.model.resolve_type(item).map(EdmTypeRef::collection_of),
            None => self.model.resolve_type(name),
        }
    }

    fn resolve_type_cast(
        &self,
        entity_set: &EntitySetRef,
        type_cast: &str,
    ) -> Result<StructuredTypeRef, Error> {
        let derived = match self.model.resolve_type(type_cast) {
            Some(EdmTypeRef::Entity(derived)) => derived,
            _ => return Err(Error::UnresolvableTypeCast(type_cast.into())),
        };
        let base = self.model.element_type(entity_set);
        if self.model.is_assignable_from(&base, &derived) {
            Ok(derived)
        } else {
            Err(Error::IncompatibleTypeCast(
                entity_set.context_name(),
                type_cast.into(),
            ))
        }
    }

    fn resolve_navigation_property(
        &self,
        owner: &StructuredTypeRef,
        name: &str,
    ) -> Result<NavigationPropertyRef, Error> {
        self.model
            .find_navigation_property(owner, name)
            .ok_or_else(|| Error::UnresolvableNavigationProperty(owner.name.clone(), name.into()))
    }
}

#[derive(Default)]
struct Resolved {
    edm_type: Option<EdmTypeRef>,
    entity_set: Option<EntitySetRef>,
    navigation_property: Option<NavigationPropertyRef>,
    is_null_property: bool,
}

impl Resolved {
    fn set_entity_set<M: SchemaOracle + ?Sized>(
        &mut self,
        parser: &ContextUriParser<'_, M>,
        entity_set: EntitySetRef,
    ) {
        self.edm_type = Some(EdmTypeRef::Entity(parser.model.element_type(&entity_set)));
        self.entity_set = Some(entity_set);
    }
}

fn finish(
    mut result: ContextUriParseResult,
    kind: PayloadKind,
    expected: PayloadKind,
) -> Result<ContextUriParseResult, Error> {
    let detected = if kind == PayloadKind::Collection {
        result.detected_payload_kinds = vec![PayloadKind::Collection, PayloadKind::Property];
        if expected == PayloadKind::Property {
            PayloadKind::Property
        } else {
            PayloadKind::Collection
        }
    } else {
        result.detected_payload_kinds = vec![kind];
        kind
    };
    if expected != PayloadKind::Unsupported && detected != expected {
        return Err(Error::PayloadKindMismatch { expected, detected });
    }
    if result.select_query_option.is_some()
        && !matches!(detected, PayloadKind::Feed | PayloadKind::Entry)
    {
        return Err(Error::InvalidSelectWithPayloadKind(detected));
    }
    Ok(result)
}

fn decode_fragment(uri: &Url) -> Result<String, Error> {
    let fragment = uri.fragment().unwrap_or_default();
    percent_decode_str(fragment)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|err| Error::InvalidUri(uri.to_string(), err.to_string()))
}

/// Split `&$select=...` off the fragment. The clause ends at the next
/// query option separator or at the end of the fragment.
fn extract_select_query_option(fragment: &str) -> (Cow<'_, str>, Option<String>) {
    let start = match fragment.find(SELECT_QUERY_OPTION) {
        Some(start) => start,
        None => return (Cow::Borrowed(fragment), None),
    };
    let rest = &fragment[start + SELECT_QUERY_OPTION.len()..];
    let (clause, tail) = match rest.find(QUERY_OPTION_SEPARATOR) {
        Some(end) => rest.split_at(end),
        None => (rest, ""),
    };
    let path = format!("{}{}", &fragment[..start], tail);
    (Cow::Owned(path), Some(clause.trim().to_string()))
}

#[derive(Debug, PartialEq, Eq)]
enum ReferenceLinkFragment<'s> {
    Single,
    Collection,
    Navigation(NavigationLink<'s>),
}

#[derive(Debug, PartialEq, Eq)]
struct NavigationLink<'s> {
    entity_set: &'s str,
    type_cast: Option<&'s str>,
    navigation_property: &'s str,
    item_selector: Option<&'s str>,
}

fn is_navigation_marker(segment: &str) -> bool {
    segment == REF || segment == LINKS
}

fn match_reference_link_fragment<'s>(segments: &[&'s str]) -> Option<ReferenceLinkFragment<'s>> {
    let link = match *segments {
        [REF] => return Some(ReferenceLinkFragment::Single),
        [COLLECTION_OF_REF] => return Some(ReferenceLinkFragment::Collection),
        [entity_set, marker, navigation_property] if is_navigation_marker(marker) => {
            NavigationLink {
                entity_set,
                type_cast: None,
                navigation_property,
                item_selector: None,
            }
        }
        [entity_set, marker, navigation_property, item_selector] if is_navigation_marker(marker) => {
            NavigationLink {
                entity_set,
                type_cast: None,
                navigation_property,
                item_selector: Some(item_selector),
            }
        }
        [entity_set, type_cast, marker, navigation_property] if is_navigation_marker(marker) => {
            NavigationLink {
                entity_set,
                type_cast: Some(type_cast),
                navigation_property,
                item_selector: None,
            }
        }
        [entity_set, type_cast, marker, navigation_property, item_selector]
            if is_navigation_marker(marker) =>
        {
            NavigationLink {
                entity_set,
                type_cast: Some(type_cast),
                navigation_property,
                item_selector: Some(item_selector),
            }
        }
        _ => return None,
    };
    Some(ReferenceLinkFragment::Navigation(link))
}
