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

//! Entity reference link payloads
//!
//! Single link:
//!
//! ```json
//! { "odata.metadata": "http://svc/$metadata#$ref", "url": "http://svc/People(1)" }
//! ```
//!
//! Collection of links:
//!
//! ```json
//! {
//!   "odata.metadata": "http://svc/$metadata#Collection($ref)",
//!   "odata.count": 2,
//!   "value": [ { "url": "http://svc/People(1)" }, { "url": "http://svc/People(2)" } ],
//!   "odata.nextLink": "http://svc/People(0)/$links/Friends?$skiptoken=2"
//! }
//! ```
//!
//! Count and next page link are written before `value` when the source
//! knows them up front, otherwise after it. Each is written at most once.

use crate::context_uri::ContextUriBuilder;
use crate::context_uri::ReferenceLinkContext;
use crate::json::JsonPrimitive;
use crate::json::JsonWriter;
use crate::odata::ODATA_COUNT;
use crate::odata::ODATA_METADATA;
use crate::odata::ODATA_NEXT_LINK;
use crate::odata::URL;
use crate::odata::VALUE;
use serde::Deserialize;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::trace;
use url::Url;

/// Link to an entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityReferenceLink {
    pub url: Url,
}

impl From<Url> for EntityReferenceLink {
    fn from(url: Url) -> Self {
        Self { url }
    }
}

/// Source of the links of a collection payload.
///
/// `count` and `next_page_link` are asked before the first link and again
/// after the last one, so a streaming source may report them only once it
/// is exhausted.
pub trait EntityReferenceLinkSource {
    /// Total number of links, if known.
    fn count(&self) -> Option<i64>;

    /// Link to the next page of links, if known.
    fn next_page_link(&self) -> Option<Url>;

    /// Next link.
    fn next_link(&mut self) -> Option<EntityReferenceLink>;
}

/// In-memory collection of links.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityReferenceLinks {
    links: VecDeque<EntityReferenceLink>,
    count: Option<i64>,
    next_page_link: Option<Url>,
}

impl EntityReferenceLinks {
    /// Collection of the links.
    #[must_use]
    pub fn new(links: Vec<EntityReferenceLink>) -> Self {
        Self {
            links: links.into(),
            count: None,
            next_page_link: None,
        }
    }

    /// Set total number of links.
    #[must_use]
    pub fn with_count(mut self, count: i64) -> Self {
        self.count = Some(count);
        self
    }

    /// Set link to the next page.
    #[must_use]
    pub fn with_next_page_link(mut self, next_page_link: Url) -> Self {
        self.next_page_link = Some(next_page_link);
        self
    }
}

impl EntityReferenceLinkSource for EntityReferenceLinks {
    fn count(&self) -> Option<i64> {
        self.count
    }

    fn next_page_link(&self) -> Option<Url> {
        self.next_page_link.clone()
    }

    fn next_link(&mut self) -> Option<EntityReferenceLink> {
        self.links.pop_front()
    }
}

/// Writes entity reference link payloads to a [`JsonWriter`].
///
/// Writer errors are returned unchanged. The serializer keeps no state
/// between payloads.
pub struct ReferenceLinkSerializer<'a, W: JsonWriter> {
    writer: &'a mut W,
    builder: &'a ContextUriBuilder,
}

impl<'a, W: JsonWriter> ReferenceLinkSerializer<'a, W> {
    /// Create serializer writing to `writer` with context URIs from
    /// `builder`.
    pub fn new(writer: &'a mut W, builder: &'a ContextUriBuilder) -> Self {
        Self { writer, builder }
    }

    /// Write top-level single link.
    ///
    /// # Errors
    ///
    /// Errors of the JSON writer.
    pub fn write_entity_reference_link(
        &mut self,
        link: &EntityReferenceLink,
        navigation: Option<&ReferenceLinkContext<'_>>,
    ) -> Result<(), W::Error> {
        self.writer.start_object()?;
        if let Some(uri) = self.builder.build_entity_reference_link_uri(navigation, false) {
            self.write_context_uri(&uri)?;
        }
        self.write_url(link)?;
        self.writer.end_object()
    }

    /// Write top-level collection of links.
    ///
    /// # Errors
    ///
    /// Errors of the JSON writer.
    pub fn write_entity_reference_links<S: EntityReferenceLinkSource + ?Sized>(
        &mut self,
        links: &mut S,
        navigation: Option<&ReferenceLinkContext<'_>>,
    ) -> Result<(), W::Error> {
        self.writer.start_object()?;
        if let Some(uri) = self.builder.build_entity_reference_link_uri(navigation, true) {
            self.write_context_uri(&uri)?;
        }
        let mut wrote_count = self.write_count(links.count())?;
        let mut wrote_next_link = self.write_next_page_link(links.next_page_link())?;

        self.writer.write_name(VALUE)?;
        self.writer.start_array()?;
        let mut written = 0_usize;
        while let Some(link) = links.next_link() {
            self.writer.start_object()?;
            self.write_url(&link)?;
            self.writer.end_object()?;
            written += 1;
        }
        self.writer.end_array()?;

        if !wrote_count {
            wrote_count = self.write_count(links.count())?;
        }
        if !wrote_next_link {
            wrote_next_link = self.write_next_page_link(links.next_page_link())?;
        }
        trace!(written, wrote_count, wrote_next_link, "entity reference links written");
        self.writer.end_object()
    }

    fn write_context_uri(&mut self, uri: &Url) -> Result<(), W::Error> {
        self.writer.write_name(ODATA_METADATA)?;
        self.writer.write_value(JsonPrimitive::str(uri.as_str()))
    }

    fn write_url(&mut self, link: &EntityReferenceLink) -> Result<(), W::Error> {
        self.writer.write_name(URL)?;
        self.writer.write_value(JsonPrimitive::str(link.url.as_str()))
    }

    fn write_count(&mut self, count: Option<i64>) -> Result<bool, W::Error> {
        match count {
            Some(count) => {
                self.writer.write_name(ODATA_COUNT)?;
                self.writer.write_value(JsonPrimitive::Integer(count))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn write_next_page_link(&mut self, next_page_link: Option<Url>) -> Result<bool, W::Error> {
        match next_page_link {
            Some(next_page_link) => {
                self.writer.write_name(ODATA_NEXT_LINK)?;
                self.writer
                    .write_value(JsonPrimitive::str(next_page_link.as_str()))?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
