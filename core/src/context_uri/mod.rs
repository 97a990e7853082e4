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

//! Context URIs
//!
//! A context URI is the metadata document URI followed by a fragment that
//! tells the reader how to interpret the payload:
//!
//! | Fragment | Payload |
//! |----------|---------|
//! | (none) | service document |
//! | `Null` | null property |
//! | `$ref` | entity reference link |
//! | `Collection($ref)` | entity reference links |
//! | `People` | feed |
//! | `People/@Element` | entry |
//! | `People/NS.Manager` | feed with type cast |
//! | `People/NS.Manager/@Element` | entry with type cast |
//! | `Edm.String`, `NS.Address` | property |
//! | `Collection(Edm.String)` | collection (also a property) |
//! | `People[/NS.Manager]/$ref/Friends[/@Element]` | entity reference link(s) of a navigation property |
//!
//! Feed and entry fragments may be followed by `&$select=...`.
//!
//! - [`ContextUriBuilder`] produces these URIs on the write path.
//! - [`ContextUriParser`] resolves them against a
//!   [`crate::SchemaOracle`] on the read path.

mod builder;
mod parse_result;
mod parser;

#[doc(inline)]
pub use builder::ContextUriBuilder;
#[doc(inline)]
pub use builder::ReferenceLinkContext;
#[doc(inline)]
pub use parse_result::ContextUriParseResult;
#[doc(inline)]
pub use parser::parse;
#[doc(inline)]
pub use parser::ContextUriParser;

use crate::select::SelectQuery;
use serde::Deserialize;
use url::Url;

/// Metadata document URI together with the `$select` clause of the
/// request being answered.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataDocumentReference {
    base_uri: Url,
    #[serde(default)]
    select_clause: Option<String>,
}

impl MetadataDocumentReference {
    /// Reference without `$select` clause (everything projected).
    #[must_use]
    pub const fn new(base_uri: Url) -> Self {
        Self {
            base_uri,
            select_clause: None,
        }
    }

    /// Set raw `$select` clause. Empty clause means nothing is projected.
    #[must_use]
    pub fn with_select_clause(mut self, select_clause: impl Into<String>) -> Self {
        self.select_clause = Some(select_clause.into());
        self
    }

    /// Set `$select` clause from the query builder.
    #[must_use]
    pub fn with_select(self, query: &SelectQuery) -> Self {
        self.with_select_clause(query.to_clause())
    }

    /// Metadata document URI.
    #[must_use]
    pub const fn base_uri(&self) -> &Url {
        &self.base_uri
    }

    /// `$select` clause.
    #[must_use]
    pub fn select_clause(&self) -> Option<&str> {
        self.select_clause.as_deref()
    }

    fn with_fragment(&self, fragment: &str) -> Url {
        let mut uri = self.base_uri.clone();
        uri.set_fragment(Some(fragment));
        uri
    }
}
