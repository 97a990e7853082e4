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

//! JSON light vocabulary
//!
//! Property names of the `odata.*` annotations, the literal tokens of the
//! context URI fragment grammar and the closed set of payload kinds.
//!
//! | Token | Meaning |
//! |-------|---------|
//! | `@Element` | item selector: single element of a collection |
//! | `$ref` | single entity reference link / navigation marker |
//! | `Collection($ref)` | collection of entity reference links |
//! | `Null` | null property (matched case-insensitively) |
//! | `&$select=` | select query option prefix |
//! | `/` | segment separator |
//!
//! References:
//! - OASIS OData JSON Format: context URL (`odata.metadata`)

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Name of the context URI annotation.
pub const ODATA_METADATA: &str = "odata.metadata";
/// Name of the count annotation.
pub const ODATA_COUNT: &str = "odata.count";
/// Name of the next page link annotation.
pub const ODATA_NEXT_LINK: &str = "odata.nextLink";
/// Name of the property that holds collection payloads.
pub const VALUE: &str = "value";
/// Name of the property that holds the URL of an entity reference link.
pub const URL: &str = "url";

/// Separator of fragment segments.
pub const SEGMENT_SEPARATOR: char = '/';
/// Item selector segment.
pub const ITEM_SELECTOR: &str = "@Element";
/// Single entity reference link; also marks navigation-qualified links.
pub const REF: &str = "$ref";
/// Legacy navigation marker of entity reference links.
pub const LINKS: &str = "$links";
/// Collection of entity reference links.
pub const COLLECTION_OF_REF: &str = "Collection($ref)";
/// Null property marker.
pub const NULL: &str = "Null";
/// Prefix of the select query option inside a fragment.
pub const SELECT_QUERY_OPTION: &str = "&$select=";
/// Separator of query options inside a fragment.
pub const QUERY_OPTION_SEPARATOR: char = '&';

/// Payload kinds a context URI can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PayloadKind {
    ServiceDocument,
    Feed,
    Entry,
    Property,
    Collection,
    EntityReferenceLink,
    EntityReferenceLinks,
    /// When expected by a parser caller: detect the kind without
    /// enforcing it.
    Unsupported,
}

impl Display for PayloadKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let name = match self {
            Self::ServiceDocument => "ServiceDocument",
            Self::Feed => "Feed",
            Self::Entry => "Entry",
            Self::Property => "Property",
            Self::Collection => "Collection",
            Self::EntityReferenceLink => "EntityReferenceLink",
            Self::EntityReferenceLinks => "EntityReferenceLinks",
            Self::Unsupported => "Unsupported",
        };
        f.write_str(name)
    }
}
