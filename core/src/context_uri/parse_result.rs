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

use crate::edm::EdmTypeRef;
use crate::edm::EntitySetRef;
use crate::edm::NavigationPropertyRef;
use crate::odata::PayloadKind;
use url::Url;

/// Result of a successful context URI parse.
///
/// Fields that do not apply to the detected payload kind are `None`.
/// `edm_type` is set for every kind except service documents and entity
/// reference links, with one exception: a `Null` fragment names no type,
/// so null properties have `is_null_property` set and no `edm_type`.
#[derive(Debug, Clone, PartialEq)]
pub struct ContextUriParseResult {
    pub(crate) context_uri: Url,
    pub(crate) metadata_document_uri: Url,
    pub(crate) fragment: String,
    pub(crate) select_query_option: Option<String>,
    pub(crate) edm_type: Option<EdmTypeRef>,
    pub(crate) entity_set: Option<EntitySetRef>,
    pub(crate) navigation_property: Option<NavigationPropertyRef>,
    pub(crate) is_null_property: bool,
    pub(crate) detected_payload_kinds: Vec<PayloadKind>,
}

impl ContextUriParseResult {
    /// The parsed context URI.
    #[must_use]
    pub const fn context_uri(&self) -> &Url {
        &self.context_uri
    }

    /// Context URI without fragment.
    #[must_use]
    pub const fn metadata_document_uri(&self) -> &Url {
        &self.metadata_document_uri
    }

    /// Decoded fragment including the select query option. Empty for
    /// service documents.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// Trimmed `$select` clause. `Some("")` means an empty projection and
    /// differs from `None`.
    #[must_use]
    pub fn select_query_option(&self) -> Option<&str> {
        self.select_query_option.as_deref()
    }

    /// Element type of feeds and entries, type of properties and
    /// collections. `None` for null properties.
    #[must_use]
    pub const fn edm_type(&self) -> Option<&EdmTypeRef> {
        self.edm_type.as_ref()
    }

    /// Entity set of feeds, entries and navigation-qualified reference
    /// links.
    #[must_use]
    pub const fn entity_set(&self) -> Option<&EntitySetRef> {
        self.entity_set.as_ref()
    }

    /// Navigation property of navigation-qualified reference links.
    #[must_use]
    pub const fn navigation_property(&self) -> Option<&NavigationPropertyRef> {
        self.navigation_property.as_ref()
    }

    /// Fragment is `Null`.
    #[must_use]
    pub const fn is_null_property(&self) -> bool {
        self.is_null_property
    }

    /// Detected payload kinds. Collection fragments report both
    /// `Collection` and `Property`.
    #[must_use]
    pub fn detected_payload_kinds(&self) -> &[PayloadKind] {
        &self.detected_payload_kinds
    }
}
