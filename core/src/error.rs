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

use crate::edm::QualifiedName;
use crate::PayloadKind;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;

/// Context URI errors.
///
/// Every error is final for the build or parse call that raised it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Response payload requires a metadata document URI but none was
    /// configured.
    MissingMetadataDocumentUri,
    /// Context URI annotation value is absent.
    NullMetadataDocumentUri,
    /// Context URI is not a valid absolute URI.
    InvalidUri(String, String),
    /// Single fragment segment is neither an entity set nor a type.
    UnresolvableEntitySetOrTypeName(String),
    /// Segment in entity set position does not name an entity set.
    UnresolvableEntitySet(String),
    /// Type cast segment does not name an entity type.
    UnresolvableTypeCast(String),
    /// Type cast is not derived from the element type of the entity
    /// set (entity set, type cast).
    IncompatibleTypeCast(String, String),
    /// Navigation property is not declared on the type.
    UnresolvableNavigationProperty(QualifiedName, String),
    /// Item selector position holds something other than `@Element`.
    InvalidItemSelectorSuffix(String),
    /// Detected payload kind differs from the expected one.
    PayloadKindMismatch {
        /// Payload kind expected by the caller.
        expected: PayloadKind,
        /// Payload kind detected from the fragment.
        detected: PayloadKind,
    },
    /// `$select` is present for a payload that is neither a feed nor an
    /// entry.
    InvalidSelectWithPayloadKind(PayloadKind),
    /// Fragment has too many segments.
    TooManyFragmentSegments(String),
    /// Item selector of an entity reference link context URI holds
    /// something other than `@Element`.
    InvalidEntityReferenceLinkSuffix(String),
    /// Item selector is applied to a single-valued navigation property.
    InvalidSingletonNavPropertyForEntityReferenceLinkUri(String),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::MissingMetadataDocumentUri => write!(
                f,
                "metadata document URI is required for response payloads"
            ),
            Self::NullMetadataDocumentUri => write!(f, "context URI is null"),
            Self::InvalidUri(uri, reason) => write!(f, "invalid context URI: {uri}: {reason}"),
            Self::UnresolvableEntitySetOrTypeName(v) => {
                write!(f, "neither entity set nor type found: {v}")
            }
            Self::UnresolvableEntitySet(v) => write!(f, "entity set not found: {v}"),
            Self::UnresolvableTypeCast(v) => {
                write!(f, "type cast does not name an entity type: {v}")
            }
            Self::IncompatibleTypeCast(set, cast) => write!(
                f,
                "type cast {cast} is not derived from element type of entity set {set}"
            ),
            Self::UnresolvableNavigationProperty(ty, name) => {
                write!(f, "navigation property {name} not found on type {ty}")
            }
            Self::InvalidItemSelectorSuffix(v) => {
                write!(f, "invalid item selector: {v}")
            }
            Self::PayloadKindMismatch { expected, detected } => write!(
                f,
                "context URI describes {detected} payload but {expected} was expected"
            ),
            Self::InvalidSelectWithPayloadKind(kind) => {
                write!(f, "$select is not allowed for {kind} payload")
            }
            Self::TooManyFragmentSegments(v) => {
                write!(f, "too many segments in context URI fragment: {v}")
            }
            Self::InvalidEntityReferenceLinkSuffix(v) => {
                write!(f, "invalid entity reference link item selector: {v}")
            }
            Self::InvalidSingletonNavPropertyForEntityReferenceLinkUri(v) => write!(
                f,
                "item selector applied to single-valued navigation property: {v}"
            ),
        }
    }
}

impl StdError for Error {}
