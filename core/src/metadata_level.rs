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

//! Metadata levels of JSON light payloads
//!
//! The level comes from the `odata=` parameter of the
//! `application/json` media type. It selects the context URI builder and
//! the type name oracle of a writer:
//!
//! | Level | Context URI builder | Type name oracle |
//! |-------|---------------------|------------------|
//! | `none` | `Null` | `NoMetadata` |
//! | `minimal` | `Default` | `Minimal`, `Full` with auto-computed metadata |
//! | `full` | `Default` | `Full` |

use crate::context_uri::ContextUriBuilder;
use crate::context_uri::MetadataDocumentReference;
use crate::type_name_oracle::TypeNameOracle;
use crate::Error;
use serde::Deserialize;
use std::convert::TryFrom;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::str::FromStr;
use tracing::debug;

/// Metadata level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum MetadataLevel {
    None,
    #[default]
    Minimal,
    Full,
}

/// Metadata level name is not known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMetadataLevel(pub String);

impl Display for UnknownMetadataLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "unknown metadata level: {}", self.0)
    }
}

impl std::error::Error for UnknownMetadataLevel {}

impl MetadataLevel {
    /// Create context URI builder for this level.
    ///
    /// # Errors
    ///
    /// `Error::MissingMetadataDocumentUri` if a response is written with
    /// metadata and no metadata document is configured.
    pub fn create_context_uri_builder(
        self,
        metadata_document: Option<&MetadataDocumentReference>,
        writing_response: bool,
    ) -> Result<ContextUriBuilder, Error> {
        match self {
            Self::None => Ok(ContextUriBuilder::Null),
            Self::Minimal | Self::Full => {
                ContextUriBuilder::from_settings(metadata_document, writing_response)
            }
        }
    }

    /// Select type name oracle for this level.
    #[must_use]
    pub fn type_name_oracle(self, auto_compute_payload_metadata: bool) -> TypeNameOracle {
        let oracle = match self {
            Self::None => TypeNameOracle::NoMetadata,
            Self::Minimal if auto_compute_payload_metadata => TypeNameOracle::Full,
            Self::Minimal => TypeNameOracle::Minimal,
            Self::Full => TypeNameOracle::Full,
        };
        debug!(level = %self, auto_compute_payload_metadata, oracle = ?oracle, "type name oracle selected");
        oracle
    }
}

impl FromStr for MetadataLevel {
    type Err = UnknownMetadataLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "nometadata" => Ok(Self::None),
            "minimal" | "minimalmetadata" => Ok(Self::Minimal),
            "full" | "fullmetadata" => Ok(Self::Full),
            _ => Err(UnknownMetadataLevel(s.into())),
        }
    }
}

impl TryFrom<String> for MetadataLevel {
    type Error = UnknownMetadataLevel;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Display for MetadataLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::None => "none",
            Self::Minimal => "minimal",
            Self::Full => "full",
        })
    }
}
