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

//! Writer settings.
//!
//! Settings of a JSON light writer can be loaded from TOML:
//!
//! ```toml
//! metadata_level = "minimal"
//! auto_compute_payload_metadata = false
//! writing_response = true
//!
//! [metadata_document]
//! base_uri = "http://svc/$metadata"
//! select_clause = "Name,Age"
//! ```
//!
//! Every key is optional. This is the only place where the context URI
//! builder and the type name oracle of a writer are selected.

use crate::context_uri::ContextUriBuilder;
use crate::context_uri::MetadataDocumentReference;
use crate::metadata_level::MetadataLevel;
use crate::type_name_oracle::TypeNameOracle;
use crate::Error as ContextUriError;
use serde::Deserialize;
use std::error::Error as StdError;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::fs::File;
use std::io::Error as IoError;
use std::io::Read as _;
use std::path::Path;
use toml::de::Error as TomlError;

/// Settings of a JSON light writer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterSettings {
    pub metadata_level: MetadataLevel,
    pub auto_compute_payload_metadata: bool,
    pub writing_response: bool,
    pub metadata_document: Option<MetadataDocumentReference>,
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            metadata_level: MetadataLevel::Minimal,
            auto_compute_payload_metadata: false,
            writing_response: true,
            metadata_document: None,
        }
    }
}

impl WriterSettings {
    /// Read settings from toml file.
    ///
    /// # Errors
    ///
    /// - `Error::Io` if failed to read file
    /// - `Error::Toml` if failed to parse content as TOML / invalid settings.
    pub fn read(fname: &Path) -> Result<Self, Error> {
        let mut file = File::open(fname).map_err(Error::Io)?;
        let mut content = String::new();
        file.read_to_string(&mut content).map_err(Error::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    ///
    /// # Errors
    ///
    /// `Error::Toml` if failed to parse content as TOML / invalid settings.
    pub fn from_toml_str(content: &str) -> Result<Self, Error> {
        toml::from_str(content).map_err(Error::Toml)
    }

    /// Context URI builder of the writer.
    ///
    /// # Errors
    ///
    /// `MissingMetadataDocumentUri` if a response with metadata is written
    /// and `metadata_document` is not set.
    pub fn context_uri_builder(&self) -> Result<ContextUriBuilder, ContextUriError> {
        self.metadata_level
            .create_context_uri_builder(self.metadata_document.as_ref(), self.writing_response)
    }

    /// Type name oracle of the writer.
    #[must_use]
    pub fn type_name_oracle(&self) -> TypeNameOracle {
        self.metadata_level
            .type_name_oracle(self.auto_compute_payload_metadata)
    }
}

/// Settings errors.
#[derive(Debug)]
pub enum Error {
    Io(IoError),
    Toml(TomlError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Io(err) => write!(f, "input/output error: {err}"),
            Self::Toml(err) => write!(f, "toml error: {err}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Toml(err) => Some(err),
        }
    }
}
