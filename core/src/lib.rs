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

//! OData JSON light serialization core
//!
//! This crate implements the protocol logic that sits between an OData
//! JSON writer/reader and the service schema:
//!
//! - [`context_uri::ContextUriBuilder`] builds `odata.metadata` context URIs
//!   for feeds, entries, properties, collections, entity reference links
//!   and service documents.
//! - [`context_uri::ContextUriParser`] parses a context URI back and resolves
//!   every fragment segment against a [`SchemaOracle`].
//! - [`TypeNameOracle`] decides whether an `odata.type` annotation has to be
//!   written for an entry or a value.
//! - [`ReferenceLinkSerializer`] writes entity reference link payloads.
//!
//! The schema and the JSON writer are collaborators: they are consumed
//! through the [`SchemaOracle`] and [`JsonWriter`] traits.
//!
//! ```rust
//! use odata_jsonlight_core::context_uri::ContextUriBuilder;
//! use odata_jsonlight_core::context_uri::MetadataDocumentReference;
//! use url::Url;
//!
//! let base = Url::parse("http://svc/$metadata").unwrap();
//! let builder = ContextUriBuilder::from_settings(
//!     Some(&MetadataDocumentReference::new(base)),
//!     true,
//! )
//! .unwrap();
//! let uri = builder
//!     .build_feed_or_entry_uri("People", "NS.Person", None, true)
//!     .unwrap();
//! assert_eq!(uri.as_str(), "http://svc/$metadata#People/@Element");
//! ```

/// Context URI builder and parser.
pub mod context_uri;
/// EDM references and the schema oracle trait.
pub mod edm;
/// Errors of context URI processing.
pub mod error;
/// JSON writer collaborator.
pub mod json;
/// Metadata levels and strategy selection.
pub mod metadata_level;
/// JSON light constants and payload kinds.
pub mod odata;
/// Entity reference link payloads.
pub mod reference_link;
/// `$select` clause builder.
pub mod select;
/// Writer settings.
pub mod settings;
/// Type name oracles.
pub mod type_name_oracle;
/// Values written to JSON light payloads.
pub mod value;

#[doc(inline)]
pub use edm::SchemaOracle;
#[doc(inline)]
pub use error::Error;
#[doc(inline)]
pub use json::JsonWriter;
#[doc(inline)]
pub use metadata_level::MetadataLevel;
#[doc(inline)]
pub use odata::PayloadKind;
#[doc(inline)]
pub use reference_link::ReferenceLinkSerializer;
#[doc(inline)]
pub use type_name_oracle::TypeNameOracle;
