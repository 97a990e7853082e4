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

//! `$select` clause builder.
//!
//! Feed and entry context URIs carry the projection of the payload as a
//! `&$select=` suffix of the fragment. The clause has three states that
//! must stay distinguishable:
//!
//! | State | Clause | Meaning |
//! |-------|--------|---------|
//! | absent | no suffix | everything is projected |
//! | empty | `&$select=` | nothing is projected |
//! | non-empty | `&$select=Name,Age` | listed properties are projected |
//!
//! [`SelectQuery`] builds the non-absent states:
//!
//! ```rust
//! use odata_jsonlight_core::select::SelectQuery;
//!
//! let query = SelectQuery::properties(&["Name", "Age"]).and("Friends");
//! assert_eq!(query.to_clause(), "Name,Age,Friends");
//! assert_eq!(query.to_query_string(), "$select=Name,Age,Friends");
//!
//! assert_eq!(SelectQuery::nothing().to_clause(), "");
//! assert_eq!(SelectQuery::all().to_clause(), "*");
//! ```

/// Builder for `$select` clauses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectQuery {
    items: Vec<String>,
}

impl SelectQuery {
    /// Projection of nothing: an empty clause.
    ///
    /// ```rust
    /// use odata_jsonlight_core::select::SelectQuery;
    ///
    /// assert_eq!(SelectQuery::nothing().to_query_string(), "$select=");
    /// ```
    #[must_use]
    pub const fn nothing() -> Self {
        Self { items: Vec::new() }
    }

    /// Projection of all structural properties (`*`).
    #[must_use]
    pub fn all() -> Self {
        Self::property("*")
    }

    /// Projection of a single property or property path.
    pub fn property<S: Into<String>>(property: S) -> Self {
        Self {
            items: vec![property.into()],
        }
    }

    /// Projection of several properties.
    #[must_use]
    pub fn properties(properties: &[&str]) -> Self {
        Self {
            items: properties.iter().map(ToString::to_string).collect(),
        }
    }

    /// Add one more property to the projection.
    #[must_use]
    pub fn and<S: Into<String>>(mut self, property: S) -> Self {
        self.items.push(property.into());
        self
    }

    /// Clause as it is written after `&$select=`.
    #[must_use]
    pub fn to_clause(&self) -> String {
        self.items.join(",")
    }

    /// Clause as a URL query option.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        format!("$select={}", self.to_clause())
    }
}
