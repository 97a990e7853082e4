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

//! Compact JSON text writer.

use crate::Error;
use odata_jsonlight_core::json::JsonPrimitive;
use odata_jsonlight_core::JsonWriter;
use serde_json::Value as JsonValue;

#[derive(Debug)]
enum Scope {
    Object { first: bool, named: bool },
    Array { first: bool },
}

/// [`JsonWriter`] producing compact JSON text.
///
/// Token order is validated. With [`JsonTextWriter::failing_after`] the
/// writer fails on purpose to exercise error propagation.
#[derive(Debug, Default)]
pub struct JsonTextWriter {
    text: String,
    scopes: Vec<Scope>,
    tokens: usize,
    fail_after: Option<usize>,
    top_level_names: Vec<String>,
}

impl JsonTextWriter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Writer that accepts `tokens` tokens and fails on the next one.
    #[must_use]
    pub fn failing_after(tokens: usize) -> Self {
        Self {
            fail_after: Some(tokens),
            ..Self::default()
        }
    }

    /// Text written so far.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Written document parsed back.
    ///
    /// # Errors
    ///
    /// `Error::BadJson` if the document is incomplete.
    pub fn to_json(&self) -> Result<JsonValue, Error> {
        serde_json::from_str(&self.text).map_err(Error::BadJson)
    }

    /// Property names of the top-level object in write order.
    #[must_use]
    pub fn top_level_names(&self) -> &[String] {
        &self.top_level_names
    }

    fn token(&mut self) -> Result<(), Error> {
        self.tokens += 1;
        match self.fail_after {
            Some(limit) if self.tokens > limit => Err(Error::Injected(self.tokens)),
            _ => Ok(()),
        }
    }

    fn before_value(&mut self, token: &str) -> Result<(), Error> {
        self.token()?;
        match self.scopes.last_mut() {
            None if self.text.is_empty() => Ok(()),
            None => Err(Error::UnexpectedToken(token.into())),
            Some(Scope::Object { named, .. }) if *named => {
                *named = false;
                Ok(())
            }
            Some(Scope::Object { .. }) => Err(Error::UnexpectedToken(token.into())),
            Some(Scope::Array { first }) => {
                if !*first {
                    self.text.push(',');
                }
                *first = false;
                Ok(())
            }
        }
    }
}

impl JsonWriter for JsonTextWriter {
    type Error = Error;

    fn start_object(&mut self) -> Result<(), Error> {
        self.before_value("{")?;
        self.text.push('{');
        self.scopes.push(Scope::Object {
            first: true,
            named: false,
        });
        Ok(())
    }

    fn end_object(&mut self) -> Result<(), Error> {
        self.token()?;
        match self.scopes.pop() {
            Some(Scope::Object { named: false, .. }) => {
                self.text.push('}');
                Ok(())
            }
            _ => Err(Error::UnexpectedToken("}".into())),
        }
    }

    fn start_array(&mut self) -> Result<(), Error> {
        self.before_value("[")?;
        self.text.push('[');
        self.scopes.push(Scope::Array { first: true });
        Ok(())
    }

    fn end_array(&mut self) -> Result<(), Error> {
        self.token()?;
        match self.scopes.pop() {
            Some(Scope::Array { .. }) => {
                self.text.push(']');
                Ok(())
            }
            _ => Err(Error::UnexpectedToken("]".into())),
        }
    }

    fn write_name(&mut self, name: &str) -> Result<(), Error> {
        self.token()?;
        match self.scopes.last_mut() {
            Some(Scope::Object { first, named }) if !*named => {
                if !*first {
                    self.text.push(',');
                }
                *first = false;
                *named = true;
            }
            _ => return Err(Error::UnexpectedToken(name.into())),
        }
        if self.scopes.len() == 1 {
            self.top_level_names.push(name.into());
        }
        let quoted = serde_json::to_string(name).map_err(Error::BadJson)?;
        self.text.push_str(&quoted);
        self.text.push(':');
        Ok(())
    }

    fn write_value(&mut self, value: JsonPrimitive<'_>) -> Result<(), Error> {
        let value = JsonValue::from(value);
        self.before_value(&value.to_string())?;
        let text = serde_json::to_string(&value).map_err(Error::BadJson)?;
        self.text.push_str(&text);
        Ok(())
    }
}
