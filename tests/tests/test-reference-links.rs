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

use odata_jsonlight_core::context_uri::parse;
use odata_jsonlight_core::context_uri::ContextUriBuilder;
use odata_jsonlight_core::context_uri::ReferenceLinkContext;
use odata_jsonlight_core::reference_link::EntityReferenceLink;
use odata_jsonlight_core::reference_link::EntityReferenceLinkSource;
use odata_jsonlight_core::reference_link::EntityReferenceLinks;
use odata_jsonlight_core::PayloadKind;
use odata_jsonlight_core::ReferenceLinkSerializer;
use odata_jsonlight_edm_mock::Error as MockError;
use odata_jsonlight_edm_mock::JsonTextWriter;
use odata_jsonlight_tests::base::builder;
use odata_jsonlight_tests::base::model;
use odata_jsonlight_tests::Error;
use odata_jsonlight_tests::ODATA_COUNT;
use odata_jsonlight_tests::ODATA_METADATA;
use odata_jsonlight_tests::ODATA_NEXT_LINK;
use serde_json::json;
use url::Url;

fn link(n: u32) -> Result<EntityReferenceLink, Error> {
    Ok(Url::parse(&format!("http://svc/People({})", n))?.into())
}

fn next_page() -> Result<Url, Error> {
    Ok(Url::parse("http://svc/People(0)/Friends/$ref?$skiptoken=2")?)
}

/// Source that knows count and next page link only after the last link
/// was read.
struct Streamed {
    links: Vec<EntityReferenceLink>,
    position: usize,
    next_page_link: Url,
}

impl Streamed {
    fn exhausted(&self) -> bool {
        self.position >= self.links.len()
    }
}

impl EntityReferenceLinkSource for Streamed {
    fn count(&self) -> Option<i64> {
        if self.exhausted() {
            Some(self.links.len() as i64)
        } else {
            None
        }
    }

    fn next_page_link(&self) -> Option<Url> {
        if self.exhausted() {
            Some(self.next_page_link.clone())
        } else {
            None
        }
    }

    fn next_link(&mut self) -> Option<EntityReferenceLink> {
        let link = self.links.get(self.position).cloned();
        self.position += 1;
        link
    }
}

// Check single link payload with context URI.
#[test]
fn single_link_test() -> Result<(), Error> {
    let builder = builder(None)?;
    let mut writer = JsonTextWriter::new();
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_link(&link(1)?, None)?;
    assert_eq!(
        writer.to_json()?,
        json!({
            "odata.metadata": "http://svc/$metadata#$ref",
            "url": "http://svc/People(1)",
        })
    );
    assert_eq!(writer.top_level_names(), [ODATA_METADATA, "url"]);
    Ok(())
}

// Check that known count and next page link are written before links.
#[test]
fn count_and_next_link_before_value_test() -> Result<(), Error> {
    let builder = builder(None)?;
    let mut links = EntityReferenceLinks::new(vec![link(1)?, link(2)?])
        .with_count(2)
        .with_next_page_link(next_page()?);
    let mut writer = JsonTextWriter::new();
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_links(&mut links, None)?;
    assert_eq!(
        writer.top_level_names(),
        [ODATA_METADATA, ODATA_COUNT, ODATA_NEXT_LINK, "value"]
    );
    assert_eq!(
        writer.to_json()?,
        json!({
            "odata.metadata": "http://svc/$metadata#Collection($ref)",
            "odata.count": 2,
            "odata.nextLink": "http://svc/People(0)/Friends/$ref?$skiptoken=2",
            "value": [
                { "url": "http://svc/People(1)" },
                { "url": "http://svc/People(2)" },
            ],
        })
    );
    Ok(())
}

// Check that count and next page link revealed by exhausted source are
// written after links, once.
#[test]
fn count_and_next_link_after_value_test() -> Result<(), Error> {
    let builder = builder(None)?;
    let mut links = Streamed {
        links: vec![link(1)?, link(2)?, link(3)?],
        position: 0,
        next_page_link: next_page()?,
    };
    let mut writer = JsonTextWriter::new();
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_links(&mut links, None)?;
    assert_eq!(
        writer.top_level_names(),
        [ODATA_METADATA, "value", ODATA_COUNT, ODATA_NEXT_LINK]
    );
    let json = writer.to_json()?;
    assert_eq!(json[ODATA_COUNT], json!(3));
    assert_eq!(
        json["value"].as_array().map(Vec::len),
        Some(3),
        "links: {}",
        json
    );
    Ok(())
}

// Check that empty source writes empty array and nothing else.
#[test]
fn empty_links_test() -> Result<(), Error> {
    let builder = ContextUriBuilder::Null;
    let mut links = EntityReferenceLinks::new(Vec::new());
    let mut writer = JsonTextWriter::new();
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_links(&mut links, None)?;
    assert_eq!(writer.as_str(), r#"{"value":[]}"#);
    Ok(())
}

// Check that request payloads carry no context URI.
#[test]
fn null_builder_test() -> Result<(), Error> {
    let builder = ContextUriBuilder::Null;
    let mut writer = JsonTextWriter::new();
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_link(&link(7)?, None)?;
    assert_eq!(writer.as_str(), r#"{"url":"http://svc/People(7)"}"#);
    Ok(())
}

// Check that context URIs of navigation-qualified payloads parse back to
// the navigation property.
#[test]
fn navigation_context_uri_test() -> Result<(), Error> {
    let model = model()?;
    let builder = builder(None)?;
    let friends = ReferenceLinkContext::new("People", Some("Friends")).collection_navigation();

    let mut writer = JsonTextWriter::new();
    let mut links = EntityReferenceLinks::new(vec![link(2)?]);
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_links(&mut links, Some(&friends))?;
    let json = writer.to_json()?;
    let context_uri = json[ODATA_METADATA]
        .as_str()
        .ok_or(Error::ExpectedProperty(ODATA_METADATA))?;
    assert_eq!(context_uri, "http://svc/$metadata#People/$ref/Friends");
    let result = parse(&model, Some(context_uri), PayloadKind::EntityReferenceLinks)?;
    let property = result
        .navigation_property()
        .ok_or(Error::ExpectedProperty("navigation_property"))?;
    assert_eq!(property.name, "Friends");
    assert!(property.is_collection());

    let mut writer = JsonTextWriter::new();
    ReferenceLinkSerializer::new(&mut writer, &builder)
        .write_entity_reference_link(&link(2)?, Some(&friends))?;
    let json = writer.to_json()?;
    let context_uri = json[ODATA_METADATA]
        .as_str()
        .ok_or(Error::ExpectedProperty(ODATA_METADATA))?;
    assert_eq!(
        context_uri,
        "http://svc/$metadata#People/$ref/Friends/@Element"
    );
    let result = parse(&model, Some(context_uri), PayloadKind::EntityReferenceLink)?;
    assert_eq!(
        result.detected_payload_kinds(),
        [PayloadKind::EntityReferenceLink]
    );
    Ok(())
}

// Check that writer errors are returned unchanged at every token.
#[test]
fn writer_error_test() -> Result<(), Error> {
    let builder = builder(None)?;
    for limit in 0..12 {
        let mut writer = JsonTextWriter::failing_after(limit);
        let mut links = EntityReferenceLinks::new(vec![link(1)?, link(2)?]).with_count(2);
        let result = ReferenceLinkSerializer::new(&mut writer, &builder)
            .write_entity_reference_links(&mut links, None);
        match result {
            Err(MockError::Injected(token)) => assert_eq!(token, limit + 1),
            other => panic!("unexpected result at limit {}: {:?}", limit, other),
        }
    }
    Ok(())
}
