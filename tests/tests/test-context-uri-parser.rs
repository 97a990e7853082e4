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
use odata_jsonlight_core::context_uri::ContextUriParseResult;
use odata_jsonlight_core::edm::EdmTypeRef;
use odata_jsonlight_core::edm::PrimitiveKind;
use odata_jsonlight_core::Error as ContextUriError;
use odata_jsonlight_core::PayloadKind;
use odata_jsonlight_core::SchemaOracle;
use odata_jsonlight_edm_mock::Model;
use odata_jsonlight_tests::base::context_uri;
use odata_jsonlight_tests::base::model;
use odata_jsonlight_tests::Error;
use odata_jsonlight_tests::METADATA;

fn parse_fragment(
    model: &Model,
    fragment: &str,
    expected: PayloadKind,
) -> Result<ContextUriParseResult, ContextUriError> {
    parse(model, Some(context_uri(fragment).as_str()), expected)
}

fn entity(model: &Model, name: &'static str) -> Result<EdmTypeRef, Error> {
    model
        .structured_type(name)
        .map(EdmTypeRef::Entity)
        .ok_or(Error::ExpectedProperty(name))
}

// Check that context URI without fragment describes service document.
#[test]
fn service_document_test() -> Result<(), Error> {
    let model = model()?;
    let result = parse(&model, Some(METADATA), PayloadKind::ServiceDocument)?;
    assert_eq!(
        result.detected_payload_kinds(),
        [PayloadKind::ServiceDocument]
    );
    assert_eq!(result.metadata_document_uri().as_str(), METADATA);
    assert_eq!(result.fragment(), "");
    assert_eq!(result.edm_type(), None);

    let result = parse_fragment(&model, "", PayloadKind::Unsupported)?;
    assert_eq!(
        result.detected_payload_kinds(),
        [PayloadKind::ServiceDocument]
    );
    assert_eq!(result.metadata_document_uri().as_str(), METADATA);
    Ok(())
}

// Check that absent and malformed context URIs are rejected.
#[test]
fn invalid_context_uri_test() -> Result<(), Error> {
    let model = model()?;
    assert_eq!(
        parse(&model, None, PayloadKind::Feed).err(),
        Some(ContextUriError::NullMetadataDocumentUri)
    );
    assert!(matches!(
        parse(&model, Some("$metadata#People"), PayloadKind::Feed),
        Err(ContextUriError::InvalidUri(uri, _)) if uri == "$metadata#People"
    ));
    assert!(matches!(
        parse(&model, Some("http://svc:badport/$metadata"), PayloadKind::Unsupported),
        Err(ContextUriError::InvalidUri(_, _))
    ));
    Ok(())
}

// Check that `Null` marker is matched regardless of letter case.
#[test]
fn null_property_test() -> Result<(), Error> {
    let model = model()?;
    for fragment in &["Null", "null", "NULL", "nUlL"] {
        let result = parse_fragment(&model, fragment, PayloadKind::Property)?;
        assert!(result.is_null_property());
        assert_eq!(result.detected_payload_kinds(), [PayloadKind::Property]);
        assert_eq!(result.edm_type(), None);
        assert_eq!(result.entity_set(), None);
    }
    Ok(())
}

// Check feed and entry fragments with and without type cast.
#[test]
fn feed_and_entry_test() -> Result<(), Error> {
    let model = model()?;
    let person = entity(&model, "NS.Person")?;
    let manager = entity(&model, "NS.Manager")?;
    let cases = vec![
        ("People", PayloadKind::Feed, &person),
        ("People/@Element", PayloadKind::Entry, &person),
        ("People/NS.Manager", PayloadKind::Feed, &manager),
        ("People/NS.Manager/@Element", PayloadKind::Entry, &manager),
        ("People/NS.Person/@Element", PayloadKind::Entry, &person),
    ];
    for (fragment, kind, edm_type) in cases {
        let result = parse_fragment(&model, fragment, kind)?;
        assert_eq!(result.detected_payload_kinds(), [kind]);
        assert_eq!(result.edm_type(), Some(edm_type));
        let entity_set = result
            .entity_set()
            .ok_or(Error::ExpectedProperty("entity_set"))?;
        assert_eq!(entity_set.name, "People");
        assert_eq!(result.navigation_property(), None);
        assert_eq!(result.select_query_option(), None);
        assert!(!result.is_null_property());
    }
    Ok(())
}

// Check that sets of non-default containers are container qualified.
#[test]
fn non_default_container_test() -> Result<(), Error> {
    let model = model()?;
    let result = parse_fragment(&model, "NS.Archive.OldPeople/@Element", PayloadKind::Entry)?;
    let entity_set = result
        .entity_set()
        .ok_or(Error::ExpectedProperty("entity_set"))?;
    assert_eq!(entity_set.name, "OldPeople");
    assert_eq!(entity_set.context_name(), "NS.Archive.OldPeople");
    assert_eq!(
        parse_fragment(&model, "OldPeople", PayloadKind::Feed).err(),
        Some(ContextUriError::UnresolvableEntitySetOrTypeName(
            "OldPeople".into()
        ))
    );
    Ok(())
}

// Check type cast resolution failures.
#[test]
fn type_cast_errors_test() -> Result<(), Error> {
    let model = model()?;
    let cases = vec![
        (
            "People/NS.Car/@Element",
            ContextUriError::IncompatibleTypeCast("People".into(), "NS.Car".into()),
        ),
        (
            "Cars/NS.Manager",
            ContextUriError::IncompatibleTypeCast("Cars".into(), "NS.Manager".into()),
        ),
        (
            "People/NS.Address",
            ContextUriError::UnresolvableTypeCast("NS.Address".into()),
        ),
        (
            "People/NS.Missing/@Element",
            ContextUriError::UnresolvableTypeCast("NS.Missing".into()),
        ),
        (
            "People/@element",
            ContextUriError::UnresolvableTypeCast("@element".into()),
        ),
        (
            "Planets/@Element",
            ContextUriError::UnresolvableEntitySet("Planets".into()),
        ),
        (
            "People/NS.Manager/Element",
            ContextUriError::InvalidItemSelectorSuffix("Element".into()),
        ),
        (
            "People/NS.Manager/@Element/Extra",
            ContextUriError::TooManyFragmentSegments("People/NS.Manager/@Element/Extra".into()),
        ),
    ];
    for (fragment, err) in cases {
        assert_eq!(
            parse_fragment(&model, fragment, PayloadKind::Unsupported).err(),
            Some(err)
        );
    }
    Ok(())
}

// Check property and collection fragments.
#[test]
fn property_and_collection_test() -> Result<(), Error> {
    let model = model()?;
    let string = EdmTypeRef::Primitive(PrimitiveKind::String);

    let result = parse_fragment(&model, "Edm.String", PayloadKind::Property)?;
    assert_eq!(result.edm_type(), Some(&string));
    assert_eq!(result.detected_payload_kinds(), [PayloadKind::Property]);

    let result = parse_fragment(&model, "NS.Address", PayloadKind::Property)?;
    assert!(matches!(result.edm_type(), Some(EdmTypeRef::Complex(t)) if t.name.to_string() == "NS.Address"));

    for expected in &[
        PayloadKind::Property,
        PayloadKind::Collection,
        PayloadKind::Unsupported,
    ] {
        let result = parse_fragment(&model, "Collection(Edm.String)", *expected)?;
        assert_eq!(
            result.edm_type(),
            Some(&EdmTypeRef::collection_of(string.clone()))
        );
        assert_eq!(
            result.detected_payload_kinds(),
            [PayloadKind::Collection, PayloadKind::Property]
        );
    }

    let result = parse(
        &model,
        Some("http://svc/$metadata#Collection%28NS.Address%29"),
        PayloadKind::Collection,
    )?;
    assert_eq!(result.fragment(), "Collection(NS.Address)");
    assert!(matches!(result.edm_type(), Some(EdmTypeRef::Collection(_))));
    Ok(())
}

// Check that entity types and unknown names are not properties.
#[test]
fn unresolvable_bare_segment_test() -> Result<(), Error> {
    let model = model()?;
    for fragment in &[
        "NS.Person",
        "NS.Missing",
        "Collection(NS.Person)",
        "Collection(NS.Missing)",
        "people",
        "edm.string",
    ] {
        assert_eq!(
            parse_fragment(&model, fragment, PayloadKind::Unsupported).err(),
            Some(ContextUriError::UnresolvableEntitySetOrTypeName(
                fragment.to_string()
            ))
        );
    }
    Ok(())
}

// Check that entity set wins over type of the same name.
#[test]
fn entity_set_before_type_test() -> Result<(), Error> {
    let model = model()?.complex_type("NS.Archive.OldPeople", None)?;
    assert!(matches!(
        model.resolve_type("NS.Archive.OldPeople"),
        Some(EdmTypeRef::Complex(_))
    ));
    let result = parse_fragment(&model, "NS.Archive.OldPeople", PayloadKind::Unsupported)?;
    assert_eq!(result.detected_payload_kinds(), [PayloadKind::Feed]);
    assert_eq!(
        result.entity_set().map(|set| set.context_name()),
        Some("NS.Archive.OldPeople".to_string())
    );
    assert_eq!(result.edm_type(), Some(&entity(&model, "NS.Person")?));

    let result = parse_fragment(
        &model,
        "Collection(NS.Archive.OldPeople)",
        PayloadKind::Property,
    )?;
    assert_eq!(result.entity_set(), None);
    assert_eq!(
        result.detected_payload_kinds(),
        [PayloadKind::Collection, PayloadKind::Property]
    );
    Ok(())
}

// Check detected kind against expected kind.
#[test]
fn payload_kind_mismatch_test() -> Result<(), Error> {
    let model = model()?;
    let cases = vec![
        ("People", PayloadKind::Entry, PayloadKind::Feed),
        ("People/@Element", PayloadKind::Feed, PayloadKind::Entry),
        ("Collection(Edm.Int32)", PayloadKind::Feed, PayloadKind::Collection),
        ("Edm.String", PayloadKind::Collection, PayloadKind::Property),
        ("$ref", PayloadKind::EntityReferenceLinks, PayloadKind::EntityReferenceLink),
        ("", PayloadKind::Feed, PayloadKind::ServiceDocument),
    ];
    for (fragment, expected, detected) in cases {
        assert_eq!(
            parse_fragment(&model, fragment, expected).err(),
            Some(ContextUriError::PayloadKindMismatch { expected, detected })
        );
    }
    Ok(())
}

// Check select query option extraction.
#[test]
fn select_query_option_test() -> Result<(), Error> {
    let model = model()?;
    let result = parse_fragment(&model, "People&$select=Name,Age", PayloadKind::Feed)?;
    assert_eq!(result.select_query_option(), Some("Name,Age"));
    assert_eq!(result.fragment(), "People&$select=Name,Age");

    let result = parse_fragment(
        &model,
        "People/NS.Manager/@Element&$select= Name ",
        PayloadKind::Entry,
    )?;
    assert_eq!(result.select_query_option(), Some("Name"));
    assert_eq!(result.edm_type(), Some(&entity(&model, "NS.Manager")?));

    let result = parse_fragment(&model, "People&$select=", PayloadKind::Feed)?;
    assert_eq!(result.select_query_option(), Some(""));

    let cases = vec![
        ("Edm.String&$select=Name", PayloadKind::Property),
        ("Collection(Edm.String)&$select=", PayloadKind::Collection),
        ("$ref&$select=Name", PayloadKind::EntityReferenceLink),
        ("&$select=Name", PayloadKind::ServiceDocument),
    ];
    for (fragment, kind) in cases {
        assert_eq!(
            parse_fragment(&model, fragment, PayloadKind::Unsupported).err(),
            Some(ContextUriError::InvalidSelectWithPayloadKind(kind))
        );
    }
    Ok(())
}

// Check bare entity reference link fragments.
#[test]
fn entity_reference_link_test() -> Result<(), Error> {
    let model = model()?;
    let result = parse_fragment(&model, "$ref", PayloadKind::EntityReferenceLink)?;
    assert_eq!(result.edm_type(), None);
    assert_eq!(result.entity_set(), None);
    let result = parse_fragment(&model, "Collection($ref)", PayloadKind::EntityReferenceLinks)?;
    assert_eq!(
        result.detected_payload_kinds(),
        [PayloadKind::EntityReferenceLinks]
    );
    assert_eq!(
        parse_fragment(&model, "$REF", PayloadKind::Unsupported).err(),
        Some(ContextUriError::UnresolvableEntitySetOrTypeName("$REF".into()))
    );
    Ok(())
}

// Check navigation-qualified entity reference link fragments.
#[test]
fn navigation_reference_link_test() -> Result<(), Error> {
    let model = model()?;
    let cases = vec![
        ("People/$ref/Friends", PayloadKind::EntityReferenceLinks, "Friends"),
        ("People/$ref/Friends/@Element", PayloadKind::EntityReferenceLink, "Friends"),
        ("People/$ref/BestFriend", PayloadKind::EntityReferenceLink, "BestFriend"),
        ("People/NS.Employee/$ref/Car", PayloadKind::EntityReferenceLink, "Car"),
        ("People/NS.Manager/$ref/Car", PayloadKind::EntityReferenceLink, "Car"),
        ("People/NS.Manager/$ref/Reports/@Element", PayloadKind::EntityReferenceLink, "Reports"),
        ("People/$links/Friends", PayloadKind::EntityReferenceLinks, "Friends"),
    ];
    for (fragment, kind, property) in cases {
        let result = parse_fragment(&model, fragment, kind)?;
        assert_eq!(result.detected_payload_kinds(), [kind]);
        assert_eq!(result.edm_type(), None);
        let navigation_property = result
            .navigation_property()
            .ok_or(Error::ExpectedProperty("navigation_property"))?;
        assert_eq!(navigation_property.name, property);
        assert_eq!(
            result.entity_set().map(|set| set.name.as_str()),
            Some("People")
        );
    }
    Ok(())
}

// Check entity reference link grammar violations.
#[test]
fn navigation_reference_link_errors_test() -> Result<(), Error> {
    let model = model()?;
    let person = model
        .structured_type("NS.Person")
        .ok_or(Error::ExpectedProperty("NS.Person"))?
        .name;
    let cases = vec![
        (
            "People/$ref/BestFriend/@Element",
            ContextUriError::InvalidSingletonNavPropertyForEntityReferenceLinkUri(
                "BestFriend".into(),
            ),
        ),
        (
            "People/$ref/Friends/Element",
            ContextUriError::InvalidEntityReferenceLinkSuffix("Element".into()),
        ),
        (
            "People/$ref/Car",
            ContextUriError::UnresolvableNavigationProperty(person, "Car".into()),
        ),
        (
            "People/NS.Car/$ref/Friends",
            ContextUriError::IncompatibleTypeCast("People".into(), "NS.Car".into()),
        ),
        (
            "Planets/$ref/Friends",
            ContextUriError::UnresolvableEntitySet("Planets".into()),
        ),
    ];
    for (fragment, err) in cases {
        assert_eq!(
            parse_fragment(&model, fragment, PayloadKind::Unsupported).err(),
            Some(err)
        );
    }
    Ok(())
}
