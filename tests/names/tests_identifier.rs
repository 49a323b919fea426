//! Qualified-name parsing tests.

use odata_annotation::names::{Identifier, Parameter, ParsedName, parse_identifier};
use rstest::rstest;

// =============================================================================
// PLAIN IDENTIFIERS
// =============================================================================

#[rstest]
#[case("LineItem", None, "LineItem")]
#[case("UI.LineItem", Some("UI"), "LineItem")]
#[case("com.sap.vocabularies.UI.v1.LineItem", Some("com.sap.vocabularies.UI.v1"), "LineItem")]
#[case("UI.", Some("UI"), "")]
#[case("", None, "")]
fn test_plain_identifier(
    #[case] input: &str,
    #[case] namespace: Option<&str>,
    #[case] name: &str,
) {
    assert_eq!(
        parse_identifier(input),
        ParsedName::Identifier(Identifier {
            namespace_or_alias: namespace.map(str::to_string),
            name: name.to_string(),
            raw: input.to_string(),
        })
    );
}

// =============================================================================
// COLLECTIONS
// =============================================================================

#[rstest]
#[case("Collection(com.sap.vocabularies.UI.v1.DataField)")]
#[case("Collection(com.sap.vocabularies.UI.v1.DataField")]
fn test_collection_tolerates_missing_paren(#[case] input: &str) {
    assert_eq!(
        parse_identifier(input),
        ParsedName::Collection(Identifier {
            namespace_or_alias: Some("com.sap.vocabularies.UI.v1".to_string()),
            name: "DataField".to_string(),
            raw: "com.sap.vocabularies.UI.v1.DataField".to_string(),
        })
    );
}

#[test]
fn test_collection_prefix_is_case_sensitive() {
    assert!(matches!(
        parse_identifier("collection(UI.DataField)"),
        ParsedName::ActionFunction(_)
    ));
}

// =============================================================================
// ACTIONS AND FUNCTIONS
// =============================================================================

#[test]
fn test_bound_action_signature() {
    let parsed = parse_identifier(
        "MySchema.MyAction(Collection(MySchema.MyBindingType),Collection(MySchema.MyType))",
    );
    let ParsedName::ActionFunction(action) = parsed else {
        panic!("expected action-function, got {parsed:?}");
    };
    assert_eq!(action.namespace_or_alias.as_deref(), Some("MySchema"));
    assert_eq!(action.name, "MyAction");
    assert_eq!(action.parameters.len(), 2);
    for parameter in &action.parameters {
        let Parameter::Collection(identifier) = parameter else {
            panic!("expected collection parameter, got {parameter:?}");
        };
        assert_eq!(identifier.namespace_or_alias.as_deref(), Some("MySchema"));
    }
}

#[test]
fn test_mixed_parameters() {
    let ParsedName::ActionFunction(action) =
        parse_identifier("S.GetTotal(S.Order, Collection(Edm.String))")
    else {
        panic!("expected action-function");
    };
    assert_eq!(
        action.parameters,
        vec![
            Parameter::Identifier(Identifier::new(Some("S"), "Order")),
            Parameter::Collection(Identifier::new(Some("Edm"), "String")),
        ]
    );
}

#[test]
fn test_unqualified_function() {
    let parsed = parse_identifier("GetTotal()");
    assert_eq!(parsed.namespace_or_alias(), None);
    assert_eq!(parsed.name(), "GetTotal");
    assert_eq!(parsed.raw(), "GetTotal()");
}

#[test]
fn test_partially_typed_signature() {
    // Typing has just started on the parameter list
    let ParsedName::ActionFunction(action) = parse_identifier("S.Act(") else {
        panic!("expected action-function");
    };
    assert!(action.parameters.is_empty());

    let ParsedName::ActionFunction(action) = parse_identifier("S.Act(Collection(S.Ord") else {
        panic!("expected action-function");
    };
    assert_eq!(
        action.parameters,
        vec![Parameter::Collection(Identifier::new(Some("S"), "Ord"))]
    );
}
