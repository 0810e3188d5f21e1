//! End-to-end generation tests.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use swagger_ts_core::{
    BoxError, FormatError, FormatOptions, GenerateError, GenerateOptions, Generator,
    PropertyContext, PropertyMapping, SchemaNode, SourceParser, WARNING_MESSAGE, generate,
};

/// Body of the generated interface, without banner.
fn members(output: &str) -> Vec<&str> {
    output
        .lines()
        .filter(|line| line.starts_with("  \""))
        .map(str::trim)
        .collect()
}

fn single_member(definitions: &str) -> String {
    let output = generate(&format!(r#"{{"definitions": {definitions}}}"#)).unwrap();
    let members = members(&output);
    assert_eq!(members.len(), 1, "{output}");
    members[0].to_string()
}

const PETSTORE: &str = r##"{
    "swagger": "2.0",
    "info": {"title": "Petstore", "version": "1.0.0"},
    "paths": {},
    "definitions": {
        "Pet": {
            "type": "object",
            "properties": {
                "name": {"type": "string"},
                "age": {"type": "integer"}
            },
            "required": ["name"]
        },
        "Status": {"type": "string", "enum": ["active", "inactive"]},
        "Owner": {
            "type": "object",
            "properties": {"pet": {"$ref": "#/definitions/Pet"}}
        },
        "ExtendedPet": {
            "allOf": [
                {"$ref": "#/definitions/Pet"},
                {"type": "object", "properties": {"color": {"type": "string"}}}
            ]
        },
        "Dict": {"type": "object", "additionalProperties": {"type": "string"}}
    }
}"##;

#[test]
fn test_petstore_full_output() {
    let output = generate(PETSTORE).unwrap();
    let expected = format!(
        "{WARNING_MESSAGE}\n\n\nexport interface definitions {{\n\
         \x20 \"Pet\": {{ name: string; age?: number }};\n\
         \x20 \"Status\": 'active' | 'inactive';\n\
         \x20 \"Owner\": {{ pet?: definitions['Pet'] }};\n\
         \x20 \"ExtendedPet\": definitions['Pet'] & {{ color?: string }};\n\
         \x20 \"Dict\": {{ [key: string]: string }};\n\
         }}\n"
    );
    assert_eq!(output, expected);
}

#[test]
fn test_primitives_and_required() {
    assert_eq!(
        single_member(
            r#"{"Pet": {"type": "object", "properties": {"name": {"type": "string"}, "age": {"type": "integer"}}, "required": ["name"]}}"#
        ),
        r#""Pet": { name: string; age?: number };"#
    );
}

#[test]
fn test_enum_literal_union() {
    assert_eq!(
        single_member(r#"{"Status": {"type": "string", "enum": ["active", "inactive"]}}"#),
        r#""Status": 'active' | 'inactive';"#
    );
}

#[test]
fn test_additional_properties_dictionary() {
    assert_eq!(
        single_member(r#"{"Dict": {"type": "object", "additionalProperties": {"type": "string"}}}"#),
        r#""Dict": { [key: string]: string };"#
    );
}

#[test]
fn test_empty_object_is_open_dictionary() {
    assert_eq!(
        single_member(r#"{"Anything": {"type": "object", "description": "free-form"}}"#),
        r#""Anything": { [key: string]: any };"#
    );
}

#[test]
fn test_self_reference_is_a_lookup() {
    assert_eq!(
        single_member(
            r##"{"Node": {"type": "object", "properties": {"value": {"type": "number"}, "next": {"$ref": "#/definitions/Node"}, "children": {"type": "array", "items": {"$ref": "#/definitions/Node"}}}, "required": ["value"]}}"##
        ),
        r#""Node": { value: number; next?: definitions['Node']; children?: definitions['Node'][] };"#
    );
}

#[test]
fn test_mutual_references_are_lookups() {
    let output = generate(
        r##"{"definitions": {
            "A": {"type": "object", "properties": {"b": {"$ref": "#/definitions/B"}}},
            "B": {"type": "object", "properties": {"a": {"$ref": "#/definitions/A"}}}
        }}"##,
    )
    .unwrap();
    assert_eq!(
        members(&output),
        [
            r#""A": { b?: definitions['B'] };"#,
            r#""B": { a?: definitions['A'] };"#
        ]
    );
}

#[test]
fn test_deep_nesting_resolves() {
    assert_eq!(
        single_member(
            r#"{"Deep": {"type": "object", "properties": {"a": {"type": "object", "properties": {"b": {"type": "array", "items": {"type": "object", "properties": {"c": {"type": "string", "enum": ["x"]}}, "required": ["c"]}}}}}}}"#
        ),
        r#""Deep": { a?: { b?: { c: 'x' }[] } };"#
    );
}

#[test]
fn test_missing_definitions_is_fatal() {
    let err = generate(r#"{"swagger": "2.0", "paths": {}}"#).unwrap_err();
    assert!(matches!(err, GenerateError::MissingDefinitions));
    assert!(err.to_string().contains("definitions"));
}

#[test]
fn test_invalid_json_is_reported() {
    let err = generate("{ definitions").unwrap_err();
    assert!(matches!(err, GenerateError::InvalidJson(_)));
}

#[test]
fn test_identity_mapper_changes_nothing() {
    let identity = |_: &SchemaNode, context: &PropertyContext| -> Result<PropertyMapping, BoxError> {
        Ok(PropertyMapping::from(context))
    };
    let with_mapper = Generator::default()
        .with_mapper(identity)
        .generate_json(PETSTORE)
        .unwrap();
    assert_eq!(with_mapper, generate(PETSTORE).unwrap());
}

#[test]
fn test_mapper_controls_optionality_and_type() {
    let mapper = |schema: &SchemaNode, context: &PropertyContext| -> Result<PropertyMapping, BoxError> {
        let mut mapping = PropertyMapping::from(context);
        if schema.format.as_deref() == Some("date-time") {
            mapping.declared_type = Some("Date".to_string());
            mapping.optional = false;
        }
        Ok(mapping)
    };
    let output = Generator::default()
        .with_mapper(mapper)
        .generate_json(
            r#"{"definitions": {"Event": {"type": "object", "properties": {
                "at": {"type": "string", "format": "date-time"},
                "note": {"type": "string"}
            }}}}"#,
        )
        .unwrap();
    assert_eq!(members(&output), [r#""Event": { at: Date; note?: string };"#]);
}

#[test]
fn test_mapper_schema_fragment_is_resolved_like_input() {
    let mapper = |_: &SchemaNode, context: &PropertyContext| -> Result<PropertyMapping, BoxError> {
        let mut mapping = PropertyMapping::from(context);
        if context.declared_type.as_deref() == Some("string") {
            mapping.declared_type =
                Some(r##"{"type": "array", "items": {"$ref": "#/definitions/Tag"}}"##.to_string());
        }
        Ok(mapping)
    };
    let output = Generator::default()
        .with_mapper(mapper)
        .generate_json(
            r#"{"definitions": {"Post": {"type": "object", "properties": {"tags": {"type": "string"}}, "required": ["tags"]}}}"#,
        )
        .unwrap();
    assert_eq!(members(&output), [r#""Post": { tags: definitions['Tag'][] };"#]);
}

#[test]
fn test_malformed_fragment_passes_through_verbatim() {
    let mapper = |_: &SchemaNode, context: &PropertyContext| -> Result<PropertyMapping, BoxError> {
        Ok(PropertyMapping {
            declared_type: Some("{ when: Date }".to_string()),
            ..PropertyMapping::from(context)
        })
    };
    let output = Generator::default()
        .with_mapper(mapper)
        .generate_json(
            r#"{"definitions": {"Box": {"type": "object", "properties": {"inner": {"type": "string"}}}}}"#,
        )
        .unwrap();
    assert_eq!(members(&output), [r#""Box": { inner?: { when: Date } };"#]);
}

#[derive(Debug)]
struct Refused(&'static str);

impl fmt::Display for Refused {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "refused {}", self.0)
    }
}

impl std::error::Error for Refused {}

#[test]
fn test_mapper_error_is_passed_through_unchanged() {
    let mapper = |_: &SchemaNode, _: &PropertyContext| -> Result<PropertyMapping, BoxError> {
        Err(Box::new(Refused("age")))
    };
    let err = Generator::default()
        .with_mapper(mapper)
        .generate_json(PETSTORE)
        .unwrap_err();
    assert_eq!(err.to_string(), "refused age");
    let GenerateError::Mapper(inner) = err else {
        panic!("expected a mapper error");
    };
    assert_eq!(inner.downcast_ref::<Refused>().unwrap().0, "age");
}

#[test]
fn test_formatter_runs_once_with_fixed_options() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let formatter = move |source: &str, options: &FormatOptions| -> Result<String, FormatError> {
        counter.set(counter.get() + 1);
        assert_eq!(options.parser, SourceParser::TypeScript);
        assert!(options.single_quote);
        assert!(source.starts_with(WARNING_MESSAGE));
        Ok(format!("// formatted\n{source}"))
    };
    let output = Generator::default()
        .with_formatter(formatter)
        .generate_json(PETSTORE)
        .unwrap();
    assert_eq!(calls.get(), 1);
    assert!(output.starts_with("// formatted\n"));
}

#[test]
fn test_formatter_error_propagates() {
    let formatter = |_: &str, _: &FormatOptions| -> Result<String, FormatError> {
        Err(FormatError::Other("syntax error".to_string()))
    };
    let err = Generator::default()
        .with_formatter(formatter)
        .generate_json(PETSTORE)
        .unwrap_err();
    assert!(matches!(err, GenerateError::Format(FormatError::Other(_))));
    assert_eq!(err.to_string(), "syntax error");
}

#[test]
fn test_yaml_and_json_agree() {
    let yaml = r##"
swagger: "2.0"
definitions:
  Pet:
    type: object
    properties:
      name:
        type: string
      age:
        type: integer
    required:
      - name
  Status:
    type: string
    enum: [active, inactive]
  Owner:
    type: object
    properties:
      pet:
        $ref: "#/definitions/Pet"
  ExtendedPet:
    allOf:
      - $ref: "#/definitions/Pet"
      - type: object
        properties:
          color:
            type: string
  Dict:
    type: object
    additionalProperties:
      type: string
"##;
    let generator = Generator::default();
    assert_eq!(
        generator.generate_yaml(yaml).unwrap(),
        generator.generate_json(PETSTORE).unwrap()
    );
}

#[test]
fn test_custom_container() {
    let output = Generator::new(GenerateOptions {
        container_name: "Models".to_string(),
        ..GenerateOptions::default()
    })
    .generate_json(PETSTORE)
    .unwrap();
    assert!(output.contains("export interface Models {"));
    assert!(output.contains(r#""Owner": { pet?: Models['Pet'] };"#));
}
