use indoc::indoc;
use pretty_assertions::assert_eq;
use sdl_ast::{SchemaError, build_operation_maps, build_type_maps, parse_type_defs};

#[test]
fn models_and_plain_types_are_indexed_by_position() {
    let sdl = indoc! {r#"
        type Person @model {
          name: String
        }

        type Address {
          street: String
        }

        type Query {
          people: [Person]
        }

        type Book @model {
          title: String
        }
    "#};

    let doc = parse_type_defs(sdl).unwrap();
    let maps = build_type_maps(&doc).unwrap();

    let models: Vec<(&str, usize)> = maps.models.iter().map(|(k, v)| (k.as_str(), v.index)).collect();
    let types: Vec<(&str, usize)> = maps.types.iter().map(|(k, v)| (k.as_str(), v.index)).collect();

    assert_eq!(models, vec![("Person", 0), ("Book", 3)]);
    assert_eq!(types, vec![("Address", 1)]);

    let names: Vec<&str> = maps.model_entries(&doc).map(|m| m.name()).collect();
    assert_eq!(names, vec!["Person", "Book"]);
}

#[test]
fn duplicate_model_names_are_rejected() {
    let sdl = indoc! {r#"
        type Person @model { name: String }
        type Person @model { age: Int }
    "#};

    let doc = parse_type_defs(sdl).unwrap();

    match build_type_maps(&doc) {
        Err(SchemaError::DuplicateModel { name }) => assert_eq!(name, "Person"),
        other => panic!("expected a duplicate model error, got {other:?}"),
    }
}

#[test]
fn duplicate_plain_types_keep_the_first_declaration() {
    let sdl = indoc! {r#"
        type Address { street: String }
        type Address { city: String }
    "#};

    let doc = parse_type_defs(sdl).unwrap();
    let maps = build_type_maps(&doc).unwrap();

    assert_eq!(maps.types["Address"].index, 0);
}

#[test]
fn operation_maps_record_field_positions() {
    let sdl = indoc! {r#"
        type Mutation {
          createPerson(name: String): String
          deletePerson(id: ID!): Boolean
        }
    "#};

    let doc = parse_type_defs(sdl).unwrap();
    let maps = build_operation_maps(&doc);

    assert!(maps.queries.is_none());

    let mutations = maps.mutations.unwrap();
    assert_eq!(mutations.index, 0);
    assert!(mutations.contains("deletePerson"));
    assert_eq!(mutations.field(&doc, "deletePerson").unwrap().arguments[0].name, "id");
}
