//! Native statements embedded in `@cypher` directives of remote schemas.

use itertools::Itertools;
use sdl_ast::{
    ModelEntry,
    ast::Field,
    directives::{RelationDirection, RelationInfo},
    fields::{ID, has_unique_directive, is_persisted_property},
};

/// `CREATE (n: <Model> { f: {f}, ... }) RETURN n` over the stored properties.
pub(crate) fn create_node(model: ModelEntry<'_, '_>) -> String {
    let properties = model
        .fields()
        .iter()
        .filter(|f| is_persisted_property(f))
        .map(|f| format!("{0}: {{{0}}}", f.name))
        .join(", ");

    format!("CREATE (n: {} {{ {properties} }}) RETURN n", model.name())
}

/// Matches the owning node by `{where}` and every related node in the field's
/// parameter list, each by a disjunction over its unique fields, then creates the
/// relationship in the declared direction.
///
/// Returns `None` for relations without a name, or with a direction other than
/// `IN` or `OUT`.
pub(crate) fn relate_nodes(
    model: ModelEntry<'_, '_>,
    field: &Field<'_>,
    related: ModelEntry<'_, '_>,
    relation: &RelationInfo,
) -> Option<String> {
    let relation_name = relation.name.as_deref()?;
    let node = format!("_{}Node", model.name());
    let element = format!("_{}", field.name);

    let pattern = match relation.direction? {
        RelationDirection::Out => format!("(root)-[relation: {relation_name}]->({node})"),
        RelationDirection::In => format!("(root)<-[relation: {relation_name}]-({node})"),
        RelationDirection::Both => return None,
    };

    Some(format!(
        "MATCH (root: {model}) WHERE {owner} UNWIND {{{field}}} AS {element} MATCH ({node}: {related}) WHERE {target} CREATE UNIQUE {pattern} RETURN true",
        model = model.name(),
        owner = disjunction("root", &unique_fields(model.fields()), "{where}"),
        field = field.name,
        related = related.name(),
        target = disjunction(&node, &unique_fields(related.fields()), &element),
    ))
}

/// Fields marked unique, in declaration order, with `id` in front if it is not marked.
fn unique_fields<'f>(fields: &'f [Field<'_>]) -> Vec<&'f str> {
    let mut unique: Vec<&str> = fields
        .iter()
        .filter(|f| has_unique_directive(f))
        .map(|f| f.name.as_str())
        .collect();

    if !unique.contains(&ID) {
        unique.insert(0, ID);
    }

    unique
}

fn disjunction(node: &str, fields: &[&str], source: &str) -> String {
    fields
        .iter()
        .map(|field| format!("{node}.{field} = {source}.{field}"))
        .join(" OR ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::expect;
    use sdl_ast::{build_type_maps, fields::relation_info, parse_type_defs};

    const SDL: &str = r#"
        type Person @model {
          id: ID! @unique
          email: String @unique
          name: String
          friends: [Person] @relation(name: "KNOWS", direction: OUT)
          books: [Book] @relation(name: "WROTE", direction: IN)
          score: Int @cypher(statement: "RETURN 1")
        }

        type Book @model {
          title: String
        }
    "#;

    #[test]
    fn create_statement_lists_stored_properties() {
        let doc = parse_type_defs(SDL).unwrap();
        let maps = build_type_maps(&doc).unwrap();
        let person = maps.model(&doc, "Person").unwrap();

        expect![[r#"CREATE (n: Person { id: {id}, email: {email}, name: {name} }) RETURN n"#]]
            .assert_eq(&create_node(person));
    }

    #[test]
    fn relation_statement_follows_direction() {
        let doc = parse_type_defs(SDL).unwrap();
        let maps = build_type_maps(&doc).unwrap();
        let person = maps.model(&doc, "Person").unwrap();
        let book = maps.model(&doc, "Book").unwrap();

        let friends = &person.fields()[3];
        let statement = relate_nodes(person, friends, person, &relation_info(friends).unwrap()).unwrap();

        expect![[r#"MATCH (root: Person) WHERE root.id = {where}.id OR root.email = {where}.email UNWIND {friends} AS _friends MATCH (_PersonNode: Person) WHERE _PersonNode.id = _friends.id OR _PersonNode.email = _friends.email CREATE UNIQUE (root)-[relation: KNOWS]->(_PersonNode) RETURN true"#]]
            .assert_eq(&statement);

        let books = &person.fields()[4];
        let statement = relate_nodes(person, books, book, &relation_info(books).unwrap()).unwrap();

        expect![[r#"MATCH (root: Person) WHERE root.id = {where}.id OR root.email = {where}.email UNWIND {books} AS _books MATCH (_PersonNode: Book) WHERE _PersonNode.id = _books.id CREATE UNIQUE (root)<-[relation: WROTE]-(_PersonNode) RETURN true"#]]
            .assert_eq(&statement);
    }

    #[test]
    fn both_direction_has_no_statement() {
        let doc = parse_type_defs(
            r#"type Person @model { id: ID! @unique friends: [Person] @relation(name: "KNOWS", direction: BOTH) }"#,
        )
        .unwrap();
        let maps = build_type_maps(&doc).unwrap();
        let person = maps.model(&doc, "Person").unwrap();
        let friends = &person.fields()[1];

        assert!(relate_nodes(person, friends, person, &relation_info(friends).unwrap()).is_none());
    }
}
