use std::fmt::Write;

pub const SMALL_SCHEMA: &str = include_str!("small_schema.graphql");

/// A schema with `type_count` model-bound object types, each with a
/// handful of fields that reference their neighbours.
pub fn synthetic_schema(type_count: usize) -> String {
    let mut sdl = String::from("type Query {\n");
    for i in 0..type_count {
        writeln!(sdl, "  entity{i}(id: ID!): Entity{i}").unwrap();
    }
    sdl.push_str("}\n\n");

    for i in 0..type_count {
        let next = (i + 1) % type_count;
        writeln!(
            sdl,
            "\"\"\"\nEntity number {i}.\n\"\"\"\n\
             type Entity{i} @model(class: \"App\\\\Models\\\\Entity{i}\") {{\n  \
               id: ID!\n  \
               name: String\n  \
               score: Float = 1.5\n  \
               tags: [String!]! @deprecated(reason: \"unused\")\n  \
               next(first: Int = 10, filter: Filter = {{ active: true }}): [Entity{next}]\n\
             }}\n",
        )
        .unwrap();
    }
    sdl.push_str("input Filter {\n  active: Boolean\n}\n");
    sdl
}
