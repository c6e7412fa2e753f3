use crate::Document;

/// Merges `source` into `target`.
///
/// Every type and directive of `source` replaces the same-named one in
/// `target`; type extensions are appended; a schema definition in `source`
/// replaces `target`'s. The class index is rebuilt once, under `target`'s
/// binding options.
pub fn merge(target: &mut Document, source: Document) {
    target.merge(source);
}

impl Document {
    pub fn merge(&mut self, source: Document) {
        let Document {
            types,
            directives,
            type_extensions,
            schema_definition,
            ..
        } = source;

        log::debug!(
            "Merging {} types and {} directives.",
            types.len(),
            directives.len(),
        );
        for (_, def) in types {
            self.insert_type(def);
        }
        for (_, def) in directives {
            self.insert_directive(def);
        }
        for ext in type_extensions.into_values().flatten() {
            self.push_type_extension(ext);
        }
        if let Some(schema) = schema_definition {
            self.replace_schema_definition(schema);
        }
        self.rebuild_class_index();
    }

    /// Merges `documents` in order into an empty document.
    pub fn merge_all(documents: impl IntoIterator<Item = Document>) -> Document {
        let mut merged = Document::new();
        for document in documents {
            merged.merge(document);
        }
        merged
    }
}
