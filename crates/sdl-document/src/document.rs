use crate::file_reader;
use crate::BindingOptions;
use crate::LoadError;
use crate::SyntaxError;
use indexmap::IndexMap;
use sdl_parser::ast;
use sdl_parser::ast::DirectiveDefinition;
use sdl_parser::ast::RootOperationKind;
use sdl_parser::ast::SchemaDefinition;
use sdl_parser::ast::TypeDefinition;
use sdl_parser::ast::TypeExtension;
use sdl_parser::SdlParser;
use serde::Deserialize;
use serde::Serialize;
use std::path::Path;

/// The definitions of an SDL schema, keyed by name.
///
/// Types and directives live in separate namespaces. Within each, names are
/// unique: writing a definition whose name is already present replaces the
/// old node in full while keeping its original position in iteration order.
///
/// The model-class index ([`class_name_to_type_name`]) is derived from the
/// binding annotations on the stored types and is rebuilt after every
/// mutation.
///
/// [`class_name_to_type_name`]: Self::class_name_to_type_name
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Document {
    pub(crate) types: IndexMap<String, TypeDefinition>,
    pub(crate) directives: IndexMap<String, DirectiveDefinition>,
    pub(crate) type_extensions: IndexMap<String, Vec<TypeExtension>>,
    pub(crate) schema_definition: Option<SchemaDefinition>,
    pub(crate) class_name_to_type_name: IndexMap<String, String>,
    pub(crate) binding_options: BindingOptions,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses one SDL source. Later definitions of a name replace earlier
    /// ones.
    ///
    /// Fails with every syntax error in the source; no partial document is
    /// returned.
    pub fn parse(source: &str) -> Result<Self, SyntaxError> {
        let (ast, errors) = SdlParser::new(source)
            .parse_schema_document()
            .into_parts();
        Self::from_parse_parts(source, ast, errors)
    }

    /// Like [`parse`](Self::parse), but error spans name `file_path`.
    pub fn parse_with_file_path(
        source: &str,
        file_path: &Path,
    ) -> Result<Self, SyntaxError> {
        let (ast, errors) = SdlParser::with_file_path(source, file_path)
            .parse_schema_document()
            .into_parts();
        Self::from_parse_parts(source, ast, errors)
    }

    fn from_parse_parts(
        source: &str,
        ast: Option<ast::Document>,
        errors: Vec<sdl_parser::ParseError>,
    ) -> Result<Self, SyntaxError> {
        match ast {
            Some(ast) if errors.is_empty() => Ok(Self::from_ast(ast)),
            _ => Err(SyntaxError::new(errors, source)),
        }
    }

    pub fn from_file(file_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file_path = file_path.as_ref();
        let content = file_reader::read_content(file_path)?;
        log::debug!("Parsing {file_path:?} ({} bytes).", content.len());
        Self::parse_with_file_path(&content, file_path).map_err(|err| {
            LoadError::Syntax {
                file_path: file_path.to_path_buf(),
                source_text: content.clone(),
                err,
            }
        })
    }

    /// Loads each file in order and merges them, so definitions in later
    /// files replace those in earlier ones.
    pub fn from_files<P: AsRef<Path>>(
        file_paths: impl IntoIterator<Item = P>,
    ) -> Result<Self, LoadError> {
        let mut document = Self::new();
        for file_path in file_paths {
            document.merge(Self::from_file(file_path)?);
        }
        Ok(document)
    }

    /// Collects a parsed AST into a document.
    ///
    /// `extend schema` blocks are folded into the schema definition;
    /// `extend <type>` blocks are stored per type name.
    pub fn from_ast(ast: ast::Document) -> Self {
        let mut document = Self::new();
        for definition in ast.definitions {
            match definition {
                ast::Definition::Type(def) => {
                    document.insert_type(def);
                },
                ast::Definition::Directive(def) => {
                    document.insert_directive(def);
                },
                ast::Definition::TypeExtension(ext) => {
                    document.push_type_extension(ext);
                },
                ast::Definition::Schema(schema) => {
                    document.replace_schema_definition(schema);
                },
                ast::Definition::SchemaExtension(ext) => {
                    document
                        .schema_definition
                        .get_or_insert_with(|| SchemaDefinition {
                            position: ext.position,
                            ..Default::default()
                        })
                        .apply_extension(&ext);
                },
            }
        }
        document.rebuild_class_index();
        document
    }

    // =========================================================================
    // Read access
    // =========================================================================

    pub fn types(&self) -> &IndexMap<String, TypeDefinition> {
        &self.types
    }

    pub fn type_definition(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    pub fn directives(&self) -> &IndexMap<String, DirectiveDefinition> {
        &self.directives
    }

    pub fn directive(&self, name: &str) -> Option<&DirectiveDefinition> {
        self.directives.get(name)
    }

    /// Model class name to the name of the type bound to it.
    pub fn class_name_to_type_name(&self) -> &IndexMap<String, String> {
        &self.class_name_to_type_name
    }

    pub fn type_name_for_class(&self, class_name: &str) -> Option<&str> {
        self.class_name_to_type_name
            .get(class_name)
            .map(String::as_str)
    }

    /// Extensions of `type_name`, in the order they were added.
    pub fn type_extensions(&self, type_name: &str) -> &[TypeExtension] {
        self.type_extensions
            .get(type_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn all_type_extensions(&self) -> &IndexMap<String, Vec<TypeExtension>> {
        &self.type_extensions
    }

    pub fn schema_definition(&self) -> Option<&SchemaDefinition> {
        self.schema_definition.as_ref()
    }

    pub fn binding_options(&self) -> &BindingOptions {
        &self.binding_options
    }

    /// Name of the root type for `kind`: the `schema { ... }` entry if one
    /// is set, otherwise `Query`, `Mutation` or `Subscription`.
    pub fn root_type_name(&self, kind: RootOperationKind) -> &str {
        self.schema_definition
            .as_ref()
            .and_then(|schema| schema.root_type_name(kind))
            .unwrap_or(kind.default_type_name())
    }

    pub fn root_type(&self, kind: RootOperationKind) -> Option<&TypeDefinition> {
        self.types.get(self.root_type_name(kind))
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
            && self.directives.is_empty()
            && self.type_extensions.is_empty()
            && self.schema_definition.is_none()
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Stores `def` under its own name, replacing (and returning) any type
    /// already stored under that name.
    pub fn set_type(&mut self, def: TypeDefinition) -> Option<TypeDefinition> {
        let replaced = self.insert_type(def);
        self.rebuild_class_index();
        replaced
    }

    /// Stores `def` under its own name, replacing (and returning) any
    /// directive already stored under that name.
    pub fn set_directive(
        &mut self,
        def: DirectiveDefinition,
    ) -> Option<DirectiveDefinition> {
        self.insert_directive(def)
    }

    /// Removes a type, keeping the order of the remaining ones. Its
    /// extensions are kept.
    pub fn remove_type(&mut self, name: &str) -> Option<TypeDefinition> {
        let removed = self.types.shift_remove(name);
        if removed.is_some() {
            log::debug!("Removed type `{name}`.");
            self.rebuild_class_index();
        }
        removed
    }

    pub fn add_type_extension(&mut self, ext: TypeExtension) {
        self.push_type_extension(ext);
    }

    /// Replaces the `schema { ... }` block, returning the previous one.
    pub fn set_schema_definition(
        &mut self,
        schema: SchemaDefinition,
    ) -> Option<SchemaDefinition> {
        self.replace_schema_definition(schema)
    }

    /// Changes which annotation binds types to model classes and rebuilds
    /// the index accordingly.
    pub fn set_binding_options(&mut self, options: BindingOptions) {
        self.binding_options = options;
        self.rebuild_class_index();
    }

    pub fn with_binding_options(mut self, options: BindingOptions) -> Self {
        self.set_binding_options(options);
        self
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Inserts without rebuilding the class index.
    pub(crate) fn insert_type(&mut self, def: TypeDefinition) -> Option<TypeDefinition> {
        let name = def.name().to_string();
        let replaced = self.types.insert(name, def);
        if let Some(old) = &replaced {
            log::debug!(
                "Replaced {} `{}` defined at {}.",
                old.keyword(),
                old.name(),
                old.position(),
            );
        }
        replaced
    }

    pub(crate) fn insert_directive(
        &mut self,
        def: DirectiveDefinition,
    ) -> Option<DirectiveDefinition> {
        let name = def.name().to_string();
        let replaced = self.directives.insert(name, def);
        if let Some(old) = &replaced {
            log::debug!(
                "Replaced directive `@{}` defined at {}.",
                old.name(),
                old.position(),
            );
        }
        replaced
    }

    pub(crate) fn push_type_extension(&mut self, ext: TypeExtension) {
        log::trace!("Adding extension of `{}`.", ext.name());
        self.type_extensions
            .entry(ext.name().to_string())
            .or_default()
            .push(ext);
    }

    pub(crate) fn replace_schema_definition(
        &mut self,
        schema: SchemaDefinition,
    ) -> Option<SchemaDefinition> {
        let replaced = self.schema_definition.replace(schema);
        if let Some(old) = &replaced {
            log::debug!("Replaced schema definition at {}.", old.position);
        }
        replaced
    }

    pub(crate) fn rebuild_class_index(&mut self) {
        self.class_name_to_type_name = self.derive_class_index();
    }

    /// The class index as implied by the stored types' binding annotations,
    /// without any canonicalization. Later types win when two bind the same
    /// class.
    pub(crate) fn derive_class_index(&self) -> IndexMap<String, String> {
        let mut index = IndexMap::new();
        for (type_name, def) in &self.types {
            if let Some(Ok(class_name)) = crate::bindings::binding_class(def, &self.binding_options) {
                index.insert(class_name.to_string(), type_name.clone());
            }
        }
        index
    }

    /// Replaces the class index wholesale. Used by the resolver, which
    /// indexes canonical class names.
    pub(crate) fn set_class_index(&mut self, index: IndexMap<String, String>) {
        self.class_name_to_type_name = index;
    }
}

impl From<ast::Document> for Document {
    fn from(ast: ast::Document) -> Self {
        Self::from_ast(ast)
    }
}
