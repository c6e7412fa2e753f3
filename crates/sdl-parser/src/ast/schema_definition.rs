use crate::ast::AstPos;
use crate::ast::DirectiveAnnotation;
use serde::Deserialize;
use serde::Serialize;

/// The three root operation kinds of a schema.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum RootOperationKind {
    Query,
    Mutation,
    Subscription,
}

impl RootOperationKind {
    pub const ALL: [RootOperationKind; 3] = [
        RootOperationKind::Query,
        RootOperationKind::Mutation,
        RootOperationKind::Subscription,
    ];

    /// The keyword used inside `schema { ... }`.
    pub fn keyword(&self) -> &'static str {
        match self {
            RootOperationKind::Query => "query",
            RootOperationKind::Mutation => "mutation",
            RootOperationKind::Subscription => "subscription",
        }
    }

    /// The root type name used when no `schema` block overrides it.
    pub fn default_type_name(&self) -> &'static str {
        match self {
            RootOperationKind::Query => "Query",
            RootOperationKind::Mutation => "Mutation",
            RootOperationKind::Subscription => "Subscription",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "query" => Some(RootOperationKind::Query),
            "mutation" => Some(RootOperationKind::Mutation),
            "subscription" => Some(RootOperationKind::Subscription),
            _ => None,
        }
    }
}

/// `schema { query: Q mutation: M subscription: S }`, or the body of an
/// `extend schema` block.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SchemaDefinition {
    pub position: AstPos,
    pub description: Option<String>,
    pub directives: Vec<DirectiveAnnotation>,
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
}

impl SchemaDefinition {
    pub fn root_type_name(&self, kind: RootOperationKind) -> Option<&str> {
        match kind {
            RootOperationKind::Query => self.query.as_deref(),
            RootOperationKind::Mutation => self.mutation.as_deref(),
            RootOperationKind::Subscription => self.subscription.as_deref(),
        }
    }

    pub fn set_root_type_name(&mut self, kind: RootOperationKind, name: String) {
        match kind {
            RootOperationKind::Query => self.query = Some(name),
            RootOperationKind::Mutation => self.mutation = Some(name),
            RootOperationKind::Subscription => self.subscription = Some(name),
        }
    }

    /// Folds an `extend schema` block into this definition: its root
    /// operations are set and its annotations appended.
    pub fn apply_extension(&mut self, extension: &SchemaDefinition) {
        for kind in RootOperationKind::ALL {
            if let Some(name) = extension.root_type_name(kind) {
                self.set_root_type_name(kind, name.to_string());
            }
        }
        self.directives.extend(extension.directives.iter().cloned());
    }
}
