use crate::BindingOptions;
use crate::ClassRegistry;
use crate::DefinitionError;
use crate::Document;
use crate::ResolvedDocument;
use indexmap::IndexMap;
use sdl_parser::ast::TypeDefinition;
use sdl_parser::ast::Value;

/// A model class bound by more than one type.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DuplicateBinding {
    pub class_name: String,
    /// Every type binding the class, in document order. The last one is
    /// the one indexed.
    pub type_names: Vec<String>,
}

/// Checks every binding annotation in `document` against `registry` and
/// freezes the document.
///
/// Types are visited in document order. The first binding naming a class
/// the registry does not know fails the whole resolution. The resulting
/// class index is keyed by each class's canonical name; when several types
/// bind the same class the last one wins (see
/// [`Document::duplicate_bindings`]).
pub fn resolve_bindings<R: ClassRegistry + ?Sized>(
    mut document: Document,
    registry: &R,
) -> Result<ResolvedDocument, DefinitionError> {
    let options = document.binding_options().clone();
    let mut index = IndexMap::new();

    for (type_name, def) in document.types() {
        let class_name = match binding_class(def, &options) {
            None => continue,
            Some(result) => result?,
        };
        if !registry.exists(class_name) {
            return Err(DefinitionError::UnknownModelClass {
                class_name: class_name.to_string(),
                directive_name: options.directive_name.clone(),
                type_name: type_name.clone(),
            });
        }
        let canonical = registry
            .canonical_name(class_name)
            .unwrap_or_else(|| class_name.to_string());
        log::trace!("Bound type `{type_name}` to model class `{canonical}`.");
        if let Some(previous) = index.insert(canonical, type_name.clone()) {
            log::debug!(
                "Model class `{class_name}` is bound by both `{previous}` and \
                `{type_name}`; using `{type_name}`.",
            );
        }
    }

    document.set_class_index(index);
    Ok(ResolvedDocument::new(document))
}

/// The class named by `def`'s binding annotation.
///
/// `None` if the type has no binding annotation. Only the first annotation
/// counts when it is repeated.
pub(crate) fn binding_class<'a>(
    def: &'a TypeDefinition,
    options: &BindingOptions,
) -> Option<Result<&'a str, DefinitionError>> {
    let annotation = def
        .directives()
        .iter()
        .find(|annotation| annotation.name == options.directive_name)?;
    Some(match annotation.argument(&options.class_argument) {
        Some(Value::String(class_name)) => Ok(class_name.as_str()),
        other => Err(DefinitionError::InvalidBindingArgument {
            argument_name: options.class_argument.clone(),
            directive_name: options.directive_name.clone(),
            found: other.map_or("nothing", Value::kind_name).to_string(),
            type_name: def.name().to_string(),
        }),
    })
}

impl Document {
    /// Classes bound by more than one type, grouped by the class name as
    /// written.
    ///
    /// Two spellings of one class (`User` and `App\Models\User`) are
    /// only grouped together by [`duplicate_bindings_with`], which knows
    /// their canonical names.
    ///
    /// [`duplicate_bindings_with`]: Self::duplicate_bindings_with
    pub fn duplicate_bindings(&self) -> Vec<DuplicateBinding> {
        self.group_bindings(|class_name| class_name.to_string())
    }

    /// Classes bound by more than one type, grouped by each class's
    /// canonical name in `registry`. These are the collisions
    /// [`resolve_bindings`] settles by keeping the last type. Classes the
    /// registry does not know are grouped as written.
    pub fn duplicate_bindings_with<R: ClassRegistry + ?Sized>(
        &self,
        registry: &R,
    ) -> Vec<DuplicateBinding> {
        self.group_bindings(|class_name| {
            registry
                .canonical_name(class_name)
                .filter(|_| registry.exists(class_name))
                .unwrap_or_else(|| class_name.to_string())
        })
    }

    fn group_bindings(
        &self,
        class_key: impl Fn(&str) -> String,
    ) -> Vec<DuplicateBinding> {
        let mut bound: IndexMap<String, Vec<String>> = IndexMap::new();
        for (type_name, def) in self.types() {
            if let Some(Ok(class_name)) = binding_class(def, self.binding_options()) {
                bound
                    .entry(class_key(class_name))
                    .or_default()
                    .push(type_name.clone());
            }
        }
        bound
            .into_iter()
            .filter(|(_, type_names)| type_names.len() > 1)
            .map(|(class_name, type_names)| DuplicateBinding {
                class_name,
                type_names,
            })
            .collect()
    }
}
