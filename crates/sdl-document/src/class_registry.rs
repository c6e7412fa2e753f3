use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;
use std::hash::BuildHasher;

/// The host application's knowledge of its model classes.
///
/// [`resolve_bindings`](crate::resolve_bindings) asks the registry whether
/// each class named in a binding annotation exists, and for the name it
/// should be indexed under.
pub trait ClassRegistry {
    fn exists(&self, class_name: &str) -> bool;

    /// The fully qualified name of `class_name`, e.g. `App\Models\User` for
    /// `User`. `None` keeps the name as written.
    fn canonical_name(&self, class_name: &str) -> Option<String> {
        Some(class_name.to_string())
    }
}

impl<S: BuildHasher> ClassRegistry for HashSet<String, S> {
    fn exists(&self, class_name: &str) -> bool {
        self.contains(class_name)
    }
}

impl ClassRegistry for BTreeSet<String> {
    fn exists(&self, class_name: &str) -> bool {
        self.contains(class_name)
    }
}

/// Maps names as written in SDL to their canonical names.
impl<S: BuildHasher> ClassRegistry for HashMap<String, String, S> {
    fn exists(&self, class_name: &str) -> bool {
        self.contains_key(class_name)
    }

    fn canonical_name(&self, class_name: &str) -> Option<String> {
        self.get(class_name).cloned()
    }
}

/// Adapts a lookup closure into a [`ClassRegistry`].
///
/// The closure returns the canonical name of a known class and `None` for
/// an unknown one.
///
/// ```
/// use sdl_document::ClassRegistry;
/// use sdl_document::FnClassRegistry;
///
/// let registry = FnClassRegistry(|name: &str| {
///     (name == "User").then(|| format!("App\\Models\\{name}"))
/// });
/// assert!(registry.exists("User"));
/// assert_eq!(registry.canonical_name("User").as_deref(), Some("App\\Models\\User"));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct FnClassRegistry<F>(pub F);

#[inherent::inherent]
impl<F> ClassRegistry for FnClassRegistry<F>
where
    F: Fn(&str) -> Option<String>,
{
    pub fn exists(&self, class_name: &str) -> bool {
        (self.0)(class_name).is_some()
    }

    pub fn canonical_name(&self, class_name: &str) -> Option<String> {
        (self.0)(class_name)
    }
}
