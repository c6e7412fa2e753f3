/// A binding annotation that cannot be resolved against the host's model
/// classes.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum DefinitionError {
    #[error(
        "Failed to find a model class for {class_name}, referenced in \
        @{directive_name} on type {type_name}"
    )]
    UnknownModelClass {
        class_name: String,
        directive_name: String,
        type_name: String,
    },

    #[error(
        "The `{argument_name}` argument of @{directive_name} on type \
        {type_name} must be a string, found {found}"
    )]
    InvalidBindingArgument {
        argument_name: String,
        directive_name: String,
        /// Kind of the value given, or `nothing` when the argument is
        /// missing.
        found: String,
        type_name: String,
    },
}
