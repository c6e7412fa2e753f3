/// Contexts where certain names are reserved in SDL.
///
/// Used by [`ParseErrorKind::ReservedName`](crate::ParseErrorKind) to say
/// which construct rejected the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReservedNameContext {
    /// Enum values cannot be `true`, `false`, or `null`.
    ///
    /// Invalid: `enum Maybe { null some }`
    EnumValue,

    /// Names starting with `__` are reserved for introspection.
    ///
    /// Invalid: `type __Secret { id: ID }`
    IntrospectionPrefix,
}
