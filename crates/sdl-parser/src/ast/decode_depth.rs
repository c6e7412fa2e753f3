//! Nesting limit for deserializing recursive nodes.
//!
//! [`Value`](crate::ast::Value) and [`TypeAnnotation`](crate::ast::TypeAnnotation)
//! nest without bound in the model, so a corrupt or crafted encoding could
//! otherwise recurse until the stack overflows. The current depth is
//! tracked per thread.

use std::cell::Cell;

/// Deepest nesting of list/object values or list type annotations accepted
/// while deserializing. The parser stops at 64 levels, so anything it
/// produced decodes.
pub const MAX_DECODE_DEPTH: usize = 128;

/// Message passed to [`serde::de::Error::custom`] when
/// [`MAX_DECODE_DEPTH`] is exceeded.
pub const DECODE_DEPTH_EXCEEDED: &str = "maximum nesting depth exceeded while decoding";

thread_local! {
    static DECODE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// One level of nesting; the level is released on drop.
pub(crate) struct DecodeDepthGuard(());

impl DecodeDepthGuard {
    pub(crate) fn enter<E: serde::de::Error>() -> Result<Self, E> {
        let depth = DECODE_DEPTH.with(|depth| {
            depth.set(depth.get() + 1);
            depth.get()
        });
        let guard = DecodeDepthGuard(());
        if depth > MAX_DECODE_DEPTH {
            return Err(E::custom(DECODE_DEPTH_EXCEEDED));
        }
        Ok(guard)
    }
}

impl Drop for DecodeDepthGuard {
    fn drop(&mut self) {
        DECODE_DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
    }
}
