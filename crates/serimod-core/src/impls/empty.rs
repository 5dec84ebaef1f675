//! EmptyRegistry - 何も登録されていない registry
//!
//! `+` の単位元です。

use crate::domain::{SerializerHandle, TypeKey};
use crate::ports::SerialRegistry;

/// A registry that answers every lookup with `None`.
///
/// Identity element of `+`. Use `SerialModule::empty()` for the shared instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyRegistry;

impl SerialRegistry for EmptyRegistry {
    fn contextual(&self, _key: &TypeKey) -> Option<SerializerHandle> {
        None
    }

    fn resolve_by_value(&self, _base: &TypeKey, _runtime: &TypeKey) -> Option<SerializerHandle> {
        None
    }

    fn resolve_discriminated(
        &self,
        _base: &TypeKey,
        _runtime: &TypeKey,
    ) -> Option<(String, SerializerHandle)> {
        None
    }

    fn resolve_by_name(&self, _base: &TypeKey, _name: &str) -> Option<SerializerHandle> {
        None
    }
}
