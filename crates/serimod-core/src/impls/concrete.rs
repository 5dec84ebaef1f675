//! ConcreteRegistry - builder が凍結した不変の registry
//!
//! # 構造
//! - contextual: `TypeKey -> SerializerHandle`
//! - scopes: base の `TypeKey` ごとに `PolymorphicScope`
//!   - by_type: subtype の `TypeKey -> (discriminator, SerializerHandle)`
//!   - by_name: discriminator `String -> SerializerHandle`
//!
//! 変更は crate 内の `ModuleBuilder` からのみ行われ、`build()` 後は読み取り専用です。

use std::collections::HashMap;

use crate::domain::{RegistryError, RegistrySummary, ScopeSummary, SerializerHandle, TypeKey};
use crate::ports::SerialRegistry;

/// Subtype registrations for one base type.
///
/// `by_type` keeps the discriminator the subtype was registered under.
#[derive(Debug, Clone, Default)]
struct PolymorphicScope {
    by_type: HashMap<TypeKey, (String, SerializerHandle)>,
    by_name: HashMap<String, SerializerHandle>,
}

/// Registry owning a contextual map and one polymorphic scope per base type.
#[derive(Debug, Clone, Default)]
pub struct ConcreteRegistry {
    contextual: HashMap<TypeKey, SerializerHandle>,
    scopes: HashMap<TypeKey, PolymorphicScope>,
}

impl ConcreteRegistry {
    pub(crate) fn insert_contextual(
        &mut self,
        key: TypeKey,
        handle: SerializerHandle,
    ) -> Result<(), RegistryError> {
        if self.contextual.contains_key(&key) {
            return Err(RegistryError::ContextualAlreadyRegistered { key });
        }
        self.contextual.insert(key, handle);
        Ok(())
    }

    /// Both slots are checked before either is written, so a rejected
    /// registration leaves the scope untouched.
    pub(crate) fn insert_polymorphic(
        &mut self,
        base: &TypeKey,
        subtype: TypeKey,
        handle: SerializerHandle,
    ) -> Result<(), RegistryError> {
        let name = subtype.serial_name().to_string();
        if let Some(scope) = self.scopes.get(base) {
            if scope.by_type.contains_key(&subtype) {
                return Err(RegistryError::SubtypeAlreadyRegistered {
                    base: base.clone(),
                    subtype,
                });
            }
            if scope.by_name.contains_key(&name) {
                return Err(RegistryError::DiscriminatorAlreadyRegistered {
                    base: base.clone(),
                    name,
                });
            }
        }

        let scope = self.scopes.entry(base.clone()).or_default();
        scope.by_type.insert(subtype, (name.clone(), handle.clone()));
        scope.by_name.insert(name, handle);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.contextual.is_empty() && self.scopes.is_empty()
    }

    pub fn contextual_keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.contextual.keys()
    }

    pub fn base_keys(&self) -> impl Iterator<Item = &TypeKey> {
        self.scopes.keys()
    }

    /// Subtypes registered in the scope of `base`, or `None` if there is no such scope.
    pub fn subtypes_of(&self, base: &TypeKey) -> Option<impl Iterator<Item = &TypeKey>> {
        self.scopes.get(base).map(|scope| scope.by_type.keys())
    }

    pub fn summary(&self) -> RegistrySummary {
        let mut contextual: Vec<String> = self
            .contextual
            .keys()
            .map(|key| key.serial_name().to_string())
            .collect();
        contextual.sort();

        let mut scopes: Vec<ScopeSummary> = self
            .scopes
            .iter()
            .map(|(base, scope)| {
                let mut discriminators: Vec<String> = scope.by_name.keys().cloned().collect();
                discriminators.sort();
                ScopeSummary {
                    base: base.serial_name().to_string(),
                    discriminators,
                }
            })
            .collect();
        scopes.sort_by(|a, b| a.base.cmp(&b.base));

        RegistrySummary { contextual, scopes }
    }
}

impl SerialRegistry for ConcreteRegistry {
    fn contextual(&self, key: &TypeKey) -> Option<SerializerHandle> {
        self.contextual.get(key).cloned()
    }

    fn resolve_by_value(&self, base: &TypeKey, runtime: &TypeKey) -> Option<SerializerHandle> {
        let (_, handle) = self.scopes.get(base)?.by_type.get(runtime)?;
        Some(handle.clone())
    }

    fn resolve_discriminated(
        &self,
        base: &TypeKey,
        runtime: &TypeKey,
    ) -> Option<(String, SerializerHandle)> {
        self.scopes.get(base)?.by_type.get(runtime).cloned()
    }

    fn resolve_by_name(&self, base: &TypeKey, name: &str) -> Option<SerializerHandle> {
        self.scopes.get(base)?.by_name.get(name).cloned()
    }
}
