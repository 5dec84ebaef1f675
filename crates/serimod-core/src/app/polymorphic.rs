//! PolymorphicScopeBuilder - 1 つの base 型に対する subtype の登録
//!
//! # 状態
//! - 蓄積中: `add_subclass` / `change_base` を呼べる
//! - commit 済み: `commit_to(self, ..)` が builder を消費するので、以降は使えない
//!
//! `change_base` は元の builder を変更せず、新しい builder を返します。

use crate::domain::{RegistryError, SerialName, SerializerHandle, TypeKey};

use super::builder::ModuleBuilder;

/// Accumulates subtype registrations for one base type.
#[derive(Debug, Clone)]
pub struct PolymorphicScopeBuilder {
    base: TypeKey,
    base_handle: Option<SerializerHandle>,
    subclasses: Vec<(TypeKey, SerializerHandle)>,
}

impl PolymorphicScopeBuilder {
    /// `base_handle` is for a base type that is itself serializable.
    pub fn new(base: TypeKey, base_handle: Option<SerializerHandle>) -> Self {
        Self {
            base,
            base_handle,
            subclasses: Vec::new(),
        }
    }

    pub fn base(&self) -> &TypeKey {
        &self.base
    }

    pub fn base_handle(&self) -> Option<&SerializerHandle> {
        self.base_handle.as_ref()
    }

    pub fn subclasses(&self) -> &[(TypeKey, SerializerHandle)] {
        &self.subclasses
    }

    /// Duplicates are not checked here; `commit_to` reports them.
    pub fn add_subclass(&mut self, subtype: TypeKey, handle: SerializerHandle) -> &mut Self {
        self.subclasses.push((subtype, handle));
        self
    }

    pub fn add_subclass_of<T: SerialName>(&mut self, handle: SerializerHandle) -> &mut Self {
        self.add_subclass(TypeKey::of::<T>(), handle)
    }

    /// A new scope builder for `new_base` carrying this scope's registrations.
    ///
    /// The current base handle, if any, becomes a subclass keyed by the current
    /// base; every accumulated subclass follows unchanged.
    pub fn change_base(
        &self,
        new_base: TypeKey,
        new_base_handle: Option<SerializerHandle>,
    ) -> PolymorphicScopeBuilder {
        let mut rebound = PolymorphicScopeBuilder::new(new_base, new_base_handle);
        if let Some(handle) = &self.base_handle {
            rebound.add_subclass(self.base.clone(), handle.clone());
        }
        rebound.subclasses.extend(self.subclasses.iter().cloned());
        rebound
    }

    /// Registers the base handle (if any) and every subclass into `target`.
    ///
    /// All or nothing: on a duplicate, `target` keeps none of this scope's entries.
    pub fn commit_to(self, target: &mut ModuleBuilder) -> Result<(), RegistryError> {
        let Self {
            base,
            base_handle,
            subclasses,
        } = self;
        target.atomically(|target| {
            if let Some(handle) = base_handle {
                target.register_polymorphic(&base, base.clone(), handle)?;
            }
            for (subtype, handle) in subclasses {
                target.register_polymorphic(&base, subtype, handle)?;
            }
            Ok(())
        })?;
        Ok(())
    }
}
