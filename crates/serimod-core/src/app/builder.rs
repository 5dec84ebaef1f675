//! ModuleBuilder - registry の構築
//!
//! # ライフサイクル
//! 1. `ModuleBuilder::new()` で開始（可変）
//! 2. `contextual` / `polymorphic` / `polymorphic_many` で登録
//! 3. `build()` で `ConcreteRegistry` に凍結（builder は消費される）
//!
//! # Fail-fast 設計
//! - 同じ builder 内での二重登録は即座に `RegistryError`
//! - `polymorphic` / `polymorphic_many` は 1 回の呼び出し単位で登録され、
//!   失敗した呼び出しの登録は builder に残りません
//! - `expect_contextual()` で期待する型を宣言すると、`build()` 時に不足をチェック
//!
//! 別々に構築した registry の上書きは `+`（left-biased）で行い、エラーにはしません。

use tracing::{debug, warn};

use crate::domain::{RegistryError, SerialName, SerializerHandle, TypeKey};
use crate::impls::ConcreteRegistry;

use super::polymorphic::PolymorphicScopeBuilder;

/// Single-use builder for a `ConcreteRegistry`.
#[derive(Debug, Default)]
pub struct ModuleBuilder {
    registry: ConcreteRegistry,
    expected: Option<Vec<TypeKey>>,
}

impl ModuleBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handle` for contextual lookups of `key`.
    ///
    /// Fails if `key` is already registered in this builder; the earlier
    /// entry is kept.
    pub fn contextual(
        &mut self,
        key: TypeKey,
        handle: SerializerHandle,
    ) -> Result<&mut Self, RegistryError> {
        let serializer = handle.serializer_type_name();
        match self.registry.insert_contextual(key.clone(), handle) {
            Ok(()) => {
                debug!(key = %key, serializer, "registered contextual serializer");
                Ok(self)
            }
            Err(err) => {
                warn!(error = %err, "rejected contextual registration");
                Err(err)
            }
        }
    }

    pub fn contextual_of<T: SerialName>(
        &mut self,
        handle: SerializerHandle,
    ) -> Result<&mut Self, RegistryError> {
        self.contextual(TypeKey::of::<T>(), handle)
    }

    /// Registers `handle` for `subtype` in the scope of `base`.
    ///
    /// The discriminator is the subtype key's serial name. Fails if either the
    /// subtype or the discriminator is already taken in that scope.
    pub fn register_polymorphic(
        &mut self,
        base: &TypeKey,
        subtype: TypeKey,
        handle: SerializerHandle,
    ) -> Result<&mut Self, RegistryError> {
        let serializer = handle.serializer_type_name();
        match self.registry.insert_polymorphic(base, subtype.clone(), handle) {
            Ok(()) => {
                debug!(
                    base = %base,
                    subtype = ?subtype,
                    discriminator = subtype.serial_name(),
                    serializer,
                    "registered polymorphic serializer"
                );
                Ok(self)
            }
            Err(err) => {
                warn!(error = %err, "rejected polymorphic registration");
                Err(err)
            }
        }
    }

    /// Opens a scope for `base`, lets `build` add subclasses, then commits it.
    ///
    /// If `base_handle` is given, `base` itself is registered in its own scope.
    pub fn polymorphic<F>(
        &mut self,
        base: TypeKey,
        base_handle: Option<SerializerHandle>,
        build: F,
    ) -> Result<&mut Self, RegistryError>
    where
        F: FnOnce(&mut PolymorphicScopeBuilder),
    {
        let mut scope = PolymorphicScopeBuilder::new(base, base_handle);
        build(&mut scope);
        scope.commit_to(self)?;
        Ok(self)
    }

    /// Registers one set of subclasses under several base types.
    ///
    /// The scope is built for the first base and re-bound to every other base
    /// with `change_base`, so each later base also receives the earlier base
    /// (when it has a handle) as a subtype. An empty `bases` is a no-op.
    pub fn polymorphic_many<I, F>(&mut self, bases: I, build: F) -> Result<&mut Self, RegistryError>
    where
        I: IntoIterator<Item = (TypeKey, Option<SerializerHandle>)>,
        F: FnOnce(&mut PolymorphicScopeBuilder),
    {
        let mut bases = bases.into_iter();
        let Some((first, first_handle)) = bases.next() else {
            return Ok(self);
        };

        let mut scope = PolymorphicScopeBuilder::new(first, first_handle);
        build(&mut scope);
        let rebound: Vec<PolymorphicScopeBuilder> = bases
            .map(|(base, handle)| scope.change_base(base, handle))
            .collect();

        self.atomically(|builder| {
            scope.commit_to(builder)?;
            for scope in rebound {
                scope.commit_to(builder)?;
            }
            Ok(())
        })
    }

    /// Runs `register` as one unit: if it fails, every registration it made
    /// is rolled back and the builder is as it was before the call.
    pub(crate) fn atomically<F>(&mut self, register: F) -> Result<&mut Self, RegistryError>
    where
        F: FnOnce(&mut Self) -> Result<(), RegistryError>,
    {
        let snapshot = self.registry.clone();
        match register(self) {
            Ok(()) => Ok(self),
            Err(err) => {
                debug!(error = %err, "rolled back partial registration");
                self.registry = snapshot;
                Err(err)
            }
        }
    }

    /// Declares contextual keys that `build()` must find registered.
    pub fn expect_contextual(&mut self, keys: impl IntoIterator<Item = TypeKey>) -> &mut Self {
        self.expected
            .get_or_insert_with(Vec::new)
            .extend(keys);
        self
    }

    /// Freezes the registrations into an immutable registry.
    ///
    /// # 検証
    /// - `expect_contextual()` で宣言した型が全て登録されているかチェック
    /// - 不足があれば `RegistryError::MissingContextual` を返す
    pub fn build(self) -> Result<ConcreteRegistry, RegistryError> {
        if let Some(expected) = &self.expected {
            let registered: Vec<&TypeKey> = self.registry.contextual_keys().collect();
            let missing: Vec<String> = expected
                .iter()
                .filter(|key| !registered.contains(key))
                .map(|key| key.serial_name().to_string())
                .collect();
            if !missing.is_empty() {
                warn!(?missing, "module is missing expected contextual serializers");
                return Err(RegistryError::MissingContextual(missing));
            }
        }

        debug!(
            contextual = self.registry.contextual_keys().count(),
            scopes = self.registry.base_keys().count(),
            "built serial module"
        );
        Ok(self.registry)
    }
}
