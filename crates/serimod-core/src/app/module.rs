//! SerialModule - 共有可能な registry と `+` による合成
//!
//! `SerialModule` は `Arc<dyn SerialRegistry>` の薄いラッパーです。
//! clone は安価で、複数の composite から同じ registry を共有できます。

use std::fmt;
use std::ops::{Add, AddAssign};
use std::sync::{Arc, LazyLock};

use crate::domain::{RegistryError, SerializerHandle, TypeKey};
use crate::impls::{CompositeRegistry, ConcreteRegistry, EmptyRegistry};
use crate::ports::SerialRegistry;

use super::builder::ModuleBuilder;

static EMPTY: LazyLock<SerialModule> = LazyLock::new(|| SerialModule::new(EmptyRegistry));

/// Shared, immutable registry.
///
/// `a + b` composes two modules; entries of `a` win over entries of `b`.
#[derive(Clone)]
pub struct SerialModule {
    inner: Arc<dyn SerialRegistry>,
}

impl SerialModule {
    pub fn new<R: SerialRegistry + 'static>(registry: R) -> Self {
        Self {
            inner: Arc::new(registry),
        }
    }

    pub fn from_arc(registry: Arc<dyn SerialRegistry>) -> Self {
        Self { inner: registry }
    }

    /// The shared empty module.
    pub fn empty() -> Self {
        EMPTY.clone()
    }

    pub fn registry(&self) -> &dyn SerialRegistry {
        self.inner.as_ref()
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Contextual lookup for the Rust type `T`.
    pub fn contextual_of<T: 'static>(&self) -> Option<SerializerHandle> {
        self.inner.contextual(&TypeKey::of_type::<T>())
    }

    /// The modules a lookup visits, in order: the constituents of a
    /// composite, or this module alone.
    pub fn flattened(&self) -> Vec<SerialModule> {
        match self.inner.constituents() {
            Some(modules) => modules.to_vec(),
            None => vec![self.clone()],
        }
    }

    /// Left-biased composition. Neither operand is modified.
    pub fn plus(&self, other: &SerialModule) -> SerialModule {
        SerialModule::new(CompositeRegistry::new([self.clone(), other.clone()]))
    }
}

impl SerialRegistry for SerialModule {
    fn contextual(&self, key: &TypeKey) -> Option<SerializerHandle> {
        self.inner.contextual(key)
    }

    fn resolve_by_value(&self, base: &TypeKey, runtime: &TypeKey) -> Option<SerializerHandle> {
        self.inner.resolve_by_value(base, runtime)
    }

    fn resolve_discriminated(
        &self,
        base: &TypeKey,
        runtime: &TypeKey,
    ) -> Option<(String, SerializerHandle)> {
        self.inner.resolve_discriminated(base, runtime)
    }

    fn resolve_by_name(&self, base: &TypeKey, name: &str) -> Option<SerializerHandle> {
        self.inner.resolve_by_name(base, name)
    }

    fn constituents(&self) -> Option<&[SerialModule]> {
        self.inner.constituents()
    }
}

impl Default for SerialModule {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Debug for SerialModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.constituents() {
            Some(modules) => f
                .debug_struct("SerialModule")
                .field("constituents", &modules.len())
                .finish(),
            None => f.debug_struct("SerialModule").finish_non_exhaustive(),
        }
    }
}

impl From<ConcreteRegistry> for SerialModule {
    fn from(registry: ConcreteRegistry) -> Self {
        Self::new(registry)
    }
}

impl From<CompositeRegistry> for SerialModule {
    fn from(registry: CompositeRegistry) -> Self {
        Self::new(registry)
    }
}

impl Add for SerialModule {
    type Output = SerialModule;

    fn add(self, rhs: SerialModule) -> SerialModule {
        self.plus(&rhs)
    }
}

impl Add<&SerialModule> for &SerialModule {
    type Output = SerialModule;

    fn add(self, rhs: &SerialModule) -> SerialModule {
        self.plus(rhs)
    }
}

impl AddAssign for SerialModule {
    fn add_assign(&mut self, rhs: SerialModule) {
        *self = self.plus(&rhs);
    }
}

/// Opens a `ModuleBuilder`, runs `build` against it and freezes the result.
///
/// # 使用例
/// ```ignore
/// let module = serializers_module(|m| {
///     m.contextual(TypeKey::of::<Money>(), money_codec)?;
///     m.polymorphic(TypeKey::of::<Shape>(), None, |scope| {
///         scope
///             .add_subclass(TypeKey::of::<Circle>(), circle_codec)
///             .add_subclass(TypeKey::of::<Square>(), square_codec);
///     })?;
///     Ok(())
/// })?;
/// ```
///
/// Any registration error aborts the whole call; no partial module is returned.
pub fn serializers_module<F>(build: F) -> Result<SerialModule, RegistryError>
where
    F: FnOnce(&mut ModuleBuilder) -> Result<(), RegistryError>,
{
    let mut builder = ModuleBuilder::new();
    build(&mut builder)?;
    Ok(builder.build()?.into())
}

/// A module with a single contextual entry.
pub fn serializers_module_of(
    key: TypeKey,
    handle: SerializerHandle,
) -> Result<SerialModule, RegistryError> {
    serializers_module_from_map([(key, handle)])
}

/// A module with one contextual entry per pair.
pub fn serializers_module_from_map<I>(entries: I) -> Result<SerialModule, RegistryError>
where
    I: IntoIterator<Item = (TypeKey, SerializerHandle)>,
{
    serializers_module(|m| {
        for (key, handle) in entries {
            m.contextual(key, handle)?;
        }
        Ok(())
    })
}
