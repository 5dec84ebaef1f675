//! CompositeRegistry - 複数の registry を優先順に合成
//!
//! # ルール
//! - 先頭（左）の registry ほど優先度が高い（left-biased）
//! - `A + B` は A と B の構成要素を連結する。合成は入れ子にならない
//!   （`(A + B) + C` と `A + (B + C)` は同じフラットな列になる）

use tracing::trace;

use crate::app::SerialModule;
use crate::domain::{SerializerHandle, TypeKey};
use crate::ports::SerialRegistry;

/// Ordered, flat sequence of registries; the first hit wins.
#[derive(Debug, Clone, Default)]
pub struct CompositeRegistry {
    modules: Vec<SerialModule>,
}

impl CompositeRegistry {
    /// Builds a composite from `modules` in priority order, flattening any
    /// composite among them.
    pub fn new(modules: impl IntoIterator<Item = SerialModule>) -> Self {
        let mut flat = Vec::new();
        for module in modules {
            match module.constituents() {
                Some(inner) => flat.extend(inner.iter().cloned()),
                None => flat.push(module),
            }
        }
        Self { modules: flat }
    }

    pub fn modules(&self) -> &[SerialModule] {
        &self.modules
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    fn find_in_modules<T, F>(&self, lookup: &str, find: F) -> Option<T>
    where
        F: Fn(&SerialModule) -> Option<T>,
    {
        let found = self
            .modules
            .iter()
            .enumerate()
            .find_map(|(index, module)| find(module).map(|hit| (index, hit)));
        match found {
            Some((index, hit)) => {
                trace!(lookup, constituent = index, "composite hit");
                Some(hit)
            }
            None => {
                trace!(lookup, constituents = self.modules.len(), "composite miss");
                None
            }
        }
    }
}

impl SerialRegistry for CompositeRegistry {
    fn contextual(&self, key: &TypeKey) -> Option<SerializerHandle> {
        self.find_in_modules("contextual", |module| module.contextual(key))
    }

    fn resolve_by_value(&self, base: &TypeKey, runtime: &TypeKey) -> Option<SerializerHandle> {
        self.find_in_modules("by_value", |module| module.resolve_by_value(base, runtime))
    }

    fn resolve_discriminated(
        &self,
        base: &TypeKey,
        runtime: &TypeKey,
    ) -> Option<(String, SerializerHandle)> {
        self.find_in_modules("by_value", |module| module.resolve_discriminated(base, runtime))
    }

    fn resolve_by_name(&self, base: &TypeKey, name: &str) -> Option<SerializerHandle> {
        self.find_in_modules("by_name", |module| module.resolve_by_name(base, name))
    }

    fn constituents(&self) -> Option<&[SerialModule]> {
        Some(&self.modules)
    }
}
