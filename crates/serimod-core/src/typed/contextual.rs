//! ContextualResolver - contextual serialization 用の serializer 解決
//!
//! # 解決フロー
//! 1. module の contextual lookup（encode 時は実行時の型、decode 時は宣言された型）
//! 2. 見つからなければ `DefaultSerializers` にフォールバック
//! 3. どちらにも無ければ `ResolveError::NoSerializer`

use std::sync::Arc;

use tracing::debug;

use crate::app::SerialModule;
use crate::domain::{ResolveError, SerializerHandle, TypeKey};
use crate::ports::{DefaultSerializers, NoDefaults, SerialRegistry};

/// Picks the serializer for a contextually serialized value.
#[derive(Clone)]
pub struct ContextualResolver {
    module: SerialModule,
    defaults: Arc<dyn DefaultSerializers>,
}

impl ContextualResolver {
    pub fn new(module: SerialModule, defaults: impl DefaultSerializers + 'static) -> Self {
        Self {
            module,
            defaults: Arc::new(defaults),
        }
    }

    pub fn without_defaults(module: SerialModule) -> Self {
        Self::new(module, NoDefaults)
    }

    pub fn module(&self) -> &SerialModule {
        &self.module
    }

    /// Encoding side: the value's runtime type is known.
    pub fn for_encode(&self, runtime: &TypeKey) -> Result<SerializerHandle, ResolveError> {
        self.resolve(runtime)
    }

    /// Decoding side: only the declared type is known.
    pub fn for_decode(&self, declared: &TypeKey) -> Result<SerializerHandle, ResolveError> {
        self.resolve(declared)
    }

    fn resolve(&self, key: &TypeKey) -> Result<SerializerHandle, ResolveError> {
        if let Some(handle) = self.module.contextual(key) {
            return Ok(handle);
        }
        debug!(key = %key, "no contextual serializer registered, trying default");
        self.defaults
            .default_for(key)
            .ok_or_else(|| ResolveError::NoSerializer { key: key.clone() })
    }
}
