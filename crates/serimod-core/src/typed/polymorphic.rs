//! PolymorphicResolver - polymorphic serialization 用の serializer 解決
//!
//! # Encode
//! 実行時の型で `resolve_discriminated` → 登録時の discriminator と handle を返す
//!
//! # Decode
//! wire から読んだ discriminator で `resolve_by_name`。
//! discriminator は信頼できない入力なので、見つからなければフォールバックせずエラーにします。

use crate::app::SerialModule;
use crate::domain::{ResolveError, SerializerHandle, TypeKey};
use crate::ports::SerialRegistry;

/// What an encoder writes for a polymorphic value: the tag, then the payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolymorphicTarget {
    pub discriminator: String,
    pub handle: SerializerHandle,
}

/// Resolves serializers for values declared as `base`.
#[derive(Debug, Clone)]
pub struct PolymorphicResolver {
    base: TypeKey,
    module: SerialModule,
}

impl PolymorphicResolver {
    pub fn new(base: TypeKey, module: SerialModule) -> Self {
        Self { base, module }
    }

    pub fn base(&self) -> &TypeKey {
        &self.base
    }

    /// The discriminator is the name the subtype was registered under, so it
    /// always decodes back through `for_decode`.
    pub fn for_encode(&self, runtime: &TypeKey) -> Result<PolymorphicTarget, ResolveError> {
        let (discriminator, handle) = self
            .module
            .resolve_discriminated(&self.base, runtime)
            .ok_or_else(|| ResolveError::NotRegisteredInScope {
                base: self.base.clone(),
                subtype: runtime.clone(),
            })?;
        Ok(PolymorphicTarget { discriminator, handle })
    }

    pub fn for_decode(&self, discriminator: &str) -> Result<SerializerHandle, ResolveError> {
        self.module
            .resolve_by_name(&self.base, discriminator)
            .ok_or_else(|| ResolveError::UnknownDiscriminator {
                base: self.base.clone(),
                name: discriminator.to_string(),
            })
    }
}
