//! SerialRegistry port - 型から serializer handle への解決
//!
//! # 実装
//! - `EmptyRegistry`: 常に `None`
//! - `ConcreteRegistry`: builder で構築される不変のマップ
//! - `CompositeRegistry`: 複数の registry を優先順に並べたもの

use crate::app::SerialModule;
use crate::domain::{SerializerHandle, TypeKey};

/// SerialRegistry は serializer の実行時解決を提供
///
/// All lookups are pure. A miss is `None`, never an error: the caller decides
/// whether to fall back to a default or to fail.
///
/// # Object Safety
/// `Arc<dyn SerialRegistry>` として共有できるよう、ジェネリックメソッドは持ちません。
pub trait SerialRegistry: Send + Sync {
    /// Contextual lookup by exact type identity. No subtype fallback.
    fn contextual(&self, key: &TypeKey) -> Option<SerializerHandle>;

    /// Encode-time polymorphic lookup: the value's runtime type in the scope of `base`.
    fn resolve_by_value(&self, base: &TypeKey, runtime: &TypeKey) -> Option<SerializerHandle>;

    /// Like `resolve_by_value`, but also returns the discriminator the subtype
    /// was registered under. Encoders write this name, not `runtime`'s own.
    fn resolve_discriminated(
        &self,
        base: &TypeKey,
        runtime: &TypeKey,
    ) -> Option<(String, SerializerHandle)>;

    /// Decode-time polymorphic lookup: a discriminator read from the wire in the scope of `base`.
    fn resolve_by_name(&self, base: &TypeKey, name: &str) -> Option<SerializerHandle>;

    /// The flat constituent list if this registry is a composite.
    ///
    /// Used by `+` so that composing composites never nests.
    fn constituents(&self) -> Option<&[SerialModule]> {
        None
    }
}
