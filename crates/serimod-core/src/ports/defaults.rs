//! DefaultSerializers port - registry に無い型の既定 serializer
//!
//! 既定の serializer（コンパイル時に生成されるもの）は外部のフレームワークが提供します。
//! Registry 自身はこれを呼びません。呼ぶのは resolver だけです。

use crate::domain::{SerializerHandle, TypeKey};

/// Fallback source of serializers, consulted only after a registry miss.
pub trait DefaultSerializers: Send + Sync {
    fn default_for(&self, key: &TypeKey) -> Option<SerializerHandle>;
}

impl<F> DefaultSerializers for F
where
    F: Fn(&TypeKey) -> Option<SerializerHandle> + Send + Sync,
{
    fn default_for(&self, key: &TypeKey) -> Option<SerializerHandle> {
        self(key)
    }
}

/// No defaults at all: every miss stays a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDefaults;

impl DefaultSerializers for NoDefaults {
    fn default_for(&self, _key: &TypeKey) -> Option<SerializerHandle> {
        None
    }
}
