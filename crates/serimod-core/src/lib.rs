//! serimod-core
//!
//! Runtime registry of serializers for contextual and polymorphic serialization.
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（TypeKey, SerializerHandle, errors, summary）
//! - **ports**: 抽象化レイヤー（SerialRegistry, DefaultSerializers）
//! - **impls**: 実装（EmptyRegistry, ConcreteRegistry, CompositeRegistry）
//! - **app**: 構築と合成（ModuleBuilder, PolymorphicScopeBuilder, SerialModule, SerialContext）
//! - **typed**: registry を使う側（ContextualResolver, PolymorphicResolver）

pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
pub mod typed;

pub use self::app::{
    ModuleBuilder, PolymorphicScopeBuilder, SerialContext, SerialModule, serializers_module,
    serializers_module_from_map, serializers_module_of,
};
pub use self::domain::{RegistryError, ResolveError, SerialName, SerializerHandle, TypeKey};
pub use self::ports::{DefaultSerializers, SerialRegistry};
