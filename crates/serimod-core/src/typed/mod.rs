//! Typed - registry を使う側の resolver
//!
//! Encoder / Decoder が「どの serializer を使うか」を決めるための薄い層です。
//! Registry 自体は `None` を返すだけで、失敗かどうかはここで判断します。

pub mod contextual;
pub mod polymorphic;

pub use self::contextual::ContextualResolver;
pub use self::polymorphic::{PolymorphicResolver, PolymorphicTarget};
