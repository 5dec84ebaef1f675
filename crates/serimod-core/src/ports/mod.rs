//! Ports - 抽象化レイヤー
//!
//! Registry を使う側（encoder / decoder / resolver）が依存するインターフェースです。

pub mod defaults;
pub mod registry;

pub use self::defaults::{DefaultSerializers, NoDefaults};
pub use self::registry::SerialRegistry;
