//! Impls - SerialRegistry の実装
//!
//! - **EmptyRegistry**: 合成の単位元
//! - **ConcreteRegistry**: builder が凍結したマップ
//! - **CompositeRegistry**: left-biased な合成

pub mod composite;
pub mod concrete;
pub mod empty;

pub use self::composite::CompositeRegistry;
pub use self::concrete::ConcreteRegistry;
pub use self::empty::EmptyRegistry;
