//! App - registry の構築と合成
//!
//! # 主要コンポーネント
//! - **ModuleBuilder**: 登録と重複チェック、`ConcreteRegistry` への凍結
//! - **PolymorphicScopeBuilder**: base 型ごとの subtype 登録と `change_base`
//! - **SerialModule**: 共有可能な registry と `+` による合成
//! - **SerialContext**: フォーマット側が保持する module

pub mod builder;
pub mod context;
pub mod module;
pub mod polymorphic;

pub use self::builder::ModuleBuilder;
pub use self::context::SerialContext;
pub use self::module::{
    SerialModule, serializers_module, serializers_module_from_map, serializers_module_of,
};
pub use self::polymorphic::PolymorphicScopeBuilder;
