//! TypeKey - 実行時の型を識別するキー
//!
//! `TypeKey` は identity で比較されます（構造的な比較はしません）。
//! - Rust の型から作ったキーは `TypeId` で比較
//! - タグから作ったキーはタグ文字列で比較
//!
//! serial name（discriminator として wire に書かれる名前）はキーに付随する
//! 情報であり、等価性には含まれません。

use std::any::TypeId;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// SerialName は型と serial name を対応付ける
///
/// # 使用例
/// ```ignore
/// struct Circle { radius: f64 }
///
/// impl SerialName for Circle {
///     const SERIAL_NAME: &'static str = "shapes.circle";
/// }
///
/// let key = TypeKey::of::<Circle>();
/// assert_eq!(key.serial_name(), "shapes.circle");
/// ```
pub trait SerialName: 'static {
    const SERIAL_NAME: &'static str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum Identity {
    Type(TypeId),
    Tag(Arc<str>),
}

/// Identity token for a runtime type.
#[derive(Clone)]
pub struct TypeKey {
    identity: Identity,
    serial_name: Arc<str>,
}

impl TypeKey {
    /// Key for `T`, named by its `SerialName`.
    pub fn of<T: SerialName>() -> Self {
        Self::named::<T>(T::SERIAL_NAME)
    }

    /// Key for `T`, named by `std::any::type_name`.
    pub fn of_type<T: 'static>() -> Self {
        Self::named::<T>(std::any::type_name::<T>())
    }

    /// Key for `T` with an explicit serial name.
    ///
    /// Two keys for the same `T` are equal even when their names differ.
    pub fn named<T: 'static>(serial_name: impl Into<Arc<str>>) -> Self {
        Self {
            identity: Identity::Type(TypeId::of::<T>()),
            serial_name: serial_name.into(),
        }
    }

    /// Key identified by a registered string tag rather than a Rust type.
    ///
    /// The tag doubles as the serial name until `with_serial_name` replaces it.
    pub fn tag(tag: impl Into<Arc<str>>) -> Self {
        let tag = tag.into();
        Self {
            identity: Identity::Tag(tag.clone()),
            serial_name: tag,
        }
    }

    pub fn with_serial_name(mut self, serial_name: impl Into<Arc<str>>) -> Self {
        self.serial_name = serial_name.into();
        self
    }

    pub fn serial_name(&self) -> &str {
        &self.serial_name
    }

    /// Returns true if this key was created for the Rust type `T`.
    pub fn is_type<T: 'static>(&self) -> bool {
        self.identity == Identity::Type(TypeId::of::<T>())
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.identity == other.identity
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity.hash(state);
    }
}

impl fmt::Debug for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.identity {
            Identity::Type(_) => write!(f, "TypeKey({})", self.serial_name),
            Identity::Tag(tag) => write!(f, "TypeKey(#{tag} as {})", self.serial_name),
        }
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serial_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    struct Circle;
    struct Square;

    impl SerialName for Circle {
        const SERIAL_NAME: &'static str = "shapes.circle";
    }

    #[test]
    fn keys_for_the_same_type_are_equal_regardless_of_name() {
        let a = TypeKey::of::<Circle>();
        let b = TypeKey::named::<Circle>("something.else");
        assert_eq!(a, b);

        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn keys_for_different_types_differ_even_with_the_same_name() {
        let a = TypeKey::named::<Circle>("shape");
        let b = TypeKey::named::<Square>("shape");
        assert_ne!(a, b);
    }

    #[test]
    fn tag_keys_compare_by_tag() {
        assert_eq!(TypeKey::tag("A"), TypeKey::tag("A").with_serial_name("a.v1"));
        assert_ne!(TypeKey::tag("A"), TypeKey::tag("B"));
        // タグと Rust の型は混ざらない
        assert_ne!(TypeKey::tag("shapes.circle"), TypeKey::of::<Circle>());
    }

    #[test]
    fn serial_name_defaults() {
        assert_eq!(TypeKey::of::<Circle>().serial_name(), "shapes.circle");
        assert!(TypeKey::of_type::<Square>().serial_name().ends_with("Square"));
        assert_eq!(TypeKey::tag("A").serial_name(), "A");
        assert_eq!(TypeKey::tag("A").with_serial_name("a.v1").to_string(), "a.v1");
    }

    #[test]
    fn is_type_checks_identity() {
        let key = TypeKey::of::<Circle>();
        assert!(key.is_type::<Circle>());
        assert!(!key.is_type::<Square>());
        assert!(!TypeKey::tag("x").is_type::<Circle>());
    }
}
