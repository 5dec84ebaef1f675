//! SerializerHandle - 外部の serializer への不透明な参照
//!
//! Registry は handle の中身を解釈しません。保存して返すだけです。

use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Shared, type-erased reference to an external serializer.
///
/// Cloning is cheap and keeps the identity: two clones compare equal, two
/// handles created from separate `new` calls never do, even for the same
/// serializer type.
#[derive(Clone)]
pub struct SerializerHandle {
    inner: Arc<dyn Any + Send + Sync>,
    type_name: &'static str,
}

impl SerializerHandle {
    pub fn new<S: Any + Send + Sync>(serializer: S) -> Self {
        Self::from_arc(Arc::new(serializer))
    }

    pub fn from_arc<S: Any + Send + Sync>(serializer: Arc<S>) -> Self {
        Self {
            inner: serializer,
            type_name: std::any::type_name::<S>(),
        }
    }

    pub fn downcast_ref<S: Any>(&self) -> Option<&S> {
        self.inner.downcast_ref::<S>()
    }

    pub fn downcast<S: Any + Send + Sync>(&self) -> Option<Arc<S>> {
        self.inner.clone().downcast::<S>().ok()
    }

    pub fn is<S: Any>(&self) -> bool {
        self.inner.is::<S>()
    }

    /// Identity comparison (same underlying allocation).
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn serializer_type_name(&self) -> &'static str {
        self.type_name
    }
}

impl PartialEq for SerializerHandle {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for SerializerHandle {}

impl fmt::Debug for SerializerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SerializerHandle({})", self.type_name)
    }
}
