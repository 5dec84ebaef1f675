//! Domain model (type keys, serializer handles, errors, summaries).

pub mod errors;
pub mod handle;
pub mod summary;
pub mod type_key;

pub use self::errors::{RegistryError, ResolveError};
pub use self::handle::SerializerHandle;
pub use self::summary::{RegistrySummary, ScopeSummary};
pub use self::type_key::{SerialName, TypeKey};
