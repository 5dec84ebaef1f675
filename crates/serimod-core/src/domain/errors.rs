//! Errors - 構築時エラーと解決時エラー
//!
//! - `RegistryError`: builder での登録・構築時のエラー（build 全体を中断する）
//! - `ResolveError`: registry を使う側（resolver）での解決失敗
//!
//! Registry の lookup 自体はエラーを返しません（`None` を返すだけ）。

use super::type_key::TypeKey;

/// RegistryError は ModuleBuilder の操作エラー
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("serializer for '{key}' is already registered in this module")]
    ContextualAlreadyRegistered { key: TypeKey },

    #[error("subtype '{subtype}' is already registered in the scope of '{base}'")]
    SubtypeAlreadyRegistered { base: TypeKey, subtype: TypeKey },

    #[error("discriminator '{name}' is already registered in the scope of '{base}'")]
    DiscriminatorAlreadyRegistered { base: TypeKey, name: String },

    #[error("missing contextual serializers: {0:?}. These types were expected but not registered.")]
    MissingContextual(Vec<String>),
}

/// ResolveError は resolver が serializer を決められなかったときのエラー
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("no serializer found for '{key}' and no default is available")]
    NoSerializer { key: TypeKey },

    #[error("'{subtype}' is not registered for polymorphic serialization in the scope of '{base}'")]
    NotRegisteredInScope { base: TypeKey, subtype: TypeKey },

    #[error("unknown discriminator '{name}' in the scope of '{base}'")]
    UnknownDiscriminator { base: TypeKey, name: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_keys() {
        let err = RegistryError::SubtypeAlreadyRegistered {
            base: TypeKey::tag("Shape"),
            subtype: TypeKey::tag("Circle"),
        };
        assert_eq!(
            err.to_string(),
            "subtype 'Circle' is already registered in the scope of 'Shape'"
        );

        let err = ResolveError::UnknownDiscriminator {
            base: TypeKey::tag("Shape"),
            name: "hexagon".into(),
        };
        assert!(err.to_string().contains("hexagon"));
    }
}
