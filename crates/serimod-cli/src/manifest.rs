//! Manifest - JSON で書かれた module 定義
//!
//! 型はタグ（`TypeKey::tag`）、serializer は名前付きの `NamedSerializer` として扱います。
//! 同じ名前の serializer は全 module で同じ handle を共有します。

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serimod_core::domain::RegistrySummary;
use serimod_core::{
    ModuleBuilder, RegistryError, SerialModule, SerialRegistry, SerializerHandle, TypeKey,
};
use tracing::info;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid manifest: {0}")]
    Json(#[from] serde_json::Error),

    #[error("module '{module}' refers to undeclared serializer '{serializer}'")]
    UnknownSerializer { module: String, serializer: String },

    #[error("module '{module}': {source}")]
    Registry {
        module: String,
        #[source]
        source: RegistryError,
    },
}

/// Stand-in for an external codec: only its name is known here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedSerializer {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeRef {
    #[serde(rename = "type")]
    pub tag: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_name: Option<String>,
}

impl TypeRef {
    fn key(&self) -> TypeKey {
        let key = TypeKey::tag(self.tag.as_str());
        match &self.serial_name {
            Some(name) => key.with_serial_name(name.as_str()),
            None => key,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Entry {
    #[serde(flatten)]
    pub ty: TypeRef,
    pub serializer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaseEntry {
    #[serde(flatten)]
    pub ty: TypeRef,
    #[serde(default)]
    pub serializer: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolymorphicEntry {
    pub bases: Vec<BaseEntry>,
    #[serde(default)]
    pub subclasses: Vec<Entry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ModuleEntry {
    pub name: String,
    #[serde(default)]
    pub expect: Vec<TypeRef>,
    #[serde(default)]
    pub contextual: Vec<Entry>,
    #[serde(default)]
    pub polymorphic: Vec<PolymorphicEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Query {
    Contextual {
        #[serde(rename = "type")]
        tag: String,
    },
    ByValue {
        base: String,
        #[serde(rename = "type")]
        tag: String,
    },
    ByName {
        base: String,
        name: String,
    },
}

/// Top-level manifest. Modules are composed left to right: earlier modules win.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub serializers: Vec<String>,
    #[serde(default)]
    pub modules: Vec<ModuleEntry>,
    #[serde(default)]
    pub queries: Vec<Query>,
}

#[derive(Debug, Serialize)]
pub struct ModuleReport {
    pub name: String,
    pub summary: RegistrySummary,
}

#[derive(Debug, Serialize)]
pub struct QueryReport {
    pub query: Query,
    pub serializer: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub modules: Vec<ModuleReport>,
    pub constituents: usize,
    pub queries: Vec<QueryReport>,
}

/// Built modules plus their left-to-right composition.
pub struct BuiltManifest {
    pub modules: Vec<ModuleReport>,
    pub composed: SerialModule,
}

impl Manifest {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn build(&self) -> Result<BuiltManifest, ManifestError> {
        let handles: HashMap<&str, SerializerHandle> = self
            .serializers
            .iter()
            .map(|name| {
                let handle = SerializerHandle::new(NamedSerializer { name: name.clone() });
                (name.as_str(), handle)
            })
            .collect();

        let mut reports = Vec::with_capacity(self.modules.len());
        let mut composed: Option<SerialModule> = None;
        for entry in &self.modules {
            let registry = build_module(entry, &handles)?;
            info!(module = %entry.name, "built module");
            reports.push(ModuleReport {
                name: entry.name.clone(),
                summary: registry.summary(),
            });
            let module = SerialModule::from(registry);
            composed = Some(match composed {
                Some(acc) => acc + module,
                None => module,
            });
        }

        Ok(BuiltManifest {
            modules: reports,
            composed: composed.unwrap_or_default(),
        })
    }
}

fn build_module(
    entry: &ModuleEntry,
    handles: &HashMap<&str, SerializerHandle>,
) -> Result<serimod_core::impls::ConcreteRegistry, ManifestError> {
    let lookup = |name: &str| {
        handles
            .get(name)
            .cloned()
            .ok_or_else(|| ManifestError::UnknownSerializer {
                module: entry.name.clone(),
                serializer: name.to_string(),
            })
    };
    let registry_err = |source: RegistryError| ManifestError::Registry {
        module: entry.name.clone(),
        source,
    };

    let mut builder = ModuleBuilder::new();
    builder.expect_contextual(entry.expect.iter().map(TypeRef::key));

    for contextual in &entry.contextual {
        builder
            .contextual(contextual.ty.key(), lookup(contextual.serializer.as_str())?)
            .map_err(registry_err)?;
    }

    for polymorphic in &entry.polymorphic {
        let mut bases = Vec::with_capacity(polymorphic.bases.len());
        for base in &polymorphic.bases {
            let handle = base.serializer.as_deref().map(lookup).transpose()?;
            bases.push((base.ty.key(), handle));
        }
        let mut subclasses = Vec::with_capacity(polymorphic.subclasses.len());
        for subclass in &polymorphic.subclasses {
            subclasses.push((subclass.ty.key(), lookup(subclass.serializer.as_str())?));
        }
        builder
            .polymorphic_many(bases, |scope| {
                for (key, handle) in subclasses {
                    scope.add_subclass(key, handle);
                }
            })
            .map_err(registry_err)?;
    }

    builder.build().map_err(registry_err)
}

impl BuiltManifest {
    pub fn answer(&self, query: &Query) -> Option<String> {
        let module = &self.composed;
        let handle = match query {
            Query::Contextual { tag } => module.contextual(&TypeKey::tag(tag.as_str())),
            Query::ByValue { base, tag } => {
                module.resolve_by_value(&TypeKey::tag(base.as_str()), &TypeKey::tag(tag.as_str()))
            }
            Query::ByName { base, name } => {
                module.resolve_by_name(&TypeKey::tag(base.as_str()), name)
            }
        }?;
        handle
            .downcast_ref::<NamedSerializer>()
            .map(|serializer| serializer.name.clone())
    }

    pub fn report(self, queries: &[Query]) -> Report {
        let queries = queries
            .iter()
            .map(|query| QueryReport {
                query: query.clone(),
                serializer: self.answer(query),
            })
            .collect();
        Report {
            constituents: self.composed.flattened().len(),
            modules: self.modules,
            queries,
        }
    }
}
