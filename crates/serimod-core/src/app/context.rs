//! SerialContext - フォーマットが保持する module
//!
//! Encoder / Decoder はこの context を通して registry を参照します。

use super::module::SerialModule;

/// The module a serial format consults at runtime.
#[derive(Debug, Clone, Default)]
pub struct SerialContext {
    module: SerialModule,
}

impl SerialContext {
    pub fn new(module: SerialModule) -> Self {
        Self { module }
    }

    pub fn module(&self) -> &SerialModule {
        &self.module
    }

    /// Installs `module` in front of the current one, so its entries take priority.
    pub fn install(&mut self, module: SerialModule) {
        self.module = module + self.module.clone();
    }

    pub fn with_module(mut self, module: SerialModule) -> Self {
        self.install(module);
        self
    }
}
