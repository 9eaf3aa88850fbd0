//! Configuration resolver trait for layered overrides.
//!
//! ```text
//! ConfigLoader.load()  →  InsightConfig (files + env)
//!                              │
//!                              ▼
//!                     ConfigResolver.resolve()
//!                              │
//!                              ▼
//!                     InsightConfig (final)
//! ```

use super::{ConfigError, InsightConfig};

/// Produces the final configuration for one invocation.
///
/// Implementors load the file and environment layers and apply their own
/// overrides on top. Only explicitly given values should override;
/// unspecified options keep the loaded value.
pub trait ConfigResolver {
    /// Resolves the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a layer cannot be loaded.
    fn resolve(&self) -> Result<InsightConfig, ConfigError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_resolver_overrides() {
        struct NoVerify;

        impl ConfigResolver for NoVerify {
            fn resolve(&self) -> Result<InsightConfig, ConfigError> {
                let mut config = InsightConfig::default();
                config.table.verify_hierarchy = false;
                Ok(config)
            }
        }

        let resolver: &dyn ConfigResolver = &NoVerify;
        assert!(!resolver.resolve().unwrap().table.verify_hierarchy);
    }
}
