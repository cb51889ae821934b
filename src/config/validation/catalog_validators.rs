//! Catalog configuration validators
//!
//! Only the shape of the source is checked here. The catalog body itself is
//! validated when it is loaded, see `PermissionCatalog::from_definition`.

use super::trait_def::Validate;
use crate::config::models::*;
use tracing::debug;

impl Validate for CatalogConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating catalog configuration");

        match self.source {
            CatalogSource::Builtin => Ok(()),
            CatalogSource::Path => match &self.path {
                Some(path) if !path.as_os_str().is_empty() => Ok(()),
                _ => Err("Catalog path is required when source is 'path'".to_string()),
            },
            CatalogSource::Inline => match &self.inline {
                Some(definition) if !definition.permissions.is_empty() => Ok(()),
                Some(_) => Err("Inline catalog must define at least one permission".to_string()),
                None => Err("Inline catalog is required when source is 'inline'".to_string()),
            },
        }
    }
}
