//! In-memory template provider for testing.

use std::{
    collections::HashMap,
    sync::{Arc, RwLock},
};

use kiproj_core::{
    application::{ApplicationError, ports::TemplateProvider},
    domain::TemplateAsset,
    error::KiprojResult,
};

use crate::template_provider::EmbeddedTemplates;

/// Thread-safe in-memory template provider.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplates {
    inner: Arc<RwLock<HashMap<TemplateAsset, Vec<u8>>>>,
}

impl InMemoryTemplates {
    /// Create an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a provider holding the built-in templates.
    pub fn with_builtin() -> Self {
        let provider = Self::new();
        for asset in TemplateAsset::ALL {
            provider.insert(asset, EmbeddedTemplates::bytes(asset));
        }
        provider
    }

    pub fn insert(&self, asset: TemplateAsset, content: impl Into<Vec<u8>>) {
        self.inner.write().unwrap().insert(asset, content.into());
    }

    /// Drop `asset` so that fetching it fails.
    pub fn remove(&self, asset: TemplateAsset) {
        self.inner.write().unwrap().remove(&asset);
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TemplateProvider for InMemoryTemplates {
    fn fetch(&self, asset: TemplateAsset) -> KiprojResult<Vec<u8>> {
        let inner = self.inner.read().map_err(|_| ApplicationError::TemplateMissing {
            asset,
            source_location: self.describe(),
        })?;

        inner.get(&asset).cloned().ok_or_else(|| {
            ApplicationError::TemplateMissing {
                asset,
                source_location: self.describe(),
            }
            .into()
        })
    }

    fn describe(&self) -> String {
        "in-memory templates".into()
    }
}
