// Dweve EDI - Electronic Data Interchange Toolkit
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Explicit plugin registry and cache.
//!
//! Plugins are registered under a [`PluginKey`] (standard, document type,
//! version, release) and resolved with graceful fallback to the
//! unversioned (standard, document type) entry. The registry is an
//! explicit object with a documented lifecycle: create it at process
//! start, inject it into whatever resolves plugins, clear it only through
//! [`PluginRegistry::clear`]. There is no process-global instance and no
//! discovery by naming convention.
//!
//! # Concurrency
//!
//! A registry may be shared across threads running separate parses.
//! Population is idempotent: concurrent duplicate builds for one key are
//! harmless, the first insert wins, and [`Plugin`]s are immutable, so
//! readers need no per-access coordination beyond the interior lock.
//!
//! # Examples
//!
//! ```
//! use edi_core::loops::{LoopAction, LoopDescriptor, RuleContext};
//! use edi_core::plugin::Plugin;
//! use edi_core::registry::{PluginKey, PluginRegistry};
//! use std::sync::Arc;
//!
//! let registry = PluginRegistry::new();
//! let plugin = Arc::new(Plugin::new("850", "Purchase Order", vec![
//!     LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any),
//! ]));
//!
//! registry.insert(PluginKey::unversioned("X12", "850"), plugin);
//!
//! // An exact versioned lookup falls back to the unversioned entry.
//! let resolved = registry.resolve("X12", "850", "004010", "X098A1").unwrap();
//! assert_eq!(resolved.document_type(), "850");
//! ```

use crate::plugin::Plugin;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

/// Identity of one plugin registration.
///
/// Version and release are empty strings for an unversioned entry, which
/// serves as the fallback target for any version of the same document
/// type.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PluginKey {
    standard: String,
    document_type: String,
    version: String,
    release: String,
}

impl PluginKey {
    /// Creates a fully versioned key.
    pub fn new(
        standard: impl Into<String>,
        document_type: impl Into<String>,
        version: impl Into<String>,
        release: impl Into<String>,
    ) -> Self {
        Self {
            standard: standard.into(),
            document_type: document_type.into(),
            version: version.into(),
            release: release.into(),
        }
    }

    /// Creates an unversioned key, the fallback target for its document
    /// type.
    pub fn unversioned(standard: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self::new(standard, document_type, "", "")
    }

    /// Returns the EDI standard identifier (e.g. `"X12"` or `"EDIFACT"`).
    #[inline]
    pub fn standard(&self) -> &str {
        &self.standard
    }

    /// Returns the document type code.
    #[inline]
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// Returns the version, empty for an unversioned key.
    #[inline]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Returns the release, empty for an unversioned key.
    #[inline]
    pub fn release(&self) -> &str {
        &self.release
    }
}

/// Thread-safe, append-only plugin cache.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    plugins: RwLock<BTreeMap<PluginKey, Arc<Plugin>>>,
}

impl PluginRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            plugins: RwLock::new(BTreeMap::new()),
        }
    }

    /// Registers a plugin under a key.
    ///
    /// Returns `false` when the key is already present; the existing entry
    /// is kept, making duplicate concurrent registration harmless.
    pub fn insert(&self, key: PluginKey, plugin: Arc<Plugin>) -> bool {
        let mut plugins = self.plugins.write().expect("plugin registry lock poisoned");
        match plugins.entry(key) {
            std::collections::btree_map::Entry::Vacant(entry) => {
                entry.insert(plugin);
                true
            }
            std::collections::btree_map::Entry::Occupied(_) => false,
        }
    }

    /// Returns the plugin for a key, building and caching it when absent.
    ///
    /// Duplicate concurrent builds may run; the first inserted result wins
    /// and every caller receives the cached instance.
    pub fn get_or_insert_with<F>(&self, key: PluginKey, build: F) -> Arc<Plugin>
    where
        F: FnOnce() -> Plugin,
    {
        if let Some(existing) = self.get(&key) {
            return existing;
        }
        let built = Arc::new(build());
        let mut plugins = self.plugins.write().expect("plugin registry lock poisoned");
        plugins.entry(key).or_insert(built).clone()
    }

    /// Returns the plugin registered under an exact key.
    pub fn get(&self, key: &PluginKey) -> Option<Arc<Plugin>> {
        let plugins = self.plugins.read().expect("plugin registry lock poisoned");
        plugins.get(key).cloned()
    }

    /// Resolves a plugin by (standard, document type, version, release),
    /// falling back to the unversioned (standard, document type) entry.
    pub fn resolve(
        &self,
        standard: &str,
        document_type: &str,
        version: &str,
        release: &str,
    ) -> Option<Arc<Plugin>> {
        let exact = PluginKey::new(standard, document_type, version, release);
        if let Some(plugin) = self.get(&exact) {
            return Some(plugin);
        }
        self.get(&PluginKey::unversioned(standard, document_type))
    }

    /// Returns the number of registered plugins.
    pub fn len(&self) -> usize {
        self.plugins
            .read()
            .expect("plugin registry lock poisoned")
            .len()
    }

    /// Returns `true` when no plugin is registered.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every registration.
    ///
    /// The only way to shrink the registry; intended for process teardown
    /// and tests.
    pub fn clear(&self) {
        self.plugins
            .write()
            .expect("plugin registry lock poisoned")
            .clear();
    }
}
