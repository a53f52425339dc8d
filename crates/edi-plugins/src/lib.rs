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

//! Built-in document-type loop tables.
//!
//! Each table is a plain factory function returning an immutable
//! [`Plugin`](edi_core::plugin::Plugin); nothing here is discovered by
//! naming convention or reflection. [`register_builtin`] populates a
//! caller-owned [`PluginRegistry`](edi_core::registry::PluginRegistry)
//! with every table under its unversioned key.
//!
//! # Examples
//!
//! ```
//! use edi_core::registry::PluginRegistry;
//! use edi_plugins::register_builtin;
//!
//! let registry = PluginRegistry::new();
//! register_builtin(&registry);
//!
//! let plugin = registry.resolve("X12", "850", "004010", "").unwrap();
//! assert_eq!(plugin.document_name(), "Purchase Order");
//! ```

use edi_core::registry::{PluginKey, PluginRegistry};
use std::sync::Arc;

pub mod edifact;
pub mod x12;

/// Registers every built-in table in the given registry.
///
/// Registration is idempotent: keys that are already present keep their
/// existing plugin.
pub fn register_builtin(registry: &PluginRegistry) {
    registry.insert(
        PluginKey::unversioned("X12", "850"),
        Arc::new(x12::purchase_order_850()),
    );
    registry.insert(
        PluginKey::unversioned("X12", "810"),
        Arc::new(x12::invoice_810()),
    );
    registry.insert(
        PluginKey::unversioned("X12", "856"),
        Arc::new(x12::ship_notice_856()),
    );
    registry.insert(
        PluginKey::unversioned("EDIFACT", "ORDERS"),
        Arc::new(edifact::orders()),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtin() {
        let registry = PluginRegistry::new();
        register_builtin(&registry);
        assert_eq!(registry.len(), 4);
        assert!(registry.resolve("X12", "850", "", "").is_some());
        assert!(registry.resolve("X12", "810", "", "").is_some());
        assert!(registry.resolve("X12", "856", "", "").is_some());
        assert!(registry.resolve("EDIFACT", "ORDERS", "", "").is_some());
    }

    #[test]
    fn test_register_builtin_is_idempotent() {
        let registry = PluginRegistry::new();
        register_builtin(&registry);
        let first = registry.resolve("X12", "850", "", "").unwrap();
        register_builtin(&registry);
        assert_eq!(registry.len(), 4);
        assert!(Arc::ptr_eq(
            &first,
            &registry.resolve("X12", "850", "", "").unwrap()
        ));
    }
}
