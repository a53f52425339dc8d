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

//! Document-type plugins: identity plus an ordered rule table.
//!
//! A [`Plugin`] is the complete loop grammar of one document type: a type
//! code, a display name, and an ordered list of [`LoopDescriptor`]s. The
//! ordering is the precedence: for a given trigger segment, the first rule
//! whose context matches wins and the rest are ignored. The matcher never
//! reorders or prioritizes by specificity on its own - table order is the
//! author's if/else-if chain.
//!
//! Plugins are immutable once constructed and safe to share across
//! threads; the per-segment rule index is built lazily on first query.
//!
//! # Examples
//!
//! ```
//! use edi_core::loops::{LoopAction, LoopDescriptor, RuleContext};
//! use edi_core::plugin::Plugin;
//!
//! let plugin = Plugin::new(
//!     "850",
//!     "Purchase Order",
//!     vec![
//!         LoopDescriptor::new(LoopAction::open("N1"), "N1", 2, RuleContext::path("/PO1")),
//!         LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any),
//!     ],
//! );
//!
//! // Inside the PO1 loop the first, more specific rule wins.
//! let rule = plugin.query("N1", "/PO1", 1).unwrap();
//! assert_eq!(rule.nesting_level(), 2);
//!
//! // Elsewhere the general rule applies.
//! let rule = plugin.query("N1", "/", 0).unwrap();
//! assert_eq!(rule.nesting_level(), 1);
//! ```

use crate::loops::descriptor::LoopDescriptor;
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Map from trigger segment to the ordered candidate rules for it.
///
/// Built once per plugin and read-only thereafter. Declaration order is
/// preserved; wildcard rules (no trigger segment) are not indexed.
#[derive(Debug, Default)]
pub struct RuleIndex {
    by_segment: BTreeMap<String, Vec<usize>>,
}

impl RuleIndex {
    fn build(loops: &[LoopDescriptor]) -> Self {
        let mut by_segment: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (position, descriptor) in loops.iter().enumerate() {
            if let Some(segment) = descriptor.first_segment() {
                by_segment
                    .entry(segment.to_string())
                    .or_default()
                    .push(position);
            }
        }
        Self { by_segment }
    }

    /// Returns the candidate rule positions for a trigger segment, in
    /// declaration order.
    pub fn candidates(&self, segment: &str) -> &[usize] {
        self.by_segment
            .get(segment)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the number of distinct trigger segments.
    pub fn len(&self) -> usize {
        self.by_segment.len()
    }

    /// Returns `true` when no trigger segment is indexed.
    pub fn is_empty(&self) -> bool {
        self.by_segment.is_empty()
    }
}

/// One document type's identity and loop grammar.
pub struct Plugin {
    document_type: String,
    document_name: String,
    loops: Vec<LoopDescriptor>,
    index: OnceLock<RuleIndex>,
}

impl Plugin {
    /// Creates a plugin from a type code, display name, and ordered rule
    /// table.
    pub fn new(
        document_type: impl Into<String>,
        document_name: impl Into<String>,
        loops: Vec<LoopDescriptor>,
    ) -> Self {
        Self {
            document_type: document_type.into(),
            document_name: document_name.into(),
            loops,
            index: OnceLock::new(),
        }
    }

    /// Returns the document type code (e.g. `"850"` or `"ORDERS"`).
    #[inline]
    pub fn document_type(&self) -> &str {
        &self.document_type
    }

    /// Returns the human-readable document name.
    #[inline]
    pub fn document_name(&self) -> &str {
        &self.document_name
    }

    /// Returns the ordered rule table.
    #[inline]
    pub fn loops(&self) -> &[LoopDescriptor] {
        &self.loops
    }

    /// Returns the rule index, building it on first use.
    pub fn index(&self) -> &RuleIndex {
        self.index.get_or_init(|| RuleIndex::build(&self.loops))
    }

    /// Finds the applicable rule for a segment in the current context.
    ///
    /// Candidates are tried in declaration order; the first whose context
    /// matches the supplied ancestor path and nesting level wins. `None`
    /// means no rule applies and the segment stays in the active loop.
    pub fn query(
        &self,
        segment_type: &str,
        context_path: &str,
        nesting_level: usize,
    ) -> Option<&LoopDescriptor> {
        for &position in self.index().candidates(segment_type) {
            let descriptor = &self.loops[position];
            if descriptor.context().matches(context_path, nesting_level) {
                return Some(descriptor);
            }
        }
        None
    }
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("document_type", &self.document_type)
            .field("document_name", &self.document_name)
            .field("loops", &self.loops.len())
            .finish()
    }
}
