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

//! Per-occurrence state of one active loop.

use std::collections::BTreeSet;

/// Mutable state of one open loop occurrence.
///
/// A context is created when its loop is entered, mutated as segments are
/// observed, and destroyed when the loop closes. The position and
/// repetition counters are caller-maintained bookkeeping slots; the
/// mandatory-segment set backs the stricter validation modes layered on
/// top of the core (see
/// [`TransitionHooks`](crate::loops::TransitionHooks)).
///
/// # Examples
///
/// ```
/// use edi_core::loops::LoopContext;
///
/// let mut ctx = LoopContext::new("N1");
/// ctx.require_segment("N3");
/// ctx.require_segment("N4");
/// ctx.note_segment_presence("N3");
/// assert_eq!(ctx.missing_mandatory().collect::<Vec<_>>(), vec!["N4"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopContext {
    name: String,
    segment_position: usize,
    segment_repetitions: usize,
    mandatory_segments: BTreeSet<String>,
}

impl LoopContext {
    /// Creates the state for a freshly entered loop.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            segment_position: 0,
            segment_repetitions: 0,
            mandatory_segments: BTreeSet::new(),
        }
    }

    /// Returns the loop name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the ordinal segment position within the loop.
    #[inline]
    pub fn segment_position(&self) -> usize {
        self.segment_position
    }

    /// Sets the ordinal segment position within the loop.
    #[inline]
    pub fn set_segment_position(&mut self, position: usize) {
        self.segment_position = position;
    }

    /// Returns the maximum repeat count noted for this loop.
    #[inline]
    pub fn segment_repetitions(&self) -> usize {
        self.segment_repetitions
    }

    /// Sets the maximum repeat count for this loop.
    #[inline]
    pub fn set_segment_repetitions(&mut self, repetitions: usize) {
        self.segment_repetitions = repetitions;
    }

    /// Marks a segment tag as mandatory for this occurrence.
    pub fn require_segment(&mut self, tag: impl Into<String>) {
        self.mandatory_segments.insert(tag.into());
    }

    /// Notes that a segment was observed, clearing it from the outstanding
    /// mandatory set.
    pub fn note_segment_presence(&mut self, tag: &str) {
        self.mandatory_segments.remove(tag);
    }

    /// Iterates over the mandatory segments not yet observed.
    pub fn missing_mandatory(&self) -> impl Iterator<Item = &str> {
        self.mandatory_segments.iter().map(String::as_str)
    }

    /// Returns `true` when every mandatory segment has been observed.
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.mandatory_segments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== LoopContext tests ====================

    #[test]
    fn test_new_context() {
        let ctx = LoopContext::new("PO1");
        assert_eq!(ctx.name(), "PO1");
        assert_eq!(ctx.segment_position(), 0);
        assert_eq!(ctx.segment_repetitions(), 0);
        assert!(ctx.is_satisfied());
    }

    #[test]
    fn test_counters_are_caller_settable() {
        let mut ctx = LoopContext::new("N1");
        ctx.set_segment_position(4);
        ctx.set_segment_repetitions(200);
        assert_eq!(ctx.segment_position(), 4);
        assert_eq!(ctx.segment_repetitions(), 200);
    }

    #[test]
    fn test_mandatory_segment_bookkeeping() {
        let mut ctx = LoopContext::new("CLM");
        ctx.require_segment("DTP");
        ctx.require_segment("HI");
        assert!(!ctx.is_satisfied());

        ctx.note_segment_presence("DTP");
        assert_eq!(ctx.missing_mandatory().collect::<Vec<_>>(), vec!["HI"]);

        ctx.note_segment_presence("HI");
        assert!(ctx.is_satisfied());
    }

    #[test]
    fn test_note_unknown_segment_is_harmless() {
        let mut ctx = LoopContext::new("N1");
        ctx.note_segment_presence("ZZZ");
        assert!(ctx.is_satisfied());
    }

    #[test]
    fn test_require_is_idempotent() {
        let mut ctx = LoopContext::new("N1");
        ctx.require_segment("N3");
        ctx.require_segment("N3");
        assert_eq!(ctx.missing_mandatory().count(), 1);
    }

    #[test]
    fn test_set_name() {
        let mut ctx = LoopContext::new("old");
        ctx.set_name("new");
        assert_eq!(ctx.name(), "new");
    }
}
