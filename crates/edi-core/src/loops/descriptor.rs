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

//! Declarative loop-transition rules.
//!
//! A [`LoopDescriptor`] states: "segment X, seen in context C, causes a
//! transition to loop L at nesting level N". An ordered list of descriptors
//! is a document type's whole grammar - the matcher takes the first
//! descriptor whose context matches, so list order encodes if/else-if
//! precedence. Authors place the most specific context (longest path,
//! explicit level) first and the most general last.
//!
//! # Examples
//!
//! An X12-style party loop that nests differently inside a line-item loop:
//!
//! ```
//! use edi_core::loops::{LoopAction, LoopDescriptor, RuleContext};
//!
//! let rules = vec![
//!     // Inside the PO1 loop, N1 opens a nested party loop.
//!     LoopDescriptor::new(LoopAction::open("N1"), "N1", 2, RuleContext::path("/PO1")),
//!     // Anywhere else, N1 opens the heading party loop.
//!     LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any),
//! ];
//! assert_eq!(rules[0].nesting_level(), 2);
//! ```

/// What a matched rule does to the loop stack.
///
/// The legacy rule tables encoded these cases as sentinel strings (a bare
/// name, `/name`, `.name`, and a CURRENT marker); the closed variants
/// eliminate prefix sniffing while preserving the exact semantics.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoopAction {
    /// Open a new instance of the named loop.
    Open(String),
    /// Resume an ancestor loop at the rule's nesting level without opening
    /// anything. The optional name re-bases the bottom-of-stack loop name
    /// in one legacy case: it only takes effect at nesting level 0.
    ResumeAncestor(Option<String>),
    /// Resume the current loop at the rule's nesting level without opening
    /// anything. At level 0 the resumed loop is the implicit outer loop.
    /// The optional name is informational.
    ResumeCurrent(Option<String>),
    /// Re-enter the loop that is already active; at the current level this
    /// is a no-op.
    Stay,
}

impl LoopAction {
    /// Convenience constructor for [`LoopAction::Open`].
    pub fn open(name: impl Into<String>) -> Self {
        Self::Open(name.into())
    }

    /// Convenience constructor for [`LoopAction::ResumeAncestor`] without
    /// a re-base name.
    pub fn resume_ancestor() -> Self {
        Self::ResumeAncestor(None)
    }

    /// Convenience constructor for [`LoopAction::ResumeCurrent`] without a
    /// name.
    pub fn resume_current() -> Self {
        Self::ResumeCurrent(None)
    }

    /// Returns `true` when this action resumes rather than opens.
    #[inline]
    pub fn is_resume(&self) -> bool {
        matches!(self, Self::ResumeAncestor(_) | Self::ResumeCurrent(_))
    }
}

/// The context a rule requires before it matches.
///
/// Exactly one constraint applies per rule; the closed variants replace
/// the legacy "either a context string or a level integer" convention.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RuleContext {
    /// Matches in any context.
    Any,
    /// Matches when the current nesting level equals the given level,
    /// regardless of loop names.
    AtLevel(usize),
    /// Matches only when no loop is open.
    Initial,
    /// Matches when the innermost open loop has this name.
    InLoop(String),
    /// Matches when the full ancestor path (outer-to-inner loop names,
    /// `/`-joined with a leading `/`) equals this path exactly.
    Path(String),
}

impl RuleContext {
    /// Convenience constructor for [`RuleContext::InLoop`].
    pub fn in_loop(name: impl Into<String>) -> Self {
        Self::InLoop(name.into())
    }

    /// Convenience constructor for [`RuleContext::Path`].
    pub fn path(path: impl Into<String>) -> Self {
        Self::Path(path.into())
    }

    /// Tests this context against the current ancestor path and nesting
    /// level.
    ///
    /// The path is `/`-joined, outer-to-inner, with a leading `/`; the
    /// empty stack is `"/"`.
    pub fn matches(&self, context_path: &str, nesting_level: usize) -> bool {
        match self {
            Self::Any => true,
            Self::AtLevel(level) => nesting_level == *level,
            Self::Initial => nesting_level == 0,
            Self::InLoop(name) => {
                nesting_level > 0
                    && context_path
                        .rsplit('/')
                        .next()
                        .is_some_and(|innermost| innermost == name)
            }
            Self::Path(path) => context_path == path,
        }
    }
}

/// One immutable loop-transition rule.
///
/// Many descriptors may share a trigger segment; their relative order in
/// the document type's table is significant and preserved end to end.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoopDescriptor {
    action: LoopAction,
    first_segment: Option<String>,
    nesting_level: usize,
    context: RuleContext,
}

impl LoopDescriptor {
    /// Creates a rule triggered by the given segment tag.
    pub fn new(
        action: LoopAction,
        first_segment: impl Into<String>,
        nesting_level: usize,
        context: RuleContext,
    ) -> Self {
        Self {
            action,
            first_segment: Some(first_segment.into()),
            nesting_level,
            context,
        }
    }

    /// Creates a wildcard rule with no trigger segment.
    ///
    /// Wildcard rules are carried in tables for documentation tooling but
    /// are never matched directly.
    pub fn wildcard(action: LoopAction, nesting_level: usize, context: RuleContext) -> Self {
        Self {
            action,
            first_segment: None,
            nesting_level,
            context,
        }
    }

    /// Returns the stack action of this rule.
    #[inline]
    pub fn action(&self) -> &LoopAction {
        &self.action
    }

    /// Returns the trigger segment tag, or `None` for a wildcard rule.
    #[inline]
    pub fn first_segment(&self) -> Option<&str> {
        self.first_segment.as_deref()
    }

    /// Returns the nesting level this rule transitions to.
    #[inline]
    pub fn nesting_level(&self) -> usize {
        self.nesting_level
    }

    /// Returns the context constraint of this rule.
    #[inline]
    pub fn context(&self) -> &RuleContext {
        &self.context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== LoopAction tests ====================

    #[test]
    fn test_action_constructors() {
        assert_eq!(LoopAction::open("PO1"), LoopAction::Open("PO1".to_string()));
        assert_eq!(LoopAction::resume_ancestor(), LoopAction::ResumeAncestor(None));
        assert_eq!(LoopAction::resume_current(), LoopAction::ResumeCurrent(None));
    }

    #[test]
    fn test_action_is_resume() {
        assert!(LoopAction::resume_ancestor().is_resume());
        assert!(LoopAction::resume_current().is_resume());
        assert!(LoopAction::ResumeAncestor(Some("X".into())).is_resume());
        assert!(!LoopAction::open("X").is_resume());
        assert!(!LoopAction::Stay.is_resume());
    }

    // ==================== RuleContext matching tests ====================

    #[test]
    fn test_any_always_matches() {
        assert!(RuleContext::Any.matches("/", 0));
        assert!(RuleContext::Any.matches("/A/B", 2));
    }

    #[test]
    fn test_at_level_matches_level_only() {
        let ctx = RuleContext::AtLevel(2);
        assert!(ctx.matches("/A/B", 2));
        assert!(ctx.matches("/X/Y", 2));
        assert!(!ctx.matches("/A", 1));
        assert!(!ctx.matches("/", 0));
    }

    #[test]
    fn test_initial_matches_empty_stack() {
        assert!(RuleContext::Initial.matches("/", 0));
        assert!(!RuleContext::Initial.matches("/A", 1));
    }

    #[test]
    fn test_in_loop_matches_innermost() {
        let ctx = RuleContext::in_loop("B");
        assert!(ctx.matches("/A/B", 2));
        assert!(ctx.matches("/B", 1));
        assert!(!ctx.matches("/B/A", 2));
        assert!(!ctx.matches("/", 0));
    }

    #[test]
    fn test_in_loop_does_not_match_outer_name() {
        let ctx = RuleContext::in_loop("A");
        assert!(!ctx.matches("/A/B", 2));
    }

    #[test]
    fn test_path_matches_exactly() {
        let ctx = RuleContext::path("/A/B");
        assert!(ctx.matches("/A/B", 2));
        assert!(!ctx.matches("/A", 1));
        assert!(!ctx.matches("/A/B/C", 3));
        assert!(!ctx.matches("/A/BB", 2));
    }

    // ==================== LoopDescriptor tests ====================

    #[test]
    fn test_descriptor_accessors() {
        let d = LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any);
        assert_eq!(d.action(), &LoopAction::open("N1"));
        assert_eq!(d.first_segment(), Some("N1"));
        assert_eq!(d.nesting_level(), 1);
        assert_eq!(d.context(), &RuleContext::Any);
    }

    #[test]
    fn test_wildcard_descriptor() {
        let d = LoopDescriptor::wildcard(LoopAction::resume_ancestor(), 0, RuleContext::Any);
        assert_eq!(d.first_segment(), None);
    }

    #[test]
    fn test_descriptor_clone_equality() {
        let d = LoopDescriptor::new(LoopAction::Stay, "REF", 1, RuleContext::in_loop("N1"));
        assert_eq!(d.clone(), d);
    }
}
