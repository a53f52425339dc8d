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

//! The stack of currently open loops.

use crate::loops::context::LoopContext;

/// Ordered stack of open loop occurrences, innermost last.
///
/// The implicit outer loop at nesting level 0 is never pushed, so the
/// stack depth always equals the current nesting level. The stack derives
/// the context path used for path-based rule matching: loop names joined
/// outer-to-inner with `/` and a leading `/` (the empty stack is `"/"`).
///
/// # Examples
///
/// ```
/// use edi_core::loops::{LoopContext, LoopStack};
///
/// let mut stack = LoopStack::new();
/// assert_eq!(stack.context_path(), "/");
///
/// stack.push(LoopContext::new("PO1"));
/// stack.push(LoopContext::new("PID"));
/// assert_eq!(stack.context_path(), "/PO1/PID");
/// assert_eq!(stack.depth(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoopStack {
    entries: Vec<LoopContext>,
}

impl LoopStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of open loops.
    #[inline]
    pub fn depth(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when no loop is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pushes a freshly entered loop.
    #[inline]
    pub fn push(&mut self, context: LoopContext) {
        self.entries.push(context);
    }

    /// Pops the innermost loop.
    #[inline]
    pub fn pop(&mut self) -> Option<LoopContext> {
        self.entries.pop()
    }

    /// Returns the innermost open loop.
    #[inline]
    pub fn innermost(&self) -> Option<&LoopContext> {
        self.entries.last()
    }

    /// Returns the innermost open loop mutably.
    #[inline]
    pub fn innermost_mut(&mut self) -> Option<&mut LoopContext> {
        self.entries.last_mut()
    }

    /// Renames the bottom-most open loop.
    ///
    /// This exists for a single legacy re-basing case; see
    /// [`LoopController`](crate::loops::LoopController). Returns `false`
    /// when the stack is empty.
    pub fn rebase_bottom(&mut self, name: impl Into<String>) -> bool {
        match self.entries.first_mut() {
            Some(bottom) => {
                bottom.set_name(name);
                true
            }
            None => false,
        }
    }

    /// Returns the derived context path.
    pub fn context_path(&self) -> String {
        if self.entries.is_empty() {
            return "/".to_string();
        }
        let mut path = String::new();
        for entry in &self.entries {
            path.push('/');
            path.push_str(entry.name());
        }
        path
    }

    /// Iterates over the open loops, outermost first.
    pub fn iter(&self) -> impl Iterator<Item = &LoopContext> {
        self.entries.iter()
    }
}
