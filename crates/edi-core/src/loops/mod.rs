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

//! Loop-recognition engine for EDI documents.
//!
//! EDI syntax is flat: nothing in the characters says where a nested
//! structure (a segment loop or segment group) begins or ends. That
//! knowledge lives in a document-type-specific rule table, and this module
//! interprets it: a tiny declarative grammar engine with ordering
//! semantics, context-path matching, and strict stack-depth invariants.
//!
//! # Module Structure
//!
//! - [`descriptor`] - Immutable transition rules, contexts, and actions
//! - [`context`] - Mutable per-occurrence loop state
//! - [`stack`] - The stack of open loops and its derived context path
//! - [`controller`] - The transition state machine
//! - [`error`] - Grammar/sequencing errors
//!
//! # Examples
//!
//! ```
//! use edi_core::loops::{LoopAction, LoopController, LoopDescriptor, RuleContext};
//! use edi_core::plugin::Plugin;
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(Plugin::new(
//!     "850",
//!     "Purchase Order",
//!     vec![
//!         LoopDescriptor::new(LoopAction::open("PO1"), "PO1", 1, RuleContext::Any),
//!         LoopDescriptor::new(LoopAction::open("PID"), "PID", 2, RuleContext::in_loop("PO1")),
//!     ],
//! ));
//!
//! let mut controller = LoopController::new(plugin);
//! controller.transition("PO1").unwrap();
//! controller.transition("PID").unwrap();
//! assert_eq!(controller.stack().context_path(), "/PO1/PID");
//! ```

pub mod context;
pub mod controller;
pub mod descriptor;
pub mod error;
pub mod stack;

pub use context::LoopContext;
pub use controller::{LoopController, Transition, TransitionHooks, OUTER_LOOP_NAME};
pub use descriptor::{LoopAction, LoopDescriptor, RuleContext};
pub use error::{LoopError, LoopResult};
pub use stack::LoopStack;
