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

//! Core engines for parsing EDI interchanges.
//!
//! This crate provides the two tightly coupled engines behind an EDI
//! (ANSI X12 / UN-EDIFACT) event-stream parser:
//!
//! - The [`lex`] module: a character-level tokenizer over a configurable
//!   delimiter set, with lookahead, pushback, recording, and mid-stream
//!   buffer handoff for multi-interchange streams.
//! - The [`loops`] module: a declarative, priority-ordered rule matcher
//!   and loop stack that infers nested segment loops from an ordered
//!   per-document-type rule table ([`plugin::Plugin`]), since EDI syntax
//!   itself carries no nesting.
//!
//! Document-type readers sit on top: they pull tokens, feed every segment
//! tag to a [`loops::LoopController`], and emit structural events from its
//! reports. Envelope handling, serialization, and acknowledgment
//! generation are deliberately outside this crate.
//!
//! # Example
//!
//! ```
//! use edi_core::lex::{Delimiters, Tokenizer, TokenKind};
//! use edi_core::loops::{LoopAction, LoopController, LoopDescriptor, RuleContext};
//! use edi_core::plugin::Plugin;
//! use std::io::Cursor;
//! use std::sync::Arc;
//!
//! let plugin = Arc::new(Plugin::new(
//!     "850",
//!     "Purchase Order",
//!     vec![
//!         LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any),
//!         LoopDescriptor::new(LoopAction::open("PO1"), "PO1", 1, RuleContext::Any),
//!     ],
//! ));
//!
//! let input = "BEG*00*SA*PO1~N1*ST*ACME~PO1*1*10*EA~";
//! let mut tokenizer = Tokenizer::new(Cursor::new(input), Delimiters::x12());
//! let mut controller = LoopController::new(plugin);
//!
//! let mut entered = Vec::new();
//! loop {
//!     let token = tokenizer.next_token().unwrap();
//!     match token.kind() {
//!         TokenKind::SegmentStart => {
//!             let tag = token.value().to_string();
//!             let transition = controller.transition(&tag).unwrap();
//!             if transition.entered {
//!                 entered.push(transition.loop_name.unwrap());
//!             }
//!         }
//!         TokenKind::EndOfData => break,
//!         _ => {}
//!     }
//! }
//! assert_eq!(entered, vec!["N1", "PO1"]);
//! ```
//!
//! # Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` on the rule-table data types
//!   (descriptors, contexts, actions, plugin keys).

mod error;
pub mod lex;
pub mod loops;
pub mod plugin;
pub mod registry;

pub use error::{EdiError, EdiErrorKind, EdiResult};
pub use lex::{Delimiters, LexError, LexResult, Position, Token, TokenKind, Tokenizer, TokenizerConfig};
pub use loops::{
    LoopAction, LoopContext, LoopController, LoopDescriptor, LoopError, LoopResult, LoopStack,
    RuleContext, Transition, TransitionHooks,
};
pub use plugin::{Plugin, RuleIndex};
pub use registry::{PluginKey, PluginRegistry};
