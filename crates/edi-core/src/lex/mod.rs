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

//! Lexical analysis subsystem for EDI interchanges.
//!
//! This module turns a raw character source into a lazy stream of typed
//! tokens, driven by a per-interchange delimiter set.
//!
//! # Module Structure
//!
//! - [`error`] - Error types for tokenization and configuration
//! - [`position`] - Position snapshots (segment/char counters)
//! - [`delimiters`] - Delimiter sets and character classification
//! - [`token`] - Token kinds and the reusable token
//! - [`tokenizer`] - The character-level state machine
//!
//! # Examples
//!
//! ## Tokenizing a Segment
//!
//! ```
//! use edi_core::lex::{Delimiters, Tokenizer, TokenKind};
//! use std::io::Cursor;
//!
//! let mut tok = Tokenizer::new(Cursor::new("N1*ST*ACME CORP~"), Delimiters::x12());
//!
//! assert_eq!(tok.next_token().unwrap().value(), "N1");
//! assert_eq!(tok.next_simple_value().unwrap(), "ST");
//! assert_eq!(tok.next_simple_value().unwrap(), "ACME CORP");
//! assert_eq!(tok.next_token().unwrap().kind(), TokenKind::SegmentEnd);
//! ```
//!
//! ## Composite Elements
//!
//! ```
//! use edi_core::lex::{Delimiters, Tokenizer};
//! use std::io::Cursor;
//!
//! let mut tok = Tokenizer::new(Cursor::new("SVC*HC:99213:25*150~"), Delimiters::x12());
//! tok.next_token().unwrap();
//! assert_eq!(tok.next_composite_element().unwrap(), vec!["HC", "99213", "25"]);
//! assert_eq!(tok.next_composite_element().unwrap(), vec!["150"]);
//! ```

pub mod delimiters;
pub mod error;
pub mod position;
pub mod token;
pub mod tokenizer;

pub use delimiters::{CharClass, Delimiters};
pub use error::{LexError, LexResult};
pub use position::Position;
pub use token::{Token, TokenKind};
pub use tokenizer::{Tokenizer, TokenizerConfig};
