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

//! Error types for EDI tokenization.
//!
//! All lexical errors are fatal: the tokenizer never recovers, truncates,
//! or downgrades. Errors that arise while consuming input carry a
//! [`Position`] snapshot (segment count, stream char count, segment char
//! count) taken at the point of failure; configuration errors arise at
//! construction and carry no position.

use crate::lex::position::Position;
use thiserror::Error;

/// Errors raised by the tokenizer and its configuration.
#[derive(Debug, Error)]
pub enum LexError {
    // ==================== Configuration errors ====================
    /// Two delimiters in the set collide.
    #[error("delimiter {delimiter:?} duplicates another delimiter in the set")]
    DuplicateDelimiter { delimiter: char },

    /// A delimiter is not a printable ASCII character.
    #[error("delimiter {delimiter:?} is not a printable ASCII character")]
    NonPrintableDelimiter { delimiter: char },

    /// A pre-read block does not fit the internal buffer.
    #[error("pre-read block of {length} bytes exceeds buffer capacity {capacity}")]
    PrereadTooLarge { length: usize, capacity: usize },

    /// A lookahead request exceeds the internal buffer.
    #[error("lookahead of {requested} bytes exceeds buffer capacity {capacity}")]
    LookaheadTooLarge { requested: usize, capacity: usize },

    // ==================== Lexical errors ====================
    /// An element (or segment tag) exceeds its maximum length.
    #[error("{position}: element length {length} exceeds maximum {max}")]
    ElementTooLong {
        length: usize,
        max: usize,
        position: Position,
    },

    /// A segment does not start with a valid tag.
    #[error("{position}: invalid segment tag: {message}")]
    InvalidSegmentTag { message: String, position: Position },

    /// Too many elements without a segment terminator; the terminator
    /// character is probably misconfigured.
    #[error("{position}: segment has {elements} elements without a terminator (maximum {max})")]
    RunawaySegment {
        elements: usize,
        max: usize,
        position: Position,
    },

    /// The character source ended inside an unterminated segment.
    #[error("{position}: unexpected end of data inside a segment")]
    UnexpectedEof { position: Position },

    /// A mandatory element was empty.
    #[error("{position}: mandatory element at index {index} is missing")]
    MandatoryElementMissing { index: usize, position: Position },

    /// An element was requested but a different token kind arrived.
    #[error("{position}: expected an element, found {found}")]
    ExpectedElement {
        found: &'static str,
        position: Position,
    },

    /// An element did not parse as an integer.
    #[error("{position}: invalid numeric element {value:?}")]
    InvalidNumber { value: String, position: Position },

    /// A pushback was requested with nothing to push back.
    #[error("{position}: nothing to push back")]
    PushbackUnderflow { position: Position },

    /// The character source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LexError {
    /// Returns the position where this error occurred, if it arose while
    /// consuming input.
    ///
    /// Configuration and I/O errors carry no position.
    #[inline]
    pub fn position(&self) -> Option<Position> {
        match self {
            LexError::ElementTooLong { position, .. }
            | LexError::InvalidSegmentTag { position, .. }
            | LexError::RunawaySegment { position, .. }
            | LexError::UnexpectedEof { position }
            | LexError::MandatoryElementMissing { position, .. }
            | LexError::ExpectedElement { position, .. }
            | LexError::InvalidNumber { position, .. }
            | LexError::PushbackUnderflow { position } => Some(*position),
            LexError::DuplicateDelimiter { .. }
            | LexError::NonPrintableDelimiter { .. }
            | LexError::PrereadTooLarge { .. }
            | LexError::LookaheadTooLarge { .. }
            | LexError::Io(_) => None,
        }
    }

    /// Returns `true` if this is a configuration error (fatal at
    /// construction or reconfiguration, before any input is consumed).
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LexError::DuplicateDelimiter { .. }
                | LexError::NonPrintableDelimiter { .. }
                | LexError::PrereadTooLarge { .. }
                | LexError::LookaheadTooLarge { .. }
        )
    }

    /// Returns `true` if this error came from the character source.
    #[inline]
    pub fn is_io(&self) -> bool {
        matches!(self, LexError::Io(_))
    }
}

/// Result type for tokenizer operations.
pub type LexResult<T> = Result<T, LexError>;
