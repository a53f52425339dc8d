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

//! Umbrella error type for EDI parsing.

use crate::lex::LexError;
use crate::loops::LoopError;
use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdiErrorKind {
    /// Character-level violation found by the tokenizer.
    Lexical,
    /// Segment ordering contradicts the declared loop table.
    Grammar,
    /// Malformed delimiter set or buffer configuration.
    Configuration,
    /// The character source failed.
    IO,
}

impl fmt::Display for EdiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lexical => write!(f, "LexicalError"),
            Self::Grammar => write!(f, "GrammarError"),
            Self::Configuration => write!(f, "ConfigurationError"),
            Self::IO => write!(f, "IOError"),
        }
    }
}

/// An error from either engine, for callers that drive both.
///
/// The core raises immediately and never recovers; a caller-level policy
/// that logs and continues wraps these values, which stay valid after the
/// parser has moved on.
#[derive(Debug, Error)]
pub enum EdiError {
    /// Tokenizer or configuration failure.
    #[error(transparent)]
    Lex(#[from] LexError),

    /// Loop grammar failure.
    #[error(transparent)]
    Loop(#[from] LoopError),
}

impl EdiError {
    /// Classifies this error.
    pub fn kind(&self) -> EdiErrorKind {
        match self {
            EdiError::Lex(e) if e.is_configuration() => EdiErrorKind::Configuration,
            EdiError::Lex(e) if e.is_io() => EdiErrorKind::IO,
            EdiError::Lex(_) => EdiErrorKind::Lexical,
            EdiError::Loop(_) => EdiErrorKind::Grammar,
        }
    }
}

/// Result type for operations spanning both engines.
pub type EdiResult<T> = Result<T, EdiError>;
