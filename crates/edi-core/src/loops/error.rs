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

//! Error types for the loop-recognition engine.

use thiserror::Error;

/// Errors raised while applying loop-transition rules.
///
/// A grammar error means the document's segment ordering contradicts the
/// declared loop table; the engine never clamps or silently corrects it.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoopError {
    /// A matched rule would close a negative number of loops, or more
    /// loops than are open.
    #[error(
        "segment {segment:?} (ordinal {segment_ordinal}) closes {closed} loop(s) but {depth} are open"
    )]
    InvalidLoopNesting {
        /// The offending segment tag.
        segment: String,
        /// Number of loops the rule tried to close (may be negative).
        closed: i64,
        /// Number of loops open when the rule matched.
        depth: usize,
        /// Ordinal of the offending segment within the transition stream.
        segment_ordinal: usize,
    },

    /// A validation hook rejected the transition.
    #[error("loop validation failed: {0}")]
    Validation(String),
}

/// Result type for loop-engine operations.
pub type LoopResult<T> = Result<T, LoopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_nesting_display() {
        let err = LoopError::InvalidLoopNesting {
            segment: "PO1".to_string(),
            closed: 3,
            depth: 1,
            segment_ordinal: 42,
        };
        let msg = format!("{}", err);
        assert!(msg.contains("\"PO1\""));
        assert!(msg.contains("closes 3"));
        assert!(msg.contains("1 are open"));
        assert!(msg.contains("ordinal 42"));
    }

    #[test]
    fn test_negative_closed_count_display() {
        let err = LoopError::InvalidLoopNesting {
            segment: "HL".to_string(),
            closed: -2,
            depth: 0,
            segment_ordinal: 1,
        };
        assert!(format!("{}", err).contains("-2"));
    }

    #[test]
    fn test_validation_display() {
        let err = LoopError::Validation("loop N1 missing mandatory segment N3".to_string());
        assert!(format!("{}", err).contains("N1 missing"));
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(LoopError::Validation("x".to_string()));
    }
}
