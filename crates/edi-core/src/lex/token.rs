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

//! Lexical tokens produced by the tokenizer.
//!
//! A [`Token`] describes one lexical unit of an EDI stream together with
//! its position metadata: the element index within the segment, the
//! sub-element index within a composite, and the segment tag.
//!
//! # Reuse Contract
//!
//! The tokenizer keeps a single mutable token and overwrites it for every
//! fetch; [`Tokenizer::next_token`](crate::lex::Tokenizer::next_token)
//! hands out a shared reference. The value buffer is therefore valid only
//! until the next fetch - callers that need to keep a value copy it first
//! (the borrow checker enforces this). The [`Iterator`] adapter on the
//! tokenizer yields owned clones instead.

/// The kind of one lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TokenKind {
    /// A new segment begins; the value is the segment tag.
    SegmentStart,
    /// A non-empty simple (non-composite) element.
    Simple,
    /// An element with no content.
    Empty,
    /// One sub-element of a composite element.
    SubElement,
    /// A sub-element with no content.
    SubEmpty,
    /// The current segment ended.
    SegmentEnd,
    /// The character source is exhausted.
    EndOfData,
}

impl TokenKind {
    /// Returns a short human-readable name for diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            Self::SegmentStart => "segment start",
            Self::Simple => "simple element",
            Self::Empty => "empty element",
            Self::SubElement => "sub-element",
            Self::SubEmpty => "empty sub-element",
            Self::SegmentEnd => "segment end",
            Self::EndOfData => "end of data",
        }
    }

    /// Returns `true` for the two composite sub-element kinds.
    #[inline]
    pub fn is_sub_element(&self) -> bool {
        matches!(self, Self::SubElement | Self::SubEmpty)
    }

    /// Returns `true` for the element-level kinds (simple or empty).
    #[inline]
    pub fn is_element(&self) -> bool {
        matches!(self, Self::Simple | Self::Empty)
    }
}

/// One lexical unit and its position metadata.
///
/// # Examples
///
/// ```
/// use edi_core::lex::{Delimiters, Tokenizer, TokenKind};
/// use std::io::Cursor;
///
/// let delims = Delimiters::new('-', '.', '!').unwrap();
/// let mut tok = Tokenizer::new(Cursor::new("N1-SHIP!"), delims);
///
/// let t = tok.next_token().unwrap();
/// assert_eq!(t.kind(), TokenKind::SegmentStart);
/// assert_eq!(t.value(), "N1");
/// assert_eq!(t.segment_type(), "N1");
/// assert_eq!(t.index(), 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub(crate) kind: TokenKind,
    pub(crate) value: String,
    pub(crate) index: usize,
    pub(crate) sub_index: usize,
    pub(crate) first_sub: bool,
    pub(crate) last_sub: bool,
    pub(crate) segment_type: String,
}

impl Token {
    pub(crate) fn new() -> Self {
        Self {
            kind: TokenKind::EndOfData,
            value: String::new(),
            index: 0,
            sub_index: 0,
            first_sub: false,
            last_sub: false,
            segment_type: String::new(),
        }
    }

    /// Clears per-token state while retaining the segment tag and the
    /// value buffer's capacity.
    pub(crate) fn reset(&mut self) {
        self.value.clear();
        self.first_sub = false;
        self.last_sub = false;
        self.sub_index = 0;
    }

    /// Returns the token kind.
    #[inline]
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Returns the token value.
    ///
    /// Valid only until the next token fetch; copy it to keep it.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns the 0-origin element index within the segment.
    ///
    /// The segment tag occupies index 0. Repeated elements share an index.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the 0-origin sub-element index within the composite.
    ///
    /// Meaningful only for sub-element kinds; reset for every element.
    #[inline]
    pub fn sub_index(&self) -> usize {
        self.sub_index
    }

    /// Returns `true` when this is the first sub-element of a composite.
    #[inline]
    pub fn is_first_sub(&self) -> bool {
        self.first_sub
    }

    /// Returns `true` when this is the last sub-element of a composite.
    #[inline]
    pub fn is_last_sub(&self) -> bool {
        self.last_sub
    }

    /// Returns the tag of the segment this token belongs to.
    ///
    /// Captured at [`TokenKind::SegmentStart`] and retained for the whole
    /// segment, including the [`TokenKind::SegmentEnd`] token.
    #[inline]
    pub fn segment_type(&self) -> &str {
        &self.segment_type
    }

    /// Returns `true` when this token starts a segment.
    #[inline]
    pub fn is_segment_start(&self) -> bool {
        self.kind == TokenKind::SegmentStart
    }

    /// Returns `true` when this token ends the stream.
    #[inline]
    pub fn is_end_of_data(&self) -> bool {
        self.kind == TokenKind::EndOfData
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== TokenKind tests ====================

    #[test]
    fn test_kind_name() {
        assert_eq!(TokenKind::SegmentStart.name(), "segment start");
        assert_eq!(TokenKind::Simple.name(), "simple element");
        assert_eq!(TokenKind::Empty.name(), "empty element");
        assert_eq!(TokenKind::SubElement.name(), "sub-element");
        assert_eq!(TokenKind::SubEmpty.name(), "empty sub-element");
        assert_eq!(TokenKind::SegmentEnd.name(), "segment end");
        assert_eq!(TokenKind::EndOfData.name(), "end of data");
    }

    #[test]
    fn test_kind_is_sub_element() {
        assert!(TokenKind::SubElement.is_sub_element());
        assert!(TokenKind::SubEmpty.is_sub_element());
        assert!(!TokenKind::Simple.is_sub_element());
        assert!(!TokenKind::Empty.is_sub_element());
        assert!(!TokenKind::SegmentStart.is_sub_element());
    }

    #[test]
    fn test_kind_is_element() {
        assert!(TokenKind::Simple.is_element());
        assert!(TokenKind::Empty.is_element());
        assert!(!TokenKind::SubElement.is_element());
        assert!(!TokenKind::SegmentEnd.is_element());
    }

    // ==================== Token tests ====================

    #[test]
    fn test_token_new() {
        let token = Token::new();
        assert_eq!(token.kind(), TokenKind::EndOfData);
        assert_eq!(token.value(), "");
        assert_eq!(token.index(), 0);
        assert_eq!(token.sub_index(), 0);
        assert!(!token.is_first_sub());
        assert!(!token.is_last_sub());
        assert_eq!(token.segment_type(), "");
    }

    #[test]
    fn test_token_reset_keeps_segment_type() {
        let mut token = Token::new();
        token.segment_type.push_str("PO1");
        token.value.push_str("value");
        token.first_sub = true;
        token.last_sub = true;
        token.sub_index = 3;

        token.reset();
        assert_eq!(token.value(), "");
        assert!(!token.is_first_sub());
        assert!(!token.is_last_sub());
        assert_eq!(token.sub_index(), 0);
        assert_eq!(token.segment_type(), "PO1");
    }

    #[test]
    fn test_token_clone() {
        let mut token = Token::new();
        token.kind = TokenKind::Simple;
        token.value.push_str("abc");
        token.index = 2;

        let cloned = token.clone();
        assert_eq!(cloned, token);
        assert_eq!(cloned.value(), "abc");
        assert_eq!(cloned.index(), 2);
    }

    #[test]
    fn test_token_predicates() {
        let mut token = Token::new();
        assert!(token.is_end_of_data());
        assert!(!token.is_segment_start());

        token.kind = TokenKind::SegmentStart;
        assert!(token.is_segment_start());
        assert!(!token.is_end_of_data());
    }
}
