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

//! Delimiter sets and character classification.
//!
//! EDI syntax is driven by four to six single characters negotiated per
//! interchange: the element delimiter, the sub-element delimiter, the
//! segment terminator, and optionally a second-level sub-element delimiter,
//! a release (escape) character, and a repetition separator. Any character
//! equal to none of them is plain data.
//!
//! # Examples
//!
//! ```
//! use edi_core::lex::{CharClass, Delimiters};
//!
//! let delims = Delimiters::x12();
//! assert_eq!(delims.classify('*'), CharClass::Element);
//! assert_eq!(delims.classify(':'), CharClass::SubElement);
//! assert_eq!(delims.classify('~'), CharClass::Terminator);
//! assert_eq!(delims.classify('A'), CharClass::Data);
//! ```
//!
//! Custom sets validate distinctness at construction:
//!
//! ```
//! use edi_core::lex::Delimiters;
//!
//! assert!(Delimiters::new('-', '.', '!').is_ok());
//! assert!(Delimiters::new('-', '-', '!').is_err());
//! ```

use crate::lex::error::{LexError, LexResult};

/// Classification of one input character against a delimiter set.
///
/// Classification follows a fixed priority: element delimiter, sub-element
/// delimiter, second-level sub-element delimiter, release character,
/// segment terminator, repetition separator, data. Distinctness of the set
/// makes the priority unobservable in practice, but the order is part of
/// the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// Separates elements within a segment.
    Element,
    /// Separates sub-elements within a composite element.
    SubElement,
    /// Separates second-level sub-elements, when configured.
    SubSubElement,
    /// Strips special meaning from the following character.
    Release,
    /// Ends a segment.
    Terminator,
    /// Separates repetitions of a single logical element.
    Repetition,
    /// An ordinary data character.
    Data,
}

/// An immutable set of EDI delimiter characters.
///
/// All defined delimiters must be distinct printable ASCII characters.
/// The optional release character and repetition separator default to
/// undefined, as does the second-level sub-element delimiter.
///
/// # Examples
///
/// ```
/// use edi_core::lex::Delimiters;
///
/// // EDIFACT default service characters, release character included.
/// let delims = Delimiters::edifact();
/// assert_eq!(delims.element(), '+');
/// assert_eq!(delims.release(), Some('?'));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiters {
    element: char,
    sub_element: char,
    sub_sub_element: Option<char>,
    terminator: char,
    release: Option<char>,
    repetition: Option<char>,
}

impl Delimiters {
    /// Creates a delimiter set from the three mandatory characters.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when any character is not printable
    /// ASCII or when two characters collide.
    pub fn new(element: char, sub_element: char, terminator: char) -> LexResult<Self> {
        let delims = Self {
            element,
            sub_element,
            sub_sub_element: None,
            terminator,
            release: None,
            repetition: None,
        };
        delims.validate()?;
        Ok(delims)
    }

    /// The standard X12 delimiter set: `*` element, `:` sub-element,
    /// `~` terminator.
    pub fn x12() -> Self {
        Self {
            element: '*',
            sub_element: ':',
            sub_sub_element: None,
            terminator: '~',
            release: None,
            repetition: None,
        }
    }

    /// The UN/EDIFACT default service characters: `+` element, `:`
    /// sub-element, `'` terminator, `?` release.
    pub fn edifact() -> Self {
        Self {
            element: '+',
            sub_element: ':',
            sub_sub_element: None,
            terminator: '\'',
            release: Some('?'),
            repetition: None,
        }
    }

    /// Sets the release (escape) character.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the character collides with
    /// another delimiter or is not printable ASCII.
    pub fn with_release(mut self, release: char) -> LexResult<Self> {
        self.release = Some(release);
        self.validate()?;
        Ok(self)
    }

    /// Sets the repetition separator.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the character collides with
    /// another delimiter or is not printable ASCII.
    pub fn with_repetition(mut self, repetition: char) -> LexResult<Self> {
        self.repetition = Some(repetition);
        self.validate()?;
        Ok(self)
    }

    /// Sets the second-level sub-element delimiter.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the character collides with
    /// another delimiter or is not printable ASCII.
    pub fn with_sub_sub_element(mut self, sub_sub: char) -> LexResult<Self> {
        self.sub_sub_element = Some(sub_sub);
        self.validate()?;
        Ok(self)
    }

    /// Returns the element delimiter.
    #[inline]
    pub const fn element(&self) -> char {
        self.element
    }

    /// Returns the sub-element delimiter.
    #[inline]
    pub const fn sub_element(&self) -> char {
        self.sub_element
    }

    /// Returns the second-level sub-element delimiter, if defined.
    #[inline]
    pub const fn sub_sub_element(&self) -> Option<char> {
        self.sub_sub_element
    }

    /// Returns the segment terminator.
    #[inline]
    pub const fn terminator(&self) -> char {
        self.terminator
    }

    /// Returns the release (escape) character, if defined.
    #[inline]
    pub const fn release(&self) -> Option<char> {
        self.release
    }

    /// Returns the repetition separator, if defined.
    #[inline]
    pub const fn repetition(&self) -> Option<char> {
        self.repetition
    }

    /// Classifies one character against this delimiter set.
    #[inline]
    pub fn classify(&self, c: char) -> CharClass {
        if c.is_ascii() {
            self.classify_byte(c as u8)
        } else {
            CharClass::Data
        }
    }

    /// Classifies one input byte against this delimiter set.
    ///
    /// Delimiters are printable ASCII, so byte comparison is exact;
    /// non-ASCII bytes are always data.
    #[inline]
    pub(crate) fn classify_byte(&self, b: u8) -> CharClass {
        if b == self.element as u8 {
            CharClass::Element
        } else if b == self.sub_element as u8 {
            CharClass::SubElement
        } else if self.sub_sub_element.map(|c| c as u8) == Some(b) {
            CharClass::SubSubElement
        } else if self.release.map(|c| c as u8) == Some(b) {
            CharClass::Release
        } else if b == self.terminator as u8 {
            CharClass::Terminator
        } else if self.repetition.map(|c| c as u8) == Some(b) {
            CharClass::Repetition
        } else {
            CharClass::Data
        }
    }

    /// Returns `true` when only the three mandatory delimiters are defined.
    ///
    /// With no release, repetition, or second-level character configured,
    /// the tokenizer can scan data runs with a three-way byte search.
    #[inline]
    pub(crate) fn is_minimal(&self) -> bool {
        self.release.is_none() && self.repetition.is_none() && self.sub_sub_element.is_none()
    }

    fn validate(&self) -> LexResult<()> {
        let mut defined = vec![self.element, self.sub_element, self.terminator];
        if let Some(c) = self.sub_sub_element {
            defined.push(c);
        }
        if let Some(c) = self.release {
            defined.push(c);
        }
        if let Some(c) = self.repetition {
            defined.push(c);
        }
        for (i, &c) in defined.iter().enumerate() {
            if !c.is_ascii_graphic() {
                return Err(LexError::NonPrintableDelimiter { delimiter: c });
            }
            if defined[i + 1..].contains(&c) {
                return Err(LexError::DuplicateDelimiter { delimiter: c });
            }
        }
        Ok(())
    }
}

impl Default for Delimiters {
    /// The X12 delimiter set.
    fn default() -> Self {
        Self::x12()
    }
}
