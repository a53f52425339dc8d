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

//! The EDI tokenizer: a character-level state machine.
//!
//! The tokenizer turns a raw character source into a lazy sequence of
//! [`Token`]s, driven entirely by a [`Delimiters`] set. It reads the source
//! in fixed-size blocks, supports single-character and single-token
//! pushback, bounded non-destructive lookahead, and a buffer handoff that
//! lets one physical stream carry several back-to-back interchanges.
//!
//! # Basic Usage
//!
//! ```
//! use edi_core::lex::{Delimiters, Tokenizer, TokenKind};
//! use std::io::Cursor;
//!
//! let input = "BEG*00*SA*PO-1001~";
//! let mut tok = Tokenizer::new(Cursor::new(input), Delimiters::x12());
//!
//! let t = tok.next_token().unwrap();
//! assert_eq!(t.kind(), TokenKind::SegmentStart);
//! assert_eq!(t.value(), "BEG");
//!
//! assert_eq!(tok.next_simple_value().unwrap(), "00");
//! assert_eq!(tok.next_simple_value().unwrap(), "SA");
//! assert_eq!(tok.next_simple_value().unwrap(), "PO-1001");
//! assert_eq!(tok.next_token().unwrap().kind(), TokenKind::SegmentEnd);
//! assert_eq!(tok.next_token().unwrap().kind(), TokenKind::EndOfData);
//! ```
//!
//! # Multi-Interchange Handoff
//!
//! One stream may contain several interchanges. A tokenizer reads in
//! blocks, so when the first interchange ends, part of the next one may
//! already sit in its buffer. [`Tokenizer::drain_buffered`] hands those
//! characters back, and [`Tokenizer::with_preread`] seeds the next
//! tokenizer with them so it resumes exactly where the previous one
//! stopped.
//!
//! # Safety Limits
//!
//! [`TokenizerConfig`] bounds element lengths and the number of elements
//! per segment. The element cap guards memory against unterminated data;
//! the per-segment cap catches a misconfigured segment terminator.
//! Exceeding either is a fatal lexical error, never a silent truncation.

use crate::lex::delimiters::{CharClass, Delimiters};
use crate::lex::error::{LexError, LexResult};
use crate::lex::position::Position;
use crate::lex::token::{Token, TokenKind};
use std::io::{Read, Write};

/// Configuration options for the tokenizer.
///
/// # Examples
///
/// ```
/// use edi_core::lex::TokenizerConfig;
///
/// let config = TokenizerConfig::default();
/// assert_eq!(config.buffer_size, 4096);
/// assert_eq!(config.max_tag_length, 10);
/// assert_eq!(config.max_element_length, 1_000_000);
/// assert_eq!(config.max_segment_elements, 10_000);
/// ```
#[derive(Debug, Clone)]
pub struct TokenizerConfig {
    /// Size of the internal read buffer in bytes.
    ///
    /// Also bounds [`Tokenizer::lookahead`] requests and the pre-read
    /// block accepted by [`Tokenizer::with_preread`].
    ///
    /// Default: 4096
    pub buffer_size: usize,

    /// Maximum length of a data element in bytes.
    ///
    /// Exceeding it is a fatal lexical error. This protects against
    /// unterminated data when the element delimiter is misconfigured.
    ///
    /// Default: 1,000,000 (1MB)
    pub max_element_length: usize,

    /// Maximum length of a segment tag in bytes.
    ///
    /// Default: 10
    pub max_tag_length: usize,

    /// Maximum number of elements in one segment.
    ///
    /// Exceeding it is a fatal lexical error; it almost always means the
    /// segment terminator character is misconfigured.
    ///
    /// Default: 10,000
    pub max_segment_elements: usize,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            buffer_size: 4096,
            max_element_length: 1_000_000,
            max_tag_length: 10,
            max_segment_elements: 10_000,
        }
    }
}

/// Tokenizer scanning state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between segments; the next data character starts a segment tag.
    ExpectingSegment,
    /// Inside a segment, between elements.
    InSegment,
    /// Inside a composite element.
    InComposite,
}

/// How a data-character run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanEnd {
    /// Ended by the element delimiter (consumed).
    Element,
    /// Ended by a sub-element delimiter (consumed).
    Sub,
    /// Ended by the segment terminator (pushed back).
    Terminator,
    /// Ended by the repetition separator (consumed).
    Repetition,
}

/// A character-level EDI lexer over any [`Read`] source.
///
/// One mutable [`Token`] is reused for every fetch to avoid allocation;
/// see the module documentation for the reuse contract. A tokenizer is
/// strictly sequential and not reentrant.
pub struct Tokenizer<R: Read> {
    source: R,
    delimiters: Delimiters,
    config: TokenizerConfig,

    buf: Box<[u8]>,
    start: usize,
    end: usize,
    source_eof: bool,

    state: State,
    token: Token,
    has_token: bool,
    ungot_token: bool,
    end_of_data: bool,
    repeat_pending: bool,
    element_index: usize,
    next_sub_index: usize,
    elements_in_segment: usize,

    char_count: usize,
    segment_char_count: usize,
    segment_count: usize,
    pending_reread: usize,

    recording: String,
    recording_enabled: bool,
    copy_sink: Option<Box<dyn Write>>,
    copy_suspended: bool,
}

impl<R: Read> std::fmt::Debug for Tokenizer<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("delimiters", &self.delimiters)
            .field("config", &self.config)
            .field("state", &self.state)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("source_eof", &self.source_eof)
            .field("end_of_data", &self.end_of_data)
            .finish_non_exhaustive()
    }
}

impl<R: Read> Tokenizer<R> {
    /// Creates a tokenizer with the default configuration.
    pub fn new(source: R, delimiters: Delimiters) -> Self {
        Self::with_config(source, delimiters, TokenizerConfig::default())
    }

    /// Creates a tokenizer with a specific configuration.
    pub fn with_config(source: R, delimiters: Delimiters, config: TokenizerConfig) -> Self {
        let buf = vec![0u8; config.buffer_size].into_boxed_slice();
        Self {
            source,
            delimiters,
            config,
            buf,
            start: 0,
            end: 0,
            source_eof: false,
            state: State::ExpectingSegment,
            token: Token::new(),
            has_token: false,
            ungot_token: false,
            end_of_data: false,
            repeat_pending: false,
            element_index: 0,
            next_sub_index: 0,
            elements_in_segment: 0,
            char_count: 0,
            segment_char_count: 0,
            segment_count: 0,
            pending_reread: 0,
            recording: String::new(),
            recording_enabled: false,
            copy_sink: None,
            copy_suspended: false,
        }
    }

    /// Creates a tokenizer seeded with a pre-read character block.
    ///
    /// Used for multi-interchange streams: the block returned by the
    /// previous tokenizer's [`drain_buffered`](Self::drain_buffered) goes
    /// in here, and this tokenizer consumes it before touching the source.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when the block exceeds the buffer
    /// capacity.
    pub fn with_preread(
        source: R,
        delimiters: Delimiters,
        config: TokenizerConfig,
        preread: &str,
    ) -> LexResult<Self> {
        let mut tokenizer = Self::with_config(source, delimiters, config);
        let bytes = preread.as_bytes();
        if bytes.len() > tokenizer.buf.len() {
            return Err(LexError::PrereadTooLarge {
                length: bytes.len(),
                capacity: tokenizer.buf.len(),
            });
        }
        tokenizer.buf[..bytes.len()].copy_from_slice(bytes);
        tokenizer.end = bytes.len();
        Ok(tokenizer)
    }

    // ==================== Delimiter access ====================

    /// Returns the active delimiter set.
    #[inline]
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Replaces the active delimiter set.
    ///
    /// Delimiters may legitimately change mid-stream, for example after an
    /// EDIFACT UNA service-string advice.
    #[inline]
    pub fn set_delimiters(&mut self, delimiters: Delimiters) {
        self.delimiters = delimiters;
    }

    // ==================== Position access ====================

    /// Returns a snapshot of the position counters.
    #[inline]
    pub fn position(&self) -> Position {
        Position::new(self.segment_count, self.char_count, self.segment_char_count)
    }

    /// Returns `true` until the end-of-data token has been produced.
    #[inline]
    pub fn has_more(&self) -> bool {
        !self.end_of_data
    }

    // ==================== Recording and copy ====================

    /// Enables or disables recording of consumed characters.
    ///
    /// The recording accumulates across enable/disable cycles; use
    /// [`take_recording`](Self::take_recording) to drain it.
    #[inline]
    pub fn set_recorder(&mut self, enabled: bool) {
        self.recording_enabled = enabled;
    }

    /// Returns the characters recorded so far.
    #[inline]
    pub fn recording(&self) -> &str {
        &self.recording
    }

    /// Drains and returns the recording buffer.
    pub fn take_recording(&mut self) -> String {
        std::mem::take(&mut self.recording)
    }

    /// Installs or removes a sink that every consumed character is echoed
    /// to. Returns the previous sink, if any.
    pub fn set_copy_sink(&mut self, sink: Option<Box<dyn Write>>) -> Option<Box<dyn Write>> {
        std::mem::replace(&mut self.copy_sink, sink)
    }

    /// Suspends or resumes echoing to the copy sink.
    ///
    /// The boundary is exact: every character consumed before a suspend is
    /// echoed, none consumed while suspended is, and echoing resumes with
    /// the first character consumed after the resume.
    #[inline]
    pub fn suspend_copy(&mut self, suspended: bool) {
        self.copy_suspended = suspended;
    }

    // ==================== Buffer operations ====================

    /// Pushes the most recently consumed character back into the buffer.
    ///
    /// One character of pushback is always available after a successful
    /// read. The character counters are decremented and re-incremented on
    /// the re-read; the character is not recorded twice.
    ///
    /// # Errors
    ///
    /// Returns a pushback error when no character has been consumed.
    pub fn unget_char(&mut self) -> LexResult<()> {
        if self.start == 0 {
            return Err(LexError::PushbackUnderflow {
                position: Self::position(self),
            });
        }
        self.start -= 1;
        self.char_count -= 1;
        self.segment_char_count = self.segment_char_count.saturating_sub(1);
        self.pending_reread += 1;
        Ok(())
    }

    /// Replays the most recent token on the next [`next_token`](Self::next_token) call.
    ///
    /// # Errors
    ///
    /// Returns a pushback error when no token has been fetched yet or when
    /// a token is already pushed back.
    pub fn unget_token(&mut self) -> LexResult<()> {
        if !self.has_token || self.ungot_token {
            return Err(LexError::PushbackUnderflow {
                position: Self::position(self),
            });
        }
        self.ungot_token = true;
        Ok(())
    }

    /// Returns up to `n` upcoming characters without disturbing the read
    /// position.
    ///
    /// Fewer characters are returned when the source ends first.
    ///
    /// # Errors
    ///
    /// Returns a configuration error when `n` exceeds the buffer capacity,
    /// or an I/O error from the source.
    pub fn lookahead(&mut self, n: usize) -> LexResult<String> {
        if n > self.buf.len() {
            return Err(LexError::LookaheadTooLarge {
                requested: n,
                capacity: self.buf.len(),
            });
        }
        while self.end - self.start < n && !self.source_eof {
            if self.end == self.buf.len() {
                let unread = self.end - self.start;
                let mut hist = usize::min(self.start, 1);
                if unread + hist + n > self.buf.len() {
                    hist = 0;
                }
                let lo = self.start - hist;
                self.buf.copy_within(lo..self.end, 0);
                self.start = hist;
                self.end -= lo;
            }
            let read = self.source.read(&mut self.buf[self.end..])?;
            if read == 0 {
                self.source_eof = true;
                break;
            }
            self.end += read;
        }
        let available = usize::min(n, self.end - self.start);
        Ok(self.buf[self.start..self.start + available]
            .iter()
            .map(|&b| b as char)
            .collect())
    }

    /// Hands back every character that was read into the buffer but not
    /// yet consumed, emptying the buffer.
    ///
    /// Immediately after construction (without a pre-read block) this
    /// returns an empty string. Used together with
    /// [`with_preread`](Self::with_preread) to chain tokenizers over one
    /// physical stream.
    pub fn drain_buffered(&mut self) -> String {
        let drained = self.buf[self.start..self.end]
            .iter()
            .map(|&b| b as char)
            .collect();
        self.start = self.end;
        drained
    }

    fn refill(&mut self) -> LexResult<bool> {
        if self.source_eof {
            return Ok(false);
        }
        if self.end == self.buf.len() {
            // Slide unread bytes to the front, keeping one byte of history
            // so a pushback stays valid across the refill. History is
            // dropped when keeping it would leave no room to read.
            let mut hist = usize::min(self.start, 1);
            if self.end - self.start + hist >= self.buf.len() {
                hist = 0;
            }
            let lo = self.start - hist;
            self.buf.copy_within(lo..self.end, 0);
            self.start = hist;
            self.end -= lo;
        }
        let read = self.source.read(&mut self.buf[self.end..])?;
        if read == 0 {
            self.source_eof = true;
            return Ok(false);
        }
        self.end += read;
        Ok(true)
    }

    fn next_byte(&mut self) -> LexResult<Option<u8>> {
        if self.start == self.end && !self.refill()? {
            return Ok(None);
        }
        let byte = self.buf[self.start];
        self.start += 1;
        self.char_count += 1;
        self.segment_char_count += 1;
        if self.pending_reread > 0 {
            self.pending_reread -= 1;
        } else {
            if self.recording_enabled {
                self.recording.push(byte as char);
            }
            if !self.copy_suspended {
                if let Some(sink) = self.copy_sink.as_mut() {
                    sink.write_all(&[byte])?;
                }
            }
        }
        Ok(Some(byte))
    }

    // ==================== Token production ====================

    /// Produces the next token.
    ///
    /// The returned reference points at the tokenizer's single reusable
    /// token; its value is valid only until the next fetch. After the
    /// source is exhausted, every call returns the end-of-data token.
    pub fn next_token(&mut self) -> LexResult<&Token> {
        if self.ungot_token {
            self.ungot_token = false;
            return Ok(&self.token);
        }
        if self.end_of_data {
            self.token.reset();
            self.token.kind = TokenKind::EndOfData;
            return Ok(&self.token);
        }
        self.token.reset();

        let byte = match self.next_byte()? {
            Some(b) => b,
            None => {
                if self.state != State::ExpectingSegment {
                    return Err(LexError::UnexpectedEof {
                        position: Self::position(self),
                    });
                }
                self.end_of_data = true;
                self.token.kind = TokenKind::EndOfData;
                self.token.segment_type.clear();
                self.has_token = true;
                return Ok(&self.token);
            }
        };

        match self.delimiters.classify_byte(byte) {
            CharClass::Data => self.emit_data(byte)?,
            CharClass::Release => {
                let Some(data) = self.next_byte()? else {
                    return Err(LexError::UnexpectedEof {
                        position: Self::position(self),
                    });
                };
                self.emit_data(data)?;
            }
            CharClass::Element => match self.state {
                State::ExpectingSegment => {
                    return Err(self.invalid_tag("element delimiter before any segment tag"));
                }
                State::InSegment => {
                    self.begin_element()?;
                    self.token.kind = TokenKind::Empty;
                    self.token.index = self.element_index;
                }
                State::InComposite => {
                    self.emit_sub_empty(true);
                    self.state = State::InSegment;
                }
            },
            CharClass::SubElement | CharClass::SubSubElement => match self.state {
                State::ExpectingSegment => {
                    return Err(self.invalid_tag("sub-element delimiter before any segment tag"));
                }
                State::InSegment => {
                    self.begin_element()?;
                    self.emit_sub_empty(false);
                    self.token.first_sub = true;
                    self.state = State::InComposite;
                }
                State::InComposite => {
                    self.emit_sub_empty(false);
                }
            },
            CharClass::Terminator => match self.state {
                State::ExpectingSegment => {
                    return Err(self.invalid_tag("segment terminator before any segment tag"));
                }
                State::InSegment => {
                    self.token.kind = TokenKind::SegmentEnd;
                    self.token.index = self.element_index;
                    self.state = State::ExpectingSegment;
                    self.skip_interchange_noise()?;
                }
                State::InComposite => {
                    self.emit_sub_empty(true);
                    self.unget_char()?;
                    self.state = State::InSegment;
                }
            },
            CharClass::Repetition => match self.state {
                State::ExpectingSegment => {
                    return Err(self.invalid_tag("repetition separator before any segment tag"));
                }
                State::InSegment => {
                    self.begin_element()?;
                    self.token.kind = TokenKind::Empty;
                    self.token.index = self.element_index;
                    self.repeat_pending = true;
                }
                State::InComposite => {
                    self.emit_sub_empty(true);
                    self.state = State::InSegment;
                    self.repeat_pending = true;
                }
            },
        }

        self.has_token = true;
        Ok(&self.token)
    }

    fn emit_data(&mut self, first: u8) -> LexResult<()> {
        match self.state {
            State::ExpectingSegment => self.scan_tag(first),
            State::InSegment => self.scan_simple(first),
            State::InComposite => self.scan_sub(first),
        }
    }

    fn scan_tag(&mut self, first: u8) -> LexResult<()> {
        self.begin_segment();
        self.token.value.push(first as char);
        let end = self.scan_value(self.config.max_tag_length)?;
        self.token.kind = TokenKind::SegmentStart;
        self.token.index = 0;
        self.token.segment_type.clear();
        let tag = self.token.value.clone();
        self.token.segment_type.push_str(&tag);
        match end {
            ScanEnd::Element | ScanEnd::Terminator => self.state = State::InSegment,
            ScanEnd::Sub => self.state = State::InComposite,
            ScanEnd::Repetition => {
                self.state = State::InSegment;
                self.repeat_pending = true;
            }
        }
        Ok(())
    }

    fn scan_simple(&mut self, first: u8) -> LexResult<()> {
        self.begin_element()?;
        self.token.value.push(first as char);
        let end = self.scan_value(self.config.max_element_length)?;
        self.token.index = self.element_index;
        match end {
            ScanEnd::Element | ScanEnd::Terminator => self.token.kind = TokenKind::Simple,
            ScanEnd::Repetition => {
                self.token.kind = TokenKind::Simple;
                self.repeat_pending = true;
            }
            ScanEnd::Sub => {
                self.token.kind = TokenKind::SubElement;
                self.token.sub_index = self.next_sub_index;
                self.next_sub_index += 1;
                self.token.first_sub = true;
                self.state = State::InComposite;
            }
        }
        Ok(())
    }

    fn scan_sub(&mut self, first: u8) -> LexResult<()> {
        self.token.value.push(first as char);
        let end = self.scan_value(self.config.max_element_length)?;
        self.token.kind = TokenKind::SubElement;
        self.token.index = self.element_index;
        self.token.sub_index = self.next_sub_index;
        self.next_sub_index += 1;
        self.token.first_sub = self.token.sub_index == 0;
        match end {
            ScanEnd::Sub => {}
            ScanEnd::Element | ScanEnd::Terminator => {
                self.token.last_sub = true;
                self.state = State::InSegment;
            }
            ScanEnd::Repetition => {
                self.token.last_sub = true;
                self.state = State::InSegment;
                self.repeat_pending = true;
            }
        }
        Ok(())
    }

    /// Scans data characters into the token value until a delimiter ends
    /// the run. The terminator is pushed back; other run-enders are
    /// consumed.
    fn scan_value(&mut self, max_len: usize) -> LexResult<ScanEnd> {
        loop {
            if self.delimiters.is_minimal() && self.pending_reread == 0 {
                self.consume_data_run(max_len)?;
            }
            let byte = match self.next_byte()? {
                Some(b) => b,
                None => {
                    return Err(LexError::UnexpectedEof {
                        position: Self::position(self),
                    })
                }
            };
            match self.delimiters.classify_byte(byte) {
                CharClass::Data => {
                    self.token.value.push(byte as char);
                    self.check_value_len(max_len)?;
                }
                CharClass::Release => {
                    let Some(data) = self.next_byte()? else {
                        return Err(LexError::UnexpectedEof {
                            position: Self::position(self),
                        });
                    };
                    self.token.value.push(data as char);
                    self.check_value_len(max_len)?;
                }
                CharClass::Element => return Ok(ScanEnd::Element),
                CharClass::SubElement | CharClass::SubSubElement => return Ok(ScanEnd::Sub),
                CharClass::Terminator => {
                    self.unget_char()?;
                    return Ok(ScanEnd::Terminator);
                }
                CharClass::Repetition => return Ok(ScanEnd::Repetition),
            }
        }
    }

    /// Bulk-consumes plain data bytes directly from the buffer.
    ///
    /// Only valid with a minimal delimiter set (no release, repetition, or
    /// second-level character), where the next special byte is one of
    /// exactly three candidates and `memchr3` can find it in one pass.
    fn consume_data_run(&mut self, max_len: usize) -> LexResult<()> {
        let element = self.delimiters.element() as u8;
        let sub = self.delimiters.sub_element() as u8;
        let terminator = self.delimiters.terminator() as u8;
        loop {
            if self.start == self.end && !self.refill()? {
                // Source exhausted; the caller reports the EOF.
                return Ok(());
            }
            let chunk = &self.buf[self.start..self.end];
            let stop = memchr::memchr3(element, sub, terminator, chunk);
            let take = stop.unwrap_or(chunk.len());
            if take == 0 {
                return Ok(());
            }
            for &b in &chunk[..take] {
                self.token.value.push(b as char);
            }
            if self.recording_enabled {
                for &b in &chunk[..take] {
                    self.recording.push(b as char);
                }
            }
            if !self.copy_suspended {
                if let Some(sink) = self.copy_sink.as_mut() {
                    sink.write_all(&chunk[..take])?;
                }
            }
            self.start += take;
            self.char_count += take;
            self.segment_char_count += take;
            self.check_value_len(max_len)?;
            if stop.is_some() {
                return Ok(());
            }
        }
    }

    #[inline]
    fn check_value_len(&self, max_len: usize) -> LexResult<()> {
        if self.token.value.len() > max_len {
            return Err(LexError::ElementTooLong {
                length: self.token.value.len(),
                max: max_len,
                position: Self::position(self),
            });
        }
        Ok(())
    }

    fn begin_segment(&mut self) {
        self.segment_count += 1;
        self.segment_char_count = 1;
        self.element_index = 0;
        self.next_sub_index = 0;
        self.elements_in_segment = 1;
        self.repeat_pending = false;
    }

    fn begin_element(&mut self) -> LexResult<()> {
        if self.repeat_pending {
            self.repeat_pending = false;
        } else {
            self.element_index += 1;
        }
        self.next_sub_index = 0;
        self.elements_in_segment += 1;
        if self.elements_in_segment > self.config.max_segment_elements {
            return Err(LexError::RunawaySegment {
                elements: self.elements_in_segment,
                max: self.config.max_segment_elements,
                position: Self::position(self),
            });
        }
        Ok(())
    }

    fn emit_sub_empty(&mut self, last: bool) {
        self.token.kind = TokenKind::SubEmpty;
        self.token.index = self.element_index;
        self.token.sub_index = self.next_sub_index;
        self.next_sub_index += 1;
        self.token.last_sub = last;
    }

    fn invalid_tag(&self, message: &str) -> LexError {
        LexError::InvalidSegmentTag {
            message: message.to_string(),
            position: Self::position(self),
        }
    }

    /// Discards line-ending noise between segments, leaving the next
    /// non-whitespace character unconsumed.
    ///
    /// Peeks the buffer directly so the first character of the next
    /// segment is neither consumed, recorded, nor echoed early.
    fn skip_interchange_noise(&mut self) -> LexResult<()> {
        loop {
            if self.start == self.end && !self.refill()? {
                return Ok(());
            }
            if self.buf[self.start].is_ascii_whitespace() {
                let _ = self.next_byte()?;
            } else {
                return Ok(());
            }
        }
    }

    // ==================== Value helpers ====================

    /// Fetches the next element as a required string value.
    ///
    /// # Errors
    ///
    /// A mandatory-element error on an empty element; an element-expected
    /// error when the next token is not element-level.
    pub fn next_simple_value(&mut self) -> LexResult<String> {
        let index = {
            let token = self.next_token()?;
            match token.kind() {
                TokenKind::Simple => return Ok(token.value().to_string()),
                TokenKind::Empty => token.index(),
                other => {
                    let found = other.name();
                    let position = Self::position(self);
                    return Err(LexError::ExpectedElement { found, position });
                }
            }
        };
        Err(LexError::MandatoryElementMissing {
            index,
            position: Self::position(self),
        })
    }

    /// Fetches the next element as an optional string value.
    ///
    /// An empty element yields `None`.
    pub fn next_optional_simple_value(&mut self) -> LexResult<Option<String>> {
        let token = self.next_token()?;
        match token.kind() {
            TokenKind::Simple => Ok(Some(token.value().to_string())),
            TokenKind::Empty => Ok(None),
            other => {
                let found = other.name();
                let position = Self::position(self);
                Err(LexError::ExpectedElement { found, position })
            }
        }
    }

    /// Fetches the next element and parses it as an integer.
    ///
    /// # Errors
    ///
    /// An invalid-number error when the value does not parse.
    pub fn next_int(&mut self) -> LexResult<i64> {
        let value = self.next_simple_value()?;
        match value.trim().parse() {
            Ok(n) => Ok(n),
            Err(_) => Err(LexError::InvalidNumber {
                value,
                position: Self::position(self),
            }),
        }
    }

    /// Collects a full composite element as an ordered list of sub-element
    /// values.
    ///
    /// A simple element is transparently a one-element list; an empty
    /// element is an empty list.
    pub fn next_composite_element(&mut self) -> LexResult<Vec<String>> {
        let (kind, value, last) = {
            let token = self.next_token()?;
            (token.kind(), token.value().to_string(), token.is_last_sub())
        };
        match kind {
            TokenKind::Simple => Ok(vec![value]),
            TokenKind::Empty => Ok(Vec::new()),
            TokenKind::SubElement | TokenKind::SubEmpty => {
                let mut values = vec![value];
                let mut done = last;
                while !done {
                    let (kind, value, last) = {
                        let token = self.next_token()?;
                        (token.kind(), token.value().to_string(), token.is_last_sub())
                    };
                    if !kind.is_sub_element() {
                        let position = Self::position(self);
                        return Err(LexError::ExpectedElement {
                            found: kind.name(),
                            position,
                        });
                    }
                    values.push(value);
                    done = last;
                }
                Ok(values)
            }
            other => {
                let position = Self::position(self);
                Err(LexError::ExpectedElement {
                    found: other.name(),
                    position,
                })
            }
        }
    }
}

impl<R: Read> Iterator for Tokenizer<R> {
    type Item = LexResult<Token>;

    /// Yields owned token clones until end of data.
    fn next(&mut self) -> Option<Self::Item> {
        if self.end_of_data {
            return None;
        }
        match self.next_token() {
            Ok(token) if token.kind() == TokenKind::EndOfData => None,
            Ok(token) => Some(Ok(token.clone())),
            Err(e) => Some(Err(e)),
        }
    }
}
