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

//! End-to-end tokenizer walkthroughs over multi-segment inputs.

use edi_core::lex::{Delimiters, LexError, Tokenizer, TokenizerConfig, TokenKind};
use std::io::Cursor;

fn dashed() -> Delimiters {
    Delimiters::new('-', '.', '!').unwrap()
}

fn tokenizer(input: &str) -> Tokenizer<Cursor<String>> {
    Tokenizer::new(Cursor::new(input.to_string()), dashed())
}

#[test]
fn element_index_walkthrough() {
    // Three segments exercising index assignment, an empty element, and a
    // numeric element that fails to parse.
    let mut tok = tokenizer("abc-def-ghi!j--kl-mnop!q-123-123x!");

    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::SegmentStart, "abc", 0));
    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::Simple, "def", 1));
    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::Simple, "ghi", 2));
    assert_eq!(tok.next_token().unwrap().kind(), TokenKind::SegmentEnd);

    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::SegmentStart, "j", 0));
    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.index()), (TokenKind::Empty, 1));
    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::Simple, "kl", 2));
    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::Simple, "mnop", 3));
    assert_eq!(tok.next_token().unwrap().kind(), TokenKind::SegmentEnd);

    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value(), t.index()), (TokenKind::SegmentStart, "q", 0));
    assert_eq!(tok.next_int().unwrap(), 123);
    let err = tok.next_int().unwrap_err();
    assert!(matches!(err, LexError::InvalidNumber { .. }));
    assert_eq!(tok.next_token().unwrap().kind(), TokenKind::SegmentEnd);
    assert_eq!(tok.next_token().unwrap().kind(), TokenKind::EndOfData);
    assert!(!tok.has_more());
}

#[test]
fn composite_walkthrough() {
    let mut tok = tokenizer("abc-def.ghij..k-l.m!");

    let t = tok.next_token().unwrap();
    assert_eq!((t.kind(), t.value()), (TokenKind::SegmentStart, "abc"));

    // Element 1: ["def", "ghij", "", "k"], flags only at the ends.
    let expectations = [
        (TokenKind::SubElement, "def", 0, true, false),
        (TokenKind::SubElement, "ghij", 1, false, false),
        (TokenKind::SubEmpty, "", 2, false, false),
        (TokenKind::SubElement, "k", 3, false, true),
    ];
    for (kind, value, sub_index, first, last) in expectations {
        let t = tok.next_token().unwrap();
        assert_eq!(t.kind(), kind);
        assert_eq!(t.value(), value);
        assert_eq!(t.index(), 1);
        assert_eq!(t.sub_index(), sub_index);
        assert_eq!(t.is_first_sub(), first);
        assert_eq!(t.is_last_sub(), last);
    }

    // Element 2: ["l", "m"].
    let t = tok.next_token().unwrap();
    assert_eq!((t.value(), t.index(), t.sub_index()), ("l", 2, 0));
    assert!(t.is_first_sub());
    let t = tok.next_token().unwrap();
    assert_eq!((t.value(), t.index(), t.sub_index()), ("m", 2, 1));
    assert!(t.is_last_sub());

    assert_eq!(tok.next_token().unwrap().kind(), TokenKind::SegmentEnd);
}

#[test]
fn drain_is_empty_before_any_read() {
    let mut tok = tokenizer("abc-def!more-data!");
    assert_eq!(tok.drain_buffered(), "");
}

#[test]
fn lookahead_does_not_disturb_the_token_stream() {
    let input = "abc-def.gh!next-1!";

    let mut plain = tokenizer(input);
    let mut peeked = tokenizer(input);
    assert_eq!(peeked.lookahead(7).unwrap(), "abc-def");
    assert_eq!(peeked.position().char_count(), 0);

    loop {
        let expected = plain.next_token().unwrap().clone();
        let actual = peeked.next_token().unwrap();
        assert_eq!(*actual, expected);
        if expected.kind() == TokenKind::EndOfData {
            break;
        }
    }
}

#[test]
fn back_to_back_interchanges_via_handoff() {
    // Two interchanges in one physical stream; the second tokenizer picks
    // up exactly where the first one's buffer stopped.
    let stream = "ISA-first!IEA-1!ISA-second!IEA-2!";
    let mut first = tokenizer(stream);

    let mut segments = Vec::new();
    loop {
        let t = first.next_token().unwrap();
        if t.kind() == TokenKind::SegmentStart {
            segments.push(t.value().to_string());
        }
        // Stop after the first interchange trailer.
        if t.kind() == TokenKind::SegmentEnd && t.segment_type() == "IEA" {
            break;
        }
    }
    assert_eq!(segments, vec!["ISA", "IEA"]);

    let rest = first.drain_buffered();
    let mut second = Tokenizer::with_preread(
        Cursor::new(String::new()),
        dashed(),
        TokenizerConfig::default(),
        &rest,
    )
    .unwrap();

    let mut segments = Vec::new();
    loop {
        let t = second.next_token().unwrap();
        match t.kind() {
            TokenKind::SegmentStart => segments.push(t.value().to_string()),
            TokenKind::EndOfData => break,
            _ => {}
        }
    }
    assert_eq!(segments, vec!["ISA", "IEA"]);
}

#[test]
fn recording_regenerates_the_first_interchange() {
    let stream = "UNB+x'UNH+1'UNT+2'UNZ+1'";
    let mut tok = Tokenizer::new(Cursor::new(stream.to_string()), Delimiters::edifact());
    tok.set_recorder(true);
    loop {
        let t = tok.next_token().unwrap();
        if t.kind() == TokenKind::SegmentEnd && t.segment_type() == "UNZ" {
            break;
        }
    }
    assert_eq!(tok.recording(), stream);
}

#[test]
fn x12_interchange_with_line_breaks() {
    let stream = "ST*850*0001~\nBEG*00*SA*PO123~\nSE*2*0001~\n";
    let mut tok = Tokenizer::new(Cursor::new(stream.to_string()), Delimiters::x12());
    let mut tags = Vec::new();
    loop {
        let t = tok.next_token().unwrap();
        match t.kind() {
            TokenKind::SegmentStart => tags.push(t.value().to_string()),
            TokenKind::EndOfData => break,
            _ => {}
        }
    }
    assert_eq!(tags, vec!["ST", "BEG", "SE"]);
}

#[test]
fn small_buffer_matches_large_buffer() {
    let input = "abc-def.ghij..k-l.m!seg-one-two.three!q-12345!";
    let mut small = Tokenizer::with_config(
        Cursor::new(input.to_string()),
        dashed(),
        TokenizerConfig {
            buffer_size: 4,
            ..TokenizerConfig::default()
        },
    );
    let mut large = tokenizer(input);

    loop {
        let expected = large.next_token().unwrap().clone();
        let actual = small.next_token().unwrap();
        assert_eq!(*actual, expected);
        if expected.kind() == TokenKind::EndOfData {
            break;
        }
    }
}

#[test]
fn release_character_round_trip() {
    // EDIFACT release escapes every special character, including itself.
    let stream = "FTX+free?+form?:text?? here'";
    let mut tok = Tokenizer::new(Cursor::new(stream.to_string()), Delimiters::edifact());
    tok.next_token().unwrap();
    assert_eq!(tok.next_simple_value().unwrap(), "free+form:text? here");
}

#[test]
fn unget_char_accounting_round_trip() {
    let mut tok = tokenizer("ab-cd!");
    tok.next_token().unwrap();
    let before = tok.position().char_count();

    tok.unget_char().unwrap();
    assert_eq!(tok.position().char_count(), before - 1);
    tok.next_token().unwrap();
    assert_eq!(tok.position().char_count(), before);
}
