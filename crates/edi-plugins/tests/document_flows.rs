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

//! Whole-document walkthroughs: tokenizer and loop controller together.

use edi_core::lex::{Delimiters, Tokenizer, TokenKind};
use edi_core::loops::LoopController;
use edi_core::registry::PluginRegistry;
use edi_plugins::register_builtin;
use std::io::Cursor;

/// Runs every segment tag of `input` through a controller for the given
/// document type, returning (tag, path-after-transition) pairs.
fn walk(standard: &str, doc_type: &str, delimiters: Delimiters, input: &str) -> Vec<(String, String)> {
    let registry = PluginRegistry::new();
    register_builtin(&registry);
    let plugin = registry.resolve(standard, doc_type, "", "").unwrap();

    let mut tokenizer = Tokenizer::new(Cursor::new(input.to_string()), delimiters);
    let mut controller = LoopController::new(plugin);
    let mut trail = Vec::new();
    loop {
        let token = tokenizer.next_token().unwrap();
        match token.kind() {
            TokenKind::SegmentStart => {
                let tag = token.value().to_string();
                controller.transition(&tag).unwrap();
                trail.push((tag, controller.stack().context_path()));
            }
            TokenKind::EndOfData => break,
            _ => {}
        }
    }
    trail
}

#[test]
fn x12_850_detail_loops_nest_under_po1() {
    let input = "\
        BEG*00*SA*PO-1001~\
        N9*ZZ*NOTE~\
        N1*ST*SHIP TO~\
        N3*123 MAIN ST~\
        PO1*1*10*EA*9.95~\
        PID*F****WIDGET~\
        SCH*4*EA~\
        N1*MF*MAKER~\
        PO1*2*5*EA*1.50~\
        CTT*2~\
        SE*11*0001~";
    let trail = walk("X12", "850", Delimiters::x12(), input);

    let expected = [
        ("BEG", "/"),
        ("N9", "/N9"),
        ("N1", "/N1"),
        ("N3", "/N1"),
        ("PO1", "/PO1"),
        ("PID", "/PO1/PID"),
        ("SCH", "/PO1/SCH"),
        ("N1", "/PO1/N1"),
        ("PO1", "/PO1"),
        ("CTT", "/CTT"),
        ("SE", "/"),
    ];
    let actual: Vec<(&str, &str)> = trail
        .iter()
        .map(|(tag, path)| (tag.as_str(), path.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn x12_856_hl_ladder_descends_and_repeats() {
    let input = "\
        BSN*00*SHIP1*20250101*1200~\
        HL*1**S~\
        TD1*CTN~\
        HL*2*1*O~\
        PRF*PO-1001~\
        HL*3*2*I~\
        LIN**BP*PART1~\
        HL*4*2*I~\
        LIN**BP*PART2~\
        CTT*4~\
        SE*11*0001~";
    let trail = walk("X12", "856", Delimiters::x12(), input);

    let paths: Vec<&str> = trail.iter().map(|(_, path)| path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/",
            "/HL-SHIPMENT",
            "/HL-SHIPMENT",
            "/HL-SHIPMENT/HL-ORDER",
            "/HL-SHIPMENT/HL-ORDER",
            "/HL-SHIPMENT/HL-ORDER/HL-ITEM",
            "/HL-SHIPMENT/HL-ORDER/HL-ITEM",
            "/HL-SHIPMENT/HL-ORDER/HL-ITEM",
            "/HL-SHIPMENT/HL-ORDER/HL-ITEM",
            "/CTT",
            "/",
        ]
    );
}

#[test]
fn edifact_orders_groups() {
    let input = "\
        BGM+220+PO-1001+9'\
        DTM+137:20250101:102'\
        RFF+CT:CONTRACT1'\
        RFF+AAN:DELIVERY1'\
        NAD+BY+BUYER1'\
        RFF+VA:VAT123'\
        CTA+PD+:MS JONES'\
        FTX+PUR+++CALL BEFORE NOON'\
        LIN+1++PART1:BP'\
        PRI+AAA:9.95'\
        LIN+2++PART2:BP'\
        UNS+S'";
    let trail = walk("EDIFACT", "ORDERS", Delimiters::edifact(), input);

    let expected = [
        ("BGM", "/"),
        ("DTM", "/"),
        ("RFF", "/SG1"),
        ("RFF", "/SG1"),
        ("NAD", "/SG2"),
        ("RFF", "/SG2/SG3"),
        ("CTA", "/SG2/SG5"),
        ("FTX", "/SG2/SG5"),
        ("LIN", "/SG28"),
        ("PRI", "/SG28/SG32"),
        ("LIN", "/SG28"),
        ("UNS", "/"),
    ];
    let actual: Vec<(&str, &str)> = trail
        .iter()
        .map(|(tag, path)| (tag.as_str(), path.as_str()))
        .collect();
    assert_eq!(actual, expected);
}

#[test]
fn invoice_810_line_items() {
    let input = "\
        BIG*20250101*INV-1~\
        N1*RE*SELLER~\
        IT1*1*10*EA*9.95~\
        PID*F****WIDGET~\
        SAC*C*D240~\
        IT1*2*5*EA*1.50~\
        TDS*10445~\
        ISS*15*CT~\
        SE*9*0001~";
    let trail = walk("X12", "810", Delimiters::x12(), input);

    let paths: Vec<&str> = trail.iter().map(|(_, path)| path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/",
            "/N1",
            "/IT1",
            "/IT1/PID",
            "/IT1/SAC",
            "/IT1",
            "/IT1",
            "/ISS",
            "/",
        ]
    );
}
