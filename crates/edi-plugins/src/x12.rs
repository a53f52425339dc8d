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

//! Loop tables for ANSI X12 transaction sets.
//!
//! Each table is an ordered if/else-if chain: for one trigger segment the
//! most specific context comes first and the most general last, because
//! the matcher always takes the first match. The envelope segments (ISA,
//! GS, ST and their trailers) carry no rules here; envelope structure is
//! the document reader's business.

use edi_core::loops::{LoopAction, LoopDescriptor, RuleContext};
use edi_core::plugin::Plugin;

/// X12 850 Purchase Order.
///
/// Heading N9 and N1 loops, a PO1 detail loop with nested PID, SAC, SCH,
/// and N1 loops, and a CTT summary loop.
pub fn purchase_order_850() -> Plugin {
    Plugin::new(
        "850",
        "Purchase Order",
        vec![
            // N1: ship-to/bill-to parties. Inside the PO1 loop the party
            // loop nests one level deeper; in the heading it is level 1.
            LoopDescriptor::new(LoopAction::open("N1"), "N1", 2, RuleContext::path("/PO1")),
            LoopDescriptor::new(LoopAction::open("N1"), "N1", 2, RuleContext::AtLevel(2)),
            LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any),
            // N9: reference identification loop in the heading.
            LoopDescriptor::new(LoopAction::open("N9"), "N9", 1, RuleContext::Any),
            // SAC: service/allowance/charge, heading or per line item.
            LoopDescriptor::new(LoopAction::open("SAC"), "SAC", 2, RuleContext::in_loop("PO1")),
            LoopDescriptor::new(LoopAction::open("SAC"), "SAC", 2, RuleContext::AtLevel(2)),
            LoopDescriptor::new(LoopAction::open("SAC"), "SAC", 1, RuleContext::Any),
            // PO1: baseline item data opens the detail loop.
            LoopDescriptor::new(LoopAction::open("PO1"), "PO1", 1, RuleContext::Any),
            // PID: product description nested in the line item.
            LoopDescriptor::new(LoopAction::open("PID"), "PID", 2, RuleContext::in_loop("PO1")),
            // SCH: line item schedule, directly under PO1 or replacing a
            // sibling level-2 loop.
            LoopDescriptor::new(LoopAction::open("SCH"), "SCH", 2, RuleContext::in_loop("PO1")),
            LoopDescriptor::new(LoopAction::open("SCH"), "SCH", 2, RuleContext::AtLevel(2)),
            // CTT: transaction totals open the summary loop.
            LoopDescriptor::new(LoopAction::open("CTT"), "CTT", 1, RuleContext::Any),
            // SE: transaction set trailer unwinds everything.
            LoopDescriptor::new(LoopAction::resume_ancestor(), "SE", 0, RuleContext::Any),
        ],
    )
}

/// X12 810 Invoice.
///
/// Heading N1 party loops, an IT1 detail loop with nested PID and SAC
/// loops, and summary SAC/ISS loops.
pub fn invoice_810() -> Plugin {
    Plugin::new(
        "810",
        "Invoice",
        vec![
            LoopDescriptor::new(LoopAction::open("N1"), "N1", 1, RuleContext::Any),
            LoopDescriptor::new(LoopAction::open("IT1"), "IT1", 1, RuleContext::Any),
            LoopDescriptor::new(LoopAction::open("PID"), "PID", 2, RuleContext::in_loop("IT1")),
            LoopDescriptor::new(LoopAction::open("SAC"), "SAC", 2, RuleContext::in_loop("IT1")),
            LoopDescriptor::new(LoopAction::open("SAC"), "SAC", 2, RuleContext::AtLevel(2)),
            LoopDescriptor::new(LoopAction::open("SAC"), "SAC", 1, RuleContext::Any),
            LoopDescriptor::new(LoopAction::open("ISS"), "ISS", 1, RuleContext::Any),
            LoopDescriptor::new(LoopAction::resume_ancestor(), "SE", 0, RuleContext::Any),
        ],
    )
}

/// X12 856 Ship Notice/Manifest.
///
/// Every HL level is triggered by the same segment tag, so the table
/// relies entirely on declaration order and contexts: the first HL is the
/// shipment, an HL under the shipment is an order, an HL under an order
/// is an item, and an HL under an item is a sibling item. Hierarchies
/// that jump levels encode their parent in HL02 and need reader
/// assistance beyond this table.
pub fn ship_notice_856() -> Plugin {
    Plugin::new(
        "856",
        "Ship Notice/Manifest",
        vec![
            LoopDescriptor::new(LoopAction::open("HL-SHIPMENT"), "HL", 1, RuleContext::Initial),
            LoopDescriptor::new(
                LoopAction::open("HL-ORDER"),
                "HL",
                2,
                RuleContext::in_loop("HL-SHIPMENT"),
            ),
            LoopDescriptor::new(
                LoopAction::open("HL-ITEM"),
                "HL",
                3,
                RuleContext::in_loop("HL-ORDER"),
            ),
            LoopDescriptor::new(
                LoopAction::open("HL-ITEM"),
                "HL",
                3,
                RuleContext::in_loop("HL-ITEM"),
            ),
            LoopDescriptor::new(LoopAction::open("CTT"), "CTT", 1, RuleContext::Any),
            LoopDescriptor::new(LoopAction::resume_ancestor(), "SE", 0, RuleContext::Any),
        ],
    )
}
