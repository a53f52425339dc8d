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

//! Loop tables for UN/EDIFACT messages.
//!
//! EDIFACT calls loops segment groups; the tables keep the standard SG
//! numbering. The service segments (UNB, UNH, UNT, UNZ) carry no rules;
//! envelope structure belongs to the document reader.

use edi_core::loops::{LoopAction, LoopDescriptor, RuleContext};
use edi_core::plugin::Plugin;

/// UN/EDIFACT ORDERS Purchase Order Message.
///
/// Header SG1 reference and SG2 party groups (with nested SG3 references
/// and SG5 contacts), SG28 line items with nested SG32 price details, and
/// a UNS section-control unwind.
pub fn orders() -> Plugin {
    Plugin::new(
        "ORDERS",
        "Purchase Order Message",
        vec![
            // RFF: a reference inside a party group opens SG3; in the
            // header it opens SG1, either from the top level or as a
            // sibling SG1 occurrence.
            LoopDescriptor::new(LoopAction::open("SG3"), "RFF", 2, RuleContext::in_loop("SG2")),
            LoopDescriptor::new(LoopAction::open("SG1"), "RFF", 1, RuleContext::Initial),
            LoopDescriptor::new(LoopAction::open("SG1"), "RFF", 1, RuleContext::in_loop("SG1")),
            // NAD: name and address opens a party group.
            LoopDescriptor::new(LoopAction::open("SG2"), "NAD", 1, RuleContext::Any),
            // CTA: contact information nested in the party group.
            LoopDescriptor::new(LoopAction::open("SG5"), "CTA", 2, RuleContext::path("/SG2")),
            LoopDescriptor::new(LoopAction::open("SG5"), "CTA", 2, RuleContext::AtLevel(2)),
            // FTX: free text belongs to the open party group.
            LoopDescriptor::new(LoopAction::Stay, "FTX", 1, RuleContext::in_loop("SG2")),
            // LIN: line item opens SG28.
            LoopDescriptor::new(LoopAction::open("SG28"), "LIN", 1, RuleContext::Any),
            // PRI: price details nested in the line item.
            LoopDescriptor::new(LoopAction::open("SG32"), "PRI", 2, RuleContext::in_loop("SG28")),
            // UNS: section control returns to the top level.
            LoopDescriptor::new(LoopAction::resume_ancestor(), "UNS", 0, RuleContext::Any),
        ],
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Table shape tests ====================

    #[test]
    fn test_orders_identity() {
        let plugin = orders();
        assert_eq!(plugin.document_type(), "ORDERS");
        assert_eq!(plugin.document_name(), "Purchase Order Message");
    }

    #[test]
    fn test_rff_rules_by_context() {
        let plugin = orders();
        // Inside a party group: SG3.
        let rule = plugin.query("RFF", "/SG2", 1).unwrap();
        assert_eq!(rule.action(), &LoopAction::open("SG3"));
        // At the top level: SG1.
        let rule = plugin.query("RFF", "/", 0).unwrap();
        assert_eq!(rule.action(), &LoopAction::open("SG1"));
        // Sibling occurrence inside SG1.
        let rule = plugin.query("RFF", "/SG1", 1).unwrap();
        assert_eq!(rule.action(), &LoopAction::open("SG1"));
        // No rule inside a line item: the reference stays put.
        assert!(plugin.query("RFF", "/SG28", 1).is_none());
    }

    #[test]
    fn test_cta_falls_back_to_level_context() {
        let plugin = orders();
        assert!(plugin.query("CTA", "/SG2", 1).is_some());
        // After an SG3 the path context fails but the level context holds.
        let rule = plugin.query("CTA", "/SG2/SG3", 2).unwrap();
        assert_eq!(rule.context(), &RuleContext::AtLevel(2));
    }

    #[test]
    fn test_ftx_is_a_stay_rule() {
        let plugin = orders();
        let rule = plugin.query("FTX", "/SG2", 1).unwrap();
        assert_eq!(rule.action(), &LoopAction::Stay);
    }
}
