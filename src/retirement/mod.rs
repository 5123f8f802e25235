// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The retirement report: per-deck statistics on how cards behave once
//! their interval is past a threshold.

pub mod aggregate;
pub mod proportion;

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Serialize;

use crate::collection::Snapshot;
use crate::outcome::Outcome;
use crate::retirement::aggregate::ActiveCards;
use crate::retirement::aggregate::Counts;
use crate::retirement::proportion::Proportion;

/// One row of the report.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckSummary {
    pub deck: String,
    /// Cards in rotation.
    pub active_cards: usize,
    /// Active cards whose current interval is past the threshold.
    pub eligible_cards: usize,
    /// Distinct active cards reviewed while past the threshold.
    pub reviewed_cards: usize,
    /// Reviews performed while past the threshold, by outcome.
    pub outcomes: BTreeMap<Outcome, usize>,
    /// Every review performed while past the threshold.
    pub reviews: usize,
    /// Reviews performed while past the threshold that have no outcome.
    pub unclassified: usize,
    pub passed: usize,
    pub failed: usize,
    pub proportion: Proportion,
}

/// Compute the report for a snapshot. A review counts when the card's
/// interval before the review was greater than `threshold` days.
///
/// Every deck with at least one active card gets exactly one row. Rows are
/// sorted by ascending pass proportion, decks with no passes or fails
/// last, and ties broken by deck name.
pub fn retirement_summary(snapshot: &Snapshot, threshold: u32) -> Vec<DeckSummary> {
    let threshold = i64::from(threshold);
    let active = ActiveCards::new(snapshot);

    let all = aggregate::all_cards(&active);
    let eligible = aggregate::eligible_cards(&active, threshold);
    let reviewed = aggregate::reviewed_cards(&active, &snapshot.reviews, threshold);
    let summary = aggregate::summary(&active, &snapshot.reviews, threshold);
    let pass = aggregate::pass(&summary);
    let fail = aggregate::fail(&summary);
    let unknown = aggregate::unclassified(&summary);
    let mut outcomes = aggregate::outcome_counts(&summary);

    let decks: BTreeSet<&String> = all
        .keys()
        .chain(eligible.keys())
        .chain(pass.keys())
        .chain(fail.keys())
        .collect();

    let mut rows: Vec<DeckSummary> = decks
        .into_iter()
        .map(|deck| {
            let passed = count(&pass, deck);
            let failed = count(&fail, deck);
            let unclassified = count(&unknown, deck);
            DeckSummary {
                deck: deck.clone(),
                active_cards: count(&all, deck),
                eligible_cards: count(&eligible, deck),
                reviewed_cards: count(&reviewed, deck),
                outcomes: outcomes.remove(deck).unwrap_or_default(),
                reviews: passed + failed + unclassified,
                unclassified,
                passed,
                failed,
                proportion: Proportion::new(passed, failed),
            }
        })
        .collect();

    for row in &rows {
        if row.unclassified > 0 {
            log::warn!(
                "{} reviews in deck {:?} have no outcome and are left out of pass and fail.",
                row.unclassified,
                row.deck
            );
        }
    }

    rows.sort_by(|a, b| {
        a.proportion
            .compare(&b.proportion)
            .then_with(|| a.deck.cmp(&b.deck))
    });
    rows
}

fn count(counts: &Counts, deck: &str) -> usize {
    counts.get(deck).copied().unwrap_or(0)
}
