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

//! The independent per-deck aggregates the report is assembled from. Each
//! one applies its own filter, so they can be tested in isolation.

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::collections::HashSet;

use crate::collection::Snapshot;
use crate::outcome::Outcome;
use crate::outcome::classify;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::review::ReviewEvent;

/// A count per deck name.
pub type Counts = BTreeMap<String, usize>;

/// Active cards of a snapshot with their deck names resolved.
pub struct ActiveCards<'a> {
    cards: HashMap<CardId, (&'a Card, String)>,
}

impl<'a> ActiveCards<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        let cards = snapshot
            .cards
            .iter()
            .filter(|card| card.queue.is_active())
            .map(|card| (card.id, (card, snapshot.decks.label(card.deck_id))))
            .collect();
        Self { cards }
    }

    fn iter(&self) -> impl Iterator<Item = (&'a Card, &str)> {
        self.cards
            .values()
            .map(|(card, deck)| (*card, deck.as_str()))
    }

    /// The card and deck a review belongs to, if the card is active.
    fn lookup(&self, review: &ReviewEvent) -> Option<(&'a Card, &str)> {
        self.cards
            .get(&review.card_id)
            .map(|(card, deck)| (*card, deck.as_str()))
    }
}

/// Number of active cards per deck, regardless of interval.
pub fn all_cards(active: &ActiveCards) -> Counts {
    let mut counts = Counts::new();
    for (_, deck) in active.iter() {
        *counts.entry(deck.to_string()).or_default() += 1;
    }
    counts
}

/// Number of active cards per deck whose current interval exceeds the
/// threshold: the cards that would be retired.
pub fn eligible_cards(active: &ActiveCards, threshold: i64) -> Counts {
    let mut counts = Counts::new();
    for (card, deck) in active.iter() {
        if card.interval > threshold {
            *counts.entry(deck.to_string()).or_default() += 1;
        }
    }
    counts
}

/// Reviews performed on active cards that were already past the threshold
/// at the time of the review.
fn qualifying<'a, 'b>(
    active: &'b ActiveCards<'a>,
    reviews: &'b [ReviewEvent],
    threshold: i64,
) -> impl Iterator<Item = (&'b ReviewEvent, &'b str)> {
    reviews
        .iter()
        .filter(move |review| review.last_interval > threshold)
        .filter_map(move |review| active.lookup(review).map(|(_, deck)| (review, deck)))
}

/// Number of distinct active cards per deck with at least one qualifying
/// review.
pub fn reviewed_cards(active: &ActiveCards, reviews: &[ReviewEvent], threshold: i64) -> Counts {
    let mut seen: BTreeMap<String, HashSet<CardId>> = BTreeMap::new();
    for (review, deck) in qualifying(active, reviews, threshold) {
        seen.entry(deck.to_string())
            .or_default()
            .insert(review.card_id);
    }
    seen.into_iter()
        .map(|(deck, cards)| (deck, cards.len()))
        .collect()
}

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct SummaryKey {
    pub deck: String,
    /// `None` for reviews with no classifier entry.
    pub outcome: Option<Outcome>,
    pub last_interval: i64,
    pub kind: i64,
    pub ease: i64,
}

/// Qualifying reviews grouped by deck, outcome, last interval, queue kind
/// and ease. Pass and fail counts are derived from this grouping.
pub type Summary = BTreeMap<SummaryKey, usize>;

pub fn summary(active: &ActiveCards, reviews: &[ReviewEvent], threshold: i64) -> Summary {
    let mut summary = Summary::new();
    for (review, deck) in qualifying(active, reviews, threshold) {
        let key = SummaryKey {
            deck: deck.to_string(),
            outcome: classify(review.kind, review.ease),
            last_interval: review.last_interval,
            kind: review.kind,
            ease: review.ease,
        };
        *summary.entry(key).or_default() += 1;
    }
    summary
}

/// Failed reviews per deck: exactly the review-phase wrong answers.
pub fn fail(summary: &Summary) -> Counts {
    sum_where(summary, |outcome| outcome.is_fail())
}

/// Passed reviews per deck: every other classified outcome.
pub fn pass(summary: &Summary) -> Counts {
    sum_where(summary, |outcome| !outcome.is_fail())
}

/// Qualifying reviews per deck that have no classification. These count
/// as neither pass nor fail.
pub fn unclassified(summary: &Summary) -> Counts {
    let mut counts = Counts::new();
    for (key, n) in summary {
        if key.outcome.is_none() {
            *counts.entry(key.deck.clone()).or_default() += n;
        }
    }
    counts
}

/// Review counts per deck and outcome label.
pub fn outcome_counts(summary: &Summary) -> BTreeMap<String, BTreeMap<Outcome, usize>> {
    let mut counts: BTreeMap<String, BTreeMap<Outcome, usize>> = BTreeMap::new();
    for (key, n) in summary {
        if let Some(outcome) = key.outcome {
            *counts
                .entry(key.deck.clone())
                .or_default()
                .entry(outcome)
                .or_default() += n;
        }
    }
    counts
}

fn sum_where(summary: &Summary, predicate: impl Fn(Outcome) -> bool) -> Counts {
    let mut counts = Counts::new();
    for (key, n) in summary {
        match key.outcome {
            Some(outcome) if predicate(outcome) => {
                *counts.entry(key.deck.clone()).or_default() += n;
            }
            _ => {}
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::snapshot;

    #[test]
    fn test_all_cards_ignores_inactive_queues() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 5, 2), (2, 1, 50, 1), (3, 1, 50, -1), (4, 1, 0, 0), (5, 1, 9, -2)],
            &[],
        );
        let active = ActiveCards::new(&snap);
        assert_eq!(all_cards(&active).get("Default"), Some(&2));
    }

    #[test]
    fn test_eligible_uses_current_interval() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 21, 2), (2, 1, 22, 2), (3, 1, 100, 2)],
            &[],
        );
        let active = ActiveCards::new(&snap);
        assert_eq!(eligible_cards(&active, 21).get("Default"), Some(&2));
        assert_eq!(eligible_cards(&active, 100).get("Default"), None);
    }

    #[test]
    fn test_summary_uses_last_interval() {
        // The card is eligible today, but neither review happened past the
        // threshold, so neither is counted.
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 90, 2)],
            &[(1, 10, 1, 3), (1, 21, 1, 3)],
        );
        let active = ActiveCards::new(&snap);
        assert!(summary(&active, &snap.reviews, 21).is_empty());
        assert_eq!(summary(&active, &snap.reviews, 20).len(), 1);
    }

    #[test]
    fn test_summary_grouping() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 90, 2), (2, 1, 90, 2)],
            &[(1, 30, 1, 3), (2, 30, 1, 3), (1, 40, 1, 3), (2, 30, 1, 1)],
        );
        let active = ActiveCards::new(&snap);
        let summary = summary(&active, &snap.reviews, 21);
        assert_eq!(summary.len(), 3);
        let key = SummaryKey {
            deck: "Default".to_string(),
            outcome: classify(1, 3),
            last_interval: 30,
            kind: 1,
            ease: 3,
        };
        assert_eq!(summary.get(&key), Some(&2));
    }

    #[test]
    fn test_pass_fail_split() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 90, 2)],
            &[
                (1, 30, 1, 1),
                (1, 30, 1, 1),
                (1, 30, 1, 3),
                (1, 30, 2, 1),
                (1, 30, 0, 1),
                (1, 30, 3, 1),
                (1, 30, 4, 0),
            ],
        );
        let active = ActiveCards::new(&snap);
        let summary = summary(&active, &snap.reviews, 21);
        assert_eq!(fail(&summary).get("Default"), Some(&2));
        // Learning, relearning and cram wrong answers are passes.
        assert_eq!(pass(&summary).get("Default"), Some(&4));
        assert_eq!(unclassified(&summary).get("Default"), Some(&1));
    }

    #[test]
    fn test_reviewed_cards_are_distinct() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 90, 2), (2, 1, 90, 2), (3, 1, 90, 2)],
            &[(1, 30, 1, 3), (1, 35, 1, 3), (2, 30, 1, 1), (3, 5, 1, 3)],
        );
        let active = ActiveCards::new(&snap);
        assert_eq!(
            reviewed_cards(&active, &snap.reviews, 21).get("Default"),
            Some(&2)
        );
    }

    #[test]
    fn test_reviews_of_inactive_or_missing_cards_are_ignored() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 90, -1)],
            &[(1, 30, 1, 3), (99, 30, 1, 3)],
        );
        let active = ActiveCards::new(&snap);
        assert!(summary(&active, &snap.reviews, 21).is_empty());
    }

    #[test]
    fn test_outcome_counts() {
        let snap = snapshot(
            &[(1, "Default")],
            &[(1, 1, 90, 2)],
            &[(1, 30, 1, 3), (1, 31, 1, 3), (1, 30, 1, 4)],
        );
        let active = ActiveCards::new(&snap);
        let counts = outcome_counts(&summary(&active, &snap.reviews, 21));
        let deck = counts.get("Default").unwrap();
        let labels: Vec<(String, usize)> = deck
            .iter()
            .map(|(outcome, n)| (outcome.to_string(), *n))
            .collect();
        assert_eq!(
            labels,
            vec![("review/ok".to_string(), 2), ("review/easy".to_string(), 1)]
        );
    }
}
