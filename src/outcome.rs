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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

/// The scheduling phase that produced a review (`revlog.type`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Phase {
    Learn,
    Review,
    Relearn,
    Cram,
}

impl Phase {
    fn as_str(self) -> &'static str {
        match self {
            Phase::Learn => "learn",
            Phase::Review => "review",
            Phase::Relearn => "relearn",
            Phase::Cram => "cram",
        }
    }
}

/// What the button press means within its phase.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Answer {
    Wrong,
    Hard,
    Ok,
    Easy,
}

impl Answer {
    fn as_str(self) -> &'static str {
        match self {
            Answer::Wrong => "wrong",
            Answer::Hard => "hard",
            Answer::Ok => "ok",
            Answer::Easy => "easy",
        }
    }
}

/// A classified review, displayed as `<phase>/<answer>`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Outcome {
    pub phase: Phase,
    pub answer: Answer,
}

/// The only outcome that counts against the pass proportion. Wrong answers
/// while learning or relearning are not failures of a graduated card.
pub const REVIEW_WRONG: Outcome = Outcome {
    phase: Phase::Review,
    answer: Answer::Wrong,
};

impl Outcome {
    pub fn is_fail(self) -> bool {
        self == REVIEW_WRONG
    }
}

impl Display for Outcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.phase.as_str(), self.answer.as_str())
    }
}

impl Serialize for Outcome {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// One row of the classification table.
#[derive(Clone, Copy, Debug)]
pub struct Entry {
    pub kind: i64,
    pub ease: i64,
    pub outcome: Outcome,
}

const fn entry(kind: i64, ease: i64, phase: Phase, answer: Answer) -> Entry {
    Entry {
        kind,
        ease,
        outcome: Outcome { phase, answer },
    }
}

/// Maps `(revlog.type, revlog.ease)` to an outcome. Learning phases have no
/// "hard" button, so ease 2 is "ok" and ease 3 is "easy" there. Relearning
/// ease 3 has no entry; see `TABLE_ANOMALIES`.
pub const OUTCOME_TABLE: [Entry; 13] = [
    entry(0, 1, Phase::Learn, Answer::Wrong),
    entry(0, 2, Phase::Learn, Answer::Ok),
    entry(0, 3, Phase::Learn, Answer::Easy),
    entry(1, 1, Phase::Review, Answer::Wrong),
    entry(1, 2, Phase::Review, Answer::Hard),
    entry(1, 3, Phase::Review, Answer::Ok),
    entry(1, 4, Phase::Review, Answer::Easy),
    entry(2, 1, Phase::Relearn, Answer::Wrong),
    entry(2, 2, Phase::Relearn, Answer::Ok),
    entry(3, 1, Phase::Cram, Answer::Wrong),
    entry(3, 2, Phase::Cram, Answer::Hard),
    entry(3, 3, Phase::Cram, Answer::Ok),
    entry(3, 4, Phase::Cram, Answer::Easy),
];

/// A row of the historical classification table that is never consulted.
#[derive(Clone, Copy, Debug)]
pub struct Anomaly {
    pub entry: Entry,
    pub note: &'static str,
}

pub const TABLE_ANOMALIES: [Anomaly; 2] = [
    Anomaly {
        entry: entry(0, 2, Phase::Relearn, Answer::Easy),
        note: "reuses the key of learn/ok; intent unknown, pending product review",
    },
    Anomaly {
        entry: entry(2, 3, Phase::Relearn, Answer::Easy),
        note: "inferred from the button rule, absent from the historical table; reviews stay unclassified",
    },
];

/// Classify a review. Returns `None` for pairs with no table entry.
pub fn classify(kind: i64, ease: i64) -> Option<Outcome> {
    OUTCOME_TABLE
        .iter()
        .find(|e| e.kind == kind && e.ease == ease)
        .map(|e| e.outcome)
}
