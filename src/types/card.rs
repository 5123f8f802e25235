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

use rusqlite::types::FromSql;
use rusqlite::types::FromSqlResult;
use rusqlite::types::ValueRef;

/// The identifier of a card (`cards.id`).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CardId(pub i64);

/// The identifier of a deck (`cards.did`, or a key of the deck tree).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DeckId(pub i64);

impl Display for DeckId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromSql for CardId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(CardId)
    }
}

impl FromSql for DeckId {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(DeckId)
    }
}

/// The scheduler queue a card currently sits in.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum QueueState {
    /// Buried by the user or the scheduler (codes -3 and -2).
    Buried,
    Suspended,
    New,
    Learning,
    Review,
    /// Learning with an interval of at least a day.
    DayLearning,
    Preview,
    /// A code this tool does not know about.
    Unknown(i64),
}

impl QueueState {
    pub fn from_code(code: i64) -> Self {
        match code {
            -3 | -2 => QueueState::Buried,
            -1 => QueueState::Suspended,
            0 => QueueState::New,
            1 => QueueState::Learning,
            2 => QueueState::Review,
            3 => QueueState::DayLearning,
            4 => QueueState::Preview,
            other => QueueState::Unknown(other),
        }
    }

    /// Whether the card is in rotation. New cards have never been
    /// scheduled, and buried or suspended cards are out of rotation.
    pub fn is_active(self) -> bool {
        match self {
            QueueState::Learning
            | QueueState::Review
            | QueueState::DayLearning
            | QueueState::Preview => true,
            QueueState::Buried | QueueState::Suspended | QueueState::New => false,
            QueueState::Unknown(code) => code > 0,
        }
    }
}

impl FromSql for QueueState {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        i64::column_result(value).map(QueueState::from_code)
    }
}

/// A snapshot of one row of the card table.
#[derive(Clone, Debug)]
pub struct Card {
    pub id: CardId,
    pub deck_id: DeckId,
    /// The current interval in days. Negative values are learning steps in
    /// seconds.
    pub interval: i64,
    pub queue: QueueState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_queues() {
        let active: Vec<i64> = (-3..=4)
            .filter(|code| QueueState::from_code(*code).is_active())
            .collect();
        assert_eq!(active, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_unknown_queue() {
        assert_eq!(QueueState::from_code(9), QueueState::Unknown(9));
        assert!(QueueState::from_code(9).is_active());
        assert!(!QueueState::from_code(-7).is_active());
    }
}
