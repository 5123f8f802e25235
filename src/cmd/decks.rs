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

use std::collections::BTreeSet;

use crate::collection::Collection;
use crate::collection::Snapshot;
use crate::error::Fallible;
use crate::types::card::DeckId;

pub fn list_decks(collection: Option<String>) -> Fallible<()> {
    let mut coll = Collection::open(collection)?;
    let snapshot = coll.snapshot()?;
    for line in deck_lines(&snapshot) {
        println!("{line}");
    }
    Ok(())
}

/// One `id<TAB>name` line per named deck, then one per deck id that cards
/// refer to but that has no name.
fn deck_lines(snapshot: &Snapshot) -> Vec<String> {
    let mut lines: Vec<String> = snapshot
        .decks
        .iter()
        .map(|(id, name)| format!("{id}\t{name}"))
        .collect();
    let unnamed: BTreeSet<DeckId> = snapshot
        .cards
        .iter()
        .map(|card| card.deck_id)
        .filter(|id| snapshot.decks.get(*id).is_none())
        .collect();
    for id in unnamed {
        lines.push(format!("{id}\t{} (no name)", snapshot.decks.label(id)));
    }
    lines
}
