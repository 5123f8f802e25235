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

use std::collections::HashSet;
use std::env::current_dir;
use std::path::Path;
use std::path::PathBuf;
use std::time::Instant;

use rusqlite::Connection;
use rusqlite::OpenFlags;
use rusqlite::Transaction;
use rusqlite::TransactionBehavior;
use serde_json::Value;

use crate::decks::DeckNames;
use crate::decks::flatten_deck_tree;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::DeckId;
use crate::types::review::ReviewEvent;

/// The file name Anki gives a profile's collection.
pub const COLLECTION_FILE: &str = "collection.anki2";

/// Separator between deck names in the `decks` table of newer collections.
const DECK_TABLE_SEPARATOR: char = '\x1f';

/// A read-only handle on an Anki collection.
pub struct Collection {
    path: PathBuf,
    conn: Connection,
}

/// Everything the report reads, taken at a single point in time.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    pub decks: DeckNames,
    pub cards: Vec<Card>,
    pub reviews: Vec<ReviewEvent>,
}

impl Collection {
    /// Open a collection. The path may point at the collection file itself,
    /// or at a directory holding a `collection.anki2` file. Defaults to the
    /// current directory.
    pub fn open(path: Option<String>) -> Fallible<Self> {
        let path: PathBuf = match path {
            Some(path) => PathBuf::from(path),
            None => current_dir()?,
        };
        let path: PathBuf = if path.is_dir() {
            path.join(COLLECTION_FILE)
        } else {
            path
        };
        if !path.exists() {
            return fail(format!("collection {} does not exist.", path.display()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let conn =
            Connection::open_with_flags(&path, flags).map_err(|e| access_failure(&path, e))?;
        log::debug!("Opened collection {}.", path.display());
        Ok(Self { path, conn })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read decks, cards, and reviews inside one read transaction, so every
    /// aggregate computed from the snapshot sees the same state of the
    /// collection.
    pub fn snapshot(&mut self) -> Fallible<Snapshot> {
        let start = Instant::now();
        let snapshot = read_snapshot(&mut self.conn).map_err(|e| access_failure(&self.path, e))?;
        let duration = start.elapsed().as_millis();
        log::debug!(
            "Read {} decks, {} cards, and {} reviews in {duration}ms.",
            snapshot.decks.len(),
            snapshot.cards.len(),
            snapshot.reviews.len()
        );
        log_integrity(&snapshot);
        Ok(snapshot)
    }
}

fn access_failure(path: &Path, e: rusqlite::Error) -> ErrorReport {
    ErrorReport::new(format!(
        "failed to read collection {}: {e}",
        path.display()
    ))
}

fn read_snapshot(conn: &mut Connection) -> rusqlite::Result<Snapshot> {
    let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
    let decks = read_deck_names(&tx)?;
    let cards = read_cards(&tx)?;
    let reviews = read_reviews(&tx)?;
    tx.commit()?;
    Ok(Snapshot {
        decks,
        cards,
        reviews,
    })
}

fn read_deck_names(tx: &Transaction) -> rusqlite::Result<DeckNames> {
    let raw: String = tx.query_row("select decks from col limit 1;", [], |row| row.get(0))?;
    let names = if raw.trim().is_empty() {
        DeckNames::new()
    } else {
        match serde_json::from_str::<Value>(&raw) {
            Ok(tree) => flatten_deck_tree(&tree),
            Err(e) => {
                log::warn!("Deck tree is not valid JSON ({e}), using placeholder deck names.");
                DeckNames::new()
            }
        }
    };
    if names.is_empty() && probe_table_exists(tx, "decks")? {
        log::debug!("Reading deck names from the decks table.");
        return read_deck_table(tx);
    }
    Ok(names)
}

fn read_deck_table(tx: &Transaction) -> rusqlite::Result<DeckNames> {
    let mut names = DeckNames::new();
    let mut stmt = tx.prepare("select id, name from decks;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let id: DeckId = row.get(0)?;
        let name: String = row.get(1)?;
        names.insert(id, name.replace(DECK_TABLE_SEPARATOR, "::"));
    }
    Ok(names)
}

fn read_cards(tx: &Transaction) -> rusqlite::Result<Vec<Card>> {
    let mut cards = Vec::new();
    let mut stmt = tx.prepare("select id, did, ivl, queue from cards order by id;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        cards.push(Card {
            id: row.get(0)?,
            deck_id: row.get(1)?,
            interval: row.get(2)?,
            queue: row.get(3)?,
        });
    }
    Ok(cards)
}

fn read_reviews(tx: &Transaction) -> rusqlite::Result<Vec<ReviewEvent>> {
    let mut reviews = Vec::new();
    let mut stmt = tx.prepare("select id, cid, lastIvl, type, ease from revlog order by id;")?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        reviews.push(ReviewEvent {
            reviewed_at: row.get(0)?,
            card_id: row.get(1)?,
            last_interval: row.get(2)?,
            kind: row.get(3)?,
            ease: row.get(4)?,
        });
    }
    Ok(reviews)
}

fn probe_table_exists(tx: &Transaction, name: &str) -> rusqlite::Result<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, [name], |row| row.get(0))?;
    Ok(count > 0)
}

/// Log the data-integrity problems the report tolerates.
fn log_integrity(snapshot: &Snapshot) {
    let card_ids: HashSet<CardId> = snapshot.cards.iter().map(|card| card.id).collect();
    let orphaned_reviews = snapshot
        .reviews
        .iter()
        .filter(|review| !card_ids.contains(&review.card_id))
        .count();
    if orphaned_reviews > 0 {
        log::warn!("{orphaned_reviews} reviews refer to cards that no longer exist.");
    }
    let unnamed: HashSet<DeckId> = snapshot
        .cards
        .iter()
        .map(|card| card.deck_id)
        .filter(|id| snapshot.decks.get(*id).is_none())
        .collect();
    for id in unnamed {
        log::warn!("Deck {id} has no name, its cards are listed under a placeholder.");
    }
    let first = snapshot.reviews.iter().map(|r| r.reviewed_at).min();
    let last = snapshot.reviews.iter().map(|r| r.reviewed_at).max();
    if let (Some(first), Some(last)) = (first, last) {
        log::debug!("Review log spans {first} to {last}.");
    }
}
