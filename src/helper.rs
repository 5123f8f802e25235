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

use std::path::PathBuf;

use rusqlite::Connection;
use tempfile::TempDir;
use tempfile::tempdir;

use crate::collection::COLLECTION_FILE;
use crate::collection::Snapshot;
use crate::decks::DeckNames;
use crate::error::Fallible;
use crate::types::card::Card;
use crate::types::card::CardId;
use crate::types::card::DeckId;
use crate::types::card::QueueState;
use crate::types::review::ReviewEvent;
use crate::types::timestamp::Timestamp;

const SCHEMA: &str = "
create table col (id integer primary key, decks text not null);
insert into col (id, decks) values (1, '{}');
create table cards (
    id integer primary key,
    did integer not null,
    ivl integer not null,
    queue integer not null
);
create table revlog (
    id integer primary key,
    cid integer not null,
    lastIvl integer not null,
    type integer not null,
    ease integer not null
);
";

/// A throwaway collection with the subset of the Anki schema the report
/// reads. The directory is deleted when the value is dropped.
pub struct TestCollection {
    dir: TempDir,
    conn: Connection,
}

impl TestCollection {
    pub fn new() -> Fallible<Self> {
        let dir = tempdir()?;
        let conn = Connection::open(dir.path().join(COLLECTION_FILE))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { dir, conn })
    }

    pub fn directory(&self) -> String {
        self.dir.path().display().to_string()
    }

    pub fn path(&self) -> String {
        let path: PathBuf = self.dir.path().join(COLLECTION_FILE);
        path.display().to_string()
    }

    pub fn decks_json(self, decks: &str) -> Fallible<Self> {
        self.conn.execute("update col set decks = ?;", [decks])?;
        Ok(self)
    }

    /// Add a row to the `decks` table of newer collections.
    pub fn deck_row(self, id: i64, name: &str) -> Fallible<Self> {
        self.conn.execute(
            "create table if not exists decks (id integer primary key, name text not null);",
            [],
        )?;
        self.conn
            .execute("insert into decks (id, name) values (?, ?);", (id, name))?;
        Ok(self)
    }

    pub fn card(self, id: i64, did: i64, ivl: i64, queue: i64) -> Fallible<Self> {
        self.conn.execute(
            "insert into cards (id, did, ivl, queue) values (?, ?, ?, ?);",
            (id, did, ivl, queue),
        )?;
        Ok(self)
    }

    pub fn review(self, id: i64, cid: i64, last_ivl: i64, kind: i64, ease: i64) -> Fallible<Self> {
        self.conn.execute(
            "insert into revlog (id, cid, lastIvl, type, ease) values (?, ?, ?, ?, ?);",
            (id, cid, last_ivl, kind, ease),
        )?;
        Ok(self)
    }

    /// Write a config file next to the collection.
    pub fn config(self, contents: &str) -> Fallible<Self> {
        std::fs::write(self.dir.path().join("retirement.toml"), contents)?;
        Ok(self)
    }
}

/// Build an in-memory snapshot from decks `(id, name)`, cards
/// `(id, deck, interval, queue)` and reviews
/// `(card, last interval, kind, ease)`.
pub fn snapshot(
    decks: &[(i64, &str)],
    cards: &[(i64, i64, i64, i64)],
    reviews: &[(i64, i64, i64, i64)],
) -> Snapshot {
    let mut names = DeckNames::new();
    for (id, name) in decks {
        names.insert(DeckId(*id), *name);
    }
    let cards = cards
        .iter()
        .map(|(id, did, ivl, queue)| Card {
            id: CardId(*id),
            deck_id: DeckId(*did),
            interval: *ivl,
            queue: QueueState::from_code(*queue),
        })
        .collect();
    let reviews = reviews
        .iter()
        .enumerate()
        .map(|(i, (cid, last_ivl, kind, ease))| ReviewEvent {
            reviewed_at: Timestamp::from_millis(1_700_000_000_000 + i as i64).unwrap(),
            card_id: CardId(*cid),
            last_interval: *last_ivl,
            kind: *kind,
            ease: *ease,
        })
        .collect();
    Snapshot {
        decks: names,
        cards,
        reviews,
    }
}
