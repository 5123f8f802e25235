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

use std::collections::BTreeMap;
use std::collections::VecDeque;

use serde_json::Value;

use crate::types::card::DeckId;

/// Maps deck ids to display names.
#[derive(Clone, Debug, Default)]
pub struct DeckNames {
    names: BTreeMap<DeckId, String>,
}

impl DeckNames {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: DeckId, name: impl Into<String>) {
        self.names.insert(id, name.into());
    }

    pub fn get(&self, id: DeckId) -> Option<&str> {
        self.names.get(&id).map(String::as_str)
    }

    /// The name rows for this deck are grouped under. Decks without a name
    /// get a placeholder so their cards are still counted.
    pub fn label(&self, id: DeckId) -> String {
        match self.get(id) {
            Some(name) => name.to_string(),
            None => placeholder_name(id),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DeckId, &str)> {
        self.names.iter().map(|(id, name)| (*id, name.as_str()))
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

pub fn placeholder_name(id: DeckId) -> String {
    format!("[deck {id}]")
}

/// Flatten a deck tree into a map from deck id to deck name.
///
/// The id of every name is the first path segment under the root. A node's
/// own `name` wins over names nested deeper inside it. Nodes whose key is
/// not an integer, or that carry no string `name` at all, are skipped.
pub fn flatten_deck_tree(tree: &Value) -> DeckNames {
    let mut names = DeckNames::new();
    let Some(nodes) = tree.as_object() else {
        log::debug!("Deck tree is not an object, no deck names.");
        return names;
    };
    for (key, node) in nodes {
        let id: DeckId = match key.parse::<i64>() {
            Ok(id) => DeckId(id),
            Err(_) => {
                log::debug!("Skipping deck node with non-numeric key {key:?}.");
                continue;
            }
        };
        match shallowest_name(node) {
            Some(name) => names.insert(id, name),
            None => log::debug!("Skipping deck node {key} without a name."),
        }
    }
    names
}

/// Breadth-first search for the first string-valued `name` property.
fn shallowest_name(node: &Value) -> Option<&str> {
    let mut queue: VecDeque<&Value> = VecDeque::from([node]);
    while let Some(value) = queue.pop_front() {
        match value {
            Value::Object(map) => {
                if let Some(Value::String(name)) = map.get("name") {
                    return Some(name.as_str());
                }
                queue.extend(map.values());
            }
            Value::Array(items) => queue.extend(items.iter()),
            _ => {}
        }
    }
    None
}
