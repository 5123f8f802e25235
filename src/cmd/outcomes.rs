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

use crate::outcome::OUTCOME_TABLE;
use crate::outcome::TABLE_ANOMALIES;

pub fn list_outcomes() {
    for line in outcome_lines() {
        println!("{line}");
    }
}

fn outcome_lines() -> Vec<String> {
    let mut lines = vec!["type\tease\toutcome".to_string()];
    for entry in OUTCOME_TABLE {
        lines.push(format!("{}\t{}\t{}", entry.kind, entry.ease, entry.outcome));
    }
    for anomaly in TABLE_ANOMALIES {
        let entry = anomaly.entry;
        lines.push(format!(
            "{}\t{}\t{}\t(not used: {})",
            entry.kind, entry.ease, entry.outcome, anomaly.note
        ));
    }
    lines
}
