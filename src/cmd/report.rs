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
use std::path::PathBuf;

use clap::ValueEnum;
use maud::DOCTYPE;
use maud::html;
use serde::Serialize;

use crate::collection::Collection;
use crate::config::CONFIG_FILE;
use crate::config::Config;
use crate::error::Fallible;
use crate::retirement::DeckSummary;
use crate::retirement::retirement_summary;
use crate::types::timestamp::Timestamp;

#[derive(ValueEnum, Clone, Copy)]
pub enum ReportFormat {
    /// Plain-text table.
    Table,
    /// JSON output.
    Json,
    /// HTML page.
    Html,
}

impl Display for ReportFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Table => write!(f, "table"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Html => write!(f, "html"),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    threshold: u32,
    generated_at: Timestamp,
    decks: Vec<DeckSummary>,
}

pub fn print_report(
    collection: Option<String>,
    interval: Option<u32>,
    config: Option<String>,
    format: ReportFormat,
) -> Fallible<()> {
    let report = build_report(collection, interval, config)?;
    println!("{}", render(&report, format)?);
    Ok(())
}

fn build_report(
    collection: Option<String>,
    interval: Option<u32>,
    config: Option<String>,
) -> Fallible<Report> {
    let mut coll = Collection::open(collection)?;
    let config_path: PathBuf = match config {
        Some(path) => PathBuf::from(path),
        None => coll.path().with_file_name(CONFIG_FILE),
    };
    let config = Config::load(&config_path)?;
    let threshold = config.interval(interval);
    let snapshot = coll.snapshot()?;
    log::debug!("Computing report for a threshold of {threshold} days.");
    Ok(Report {
        threshold,
        generated_at: Timestamp::now(),
        decks: retirement_summary(&snapshot, threshold),
    })
}

fn render(report: &Report, format: ReportFormat) -> Fallible<String> {
    match format {
        ReportFormat::Table => Ok(render_table(report)),
        ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        ReportFormat::Html => Ok(render_html(report)),
    }
}

fn title(report: &Report) -> String {
    format!(
        "Review success of cards with interval larger than {} days",
        report.threshold
    )
}

const TABLE_HEADER: [&str; 7] = [
    "Deck",
    "Active",
    "Eligible",
    "Reviewed",
    "Passed",
    "Failed",
    "Proportion",
];

fn render_table(report: &Report) -> String {
    let rows: Vec<[String; 7]> = report
        .decks
        .iter()
        .map(|row| {
            [
                row.deck.clone(),
                row.active_cards.to_string(),
                row.eligible_cards.to_string(),
                row.reviewed_cards.to_string(),
                row.passed.to_string(),
                row.failed.to_string(),
                row.proportion.to_string(),
            ]
        })
        .collect();
    let mut widths: [usize; 7] = TABLE_HEADER.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }
    let mut out = title(report);
    out.push('\n');
    let header = TABLE_HEADER.map(String::from);
    for row in std::iter::once(&header).chain(rows.iter()) {
        out.push('\n');
        let cells: Vec<String> = row
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(i, (cell, width))| {
                let pad = width - cell.chars().count();
                // Deck names are left-aligned, numbers right-aligned.
                if i == 0 {
                    format!("{cell}{}", " ".repeat(pad))
                } else {
                    format!("{}{cell}", " ".repeat(pad))
                }
            })
            .collect();
        out.push_str(cells.join("  ").trim_end());
    }
    out
}

/// Outcome counts as `label: n, ...`, keeping passes or fails only.
fn buttons(row: &DeckSummary, fails: bool) -> String {
    row.outcomes
        .iter()
        .filter(|(outcome, _)| outcome.is_fail() == fails)
        .map(|(outcome, n)| format!("{outcome}: {n}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn render_html(report: &Report) -> String {
    let title = title(report);
    let markup = html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
            }
            body {
                h2 { (title) }
                table {
                    tr {
                        td { b { "Deck" } }
                        td { b { "Active cards in deck" } }
                        td { b { "Eligible cards to retire" } }
                        td { b { "Cards reviewed" } }
                        td { b { "Button pressed Pass" } }
                        td { b { "Cards Passed" } }
                        td { b { "Button pressed Fail" } }
                        td { b { "Cards Failed" } }
                        td { b { "Proportion passed" } }
                    }
                    @for row in &report.decks {
                        tr {
                            td { (row.deck) }
                            td { (row.active_cards) }
                            td { (row.eligible_cards) }
                            td { (row.reviewed_cards) }
                            td { (buttons(row, false)) }
                            td { (row.passed) }
                            td { (buttons(row, true)) }
                            td { (row.failed) }
                            td { (row.proportion) }
                        }
                    }
                }
                p { "Generated at " (report.generated_at) "." }
            }
        }
    };
    markup.into_string()
}
