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

use std::ops::RangeInclusive;

use clap::Parser;

use crate::cmd::decks::list_decks;
use crate::cmd::outcomes::list_outcomes;
use crate::cmd::report::ReportFormat;
use crate::cmd::report::print_report;
use crate::config::INTERVAL_RANGE;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Report, per deck, how cards fare once their interval is past a threshold.
    Report {
        /// Path to the collection file, or to a directory containing `collection.anki2`.
        collection: Option<String>,
        /// Interval threshold in days. Defaults to the configured value, or 21.
        #[arg(long, value_parser = clap::value_parser!(u32).range(interval_range()))]
        interval: Option<u32>,
        /// Path to the config file. Defaults to `retirement.toml` next to the collection.
        #[arg(long)]
        config: Option<String>,
        /// Output format.
        #[arg(long, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
    },
    /// List deck ids and the names rows are grouped under.
    Decks {
        /// Path to the collection file, or to a directory containing `collection.anki2`.
        collection: Option<String>,
    },
    /// Print the table that classifies reviews into outcomes.
    Outcomes,
}

/// The accepted `--interval` values, in the form clap's ranged parser takes.
fn interval_range() -> RangeInclusive<i64> {
    i64::from(*INTERVAL_RANGE.start())..=i64::from(*INTERVAL_RANGE.end())
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Report {
            collection,
            interval,
            config,
            format,
        } => print_report(collection, interval, config, format),
        Command::Decks { collection } => list_decks(collection),
        Command::Outcomes => {
            list_outcomes();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report() {
        let cli = Command::try_parse_from([
            "retirement",
            "report",
            "/tmp/collection.anki2",
            "--interval",
            "90",
            "--format",
            "json",
        ])
        .unwrap();
        match cli {
            Command::Report {
                collection,
                interval,
                config,
                format,
            } => {
                assert_eq!(collection.as_deref(), Some("/tmp/collection.anki2"));
                assert_eq!(interval, Some(90));
                assert_eq!(config, None);
                assert!(matches!(format, ReportFormat::Json));
            }
            _ => panic!("expected the report command"),
        }
    }

    #[test]
    fn test_interval_out_of_range() {
        assert!(Command::try_parse_from(["retirement", "report", "--interval", "0"]).is_err());
        assert!(
            Command::try_parse_from(["retirement", "report", "--interval", "65537"]).is_err()
        );
    }

    #[test]
    fn test_interval_bounds_match_config() {
        let low = INTERVAL_RANGE.start().to_string();
        let high = INTERVAL_RANGE.end().to_string();
        for value in [low, high] {
            let cli =
                Command::try_parse_from(["retirement", "report", "--interval", value.as_str()]).unwrap();
            match cli {
                Command::Report { interval, .. } => {
                    assert_eq!(interval.map(|i| i.to_string()), Some(value.clone()))
                }
                _ => panic!("expected the report command"),
            }
        }
    }

    #[test]
    fn test_default_format_is_table() {
        let cli = Command::try_parse_from(["retirement", "report"]).unwrap();
        match cli {
            Command::Report { format, .. } => assert!(matches!(format, ReportFormat::Table)),
            _ => panic!("expected the report command"),
        }
    }
}
