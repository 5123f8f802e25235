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

use std::fs::read_to_string;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;

/// The file name of the optional config, looked up next to the collection.
pub const CONFIG_FILE: &str = "retirement.toml";

pub const DEFAULT_INTERVAL: u32 = 21;

/// Accepted interval thresholds, in days.
pub const INTERVAL_RANGE: RangeInclusive<u32> = 1..=65536;

#[derive(Deserialize, Debug, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

#[derive(Deserialize, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Threshold in days past which a card is considered for retirement.
    #[serde(default = "default_interval")]
    pub interval: u32,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            interval: DEFAULT_INTERVAL,
        }
    }
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

impl Config {
    /// Load the config at `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults.", path.display());
            return Ok(Self::default());
        }
        let content = read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        if !INTERVAL_RANGE.contains(&config.defaults.interval) {
            return fail(format!(
                "configured interval {} is outside {}..={} days.",
                config.defaults.interval,
                INTERVAL_RANGE.start(),
                INTERVAL_RANGE.end()
            ));
        }
        log::debug!("Loaded config from {}.", path.display());
        Ok(config)
    }

    /// The threshold to use: the command-line value if given, otherwise the
    /// configured default.
    pub fn interval(&self, flag: Option<u32>) -> u32 {
        flag.unwrap_or(self.defaults.interval)
    }
}
