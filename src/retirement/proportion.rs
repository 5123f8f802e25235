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

use std::cmp::Ordering;
use std::fmt::Display;
use std::fmt::Formatter;

use serde::Serialize;

/// Passed reviews over passed plus failed reviews. Undefined when a deck
/// has neither, which is not the same as a deck that always failed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Proportion {
    Defined { passed: usize, total: usize },
    Undefined,
}

impl Proportion {
    pub fn new(passed: usize, failed: usize) -> Self {
        match passed + failed {
            0 => Proportion::Undefined,
            total => Proportion::Defined { passed, total },
        }
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Proportion::Defined { passed, total } => Some(passed as f64 / total as f64),
            Proportion::Undefined => None,
        }
    }

    /// Total order used to sort report rows: ascending by ratio, undefined
    /// proportions last. Ratios are compared exactly, so 1/2 and 2/4 are
    /// equal.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (*self, *other) {
            (
                Proportion::Defined {
                    passed: p1,
                    total: t1,
                },
                Proportion::Defined {
                    passed: p2,
                    total: t2,
                },
            ) => (p1 as u128 * t2 as u128).cmp(&(p2 as u128 * t1 as u128)),
            (Proportion::Defined { .. }, Proportion::Undefined) => Ordering::Less,
            (Proportion::Undefined, Proportion::Defined { .. }) => Ordering::Greater,
            (Proportion::Undefined, Proportion::Undefined) => Ordering::Equal,
        }
    }
}

impl Display for Proportion {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.value() {
            Some(value) => write!(f, "{value:.2}"),
            None => write!(f, "n/a"),
        }
    }
}

/// Serialized as a two-decimal string, or `null` when undefined.
impl Serialize for Proportion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Proportion::Defined { .. } => serializer.collect_str(self),
            Proportion::Undefined => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_denominator_is_undefined() {
        assert_eq!(Proportion::new(0, 0), Proportion::Undefined);
        assert_eq!(Proportion::new(0, 0).value(), None);
    }

    #[test]
    fn test_always_failed_is_zero() {
        let p = Proportion::new(0, 3);
        assert_eq!(p.value(), Some(0.0));
        assert_eq!(p.to_string(), "0.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Proportion::new(4, 2).to_string(), "0.67");
        assert_eq!(Proportion::new(1, 0).to_string(), "1.00");
        assert_eq!(Proportion::Undefined.to_string(), "n/a");
    }

    #[test]
    fn test_ordering() {
        let low = Proportion::new(1, 3);
        let half = Proportion::new(1, 1);
        let also_half = Proportion::new(2, 2);
        let high = Proportion::new(9, 1);
        assert_eq!(low.compare(&half), Ordering::Less);
        assert_eq!(half.compare(&also_half), Ordering::Equal);
        assert_eq!(high.compare(&half), Ordering::Greater);
        assert_eq!(high.compare(&Proportion::Undefined), Ordering::Less);
        assert_eq!(Proportion::Undefined.compare(&low), Ordering::Greater);
        assert_eq!(
            Proportion::Undefined.compare(&Proportion::Undefined),
            Ordering::Equal
        );
    }

    #[test]
    fn test_serialize() {
        assert_eq!(
            serde_json::to_string(&Proportion::new(4, 2)).unwrap(),
            "\"0.67\""
        );
        assert_eq!(
            serde_json::to_string(&Proportion::Undefined).unwrap(),
            "null"
        );
    }
}
