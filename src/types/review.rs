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

use crate::types::card::CardId;
use crate::types::timestamp::Timestamp;

/// One entry of the review log. Review events are never modified.
#[derive(Clone, Debug)]
pub struct ReviewEvent {
    pub reviewed_at: Timestamp,
    pub card_id: CardId,
    /// The interval the card had before this review.
    pub last_interval: i64,
    /// The raw queue-kind code (`revlog.type`).
    pub kind: i64,
    /// The raw button code (`revlog.ease`).
    pub ease: i64,
}
