// This file is part of Acala.

// Copyright (C) 2020-2024 Acala Foundation.
// SPDX-License-Identifier: GPL-3.0-or-later WITH Classpath-exception-2.0

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

use crate::{PriceFeed, RoundData};
use parity_scale_codec::Encode;
use std::{cell::RefCell, collections::BTreeMap};

thread_local! {
	static ROUNDS: RefCell<BTreeMap<Vec<u8>, RoundData>> = RefCell::new(BTreeMap::new());
}

/// In-memory aggregator. Every `update_answer` opens a new, complete round.
pub struct MockAggregator;

impl MockAggregator {
	pub fn update_answer<FeedId: Encode>(feed_id: &FeedId, answer: i128, updated_at: u64) {
		ROUNDS.with(|v| {
			let mut rounds = v.borrow_mut();
			let round = rounds.entry(feed_id.encode()).or_default();
			round.round_id += 1;
			round.answer = answer;
			round.started_at = updated_at;
			round.updated_at = updated_at;
			round.answered_in_round = round.round_id;
		});
	}

	pub fn set_round_data<FeedId: Encode>(feed_id: &FeedId, round: RoundData) {
		ROUNDS.with(|v| v.borrow_mut().insert(feed_id.encode(), round));
	}

	pub fn remove<FeedId: Encode>(feed_id: &FeedId) {
		ROUNDS.with(|v| v.borrow_mut().remove(&feed_id.encode()));
	}

	pub fn reset() {
		ROUNDS.with(|v| v.borrow_mut().clear());
	}
}

impl<FeedId: Encode> PriceFeed<FeedId> for MockAggregator {
	fn latest_round_data(feed_id: &FeedId) -> Option<RoundData> {
		ROUNDS.with(|v| v.borrow().get(&feed_id.encode()).copied())
	}
}
