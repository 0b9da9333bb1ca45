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

//! Price aggregator boundary.
//!
//! Aggregators report rounds: an 8-decimal `answer` plus the bookkeeping needed to tell
//! whether the round is complete and how old it is. Consumers never cache a round; they ask
//! for the latest one and reject it with [`OracleError`] when it cannot be trusted.

use parity_scale_codec::{Decode, Encode, MaxEncodedLen};
use scale_info::TypeInfo;
use sp_runtime::RuntimeDebug;

/// Latest reading reported by a price aggregator. Timestamps are unix seconds.
#[derive(Encode, Decode, Clone, Copy, PartialEq, Eq, Default, RuntimeDebug, TypeInfo, MaxEncodedLen)]
pub struct RoundData {
	pub round_id: u128,
	pub answer: i128,
	pub started_at: u64,
	pub updated_at: u64,
	pub answered_in_round: u128,
}

#[derive(Clone, Copy, PartialEq, Eq, RuntimeDebug)]
pub enum OracleError {
	/// The aggregator has nothing for this feed.
	Unavailable,
	/// The round was never written.
	NotUpdated,
	/// The answer was carried over from an earlier round.
	StaleRound,
	/// The round is older than the allowed timeout.
	Expired,
	/// The round claims to be written after `now`.
	FromFuture,
}

impl RoundData {
	/// Checks the round against the clock. `now - updated_at == timeout` is still fresh.
	pub fn ensure_fresh(&self, now: u64, timeout: u64) -> Result<(), OracleError> {
		if self.updated_at == 0 {
			return Err(OracleError::NotUpdated);
		}
		if self.answered_in_round < self.round_id {
			return Err(OracleError::StaleRound);
		}
		let age = now.checked_sub(self.updated_at).ok_or(OracleError::FromFuture)?;
		if age > timeout {
			return Err(OracleError::Expired);
		}
		Ok(())
	}
}

pub trait PriceFeed<FeedId> {
	fn latest_round_data(feed_id: &FeedId) -> Option<RoundData>;

	/// Latest round of `feed_id`, only if it passes [`RoundData::ensure_fresh`].
	fn fresh_round_data(feed_id: &FeedId, now: u64, timeout: u64) -> Result<RoundData, OracleError> {
		let round = Self::latest_round_data(feed_id).ok_or(OracleError::Unavailable)?;
		round.ensure_fresh(now, timeout)?;
		Ok(round)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const TIMEOUT: u64 = 3 * 60 * 60;

	fn round(updated_at: u64) -> RoundData {
		RoundData {
			round_id: 7,
			answer: 2_000_00000000,
			started_at: updated_at,
			updated_at,
			answered_in_round: 7,
		}
	}

	#[test]
	fn fresh_round_is_accepted() {
		assert_eq!(round(1_000).ensure_fresh(1_000, TIMEOUT), Ok(()));
		assert_eq!(round(1_000).ensure_fresh(1_000 + TIMEOUT, TIMEOUT), Ok(()));
	}

	#[test]
	fn expired_round_is_rejected() {
		assert_eq!(
			round(1_000).ensure_fresh(1_000 + TIMEOUT + 1, TIMEOUT),
			Err(OracleError::Expired)
		);
		assert_eq!(
			round(1_000).ensure_fresh(1_000 + 4 * 60 * 60, TIMEOUT),
			Err(OracleError::Expired)
		);
	}

	#[test]
	fn unwritten_round_is_rejected() {
		assert_eq!(round(0).ensure_fresh(0, TIMEOUT), Err(OracleError::NotUpdated));
	}

	#[test]
	fn carried_over_answer_is_rejected() {
		let mut data = round(1_000);
		data.answered_in_round = 6;
		assert_eq!(data.ensure_fresh(1_000, TIMEOUT), Err(OracleError::StaleRound));

		data.answered_in_round = 8;
		assert_eq!(data.ensure_fresh(1_000, TIMEOUT), Ok(()));
	}

	#[test]
	fn round_from_the_future_is_rejected() {
		assert_eq!(round(1_001).ensure_fresh(1_000, TIMEOUT), Err(OracleError::FromFuture));
	}

	struct OneFeed;
	impl PriceFeed<u32> for OneFeed {
		fn latest_round_data(feed_id: &u32) -> Option<RoundData> {
			(*feed_id == 1).then(|| round(500))
		}
	}

	#[test]
	fn fresh_round_data_works() {
		assert_eq!(OneFeed::fresh_round_data(&1, 600, TIMEOUT), Ok(round(500)));
		assert_eq!(
			OneFeed::fresh_round_data(&2, 600, TIMEOUT),
			Err(OracleError::Unavailable)
		);
		assert_eq!(
			OneFeed::fresh_round_data(&1, 500 + TIMEOUT + 1, TIMEOUT),
			Err(OracleError::Expired)
		);
	}
}
