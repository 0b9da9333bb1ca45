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

//! Mocks for the dsc engine module.

#![cfg(test)]

use super::*;
use crate as dsc_engine;
use frame_support::{
	construct_runtime, parameter_types,
	traits::{ConstU32, ConstU64, Everything, Nothing},
};
use module_support::{mocks::MockAggregator, RoundData};
use orml_traits::parameter_type_with_key;
use sp_core::H256;
use sp_runtime::{
	traits::{BlakeTwo256, IdentityLookup},
	BuildStorage,
};

pub type AccountId = u128;
pub type CurrencyId = u32;
pub type FeedId = u32;

pub const ALICE: AccountId = 1;
pub const BOB: AccountId = 2;
pub const CAROL: AccountId = 3;

pub const DSC: CurrencyId = 0;
pub const WETH: CurrencyId = 1;
pub const WBTC: CurrencyId = 2;
pub const WDOT: CurrencyId = 3;

pub const ETH_USD_FEED: FeedId = 10;
pub const BTC_USD_FEED: FeedId = 20;

/// 2000 USD with 8 decimals.
pub const ETH_USD_PRICE: i128 = 2_000_00000000;
/// 30000 USD with 8 decimals.
pub const BTC_USD_PRICE: i128 = 30_000_00000000;

/// 2024-01-01T00:00:00Z, in milliseconds.
pub const GENESIS_MOMENT: u64 = 1_704_067_200_000;

pub fn dollar(amount: Balance) -> Balance {
	amount.saturating_mul(PRECISION)
}

impl frame_system::Config for Runtime {
	type BaseCallFilter = Everything;
	type BlockWeights = ();
	type BlockLength = ();
	type DbWeight = ();
	type RuntimeOrigin = RuntimeOrigin;
	type RuntimeCall = RuntimeCall;
	type Nonce = u64;
	type Hash = H256;
	type Hashing = BlakeTwo256;
	type AccountId = AccountId;
	type Lookup = IdentityLookup<Self::AccountId>;
	type Block = Block;
	type RuntimeEvent = RuntimeEvent;
	type BlockHashCount = ConstU64<250>;
	type Version = ();
	type PalletInfo = PalletInfo;
	type AccountData = ();
	type OnNewAccount = ();
	type OnKilledAccount = ();
	type SystemWeightInfo = ();
	type SS58Prefix = ();
	type OnSetCode = ();
	type MaxConsumers = ConstU32<16>;
}

impl pallet_timestamp::Config for Runtime {
	type Moment = u64;
	type OnTimestampSet = ();
	type MinimumPeriod = ConstU64<1000>;
	type WeightInfo = ();
}

parameter_type_with_key! {
	pub ExistentialDeposits: |_currency_id: CurrencyId| -> Balance {
		Default::default()
	};
}

impl orml_tokens::Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type Balance = Balance;
	type Amount = Amount;
	type CurrencyId = CurrencyId;
	type WeightInfo = ();
	type ExistentialDeposits = ExistentialDeposits;
	type CurrencyHooks = ();
	type MaxLocks = ();
	type MaxReserves = ();
	type ReserveIdentifier = [u8; 8];
	type DustRemovalWhitelist = Nothing;
}

parameter_types! {
	pub const GetStableCurrencyId: CurrencyId = DSC;
	pub const DSCEnginePalletId: PalletId = PalletId(*b"aca/dsce");
	pub LiquidationThreshold: Ratio = Ratio::saturating_from_rational(50, LIQUIDATION_PRECISION);
	pub LiquidationBonus: Rate = Rate::saturating_from_rational(10, LIQUIDATION_PRECISION);
	pub MinimumHealthFactor: HealthFactor = HealthFactor::one();

	pub static ReenterOnPriceQuery: bool = false;
	pub static ReentryResult: Option<DispatchResult> = None;
}

/// Serves `MockAggregator` rounds. When `ReenterOnPriceQuery` is set, the next query first
/// calls back into the engine and records the outcome in `ReentryResult`.
pub struct ReentrantAggregator;
impl PriceFeed<FeedId> for ReentrantAggregator {
	fn latest_round_data(feed_id: &FeedId) -> Option<RoundData> {
		if ReenterOnPriceQuery::get() {
			ReenterOnPriceQuery::set(false);
			let result = DSCEngine::deposit_collateral(RuntimeOrigin::signed(CAROL), WETH, dollar(1));
			ReentryResult::set(Some(result));
		}
		<MockAggregator as PriceFeed<FeedId>>::latest_round_data(feed_id)
	}
}

impl Config for Runtime {
	type RuntimeEvent = RuntimeEvent;
	type CurrencyId = CurrencyId;
	type Currency = Tokens;
	type GetStableCurrencyId = GetStableCurrencyId;
	type FeedId = FeedId;
	type PriceFeed = ReentrantAggregator;
	type UnixTime = Timestamp;
	type PriceTimeout = ConstU64<10800>;
	type LiquidationThreshold = LiquidationThreshold;
	type LiquidationBonus = LiquidationBonus;
	type MinimumHealthFactor = MinimumHealthFactor;
	type MaxCollaterals = ConstU32<2>;
	type PalletId = DSCEnginePalletId;
	type WeightInfo = ();
}

type Block = frame_system::mocking::MockBlock<Runtime>;

construct_runtime!(
	pub enum Runtime {
		System: frame_system,
		Timestamp: pallet_timestamp,
		Tokens: orml_tokens,
		DSCEngine: dsc_engine,
	}
);

/// Unix seconds of the current mock time.
pub fn now() -> u64 {
	<Timestamp as UnixTime>::now().as_secs()
}

pub fn advance_time(secs: u64) {
	Timestamp::set_timestamp(pallet_timestamp::Now::<Runtime>::get() + secs * 1000);
}

/// Publishes a new round for `feed_id`, written now.
pub fn set_price(feed_id: FeedId, answer: i128) {
	MockAggregator::update_answer(&feed_id, answer, now());
}

pub fn set_round_data(feed_id: FeedId, round: RoundData) {
	MockAggregator::set_round_data(&feed_id, round);
}

pub struct ExtBuilder {
	balances: Vec<(AccountId, CurrencyId, Balance)>,
	collaterals: Vec<(CurrencyId, FeedId)>,
}

impl Default for ExtBuilder {
	fn default() -> Self {
		Self {
			balances: vec![
				(ALICE, WETH, dollar(100)),
				(ALICE, WBTC, dollar(10)),
				(BOB, WETH, dollar(100)),
				(BOB, WBTC, dollar(10)),
				(CAROL, WETH, dollar(100)),
				(ALICE, WDOT, dollar(100)),
			],
			collaterals: vec![(WETH, ETH_USD_FEED), (WBTC, BTC_USD_FEED)],
		}
	}
}

impl ExtBuilder {
	pub fn balances(mut self, balances: Vec<(AccountId, CurrencyId, Balance)>) -> Self {
		self.balances = balances;
		self
	}

	pub fn collaterals(mut self, collaterals: Vec<(CurrencyId, FeedId)>) -> Self {
		self.collaterals = collaterals;
		self
	}

	pub fn build(self) -> sp_io::TestExternalities {
		let mut t = frame_system::GenesisConfig::<Runtime>::default()
			.build_storage()
			.unwrap();

		orml_tokens::GenesisConfig::<Runtime> {
			balances: self.balances,
		}
		.assimilate_storage(&mut t)
		.unwrap();

		dsc_engine::GenesisConfig::<Runtime> {
			collaterals: self.collaterals,
		}
		.assimilate_storage(&mut t)
		.unwrap();

		let mut ext = sp_io::TestExternalities::new(t);
		ext.execute_with(|| {
			System::set_block_number(1);
			Timestamp::set_timestamp(GENESIS_MOMENT);
			MockAggregator::reset();
			set_price(ETH_USD_FEED, ETH_USD_PRICE);
			set_price(BTC_USD_FEED, BTC_USD_PRICE);
		});
		ext
	}
}
