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

//! Weights for module_dsc_engine.
//!
//! `c` is the number of registered collateral assets; every health factor check reads one
//! ledger entry, one price feed reference and one aggregator round per asset.

#![allow(unused_parens)]
#![allow(unused_imports)]
#![allow(clippy::unnecessary_cast)]

use frame_support::{
	traits::Get,
	weights::{constants::RocksDbWeight, Weight},
};
use sp_std::marker::PhantomData;

/// Weight functions needed for module_dsc_engine.
pub trait WeightInfo {
	fn deposit_collateral() -> Weight;
	fn deposit_collateral_and_mint_dsc(c: u32) -> Weight;
	fn redeem_collateral(c: u32) -> Weight;
	fn redeem_collateral_for_dsc(c: u32) -> Weight;
	fn mint_dsc(c: u32) -> Weight;
	fn burn_dsc() -> Weight;
	fn liquidate(c: u32) -> Weight;
}

/// Estimated weights for module_dsc_engine, not benchmarked. Replace with benchmark output
/// before deployment.
pub struct AcalaWeight<T>(PhantomData<T>);
impl<T: frame_system::Config> WeightInfo for AcalaWeight<T> {
	fn deposit_collateral() -> Weight {
		Weight::from_parts(58_420_000, 6196)
			.saturating_add(T::DbWeight::get().reads(6 as u64))
			.saturating_add(T::DbWeight::get().writes(5 as u64))
	}
	fn deposit_collateral_and_mint_dsc(c: u32) -> Weight {
		Weight::from_parts(96_310_000, 8752)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(T::DbWeight::get().reads(9 as u64))
			.saturating_add(T::DbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(T::DbWeight::get().writes(8 as u64))
	}
	fn redeem_collateral(c: u32) -> Weight {
		Weight::from_parts(61_870_000, 6196)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(T::DbWeight::get().reads(6 as u64))
			.saturating_add(T::DbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(T::DbWeight::get().writes(5 as u64))
	}
	fn redeem_collateral_for_dsc(c: u32) -> Weight {
		Weight::from_parts(103_550_000, 8752)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(T::DbWeight::get().reads(10 as u64))
			.saturating_add(T::DbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(T::DbWeight::get().writes(9 as u64))
	}
	fn mint_dsc(c: u32) -> Weight {
		Weight::from_parts(39_960_000, 3593)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(T::DbWeight::get().reads(4 as u64))
			.saturating_add(T::DbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(T::DbWeight::get().writes(4 as u64))
	}
	fn burn_dsc() -> Weight {
		Weight::from_parts(47_180_000, 6196)
			.saturating_add(T::DbWeight::get().reads(5 as u64))
			.saturating_add(T::DbWeight::get().writes(5 as u64))
	}
	fn liquidate(c: u32) -> Weight {
		Weight::from_parts(142_730_000, 11308)
			.saturating_add(Weight::from_parts(42_600_000, 7770).saturating_mul(c as u64))
			.saturating_add(T::DbWeight::get().reads(12 as u64))
			.saturating_add(T::DbWeight::get().reads((9 as u64).saturating_mul(c as u64)))
			.saturating_add(T::DbWeight::get().writes(10 as u64))
	}
}

// For backwards compatibility and tests
impl WeightInfo for () {
	fn deposit_collateral() -> Weight {
		Weight::from_parts(58_420_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(6 as u64))
			.saturating_add(RocksDbWeight::get().writes(5 as u64))
	}
	fn deposit_collateral_and_mint_dsc(c: u32) -> Weight {
		Weight::from_parts(96_310_000, 8752)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(RocksDbWeight::get().reads(9 as u64))
			.saturating_add(RocksDbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(RocksDbWeight::get().writes(8 as u64))
	}
	fn redeem_collateral(c: u32) -> Weight {
		Weight::from_parts(61_870_000, 6196)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(RocksDbWeight::get().reads(6 as u64))
			.saturating_add(RocksDbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(RocksDbWeight::get().writes(5 as u64))
	}
	fn redeem_collateral_for_dsc(c: u32) -> Weight {
		Weight::from_parts(103_550_000, 8752)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(RocksDbWeight::get().reads(10 as u64))
			.saturating_add(RocksDbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(RocksDbWeight::get().writes(9 as u64))
	}
	fn mint_dsc(c: u32) -> Weight {
		Weight::from_parts(39_960_000, 3593)
			.saturating_add(Weight::from_parts(14_200_000, 2590).saturating_mul(c as u64))
			.saturating_add(RocksDbWeight::get().reads(4 as u64))
			.saturating_add(RocksDbWeight::get().reads((3 as u64).saturating_mul(c as u64)))
			.saturating_add(RocksDbWeight::get().writes(4 as u64))
	}
	fn burn_dsc() -> Weight {
		Weight::from_parts(47_180_000, 6196)
			.saturating_add(RocksDbWeight::get().reads(5 as u64))
			.saturating_add(RocksDbWeight::get().writes(5 as u64))
	}
	fn liquidate(c: u32) -> Weight {
		Weight::from_parts(142_730_000, 11308)
			.saturating_add(Weight::from_parts(42_600_000, 7770).saturating_mul(c as u64))
			.saturating_add(RocksDbWeight::get().reads(12 as u64))
			.saturating_add(RocksDbWeight::get().reads((9 as u64).saturating_mul(c as u64)))
			.saturating_add(RocksDbWeight::get().writes(10 as u64))
	}
}
