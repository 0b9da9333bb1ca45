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

//! # DSC Engine Module
//!
//! ## Overview
//!
//! The engine behind the dollar-pegged stable currency (DSC). Users lock approved collateral
//! assets in the engine account and mint DSC against them. A position stays open while its
//! health factor, the threshold-adjusted collateral value divided by minted debt, is at least
//! `MinimumHealthFactor`. Positions below that can be partially repaid by anyone, who receives
//! the equivalent collateral plus `LiquidationBonus` in return.
//!
//! Every USD figure is 18-decimal fixed point. Collateral is valued with the latest aggregator
//! round of the asset's feed, which must be fresh (see [`module_support::RoundData::ensure_fresh`]).
//!
//! All mutating operations are serialized behind a reentrancy lock and run inside a storage
//! transaction, so a failing transfer or mint leaves no trace in the ledgers.

#![cfg_attr(not(feature = "std"), no_std)]
#![allow(clippy::unused_unit)]

use frame_support::{pallet_prelude::*, storage::with_transaction, traits::UnixTime, PalletId};
use frame_system::pallet_prelude::*;
use module_support::{Amount, Balance, HealthFactor, OracleError, Price, PriceFeed, Rate, Ratio};
use orml_traits::{MultiCurrency, MultiCurrencyExtended};
use sp_arithmetic::{helpers_128bit::multiply_by_rational_with_rounding, Rounding};
use sp_runtime::{
	traits::{AccountIdConversion, Bounded, One, StaticLookup, Zero},
	ArithmeticError, FixedPointNumber, TransactionOutcome,
};
use sp_std::prelude::*;

mod mock;
pub mod weights;

pub use module::*;
pub use weights::WeightInfo;

/// Scale of every USD amount, price and health factor.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;
/// Upscales 8-decimal feed answers to `PRECISION`.
pub const ADDITIONAL_FEED_PRECISION: u128 = 10_000_000_000;
/// Denominator of the percentages the engine is usually configured with.
pub const LIQUIDATION_PRECISION: u128 = 100;

const LOG_TARGET: &str = "dsc-engine";

type AccountIdLookupOf<T> = <<T as frame_system::Config>::Lookup as StaticLookup>::Source;

#[frame_support::pallet]
pub mod module {
	use super::*;

	#[pallet::config]
	pub trait Config: frame_system::Config {
		type RuntimeEvent: From<Event<Self>> + IsType<<Self as frame_system::Config>::RuntimeEvent>;

		type CurrencyId: Parameter + Member + Copy + MaybeSerializeDeserialize + Ord + MaxEncodedLen;

		/// Custodies collateral and issues the stable currency.
		type Currency: MultiCurrencyExtended<
			Self::AccountId,
			CurrencyId = Self::CurrencyId,
			Balance = Balance,
			Amount = Amount,
		>;

		/// The stable currency id minted against collateral.
		#[pallet::constant]
		type GetStableCurrencyId: Get<Self::CurrencyId>;

		/// Reference to an aggregator feed.
		type FeedId: Parameter + Member + MaybeSerializeDeserialize + MaxEncodedLen;

		type PriceFeed: PriceFeed<Self::FeedId>;

		type UnixTime: UnixTime;

		/// Maximum age of a price round, in seconds.
		#[pallet::constant]
		type PriceTimeout: Get<u64>;

		/// Share of the collateral value that backs debt.
		#[pallet::constant]
		type LiquidationThreshold: Get<Ratio>;

		/// Extra collateral paid to liquidators on top of the repaid value.
		#[pallet::constant]
		type LiquidationBonus: Get<Rate>;

		#[pallet::constant]
		type MinimumHealthFactor: Get<HealthFactor>;

		#[pallet::constant]
		type MaxCollaterals: Get<u32>;

		/// The engine's module id, keep all collaterals.
		#[pallet::constant]
		type PalletId: Get<PalletId>;

		/// Weight information for the extrinsics in this module.
		type WeightInfo: WeightInfo;
	}

	#[pallet::error]
	pub enum Error<T> {
		/// Amount is zero.
		NeedsMoreThanZero,
		/// The currency is not a registered collateral.
		TokenNotAllowed,
		/// Moving funds in or out of the engine failed.
		TransferFailed,
		/// Issuing the stable currency failed.
		MintFailed,
		/// The position would end below the minimum health factor.
		BreaksHealthFactor,
		/// The position is healthy and cannot be liquidated.
		HealthFactorOk,
		/// The liquidation did not raise the health factor of the position.
		HealthFactorNotImproved,
		/// The latest price round is unfinished, carried over or too old.
		StalePrice,
		/// The aggregator returned a price that cannot be used.
		InvalidPrice,
		/// The aggregator has no round for the feed.
		PriceFeedUnavailable,
		CollateralTooLow,
		CollateralOverflow,
		DebtTooLow,
		DebtOverflow,
		AmountConvertFailed,
		/// An engine operation is already in progress.
		ReentrantCall,
	}

	#[pallet::event]
	#[pallet::generate_deposit(pub(crate) fn deposit_event)]
	pub enum Event<T: Config> {
		CollateralDeposited {
			who: T::AccountId,
			currency_id: T::CurrencyId,
			amount: Balance,
		},
		CollateralRedeemed {
			from: T::AccountId,
			to: T::AccountId,
			currency_id: T::CurrencyId,
			amount: Balance,
		},
		DscMinted {
			who: T::AccountId,
			amount: Balance,
		},
		DscBurned {
			on_behalf_of: T::AccountId,
			from: T::AccountId,
			amount: Balance,
		},
		Liquidated {
			liquidator: T::AccountId,
			who: T::AccountId,
			currency_id: T::CurrencyId,
			collateral_seized: Balance,
			debt_covered: Balance,
		},
	}

	/// Registered collateral currencies, in registration order.
	///
	/// CollateralTokens: BoundedVec<CurrencyId>
	#[pallet::storage]
	#[pallet::getter(fn collateral_tokens)]
	pub type CollateralTokens<T: Config> = StorageValue<_, BoundedVec<T::CurrencyId, T::MaxCollaterals>, ValueQuery>;

	/// Aggregator feed of each registered collateral.
	///
	/// PriceFeeds: map CurrencyId => Option<FeedId>
	#[pallet::storage]
	#[pallet::getter(fn collateral_price_feed)]
	pub type PriceFeeds<T: Config> = StorageMap<_, Twox64Concat, T::CurrencyId, T::FeedId, OptionQuery>;

	/// Collateral deposited by each account.
	///
	/// CollateralDeposited: double_map AccountId, CurrencyId => Balance
	#[pallet::storage]
	#[pallet::getter(fn collateral_balance_of)]
	pub type CollateralDeposited<T: Config> =
		StorageDoubleMap<_, Twox64Concat, T::AccountId, Twox64Concat, T::CurrencyId, Balance, ValueQuery>;

	/// Stable currency minted by each account and not yet repaid.
	///
	/// MintedDebt: map AccountId => Balance
	#[pallet::storage]
	#[pallet::getter(fn debt_of)]
	pub type MintedDebt<T: Config> = StorageMap<_, Twox64Concat, T::AccountId, Balance, ValueQuery>;

	/// TotalCollateral: map CurrencyId => Balance
	#[pallet::storage]
	#[pallet::getter(fn total_collateral)]
	pub type TotalCollateral<T: Config> = StorageMap<_, Twox64Concat, T::CurrencyId, Balance, ValueQuery>;

	#[pallet::storage]
	#[pallet::getter(fn total_debt)]
	pub type TotalDebt<T: Config> = StorageValue<_, Balance, ValueQuery>;

	#[pallet::storage]
	pub type EngineLocked<T: Config> = StorageValue<_, bool, ValueQuery>;

	#[pallet::genesis_config]
	#[derive(frame_support::DefaultNoBound)]
	pub struct GenesisConfig<T: Config> {
		/// `(collateral currency, price feed)` pairs.
		pub collaterals: Vec<(T::CurrencyId, T::FeedId)>,
	}

	#[pallet::genesis_build]
	impl<T: Config> BuildGenesisConfig for GenesisConfig<T> {
		fn build(&self) {
			let mut tokens: Vec<T::CurrencyId> = Vec::with_capacity(self.collaterals.len());
			for (currency_id, feed_id) in self.collaterals.iter() {
				assert!(
					*currency_id != T::GetStableCurrencyId::get(),
					"stable currency cannot be a collateral"
				);
				assert!(!tokens.contains(currency_id), "duplicate collateral asset");
				tokens.push(*currency_id);
				PriceFeeds::<T>::insert(currency_id, feed_id);
			}

			let tokens: BoundedVec<T::CurrencyId, T::MaxCollaterals> =
				tokens.try_into().expect("collateral assets exceed MaxCollaterals");
			CollateralTokens::<T>::put(tokens);
		}
	}

	#[pallet::pallet]
	pub struct Pallet<T>(_);

	#[pallet::hooks]
	impl<T: Config> Hooks<BlockNumberFor<T>> for Pallet<T> {
		fn integrity_test() {
			let threshold = T::LiquidationThreshold::get();
			assert!(
				!threshold.is_zero() && threshold <= Ratio::one(),
				"LiquidationThreshold must be within (0, 1]"
			);
			assert!(
				!T::MinimumHealthFactor::get().is_zero(),
				"MinimumHealthFactor must not be zero"
			);
			assert!(T::PriceTimeout::get() > 0, "PriceTimeout must not be zero");
			assert!(T::MaxCollaterals::get() > 0, "MaxCollaterals must not be zero");
		}

		#[cfg(feature = "try-runtime")]
		fn try_state(_n: BlockNumberFor<T>) -> Result<(), sp_runtime::TryRuntimeError> {
			Self::do_try_state()
		}
	}

	#[pallet::call]
	impl<T: Config> Pallet<T> {
		/// Lock `amount` of collateral `currency_id` in the engine.
		#[pallet::call_index(0)]
		#[pallet::weight(<T as Config>::WeightInfo::deposit_collateral())]
		pub fn deposit_collateral(
			origin: OriginFor<T>,
			currency_id: T::CurrencyId,
			#[pallet::compact] amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::guarded(|| Self::do_deposit_collateral(&who, currency_id, amount))
		}

		/// Lock collateral and mint stable currency in one step.
		#[pallet::call_index(1)]
		#[pallet::weight(<T as Config>::WeightInfo::deposit_collateral_and_mint_dsc(T::MaxCollaterals::get()))]
		pub fn deposit_collateral_and_mint_dsc(
			origin: OriginFor<T>,
			currency_id: T::CurrencyId,
			#[pallet::compact] collateral_amount: Balance,
			#[pallet::compact] mint_amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::guarded(|| {
				Self::do_deposit_collateral(&who, currency_id, collateral_amount)?;
				Self::do_mint_dsc(&who, mint_amount)
			})
		}

		/// Take back `amount` of collateral. The position must stay healthy.
		#[pallet::call_index(2)]
		#[pallet::weight(<T as Config>::WeightInfo::redeem_collateral(T::MaxCollaterals::get()))]
		pub fn redeem_collateral(
			origin: OriginFor<T>,
			currency_id: T::CurrencyId,
			#[pallet::compact] amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::guarded(|| Self::do_redeem_collateral(&who, currency_id, amount))
		}

		/// Repay `burn_amount` of debt, then take back `collateral_amount` of collateral.
		#[pallet::call_index(3)]
		#[pallet::weight(<T as Config>::WeightInfo::redeem_collateral_for_dsc(T::MaxCollaterals::get()))]
		pub fn redeem_collateral_for_dsc(
			origin: OriginFor<T>,
			currency_id: T::CurrencyId,
			#[pallet::compact] collateral_amount: Balance,
			#[pallet::compact] burn_amount: Balance,
		) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::guarded(|| {
				Self::do_burn_dsc(&who, burn_amount)?;
				Self::do_redeem_collateral(&who, currency_id, collateral_amount)
			})
		}

		/// Mint `amount` of stable currency against the caller's collateral.
		#[pallet::call_index(4)]
		#[pallet::weight(<T as Config>::WeightInfo::mint_dsc(T::MaxCollaterals::get()))]
		pub fn mint_dsc(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::guarded(|| Self::do_mint_dsc(&who, amount))
		}

		/// Repay `amount` of the caller's debt.
		#[pallet::call_index(5)]
		#[pallet::weight(<T as Config>::WeightInfo::burn_dsc())]
		pub fn burn_dsc(origin: OriginFor<T>, #[pallet::compact] amount: Balance) -> DispatchResult {
			let who = ensure_signed(origin)?;
			Self::guarded(|| Self::do_burn_dsc(&who, amount))
		}

		/// Repay `debt_to_cover` of an unhealthy position of `who` and receive the same value of
		/// collateral `currency_id` plus the liquidation bonus.
		#[pallet::call_index(6)]
		#[pallet::weight(<T as Config>::WeightInfo::liquidate(T::MaxCollaterals::get()))]
		pub fn liquidate(
			origin: OriginFor<T>,
			currency_id: T::CurrencyId,
			who: AccountIdLookupOf<T>,
			#[pallet::compact] debt_to_cover: Balance,
		) -> DispatchResult {
			let liquidator = ensure_signed(origin)?;
			let who = T::Lookup::lookup(who)?;
			Self::guarded(|| Self::do_liquidate(&liquidator, currency_id, &who, debt_to_cover))
		}
	}
}

impl<T: Config> Pallet<T> {
	/// The engine account, custody of all collateral.
	pub fn account_id() -> T::AccountId {
		T::PalletId::get().into_account_truncating()
	}

	/// Runs `f` under the engine lock, in its own storage transaction.
	fn guarded<R>(f: impl FnOnce() -> Result<R, DispatchError>) -> Result<R, DispatchError> {
		ensure!(!EngineLocked::<T>::get(), Error::<T>::ReentrantCall);
		EngineLocked::<T>::put(true);

		let result = with_transaction(|| {
			let result = f();
			if result.is_ok() {
				TransactionOutcome::Commit(result)
			} else {
				TransactionOutcome::Rollback(result)
			}
		});

		EngineLocked::<T>::kill();
		result
	}

	fn ensure_allowed(currency_id: T::CurrencyId) -> DispatchResult {
		ensure!(
			PriceFeeds::<T>::contains_key(currency_id),
			Error::<T>::TokenNotAllowed
		);
		Ok(())
	}

	fn do_deposit_collateral(who: &T::AccountId, currency_id: T::CurrencyId, amount: Balance) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::NeedsMoreThanZero);
		Self::ensure_allowed(currency_id)?;

		CollateralDeposited::<T>::try_mutate(who, currency_id, |balance| -> DispatchResult {
			*balance = balance.checked_add(amount).ok_or(Error::<T>::CollateralOverflow)?;
			Ok(())
		})?;
		TotalCollateral::<T>::try_mutate(currency_id, |total| -> DispatchResult {
			*total = total.checked_add(amount).ok_or(Error::<T>::CollateralOverflow)?;
			Ok(())
		})?;

		Self::deposit_event(Event::CollateralDeposited {
			who: who.clone(),
			currency_id,
			amount,
		});

		T::Currency::transfer(currency_id, who, &Self::account_id(), amount).map_err(|e| {
			log::debug!(
				target: LOG_TARGET,
				"collateral deposit of {:?} {:?} from {:?} failed: {:?}",
				amount,
				currency_id,
				who,
				e,
			);
			Error::<T>::TransferFailed
		})?;
		Ok(())
	}

	fn do_redeem_collateral(who: &T::AccountId, currency_id: T::CurrencyId, amount: Balance) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::NeedsMoreThanZero);
		Self::ensure_allowed(currency_id)?;

		Self::redeem(currency_id, amount, who, who)?;
		Self::ensure_health_factor_is_safe(who)
	}

	fn do_mint_dsc(who: &T::AccountId, amount: Balance) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::NeedsMoreThanZero);

		MintedDebt::<T>::try_mutate(who, |debt| -> DispatchResult {
			*debt = debt.checked_add(amount).ok_or(Error::<T>::DebtOverflow)?;
			Ok(())
		})?;
		TotalDebt::<T>::try_mutate(|total| -> DispatchResult {
			*total = total.checked_add(amount).ok_or(Error::<T>::DebtOverflow)?;
			Ok(())
		})?;
		Self::ensure_health_factor_is_safe(who)?;

		Self::deposit_event(Event::DscMinted {
			who: who.clone(),
			amount,
		});

		T::Currency::deposit(T::GetStableCurrencyId::get(), who, amount).map_err(|e| {
			log::debug!(
				target: LOG_TARGET,
				"minting {:?} to {:?} failed: {:?}",
				amount,
				who,
				e,
			);
			Error::<T>::MintFailed
		})?;
		Ok(())
	}

	fn do_burn_dsc(who: &T::AccountId, amount: Balance) -> DispatchResult {
		ensure!(!amount.is_zero(), Error::<T>::NeedsMoreThanZero);
		Self::burn(amount, who, who)
	}

	fn do_liquidate(
		liquidator: &T::AccountId,
		currency_id: T::CurrencyId,
		who: &T::AccountId,
		debt_to_cover: Balance,
	) -> DispatchResult {
		ensure!(!debt_to_cover.is_zero(), Error::<T>::NeedsMoreThanZero);
		Self::ensure_allowed(currency_id)?;

		let starting_health_factor = Self::health_factor(who)?;
		ensure!(
			starting_health_factor < T::MinimumHealthFactor::get(),
			Error::<T>::HealthFactorOk
		);

		let covered = Self::token_amount_from_usd(currency_id, debt_to_cover)?;
		let bonus = T::LiquidationBonus::get().saturating_mul_int(covered);
		let collateral_seized = covered.checked_add(bonus).ok_or(ArithmeticError::Overflow)?;

		Self::redeem(currency_id, collateral_seized, who, liquidator)?;
		Self::burn(debt_to_cover, who, liquidator)?;

		let ending_health_factor = Self::health_factor(who)?;
		ensure!(
			ending_health_factor > starting_health_factor,
			Error::<T>::HealthFactorNotImproved
		);
		Self::ensure_health_factor_is_safe(liquidator)?;

		log::info!(
			target: LOG_TARGET,
			"{:?} liquidated {:?}: covered {:?} debt for {:?} of {:?}, health factor {:?} -> {:?}",
			liquidator,
			who,
			debt_to_cover,
			collateral_seized,
			currency_id,
			starting_health_factor,
			ending_health_factor,
		);

		Self::deposit_event(Event::Liquidated {
			liquidator: liquidator.clone(),
			who: who.clone(),
			currency_id,
			collateral_seized,
			debt_covered: debt_to_cover,
		});
		Ok(())
	}

	/// Moves `amount` of `from`'s deposited collateral out of the engine to `to`.
	fn redeem(currency_id: T::CurrencyId, amount: Balance, from: &T::AccountId, to: &T::AccountId) -> DispatchResult {
		CollateralDeposited::<T>::try_mutate_exists(from, currency_id, |maybe_balance| -> DispatchResult {
			let remaining = maybe_balance
				.unwrap_or_default()
				.checked_sub(amount)
				.ok_or(Error::<T>::CollateralTooLow)?;
			*maybe_balance = Some(remaining).filter(|b| !b.is_zero());
			Ok(())
		})?;
		TotalCollateral::<T>::try_mutate(currency_id, |total| -> DispatchResult {
			*total = total.checked_sub(amount).ok_or(Error::<T>::CollateralTooLow)?;
			Ok(())
		})?;

		Self::deposit_event(Event::CollateralRedeemed {
			from: from.clone(),
			to: to.clone(),
			currency_id,
			amount,
		});

		T::Currency::transfer(currency_id, &Self::account_id(), to, amount).map_err(|e| {
			log::debug!(
				target: LOG_TARGET,
				"collateral redeem of {:?} {:?} to {:?} failed: {:?}",
				amount,
				currency_id,
				to,
				e,
			);
			Error::<T>::TransferFailed
		})?;
		Ok(())
	}

	/// Repays `amount` of `on_behalf_of`'s debt with stable currency paid by `from`.
	fn burn(amount: Balance, on_behalf_of: &T::AccountId, from: &T::AccountId) -> DispatchResult {
		MintedDebt::<T>::try_mutate_exists(on_behalf_of, |maybe_debt| -> DispatchResult {
			let remaining = maybe_debt
				.unwrap_or_default()
				.checked_sub(amount)
				.ok_or(Error::<T>::DebtTooLow)?;
			*maybe_debt = Some(remaining).filter(|d| !d.is_zero());
			Ok(())
		})?;
		TotalDebt::<T>::try_mutate(|total| -> DispatchResult {
			*total = total.checked_sub(amount).ok_or(Error::<T>::DebtTooLow)?;
			Ok(())
		})?;

		Self::deposit_event(Event::DscBurned {
			on_behalf_of: on_behalf_of.clone(),
			from: from.clone(),
			amount,
		});

		let stable_currency_id = T::GetStableCurrencyId::get();
		let engine = Self::account_id();
		T::Currency::transfer(stable_currency_id, from, &engine, amount).map_err(|e| {
			log::debug!(
				target: LOG_TARGET,
				"pulling {:?} stable currency from {:?} failed: {:?}",
				amount,
				from,
				e,
			);
			Error::<T>::TransferFailed
		})?;
		let burned: Amount = amount.try_into().map_err(|_| Error::<T>::AmountConvertFailed)?;
		T::Currency::update_balance(stable_currency_id, &engine, -burned)?;
		Ok(())
	}

	/// Latest fresh price of a registered collateral, 18-decimal.
	fn price(currency_id: T::CurrencyId) -> Result<Price, DispatchError> {
		let feed_id = PriceFeeds::<T>::get(currency_id).ok_or(Error::<T>::TokenNotAllowed)?;
		let now = T::UnixTime::now().as_secs();
		let round = T::PriceFeed::fresh_round_data(&feed_id, now, T::PriceTimeout::get()).map_err(|e| {
			log::debug!(
				target: LOG_TARGET,
				"rejected price round of {:?} at {:?}: {:?}",
				currency_id,
				now,
				e,
			);
			match e {
				OracleError::Unavailable => Error::<T>::PriceFeedUnavailable,
				_ => Error::<T>::StalePrice,
			}
		})?;

		let answer = u128::try_from(round.answer).map_err(|_| Error::<T>::InvalidPrice)?;
		let inner = answer
			.checked_mul(ADDITIONAL_FEED_PRECISION)
			.ok_or(ArithmeticError::Overflow)?;
		Ok(Price::from_inner(inner))
	}

	/// USD value of `amount` of `currency_id`, rounded down.
	pub fn usd_value(currency_id: T::CurrencyId, amount: Balance) -> Result<Balance, DispatchError> {
		let price = Self::price(currency_id)?;
		multiply_by_rational_with_rounding(amount, price.into_inner(), PRECISION, Rounding::Down)
			.ok_or_else(|| ArithmeticError::Overflow.into())
	}

	/// Amount of `currency_id` worth `usd_amount`, rounded down.
	pub fn token_amount_from_usd(currency_id: T::CurrencyId, usd_amount: Balance) -> Result<Balance, DispatchError> {
		let price = Self::price(currency_id)?;
		ensure!(!price.is_zero(), Error::<T>::InvalidPrice);
		multiply_by_rational_with_rounding(usd_amount, PRECISION, price.into_inner(), Rounding::Down)
			.ok_or_else(|| ArithmeticError::Overflow.into())
	}

	/// USD value of everything `who` deposited. Every registered feed is checked, held or not.
	pub fn account_collateral_value(who: &T::AccountId) -> Result<Balance, DispatchError> {
		Self::collateral_tokens()
			.into_iter()
			.try_fold(Zero::zero(), |total: Balance, currency_id| {
				let value = Self::usd_value(currency_id, Self::collateral_balance_of(who, currency_id))?;
				total
					.checked_add(value)
					.ok_or_else(|| ArithmeticError::Overflow.into())
			})
	}

	/// `(minted debt, collateral value in USD)` of `who`.
	pub fn account_information(who: &T::AccountId) -> Result<(Balance, Balance), DispatchError> {
		Ok((Self::debt_of(who), Self::account_collateral_value(who)?))
	}

	pub fn health_factor(who: &T::AccountId) -> Result<HealthFactor, DispatchError> {
		let (total_debt, collateral_value) = Self::account_information(who)?;
		Ok(Self::calculate_health_factor(total_debt, collateral_value))
	}

	/// Threshold-adjusted `collateral_value / total_debt`. Saturates at the maximum, which is
	/// also the value for no debt.
	pub fn calculate_health_factor(total_debt: Balance, collateral_value: Balance) -> HealthFactor {
		if total_debt.is_zero() {
			return HealthFactor::max_value();
		}

		let adjusted_collateral = T::LiquidationThreshold::get().saturating_mul_int(collateral_value);
		multiply_by_rational_with_rounding(adjusted_collateral, PRECISION, total_debt, Rounding::Down)
			.map(HealthFactor::from_inner)
			.unwrap_or_else(HealthFactor::max_value)
	}

	fn ensure_health_factor_is_safe(who: &T::AccountId) -> DispatchResult {
		let health_factor = Self::health_factor(who)?;
		if health_factor < T::MinimumHealthFactor::get() {
			log::debug!(
				target: LOG_TARGET,
				"{:?} breaks health factor: {:?}",
				who,
				health_factor,
			);
			return Err(Error::<T>::BreaksHealthFactor.into());
		}
		Ok(())
	}

	/// USD value of all collateral in custody.
	pub fn protocol_collateral_value() -> Result<Balance, DispatchError> {
		Self::collateral_tokens()
			.into_iter()
			.try_fold(Zero::zero(), |total: Balance, currency_id| {
				let value = Self::usd_value(currency_id, Self::total_collateral(currency_id))?;
				total
					.checked_add(value)
					.ok_or_else(|| ArithmeticError::Overflow.into())
			})
	}

	pub fn stable_currency_id() -> T::CurrencyId {
		T::GetStableCurrencyId::get()
	}

	pub fn precision() -> u128 {
		PRECISION
	}

	pub fn additional_feed_precision() -> u128 {
		ADDITIONAL_FEED_PRECISION
	}

	pub fn liquidation_precision() -> u128 {
		LIQUIDATION_PRECISION
	}

	pub fn liquidation_threshold() -> Ratio {
		T::LiquidationThreshold::get()
	}

	pub fn liquidation_bonus() -> Rate {
		T::LiquidationBonus::get()
	}

	pub fn min_health_factor() -> HealthFactor {
		T::MinimumHealthFactor::get()
	}

	pub fn price_timeout() -> u64 {
		T::PriceTimeout::get()
	}

	/// Checks the ledgers against their totals and against what the engine actually holds.
	#[cfg(any(feature = "try-runtime", test))]
	pub fn do_try_state() -> Result<(), DispatchError> {
		use sp_std::collections::btree_map::BTreeMap;

		ensure!(!EngineLocked::<T>::get(), "engine lock left behind");

		let mut deposited: BTreeMap<T::CurrencyId, Balance> = BTreeMap::new();
		for (_, currency_id, amount) in CollateralDeposited::<T>::iter() {
			ensure!(
				PriceFeeds::<T>::contains_key(currency_id),
				"collateral deposited in unregistered currency"
			);
			let total = deposited.entry(currency_id).or_default();
			*total = total.checked_add(amount).ok_or("collateral sum overflow")?;
		}

		let engine = Self::account_id();
		for currency_id in Self::collateral_tokens() {
			let total = Self::total_collateral(currency_id);
			ensure!(
				deposited.get(&currency_id).copied().unwrap_or_default() == total,
				"TotalCollateral does not match deposits"
			);
			ensure!(
				T::Currency::free_balance(currency_id, &engine) >= total,
				"engine holds less collateral than deposited"
			);
		}

		let debt = MintedDebt::<T>::iter_values().try_fold(Zero::zero(), |total: Balance, debt| {
			total.checked_add(debt).ok_or("debt sum overflow")
		})?;
		ensure!(debt == Self::total_debt(), "TotalDebt does not match minted debt");
		ensure!(
			T::Currency::total_issuance(T::GetStableCurrencyId::get()) >= debt,
			"stable currency issuance below total debt"
		);

		Ok(())
	}
}
