//! # Yield Index
//!
//! Fixed-point continuously-compounding interest.
//!
//! The index is a 1e18-scale accumulator seeded at 1.0. Given an annualized
//! rate `r` (4-decimal fixed point) and elapsed seconds `dt`, the index grows
//! by `exp(r * dt / SECONDS_PER_YEAR)`.
//!
//! ## Approximation
//!
//! `exp(x)` is evaluated at 1e27 internal precision as a three-term Taylor
//! polynomial of `x / 2^32`, squared 32 times, then rescaled to 1e18:
//!
//! ```text
//! exp(x) = (1 + y + y^2/2 + y^3/6)^(2^32)    where y = x / 2^32
//! ```
//!
//! Series truncation error is below 1e-21 and the squaring quantization
//! contributes about `2^32 * 1e-27 ~= 4e-18`, so the relative error stays
//! under 1e-9 for `x <= 1` (one full year at 100% continuous yield). Inputs
//! above `x = 25` are rejected as overflow. The result is floored, never
//! rounded up, so the index can only lag the exact exponential.

use super::errors::{CashError, MathError};
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use starport_types::{AssetAmount, CashIndex, CashPrincipal, Timestamp};

/// One unit of the yield index (1.0 at 18 decimals).
pub const INDEX_ONE: CashIndex = 1_000_000_000_000_000_000;

/// One unit of the annualized rate (1.0 at 4 decimals).
pub const APR_ONE: u128 = 10_000;

/// Seconds per (non-leap) year, the compounding denominator.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Internal exponential precision (1e27).
const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;

/// Number of halvings/squarings in the exponential ladder.
const EXP_SQUARINGS: u32 = 32;

/// Largest accepted exponent input, at RAY scale. `exp(25)` still squares
/// without overflowing 256-bit intermediates; anything larger is economically
/// meaningless and rejected.
const MAX_EXP_INPUT: u128 = 25 * RAY;

/// Annualized interest rate, 4-decimal fixed point (`Apr(10_000)` = 100%).
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Apr(pub u128);

impl Apr {
    /// Zero rate.
    pub const ZERO: Apr = Apr(0);
    /// 100% annualized.
    pub const ONE: Apr = Apr(APR_ONE);
    /// Protocol ceiling on the yield rate (35% annualized).
    pub const MAX: Apr = Apr(3_500);
}

/// `exp(rate * dt)` as a 1e18-scale growth factor.
pub fn compound(rate: Apr, dt_seconds: u64) -> Result<CashIndex, MathError> {
    let numerator = U256::from(rate.0) * U256::from(dt_seconds) * U256::from(RAY);
    let denominator = U256::from(APR_ONE) * U256::from(SECONDS_PER_YEAR);
    let x_ray = numerator / denominator;
    exp_ray(x_ray)
}

/// Evaluate `exp(x)` for `x` at RAY scale, returning a 1e18-scale factor.
fn exp_ray(x_ray: U256) -> Result<CashIndex, MathError> {
    if x_ray > U256::from(MAX_EXP_INPUT) {
        return Err(MathError::Overflow);
    }
    let ray = U256::from(RAY);

    // Taylor on the halved argument: 1 + y + y^2/2 + y^3/6.
    let y = x_ray >> EXP_SQUARINGS;
    let y2 = y * y / (ray * U256::from(2u8));
    let y3 = y * y * y / (ray * ray * U256::from(6u8));
    let mut acc = ray + y + y2 + y3;

    for _ in 0..EXP_SQUARINGS {
        acc = acc.checked_mul(acc).ok_or(MathError::Overflow)? / ray;
    }

    // RAY -> 1e18.
    let factor = acc / U256::from(1_000_000_000u64);
    if factor > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(factor.as_u128())
}

/// Grow an index by a 1e18-scale factor, flooring.
pub fn increment_index(index: CashIndex, factor: CashIndex) -> Result<CashIndex, MathError> {
    let scaled = U256::from(index) * U256::from(factor) / U256::from(INDEX_ONE);
    if scaled > U256::from(u128::MAX) {
        return Err(MathError::Overflow);
    }
    Ok(scaled.as_u128())
}

/// Convert face amount to principal: `floor(amount * INDEX_ONE / index)`.
///
/// Truncation is toward zero: amounts smaller than one index unit convert to
/// a principal of 0. Callers must not round.
pub fn amount_to_principal(
    amount: AssetAmount,
    index: CashIndex,
) -> Result<CashPrincipal, CashError> {
    debug_assert!(index >= INDEX_ONE, "index is seeded at 1.0 and monotonic");
    let principal = U256::from(amount) * U256::from(INDEX_ONE) / U256::from(index);
    if principal > U256::from(u128::MAX) {
        return Err(CashError::PrincipalOverflow);
    }
    Ok(principal.as_u128())
}

/// Convert principal to face amount: `floor(principal * index / INDEX_ONE)`.
pub fn principal_to_amount(
    principal: CashPrincipal,
    index: CashIndex,
) -> Result<AssetAmount, CashError> {
    let amount = U256::from(principal) * U256::from(index) / U256::from(INDEX_ONE);
    if amount > U256::from(u128::MAX) {
        return Err(CashError::PrincipalOverflow);
    }
    Ok(amount.as_u128())
}

/// One yield generation: a rate effective from `start_at`, with the index
/// value frozen at that instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldGeneration {
    /// Annualized continuously-compounding rate.
    pub rate: Apr,
    /// Index value at `start_at`.
    pub index: CashIndex,
    /// Unix time the generation takes effect.
    pub start_at: Timestamp,
}

/// Current and scheduled-next yield generations.
///
/// The next generation is promoted lazily: any index read past its start
/// rolls it into current. There is no scheduled job.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldSchedule {
    current: YieldGeneration,
    next: Option<YieldGeneration>,
}

impl YieldSchedule {
    /// Start a schedule at `start_at` with the given rate, index seeded at 1.0.
    pub fn new(rate: Apr, start_at: Timestamp) -> Self {
        Self {
            current: YieldGeneration {
                rate,
                index: INDEX_ONE,
                start_at,
            },
            next: None,
        }
    }

    /// The generation currently in effect (after any pending rollover, as of
    /// the last mutating read).
    pub fn current(&self) -> &YieldGeneration {
        &self.current
    }

    /// The scheduled generation, if any.
    pub fn next(&self) -> Option<&YieldGeneration> {
        self.next.as_ref()
    }

    /// Promote the next generation if its start has passed.
    fn roll_over(&mut self, now: Timestamp) {
        if let Some(next) = self.next {
            if now > next.start_at {
                tracing::debug!(start_at = next.start_at, "yield generation rollover");
                self.current = next;
                self.next = None;
            }
        }
    }

    /// Current index value at `now`, rolling over lazily first.
    pub fn index_at(&mut self, now: Timestamp) -> Result<CashIndex, CashError> {
        self.roll_over(now);
        let dt = now.saturating_sub(self.current.start_at);
        let factor = compound(self.current.rate, dt)?;
        Ok(increment_index(self.current.index, factor)?)
    }

    /// Schedule the next yield generation.
    ///
    /// The rate is capped at [`Apr::MAX`]. A stale pending generation is
    /// first rolled over, then the new start must be strictly after the
    /// (possibly just-rolled) current start.
    pub fn set_future_yield(
        &mut self,
        next_rate: Apr,
        next_index: CashIndex,
        next_start_at: Timestamp,
        now: Timestamp,
    ) -> Result<(), CashError> {
        if next_rate > Apr::MAX {
            return Err(CashError::YieldRateTooHigh);
        }
        self.roll_over(now);
        if next_start_at <= self.current.start_at {
            return Err(CashError::InvalidYieldStart);
        }
        self.next = Some(YieldGeneration {
            rate: next_rate,
            index: next_index,
            start_at: next_start_at,
        });
        Ok(())
    }
}
