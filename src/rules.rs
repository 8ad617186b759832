// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Pricing and volume-credit rules per genre.
//!
//! Each [`Genre`] maps to one [`GenreRules`] entry in a [`RuleBook`]. Adding or
//! retuning a genre is a change to the table, not to the pricing code.
//!
//! # Pricing
//!
//! | Genre | Base | Threshold | Overage | Extra |
//! |-------|------|-----------|---------|-------|
//! | tragedy | 40000 | 30 | 1000/person | |
//! | comedy | 30000 | 20 | 10000 + 500/person | 300 × audience |
//! | history | 20000 | 20 | 1000/person | |
//! | pastoral | 40000 | 20 | 2500/person | |
//!
//! All amounts are in cents. Overage applies only when the audience is strictly
//! above the threshold. Pricing uses checked arithmetic, so a rule book with
//! extreme rates yields [`StatementError::AmountOverflow`] instead of a wrong
//! amount.
//!
//! # Volume credits
//!
//! `max(audience - threshold, 0)`, plus `audience / divisor` for genres with a
//! bonus divisor (comedy and pastoral).

use crate::base::Amount;
use crate::error::StatementError;
use crate::play::Genre;
use serde::{Deserialize, Serialize};

pub const BASE_VOLUME_CREDIT_THRESHOLD: u32 = 30;

pub const TRAGEDY_BASE_AMOUNT: i64 = 40_000;
pub const TRAGEDY_AUDIENCE_THRESHOLD: u32 = 30;
pub const TRAGEDY_OVER_BASE_CAPACITY_PER_PERSON: i64 = 1_000;

pub const COMEDY_BASE_AMOUNT: i64 = 30_000;
pub const COMEDY_AUDIENCE_THRESHOLD: u32 = 20;
pub const COMEDY_OVER_BASE_CAPACITY_AMOUNT: i64 = 10_000;
pub const COMEDY_OVER_BASE_CAPACITY_PER_PERSON: i64 = 500;
pub const COMEDY_AMOUNT_PER_AUDIENCE: i64 = 300;
pub const COMEDY_EXTRA_VOLUME_FACTOR: u32 = 20;

pub const HISTORY_BASE_AMOUNT: i64 = 20_000;
pub const HISTORY_AUDIENCE_THRESHOLD: u32 = 20;
pub const HISTORY_OVER_BASE_CAPACITY_PER_PERSON: i64 = 1_000;
pub const HISTORY_VOLUME_CREDIT_THRESHOLD: u32 = 20;

pub const PASTORAL_BASE_AMOUNT: i64 = 40_000;
pub const PASTORAL_AUDIENCE_THRESHOLD: u32 = 20;
pub const PASTORAL_OVER_BASE_CAPACITY_PER_PERSON: i64 = 2_500;
pub const PASTORAL_VOLUME_CREDIT_THRESHOLD: u32 = 20;
pub const PASTORAL_EXTRA_VOLUME_FACTOR: u32 = 2;

/// How a genre turns an audience size into an amount owed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingRule {
    /// Flat amount charged for every performance, in cents.
    pub base_amount: i64,
    /// Seats included in the base amount.
    pub audience_threshold: u32,
    /// Flat surcharge once the audience exceeds the threshold.
    #[serde(default)]
    pub overage_amount: i64,
    /// Charge per seat above the threshold.
    pub overage_per_person: i64,
    /// Charge per seat, applied to the whole audience.
    #[serde(default)]
    pub amount_per_audience: i64,
}

impl PricingRule {
    /// # Errors
    ///
    /// Returns [`StatementError::AmountOverflow`] if the amount does not fit in
    /// `i64` cents.
    pub fn amount_owed(&self, audience: u32) -> Result<Amount, StatementError> {
        let overage = if audience > self.audience_threshold {
            let seats = i64::from(audience - self.audience_threshold);
            self.overage_per_person
                .checked_mul(seats)
                .and_then(|cents| cents.checked_add(self.overage_amount))
        } else {
            Some(0)
        };

        self.amount_per_audience
            .checked_mul(i64::from(audience))
            .zip(overage)
            .and_then(|(per_audience, overage)| per_audience.checked_add(overage))
            .and_then(|cents| cents.checked_add(self.base_amount))
            .map(Amount::from_cents)
            .ok_or(StatementError::AmountOverflow)
    }
}

/// How a genre turns an audience size into volume credits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRule {
    /// Seats that earn no credit.
    pub threshold: u32,
    /// One bonus credit per `bonus_divisor` seats, if set.
    #[serde(default)]
    pub bonus_divisor: Option<u32>,
}

impl CreditRule {
    pub fn volume_credits(&self, audience: u32) -> u64 {
        let bonus = match self.bonus_divisor {
            Some(divisor) if divisor > 0 => audience / divisor,
            _ => 0,
        };
        u64::from(audience.saturating_sub(self.threshold)) + u64::from(bonus)
    }
}

/// Amount and credits earned by one performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Charge {
    pub amount: Amount,
    pub credits: u64,
}

/// Pricing and credit rule pair for a single genre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRules {
    pub pricing: PricingRule,
    pub credits: CreditRule,
}

impl GenreRules {
    pub fn amount_owed(&self, audience: u32) -> Result<Amount, StatementError> {
        self.pricing.amount_owed(audience)
    }

    pub fn volume_credits(&self, audience: u32) -> u64 {
        self.credits.volume_credits(audience)
    }

    pub fn charge(&self, audience: u32) -> Result<Charge, StatementError> {
        Ok(Charge {
            amount: self.amount_owed(audience)?,
            credits: self.volume_credits(audience),
        })
    }
}

/// Lookup table of rules, one entry per [`Genre`].
///
/// [`RuleBook::default`] carries the standard rates. A rule book can also be
/// loaded from JSON:
///
/// ```
/// use theater_billing::{Genre, RuleBook};
///
/// let json = serde_json::to_string(&RuleBook::default()).unwrap();
/// let rules: RuleBook = serde_json::from_str(&json).unwrap();
/// assert_eq!(rules.rules_for(Genre::Tragedy).pricing.base_amount, 40_000);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    pub tragedy: GenreRules,
    pub comedy: GenreRules,
    pub history: GenreRules,
    pub pastoral: GenreRules,
}

impl RuleBook {
    pub fn rules_for(&self, genre: Genre) -> &GenreRules {
        match genre {
            Genre::Tragedy => &self.tragedy,
            Genre::Comedy => &self.comedy,
            Genre::History => &self.history,
            Genre::Pastoral => &self.pastoral,
        }
    }

    pub fn amount_owed(&self, genre: Genre, audience: u32) -> Result<Amount, StatementError> {
        self.rules_for(genre).amount_owed(audience)
    }

    pub fn volume_credits(&self, genre: Genre, audience: u32) -> u64 {
        self.rules_for(genre).volume_credits(audience)
    }

    pub fn charge(&self, genre: Genre, audience: u32) -> Result<Charge, StatementError> {
        self.rules_for(genre).charge(audience)
    }
}

impl Default for RuleBook {
    fn default() -> Self {
        RuleBook {
            tragedy: GenreRules {
                pricing: PricingRule {
                    base_amount: TRAGEDY_BASE_AMOUNT,
                    audience_threshold: TRAGEDY_AUDIENCE_THRESHOLD,
                    overage_amount: 0,
                    overage_per_person: TRAGEDY_OVER_BASE_CAPACITY_PER_PERSON,
                    amount_per_audience: 0,
                },
                credits: CreditRule {
                    threshold: BASE_VOLUME_CREDIT_THRESHOLD,
                    bonus_divisor: None,
                },
            },
            comedy: GenreRules {
                pricing: PricingRule {
                    base_amount: COMEDY_BASE_AMOUNT,
                    audience_threshold: COMEDY_AUDIENCE_THRESHOLD,
                    overage_amount: COMEDY_OVER_BASE_CAPACITY_AMOUNT,
                    overage_per_person: COMEDY_OVER_BASE_CAPACITY_PER_PERSON,
                    amount_per_audience: COMEDY_AMOUNT_PER_AUDIENCE,
                },
                credits: CreditRule {
                    threshold: BASE_VOLUME_CREDIT_THRESHOLD,
                    bonus_divisor: Some(COMEDY_EXTRA_VOLUME_FACTOR),
                },
            },
            history: GenreRules {
                pricing: PricingRule {
                    base_amount: HISTORY_BASE_AMOUNT,
                    audience_threshold: HISTORY_AUDIENCE_THRESHOLD,
                    overage_amount: 0,
                    overage_per_person: HISTORY_OVER_BASE_CAPACITY_PER_PERSON,
                    amount_per_audience: 0,
                },
                credits: CreditRule {
                    threshold: HISTORY_VOLUME_CREDIT_THRESHOLD,
                    bonus_divisor: None,
                },
            },
            pastoral: GenreRules {
                pricing: PricingRule {
                    base_amount: PASTORAL_BASE_AMOUNT,
                    audience_threshold: PASTORAL_AUDIENCE_THRESHOLD,
                    overage_amount: 0,
                    overage_per_person: PASTORAL_OVER_BASE_CAPACITY_PER_PERSON,
                    amount_per_audience: 0,
                },
                credits: CreditRule {
                    threshold: PASTORAL_VOLUME_CREDIT_THRESHOLD,
                    bonus_divisor: Some(PASTORAL_EXTRA_VOLUME_FACTOR),
                },
            },
        }
    }
}
