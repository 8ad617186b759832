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

//! Property-based tests for the statement engine.
//!
//! These tests verify invariants that should hold for any audience size and
//! any invoice over a valid catalog.

use proptest::prelude::*;
use theater_billing::{
    Amount, Catalog, Genre, Invoice, Performance, Play, RuleBook, StatementPrinter,
};

// =============================================================================
// Arbitrary Strategies
// =============================================================================

fn arb_genre() -> impl Strategy<Value = Genre> {
    prop::sample::select(Genre::ALL.to_vec())
}

fn arb_audience() -> impl Strategy<Value = u32> {
    0u32..=10_000
}

fn catalog() -> Catalog {
    Genre::ALL
        .into_iter()
        .map(|genre| (genre.as_str(), Play::new(genre.as_str(), genre.as_str())))
        .collect()
}

fn arb_invoice() -> impl Strategy<Value = Invoice> {
    prop::collection::vec((arb_genre(), arb_audience()), 0..20).prop_map(|rows| {
        let performances = rows
            .into_iter()
            .map(|(genre, audience)| Performance::new(genre.as_str(), audience))
            .collect();
        Invoice::new("PropCo", performances)
    })
}

/// Parses a rendered `$1,234.56` back into cents.
fn parse_cents(text: &str) -> i64 {
    let digits: String = text.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap()
}

// =============================================================================
// Rule Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(1000))]

    /// Amount owed never decreases as the audience grows.
    #[test]
    fn amount_monotonic_in_audience(genre in arb_genre(), audience in arb_audience()) {
        let rules = RuleBook::default();
        let smaller = rules.amount_owed(genre, audience).unwrap();
        let larger = rules.amount_owed(genre, audience + 1).unwrap();
        prop_assert!(larger >= smaller);
    }

    /// Volume credits never decrease as the audience grows.
    #[test]
    fn credits_monotonic_in_audience(genre in arb_genre(), audience in arb_audience()) {
        let rules = RuleBook::default();
        let smaller = rules.volume_credits(genre, audience);
        prop_assert!(rules.volume_credits(genre, audience + 1) >= smaller);
    }

    /// Monotonicity holds across the whole seat range, including its upper end.
    #[test]
    fn charges_monotonic_over_full_range(genre in arb_genre(), audience in any::<u32>()) {
        let rules = RuleBook::default();
        let next = audience.saturating_add(1);

        let here = rules.charge(genre, audience).unwrap();
        let there = rules.charge(genre, next).unwrap();

        prop_assert!(there.amount >= here.amount);
        prop_assert!(there.credits >= here.credits);
    }

    /// Credits are at least the seats above the credit threshold.
    #[test]
    fn credits_cover_seats_above_threshold(genre in arb_genre(), audience in any::<u32>()) {
        let rules = RuleBook::default();
        let threshold = rules.rules_for(genre).credits.threshold;
        let base = u64::from(audience.saturating_sub(threshold));
        prop_assert!(rules.volume_credits(genre, audience) >= base);
    }

    /// Up to the free-capacity threshold only the flat terms are charged.
    #[test]
    fn flat_amount_within_threshold(genre in arb_genre(), audience in arb_audience()) {
        let rules = RuleBook::default();
        let pricing = rules.rules_for(genre).pricing;
        prop_assume!(audience <= pricing.audience_threshold);

        let expected = pricing.base_amount + pricing.amount_per_audience * i64::from(audience);
        prop_assert_eq!(rules.amount_owed(genre, audience), Ok(Amount::from_cents(expected)));
    }
}

// =============================================================================
// Statement Invariants
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Header, one line per performance, two summary lines.
    #[test]
    fn line_count_matches_performances(invoice in arb_invoice()) {
        let text = StatementPrinter::new().render(&invoice, &catalog()).unwrap();
        prop_assert_eq!(text.lines().count(), invoice.performances.len() + 3);
    }

    /// The rendered total equals the sum of the rendered line amounts.
    #[test]
    fn rendered_total_equals_sum_of_lines(invoice in arb_invoice()) {
        let text = StatementPrinter::new().render(&invoice, &catalog()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let line_sum: i64 = lines[1..lines.len() - 2]
            .iter()
            .map(|line| {
                let start = line.find('$').unwrap();
                let end = line.rfind(" (").unwrap();
                parse_cents(&line[start..end])
            })
            .sum();
        let total = parse_cents(lines[lines.len() - 2].trim_start_matches("Amount owed is "));

        prop_assert_eq!(line_sum, total);
    }

    /// Statement totals are the sums of per-performance charges.
    #[test]
    fn totals_equal_sum_of_charges(invoice in arb_invoice()) {
        let rules = RuleBook::default();
        let statement = StatementPrinter::with_rules(rules.clone())
            .statement(&invoice, &catalog())
            .unwrap();

        let (amount, credits) = invoice.performances.iter().fold(
            (Amount::ZERO, 0u64),
            |(amount, credits), p| {
                let genre: Genre = p.play_id.as_str().parse().unwrap();
                let charge = rules.charge(genre, p.audience).unwrap();
                (amount + charge.amount, credits + charge.credits)
            },
        );

        prop_assert_eq!(statement.total_amount, amount);
        prop_assert_eq!(statement.total_credits, credits);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Invoices with audiences anywhere in the seat range still total exactly.
    #[test]
    fn large_audience_totals_are_exact(
        rows in prop::collection::vec((arb_genre(), any::<u32>()), 0..8),
    ) {
        let invoice = Invoice::new(
            "BigCo",
            rows.iter()
                .map(|(genre, audience)| Performance::new(genre.as_str(), *audience))
                .collect(),
        );
        let rules = RuleBook::default();
        let statement = StatementPrinter::new().statement(&invoice, &catalog()).unwrap();

        let credits: u64 = rows
            .iter()
            .map(|(genre, audience)| rules.volume_credits(*genre, *audience))
            .sum();
        let cents: i64 = rows
            .iter()
            .map(|(genre, audience)| rules.amount_owed(*genre, *audience).unwrap().cents())
            .sum();

        prop_assert_eq!(statement.total_credits, credits);
        prop_assert_eq!(statement.total_amount, Amount::from_cents(cents));
    }
}
