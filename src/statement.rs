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

//! Statement assembly and rendering.
//!
//! The [`StatementPrinter`] prices every performance on an invoice with a
//! [`RuleBook`] and folds the results into a [`Statement`]. Rendering a
//! statement produces the customer-facing text:
//!
//! ```text
//! Statement for BigCo
//!   Hamlet: $650.00 (55 seats)
//! Amount owed is $650.00
//! You earned 25 credits
//! ```
//!
//! # Failure
//!
//! Statement generation fails as a whole. A performance whose play is missing
//! from the catalog, or whose play has an unknown genre, aborts the call and no
//! lines are produced.

use crate::base::Amount;
use crate::error::StatementError;
use crate::invoice::{Invoice, Performance};
use crate::play::Catalog;
use crate::rules::RuleBook;
use std::fmt;
use tracing::{debug, warn};

/// One rendered line of a statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementLine {
    pub play_name: String,
    pub audience: u32,
    pub amount: Amount,
    pub credits: u64,
}

impl fmt::Display for StatementLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "  {}: {} ({} seats)",
            self.play_name, self.amount, self.audience
        )
    }
}

/// Priced invoice, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Statement {
    pub customer: String,
    pub lines: Vec<StatementLine>,
    pub total_amount: Amount,
    pub total_credits: u64,
}

impl Statement {
    fn new(customer: &str) -> Self {
        Statement {
            customer: customer.to_string(),
            lines: Vec::new(),
            total_amount: Amount::ZERO,
            total_credits: 0,
        }
    }

    fn with_line(mut self, line: StatementLine) -> Result<Self, StatementError> {
        self.total_amount = self
            .total_amount
            .checked_add(line.amount)
            .ok_or(StatementError::AmountOverflow)?;
        // Per-line credits stay below 2^33, so the u64 sum cannot overflow.
        self.total_credits += line.credits;
        self.lines.push(line);
        Ok(self)
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Statement for {}", self.customer)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        writeln!(f, "Amount owed is {}", self.total_amount)?;
        writeln!(f, "You earned {} credits", self.total_credits)
    }
}

/// Builds statements from invoices using a fixed [`RuleBook`].
///
/// The printer holds no per-invoice state, so a single instance can be shared
/// across threads and used for any number of invoices.
#[derive(Debug, Clone, Default)]
pub struct StatementPrinter {
    rules: RuleBook,
}

impl StatementPrinter {
    /// Creates a printer with the standard rule book.
    pub fn new() -> Self {
        StatementPrinter::default()
    }

    pub fn with_rules(rules: RuleBook) -> Self {
        StatementPrinter { rules }
    }

    pub fn rules(&self) -> &RuleBook {
        &self.rules
    }

    /// Prices a single performance.
    ///
    /// # Errors
    ///
    /// - [`StatementError::MissingPlay`] - The performance's play is not in the catalog.
    /// - [`StatementError::UnknownPlayType`] - The play's genre is not recognized.
    /// - [`StatementError::AmountOverflow`] - The amount does not fit in `i64` cents.
    pub fn line(
        &self,
        performance: &Performance,
        catalog: &Catalog,
    ) -> Result<StatementLine, StatementError> {
        let play = catalog.get(&performance.play_id)?;
        let genre = play.genre()?;
        let charge = self.rules.charge(genre, performance.audience)?;

        debug!(
            play = %performance.play_id,
            %genre,
            audience = performance.audience,
            amount = charge.amount.cents(),
            credits = charge.credits,
            "priced performance"
        );

        Ok(StatementLine {
            play_name: play.name.clone(),
            audience: performance.audience,
            amount: charge.amount,
            credits: charge.credits,
        })
    }

    /// Prices every performance on the invoice, in invoice order.
    ///
    /// # Errors
    ///
    /// Fails on the first performance that cannot be priced; see [`Self::line`].
    /// Also fails with [`StatementError::AmountOverflow`] if the total amount
    /// does not fit in `i64` cents.
    pub fn statement(
        &self,
        invoice: &Invoice,
        catalog: &Catalog,
    ) -> Result<Statement, StatementError> {
        invoice
            .performances
            .iter()
            .try_fold(Statement::new(&invoice.customer), |statement, performance| {
                self.line(performance, catalog)
                    .and_then(|line| statement.with_line(line))
            })
            .inspect_err(|e| warn!(customer = %invoice.customer, error = %e, "statement failed"))
    }

    /// Builds and renders the statement text for an invoice.
    pub fn render(&self, invoice: &Invoice, catalog: &Catalog) -> Result<String, StatementError> {
        self.statement(invoice, catalog)
            .map(|statement| statement.to_string())
    }
}

/// Renders a statement with the standard rule book.
///
/// # Example
///
/// ```
/// use theater_billing::{Catalog, Invoice, Performance, Play, render_statement};
///
/// let catalog: Catalog = [("hamlet", Play::new("Hamlet", "tragedy"))]
///     .into_iter()
///     .collect();
/// let invoice = Invoice::new("BigCo", vec![Performance::new("hamlet", 55)]);
///
/// assert_eq!(
///     render_statement(&invoice, &catalog).unwrap(),
///     "Statement for BigCo\n  Hamlet: $650.00 (55 seats)\nAmount owed is $650.00\nYou earned 25 credits\n"
/// );
/// ```
pub fn render_statement(invoice: &Invoice, catalog: &Catalog) -> Result<String, StatementError> {
    StatementPrinter::new().render(invoice, catalog)
}
