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

//! # Theater Billing
//!
//! This library prices theatrical performances and renders customer statements.
//! Each performance is charged by its play's genre and audience size, and earns
//! loyalty volume credits.
//!
//! ## Core Components
//!
//! - [`StatementPrinter`]: Prices an invoice against a catalog and renders the statement
//! - [`RuleBook`]: Per-genre pricing and volume-credit rules
//! - [`Catalog`]: Play lookup by identifier
//! - [`Amount`]: Integer-cent money type with US currency formatting
//! - [`StatementError`]: Error types for statement failures
//!
//! ## Example
//!
//! ```
//! use theater_billing::{Catalog, Invoice, Performance, Play, StatementPrinter};
//!
//! let catalog: Catalog = [
//!     ("hamlet", Play::new("Hamlet", "tragedy")),
//!     ("as-like", Play::new("As You Like It", "comedy")),
//! ]
//! .into_iter()
//! .collect();
//!
//! let invoice = Invoice::new(
//!     "BigCo",
//!     vec![Performance::new("hamlet", 55), Performance::new("as-like", 35)],
//! );
//!
//! let statement = StatementPrinter::new().statement(&invoice, &catalog).unwrap();
//! assert_eq!(statement.total_amount.to_string(), "$1,230.00");
//! assert_eq!(statement.total_credits, 31);
//! ```
//!
//! ## Thread Safety
//!
//! Statement generation is a pure function of the invoice and the catalog. A
//! [`StatementPrinter`] and a [`Catalog`] can be shared by reference across
//! threads as long as nothing mutates the catalog meanwhile.

mod base;
pub mod error;
mod invoice;
mod play;
pub mod rules;
mod statement;

pub use base::{Amount, PlayId};
pub use error::StatementError;
pub use invoice::{Invoice, Performance};
pub use play::{Catalog, Genre, Play};
pub use rules::{Charge, CreditRule, GenreRules, PricingRule, RuleBook};
pub use statement::{Statement, StatementLine, StatementPrinter, render_statement};
