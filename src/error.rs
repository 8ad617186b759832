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

//! Error types for statement generation.

use crate::base::PlayId;
use thiserror::Error;

/// Statement generation errors.
///
/// Either error aborts the whole statement; no partial output is produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatementError {
    /// Play genre is not one of tragedy, comedy, history or pastoral
    #[error("unknown type: {0}")]
    UnknownPlayType(String),

    /// Performance references a play the catalog does not contain
    #[error("play not found: {0}")]
    MissingPlay(PlayId),

    /// An amount does not fit in 64-bit cents
    #[error("amount overflow")]
    AmountOverflow,
}
