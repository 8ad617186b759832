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

//! Plays and the catalog that resolves play identifiers.
//!
//! A [`Play`] keeps its genre as the raw string supplied by the catalog. The
//! string is only checked against the known [`Genre`]s when a performance of
//! the play is priced, so a catalog may hold plays that never get billed.
//!
//! # Example
//!
//! ```
//! use theater_billing::{Catalog, Genre, Play, PlayId};
//!
//! let catalog: Catalog = [("hamlet", Play::new("Hamlet", "tragedy"))]
//!     .into_iter()
//!     .collect();
//!
//! let play = catalog.get(&PlayId::from("hamlet")).unwrap();
//! assert_eq!(play.genre(), Ok(Genre::Tragedy));
//! ```

use crate::base::PlayId;
use crate::error::StatementError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Recognized play genres, each with its own pricing and credit rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Genre {
    Tragedy,
    Comedy,
    History,
    Pastoral,
}

impl Genre {
    pub const ALL: [Genre; 4] = [
        Genre::Tragedy,
        Genre::Comedy,
        Genre::History,
        Genre::Pastoral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Tragedy => "tragedy",
            Genre::Comedy => "comedy",
            Genre::History => "history",
            Genre::Pastoral => "pastoral",
        }
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Genre {
    type Err = StatementError;

    /// Matches the exact lowercase genre name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Genre::ALL
            .into_iter()
            .find(|genre| genre.as_str() == s)
            .ok_or_else(|| StatementError::UnknownPlayType(s.to_string()))
    }
}

/// A play as described by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Play {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl Play {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Play {
            name: name.into(),
            kind: kind.into(),
        }
    }

    /// Resolves the play's genre.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::UnknownPlayType`] if the genre string is not
    /// one of the recognized genres.
    pub fn genre(&self) -> Result<Genre, StatementError> {
        self.kind.parse()
    }
}

/// Read-only mapping from play identifier to [`Play`].
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    plays: HashMap<PlayId, Play>,
}

impl Catalog {
    pub fn new() -> Self {
        Catalog::default()
    }

    /// Adds a play, replacing any previous entry under the same identifier.
    pub fn insert(&mut self, id: impl Into<PlayId>, play: Play) -> Option<Play> {
        self.plays.insert(id.into(), play)
    }

    /// Looks up a play by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`StatementError::MissingPlay`] if no play is registered under `id`.
    pub fn get(&self, id: &PlayId) -> Result<&Play, StatementError> {
        self.plays
            .get(id)
            .ok_or_else(|| StatementError::MissingPlay(id.clone()))
    }

    pub fn len(&self) -> usize {
        self.plays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plays.is_empty()
    }
}

impl<K: Into<PlayId>> FromIterator<(K, Play)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, Play)>>(iter: I) -> Self {
        Catalog {
            plays: iter.into_iter().map(|(id, play)| (id.into(), play)).collect(),
        }
    }
}

impl<K: Into<PlayId>> Extend<(K, Play)> for Catalog {
    fn extend<I: IntoIterator<Item = (K, Play)>>(&mut self, iter: I) {
        self.plays
            .extend(iter.into_iter().map(|(id, play)| (id.into(), play)));
    }
}
