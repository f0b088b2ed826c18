// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Id-parity selection used by the concurrent reader.

use std::fmt;

/// Three-way filter over record ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    Odd,
    Even,
    #[default]
    All,
}

impl Selection {
    /// Map a `type` query value to a selection.
    ///
    /// Absent or unrecognized values select everything.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("odd") => Selection::Odd,
            Some(v) if v.eq_ignore_ascii_case("even") => Selection::Even,
            _ => Selection::All,
        }
    }

    #[inline]
    pub fn matches(self, id: i64) -> bool {
        match self {
            // `%` keeps the sign, so -3 % 2 == -1
            Selection::Odd => id % 2 != 0,
            Selection::Even => id % 2 == 0,
            Selection::All => true,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Selection::Odd => "odd",
            Selection::Even => "even",
            Selection::All => "all",
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
