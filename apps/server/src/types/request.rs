// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Request types for the API.

use brewcat_core::Selection;
use serde::Deserialize;

/// Query string of `GET /fasterbeers`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BeersQuery {
    /// `odd`, `even`, or anything else for all records.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl BeersQuery {
    pub fn selection(&self) -> Selection {
        Selection::from_query(self.kind.as_deref())
    }
}
