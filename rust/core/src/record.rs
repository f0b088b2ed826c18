// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Catalog record type.

/// One catalog entry.
///
/// Ids are expected to be unique upstream but nothing here enforces it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub tagline: String,
    pub description: String,
    /// Alcohol by volume.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "lenient::float"))]
    pub abv: f64,
    /// International bitterness units.
    #[cfg_attr(feature = "serde", serde(default, deserialize_with = "lenient::integer"))]
    pub ibu: i64,
}

/// Ordered container used to move records between layers. Order carries no meaning.
pub type RecordSet = Vec<Record>;

impl Record {
    pub fn new(
        id: i64,
        name: impl Into<String>,
        tagline: impl Into<String>,
        description: impl Into<String>,
        abv: f64,
        ibu: i64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            tagline: tagline.into(),
            description: description.into(),
            abv,
            ibu,
        }
    }
}

/// First record with the given id, if any.
pub fn find_by_id(records: &[Record], id: i64) -> Option<&Record> {
    records.iter().find(|r| r.id == id)
}

/// The upstream catalog sends `null` (or a fractional value) for some
/// numeric columns. Null decodes as zero and fractional IBUs are truncated.
#[cfg(feature = "serde")]
mod lenient {
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    pub fn float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(match Option::<Number>::deserialize(deserializer)? {
            Some(Number::Int(v)) => v as f64,
            Some(Number::Float(v)) => v,
            None => 0.0,
        })
    }

    pub fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(match Option::<Number>::deserialize(deserializer)? {
            Some(Number::Int(v)) => v,
            Some(Number::Float(v)) => v.trunc() as i64,
            None => 0,
        })
    }
}
