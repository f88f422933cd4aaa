//! Surrogate-keyed dimension tables.
//!
//! A [`Dimension`] stores its members in surrogate-key order: the member at
//! position `i` owns key `i + 1`. The reverse index maps each natural key back
//! to its surrogate key for fact construction.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::schema::TableName;

/// System-generated dimension row identifier, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurrogateKey(u32);

impl SurrogateKey {
    /// Key for the member at zero-based `position`, or `None` on overflow.
    pub fn from_position(position: usize) -> Option<Self> {
        position
            .checked_add(1)
            .and_then(|value| u32::try_from(value).ok())
            .map(Self)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for SurrogateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Natural key of the candidate dimension: the literal name/email triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateIdentity {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// Calendar attributes derived for each date dimension row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateAttributes {
    pub full_date: NaiveDate,
    pub year: i32,
    pub month: u32,
    /// 1-indexed: Jan–Mar = 1, Oct–Dec = 4.
    pub quarter: u32,
}

impl DateAttributes {
    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month();
        Self {
            full_date: date,
            year: date.year(),
            month,
            quarter: (month - 1) / 3 + 1,
        }
    }

    /// ISO `YYYY-MM-DD` representation stored in `dim_date.full_date`.
    pub fn full_date_text(&self) -> String {
        self.full_date.format("%Y-%m-%d").to_string()
    }
}

/// A dimension table with its natural → surrogate lookup.
#[derive(Debug, Clone)]
pub struct Dimension<K> {
    table: TableName,
    members: Vec<K>,
    index: HashMap<K, SurrogateKey>,
}

impl<K> Dimension<K>
where
    K: Clone + Eq + Hash,
{
    /// Assign keys `1..=n` to `members` in the given order.
    ///
    /// Members should already be unique; a repeated member keeps its first
    /// key in the index, which `index_len() != len()` exposes.
    pub fn assign(table: TableName, members: Vec<K>) -> Self {
        let mut index = HashMap::with_capacity(members.len());
        for (position, member) in members.iter().enumerate() {
            if let Some(key) = SurrogateKey::from_position(position) {
                index.entry(member.clone()).or_insert(key);
            }
        }
        Self {
            table,
            members,
            index,
        }
    }

    pub fn empty(table: TableName) -> Self {
        Self::assign(table, Vec::new())
    }

    pub fn table(&self) -> TableName {
        self.table
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Number of distinct natural keys in the reverse index.
    pub fn index_len(&self) -> usize {
        self.index.len()
    }

    /// Surrogate key for a natural key.
    pub fn key_of(&self, natural: &K) -> Option<SurrogateKey> {
        self.index.get(natural).copied()
    }

    /// Natural key for a surrogate key.
    pub fn member(&self, key: SurrogateKey) -> Option<&K> {
        let position = usize::try_from(key.get()).ok()?.checked_sub(1)?;
        self.members.get(position)
    }

    pub fn contains_key(&self, key: SurrogateKey) -> bool {
        self.member(key).is_some()
    }

    /// Rows in surrogate-key order.
    pub fn rows(&self) -> impl Iterator<Item = (SurrogateKey, &K)> {
        self.members
            .iter()
            .enumerate()
            .filter_map(|(position, member)| {
                SurrogateKey::from_position(position).map(|key| (key, member))
            })
    }

    pub fn members(&self) -> &[K] {
        &self.members
    }
}

impl Dimension<NaiveDate> {
    /// Date rows with their derived calendar attributes.
    pub fn date_rows(&self) -> impl Iterator<Item = (SurrogateKey, DateAttributes)> + '_ {
        self.rows()
            .map(|(key, date)| (key, DateAttributes::from_date(*date)))
    }
}
