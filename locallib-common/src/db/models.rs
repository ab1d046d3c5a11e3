//! Record models
//!
//! One struct per persisted entity. Derived display fields (names, URLs,
//! formatted dates) are methods so they always agree with the stored data.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::time::format_date_med;

/// A writer of one or more books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Display name, `Family, First`
    ///
    /// Falls back to whichever part is present so a half-filled record still
    /// renders something readable.
    pub fn name(&self) -> String {
        match (self.family_name.is_empty(), self.first_name.is_empty()) {
            (false, false) => format!("{}, {}", self.family_name, self.first_name),
            (false, true) => self.family_name.clone(),
            (true, false) => self.first_name.clone(),
            (true, true) => String::new(),
        }
    }

    /// Lifespan, e.g. `Jan 2, 1920 - Apr 6, 1992`; empty when neither date is known
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        let birth = self.date_of_birth.map(format_date_med).unwrap_or_default();
        let death = self.date_of_death.map(format_date_med).unwrap_or_default();
        format!("{} - {}", birth, death).trim().to_string()
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }
}

/// A category of books
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: Uuid,
    pub name: String,
}

impl Genre {
    /// Minimum genre name length, in characters
    pub const NAME_MIN: usize = 3;
    /// Maximum genre name length, in characters
    pub const NAME_MAX: usize = 100;

    pub fn url(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }
}

/// A catalogued title
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: BTreeSet<Uuid>,
}

impl Book {
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Circulation state of a physical copy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CopyStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl CopyStatus {
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Maintenance,
        CopyStatus::Loaned,
        CopyStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CopyStatus {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CopyStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| crate::Error::InvalidInput(format!("Unknown copy status: {}", s)))
    }
}

/// A physical copy of a book that can be lent out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCopy {
    pub id: Uuid,
    pub book_id: Uuid,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: DateTime<Utc>,
}

impl BookCopy {
    /// New copy in the default state: under maintenance, due back now
    pub fn new(book_id: Uuid, imprint: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            book_id,
            imprint,
            status: CopyStatus::default(),
            due_back: crate::time::now(),
        }
    }

    pub fn url(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn due_back_formatted(&self) -> String {
        format_date_med(self.due_back.date_naive())
    }
}
