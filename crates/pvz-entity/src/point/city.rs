//! Cities in which a pick-up point may be registered.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pvz_core::AppError;

/// The allow-list of point locations.
///
/// Canonical names are Russian; English names are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "pvz_city")]
pub enum City {
    /// Moscow.
    #[serde(rename = "Москва", alias = "Moscow")]
    #[sqlx(rename = "Москва")]
    Moscow,
    /// Saint Petersburg.
    #[serde(rename = "Санкт-Петербург", alias = "Saint Petersburg")]
    #[sqlx(rename = "Санкт-Петербург")]
    SaintPetersburg,
    /// Kazan.
    #[serde(rename = "Казань", alias = "Kazan")]
    #[sqlx(rename = "Казань")]
    Kazan,
}

impl City {
    /// Every allowed city.
    pub const ALL: [City; 3] = [Self::Moscow, Self::SaintPetersburg, Self::Kazan];

    /// Canonical name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Moscow => "Москва",
            Self::SaintPetersburg => "Санкт-Петербург",
            Self::Kazan => "Казань",
        }
    }

    /// English alias accepted on input.
    pub fn english_name(&self) -> &'static str {
        match self {
            Self::Moscow => "Moscow",
            Self::SaintPetersburg => "Saint Petersburg",
            Self::Kazan => "Kazan",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for City {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s || c.english_name() == s)
            .ok_or_else(|| AppError::validation(format!("City not allowed: '{s}'")))
    }
}
