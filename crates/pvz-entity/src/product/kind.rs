//! Product kinds accepted by a reception.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use pvz_core::AppError;

/// The fixed enumeration of product kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "product_type")]
pub enum ProductKind {
    /// Electronics.
    #[serde(rename = "электроника", alias = "electronics")]
    #[sqlx(rename = "электроника")]
    Electronics,
    /// Clothes.
    #[serde(rename = "одежда", alias = "clothes")]
    #[sqlx(rename = "одежда")]
    Clothes,
    /// Shoes.
    #[serde(rename = "обувь", alias = "shoes")]
    #[sqlx(rename = "обувь")]
    Shoes,
}

impl ProductKind {
    /// Every product kind.
    pub const ALL: [ProductKind; 3] = [Self::Electronics, Self::Clothes, Self::Shoes];

    /// Canonical name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electronics => "электроника",
            Self::Clothes => "одежда",
            Self::Shoes => "обувь",
        }
    }

    /// English alias accepted on input.
    pub fn english_name(&self) -> &'static str {
        match self {
            Self::Electronics => "electronics",
            Self::Clothes => "clothes",
            Self::Shoes => "shoes",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s || k.english_name() == s)
            .ok_or_else(|| AppError::validation(format!("Invalid product type: '{s}'")))
    }
}
