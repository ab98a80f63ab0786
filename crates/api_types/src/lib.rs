//! Wire types of the net worth backend REST API.
//!
//! The backend owns every collection; these structs only mirror the JSON it
//! sends and accepts.

use serde::{Deserialize, Serialize};

pub mod item {
    use std::fmt;

    use serde::{Deserializer, de};

    use super::*;

    /// Server-issued identifier of an asset, debt or stock.
    ///
    /// Serialized as `_id`; `id` is accepted when reading.
    #[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ItemId(String);

    impl ItemId {
        pub fn new(id: impl Into<String>) -> Self {
            Self(id.into())
        }

        pub fn as_str(&self) -> &str {
            &self.0
        }
    }

    impl fmt::Display for ItemId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(&self.0)
        }
    }

    /// The three collections exposed by the backend.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "snake_case")]
    pub enum ItemKind {
        Asset,
        Debt,
        Stock,
    }

    impl ItemKind {
        pub const ALL: [ItemKind; 3] = [ItemKind::Asset, ItemKind::Debt, ItemKind::Stock];

        /// Singular name, as used in logs and notices.
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Asset => "asset",
                Self::Debt => "debt",
                Self::Stock => "stock",
            }
        }

        /// Collection path segment (`assets`, `debts`, `stocks`).
        pub fn collection(self) -> &'static str {
            match self {
                Self::Asset => "assets",
                Self::Debt => "debts",
                Self::Stock => "stocks",
            }
        }

        pub fn label(self) -> &'static str {
            match self {
                Self::Asset => "Asset",
                Self::Debt => "Debt",
                Self::Stock => "Stock",
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct Asset {
        #[serde(rename = "_id")]
        pub id: ItemId,
        pub name: String,
        pub value: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct Debt {
        #[serde(rename = "_id")]
        pub id: ItemId,
        pub name: String,
        pub value: f64,
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct Stock {
        #[serde(rename = "_id")]
        pub id: ItemId,
        pub symbol: String,
        pub shares: f64,
        /// Last known quote. `None` until the backend has fetched one.
        pub price: Option<f64>,
    }

    /// An incoming item: `_id` wins, `id` is only a fallback, and both may be
    /// present at once.
    #[derive(Deserialize)]
    struct Keyed<T> {
        #[serde(rename = "_id", default)]
        primary: Option<ItemId>,
        #[serde(default)]
        id: Option<ItemId>,
        #[serde(flatten)]
        fields: T,
    }

    impl<T> Keyed<T> {
        fn split<E: de::Error>(self) -> Result<(ItemId, T), E> {
            let id = self
                .primary
                .or(self.id)
                .ok_or_else(|| E::missing_field("_id"))?;
            Ok((id, self.fields))
        }
    }

    #[derive(Deserialize)]
    struct Valued {
        name: String,
        value: f64,
    }

    #[derive(Deserialize)]
    struct Holding {
        symbol: String,
        shares: f64,
        #[serde(default)]
        price: Option<f64>,
    }

    impl<'de> Deserialize<'de> for Asset {
        fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
            let (id, fields) = Keyed::<Valued>::deserialize(de)?.split::<D::Error>()?;
            Ok(Self {
                id,
                name: fields.name,
                value: fields.value,
            })
        }
    }

    impl<'de> Deserialize<'de> for Debt {
        fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
            let (id, fields) = Keyed::<Valued>::deserialize(de)?.split::<D::Error>()?;
            Ok(Self {
                id,
                name: fields.name,
                value: fields.value,
            })
        }
    }

    impl<'de> Deserialize<'de> for Stock {
        fn deserialize<D: Deserializer<'de>>(de: D) -> Result<Self, D::Error> {
            let (id, holding) = Keyed::<Holding>::deserialize(de)?.split::<D::Error>()?;
            let Holding {
                symbol,
                shares,
                price,
            } = holding;
            Ok(Self {
                id,
                symbol,
                shares,
                price,
            })
        }
    }

    impl Stock {
        /// Market value of the holding; a missing quote counts as zero.
        pub fn market_value(&self) -> f64 {
            self.price.unwrap_or(0.0) * self.shares
        }
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct AssetNew {
        pub name: String,
        pub value: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct DebtNew {
        pub name: String,
        pub value: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StockNew {
        pub symbol: String,
        pub shares: f64,
    }
}

pub mod auth {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Credentials {
        pub email: String,
        pub password: String,
    }

    /// Body of `POST /auth/login`: either a token or an error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct LoginResponse {
        #[serde(default)]
        pub token: Option<String>,
        #[serde(default)]
        pub error: Option<String>,
    }

    /// Body of `POST /auth/register`: either a message or an error.
    #[derive(Debug, Default, Serialize, Deserialize)]
    pub struct RegisterResponse {
        #[serde(default)]
        pub message: Option<String>,
        #[serde(default)]
        pub error: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Me {
        pub username: String,
    }
}

/// Error payload returned by the backend on failures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}
