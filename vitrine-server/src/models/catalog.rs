//! Catalog definitions
//!
//! Every catalog shares the same list/delete shape and differs only in
//! table, key column, key type and the messages returned on removal.

use std::fmt;

use serde_json::{Map, Value};

use super::ValidationError;

/// One row of a catalog, passed through from the store untouched.
///
/// Column order is preserved (`serde_json` `preserve_order`).
pub type CatalogRecord = Map<String, Value>;

/// Type of a catalog's primary key column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Integer,
    Text,
}

/// Static configuration for a single catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct Catalog {
    /// Route prefix, e.g. `amazon` for `/amazon/todos`
    pub prefix: &'static str,
    pub table: &'static str,
    /// Primary key column, also the query parameter name on removal
    pub key_column: &'static str,
    pub key_kind: KeyKind,
    pub removed_message: &'static str,
    pub rejected_message: &'static str,
}

/// Media titles, keyed by `show_id`.
pub static TITLES: Catalog = Catalog {
    prefix: "netflix",
    table: "netflix_titles",
    key_column: "show_id",
    key_kind: KeyKind::Text,
    removed_message: "Titulo removido com sucesso",
    rejected_message: "Erro ao remover titulo",
};

/// Book sales records, keyed by `id_livro`.
pub static SALES: Catalog = Catalog {
    prefix: "amazon",
    table: "venda_livros",
    key_column: "id_livro",
    key_kind: KeyKind::Integer,
    removed_message: "Venda removida com sucesso",
    rejected_message: "Erro ao remover venda",
};

/// Player cards, keyed by `playerid`.
pub static PLAYER_CARDS: Catalog = Catalog {
    prefix: "fifa",
    table: "players_cards",
    key_column: "playerid",
    key_kind: KeyKind::Integer,
    removed_message: "Player card removida com sucesso",
    rejected_message: "Erro ao remover player card",
};

impl Catalog {
    /// All catalogs served by vitrine.
    pub fn all() -> [&'static Catalog; 3] {
        [&TITLES, &SALES, &PLAYER_CARDS]
    }

    /// `GET` path listing every record.
    pub fn list_path(&self) -> String {
        format!("/{}/todos", self.prefix)
    }

    /// `DELETE` path removing a record by key.
    pub fn remove_path(&self) -> String {
        format!("/{}/remover", self.prefix)
    }

    /// Coerce a raw query-string value into this catalog's key type.
    ///
    /// # Example
    /// ```
    /// use vitrine_server::models::{CatalogKey, SALES, TITLES};
    ///
    /// assert_eq!(SALES.parse_key(Some("1")), Ok(CatalogKey::Int(1)));
    /// assert_eq!(TITLES.parse_key(Some("s1")), Ok(CatalogKey::Text("s1".into())));
    /// assert!(SALES.parse_key(Some("one")).is_err());
    /// ```
    pub fn parse_key(&self, raw: Option<&str>) -> Result<CatalogKey, ValidationError> {
        let field = self.key_column;
        let raw = raw.ok_or(ValidationError::Missing { field })?;

        // Text keys go to the store exactly as sent
        let raw = match self.key_kind {
            KeyKind::Integer => raw.trim(),
            KeyKind::Text => raw,
        };
        if raw.is_empty() {
            return Err(ValidationError::Empty { field });
        }

        match self.key_kind {
            KeyKind::Integer => raw.parse::<i64>().map(CatalogKey::Int).map_err(|_| {
                ValidationError::InvalidFormat {
                    field,
                    reason: "expected an integer",
                }
            }),
            KeyKind::Text => Ok(CatalogKey::Text(raw.to_owned())),
        }
    }
}

/// Primary key value of a catalog row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogKey {
    Int(i64),
    Text(String),
}

impl fmt::Display for CatalogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for CatalogKey {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for CatalogKey {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}
