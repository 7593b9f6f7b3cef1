// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Manifest (romaneio) records as rendered by the server.

use std::fmt;

use serde::{Deserialize, Deserializer};

/// Opaque server-side manifest reference.
///
/// The server may send it as a JSON number or string; both are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ManifestId(String);

impl ManifestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ManifestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ManifestId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Self(n.to_string()),
            Raw::Text(s) => Self(s),
        })
    }
}

/// Lifecycle status code of a manifest.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ManifestStatus {
    /// Waiting for item counting.
    #[default]
    Pending,
    /// Counted quantities matched the invoice.
    Open,
    Received,
    Finalized,
    /// Code the client does not know about, kept verbatim.
    Other(String),
}

impl ManifestStatus {
    pub fn from_code(code: &str) -> Self {
        match code {
            "P" => Self::Pending,
            "A" => Self::Open,
            "R" => Self::Received,
            "F" => Self::Finalized,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Pending => "Pendente",
            Self::Open => "Aberto",
            Self::Received => "Recebido",
            Self::Finalized => "Finalizado",
            Self::Other(code) => code,
        }
    }

    /// Statuses offered by the list filter, in display order.
    pub fn known() -> [ManifestStatus; 4] {
        [Self::Pending, Self::Open, Self::Received, Self::Finalized]
    }
}

impl<'de> Deserialize<'de> for ManifestStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.map_or_else(Self::default, |code| Self::from_code(&code)))
    }
}

/// Nullable text column: `null` reads as an empty string.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// One row of the manifest table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Manifest {
    pub id: ManifestId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub pedido_compra: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nota_fiscal: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub chave_acesso: String,
    #[serde(default)]
    pub status: ManifestStatus,
}

impl Manifest {
    /// Case-insensitive match on purchase order or invoice number.
    pub fn matches_search(&self, needle: &str) -> bool {
        let needle = needle.trim();
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.pedido_compra.to_lowercase().contains(&needle)
            || self.nota_fiscal.to_lowercase().contains(&needle)
    }
}
