//! Backend payloads.
//!
//! Entities are owned by the backend; only their translatable fields are
//! typed here. Everything else is kept as raw JSON and read on demand.

use crate::i18n::{parse_value, resolve, Language, MultiLangValue};
use anyhow::{bail, Result};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Content collections exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Oeuvre,
    Evenement,
    Patrimoine,
    Artisanat,
    Service,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Oeuvre,
        EntityKind::Evenement,
        EntityKind::Patrimoine,
        EntityKind::Artisanat,
        EntityKind::Service,
    ];

    /// Collection path under the API root.
    pub fn path(&self) -> &'static str {
        match self {
            EntityKind::Oeuvre => "oeuvres",
            EntityKind::Evenement => "evenements",
            EntityKind::Patrimoine => "patrimoines",
            EntityKind::Artisanat => "artisanats",
            EntityKind::Service => "services",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    /// Accepts the singular or plural collection name, e.g. `oeuvre` or `oeuvres`.
    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim().to_lowercase().replace('œ', "oe");
        let name = name.strip_suffix('s').unwrap_or(&name);
        match name {
            "oeuvre" => Ok(EntityKind::Oeuvre),
            "evenement" | "événement" => Ok(EntityKind::Evenement),
            "patrimoine" => Ok(EntityKind::Patrimoine),
            "artisanat" => Ok(EntityKind::Artisanat),
            "service" => Ok(EntityKind::Service),
            _ => bail!("Unknown collection: '{}'", s),
        }
    }
}

/// A work, event, heritage site, craft or service.
///
/// The backend names the id `id` or `id_<kind>` and the title `nom` or
/// `titre`. Records carrying both spellings decode too: `id` and `nom` win,
/// and `titre` only fills a blank `nom`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "EntityRecord")]
pub struct Entity {
    pub id: i64,

    pub nom: MultiLangValue,

    pub description: MultiLangValue,

    /// All other backend fields, untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const ENTITY_ID_KEYS: [&str; 5] = [
    "id_oeuvre",
    "id_evenement",
    "id_lieu",
    "id_artisanat",
    "id_service",
];

/// Wire shape of [`Entity`] before the id and title spellings are merged.
#[derive(Deserialize)]
struct EntityRecord {
    #[serde(default)]
    id: Option<i64>,

    #[serde(default)]
    nom: MultiLangValue,

    #[serde(default)]
    description: MultiLangValue,

    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TryFrom<EntityRecord> for Entity {
    type Error = String;

    fn try_from(record: EntityRecord) -> Result<Self, Self::Error> {
        let EntityRecord {
            id,
            mut nom,
            description,
            mut extra,
        } = record;

        let id = match id {
            Some(id) => id,
            None => ENTITY_ID_KEYS
                .iter()
                .find_map(|key| extra.get(*key).and_then(Value::as_i64).map(|id| (*key, id)))
                .map(|(key, id)| {
                    extra.remove(key);
                    id
                })
                .ok_or_else(|| "missing field `id`".to_string())?,
        };

        if nom.is_blank() {
            if let Some(titre) = extra.remove("titre") {
                nom = parse_value(&titre).value;
            }
        }

        Ok(Self {
            id,
            nom,
            description,
            extra,
        })
    }
}

impl Entity {
    /// Display title in `lang`.
    pub fn title(&self, lang: Language) -> &str {
        resolve(&self.nom, lang)
    }

    /// Read any other field as a multilingual value. Absent fields are blank.
    pub fn text(&self, key: &str) -> MultiLangValue {
        self.extra
            .get(key)
            .map(|raw| parse_value(raw).value)
            .unwrap_or_default()
    }

    /// Read a date field stored as `YYYY-MM-DD` or as an RFC 3339 timestamp.
    pub fn date(&self, key: &str) -> Option<NaiveDate> {
        let raw = self.extra.get(key)?.as_str()?;
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
    }
}

/// Administrative region, used as reference data by most forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WilayaRecord")]
pub struct Wilaya {
    pub id: i64,

    /// Official wilaya number
    pub code: Option<u32>,

    pub nom: MultiLangValue,
}

/// Wire shape of [`Wilaya`]; `id`/`id_wilaya` and `nom`/`nom_wilaya` may
/// both be present.
#[derive(Deserialize)]
struct WilayaRecord {
    #[serde(default)]
    id: Option<i64>,

    #[serde(default)]
    id_wilaya: Option<i64>,

    #[serde(default)]
    code: Option<u32>,

    #[serde(default)]
    nom: MultiLangValue,

    #[serde(default)]
    nom_wilaya: MultiLangValue,
}

impl TryFrom<WilayaRecord> for Wilaya {
    type Error = String;

    fn try_from(record: WilayaRecord) -> Result<Self, Self::Error> {
        let id = record
            .id
            .or(record.id_wilaya)
            .ok_or_else(|| "missing field `id`".to_string())?;
        let nom = if record.nom.is_blank() {
            record.nom_wilaya
        } else {
            record.nom
        };

        Ok(Self {
            id,
            code: record.code,
            nom,
        })
    }
}

/// Body of a create or update request.
///
/// Multilingual fields are sent JSON-encoded, as the backend expects:
/// `{"nom": "{\"fr\":\"...\",\"ar\":\"...\",\"en\":\"...\"}"}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct EntityPayload {
    fields: Map<String, Value>,
}

impl EntityPayload {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a multilingual field in its JSON-string wire form.
    pub fn text(mut self, key: impl Into<String>, value: &MultiLangValue) -> Self {
        self.fields.insert(key.into(), Value::String(value.to_json()));
        self
    }

    /// Add a plain field.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
