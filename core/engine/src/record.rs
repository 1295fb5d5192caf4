//! FILENAME: core/engine/src/record.rs
//! PURPOSE: Defines the event record, the atomic unit of the dataset.
//! CONTEXT: Every categorical field and every score is independently optional.
//! Absence is represented as `None`, never as an empty string or a zero, so
//! that filters and aggregations can tell "missing" apart from "0".

use std::borrow::Cow;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

/// Format of the `added` timestamp, e.g. "January, 20 2017 03:51:25".
pub const ADDED_FORMAT: &str = "%B, %d %Y %H:%M:%S";

// ============================================================================
// FIELDS
// ============================================================================

/// Every field of a record, by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Topic,
    Sector,
    Pestle,
    Source,
    Region,
    Country,
    City,
    Intensity,
    Likelihood,
    Relevance,
    StartYear,
    EndYear,
    Added,
}

impl Field {
    pub const ALL: [Field; 13] = [
        Field::Topic,
        Field::Sector,
        Field::Pestle,
        Field::Source,
        Field::Region,
        Field::Country,
        Field::City,
        Field::Intensity,
        Field::Likelihood,
        Field::Relevance,
        Field::StartYear,
        Field::EndYear,
        Field::Added,
    ];

    /// The wire name of the field (as it appears in the dataset payload).
    pub fn name(self) -> &'static str {
        match self {
            Field::Topic => "topic",
            Field::Sector => "sector",
            Field::Pestle => "pestle",
            Field::Source => "source",
            Field::Region => "region",
            Field::Country => "country",
            Field::City => "city",
            Field::Intensity => "intensity",
            Field::Likelihood => "likelihood",
            Field::Relevance => "relevance",
            Field::StartYear => "start_year",
            Field::EndYear => "end_year",
            Field::Added => "added",
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// The three scores carried by a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericField {
    Intensity,
    Likelihood,
    Relevance,
}

impl NumericField {
    pub const ALL: [NumericField; 3] = [
        NumericField::Intensity,
        NumericField::Likelihood,
        NumericField::Relevance,
    ];

    pub fn field(self) -> Field {
        match self {
            NumericField::Intensity => Field::Intensity,
            NumericField::Likelihood => Field::Likelihood,
            NumericField::Relevance => Field::Relevance,
        }
    }

    pub fn name(self) -> &'static str {
        self.field().name()
    }
}

/// A borrowed view of one field value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Number(f64),
}

impl<'a> FieldValue<'a> {
    /// The string form used for grouping and filter comparison.
    pub fn as_text(&self) -> Cow<'a, str> {
        match *self {
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Number(n) => Cow::Owned(format_number(n)),
        }
    }
}

/// Formats a number without a trailing fraction when it is integral
/// (6.0 -> "6", 0.5 -> "0.5").
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{}", n)
    }
}

/// Unicode case-insensitive equality without allocating.
pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

// ============================================================================
// RECORD
// ============================================================================

/// One scored event observation. Immutable once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub pestle: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(deserialize_with = "de_number", skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f64>,
    #[serde(deserialize_with = "de_number", skip_serializing_if = "Option::is_none")]
    pub likelihood: Option<f64>,
    #[serde(deserialize_with = "de_number", skip_serializing_if = "Option::is_none")]
    pub relevance: Option<f64>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub start_year: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub end_year: Option<String>,
    #[serde(deserialize_with = "de_text", skip_serializing_if = "Option::is_none")]
    pub added: Option<String>,
}

impl Record {
    pub fn new() -> Self {
        Record::default()
    }

    /// Builder-style setter for a text field. Numeric fields are parsed;
    /// empty input leaves the field absent.
    pub fn with_text(mut self, field: Field, value: &str) -> Self {
        let text = non_empty(value.to_string());
        match field {
            Field::Topic => self.topic = text,
            Field::Sector => self.sector = text,
            Field::Pestle => self.pestle = text,
            Field::Source => self.source = text,
            Field::Region => self.region = text,
            Field::Country => self.country = text,
            Field::City => self.city = text,
            Field::StartYear => self.start_year = text,
            Field::EndYear => self.end_year = text,
            Field::Added => self.added = text,
            Field::Intensity => self.intensity = parse_number(value),
            Field::Likelihood => self.likelihood = parse_number(value),
            Field::Relevance => self.relevance = parse_number(value),
        }
        self
    }

    /// Builder-style setter for a score.
    pub fn with_number(mut self, field: NumericField, value: f64) -> Self {
        let slot = match field {
            NumericField::Intensity => &mut self.intensity,
            NumericField::Likelihood => &mut self.likelihood,
            NumericField::Relevance => &mut self.relevance,
        };
        *slot = Some(value);
        self
    }

    /// Returns the value of `field`, or None when absent.
    pub fn value(&self, field: Field) -> Option<FieldValue<'_>> {
        fn text(s: &Option<String>) -> Option<FieldValue<'_>> {
            s.as_deref().map(FieldValue::Text)
        }
        match field {
            Field::Topic => text(&self.topic),
            Field::Sector => text(&self.sector),
            Field::Pestle => text(&self.pestle),
            Field::Source => text(&self.source),
            Field::Region => text(&self.region),
            Field::Country => text(&self.country),
            Field::City => text(&self.city),
            Field::StartYear => text(&self.start_year),
            Field::EndYear => text(&self.end_year),
            Field::Added => text(&self.added),
            Field::Intensity => self.intensity.map(FieldValue::Number),
            Field::Likelihood => self.likelihood.map(FieldValue::Number),
            Field::Relevance => self.relevance.map(FieldValue::Number),
        }
    }

    /// The string form of `field`, used as a grouping key and for filtering.
    pub fn text(&self, field: Field) -> Option<Cow<'_, str>> {
        self.value(field).map(|v| v.as_text())
    }

    pub fn number(&self, field: NumericField) -> Option<f64> {
        match field {
            NumericField::Intensity => self.intensity,
            NumericField::Likelihood => self.likelihood,
            NumericField::Relevance => self.relevance,
        }
    }

    /// Parses `added` with [`ADDED_FORMAT`]. None when absent or malformed.
    pub fn added_at(&self) -> Option<NaiveDateTime> {
        self.added
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s.trim(), ADDED_FORMAT).ok())
    }
}

// ============================================================================
// LENIENT DECODING
// ============================================================================

/// A scalar as it may appear in the payload: the source data mixes numbers,
/// numeric strings and empty strings for the same field. Anything else
/// (booleans, objects, arrays) decodes as absent.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawScalar {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

fn parse_number(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn de_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        None => None,
        Some(RawScalar::Text(s)) => non_empty(s),
        Some(RawScalar::Number(n)) => Some(format_number(n)),
        Some(RawScalar::Other(_)) => None,
    })
}

fn de_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawScalar>::deserialize(deserializer)? {
        None => None,
        Some(RawScalar::Number(n)) => Some(n).filter(|n| n.is_finite()),
        Some(RawScalar::Text(s)) => parse_number(&s),
        Some(RawScalar::Other(_)) => None,
    })
}
