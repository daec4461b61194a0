// The precomputed r/news analytics dataset.
// It is produced offline as a single JSON document and is only ever read here.
// Sections are kept as the JSON found in the file and served back unchanged.
// Each top-level section is checked on its own: a missing or ill-shaped section
// falls back to its empty default without affecting the others.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Map, Value};

/// First year of the default date range, used when no summary is available.
pub const DEFAULT_START_YEAR: i32 = 2008;
/// Last year of the default date range, used when no summary is available.
pub const DEFAULT_END_YEAR: i32 = 2024;

const YEARLY_STATS: &str = "yearlyStats";
const MAJOR_EVENTS: &str = "majorEvents";
const SUMMARY: &str = "summary";
const TOP_WORDS: &str = "topWords";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yearly_stats: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub major_events: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_words: Option<Value>,
}

impl<'de> Deserialize<'de> for Dataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self::from_map(map))
    }
}

impl Dataset {
    /// The zero-data dataset served while no backing file can be loaded.
    pub fn empty() -> Self {
        Self {
            yearly_stats: Some(default_yearly_stats()),
            major_events: Some(default_major_events()),
            summary: Some(default_summary()),
            top_words: Some(default_top_words()),
        }
    }

    /// Pick the known sections out of the top-level JSON object.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        Self {
            yearly_stats: section(&mut map, YEARLY_STATS, Value::is_object),
            major_events: section(&mut map, MAJOR_EVENTS, Value::is_array),
            summary: section(&mut map, SUMMARY, Value::is_object),
            top_words: section(&mut map, TOP_WORDS, Value::is_object),
        }
    }

    pub fn yearly_stats(&self) -> Value {
        self.yearly_stats.clone().unwrap_or_else(default_yearly_stats)
    }

    pub fn major_events(&self) -> Value {
        self.major_events.clone().unwrap_or_else(default_major_events)
    }

    pub fn summary(&self) -> Value {
        self.summary.clone().unwrap_or_else(default_summary)
    }

    /// The `limit` most popular words with their frequencies.
    pub fn top_words(&self, limit: usize) -> TopWords {
        self.top_words
            .as_ref()
            .map(|section| TopWords::from_section(section, limit))
            .unwrap_or_default()
    }
}

fn section(map: &mut Map<String, Value>, key: &str, expected: fn(&Value) -> bool) -> Option<Value> {
    match map.remove(key) {
        None | Some(Value::Null) => None,
        Some(value) if expected(&value) => Some(value),
        Some(value) => {
            tracing::warn!("Ignoring `{}` section of unexpected shape: {}", key, value);
            None
        }
    }
}

// MARK: Defaults

/// Per-year aggregates as four empty parallel sequences.
pub fn default_yearly_stats() -> Value {
    json!({ "years": [], "postCounts": [], "avgScores": [], "avgComments": [] })
}

pub fn default_major_events() -> Value {
    json!([])
}

pub fn default_summary() -> Value {
    json!({
        "totalPosts": 0,
        "avgScore": "0",
        "avgComments": "0",
        "dateRange": { "start": DEFAULT_START_YEAR, "end": DEFAULT_END_YEAR },
        "topPosts": [],
    })
}

fn default_top_words() -> Value {
    json!({ "words": [], "frequencies": [] })
}

// MARK: Top words

/// Most frequent title words paired with their frequencies, sorted by descending frequency.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TopWords {
    pub words: Vec<Value>,
    pub frequencies: Vec<Value>,
}

impl TopWords {
    /// Keep the first `limit` pairs of a `topWords` section.
    /// A sequence that is not an array counts as empty, and unpaired trailing
    /// entries are dropped so both sequences stay the same length.
    pub fn from_section(section: &Value, limit: usize) -> Self {
        let sequence = |key: &str| section.get(key).and_then(Value::as_array).map(Vec::as_slice).unwrap_or_default();
        let words = sequence("words");
        let frequencies = sequence("frequencies");
        let len = limit.min(words.len()).min(frequencies.len());
        Self {
            words: words[..len].to_vec(),
            frequencies: frequencies[..len].to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len().min(self.frequencies.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
