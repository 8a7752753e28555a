use crate::database::column::Column;
use crate::database::column::ColumnType;
use crate::database::table::Table;
use crate::database::table::TableRow;
use duckdb::types::Value;
use serde::Deserialize;
use serde::Serialize;

pub const JOKE_ID_SEQUENCE: &str = "jokes_id_seq";

/// Stored jokes; `id` comes from [`JOKE_ID_SEQUENCE`].
pub const JOKES_TABLE: Table = Table {
    name: "jokes",
    columns: &[
        Column::new("id", ColumnType::BigInt).primary_key().default("nextval('jokes_id_seq')"),
        Column::new("category", ColumnType::Varchar),
        Column::new("type", ColumnType::Varchar),
        Column::new("joke", ColumnType::Varchar),
        Column::new("setup", ColumnType::Varchar),
        Column::new("delivery", ColumnType::Varchar),
        Column::new("nsfw", ColumnType::Boolean).default("false"),
        Column::new("political", ColumnType::Boolean).default("false"),
        Column::new("sexist", ColumnType::Boolean).default("false"),
        Column::new("safe", ColumnType::Boolean).default("false"),
        Column::new("lang", ColumnType::Varchar),
    ],
};

/// Content flags of an API joke. Absent flags are false.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct JokeFlags {
    #[serde(default)]
    pub nsfw: bool,
    #[serde(default)]
    pub political: bool,
    #[serde(default)]
    pub sexist: bool,
    #[serde(default)]
    pub safe: Option<bool>,
}

/// A joke as returned by the joke API.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiJoke {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub joke: Option<String>,
    #[serde(default)]
    pub setup: Option<String>,
    #[serde(default)]
    pub delivery: Option<String>,
    #[serde(default)]
    pub flags: JokeFlags,
    #[serde(default)]
    pub safe: Option<bool>,
    #[serde(default)]
    pub lang: String,
}

/// Error body of the joke API
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ApiFailure {
    pub error: bool,
    pub message: String,
    #[serde(default, rename = "additionalInfo")]
    pub additional_info: Option<String>,
}

/// The three shapes the joke API answers with.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ApiResponse {
    Batch { jokes: Vec<ApiJoke> },
    Failure(ApiFailure),
    Single(ApiJoke),
}

/// A joke ready to be stored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Joke {
    pub category: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub joke: Option<String>,
    pub setup: Option<String>,
    pub delivery: Option<String>,
    pub nsfw: bool,
    pub political: bool,
    pub sexist: bool,
    pub safe: bool,
    pub lang: String,
}

impl From<ApiJoke> for Joke {
    fn from(joke: ApiJoke) -> Self {
        let (text, setup, delivery) = match joke.kind.as_str() {
            "single" => (joke.joke, None, None),
            "twopart" => (None, joke.setup, joke.delivery),
            _ => (None, None, None),
        };
        Joke {
            category: joke.category,
            kind: joke.kind,
            joke: text,
            setup,
            delivery,
            nsfw: joke.flags.nsfw,
            political: joke.flags.political,
            sexist: joke.flags.sexist,
            safe: joke.flags.safe.or(joke.safe).unwrap_or(false),
            lang: joke.lang,
        }
    }
}

impl TableRow for Joke {
    fn values(&self) -> Vec<Value> {
        let text = |value: &Option<String>| value.clone().map(Value::Text).unwrap_or(Value::Null);
        vec![
            Value::Text(self.category.to_owned()),
            Value::Text(self.kind.to_owned()),
            text(&self.joke),
            text(&self.setup),
            text(&self.delivery),
            Value::Boolean(self.nsfw),
            Value::Boolean(self.political),
            Value::Boolean(self.sexist),
            Value::Boolean(self.safe),
            Value::Text(self.lang.to_owned()),
        ]
    }
}

/// A joke read back from the store.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct StoredJoke {
    pub id: i64,
    #[serde(flatten)]
    pub joke: Joke,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn api_joke(value: serde_json::Value) -> ApiJoke {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn single_joke_copies_only_the_joke() {
        let joke = Joke::from(api_joke(json!({
            "category": "Programming",
            "type": "single",
            "joke": "There are 10 kinds of people.",
            "setup": "ignored",
            "flags": { "nsfw": false, "political": true, "sexist": false },
            "safe": true,
            "id": 12,
            "lang": "en"
        })));
        assert_eq!(joke.joke.as_deref(), Some("There are 10 kinds of people."));
        assert_eq!(joke.setup, None);
        assert_eq!(joke.delivery, None);
        assert!(joke.political);
        assert!(joke.safe);
    }

    #[test]
    fn twopart_joke_copies_setup_and_delivery() {
        let joke = Joke::from(api_joke(json!({
            "category": "Pun",
            "type": "twopart",
            "joke": "ignored",
            "setup": "Why?",
            "delivery": "Because.",
            "lang": "en"
        })));
        assert_eq!(joke.joke, None);
        assert_eq!(joke.setup.as_deref(), Some("Why?"));
        assert_eq!(joke.delivery.as_deref(), Some("Because."));
        assert!(!joke.nsfw && !joke.political && !joke.sexist && !joke.safe);
    }

    #[test]
    fn unknown_type_copies_no_text() {
        let joke = Joke::from(api_joke(json!({
            "category": "Misc",
            "type": "riddle",
            "joke": "?",
            "setup": "?",
            "lang": "de"
        })));
        assert_eq!((joke.joke, joke.setup, joke.delivery), (None, None, None));
        assert_eq!(joke.kind, "riddle");
    }

    #[test]
    fn flag_safe_takes_precedence() {
        let joke = Joke::from(api_joke(json!({
            "category": "Misc",
            "type": "single",
            "joke": "!",
            "flags": { "safe": false },
            "safe": true
        })));
        assert!(!joke.safe);
    }

    #[test]
    fn response_shapes() {
        let batch: ApiResponse = serde_json::from_value(json!({
            "error": false,
            "amount": 1,
            "jokes": [{ "category": "Pun", "type": "twopart", "setup": "a", "delivery": "b", "lang": "en" }]
        })).unwrap();
        assert!(matches!(batch, ApiResponse::Batch { ref jokes } if jokes.len() == 1));

        let single: ApiResponse = serde_json::from_value(json!({
            "error": false, "category": "Pun", "type": "single", "joke": "a", "lang": "en"
        })).unwrap();
        assert!(matches!(single, ApiResponse::Single(_)));

        let failure: ApiResponse = serde_json::from_value(json!({
            "error": true, "internalError": false, "code": 106, "message": "No matching joke found"
        })).unwrap();
        assert!(matches!(failure, ApiResponse::Failure(ref body) if body.message == "No matching joke found"));
    }

    #[test]
    fn stored_joke_serializes_flat() {
        let stored = StoredJoke {
            id: 3,
            joke: Joke {
                category: "Pun".to_owned(),
                kind: "single".to_owned(),
                joke: Some("a".to_owned()),
                lang: "en".to_owned(),
                ..Joke::default()
            },
        };
        assert_eq!(serde_json::to_value(&stored).unwrap(), json!({
            "id": 3,
            "category": "Pun",
            "type": "single",
            "joke": "a",
            "setup": null,
            "delivery": null,
            "nsfw": false,
            "political": false,
            "sexist": false,
            "safe": false,
            "lang": "en"
        }));
    }

    #[test]
    fn values_follow_the_table() {
        assert_eq!(Joke::default().values().len(), JOKES_TABLE.insert_columns().count());
    }
}
