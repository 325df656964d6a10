//! Decoding selections from encoded sequences.
//!
//! Decoding always yields an unselected [`Selection`]. Callers restoring a persisted
//! selection apply [`Selection::select`] after decoding.

use std::fmt;
use std::marker::PhantomData;
use std::str::FromStr;

use clap::ValueEnum;
use serde::de::{self, DeserializeOwned, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer};

use crate::domain::errors::DecodeError;
use crate::domain::model::Selection;

/// Supported document formats for encoded sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum InputFormat {
    /// A JSON array.
    #[default]
    Json,
    /// A YAML sequence.
    #[value(alias = "yml")]
    Yaml,
}

impl InputFormat {
    /// Return a stable identifier suitable for configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InputFormat {
    type Err = FormatParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "json" => Ok(InputFormat::Json),
            "yaml" | "yml" => Ok(InputFormat::Yaml),
            other => Err(FormatParseError::UnknownFormat(other.to_string())),
        }
    }
}

/// Error returned when parsing a format name fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum FormatParseError {
    #[error("unknown format '{0}'")]
    UnknownFormat(String),
}

impl<'de, T> Deserialize<'de> for Selection<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_seq(SelectionVisitor(PhantomData))
    }
}

struct SelectionVisitor<T>(PhantomData<fn() -> T>);

impl<'de, T> Visitor<'de> for SelectionVisitor<T>
where
    T: Deserialize<'de>,
{
    type Value = Selection<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a sequence of items")
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
    where
        A: SeqAccess<'de>,
    {
        // Size hints come from the input and are not trusted.
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0).min(1024));
        loop {
            let index = items.len();
            match seq.next_element::<T>() {
                Ok(Some(item)) => items.push(item),
                Ok(None) => break,
                Err(err) => {
                    return Err(de::Error::custom(format_args!(
                        "invalid item at index {index}: {err}"
                    )));
                }
            }
        }
        Ok(Selection::from_list(items))
    }
}

/// Decode every raw item with `decode`, stopping at the first failure.
pub fn decode_with<I, R, T, E, F>(raw: I, mut decode: F) -> Result<Selection<T>, DecodeError>
where
    I: IntoIterator<Item = R>,
    F: FnMut(R) -> Result<T, E>,
    E: fmt::Display,
{
    let items = raw
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            decode(item).map_err(|err| DecodeError::Item {
                index,
                message: err.to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Selection::from_list(items))
}

/// Decode a document holding a top-level sequence.
pub fn decode_str<T>(input: &str, format: InputFormat) -> Result<Selection<T>, DecodeError>
where
    T: DeserializeOwned,
{
    let selection: Selection<T> = match format {
        InputFormat::Json => serde_json::from_str(input)?,
        InputFormat::Yaml => serde_yaml::from_str(input)?,
    };
    Ok(selection)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_json_sequence_unselected() {
        let selection: Selection<u32> = decode_str("[3, 1, 2]", InputFormat::Json).unwrap();
        assert_eq!(selection.items(), &[3, 1, 2]);
        assert_eq!(selection.selected(), None);
    }

    #[test]
    fn decodes_yaml_sequence() {
        let selection: Selection<String> =
            decode_str("- alpha\n- beta\n", InputFormat::Yaml).unwrap();
        assert_eq!(selection.items(), &["alpha".to_string(), "beta".to_string()]);
    }

    #[test]
    fn reports_offending_item_position() {
        let err = decode_str::<u32>(r#"[1, "two", 3]"#, InputFormat::Json).unwrap_err();
        let source = match err {
            DecodeError::Json(source) => source,
            other => panic!("unexpected error: {other}"),
        };
        assert!(source.to_string().contains("invalid item at index 1"));
    }

    #[test]
    fn rejects_non_sequence_documents() {
        let result = decode_str::<u32>(r#"{"items": [1]}"#, InputFormat::Json);
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }

    #[test]
    fn decode_with_stops_at_first_failure() {
        let err = decode_with(["1", "2", "x", "y"], str::parse::<i64>).unwrap_err();
        match err {
            DecodeError::Item { index, message } => {
                assert_eq!(index, 2);
                assert!(message.contains("invalid digit"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn decode_with_accepts_empty_input() {
        let selection = decode_with(Vec::<&str>::new(), str::parse::<i64>).unwrap();
        assert!(selection.is_empty());
    }

    #[test]
    fn parses_input_format_names() {
        assert_eq!("YML".parse::<InputFormat>(), Ok(InputFormat::Yaml));
        assert_eq!(InputFormat::Json.to_string(), "json");
        assert!("xml".parse::<InputFormat>().is_err());
    }
}
