use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::document::{Document, decode_entities};
use crate::extractor::defaults::{COUNT_DEFAULT, RATING_DEFAULT};
use crate::extractor::errors::ExtractError;
use crate::extractor::model::{Rating, StructuredMetadata};

const SCHEMA_TAG: &str = "script";
const SCHEMA_MARKER: &str = "application/ld+json";

/// JSON-LD payload as published on title pages. Only `@type` is required.
///
/// Properties stay untyped: schema.org allows several shapes for each of them
/// (`"image"` as a URL or an `ImageObject`, numbers as strings, one value or a
/// list), and a shape we do not understand falls back to the default.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct LdSchema {
    #[serde(rename = "@type")]
    kind: Value,
    image: Value,
    description: Value,
    aggregate_rating: Value,
    content_rating: Value,
    genre: Value,
    actor: Value,
    director: Value,
}

/// Parse the page's JSON-LD block. Its absence or a payload that is not a
/// typed object aborts the whole title extraction.
pub fn extract_structured(doc: &Document) -> Result<StructuredMetadata, ExtractError> {
    let block = doc
        .find_node(SCHEMA_TAG, SCHEMA_MARKER)
        .ok_or(ExtractError::StructuredDataMissing)?;

    let payload: Value = serde_json::from_str(&block.text())?;
    if !payload.is_object() {
        return Err(ExtractError::StructuredDataInvalid(
            "expected a JSON object".to_string(),
        ));
    }
    let schema: LdSchema = serde_json::from_value(payload)?;

    let kind = type_name(&schema.kind)
        .filter(|kind| !kind.trim().is_empty())
        .ok_or_else(|| ExtractError::StructuredDataInvalid("@type is empty".to_string()))?;
    debug!(content_type = %kind, "parsed structured data block");

    Ok(StructuredMetadata {
        content_type: kind,
        image: image_url(&schema.image).unwrap_or_default(),
        plot: text(&schema.description)
            .map(decode_entities)
            .unwrap_or_default(),
        rating: rating(&schema.aggregate_rating),
        content_rating: text(&schema.content_rating)
            .map(str::to_string)
            .unwrap_or_default(),
        genre: one_or_many(&schema.genre)
            .filter_map(text)
            .map(decode_entities)
            .collect(),
        actors: person_names(&schema.actor),
        directors: person_names(&schema.director),
    })
}

/// schema.org lets most properties be a single value or a list.
fn one_or_many(value: &Value) -> impl Iterator<Item = &Value> {
    match value {
        Value::Array(values) => values.iter(),
        Value::Null => (&[] as &[Value]).iter(),
        other => std::slice::from_ref(other).iter(),
    }
}

fn text(value: &Value) -> Option<&str> {
    value.as_str()
}

/// `"Movie"` or `["Movie", ...]`; the first named type wins.
fn type_name(value: &Value) -> Option<String> {
    one_or_many(value).find_map(text).map(str::to_string)
}

/// A URL string or an `ImageObject` carrying one.
fn image_url(value: &Value) -> Option<String> {
    one_or_many(value)
        .find_map(|image| match image {
            Value::String(url) => Some(url.as_str()),
            Value::Object(object) => object
                .get("url")
                .or_else(|| object.get("contentUrl"))
                .and_then(Value::as_str),
            _ => None,
        })
        .map(str::to_string)
}

fn rating(value: &Value) -> Rating {
    let Value::Object(rating) = value else {
        return Rating::default();
    };
    Rating {
        count: rating
            .get("ratingCount")
            .and_then(|count| match count {
                Value::Number(n) => n.as_u64(),
                Value::String(s) => s.trim().replace(',', "").parse().ok(),
                _ => None,
            })
            .unwrap_or(COUNT_DEFAULT),
        star: rating
            .get("ratingValue")
            .and_then(|star| match star {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse().ok(),
                _ => None,
            })
            .filter(|star| star.is_finite())
            .unwrap_or(RATING_DEFAULT),
    }
}

/// `Person` objects or bare names.
fn person_names(people: &Value) -> Vec<String> {
    one_or_many(people)
        .filter_map(|person| match person {
            Value::Object(person) => person.get("name").and_then(Value::as_str),
            other => text(other),
        })
        .map(decode_entities)
        .collect()
}
