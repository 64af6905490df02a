use encoding_rs::{Encoding, UTF_8};
use ghibli_core::{Character, Film, UNKNOWN_ATTRIBUTE};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode body as {encoding}")]
    Charset { encoding: String },
    #[error("invalid JSON: {0}")]
    Json(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}

/// Decode a response body to text: BOM -> Content-Type charset -> UTF-8.
pub fn decode_text(bytes: &[u8], content_type: Option<&str>) -> Result<String, DecodeError> {
    let encoding = Encoding::for_bom(bytes)
        .map(|(encoding, _)| encoding)
        .or_else(|| {
            content_type
                .and_then(extract_charset)
                .and_then(|label| Encoding::for_label(label.as_bytes()))
        })
        .unwrap_or(UTF_8);

    let (text, _, had_errors) = encoding.decode(bytes);
    if had_errors {
        return Err(DecodeError::Charset {
            encoding: encoding.name().to_string(),
        });
    }
    Ok(text.into_owned())
}

fn extract_charset(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        name.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(&['"', '\''][..]).to_string())
    })
}

/// Decode `GET /films`. One malformed film fails the whole list.
pub fn decode_films(text: &str) -> Result<Vec<Film>, DecodeError> {
    let records: Vec<FilmRecord> = serde_json::from_str(text)?;
    Ok(records.into_iter().map(Film::from).collect())
}

/// Decode the `people` URLs of `GET /films/{id}`; absent or null means none.
pub fn decode_people(text: &str) -> Result<Vec<String>, DecodeError> {
    let record: FilmPeopleRecord = serde_json::from_str(text)?;
    Ok(record.people.unwrap_or_default())
}

pub fn decode_character(text: &str) -> Result<Character, DecodeError> {
    let record: CharacterRecord = serde_json::from_str(text)?;
    Ok(record.into())
}

#[derive(Debug, Deserialize)]
struct FilmRecord {
    #[serde(deserialize_with = "required_text")]
    id: String,
    #[serde(deserialize_with = "required_text")]
    title: String,
    #[serde(deserialize_with = "required_text")]
    original_title: String,
    #[serde(deserialize_with = "required_text")]
    description: String,
    #[serde(deserialize_with = "required_text")]
    director: String,
    #[serde(deserialize_with = "required_text")]
    release_date: String,
    #[serde(deserialize_with = "required_text")]
    image: String,
    #[serde(default, deserialize_with = "optional_text")]
    movie_banner: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    running_time: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    rt_score: Option<String>,
}

impl From<FilmRecord> for Film {
    fn from(record: FilmRecord) -> Self {
        Film {
            id: record.id,
            title: record.title,
            original_title: record.original_title,
            description: record.description,
            director: record.director,
            release_date: record.release_date,
            image: record.image,
            movie_banner: record.movie_banner.unwrap_or_default(),
            running_time: record.running_time.unwrap_or_default(),
            rt_score: record.rt_score.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct FilmPeopleRecord {
    #[serde(default)]
    people: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
struct CharacterRecord {
    #[serde(deserialize_with = "required_text")]
    id: String,
    #[serde(deserialize_with = "required_text")]
    name: String,
    #[serde(default, deserialize_with = "optional_text")]
    gender: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    age: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    eye_color: Option<String>,
    #[serde(default, deserialize_with = "optional_text")]
    hair_color: Option<String>,
}

impl From<CharacterRecord> for Character {
    fn from(record: CharacterRecord) -> Self {
        let or_unknown = |value: Option<String>| value.unwrap_or_else(|| UNKNOWN_ATTRIBUTE.into());
        Character {
            id: record.id,
            name: record.name,
            gender: or_unknown(record.gender),
            age: or_unknown(record.age),
            eye_color: or_unknown(record.eye_color),
            hair_color: or_unknown(record.hair_color),
        }
    }
}

/// Scalars are accepted as text (`"93"` and `93` both give `"93"`).
fn scalar_text(value: Value) -> Result<Option<String>, &'static str> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) => Ok(Some(text)),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Array(_) | Value::Object(_) => Err("expected a string"),
    }
}

fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?)
        .map_err(de::Error::custom)?
        .ok_or_else(|| de::Error::custom("required field is null"))
}

fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    scalar_text(Value::deserialize(deserializer)?).map_err(de::Error::custom)
}
