use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::SendCardError;

/// Inbound payload as posted by the card generator. Fields are loosely typed:
/// falsy JSON values (`null`, `false`, `0`, `""`) read as absent and other
/// scalars are stringified, so `"vibe": 7` renders as `7`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CardEmailRequest {
    #[serde(default, deserialize_with = "loose_string")]
    to: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    card_name: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    vibe: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    body_text: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    card_image_url: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    share_url: Option<String>,
}

fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok((!is_falsy(&value)).then(|| stringify(&value)))
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match (n.as_i64(), n.as_u64(), n.as_f64()) {
            (Some(i), _, _) => i.to_string(),
            (_, Some(u), _) => u.to_string(),
            (_, _, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// A request whose required fields are all present and truthy.
#[derive(Clone, Debug)]
pub struct CardEmail {
    pub to: String,
    pub card_name: String,
    pub vibe: Option<String>,
    pub body_text: Option<String>,
    pub card_image_url: String,
    pub share_url: Option<String>,
}

impl CardEmailRequest {
    pub fn validate(self) -> Result<CardEmail, SendCardError> {
        let (Some(to), Some(card_name), Some(card_image_url)) =
            (self.to, self.card_name, self.card_image_url)
        else {
            return Err(SendCardError::MissingFields);
        };

        Ok(CardEmail {
            to,
            card_name,
            vibe: self.vibe,
            body_text: self.body_text,
            card_image_url,
            share_url: self.share_url,
        })
    }
}

impl CardEmail {
    pub fn subject(&self) -> String {
        format!("Dream Oracle — {} ⚡", self.card_name)
    }

    pub fn attachment_filename(&self) -> String {
        format!("{}.jpg", self.card_name)
    }
}
