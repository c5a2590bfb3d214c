use super::client::ensure_ok;
use super::{CONSENT_PATH, ConsentBackend, DELETE_PATH, EXPORT_PATH, HttpClient};
use crate::core::error::ChatError;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize)]
struct ConsentPayload {
    #[serde(default, deserialize_with = "truthy")]
    consent: Option<bool>,
}

/// Reads the flag the way the page does: `1`, `"true"` and `true` all count, `null` means unset.
fn truthy<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        Value::Bool(flag) => Some(flag),
        Value::Number(n) => Some(n.as_f64().is_some_and(|n| n != 0.0)),
        Value::String(s) => Some(!s.is_empty()),
        Value::Array(_) | Value::Object(_) => Some(true),
    })
}

#[derive(Clone)]
pub struct HttpConsentBackend {
    client: HttpClient,
}

impl HttpConsentBackend {
    pub fn new(client: HttpClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ConsentBackend for HttpConsentBackend {
    async fn consent(&self) -> Result<Option<bool>, ChatError> {
        let response = ensure_ok(self.client.get(CONSENT_PATH).await?).await?;
        let payload: ConsentPayload = response.json().await?;
        Ok(payload.consent)
    }

    async fn set_consent(&self, consent: bool) -> Result<serde_json::Value, ChatError> {
        let payload = ConsentPayload {
            consent: Some(consent),
        };
        let response = ensure_ok(self.client.post(CONSENT_PATH, &payload).await?).await?;
        Ok(response.json().await?)
    }

    async fn export_data(&self) -> Result<Vec<u8>, ChatError> {
        let response = ensure_ok(self.client.get(EXPORT_PATH).await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn delete_data(&self) -> Result<(), ChatError> {
        ensure_ok(self.client.delete(DELETE_PATH).await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flag(json: &str) -> Option<bool> {
        serde_json::from_str::<ConsentPayload>(json).unwrap().consent
    }

    #[test]
    fn stored_flags_read_as_truthy_values() {
        assert_eq!(flag(r#"{"consent": true}"#), Some(true));
        assert_eq!(flag(r#"{"consent": 1}"#), Some(true));
        assert_eq!(flag(r#"{"consent": 0}"#), Some(false));
        assert_eq!(flag(r#"{"consent": ""}"#), Some(false));
        assert_eq!(flag(r#"{"consent": null}"#), None);
        assert_eq!(flag(r#"{"user_id": 7}"#), None);
    }

    #[test]
    fn outgoing_flag_is_a_plain_bool() {
        let payload = ConsentPayload {
            consent: Some(false),
        };
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({ "consent": false })
        );
    }
}
