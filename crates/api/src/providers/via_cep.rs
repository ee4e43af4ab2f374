//! ViaCEP client (fallback provider).
//!
//! ViaCEP answers unknown CEPs with a 2xx payload carrying an `erro`
//! flag instead of a 404, and never supplies coordinates.

use serde::Deserialize;
use tracing::{debug, warn};

use cep_clima_core::{CepProviderId, CepResult, ZipCode};

use super::{CepProvider, ProviderError};

/// Client for the ViaCEP API.
#[derive(Clone)]
pub struct ViaCepClient {
    client: reqwest::Client,
    base_url: String,
}

impl ViaCepClient {
    /// Create a new ViaCEP client.
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }
}

#[async_trait::async_trait]
impl CepProvider for ViaCepClient {
    fn id(&self) -> CepProviderId {
        CepProviderId::ViaCep
    }

    async fn lookup(&self, zip: &ZipCode) -> Result<Option<CepResult>, ProviderError> {
        let url = format!("{}/{}/json/", self.base_url, zip);
        debug!(%zip, "querying ViaCEP");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Status {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let payload: ViaCepResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        if payload.erro.is_set() {
            warn!(%zip, "zip code not found on ViaCEP");
            return Ok(None);
        }

        debug!(%zip, "zip code found on ViaCEP");

        Ok(Some(CepResult {
            zip_code: zip.clone(),
            street: none_if_empty(payload.logradouro),
            district: none_if_empty(payload.bairro),
            city: payload.localidade.unwrap_or_default(),
            state: payload.uf.unwrap_or_default(),
            ibge: none_if_empty(payload.ibge),
            // ViaCEP has no coordinate data
            location: None,
            provider: CepProviderId::ViaCep,
        }))
    }
}

/// ViaCEP uses `""` rather than omitting fields it has no data for.
fn none_if_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

#[derive(Debug, Deserialize)]
struct ViaCepResponse {
    logradouro: Option<String>,
    bairro: Option<String>,
    localidade: Option<String>,
    uf: Option<String>,
    ibge: Option<String>,
    #[serde(default)]
    erro: ErroFlag,
}

/// ViaCEP's not-found flag has shipped as both `true` and `"true"`
/// over the years.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErroFlag {
    Bool(bool),
    Text(String),
}

impl ErroFlag {
    fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Text(s) => s == "true",
        }
    }
}

impl Default for ErroFlag {
    fn default() -> Self {
        Self::Bool(false)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_erro_flag_boolean_form() {
        let payload: ViaCepResponse = serde_json::from_str(r#"{"erro": true}"#).unwrap();
        assert!(payload.erro.is_set());
    }

    #[test]
    fn test_erro_flag_string_form() {
        let payload: ViaCepResponse = serde_json::from_str(r#"{"erro": "true"}"#).unwrap();
        assert!(payload.erro.is_set());
    }

    #[test]
    fn test_erro_flag_absent() {
        let payload: ViaCepResponse =
            serde_json::from_str(r#"{"localidade": "São Paulo", "uf": "SP"}"#).unwrap();
        assert!(!payload.erro.is_set());
    }

    #[test]
    fn test_none_if_empty() {
        assert_eq!(none_if_empty(Some(String::new())), None);
        assert_eq!(none_if_empty(None), None);
        assert_eq!(
            none_if_empty(Some("Sé".to_string())),
            Some("Sé".to_string())
        );
    }
}
