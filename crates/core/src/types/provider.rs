//! CEP provider identification.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Identifies which external backend produced a CEP result.
///
/// Serialized with the tag strings the providers are known by
/// (`"brasilapi"` / `"viacep"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CepProviderId {
    /// BrasilAPI (<https://brasilapi.com.br>), the primary provider.
    BrasilApi,
    /// ViaCEP (<https://viacep.com.br>), the fallback provider.
    ViaCep,
}

impl CepProviderId {
    /// Returns the provider tag as a string slice.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BrasilApi => "brasilapi",
            Self::ViaCep => "viacep",
        }
    }
}

impl fmt::Display for CepProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
