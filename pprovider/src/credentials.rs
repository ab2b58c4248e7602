//! API credential handling and placeholder detection.

use crate::CompletionError;

/// Values shipped in sample configs that must never reach the network.
pub const PLACEHOLDER_API_KEYS: &[&str] = &[
    "YOUR_GROQ_API_KEY_HERE",
    "YOUR_OPENAI_API_KEY_HERE",
    "YOUR_API_KEY_HERE",
    "sk-...",
];

#[derive(Clone, PartialEq, Eq)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    pub fn expose(&self) -> &str {
        self.value.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.value.trim().is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl Drop for SecretString {
    fn drop(&mut self) {
        // SAFETY: zero bytes are valid UTF-8 and the string is never read again.
        unsafe {
            self.value.as_mut_vec().fill(0);
        }
    }
}

/// Bearer credential for the completion endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiCredential {
    key: SecretString,
}

impl ApiCredential {
    pub fn new(key: impl Into<String>) -> Self {
        let key: String = key.into();
        Self {
            key: SecretString::new(key.trim()),
        }
    }

    pub fn expose(&self) -> &str {
        self.key.expose()
    }

    pub fn is_placeholder(&self) -> bool {
        PLACEHOLDER_API_KEYS
            .iter()
            .any(|placeholder| self.key.expose() == *placeholder)
    }

    /// Usable means present, non-blank, and not a sample placeholder.
    pub fn ensure_usable(&self) -> Result<(), CompletionError> {
        if self.key.is_empty() {
            return Err(CompletionError::configuration("API key must not be empty"));
        }

        if self.is_placeholder() {
            return Err(CompletionError::configuration(
                "API key is still set to a placeholder value",
            ));
        }

        Ok(())
    }
}

impl std::fmt::Debug for ApiCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiCredential([REDACTED])")
    }
}

pub(crate) fn resolve_credential(
    credential: Option<&ApiCredential>,
) -> Result<&ApiCredential, CompletionError> {
    let Some(credential) = credential else {
        return Err(CompletionError::configuration("no API key configured"));
    };

    credential.ensure_usable()?;
    Ok(credential)
}
