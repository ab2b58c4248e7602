//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use pcommon::{GenerationOptions, TranscriptKey};
//!
//! let key = TranscriptKey::from("@chat_history");
//! let options = GenerationOptions::default().with_temperature(0.3);
//!
//! assert_eq!(key.as_str(), "@chat_history");
//! assert_eq!(options.temperature, 0.3);
//! assert_eq!(options.max_output_tokens, 1024);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use pcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Identifier newtypes shared between the chat and storage layers.
    //!
    //! ```rust
    //! use pcommon::TranscriptKey;
    //!
    //! let key = TranscriptKey::new("@work_chat");
    //! assert_eq!(key.to_string(), "@work_chat");
    //! assert_eq!(TranscriptKey::default().as_str(), "@chat_history");
    //! ```

    use std::fmt::{Display, Formatter};

    pub const DEFAULT_TRANSCRIPT_KEY: &str = "@chat_history";

    /// Opaque key under which a transcript is persisted.
    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct TranscriptKey(String);

    impl TranscriptKey {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Default for TranscriptKey {
        fn default() -> Self {
            Self::new(DEFAULT_TRANSCRIPT_KEY)
        }
    }

    impl Display for TranscriptKey {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for TranscriptKey {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for TranscriptKey {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Generation settings attached to every completion request.
    //!
    //! ```rust
    //! use pcommon::GenerationOptions;
    //!
    //! let options = GenerationOptions::default()
    //!     .with_temperature(0.2)
    //!     .with_max_output_tokens(128);
    //!
    //! assert_eq!(options.temperature, 0.2);
    //! assert_eq!(options.max_output_tokens, 128);
    //! assert!(options.validate().is_ok());
    //! ```

    use std::ops::RangeInclusive;

    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1024;
    pub const TEMPERATURE_RANGE: RangeInclusive<f32> = 0.0..=2.0;

    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct GenerationOptions {
        pub temperature: f32,
        pub max_output_tokens: u32,
    }

    impl Default for GenerationOptions {
        fn default() -> Self {
            Self {
                temperature: DEFAULT_TEMPERATURE,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            }
        }
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = temperature;
            self
        }

        pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
            self.max_output_tokens = max_output_tokens;
            self
        }

        /// Returns a description of the first invalid setting, if any.
        pub fn validate(&self) -> Result<(), String> {
            if !TEMPERATURE_RANGE.contains(&self.temperature) {
                return Err("temperature must be in the inclusive range 0.0..=2.0".to_string());
            }

            if self.max_output_tokens == 0 {
                return Err("max_output_tokens must be greater than zero".to_string());
            }

            Ok(())
        }
    }
}

pub use context::{DEFAULT_TRANSCRIPT_KEY, TranscriptKey};
pub use future::BoxFuture;
pub use model::{DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, GenerationOptions};

#[cfg(test)]
mod tests {
    use super::{GenerationOptions, TranscriptKey};

    #[test]
    fn transcript_key_round_trips_strings() {
        let key = TranscriptKey::new("@chat_history");
        let other = TranscriptKey::from("drafts".to_string());

        assert_eq!(key.as_str(), "@chat_history");
        assert_eq!(key, TranscriptKey::default());
        assert_eq!(other.to_string(), "drafts");
    }

    #[test]
    fn generation_options_default_to_chat_settings() {
        let options = GenerationOptions::default();
        assert_eq!(options.temperature, 0.7);
        assert_eq!(options.max_output_tokens, 1024);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn generation_options_reject_out_of_range_values() {
        let hot = GenerationOptions::default().with_temperature(2.5);
        let negative = GenerationOptions::default().with_temperature(-0.1);
        let silent = GenerationOptions::default().with_max_output_tokens(0);

        assert!(hot.validate().is_err());
        assert!(negative.validate().is_err());
        assert!(silent.validate().is_err());
        assert!(
            GenerationOptions::default()
                .with_temperature(2.0)
                .validate()
                .is_ok()
        );
    }
}
