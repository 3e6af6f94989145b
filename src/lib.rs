//! Keyscout library exports for testing

use clap::ValueEnum;

pub mod core;
pub mod inference;
pub mod leads;
pub mod tui;

#[cfg(test)]
pub mod test_support;

/// Chat-completion backend. All three speak the OpenAI `/chat/completions` dialect.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    #[value(name = "openai")]
    OpenAi,
    #[default]
    #[value(name = "openrouter")]
    OpenRouter,
    #[value(name = "lmstudio")]
    LmStudio,
}

impl Provider {
    pub fn name(self) -> &'static str {
        match self {
            Provider::OpenAi => "openai",
            Provider::OpenRouter => "openrouter",
            Provider::LmStudio => "lmstudio",
        }
    }

    pub fn default_base_url(self) -> &'static str {
        match self {
            Provider::OpenAi => "https://api.openai.com/v1",
            Provider::OpenRouter => "https://openrouter.ai/api/v1",
            Provider::LmStudio => "http://localhost:1234/v1",
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Provider::OpenAi => "gpt-4o-mini",
            Provider::OpenRouter => "openai/gpt-4o-mini",
            Provider::LmStudio => "local-model",
        }
    }

    /// Conventional env var holding this provider's key. `None` for local servers.
    pub fn api_key_env(self) -> Option<&'static str> {
        match self {
            Provider::OpenAi => Some("OPENAI_API_KEY"),
            Provider::OpenRouter => Some("OPENROUTER_API_KEY"),
            Provider::LmStudio => None,
        }
    }

    pub fn requires_api_key(self) -> bool {
        self.api_key_env().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_parses_from_config_names() {
        assert_eq!(Provider::from_str("openai", true), Ok(Provider::OpenAi));
        assert_eq!(Provider::from_str("OpenRouter", true), Ok(Provider::OpenRouter));
        assert_eq!(Provider::from_str("lmstudio", true), Ok(Provider::LmStudio));
        assert!(Provider::from_str("anthropic", true).is_err());
    }

    #[test]
    fn local_provider_needs_no_key() {
        assert!(!Provider::LmStudio.requires_api_key());
        assert!(Provider::OpenRouter.requires_api_key());
        assert_eq!(Provider::OpenAi.api_key_env(), Some("OPENAI_API_KEY"));
    }
}
