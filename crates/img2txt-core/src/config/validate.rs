//! Configuration validation and provider resolution.

use crate::error::ConfigError;

use super::{resolve_env_var, Config, ProviderKind, RunConfiguration};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["pretty", "json"];

impl Config {
    /// Validate values that must hold regardless of the selected provider.
    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.level must be one of {}",
                LOG_LEVELS.join(", ")
            )));
        }
        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging.format must be one of {}",
                LOG_FORMATS.join(", ")
            )));
        }
        Ok(())
    }

    /// Select the provider and check that every key it needs is present.
    ///
    /// An explicit `provider` wins. Otherwise the provider whose API key is set
    /// is chosen; having both or neither set is an error.
    pub fn resolve(&self, provider: Option<ProviderKind>) -> Result<RunConfiguration, ConfigError> {
        let provider = match provider {
            Some(provider) => provider,
            None => self.detect_provider()?,
        };

        let prompt = resolve_env_var(&self.prompt);
        let resolved = match provider {
            ProviderKind::OpenAi => (
                resolve_env_var(&self.openai_key),
                prompt,
                resolve_env_var(&self.openai_model_name),
                resolve_env_var(&self.openai_api_endpoint),
                ["openAIKey", "prompt", "openAIModelName", "openAIApiEndpoint"],
            ),
            ProviderKind::Gemini => (
                resolve_env_var(&self.gemini_key),
                prompt,
                resolve_env_var(&self.gemini_model_name),
                Some(self.gemini_endpoint()),
                ["geminiKey", "prompt", "geminiModelName", "geminiApiEndpoint"],
            ),
        };

        match resolved {
            (Some(api_key), Some(prompt), Some(model_name), Some(endpoint), _) => {
                Ok(RunConfiguration {
                    provider,
                    api_key,
                    prompt,
                    model_name,
                    endpoint,
                })
            }
            (api_key, prompt, model_name, endpoint, names) => {
                let missing: Vec<&str> = [
                    api_key.is_none(),
                    prompt.is_none(),
                    model_name.is_none(),
                    endpoint.is_none(),
                ]
                .iter()
                .zip(names)
                .filter(|(is_missing, _)| **is_missing)
                .map(|(_, name)| name)
                .collect();
                Err(ConfigError::ValidationError(format!(
                    "Please ensure {} set in the config file ({} provider)",
                    quote_list(&missing),
                    provider.display_name()
                )))
            }
        }
    }

    fn detect_provider(&self) -> Result<ProviderKind, ConfigError> {
        let has_openai = resolve_env_var(&self.openai_key).is_some();
        let has_gemini = resolve_env_var(&self.gemini_key).is_some();
        match (has_openai, has_gemini) {
            (true, false) => Ok(ProviderKind::OpenAi),
            (false, true) => Ok(ProviderKind::Gemini),
            (true, true) => Err(ConfigError::ValidationError(
                "both 'openAIKey' and 'geminiKey' are set; choose one with --provider".into(),
            )),
            (false, false) => Err(ConfigError::ValidationError(
                "no provider configured; set 'openAIKey' or 'geminiKey' in the config file".into(),
            )),
        }
    }
}

fn quote_list(names: &[&str]) -> String {
    let quoted: Vec<String> = names.iter().map(|n| format!("'{n}'")).collect();
    let verb = if quoted.len() == 1 { "is" } else { "are" };
    match quoted.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {last} {verb}", rest.join(", ")),
        _ => format!("{} {verb}", quoted.join("")),
    }
}
