use std::path::PathBuf;

pub const DEFAULT_OUTPUT_PATH: &str = "results.xlsx";

/// Settings read from the environment (and `.env`, when present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub output_path: PathBuf,
    pub parser_config_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_vars(
            std::env::var("QD_OUTPUT_PATH").ok(),
            std::env::var("QD_CONFIG_PATH").ok(),
        )
    }

    fn from_vars(output_path: Option<String>, parser_config_path: Option<String>) -> Self {
        let output_path = output_path
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.into());
        let parser_config_path = parser_config_path
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .map(PathBuf::from);
        Self {
            output_path: PathBuf::from(output_path),
            parser_config_path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_vars(None, None);
        assert_eq!(config.output_path, PathBuf::from("results.xlsx"));
        assert_eq!(config.parser_config_path, None);
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_vars(Some("  ".into()), Some("".into()));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.parser_config_path, None);
    }

    #[test]
    fn test_values_from_vars() {
        let config = Config::from_vars(Some("out/q2.xlsx".into()), Some("layout.json".into()));
        assert_eq!(config.output_path, PathBuf::from("out/q2.xlsx"));
        assert_eq!(config.parser_config_path, Some(PathBuf::from("layout.json")));
    }
}
