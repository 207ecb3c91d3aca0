use crate::domain::model::{Role, User};
use crate::utils::error::{Result, SignupError};
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_required_field, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub user: UserConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub url: String,
    pub api_key: String,
    pub access_token: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    pub id: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<Role>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub json: Option<bool>,
    pub level: Option<String>,
}

impl BackendConfig {
    pub fn timeout_seconds(&self) -> u64 {
        self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    /// The user token, ignoring empty or unsubstituted `${VAR}` values.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.starts_with("${"))
    }
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SignupError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| SignupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SIGNUP_API_KEY})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var pattern is valid")
        });

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("backend.url", &self.backend.url)?;
        validate_non_empty_string("backend.api_key", &self.backend.api_key)?;
        if self.backend.api_key.starts_with("${") {
            return Err(SignupError::InvalidConfigValueError {
                field: "backend.api_key".to_string(),
                value: self.backend.api_key.clone(),
                reason: "Environment variable is not set".to_string(),
            });
        }
        validate_range("backend.timeout_seconds", self.backend.timeout_seconds(), 1, 300)?;

        let id = validate_required_field("user.id", &self.user.id)?;
        validate_non_empty_string("user.id", id)?;

        Ok(())
    }

    /// The signed-in user; display name falls back to the id, role to player.
    pub fn current_user(&self) -> Result<User> {
        let id = validate_required_field("user.id", &self.user.id)?.clone();
        Ok(User {
            display_name: self.user.display_name.clone().unwrap_or_else(|| id.clone()),
            role: self.user.role.unwrap_or(Role::Player),
            id,
        })
    }

    pub fn json_logging(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
