use anyhow::{Context, Result};

/// Environment variable holding the GitHub token.
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Abstract token lookup interface
pub trait TokenSource {
    /// Return the token, or Ok(None) if none is configured
    fn load(&self) -> Result<Option<String>>;
}

/// Reads the token from an environment variable.
pub struct EnvTokenSource {
    var: String,
}

impl EnvTokenSource {
    pub fn new() -> Self {
        EnvTokenSource {
            var: TOKEN_ENV_VAR.to_string(),
        }
    }

    pub fn with_var(var: &str) -> Self {
        EnvTokenSource {
            var: var.to_string(),
        }
    }

    pub fn var(&self) -> &str {
        &self.var
    }
}

impl Default for EnvTokenSource {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenSource for EnvTokenSource {
    fn load(&self) -> Result<Option<String>> {
        match std::env::var(&self.var) {
            Ok(value) => Ok(Some(value.trim().to_string()).filter(|t| !t.is_empty())),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(err) => Err(err).with_context(|| format!("Failed to read {}", self.var)),
        }
    }
}

/// Loads the token or fails with a message naming where it was expected.
pub fn require_token<S: TokenSource>(source: &S, name: &str) -> Result<String> {
    source
        .load()?
        .with_context(|| format!("No GitHub token found. Please set {name}."))
}
