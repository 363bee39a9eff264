use std::path::PathBuf;

use thiserror::Error;
use url::form_urlencoded;

#[derive(Debug, Error, PartialEq)]
pub enum ServerConfigError {
    #[error("{name} must be a valid port number, got `{value}`")]
    InvalidPort { name: &'static str, value: String },
}

/// Runtime settings read from the environment at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub pages_root: PathBuf,
    pub plugin_config_path: PathBuf,
    /// Route prefix of the admin panel, always starting with `/` and never ending with one.
    pub admin_base: String,
    pub base_url: String,
    pub cors_allowed_origins: Option<Vec<String>>,
    pub admin_secret: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServerConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(value) => value
                .trim()
                .parse::<u16>()
                .map_err(|_| ServerConfigError::InvalidPort { name: "PORT", value })?,
            None => 8080,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            port,
            pages_root: lookup("PAGES_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./user/pages")),
            plugin_config_path: lookup("PLUGIN_CONFIG_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./admin-addon-media-metadata.yaml")),
            admin_base: normalize_base(&lookup("ADMIN_BASE").unwrap_or_else(|| "/admin".into())),
            base_url: lookup("BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_default(),
            cors_allowed_origins,
            admin_secret: lookup("ADMIN_SECRET").filter(|s| !s.is_empty()),
        })
    }

    /// URL the admin UI posts edits to for a given page.
    ///
    /// The route is form-encoded so it reads back as a single `page` value.
    pub fn task_url(&self, page: &str) -> String {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("page", page.trim_matches('/'))
            .finish();
        format!(
            "{}{}/media-metadata/task?{}",
            self.base_url, self.admin_base, query
        )
    }
}

fn normalize_base(base: &str) -> String {
    let trimmed = base.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<ServerConfig, ServerConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.pages_root, PathBuf::from("./user/pages"));
        assert_eq!(config.admin_base, "/admin");
        assert_eq!(config.base_url, "");
        assert_eq!(config.cors_allowed_origins, None);
        assert_eq!(config.admin_secret, None);
    }

    #[test]
    fn values_are_normalized() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("ADMIN_BASE", "backend/"),
            ("BASE_URL", "https://example.org/"),
            ("CORS_ALLOWED_ORIGINS", "https://a.test, https://b.test,"),
            ("ADMIN_SECRET", ""),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.admin_base, "/backend");
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec!["https://a.test".to_string(), "https://b.test".to_string()])
        );
        assert_eq!(config.admin_secret, None);
        assert_eq!(
            config.task_url("/blog/post/"),
            "https://example.org/backend/media-metadata/task?page=blog%2Fpost"
        );
    }

    #[test]
    fn task_url_encodes_query_characters() {
        let config = config_from(&[]).unwrap();
        let url = config.task_url("a b&c#d+e");

        assert_eq!(url, "/admin/media-metadata/task?page=a+b%26c%23d%2Be");

        let query = url.split_once('?').unwrap().1;
        let pairs: Vec<_> = form_urlencoded::parse(query.as_bytes()).into_owned().collect();
        assert_eq!(pairs, vec![("page".to_string(), "a b&c#d+e".to_string())]);
    }

    #[test]
    fn invalid_port_is_rejected() {
        assert_eq!(
            config_from(&[("PORT", "http")]),
            Err(ServerConfigError::InvalidPort {
                name: "PORT",
                value: "http".to_string()
            })
        );
    }
}
