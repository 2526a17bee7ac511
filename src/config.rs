use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Which rendering context the store's requests originate from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderMode {
    Server,
    Client,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Server => "server",
            RenderMode::Client => "client",
        }
    }
}

impl FromStr for RenderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "server" => Ok(RenderMode::Server),
            "client" => Ok(RenderMode::Client),
            other => Err(format!("unknown render mode '{}'", other)),
        }
    }
}

/// Where the model list lives. The base URL is picked once, from the mode,
/// at construction time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    pub base_url: String,
    pub prefix: String,
}

impl Endpoint {
    pub fn fixed(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            prefix: String::new(),
        }
    }

    pub fn for_mode(mode: RenderMode, server_url: &str, client_url: &str) -> Self {
        let base = match mode {
            RenderMode::Server => server_url,
            RenderMode::Client => client_url,
        };
        Self::fixed(base)
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = normalize_prefix(&prefix.into());
        self
    }

    pub fn models_list_url(&self) -> String {
        format!(
            "{}{}/models/list",
            self.base_url.trim_end_matches('/'),
            self.prefix
        )
    }
}

fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub port: u16,
    pub render_mode: RenderMode,
    pub api_url_server: String,
    pub api_url_client: String,
    pub fixed_api_url: Option<String>,
    pub api_prefix: String,
    pub request_timeout: Option<Duration>,
    pub cors_origins: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port: u16 = match lookup("PORT") {
            Some(p) => p.parse().unwrap_or_else(|_| {
                warn!("[modelstore] Invalid PORT value, defaulting to 3000");
                3000
            }),
            None => 3000,
        };

        let render_mode = match lookup("MODELSTORE_RENDER_MODE") {
            Some(m) => m.parse().unwrap_or_else(|e| {
                warn!("[modelstore] {}, defaulting to client", e);
                RenderMode::Client
            }),
            None => RenderMode::Client,
        };

        let api_url_server =
            lookup("API_URL_SERVER").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url_client =
            lookup("API_URL_CLIENT").unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let fixed_api_url = lookup("MODELSTORE_API_URL").filter(|u| !u.trim().is_empty());

        let api_prefix = lookup("MODELSTORE_API_PREFIX").unwrap_or_default();

        let request_timeout = lookup("MODELSTORE_REQUEST_TIMEOUT_SECS").and_then(|s| {
            match s.parse::<u64>() {
                Ok(secs) if secs > 0 => Some(Duration::from_secs(secs)),
                _ => {
                    warn!("[modelstore] Invalid MODELSTORE_REQUEST_TIMEOUT_SECS, requests will not time out");
                    None
                }
            }
        });

        let cors_origins = lookup("CORS_ORIGINS");

        Self {
            port,
            render_mode,
            api_url_server,
            api_url_client,
            fixed_api_url,
            api_prefix,
            request_timeout,
            cors_origins,
        }
    }

    pub fn endpoint(&self) -> Endpoint {
        let endpoint = match &self.fixed_api_url {
            Some(url) => Endpoint::fixed(url.clone()),
            None => Endpoint::for_mode(self.render_mode, &self.api_url_server, &self.api_url_client),
        };
        endpoint.with_prefix(self.api_prefix.clone())
    }
}
