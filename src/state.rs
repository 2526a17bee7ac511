use crate::config::Config;
use crate::store::ModelListStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: ModelListStore,
}

impl AppState {
    /// Build the HTTP client and the store from configuration.
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        let store = ModelListStore::new(client, config.endpoint());
        Ok(Self { config, store })
    }
}
