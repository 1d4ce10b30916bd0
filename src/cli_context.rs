use std::sync::Arc;

use crate::bootstrap::{self, BootstrapStep};
use crate::client::ApiClient;
use crate::config::{app_dir, get_api_url, load_config, Config};
use crate::constants::STORAGE_FILE;
use crate::error::{CollabError, CollabResult};
use crate::models::ResponseMode;
use crate::navigation::{Navigator, TerminalNavigator};
use crate::session::{FileStorage, SessionStore, Storage};
use crate::state::AppStore;

/// Everything one CLI invocation needs: configuration, the API client and
/// the application state built on top of it.
pub struct CliContext {
    config: Config,
    navigator: Arc<dyn Navigator>,
    store: AppStore,
}

impl CliContext {
    /// Load context from saved configuration and on-disk storage
    pub fn load() -> CollabResult<Self> {
        CliContextBuilder::new().build()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&mut self) -> &mut AppStore {
        &mut self.store
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Reconciles storage with in-memory state; returns the last step.
    pub async fn bootstrap(&mut self) -> BootstrapStep {
        let steps = bootstrap::run(&mut self.store, self.navigator.as_ref()).await;
        steps.last().cloned().unwrap_or(BootstrapStep::Idle)
    }

    /// Bootstraps and requires a signed-in user afterwards.
    pub async fn authenticated(&mut self) -> CollabResult<&mut AppStore> {
        self.bootstrap().await;
        let state = self.store.session.state();
        if state.token.is_none() || state.user.is_none() {
            return Err(CollabError::NoToken);
        }
        Ok(&mut self.store)
    }
}

/// Builder pattern for creating CLI contexts with specific configurations
pub struct CliContextBuilder {
    config: Option<Config>,
    api_url: Option<String>,
    storage: Option<Arc<dyn Storage>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl CliContextBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            api_url: None,
            storage: None,
            navigator: None,
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = Some(api_url.into());
        self
    }

    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    pub fn build(self) -> CollabResult<CliContext> {
        let config = self.config.unwrap_or_else(load_config);
        let api_url = self.api_url.unwrap_or_else(|| get_api_url(&config));

        let storage: Arc<dyn Storage> = match self.storage {
            Some(storage) => storage,
            None => Arc::new(FileStorage::new(app_dir()?.join(STORAGE_FILE))),
        };
        let navigator: Arc<dyn Navigator> = self
            .navigator
            .unwrap_or_else(|| Arc::new(TerminalNavigator::new()));

        let api = ApiClient::new(api_url, SessionStore::new(storage), Arc::clone(&navigator))?
            .with_response_mode(ResponseMode::from_strict(config.strict_responses()));

        Ok(CliContext {
            config,
            navigator,
            store: AppStore::new(Arc::new(api)),
        })
    }
}

impl Default for CliContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
