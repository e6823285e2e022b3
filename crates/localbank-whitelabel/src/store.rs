//! The process-wide white-label configuration store.

use std::sync::{Arc, OnceLock, RwLock};

use localbank_core::{InstitutionType, WhiteLabelConfig, WhiteLabelPatch};
use localbank_storage::{DataAccess, LocalStore};

use crate::error::Result;
use crate::merge::apply_patch;

/// Local store key holding the serialized configuration.
pub const LOCAL_CONFIG_KEY: &str = "whitelabel-config";

/// Holder of the one active [`WhiteLabelConfig`].
///
/// Shared through `Arc` in application state. The configuration is read
/// from the local store on first access and written back after every
/// [`update_config`](Self::update_config).
pub struct WhiteLabelStore {
    local: Arc<dyn LocalStore>,
    config: OnceLock<RwLock<WhiteLabelConfig>>,
}

impl std::fmt::Debug for WhiteLabelStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhiteLabelStore")
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl WhiteLabelStore {
    /// Create a store over `local`. Nothing is read until first access.
    pub fn new(local: Arc<dyn LocalStore>) -> Self {
        Self {
            local,
            config: OnceLock::new(),
        }
    }

    /// Whether the initial load has happened.
    pub fn is_loaded(&self) -> bool {
        self.config.get().is_some()
    }

    /// The current configuration.
    pub fn get_config(&self) -> WhiteLabelConfig {
        match self.cell().read() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Shallow-merge `patch` into the current configuration and persist the
    /// result locally.
    pub fn update_config(&self, patch: WhiteLabelPatch) {
        let mut config = match self.cell().write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        apply_patch(&mut config, patch);
        self.persist_local(&config);
    }

    /// Switch brand variant, resetting theme, headline and CTAs to the new
    /// type's defaults.
    pub fn switch_institution(&self, institution_type: InstitutionType) {
        log::info!("Switching institution type to {institution_type}");
        self.update_config(WhiteLabelPatch::for_institution(institution_type));
    }

    /// Fetch the remote configuration document and merge it in.
    ///
    /// Returns `Ok(false)` when no document has been saved yet. On error the
    /// in-memory configuration is unchanged.
    pub async fn load_remote(&self, data: &DataAccess) -> Result<bool> {
        match data.get_config_document().await? {
            Some(patch) => {
                self.update_config(patch);
                log::debug!("Merged remote configuration");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Upsert the current configuration into the remote slot.
    pub async fn save_remote(&self, data: &DataAccess) -> Result<()> {
        let config = self.get_config();
        data.put_config_document(&config).await?;
        log::info!(
            "Saved configuration for {} ({})",
            config.institution_name,
            config.institution_type
        );
        Ok(())
    }

    /// A fresh store over the same local storage, as a restarted process
    /// would see it.
    pub fn reload_from_local(&self) -> Self {
        Self::new(self.local.clone())
    }

    fn cell(&self) -> &RwLock<WhiteLabelConfig> {
        self.config
            .get_or_init(|| RwLock::new(self.load_local()))
    }

    fn load_local(&self) -> WhiteLabelConfig {
        let raw = match self.local.get(LOCAL_CONFIG_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return WhiteLabelConfig::default(),
            Err(e) => {
                log::warn!("Could not read saved configuration: {e}");
                return WhiteLabelConfig::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(config) => {
                log::debug!("Loaded configuration from local store");
                config
            }
            Err(e) => {
                log::warn!("Ignoring unparsable saved configuration: {e}");
                WhiteLabelConfig::default()
            }
        }
    }

    fn persist_local(&self, config: &WhiteLabelConfig) {
        let result = serde_json::to_string(config)
            .map_err(localbank_storage::Error::from)
            .and_then(|json| self.local.set(LOCAL_CONFIG_KEY, &json));
        if let Err(e) = result {
            log::warn!("Could not persist configuration locally: {e}");
        }
    }
}
