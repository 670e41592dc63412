use std::path::Path;
use std::sync::Arc;

use cafe_core::error::CoreError;
use cafe_core::menu::{default_menu, Menu};
use cafe_db::{Store, StoreError};

use crate::config::{ServerConfig, StorageBackend};
use crate::image_host::{ImageHostClient, ImageHostError};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Document store for every collection.
    pub store: Store,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// The meal menu, fixed for the life of the process.
    pub menu: Arc<Menu>,
    /// `None` when no image host is configured.
    pub image_host: Option<Arc<ImageHostClient>>,
}

impl AppState {
    pub fn new(store: Store, config: ServerConfig, menu: Menu) -> Result<Self, ImageHostError> {
        let image_host = config
            .image_host
            .clone()
            .map(ImageHostClient::new)
            .transpose()?
            .map(Arc::new);

        Ok(Self {
            store,
            config: Arc::new(config),
            menu: Arc::new(menu),
            image_host,
        })
    }
}

/// Open the store selected by `STORAGE_BACKEND`.
pub async fn open_store(config: &ServerConfig) -> Result<Store, StoreError> {
    match config.storage_backend {
        StorageBackend::Local => Store::local(config.data_dir.clone()).await,
        StorageBackend::Memory => Ok(Store::memory()),
    }
}

/// Load the menu override at `path`, or the built-in menu when unset.
pub fn load_menu(path: Option<&Path>) -> Result<Menu, CoreError> {
    let Some(path) = path else {
        return Ok(default_menu());
    };
    let json = std::fs::read_to_string(path).map_err(|e| {
        CoreError::Internal(format!("Cannot read menu file {}: {e}", path.display()))
    })?;
    Menu::from_json(&json)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn built_in_menu_when_unset() {
        let menu = load_menu(None).unwrap();
        assert!(menu.find("chicken-kottu").is_some());
    }

    #[test]
    fn menu_override_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::write(
            &path,
            r#"{"items":[{"id":"rice","name":"Rice & Curry","category":"food"}]}"#,
        )
        .unwrap();

        let menu = load_menu(Some(&path)).unwrap();
        assert_eq!(menu.items.len(), 1);
        assert!(menu.items[0].available);
    }

    #[test]
    fn missing_menu_file_is_an_error() {
        assert_matches!(
            load_menu(Some(Path::new("/nonexistent/menu.json"))),
            Err(CoreError::Internal(_))
        );
    }
}
