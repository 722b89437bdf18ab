//! Infrastructure layer: configuration, item storage, and the item-code
//! validation client.

pub mod config;
pub mod item_store;
pub mod validation_dispatcher;

pub use config::{ConfigError, Settings};
pub use item_store::{InMemoryItemStore, ItemQuery, ItemStore, Page, StoreError};
pub use validation_dispatcher::{
    check_base_url, DispatcherBuildError, RemoteValidator, ValidationDispatcher, ValidationMode,
    DEFAULT_REMOTE_TIMEOUT,
};
