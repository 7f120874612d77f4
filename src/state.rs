// src/state.rs
use std::sync::Arc;

use crate::config::DEFAULT_MAX_UPLOAD_BYTES;
use crate::repository::ProductRepository;
use crate::uploads::FileStore;

#[derive(Clone)]
pub struct AppState {
    pub products: Arc<dyn ProductRepository>,
    pub file_store: FileStore,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(products: Arc<dyn ProductRepository>, file_store: FileStore) -> Self {
        Self {
            products,
            file_store,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }
}
