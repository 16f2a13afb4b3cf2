use std::sync::Arc;

use service::product::{ProductRepository, ProductService};

/// Shared handler state; the repository is chosen once at startup.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<ProductService<dyn ProductRepository>>,
}

impl AppState {
    pub fn new(repo: Arc<dyn ProductRepository>) -> Self {
        Self { products: Arc::new(ProductService::new(repo)) }
    }
}
