//! Cached copy of the product the landing page currently sells, refreshed
//! the same way as the orders cache: full refetch on notification or
//! interval.

use {
    crate::database::products::ProductStoring,
    anyhow::Result,
    model::product::Product,
    std::sync::{Arc, Mutex, Weak},
    std::time::Duration,
    tokio::sync::Notify,
};

pub struct ProductCache {
    database: Arc<dyn ProductStoring>,
    cache: Mutex<Option<Product>>,
    update_notifier: Notify,
}

impl ProductCache {
    pub fn new(database: Arc<dyn ProductStoring>, refresh_interval: Duration) -> Arc<Self> {
        let self_ = Arc::new(Self {
            database,
            cache: Mutex::new(None),
            update_notifier: Notify::new(),
        });
        tokio::task::spawn(update_task(Arc::downgrade(&self_), refresh_interval));
        self_
    }

    pub fn request_update(&self) {
        self.update_notifier.notify_one();
    }

    pub async fn update(&self) -> Result<()> {
        let product = self.database.current_product().await?;
        match &product {
            Some(product) => tracing::debug!(id = product.id, "refreshed product cache"),
            None => tracing::warn!("no active product in the catalogue"),
        }
        *self.cache.lock().unwrap() = product;
        Ok(())
    }

    /// The current product, or `None` when the catalogue has no active
    /// product (or the initial load has not succeeded yet). Consumers show
    /// a placeholder instead of failing.
    pub fn current(&self) -> Option<Product> {
        self.cache.lock().unwrap().clone()
    }
}

async fn update_task(cache: Weak<ProductCache>, refresh_interval: Duration) {
    loop {
        let Some(cache) = cache.upgrade() else { break };
        tokio::select! {
            _ = cache.update_notifier.notified() => (),
            _ = tokio::time::sleep(refresh_interval) => (),
        }
        if let Err(err) = cache.update().await {
            tracing::warn!(?err, "product cache update failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::database::products::MockProductStoring};

    #[tokio::test]
    async fn missing_product_is_a_placeholder_not_an_error() {
        let mut database = MockProductStoring::new();
        database.expect_current_product().returning(|| Ok(None));
        let cache = ProductCache::new(Arc::new(database), Duration::from_secs(3600));

        cache.update().await.unwrap();
        assert_eq!(cache.current(), None);
    }

    #[tokio::test]
    async fn serves_the_loaded_product() {
        let mut database = MockProductStoring::new();
        database.expect_current_product().returning(|| {
            Ok(Some(Product {
                id: 3,
                name: "كيكه +Vit E - سندرين بيوتي".to_string(),
                price: 350,
                is_active: true,
                ..Default::default()
            }))
        });
        let cache = ProductCache::new(Arc::new(database), Duration::from_secs(3600));

        cache.update().await.unwrap();
        assert_eq!(cache.current().unwrap().id, 3);
    }
}
