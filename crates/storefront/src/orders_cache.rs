//! In-memory copy of the full order list, kept in sync with the database
//! by full refetches. A refetch runs whenever the change-feed listener or
//! a local write requests one, and on a fallback interval. This trades
//! refetch cost for always reflecting server state, the same call the
//! original admin view makes.

use {
    crate::database::orders::OrderStoring,
    anyhow::Result,
    model::order::{Order, OrderId, OrderStatus},
    std::sync::{Arc, Mutex, Weak},
    std::time::Duration,
    tokio::sync::Notify,
};

#[derive(prometheus_metric_storage::MetricStorage)]
struct Metrics {
    /// Tracks success and failure of orders cache refreshes.
    #[metric(labels("result"))]
    orders_cache_updates: prometheus::IntCounterVec,
}

pub struct OrdersCache {
    database: Arc<dyn OrderStoring>,
    cache: Mutex<Inner>,
    update_notifier: Notify,
    metrics: &'static Metrics,
}

struct Inner {
    /// `None` until the first successful load. API consumers surface this
    /// as a loading state instead of an empty list.
    orders: Option<Vec<Order>>,
}

impl OrdersCache {
    /// Creates the cache and spawns its background refresh task. The task
    /// stops once the cache is dropped by everybody else.
    pub fn new(database: Arc<dyn OrderStoring>, refresh_interval: Duration) -> Arc<Self> {
        let self_ = Arc::new(Self {
            database,
            cache: Mutex::new(Inner { orders: None }),
            update_notifier: Notify::new(),
            metrics: Metrics::instance(observe::metrics::get_storage_registry()).unwrap(),
        });
        tokio::task::spawn(update_task(Arc::downgrade(&self_), refresh_interval));
        self_
    }

    /// Asks the background task to refetch. Called by the change-feed
    /// listener and after local writes.
    pub fn request_update(&self) {
        self.update_notifier.notify_one();
    }

    /// Refetches the full list. Usually called from the background task;
    /// `run` also calls it once at startup so the service comes up warm.
    pub async fn update(&self) -> Result<()> {
        let result = self.database.all_orders().await;
        self.metrics
            .orders_cache_updates
            .with_label_values(&[match &result {
                Ok(_) => "ok",
                Err(_) => "error",
            }])
            .inc();
        let orders = result?;
        tracing::debug!(orders = orders.len(), "refreshed orders cache");
        self.cache.lock().unwrap().orders = Some(orders);
        Ok(())
    }

    /// The cached list, newest first. `None` while the initial load is
    /// still outstanding (or has only failed so far).
    pub fn orders(&self) -> Option<Vec<Order>> {
        self.cache.lock().unwrap().orders.clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.cache.lock().unwrap().orders.is_some()
    }

    /// Optimistically patches a single order's status after a successful
    /// update. The next refetch confirms it; on update failure this is
    /// never called so the visible state stays at the last known-good
    /// value.
    pub fn patch_status(&self, id: OrderId, status: OrderStatus) {
        let mut cache = self.cache.lock().unwrap();
        if let Some(orders) = cache.orders.as_mut() {
            if let Some(order) = orders.iter_mut().find(|order| order.id == id) {
                order.status = status;
            }
        }
    }
}

async fn update_task(cache: Weak<OrdersCache>, refresh_interval: Duration) {
    loop {
        // Upgrade per iteration so the task winds down when the cache is
        // dropped.
        let Some(cache) = cache.upgrade() else { break };
        tokio::select! {
            _ = cache.update_notifier.notified() => (),
            _ = tokio::time::sleep(refresh_interval) => (),
        }
        if let Err(err) = cache.update().await {
            tracing::warn!(?err, "orders cache update failed");
        }
    }
    tracing::debug!("orders cache dropped, stopping update task");
}
