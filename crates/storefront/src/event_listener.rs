//! Change feed over Postgres LISTEN/NOTIFY. Triggers in the schema emit a
//! notification per table change; this task turns each one into a cache
//! refetch. The payload is ignored on purpose: the caches always refetch
//! the full state, so a lost or coalesced notification costs nothing.

use {
    crate::{orders_cache::OrdersCache, product_cache::ProductCache},
    anyhow::Result,
    sqlx::postgres::{PgListener, PgPool},
    std::{sync::Arc, time::Duration},
};

const RECONNECT_DELAY: Duration = Duration::from_secs(5);

pub struct EventListener {
    pool: PgPool,
    orders: Arc<OrdersCache>,
    products: Arc<ProductCache>,
}

impl EventListener {
    pub fn new(pool: PgPool, orders: Arc<OrdersCache>, products: Arc<ProductCache>) -> Self {
        Self {
            pool,
            orders,
            products,
        }
    }

    /// Listens forever, reconnecting on connection loss. Meant to be
    /// spawned as a background task.
    pub async fn listen(self) {
        loop {
            if let Err(err) = self.listen_inner().await {
                tracing::warn!(?err, "change feed connection lost, reconnecting");
            }
            tokio::time::sleep(RECONNECT_DELAY).await;
        }
    }

    async fn listen_inner(&self) -> Result<()> {
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener
            .listen_all([database::ORDERS_CHANNEL, database::PRODUCTS_CHANNEL])
            .await?;
        tracing::info!("listening for table changes");

        // Anything changed while we were not subscribed is invisible to
        // LISTEN, so refetch once per (re)connect.
        self.orders.request_update();
        self.products.request_update();

        loop {
            let notification = listener.recv().await?;
            tracing::debug!(channel = notification.channel(), "table changed");
            match notification.channel() {
                database::ORDERS_CHANNEL => self.orders.request_update(),
                database::PRODUCTS_CHANNEL => self.products.request_update(),
                other => tracing::warn!(channel = other, "notification on unexpected channel"),
            }
        }
    }
}
