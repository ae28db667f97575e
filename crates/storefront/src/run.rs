use {
    crate::{
        api,
        arguments::Arguments,
        database::{Postgres, orders::OrderStoring, products::ProductStoring},
        event_listener::EventListener,
        orderbook::Orderbook,
        orders_cache::OrdersCache,
        product_cache::ProductCache,
    },
    anyhow::{Context as _, Result},
    observe::metrics::{LivenessChecking, serve_metrics},
    std::sync::Arc,
    tokio::task,
};

/// Live once the initial order load has succeeded.
struct Liveness {
    orders: Arc<OrdersCache>,
}

#[async_trait::async_trait]
impl LivenessChecking for Liveness {
    async fn is_alive(&self) -> bool {
        self.orders.is_initialized()
    }
}

pub async fn run(args: Arguments) -> Result<()> {
    let postgres = Postgres::new(args.db_url.as_str()).context("failed to create database")?;
    let order_store: Arc<dyn OrderStoring> = Arc::new(postgres.clone());
    let product_store: Arc<dyn ProductStoring> = Arc::new(postgres.clone());

    let orders_cache = OrdersCache::new(order_store.clone(), args.cache_refresh_interval);
    let products_cache = ProductCache::new(product_store, args.cache_refresh_interval);

    // Warm the caches so the first requests do not hit a loading state.
    // Failures are tolerated; the refresh task and the liveness probe take
    // it from here.
    if let Err(err) = orders_cache.update().await {
        tracing::warn!(?err, "initial order load failed");
    }
    if let Err(err) = products_cache.update().await {
        tracing::warn!(?err, "initial product load failed");
    }

    let event_listener = EventListener::new(
        postgres.pool.clone(),
        orders_cache.clone(),
        products_cache.clone(),
    );
    task::spawn(event_listener.listen());

    let orderbook = Arc::new(Orderbook::new(
        order_store,
        orders_cache.clone(),
        products_cache.clone(),
        args.whatsapp_phone.clone(),
    ));

    let liveness = Arc::new(Liveness {
        orders: orders_cache,
    });
    let metrics_task = serve_metrics(liveness, args.metrics_address);

    let app = api::handle_all_routes(orderbook, products_cache);
    let listener = tokio::net::TcpListener::bind(args.bind_address)
        .await
        .context("failed to bind API address")?;
    tracing::info!(bind_address = %args.bind_address, "serving API");
    let serve_api = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());

    tokio::select! {
        result = serve_api => tracing::error!(?result, "API task exited"),
        result = metrics_task => tracing::error!(?result, "metrics task exited"),
    };
    Ok(())
}

#[cfg(unix)]
async fn shutdown_signal() {
    // Kubernetes sends sigterm, whereas locally sigint (ctrl-c) is most
    // common.
    let sigterm = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .unwrap()
            .recv()
            .await
    };
    let sigint = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())
            .unwrap()
            .recv()
            .await;
    };
    futures::pin_mut!(sigint);
    futures::pin_mut!(sigterm);
    futures::future::select(sigterm, sigint).await;
}

#[cfg(windows)]
async fn shutdown_signal() {
    // We don't support signal handling on windows
    std::future::pending().await
}
