//! The order book ties the pieces together: validation, pricing, the
//! repository and the in-memory cache.

use {
    crate::{
        database::orders::{NewOrder, OrderStoring},
        export,
        order_validation::{self, ValidationError},
        orders_cache::OrdersCache,
        product_cache::ProductCache,
        whatsapp,
    },
    chrono::Utc,
    model::{
        order::{Order, OrderCreation, OrderFilter, OrderId, OrderStatus},
        phone,
        pricing,
    },
    serde::{Deserialize, Serialize},
    std::sync::Arc,
    thiserror::Error,
    url::Url,
};

#[derive(prometheus_metric_storage::MetricStorage, Clone, Debug)]
#[metric(subsystem = "orderbook")]
struct Metrics {
    /// Number of orders created through the form path.
    orders_created: prometheus::IntCounter,
    /// Number of admin status updates applied.
    status_updates: prometheus::IntCounter,
}

#[derive(Debug, Error)]
pub enum AddOrderError {
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("no active product to order")]
    ProductUnavailable,
    #[error(transparent)]
    Database(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum StatusUpdateError {
    #[error("order {0} not found")]
    NotFound(OrderId),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Debug, Error)]
pub enum WhatsAppOrderError {
    #[error("يرجى إدخال الاسم واختيار المحافظة أولاً")]
    MissingNameOrGovernorate,
    #[error("المحافظة غير صحيحة")]
    UnknownGovernorate,
    #[error("no active product to order")]
    ProductUnavailable,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// The messaging-app order path only needs these two fields; phone and
/// address are exchanged in the conversation itself.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize)]
pub struct WhatsAppOrder {
    pub customer_name: String,
    #[serde(default)]
    pub governorate: String,
}

/// Admin listing response: the filtered rows plus the size of the
/// unfiltered set ("showing X of Y").
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct OrderListing {
    pub orders: Vec<Order>,
    pub total: usize,
}

/// Raised while the initial order load is still outstanding.
#[derive(Debug, Error)]
#[error("orders are still loading")]
pub struct OrdersNotLoaded;

pub struct Orderbook {
    database: Arc<dyn OrderStoring>,
    orders_cache: Arc<OrdersCache>,
    products: Arc<ProductCache>,
    whatsapp_phone: String,
    metrics: &'static Metrics,
}

impl Orderbook {
    pub fn new(
        database: Arc<dyn OrderStoring>,
        orders_cache: Arc<OrdersCache>,
        products: Arc<ProductCache>,
        whatsapp_phone: String,
    ) -> Self {
        Self {
            database,
            orders_cache,
            products,
            whatsapp_phone,
            metrics: Metrics::instance(observe::metrics::get_storage_registry()).unwrap(),
        }
    }

    /// Persists a new order from the form. The total is fixed here, once:
    /// product price plus the shipping fee of the chosen governorate.
    pub async fn add_order(&self, creation: OrderCreation) -> Result<Order, AddOrderError> {
        order_validation::validate(&creation)?;

        let product = self
            .products
            .current()
            .ok_or(AddOrderError::ProductUnavailable)?;
        let total = pricing::order_total(product.price, 1, Some(&creation.governorate));

        let order = NewOrder {
            creation: OrderCreation {
                phone: phone::strip_whitespace(&creation.phone),
                ..creation
            },
            total_amount: total.total,
            status: OrderStatus::New,
            order_date: Utc::now().date_naive(),
        };
        let order = self.database.insert_order(&order).await?;

        self.metrics.orders_created.inc();
        // Other admin sessions learn about the order through the change
        // feed; our own cache does not need to wait for it.
        self.orders_cache.request_update();
        Ok(order)
    }

    /// The admin listing: filtered view over the cached list plus the
    /// unfiltered total.
    pub fn orders(&self, filter: &OrderFilter) -> Result<OrderListing, OrdersNotLoaded> {
        let all = self.orders_cache.orders().ok_or(OrdersNotLoaded)?;
        let total = all.len();
        let orders = all
            .into_iter()
            .filter(|order| filter.matches(order))
            .collect();
        Ok(OrderListing { orders, total })
    }

    /// Applies a status change. On success the cached row is patched
    /// optimistically; on failure the cache is untouched so the visible
    /// state stays at the last known-good value.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<(), StatusUpdateError> {
        let found = self.database.update_status(id, status).await?;
        if !found {
            return Err(StatusUpdateError::NotFound(id));
        }
        self.orders_cache.patch_status(id, status);
        self.metrics.status_updates.inc();
        Ok(())
    }

    /// Serializes the currently filtered (not full) list to CSV.
    pub fn export_csv(&self, filter: &OrderFilter) -> Result<Vec<u8>, OrdersNotLoaded> {
        let listing = self.orders(filter)?;
        Ok(export::to_csv(&listing.orders))
    }

    /// Builds the messaging-app deep link. Performs no persistence and is
    /// not reconciled with [`Orderbook::add_order`].
    pub fn whatsapp_link(&self, request: &WhatsAppOrder) -> Result<Url, WhatsAppOrderError> {
        if request.customer_name.trim().is_empty() || request.governorate.is_empty() {
            return Err(WhatsAppOrderError::MissingNameOrGovernorate);
        }
        if !model::governorate::is_governorate(&request.governorate) {
            return Err(WhatsAppOrderError::UnknownGovernorate);
        }
        let product = self
            .products
            .current()
            .ok_or(WhatsAppOrderError::ProductUnavailable)?;

        let message = whatsapp::order_message(
            &request.customer_name,
            &product.name,
            product.price,
            &request.governorate,
        );
        Ok(whatsapp::order_link(&self.whatsapp_phone, &message)?)
    }
}
