use {
    super::Postgres,
    anyhow::{Context as _, Result, anyhow},
    async_trait::async_trait,
    chrono::NaiveDate,
    futures::{StreamExt, TryStreamExt},
    model::order::{Order, OrderCreation, OrderId, OrderStatus},
};

/// The fields the service determines at creation time, wrapped around the
/// customer's submission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NewOrder {
    pub creation: OrderCreation,
    pub total_amount: i64,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderStoring: Send + Sync {
    /// All orders ordered by creation date descending (newest first).
    async fn all_orders(&self) -> Result<Vec<Order>>;
    async fn insert_order(&self, order: &NewOrder) -> Result<Order>;
    /// Updates only the status column. Returns whether an order with that
    /// id existed.
    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<bool>;
}

#[async_trait]
impl OrderStoring for Postgres {
    async fn all_orders(&self) -> Result<Vec<Order>> {
        let _timer = super::Metrics::get()
            .database_queries
            .with_label_values(&["all_orders"])
            .start_timer();

        let mut ex = self.pool.acquire().await?;
        database::orders::all(&mut ex)
            .map(|result| match result {
                Ok(row) => order_from_row(row),
                Err(err) => Err(anyhow::Error::from(err)),
            })
            .try_collect()
            .await
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order> {
        let _timer = super::Metrics::get()
            .database_queries
            .with_label_values(&["insert_order"])
            .start_timer();

        let row = database::orders::NewOrder {
            customer_name: order.creation.customer_name.clone(),
            phone: order.creation.phone.clone(),
            address: order.creation.address.clone(),
            governorate: Some(order.creation.governorate.clone()),
            notes: order.creation.notes.clone(),
            total_amount: order.total_amount,
            status: order.status.to_string(),
            order_date: order.order_date,
        };
        let mut ex = self.pool.acquire().await?;
        let inserted = database::orders::insert(&mut ex, &row)
            .await
            .context("insert_order")?;
        order_from_row(inserted)
    }

    async fn update_status(&self, id: OrderId, status: OrderStatus) -> Result<bool> {
        let _timer = super::Metrics::get()
            .database_queries
            .with_label_values(&["update_status"])
            .start_timer();

        let mut ex = self.pool.acquire().await?;
        database::orders::update_status(&mut ex, id, &status.to_string())
            .await
            .context("update_status")
    }
}

/// Converts a stored row into the domain type. This is the boundary where
/// the open status string becomes the closed enum; rows with a status
/// outside the set are reported as errors instead of being passed through.
fn order_from_row(row: database::orders::Order) -> Result<Order> {
    let status = row
        .status
        .parse::<OrderStatus>()
        .map_err(|_| anyhow!("order {} has unknown status {:?}", row.id, row.status))?;
    Ok(Order {
        id: row.id,
        customer_name: row.customer_name,
        phone: row.phone,
        address: row.address,
        governorate: row.governorate,
        notes: row.notes,
        total_amount: row.total_amount,
        status,
        order_date: row.order_date,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_conversion_rejects_unknown_status() {
        let row = database::orders::Order {
            id: 7,
            customer_name: "سارة".to_string(),
            phone: "01012345678".to_string(),
            address: "10 شارع النيل، المعادي".to_string(),
            governorate: Some("القاهرة".to_string()),
            notes: None,
            total_amount: 130,
            status: "لا يوجد".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: Default::default(),
            updated_at: Default::default(),
        };
        let err = order_from_row(row).unwrap_err();
        assert!(err.to_string().contains("unknown status"));
    }

    #[test]
    fn row_conversion_parses_arabic_status() {
        let row = database::orders::Order {
            id: 7,
            customer_name: "سارة".to_string(),
            phone: "01012345678".to_string(),
            address: "10 شارع النيل، المعادي".to_string(),
            governorate: Some("القاهرة".to_string()),
            notes: Some("توصيل مساءً".to_string()),
            total_amount: 130,
            status: "قيد التجهيز".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: Default::default(),
            updated_at: Default::default(),
        };
        let order = order_from_row(row).unwrap();
        assert_eq!(order.status, OrderStatus::Preparing);
        assert_eq!(order.notes.as_deref(), Some("توصيل مساءً"));
    }
}
