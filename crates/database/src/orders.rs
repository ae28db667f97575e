use {
    chrono::{DateTime, NaiveDate, Utc},
    futures::stream::BoxStream,
    sqlx::PgConnection,
};

pub type OrderId = i64;

/// One row in the `orders` table. Status is kept as the raw stored string
/// at this layer; the service converts it into the closed enum and rejects
/// anything outside the set.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Order {
    pub id: OrderId,
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub governorate: Option<String>,
    pub notes: Option<String>,
    pub total_amount: i64,
    pub status: String,
    pub order_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The fields the service controls on insert. Identifier and timestamps
/// are assigned by the database.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub phone: String,
    pub address: String,
    pub governorate: Option<String>,
    pub notes: Option<String>,
    pub total_amount: i64,
    pub status: String,
    pub order_date: NaiveDate,
}

/// Inserts an order and returns the stored row.
pub async fn insert(ex: &mut PgConnection, order: &NewOrder) -> Result<Order, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO orders (
    customer_name,
    phone,
    address,
    governorate,
    notes,
    total_amount,
    status,
    order_date
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
RETURNING
    id, customer_name, phone, address, governorate, notes, total_amount,
    status, order_date, created_at, updated_at
    "#;
    sqlx::query_as(QUERY)
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.address)
        .bind(&order.governorate)
        .bind(&order.notes)
        .bind(order.total_amount)
        .bind(&order.status)
        .bind(order.order_date)
        .fetch_one(ex)
        .await
}

/// All orders, newest first. Streamed because the caller materializes the
/// full list into its cache anyway.
pub fn all(ex: &mut PgConnection) -> BoxStream<'_, Result<Order, sqlx::Error>> {
    const QUERY: &str = r#"
SELECT
    id, customer_name, phone, address, governorate, notes, total_amount,
    status, order_date, created_at, updated_at
FROM orders
ORDER BY created_at DESC, id DESC
    "#;
    sqlx::query_as(QUERY).fetch(ex)
}

pub async fn single(ex: &mut PgConnection, id: OrderId) -> Result<Option<Order>, sqlx::Error> {
    const QUERY: &str = r#"
SELECT
    id, customer_name, phone, address, governorate, notes, total_amount,
    status, order_date, created_at, updated_at
FROM orders
WHERE id = $1
    "#;
    sqlx::query_as(QUERY).bind(id).fetch_optional(ex).await
}

/// Updates only the status column (and `updated_at`). Returns whether a
/// row with that id existed.
pub async fn update_status(
    ex: &mut PgConnection,
    id: OrderId,
    status: &str,
) -> Result<bool, sqlx::Error> {
    const QUERY: &str = r#"
UPDATE orders
SET status = $2, updated_at = now()
WHERE id = $1
    "#;
    let result = sqlx::query(QUERY).bind(id).bind(status).execute(ex).await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use {super::*, futures::TryStreamExt, sqlx::Connection};

    fn new_order(name: &str) -> NewOrder {
        NewOrder {
            customer_name: name.to_string(),
            phone: "01012345678".to_string(),
            address: "10 شارع النيل، المعادي".to_string(),
            governorate: Some("القاهرة".to_string()),
            notes: None,
            total_amount: 130,
            status: "جديد".to_string(),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        }
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_insert_assigns_id_and_timestamps() {
        let mut db = PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();

        let inserted = insert(&mut db, &new_order("سارة")).await.unwrap();
        assert_eq!(inserted.customer_name, "سارة");
        assert_eq!(inserted.status, "جديد");
        assert_eq!(inserted.total_amount, 130);
        assert_eq!(inserted.created_at, inserted.updated_at);

        let fetched = single(&mut db, inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched, inserted);
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_all_orders_newest_first() {
        let mut db = PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();

        let first = insert(&mut db, &new_order("أول")).await.unwrap();
        let second = insert(&mut db, &new_order("ثاني")).await.unwrap();

        let orders: Vec<_> = all(&mut db).try_collect().await.unwrap();
        let position = |id| orders.iter().position(|order| order.id == id).unwrap();
        assert!(position(second.id) < position(first.id));
    }

    #[tokio::test]
    #[ignore]
    async fn postgres_update_status_touches_only_status() {
        let mut db = PgConnection::connect("postgresql://").await.unwrap();
        let mut db = db.begin().await.unwrap();

        let inserted = insert(&mut db, &new_order("سارة")).await.unwrap();
        assert!(update_status(&mut db, inserted.id, "تم الشحن")
            .await
            .unwrap());

        let updated = single(&mut db, inserted.id).await.unwrap().unwrap();
        assert_eq!(updated.status, "تم الشحن");
        assert_eq!(updated.customer_name, inserted.customer_name);
        assert_eq!(updated.total_amount, inserted.total_amount);
        assert_eq!(updated.order_date, inserted.order_date);
        assert!(updated.updated_at >= inserted.updated_at);

        assert!(!update_status(&mut db, inserted.id + 1000, "ملغي")
            .await
            .unwrap());
    }
}
