use {
    chrono::{DateTime, Utc},
    futures::stream::BoxStream,
    sqlx::PgConnection,
};

pub type ProductId = i64;

/// One row in the `products` table.
#[derive(Clone, Debug, Default, PartialEq, sqlx::FromRow)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub price: i64,
    pub description: Option<String>,
    pub whatsapp_number: Option<String>,
    pub benefits: Vec<String>,
    pub usage_instructions: Vec<String>,
    pub images: Vec<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const PRODUCTS_SELECT: &str = "id, name, brand, price, description, whatsapp_number, \
                                   benefits, usage_instructions, images, is_active, created_at, \
                                   updated_at";

/// The newest active product, which is the one the landing page sells.
pub async fn current(ex: &mut PgConnection) -> Result<Option<Product>, sqlx::Error> {
    const QUERY: &str = const_format::concatcp!(
        "SELECT ",
        PRODUCTS_SELECT,
        " FROM products WHERE is_active ORDER BY created_at DESC, id DESC LIMIT 1",
    );
    sqlx::query_as(QUERY).fetch_optional(ex).await
}

pub fn all(ex: &mut PgConnection) -> BoxStream<'_, Result<Product, sqlx::Error>> {
    const QUERY: &str = const_format::concatcp!(
        "SELECT ",
        PRODUCTS_SELECT,
        " FROM products ORDER BY created_at DESC, id DESC",
    );
    sqlx::query_as(QUERY).fetch(ex)
}

/// Products are written by the out-of-scope admin editor; this insert
/// exists for tests and seeding.
pub async fn insert(
    ex: &mut PgConnection,
    product: &Product,
) -> Result<ProductId, sqlx::Error> {
    const QUERY: &str = r#"
INSERT INTO products (
    name,
    brand,
    price,
    description,
    whatsapp_number,
    benefits,
    usage_instructions,
    images,
    is_active
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
RETURNING id
    "#;
    let (id,) = sqlx::query_as(QUERY)
        .bind(&product.name)
        .bind(&product.brand)
        .bind(product.price)
        .bind(&product.description)
        .bind(&product.whatsapp_number)
        .bind(&product.benefits)
        .bind(&product.usage_instructions)
        .bind(&product.images)
        .bind(product.is_active)
        .fetch_one(ex)
        .await?;
    Ok(id)
}
