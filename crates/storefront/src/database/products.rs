use {
    super::Postgres,
    anyhow::{Context as _, Result},
    async_trait::async_trait,
    model::product::Product,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStoring: Send + Sync {
    /// The newest active product, the one the landing page sells. `None`
    /// when the catalogue is empty; callers degrade to a placeholder.
    async fn current_product(&self) -> Result<Option<Product>>;
}

#[async_trait]
impl ProductStoring for Postgres {
    async fn current_product(&self) -> Result<Option<Product>> {
        let _timer = super::Metrics::get()
            .database_queries
            .with_label_values(&["current_product"])
            .start_timer();

        let mut ex = self.pool.acquire().await?;
        let row = database::products::current(&mut ex)
            .await
            .context("current_product")?;
        Ok(row.map(product_from_row))
    }
}

fn product_from_row(row: database::products::Product) -> Product {
    Product {
        id: row.id,
        name: row.name,
        brand: row.brand,
        price: row.price,
        description: row.description,
        whatsapp_number: row.whatsapp_number,
        benefits: row.benefits,
        usage_instructions: row.usage_instructions,
        images: row.images,
        is_active: row.is_active,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}
