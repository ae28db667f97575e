//! Product catalogue types. Products are read-only for this service;
//! validation exists because the stored rows still have to honor the list
//! and length bounds when they are loaded or seeded.

use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    thiserror::Error,
    url::Url,
};

pub type ProductId = i64;

pub mod limits {
    pub const MAX_BENEFITS: usize = 10;
    pub const MAX_USAGE_INSTRUCTIONS: usize = 8;
    pub const MAX_IMAGES: usize = 10;
    pub const MAX_BENEFIT_LENGTH: usize = 100;
    pub const MAX_INSTRUCTION_LENGTH: usize = 150;
    pub const MAX_NAME_LENGTH: usize = 100;
    pub const MAX_BRAND_LENGTH: usize = 50;
    pub const MAX_DESCRIPTION_LENGTH: usize = 500;
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    /// Price in integral EGP.
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

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ProductError {
    #[error("اسم المنتج قصير جداً")]
    NameTooShort,
    #[error("اسم المنتج طويل جداً")]
    NameTooLong,
    #[error("اسم العلامة التجارية قصير جداً")]
    BrandTooShort,
    #[error("اسم العلامة التجارية طويل جداً")]
    BrandTooLong,
    #[error("السعر يجب أن يكون أكبر من صفر")]
    PriceNotPositive,
    #[error("السعر كبير جداً")]
    PriceTooLarge,
    #[error("الوصف طويل جداً")]
    DescriptionTooLong,
    #[error("رقم الهاتف غير صحيح (يجب أن يبدأ بـ 01)")]
    InvalidWhatsappNumber,
    #[error("عدد الفوائد كبير جداً")]
    TooManyBenefits,
    #[error("الفائدة طويلة جداً")]
    BenefitTooLong,
    #[error("عدد الخطوات كبير جداً")]
    TooManyInstructions,
    #[error("الخطوة طويلة جداً")]
    InstructionTooLong,
    #[error("عدد الصور كبير جداً")]
    TooManyImages,
    #[error("رابط الصورة غير صحيح")]
    InvalidImageUrl,
}

impl Product {
    /// Checks every bound from [`limits`]. Returns the first violation in
    /// field order.
    pub fn validate(&self) -> Result<(), ProductError> {
        use limits::*;

        let name_len = self.name.chars().count();
        if name_len < 2 {
            return Err(ProductError::NameTooShort);
        }
        if name_len > MAX_NAME_LENGTH {
            return Err(ProductError::NameTooLong);
        }

        let brand_len = self.brand.chars().count();
        if brand_len < 2 {
            return Err(ProductError::BrandTooShort);
        }
        if brand_len > MAX_BRAND_LENGTH {
            return Err(ProductError::BrandTooLong);
        }

        if self.price < 1 {
            return Err(ProductError::PriceNotPositive);
        }
        if self.price > 999_999 {
            return Err(ProductError::PriceTooLarge);
        }

        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(ProductError::DescriptionTooLong);
            }
        }

        if let Some(number) = &self.whatsapp_number {
            if !crate::phone::is_valid(number) {
                return Err(ProductError::InvalidWhatsappNumber);
            }
        }

        if self.benefits.len() > MAX_BENEFITS {
            return Err(ProductError::TooManyBenefits);
        }
        if self
            .benefits
            .iter()
            .any(|benefit| benefit.chars().count() > MAX_BENEFIT_LENGTH)
        {
            return Err(ProductError::BenefitTooLong);
        }

        if self.usage_instructions.len() > MAX_USAGE_INSTRUCTIONS {
            return Err(ProductError::TooManyInstructions);
        }
        if self
            .usage_instructions
            .iter()
            .any(|step| step.chars().count() > MAX_INSTRUCTION_LENGTH)
        {
            return Err(ProductError::InstructionTooLong);
        }

        if self.images.len() > MAX_IMAGES {
            return Err(ProductError::TooManyImages);
        }
        if !self.images.iter().all(|image| is_http_url(image)) {
            return Err(ProductError::InvalidImageUrl);
        }

        Ok(())
    }
}

fn is_http_url(candidate: &str) -> bool {
    matches!(
        Url::parse(candidate),
        Ok(url) if matches!(url.scheme(), "http" | "https")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_product() -> Product {
        Product {
            id: 1,
            name: "كيكه +Vit E - سندرين بيوتي".to_string(),
            brand: "سندرين بيوتي".to_string(),
            price: 350,
            description: Some("كريم مرطب بفيتامين E".to_string()),
            whatsapp_number: Some("01556133633".to_string()),
            benefits: vec!["ترطيب عميق".to_string()],
            usage_instructions: vec!["يوضع مرتين يومياً".to_string()],
            images: vec!["https://example.com/cake.jpg".to_string()],
            is_active: true,
            created_at: DateTime::UNIX_EPOCH,
            updated_at: DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn valid_product_passes() {
        assert_eq!(valid_product().validate(), Ok(()));
    }

    #[test]
    fn list_bounds_are_enforced() {
        let mut product = valid_product();
        product.benefits = vec!["فائدة".to_string(); limits::MAX_BENEFITS + 1];
        assert_eq!(product.validate(), Err(ProductError::TooManyBenefits));

        let mut product = valid_product();
        product.benefits = vec!["و".repeat(limits::MAX_BENEFIT_LENGTH + 1)];
        assert_eq!(product.validate(), Err(ProductError::BenefitTooLong));

        let mut product = valid_product();
        product.usage_instructions = vec!["خطوة".to_string(); limits::MAX_USAGE_INSTRUCTIONS + 1];
        assert_eq!(product.validate(), Err(ProductError::TooManyInstructions));
    }

    #[test]
    fn length_limits_count_characters_not_bytes() {
        let mut product = valid_product();
        // 100 Arabic characters are 200 bytes but still within the limit.
        product.name = "م".repeat(limits::MAX_NAME_LENGTH);
        assert_eq!(product.validate(), Ok(()));
        product.name.push('م');
        assert_eq!(product.validate(), Err(ProductError::NameTooLong));
    }

    #[test]
    fn price_bounds() {
        let mut product = valid_product();
        product.price = 0;
        assert_eq!(product.validate(), Err(ProductError::PriceNotPositive));
        product.price = 1_000_000;
        assert_eq!(product.validate(), Err(ProductError::PriceTooLarge));
    }

    #[test]
    fn image_urls_must_be_http() {
        let mut product = valid_product();
        product.images = vec!["ftp://example.com/cake.jpg".to_string()];
        assert_eq!(product.validate(), Err(ProductError::InvalidImageUrl));
        product.images = vec!["not a url".to_string()];
        assert_eq!(product.validate(), Err(ProductError::InvalidImageUrl));
    }
}
