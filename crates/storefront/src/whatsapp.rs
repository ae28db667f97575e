//! Deep links into the messaging app. The message text is what the
//! merchant's support flow expects, so its wording is fixed.

use {anyhow::Result, model::pricing, url::Url};

/// The prefilled conversation opener: product, customer, governorate and
/// the price breakdown, priced with the governorate's shipping fee.
pub fn order_message(
    customer_name: &str,
    product_name: &str,
    product_price: i64,
    governorate: &str,
) -> String {
    let total = pricing::order_total(product_price, 1, Some(governorate));
    format!(
        "مرحباً، أريد طلب:\n\n📦 المنتج: {}\n👤 الاسم: {}\n📍 المحافظة: {}\n\n💰 السعر: {}\n🚚 الشحن: {}\n💳 الإجمالي: {}\n\nيرجى التأكيد والتواصل لإتمام الطلب.",
        product_name,
        customer_name,
        governorate,
        model::format::price(total.subtotal),
        model::format::price(total.shipping),
        model::format::price(total.total),
    )
}

/// `https://wa.me/<phone>?text=<message>`. `Url` does the query encoding,
/// which keeps the Arabic text and emoji intact.
pub fn order_link(phone: &str, message: &str) -> Result<Url> {
    let url = Url::parse_with_params(
        &format!("https://wa.me/{phone}"),
        &[("text", message)],
    )?;
    Ok(url)
}
