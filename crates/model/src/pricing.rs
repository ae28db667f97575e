//! Shipping fees and order totals. All amounts are integral Egyptian
//! pounds; the fee table and the catalogue only ever use whole-pound
//! prices.

/// Shipping fees in EGP keyed by governorate.
pub const SHIPPING_FEE_CAIRO: i64 = 30;
pub const SHIPPING_FEE_GIZA: i64 = 30;
pub const SHIPPING_FEE_ALEXANDRIA: i64 = 35;
pub const SHIPPING_FEE_DEFAULT: i64 = 40;

/// Looks up the shipping fee for a governorate. Only Cairo, Giza and
/// Alexandria are special-cased; every other value, including a missing
/// one, pays the default fee. Comparison is exact Arabic string equality
/// after trimming.
pub fn shipping_fee(governorate: Option<&str>) -> i64 {
    let Some(governorate) = governorate else {
        return SHIPPING_FEE_DEFAULT;
    };
    match governorate.trim() {
        "القاهرة" => SHIPPING_FEE_CAIRO,
        "الجيزة" => SHIPPING_FEE_GIZA,
        "الإسكندرية" => SHIPPING_FEE_ALEXANDRIA,
        _ => SHIPPING_FEE_DEFAULT,
    }
}

/// Breakdown of an order's price as shown to the customer and stored on
/// the order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct OrderTotal {
    pub subtotal: i64,
    pub shipping: i64,
    pub total: i64,
}

/// `subtotal = price × quantity`, `total = subtotal + shipping`. The total
/// is computed once at order creation and never recomputed afterwards.
pub fn order_total(price: i64, quantity: i64, governorate: Option<&str>) -> OrderTotal {
    let subtotal = price * quantity;
    let shipping = shipping_fee(governorate);
    OrderTotal {
        subtotal,
        shipping,
        total: subtotal + shipping,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_table() {
        assert_eq!(shipping_fee(Some("القاهرة")), 30);
        assert_eq!(shipping_fee(Some("الجيزة")), 30);
        assert_eq!(shipping_fee(Some("الإسكندرية")), 35);
        assert_eq!(shipping_fee(Some("أسوان")), 40);
        assert_eq!(shipping_fee(Some("")), 40);
        assert_eq!(shipping_fee(None), 40);
    }

    #[test]
    fn fee_lookup_trims_but_never_case_folds() {
        assert_eq!(shipping_fee(Some(" القاهرة ")), 30);
        // A different Arabic spelling is a different governorate.
        assert_eq!(shipping_fee(Some("القاهره")), 40);
    }

    #[test]
    fn total_for_cairo() {
        assert_eq!(
            order_total(100, 1, Some("القاهرة")),
            OrderTotal {
                subtotal: 100,
                shipping: 30,
                total: 130,
            }
        );
    }

    #[test]
    fn total_with_quantity_and_default_fee() {
        assert_eq!(
            order_total(250, 2, None),
            OrderTotal {
                subtotal: 500,
                shipping: 40,
                total: 540,
            }
        );
    }
}
