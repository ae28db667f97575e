//! CSV export of the admin order table. The file targets spreadsheet
//! applications used by the merchant, hence the UTF-8 BOM and the Arabic
//! header row.

use {
    chrono::{DateTime, Utc},
    model::order::Order,
};

/// Excel only detects UTF-8 when the file starts with a BOM.
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const HEADER: [&str; 7] = [
    "اسم العميل",
    "الهاتف",
    "العنوان",
    "المحافظة",
    "المبلغ",
    "الحالة",
    "التاريخ",
];

/// Serializes the given orders in their current ordering. Amounts are the
/// raw integer totals so spreadsheets can sum the column.
pub fn to_csv(orders: &[Order]) -> Vec<u8> {
    let mut writer = csv::Writer::from_writer(UTF8_BOM.to_vec());
    // Writing into a Vec cannot fail.
    writer.write_record(HEADER).unwrap();
    for order in orders {
        writer
            .write_record([
                order.customer_name.as_str(),
                order.phone.as_str(),
                order.address.as_str(),
                order.governorate.as_deref().unwrap_or(""),
                &order.total_amount.to_string(),
                &order.status.to_string(),
                &model::format::date(order.created_at),
            ])
            .unwrap();
    }
    writer.into_inner().unwrap()
}

/// `طلبات-<date>.csv`, stamped with the current day.
pub fn filename(now: DateTime<Utc>) -> String {
    format!("طلبات-{}.csv", now.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        chrono::{NaiveDate, TimeZone},
        model::order::OrderStatus,
    };

    fn order() -> Order {
        Order {
            id: 1,
            customer_name: "سارة أحمد".to_string(),
            phone: "01012345678".to_string(),
            address: "10 شارع النيل، المعادي".to_string(),
            governorate: Some("القاهرة".to_string()),
            notes: None,
            total_amount: 380,
            status: OrderStatus::Preparing,
            order_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap(),
        }
    }

    #[test]
    fn starts_with_bom_and_arabic_header() {
        let bytes = to_csv(&[]);
        assert_eq!(&bytes[..3], UTF8_BOM);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert_eq!(text.lines().next().unwrap(), HEADER.join(","));
    }

    #[test]
    fn rows_carry_raw_amount_status_label_and_date() {
        let bytes = to_csv(&[order()]);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        let row = text.lines().nth(1).unwrap();
        assert!(row.contains("سارة أحمد"));
        assert!(row.contains("380"));
        assert!(row.contains("قيد التجهيز"));
        assert!(row.contains("2024-06-01"));
    }

    #[test]
    fn quotes_fields_containing_commas() {
        let bytes = to_csv(&[order()]);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        // The address contains an Arabic comma, not the ASCII separator,
        // so the row still has exactly seven fields.
        assert_eq!(text.lines().nth(1).unwrap().split(',').count(), 7);
    }

    #[test]
    fn missing_governorate_is_an_empty_field() {
        let bytes = to_csv(&[Order {
            governorate: None,
            ..order()
        }]);
        let text = std::str::from_utf8(&bytes[3..]).unwrap();
        assert!(text.lines().nth(1).unwrap().contains(",,"));
    }

    #[test]
    fn filename_is_dated() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap();
        assert_eq!(filename(now), "طلبات-2024-06-01.csv");
    }
}
