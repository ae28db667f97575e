//! Display formatting for prices, phone numbers and dates. The price and
//! phone formatters are memoized because the admin table renders the same
//! handful of values over and over; the caches are bounded so a long-lived
//! process cannot grow them without limit.

use {
    cached::{Cached, SizedCache},
    chrono::{DateTime, Utc},
    std::sync::{LazyLock, Mutex},
};

const CACHE_SIZE: usize = 1024;

static PRICE_CACHE: LazyLock<Mutex<SizedCache<i64, String>>> =
    LazyLock::new(|| Mutex::new(SizedCache::with_size(CACHE_SIZE)));

static PHONE_CACHE: LazyLock<Mutex<SizedCache<String, String>>> =
    LazyLock::new(|| Mutex::new(SizedCache::with_size(CACHE_SIZE)));

/// Formats an amount as "1,234 ج.م". Memoized; the cache-hit path returns
/// exactly the string the miss path produced.
pub fn price(amount: i64) -> String {
    if let Some(hit) = PRICE_CACHE.lock().unwrap().cache_get(&amount) {
        return hit.clone();
    }
    let formatted = format!("{} {}", thousands(amount), crate::site::CURRENCY);
    PRICE_CACHE
        .lock()
        .unwrap()
        .cache_set(amount, formatted.clone());
    formatted
}

/// Groups an 11-digit number as "0101 234 5678" for display. Anything that
/// is not 11 characters long is returned unchanged.
pub fn phone(number: &str) -> String {
    let key = number.to_string();
    if let Some(hit) = PHONE_CACHE.lock().unwrap().cache_get(&key) {
        return hit.clone();
    }
    let formatted = if number.len() == 11 && number.is_ascii() {
        format!("{} {} {}", &number[..4], &number[4..7], &number[7..])
    } else {
        number.to_string()
    };
    PHONE_CACHE
        .lock()
        .unwrap()
        .cache_set(key, formatted.clone());
    formatted
}

/// Date as it appears in the CSV export, e.g. "2024-06-01".
pub fn date(timestamp: DateTime<Utc>) -> String {
    timestamp.date_naive().format("%Y-%m-%d").to_string()
}

fn thousands(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if amount < 0 {
        grouped.push('-');
    }
    for (i, digit) in digits.chars().enumerate() {
        if i != 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
