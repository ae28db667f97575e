/// The 27 Egyptian governorates offered by the order form, in display
/// order. Matching anywhere in the system is exact Arabic string equality,
/// never case folded or normalized.
pub const GOVERNORATES: [&str; 27] = [
    "القاهرة",
    "الجيزة",
    "الإسكندرية",
    "القليوبية",
    "الدقهلية",
    "الشرقية",
    "المنوفية",
    "الغربية",
    "البحيرة",
    "كفر الشيخ",
    "دمياط",
    "بورسعيد",
    "الإسماعيلية",
    "السويس",
    "شمال سيناء",
    "جنوب سيناء",
    "الفيوم",
    "بني سويف",
    "المنيا",
    "أسيوط",
    "سوهاج",
    "قنا",
    "الأقصر",
    "أسوان",
    "البحر الأحمر",
    "الوادي الجديد",
    "مطروح",
];

pub fn is_governorate(name: &str) -> bool {
    GOVERNORATES.contains(&name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_governorates() {
        assert!(is_governorate("القاهرة"));
        assert!(is_governorate("مطروح"));
        assert!(!is_governorate(""));
        assert!(!is_governorate("باريس"));
        // No trimming at this level. Callers validate the exact string the
        // form submitted.
        assert!(!is_governorate(" القاهرة"));
    }

    #[test]
    fn list_has_no_duplicates() {
        let unique: std::collections::HashSet<_> = GOVERNORATES.iter().collect();
        assert_eq!(unique.len(), GOVERNORATES.len());
    }
}
