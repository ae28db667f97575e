//! Declarative field validation for the order form. Every field has a
//! minimum/maximum length or membership constraint and a localized error
//! message. The form path surfaces the first failing field; a secondary
//! helper collects every failing field for batch validation.

use {
    model::{governorate, order::OrderCreation, phone},
    regex::Regex,
    std::{collections::BTreeMap, sync::LazyLock},
    thiserror::Error,
};

static ARABIC_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\u{0600}-\u{06FF}\s]+$").unwrap());

const NAME_MIN: usize = 2;
const NAME_MAX: usize = 50;
const ADDRESS_MIN: usize = 10;
const ADDRESS_MAX: usize = 200;
const NOTES_MAX: usize = 500;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum ValidationError {
    #[error("يرجى إدخال الاسم")]
    MissingName,
    #[error("الاسم يجب أن يحتوي على حرفين على الأقل")]
    NameTooShort,
    #[error("الاسم طويل جداً")]
    NameTooLong,
    #[error("الاسم يجب أن يحتوي على أحرف عربية فقط")]
    NameNotArabic,
    #[error("رقم الهاتف غير صحيح (يجب أن يبدأ بـ 01)")]
    InvalidPhone,
    #[error("يرجى إدخال العنوان")]
    MissingAddress,
    #[error("العنوان يجب أن يحتوي على 10 أحرف على الأقل")]
    AddressTooShort,
    #[error("العنوان طويل جداً")]
    AddressTooLong,
    #[error("يرجى اختيار المحافظة")]
    MissingGovernorate,
    #[error("المحافظة غير صحيحة")]
    UnknownGovernorate,
    #[error("الملاحظات طويلة جداً")]
    NotesTooLong,
}

impl ValidationError {
    /// The form field the error belongs to, as named on the wire.
    pub fn field(&self) -> &'static str {
        use ValidationError::*;
        match self {
            MissingName | NameTooShort | NameTooLong | NameNotArabic => "customer_name",
            InvalidPhone => "phone",
            MissingAddress | AddressTooShort | AddressTooLong => "address",
            MissingGovernorate | UnknownGovernorate => "governorate",
            NotesTooLong => "notes",
        }
    }
}

/// Validates all fields in form order and returns the first failure, which
/// is the one the form surfaces inline.
pub fn validate(creation: &OrderCreation) -> Result<(), ValidationError> {
    validate_name(&creation.customer_name)?;
    validate_phone(&creation.phone)?;
    validate_address(&creation.address)?;
    validate_governorate(&creation.governorate)?;
    validate_notes(creation.notes.as_deref())?;
    Ok(())
}

/// Collects every failing field, keyed by field name. Empty map means the
/// submission is valid.
pub fn validate_all(creation: &OrderCreation) -> BTreeMap<&'static str, ValidationError> {
    [
        validate_name(&creation.customer_name),
        validate_phone(&creation.phone),
        validate_address(&creation.address),
        validate_governorate(&creation.governorate),
        validate_notes(creation.notes.as_deref()),
    ]
    .into_iter()
    .filter_map(Result::err)
    .map(|err| (err.field(), err))
    .collect()
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let len = name.chars().count();
    if len < NAME_MIN {
        return Err(ValidationError::NameTooShort);
    }
    if len > NAME_MAX {
        return Err(ValidationError::NameTooLong);
    }
    if !ARABIC_NAME.is_match(name) {
        return Err(ValidationError::NameNotArabic);
    }
    Ok(())
}

fn validate_phone(number: &str) -> Result<(), ValidationError> {
    if !phone::is_valid(number) {
        return Err(ValidationError::InvalidPhone);
    }
    Ok(())
}

fn validate_address(address: &str) -> Result<(), ValidationError> {
    let address = address.trim();
    if address.is_empty() {
        return Err(ValidationError::MissingAddress);
    }
    let len = address.chars().count();
    if len < ADDRESS_MIN {
        return Err(ValidationError::AddressTooShort);
    }
    if len > ADDRESS_MAX {
        return Err(ValidationError::AddressTooLong);
    }
    Ok(())
}

fn validate_governorate(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::MissingGovernorate);
    }
    if !governorate::is_governorate(name) {
        return Err(ValidationError::UnknownGovernorate);
    }
    Ok(())
}

fn validate_notes(notes: Option<&str>) -> Result<(), ValidationError> {
    match notes {
        Some(notes) if notes.chars().count() > NOTES_MAX => Err(ValidationError::NotesTooLong),
        _ => Ok(()),
    }
}
