// Shadows the `serde` crate; refer to the external crate as `::serde`.
use ::serde::{Deserialize, Deserializer};

/// Deserialize a field that distinguishes "absent" from "explicitly null".
///
/// Use with `#[serde(default, deserialize_with = "cms_core::serde::double_option")]`
/// on an `Option<Option<T>>`:
///
/// | JSON | Rust |
/// |------|------|
/// | field absent | `None` |
/// | `null` | `Some(None)` |
/// | value | `Some(Some(value))` |
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}
