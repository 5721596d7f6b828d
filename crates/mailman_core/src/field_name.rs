//! Codec for member addresses embedded in form field names.
//!
//! The members page names each checkbox `<quoted-address>_<key>`, quoting the
//! address the way Python 2's `urllib.quote` does. Encoders and extractors
//! both go through this module so the two directions cannot drift apart.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::PageError;
use crate::model::SettingKey;

/// Bytes left unescaped: ASCII alphanumerics plus `_ . - /`.
const QUOTE_SAFE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'-')
    .remove(b'/');

pub fn encode_address(address: &str) -> String {
    utf8_percent_encode(address, QUOTE_SAFE).to_string()
}

pub fn decode_address(encoded: &str) -> Result<String, PageError> {
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| PageError::UndecodableFieldName(encoded.to_string()))
}

/// `<quoted-address>_<key>`
pub fn setting_field(address: &str, key: SettingKey) -> String {
    format!("{}_{}", encode_address(address), key.suffix())
}

/// Split a checkbox name into its address and setting key.
///
/// Returns `Ok(None)` when the suffix after the last underscore is not a
/// known setting key (`unsub`, `realname` and friends). The address part
/// may itself contain underscores.
pub fn parse_setting_field(name: &str) -> Result<Option<(String, SettingKey)>, PageError> {
    let Some((encoded, suffix)) = name.rsplit_once('_') else {
        return Ok(None);
    };
    let Some(key) = SettingKey::from_suffix(suffix) else {
        return Ok(None);
    };
    Ok(Some((decode_address(encoded)?, key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_sign_is_quoted_and_underscores_are_kept() {
        assert_eq!(encode_address("first_last@example.com"), "first_last%40example.com");
        assert_eq!(encode_address("a+b~c@x.org"), "a%2Bb%7Ec%40x.org");
    }

    #[test]
    fn field_name_splits_on_last_underscore() {
        let parsed = parse_setting_field("first_last%40example.com_nodupes").unwrap();
        assert_eq!(
            parsed,
            Some(("first_last@example.com".to_string(), SettingKey::NoDupes))
        );
    }

    #[test]
    fn unknown_suffix_is_not_a_setting() {
        assert_eq!(parse_setting_field("a%40example.com_unsub").unwrap(), None);
        assert_eq!(parse_setting_field("user").unwrap(), None);
    }

    #[test]
    fn invalid_utf8_is_a_page_error() {
        assert!(matches!(
            parse_setting_field("%FF%FE_mod"),
            Err(PageError::UndecodableFieldName(_))
        ));
    }

    #[test]
    fn setting_field_matches_parse() {
        let name = setting_field("x_y@example.com", SettingKey::PlainTextDigest);
        assert_eq!(name, "x_y%40example.com_plain");
        assert_eq!(
            parse_setting_field(&name).unwrap(),
            Some(("x_y@example.com".to_string(), SettingKey::PlainTextDigest))
        );
    }
}
