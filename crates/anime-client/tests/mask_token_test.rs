//! Unit tests for `mask_token`.
//! API keys are masked for safe logging: first 7 + "***" + last 4 chars;
//! keys of length <= 11 are fully masked as "***".

use anime_client::mask_token;

#[test]
fn mask_token_short_returns_all_star() {
    assert_eq!(mask_token(""), "***");
    assert_eq!(mask_token("abc"), "***");
    assert_eq!(mask_token("r8_12345678"), "***");
}

#[test]
fn mask_token_long_shows_head_and_tail() {
    assert_eq!(mask_token("r8_abcdefghijklmnop"), "r8_abcd***mnop");
    assert_eq!(mask_token("quickstart-1"), "quickst***rt-1");
}

#[test]
fn mask_token_multibyte_does_not_panic() {
    let masked = mask_token("ключ-доступа-12345");
    assert!(masked.starts_with("ключ-до"));
    assert!(masked.ends_with("2345"));
}
