use crate::models::TokenFormat;

/// Render a raw device token for transmission to the hub.
pub fn format_token(bytes: &[u8], format: TokenFormat) -> String {
    match format {
        TokenFormat::Hex => hex::encode(bytes),
        TokenFormat::LegacyDescription => strip_description(&description(bytes)),
    }
}

/// Reproduces the host's debug-description form: hex in 4-byte groups
/// inside angle brackets, e.g. `<1a2b3c4d 5e6f>`.
fn description(bytes: &[u8]) -> String {
    let groups: Vec<String> = bytes.chunks(4).map(hex::encode).collect();
    format!("<{}>", groups.join(" "))
}

fn strip_description(description: &str) -> String {
    description
        .trim()
        .trim_start_matches('<')
        .trim_end_matches('>')
        .replace(' ', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_token_is_lowercase() {
        assert_eq!(format_token(&[0x1A, 0x2B], TokenFormat::Hex), "1a2b");
    }

    #[test]
    fn test_hex_token_empty() {
        assert_eq!(format_token(&[], TokenFormat::Hex), "");
    }

    #[test]
    fn test_description_grouping() {
        let bytes = [0x1A, 0x2B, 0x3C, 0x4D, 0x5E, 0x6F];
        assert_eq!(description(&bytes), "<1a2b3c4d 5e6f>");
    }

    #[test]
    fn test_legacy_strips_brackets_and_spaces() {
        let bytes = [0x1A, 0x2B, 0x3C, 0x4D, 0x5E, 0x6F];
        assert_eq!(
            format_token(&bytes, TokenFormat::LegacyDescription),
            "1a2b3c4d5e6f"
        );
    }

    #[test]
    fn test_strategies_agree_on_well_formed_tokens() {
        let bytes: Vec<u8> = (0..32).collect();
        assert_eq!(
            format_token(&bytes, TokenFormat::Hex),
            format_token(&bytes, TokenFormat::LegacyDescription)
        );
    }
}
