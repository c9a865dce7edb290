//! # Share Links
//!
//! Serializes a configuration into a URL a visitor can send to someone else,
//! and decodes it back on the receiving end.
//!
//! ## Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Share Link Format                                 │
//! │                                                                         │
//! │  https://heartwood.example/commission?config=<payload>                  │
//! │                                                                         │
//! │  payload = base64url_nopad( JSON({ version: 1, config: {...} }) )      │
//! │                                                                         │
//! │  The uploaded pattern image is ALWAYS excluded from the payload:       │
//! │  embedded image bytes would blow past practical URL length limits      │
//! │  on every mail client and chat app that matters. A decoded             │
//! │  configuration therefore falls back from the custom pattern to         │
//! │  "none" (the invariant "custom requires an image" is preserved).       │
//! │                                                                         │
//! │  Best-effort contract: very large inscriptions still produce long      │
//! │  URLs; no further length guarantee is made.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use tracing::debug;

use heartwood_core::{Configuration, ConfigurationUpdate};

use crate::error::{StoreError, StoreResult};

/// Query parameter carrying the payload.
pub const SHARE_PARAM: &str = "config";

/// Version of the share payload format.
pub const SHARE_VERSION: u32 = 1;

/// Versioned wire shape of a share link payload.
#[derive(Debug, Serialize, Deserialize)]
struct SharePayload {
    version: u32,
    config: Configuration,
}

/// Builds a shareable URL for a configuration.
///
/// The pattern image (if any) is stripped before encoding; everything else
/// travels verbatim.
///
/// ## Example
/// ```rust,ignore
/// let url = share_url("https://heartwood.example/commission", &config);
/// // https://heartwood.example/commission?config=eyJ2ZXJzaW9uIjoxLCJjb25m...
/// ```
pub fn share_url(base_url: &str, config: &Configuration) -> String {
    let param = encode_share_param(config);
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, SHARE_PARAM, param)
}

/// Encodes just the payload value (without the parameter name).
pub fn encode_share_param(config: &Configuration) -> String {
    let payload = SharePayload {
        version: SHARE_VERSION,
        config: strip_image(config),
    };

    // A Configuration serializes infallibly: no maps with non-string keys,
    // no non-finite floats from the clamped sliders
    let json = serde_json::to_string(&payload).expect("configuration serialization is infallible");
    debug!(bytes = json.len(), "Encoded share payload");
    URL_SAFE_NO_PAD.encode(json)
}

/// Decodes a share payload value back into a configuration.
///
/// ## Errors
/// `StoreError::InvalidSharePayload` — not base64, not JSON, unknown catalog
/// keys, or an unsupported payload version. Never a panic: share links come
/// from the outside world.
pub fn decode_share_param(param: &str) -> StoreResult<Configuration> {
    let bytes = URL_SAFE_NO_PAD
        .decode(param.trim())
        .map_err(|e| StoreError::InvalidSharePayload(format!("bad base64: {e}")))?;

    let payload: SharePayload = serde_json::from_slice(&bytes)
        .map_err(|e| StoreError::InvalidSharePayload(format!("bad payload: {e}")))?;

    if payload.version != SHARE_VERSION {
        return Err(StoreError::InvalidSharePayload(format!(
            "unsupported share version {}",
            payload.version
        )));
    }

    // Re-run the reducer's normalization so a payload that claimed a custom
    // pattern (its image never travels) lands in a consistent state
    Ok(payload.config.apply(&ConfigurationUpdate::default()))
}

/// Extracts and decodes the payload from a full URL.
///
/// ## Errors
/// `StoreError::InvalidSharePayload` — the URL has no `config` parameter,
/// or the payload itself is invalid.
pub fn decode_share_url(url: &str) -> StoreResult<Configuration> {
    let query = url
        .split_once('?')
        .map(|(_, query)| query)
        .ok_or_else(|| StoreError::InvalidSharePayload("no query string".to_string()))?;

    let param = query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == SHARE_PARAM)
        .map(|(_, value)| value)
        .ok_or_else(|| {
            StoreError::InvalidSharePayload(format!("no {SHARE_PARAM} parameter"))
        })?;

    decode_share_param(param)
}

/// Returns a copy of the configuration with the pattern image removed and
/// invariants re-normalized.
fn strip_image(config: &Configuration) -> Configuration {
    let mut stripped = config.clone();
    stripped.custom_pattern_image = None;
    // Empty update re-runs normalization: Custom without an image falls back
    stripped.apply(&ConfigurationUpdate::default())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use heartwood_core::{
        CarvingPattern, CarvingTechnique, Dimensions, PatternImage, WoodType,
    };

    fn carved_walnut() -> Configuration {
        Configuration::new().apply(&ConfigurationUpdate {
            wood_type: Some(WoodType::Walnut),
            carving_technique: Some(CarvingTechnique::Relief),
            carving_depth: Some(4),
            carving_detail: Some(5),
            dimensions: Some(Dimensions::new(1.2, 2.0, 1.0)),
            custom_text: Some("For Marta".to_string()),
            rush_order: Some(true),
            ..Default::default()
        })
    }

    #[test]
    fn test_round_trip() {
        let config = carved_walnut();
        let url = share_url("https://heartwood.example/commission", &config);
        assert!(url.starts_with("https://heartwood.example/commission?config="));

        let decoded = decode_share_url(&url).unwrap();
        assert_eq!(decoded, config);
    }

    #[test]
    fn test_base_url_with_existing_query() {
        let url = share_url("https://heartwood.example/commission?ref=mail", &Configuration::new());
        assert!(url.contains("?ref=mail&config="));
        assert!(decode_share_url(&url).is_ok());
    }

    #[test]
    fn test_image_is_excluded_and_pattern_falls_back() {
        let png = vec![0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
        let image = PatternImage::new("rose.png", "image/png", png).unwrap();
        let config = carved_walnut().with_custom_pattern(image);
        assert_eq!(config.pattern, CarvingPattern::Custom);

        let param = encode_share_param(&config);
        let decoded = decode_share_param(&param).unwrap();

        assert!(decoded.custom_pattern_image.is_none());
        assert_eq!(decoded.pattern, CarvingPattern::None);
        // Everything except the carving pattern block survives
        assert_eq!(decoded.wood_type, config.wood_type);
        assert_eq!(decoded.carving_depth, config.carving_depth);
    }

    #[test]
    fn test_payload_is_url_safe() {
        let param = encode_share_param(&carved_walnut());
        assert!(param
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(
            decode_share_param("!!!not-base64!!!"),
            Err(StoreError::InvalidSharePayload(_))
        ));

        let not_json = URL_SAFE_NO_PAD.encode("plainly not json");
        assert!(matches!(
            decode_share_param(&not_json),
            Err(StoreError::InvalidSharePayload(_))
        ));
    }

    #[test]
    fn test_decode_rejects_unknown_catalog_key() {
        let bogus =
            r#"{"version":1,"config":{"productType":"spaceship","woodType":"oak","finishType":"natural","carvingTechnique":"none","carvingStyle":"none","pattern":"none","carvingDepth":0,"carvingDetail":0,"dimensions":{"width":1.2,"height":2.0,"depth":1.0},"quantity":1,"customText":"","customPatternImage":null,"rushOrder":false}}"#;
        let param = URL_SAFE_NO_PAD.encode(bogus);
        assert!(matches!(
            decode_share_param(&param),
            Err(StoreError::InvalidSharePayload(_))
        ));
    }

    #[test]
    fn test_decode_rejects_future_version() {
        let config = Configuration::new();
        let json = serde_json::to_string(&serde_json::json!({
            "version": 99,
            "config": config,
        }))
        .unwrap();
        let param = URL_SAFE_NO_PAD.encode(json);

        assert!(matches!(
            decode_share_param(&param),
            Err(StoreError::InvalidSharePayload(_))
        ));
    }

    #[test]
    fn test_missing_param_in_url() {
        assert!(decode_share_url("https://heartwood.example/commission").is_err());
        assert!(decode_share_url("https://heartwood.example/commission?ref=mail").is_err());
    }
}
