//! Decoding of the provider's offset-prefixed stream link tokens.
//!
//! A token starts with a digit `n`; its first `n + 16` characters are an
//! offset prefix and IV marker, the rest is base64 ciphertext. The
//! ciphertext is AES-128-CBC under a fixed key and IV with padding disabled;
//! whatever bytes come out are filtered down to printable ASCII.

use base64::{
    Engine, alphabet,
    engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig},
};
use cbc::cipher::{BlockDecryptMut, KeyIvInit, block_padding::NoPadding};

type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

pub const LINK_KEY: &[u8; 16] = b"gy1t#b@jl(b$wtme";
pub const LINK_IV: &[u8; 16] = b"xC4dmVJAq14BfntX";
pub const HLS_CDN_ORIGIN: &str = "https://vodhlsgaana-ebw.akamaized.net/";

const MIN_TOKEN_LEN: usize = 20;
const IV_MARKER_LEN: usize = 16;
const HLS_MARKER: &str = "hls/";

/// Accepts ciphertext with or without trailing `=` padding.
const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decoder for obfuscated stream links.
#[derive(Debug, Clone)]
pub struct LinkDecoder {
    key: [u8; 16],
    iv: [u8; 16],
    cdn_origin: String,
}

impl LinkDecoder {
    pub fn new(key: [u8; 16], iv: [u8; 16], cdn_origin: impl Into<String>) -> Self {
        Self {
            key,
            iv,
            cdn_origin: cdn_origin.into(),
        }
    }

    /// Decoder with the provider's key and IV, rewriting HLS paths onto `cdn_origin`.
    pub fn with_cdn_origin(cdn_origin: impl Into<String>) -> Self {
        Self::new(*LINK_KEY, *LINK_IV, cdn_origin)
    }

    /// Decode a token into a playable link.
    ///
    /// Never fails: anything that cannot be decoded comes back unchanged.
    pub fn decode(&self, token: &str) -> String {
        self.try_decode(token).unwrap_or_else(|| token.to_string())
    }

    fn try_decode(&self, token: &str) -> Option<String> {
        if token.chars().count() < MIN_TOKEN_LEN {
            return None;
        }

        let offset = token.chars().next()?.to_digit(10)? as usize;
        let ciphertext_b64 = skip_chars(token, offset + IV_MARKER_LEN);

        let mut buf = match LENIENT_BASE64.decode(ciphertext_b64) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!("Link token is not valid base64: {}", e);
                return None;
            }
        };

        let cipher = Aes128CbcDec::new(&self.key.into(), &self.iv.into());
        let decrypted = match cipher.decrypt_padded_mut::<NoPadding>(&mut buf) {
            Ok(d) => d,
            Err(e) => {
                tracing::debug!("Link token decryption failed: {}", e);
                return None;
            }
        };

        let text: String = String::from_utf8_lossy(decrypted)
            .chars()
            .filter(|c| (' '..='~').contains(c))
            .collect();

        if let Some(idx) = text.find(HLS_MARKER) {
            return Some(format!("{}{}", self.cdn_origin, &text[idx..]));
        }

        if text.is_empty() { None } else { Some(text) }
    }
}

impl Default for LinkDecoder {
    fn default() -> Self {
        Self::with_cdn_origin(HLS_CDN_ORIGIN)
    }
}

/// Slice off the first `n` characters, yielding an empty string when `s` is shorter.
fn skip_chars(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((idx, _)) => &s[idx..],
        None => "",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use cbc::cipher::BlockEncryptMut;

    type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

    /// Build a token the way the provider does, zero-filling the final block.
    ///
    /// The leading digit counts toward the skipped prefix, so `offset + 16`
    /// characters precede the ciphertext.
    pub(crate) fn encrypt_token(plaintext: &str, offset: usize) -> String {
        assert!(offset < 10);
        let mut buf = plaintext.as_bytes().to_vec();
        let padded_len = buf.len().div_ceil(16) * 16;
        buf.resize(padded_len, 0);

        let enc = Aes128CbcEnc::new(LINK_KEY.into(), LINK_IV.into());
        let ciphertext = enc
            .encrypt_padded_mut::<NoPadding>(&mut buf, padded_len)
            .unwrap();

        format!(
            "{}{}{}",
            offset,
            "x".repeat(offset + IV_MARKER_LEN - 1),
            base64::engine::general_purpose::STANDARD.encode(ciphertext)
        )
    }

    #[test]
    fn test_short_tokens_pass_through() {
        let decoder = LinkDecoder::default();
        for token in ["", "5", "3abcdefghijklmnopqr"] {
            assert_eq!(decoder.decode(token), token);
        }
    }

    #[test]
    fn test_non_digit_prefix_passes_through() {
        let decoder = LinkDecoder::default();
        let token = "xAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA";
        assert_eq!(decoder.decode(token), token);
    }

    #[test]
    fn test_garbage_ciphertext_passes_through() {
        let decoder = LinkDecoder::default();
        // Not base64
        let token = "0xC4dmVJAq14Bfnt!!!not*base64!!!";
        assert_eq!(decoder.decode(token), token);
        // Base64, but not a whole number of blocks
        let token = "0xC4dmVJAq14BfntaGVsbG8=";
        assert_eq!(decoder.decode(token), token);
    }

    #[test]
    fn test_hls_path_is_rewritten_onto_cdn() {
        let decoder = LinkDecoder::default();
        let token = encrypt_token("https://origin.example/hls/song/128/index.m3u8", 3);

        assert_eq!(
            decoder.decode(&token),
            "https://vodhlsgaana-ebw.akamaized.net/hls/song/128/index.m3u8"
        );
    }

    #[test]
    fn test_plain_url_is_returned_cleaned() {
        let decoder = LinkDecoder::default();
        let token = encrypt_token("https://media.example/track.mp4", 0);

        // Zero fill is stripped with the rest of the non-printable bytes
        assert_eq!(decoder.decode(&token), "https://media.example/track.mp4");
    }

    #[test]
    fn test_unpadded_base64_is_accepted() {
        let decoder = LinkDecoder::default();
        let token = encrypt_token("hls/a/b.m3u8", 7);
        let trimmed = token.trim_end_matches('=');

        assert_eq!(
            decoder.decode(trimmed),
            "https://vodhlsgaana-ebw.akamaized.net/hls/a/b.m3u8"
        );
    }

    #[test]
    fn test_custom_cdn_origin() {
        let decoder = LinkDecoder::with_cdn_origin("https://cdn.test/");
        let token = encrypt_token("xyz/hls/1.m3u8", 2);

        assert_eq!(decoder.decode(&token), "https://cdn.test/hls/1.m3u8");
    }
}
