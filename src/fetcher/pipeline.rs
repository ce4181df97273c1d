use crate::fetcher::{errors::FetchError, types::PageResponse};
use bytes::Bytes;
use chrono::Utc;
use encoding_rs::Encoding;
use regex::Regex;
use reqwest::StatusCode;
use std::sync::LazyLock;
use url::Url;

/// How far into the body a `<meta>` charset declaration is looked for.
const SNIFF_WINDOW: usize = 4096;

static CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)charset\s*=\s*["']?([^"'\s;]+)"#).unwrap());

static META_CHARSET_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)<meta\s+[^>]*?charset\s*=\s*["']?([^"'\s/>]+)"#).unwrap());

pub fn process_response(
    url_final: Url,
    status: StatusCode,
    body_bytes: Bytes,
    content_type: &str,
) -> Result<PageResponse, FetchError> {
    let encoding = detect_encoding(content_type, &body_bytes);
    let body = decode(&body_bytes, encoding)?;

    Ok(PageResponse {
        url_final,
        status,
        encoding,
        body,
        fetched_at: Utc::now(),
    })
}

/// Header charset first, then an in-document `<meta>` declaration, then a guess.
pub fn detect_encoding(content_type: &str, body_bytes: &[u8]) -> &'static Encoding {
    if let Some(encoding) = label_from(&CHARSET_REGEX, content_type) {
        return encoding;
    }

    // Also covers <meta http-equiv="Content-Type" content="...; charset=...">
    let search_bytes = &body_bytes[..body_bytes.len().min(SNIFF_WINDOW)];
    let search_str = String::from_utf8_lossy(search_bytes);
    if let Some(encoding) = label_from(&META_CHARSET_REGEX, &search_str) {
        return encoding;
    }

    let mut detector = chardetng::EncodingDetector::new();
    detector.feed(search_bytes, false);
    detector.guess(None, true)
}

fn label_from(regex: &Regex, haystack: &str) -> Option<&'static Encoding> {
    let label = regex.captures(haystack)?.get(1)?.as_str().to_lowercase();
    Encoding::for_label(label.as_bytes())
}

fn decode(body_bytes: &[u8], encoding: &'static Encoding) -> Result<String, FetchError> {
    let (decoded, _encoding, had_errors) = encoding.decode(body_bytes);

    if had_errors {
        return Err(FetchError::Decode(encoding.name().to_string()));
    }

    Ok(decoded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_encoding_from_content_type() {
        let body = b"<html><head><title>Test</title></head></html>";
        let encoding = detect_encoding("text/html; charset=utf-8", body);
        assert_eq!(encoding, encoding_rs::UTF_8);
    }

    #[test]
    fn test_detect_encoding_from_meta_tag() {
        let body = b"<html><head><meta charset=\"iso-8859-1\"><title>Test</title></head></html>";
        // encoding_rs maps ISO-8859-1 onto its windows-1252 superset
        assert_eq!(detect_encoding("text/html", body), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_detect_encoding_from_meta_http_equiv() {
        let body = b"<html><head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"><title>Test</title></head></html>";
        assert_eq!(detect_encoding("text/html", body), encoding_rs::WINDOWS_1252);
    }

    #[test]
    fn test_decode_latin1_title() {
        let body = b"<h1>Am\xe9lie</h1>";
        let decoded = decode(body, encoding_rs::WINDOWS_1252).unwrap();
        assert_eq!(decoded, "<h1>Amélie</h1>");
    }

    #[test]
    fn test_decode_rejects_invalid_utf8() {
        let body = b"<h1>\xff\xfe</h1>";
        assert!(matches!(
            decode(body, encoding_rs::UTF_8),
            Err(FetchError::Decode(_))
        ));
    }
}
