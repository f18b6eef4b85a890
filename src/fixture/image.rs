//! Image responder for cross-origin resource policy tests.
//!
//! Serves `green.png` with status 200 and a header block controlled by the
//! query string:
//!
//! | Parameter | Header |
//! |---|---|
//! | `cached` (presence only) | `Cache-Control: max-age=600000` |
//! | `corp` | `cross-origin-resource-policy` |
//! | `acao` | `access-control-allow-origin` |
//! | (always) | `content-length` |
//! | `type` | `content-type` |
//!
//! Headers are emitted in exactly the order of the table. Values are copied
//! byte for byte.

use std::fs;
use std::path::PathBuf;

use crate::config::schema::FixtureSettings;
use crate::fixture::error::FixtureError;
use crate::http::query::QueryParams;
use crate::http::writer::ResponseWriter;

/// `Cache-Control` value sent when `cached` is present.
pub const CACHED_MAX_AGE: &[u8] = b"max-age=600000";

/// Serves a fixed image file with query-controlled headers.
#[derive(Debug, Clone)]
pub struct ImageResponder {
    image_path: PathBuf,
}

impl ImageResponder {
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
        }
    }

    pub fn from_settings(settings: &FixtureSettings) -> Self {
        Self::new(settings.image_path())
    }

    /// Read the image from disk. Called once per request.
    pub fn load_image(&self) -> Result<Vec<u8>, FixtureError> {
        fs::read(&self.image_path).map_err(|source| FixtureError::FileAccess {
            path: self.image_path.clone(),
            source,
        })
    }

    /// Load the image and write the full response.
    ///
    /// Nothing is written if the image cannot be read.
    pub fn handle<W>(&self, query: &QueryParams, writer: &mut W) -> Result<(), FixtureError>
    where
        W: ResponseWriter + ?Sized,
    {
        let body = self.load_image()?;
        respond(&body, query, writer)
    }
}

/// Write status, headers and `body` according to `query`.
pub fn respond<W>(body: &[u8], query: &QueryParams, writer: &mut W) -> Result<(), FixtureError>
where
    W: ResponseWriter + ?Sized,
{
    let content_type = query.first(b"type");
    let cached = query.contains(b"cached");
    let corp = query.first(b"corp");
    let acao = query.first(b"acao");

    writer.set_auto_headers(false);
    writer.write_status(200)?;

    if cached {
        writer.write_header(b"Cache-Control", CACHED_MAX_AGE)?;
    }
    if let Some(corp) = corp {
        writer.write_header(b"cross-origin-resource-policy", corp)?;
    }
    if let Some(acao) = acao {
        writer.write_header(b"access-control-allow-origin", acao)?;
    }
    writer.write_header(b"content-length", body.len().to_string().as_bytes())?;
    if let Some(content_type) = content_type {
        writer.write_header(b"content-type", content_type)?;
    }
    writer.end_headers()?;

    writer.write_body(body)?;

    tracing::debug!(
        cached,
        corp = corp.is_some(),
        acao = acao.is_some(),
        content_type = content_type.is_some(),
        length = body.len(),
        "Image fixture served"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::writer::RecordingWriter;

    const GREEN_PNG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/resources/green.png");

    fn green() -> Vec<u8> {
        fs::read(GREEN_PNG).unwrap()
    }

    fn serve(query: &str) -> RecordingWriter {
        let responder = ImageResponder::new(GREEN_PNG);
        let mut writer = RecordingWriter::new();
        responder
            .handle(&QueryParams::parse(query.as_bytes()), &mut writer)
            .unwrap();
        writer
    }

    #[test]
    fn test_no_parameters() {
        let w = serve("");
        let image = green();

        assert_eq!(w.status, Some(200));
        assert_eq!(w.header_names(), vec!["content-length"]);
        assert_eq!(w.header("content-length"), Some(image.len().to_string().as_bytes()));
        assert_eq!(w.body, image);
        assert!(!w.auto_headers);
        assert!(w.headers_ended());
    }

    #[test]
    fn test_unrecognized_parameters_ignored() {
        let w = serve("foo=bar&Type=image/png&CORP=x");
        assert_eq!(w.header_names(), vec!["content-length"]);
    }

    #[test]
    fn test_corp_and_type_scenario() {
        let w = serve("corp=same-origin&type=image/png");
        let image = green();

        assert_eq!(w.status, Some(200));
        assert_eq!(
            w.header_names(),
            vec!["cross-origin-resource-policy", "content-length", "content-type"]
        );
        assert_eq!(w.header("cross-origin-resource-policy"), Some(&b"same-origin"[..]));
        assert_eq!(w.header("content-type"), Some(&b"image/png"[..]));
        assert_eq!(w.body, image);
    }

    #[test]
    fn test_cached_is_presence_only() {
        for query in ["cached", "cached=", "cached=0", "cached=false"] {
            let w = serve(query);
            assert_eq!(w.header("cache-control"), Some(CACHED_MAX_AGE), "query {query}");
        }
        assert_eq!(serve("").header("cache-control"), None);
    }

    #[test]
    fn test_values_copied_verbatim() {
        let w = serve("corp=&acao=%FFodd%20value&type=");
        assert_eq!(w.header("cross-origin-resource-policy"), Some(&b""[..]));
        assert_eq!(w.header("access-control-allow-origin"), Some(&b"\xffodd value"[..]));
        assert_eq!(w.header("content-type"), Some(&b""[..]));
    }

    #[test]
    fn test_header_order_with_everything() {
        let w = serve("type=image/png&acao=*&corp=cross-origin&cached");
        assert_eq!(
            w.header_names(),
            vec![
                "Cache-Control",
                "cross-origin-resource-policy",
                "access-control-allow-origin",
                "content-length",
                "content-type",
            ]
        );
    }

    #[test]
    fn test_first_value_wins() {
        let w = serve("acao=https://a.example&acao=https://b.example");
        assert_eq!(w.header("access-control-allow-origin"), Some(&b"https://a.example"[..]));
    }

    #[test]
    fn test_idempotent() {
        let a = serve("cached&corp=same-site&acao=*&type=image/png");
        let b = serve("cached&corp=same-site&acao=*&type=image/png");
        assert_eq!(a.status, b.status);
        assert_eq!(a.headers, b.headers);
        assert_eq!(a.body, b.body);
    }

    #[test]
    fn test_missing_image() {
        let responder = ImageResponder::new("/nonexistent/fixture/green.png");
        let mut writer = RecordingWriter::new();
        let err = responder
            .handle(&QueryParams::parse(b"corp=same-origin"), &mut writer)
            .unwrap_err();

        assert!(matches!(err, FixtureError::FileAccess { .. }));
        assert_eq!(writer.status, None);
        assert!(writer.headers.is_empty());
    }

    #[test]
    fn test_from_settings() {
        let settings = FixtureSettings {
            resource_dir: PathBuf::from("/srv/fixtures"),
            image_file: "green.png".to_string(),
            ..FixtureSettings::default()
        };
        let responder = ImageResponder::from_settings(&settings);
        match responder.load_image() {
            Err(FixtureError::FileAccess { path, .. }) => {
                assert_eq!(path, PathBuf::from("/srv/fixtures/green.png"));
            }
            other => panic!("expected FileAccess error, got {:?}", other),
        }
    }
}
