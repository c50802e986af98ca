//! HAR (HTTP Archive) handling: parse capture files and extract the image
//! URLs to download.
//!
//! A HAR file is a JSON log of browser network activity; an entry qualifies
//! for download when its response `mimeType` contains "image". Malformed
//! entries are skipped rather than treated as errors.

mod extract;
mod parse;

pub use extract::extract_image_urls;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_har(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f.flush().unwrap();
        f
    }

    #[test]
    fn extracts_only_image_entries_in_order() {
        let har = r#"{
            "log": {
                "entries": [
                    {
                        "request": { "url": "https://cdn.example.com/a.png" },
                        "response": { "content": { "mimeType": "image/png" } }
                    },
                    {
                        "request": { "url": "https://example.com/index.html" },
                        "response": { "content": { "mimeType": "text/html" } }
                    },
                    {
                        "request": { "url": "https://cdn.example.com/b.png" },
                        "response": { "content": { "mimeType": "image/png" } }
                    }
                ]
            }
        }"#;
        let f = write_har(har);
        let urls = extract_image_urls(f.path()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://cdn.example.com/a.png".to_string(),
                "https://cdn.example.com/b.png".to_string(),
            ]
        );
    }

    #[test]
    fn skips_entries_missing_fields() {
        let har = r#"{
            "log": {
                "entries": [
                    { "request": { "url": "https://example.com/no-response" } },
                    {
                        "response": { "content": { "mimeType": "image/jpeg" } }
                    },
                    {
                        "request": { "url": "https://example.com/no-mime" },
                        "response": { "content": {} }
                    },
                    {
                        "request": { "url": "https://cdn.example.com/ok.jpg" },
                        "response": { "content": { "mimeType": "image/jpeg" } }
                    }
                ]
            }
        }"#;
        let f = write_har(har);
        let urls = extract_image_urls(f.path()).unwrap();
        assert_eq!(urls, vec!["https://cdn.example.com/ok.jpg".to_string()]);
    }

    #[test]
    fn mime_substring_match_covers_svg_and_webp() {
        let har = r#"{
            "log": {
                "entries": [
                    {
                        "request": { "url": "https://cdn.example.com/logo.svg" },
                        "response": { "content": { "mimeType": "image/svg+xml" } }
                    },
                    {
                        "request": { "url": "https://cdn.example.com/photo.webp" },
                        "response": { "content": { "mimeType": "image/webp" } }
                    }
                ]
            }
        }"#;
        let f = write_har(har);
        let urls = extract_image_urls(f.path()).unwrap();
        assert_eq!(urls.len(), 2);
    }

    #[test]
    fn empty_entries_yield_no_urls() {
        let f = write_har(r#"{"log":{"entries":[]}}"#);
        let urls = extract_image_urls(f.path()).unwrap();
        assert!(urls.is_empty());
    }

    #[test]
    fn invalid_json_is_an_error() {
        let f = write_har("{ not json");
        assert!(extract_image_urls(f.path()).is_err());
    }
}
