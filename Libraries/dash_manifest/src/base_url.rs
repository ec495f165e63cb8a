use url::Url;

/// The directory URL a manifest's relative segment and `BaseURL` paths resolve
/// against: everything up to and including the last `/`.
pub fn stream_base_url(manifest_url: &str) -> String {
    match manifest_url.rfind('/') {
        Some(pos) => manifest_url[..=pos].to_string(),
        None => String::new(),
    }
}

/// Joins a representation `BaseURL` onto the stream base URL. Absolute URLs are
/// returned unchanged.
pub fn resolve_url(base_url: &str, relative_url: &str) -> Result<String, url::ParseError> {
    if let Ok(absolute) = Url::parse(relative_url) {
        return Ok(absolute.to_string());
    }
    Ok(Url::parse(base_url)?.join(relative_url)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_the_manifest_file_name() {
        assert_eq!(
            stream_base_url("https://cdn.example/path/manifest.mpd"),
            "https://cdn.example/path/"
        );
        assert_eq!(stream_base_url("https://cdn.example/path/"), "https://cdn.example/path/");
        assert_eq!(stream_base_url("manifest.mpd"), "");
    }

    #[test]
    fn resolves_relative_and_keeps_absolute() {
        let base = "https://cdn.example/path/";
        assert_eq!(
            resolve_url(base, "video/seg.m4s").unwrap(),
            "https://cdn.example/path/video/seg.m4s"
        );
        assert_eq!(
            resolve_url(base, "https://other.example/sub.vtt").unwrap(),
            "https://other.example/sub.vtt"
        );
        assert!(resolve_url("not a url", "seg.m4s").is_err());
    }
}
