use reqwest::Url;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Where the guideline markdown lives upstream.
pub const DEFAULT_SOURCE_URL: &str =
    "https://raw.githubusercontent.com/isocpp/CppCoreGuidelines/master/CppCoreGuidelines.md";

fn parse_source_url(source: &str) -> Result<Url, Box<dyn Error>> {
    let url = Url::parse(source)?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(format!("unsupported URL scheme '{other}' (URL: {url})").into()),
    }
}

/// Downloads the source document and saves it to `path`.
pub fn fetch_and_save(source: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    let url = parse_source_url(source)?;
    log::info!("downloading {url}");

    let resp = reqwest::blocking::get(url.clone())?;

    if !resp.status().is_success() {
        return Err(format!("Request failed: {} (URL: {})", resp.status(), url).into());
    }

    let body = resp.bytes()?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, &body)?;
    log::info!("saved {} bytes to {}", body.len(), path.display());

    Ok(())
}

/// Read the cached copy at `path`, downloading it first if it is missing.
pub fn load_or_fetch(path: &Path, source: &str) -> Result<Vec<u8>, Box<dyn Error>> {
    if path.exists() {
        log::debug!("using cached {}", path.display());
    } else {
        fetch_and_save(source, path)?;
    }
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_url_is_accepted() {
        let url = parse_source_url(DEFAULT_SOURCE_URL).unwrap();
        assert_eq!(url.host_str(), Some("raw.githubusercontent.com"));
    }

    #[test]
    fn non_http_schemes_are_rejected() {
        let err = parse_source_url("file:///etc/passwd").unwrap_err();
        assert!(err.to_string().contains("unsupported URL scheme"), "{err}");
        assert!(parse_source_url("not a url").is_err());
    }

    #[test]
    fn cached_copy_is_used_without_fetching() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.md");
        fs::write(&path, "# cached\n").unwrap();

        // an unusable URL proves no request is made.
        let bytes = load_or_fetch(&path, "not a url").unwrap();
        assert_eq!(bytes, b"# cached\n");
    }
}
