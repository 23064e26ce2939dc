use super::config::FetchConfig;
use super::error::{Error, Result};
use super::types::RawHeaders;
use std::fs::File;
use std::path::Path;
use url::Url;

/// Supplies the raw response headers for a source (URL or file path).
///
/// Implementations report every failure as [`Error::Fetch`] carrying the
/// source identifier.
pub trait HeaderFetcher {
    fn fetch(&self, source: &str) -> Result<RawHeaders>;
}

impl<F> HeaderFetcher for F
where
    F: Fn(&str) -> Result<RawHeaders>,
{
    fn fetch(&self, source: &str) -> Result<RawHeaders> {
        self(source)
    }
}

/// Default fetcher: blocking HTTP(S) GET for web URLs, plain reads for
/// local files.
///
/// A local file has no response headers, so a readable file yields an empty
/// header set. Uses `reqwest::blocking`; do not call from inside an async
/// runtime.
#[derive(Debug, Clone, Default)]
pub struct SourceFetcher {
    config: FetchConfig,
}

impl SourceFetcher {
    pub fn new(config: FetchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn fetch_http(&self, source: &str, url: Url) -> Result<RawHeaders> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.config.timeout())
            .user_agent(self.config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(self.config.max_redirects))
            .build()
            .map_err(|e| Error::fetch(source, e))?;

        let response = client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| Error::fetch(source, e))?;

        let mut headers = RawHeaders::new();
        for (name, value) in response.headers() {
            headers.append(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            );
        }

        log::debug!(
            "fetched {} headers from {} ({})",
            headers.len(),
            source,
            response.status()
        );
        Ok(headers)
    }

    fn fetch_file(&self, source: &str, path: &Path) -> Result<RawHeaders> {
        let file = File::open(path).map_err(|e| Error::fetch(source, e))?;
        let metadata = file.metadata().map_err(|e| Error::fetch(source, e))?;
        if metadata.is_dir() {
            return Err(Error::fetch(source, "source is a directory"));
        }

        log::debug!("{} is a local file, no response headers", source);
        Ok(RawHeaders::new())
    }
}

impl HeaderFetcher for SourceFetcher {
    fn fetch(&self, source: &str) -> Result<RawHeaders> {
        match Url::parse(source) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => self.fetch_http(source, url),
            Ok(url) if url.scheme() == "file" => {
                let path = url
                    .to_file_path()
                    .map_err(|()| Error::fetch(source, "not a local file URL"))?;
                self.fetch_file(source, &path)
            }
            // Anything else is read as a path (this also covers Windows drive
            // letters, which parse as one-letter schemes).
            _ => self.fetch_file(source, Path::new(source)),
        }
    }
}
