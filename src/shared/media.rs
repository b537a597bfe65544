/// Turns stored media paths into absolute URLs under `MEDIA_BASE_URL`
#[derive(Debug, Clone)]
pub struct MediaUrls {
    base: String,
}

impl MediaUrls {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for a stored path. Paths that are already absolute URLs
    /// are returned unchanged; blank paths yield `None`.
    pub fn resolve(&self, path: Option<&str>) -> Option<String> {
        let path = path.map(str::trim).filter(|p| !p.is_empty())?;

        if path.starts_with("http://") || path.starts_with("https://") {
            return Some(path.to_string());
        }

        Some(format!("{}/{}", self.base, path.trim_start_matches('/')))
    }
}
