//! Asset URL formatting.

/// Path served when a record has no asset.
pub const PLACEHOLDER_PATH: &str = "/placeholder.svg";

/// Image transform presets understood by the asset endpoint.
pub mod transform {
    /// Card thumbnails
    pub const THUMB: &str = "fit=cover&width=400&height=300&format=webp";
    /// Detail page covers
    pub const COVER: &str = "fit=cover&width=1200&height=800&format=webp";
    /// Carousel slides
    pub const SLIDE: &str = "fit=cover&width=1600&height=1000&format=webp";
    /// Single photo view
    pub const LARGE: &str = "fit=inside&width=1200&height=900&format=webp";
    /// Staff portraits
    pub const AVATAR: &str = "fit=cover&width=160&height=160&format=webp";
}

/// Builds public asset URLs from asset identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUrls {
    base: String,
}

impl AssetUrls {
    /// `base` is the public URL of the content store; a trailing slash is ignored.
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into();
        Self { base: base.trim_end_matches('/').to_string() }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// URL of asset `id` with an optional transform query (with or without leading `?`).
    pub fn url(&self, id: Option<&str>, transform: &str) -> String {
        let Some(id) = id.map(str::trim).filter(|id| !id.is_empty()) else {
            return PLACEHOLDER_PATH.to_string();
        };
        let query = match transform {
            "" => String::new(),
            q if q.starts_with('?') => q.to_string(),
            q => format!("?{q}"),
        };
        format!("{}/assets/{}{}", self.base, id, query)
    }
}
