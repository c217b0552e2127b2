//! Startup configuration resolved from the environment

/// Widget configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Display name of the document questions are about
    pub document_name: String,
    /// Origin of the answering service, e.g. `http://localhost:8000`
    pub backend: Option<String>,
    /// Port for the widget-facing HTTP surface
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables. Blank values count as
    /// unset, matching how the widget was historically configured.
    pub fn from_env() -> Self {
        Self {
            document_name: std::env::var("DOCUMENT_NAME")
                .ok()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| "the document".to_string()),
            backend: std::env::var("BACKEND")
                .ok()
                .filter(|origin| !origin.trim().is_empty()),
            port: std::env::var("ASKDOC_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
        }
    }
}
