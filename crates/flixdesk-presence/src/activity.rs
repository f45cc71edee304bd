//! Maps the current page to a two-line status

use url::Url;

/// The two text lines of a presence update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub details: String,
    pub state: String,
}

impl Activity {
    pub fn new(details: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            details: details.into(),
            state: state.into(),
        }
    }

    /// Shown once the content view is up, before the first navigation completes
    pub fn startup() -> Self {
        Self::new("Browsing Netflix", "Just started watching")
    }

    /// Status for a page path. Rules are checked in order.
    pub fn from_path(path: &str) -> Self {
        let path = path.to_lowercase();

        if path.contains("/watch/") {
            let title = path
                .split('/')
                .nth(2)
                .filter(|segment| !segment.is_empty())
                .map(title_from_slug)
                .unwrap_or_else(|| "Something".to_string());
            Self::new(format!("Watching {}", title), "Enjoying content")
        } else if path.contains("/browse") {
            Self::new("Browsing content", "Looking for something to watch")
        } else if path.contains("/latest") {
            Self::new("Checking latest", "Finding new releases")
        } else if path.contains("/my-list") {
            Self::new("Managing My List", "Organizing shows to watch")
        } else {
            Self::new("Browsing Netflix", "Exploring content")
        }
    }

    /// Status for a full URL
    pub fn from_url(url: &str) -> Self {
        match Url::parse(url) {
            Ok(url) => Self::from_path(url.path()),
            Err(_) => Self::new("Using Netflix", "Watching content"),
        }
    }
}

/// `stranger-things` -> `Stranger Things`
fn title_from_slug(slug: &str) -> String {
    slug.replace(['-', '_'], " ")
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
