//! Image URL rewriting for records returned by the backend.
//!
//! Uploaded images are stored by the backend either as paths relative to its
//! own origin (`/uploads/rust.png`) or as absolute URLs minted for whatever
//! host it ran on at upload time. Both are pointed at the configured asset
//! origin before a record reaches the views.

use store::{About, AdminConfig, Project, Skill};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ImageRewriter {
    origin: String,
    legacy_origins: Vec<String>,
}

impl ImageRewriter {
    pub fn new(origin: impl Into<String>, legacy_origins: Vec<String>) -> Self {
        Self {
            origin: origin.into().trim_end_matches('/').to_string(),
            legacy_origins: legacy_origins
                .into_iter()
                .map(|o| o.trim_end_matches('/').to_string())
                .filter(|o| !o.is_empty())
                .collect(),
        }
    }

    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(config.asset_origin(), config.assets.legacy_origins.clone())
    }

    /// Rewrite a single URL. Blank URLs become `None`.
    pub fn rewrite(&self, url: Option<String>) -> Option<String> {
        let url = url?.trim().to_string();
        if url.is_empty() {
            return None;
        }
        if url.starts_with("data:") || url.starts_with("blob:") {
            return Some(url);
        }
        if let Some(rest) = self
            .legacy_origins
            .iter()
            .find_map(|legacy| strip_origin(&url, legacy))
        {
            return Some(format!("{}{rest}", self.origin));
        }
        if url.contains("://") || url.starts_with("//") {
            return Some(url);
        }
        let path = url.trim_start_matches("./");
        if path.starts_with('/') {
            Some(format!("{}{path}", self.origin))
        } else {
            Some(format!("{}/{path}", self.origin))
        }
    }
}

/// The part of `url` after `origin`, when `url` is on exactly that origin.
fn strip_origin<'a>(url: &'a str, origin: &str) -> Option<&'a str> {
    let rest = url.strip_prefix(origin)?;
    (rest.is_empty() || rest.starts_with(['/', '?', '#'])).then_some(rest)
}

/// Records that carry image URLs.
pub trait RewriteImages {
    fn rewrite_images(self, rewriter: &ImageRewriter) -> Self;
}

impl RewriteImages for Skill {
    fn rewrite_images(mut self, rewriter: &ImageRewriter) -> Self {
        self.icon_url = rewriter.rewrite(self.icon_url);
        self
    }
}

impl RewriteImages for Project {
    fn rewrite_images(mut self, rewriter: &ImageRewriter) -> Self {
        self.image_url = rewriter.rewrite(self.image_url);
        self
    }
}

impl RewriteImages for About {
    fn rewrite_images(mut self, rewriter: &ImageRewriter) -> Self {
        self.profile_image_url = rewriter.rewrite(self.profile_image_url);
        self
    }
}

impl<T: RewriteImages> RewriteImages for Vec<T> {
    fn rewrite_images(self, rewriter: &ImageRewriter) -> Self {
        self.into_iter()
            .map(|item| item.rewrite_images(rewriter))
            .collect()
    }
}

impl<T: RewriteImages> RewriteImages for Option<T> {
    fn rewrite_images(self, rewriter: &ImageRewriter) -> Self {
        self.map(|item| item.rewrite_images(rewriter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn rewriter() -> ImageRewriter {
        ImageRewriter::new(
            "https://api.example.com/",
            vec!["http://localhost:5000".to_string()],
        )
    }

    #[rstest]
    #[case::absolute_path("/uploads/a.png", "https://api.example.com/uploads/a.png")]
    #[case::relative_path("uploads/a.png", "https://api.example.com/uploads/a.png")]
    #[case::dot_relative("./uploads/a.png", "https://api.example.com/uploads/a.png")]
    #[case::legacy_origin(
        "http://localhost:5000/uploads/a.png",
        "https://api.example.com/uploads/a.png"
    )]
    #[case::longer_port(
        "http://localhost:50001/uploads/a.png",
        "http://localhost:50001/uploads/a.png"
    )]
    #[case::legacy_subdomain(
        "http://localhost:5000.evil.net/a.png",
        "http://localhost:5000.evil.net/a.png"
    )]
    #[case::foreign_host("https://cdn.other.net/a.png", "https://cdn.other.net/a.png")]
    #[case::data_url("data:image/png;base64,AAAA", "data:image/png;base64,AAAA")]
    fn rewrites(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(
            rewriter().rewrite(Some(input.to_string())).as_deref(),
            Some(expected)
        );
    }

    #[test]
    fn blank_becomes_none() {
        assert!(rewriter().rewrite(Some("  ".to_string())).is_none());
        assert!(rewriter().rewrite(None).is_none());
    }

    #[test]
    fn records_are_rewritten() {
        let skill = Skill {
            id: "s1".into(),
            name: "Rust".into(),
            level: "Expert".into(),
            category: None,
            icon_url: Some("/icons/rust.svg".into()),
        };
        let skills = vec![skill].rewrite_images(&rewriter());
        assert_eq!(
            skills[0].icon_url.as_deref(),
            Some("https://api.example.com/icons/rust.svg")
        );
    }
}
