//! Navigation guard for the content view
//!
//! Keeps the embedded surface on the target site: every navigation is
//! checked against a fixed allow-list, disallowed ones are replaced by a
//! navigation to the home page, and popups are folded back into the same
//! view.

use flixdesk_core::{ShellConfig, ShellResult};
use url::Url;

/// Documents the engine loads on its own before the first real navigation
const BOOTSTRAP_URLS: &[&str] = &["about:blank"];

/// Fixed set of allowed hosts
#[derive(Debug, Clone)]
pub struct AllowedDomains {
    domains: Vec<String>,
}

impl AllowedDomains {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            domains: domains
                .into_iter()
                .map(|d| d.as_ref().trim().trim_end_matches('.').to_ascii_lowercase())
                .filter(|d| !d.is_empty())
                .collect(),
        }
    }

    /// True when `host` equals an entry or is a subdomain of one
    pub fn is_allowed(&self, host: &str) -> bool {
        let host = host.trim_end_matches('.').to_ascii_lowercase();
        self.domains.iter().any(|domain| {
            host == *domain
                || (host.len() > domain.len()
                    && host.ends_with(domain.as_str())
                    && host.as_bytes()[host.len() - domain.len() - 1] == b'.')
        })
    }

    pub fn len(&self) -> usize {
        self.domains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.domains.is_empty()
    }
}

/// Outcome of a navigation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationDecision {
    /// Let the navigation proceed unmodified
    Allow,
    /// Cancel it and navigate here instead
    Redirect(Url),
}

/// Outcome of a new-window request. The request itself is always handled;
/// a second window is never opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NewWindowDecision {
    /// Load the requested URL in the existing view
    LoadInPlace(String),
    /// Nothing to load
    Ignore,
}

pub struct NavigationGuard {
    allowed: AllowedDomains,
    home: Url,
}

impl NavigationGuard {
    pub fn new(allowed: AllowedDomains, home: Url) -> Self {
        Self { allowed, home }
    }

    pub fn from_config(config: &ShellConfig) -> ShellResult<Self> {
        let home = Url::parse(&config.home_url)?;
        Ok(Self::new(AllowedDomains::new(&config.allowed_domains), home))
    }

    pub fn home(&self) -> &Url {
        &self.home
    }

    pub fn allowed(&self) -> &AllowedDomains {
        &self.allowed
    }

    /// Check a navigation-starting event
    pub fn check_navigation(&self, target: &str) -> NavigationDecision {
        if BOOTSTRAP_URLS.contains(&target) {
            return NavigationDecision::Allow;
        }

        let allowed = match Url::parse(target) {
            Ok(url) => url.host_str().is_some_and(|host| self.allowed.is_allowed(host)),
            Err(e) => {
                log::debug!("Unparsable navigation target {:?}: {}", target, e);
                false
            }
        };

        if allowed {
            NavigationDecision::Allow
        } else {
            log::info!("Blocked navigation to {}, returning home", target);
            NavigationDecision::Redirect(self.home.clone())
        }
    }

    /// Check a new-window request. The loaded URL still goes through
    /// `check_navigation` when the view starts navigating to it.
    pub fn check_new_window(&self, target: &str) -> NewWindowDecision {
        if target.trim().is_empty() {
            NewWindowDecision::Ignore
        } else {
            log::debug!("New window request loaded in place: {}", target);
            NewWindowDecision::LoadInPlace(target.to_string())
        }
    }
}
