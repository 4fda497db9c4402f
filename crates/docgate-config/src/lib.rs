//! Configuration management for docgate.
//!
//! Parses `docgate.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! The configuration is constructed once at build start and never mutated
//! afterwards; it is passed by reference to the navigation builder, the
//! resolver, and the build gate.
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.url`
//! - `site.base_url`

mod expand;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use docgate_nav::NavEntrySpec;
use docgate_resolve::{LinkPolicy, LinkReference, SourcedLink};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory.
    pub source_dir: Option<PathBuf>,
    /// Override broken-link policy.
    pub on_broken_links: Option<LinkPolicy>,
    /// Override broken-anchor policy.
    pub on_broken_anchors: Option<LinkPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docgate.toml";

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity and routing.
    pub site: SiteConfig,
    /// Locale configuration.
    pub i18n: I18nConfig,
    /// Link-checking policies.
    pub links: LinkCheckConfig,
    /// Docs configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Theme options (flat key/value, passed through to the rendering layer).
    pub theme: ThemeConfig,
    /// Navbar link set.
    pub navbar: NavbarConfig,
    /// Footer link groups.
    pub footer: FooterConfig,
    /// Declared sidebar navigation.
    pub nav: NavConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity and routing.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Optional tagline.
    pub tagline: Option<String>,
    /// Canonical site URL.
    pub url: String,
    /// Base URL path the docs are served under. Must start and end with `/`.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Documentation".to_owned(),
            tagline: None,
            url: String::new(),
            base_url: "/".to_owned(),
        }
    }
}

/// Locale configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Default locale.
    pub default_locale: String,
    /// All supported locales.
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
        }
    }
}

/// Link-checking policies.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LinkCheckConfig {
    /// Policy for broken internal document references.
    pub on_broken_links: LinkPolicy,
    /// Policy for unresolved anchors on otherwise-resolved references.
    pub on_broken_anchors: LinkPolicy,
}

impl Default for LinkCheckConfig {
    fn default() -> Self {
        Self {
            on_broken_links: LinkPolicy::Throw,
            on_broken_anchors: LinkPolicy::Warn,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// Theme options.
///
/// Flat key/value data consumed by the rendering layer; docgate only
/// validates the shape.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Default color mode.
    pub default_mode: ColorMode,
    /// Whether the mode switch is hidden.
    pub disable_switch: bool,
    /// Whether the OS color-scheme preference is honored.
    pub respect_prefers_color_scheme: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            default_mode: ColorMode::Light,
            disable_switch: false,
            respect_prefers_color_scheme: true,
        }
    }
}

/// Color mode for the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Light mode.
    Light,
    /// Dark mode.
    Dark,
}

/// Navbar link set.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Links in declared order.
    pub links: Vec<DeclaredLink>,
}

/// Footer link groups.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Titled link groups in declared order.
    pub groups: Vec<FooterGroup>,
    /// Copyright line.
    pub copyright: Option<String>,
}

/// A titled group of footer links.
#[derive(Debug, Deserialize)]
pub struct FooterGroup {
    /// Group title.
    pub title: String,
    /// Links in declared order.
    #[serde(default)]
    pub links: Vec<DeclaredLink>,
}

/// A declared navbar or footer link.
///
/// Exactly one of `to` (internal route) or `href` (external URL) must be set.
#[derive(Debug, Deserialize)]
pub struct DeclaredLink {
    /// Display label.
    pub label: String,
    /// Internal route, relative to the site base URL.
    #[serde(default)]
    pub to: Option<String>,
    /// External URL.
    #[serde(default)]
    pub href: Option<String>,
}

impl DeclaredLink {
    /// Validate that exactly one target form is set.
    fn validate(&self, context: &str) -> Result<(), ConfigError> {
        require_non_empty(&self.label, &format!("{context}.label"))?;
        match (&self.to, &self.href) {
            (Some(_), Some(_)) => Err(ConfigError::Validation(format!(
                "{context} ('{}') sets both 'to' and 'href'",
                self.label
            ))),
            (None, None) => Err(ConfigError::Validation(format!(
                "{context} ('{}') sets neither 'to' nor 'href'",
                self.label
            ))),
            _ => Ok(()),
        }
    }
}

/// Declared sidebar navigation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavConfig {
    /// Sidebar entries in rendering order.
    pub sidebar: Vec<NavEntrySpec>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docgate.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(policy) = settings.on_broken_links {
            self.links.on_broken_links = policy;
        }
        if let Some(policy) = settings.on_broken_anchors {
            self.links.on_broken_anchors = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            i18n: I18nConfig::default(),
            links: LinkCheckConfig::default(),
            docs: DocsConfigRaw::default(),
            theme: ThemeConfig::default(),
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            nav: NavConfig::default(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()?;
        self.validate_i18n()?;
        self.validate_links()?;
        Ok(())
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;

        if !self.site.url.is_empty() {
            require_http_url(&self.site.url, "site.url")?;
        }

        if !self.site.base_url.starts_with('/') || !self.site.base_url.ends_with('/') {
            return Err(ConfigError::Validation(
                "site.base_url must start and end with '/'".to_owned(),
            ));
        }

        Ok(())
    }

    /// Validate locale configuration.
    fn validate_i18n(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.i18n.default_locale, "i18n.default_locale")?;

        if self.i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales cannot be empty".to_owned(),
            ));
        }
        if !self.i18n.locales.contains(&self.i18n.default_locale) {
            return Err(ConfigError::Validation(format!(
                "i18n.default_locale '{}' is not in i18n.locales",
                self.i18n.default_locale
            )));
        }

        Ok(())
    }

    /// Validate navbar and footer link declarations.
    fn validate_links(&self) -> Result<(), ConfigError> {
        for link in &self.navbar.links {
            link.validate("navbar link")?;
        }
        for group in &self.footer.groups {
            require_non_empty(&group.title, "footer group title")?;
            for link in &group.links {
                link.validate(&format!("footer link in '{}'", group.title))?;
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.url = expand::expand_env(&self.site.url, "site.url")?;
        self.site.base_url = expand::expand_env(&self.site.base_url, "site.base_url")?;
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }

    /// Declared navigation spec for the sidebar.
    #[must_use]
    pub fn sidebar_spec(&self) -> &[NavEntrySpec] {
        &self.nav.sidebar
    }

    /// Navbar and footer links as sourced references, in declared order.
    ///
    /// Navbar links come first, then footer links group by group, so report
    /// ordering is stable across runs.
    #[must_use]
    pub fn declared_links(&self) -> Vec<SourcedLink> {
        let mut links = Vec::new();
        for link in &self.navbar.links {
            links.push(SourcedLink::new(
                format!("navbar > {}", link.label),
                self.link_reference(link),
            ));
        }
        for group in &self.footer.groups {
            for link in &group.links {
                links.push(SourcedLink::new(
                    format!("footer > {} > {}", group.title, link.label),
                    self.link_reference(link),
                ));
            }
        }
        links
    }

    /// Classify a declared link, resolving internal routes against the base
    /// URL.
    fn link_reference(&self, link: &DeclaredLink) -> LinkReference {
        if let Some(href) = &link.href {
            return LinkReference::classify(href);
        }
        let to = link.to.as_deref().unwrap_or_default();
        // Routes may be declared under the base URL; strip it before
        // classification so targets become document ids.
        let route = to
            .strip_prefix(self.site.base_url.as_str())
            .map_or_else(|| to.to_owned(), |rest| format!("/{rest}"));
        LinkReference::classify(&route)
    }
}

#[cfg(test)]
mod tests {
    use docgate_resolve::LinkKind;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.site.base_url, "/");
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.links.on_broken_links, LinkPolicy::Throw);
        assert_eq!(config.links.on_broken_anchors, LinkPolicy::Warn);
        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/test/docs")
        );
        assert!(config.nav.sidebar.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "Documentation");
        assert_eq!(config.links.on_broken_links, LinkPolicy::Throw);
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[site]
title = "SignedShot Documentation"
tagline = "Secure screenshot sharing made simple"
url = "https://signedshot.io"
base_url = "/docs/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.site.title, "SignedShot Documentation");
        assert_eq!(
            config.site.tagline.as_deref(),
            Some("Secure screenshot sharing made simple")
        );
        assert_eq!(config.site.url, "https://signedshot.io");
        assert_eq!(config.site.base_url, "/docs/");
    }

    #[test]
    fn test_parse_link_policies() {
        let toml = r#"
[links]
on_broken_links = "warn"
on_broken_anchors = "ignore"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.links.on_broken_links, LinkPolicy::Warn);
        assert_eq!(config.links.on_broken_anchors, LinkPolicy::Ignore);
    }

    #[test]
    fn test_parse_theme_config() {
        let toml = r#"
[theme]
default_mode = "dark"
disable_switch = true
respect_prefers_color_scheme = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.default_mode, ColorMode::Dark);
        assert!(config.theme.disable_switch);
        assert!(!config.theme.respect_prefers_color_scheme);
    }

    #[test]
    fn test_parse_sidebar_spec() {
        let toml = r#"
[nav]
sidebar = [
    "intro",
    { type = "category", label = "Guides", items = ["guides/quick-start"] },
]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.nav.sidebar.len(), 2);
        assert_eq!(config.nav.sidebar[0], "intro".into());
    }

    #[test]
    fn test_parse_navbar_and_footer() {
        let toml = r#"
[[navbar.links]]
label = "GitHub"
href = "https://github.com/SignedShot"

[[footer.groups]]
title = "Docs"

[[footer.groups.links]]
label = "Getting Started"
to = "/"

[[footer.groups.links]]
label = "Concepts"
to = "/concepts/two-layer-trust"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.navbar.links.len(), 1);
        assert_eq!(config.footer.groups.len(), 1);
        assert_eq!(config.footer.groups[0].links.len(), 2);
    }

    #[test]
    fn test_declared_links_order_and_origins() {
        let toml = r#"
[[navbar.links]]
label = "GitHub"
href = "https://github.com/SignedShot"

[[footer.groups]]
title = "Docs"

[[footer.groups.links]]
label = "Getting Started"
to = "/"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let links = config.declared_links();

        assert_eq!(links.len(), 2);
        assert_eq!(links[0].origin, "navbar > GitHub");
        assert_eq!(links[0].reference.kind, LinkKind::ExternalUrl);
        assert_eq!(links[1].origin, "footer > Docs > Getting Started");
        assert_eq!(links[1].reference.kind, LinkKind::InternalDoc);
        assert_eq!(links[1].reference.target, "");
    }

    #[test]
    fn test_declared_links_strip_base_url() {
        let toml = r#"
[site]
base_url = "/docs/"

[[footer.groups]]
title = "Docs"

[[footer.groups.links]]
label = "Concepts"
to = "/docs/concepts/two-layer-trust"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let links = config.declared_links();

        assert_eq!(links[0].reference.target, "concepts/two-layer-trust");
        assert_eq!(links[0].reference.kind, LinkKind::InternalDoc);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
source_dir = "documentation"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/project/documentation")
        );
    }

    #[test]
    fn test_apply_cli_settings_source_dir() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/docs")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.docs_resolved.source_dir,
            PathBuf::from("/custom/docs")
        );
    }

    #[test]
    fn test_apply_cli_settings_policies() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            on_broken_links: Some(LinkPolicy::Warn),
            on_broken_anchors: Some(LinkPolicy::Ignore),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.links.on_broken_links, LinkPolicy::Warn);
        assert_eq!(config.links.on_broken_anchors, LinkPolicy::Ignore);
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let before = Config::default_with_base(Path::new("/test"));
        let mut config = Config::default_with_base(Path::new("/test"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.docs_resolved.source_dir,
            before.docs_resolved.source_dir
        );
        assert_eq!(config.links.on_broken_links, before.links.on_broken_links);
    }

    #[test]
    fn test_expand_env_vars_base_url() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("DOCGATE_BASE_URL_TEST");
        }

        let toml = r#"
[site]
base_url = "${DOCGATE_BASE_URL_TEST:-/docs/}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();

        assert_eq!(config.site.base_url, "/docs/");
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_site_title_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = String::new();
        assert_validation_error(&config, &["site.title", "empty"]);
    }

    #[test]
    fn test_validate_site_url_invalid_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.url = "ftp://signedshot.io".to_owned();
        assert_validation_error(&config, &["site.url", "http"]);
    }

    #[test]
    fn test_validate_base_url_missing_slashes() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.base_url = "docs".to_owned();
        assert_validation_error(&config, &["site.base_url"]);
    }

    #[test]
    fn test_validate_default_locale_not_listed() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.i18n.default_locale = "de".to_owned();
        assert_validation_error(&config, &["default_locale", "de"]);
    }

    #[test]
    fn test_validate_link_with_both_targets() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.navbar.links.push(DeclaredLink {
            label: "Broken".to_owned(),
            to: Some("/".to_owned()),
            href: Some("https://example.com".to_owned()),
        });
        assert_validation_error(&config, &["navbar link", "both"]);
    }

    #[test]
    fn test_validate_link_with_no_target() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.footer.groups.push(FooterGroup {
            title: "More".to_owned(),
            links: vec![DeclaredLink {
                label: "Nowhere".to_owned(),
                to: None,
                href: None,
            }],
        });
        assert_validation_error(&config, &["footer link", "neither"]);
    }

    #[test]
    fn test_load_missing_explicit_path_errors() {
        let err = Config::load(Some(Path::new("/nonexistent/docgate.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }
}
