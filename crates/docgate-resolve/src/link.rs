//! Link references and checking policy.

use serde::{Deserialize, Serialize};

/// Kind of a declared link target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// Link to a content document by id.
    InternalDoc,
    /// Link to a heading inside a content document (`doc#fragment`).
    InternalAnchor,
    /// Link to an external URL. Never validated; reachability is out of scope.
    ExternalUrl,
}

/// An identifier or URL found in the navigation tree or declared link sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkReference {
    /// Normalized target: a document id (optionally with `#fragment`) for
    /// internal links, the full URL for external ones.
    pub target: String,
    /// Target classification.
    pub kind: LinkKind,
}

impl LinkReference {
    /// Reference to a content document by id.
    #[must_use]
    pub fn internal_doc(id: &str) -> Self {
        Self {
            target: id.to_owned(),
            kind: LinkKind::InternalDoc,
        }
    }

    /// Classify a raw link target.
    ///
    /// Targets with a URL scheme are external. Everything else is internal:
    /// leading and trailing slashes are stripped and the presence of a
    /// `#fragment` selects the anchor kind. A bare `/` maps to the root
    /// document id (the empty string).
    #[must_use]
    pub fn classify(target: &str) -> Self {
        if has_scheme(target) {
            return Self {
                target: target.to_owned(),
                kind: LinkKind::ExternalUrl,
            };
        }

        let trimmed = target.trim_start_matches('/').trim_end_matches('/');
        let kind = if trimmed.contains('#') {
            LinkKind::InternalAnchor
        } else {
            LinkKind::InternalDoc
        };
        Self {
            target: trimmed.to_owned(),
            kind,
        }
    }

    /// Document-id part of the target (everything before `#`).
    ///
    /// For external URLs this returns the full target; callers never consult
    /// it for that kind.
    #[must_use]
    pub fn doc_id(&self) -> &str {
        self.target.split('#').next().unwrap_or(&self.target)
    }

    /// Fragment part of the target, if any.
    #[must_use]
    pub fn fragment(&self) -> Option<&str> {
        self.target.split_once('#').map(|(_, fragment)| fragment)
    }
}

/// True if the target carries a URL scheme (`https://...`, `mailto:...`).
fn has_scheme(target: &str) -> bool {
    let Some((scheme, _)) = target.split_once(':') else {
        return false;
    };
    scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '-' || c == '.')
}

/// A link reference together with where it was declared.
///
/// The origin is a human-readable location such as `navbar > GitHub` or
/// `footer > Docs > Getting Started`, used verbatim in reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourcedLink {
    /// Where the link was declared.
    pub origin: String,
    /// The link itself.
    pub reference: LinkReference,
}

impl SourcedLink {
    /// Create a sourced link.
    #[must_use]
    pub fn new(origin: impl Into<String>, reference: LinkReference) -> Self {
        Self {
            origin: origin.into(),
            reference,
        }
    }
}

/// Policy applied to unresolved references, declared once in site
/// configuration and applied uniformly for the whole build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Unresolved references are silent.
    Ignore,
    /// Unresolved references are logged; the build proceeds.
    Warn,
    /// Unresolved references are fatal to the build.
    #[default]
    Throw,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_classify_external_https() {
        let link = LinkReference::classify("https://github.com/SignedShot");

        assert_eq!(link.kind, LinkKind::ExternalUrl);
        assert_eq!(link.target, "https://github.com/SignedShot");
    }

    #[test]
    fn test_classify_external_mailto() {
        let link = LinkReference::classify("mailto:hello@example.com");

        assert_eq!(link.kind, LinkKind::ExternalUrl);
    }

    #[test]
    fn test_classify_internal_doc_strips_slashes() {
        let link = LinkReference::classify("/concepts/two-layer-trust/");

        assert_eq!(link.kind, LinkKind::InternalDoc);
        assert_eq!(link.target, "concepts/two-layer-trust");
    }

    #[test]
    fn test_classify_root_is_empty_doc_id() {
        let link = LinkReference::classify("/");

        assert_eq!(link.kind, LinkKind::InternalDoc);
        assert_eq!(link.target, "");
    }

    #[test]
    fn test_classify_anchor() {
        let link = LinkReference::classify("/guide#setup");

        assert_eq!(link.kind, LinkKind::InternalAnchor);
        assert_eq!(link.doc_id(), "guide");
        assert_eq!(link.fragment(), Some("setup"));
    }

    #[test]
    fn test_doc_id_without_fragment() {
        let link = LinkReference::classify("guide");

        assert_eq!(link.doc_id(), "guide");
        assert_eq!(link.fragment(), None);
    }

    #[test]
    fn test_policy_default_is_throw() {
        assert_eq!(LinkPolicy::default(), LinkPolicy::Throw);
    }

    #[test]
    fn test_policy_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Wrapper {
            policy: LinkPolicy,
        }

        let wrapper: Wrapper = serde_json::from_str(r#"{"policy":"warn"}"#).unwrap();
        assert_eq!(wrapper.policy, LinkPolicy::Warn);

        let wrapper: Wrapper = serde_json::from_str(r#"{"policy":"ignore"}"#).unwrap();
        assert_eq!(wrapper.policy, LinkPolicy::Ignore);
    }
}
