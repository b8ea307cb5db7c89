//! Redirect rule entity and the ordered rule table.

/// How a matched request is redirected.
///
/// Only the numeric status code is carried on the wire; `301` maps to
/// [`RedirectKind::Permanent`] and every other value (including an absent one)
/// maps to [`RedirectKind::Temporary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RedirectKind {
    /// `301 Moved Permanently`
    Permanent,
    /// `302 Found`
    #[default]
    Temporary,
}

impl RedirectKind {
    /// Derives the redirect kind from an HTTP status code.
    pub fn from_status(status: i64) -> Self {
        if status == 301 {
            Self::Permanent
        } else {
            Self::Temporary
        }
    }

    /// Status code emitted for this kind of redirect.
    pub fn status_code(self) -> u16 {
        match self {
            Self::Permanent => 301,
            Self::Temporary => 302,
        }
    }

    pub fn is_permanent(self) -> bool {
        matches!(self, Self::Permanent)
    }
}

/// A single redirect rule.
///
/// `match_path` is compared case-insensitively against the request path.
/// When `use_relative` is set the rule works in prefix mode: `match_path` only
/// needs to be a prefix of the path and is swapped for `target_path`, keeping
/// the rest of the path. Otherwise the whole path must equal `match_path` and
/// the request is sent to `target_path` verbatim.
///
/// A rule with an empty `match_path` never matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectRule {
    pub match_path: String,
    pub target_path: String,
    pub kind: RedirectKind,
    pub use_relative: bool,
}

impl RedirectRule {
    /// Creates a new rule.
    pub fn new(
        match_path: impl Into<String>,
        target_path: impl Into<String>,
        kind: RedirectKind,
        use_relative: bool,
    ) -> Self {
        Self {
            match_path: match_path.into(),
            target_path: target_path.into(),
            kind,
            use_relative,
        }
    }

    /// Exact-match rule: the full path must equal `match_path`.
    pub fn exact(
        match_path: impl Into<String>,
        target_path: impl Into<String>,
        kind: RedirectKind,
    ) -> Self {
        Self::new(match_path, target_path, kind, false)
    }

    /// Prefix rule: `match_path` is replaced by `target_path`, the remainder is kept.
    pub fn relative(
        match_path: impl Into<String>,
        target_path: impl Into<String>,
        kind: RedirectKind,
    ) -> Self {
        Self::new(match_path, target_path, kind, true)
    }

    /// Returns true if the rule can take part in matching at all.
    pub fn is_eligible(&self) -> bool {
        !self.match_path.is_empty()
    }
}

/// Ordered, immutable collection of redirect rules.
///
/// Insertion order is significant: the first matching rule wins. A table is
/// never modified after construction; refreshing the cache builds a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<RedirectRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<RedirectRule>) -> Self {
        Self { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[RedirectRule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RedirectRule> {
        self.rules.iter()
    }
}

impl FromIterator<RedirectRule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = RedirectRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a RuleTable {
    type Item = &'a RedirectRule;
    type IntoIter = std::slice::Iter<'a, RedirectRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
