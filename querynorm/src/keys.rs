/// Option names the normalizer coerces into a fixed shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalKey {
    Fields,
    Sort,
    Limit,
    Skip,
}

impl CanonicalKey {
    pub const ALL: [CanonicalKey; 4] = [Self::Fields, Self::Sort, Self::Limit, Self::Skip];

    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Fields => "fields",
            Self::Sort => "sort",
            Self::Limit => "limit",
            Self::Skip => "skip",
        }
    }

    /// Resolve a canonical name (not an alias).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fields" => Some(Self::Fields),
            "sort" => Some(Self::Sort),
            "limit" => Some(Self::Limit),
            "skip" => Some(Self::Skip),
            _ => None,
        }
    }

    /// The deprecated alternate name redirected to this key, if any.
    pub const fn alias(self) -> Option<&'static str> {
        match self {
            Self::Fields => Some("select"),
            Self::Sort => Some("order"),
            Self::Skip => Some("offset"),
            Self::Limit => None,
        }
    }

    /// Resolve a deprecated alternate name to the key it stands for.
    pub fn from_alias(name: &str) -> Option<Self> {
        match name {
            "select" => Some(Self::Fields),
            "order" => Some(Self::Sort),
            "offset" => Some(Self::Skip),
            _ => None,
        }
    }
}

/// Result of resolving an incoming option name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolvedKey<'a> {
    Canonical(CanonicalKey),
    /// An alias, redirected to its canonical key.
    Alias { alias: &'a str, target: CanonicalKey },
    PassThrough(&'a str),
}

impl<'a> ResolvedKey<'a> {
    pub fn resolve(name: &'a str) -> Self {
        if let Some(key) = CanonicalKey::from_name(name) {
            Self::Canonical(key)
        } else if let Some(target) = CanonicalKey::from_alias(name) {
            Self::Alias { alias: name, target }
        } else {
            Self::PassThrough(name)
        }
    }

    /// Name under which the entry is physically stored.
    pub fn storage_name(&self) -> &'a str {
        match *self {
            Self::Canonical(key) | Self::Alias { target: key, .. } => key.as_str(),
            Self::PassThrough(name) => name,
        }
    }

    pub fn canonical(&self) -> Option<CanonicalKey> {
        match *self {
            Self::Canonical(key) | Self::Alias { target: key, .. } => Some(key),
            Self::PassThrough(_) => None,
        }
    }
}
