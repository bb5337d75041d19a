use std::fmt;

/// Resource type name of font resources.
pub const FONT_RESOURCE_TYPE: &str = "font";

/// A `@type/name` resource reference.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct ResourceRef {
    pub kind: String,
    pub name: String,
}

impl ResourceRef {
    pub fn new(kind: impl Into<String>, name: impl Into<String>) -> Self {
        Self { kind: kind.into(), name: name.into() }
    }

    pub fn font(name: impl Into<String>) -> Self {
        Self::new(FONT_RESOURCE_TYPE, name)
    }

    /// Parses `@type/name`, optionally package-qualified (`@pkg:type/name`).
    pub fn parse(s: &str) -> Option<Self> {
        let rest = s.trim().strip_prefix('@')?;
        let rest = rest.split_once(':').map_or(rest, |(_, r)| r);
        let (kind, name) = rest.split_once('/')?;
        let valid = |part: &str| {
            !part.is_empty() && part.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
        };
        (valid(kind) && valid(name)).then(|| Self::new(kind, name))
    }

    pub fn is_font(&self) -> bool {
        self.kind == FONT_RESOURCE_TYPE
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}/{}", self.kind, self.name)
    }
}
