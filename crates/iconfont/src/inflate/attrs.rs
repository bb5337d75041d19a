use iconfont_engine::paint::{BlendMode, Color};

use crate::error::InflateError;
use crate::font::ResourceRef;
use crate::state::GradientKind;

/// An element an [`crate::GlyphDrawable`] can be inflated from.
///
/// Attribute names are local names: a source must report `app:code` under
/// `code`.
pub trait AttributeSource: Sized {
    fn tag(&self) -> &str;

    fn attribute(&self, name: &str) -> Option<&str>;

    /// Direct child elements, in document order.
    fn children(&self) -> Vec<Self>;
}

impl<'a, 'input> AttributeSource for roxmltree::Node<'a, 'input> {
    fn tag(&self) -> &str {
        self.tag_name().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes().find(|a| a.name() == name).map(|a| a.value())
    }

    fn children(&self) -> Vec<Self> {
        roxmltree::Node::children(self).filter(|n| n.is_element()).collect()
    }
}

/// Owned element tree, for building drawables without XML text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttributeMap {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<AttributeMap>,
}

impl AttributeMap {
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into(), ..Default::default() }
    }

    /// Adds or replaces an attribute.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attributes.push((name, value)),
        }
        self
    }

    pub fn with_child(mut self, child: AttributeMap) -> Self {
        self.children.push(child);
        self
    }
}

impl AttributeSource for AttributeMap {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.iter().find(|(n, _)| n == name).map(|(_, v)| v.as_str())
    }

    fn children(&self) -> Vec<Self> {
        self.children.clone()
    }
}

/// Typed view over the raw attribute strings of one element.
///
/// Every getter returns `Ok(None)` for an absent attribute and
/// [`InflateError::InvalidAttribute`] for a present but malformed one.
pub struct TypedAttributes<'s, S> {
    src: &'s S,
    density: f32,
}

impl<'s, S: AttributeSource> TypedAttributes<'s, S> {
    /// `density` converts `dp`/`sp` dimensions to pixels.
    pub fn new(src: &'s S, density: f32) -> Self {
        Self { src, density }
    }

    pub fn has(&self, name: &str) -> bool {
        self.src.attribute(name).is_some()
    }

    pub fn string(&self, name: &str) -> Option<&'s str> {
        self.src.attribute(name).map(str::trim)
    }

    fn parse<T>(&self, name: &str, f: impl FnOnce(&str) -> Option<T>) -> Result<Option<T>, InflateError> {
        match self.string(name) {
            None => Ok(None),
            Some(v) => f(v).map(Some).ok_or_else(|| InflateError::attribute(name, v)),
        }
    }

    pub fn color(&self, name: &str) -> Result<Option<Color>, InflateError> {
        self.parse(name, parse_color)
    }

    pub fn float(&self, name: &str) -> Result<Option<f32>, InflateError> {
        self.parse(name, |v| v.parse::<f32>().ok().filter(|f| f.is_finite()))
    }

    pub fn int(&self, name: &str) -> Result<Option<i32>, InflateError> {
        self.parse(name, parse_int)
    }

    pub fn boolean(&self, name: &str) -> Result<Option<bool>, InflateError> {
        self.parse(name, |v| match v {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        })
    }

    /// A dimension in pixels (`12`, `12px`, `12dp`, `12sp`).
    pub fn dimension(&self, name: &str) -> Result<Option<f32>, InflateError> {
        self.parse(name, |v| parse_dimension(v, self.density))
    }

    /// A dimension rounded to whole pixels.
    pub fn dimension_px(&self, name: &str) -> Result<Option<i32>, InflateError> {
        Ok(self.dimension(name)?.map(|px| px.round() as i32))
    }

    /// A plain float or a percentage (`"25%"` is `0.25`).
    pub fn float_or_fraction(&self, name: &str) -> Result<Option<f32>, InflateError> {
        self.parse(name, |v| match v.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f32>().ok().filter(|f| f.is_finite()).map(|f| f / 100.0),
            None => v.parse::<f32>().ok().filter(|f| f.is_finite()),
        })
    }

    pub fn resource(&self, name: &str) -> Result<Option<ResourceRef>, InflateError> {
        self.parse(name, ResourceRef::parse)
    }

    /// Tint blend mode by name or platform value. Unknown modes are `SrcIn`.
    pub fn tint_mode(&self, name: &str) -> Option<BlendMode> {
        let v = self.string(name)?;
        let mode = match parse_int(v) {
            Some(n) => BlendMode::from_platform(n),
            None => BlendMode::from_name(v).unwrap_or_else(|| {
                log::warn!("unknown {name} {v:?}, using src_in");
                BlendMode::SrcIn
            }),
        };
        Some(mode)
    }

    pub fn gradient_kind(&self, name: &str) -> Result<Option<GradientKind>, InflateError> {
        self.parse(name, |v| match parse_int(v) {
            Some(n) => GradientKind::from_platform(n),
            None => GradientKind::from_name(v),
        })
    }
}

/// Parses `#RGB`, `#ARGB`, `#RRGGBB` or `#AARRGGBB`.
pub fn parse_color(s: &str) -> Option<Color> {
    let hex = s.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let value = u32::from_str_radix(hex, 16).ok()?;
    let nibble = |shift: u32| (value >> shift) & 0xf;
    let argb = match hex.len() {
        3 => 0xff00_0000 | expand(nibble(8)) << 16 | expand(nibble(4)) << 8 | expand(nibble(0)),
        4 => expand(nibble(12)) << 24 | expand(nibble(8)) << 16 | expand(nibble(4)) << 8 | expand(nibble(0)),
        6 => 0xff00_0000 | value,
        8 => value,
        _ => return None,
    };
    Some(Color::from_argb(argb))
}

fn expand(n: u32) -> u32 {
    n << 4 | n
}

fn parse_int(s: &str) -> Option<i32> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok().map(|v| v as i32),
        None => s.parse().ok(),
    }
}

fn parse_dimension(s: &str, density: f32) -> Option<f32> {
    const UNITS: &[(&str, bool)] = &[("px", false), ("dip", true), ("dp", true), ("sp", true)];
    let (number, scaled) = UNITS
        .iter()
        .find_map(|&(unit, scaled)| s.strip_suffix(unit).map(|n| (n, scaled)))
        .unwrap_or((s, false));
    let value = number.trim().parse::<f32>().ok().filter(|f| f.is_finite())?;
    Some(if scaled { value * density } else { value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
        pairs.iter().fold(AttributeMap::new("icon-font"), |m, (k, v)| m.with(*k, *v))
    }

    #[test]
    fn color_formats() {
        assert_eq!(parse_color("#f00"), Some(Color::from_argb(0xffff0000)));
        assert_eq!(parse_color("#8f00"), Some(Color::from_argb(0x88ff0000)));
        assert_eq!(parse_color("#00ff00"), Some(Color::from_argb(0xff00ff00)));
        assert_eq!(parse_color("#800000ff"), Some(Color::from_argb(0x800000ff)));
        assert_eq!(parse_color("red"), None);
        assert_eq!(parse_color("#12345"), None);
        assert_eq!(parse_color("#+1234"), None);
    }

    #[test]
    fn dimensions_scale_by_density() {
        let src = attrs(&[("a", "12"), ("b", "12px"), ("c", "12dp"), ("d", "1.5dip"), ("e", "wide")]);
        let t = TypedAttributes::new(&src, 2.0);
        assert_eq!(t.dimension("a").unwrap(), Some(12.0));
        assert_eq!(t.dimension("b").unwrap(), Some(12.0));
        assert_eq!(t.dimension("c").unwrap(), Some(24.0));
        assert_eq!(t.dimension_px("d").unwrap(), Some(3));
        assert!(matches!(t.dimension("e"), Err(InflateError::InvalidAttribute { .. })));
        assert_eq!(t.dimension("missing").unwrap(), None);
    }

    #[test]
    fn fractions_and_floats() {
        let src = attrs(&[("x", "25%"), ("y", "0.75"), ("z", "nan")]);
        let t = TypedAttributes::new(&src, 1.0);
        assert_eq!(t.float_or_fraction("x").unwrap(), Some(0.25));
        assert_eq!(t.float_or_fraction("y").unwrap(), Some(0.75));
        assert!(t.float("z").is_err());
    }

    #[test]
    fn booleans_are_strict() {
        let src = attrs(&[("a", "true"), ("b", "yes")]);
        let t = TypedAttributes::new(&src, 1.0);
        assert_eq!(t.boolean("a").unwrap(), Some(true));
        assert!(t.boolean("b").is_err());
    }

    #[test]
    fn tint_mode_by_name_or_value() {
        let src = attrs(&[("a", "multiply"), ("b", "9"), ("c", "sideways"), ("d", "42")]);
        let t = TypedAttributes::new(&src, 1.0);
        assert_eq!(t.tint_mode("a"), Some(BlendMode::Multiply));
        assert_eq!(t.tint_mode("b"), Some(BlendMode::SrcAtop));
        assert_eq!(t.tint_mode("c"), Some(BlendMode::SrcIn));
        assert_eq!(t.tint_mode("d"), Some(BlendMode::SrcIn));
        assert_eq!(t.tint_mode("none"), None);
    }

    #[test]
    fn gradient_kind_by_name_or_value() {
        let src = attrs(&[("a", "sweep"), ("b", "1"), ("c", "7")]);
        let t = TypedAttributes::new(&src, 1.0);
        assert_eq!(t.gradient_kind("a").unwrap(), Some(GradientKind::Sweep));
        assert_eq!(t.gradient_kind("b").unwrap(), Some(GradientKind::Radial));
        assert!(t.gradient_kind("c").is_err());
    }

    #[test]
    fn xml_attributes_match_by_local_name() {
        let doc = roxmltree::Document::parse(
            r#"<icon-font xmlns:app="urn:app" app:code="e001"><gradient/>text<other/></icon-font>"#,
        )
        .unwrap();
        let root = doc.root_element();
        assert_eq!(root.tag(), "icon-font");
        assert_eq!(AttributeSource::attribute(&root, "code"), Some("e001"));
        let kids = AttributeSource::children(&root);
        assert_eq!(kids.len(), 2);
        assert_eq!(kids[0].tag(), "gradient");
    }

    #[test]
    fn attribute_map_replaces_duplicates() {
        let m = AttributeMap::new("icon-font").with("code", "e001").with("code", "e002");
        assert_eq!(m.attribute("code"), Some("e002"));
    }
}
