//! Building [`GlyphState`] from `<icon-font>` elements.
//!
//! ```xml
//! <icon-font code="e001" font="@font/icons" color="#ff2196f3" intrinsicSize="24dp">
//!     <gradient type="linear" angle="90" startColor="#f00" endColor="#00f"/>
//! </icon-font>
//! ```

mod attrs;

pub use attrs::{AttributeMap, AttributeSource, TypedAttributes, parse_color};

use iconfont_engine::coords::Insets;
use iconfont_engine::paint::{Color, ShadowLayer};

use crate::code_cache::CodeCache;
use crate::error::InflateError;
use crate::font::ResourceRef;
use crate::state::{GlyphState, GradientState, UNSPECIFIED_SIZE};
use crate::tint::ColorStateList;

pub const ROOT_TAG: &str = "icon-font";
pub const GRADIENT_TAG: &str = "gradient";

/// Where the inflated glyph takes its typeface from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// The bundled asset typeface.
    Asset,
    /// A font resource, fetched asynchronously.
    Resource(ResourceRef),
}

/// Result of parsing one element; nothing is applied yet.
#[derive(Debug, Clone)]
pub struct Inflated {
    pub state: GlyphState,
    pub font: FontSource,
    pub visible: bool,
}

/// Parses `src` on top of a copy of `base`.
///
/// Attributes the element leaves out take their defaults, except the tint
/// and tint mode, which keep the values of `base`, and the gradient, which
/// only changes where a `<gradient>` child says so.
pub fn inflate_state<S: AttributeSource>(
    base: &GlyphState,
    src: &S,
    codes: &mut CodeCache,
    density: f32,
) -> Result<Inflated, InflateError> {
    if src.tag() != ROOT_TAG {
        return Err(InflateError::UnexpectedTag { expected: ROOT_TAG, found: src.tag().to_string() });
    }
    let a = TypedAttributes::new(src, density);
    let mut state = base.clone();

    let visible = a.boolean("visible")?.unwrap_or(true);

    let code = a.string("code").filter(|c| !c.is_empty()).ok_or(InflateError::MissingCode)?;
    state.code = Some(codes.get(code)?);

    let font = match a.resource("font")? {
        Some(r) if r.is_font() => FontSource::Resource(r),
        Some(r) => {
            log::debug!("{r} is not a font resource, using the bundled typeface");
            FontSource::Asset
        }
        None => FontSource::Asset,
    };

    state.paint.color = a.color("color")?.unwrap_or(Color::WHITE);
    if let Some(mode) = a.tint_mode("tintMode") {
        state.tint_mode = Some(mode);
    }
    if let Some(tint) = a.color("tint")? {
        state.tint = Some(ColorStateList::single(tint));
    }
    state.size = a.dimension_px("intrinsicSize")?.unwrap_or(UNSPECIFIED_SIZE);
    state.paint.alpha = a.int("alpha")?.map_or(255, |v| v.clamp(0, 255) as u8);

    state.set_shadow(ShadowLayer {
        radius: a.float("shadowRadius")?.unwrap_or(0.0),
        dx: a.float("shadowDx")?.unwrap_or(0.0),
        dy: a.float("shadowDy")?.unwrap_or(0.0),
        color: a.color("shadowColor")?.unwrap_or(Color::TRANSPARENT),
    });

    state.padding = Insets::new(
        a.dimension_px("paddingLeft")?.unwrap_or(0),
        a.dimension_px("paddingTop")?.unwrap_or(0),
        a.dimension_px("paddingRight")?.unwrap_or(0),
        a.dimension_px("paddingBottom")?.unwrap_or(0),
    );

    for child in src.children() {
        if child.tag() == GRADIENT_TAG {
            apply_gradient(&mut state.gradient, &TypedAttributes::new(&child, density))?;
        } else {
            log::warn!("bad element under <{ROOT_TAG}>: <{}>", child.tag());
        }
    }

    Ok(Inflated { state, font, visible })
}

fn apply_gradient<S: AttributeSource>(
    g: &mut GradientState,
    a: &TypedAttributes<'_, S>,
) -> Result<(), InflateError> {
    // Centers first: a three-color gradient places its middle stop from them.
    if let Some(cx) = a.float_or_fraction("centerX")? {
        g.center_x = cx;
    }
    if let Some(cy) = a.float_or_fraction("centerY")? {
        g.center_y = cy;
    }
    if let Some(use_level) = a.boolean("useLevel")? {
        g.use_level = use_level;
    }
    if let Some(kind) = a.gradient_kind("type")? {
        g.kind = kind;
    }

    let (prev_start, prev_center, prev_end, had_center) = match g.colors() {
        Some([s, c, e]) => (*s, *c, *e, true),
        Some([s, .., e]) => (*s, Color::TRANSPARENT, *e, false),
        _ => (Color::TRANSPARENT, Color::TRANSPARENT, Color::TRANSPARENT, false),
    };
    let start = a.color("startColor")?.unwrap_or(prev_start);
    let center = a.color("centerColor")?;
    let end = a.color("endColor")?.unwrap_or(prev_end);
    if center.is_some() || had_center {
        g.set_colors(&[start, center.unwrap_or(prev_center), end])?;
    } else {
        g.set_colors(&[start, end])?;
    }

    if let Some(angle) = a.float("angle")? {
        g.set_angle(angle as i32);
    }
    if let Some(radius) = a.dimension("gradientRadius")? {
        g.radius = radius;
    }
    Ok(())
}
