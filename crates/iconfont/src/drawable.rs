use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use iconfont_engine::Canvas;
use iconfont_engine::coords::{Insets, Rect};
use iconfont_engine::paint::{BlendMode, Color, ColorFilter};
use iconfont_engine::text::Typeface;

use crate::context::IconFont;
use crate::error::InflateError;
use crate::font::{FontResult, RequestSlot, RequestToken};
use crate::gradient::{self, GradientGeometry, MAX_LEVEL};
use crate::inflate::{AttributeSource, FontSource, Inflated};
use crate::state::{GlyphState, GradientError, GradientKind, Orientation};
use crate::tint::{ColorStateList, StateSet};

/// Pixel format a drawable reports to compositors.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Opacity {
    Opaque,
    Translucent,
    Transparent,
}

/// Parts of a drawable reachable from a pending font callback.
#[derive(Default)]
struct DrawableLink {
    font: RefCell<RequestSlot<Typeface>>,
    invalidate: RefCell<Option<Rc<dyn Fn()>>>,
}

impl DrawableLink {
    fn invalidate(&self) {
        let callback = self.invalidate.borrow().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

/// A single icon-font glyph painted centered in its bounds.
///
/// The glyph is drawn at a text size equal to the bounds height, filled
/// with the solid color or a gradient, then tinted and shadowed.
///
/// The paintable state is shared copy-on-write: drawables created with
/// [`from_state`](Self::from_state) share one [`GlyphState`] until one of
/// them is written to. [`mutate`](Self::mutate) detaches eagerly.
pub struct GlyphDrawable {
    state: Rc<GlyphState>,
    mutated: bool,
    bounds: Rect,
    level: u16,
    view_state: StateSet,
    visible: bool,
    tint_filter: Option<ColorFilter>,
    gradient_dirty: bool,
    geometry: GradientGeometry,
    link: Rc<DrawableLink>,
}

impl Default for GlyphDrawable {
    fn default() -> Self {
        Self::from_state(Rc::new(GlyphState::default()))
    }
}

impl GlyphDrawable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a drawable sharing `state` with every other holder.
    pub fn from_state(state: Rc<GlyphState>) -> Self {
        let mut d = Self {
            state,
            mutated: false,
            bounds: Rect::default(),
            level: 0,
            view_state: StateSet::empty(),
            visible: true,
            tint_filter: None,
            gradient_dirty: true,
            geometry: GradientGeometry::default(),
            link: Rc::new(DrawableLink::default()),
        };
        d.tint_filter = d.compute_tint_filter();
        d
    }

    /// The shared template; pass it to [`from_state`](Self::from_state).
    pub fn constant_state(&self) -> Rc<GlyphState> {
        Rc::clone(&self.state)
    }

    pub fn state(&self) -> &GlyphState {
        &self.state
    }

    /// Detaches this drawable from any shared state. Only the first call
    /// copies.
    pub fn mutate(&mut self) -> &mut Self {
        if !self.mutated {
            self.state = Rc::new(GlyphState::clone(&self.state));
            self.mutated = true;
        }
        self
    }

    pub fn is_mutated(&self) -> bool {
        self.mutated
    }

    fn state_mut(&mut self) -> &mut GlyphState {
        Rc::make_mut(&mut self.state)
    }

    /// Registers the callback run whenever the drawable needs a redraw.
    pub fn set_invalidate_callback(&mut self, callback: Option<Rc<dyn Fn()>>) {
        *self.link.invalidate.borrow_mut() = callback;
    }

    pub fn invalidate_self(&self) {
        self.link.invalidate();
    }

    // ── inflation ─────────────────────────────────────────────────────────

    /// Replaces this drawable's state with one parsed from `src`.
    ///
    /// On error nothing changes. A `font` resource starts a load through
    /// `ctx`; the face is applied once `ctx` dispatches the result and only
    /// if no later inflation or [`set_typeface`](Self::set_typeface)
    /// superseded it. Without a font resource the bundled typeface is used.
    pub fn inflate<S: AttributeSource>(&mut self, ctx: &IconFont, src: &S) -> Result<(), InflateError> {
        let Inflated { mut state, font, visible } = ctx.parse(&self.state, src)?;

        match font {
            FontSource::Resource(resource) => {
                let token = self.link.font.borrow_mut().begin();
                let link = Rc::downgrade(&self.link);
                ctx.fonts().request(&resource, move |result| on_font_loaded(&link, token, result));
            }
            FontSource::Asset => {
                self.link.font.borrow_mut().cancel();
                state.paint.typeface = ctx.assets().typeface();
            }
        }

        self.state = Rc::new(state);
        self.visible = visible;
        self.tint_filter = self.compute_tint_filter();
        self.gradient_dirty = true;
        self.invalidate_self();
        Ok(())
    }

    /// Applies a font that finished loading. Returns true if the typeface
    /// changed.
    pub fn poll_font(&mut self) -> bool {
        let loaded = self.link.font.borrow_mut().take();
        match loaded {
            Some(face) => {
                log::debug!("applying loaded typeface {}", face.name());
                self.state_mut().paint.typeface = Some(face);
                true
            }
            None => false,
        }
    }

    pub fn has_pending_font(&self) -> bool {
        self.link.font.borrow().is_pending()
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        if self.bounds != bounds {
            self.bounds = bounds;
            self.gradient_dirty = true;
            self.invalidate_self();
        }
    }

    /// Recomputes the gradient if needed. Returns false for empty bounds.
    fn ensure_valid_rect(&mut self) -> bool {
        if self.gradient_dirty {
            self.gradient_dirty = false;
            self.geometry = gradient::compute(&self.state.gradient, self.bounds, self.level);
            log::trace!("gradient recomputed for {:?} at level {}", self.bounds, self.level);
        }
        !self.bounds.is_empty()
    }

    /// Paints the glyph centered in the current bounds.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        self.poll_font();
        let bounds = self.bounds;
        let Some(code) = self.state.code else {
            return;
        };
        if bounds.height() <= 0.0 || !self.ensure_valid_rect() {
            return;
        }

        let mut paint = self.state.paint.clone();
        paint.shader = self.geometry.shader.clone();
        if paint.color_filter.is_none() {
            paint.color_filter = self.tint_filter;
        }
        paint.text_size = bounds.height();

        let text = paint.text_bounds(code);
        let text_height = text.height();
        let baseline = bounds.top() + (bounds.height() - text_height) / 2.0 + text_height - text.bottom;
        canvas.draw_glyph(code, bounds.center_x(), baseline, &paint);
    }

    /// Sets the bounds to `rect` and draws.
    pub fn paint(&mut self, canvas: &mut dyn Canvas, rect: Rect) {
        self.set_bounds(rect);
        self.draw(canvas);
    }

    pub fn level(&self) -> u16 {
        self.level
    }

    /// Sets the level (`0..=10000`). Returns true when it changed.
    pub fn set_level(&mut self, level: u16) -> bool {
        let level = level.min(MAX_LEVEL);
        if self.level == level {
            return false;
        }
        self.level = level;
        self.gradient_dirty = true;
        self.invalidate_self();
        true
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns true when the visibility changed.
    pub fn set_visible(&mut self, visible: bool) -> bool {
        let changed = self.visible != visible;
        self.visible = visible;
        if changed {
            self.invalidate_self();
        }
        changed
    }

    pub fn opacity(&self) -> Opacity {
        Opacity::Translucent
    }

    // ── tint ──────────────────────────────────────────────────────────────

    /// A tint applies only when both its color list and its mode are set.
    fn compute_tint_filter(&self) -> Option<ColorFilter> {
        let tint = self.state.tint.as_ref()?;
        let mode = self.state.tint_mode?;
        Some(ColorFilter::new(tint.color_for_state(self.view_state), mode))
    }

    /// Filter derived from the tint for the current state.
    pub fn tint_filter(&self) -> Option<ColorFilter> {
        self.tint_filter
    }

    pub fn view_state(&self) -> StateSet {
        self.view_state
    }

    /// Updates the visual state. Returns true when the tint filter changed
    /// and the drawable must be redrawn.
    pub fn set_state(&mut self, state: StateSet) -> bool {
        self.view_state = state;
        let filter = self.compute_tint_filter();
        if filter != self.tint_filter {
            self.tint_filter = filter;
            return true;
        }
        false
    }

    pub fn is_stateful(&self) -> bool {
        self.state.tint.as_ref().is_some_and(ColorStateList::is_stateful)
    }

    pub fn set_tint(&mut self, color: Color) {
        self.set_tint_list(Some(ColorStateList::single(color)));
    }

    pub fn set_tint_list(&mut self, tint: Option<ColorStateList>) {
        self.state_mut().tint = tint;
        self.tint_filter = self.compute_tint_filter();
        self.invalidate_self();
    }

    pub fn set_tint_mode(&mut self, mode: Option<BlendMode>) {
        self.state_mut().tint_mode = mode;
        self.tint_filter = self.compute_tint_filter();
        self.invalidate_self();
    }

    pub fn color_filter(&self) -> Option<ColorFilter> {
        self.state.paint.color_filter
    }

    /// Sets an explicit filter; while present the tint is not applied.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.state_mut().paint.color_filter = filter;
        self.invalidate_self();
    }

    // ── glyph ─────────────────────────────────────────────────────────────

    pub fn code(&self) -> Option<char> {
        self.state.code
    }

    pub fn set_code(&mut self, code: Option<char>) {
        self.state_mut().code = code;
        self.invalidate_self();
    }

    pub fn color(&self) -> Color {
        self.state.paint.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.state_mut().paint.color = color;
        self.invalidate_self();
    }

    pub fn alpha(&self) -> u8 {
        self.state.paint.alpha
    }

    pub fn set_alpha(&mut self, alpha: u8) {
        self.state_mut().paint.alpha = alpha;
        self.invalidate_self();
    }

    /// Current typeface, including one that finished loading but has not
    /// been applied yet.
    pub fn typeface(&self) -> Option<Typeface> {
        let slot = self.link.font.borrow();
        slot.peek().cloned().or_else(|| self.state.paint.typeface.clone())
    }

    /// Sets the typeface, discarding any font load still in flight.
    pub fn set_typeface(&mut self, typeface: Option<Typeface>) {
        self.link.font.borrow_mut().cancel();
        self.state_mut().paint.typeface = typeface;
        self.invalidate_self();
    }

    pub fn intrinsic_size(&self) -> i32 {
        self.state.size
    }

    /// Sets the intrinsic size in pixels; `-1` means unspecified.
    pub fn set_intrinsic_size(&mut self, size: i32) {
        self.state_mut().size = size;
    }

    pub fn intrinsic_width(&self) -> i32 {
        self.state.size
    }

    pub fn intrinsic_height(&self) -> i32 {
        self.state.size
    }

    pub fn padding(&self) -> Option<Insets> {
        Some(self.state.padding)
    }

    pub fn set_padding(&mut self, padding: Insets) {
        self.state_mut().padding = padding;
        self.invalidate_self();
    }

    // ── shadow ────────────────────────────────────────────────────────────

    pub fn shadow_dx(&self) -> f32 {
        self.state.shadow().dx
    }

    pub fn set_shadow_dx(&mut self, dx: f32) {
        self.state_mut().set_shadow_dx(dx);
        self.invalidate_self();
    }

    pub fn shadow_dy(&self) -> f32 {
        self.state.shadow().dy
    }

    pub fn set_shadow_dy(&mut self, dy: f32) {
        self.state_mut().set_shadow_dy(dy);
        self.invalidate_self();
    }

    pub fn shadow_radius(&self) -> f32 {
        self.state.shadow().radius
    }

    pub fn set_shadow_radius(&mut self, radius: f32) {
        self.state_mut().set_shadow_radius(radius);
        self.invalidate_self();
    }

    pub fn shadow_color(&self) -> Color {
        self.state.shadow().color
    }

    pub fn set_shadow_color(&mut self, color: Color) {
        self.state_mut().set_shadow_color(color);
        self.invalidate_self();
    }

    // ── gradient ──────────────────────────────────────────────────────────

    fn gradient_changed(&mut self) {
        self.gradient_dirty = true;
        self.invalidate_self();
    }

    pub fn gradient_kind(&self) -> GradientKind {
        self.state.gradient.kind
    }

    pub fn set_gradient_kind(&mut self, kind: GradientKind) {
        self.state_mut().gradient.kind = kind;
        self.gradient_changed();
    }

    /// Gradient colors, or the solid color when no gradient is set.
    pub fn colors(&self) -> Vec<Color> {
        match self.state.gradient.colors() {
            Some(colors) if !colors.is_empty() => colors.to_vec(),
            _ => vec![self.state.paint.color],
        }
    }

    pub fn set_colors(&mut self, colors: &[Color]) -> Result<(), GradientError> {
        self.state_mut().gradient.set_colors(colors)?;
        self.gradient_changed();
        Ok(())
    }

    pub fn set_colors_with_positions(&mut self, colors: &[Color], positions: &[f32]) -> Result<(), GradientError> {
        self.state_mut().gradient.set_colors_with_positions(colors, positions)?;
        self.gradient_changed();
        Ok(())
    }

    /// Removes the gradient; the solid color is painted again.
    pub fn clear_colors(&mut self) {
        self.state_mut().gradient.clear_colors();
        self.gradient_changed();
    }

    pub fn orientation(&self) -> Orientation {
        self.state.gradient.orientation()
    }

    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.state_mut().gradient.set_orientation(orientation);
        self.gradient_changed();
    }

    /// Sets the linear direction by angle; see [`crate::GradientState::set_angle`].
    pub fn set_gradient_angle(&mut self, degrees: i32) {
        self.state_mut().gradient.set_angle(degrees);
        self.gradient_changed();
    }

    pub fn set_gradient_center(&mut self, x: f32, y: f32) {
        let g = &mut self.state_mut().gradient;
        g.center_x = x;
        g.center_y = y;
        self.gradient_changed();
    }

    pub fn use_level(&self) -> bool {
        self.state.gradient.use_level
    }

    pub fn set_use_level(&mut self, use_level: bool) {
        self.state_mut().gradient.use_level = use_level;
        self.gradient_changed();
    }

    /// Effective radial radius for the current bounds and level, before
    /// clamping. Zero unless the gradient is radial.
    pub fn gradient_radius(&mut self) -> f32 {
        if self.state.gradient.kind != GradientKind::Radial {
            return 0.0;
        }
        self.ensure_valid_rect();
        self.geometry.radius
    }

    pub fn set_gradient_radius(&mut self, radius: f32) {
        self.state_mut().gradient.radius = radius;
        self.gradient_changed();
    }
}

fn on_font_loaded(link: &Weak<DrawableLink>, token: RequestToken, result: FontResult) {
    let Some(link) = link.upgrade() else {
        return;
    };
    let face = match result {
        Ok(face) => Some(face),
        Err(e) => {
            log::debug!("font load failed, keeping current typeface: {e}");
            None
        }
    };
    let applied = face.is_some();
    let accepted = link.font.borrow_mut().complete(token, face);
    if accepted && applied {
        link.invalidate();
    }
}

impl fmt::Debug for GlyphDrawable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlyphDrawable")
            .field("code", &self.state.code)
            .field("bounds", &self.bounds)
            .field("level", &self.level)
            .field("mutated", &self.mutated)
            .field("visible", &self.visible)
            .field("pending_font", &self.has_pending_font())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::Arc;
    use std::time::Duration;

    use iconfont_engine::paint::Shader;
    use iconfont_engine::scene::DrawList;

    use super::*;
    use crate::config::IconFontConfig;
    use crate::font::{FontLoadError, FontResolver, ResourceRef};

    const FONT: &[u8] = include_bytes!(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/../../testdata/fonts/DejaVuSans-ExtraLight.ttf"
    ));
    const WAIT: Duration = Duration::from_secs(5);

    const RED: Color = Color::from_premul(1.0, 0.0, 0.0, 1.0);
    const GREEN: Color = Color::from_premul(0.0, 1.0, 0.0, 1.0);
    const BLUE: Color = Color::from_premul(0.0, 0.0, 1.0, 1.0);

    /// Serves the bundled test font for `@font/good`, fails everything else.
    struct Fonts;

    impl FontResolver for Fonts {
        fn load(&self, font: &ResourceRef) -> Result<Vec<u8>, FontLoadError> {
            match font.name.as_str() {
                "good" => Ok(FONT.to_vec()),
                other => Err(FontLoadError(format!("no font named {other}"))),
            }
        }
    }

    fn ctx() -> IconFont {
        // Points the asset root at a directory that does not exist: no
        // bundled typeface.
        let config = IconFontConfig::default().with_asset_root("/nonexistent/iconfont-assets");
        IconFont::with_resolver(config, Arc::new(Fonts))
    }

    fn glyph(code: char) -> GlyphDrawable {
        let mut d = GlyphDrawable::new();
        d.set_code(Some(code));
        d
    }

    fn record(d: &mut GlyphDrawable, rect: Rect) -> DrawList {
        let mut list = DrawList::new();
        d.paint(&mut list, rect);
        list
    }

    fn drain(ctx: &IconFont) {
        while ctx.fonts().pending() > 0 {
            ctx.fonts().wait_and_dispatch(WAIT);
        }
    }

    #[test]
    fn e001_is_centered_at_bounds_height() {
        let ctx = ctx();
        let mut d = ctx.inflate_str(r#"<icon-font code="e001"/>"#).unwrap();
        assert_eq!(d.code(), Some('\u{e001}'));

        let list = record(&mut d, Rect::new(50.0, 50.0, 100.0, 100.0));
        let cmd = list.glyphs().next().unwrap();
        assert_eq!(cmd.glyph, '\u{e001}');
        assert_eq!(cmd.paint.text_size, 100.0);
        assert_eq!(cmd.origin.x, 100.0);
        // No typeface: the glyph box is empty and the baseline sits mid-height.
        assert_eq!(cmd.origin.y, 100.0);
    }

    #[test]
    fn baseline_centers_measured_glyph() {
        let face = Typeface::from_bytes("test", FONT).unwrap();
        let mut d = glyph('A');
        d.set_typeface(Some(face.clone()));

        let list = record(&mut d, Rect::new(0.0, 0.0, 100.0, 100.0));
        let cmd = list.glyphs().next().unwrap();
        let tb = face.text_bounds('A', 100.0);
        let expected = (100.0 - tb.height()) / 2.0 + tb.height() - tb.bottom;
        assert_eq!(cmd.origin.y, expected);
        assert_eq!(cmd.paint.typeface.as_ref(), Some(&face));
    }

    #[test]
    fn nothing_drawn_without_code_or_height() {
        let mut d = GlyphDrawable::new();
        assert!(record(&mut d, Rect::new(0.0, 0.0, 10.0, 10.0)).is_empty());

        let mut d = glyph('a');
        assert!(record(&mut d, Rect::new(0.0, 0.0, 10.0, 0.0)).is_empty());
        assert!(record(&mut d, Rect::new(0.0, 0.0, 0.0, 10.0)).is_empty());
    }

    #[test]
    fn repeated_paint_reuses_shader() {
        let mut d = glyph('a');
        d.set_colors(&[RED, BLUE]).unwrap();
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);

        let first = record(&mut d, rect);
        let second = record(&mut d, rect);
        let a = first.glyphs().next().unwrap().paint.shader.clone().unwrap();
        let b = second.glyphs().next().unwrap().paint.shader.clone().unwrap();
        assert!(Rc::ptr_eq(&a, &b));

        d.set_level(5000);
        let third = record(&mut d, rect);
        let c = third.glyphs().next().unwrap().paint.shader.clone().unwrap();
        assert!(!Rc::ptr_eq(&a, &c));
    }

    fn shader_of(d: &mut GlyphDrawable, rect: Rect) -> Rc<Shader> {
        record(d, rect).glyphs().next().unwrap().paint.shader.clone().unwrap()
    }

    #[test]
    fn bounds_change_rebuilds_shader() {
        let mut d = glyph('a');
        d.set_colors(&[RED, BLUE]).unwrap();
        let first = shader_of(&mut d, Rect::new(0.0, 0.0, 40.0, 40.0));
        let moved = shader_of(&mut d, Rect::new(10.0, 10.0, 40.0, 40.0));
        assert!(!Rc::ptr_eq(&first, &moved));

        let again = shader_of(&mut d, Rect::new(10.0, 10.0, 40.0, 40.0));
        assert!(Rc::ptr_eq(&moved, &again));
    }

    #[test]
    fn gradient_edits_rebuild_shader() {
        let rect = Rect::new(0.0, 0.0, 40.0, 40.0);
        let mut d = glyph('a');
        d.set_colors(&[RED, BLUE]).unwrap();
        let first = shader_of(&mut d, rect);

        d.set_orientation(Orientation::BottomTop);
        let turned = shader_of(&mut d, rect);
        assert!(!Rc::ptr_eq(&first, &turned));

        d.set_colors(&[GREEN, BLUE]).unwrap();
        let recolored = shader_of(&mut d, rect);
        assert!(!Rc::ptr_eq(&turned, &recolored));
    }

    #[test]
    fn tint_without_mode_applies_no_filter() {
        let ctx = ctx();
        let d = ctx.inflate_str(r##"<icon-font code="e001" tint="#00ff00"/>"##).unwrap();
        assert!(d.state().tint.is_some());
        assert_eq!(d.tint_filter(), None);

        let d = ctx
            .inflate_str(r##"<icon-font code="e001" tint="#00ff00" tintMode="src_in"/>"##)
            .unwrap();
        assert_eq!(d.tint_filter().map(|f| f.mode), Some(BlendMode::SrcIn));
    }

    #[test]
    fn paint_leaves_state_untouched() {
        let mut d = glyph('a');
        d.set_colors(&[RED, BLUE]).unwrap();
        d.set_tint(GREEN);
        record(&mut d, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert!(d.state().paint.shader.is_none());
        assert!(d.state().paint.color_filter.is_none());
        assert_eq!(d.state().paint.text_size, 0.0);
    }

    #[test]
    fn explicit_filter_wins_over_tint() {
        let mut d = glyph('a');
        d.set_tint(GREEN);
        d.set_tint_mode(Some(BlendMode::SrcIn));
        let explicit = ColorFilter::new(BLUE, BlendMode::Multiply);
        d.set_color_filter(Some(explicit));
        let list = record(&mut d, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(list.glyphs().next().unwrap().paint.color_filter, Some(explicit));

        d.set_color_filter(None);
        let list = record(&mut d, Rect::new(0.0, 0.0, 20.0, 20.0));
        assert_eq!(
            list.glyphs().next().unwrap().paint.color_filter,
            Some(ColorFilter::new(GREEN, BlendMode::SrcIn))
        );
    }

    #[test]
    fn shadow_setters_round_trip() {
        let mut d = glyph('a');
        d.set_shadow_dx(1.5);
        d.set_shadow_dy(-2.0);
        d.set_shadow_radius(3.0);
        d.set_shadow_color(RED);
        d.set_shadow_dx(4.0);

        assert_eq!(d.shadow_dx(), 4.0);
        assert_eq!(d.shadow_dy(), -2.0);
        assert_eq!(d.shadow_radius(), 3.0);
        assert_eq!(d.shadow_color(), RED);
        let shadow = d.state().paint.shadow;
        assert_eq!((shadow.dx, shadow.dy, shadow.radius, shadow.color), (4.0, -2.0, 3.0, RED));
    }

    #[test]
    fn state_change_reports_redraw_only_when_filter_changes() {
        let mut d = glyph('a');
        assert!(!d.set_state(StateSet::PRESSED));

        d.set_tint_mode(Some(BlendMode::SrcIn));
        d.set_tint_list(Some(ColorStateList::new(BLUE).with(StateSet::PRESSED, RED)));
        assert!(d.is_stateful());
        assert_eq!(d.tint_filter().map(|f| f.color), Some(RED));

        assert!(!d.set_state(StateSet::PRESSED | StateSet::FOCUSED));
        assert!(d.set_state(StateSet::FOCUSED));
        assert_eq!(d.tint_filter().map(|f| f.color), Some(BLUE));

        d.set_tint_mode(Some(BlendMode::Screen));
        assert_eq!(d.tint_filter().map(|f| f.mode), Some(BlendMode::Screen));
    }

    #[test]
    fn siblings_share_until_written() {
        let mut a = glyph('a');
        a.set_color(RED);
        let template = a.constant_state();
        let mut b = GlyphDrawable::from_state(Rc::clone(&template));
        let c = GlyphDrawable::from_state(Rc::clone(&template));
        assert!(Rc::ptr_eq(&b.constant_state(), &c.constant_state()));

        b.set_color(BLUE);
        assert_eq!(b.color(), BLUE);
        assert_eq!(c.color(), RED);
        assert_eq!(template.paint.color, RED);
    }

    #[test]
    fn mutate_detaches_once() {
        let template = Rc::new(GlyphState::default());
        let mut d = GlyphDrawable::from_state(Rc::clone(&template));
        assert!(!d.is_mutated());
        d.mutate();
        assert!(d.is_mutated());
        let detached = Rc::as_ptr(&d.constant_state());
        assert_ne!(detached, Rc::as_ptr(&template));
        d.mutate();
        assert_eq!(Rc::as_ptr(&d.constant_state()), detached);
    }

    #[test]
    fn colors_fall_back_to_solid_color() {
        let mut d = glyph('a');
        d.set_color(GREEN);
        assert_eq!(d.colors(), [GREEN]);
        d.set_colors(&[RED, GREEN, BLUE]).unwrap();
        assert_eq!(d.colors(), [RED, GREEN, BLUE]);
        assert!(d.set_colors(&[RED]).is_err());
        d.clear_colors();
        assert_eq!(d.colors(), [GREEN]);
    }

    #[test]
    fn radial_radius_scales_with_level() {
        let mut d = glyph('a');
        d.set_gradient_kind(GradientKind::Radial);
        d.set_colors(&[RED, BLUE]).unwrap();
        d.set_gradient_radius(40.0);
        d.set_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
        assert_eq!(d.gradient_radius(), 40.0);

        d.set_use_level(true);
        d.set_level(2500);
        assert_eq!(d.gradient_radius(), 10.0);

        d.set_gradient_kind(GradientKind::Linear);
        assert_eq!(d.gradient_radius(), 0.0);
    }

    #[test]
    fn level_changes_are_reported() {
        let mut d = glyph('a');
        assert!(d.set_level(100));
        assert!(!d.set_level(100));
        d.set_level(u16::MAX);
        assert_eq!(d.level(), MAX_LEVEL);
    }

    #[test]
    fn setters_invalidate() {
        let count = Rc::new(Cell::new(0));
        let mut d = glyph('a');
        let seen = Rc::clone(&count);
        d.set_invalidate_callback(Some(Rc::new(move || seen.set(seen.get() + 1))));
        d.set_color(RED);
        d.set_alpha(10);
        d.set_padding(Insets::all(2));
        d.set_bounds(Rect::new(0.0, 0.0, 5.0, 5.0));
        d.set_bounds(Rect::new(0.0, 0.0, 5.0, 5.0));
        assert_eq!(count.get(), 4);
        assert_eq!(d.padding(), Some(Insets::all(2)));
        assert_eq!(d.opacity(), Opacity::Translucent);
    }

    #[test]
    fn missing_code_produces_no_drawable() {
        let ctx = ctx();
        assert!(matches!(ctx.inflate_str("<icon-font/>"), Err(InflateError::MissingCode)));

        let mut d = glyph('z');
        d.set_color(RED);
        assert!(d.inflate(&ctx, &crate::inflate::AttributeMap::new("icon-font")).is_err());
        assert_eq!(d.code(), Some('z'));
        assert_eq!(d.color(), RED);
    }

    #[test]
    fn failed_font_load_keeps_typeface() {
        let ctx = ctx();
        let mut d = ctx
            .inflate_str(r#"<icon-font code="e001" font="@font/missing"/>"#)
            .unwrap();
        assert!(d.has_pending_font());
        drain(&ctx);
        assert!(!d.has_pending_font());
        assert!(!d.poll_font());
        assert!(d.typeface().is_none());
    }

    #[test]
    fn loaded_font_is_applied_and_invalidates() {
        let ctx = ctx();
        let mut d = ctx.inflate_str(r#"<icon-font code="e001" font="@font/good"/>"#).unwrap();
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        d.set_invalidate_callback(Some(Rc::new(move || seen.set(seen.get() + 1))));

        drain(&ctx);
        assert_eq!(count.get(), 1);
        assert!(d.typeface().is_some());
        assert!(d.poll_font());
        assert!(d.state().paint.typeface.is_some());
    }

    #[test]
    fn reinflating_discards_stale_font() {
        let ctx = ctx();
        let mut d = ctx.inflate_str(r#"<icon-font code="e001" font="@font/good"/>"#).unwrap();
        d.inflate(&ctx, &crate::inflate::AttributeMap::new("icon-font").with("code", "e002"))
            .unwrap();
        drain(&ctx);
        assert!(!d.poll_font());
        assert!(d.typeface().is_none());
        assert_eq!(d.code(), Some('\u{e002}'));
    }

    #[test]
    fn set_typeface_supersedes_pending_load() {
        let ctx = ctx();
        let mut d = ctx.inflate_str(r#"<icon-font code="e001" font="@font/good"/>"#).unwrap();
        let mine = Typeface::from_bytes("mine", FONT).unwrap();
        d.set_typeface(Some(mine.clone()));
        drain(&ctx);
        d.poll_font();
        assert_eq!(d.typeface(), Some(mine));
    }

    #[test]
    fn dropped_drawable_ignores_late_font() {
        let ctx = ctx();
        let d = ctx.inflate_str(r#"<icon-font code="e001" font="@font/good"/>"#).unwrap();
        drop(d);
        drain(&ctx);
    }
}
