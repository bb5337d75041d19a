use bitflags::bitflags;

use iconfont_engine::paint::Color;

bitflags! {
    /// Visual state of the view hosting a drawable.
    #[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
    pub struct StateSet: u16 {
        const ENABLED   = 1 << 0;
        const PRESSED   = 1 << 1;
        const FOCUSED   = 1 << 2;
        const SELECTED  = 1 << 3;
        const CHECKED   = 1 << 4;
        const ACTIVATED = 1 << 5;
        const HOVERED   = 1 << 6;
    }
}

/// One entry of a [`ColorStateList`].
///
/// Matches when every `required` flag is set and no `excluded` flag is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct StateColor {
    pub required: StateSet,
    pub excluded: StateSet,
    pub color: Color,
}

impl StateColor {
    #[inline]
    pub fn matches(&self, state: StateSet) -> bool {
        state.contains(self.required) && !state.intersects(self.excluded)
    }
}

/// Colors keyed by visual state; the first matching entry wins.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorStateList {
    entries: Vec<StateColor>,
    default_color: Color,
}

impl ColorStateList {
    /// A list resolving to `color` in every state.
    pub fn single(color: Color) -> Self {
        Self { entries: Vec::new(), default_color: color }
    }

    /// A list resolving to `default_color` when no entry matches.
    pub fn new(default_color: Color) -> Self {
        Self::single(default_color)
    }

    /// Appends an entry matching states that contain all of `required`.
    pub fn with(mut self, required: StateSet, color: Color) -> Self {
        self.entries.push(StateColor { required, excluded: StateSet::empty(), color });
        self
    }

    /// Appends an entry matching states that lack all of `excluded`.
    pub fn without(mut self, excluded: StateSet, color: Color) -> Self {
        self.entries.push(StateColor { required: StateSet::empty(), excluded, color });
        self
    }

    pub fn color_for_state(&self, state: StateSet) -> Color {
        self.entries
            .iter()
            .find(|e| e.matches(state))
            .map_or(self.default_color, |e| e.color)
    }

    pub fn default_color(&self) -> Color {
        self.default_color
    }

    /// True when the resolved color can depend on the state.
    pub fn is_stateful(&self) -> bool {
        !self.entries.is_empty()
    }
}

impl From<Color> for ColorStateList {
    fn from(color: Color) -> Self {
        ColorStateList::single(color)
    }
}
