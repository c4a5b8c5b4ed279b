use std::collections::HashMap;

use super::{Color, CursorIcon, Edges, Style};

/// Interaction state used to pick a style variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleState {
    pub hovered: bool,
    pub focused: bool,
    pub disabled: bool,
}

/// A style with optional per-state overrides.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleRule {
    pub normal: Style,
    pub hovered: Option<Style>,
    pub focused: Option<Style>,
    pub disabled: Option<Style>,
}

impl StyleRule {
    pub fn new(normal: Style) -> Self {
        Self {
            normal,
            ..Default::default()
        }
    }

    pub fn hovered(mut self, style: Style) -> Self {
        self.hovered = Some(style);
        self
    }

    pub fn focused(mut self, style: Style) -> Self {
        self.focused = Some(style);
        self
    }

    pub fn disabled(mut self, style: Style) -> Self {
        self.disabled = Some(style);
        self
    }

    /// Disabled beats focused, focused beats hovered.
    pub fn pick(&self, state: StyleState) -> &Style {
        let variant = if state.disabled {
            self.disabled.as_ref()
        } else if state.focused {
            self.focused.as_ref()
        } else if state.hovered {
            self.hovered.as_ref()
        } else {
            None
        };
        variant.unwrap_or(&self.normal)
    }
}

/// Maps node kinds to style rules. Kinds without a rule use the fallback.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Theme {
    fallback: StyleRule,
    rules: HashMap<&'static str, StyleRule>,
}

impl Theme {
    /// A theme where every node gets `fallback`.
    pub fn new(fallback: StyleRule) -> Self {
        Self {
            fallback,
            rules: HashMap::new(),
        }
    }

    /// Theme with no box metrics, no backgrounds and white text.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rule(mut self, kind: &'static str, rule: StyleRule) -> Self {
        self.rules.insert(kind, rule);
        self
    }

    pub fn get(&self, kind: &str) -> &StyleRule {
        self.rules.get(kind).unwrap_or(&self.fallback)
    }

    pub fn pick(&self, kind: &str, state: StyleState) -> &Style {
        self.get(kind).pick(state)
    }
}

/// Readable defaults, applied by the frame driver when the root has no theme.
pub fn default_theme() -> Theme {
    let background = Color::oklch(0.15, 0.0, 0.0);
    let foreground = Color::oklch(0.95, 0.0, 0.0);
    let accent = Color::oklch(0.6, 0.12, 250.0);

    let base = Style::new().text_color(foreground);

    Theme::new(StyleRule::new(base.clone()))
        .rule("root", StyleRule::new(base.clone().background(background)))
        .rule(
            "button",
            StyleRule::new(
                base.clone()
                    .padding(Edges::symmetric(0, 1))
                    .background(accent.darken(0.2))
                    .cursor(CursorIcon::Pointer),
            )
            .hovered(
                base.clone()
                    .padding(Edges::symmetric(0, 1))
                    .background(accent)
                    .cursor(CursorIcon::Pointer),
            )
            .focused(
                base.clone()
                    .padding(Edges::symmetric(0, 1))
                    .background(accent.lighten(0.15))
                    .cursor(CursorIcon::Pointer),
            )
            .disabled(
                base.padding(Edges::symmetric(0, 1))
                    .background(background.lighten(0.1))
                    .text_color(foreground.darken(0.4))
                    .cursor(CursorIcon::NotAllowed),
            ),
        )
}
