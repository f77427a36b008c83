use ratatui::style::{Color, Modifier, Style};

use crate::game::CellTag;

/// A color theme applied to rendered frames.
///
/// The engine tags every cell with a [`CellTag`]; a theme is the pure
/// mapping from tag to display attribute. Keeps the engine free of any
/// rendering-library dependency.
#[derive(Debug)]
pub struct Theme {
    pub name: &'static str,
    pub border: Color,
    /// Body segment color.
    pub body: Color,
    /// Head segment color; always rendered bold.
    pub head: Color,
    pub food: Color,
}

impl Theme {
    /// Returns the display style for one cell tag.
    #[must_use]
    pub fn style_for(&self, tag: CellTag) -> Style {
        match tag {
            CellTag::Plain => Style::new(),
            CellTag::Border => Style::new().fg(self.border),
            CellTag::Body => Style::new().fg(self.body),
            CellTag::Head => Style::new().fg(self.head).add_modifier(Modifier::BOLD),
            CellTag::Food => Style::new().fg(self.food),
        }
    }

    /// Looks a theme up by case-insensitive name.
    #[must_use]
    pub fn by_name(name: &str) -> Option<&'static Theme> {
        THEMES.iter().find(|theme| theme.name.eq_ignore_ascii_case(name))
    }
}

/// Classic green-on-dark theme, 256-color palette.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    border: Color::Indexed(240),
    body: Color::Indexed(46),
    head: Color::Indexed(82),
    food: Color::Indexed(196),
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    border: Color::DarkGray,
    body: Color::Cyan,
    head: Color::White,
    food: Color::Yellow,
};

/// Neon magenta theme.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    border: Color::Magenta,
    body: Color::LightMagenta,
    head: Color::White,
    food: Color::LightYellow,
};

/// All available themes in lookup order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];
