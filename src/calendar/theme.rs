use ratatui::style::{Color, Modifier, Style};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const BASE_STYLE: Style = Style::new().fg(Color::White).bg(Color::Black);

pub const HEADER_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const BUTTON_STYLE: Style = BASE_STYLE.add_modifier(Modifier::BOLD);

pub const DISABLED_BUTTON_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub const SEPARATOR_STYLE: Style = BASE_STYLE.fg(Color::DarkGray);

pub const MARKER_STYLE: Style = BASE_STYLE.fg(Color::LightYellow);

pub const TODAY_STYLE: Style = Style::new()
    .fg(Color::LightCyan)
    .add_modifier(Modifier::BOLD);

pub const SELECTED_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

pub const DISABLED_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Styles for the parts of a single day cell
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DayElementStyles {
    pub day_name: Style,
    pub day_number: Style,
    pub indicator: Style,
}

impl DayElementStyles {
    pub const fn uniform(style: Style) -> DayElementStyles {
        DayElementStyles {
            day_name: style,
            day_number: style,
            indicator: style,
        }
    }

    /// Layer `other` on top of `self`; unset attributes of `other` leave
    /// those of `self` in place
    pub fn patch(self, other: DayElementStyles) -> DayElementStyles {
        DayElementStyles {
            day_name: self.day_name.patch(other.day_name),
            day_number: self.day_number.patch(other.day_number),
            indicator: self.indicator.patch(other.indicator),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DayStates {
    pub is_today: bool,
    pub is_selected: bool,
    pub is_disabled: bool,
}

/// Day styles for each state a day can be in.  When several states apply,
/// they are layered in the order base, today, selected, disabled.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct DayStateStyles {
    pub base: DayElementStyles,
    pub today: DayElementStyles,
    pub selected: DayElementStyles,
    pub disabled: DayElementStyles,
}

impl DayStateStyles {
    pub fn resolve(&self, states: DayStates) -> DayElementStyles {
        let mut styles = self.base;
        if states.is_today {
            styles = styles.patch(self.today);
        }
        if states.is_selected {
            styles = styles.patch(self.selected);
        }
        if states.is_disabled {
            styles = styles.patch(self.disabled);
        }
        styles
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Theme {
    pub base: Style,
    pub header: Style,
    pub button: Style,
    pub button_disabled: Style,
    pub separator: Style,
    pub days: DayStateStyles,
}

impl Default for Theme {
    fn default() -> Theme {
        ThemeVariant::default().theme()
    }
}

/// Named style presets
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum ThemeVariant {
    #[default]
    Classic,
    Minimal,
    Contrast,
}

impl ThemeVariant {
    pub fn theme(self) -> Theme {
        match self {
            ThemeVariant::Classic => Theme {
                base: BASE_STYLE,
                header: HEADER_STYLE,
                button: BUTTON_STYLE,
                button_disabled: DISABLED_BUTTON_STYLE,
                separator: SEPARATOR_STYLE,
                days: DayStateStyles {
                    base: DayElementStyles {
                        day_name: BASE_STYLE.add_modifier(Modifier::BOLD),
                        day_number: BASE_STYLE,
                        indicator: MARKER_STYLE,
                    },
                    today: DayElementStyles {
                        day_name: Style::new(),
                        day_number: TODAY_STYLE,
                        indicator: Style::new(),
                    },
                    selected: DayElementStyles {
                        day_name: Style::new().add_modifier(Modifier::UNDERLINED),
                        day_number: SELECTED_STYLE,
                        indicator: Style::new(),
                    },
                    disabled: DayElementStyles::uniform(DISABLED_STYLE),
                },
            },
            ThemeVariant::Minimal => Theme {
                base: BASE_STYLE,
                header: BASE_STYLE,
                button: BASE_STYLE,
                button_disabled: DISABLED_BUTTON_STYLE,
                separator: BASE_STYLE,
                days: DayStateStyles {
                    base: DayElementStyles::uniform(BASE_STYLE),
                    today: DayElementStyles::default(),
                    selected: DayElementStyles {
                        day_name: Style::new(),
                        day_number: SELECTED_STYLE,
                        indicator: Style::new(),
                    },
                    disabled: DayElementStyles::uniform(Style::new().add_modifier(Modifier::DIM)),
                },
            },
            ThemeVariant::Contrast => {
                let base = Style::new().fg(Color::Black).bg(Color::White);
                Theme {
                    base,
                    header: base.add_modifier(Modifier::BOLD),
                    button: base.add_modifier(Modifier::BOLD),
                    button_disabled: base.fg(Color::Gray),
                    separator: base,
                    days: DayStateStyles {
                        base: DayElementStyles {
                            day_name: base.add_modifier(Modifier::BOLD),
                            day_number: base,
                            indicator: base.fg(Color::Red),
                        },
                        today: DayElementStyles {
                            day_name: Style::new(),
                            day_number: Style::new().fg(Color::Red).add_modifier(Modifier::BOLD),
                            indicator: Style::new(),
                        },
                        selected: DayElementStyles {
                            day_name: Style::new(),
                            day_number: Style::new()
                                .fg(Color::Black)
                                .bg(Color::Yellow)
                                .add_modifier(Modifier::BOLD),
                            indicator: Style::new(),
                        },
                        disabled: DayElementStyles::uniform(Style::new().fg(Color::Gray)),
                    },
                }
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeVariant::Classic => "classic",
            ThemeVariant::Minimal => "minimal",
            ThemeVariant::Contrast => "contrast",
        }
    }
}

impl fmt::Display for ThemeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ThemeVariant {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<ThemeVariant, ThemeParseError> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(ThemeVariant::Classic),
            "minimal" => Ok(ThemeVariant::Minimal),
            "contrast" => Ok(ThemeVariant::Contrast),
            _ => Err(ThemeParseError(s.to_owned())),
        }
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("unknown theme {0:?}; expected one of classic, minimal, contrast")]
pub struct ThemeParseError(String);
