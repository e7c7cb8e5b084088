use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    // Primary colors
    pub primary: ColorSpec,
    pub accent: ColorSpec,
    pub banner: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub success: ColorSpec,
    pub warning: ColorSpec,
    pub error: ColorSpec,
    pub info: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Lane header colors
    pub lane_todo: ColorSpec,
    pub lane_in_progress: ColorSpec,
    pub lane_done: ColorSpec,

    // Footer mode colors
    pub footer_search: ColorSpec,
    pub footer_drag: ColorSpec,
    pub footer_confirm: ColorSpec,
    pub footer_form: ColorSpec,
    pub footer_normal: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

const fn rgb(r: u8, g: u8, b: u8) -> ColorSpec {
    ColorSpec { r, g, b }
}

/// Names of the built-in themes, in cycling order.
const THEME_NAMES: [&str; 4] = ["tokyo-night", "dracula", "catppuccin-mocha", "rose-pine-dawn"];

impl Default for Theme {
    fn default() -> Self {
        Self::tokyo_night()
    }
}

impl Theme {
    /// Tokyo Night theme.
    ///
    pub fn tokyo_night() -> Self {
        let blue = rgb(125, 207, 255);
        let green = rgb(158, 206, 106);
        let magenta = rgb(255, 159, 196);
        let yellow = rgb(255, 202, 40);
        let red = rgb(247, 118, 142);
        let comment = rgb(117, 121, 148);
        let background = rgb(26, 27, 38);
        Theme {
            name: "tokyo-night".to_string(),
            primary: blue,
            accent: magenta,
            banner: magenta,
            text: rgb(169, 177, 214),
            text_muted: comment,
            background,
            surface: rgb(36, 40, 59),
            success: green,
            warning: yellow,
            error: red,
            info: blue,
            border_active: blue,
            border_normal: comment,
            highlight_bg: blue,
            highlight_fg: background,
            lane_todo: blue,
            lane_in_progress: yellow,
            lane_done: green,
            footer_search: blue,
            footer_drag: magenta,
            footer_confirm: red,
            footer_form: yellow,
            footer_normal: rgb(0, 0, 0),
        }
    }

    /// Dracula theme.
    ///
    pub fn dracula() -> Self {
        let purple = rgb(189, 147, 249);
        let pink = rgb(255, 121, 198);
        let cyan = rgb(139, 233, 253);
        let green = rgb(80, 250, 123);
        let orange = rgb(255, 184, 108);
        let red = rgb(255, 85, 85);
        let comment = rgb(98, 114, 164);
        let background = rgb(40, 42, 54);
        Theme {
            name: "dracula".to_string(),
            primary: purple,
            accent: pink,
            banner: pink,
            text: rgb(248, 248, 242),
            text_muted: comment,
            background,
            surface: rgb(68, 71, 90),
            success: green,
            warning: orange,
            error: red,
            info: cyan,
            border_active: purple,
            border_normal: comment,
            highlight_bg: purple,
            highlight_fg: background,
            lane_todo: cyan,
            lane_in_progress: orange,
            lane_done: green,
            footer_search: cyan,
            footer_drag: pink,
            footer_confirm: red,
            footer_form: orange,
            footer_normal: background,
        }
    }

    /// Catppuccin Mocha theme.
    ///
    pub fn catppuccin_mocha() -> Self {
        let blue = rgb(137, 180, 250);
        let mauve = rgb(203, 166, 247);
        let green = rgb(166, 227, 161);
        let yellow = rgb(249, 226, 175);
        let peach = rgb(250, 179, 135);
        let red = rgb(243, 139, 168);
        let overlay = rgb(108, 112, 134);
        let base = rgb(30, 30, 46);
        Theme {
            name: "catppuccin-mocha".to_string(),
            primary: blue,
            accent: mauve,
            banner: mauve,
            text: rgb(205, 214, 244),
            text_muted: overlay,
            background: base,
            surface: rgb(49, 50, 68),
            success: green,
            warning: yellow,
            error: red,
            info: rgb(148, 226, 213),
            border_active: blue,
            border_normal: overlay,
            highlight_bg: blue,
            highlight_fg: base,
            lane_todo: blue,
            lane_in_progress: peach,
            lane_done: green,
            footer_search: blue,
            footer_drag: mauve,
            footer_confirm: red,
            footer_form: yellow,
            footer_normal: base,
        }
    }

    /// Rose Pine Dawn theme, the only light one.
    ///
    pub fn rose_pine_dawn() -> Self {
        let pine = rgb(40, 105, 131);
        let foam = rgb(86, 148, 159);
        let iris = rgb(144, 122, 169);
        let rose = rgb(215, 130, 126);
        let gold = rgb(234, 157, 52);
        let love = rgb(180, 99, 122);
        let muted = rgb(152, 147, 165);
        let base = rgb(250, 244, 237);
        Theme {
            name: "rose-pine-dawn".to_string(),
            primary: iris,
            accent: rose,
            banner: rose,
            text: rgb(87, 82, 121),
            text_muted: muted,
            background: base,
            surface: rgb(255, 250, 243),
            success: pine,
            warning: gold,
            error: love,
            info: foam,
            border_active: iris,
            border_normal: muted,
            highlight_bg: iris,
            highlight_fg: base,
            lane_todo: foam,
            lane_in_progress: gold,
            lane_done: pine,
            footer_search: foam,
            footer_drag: rose,
            footer_confirm: love,
            footer_form: gold,
            footer_normal: base,
        }
    }

    /// Get a theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "tokyo-night" => Some(Self::tokyo_night()),
            "dracula" => Some(Self::dracula()),
            "catppuccin-mocha" => Some(Self::catppuccin_mocha()),
            "rose-pine-dawn" => Some(Self::rose_pine_dawn()),
            _ => None,
        }
    }

    /// Get list of all available theme names.
    ///
    pub fn available_themes() -> Vec<String> {
        THEME_NAMES.iter().map(|name| name.to_string()).collect()
    }

    /// The theme after this one in cycling order. Unknown names restart the
    /// cycle.
    ///
    pub fn next(&self) -> Theme {
        let next = THEME_NAMES
            .iter()
            .position(|name| *name == self.name)
            .map(|i| THEME_NAMES[(i + 1) % THEME_NAMES.len()])
            .unwrap_or(THEME_NAMES[0]);
        Theme::from_name(next).unwrap_or_default()
    }
}
