use crate::board::{Lane, Priority};
use crate::ui::theme::Theme;
use ratatui::style::{Modifier, Style};

/// Return the border style for active blocks.
///
pub fn active_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_active.to_color())
}

/// Return the border style for normal blocks.
///
pub fn normal_block_border_style(theme: &Theme) -> Style {
    Style::default().fg(theme.border_normal.to_color())
}

pub fn active_block_title_style() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

/// Return the style for the card under the cursor.
///
pub fn current_card_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.highlight_fg.to_color())
        .bg(theme.highlight_bg.to_color())
        .add_modifier(Modifier::BOLD)
}

/// Return the style for the card being dragged.
///
pub fn dragged_card_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.accent.to_color())
        .add_modifier(Modifier::BOLD | Modifier::REVERSED)
}

pub fn normal_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text.to_color())
}

pub fn muted_text_style(theme: &Theme) -> Style {
    Style::default().fg(theme.text_muted.to_color())
}

/// Return the style for the banner.
///
pub fn banner_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.banner.to_color())
        .add_modifier(Modifier::BOLD)
}

pub fn lane_title_style(theme: &Theme, lane: Lane) -> Style {
    let color = match lane {
        Lane::Todo => theme.lane_todo,
        Lane::InProgress => theme.lane_in_progress,
        Lane::Done => theme.lane_done,
    };
    Style::default()
        .fg(color.to_color())
        .add_modifier(Modifier::BOLD)
}

pub fn priority_style(theme: &Theme, priority: Priority) -> Style {
    let color = match priority {
        Priority::High => theme.error,
        Priority::Medium => theme.warning,
        Priority::Low => theme.info,
    };
    Style::default().fg(color.to_color())
}
