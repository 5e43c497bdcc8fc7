use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::Theme;
use crate::app::AppMode;

const NORMAL_HINTS: &[(&[&str], &str)] = &[
    (&["j", "k"], "move"),
    (&["/"], "search"),
    (&["m", "f", "u"], "category"),
    (&["s"], "sort"),
    (&["[", "]"], "page"),
    (&["Enter"], "quick view"),
    (&["o"], "details"),
    (&["a"], "add"),
    (&["w"], "wishlist"),
    (&["W"], "saved"),
    (&["b"], "bag"),
    (&["C"], "contact"),
    (&["q"], "quit"),
];

const SEARCH_HINTS: &[(&[&str], &str)] = &[
    (&["↑", "↓"], "move"),
    (&["Esc"], "done"),
    (&["Enter"], "quick view"),
];

const QUICK_VIEW_HINTS: &[(&[&str], &str)] = &[
    (&["1", "2"], "size"),
    (&["a"], "add to bag"),
    (&["w"], "wishlist"),
    (&["j", "k"], "related"),
    (&["Enter"], "view related"),
    (&["o"], "full details"),
    (&["Esc"], "close"),
];

const DETAIL_HINTS: &[(&[&str], &str)] = &[
    (&["a"], "add to bag"),
    (&["w"], "wishlist"),
    (&["Esc"], "back"),
];

const CART_HINTS: &[(&[&str], &str)] = &[
    (&["j", "k"], "move"),
    (&["d"], "remove"),
    (&["C"], "checkout"),
    (&["Esc"], "close"),
];

const WISHLIST_HINTS: &[(&[&str], &str)] = &[
    (&["j", "k"], "move"),
    (&["Enter"], "quick view"),
    (&["a"], "add to bag"),
    (&["d"], "remove"),
    (&["D"], "clear all"),
    (&["Esc"], "back"),
];

const CONFIRM_HINTS: &[(&[&str], &str)] = &[
    (&["y"], "confirm"),
    (&["n", "Esc"], "cancel"),
];

const CONTACT_HINTS: &[(&[&str], &str)] = &[
    (&["Tab"], "next field"),
    (&["Enter"], "send"),
    (&["Esc"], "close"),
];

fn hints_for(mode: AppMode) -> &'static [(&'static [&'static str], &'static str)] {
    match mode {
        AppMode::Normal => NORMAL_HINTS,
        AppMode::Search => SEARCH_HINTS,
        AppMode::QuickView => QUICK_VIEW_HINTS,
        AppMode::Detail => DETAIL_HINTS,
        AppMode::Cart => CART_HINTS,
        AppMode::Wishlist => WISHLIST_HINTS,
        AppMode::Confirm => CONFIRM_HINTS,
        AppMode::Contact => CONTACT_HINTS,
    }
}

/// Render keyboard hints bar showing mode-specific shortcuts
pub fn render_keyboard_hints(frame: &mut Frame, area: Rect, mode: AppMode, theme: &Theme) {
    let mut hints = Vec::new();

    for (keys, description) in hints_for(mode) {
        for (i, key) in keys.iter().enumerate() {
            if i > 0 {
                hints.push(Span::styled("/", theme.status_desc.add_modifier(Modifier::DIM)));
            }
            hints.push(Span::styled(*key, theme.status_key));
        }

        hints.push(Span::raw(" "));
        hints.push(Span::styled(*description, theme.status_desc));
        hints.push(Span::raw("  "));
    }

    let paragraph =
        Paragraph::new(Line::from(hints)).style(theme.status_desc.bg(theme.status_bar_bg));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_mode_has_hints() {
        let modes = [
            AppMode::Normal,
            AppMode::Search,
            AppMode::QuickView,
            AppMode::Detail,
            AppMode::Cart,
            AppMode::Wishlist,
            AppMode::Confirm,
            AppMode::Contact,
        ];
        for mode in modes {
            assert!(!hints_for(mode).is_empty(), "{:?}", mode);
        }
    }
}
