use log::Level;
use ratatui::prelude::*;

/// Colors and styles for the storefront
#[derive(Debug, Clone)]
pub struct Theme {
    // Backgrounds
    pub default_bg: Color,
    pub panel_bg: Color,
    pub modal_bg: Color,
    pub selection_bg: Color,
    pub status_bar_bg: Color,
    pub search_focused_bg: Color,

    // Product list
    pub product_name: Style,
    pub product_name_selected: Style,
    pub price: Style,
    pub category: Style,
    pub wishlisted: Style,
    pub list_header: Style,
    pub list_item_count: Style,
    pub page_current: Style,
    pub page_other: Style,

    // Panels
    pub heading: Style,
    pub text: Style,
    pub label: Style,
    pub accent: Style,
    pub empty: Style,

    // Status bar
    pub status_key: Style,
    pub status_desc: Style,

    pub search_input: Style,

    // Flash messages
    pub flash_error: Style,
    pub flash_warn: Style,
    pub flash_info: Style,

    // Modals
    pub error_text: Style,
    pub error_border: Style,
    pub confirm_text: Style,
    pub confirm_key: Style,
    pub modal_border: Style,

    pub divider: String,
    pub divider_style: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::noir()
    }
}

impl Theme {
    /// Dark background with gold accents
    pub fn noir() -> Self {
        let fg = Color::Rgb(224, 224, 224);
        let bg = Color::Rgb(18, 18, 18);
        let gold = Color::Rgb(212, 175, 55);
        let muted = Color::Rgb(150, 150, 150);

        Theme {
            default_bg: bg,
            panel_bg: bg,
            modal_bg: Color::Rgb(28, 28, 28),
            selection_bg: Color::Rgb(45, 40, 25),
            status_bar_bg: Color::Rgb(32, 32, 32),
            search_focused_bg: Color::Rgb(40, 40, 40),

            product_name: Style::default().fg(fg),
            product_name_selected: Style::default().fg(gold).add_modifier(Modifier::BOLD),
            price: Style::default().fg(gold),
            category: Style::default().fg(muted),
            wishlisted: Style::default().fg(Color::Rgb(231, 76, 60)),
            list_header: Style::default().fg(fg),
            list_item_count: Style::default().fg(muted).add_modifier(Modifier::DIM),
            page_current: Style::default().fg(bg).bg(gold).add_modifier(Modifier::BOLD),
            page_other: Style::default().fg(muted),

            heading: Style::default().fg(gold).add_modifier(Modifier::BOLD),
            text: Style::default().fg(fg),
            label: Style::default().fg(muted),
            accent: Style::default().fg(gold),
            empty: Style::default().fg(muted).add_modifier(Modifier::ITALIC),

            status_key: Style::default().fg(gold).add_modifier(Modifier::BOLD),
            status_desc: Style::default().fg(muted),

            search_input: Style::default().fg(gold),

            flash_error: Style::default().fg(Color::Rgb(231, 76, 60)),
            flash_warn: Style::default().fg(Color::Rgb(241, 196, 15)),
            flash_info: Style::default().fg(Color::Rgb(46, 204, 113)),

            error_text: Style::default().fg(fg),
            error_border: Style::default().fg(Color::Rgb(231, 76, 60)),
            confirm_text: Style::default().fg(fg),
            confirm_key: Style::default().fg(gold).add_modifier(Modifier::BOLD),
            modal_border: Style::default().fg(gold),

            divider: "│".to_string(),
            divider_style: Style::default().fg(Color::Rgb(60, 60, 60)),
        }
    }

    /// Style for a flash message of the given level
    pub fn flash_style(&self, level: Level) -> Style {
        match level {
            Level::Error => self.flash_error,
            Level::Warn => self.flash_warn,
            _ => self.flash_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_style_by_level() {
        let theme = Theme::default();
        assert_eq!(theme.flash_style(Level::Error), theme.flash_error);
        assert_eq!(theme.flash_style(Level::Warn), theme.flash_warn);
        assert_eq!(theme.flash_style(Level::Info), theme.flash_info);
        assert_eq!(theme.flash_style(Level::Debug), theme.flash_info);
    }
}
