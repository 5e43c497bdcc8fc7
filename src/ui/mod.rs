pub mod cart_panel;
pub mod contact;
pub mod error_modal;
pub mod layout;
pub mod preview;
pub mod product_list;
pub mod quick_view;
pub mod status;
pub mod theme;

use ratatui::prelude::*;
use ratatui::widgets::{Block, Clear, Paragraph};

pub use cart_panel::{render_cart_panel, render_wishlist_panel};
pub use contact::render_contact_form;
pub use error_modal::render_error_modal;
pub use layout::{centered_rect, create_main_layout};
pub use preview::{render_flash_messages, render_preview, split_flash_area};
pub use product_list::render_product_list;
pub use quick_view::{render_detail, render_quick_view};
pub use status::render_keyboard_hints;
pub use theme::Theme;

/// Render vertical divider line between product list and side panel
pub fn render_divider(frame: &mut Frame, area: Rect, theme: &Theme) {
    let lines: Vec<Line> = (0..area.height)
        .map(|_| Line::from(Span::styled(theme.divider.as_str(), theme.divider_style)))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

/// Render confirmation dialog overlay for clearing the wishlist
pub fn render_confirm_overlay(frame: &mut Frame, area: Rect, theme: &Theme) {
    let overlay_area = centered_rect(50, 20, area);

    frame.render_widget(Clear, overlay_area);

    let message = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Clear your wishlist?",
            theme.confirm_text.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("y", theme.confirm_key),
            Span::styled(" - Yes, clear it  ", theme.confirm_text),
            Span::styled("n", theme.confirm_key),
            Span::styled(" - No, keep it", theme.confirm_text),
        ]),
    ];

    let paragraph = Paragraph::new(message)
        .block(
            Block::default()
                .style(Style::default().bg(theme.modal_bg))
                .padding(ratatui::widgets::Padding::uniform(1)),
        )
        .alignment(ratatui::layout::Alignment::Center);

    frame.render_widget(paragraph, overlay_area);
}
