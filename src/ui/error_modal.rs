use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::Theme;
use super::layout::centered_rect;

/// Render error modal with dismissal instructions
pub fn render_error_modal(frame: &mut Frame, area: Rect, error_msg: &str, theme: &Theme) {
    let overlay_area = centered_rect(70, 30, area);

    // Hide underlying content
    frame.render_widget(Clear, overlay_area);

    let error_text = format!("{}\n\nPress any key to dismiss...", error_msg);

    let paragraph = Paragraph::new(error_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.error_border)
                .title(" Startup Error ")
                .style(Style::default().bg(theme.modal_bg))
                .padding(ratatui::widgets::Padding::uniform(1)),
        )
        .style(theme.error_text)
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, overlay_area);
}
