use ratatui::layout::Position;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use tui_input::Input;

use super::Theme;
use super::layout::centered_rect;
use crate::models::{ContactField, ContactForm};

/// Render the contact form. The focused field shows the live editor value.
pub fn render_contact_form(
    frame: &mut Frame,
    area: Rect,
    form: &ContactForm,
    focused: ContactField,
    input: &Input,
    theme: &Theme,
) {
    let overlay_area = centered_rect(60, 50, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.modal_border)
        .title(Span::styled(" Get in Touch ", theme.heading))
        .style(Style::default().bg(theme.modal_bg))
        .padding(Padding::uniform(1));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let sending = form.is_sending();
    let mut lines = Vec::new();
    let mut cursor = None;

    for field in ContactField::ALL {
        let is_focused = field == focused;
        let label_style = if is_focused { theme.accent } else { theme.label };
        let label = format!("{:<9}", field.label());
        let value = if is_focused && !sending {
            input.value()
        } else {
            form.field(field)
        };

        if is_focused && !sending {
            let x = inner.x + label.len() as u16 + 1 + input.visual_cursor() as u16;
            cursor = Some(Position::new(x, inner.y + lines.len() as u16));
        }

        lines.push(Line::from(vec![
            Span::styled(label, label_style),
            Span::raw(" "),
            Span::styled(value.to_string(), theme.text),
        ]));
        lines.push(Line::from(""));
    }

    let status = if sending {
        Span::styled("Sending...", theme.accent)
    } else {
        Span::styled("Enter to send", theme.label)
    };
    lines.push(Line::from(status));

    frame.render_widget(Paragraph::new(lines), inner);

    if let Some(position) = cursor {
        frame.set_cursor_position(position);
    }
}
