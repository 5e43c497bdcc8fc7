use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Paragraph, Wrap};

use super::Theme;
use crate::logging::FlashMessage;
use crate::models::{Product, ProductSnapshot, Size};

/// Lines listing recently viewed products, newest first
pub fn recent_lines<'a>(recent: &[&ProductSnapshot], theme: &'a Theme) -> Vec<Line<'a>> {
    let mut lines = vec![Line::from(Span::styled("Recently Viewed", theme.heading))];
    if recent.is_empty() {
        lines.push(Line::from(Span::styled("Nothing viewed yet.", theme.empty)));
    }
    for product in recent {
        lines.push(Line::from(vec![
            Span::styled(product.name.clone(), theme.text),
            Span::raw("  "),
            Span::styled(product.price.to_string(), theme.price),
        ]));
    }
    lines
}

/// Render the side panel for the selected product: summary, sizes and recently viewed
pub fn render_preview(
    frame: &mut Frame,
    area: Rect,
    product: Option<&Product>,
    wishlisted: bool,
    recent: &[&ProductSnapshot],
    theme: &Theme,
) {
    let recent_height = recent.len().max(1) as u16 + 1;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),                // Product summary
            Constraint::Length(recent_height), // Recently viewed
        ])
        .split(area);

    let Some(product) = product else {
        let msg = Paragraph::new(Span::styled("No selection", theme.empty))
            .style(Style::default().bg(theme.panel_bg));
        frame.render_widget(msg, chunks[0]);
        frame.render_widget(Paragraph::new(recent_lines(recent, theme)), chunks[1]);
        return;
    };

    let heart = if wishlisted {
        Span::styled("♥ In your wishlist", theme.wishlisted)
    } else {
        Span::styled("♡ Not in your wishlist", theme.label)
    };

    let mut lines = vec![
        Line::from(Span::styled(product.name.clone(), theme.heading)),
        Line::from(vec![
            Span::styled(product.category.as_str(), theme.label),
            Span::raw("  "),
            Span::styled(product.price.to_string(), theme.price),
        ]),
        Line::from(""),
        Line::from(heart),
        Line::from(""),
        Line::from(Span::styled("Sizes", theme.label)),
    ];
    for size in Size::ALL {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<6}", size.label()), theme.text),
            Span::styled(product.price.scale(size.multiplier()).to_string(), theme.price),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(product.image.clone(), theme.label)));

    let summary = Paragraph::new(lines)
        .style(Style::default().bg(theme.panel_bg))
        .wrap(Wrap { trim: true });
    frame.render_widget(summary, chunks[0]);

    frame.render_widget(Paragraph::new(recent_lines(recent, theme)), chunks[1]);
}

/// Split the side panel into [panel, flash_area] with one row per flash message
pub fn split_flash_area(area: Rect, messages: usize) -> [Rect; 2] {
    let height = (messages as u16).min(area.height / 2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(height)])
        .split(area);
    [chunks[0], chunks[1]]
}

/// Render flash messages, newest last, colored by level
pub fn render_flash_messages(
    frame: &mut Frame,
    area: Rect,
    messages: &[FlashMessage],
    theme: &Theme,
) {
    if area.height == 0 {
        return;
    }
    let skip = messages.len().saturating_sub(area.height as usize);
    let lines: Vec<Line> = messages
        .iter()
        .skip(skip)
        .map(|msg| Line::from(Span::styled(msg.message.clone(), theme.flash_style(msg.level))))
        .collect();
    frame.render_widget(Paragraph::new(lines), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;

    #[test]
    fn test_recent_lines() {
        let theme = Theme::default();
        assert_eq!(recent_lines(&[], &theme).len(), 2);

        let ocean = ProductSnapshot::new("Ocean Mist", Price::from_cents(13000), "o.jpg");
        let lines = recent_lines(&[&ocean], &theme);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1].spans[2].content, "$130.00");
    }

    #[test]
    fn test_flash_area_capped_at_half() {
        let [panel, flash] = split_flash_area(Rect::new(0, 0, 40, 10), 8);
        assert_eq!(flash.height, 5);
        assert_eq!(panel.height, 5);

        let [_, none] = split_flash_area(Rect::new(0, 0, 40, 10), 0);
        assert_eq!(none.height, 0);
    }
}
