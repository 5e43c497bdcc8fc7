use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use super::Theme;
use super::layout::centered_rect;
use super::preview::recent_lines;
use crate::models::{Product, ProductQuery, ProductSnapshot, QuickView, Size};

fn modal_block<'a>(title: String, theme: &'a Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.modal_border)
        .title(Span::styled(title, theme.heading))
        .style(Style::default().bg(theme.modal_bg))
        .padding(Padding::horizontal(2))
}

fn wishlist_line(wishlisted: bool, theme: &Theme) -> Line<'_> {
    if wishlisted {
        Line::from(Span::styled("♥ In your wishlist", theme.wishlisted))
    } else {
        Line::from(Span::styled("♡ Add to wishlist with w", theme.label))
    }
}

/// Render the quick view modal with size selector and related products
pub fn render_quick_view(
    frame: &mut Frame,
    area: Rect,
    quick_view: &QuickView,
    related: &[&Product],
    related_selected: usize,
    wishlisted: bool,
    theme: &Theme,
) {
    let overlay_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, overlay_area);

    let product = quick_view.product();
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            quick_view.price().to_string(),
            theme.price.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        wishlist_line(wishlisted, theme),
        Line::from(""),
    ];

    let mut sizes = vec![Span::styled("Size  ", theme.label)];
    for (i, size) in Size::ALL.iter().enumerate() {
        let style = if *size == quick_view.size() {
            theme.page_current
        } else {
            theme.page_other
        };
        sizes.push(Span::styled(format!(" {} {} ", i + 1, size.label()), style));
        sizes.push(Span::raw(" "));
    }
    lines.push(Line::from(sizes));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(product.image.clone(), theme.label)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("You May Also Like", theme.heading)));

    for (i, related_product) in related.iter().enumerate() {
        let marker = if i == related_selected { "› " } else { "  " };
        let style = if i == related_selected {
            theme.product_name_selected
        } else {
            theme.product_name
        };
        lines.push(Line::from(vec![
            Span::styled(marker, theme.accent),
            Span::styled(related_product.name.clone(), style),
            Span::raw("  "),
            Span::styled(related_product.price.to_string(), theme.price),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(modal_block(format!(" {} ", product.name), theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, overlay_area);
}

/// Render the product page opened from a product link
pub fn render_detail(
    frame: &mut Frame,
    area: Rect,
    query: &ProductQuery,
    featured: &[Product],
    recent: &[&ProductSnapshot],
    wishlisted: bool,
    theme: &Theme,
) {
    let overlay_area = centered_rect(70, 80, area);
    frame.render_widget(Clear, overlay_area);

    let name = query.name.as_deref().unwrap_or("Unknown Product");
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            query.price().to_string(),
            theme.price.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            query.image.clone().unwrap_or_default(),
            theme.label,
        )),
        Line::from(""),
        wishlist_line(wishlisted, theme),
        Line::from(""),
        Line::from(Span::styled("Related Products", theme.heading)),
    ];
    for product in featured {
        lines.push(Line::from(vec![
            Span::styled(format!("  {}", product.name), theme.text),
            Span::raw("  "),
            Span::styled(product.price.to_string(), theme.price),
        ]));
    }
    lines.push(Line::from(""));
    lines.extend(recent_lines(recent, theme));

    let paragraph = Paragraph::new(lines)
        .block(modal_block(format!(" {} ", name), theme))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, overlay_area);
}
