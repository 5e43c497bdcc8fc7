use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};

use super::Theme;
use crate::models::{Cart, PendingCheckout, ProductSnapshot};

/// Render the cart: line items, total and checkout state
pub fn render_cart_panel(
    frame: &mut Frame,
    area: Rect,
    cart: &Cart,
    pending: Option<&PendingCheckout>,
    selected: usize,
    focused: bool,
    theme: &Theme,
) {
    let border_style = if focused { theme.modal_border } else { theme.label };
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(border_style)
        .title(Span::styled(format!(" Shopping Bag ({}) ", cart.len()), theme.heading))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Items
            Constraint::Length(1), // Spacing
            Constraint::Length(1), // Total
            Constraint::Length(1), // Checkout status
        ])
        .split(inner);

    if cart.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Your bag is currently empty.", theme.empty)),
            chunks[0],
        );
    } else {
        let rows: Vec<Row> = cart
            .items()
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let style = if focused && i == selected {
                    theme.product_name_selected
                } else {
                    theme.product_name
                };
                let row = Row::new(vec![
                    Cell::from(Span::styled(item.title.clone(), style)),
                    Cell::from(
                        Line::from(Span::styled(item.price.to_string(), theme.price))
                            .right_aligned(),
                    ),
                ]);
                if focused && i == selected {
                    row.style(Style::default().bg(theme.selection_bg))
                } else {
                    row
                }
            })
            .collect();

        let table = Table::new(rows, [Constraint::Min(10), Constraint::Length(10)]);
        let mut state = TableState::default();
        if focused {
            state.select(Some(selected));
        }
        frame.render_stateful_widget(table, chunks[0], &mut state);
    }

    let total = Line::from(vec![
        Span::styled("Total  ", theme.label),
        Span::styled(cart.total().to_string(), theme.price.add_modifier(Modifier::BOLD)),
    ]);
    frame.render_widget(Paragraph::new(total), chunks[2]);

    if pending.is_some() {
        frame.render_widget(
            Paragraph::new(Span::styled("Processing...", theme.accent)),
            chunks[3],
        );
    }
}

/// Render the saved wishlist
pub fn render_wishlist_panel(
    frame: &mut Frame,
    area: Rect,
    items: &[ProductSnapshot],
    selected: usize,
    theme: &Theme,
) {
    let block = Block::default()
        .borders(Borders::LEFT)
        .border_style(theme.modal_border)
        .title(Span::styled(format!(" Wishlist ({}) ", items.len()), theme.heading))
        .style(Style::default().bg(theme.panel_bg));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if items.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("Your wishlist is empty.", theme.empty)),
            inner,
        );
        return;
    }

    let rows: Vec<Row> = items
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let style = if i == selected {
                theme.product_name_selected
            } else {
                theme.product_name
            };
            Row::new(vec![
                Cell::from(Span::styled("♥", theme.wishlisted)),
                Cell::from(Span::styled(product.name.clone(), style)),
                Cell::from(
                    Line::from(Span::styled(product.price.to_string(), theme.price))
                        .right_aligned(),
                ),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [Constraint::Length(2), Constraint::Min(10), Constraint::Length(10)],
    )
    .row_highlight_style(Style::default().bg(theme.selection_bg));
    let mut state = TableState::default();
    state.select(Some(selected));
    frame.render_stateful_widget(table, inner, &mut state);
}
