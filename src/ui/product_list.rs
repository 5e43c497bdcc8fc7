use ratatui::layout::{Constraint, Direction, Layout, Position};
use ratatui::prelude::*;
use ratatui::widgets::{Cell, Paragraph, Row, Table, TableState};
use tui_input::Input;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::Theme;
use crate::app::AppMode;
use crate::models::{Category, CatalogView, SortMode, ViewPage, Wishlist};

const HEART: &str = "♥";

/// Everything the product list needs from the app for one frame
pub struct ProductListRenderContext<'a> {
    pub page: &'a ViewPage,
    pub selected: usize,
    pub mode: AppMode,
    pub search_input: &'a Input,
    pub view: &'a CatalogView,
    pub wishlist: &'a Wishlist,
    pub theme: &'a Theme,
}

/// Cut `text` to fit `width` terminal columns, marking the cut with an ellipsis
fn fit_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let mut fitted = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        fitted.push(c);
        used += w;
    }
    fitted.push('…');
    fitted
}

fn filter_summary(view: &CatalogView) -> String {
    let categories: Vec<&str> = Category::ALL
        .iter()
        .filter(|c| view.is_category_selected(**c))
        .map(|c| c.as_str())
        .collect();
    let categories = if categories.is_empty() {
        "all".to_string()
    } else {
        categories.join("+")
    };
    let sort = match view.sort_mode() {
        SortMode::None => "featured",
        SortMode::PriceAsc => "price ↑",
        SortMode::PriceDesc => "price ↓",
    };
    format!("{} · {}", categories, sort)
}

fn product_rows<'a>(ctx: &ProductListRenderContext<'a>, name_width: usize) -> Vec<Row<'a>> {
    let theme = ctx.theme;
    ctx.page
        .products
        .iter()
        .enumerate()
        .map(|(i, product)| {
            let is_selected = i == ctx.selected;
            let name_style = if is_selected {
                theme.product_name_selected
            } else {
                theme.product_name
            };
            let heart = if ctx.wishlist.exists(&product.name) {
                HEART
            } else {
                ""
            };

            let row = Row::new(vec![
                Cell::from(Span::styled(heart, theme.wishlisted)),
                Cell::from(Span::styled(fit_width(&product.name, name_width), name_style)),
                Cell::from(Span::styled(product.category.as_str(), theme.category)),
                Cell::from(
                    Line::from(Span::styled(product.price.to_string(), theme.price))
                        .right_aligned(),
                ),
            ]);
            if is_selected {
                row.style(Style::default().bg(theme.selection_bg))
            } else {
                row
            }
        })
        .collect()
}

fn page_numbers_line<'a>(page: &ViewPage, theme: &'a Theme) -> Line<'a> {
    let mut spans = Vec::new();
    for number in page.page_numbers() {
        let style = if number == page.page {
            theme.page_current
        } else {
            theme.page_other
        };
        spans.push(Span::styled(format!(" {} ", number), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans).centered()
}

/// Render the catalog page with its search/filter header and pagination footer
pub fn render_product_list(frame: &mut Frame, area: Rect, ctx: ProductListRenderContext) {
    let theme = ctx.theme;
    let has_pages = ctx.page.total_pages > 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                       // Search line
            Constraint::Length(1),                       // Filters and count
            Constraint::Length(1),                       // Spacing
            Constraint::Min(1),                          // Products
            Constraint::Length(u16::from(has_pages)),    // Page numbers
        ])
        .split(area);

    // Search line, highlighted while typing
    let searching = matches!(ctx.mode, AppMode::Search);
    let query = ctx.search_input.value();
    let (search_text, search_style) = if searching || !query.is_empty() {
        (format!("/ {}", query), theme.search_input)
    } else {
        ("Shop All".to_string(), theme.heading)
    };
    let search_bg = if searching {
        theme.search_focused_bg
    } else {
        theme.panel_bg
    };
    frame.render_widget(
        Paragraph::new(Span::styled(search_text, search_style))
            .style(Style::default().bg(search_bg)),
        chunks[0],
    );

    let count_text = if ctx.page.total_pages > 1 {
        format!("{} products · page {}/{}", ctx.page.matched, ctx.page.page, ctx.page.total_pages)
    } else {
        format!("{} products", ctx.page.matched)
    };
    let header = Line::from(vec![
        Span::styled(filter_summary(ctx.view), theme.list_header),
        Span::raw("  "),
        Span::styled(count_text, theme.list_item_count),
    ]);
    frame.render_widget(Paragraph::new(header), chunks[1]);

    let list_area = chunks[3];
    if ctx.page.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled("No products match your search.", theme.empty)),
            list_area,
        );
    } else {
        // heart (2) + category (8) + price (10) + spacing (3)
        let name_width = (list_area.width as usize).saturating_sub(23).max(8);
        let rows = product_rows(&ctx, name_width);
        let widths = [
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(10),
        ];
        let table = Table::new(rows, widths).style(Style::default().bg(theme.panel_bg));

        let mut state = TableState::default();
        state.select(Some(ctx.selected));
        frame.render_stateful_widget(table, list_area, &mut state);
    }

    if has_pages {
        frame.render_widget(Paragraph::new(page_numbers_line(ctx.page, theme)), chunks[4]);
    }

    if searching {
        let cursor_x = chunks[0].x + "/ ".len() as u16 + ctx.search_input.visual_cursor() as u16;
        frame.set_cursor_position(Position::new(cursor_x, chunks[0].y));
    }
}
