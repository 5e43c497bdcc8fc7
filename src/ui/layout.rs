use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Create the storefront layout with product list, divider, side panel and keyboard hints
/// Returns [product_list_area, divider_area, side_panel_area, keyboard_hints_area]
pub fn create_main_layout(area: Rect) -> Vec<Rect> {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Main content area
            Constraint::Length(1), // Spacing before hints
            Constraint::Length(1), // Keyboard hints bar
        ])
        .split(area);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(50), // Product list
            Constraint::Length(1),      // Divider
            Constraint::Min(20),        // Side panel
        ])
        .split(main_chunks[0]);

    vec![content_chunks[0], content_chunks[1], content_chunks[2], main_chunks[2]]
}

/// Create centered rectangle for popups/overlays
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_main_layout_splits_width() {
        let chunks = create_main_layout(Rect::new(0, 0, 100, 30));
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[1].width, 1);
        assert_eq!(chunks[0].width + chunks[1].width + chunks[2].width, 100);
        assert!(chunks[2].width >= 20);
        assert_eq!(chunks[3].height, 1);
        assert_eq!(chunks[3].y, 29);
    }

    #[test]
    fn test_centered_rect_inside_area() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(60, 40, area);
        assert!(popup.x > 0 && popup.y > 0);
        assert!(popup.right() < area.right());
        assert!(popup.bottom() < area.bottom());
    }
}
