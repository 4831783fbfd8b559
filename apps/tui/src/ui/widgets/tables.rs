/// First row to draw so that `selected_index` stays on screen.
///
/// The view only scrolls once the selection passes the last visible row.
pub const fn scroll_offset(
    total_rows: usize,
    max_visible_rows: usize,
    selected_index: usize,
) -> usize {
    if total_rows <= max_visible_rows || selected_index < max_visible_rows {
        return 0;
    }

    selected_index + 1 - max_visible_rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_lists_never_scroll() {
        assert_eq!(scroll_offset(4, 5, 3), 0);
        assert_eq!(scroll_offset(0, 5, 0), 0);
    }

    #[test]
    fn selection_inside_first_page_keeps_top_rows() {
        for selected in 0..5 {
            assert_eq!(scroll_offset(12, 5, selected), 0);
        }
    }

    #[test]
    fn selection_past_viewport_scrolls_one_row_at_a_time() {
        let offsets: Vec<usize> = (5..12).map(|selected| scroll_offset(12, 5, selected)).collect();
        assert_eq!(offsets, vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn zero_height_viewport_does_not_underflow() {
        assert_eq!(scroll_offset(3, 0, 2), 3);
    }
}
