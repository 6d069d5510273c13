use std::fmt::Write as _;

use shelf_core::{CatalogRowView, DecoderState, SessionView};

const TITLE_WIDTH: usize = 36;
const PUBLISHER_WIDTH: usize = 20;

/// Renders the session as a block of terminal text.
pub fn render(view: &SessionView) -> String {
    let camera = match view.decoder {
        DecoderState::Idle => "off",
        DecoderState::Streaming => "scanning",
    };

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = write!(out, "Camera: {camera} | toggle: {}", view.toggle_label);
    if view.busy {
        out.push_str(" | loading...");
    }
    out.push('\n');
    let _ = writeln!(
        out,
        "Last scanned: {}",
        view.last_seen.as_deref().unwrap_or("-")
    );
    if let Some(status) = &view.status {
        let _ = writeln!(out, "{status}");
    }

    if view.rows.is_empty() {
        out.push_str("(no books yet)\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:<tw$} {:<17} {:<pw$} {:<4} {:>8} {:>8}",
        "Title",
        "ISBN",
        "Publisher",
        "Year",
        "New",
        "Used",
        tw = TITLE_WIDTH,
        pw = PUBLISHER_WIDTH
    );
    for row in &view.rows {
        out.push_str(&render_row(row));
        out.push('\n');
    }
    out
}

fn render_row(row: &CatalogRowView) -> String {
    format!(
        "{:<tw$} {:<17} {:<pw$} {:<4} {:>7}{} {:>7}{}",
        truncate(&row.title, TITLE_WIDTH),
        row.isbn,
        truncate(&row.publisher, PUBLISHER_WIDTH),
        row.year,
        row.new_price,
        trend_arrow(row.trend_new),
        row.used_price,
        trend_arrow(row.trend_used),
        tw = TITLE_WIDTH,
        pw = PUBLISHER_WIDTH
    )
}

fn trend_arrow(trend: &str) -> char {
    if trend == "up" {
        '↑'
    } else {
        '↓'
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(title: &str) -> CatalogRowView {
        CatalogRowView {
            cover_url: String::new(),
            title: title.to_string(),
            isbn: "978-0-134-19044-0".to_string(),
            publisher: "Prentice Hall".to_string(),
            year: "1988".to_string(),
            new_price: 15000,
            trend_new: "up",
            used_price: 8000,
            trend_used: "down",
            new_price_link: String::new(),
            used_price_link: String::new(),
        }
    }

    #[test]
    fn empty_session_shows_placeholder() {
        let view = SessionView {
            toggle_label: "Activate camera",
            ..SessionView::default()
        };
        let text = render(&view);
        assert!(text.contains("Camera: off | toggle: Activate camera"));
        assert!(text.contains("Last scanned: -"));
        assert!(text.contains("(no books yet)"));
    }

    #[test]
    fn rows_and_busy_marker_are_rendered() {
        let view = SessionView {
            decoder: DecoderState::Idle,
            toggle_label: "Activate again",
            last_seen: Some("9780134190440".to_string()),
            busy: true,
            status: Some("Book scanned successfully: K&R".to_string()),
            rows: vec![row("The C Programming Language")],
        };
        let text = render(&view);
        assert!(text.contains("loading..."));
        assert!(text.contains("Book scanned successfully: K&R"));
        assert!(text.contains("978-0-134-19044-0"));
        assert!(text.contains("15000↑"));
        assert!(text.contains("8000↓"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let long = "x".repeat(50);
        let cut = truncate(&long, TITLE_WIDTH);
        assert_eq!(cut.chars().count(), TITLE_WIDTH);
        assert!(cut.ends_with('…'));
    }
}
