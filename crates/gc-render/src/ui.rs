use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;
use ratatui::Frame;

/// Couleur du texte de statut (bleu électrique, comme l'overlay d'origine).
const STATUS_FG: Color = Color::Rgb(40, 0, 255);

/// Everything the status overlay needs, snapshotted once per draw so the
/// UI layer never reaches into engine internals.
pub struct StatusInfo<'a> {
    /// Source label ("video0 | 640x480 30fps", image filename, …).
    pub source: &'a str,
    /// 1-based camera position and device count.
    pub camera_index: usize,
    pub camera_count: usize,
    /// 1-based ramp position and registry size.
    pub table_index: usize,
    pub table_count: usize,
    /// Character grid dimensions.
    pub cols: u32,
    pub rows: u32,
    /// Measured FPS.
    pub fps: f64,
}

/// Dessine les lignes de statut en haut à droite du canvas.
pub fn draw_status(frame: &mut Frame, area: Rect, info: &StatusInfo) {
    let lines = vec![
        Line::from(info.source.to_string()),
        Line::from(format!(
            "Camera {}/{}",
            info.camera_index, info.camera_count
        )),
        Line::from(format!("Table: {}/{}", info.table_index, info.table_count)),
        Line::from(format!("{}x{} @ {:.0}fps", info.cols, info.rows, info.fps)),
    ];
    let height = (lines.len() as u16).min(area.height);
    let status_area = Rect::new(area.x, area.y, area.width, height);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Right)
        .style(Style::default().fg(STATUS_FG));
    frame.render_widget(paragraph, status_area);
}

/// Écran placeholder quand aucun périphérique n'est disponible : texte
/// rouge centré, la boucle continue de tourner et retente l'ouverture.
pub fn draw_disconnected(frame: &mut Frame, area: Rect) {
    // A collapsed terminal has no row to draw into.
    if area.width == 0 || area.height == 0 {
        return;
    }
    let text = "Disconnected...";
    let y = area.y + area.height / 2;
    let line_area = Rect::new(area.x, y.min(area.bottom().saturating_sub(1)), area.width, 1);

    let paragraph = Paragraph::new(Line::from(text))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Rgb(255, 0, 0)));
    frame.render_widget(paragraph, line_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn disconnected_overlay_skips_collapsed_area() {
        let mut terminal = Terminal::new(TestBackend::new(10, 0)).unwrap();
        terminal
            .draw(|frame| {
                draw_disconnected(frame, Rect::new(0, 0, 10, 0));
            })
            .unwrap();
    }

    #[test]
    fn disconnected_overlay_centers_on_middle_row() {
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        terminal
            .draw(|frame| {
                draw_disconnected(frame, frame.area());
            })
            .unwrap();

        let buf = terminal.backend().buffer();
        let row: String = (0..20u16)
            .map(|x| buf.cell((x, 2)).unwrap().symbol().to_string())
            .collect();
        assert!(row.contains("Disconnected..."));
    }
}
