//! Play-field rendering.
//!
//! Shapes come straight from the render surface. The field uses screen
//! coordinates (y down) while the ratatui canvas is y up, so y is flipped here.

use crate::core::controller::GameController;
use crate::input::GameOverMenu;
use crate::surface::{RenderSurface, Shape, ShapeCanvas, ShapeColor, ShapeKind};
use crate::ui::game_common::{
    create_game_layout, info_line, render_game_over_banner, render_info_panel_frame,
    render_status_bar,
};
use ratatui::{
    layout::Rect,
    style::Color,
    symbols::Marker,
    text::Line,
    widgets::canvas::{Canvas, Circle, Context, Points, Rectangle},
    widgets::Paragraph,
    Frame,
};

const INFO_PANEL_WIDTH: u16 = 22;

/// Terminal colour for a shape colour.
pub fn shape_color(color: ShapeColor) -> Color {
    match color {
        ShapeColor::Blue => Color::LightBlue,
        ShapeColor::Gold => Color::Yellow,
        ShapeColor::Red => Color::Red,
    }
}

/// Render the whole game screen.
pub fn render_game(
    frame: &mut Frame,
    area: Rect,
    controller: &GameController<ShapeCanvas>,
    menu: &GameOverMenu,
) {
    let layout = create_game_layout(frame, area, " Droplet Catch ", Color::Cyan, INFO_PANEL_WIDTH);

    render_play_field(frame, layout.content, controller.surface());
    render_info_panel(frame, layout.info_panel, controller);

    let model = &controller.model;
    if model.game_over {
        render_game_over_banner(frame, layout.content, model.score, model.high_score, menu);
        render_status_bar(
            frame,
            layout.status_bar,
            "A red droplet landed in the cup",
            Color::Red,
            &[("[←/→]", "Select"), ("[Enter]", "Confirm"), ("[R]", "Retry"), ("[Q]", "Quit")],
        );
    } else {
        render_status_bar(
            frame,
            layout.status_bar,
            &format!("Score: {}   High Score: {}", model.score, model.high_score),
            Color::Green,
            &[("[←/→]", "Move"), ("[Q/Esc]", "Quit")],
        );
    }
}

fn draw_shape(ctx: &mut Context, shape: &Shape, field_height: f64) {
    let color = shape_color(shape.color);
    let b = &shape.bounds;
    match shape.kind {
        ShapeKind::Oval => {
            let center = b.center();
            let y = field_height - center.y;
            ctx.draw(&Circle {
                x: center.x,
                y,
                radius: b.width() / 2.0,
                color,
            });
            // Small droplets are thinner than a braille dot; mark the centre too
            ctx.draw(&Points {
                coords: &[(center.x, y)],
                color,
            });
        }
        ShapeKind::Rectangle => {
            ctx.draw(&Rectangle {
                x: b.left,
                y: field_height - b.bottom,
                width: b.width(),
                height: b.height(),
                color,
            });
        }
    }
}

/// Render every shape on the surface, scaled to fit `area`.
fn render_play_field(frame: &mut Frame, area: Rect, surface: &ShapeCanvas) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let width = surface.width();
    let height = surface.height();

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            for shape in surface.shapes() {
                draw_shape(ctx, shape, height);
            }
        });
    frame.render_widget(canvas, area);
}

fn render_info_panel(frame: &mut Frame, area: Rect, controller: &GameController<ShapeCanvas>) {
    let inner = render_info_panel_frame(frame, area);
    if inner.height < 2 || inner.width < 4 {
        return;
    }

    let model = &controller.model;
    let lines = vec![
        info_line("Score", model.score.to_string(), Color::White),
        info_line("High Score", model.high_score.to_string(), Color::Yellow),
        Line::from(""),
        info_line("Fall speed", format!("{:.2}", model.droplet_speed), Color::Cyan),
        info_line("Droplets", controller.droplets().len().to_string(), Color::LightBlue),
        info_line("Danger", controller.danger_drops().len().to_string(), Color::Red),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::GameConfig;
    use crate::core::geometry::Coords;
    use crate::sprites::DropletKind;
    use ratatui::{backend::TestBackend, Terminal};

    fn controller() -> GameController<ShapeCanvas> {
        let config = GameConfig::default();
        let canvas = ShapeCanvas::new(config.width as f64, config.height as f64);
        GameController::new(config, canvas)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .iter()
            .map(|cell| cell.symbol().to_string())
            .collect()
    }

    #[test]
    fn test_shape_colors() {
        assert_eq!(shape_color(ShapeColor::Red), Color::Red);
        assert_eq!(shape_color(ShapeColor::Gold), Color::Yellow);
    }

    #[test]
    fn test_renders_scores_while_playing() {
        let mut c = controller();
        c.model.update_score(30);
        c.create_droplet(Coords::new(100.0, 50.0), DropletKind::Rare, 5.0);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_game(f, f.size(), &c, &GameOverMenu::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Droplet Catch"));
        assert!(text.contains("Score: 30"));
        assert!(!text.contains("Game Over"));
    }

    #[test]
    fn test_renders_game_over_banner() {
        let mut c = controller();
        let mut rng = rand::thread_rng();
        c.create_droplet(Coords::new(380.0, 570.0), DropletKind::Danger, 5.0);
        c.move_droplets(&mut rng);
        assert!(c.model.game_over);

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_game(f, f.size(), &c, &GameOverMenu::default()))
            .unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("Game Over"));
        assert!(text.contains("Retry"));
        assert!(text.contains("Quit"));
    }

    #[test]
    fn test_tiny_area_does_not_panic() {
        let c = controller();
        let mut terminal = Terminal::new(TestBackend::new(10, 4)).unwrap();
        terminal
            .draw(|f| render_game(f, f.size(), &c, &GameOverMenu::default()))
            .unwrap();
    }
}
