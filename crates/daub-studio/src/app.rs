use daub_engine::core::{App, AppControl, FrameCtx};
use daub_engine::coords::Viewport;
use daub_engine::input::{InputEvent, KeyState};
use daub_engine::paint::Rgba;
use daub_engine::session::PaintSession;

use crate::config::StudioConfig;
use crate::controls::{self, Control};

/// The interactive painter: one session, one canvas window.
pub struct PaintApp {
    session: PaintSession,
    background: Rgba,
    title: String,
    shown_title: String,
}

impl PaintApp {
    pub fn new(config: &StudioConfig) -> Self {
        Self {
            session: PaintSession::new(config.brush),
            background: config.background,
            title: config.title.clone(),
            shown_title: String::new(),
        }
    }

    /// Replays this frame's events in arrival order. Returns `false` when the
    /// user asked to quit; events after that are not applied.
    fn handle_events(&mut self, events: &[InputEvent], viewport: Viewport) -> bool {
        for ev in events {
            match ev {
                InputEvent::PointerButton(b) if b.is_primary_press() => {
                    self.session.pointer_down(viewport.to_ndc(b.position.x, b.position.y));
                }
                InputEvent::PointerButton(b) if b.is_primary_release() => self.session.pointer_up(),

                InputEvent::PointerMoved(m) => {
                    self.session.pointer_moved(viewport.to_ndc(m.position.x, m.position.y));
                }

                // Releases outside the window never arrive.
                InputEvent::Focused(false) => self.session.pointer_up(),

                InputEvent::Key { key, state: KeyState::Pressed, modifiers, .. } => {
                    if controls::apply_key(&mut self.session, *key, *modifiers) == Control::Quit {
                        return false;
                    }
                }

                InputEvent::MouseWheel { delta, .. } => {
                    controls::apply_wheel(&mut self.session, delta.lines_y());
                }

                _ => {}
            }
        }
        true
    }

    /// Whether this frame has to replay the display list: it changed, or the
    /// surface lost its contents.
    fn needs_repaint(&mut self, damaged: bool) -> bool {
        let dirty = self.session.take_dirty();
        dirty || damaged
    }

    fn window_title(&self) -> String {
        format!(
            "{} - {} - {} shapes",
            self.title,
            self.session.settings(),
            self.session.display_list().len()
        )
    }
}

impl App for PaintApp {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let viewport = ctx.window.viewport();
        if !ctx.input_frame.is_empty() && !self.handle_events(&ctx.input_frame.events, viewport) {
            log::info!("quit requested");
            return AppControl::Exit;
        }

        let title = self.window_title();
        if title != self.shown_title {
            ctx.window.set_title(&title);
            self.shown_title = title;
        }

        if !self.needs_repaint(ctx.damaged) {
            return AppControl::Continue;
        }
        log::debug!("repaint: {} shapes", self.session.display_list().len());

        let session = &self.session;
        let background = self.background;
        ctx.paint(|raster| session.render(raster, background))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use daub_engine::coords::Vec2;
    use daub_engine::input::{
        Key, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
    };
    use daub_engine::scene::Shape;

    const VIEWPORT: Viewport = Viewport::new(200.0, 200.0);

    fn app() -> PaintApp {
        PaintApp::new(&StudioConfig::default())
    }

    fn left(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            position: Vec2::new(x, y),
            modifiers: Modifiers::default(),
        })
    }

    fn moved(x: f32, y: f32) -> InputEvent {
        InputEvent::PointerMoved(PointerMoveEvent { position: Vec2::new(x, y) })
    }

    fn key(key: Key) -> InputEvent {
        InputEvent::Key { key, state: KeyState::Pressed, modifiers: Modifiers::default(), code: 0, repeat: false }
    }

    fn positions(app: &PaintApp) -> Vec<Vec2> {
        app.session
            .display_list()
            .iter()
            .map(|s| match s {
                Shape::Point(p) => p.position,
                other => panic!("expected points only, got {other:?}"),
            })
            .collect()
    }

    // ── event replay ────────────────────────────────────────────────────

    #[test]
    fn press_and_held_moves_stamp_in_order() {
        let mut app = app();
        let events = [
            left(MouseButtonState::Pressed, 100.0, 100.0),
            moved(150.0, 100.0),
            moved(100.0, 50.0),
            left(MouseButtonState::Released, 100.0, 50.0),
            moved(0.0, 0.0),
        ];
        assert!(app.handle_events(&events, VIEWPORT));
        assert_eq!(
            positions(&app),
            vec![Vec2::new(0.0, 0.0), Vec2::new(0.5, 0.0), Vec2::new(0.0, 0.5)]
        );
    }

    #[test]
    fn focus_loss_ends_the_drag() {
        let mut app = app();
        let events = [
            left(MouseButtonState::Pressed, 100.0, 100.0),
            moved(150.0, 100.0),
            InputEvent::Focused(false),
            moved(50.0, 50.0),
        ];
        assert!(app.handle_events(&events, VIEWPORT));
        assert_eq!(positions(&app).len(), 2);
        assert!(!app.session.primary_held());
    }

    #[test]
    fn escape_stops_the_replay() {
        let mut app = app();
        let events = [
            left(MouseButtonState::Pressed, 100.0, 100.0),
            key(Key::Escape),
            left(MouseButtonState::Pressed, 0.0, 0.0),
        ];
        assert!(!app.handle_events(&events, VIEWPORT));
        assert_eq!(positions(&app), vec![Vec2::new(0.0, 0.0)]);
    }

    #[test]
    fn other_buttons_do_not_stamp() {
        let mut app = app();
        let events = [InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Right,
            state: MouseButtonState::Pressed,
            position: Vec2::new(10.0, 10.0),
            modifiers: Modifiers::default(),
        })];
        assert!(app.handle_events(&events, VIEWPORT));
        assert!(app.session.display_list().is_empty());
    }

    // ── repaint policy ──────────────────────────────────────────────────

    #[test]
    fn repaints_only_after_changes_or_damage() {
        let mut app = app();
        // A fresh session still has to paint its background.
        assert!(app.needs_repaint(false));
        assert!(!app.needs_repaint(false));

        // Brush changes only touch the title.
        assert!(app.handle_events(&[key(Key::T)], VIEWPORT));
        assert!(!app.needs_repaint(false));

        assert!(app.needs_repaint(true));

        app.handle_events(&[left(MouseButtonState::Pressed, 1.0, 1.0)], VIEWPORT);
        assert!(app.needs_repaint(false));
        assert!(!app.needs_repaint(false));
    }

    #[test]
    fn title_reports_brush_and_shape_count() {
        let mut app = app();
        app.handle_events(&[key(Key::C), left(MouseButtonState::Pressed, 100.0, 100.0)], VIEWPORT);
        let title = app.window_title();
        assert!(title.starts_with("daub - circle"));
        assert!(title.ends_with("1 shapes"));
    }
}
