use iced::mouse::{self, Cursor};
use iced::widget::canvas::{self, Frame, Geometry, Path, Program, Stroke, event};
use iced::widget::image::{FilterMethod, Handle};
use iced::{Color, Point, Rectangle, Size, Theme};

use crate::scene::SceneSurface;

/// Pointer gestures on the picture, in picture pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasEvent {
    Pressed { x: i32, y: i32 },
    Dragged { dx: i32, dy: i32 },
    Released,
    RemoveAt { x: i32, y: i32 },
}

#[derive(Debug, Default)]
pub struct PointerState {
    /// Last reported drag position while the primary button is held.
    last: Option<(i32, i32)>,
}

/// Draws the rendered picture 1:1 and turns mouse input into [`CanvasEvent`]s.
pub struct PictureLayer<'a> {
    pub picture: &'a Handle,
    pub size: Size,
    pub scene: &'a SceneSurface,
    pub armed: bool,
}

fn to_pixel(point: Point) -> (i32, i32) {
    (point.x.floor() as i32, point.y.floor() as i32)
}

impl PictureLayer<'_> {
    fn icon_under(&self, bounds: Rectangle, cursor: Cursor) -> Option<Rectangle> {
        let (x, y) = to_pixel(cursor.position_in(bounds)?);
        let id = self.scene.find_icon_at(x, y)?;
        let icon = self.scene.icon(id)?;
        let (cx, cy) = icon.center();
        let (w, h) = icon.bitmap().dimensions();
        Some(Rectangle::new(
            Point::new(cx as f32 - w as f32 / 2.0, cy as f32 - h as f32 / 2.0),
            Size::new(w as f32, h as f32),
        ))
    }
}

impl<Message> Program<Message> for PictureLayer<'_>
where
    Message: From<CanvasEvent>,
{
    type State = PointerState;

    fn draw(
        &self,
        state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.draw_image(
            Rectangle::new(Point::ORIGIN, self.size),
            canvas::Image::new(self.picture.clone()).filter_method(FilterMethod::Nearest),
        );

        if !self.armed || state.last.is_some() {
            if let Some(outline) = self.icon_under(bounds, cursor) {
                frame.stroke(
                    &Path::rectangle(outline.position(), outline.size()),
                    Stroke::default()
                        .with_width(1.5)
                        .with_color(Color::from_rgba8(30, 120, 255, 0.9)),
                );
            }
        }

        vec![frame.into_geometry()]
    }

    fn update(
        &self,
        state: &mut Self::State,
        event: canvas::Event,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> (event::Status, Option<Message>) {
        let canvas::Event::Mouse(mouse_event) = event else {
            return (event::Status::Ignored, None);
        };

        match mouse_event {
            mouse::Event::ButtonPressed(mouse::Button::Left) => {
                let Some(position) = cursor.position_in(bounds) else {
                    return (event::Status::Ignored, None);
                };
                let (x, y) = to_pixel(position);
                state.last = Some((x, y));
                (
                    event::Status::Captured,
                    Some(CanvasEvent::Pressed { x, y }.into()),
                )
            }
            mouse::Event::ButtonPressed(mouse::Button::Right) => {
                let Some(position) = cursor.position_in(bounds) else {
                    return (event::Status::Ignored, None);
                };
                let (x, y) = to_pixel(position);
                (
                    event::Status::Captured,
                    Some(CanvasEvent::RemoveAt { x, y }.into()),
                )
            }
            mouse::Event::CursorMoved { .. } => {
                // Drags keep tracking outside the picture; the icon may leave it.
                if let Some((last_x, last_y)) = state.last
                    && let Some(global) = cursor.position()
                {
                    let (x, y) = to_pixel(Point::new(global.x - bounds.x, global.y - bounds.y));
                    if (x, y) == (last_x, last_y) {
                        return (event::Status::Captured, None);
                    }
                    state.last = Some((x, y));
                    return (
                        event::Status::Captured,
                        Some(
                            CanvasEvent::Dragged {
                                dx: x - last_x,
                                dy: y - last_y,
                            }
                            .into(),
                        ),
                    );
                }
                (event::Status::Ignored, None)
            }
            mouse::Event::ButtonReleased(mouse::Button::Left) => {
                if state.last.take().is_some() {
                    (event::Status::Captured, Some(CanvasEvent::Released.into()))
                } else {
                    (event::Status::Ignored, None)
                }
            }
            _ => (event::Status::Ignored, None),
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: Cursor,
    ) -> mouse::Interaction {
        if cursor.position_in(bounds).is_none() {
            return mouse::Interaction::default();
        }
        if self.armed {
            mouse::Interaction::Crosshair
        } else if state.last.is_some() && self.icon_under(bounds, cursor).is_some() {
            mouse::Interaction::Grabbing
        } else if self.icon_under(bounds, cursor).is_some() {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}
