use std::path::PathBuf;
use std::sync::Arc;

use iced::widget::image::Handle;
use iced::widget::{
    Canvas, Column, button, center, checkbox, column, container, horizontal_space, image as picture,
    mouse_area, opaque, pick_list, radio, row, stack, text, text_editor, text_input,
};
use iced::{Alignment, Color, Element, Length, Size, Task, Theme, window};
use image::imageops::{self, FilterType};
use image::RgbaImage;

use super::canvas::{CanvasEvent, PictureLayer};
use super::dialogs;
use crate::color::{parse_hex_color, to_hex};
use crate::commands::{BackgroundCommand, TextCommand, parse_font_size, parse_line_spacing};
use crate::config::AppConfig;
use crate::files::{self, StdFileSystem};
use crate::icon_palette::{IconPaletteController, PressOutcome};
use crate::resources::{IconKind, Resources, StockBackground};
use crate::scene::SceneSurface;
use crate::text::{FontBook, FontGroup, FontMenu, Justify, LOGICAL_FAMILIES, group_font_names};

const PANEL_WIDTH: f32 = 300.0;

const DEMO_TEXT: &str = "Hello World, Hello UoPeople  It's our last unit and it's exciting, \
That we have completed it and ready for  next subjects!";
const DEMO_SIZE: i64 = 36;

pub fn run_iced_app(config: AppConfig) -> iced::Result {
    let size = Size::new(
        config.canvas_width as f32 + PANEL_WIDTH + 48.0,
        config.canvas_height as f32 + 190.0,
    );
    iced::application("Sayings", SayingsApp::update, SayingsApp::view)
        .theme(SayingsApp::theme)
        .window(window::Settings {
            size,
            ..Default::default()
        })
        .run_with(move || SayingsApp::new(config))
}

struct SayingsApp {
    config: AppConfig,
    scene: SceneSurface,
    resources: Resources,
    fonts: FontBook,
    icons: IconPaletteController,
    font_groups: Vec<FontGroup>,
    font_group: Option<FontGroup>,
    stock_thumbs: Vec<(StockBackground, Handle)>,
    icon_thumbs: Vec<(IconKind, Handle)>,
    swatch: Handle,
    picture: Handle,
    dialog: Option<Dialog>,
    size_input: String,
    spacing_input: String,
    color_input: String,
    status_text: String,
    is_loading: bool,
}

enum Dialog {
    Text(text_editor::Content),
    BackgroundColor { input: String },
}

#[derive(Debug, Clone)]
enum Message {
    NewPicture,
    SaveRequested,
    SavePathPicked(Option<PathBuf>),
    Quit,
    StockBackground(StockBackground),
    CustomBackgroundRequested,
    CustomBackgroundPicked(Option<PathBuf>),
    CustomBackgroundLoaded(Result<Arc<RgbaImage>, String>),
    OpenColorDialog,
    OverlayToggled(bool),
    OpenTextDialog,
    EditorAction(text_editor::Action),
    DialogColorInput(String),
    DialogAccepted,
    DialogCancelled,
    Text(TextCommand),
    SizeInput(String),
    SizeSubmitted,
    SpacingInput(String),
    SpacingSubmitted,
    ColorInput(String),
    ColorSubmitted,
    FontGroupSelected(FontGroup),
    IconSelected(Option<IconKind>),
    Canvas(CanvasEvent),
    NoticeClosed,
}

impl From<CanvasEvent> for Message {
    fn from(event: CanvasEvent) -> Self {
        Message::Canvas(event)
    }
}

impl SayingsApp {
    fn new(config: AppConfig) -> (Self, Task<Message>) {
        let resources = Resources::with_stock_size(config.canvas_width, config.canvas_height);
        let fonts = FontBook::discover(&config.font_dirs);
        let font_groups = font_groups(&fonts.families());
        let stock_thumbs = resources
            .backgrounds()
            .iter()
            .map(|entry| (entry.background, to_handle(&entry.thumbnail)))
            .collect();
        let icon_thumbs = resources
            .icons()
            .entries()
            .iter()
            .map(|entry| (entry.kind, to_handle(&entry.bitmap)))
            .collect();

        let mut app = SayingsApp {
            icons: IconPaletteController::new(resources.icons().clone()),
            swatch: to_handle(resources.color_swatch()),
            font_group: font_groups.first().cloned(),
            font_groups,
            stock_thumbs,
            icon_thumbs,
            scene: SceneSurface::new(),
            resources,
            fonts,
            picture: Handle::from_rgba(1, 1, vec![0; 4]),
            dialog: None,
            size_input: String::new(),
            spacing_input: String::new(),
            color_input: String::new(),
            status_text: "Drag icons to move them, right-click to remove".to_string(),
            is_loading: false,
            config,
        };
        app.load_demo();
        app.sync_inputs();
        app.refresh();

        (app, Task::none())
    }

    fn load_demo(&mut self) {
        let commands = [
            TextCommand::SetText(DEMO_TEXT.to_string()),
            TextCommand::SetFontSize(DEMO_SIZE),
            TextCommand::SetJustify(Justify::Left),
        ];
        for command in commands {
            if let Err(err) = command.execute(&mut self.scene) {
                log::warn!("demo caption: {err}");
            }
        }
        BackgroundCommand::Stock(StockBackground::Mandelbrot).execute(&mut self.scene, &self.resources);
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::NewPicture => {
                self.scene.clear();
                self.icons.reset();
                self.icons.select_icon(None);
                self.font_group = self.font_groups.first().cloned();
                self.dialog = None;
                self.sync_inputs();
                self.refresh();
                self.status_text = "New picture".to_string();
                Task::none()
            }
            Message::SaveRequested => Task::perform(
                dialogs::pick_output_file(self.config.export_dir.clone()),
                Message::SavePathPicked,
            ),
            Message::SavePathPicked(Some(path)) => self.export_to(path),
            Message::SavePathPicked(None) => Task::none(),
            Message::Quit => iced::exit(),
            Message::StockBackground(stock) => {
                BackgroundCommand::Stock(stock).execute(&mut self.scene, &self.resources);
                self.refresh();
                Task::none()
            }
            Message::CustomBackgroundRequested => {
                if self.is_loading {
                    return Task::none();
                }
                Task::perform(dialogs::pick_background_file(), Message::CustomBackgroundPicked)
            }
            Message::CustomBackgroundPicked(Some(path)) => {
                self.is_loading = true;
                self.status_text = format!("Loading {}...", path.display());
                Task::perform(
                    load_background_task(path, self.config.canvas_width, self.config.canvas_height),
                    Message::CustomBackgroundLoaded,
                )
            }
            Message::CustomBackgroundPicked(None) => Task::none(),
            Message::CustomBackgroundLoaded(Ok(image)) => {
                self.is_loading = false;
                BackgroundCommand::Image(image).execute(&mut self.scene, &self.resources);
                self.status_text = "Background loaded".to_string();
                self.refresh();
                Task::none()
            }
            Message::CustomBackgroundLoaded(Err(err)) => {
                self.is_loading = false;
                self.notify(err)
            }
            Message::OpenColorDialog => {
                self.dialog = Some(Dialog::BackgroundColor {
                    input: to_hex(self.scene.background_color()),
                });
                Task::none()
            }
            Message::OverlayToggled(on) => {
                BackgroundCommand::Overlay(on).execute(&mut self.scene, &self.resources);
                self.refresh();
                Task::none()
            }
            Message::OpenTextDialog => {
                let content = text_editor::Content::with_text(self.scene.text_item().text());
                self.dialog = Some(Dialog::Text(content));
                Task::none()
            }
            Message::EditorAction(action) => {
                if let Some(Dialog::Text(content)) = &mut self.dialog {
                    content.perform(action);
                }
                Task::none()
            }
            Message::DialogColorInput(value) => {
                if let Some(Dialog::BackgroundColor { input }) = &mut self.dialog {
                    *input = value;
                }
                Task::none()
            }
            Message::DialogAccepted => self.accept_dialog(),
            Message::DialogCancelled => {
                self.dialog = None;
                Task::none()
            }
            Message::Text(command) => self.apply_text(command),
            Message::SizeInput(value) => {
                self.size_input = value;
                Task::none()
            }
            Message::SizeSubmitted => match parse_font_size(&self.size_input) {
                Ok(size) => self.apply_text(TextCommand::SetFontSize(size)),
                Err(err) => self.reject_input(err.to_string()),
            },
            Message::SpacingInput(value) => {
                self.spacing_input = value;
                Task::none()
            }
            Message::SpacingSubmitted => match parse_line_spacing(&self.spacing_input) {
                Ok(multiplier) => self.apply_text(TextCommand::SetLineSpacing(multiplier)),
                Err(err) => self.reject_input(err.to_string()),
            },
            Message::ColorInput(value) => {
                self.color_input = value;
                Task::none()
            }
            Message::ColorSubmitted => match parse_hex_color(&self.color_input) {
                Ok(color) => self.apply_text(TextCommand::SetColor(color)),
                Err(err) => self.reject_input(err.to_string()),
            },
            Message::FontGroupSelected(group) => {
                self.font_group = Some(group);
                Task::none()
            }
            Message::IconSelected(kind) => {
                self.icons.select_icon(kind);
                self.status_text = match self.icons.armed() {
                    Some(kind) => format!("Click the picture to place a {}", kind.label()),
                    None => "Drag icons to move them, right-click to remove".to_string(),
                };
                Task::none()
            }
            Message::Canvas(event) => {
                self.handle_canvas(event);
                Task::none()
            }
            Message::NoticeClosed => Task::none(),
        }
    }

    fn accept_dialog(&mut self) -> Task<Message> {
        match self.dialog.take() {
            Some(Dialog::Text(content)) => {
                let text = content.text();
                self.apply_text(TextCommand::SetText(text.trim_end_matches('\n').to_string()))
            }
            Some(Dialog::BackgroundColor { input }) => match parse_hex_color(&input) {
                Ok(color) => {
                    BackgroundCommand::Color(color).execute(&mut self.scene, &self.resources);
                    self.refresh();
                    Task::none()
                }
                Err(err) => {
                    self.dialog = Some(Dialog::BackgroundColor { input });
                    self.notify(err.to_string())
                }
            },
            None => Task::none(),
        }
    }

    fn handle_canvas(&mut self, event: CanvasEvent) {
        match event {
            CanvasEvent::Pressed { x, y } => {
                match self.icons.on_canvas_press(&mut self.scene, x, y) {
                    PressOutcome::Added(id) => {
                        log::debug!("placed icon {id:?} at ({x}, {y})");
                        self.refresh();
                    }
                    PressOutcome::DragStarted(id) => log::trace!("dragging icon {id:?}"),
                    PressOutcome::Missed => {}
                }
            }
            CanvasEvent::Dragged { dx, dy } => {
                if self.icons.on_canvas_drag(&mut self.scene, dx, dy) {
                    self.refresh();
                }
            }
            CanvasEvent::Released => self.icons.on_canvas_release(),
            CanvasEvent::RemoveAt { x, y } => {
                if self.icons.on_canvas_remove(&mut self.scene, x, y) {
                    self.refresh();
                }
            }
        }
    }

    fn apply_text(&mut self, command: TextCommand) -> Task<Message> {
        let result = command.execute(&mut self.scene);
        self.sync_inputs();
        self.refresh();
        match result {
            Ok(()) => Task::none(),
            Err(err) => self.notify(err.to_string()),
        }
    }

    /// Restores the panel inputs to the item's values and reports the bad entry.
    fn reject_input(&mut self, description: String) -> Task<Message> {
        self.sync_inputs();
        self.notify(description)
    }

    fn export_to(&mut self, path: PathBuf) -> Task<Message> {
        let rendered = self.render();
        match files::export_image(&rendered, &path, &StdFileSystem) {
            Ok(format) => {
                log::info!("saved {format:?} image to {}", path.display());
                self.status_text = format!("Saved {}", path.display());
                Task::none()
            }
            Err(err) => self.notify(err.to_string()),
        }
    }

    fn notify(&mut self, description: String) -> Task<Message> {
        log::warn!("{description}");
        self.status_text = description.clone();
        Task::perform(dialogs::show_notice(description), |_| Message::NoticeClosed)
    }

    fn sync_inputs(&mut self) {
        let item = self.scene.text_item();
        self.size_input = item.font_size().to_string();
        self.spacing_input = item.line_height_multiplier().to_string();
        self.color_input = to_hex(item.color());
    }

    fn render(&self) -> RgbaImage {
        self.scene
            .render(self.config.canvas_width, self.config.canvas_height, &self.fonts)
    }

    fn refresh(&mut self) {
        self.picture = to_handle(&self.render());
    }

    fn canvas_size(&self) -> Size {
        Size::new(self.config.canvas_width as f32, self.config.canvas_height as f32)
    }

    fn view(&self) -> Element<'_, Message> {
        let size = self.canvas_size();
        let canvas = Canvas::new(PictureLayer {
            picture: &self.picture,
            size,
            scene: &self.scene,
            armed: self.icons.armed().is_some(),
        })
        .width(Length::Fixed(size.width))
        .height(Length::Fixed(size.height));

        let content = column![
            self.toolbar(),
            row![container(canvas).padding(4), self.text_panel()].spacing(8),
            self.icon_bar(),
            text(&self.status_text).size(13),
        ]
        .spacing(8)
        .padding(8);

        match &self.dialog {
            Some(dialog) => modal(content, self.dialog_view(dialog), Message::DialogCancelled),
            None => content.into(),
        }
    }

    fn toolbar(&self) -> Element<'_, Message> {
        let mut bar = row![
            button("New").on_press(Message::NewPicture),
            button("Save Image...").on_press(Message::SaveRequested),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        for (stock, thumb) in &self.stock_thumbs {
            let label = column![
                picture(thumb.clone())
                    .width(Length::Fixed(64.0))
                    .height(Length::Fixed(48.0)),
                text(stock.name()).size(11),
            ]
            .align_x(Alignment::Center);
            bar = bar.push(
                button(label)
                    .on_press(Message::StockBackground(*stock))
                    .style(button::secondary),
            );
        }

        let color_label = row![
            picture(self.swatch.clone())
                .width(Length::Fixed(20.0))
                .height(Length::Fixed(20.0)),
            text("Color..."),
        ]
        .spacing(4)
        .align_y(Alignment::Center);

        bar.push(
            button("Custom...")
                .on_press_maybe((!self.is_loading).then_some(Message::CustomBackgroundRequested)),
        )
        .push(button(color_label).on_press(Message::OpenColorDialog))
        .push(
            checkbox("Gradient", self.scene.gradient_overlay_color().is_some())
                .on_toggle(Message::OverlayToggled),
        )
        .push(horizontal_space())
        .push(button("Quit").on_press(Message::Quit).style(button::danger))
        .into()
    }

    fn text_panel(&self) -> Element<'_, Message> {
        let item = self.scene.text_item();
        let font_names = self
            .font_group
            .as_ref()
            .map(|group| group.names.clone())
            .unwrap_or_default();

        let justify = Column::with_children(Justify::ALL.into_iter().map(|option| {
            radio(option.to_string(), option, Some(item.justify()), |j| {
                Message::Text(TextCommand::SetJustify(j))
            })
            .into()
        }))
        .spacing(4);

        column![
            text("Caption").size(18),
            button("Change Text...").on_press(Message::OpenTextDialog),
            labeled(
                "Font group",
                pick_list(
                    self.font_groups.as_slice(),
                    self.font_group.clone(),
                    Message::FontGroupSelected,
                ),
            ),
            labeled(
                "Font",
                pick_list(font_names, Some(item.font_name().to_string()), |name| {
                    Message::Text(TextCommand::SetFontName(name))
                }),
            ),
            labeled(
                "Size",
                text_input("24", &self.size_input)
                    .on_input(Message::SizeInput)
                    .on_submit(Message::SizeSubmitted),
            ),
            labeled(
                "Line spacing",
                text_input("1.0", &self.spacing_input)
                    .on_input(Message::SpacingInput)
                    .on_submit(Message::SpacingSubmitted),
            ),
            labeled(
                "Color",
                text_input("#000000", &self.color_input)
                    .on_input(Message::ColorInput)
                    .on_submit(Message::ColorSubmitted),
            ),
            row![
                checkbox("Bold", item.bold())
                    .on_toggle(|bold| Message::Text(TextCommand::SetBold(bold))),
                checkbox("Italic", item.italic())
                    .on_toggle(|italic| Message::Text(TextCommand::SetItalic(italic))),
            ]
            .spacing(12),
            justify,
        ]
        .spacing(10)
        .width(Length::Fixed(PANEL_WIDTH))
        .into()
    }

    fn icon_bar(&self) -> Element<'_, Message> {
        let armed = self.icons.armed();
        let mut bar = row![
            text("Icons"),
            button("None")
                .on_press(Message::IconSelected(None))
                .style(if armed.is_none() { button::primary } else { button::secondary }),
        ]
        .spacing(6)
        .align_y(Alignment::Center);

        for (kind, thumb) in &self.icon_thumbs {
            let selected = armed == Some(*kind);
            bar = bar.push(
                button(
                    picture(thumb.clone())
                        .width(Length::Fixed(32.0))
                        .height(Length::Fixed(32.0)),
                )
                .on_press(Message::IconSelected(Some(*kind)))
                .style(if selected { button::primary } else { button::secondary }),
            );
        }
        bar.into()
    }

    fn dialog_view<'a>(&'a self, dialog: &'a Dialog) -> Element<'a, Message> {
        let (title, body): (&str, Element<'a, Message>) = match dialog {
            Dialog::Text(content) => (
                "Enter the text",
                text_editor(content)
                    .on_action(Message::EditorAction)
                    .height(Length::Fixed(160.0))
                    .into(),
            ),
            Dialog::BackgroundColor { input } => (
                "Background color",
                text_input("#RRGGBB", input)
                    .on_input(Message::DialogColorInput)
                    .on_submit(Message::DialogAccepted)
                    .into(),
            ),
        };

        container(
            column![
                text(title).size(18),
                body,
                row![
                    horizontal_space(),
                    button("Cancel")
                        .on_press(Message::DialogCancelled)
                        .style(button::secondary),
                    button("OK").on_press(Message::DialogAccepted),
                ]
                .spacing(8),
            ]
            .spacing(12),
        )
        .width(Length::Fixed(420.0))
        .padding(16)
        .style(container::rounded_box)
        .into()
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }
}

fn labeled<'a>(label: &'a str, control: impl Into<Element<'a, Message>>) -> Element<'a, Message> {
    row![text(label).width(Length::Fixed(90.0)), control.into()]
        .spacing(6)
        .align_y(Alignment::Center)
        .into()
}

fn modal<'a>(
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    stack![
        base.into(),
        opaque(
            mouse_area(center(opaque(content)).style(|_theme| container::Style {
                background: Some(Color { a: 0.6, ..Color::BLACK }.into()),
                ..container::Style::default()
            }))
            .on_press(on_blur)
        )
    ]
    .into()
}

/// The logical families first, then whatever the system has installed.
fn font_groups(families: &[String]) -> Vec<FontGroup> {
    let mut groups = vec![FontGroup {
        label: "Default".to_string(),
        names: LOGICAL_FAMILIES.iter().map(|name| name.to_string()).collect(),
    }];
    match group_font_names(families) {
        FontMenu::Flat(names) if !names.is_empty() => groups.push(FontGroup {
            label: "Installed".to_string(),
            names,
        }),
        FontMenu::Flat(_) => {}
        FontMenu::Grouped(buckets) => groups.extend(buckets),
    }
    groups
}

fn to_handle(image: &RgbaImage) -> Handle {
    Handle::from_rgba(image.width(), image.height(), image.as_raw().clone())
}

async fn load_background_task(
    path: PathBuf,
    width: u32,
    height: u32,
) -> Result<Arc<RgbaImage>, String> {
    tokio::task::spawn_blocking(move || {
        let image = files::load_background(&path).map_err(|err| err.to_string())?;
        // Resampled once here instead of on every redraw.
        let image = if image.dimensions() == (width, height) {
            image
        } else {
            imageops::resize(&image, width, height, FilterType::Triangle)
        };
        Ok(Arc::new(image))
    })
    .await
    .map_err(|err| err.to_string())?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_families_always_come_first() {
        let groups = font_groups(&[]);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].names, vec!["Serif", "SansSerif", "Monospace"]);

        let few: Vec<String> = ["Arial", "Courier"].iter().map(|s| s.to_string()).collect();
        let groups = font_groups(&few);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].names, few);
    }

    #[test]
    fn new_picture_resets_the_font_picker() {
        let config = AppConfig {
            canvas_width: 64,
            canvas_height: 48,
            ..AppConfig::default()
        };
        let (mut app, _) = SayingsApp::new(config);
        let picked = FontGroup {
            label: "Z".to_string(),
            names: vec!["Zapfino".to_string()],
        };
        let _ = app.update(Message::FontGroupSelected(picked.clone()));
        assert_eq!(app.font_group, Some(picked));

        let _ = app.update(Message::NewPicture);
        assert_eq!(app.font_group, app.font_groups.first().cloned());
        assert_eq!(app.font_group.map(|g| g.label), Some("Default".to_string()));
    }

    #[test]
    fn many_families_are_bucketed() {
        let many: Vec<String> = (b'A'..=b'Z')
            .map(|c| format!("{} Sans", c as char))
            .collect();
        let groups = font_groups(&many);
        assert!(groups.len() > 2);
        let total: usize = groups[1..].iter().map(|g| g.names.len()).sum();
        assert_eq!(total, many.len());
    }
}
