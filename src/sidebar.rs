// The button column on the right edge of the window.
// Visual: one black button per saver bundle, a "CLEAR!" button under them,
// and a green speed box you can click into and type digits.

use log::debug;

use crate::app::Command;
use crate::board::OFFSET_RATIO;
use crate::draw::{draw_text_5x7, fill_rect, text_width_5x7};
use crate::types::{FrameBuffer, Rect};

pub const GUI_X_RATIO: f32 = 0.91875;     // column x = window width * this
pub const GUI_BETWEEN_RATIO: f32 = 0.1;   // row pitch = window height * this
pub const GUI_WIDTH_RATIO: f32 = 0.075;   // widget width = window width * this
pub const GUI_HEIGHT_RATIO: f32 = 0.083;  // widget height = window height * this

pub const DEFAULT_SPEED: u32 = 5;
pub const SPEED_MAX_DIGITS: usize = 4;

const BUTTON_BG: u32 = 0x0000_0000;
const BUTTON_FG: u32 = 0x00FF_FFFF;
const INPUT_BG: u32 = 0x0000_FF00;
const INPUT_FOCUSED_BG: u32 = 0x00FF_0000;
const INPUT_FG: u32 = 0x0000_0000;
const SPEED_CAPTION: &str = "SPEED:";
const CLEAR_LABEL: &str = "CLEAR!";

#[derive(Clone, Debug, PartialEq)]
enum WidgetKind {
    Button { label: String, command: Command },
    SpeedInput,
}

#[derive(Clone, Debug)]
struct Widget {
    kind: WidgetKind,
    rect: Rect,
}

pub struct Sidebar {
    widgets: Vec<Widget>, // top to bottom; row index = position in this list
    speed_text: String,
    speed_focused: bool,
}

impl Sidebar {
    /// One spawn button per label (emitting `Spawn(index)`), then clear, then the speed box.
    pub fn new(labels: &[String], speed_text: &str, window_width: usize, window_height: usize) -> Self {
        let mut kinds: Vec<WidgetKind> = labels
            .iter()
            .enumerate()
            .map(|(i, label)| WidgetKind::Button { label: label.clone(), command: Command::Spawn(i) })
            .collect();
        kinds.push(WidgetKind::Button { label: CLEAR_LABEL.to_string(), command: Command::ClearSavers });
        kinds.push(WidgetKind::SpeedInput);

        let widgets = kinds.into_iter().map(|kind| Widget { kind, rect: Rect::default() }).collect();
        let speed_text = speed_text.chars().filter(char::is_ascii_digit).take(SPEED_MAX_DIGITS).collect();
        let mut sidebar = Self { widgets, speed_text, speed_focused: false };
        sidebar.resize(window_width, window_height);
        sidebar
    }

    /// Re-lay every widget for a new window size.
    pub fn resize(&mut self, window_width: usize, window_height: usize) {
        let (w, h) = (window_width as f32, window_height as f32);
        for (row, widget) in self.widgets.iter_mut().enumerate() {
            widget.rect = Rect::new(
                w * GUI_X_RATIO,
                h * OFFSET_RATIO + h * GUI_BETWEEN_RATIO * row as f32,
                w * GUI_WIDTH_RATIO,
                h * GUI_HEIGHT_RATIO,
            );
        }
    }

    /// Route a click: focuses/defocuses the speed box and returns the
    /// command of the button under the pointer, if any.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> Option<Command> {
        let mut command = None;
        let mut on_input = false;
        for widget in &self.widgets {
            if !widget.rect.contains(x, y) {
                continue;
            }
            match &widget.kind {
                WidgetKind::Button { command: c, .. } => command = Some(c.clone()),
                WidgetKind::SpeedInput => on_input = true,
            }
        }
        self.speed_focused = on_input;
        command
    }

    /// Digits only, at most four, and only while the box is focused.
    pub fn type_digit(&mut self, ch: char) {
        if self.speed_focused && ch.is_ascii_digit() && self.speed_text.len() < SPEED_MAX_DIGITS {
            self.speed_text.push(ch);
        }
    }

    pub fn backspace(&mut self) {
        if self.speed_focused {
            self.speed_text.pop();
        }
    }

    pub fn speed_text(&self) -> &str {
        &self.speed_text
    }

    pub fn is_speed_focused(&self) -> bool {
        self.speed_focused
    }

    /// The typed speed, or the default when the box is empty or zero.
    pub fn speed(&self) -> u32 {
        match self.speed_text.parse::<u32>() {
            Ok(v) if v > 0 => v,
            _ => {
                debug!("speed field \"{}\" unusable, using {DEFAULT_SPEED}", self.speed_text);
                DEFAULT_SPEED
            }
        }
    }

    pub fn render(&self, fb: &mut FrameBuffer) {
        for widget in &self.widgets {
            let r = widget.rect;
            let (x, y, w, h) = (r.x as i32, r.y as i32, r.width as i32, r.height as i32);
            match &widget.kind {
                WidgetKind::Button { label, .. } => {
                    fill_rect(fb, x, y, w, h, BUTTON_BG);
                    draw_label(fb, label, x, y, w, h, BUTTON_FG);
                }
                WidgetKind::SpeedInput => {
                    let bg = if self.speed_focused { INPUT_FOCUSED_BG } else { INPUT_BG };
                    fill_rect(fb, x, y, w, h, bg);
                    draw_label(fb, SPEED_CAPTION, x, y, w, h / 2, INPUT_FG);
                    draw_label(fb, &self.speed_text, x, y + h / 2, w, h - h / 2, INPUT_FG);
                }
            }
        }
    }
}

/// Centre `text` in the box at the biggest integer scale that fits (at least 1).
fn draw_label(fb: &mut FrameBuffer, text: &str, x: i32, y: i32, w: i32, h: i32, color: u32) {
    if text.is_empty() {
        return;
    }
    let unit = text_width_5x7(text, 1).max(1);
    let scale = ((w - 4) / unit).min((h - 4) / 7).max(1);
    let tw = text_width_5x7(text, scale);
    draw_text_5x7(fb, x + (w - tw) / 2, y + (h - 7 * scale) / 2, text, scale, color);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sidebar() -> Sidebar {
        Sidebar::new(&["waltuh".to_string(), "cat".to_string()], "5", 800, 600)
    }

    fn center(sb: &Sidebar, row: usize) -> (f32, f32) {
        let r = sb.widgets[row].rect;
        (r.x + r.width / 2.0, r.y + r.height / 2.0)
    }

    #[test]
    fn rows_follow_window_ratios() {
        let sb = sidebar();
        let r = sb.widgets[1].rect;
        assert!((r.x - 735.0).abs() < 0.01);
        assert!((r.y - 67.5).abs() < 0.01);
        assert!((r.width - 60.0).abs() < 0.01);
        assert!((r.height - 49.8).abs() < 0.01);
    }

    #[test]
    fn buttons_emit_their_commands() {
        let mut sb = sidebar();
        let (x, y) = center(&sb, 1);
        assert_eq!(sb.handle_pointer_down(x, y), Some(Command::Spawn(1)));
        let (x, y) = center(&sb, 2);
        assert_eq!(sb.handle_pointer_down(x, y), Some(Command::ClearSavers));
        assert_eq!(sb.handle_pointer_down(5.0, 5.0), None);
    }

    #[test]
    fn speed_box_only_takes_digits_while_focused() {
        let mut sb = sidebar();
        sb.type_digit('7');
        assert_eq!(sb.speed_text(), "5");

        let (x, y) = center(&sb, 3);
        assert_eq!(sb.handle_pointer_down(x, y), None);
        assert!(sb.is_speed_focused());
        for ch in ['1', 'x', '2', '3', '4'] {
            sb.type_digit(ch);
        }
        assert_eq!(sb.speed_text(), "5123");
        assert_eq!(sb.speed(), 5123);

        sb.backspace();
        assert_eq!(sb.speed_text(), "512");

        sb.handle_pointer_down(5.0, 5.0);
        assert!(!sb.is_speed_focused());
        sb.backspace();
        assert_eq!(sb.speed_text(), "512");
    }

    #[test]
    fn empty_or_zero_speed_falls_back_to_default() {
        let mut sb = Sidebar::new(&[], "0", 800, 600);
        assert_eq!(sb.speed(), DEFAULT_SPEED);
        let (x, y) = center(&sb, 1);
        sb.handle_pointer_down(x, y);
        sb.backspace();
        assert_eq!(sb.speed_text(), "");
        assert_eq!(sb.speed(), DEFAULT_SPEED);
    }

    #[test]
    fn resize_moves_the_column() {
        let mut sb = sidebar();
        sb.resize(400, 300);
        assert!((sb.widgets[0].rect.x - 367.5).abs() < 0.01);
    }

    #[test]
    fn render_paints_buttons_and_focus_color() {
        let mut sb = sidebar();
        let mut fb = FrameBuffer::new(800, 600);
        fb.clear(0x00FF_FFFF);
        sb.render(&mut fb);
        let r = sb.widgets[0].rect;
        assert_eq!(fb.get(r.x as usize + 1, r.y as usize + 1), Some(BUTTON_BG));

        let (x, y) = center(&sb, 3);
        sb.handle_pointer_down(x, y);
        sb.render(&mut fb);
        let r = sb.widgets[3].rect;
        assert_eq!(fb.get(r.x as usize + 1, r.y as usize + 1), Some(INPUT_FOCUSED_BG));
    }
}
