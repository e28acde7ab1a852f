/// ## Canvas collaborator
///
/// The runtime issues drawing operations through this trait and never
/// renders anything itself. Coordinates and sizes arrive validated:
/// radii, rectangle sides and pen widths are positive, color channels
/// fit in a byte.
pub trait Canvas {
    fn move_to(&mut self, x: i64, y: i64);
    fn line_to(&mut self, x: i64, y: i64);
    fn circle(&mut self, radius: i64, filled: bool);
    fn rect(&mut self, width: i64, height: i64, filled: bool);
    fn triangle(&mut self, x: i64, y: i64);
    fn set_color(&mut self, r: u8, g: u8, b: u8);
    fn set_pen_width(&mut self, width: i64);
    fn write_text(&mut self, text: &str);
    fn clear(&mut self);
    fn reset(&mut self);
}

/// One recorded canvas operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    MoveTo(i64, i64),
    LineTo(i64, i64),
    Circle(i64, bool),
    Rect(i64, i64, bool),
    Triangle(i64, i64),
    SetColor(u8, u8, u8),
    SetPenWidth(i64),
    WriteText(String),
    Clear,
    Reset,
}

impl std::fmt::Display for DrawCall {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use DrawCall::*;
        match self {
            MoveTo(x, y) => write!(f, "moveto {} {}", x, y),
            LineTo(x, y) => write!(f, "drawto {} {}", x, y),
            Circle(r, false) => write!(f, "circle {}", r),
            Circle(r, true) => write!(f, "circle {} filled", r),
            Rect(w, h, false) => write!(f, "rect {} {}", w, h),
            Rect(w, h, true) => write!(f, "rect {} {} filled", w, h),
            Triangle(x, y) => write!(f, "tri {} {}", x, y),
            SetColor(r, g, b) => write!(f, "pen {} {} {}", r, g, b),
            SetPenWidth(w) => write!(f, "pensize {}", w),
            WriteText(s) => write!(f, "write \"{}\"", s),
            Clear => write!(f, "clear"),
            Reset => write!(f, "reset"),
        }
    }
}

/// A canvas that records every call in order. Used by the command line
/// front end and by tests.
#[derive(Debug, Default)]
pub struct Recorder {
    pub calls: Vec<DrawCall>,
}

impl Recorder {
    pub fn new() -> Recorder {
        Recorder::default()
    }
}

impl Canvas for Recorder {
    fn move_to(&mut self, x: i64, y: i64) {
        self.calls.push(DrawCall::MoveTo(x, y));
    }
    fn line_to(&mut self, x: i64, y: i64) {
        self.calls.push(DrawCall::LineTo(x, y));
    }
    fn circle(&mut self, radius: i64, filled: bool) {
        self.calls.push(DrawCall::Circle(radius, filled));
    }
    fn rect(&mut self, width: i64, height: i64, filled: bool) {
        self.calls.push(DrawCall::Rect(width, height, filled));
    }
    fn triangle(&mut self, x: i64, y: i64) {
        self.calls.push(DrawCall::Triangle(x, y));
    }
    fn set_color(&mut self, r: u8, g: u8, b: u8) {
        self.calls.push(DrawCall::SetColor(r, g, b));
    }
    fn set_pen_width(&mut self, width: i64) {
        self.calls.push(DrawCall::SetPenWidth(width));
    }
    fn write_text(&mut self, text: &str) {
        self.calls.push(DrawCall::WriteText(text.to_string()));
    }
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }
    fn reset(&mut self) {
        self.calls.push(DrawCall::Reset);
    }
}
