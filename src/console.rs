//! Line-oriented console front end.
//!
//! [`ConsoleSurface`] prints the displayed elements as a text frame
//! whenever the registry changed during a tick, and [`parse_command`] turns
//! typed lines into gestures:
//!
//! ```text
//! p <id>          press a button
//! t <id> [text]   set an entry's text (empty clears it)
//! m <x> <y>       move the pointer
//! down | up       pointer button
//! q               quit
//! ```

use crate::core::Highlight;
use crate::registry::{Element, ElementId, ObjectRegistry, Surface, Widget, WindowSpec};
use crate::session::Gesture;
use std::io::{self, Stdout, Write};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("'{command}' needs {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },

    #[error("'{0}' is not a number")]
    InvalidNumber(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<Gesture>, CommandError> {
    let line = line.trim();
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();

    let gesture = match command {
        "" => return Ok(None),
        "p" | "press" => Gesture::Press(element_id(first_word(rest), "p", "an element id")?),
        "t" | "type" => {
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            Gesture::Type {
                id: element_id(id, "t", "an element id")?,
                text: text.trim().to_string(),
            }
        }
        "m" | "move" => {
            let mut coords = rest.split_whitespace();
            let x = number(coords.next(), "m")?;
            let y = number(coords.next(), "m")?;
            Gesture::PointerMove { x, y }
        }
        "down" => Gesture::PointerDown,
        "up" => Gesture::PointerUp,
        "q" | "quit" => Gesture::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(gesture))
}

fn first_word(rest: &str) -> &str {
    rest.split_whitespace().next().unwrap_or("")
}

fn element_id(
    raw: &str,
    command: &'static str,
    expected: &'static str,
) -> Result<ElementId, CommandError> {
    let raw = raw.trim().trim_start_matches('#');
    if raw.is_empty() {
        return Err(CommandError::MissingArgument { command, expected });
    }
    raw.parse::<u64>()
        .map(ElementId::new)
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn number(raw: Option<&str>, command: &'static str) -> Result<i32, CommandError> {
    let raw = raw.ok_or(CommandError::MissingArgument {
        command,
        expected: "x and y coordinates",
    })?;
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// Surface that renders frames as text.
pub struct ConsoleSurface<W: Write> {
    out: W,
    dirty: bool,
    frames: u64,
}

impl ConsoleSurface<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleSurface<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            dirty: false,
            frames: 0,
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn render(&mut self, registry: &ObjectRegistry) -> io::Result<()> {
        let mut shown: Vec<&Element> = registry.displayed().collect();
        shown.sort_by_key(|e| (e.position().y, e.position().x, e.id()));

        writeln!(self.out, "---- frame {} ----", self.frames)?;
        for element in shown {
            writeln!(self.out, "{}", describe(element))?;
        }
        self.out.flush()
    }

    fn report(result: io::Result<()>) {
        if let Err(e) = result {
            warn!(error = %e, "console write failed");
        }
    }
}

fn describe(element: &Element) -> String {
    let position = element.position();
    let body = match element.widget() {
        Widget::Label { text } => text.clone(),
        Widget::Button {
            caption, highlight, ..
        } => {
            let mark = match highlight {
                Highlight::Neutral => "",
                Highlight::Selected => " *",
                Highlight::Suggested => " +",
            };
            format!("[{}]{mark}", caption.text())
        }
        Widget::Entry { value } => format!("<{value}>"),
    };
    format!(
        "{:<6} {:<6} ({:>4},{:>4})  {body}",
        element.id().to_string(),
        element.widget().kind(),
        position.x,
        position.y
    )
}

impl<W: Write> Surface for ConsoleSurface<W> {
    fn open(&mut self, window: &WindowSpec) {
        let result = writeln!(
            self.out,
            "== {} ({}x{}) ==",
            window.title, window.width, window.height
        );
        Self::report(result);
    }

    fn place(&mut self, _element: &Element) {
        self.dirty = true;
    }

    fn unplace(&mut self, _element: &Element) {
        self.dirty = true;
    }

    fn destroy(&mut self, _element: &Element) {
        self.dirty = true;
    }

    fn present(&mut self, registry: &ObjectRegistry) {
        if !self.dirty {
            return;
        }
        self.frames += 1;
        self.dirty = false;
        let result = self.render(registry);
        Self::report(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ActionCode, ActionSlot, Binding, Caption, IdAllocator, Position};

    #[test]
    fn parses_every_command() {
        assert_eq!(
            parse_command("p 12"),
            Ok(Some(Gesture::Press(ElementId::new(12))))
        );
        assert_eq!(
            parse_command("press #3"),
            Ok(Some(Gesture::Press(ElementId::new(3))))
        );
        assert_eq!(
            parse_command("t 7 1.5"),
            Ok(Some(Gesture::Type {
                id: ElementId::new(7),
                text: "1.5".into()
            }))
        );
        assert_eq!(
            parse_command("t 7"),
            Ok(Some(Gesture::Type {
                id: ElementId::new(7),
                text: String::new()
            }))
        );
        assert_eq!(
            parse_command("m 10 -4"),
            Ok(Some(Gesture::PointerMove { x: 10, y: -4 }))
        );
        assert_eq!(parse_command("down"), Ok(Some(Gesture::PointerDown)));
        assert_eq!(parse_command(" q "), Ok(Some(Gesture::Quit)));
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn rejects_bad_commands() {
        assert_eq!(
            parse_command("jump"),
            Err(CommandError::Unknown("jump".into()))
        );
        assert_eq!(
            parse_command("p"),
            Err(CommandError::MissingArgument {
                command: "p",
                expected: "an element id"
            })
        );
        assert_eq!(
            parse_command("p x"),
            Err(CommandError::InvalidNumber("x".into()))
        );
        assert!(matches!(
            parse_command("m 1"),
            Err(CommandError::MissingArgument { command: "m", .. })
        ));
    }

    #[test]
    fn renders_frame_only_after_changes() {
        let mut registry = ObjectRegistry::new();
        let mut ids = IdAllocator::new();
        let slot = ActionSlot::new();
        let label = ids.allocate();
        registry.insert(
            label,
            Position::new(10, 100),
            Widget::Label {
                text: "Choose".into(),
            },
        );
        let button = ids.allocate();
        registry.insert(
            button,
            Position::new(10, 50),
            Widget::Button {
                caption: Caption::Text("Back".into()),
                binding: Binding::new(&slot, ActionCode::new(1)),
                highlight: Highlight::Selected,
            },
        );
        registry.queue_display([label, button]);

        let mut surface = ConsoleSurface::new(Vec::new());
        registry.drain(&mut surface);
        surface.present(&registry);
        surface.present(&registry);

        assert_eq!(surface.frames(), 1);
        let text = String::from_utf8(surface.into_inner()).unwrap();
        let back = text.find("[Back] *").unwrap();
        let choose = text.find("Choose").unwrap();
        assert!(back < choose, "rows are ordered top to bottom:\n{text}");
    }
}
