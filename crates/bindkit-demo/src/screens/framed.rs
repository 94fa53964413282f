#![forbid(unsafe_code)]

//! Static screen with nested frames.

use super::{ActionError, Screen, ScreenId, Transition, header};

const BORDER_LAYERS: usize = 4;

pub struct FramedScreen;

fn nested_box(label: &str, layers: usize) -> Vec<String> {
    let mut lines = vec![format!(" {label} ")];
    for _ in 0..layers {
        let width = lines[0].chars().count();
        let edge = format!("+{}+", "-".repeat(width));
        let mut wrapped = Vec::with_capacity(lines.len() + 2);
        wrapped.push(edge.clone());
        wrapped.extend(lines.iter().map(|line| format!("|{line}|")));
        wrapped.push(edge);
        lines = wrapped;
    }
    lines
}

impl Screen for FramedScreen {
    fn id(&self) -> ScreenId {
        ScreenId::Framed
    }

    fn view_string(&self) -> String {
        let mut out = header(ScreenId::Framed);
        out.push_str("\n          Title\nSwiftUI\n");
        out.push_str(&nested_box("Borders", BORDER_LAYERS).join("\n"));
        out.push_str("\n\n[Done]");
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        match action.trim() {
            "done" => Ok(Transition::Stay),
            _ => Err(ActionError::Unknown {
                screen: ScreenId::Framed,
                action: action.to_string(),
            }),
        }
    }
}
