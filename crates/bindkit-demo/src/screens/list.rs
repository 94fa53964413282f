#![forbid(unsafe_code)]

//! Grouped sections plus a flat list.

use super::{ActionError, Screen, ScreenId, Transition, header};

pub struct ListScreen {
    food: Vec<&'static str>,
}

impl ListScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            food: vec!["Chicken", "Bread", "Limes", "Carrots"],
        }
    }
}

impl Default for ListScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen for ListScreen {
    fn id(&self) -> ScreenId {
        ScreenId::List
    }

    fn view_string(&self) -> String {
        let mut out = header(ScreenId::List);
        out.push_str("\nSECTION 1\n  first\n  second\nSECTION 2");
        for row in 1..3 {
            out.push_str(&format!("\n  row {row}"));
        }
        out.push('\n');
        for item in &self.food {
            out.push_str(&format!("\n  {item}"));
        }
        out
    }

    fn press(&self, action: &str) -> Result<Transition, ActionError> {
        Err(ActionError::Unknown {
            screen: ScreenId::List,
            action: action.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_sections_and_food() {
        let view = ListScreen::new().view_string();
        assert!(view.contains("row 1"));
        assert!(view.contains("row 2"));
        assert!(!view.contains("row 3"));
        assert!(view.ends_with("  Carrots"));
    }
}
