//! Showing a [`Surface`] in a chat and turning the learner's replies into
//! interactions with it.
//!
//! Every control becomes plain text plus reply-keyboard buttons. Pressing an option
//! button picks/toggles that option, a drag-and-drop button `2 ← item` drops the
//! item onto the second target, and any other text goes into the text input.

use crate::quiz::matching::DROP_ARROW;
use crate::quiz::{Action, Control, Surface};

pub const NEXT: &str = "Далі";
pub const FINISH: &str = "Завершити";

/// A message ready to send: text and reply-keyboard rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screen {
    pub text: String,
    pub keyboard: Vec<Vec<String>>,
}

pub fn present(surface: &Surface, header: &str, action: Option<Action>) -> Screen {
    let mut lines = vec![format!("Тест {}", header)];
    let mut keyboard = Vec::new();

    match &surface.heading {
        Some(heading) => {
            lines.push(String::new());
            lines.push(heading.clone());
        }
        None => {
            lines.push(String::new());
            lines.push("Питань немає.".to_string());
        }
    }

    for control in &surface.controls {
        lines.push(String::new());
        match control {
            Control::ExclusiveChoice { options } => {
                lines.push("Оберіть одну відповідь:".to_string());
                for option in options {
                    let mark = if option.checked { "(•)" } else { "( )" };
                    lines.push(format!("{} {}", mark, option.value));
                    keyboard.push(vec![option.value.clone()]);
                }
            }
            Control::Toggles { options } => {
                lines.push("Оберіть усі правильні відповіді:".to_string());
                for option in options {
                    let mark = if option.checked { "[x]" } else { "[ ]" };
                    lines.push(format!("{} {}", mark, option.value));
                    keyboard.push(vec![option.value.clone()]);
                }
            }
            Control::Select { options, selected } => {
                lines.push("Оберіть зі списку:".to_string());
                for (idx, option) in options.iter().enumerate() {
                    let mark = if *selected == Some(idx) { "▸" } else { "•" };
                    lines.push(format!("{} {}", mark, option));
                    keyboard.push(vec![option.clone()]);
                }
            }
            Control::TextLine { value } => {
                lines.push("Введіть відповідь одним рядком.".to_string());
                if !value.is_empty() {
                    lines.push(format!("Ваша відповідь: {}", value));
                }
            }
            Control::TextBlock { value } => {
                lines.push("Введіть відповідь (можна у кілька рядків).".to_string());
                if !value.is_empty() {
                    lines.push(format!("Ваша відповідь:\n{}", value));
                }
            }
            Control::DragDrop(board) => {
                lines.push(format!("Елементи: {}", board.items.join(", ")));
                lines.push("Цілі:".to_string());
                for (idx, target) in board.targets.iter().enumerate() {
                    lines.push(format!("{}. {}", idx + 1, target.caption()));
                    keyboard.push(
                        board
                            .items
                            .iter()
                            .map(|item| format!("{}{}{}", idx + 1, DROP_ARROW, item))
                            .collect(),
                    );
                }
            }
        }
    }

    match action {
        Some(Action::Advance) => keyboard.push(vec![NEXT.to_string()]),
        Some(Action::Finish) => keyboard.push(vec![FINISH.to_string()]),
        None => {}
    }

    Screen {
        text: lines.join("\n"),
        keyboard,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interaction {
    Chosen(String),
    Toggled { value: String, checked: bool },
    Selected(String),
    Typed,
    Assigned { target: usize, item: String },
    Ignored,
}

/// Applies one chat reply to the surface.
pub fn interact(surface: &mut Surface, text: &str) -> Interaction {
    if let Some((target, item)) = parse_drop(text) {
        if surface.assign(target, item) {
            return Interaction::Assigned {
                target,
                item: item.to_string(),
            };
        }
    }
    if surface.choose(text) {
        return Interaction::Chosen(text.to_string());
    }
    if let Some(checked) = surface.toggle(text) {
        return Interaction::Toggled {
            value: text.to_string(),
            checked,
        };
    }
    if surface.select(text) {
        return Interaction::Selected(text.to_string());
    }
    if surface.type_text(text) {
        return Interaction::Typed;
    }
    Interaction::Ignored
}

/// `"2 ← removeChild"` is target index 1 and item `removeChild`.
fn parse_drop(text: &str) -> Option<(usize, &str)> {
    let (number, item) = text.split_once(DROP_ARROW)?;
    let number: usize = number.trim().parse().ok()?;
    if number == 0 {
        return None;
    }
    Some((number - 1, item))
}
