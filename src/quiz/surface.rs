//! An in-memory display surface.
//!
//! Questions render controls into a [`Surface`] and later read the learner's input
//! back from it. Whatever shows the surface to the learner (the chat front-end, a
//! test) calls the interaction methods (`choose`, `toggle`, `select`, `type_text`,
//! `assign`) as the learner acts.

use super::matching::MatchBoard;

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Choice {
    pub value: String,
    pub checked: bool,
}

impl Choice {
    pub fn new(value: String) -> Self {
        Self {
            value,
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Control {
    /// Radio group, at most one option checked.
    ExclusiveChoice { options: Vec<Choice> },
    /// Checkboxes, each option independent.
    Toggles { options: Vec<Choice> },
    /// Single-selection list.
    Select {
        options: Vec<String>,
        selected: Option<usize>,
    },
    TextLine { value: String },
    TextBlock { value: String },
    DragDrop(MatchBoard),
}

impl Control {
    pub fn exclusive(options: Vec<String>) -> Self {
        Control::ExclusiveChoice {
            options: options.into_iter().map(Choice::new).collect(),
        }
    }

    pub fn toggles(options: Vec<String>) -> Self {
        Control::Toggles {
            options: options.into_iter().map(Choice::new).collect(),
        }
    }

    /// Like a native `<select>`, the first option starts out selected.
    pub fn select(options: Vec<String>) -> Self {
        let selected = if options.is_empty() { None } else { Some(0) };
        Control::Select { options, selected }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Surface {
    pub heading: Option<String>,
    pub controls: Vec<Control>,
}

impl Surface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.heading = None;
        self.controls.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.heading.is_none() && self.controls.is_empty()
    }

    pub fn set_heading(&mut self, heading: String) {
        self.heading = Some(heading);
    }

    pub fn push(&mut self, control: Control) {
        self.controls.push(control);
    }

    // ---------------------- interaction ----------------------

    /// Checks `value` in the radio group, unchecking the rest.
    pub fn choose(&mut self, value: &str) -> bool {
        for control in self.controls.iter_mut() {
            if let Control::ExclusiveChoice { options } = control {
                if !options.iter().any(|o| o.value == value) {
                    continue;
                }
                for option in options.iter_mut() {
                    option.checked = option.value == value;
                }
                return true;
            }
        }
        false
    }

    /// Flips a checkbox. Returns its new state, or `None` if there is no such option.
    pub fn toggle(&mut self, value: &str) -> Option<bool> {
        for control in self.controls.iter_mut() {
            if let Control::Toggles { options } = control {
                if let Some(option) = options.iter_mut().find(|o| o.value == value) {
                    option.checked = !option.checked;
                    return Some(option.checked);
                }
            }
        }
        None
    }

    pub fn select(&mut self, value: &str) -> bool {
        for control in self.controls.iter_mut() {
            if let Control::Select { options, selected } = control {
                if let Some(idx) = options.iter().position(|o| o == value) {
                    *selected = Some(idx);
                    return true;
                }
            }
        }
        false
    }

    /// Replaces the contents of the first text input, single- or multi-line.
    pub fn type_text(&mut self, text: &str) -> bool {
        for control in self.controls.iter_mut() {
            match control {
                Control::TextLine { value } | Control::TextBlock { value } => {
                    *value = text.to_string();
                    return true;
                }
                _ => {}
            }
        }
        false
    }

    /// Drops `item` onto the drag-and-drop target at `target`.
    pub fn assign(&mut self, target: usize, item: &str) -> bool {
        for control in self.controls.iter_mut() {
            if let Control::DragDrop(board) = control {
                return board.assign(target, item);
            }
        }
        false
    }

    // ---------------------- inspection ----------------------

    pub fn checked_value(&self) -> Option<&str> {
        self.controls.iter().find_map(|control| match control {
            Control::ExclusiveChoice { options } => options
                .iter()
                .find(|o| o.checked)
                .map(|o| o.value.as_str()),
            _ => None,
        })
    }

    pub fn checked_values(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter_map(|control| match control {
                Control::Toggles { options } => Some(options),
                _ => None,
            })
            .flatten()
            .filter(|o| o.checked)
            .map(|o| o.value.as_str())
            .collect()
    }

    pub fn selected_value(&self) -> Option<&str> {
        self.controls.iter().find_map(|control| match control {
            Control::Select { options, selected } => {
                selected.and_then(|idx| options.get(idx)).map(String::as_str)
            }
            _ => None,
        })
    }

    pub fn text_line(&self) -> Option<&str> {
        self.controls.iter().find_map(|control| match control {
            Control::TextLine { value } => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn text_block(&self) -> Option<&str> {
        self.controls.iter().find_map(|control| match control {
            Control::TextBlock { value } => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn board(&self) -> Option<&MatchBoard> {
        self.controls.iter().find_map(|control| match control {
            Control::DragDrop(board) => Some(board),
            _ => None,
        })
    }
}
