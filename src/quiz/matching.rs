use std::collections::BTreeMap;

/// Separator used when a drop target shows what was dropped onto it.
pub const DROP_ARROW: &str = " ← ";

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DropTarget {
    pub label: String,
    pub item: Option<String>,
}

impl DropTarget {
    pub fn new(label: String) -> Self {
        Self { label, item: None }
    }

    /// What the learner sees on the target, e.g. `Повертає елемент за id ← getElementById`.
    pub fn caption(&self) -> String {
        match &self.item {
            Some(item) => format!("{}{}{}", self.label, DROP_ARROW, item),
            None => self.label.clone(),
        }
    }
}

/// Draggable items on one side, drop targets on the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MatchBoard {
    pub items: Vec<String>,
    pub targets: Vec<DropTarget>,
}

impl MatchBoard {
    pub fn new(items: Vec<String>, targets: Vec<String>) -> Self {
        Self {
            items,
            targets: targets.into_iter().map(DropTarget::new).collect(),
        }
    }

    /// Drops `item` onto the target at `target`.
    ///
    /// A later drop on the same target replaces the earlier one, and the same item
    /// may sit on several targets at once. Returns `false` when the target does not
    /// exist or the item is not one of the board's items.
    pub fn assign(&mut self, target: usize, item: &str) -> bool {
        if !self.items.iter().any(|i| i == item) {
            return false;
        }
        match self.targets.get_mut(target) {
            Some(slot) => {
                slot.item = Some(item.to_string());
                true
            }
            None => false,
        }
    }
}

/// All-or-nothing: every target must hold an item that maps to the target's label.
pub fn grade(board: &MatchBoard, correct_mapping: &BTreeMap<String, String>) -> bool {
    board.targets.iter().all(|target| match &target.item {
        Some(item) => correct_mapping.get(item) == Some(&target.label),
        None => false,
    })
}
