use std::collections::BTreeMap;

use rand::Rng;

use super::matching::{self, MatchBoard};
use super::random;
use super::surface::{Control, Surface};

/// Dropdown answer meaning "any offered option is acceptable".
pub const EITHER: &str = "обидва";

/// One question as written in the question bank.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct QuestionRecord {
    #[serde(rename = "q")]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub answers: Vec<String>,
    #[serde(default)]
    pub correct: Option<CorrectAnswer>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub targets: Vec<String>,
    #[serde(default, rename = "correctMapping")]
    pub correct_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
    One(String),
    Many(Vec<String>),
}

impl CorrectAnswer {
    fn one(&self) -> Option<String> {
        match self {
            CorrectAnswer::One(answer) => Some(answer.clone()),
            CorrectAnswer::Many(_) => None,
        }
    }

    fn many(&self) -> Option<Vec<String>> {
        match self {
            CorrectAnswer::Many(answers) => Some(answers.clone()),
            CorrectAnswer::One(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantKind {
    SingleChoice,
    MultiChoice,
    Dropdown,
    ShortText,
    LongText,
    FillIn,
    Matching,
    Unknown(String),
}

impl VariantKind {
    pub fn parse(tag: &str) -> Self {
        match tag {
            "radio" => VariantKind::SingleChoice,
            "checkbox" => VariantKind::MultiChoice,
            "select" => VariantKind::Dropdown,
            "text" => VariantKind::ShortText,
            "textarea" => VariantKind::LongText,
            "fill" => VariantKind::FillIn,
            "drag" => VariantKind::Matching,
            other => VariantKind::Unknown(other.to_string()),
        }
    }

    pub fn tag(&self) -> &str {
        match self {
            VariantKind::SingleChoice => "radio",
            VariantKind::MultiChoice => "checkbox",
            VariantKind::Dropdown => "select",
            VariantKind::ShortText => "text",
            VariantKind::LongText => "textarea",
            VariantKind::FillIn => "fill",
            VariantKind::Matching => "drag",
            VariantKind::Unknown(tag) => tag,
        }
    }
}

/// Render-and-grade contract shared by every kind of question.
pub trait Gradable {
    /// Puts this question's controls onto an empty surface.
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, rng: &mut R);

    /// Reads the surface and says whether the answer is right.
    /// Missing input is simply wrong.
    fn check(&self, surface: &Surface) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SingleChoice {
    pub options: Vec<String>,
    pub correct: Option<String>,
}

impl Gradable for SingleChoice {
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, rng: &mut R) {
        surface.push(Control::exclusive(random::shuffle(&self.options, rng)));
    }

    fn check(&self, surface: &Surface) -> bool {
        match (surface.checked_value(), &self.correct) {
            (Some(checked), Some(correct)) => checked == correct,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MultiChoice {
    pub options: Vec<String>,
    pub correct: Option<Vec<String>>,
}

impl Gradable for MultiChoice {
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, rng: &mut R) {
        surface.push(Control::toggles(random::shuffle(&self.options, rng)));
    }

    fn check(&self, surface: &Surface) -> bool {
        let Some(correct) = &self.correct else {
            return false;
        };
        let mut selected = surface.checked_values();
        if selected.is_empty() {
            return false;
        }
        selected.sort_unstable();
        let mut expected = correct.iter().map(String::as_str).collect::<Vec<_>>();
        expected.sort_unstable();
        selected == expected
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Dropdown {
    pub options: Vec<String>,
    pub correct: Option<String>,
}

impl Gradable for Dropdown {
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, rng: &mut R) {
        surface.push(Control::select(random::shuffle(&self.options, rng)));
    }

    fn check(&self, surface: &Surface) -> bool {
        match &self.correct {
            Some(correct) if correct == EITHER => true,
            Some(correct) => surface.selected_value() == Some(correct.as_str()),
            None => false,
        }
    }
}

/// Single-line answer compared after trimming. Used by both short-text and fill-in.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShortText {
    pub correct: Option<String>,
}

impl Gradable for ShortText {
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, _rng: &mut R) {
        surface.push(Control::TextLine {
            value: String::new(),
        });
    }

    fn check(&self, surface: &Surface) -> bool {
        match (surface.text_line(), &self.correct) {
            (Some(typed), Some(correct)) if !typed.trim().is_empty() => typed.trim() == correct,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LongText {
    pub correct: Option<String>,
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

impl Gradable for LongText {
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, _rng: &mut R) {
        surface.push(Control::TextBlock {
            value: String::new(),
        });
    }

    fn check(&self, surface: &Surface) -> bool {
        match (surface.text_block(), &self.correct) {
            // an untouched block never matches, even against a blank answer key
            (Some(typed), Some(correct)) if !typed.trim().is_empty() => {
                strip_whitespace(typed) == strip_whitespace(correct)
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Matching {
    pub items: Vec<String>,
    pub targets: Vec<String>,
    pub correct_mapping: BTreeMap<String, String>,
}

impl Gradable for Matching {
    // Targets keep their declared order, items are shuffled so their position
    // gives nothing away.
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, rng: &mut R) {
        surface.push(Control::DragDrop(MatchBoard::new(
            random::shuffle(&self.items, rng),
            self.targets.clone(),
        )));
    }

    fn check(&self, surface: &Surface) -> bool {
        surface
            .board()
            .map(|board| matching::grade(board, &self.correct_mapping))
            .unwrap_or(false)
    }
}

/// A question ready to be shown, one variant per kind.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Question {
    SingleChoice(SingleChoice),
    MultiChoice(MultiChoice),
    Dropdown(Dropdown),
    ShortText(ShortText),
    LongText(LongText),
    FillIn(ShortText),
    Matching(Matching),
    /// Stands in for a kind we don't know: renders nothing, never passes.
    Inert { kind: String },
}

impl Question {
    pub fn from_record(record: &QuestionRecord) -> Self {
        let one = || record.correct.as_ref().and_then(CorrectAnswer::one);
        match VariantKind::parse(&record.kind) {
            VariantKind::SingleChoice => Question::SingleChoice(SingleChoice {
                options: record.answers.clone(),
                correct: one(),
            }),
            VariantKind::MultiChoice => Question::MultiChoice(MultiChoice {
                options: record.answers.clone(),
                correct: record.correct.as_ref().and_then(CorrectAnswer::many),
            }),
            VariantKind::Dropdown => Question::Dropdown(Dropdown {
                options: record.answers.clone(),
                correct: one(),
            }),
            VariantKind::ShortText => Question::ShortText(ShortText { correct: one() }),
            VariantKind::LongText => Question::LongText(LongText { correct: one() }),
            VariantKind::FillIn => Question::FillIn(ShortText { correct: one() }),
            VariantKind::Matching => Question::Matching(Matching {
                items: record.items.clone(),
                targets: record.targets.clone(),
                correct_mapping: record.correct_mapping.clone(),
            }),
            VariantKind::Unknown(kind) => {
                log::warn!("Unknown question type {:?}, it will always be graded wrong", kind);
                Question::Inert { kind }
            }
        }
    }

    pub fn kind(&self) -> VariantKind {
        match self {
            Question::SingleChoice(_) => VariantKind::SingleChoice,
            Question::MultiChoice(_) => VariantKind::MultiChoice,
            Question::Dropdown(_) => VariantKind::Dropdown,
            Question::ShortText(_) => VariantKind::ShortText,
            Question::LongText(_) => VariantKind::LongText,
            Question::FillIn(_) => VariantKind::FillIn,
            Question::Matching(_) => VariantKind::Matching,
            Question::Inert { kind } => VariantKind::Unknown(kind.clone()),
        }
    }
}

impl Gradable for Question {
    fn render<R: Rng + ?Sized>(&self, surface: &mut Surface, rng: &mut R) {
        match self {
            Question::SingleChoice(q) => q.render(surface, rng),
            Question::MultiChoice(q) => q.render(surface, rng),
            Question::Dropdown(q) => q.render(surface, rng),
            Question::ShortText(q) | Question::FillIn(q) => q.render(surface, rng),
            Question::LongText(q) => q.render(surface, rng),
            Question::Matching(q) => q.render(surface, rng),
            Question::Inert { .. } => {}
        }
    }

    fn check(&self, surface: &Surface) -> bool {
        match self {
            Question::SingleChoice(q) => q.check(surface),
            Question::MultiChoice(q) => q.check(surface),
            Question::Dropdown(q) => q.check(surface),
            Question::ShortText(q) | Question::FillIn(q) => q.check(surface),
            Question::LongText(q) => q.check(surface),
            Question::Matching(q) => q.check(surface),
            Question::Inert { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn strings(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    fn record(kind: &str, answers: &[&str], correct: Option<CorrectAnswer>) -> QuestionRecord {
        QuestionRecord {
            prompt: "?".to_string(),
            kind: kind.to_string(),
            answers: strings(answers),
            correct,
            ..Default::default()
        }
    }

    fn rendered(record: &QuestionRecord) -> (Question, Surface) {
        let mut rng = StdRng::seed_from_u64(11);
        let question = Question::from_record(record);
        let mut surface = Surface::new();
        question.render(&mut surface, &mut rng);
        (question, surface)
    }

    fn one(s: &str) -> Option<CorrectAnswer> {
        Some(CorrectAnswer::One(s.to_string()))
    }

    #[test]
    fn factory_picks_variant_by_tag() {
        let cases = [
            ("radio", VariantKind::SingleChoice),
            ("checkbox", VariantKind::MultiChoice),
            ("select", VariantKind::Dropdown),
            ("text", VariantKind::ShortText),
            ("textarea", VariantKind::LongText),
            ("fill", VariantKind::FillIn),
            ("drag", VariantKind::Matching),
        ];
        for (tag, kind) in cases {
            let question = Question::from_record(&record(tag, &[], None));
            assert_eq!(question.kind(), kind);
            assert_eq!(question.kind().tag(), tag);
        }
    }

    #[test]
    fn single_choice() {
        let record = record(
            "radio",
            &["getElementById", "getElementsByClassName", "querySelector"],
            one("getElementById"),
        );
        let (question, mut surface) = rendered(&record);

        assert!(!question.check(&surface));

        surface.choose("getElementsByClassName");
        assert!(!question.check(&surface));
        surface.choose("querySelector");
        assert!(!question.check(&surface));
        surface.choose("getElementById");
        assert!(question.check(&surface));
        // grading doesn't remember anything
        assert!(question.check(&surface));
    }

    #[test]
    fn single_choice_renders_every_option_once() {
        let options = ["a", "b", "c", "d"];
        let (_, surface) = rendered(&record("radio", &options, one("a")));

        match &surface.controls[..] {
            [Control::ExclusiveChoice { options: rendered }] => {
                let mut values = rendered.iter().map(|c| c.value.as_str()).collect::<Vec<_>>();
                values.sort();
                assert_eq!(values, options);
            }
            other => panic!("unexpected controls: {:?}", other),
        }
    }

    #[test]
    fn multi_choice_needs_the_exact_set() {
        let correct = Some(CorrectAnswer::Many(strings(&["removeChild", "remove"])));
        let record = record("checkbox", &["removeChild", "remove", "innerHTML"], correct);
        let (question, mut surface) = rendered(&record);

        assert!(!question.check(&surface));

        surface.toggle("remove");
        assert!(!question.check(&surface));

        surface.toggle("removeChild");
        assert!(question.check(&surface));

        surface.toggle("innerHTML");
        assert!(!question.check(&surface));
    }

    #[test]
    fn multi_choice_with_single_answer_key_never_passes() {
        let record = record("checkbox", &["a", "b"], one("a"));
        let (question, mut surface) = rendered(&record);
        surface.toggle("a");

        assert!(!question.check(&surface));
    }

    #[test]
    fn dropdown_compares_selection() {
        let record = record("select", &["appendChild", "insertBefore", "removeChild"], one("insertBefore"));
        let (question, mut surface) = rendered(&record);

        surface.select("appendChild");
        assert!(!question.check(&surface));
        surface.select("insertBefore");
        assert!(question.check(&surface));
    }

    #[test]
    fn dropdown_either_accepts_anything() {
        let record = record("select", &["innerHTML='Hello'", "textContent='Hello'"], one(EITHER));
        let (question, mut surface) = rendered(&record);

        assert!(question.check(&surface));
        surface.select("innerHTML='Hello'");
        assert!(question.check(&surface));
        surface.select("textContent='Hello'");
        assert!(question.check(&surface));
    }

    #[test]
    fn short_text_trims_but_is_otherwise_exact() {
        let record = record("text", &[], one("element.nextElementSibling;"));
        let (question, mut surface) = rendered(&record);

        assert!(!question.check(&surface));

        surface.type_text("  element.nextElementSibling;\n");
        assert!(question.check(&surface));

        surface.type_text("element.NextElementSibling;");
        assert!(!question.check(&surface));

        surface.type_text("element.nextElementSibling ;");
        assert!(!question.check(&surface));
    }

    #[test]
    fn fill_in_behaves_like_short_text() {
        let record = record("fill", &[], one("div.textContent;"));
        let (question, mut surface) = rendered(&record);

        surface.type_text(" div.textContent; ");
        assert!(question.check(&surface));
        assert_eq!(surface.text_line(), Some(" div.textContent; "));
    }

    #[test]
    fn long_text_ignores_all_whitespace() {
        let record = record(
            "textarea",
            &[],
            one("const div = document.createElement('div'); document.body.appendChild(div);"),
        );
        let (question, mut surface) = rendered(&record);

        surface.type_text("const div = document.createElement('div');\n  document.body.appendChild(div);");
        assert!(question.check(&surface));

        surface.type_text("constdiv=document.createElement('div');document.body.appendChild(div);");
        assert!(question.check(&surface));

        surface.type_text("const div = document.createElement(\"div\"); document.body.appendChild(div);");
        assert!(!question.check(&surface));
    }

    #[test]
    fn long_text_blank_is_wrong() {
        let (question, mut surface) = rendered(&record("textarea", &[], one("x")));

        assert!(!question.check(&surface));
        surface.type_text("   \n ");
        assert!(!question.check(&surface));
    }

    #[test]
    fn short_text_blank_is_wrong() {
        for kind in ["text", "fill"] {
            let (question, mut surface) = rendered(&record(kind, &[], one("")));

            assert!(!question.check(&surface), "untouched {}", kind);
            surface.type_text("  ");
            assert!(!question.check(&surface), "blank {}", kind);
        }
    }

    #[test]
    fn matching_items_are_shuffled_targets_are_not() {
        let items = strings(&["getElementById", "querySelectorAll", "removeChild"]);
        let targets = strings(&["id", "NodeList", "remove"]);
        let question = Question::from_record(&QuestionRecord {
            kind: "drag".to_string(),
            correct_mapping: items.iter().cloned().zip(targets.iter().cloned()).collect(),
            items: items.clone(),
            targets: targets.clone(),
            ..Default::default()
        });
        let mut orders = std::collections::BTreeSet::new();

        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut surface = Surface::new();
            question.render(&mut surface, &mut rng);
            let board = surface.board().unwrap();

            let mut sorted_items = board.items.clone();
            sorted_items.sort();
            assert_eq!(sorted_items, items);
            assert_eq!(
                board.targets.iter().map(|t| t.label.clone()).collect::<Vec<_>>(),
                targets
            );
            orders.insert(board.items.clone());
        }

        assert!(orders.len() > 1);
        assert!(orders.iter().any(|order| *order != items));
    }

    #[test]
    fn matching_is_all_or_nothing() {
        let items = strings(&["getElementById", "querySelectorAll", "removeChild"]);
        let targets = strings(&[
            "Повертає елемент за id",
            "Повертає NodeList всіх елементів за селектором",
            "Видаляє дочірній елемент",
        ]);
        let record = QuestionRecord {
            prompt: "Зіставте методи DOM з їх функцією".to_string(),
            kind: "drag".to_string(),
            correct_mapping: items.iter().cloned().zip(targets.iter().cloned()).collect(),
            items,
            targets,
            ..Default::default()
        };
        let (question, mut surface) = rendered(&record);

        surface.assign(0, "getElementById");
        surface.assign(1, "querySelectorAll");
        assert!(!question.check(&surface));

        surface.assign(2, "removeChild");
        assert!(question.check(&surface));
    }

    #[test]
    fn unknown_kind_is_inert() {
        let record = record("slider", &["a"], one("a"));
        let (question, surface) = rendered(&record);

        assert_eq!(question.kind(), VariantKind::Unknown("slider".to_string()));
        assert!(surface.is_empty());
        assert!(!question.check(&surface));
    }

    #[test]
    fn check_on_foreign_surface_is_false() {
        let (question, _) = rendered(&record("radio", &["a"], one("a")));
        let mut other = Surface::new();
        other.push(Control::TextLine {
            value: "a".to_string(),
        });

        assert!(!question.check(&other));
    }

    #[test]
    fn record_parses_from_bank_json() {
        let json = r#"{ "type": "checkbox", "q": "Навігаційні властивості DOM:",
            "answers": ["firstChild","lastChild"], "correct": ["firstChild","lastChild"] }"#;

        let record: QuestionRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.kind, "checkbox");
        assert_eq!(
            record.correct,
            Some(CorrectAnswer::Many(strings(&["firstChild", "lastChild"])))
        );
        assert!(record.items.is_empty());
    }
}
