use std::fmt;

use crate::api::Note;

pub const EMPTY_HEADING: &str = "No notes yet";
pub const EMPTY_PROMPT: &str = "Create your first note to get started on your journey!";
pub const EMPTY_CALL_TO_ACTION: &str = "Add Your First Note";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteCard {
    pub id: String,
    pub title: String,
    pub content: String,
}

impl NoteCard {
    pub fn edit_action(&self) -> String {
        format!("edit:{}", self.id)
    }

    pub fn delete_action(&self) -> String {
        format!("delete:{}", self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Empty,
    Notes(Vec<NoteCard>),
}

pub fn render(notes: &[Note]) -> View {
    if notes.is_empty() {
        return View::Empty;
    }

    View::Notes(
        notes
            .iter()
            .map(|note| NoteCard {
                id: note.id.clone(),
                title: note.title.clone(),
                content: note.content.clone(),
            })
            .collect(),
    )
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => {
                writeln!(f, "{EMPTY_HEADING}")?;
                writeln!(f, "{EMPTY_PROMPT}")?;
                writeln!(f, "[{EMPTY_CALL_TO_ACTION}]")
            }
            Self::Notes(cards) => {
                for card in cards {
                    writeln!(f, "## {}", card.title)?;
                    writeln!(f, "{}", card.content)?;
                    writeln!(f, "[{}] [{}]", card.edit_action(), card.delete_action())?;
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}
