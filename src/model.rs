use serde::{Deserialize, Serialize};
use std::fmt;

/// Letra posicional de una opción (A..E). Se serializa como "A", "B", ...
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
}

impl Letter {
    pub const ALL: [Letter; 5] = [Letter::A, Letter::B, Letter::C, Letter::D, Letter::E];

    /// Letra correspondiente a la posición de una opción (0 -> A).
    pub fn from_index(idx: usize) -> Option<Letter> {
        Letter::ALL.get(idx).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Letter::A => "A",
            Letter::B => "B",
            Letter::C => "C",
            Letter::D => "D",
            Letter::E => "E",
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Respuestas del usuario, alineadas por índice con las preguntas.
/// `None` significa sin responder.
pub type UserAnswers = Vec<Option<Letter>>;

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Question {
    pub text: String,
    pub options: Vec<String>, // 2..=5 opciones, letradas A, B, C, ... por posición
}

impl Question {
    /// Texto de la opción que corresponde a una letra, si existe.
    pub fn option_text(&self, letter: Letter) -> Option<&str> {
        self.options.get(letter.index()).map(String::as_str)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Material {
    pub id: String,
    pub title: String,
    pub description: String, // puede contener saltos de línea
    pub video_ref: String,
    pub questions: Vec<Question>,
    pub answer_key: Vec<Letter>, // answer_key[i] corresponde a questions[i]
}

/// Fase de progreso de un material, derivada del almacenamiento
/// cada vez que el material pasa a ser el actual.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MaterialPhase {
    #[default]
    VideoPending,
    QuizPending,
    QuizCompleted,
}
