// src/quiz.rs
//
// Motor del cuestionario: validación, corrección y revisión.
// Funciones puras sobre el modelo; la UI y la persistencia viven en app/.

use crate::model::{Letter, Material, UserAnswers};
use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum QuizError {
    /// Hay preguntas sin responder; no se envían respuestas parciales.
    IncompleteSubmission,
}

impl fmt::Display for QuizError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizError::IncompleteSubmission => {
                f.write_str("Responde todas las preguntas antes de enviar")
            }
        }
    }
}

impl std::error::Error for QuizError {}

/// Resultado de la corrección: nota 0..=100 y desglose.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Score {
    pub percentage: u32,
    pub correct: usize,
    pub wrong: usize,
    pub total: usize,
}

/// Falla si alguna entrada es `None` o la longitud no coincide con el
/// número de preguntas.
pub fn validate(answers: &UserAnswers, total_questions: usize) -> Result<(), QuizError> {
    if answers.len() != total_questions || answers.iter().any(|a| a.is_none()) {
        return Err(QuizError::IncompleteSubmission);
    }
    Ok(())
}

/// Corrige por coincidencia exacta de letra, índice a índice.
/// Porcentaje redondeado al entero más cercano (mitades hacia arriba).
pub fn score(answers: &UserAnswers, answer_key: &[Letter]) -> Score {
    let total = answer_key.len();
    let correct = answer_key
        .iter()
        .enumerate()
        .filter(|(i, key)| answers.get(*i).copied().flatten() == Some(**key))
        .count();

    let percentage = if total == 0 {
        0
    } else {
        (100.0 * correct as f64 / total as f64).round() as u32
    };

    Score {
        percentage,
        correct,
        wrong: total - correct,
        total,
    }
}

/// Fila de revisión de una pregunta ya corregida.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReviewRow {
    pub number: usize, // 1-based
    pub question: String,
    pub your_answer: Option<Letter>, // None = sin responder
    pub correct: Letter,
    pub correct_text: String,
    pub is_correct: bool,
}

/// Revisión completa: una fila por pregunta, con la opción correcta en texto.
pub fn review(answers: &UserAnswers, material: &Material) -> Vec<ReviewRow> {
    material
        .questions
        .iter()
        .enumerate()
        .map(|(i, question)| {
            let correct = material.answer_key[i];
            let your_answer = answers.get(i).copied().flatten();
            ReviewRow {
                number: i + 1,
                question: question.text.clone(),
                your_answer,
                correct,
                correct_text: question.option_text(correct).unwrap_or("").to_owned(),
                is_correct: your_answer == Some(correct),
            }
        })
        .collect()
}
