//! TOML exercise bank parser.
//!
//! Loads exercise banks (exercises plus the quizzes and exams built from
//! them) from TOML files and directories, and validates them.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Choice, Difficulty, Exercise, ExerciseId, ExerciseKind, ExerciseType};

/// Intermediate TOML structure for parsing bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    exercises: Vec<TomlExercise>,
    #[serde(default)]
    quizzes: Vec<TomlQuiz>,
    #[serde(default)]
    exams: Vec<TomlExam>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    name: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlExercise {
    id: ExerciseId,
    #[serde(rename = "type")]
    exercise_type: String,
    question: String,
    #[serde(default = "default_difficulty")]
    difficulty: String,
    #[serde(default)]
    choices: Vec<TomlChoice>,
    #[serde(default)]
    possible_correct_answers: Vec<String>,
    #[serde(default)]
    first_answers: Vec<String>,
    #[serde(default)]
    second_answers: Vec<String>,
    #[serde(default)]
    answer: Option<String>,
}

fn default_difficulty() -> String {
    "normal".to_string()
}

#[derive(Debug, Deserialize)]
struct TomlChoice {
    text: String,
    #[serde(default)]
    correct: bool,
}

#[derive(Debug, Deserialize)]
struct TomlQuiz {
    id: i64,
    #[serde(default)]
    title: String,
    #[serde(default)]
    exercises: Vec<ExerciseId>,
}

#[derive(Debug, Deserialize)]
struct TomlExam {
    id: i64,
    #[serde(default)]
    section_id: Option<i64>,
    #[serde(default)]
    exercises: Vec<ExerciseId>,
}

/// A parsed exercise bank.
///
/// `exercises` holds the raw records in file order; an id may appear more
/// than once and is expected to be merged before use.
#[derive(Debug, Clone)]
pub struct ExerciseBank {
    pub id: String,
    pub name: String,
    pub description: String,
    pub exercises: Vec<Exercise>,
    pub quizzes: Vec<QuizDefinition>,
    pub exams: Vec<ExamDefinition>,
}

/// A quiz as declared in a bank: exercise ids, not exercises.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    pub id: i64,
    pub title: String,
    pub exercise_ids: Vec<ExerciseId>,
}

/// An exam as declared in a bank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExamDefinition {
    pub id: i64,
    pub section_id: Option<i64>,
    pub exercise_ids: Vec<ExerciseId>,
}

/// Parse a single TOML file into an `ExerciseBank`.
pub fn parse_bank(path: &Path) -> Result<ExerciseBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into an `ExerciseBank` (useful for testing).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<ExerciseBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let exercises = parsed
        .exercises
        .into_iter()
        .map(|e| {
            let id = e.id;
            into_exercise(e).with_context(|| {
                format!("invalid exercise {id} in {}", source_path.display())
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let quizzes = parsed
        .quizzes
        .into_iter()
        .map(|q| QuizDefinition {
            id: q.id,
            title: q.title,
            exercise_ids: q.exercises,
        })
        .collect();

    let exams = parsed
        .exams
        .into_iter()
        .map(|e| ExamDefinition {
            id: e.id,
            section_id: e.section_id,
            exercise_ids: e.exercises,
        })
        .collect();

    Ok(ExerciseBank {
        id: parsed.bank.id,
        name: parsed.bank.name,
        description: parsed.bank.description,
        exercises,
        quizzes,
        exams,
    })
}

fn into_exercise(e: TomlExercise) -> Result<Exercise> {
    let exercise_type: ExerciseType = e.exercise_type.parse()?;
    let difficulty: Difficulty = e.difficulty.parse()?;

    let kind = match exercise_type {
        ExerciseType::MultipleChoice => ExerciseKind::MultipleChoice {
            choices: e
                .choices
                .into_iter()
                .map(|c| Choice::new(c.text, c.correct))
                .collect(),
        },
        ExerciseType::FillInTheBlank => ExerciseKind::FillInTheBlank {
            possible_correct_answers: e.possible_correct_answers,
        },
        ExerciseType::Association => ExerciseKind::Association {
            first_answers: e.first_answers,
            second_answers: e.second_answers,
        },
        ExerciseType::Flashcard => ExerciseKind::Flashcard {
            answer: e.answer.unwrap_or_default(),
        },
    };

    Ok(Exercise::new(e.id, e.question, difficulty, kind)?)
}

/// Recursively load all `.toml` bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<ExerciseBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|entry| entry.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// Load a bank file, or every bank under a directory.
pub fn load_banks(path: &Path) -> Result<Vec<ExerciseBank>> {
    if path.is_dir() {
        load_bank_directory(path)
    } else {
        Ok(vec![parse_bank(path)?])
    }
}

/// A warning from bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// The exercise, quiz, or exam the warning is about (if applicable).
    pub subject: Option<String>,
    /// Warning message.
    pub message: String,
}

impl ValidationWarning {
    fn about(subject: String, message: impl Into<String>) -> Self {
        Self {
            subject: Some(subject),
            message: message.into(),
        }
    }
}

/// Validate a bank for common issues.
pub fn validate_bank(bank: &ExerciseBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    // Duplicate records are merged, but only if they agree on the variant
    let mut variants: HashMap<ExerciseId, ExerciseType> = HashMap::new();
    for exercise in &bank.exercises {
        let first = *variants
            .entry(exercise.id())
            .or_insert(exercise.exercise_type());
        if first != exercise.exercise_type() {
            warnings.push(ValidationWarning::about(
                format!("exercise {}", exercise.id()),
                format!(
                    "duplicate records mix {first} and {}; later record will be ignored",
                    exercise.exercise_type()
                ),
            ));
        }
    }

    // Multiple choice without any correct option can never be answered
    for exercise in &bank.exercises {
        if let ExerciseKind::MultipleChoice { choices } = exercise.kind() {
            if !choices.iter().any(|c| c.is_correct) {
                warnings.push(ValidationWarning::about(
                    format!("exercise {}", exercise.id()),
                    "multiple choice has no correct choice",
                ));
            }
        }
    }

    let known: HashSet<ExerciseId> = variants.keys().copied().collect();
    let collections = bank
        .quizzes
        .iter()
        .map(|q| (format!("quiz {}", q.id), &q.exercise_ids))
        .chain(
            bank.exams
                .iter()
                .map(|e| (format!("exam {}", e.id), &e.exercise_ids)),
        );

    for (subject, ids) in collections {
        if ids.is_empty() {
            warnings.push(ValidationWarning::about(subject.clone(), "has no exercises"));
        }
        for id in ids.iter().filter(|id| !known.contains(id)) {
            warnings.push(ValidationWarning::about(
                subject.clone(),
                format!("references unknown exercise {id}"),
            ));
        }
    }

    let mut seen_quizzes = HashSet::new();
    for quiz in &bank.quizzes {
        if !seen_quizzes.insert(quiz.id) {
            warnings.push(ValidationWarning::about(
                format!("quiz {}", quiz.id),
                format!("duplicate quiz ID: {}", quiz.id),
            ));
        }
    }

    let mut seen_exams = HashSet::new();
    for exam in &bank.exams {
        if !seen_exams.insert(exam.id) {
            warnings.push(ValidationWarning::about(
                format!("exam {}", exam.id),
                format!("duplicate exam ID: {}", exam.id),
            ));
        }
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use std::path::PathBuf;

    const VALID_TOML: &str = r#"
[bank]
id = "geography"
name = "Geography"
description = "Capitals and countries"

[[exercises]]
id = 1
type = "multiple_choice"
question = "Capital of France?"
difficulty = "easy"
choices = [
    { text = "Paris", correct = true },
    { text = "Berlin" },
]

[[exercises]]
id = 2
type = "fill_in_the_blank"
question = "The capital of Italy is ___"
possible_correct_answers = ["Rome"]

[[exercises]]
id = 2
type = "fill_in_the_blank"
question = "The capital of Italy is ___"
possible_correct_answers = ["Roma"]

[[exercises]]
id = 3
type = "association"
question = "Match countries to capitals"
difficulty = "hard"
first_answers = ["USA", "France"]
second_answers = ["DC", "Paris"]

[[exercises]]
id = 4
type = "flashcard"
question = "Capital of Spain"
answer = "Madrid"

[[quizzes]]
id = 1
title = "Capitals"
exercises = [1, 2, 4]

[[exams]]
id = 1
section_id = 7
exercises = [1, 3]
"#;

    #[test]
    fn parse_valid_toml() {
        let bank = parse_bank_str(VALID_TOML, &PathBuf::from("test.toml")).unwrap();
        assert_eq!(bank.id, "geography");
        assert_eq!(bank.name, "Geography");
        assert_eq!(bank.exercises.len(), 5);
        assert_eq!(bank.exercises[0].difficulty(), Difficulty::Easy);
        assert_eq!(bank.exercises[1].difficulty(), Difficulty::Normal);
        assert_eq!(bank.exercises[3].exercise_type(), ExerciseType::Association);
        assert_eq!(bank.quizzes[0].exercise_ids, vec![1, 2, 4]);
        assert_eq!(bank.exams[0].section_id, Some(7));
        assert!(validate_bank(&bank).is_empty());
    }

    #[test]
    fn parse_unknown_type_is_unsupported() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[exercises]]
id = 1
type = "essay"
question = "Discuss"
"#;
        let err = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap_err();
        let engine = err.downcast_ref::<EngineError>().unwrap();
        assert_eq!(engine, &EngineError::UnsupportedType("essay".into()));
    }

    #[test]
    fn parse_mismatched_association_fails() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[exercises]]
id = 1
type = "association"
question = "Match"
first_answers = ["a", "b"]
second_answers = ["1"]
"#;
        let err = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("differ in length"));
    }

    #[test]
    fn validate_mixed_variants_and_unknown_references() {
        let toml = r#"
[bank]
id = "b"
name = "B"

[[exercises]]
id = 1
type = "flashcard"
question = "Q"
answer = "A"

[[exercises]]
id = 1
type = "fill_in_the_blank"
question = "Q"
possible_correct_answers = ["A"]

[[exercises]]
id = 2
type = "multiple_choice"
question = "Pick"
choices = [{ text = "x" }, { text = "y" }]

[[quizzes]]
id = 1
exercises = [1, 99]

[[quizzes]]
id = 1

[[exams]]
id = 5
exercises = [2]
"#;
        let bank = parse_bank_str(toml, &PathBuf::from("test.toml")).unwrap();
        let warnings = validate_bank(&bank);
        let messages: Vec<&str> = warnings.iter().map(|w| w.message.as_str()).collect();
        assert!(messages.iter().any(|m| m.contains("mix Flashcard and FillInTheBlank")));
        assert!(messages.iter().any(|m| m.contains("no correct choice")));
        assert!(messages.iter().any(|m| m.contains("unknown exercise 99")));
        assert!(messages.iter().any(|m| m.contains("has no exercises")));
        assert!(messages.iter().any(|m| m.contains("duplicate quiz ID")));
    }

    #[test]
    fn parse_malformed_toml() {
        let bad = "this is not [valid toml }{";
        let result = parse_bank_str(bad, &PathBuf::from("bad.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn load_directory_skips_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.toml"), VALID_TOML).unwrap();
        std::fs::write(dir.path().join("broken.toml"), "[bank").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let banks = load_bank_directory(dir.path()).unwrap();
        assert_eq!(banks.len(), 1);
        assert_eq!(banks[0].id, "geography");
    }

    #[test]
    fn load_banks_accepts_file_or_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir_all(&nested).unwrap();
        let file = nested.join("geo.toml");
        std::fs::write(&file, VALID_TOML).unwrap();

        assert_eq!(load_banks(&file).unwrap().len(), 1);
        assert_eq!(load_banks(dir.path()).unwrap().len(), 1);
        assert!(load_banks(&dir.path().join("missing.toml")).is_err());
    }
}
