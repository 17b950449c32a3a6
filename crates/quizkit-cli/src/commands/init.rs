//! The `quizkit init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create quizkit.toml
    if std::path::Path::new("quizkit.toml").exists() {
        println!("quizkit.toml already exists, skipping.");
    } else {
        std::fs::write("quizkit.toml", SAMPLE_CONFIG)?;
        println!("Created quizkit.toml");
    }

    // Create example bank
    std::fs::create_dir_all("banks")?;
    let example_path = std::path::Path::new("banks/example.toml");
    if example_path.exists() {
        println!("banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: quizkit validate --bank banks/example.toml");
    println!("  2. Run: quizkit export-exam --exam 1");
    println!("  3. Write a submission file and run: quizkit score --answers answers.json");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# quizkit configuration

# Exercise bank file, or a directory of bank files
bank = "./banks"

# Where `quizkit score --save` writes scored submissions
output_dir = "./quizkit-results"
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
name = "Example Bank"
description = "A small bank to get started"

[[exercises]]
id = 1
type = "multiple_choice"
question = "What is the capital of France?"
difficulty = "easy"
choices = [
    { text = "Paris", correct = true },
    { text = "Berlin" },
    { text = "Madrid" },
]

[[exercises]]
id = 2
type = "fill_in_the_blank"
question = "Water boils at ___ degrees Celsius at sea level."
possible_correct_answers = ["100", "one hundred"]

[[exercises]]
id = 3
type = "association"
question = "Match each country with its capital."
difficulty = "hard"
first_answers = ["USA", "France"]
second_answers = ["Washington, D.C.", "Paris"]

[[exercises]]
id = 4
type = "flashcard"
question = "Hola"
answer = "Hello"

[[quizzes]]
id = 1
title = "Warmup"
exercises = [1, 2, 4]

[[exams]]
id = 1
section_id = 1
exercises = [1, 2, 3, 4]
"#;
