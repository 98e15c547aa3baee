//! The `courseai init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create courseai.toml
    if std::path::Path::new("courseai.toml").exists() {
        println!("courseai.toml already exists, skipping.");
    } else {
        std::fs::write("courseai.toml", SAMPLE_CONFIG)?;
        println!("Created courseai.toml");
    }

    // Create example quiz, attempt, and job list
    std::fs::create_dir_all("quizzes")?;
    for (path, content) in [
        ("quizzes/example.toml", EXAMPLE_QUIZ),
        ("quizzes/example-attempt.json", EXAMPLE_ATTEMPT),
        ("quizzes/jobs.toml", EXAMPLE_JOBS),
    ] {
        if std::path::Path::new(path).exists() {
            println!("{path} already exists, skipping.");
        } else {
            std::fs::write(path, content)?;
            println!("Created {path}");
        }
    }

    println!("\nNext steps:");
    println!("  1. Tune scoring weights and bonuses in courseai.toml");
    println!("  2. Run: courseai validate --quiz quizzes/example.toml");
    println!(
        "  3. Run: courseai grade --quiz quizzes/example.toml --attempt quizzes/example-attempt.json"
    );

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# courseai configuration

output_dir = "./courseai-results"
workers = 1

[scoring]
# Similarity at which an answer counts as passed. Answers below 0.2 always score 0.
similarity_threshold = 0.6
# Answers faster than this earn the quick-answer bonus.
time_limit_secs = 300

[scoring.difficulty_weights]
easy = 1
medium = 2
hard = 3

[scoring.bonus_points]
quick_answer = 5
no_hints = 3
"#;

const EXAMPLE_QUIZ: &str = r#"[quiz]
id = "example"
name = "Example Quiz"
description = "A short open-ended quiz to get started"
default_difficulty = "easy"

[[questions]]
id = "ownership"
prompt = "How many owners can a Rust value have at a time?"
answer = "one"
accepted_answers = ["exactly one", "a single owner"]
tags = ["ownership"]

[[questions]]
id = "borrowing"
prompt = "Which part of the compiler enforces the borrowing rules?"
answer = "the borrow checker"
difficulty = "medium"
tags = ["borrowing"]

[[questions]]
id = "drop"
prompt = "When is a value dropped?"
answer = "when its owner goes out of scope"
difficulty = "hard"
tags = ["ownership"]
"#;

const EXAMPLE_ATTEMPT: &str = r#"{
  "quizId": "example",
  "user": "demo",
  "answers": [
    { "questionId": "ownership", "answer": "exactly one", "timeSpent": 12, "hintsUsed": false },
    { "questionId": "borrowing", "answer": "borrow checker", "timeSpent": 45, "hintsUsed": true },
    { "questionId": "drop", "answer": "when the owner leaves scope", "timeSpent": 320, "hintsUsed": false }
  ]
}
"#;

const EXAMPLE_JOBS: &str = r#"[[jobs]]
name = "send-weekly-digest"
priority = 5

[[jobs]]
name = "transcode-lesson-video"
priority = 1
description = "new upload"

[[jobs]]
name = "regenerate-flashcards"
priority = 3
"#;
