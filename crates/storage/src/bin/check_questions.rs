//! Validates a question bank file without launching the game.

use std::fmt;
use std::path::PathBuf;

use quiz_core::model::QuestionKind;
use storage::{JsonQuestionRepository, QuestionRepository};

#[derive(Debug)]
enum ArgsError {
    MissingPath,
    UnknownArg(String),
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingPath => write!(f, "a question file path is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn parse_path() -> Result<PathBuf, ArgsError> {
    let mut path = std::env::var("QUIZ_QUESTIONS").ok().map(PathBuf::from);
    for arg in std::env::args().skip(1) {
        if arg.starts_with('-') {
            return Err(ArgsError::UnknownArg(arg));
        }
        path = Some(PathBuf::from(arg));
    }
    path.ok_or(ArgsError::MissingPath)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = parse_path()?;
    let questions = JsonQuestionRepository::file(&path).load_questions().await?;

    let choice = questions
        .iter()
        .filter(|q| q.kind() == QuestionKind::Choice)
        .count();
    let with_image = questions.iter().filter(|q| q.image().is_some()).count();
    println!(
        "{}: {} questions ({choice} choice, {} true/false, {with_image} with images)",
        path.display(),
        questions.len(),
        questions.len() - choice,
    );
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        eprintln!("Usage: check_questions <questions.json>");
        std::process::exit(2);
    }
}
