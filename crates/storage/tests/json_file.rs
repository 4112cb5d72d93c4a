use std::io::Write;

use quiz_core::model::{AnswerKey, QuestionKind};
use storage::{QuestionRepository, Storage, StorageError};

#[tokio::test]
async fn loads_bank_from_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[
            {{"question": "Capital of Korea?", "type": "choice", "choices": ["Busan", "Seoul"], "answer": 1}},
            {{"question": "Mt. Halla is on Jeju", "type": "ox", "answer": true}}
        ]"#
    )
    .expect("write bank");

    let storage = Storage::json_file(file.path());
    let questions = storage.questions.load_questions().await.expect("load");

    assert_eq!(questions.len(), 2);
    assert_eq!(questions[0].kind(), QuestionKind::Choice);
    assert_eq!(questions[1].answer_key(), &AnswerKey::Boolean(true));
}

#[tokio::test]
async fn missing_file_is_not_found() {
    let dir = tempfile::tempdir().expect("temp dir");
    let storage = Storage::json_file(dir.path().join("absent.json"));
    let err = storage.questions.load_questions().await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)), "got {err:?}");
}
