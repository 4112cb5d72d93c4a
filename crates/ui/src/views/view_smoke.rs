use quiz_core::Answer;

use super::test_harness::{fast_settings, setup_quiz_harness};
use crate::vm::QuizIntent;

#[tokio::test(flavor = "current_thread")]
async fn start_screen_renders_run_summary() {
    let mut harness = setup_quiz_harness(fast_settings());
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("3 of 3 questions per run"), "missing summary in {html}");
    assert!(html.contains("Start"), "missing start button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn start_shows_first_question_with_ox_buttons() {
    let mut harness = setup_quiz_harness(fast_settings());
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);
    let html = harness.render();
    assert!(html.contains("Question 1:"), "missing prompt in {html}");
    assert!(html.contains("1 / 3"), "missing progress in {html}");
    assert!(html.contains(">O<"), "missing O button in {html}");
    assert!(html.contains(">X<"), "missing X button in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_locks_and_shows_cross() {
    let mut harness = setup_quiz_harness(fast_settings());
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);
    harness.dispatch(QuizIntent::Answer(Answer::Boolean(false)));

    let html = harness.render();
    assert!(html.contains("Wrong! Starting over"), "missing feedback in {html}");
    assert!(html.contains("quiz-cross"), "missing cross overlay in {html}");
    assert!(html.contains("disabled"), "answer buttons should be disabled in {html}");

    // Clicks while feedback is showing change nothing.
    harness.dispatch(QuizIntent::Answer(Answer::Boolean(true)));
    let html = harness.render();
    assert!(html.contains("Wrong! Starting over"), "feedback replaced in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn wrong_answer_restarts_after_delay() {
    let mut harness = setup_quiz_harness(fast_settings());
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);
    harness.dispatch(QuizIntent::Answer(Answer::Boolean(true)));
    let html = harness.drive_until("2 / 3").await;
    assert!(html.contains("Question 2:"), "did not advance: {html}");

    harness.dispatch(QuizIntent::Answer(Answer::Boolean(false)));
    let html = harness.drive_until("Attempt 2").await;
    assert!(html.contains("Attempt 2"), "did not restart: {html}");
    assert!(html.contains("Question 1:"), "restart should begin at the first question: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn all_correct_reaches_completion_screen() {
    let mut harness = setup_quiz_harness(fast_settings());
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);
    for next in ["2 / 3", "3 / 3", "Completed!"] {
        harness.dispatch(QuizIntent::Answer(Answer::Boolean(true)));
        harness.drive_until(next).await;
    }

    let html = harness.render();
    assert!(html.contains("Completed!"), "missing completion in {html}");
    assert!(html.contains("Time taken: 0 minutes 0 seconds"), "missing elapsed in {html}");
    assert!(html.contains("Play again"), "missing restart button in {html}");

    harness.dispatch(QuizIntent::Start);
    let html = harness.render();
    assert!(html.contains("Question 1:"), "play again should start a new run: {html}");
    assert!(!html.contains("Attempt"), "play again resets the attempt counter: {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn restarting_mid_feedback_cancels_pending_transition() {
    let mut harness = setup_quiz_harness(fast_settings());
    harness.rebuild();
    harness.dispatch(QuizIntent::Start);
    harness.dispatch(QuizIntent::Answer(Answer::Boolean(true)));
    harness.dispatch(QuizIntent::Start);

    for _ in 0..3 {
        harness.drive_async().await;
    }
    let html = harness.render();
    assert!(html.contains("1 / 3"), "old timer advanced the new run: {html}");
    assert!(!html.contains("Correct!"), "stale feedback shown: {html}");
}
