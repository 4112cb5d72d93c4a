use quiz_core::{PendingTransition, TransitionToken};

/// Sleeps for the pending transition's feedback delay and hands back its token.
///
/// Dropping or cancelling the future is how a caller abandons the timer; firing a
/// token after its run was reset is harmless because the session rejects it.
pub async fn feedback_delay(pending: PendingTransition) -> TransitionToken {
    tokio::time::sleep(pending.delay).await;
    pending.token
}
