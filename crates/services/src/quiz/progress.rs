/// Aggregated view of run progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the question on screen.
    pub question_number: usize,
    pub total: usize,
    pub attempt: u32,
    pub is_complete: bool,
}
