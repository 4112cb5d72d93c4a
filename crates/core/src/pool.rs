use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::Question;

/// Draws a run's question pool: a uniform shuffle of `questions`, truncated to `cap`.
///
/// `cap` of `None` keeps every question.
pub fn draw_pool<R: Rng + ?Sized>(
    questions: &[Question],
    cap: Option<u32>,
    rng: &mut R,
) -> Vec<Question> {
    let mut pool = questions.to_vec();
    pool.as_mut_slice().shuffle(rng);
    if let Some(cap) = cap {
        pool.truncate(usize::try_from(cap).unwrap_or(usize::MAX));
    }
    pool
}
