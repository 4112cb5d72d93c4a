use quiz_core::ElapsedTime;

#[must_use]
pub fn format_elapsed(value: Option<ElapsedTime>) -> Option<String> {
    value.map(|elapsed| elapsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_or_stays_unavailable() {
        assert_eq!(
            format_elapsed(Some(ElapsedTime::from_millis(125_000))).as_deref(),
            Some("2 minutes 5 seconds")
        );
        assert_eq!(format_elapsed(None), None);
    }
}
