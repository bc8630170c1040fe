/// `MM:SS` with both fields zero-padded, as the interview timers show.
#[must_use]
pub fn format_mm_ss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes:02}:{remainder:02}")
}

/// `M:SS` with unpadded minutes, as the practice countdown shows.
#[must_use]
pub fn format_m_ss(seconds: u32) -> String {
    let minutes = seconds / 60;
    let remainder = seconds % 60;
    format!("{minutes}:{remainder:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_interview_timers() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(65), "01:05");
        assert_eq!(format_mm_ss(600), "10:00");
    }

    #[test]
    fn practice_countdown_keeps_short_minutes() {
        assert_eq!(format_m_ss(30), "0:30");
        assert_eq!(format_m_ss(90), "1:30");
    }
}
