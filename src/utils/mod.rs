/// Formats a duration in seconds as zero-padded `MM:SS`. Minutes are not
/// wrapped at the hour, so 3600 seconds renders as "60:00".
pub fn format_duration(secs: u64) -> String {
    format!("{:>02}:{:>02}", secs / 60, secs % 60)
}
