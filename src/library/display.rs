use super::model::Track;

impl Track {
    /// `"Artist - Title"`, or just the title when the artist is blank.
    pub fn display(&self) -> String {
        let artist = self.artist.trim();
        if artist.is_empty() {
            self.title.trim().to_string()
        } else {
            format!("{} - {}", artist, self.title.trim())
        }
    }
}

/// Format whole seconds as `m:ss` (minutes are not wrapped into hours).
pub fn format_clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
