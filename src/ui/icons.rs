pub struct Icons;

impl Icons {
    pub const MOVIE: &str = "🎬";
    pub const CHECK: &str = "✅";
    pub const CROSS: &str = "❌";
    pub const WARN: &str = "⚠️";
    pub const INFO: &str = "ℹ️";
    pub const PROMPT: &str = "›";
}
