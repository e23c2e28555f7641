use std::ffi::OsStr;

/// Directory created next to the input to hold converted files.
pub const DEFAULT_OUT_DIR: &str = "tsConverter";

/// Path segments never descended into.
pub const DEFAULT_SKIP_SEGMENTS: [&str; 4] = ["node_modules", "public", "web_pack", ".erb"];

/// Settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Name of the output directory created under the conversion root.
    pub out_dir_name: String,

    /// File or directory names excluded from a directory walk, with everything below them.
    pub skip_segments: Vec<String>,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            out_dir_name: DEFAULT_OUT_DIR.to_string(),
            skip_segments: DEFAULT_SKIP_SEGMENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ConvertConfig {
    /// Adds skip segments on top of the current ones.
    pub fn with_skip_segments(mut self, segments: impl IntoIterator<Item = String>) -> Self {
        self.skip_segments.extend(segments);
        self
    }

    /// Whether a walk should leave out an entry with this file name. The output directory is
    /// always left out so a second run never picks up the first run's files.
    pub fn is_skipped(&self, name: &OsStr) -> bool {
        name == OsStr::new(&self.out_dir_name)
            || self.skip_segments.iter().any(|segment| name == OsStr::new(segment))
    }
}
