//! Errors raised while turning map data into collision geometry

/// Setup failures. The per-frame loop never produces these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapError {
    /// Flat tile array is not a whole number of rows
    MalformedTileData { len: usize, width: usize },
    /// A static patch points past the end of the tile array
    PatchOutOfBounds { row: usize, column: usize, len: usize },
    /// Map JSON could not be parsed
    Parse(String),
}

impl std::fmt::Display for MapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedTileData { len, width } => write!(
                f,
                "malformed tile data: {len} tiles is not a multiple of row width {width} ({} left over)",
                len % (*width).max(1)
            ),
            Self::PatchOutOfBounds { row, column, len } => {
                write!(f, "tile patch at row {row}, column {column} is outside a {len}-tile map")
            }
            Self::Parse(m) => write!(f, "invalid map data: {m}"),
        }
    }
}

impl std::error::Error for MapError {}

impl From<serde_json::Error> for MapError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}
