//! Level numbering for platforms
//!
//! Rows are visited from the bottom of the screen up. Within a row, platforms
//! close together share a level; a gap wider than one tile starts the next
//! level. Numbers never repeat across rows.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::platform::Platform;
use crate::consts::{DEFAULT_LEVEL_COUNT, TILE_SIZE};

/// Static level -> lesson URL table
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelUrls(BTreeMap<u32, String>);

impl LevelUrls {
    /// `{base}/lesson{n}` for levels `1..=count`
    pub fn with_base(base: &str, count: u32) -> Self {
        let base = base.trim_end_matches('/');
        Self(
            (1..=count)
                .map(|level| (level, format!("{base}/lesson{level}")))
                .collect(),
        )
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (u32, String)>) -> Self {
        Self(entries.into_iter().collect())
    }

    pub fn get(&self, level: u32) -> Option<&str> {
        self.0.get(&level).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&crate::Settings> for LevelUrls {
    fn from(settings: &crate::Settings) -> Self {
        if settings.level_urls.is_empty() {
            Self::with_base(&settings.lesson_base_url, DEFAULT_LEVEL_COUNT)
        } else {
            Self::from_entries(settings.level_urls.clone())
        }
    }
}

/// Lesson metadata attached to every block of a platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelTag {
    pub level: u32,
    pub lesson_id: String,
    pub url: Option<String>,
}

impl LevelTag {
    fn new(level: u32, urls: &LevelUrls) -> Self {
        let url = urls.get(level).map(str::to_owned);
        if url.is_none() {
            log::warn!("No lesson URL for level {level}");
        }
        Self {
            level,
            lesson_id: format!("lesson{level}"),
            url,
        }
    }

    /// Platform id shared by every block at this level
    pub fn platform_id(&self) -> u32 {
        self.level
    }
}

/// A platform with its level assignment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedPlatform {
    pub platform: Platform,
    pub tag: LevelTag,
}

/// Assign level numbers to `platforms`, bottom row first.
///
/// Output is ordered by level, then by x within a level.
pub fn assign_levels(platforms: Vec<Platform>, urls: &LevelUrls) -> Vec<TaggedPlatform> {
    let mut rows: BTreeMap<i32, Vec<Platform>> = BTreeMap::new();
    for platform in platforms {
        rows.entry(platform.origin().y).or_default().push(platform);
    }

    let mut tagged = Vec::new();
    let mut next_level = 1;

    // Largest y is lowest on screen
    for (y, mut row) in rows.into_iter().rev() {
        row.sort_by_key(|p| p.origin().x);

        let mut level = next_level;
        let mut last_x: Option<i32> = None;
        for platform in row {
            if last_x.is_some_and(|last| platform.origin().x - last > TILE_SIZE) {
                level += 1;
            }
            last_x = Some(platform.right_edge());
            tagged.push(TaggedPlatform {
                tag: LevelTag::new(level, urls),
                platform,
            });
        }
        log::debug!("Row y={y}: levels {next_level}..={level}");
        next_level = level + 1;
    }

    tagged
}
