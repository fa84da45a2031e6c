use std::path::Path;
use lofty::{ItemKey, Probe, Tag, TagExt, TagType, TaggedFileExt};
use crate::{Result, ScrubError};

/// Removal policy: an empty policy removes every metadata field. A
/// non-empty policy names the fields to keep; everything else goes.
///
/// Key names are the documented aliases (title, artist, album,
/// albumartist, genre, year, date, track, disc, comment, composer),
/// `picture`/`cover` for embedded art, or a container-native key such as
/// `TIT2` or `TITLE`.
#[derive(Debug, Clone, Default)]
pub struct KeepPolicy {
    keys: Vec<String>,
    keep_pictures: bool,
}

impl KeepPolicy {
    pub fn remove_all() -> Self {
        Self::default()
    }

    pub fn from_keys(raw: &[String]) -> Self {
        let mut policy = Self::default();
        for key in raw {
            let key = key.trim();
            if key.is_empty() {
                continue;
            }
            let normalized = key.to_ascii_lowercase();
            match normalized.as_str() {
                "picture" | "pictures" | "cover" | "art" => policy.keep_pictures = true,
                _ => policy.keys.push(normalized),
            }
        }
        policy
    }

    pub fn is_remove_all(&self) -> bool {
        self.keys.is_empty() && !self.keep_pictures
    }

    pub fn keeps_pictures(&self) -> bool {
        self.keep_pictures
    }

    pub fn keeps(&self, tag_type: TagType, key: &ItemKey) -> bool {
        self.keys.iter().any(|name| {
            if let Some(known) = Self::well_known(name) {
                known == *key
            } else {
                // Fall back to the container's native key space, trying
                // the raw spelling and its uppercase form.
                ItemKey::from_key(tag_type, name) == *key
                    || ItemKey::from_key(tag_type, &name.to_ascii_uppercase()) == *key
            }
        })
    }

    fn well_known(name: &str) -> Option<ItemKey> {
        let key = match name {
            "title" => ItemKey::TrackTitle,
            "artist" => ItemKey::TrackArtist,
            "album" => ItemKey::AlbumTitle,
            "albumartist" | "album_artist" => ItemKey::AlbumArtist,
            "genre" => ItemKey::Genre,
            "year" => ItemKey::Year,
            "date" => ItemKey::RecordingDate,
            "track" | "tracknumber" => ItemKey::TrackNumber,
            "disc" | "discnumber" => ItemKey::DiscNumber,
            "comment" => ItemKey::Comment,
            "composer" => ItemKey::Composer,
            _ => return None,
        };
        Some(key)
    }
}

pub struct MetadataScrubber;

impl MetadataScrubber {
    /// Strips metadata from the file at `path` in place, honoring the keep
    /// policy. Returns the keys of the removed fields; embedded pictures
    /// count as one `picture` entry each. A file with no metadata at all
    /// succeeds with an empty list.
    pub fn scrub(path: &Path, policy: &KeepPolicy) -> Result<Vec<String>> {
        let tagged = Probe::open(path)
            .map_err(|e| ScrubError::Unreadable(format!("{}: {}", path.display(), e)))?
            .guess_file_type()
            .map_err(|e| ScrubError::Unreadable(format!("{}: {}", path.display(), e)))?
            .read()
            .map_err(|e| ScrubError::MetadataParse(format!("{}: {}", path.display(), e)))?;

        // Plan first, then apply: each plan is the tag type, what survives
        // of that tag, and the keys being dropped from it.
        let mut plans: Vec<(TagType, Tag, Vec<String>)> = Vec::new();
        for tag in tagged.tags() {
            let tag_type = tag.tag_type();
            let mut retained = Tag::new(tag_type);
            let mut dropped = Vec::new();

            for item in tag.items() {
                if policy.keeps(tag_type, item.key()) {
                    retained.push(item.clone());
                } else {
                    let key = item
                        .key()
                        .map_key(tag_type, true)
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("{:?}", item.key()));
                    dropped.push(key);
                }
            }

            for picture in tag.pictures() {
                if policy.keeps_pictures() {
                    retained.push_picture(picture.clone());
                } else {
                    dropped.push("picture".to_string());
                }
            }

            plans.push((tag_type, retained, dropped));
        }

        drop(tagged);

        let mut removed = Vec::new();
        for (tag_type, retained, dropped) in plans {
            if dropped.is_empty() {
                // Tag is fully retained, leave it on disk as-is.
                continue;
            }
            if retained.is_empty() && retained.pictures().is_empty() {
                tag_type
                    .remove_from_path(path)
                    .map_err(|e| ScrubError::Write(format!("{}: {}", path.display(), e)))?;
            } else {
                retained
                    .save_to_path(path)
                    .map_err(|e| ScrubError::Write(format!("{}: {}", path.display(), e)))?;
            }
            log::debug!(
                "{}: stripped {} field(s) from {:?} tag",
                path.display(),
                dropped.len(),
                tag_type
            );
            removed.extend(dropped);
        }

        Ok(removed)
    }
}
