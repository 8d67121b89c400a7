use std::collections::HashMap;
use std::path::PathBuf;

/// State of a poster image for a given show.
#[derive(Debug, Clone)]
pub enum PosterState {
    Loading,
    Loaded(PathBuf),
    Failed,
}

/// In-memory cache mapping show IDs to their poster image state.
#[derive(Debug, Default)]
pub struct PosterCache {
    pub states: HashMap<i64, PosterState>,
}

impl PosterCache {
    pub fn get(&self, show_id: i64) -> Option<&PosterState> {
        self.states.get(&show_id)
    }
}

/// Directory for cached poster images.
pub fn posters_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "terebi")
        .map(|dirs| dirs.data_dir().join("posters"))
        .unwrap_or_else(|| PathBuf::from("posters"))
}

/// Expected file path for a poster image.
pub fn poster_path(show_id: i64) -> PathBuf {
    posters_dir().join(format!("{show_id}.jpg"))
}

/// Download a poster image and save it to disk. Returns the saved path.
pub async fn fetch_poster(show_id: i64, url: String) -> Result<PathBuf, String> {
    let dir = posters_dir();
    std::fs::create_dir_all(&dir).map_err(|e| e.to_string())?;

    let path = poster_path(show_id);

    let bytes = reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;

    std::fs::write(&path, &bytes).map_err(|e| e.to_string())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poster_path_is_per_show() {
        assert!(poster_path(42).ends_with("42.jpg"));
        assert_ne!(poster_path(1), poster_path(2));
    }

    #[test]
    fn test_cache_lookup() {
        let mut cache = PosterCache::default();
        assert!(cache.get(7).is_none());

        cache.states.insert(7, PosterState::Failed);
        assert!(matches!(cache.get(7), Some(PosterState::Failed)));
    }
}
