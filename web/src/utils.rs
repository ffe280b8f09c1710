use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Types persisted in `localStorage` under a fixed key.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    /// Stored value, or the default when it is absent or unreadable.
    fn local_or_default() -> Self;

    /// Best effort, failures are only logged.
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Default + Serialize + DeserializeOwned,
{
    fn local_or_default() -> Self {
        match LocalStorage::get(T::KEY) {
            Ok(value) => value,
            Err(StorageError::KeyNotFound(_)) => {
                log::debug!("nothing stored under {}, using default", T::KEY);
                T::default()
            }
            Err(err) => {
                log::warn!("could not read {} from local storage: {}", T::KEY, err);
                T::default()
            }
        }
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("could not save {} to local storage: {}", T::KEY, err);
        }
    }
}

/// Seed built from two draws of JavaScript's `Math.random`.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

pub(crate) fn score_label(score: u32) -> String {
    format!("Score: {}", score)
}

pub(crate) fn high_score_label(high_score: u32) -> String {
    format!("High Score: {}", high_score)
}

pub(crate) fn final_score_label(score: u32) -> String {
    format!("Your Score: {}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_scoreboard_text() {
        assert_eq!(score_label(0), "Score: 0");
        assert_eq!(high_score_label(12), "High Score: 12");
        assert_eq!(final_score_label(7), "Your Score: 7");
    }
}
