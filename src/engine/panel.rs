use std::time::{Duration, Instant};

use crate::data::RecordData;
use crate::render::registry::EntityId;

/// Contents of the metadata overlay for the selected record.
#[derive(Debug, Clone, PartialEq)]
pub struct InfoPanel {
    pub entity: EntityId,
    pub title: String,
    pub artist: String,
    pub year: String,
    pub genre: String,
    pub label: String,
    pub shown_at: Instant,
}

impl InfoPanel {
    pub fn for_record(entity: EntityId, data: &RecordData, now: Instant) -> Self {
        Self {
            entity,
            title: data.title.clone(),
            artist: data.artist.clone(),
            year: data.year_or_unknown().to_string(),
            genre: data.genre_or_unknown().to_string(),
            label: data.label_or_unknown().to_string(),
            shown_at: now,
        }
    }

    /// Fade-in alpha (0.0 → 1.0 over `fade`).
    pub fn alpha(&self, now: Instant, fade: Duration) -> f32 {
        if fade.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.shown_at).as_secs_f32();
        (elapsed / fade.as_secs_f32()).clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_unknown_labels() {
        let data = RecordData {
            title: "Remain in Light".into(),
            artist: "Talking Heads".into(),
            genre: Some("New Wave".into()),
            ..Default::default()
        };
        let p = InfoPanel::for_record(EntityId(3), &data, Instant::now());
        assert_eq!(p.title, "Remain in Light");
        assert_eq!(p.genre, "New Wave");
        assert_eq!(p.year, "Unknown Year");
        assert_eq!(p.label, "Unknown Label");
    }

    #[test]
    fn fades_in() {
        let t0 = Instant::now();
        let p = InfoPanel::for_record(EntityId(0), &RecordData::default(), t0);
        let fade = Duration::from_millis(300);
        assert_eq!(p.alpha(t0, fade), 0.0);
        assert!((p.alpha(t0 + Duration::from_millis(150), fade) - 0.5).abs() < 1e-5);
        assert_eq!(p.alpha(t0 + Duration::from_secs(2), fade), 1.0);
        assert_eq!(p.alpha(t0, Duration::ZERO), 1.0);
    }
}
