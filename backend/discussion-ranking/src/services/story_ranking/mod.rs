/// Story Ranking
///
/// Applies the hotness calculator to a batch of stories and orders them
/// hottest first. The sort is stable so identical stories keep the caller's
/// order, which keeps pagination deterministic over an unchanged snapshot.
use crate::models::{ScoredStory, StoryFacts, StoryId};
use crate::services::hotness::{compute_hotness, HotnessWindow};
use crate::utils::ascending;
use std::collections::HashSet;
use tracing::debug;

/// Story Ranker - hotness ordering for story listings
#[derive(Debug, Clone, Copy, Default)]
pub struct StoryRanker {
    window: HotnessWindow,
}

impl StoryRanker {
    pub fn new(window: HotnessWindow) -> Self {
        Self { window }
    }

    pub fn window(&self) -> HotnessWindow {
        self.window
    }

    /// Score and order `stories`, index 0 being the hottest.
    pub fn rank(&self, stories: Vec<StoryFacts>) -> Vec<ScoredStory> {
        let ranked = rank_stories(stories, self.window);

        debug!(
            story_count = ranked.len(),
            window_seconds = self.window.seconds(),
            top_hotness = ranked.first().map(|s| s.hotness()),
            "Stories ranked"
        );

        ranked
    }
}

/// Score every story with the same window and stable-sort ascending by hotness.
pub fn rank_stories(stories: Vec<StoryFacts>, window: HotnessWindow) -> Vec<ScoredStory> {
    let mut scored: Vec<ScoredStory> = stories
        .into_iter()
        .map(|story| compute_hotness(story, window))
        .collect();

    scored.sort_by(|a, b| ascending(a.hotness(), b.hotness()));

    scored
}

/// Drop stories with a negative net score and stories the viewer hid,
/// keeping the ranked order.
pub fn visible_stories(ranked: Vec<ScoredStory>, hidden: &HashSet<StoryId>) -> Vec<ScoredStory> {
    ranked
        .into_iter()
        .filter(|s| s.story().score >= 0 && !hidden.contains(&s.id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn story(id: StoryId, created_at: DateTime<Utc>, score: i64) -> StoryFacts {
        StoryFacts {
            id,
            created_at,
            tags: vec![],
            score,
            comments: vec![],
        }
    }

    fn ids(ranked: &[ScoredStory]) -> Vec<StoryId> {
        ranked.iter().map(ScoredStory::id).collect()
    }

    #[test]
    fn test_rank_empty() {
        assert!(StoryRanker::default().rank(vec![]).is_empty());
    }

    #[test]
    fn test_higher_score_ranks_first_at_same_time() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let ranked = rank_stories(
            vec![story(1, now, 1), story(2, now, 10)],
            HotnessWindow::default(),
        );

        assert_eq!(ids(&ranked), vec![2, 1]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let ranked = rank_stories(
            vec![story(1, now, 5), story(2, now, 5), story(3, now, 5)],
            HotnessWindow::default(),
        );

        assert_eq!(ids(&ranked), vec![1, 2, 3]);
        assert_eq!(ranked[0].hotness(), ranked[1].hotness());
    }

    #[test]
    fn test_nan_tag_does_not_break_ordering() {
        use crate::models::TagModifier;

        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let stories: Vec<StoryFacts> = (0..40)
            .map(|i| {
                let mut s = story(i, now - Duration::minutes(i * 13 % 240), i % 9);
                if i % 5 == 0 {
                    s.tags.push(TagModifier::new(f64::NAN));
                }
                s
            })
            .collect();

        let ranked = rank_stories(stories, HotnessWindow::default());
        assert_eq!(ranked.len(), 40);

        let finite: Vec<f64> = ranked
            .iter()
            .map(ScoredStory::hotness)
            .filter(|h| h.is_finite())
            .collect();
        assert_eq!(finite.len(), 32);
        assert!(finite.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_visible_stories_filters_negative_and_hidden() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let ranked = rank_stories(
            vec![
                story(1, now, 4),
                story(2, now - Duration::hours(1), -2),
                story(3, now - Duration::hours(2), 0),
                story(4, now - Duration::hours(3), 8),
            ],
            HotnessWindow::default(),
        );
        let hidden: HashSet<StoryId> = [4].into_iter().collect();

        let visible = visible_stories(ranked, &hidden);
        assert_eq!(ids(&visible), vec![1, 3]);
    }
}
