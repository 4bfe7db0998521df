//! Entrance animation state. Each page block arms a staggered fade-up
//! for its children the first time it scrolls into view; the timeline
//! only records start instants, so sampling is pure and repeatable.

use std::collections::HashMap;
use std::time::Duration;
use std::time::Instant;

use ratatui::style::Modifier;
use ratatui::style::Style;
use ratatui::text::Line;

use crate::fx::ease::CubicBezier;
use crate::fx::ease::SIGNATURE;

/// One element's entrance: how long it runs, its curve, and how many
/// rows below the settled position it starts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Motion {
    pub duration: Duration,
    pub easing: CubicBezier,
    pub rise_rows: u16,
}

pub(crate) const ENTRANCE: Motion = Motion {
    duration: Duration::from_millis(600),
    easing: SIGNATURE,
    rise_rows: 2,
};

/// Delay between consecutive children of the same block.
pub(crate) const STAGGER: Duration = Duration::from_millis(120);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct RevealKey {
    pub block: usize,
    pub child: u16,
}

/// A sampled entrance state. `progress` is already eased.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Reveal {
    pub progress: f32,
    pub rise: u16,
}

impl Reveal {
    pub(crate) const fn settled() -> Self {
        Self { progress: 1.0, rise: 0 }
    }

    pub(crate) const fn hidden(motion: Motion) -> Self {
        Self {
            progress: 0.0,
            rise: motion.rise_rows,
        }
    }

    pub(crate) fn is_visible(&self) -> bool {
        self.progress > 0.0
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.progress >= 1.0
    }

    /// Terminal stand-in for opacity: dim during the first half of the
    /// fade, full style afterwards.
    pub(crate) fn fade(&self, style: Style) -> Style {
        if self.progress < 0.55 {
            style.add_modifier(Modifier::DIM)
        } else {
            style
        }
    }

    pub(crate) fn fade_line(&self, line: &Line<'static>) -> Line<'static> {
        let line = line.clone();
        if self.progress < 0.55 {
            line.style(Style::default().add_modifier(Modifier::DIM))
        } else {
            line
        }
    }
}

/// All armed reveals for the current run. Arming is enter-once: a block
/// that has animated stays settled for the rest of the session.
pub(crate) struct Timeline {
    starts: HashMap<RevealKey, Instant>,
    motion: Motion,
    stagger: Duration,
    enabled: bool,
}

impl Timeline {
    pub(crate) fn new(enabled: bool) -> Self {
        Self {
            starts: HashMap::new(),
            motion: ENTRANCE,
            stagger: STAGGER,
            enabled,
        }
    }

    pub(crate) fn armed(&self, block: usize) -> bool {
        self.starts.contains_key(&RevealKey { block, child: 0 })
    }

    /// Arms every child of `block` with staggered starts. Re-arming an
    /// already armed block is a no-op.
    pub(crate) fn arm_block(&mut self, block: usize, children: u16, now: Instant) {
        if !self.enabled || self.armed(block) {
            return;
        }
        for child in 0..children.max(1) {
            let start = now + self.stagger * u32::from(child);
            self.starts.insert(RevealKey { block, child }, start);
        }
    }

    pub(crate) fn sample(&self, key: RevealKey, now: Instant) -> Reveal {
        if !self.enabled {
            return Reveal::settled();
        }
        let Some(start) = self.starts.get(&key) else {
            return Reveal::hidden(self.motion);
        };
        if now < *start {
            return Reveal::hidden(self.motion);
        }
        let elapsed = now.duration_since(*start);
        if elapsed >= self.motion.duration {
            return Reveal::settled();
        }
        let t = elapsed.as_secs_f32() / self.motion.duration.as_secs_f32();
        let progress = self.motion.easing.eval(t);
        let rise = ((1.0 - progress) * f32::from(self.motion.rise_rows)).round() as u16;
        Reveal { progress, rise }
    }

    /// True while any armed reveal still has time left. Drives the
    /// animation frame cadence; false means no frames are owed.
    pub(crate) fn animating(&self, now: Instant) -> bool {
        self.enabled
            && self
                .starts
                .values()
                .any(|start| now < *start + self.motion.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(block: usize, child: u16) -> RevealKey {
        RevealKey { block, child }
    }

    #[test]
    fn unarmed_blocks_sample_hidden() {
        let timeline = Timeline::new(true);
        let now = Instant::now();
        let reveal = timeline.sample(key(0, 0), now);
        assert!(!reveal.is_visible());
        assert_eq!(reveal.rise, ENTRANCE.rise_rows);
    }

    #[test]
    fn children_start_staggered() {
        let mut timeline = Timeline::new(true);
        let t0 = Instant::now();
        timeline.arm_block(0, 3, t0);

        // Child 1 has not started yet at t0, child 0 has.
        assert!(!timeline.sample(key(0, 1), t0).is_visible());
        let at_stagger = t0 + STAGGER;
        assert!(timeline.sample(key(0, 0), at_stagger).is_visible());
        assert!(timeline.sample(key(0, 1), at_stagger).progress <= f32::EPSILON);
    }

    #[test]
    fn mid_flight_reveal_has_partial_rise() {
        let mut timeline = Timeline::new(true);
        let t0 = Instant::now();
        timeline.arm_block(0, 1, t0);

        let reveal = timeline.sample(key(0, 0), t0 + Duration::from_millis(60));
        assert!(reveal.is_visible());
        assert!(!reveal.is_settled());
        assert!((0.3..0.7).contains(&reveal.progress), "{}", reveal.progress);
        assert_eq!(reveal.rise, 1);
    }

    #[test]
    fn reveals_settle_after_duration_plus_stagger() {
        let mut timeline = Timeline::new(true);
        let t0 = Instant::now();
        timeline.arm_block(0, 3, t0);

        let last_done = t0 + STAGGER * 2 + ENTRANCE.duration;
        assert!(timeline.animating(last_done - Duration::from_millis(1)));
        assert!(!timeline.animating(last_done));
        for child in 0..3 {
            assert!(timeline.sample(key(0, child), last_done).is_settled());
        }
    }

    #[test]
    fn arming_twice_does_not_restart() {
        let mut timeline = Timeline::new(true);
        let t0 = Instant::now();
        timeline.arm_block(0, 1, t0);
        let settled_at = t0 + ENTRANCE.duration + Duration::from_millis(5);
        timeline.arm_block(0, 1, settled_at);
        assert!(timeline.sample(key(0, 0), settled_at).is_settled());
        assert!(!timeline.animating(settled_at));
    }

    #[test]
    fn disabled_timeline_is_always_settled() {
        let mut timeline = Timeline::new(false);
        let t0 = Instant::now();
        timeline.arm_block(0, 4, t0);
        assert!(!timeline.armed(0));
        assert!(timeline.sample(key(0, 2), t0).is_settled());
        assert!(!timeline.animating(t0));
    }
}
