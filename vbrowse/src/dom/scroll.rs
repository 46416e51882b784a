use std::time::{Duration, Instant};

use super::Rect;

const SMOOTH_DURATION: Duration = Duration::from_millis(180);

/// How a scroll request moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    /// Jump straight to the new offset.
    #[default]
    Instant,
    /// Animate toward the new offset.
    Smooth,
}

#[derive(Debug, Clone, Copy)]
struct ScrollAnimation {
    from: (u16, u16),
    to: (u16, u16),
    start: Instant,
    duration: Duration,
}

impl ScrollAnimation {
    fn progress(&self, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(self.start);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    fn offset(&self, now: Instant) -> (u16, u16) {
        let t = self.progress(now);
        // ease-out
        let t = 1.0 - (1.0 - t) * (1.0 - t);
        let lerp = |a: u16, b: u16| (a as f32 + (b as f32 - a as f32) * t).round() as u16;
        (lerp(self.from.0, self.to.0), lerp(self.from.1, self.to.1))
    }
}

/// Scroll offset of a viewport over a table's content.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    offset: (u16, u16),
    animation: Option<ScrollAnimation>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset at `now`, following any animation in progress.
    pub fn offset(&self, now: Instant) -> (u16, u16) {
        match &self.animation {
            Some(animation) => animation.offset(now),
            None => self.offset,
        }
    }

    pub fn is_animating(&self, now: Instant) -> bool {
        self.animation
            .as_ref()
            .is_some_and(|animation| animation.progress(now) < 1.0)
    }

    /// When the running animation ends.
    pub fn deadline(&self) -> Option<Instant> {
        self.animation
            .as_ref()
            .map(|animation| animation.start + animation.duration)
    }

    /// Drop a finished animation.
    pub fn settle(&mut self, now: Instant) {
        if let Some(animation) = self.animation
            && animation.progress(now) >= 1.0
        {
            self.offset = animation.to;
            self.animation = None;
        }
    }

    /// Scroll by a delta, clamped to the content. Cancels any animation.
    pub fn scroll_by(&mut self, dx: i32, dy: i32, viewport: (u16, u16), content: (u16, u16), now: Instant) {
        let (x, y) = self.offset(now);
        let (max_x, max_y) = max_offset(viewport, content);
        self.animation = None;
        self.offset = (
            (x as i32 + dx).clamp(0, max_x as i32) as u16,
            (y as i32 + dy).clamp(0, max_y as i32) as u16,
        );
    }

    /// Reset to the top-left corner.
    pub fn reset(&mut self) {
        self.offset = (0, 0);
        self.animation = None;
    }

    /// Center `target` in the viewport on both axes, as far as the content
    /// allows.
    pub fn scroll_into_view(
        &mut self,
        target: Rect,
        viewport: (u16, u16),
        content: (u16, u16),
        behavior: ScrollBehavior,
        now: Instant,
    ) {
        let (max_x, max_y) = max_offset(viewport, content);
        let (cx, cy) = target.center();
        let to = (
            cx.saturating_sub(viewport.0 / 2).min(max_x),
            cy.saturating_sub(viewport.1 / 2).min(max_y),
        );

        let from = self.offset(now);
        match behavior {
            ScrollBehavior::Smooth if from != to => {
                self.animation = Some(ScrollAnimation {
                    from,
                    to,
                    start: now,
                    duration: SMOOTH_DURATION,
                });
                self.offset = to;
            }
            _ => {
                self.animation = None;
                self.offset = to;
            }
        }
    }
}

fn max_offset(viewport: (u16, u16), content: (u16, u16)) -> (u16, u16) {
    (
        content.0.saturating_sub(viewport.0),
        content.1.saturating_sub(viewport.1),
    )
}
