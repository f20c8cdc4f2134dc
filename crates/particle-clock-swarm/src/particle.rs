//! A single animated particle.

use particle_clock_core::Point;

/// Linear motion from `from` to `to`, driven by elapsed wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    /// Position when the transition started.
    pub from: (f32, f32),
    /// Destination.
    pub to: (f32, f32),
    /// Elapsed time at which the transition started.
    pub started_ms: u64,
    /// Total duration.
    pub duration_ms: u64,
}

impl Transition {
    /// Position at `elapsed_ms`, and whether the transition has finished.
    ///
    /// A finished transition reports exactly `to`.
    pub fn position_at(&self, elapsed_ms: u64) -> ((f32, f32), bool) {
        let progress = elapsed_ms.saturating_sub(self.started_ms);
        if progress >= self.duration_ms {
            return (self.to, true);
        }
        let t = progress as f32 / self.duration_ms as f32;
        let x = self.from.0 + (self.to.0 - self.from.0) * t;
        let y = self.from.1 + (self.to.1 - self.from.1) * t;
        ((x, y), false)
    }
}

/// A movable disc. The radius is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    x: f32,
    y: f32,
    size: f32,
    transition: Option<Transition>,
}

impl Particle {
    /// Create a stationary particle.
    pub fn new(x: f32, y: f32, size: f32) -> Self {
        Self {
            x,
            y,
            size,
            transition: None,
        }
    }

    /// Current position in surface pixels.
    pub fn position(&self) -> (f32, f32) {
        (self.x, self.y)
    }

    /// Render radius in surface pixels.
    pub fn size(&self) -> f32 {
        self.size
    }

    /// The active transition, if any.
    pub fn transition(&self) -> Option<&Transition> {
        self.transition.as_ref()
    }

    /// Whether a transition is in flight.
    pub fn is_moving(&self) -> bool {
        self.transition.is_some()
    }

    /// Start moving toward `target`, replacing any in-flight transition.
    ///
    /// The new transition starts from where the particle is at `elapsed_ms`.
    pub fn retarget(&mut self, target: Point, elapsed_ms: u64, duration_ms: u64) {
        self.advance(elapsed_ms);
        self.transition = Some(Transition {
            from: (self.x, self.y),
            to: (target.x as f32, target.y as f32),
            started_ms: elapsed_ms,
            duration_ms,
        });
    }

    /// Move to where the active transition puts the particle at `elapsed_ms`.
    /// Returns whether the particle is still moving.
    pub fn advance(&mut self, elapsed_ms: u64) -> bool {
        let Some(transition) = self.transition else {
            return false;
        };
        let ((x, y), done) = transition.position_at(elapsed_ms);
        self.x = x;
        self.y = y;
        if done {
            self.transition = None;
        }
        !done
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_midpoint() {
        let mut p = Particle::new(0.0, 0.0, 3.0);
        p.retarget(Point::new(100, 50), 1_000, 500);
        assert!(p.advance(1_250));
        assert_eq!(p.position(), (50.0, 25.0));
    }

    #[test]
    fn test_transition_lands_exactly_on_target() {
        let mut p = Particle::new(13.7, 91.3, 3.0);
        p.retarget(Point::new(42, 17), 0, 500);
        assert!(!p.advance(500));
        assert_eq!(p.position(), (42.0, 17.0));
        assert!(!p.is_moving());

        // Far past the end, nothing drifts
        assert!(!p.advance(10_000));
        assert_eq!(p.position(), (42.0, 17.0));
    }

    #[test]
    fn test_frame_rate_does_not_change_timing() {
        let mut sparse = Particle::new(0.0, 0.0, 2.0);
        let mut dense = Particle::new(0.0, 0.0, 2.0);
        sparse.retarget(Point::new(300, 0), 0, 500);
        dense.retarget(Point::new(300, 0), 0, 500);

        for ms in 0..=300 {
            dense.advance(ms);
        }
        sparse.advance(300);
        assert_eq!(sparse.position(), dense.position());
    }

    #[test]
    fn test_retarget_mid_flight_starts_from_current_position() {
        let mut p = Particle::new(0.0, 0.0, 4.0);
        p.retarget(Point::new(100, 0), 0, 500);
        p.retarget(Point::new(100, 100), 250, 500);

        let transition = p.transition().unwrap();
        assert_eq!(transition.from, (50.0, 0.0));
        assert_eq!(transition.to, (100.0, 100.0));
        assert_eq!(transition.started_ms, 250);

        // The first transition would have ended at 500; only the new one runs
        p.advance(500);
        assert_eq!(p.position(), (75.0, 50.0));
        p.advance(750);
        assert_eq!(p.position(), (100.0, 100.0));
    }

    #[test]
    fn test_retarget_keeps_size() {
        let mut p = Particle::new(0.0, 0.0, 5.0);
        for i in 0..10 {
            p.retarget(Point::new(i * 10, i), u64::from(i) * 100, 500);
            p.advance(u64::from(i) * 100 + 50);
        }
        assert_eq!(p.size(), 5.0);
    }

    #[test]
    fn test_zero_duration_snaps() {
        let mut p = Particle::new(1.0, 1.0, 2.0);
        p.retarget(Point::new(9, 9), 100, 0);
        assert!(!p.advance(100));
        assert_eq!(p.position(), (9.0, 9.0));
    }

    #[test]
    fn test_clock_going_backwards_holds_start() {
        let mut p = Particle::new(0.0, 0.0, 2.0);
        p.retarget(Point::new(10, 10), 1_000, 500);
        assert!(p.advance(900));
        assert_eq!(p.position(), (0.0, 0.0));
    }
}
