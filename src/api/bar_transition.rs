use serde::{Deserialize, Serialize};

/// In-flight bar height interpolation, in value units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTransition {
    pub from: Vec<f64>,
    pub to: Vec<f64>,
    pub elapsed_ms: f64,
    pub duration_ms: f64,
}

impl BarTransition {
    #[must_use]
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    #[must_use]
    pub fn sample(&self) -> Vec<f64> {
        let eased = ease_cubic_in_out(self.progress());
        self.from
            .iter()
            .zip(&self.to)
            .map(|(from, to)| from + (to - from) * eased)
            .collect()
    }
}

/// Symmetric cubic easing on `[0, 1]`.
#[must_use]
pub fn ease_cubic_in_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0) * 2.0;
    if t <= 1.0 {
        t * t * t / 2.0
    } else {
        let t = t - 2.0;
        (t * t * t + 2.0) / 2.0
    }
}

/// Displayed bar heights plus at most one running transition.
///
/// Retargeting starts from whatever is on screen and replaces the running
/// transition, so the latest target always wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BarAnimator {
    displayed: Vec<f64>,
    transition: Option<BarTransition>,
}

impl BarAnimator {
    #[must_use]
    pub fn displayed(&self) -> &[f64] {
        &self.displayed
    }

    #[must_use]
    pub fn transition(&self) -> Option<&BarTransition> {
        self.transition.as_ref()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Starts a transition toward `targets`. Missing values animate to zero.
    pub fn retarget(&mut self, targets: &[Option<f64>], duration_ms: f64) {
        let to: Vec<f64> = targets.iter().map(|value| value.unwrap_or(0.0)).collect();
        let mut from = self.displayed.clone();
        from.resize(to.len(), 0.0);

        if duration_ms <= 0.0 {
            self.displayed = to;
            self.transition = None;
            return;
        }

        self.displayed = from.clone();
        self.transition = Some(BarTransition {
            from,
            to,
            elapsed_ms: 0.0,
            duration_ms,
        });
    }

    /// Advances the running transition. Returns `true` while still animating.
    pub fn advance(&mut self, elapsed_ms: f64) -> bool {
        let Some(transition) = self.transition.as_mut() else {
            return false;
        };
        if elapsed_ms.is_finite() && elapsed_ms > 0.0 {
            transition.elapsed_ms += elapsed_ms;
        }
        self.displayed = transition.sample();
        if transition.progress() >= 1.0 {
            self.displayed = transition.to.clone();
            self.transition = None;
            return false;
        }
        true
    }
}
