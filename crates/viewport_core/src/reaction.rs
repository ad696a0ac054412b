//! Time-based reaction pulse. Pure functions of (state, now).

use std::time::Instant;

/// Tint used when no reaction is active.
pub const NEUTRAL_TINT: [f32; 3] = [0.9, 0.88, 0.85];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    pub id: String,
    pub since: Instant,
}

/// Pulse strength `secs` after the reaction started; in [0.25, 0.75].
pub fn pulse_alpha(secs: f32) -> f32 {
    0.25 + 0.5 * (0.5 + 0.5 * (secs * 5.0).sin())
}

pub fn reaction_alpha(reaction: Option<&Reaction>, now: Instant) -> f32 {
    match reaction {
        Some(r) => pulse_alpha(now.saturating_duration_since(r.since).as_secs_f32()),
        None => 0.0,
    }
}

/// Neutral at 0, shifting toward red as alpha grows.
pub fn tint_for(alpha: f32) -> [f32; 3] {
    if alpha <= 0.0 {
        return NEUTRAL_TINT;
    }
    let a = alpha.min(1.0);
    let gb = 0.6 * (1.0 - a);
    [1.0, gb, gb]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::time::Duration;

    #[test]
    fn starts_mid_band() {
        let now = Instant::now();
        let r = Reaction { id: "covid".into(), since: now };
        assert_relative_eq!(reaction_alpha(Some(&r), now), 0.5);
    }

    #[test]
    fn cleared_is_zero_at_any_time() {
        let now = Instant::now();
        assert_eq!(reaction_alpha(None, now), 0.0);
        assert_eq!(reaction_alpha(None, now + Duration::from_secs(7)), 0.0);
    }

    #[test]
    fn pulse_stays_in_band() {
        for i in 0..500 {
            let a = pulse_alpha(i as f32 * 0.037);
            assert!((0.25 - 1e-6..=0.75 + 1e-6).contains(&a), "alpha {a}");
        }
        // Peak at sin = 1.
        assert_relative_eq!(pulse_alpha(std::f32::consts::FRAC_PI_2 / 5.0), 0.75, epsilon = 1e-5);
    }

    #[test]
    fn tint_shifts_toward_red() {
        assert_eq!(tint_for(0.0), NEUTRAL_TINT);
        let t = tint_for(0.5);
        assert_relative_eq!(t[0], 1.0);
        assert_relative_eq!(t[1], 0.3, epsilon = 1e-6);
        assert!(tint_for(0.75)[1] < tint_for(0.25)[1]);
    }
}
