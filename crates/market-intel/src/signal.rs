//! Momentum Signal Engine
//!
//! Converts price-change percentages into discrete trading signals.
//! Pure arithmetic over three momentum windows; no state, no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Price-change percentages over the standard momentum windows.
///
/// Fields are optional because the market-data provider returns null for
/// assets without enough trading history; a missing window contributes
/// nothing to the score.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceChanges {
    /// 1-hour change percentage
    pub h1: Option<f64>,
    /// 24-hour change percentage
    pub h24: Option<f64>,
    /// 7-day change percentage
    pub d7: Option<f64>,
}

impl PriceChanges {
    pub fn new(h1: f64, h24: f64, d7: f64) -> Self {
        Self {
            h1: Some(h1),
            h24: Some(h24),
            d7: Some(d7),
        }
    }
}

/// Discrete trading recommendation.
///
/// Serialized with the display strings the dashboard renders
/// ("Strong Buy", "Hold", ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    Buy,
    Hold,
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Signal::StrongBuy => "Strong Buy",
            Signal::Buy => "Buy",
            Signal::Hold => "Hold",
            Signal::Sell => "Sell",
            Signal::StrongSell => "Strong Sell",
        };
        write!(f, "{label}")
    }
}

/// A derived signal together with the raw score behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalReading {
    pub signal: Signal,
    pub strength: i32,
}

/// Derive a trading signal from momentum figures.
///
/// Each window contributes an independent weighted score; the label
/// follows from the summed strength. Total over its input domain:
/// missing and non-finite values read as flat (zero contribution), so
/// every call yields a valid reading. Calling twice with the same input
/// yields the same output.
pub fn derive_signal(changes: &PriceChanges) -> SignalReading {
    let strength = score_1h(changes.h1) + score_24h(changes.h24) + score_7d(changes.d7);
    SignalReading {
        signal: label_for(strength),
        strength,
    }
}

/// Null or garbage momentum data reads as "no momentum".
fn flatten(change: Option<f64>) -> f64 {
    match change {
        Some(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

fn score_1h(change: Option<f64>) -> i32 {
    let c = flatten(change);
    if c > 2.0 {
        2
    } else if c > 0.5 {
        1
    } else if c < -2.0 {
        -2
    } else if c < -0.5 {
        -1
    } else {
        0
    }
}

fn score_24h(change: Option<f64>) -> i32 {
    let c = flatten(change);
    if c > 5.0 {
        3
    } else if c > 2.0 {
        2
    } else if c > 0.0 {
        1
    } else if c < -5.0 {
        -3
    } else if c < -2.0 {
        -2
    } else if c < 0.0 {
        -1
    } else {
        0
    }
}

fn score_7d(change: Option<f64>) -> i32 {
    let c = flatten(change);
    if c > 10.0 {
        2
    } else if c > 5.0 {
        1
    } else if c < -10.0 {
        -2
    } else if c < -5.0 {
        -1
    } else {
        0
    }
}

/// Label ladder, evaluated top to bottom. A strength of exactly 5 (or -5)
/// already lands in the strong bucket; scores in (-3, 1) all read as Hold.
fn label_for(strength: i32) -> Signal {
    match strength {
        s if s >= 5 => Signal::StrongBuy,
        s if s >= 3 => Signal::Buy,
        s if s >= 1 => Signal::Hold,
        s if s <= -5 => Signal::StrongSell,
        s if s <= -3 => Signal::Sell,
        _ => Signal::Hold,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strong_momentum_across_all_windows() {
        let reading = derive_signal(&PriceChanges::new(3.0, 6.0, 12.0));
        assert_eq!(reading.strength, 7);
        assert_eq!(reading.signal, Signal::StrongBuy);
    }

    #[test]
    fn flat_market_holds() {
        let reading = derive_signal(&PriceChanges::new(0.0, 0.0, 0.0));
        assert_eq!(reading.strength, 0);
        assert_eq!(reading.signal, Signal::Hold);
    }

    #[test]
    fn broad_selloff_is_strong_sell() {
        let reading = derive_signal(&PriceChanges::new(-3.0, -6.0, -12.0));
        assert_eq!(reading.strength, -7);
        assert_eq!(reading.signal, Signal::StrongSell);
    }

    #[test]
    fn mildly_negative_score_still_holds() {
        // +1 - 2 + 0 = -1, which is neither >= 1 nor <= -3
        let reading = derive_signal(&PriceChanges::new(1.0, -3.0, 0.0));
        assert_eq!(reading.strength, -1);
        assert_eq!(reading.signal, Signal::Hold);
    }

    #[test]
    fn exact_boundary_values_fall_into_weaker_bucket() {
        // Comparisons are strict, so a value sitting exactly on a
        // threshold scores as if it had not crossed it.
        assert_eq!(derive_signal(&PriceChanges::new(2.0, 0.0, 0.0)).strength, 1);
        assert_eq!(derive_signal(&PriceChanges::new(0.5, 0.0, 0.0)).strength, 0);
        assert_eq!(derive_signal(&PriceChanges::new(-0.5, 0.0, 0.0)).strength, 0);
        assert_eq!(derive_signal(&PriceChanges::new(-2.0, 0.0, 0.0)).strength, -1);

        assert_eq!(derive_signal(&PriceChanges::new(0.0, 5.0, 0.0)).strength, 2);
        assert_eq!(derive_signal(&PriceChanges::new(0.0, 2.0, 0.0)).strength, 1);
        assert_eq!(derive_signal(&PriceChanges::new(0.0, -2.0, 0.0)).strength, -1);
        assert_eq!(derive_signal(&PriceChanges::new(0.0, -5.0, 0.0)).strength, -2);

        assert_eq!(derive_signal(&PriceChanges::new(0.0, 0.0, 10.0)).strength, 1);
        assert_eq!(derive_signal(&PriceChanges::new(0.0, 0.0, 5.0)).strength, 0);
        assert_eq!(derive_signal(&PriceChanges::new(0.0, 0.0, -5.0)).strength, 0);
        assert_eq!(derive_signal(&PriceChanges::new(0.0, 0.0, -10.0)).strength, -1);
    }

    #[test]
    fn label_ladder_over_the_full_strength_range() {
        let cases = [
            (7, Signal::StrongBuy),
            (5, Signal::StrongBuy),
            (4, Signal::Buy),
            (3, Signal::Buy),
            (2, Signal::Hold),
            (1, Signal::Hold),
            (0, Signal::Hold),
            (-1, Signal::Hold),
            (-2, Signal::Hold),
            (-3, Signal::Sell),
            (-4, Signal::Sell),
            (-5, Signal::StrongSell),
            (-7, Signal::StrongSell),
        ];
        for (strength, expected) in cases {
            assert_eq!(label_for(strength), expected, "strength {strength}");
        }
    }

    #[test]
    fn missing_windows_contribute_nothing() {
        let reading = derive_signal(&PriceChanges {
            h1: None,
            h24: Some(6.0),
            d7: None,
        });
        assert_eq!(reading.strength, 3);
        assert_eq!(reading.signal, Signal::Buy);

        assert_eq!(derive_signal(&PriceChanges::default()).strength, 0);
    }

    #[test]
    fn non_finite_input_reads_as_flat() {
        let reading = derive_signal(&PriceChanges::new(
            f64::NAN,
            f64::INFINITY,
            f64::NEG_INFINITY,
        ));
        assert_eq!(reading.strength, 0);
        assert_eq!(reading.signal, Signal::Hold);
    }

    #[test]
    fn extreme_moves_saturate_at_the_strongest_label() {
        let up = derive_signal(&PriceChanges::new(900.0, 900.0, 900.0));
        assert_eq!(up.strength, 7);
        assert_eq!(up.signal, Signal::StrongBuy);

        let down = derive_signal(&PriceChanges::new(-900.0, -900.0, -900.0));
        assert_eq!(down.strength, -7);
        assert_eq!(down.signal, Signal::StrongSell);
    }

    #[test]
    fn strength_is_monotonic_in_each_window() {
        let grid = [
            -12.0, -6.0, -3.0, -1.0, -0.2, 0.0, 0.2, 1.0, 3.0, 6.0, 12.0,
        ];
        for &fixed in &grid {
            for window in 0..3 {
                let mut prev = i32::MIN;
                for &v in &grid {
                    let changes = match window {
                        0 => PriceChanges::new(v, fixed, fixed),
                        1 => PriceChanges::new(fixed, v, fixed),
                        _ => PriceChanges::new(fixed, fixed, v),
                    };
                    let strength = derive_signal(&changes).strength;
                    assert!(
                        strength >= prev,
                        "window {window}: strength dropped from {prev} to {strength} at {v}"
                    );
                    prev = strength;
                }
            }
        }
    }

    #[test]
    fn repeated_calls_agree() {
        let changes = PriceChanges::new(1.7, -4.2, 8.8);
        assert_eq!(derive_signal(&changes), derive_signal(&changes));
    }

    #[test]
    fn display_matches_dashboard_labels() {
        assert_eq!(Signal::StrongBuy.to_string(), "Strong Buy");
        assert_eq!(Signal::StrongSell.to_string(), "Strong Sell");
        assert_eq!(Signal::Hold.to_string(), "Hold");
    }
}
