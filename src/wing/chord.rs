//! Span-wise chord-distribution laws.

use crate::errors::ConfigError;
use crate::float_types::Real;

/// Pure mapping from normalized span position to local chord length.
///
/// Callers clamp the domain to [0, 1]; there are no error conditions here.
#[derive(Clone, Debug, PartialEq)]
pub enum ChordProfile {
    /// Linear taper from root to tip.
    Trapezoidal { root_chord_mm: Real, tip_chord_mm: Real },
    /// Power-law ellipse `root · (1 - nz^p)^(1/p)`; the chord reaches exactly
    /// zero at the tip for any p > 0. `p = 2` is the true ellipse.
    Elliptic { root_chord_mm: Real, elliptic_power: Real },
}

impl ChordProfile {
    /// Chord length at normalized span position `nz ∈ [0, 1]`, in mm.
    pub fn chord(&self, nz: Real) -> Real {
        match *self {
            ChordProfile::Trapezoidal { root_chord_mm, tip_chord_mm } => {
                root_chord_mm - (root_chord_mm - tip_chord_mm) * nz
            },
            ChordProfile::Elliptic { root_chord_mm, elliptic_power } => {
                if nz >= 1.0 {
                    return 0.0;
                }
                root_chord_mm * (1.0 - nz.powf(elliptic_power)).powf(1.0 / elliptic_power)
            },
        }
    }

    pub fn root_chord_mm(&self) -> Real {
        match *self {
            ChordProfile::Trapezoidal { root_chord_mm, .. } => root_chord_mm,
            ChordProfile::Elliptic { root_chord_mm, .. } => root_chord_mm,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let root = self.root_chord_mm();
        if root <= 0.0 {
            return Err(ConfigError::NonPositive { name: "root_chord_mm", value: root });
        }
        match *self {
            ChordProfile::Trapezoidal { tip_chord_mm, .. } => {
                if tip_chord_mm <= 0.0 {
                    return Err(ConfigError::NonPositive {
                        name: "tip_chord_mm",
                        value: tip_chord_mm,
                    });
                }
            },
            ChordProfile::Elliptic { elliptic_power, .. } => {
                if elliptic_power <= 0.0 {
                    return Err(ConfigError::NonPositive {
                        name: "elliptic_power",
                        value: elliptic_power,
                    });
                }
            },
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trapezoidal_is_affine() {
        // root=149mm, tip=50mm, span=575mm
        let chord = ChordProfile::Trapezoidal { root_chord_mm: 149.0, tip_chord_mm: 50.0 };
        assert_eq!(chord.chord(0.0), 149.0);
        assert_eq!(chord.chord(1.0), 50.0);
        // chord at mid-span (287.5mm of 575mm) is the arithmetic mean
        assert!((chord.chord(0.5) - 99.5).abs() < 1e-12);
        // affine: second differences vanish
        let d1 = chord.chord(0.25) - chord.chord(0.0);
        let d2 = chord.chord(0.5) - chord.chord(0.25);
        assert!((d1 - d2).abs() < 1e-12);
    }

    #[test]
    fn elliptic_endpoints() {
        let chord = ChordProfile::Elliptic { root_chord_mm: 149.0, elliptic_power: 1.5 };
        assert_eq!(chord.chord(0.0), 149.0);
        assert_eq!(chord.chord(1.0), 0.0);
        let mid = chord.chord(0.5);
        assert!(mid > 0.0 && mid < 149.0);
    }

    #[test]
    fn elliptic_p2_matches_closed_form() {
        let chord = ChordProfile::Elliptic { root_chord_mm: 100.0, elliptic_power: 2.0 };
        // true ellipse: c(nz) = root·sqrt(1 - nz²)
        let expected = 100.0 * (1.0 - 0.25 as Real).sqrt();
        assert!((chord.chord(0.5) - expected).abs() < 1e-9);
    }

    #[test]
    fn validate_rejects_non_positive_chords() {
        let bad_tip = ChordProfile::Trapezoidal { root_chord_mm: 149.0, tip_chord_mm: -1.0 };
        assert!(matches!(
            bad_tip.validate(),
            Err(ConfigError::NonPositive { name: "tip_chord_mm", .. })
        ));
        let zero_tip = ChordProfile::Trapezoidal { root_chord_mm: 149.0, tip_chord_mm: 0.0 };
        assert!(zero_tip.validate().is_err());
        let bad_root = ChordProfile::Trapezoidal { root_chord_mm: 0.0, tip_chord_mm: 50.0 };
        assert!(matches!(
            bad_root.validate(),
            Err(ConfigError::NonPositive { name: "root_chord_mm", .. })
        ));
    }

    #[test]
    fn chord_stays_positive_inside_domain() {
        let profiles = [
            ChordProfile::Trapezoidal { root_chord_mm: 149.0, tip_chord_mm: 50.0 },
            ChordProfile::Elliptic { root_chord_mm: 149.0, elliptic_power: 1.5 },
        ];
        for profile in &profiles {
            for i in 0..100 {
                let nz = i as Real / 100.0;
                assert!(profile.chord(nz) > 0.0, "chord vanished at nz={}", nz);
            }
        }
    }
}
