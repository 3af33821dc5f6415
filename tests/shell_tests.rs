#![cfg(feature = "offset")]

mod support;

use foilgen::shell::{ShellConfig, build_hollow_wing_solid, cavity_profiles};
use foilgen::traits::SolidKernel;
use foilgen::wing::{ChordProfile, wing_profiles};

use crate::support::{StubSolid, test_wing};

#[test]
fn cavity_exists_and_stops_short_of_the_tip() {
    let cfg = test_wing();
    let shell = ShellConfig { wall_thickness_mm: 1.0 };
    let cavity = cavity_profiles(&cfg, &shell).unwrap();
    assert!(cavity.len() >= 2, "expected a usable cavity stack");

    let max_z = cavity
        .iter()
        .map(|p| p.bounding_box().maxs.z)
        .fold(0.0, f64::max);
    // solid tip cap: the cavity never reaches the last wall thickness of span
    assert!(max_z <= 575.0 - 1.0 + 1e-9, "cavity ran into the tip cap: {}", max_z);
}

#[test]
fn thin_slices_are_skipped_as_solid() {
    // NACA 0015 on a 149 → 50 mm trapezoid: max thickness runs 22.35 mm at
    // the root down to 7.5 mm at the tip. A 3 mm wall needs 9 mm of section,
    // so outboard slices must be skipped while the root region stays hollow.
    let cfg = test_wing();
    let shell = ShellConfig { wall_thickness_mm: 3.0 };
    let cavity = cavity_profiles(&cfg, &shell).unwrap();
    assert!(!cavity.is_empty(), "root region is thick enough to hollow");

    // thinnest admissible chord: 3·wall / 0.15 = 60 mm → nz ≈ 0.899
    let nz_cutoff = (149.0 - 60.0) / 99.0;
    let max_z = cavity
        .iter()
        .map(|p| p.bounding_box().maxs.z)
        .fold(0.0, f64::max);
    assert!(
        max_z <= nz_cutoff * 575.0 + 1e-6,
        "cavity extended into slices too thin for the wall: {}",
        max_z
    );
}

#[test]
fn wall_guard_reacts_to_chord_size() {
    // same airfoil, same wall: a big-chord wing hollows, a tiny one does not
    let shell = ShellConfig { wall_thickness_mm: 2.0 };

    let mut big = test_wing();
    big.chord = ChordProfile::Trapezoidal { root_chord_mm: 200.0, tip_chord_mm: 180.0 };
    assert!(cavity_profiles(&big, &shell).unwrap().len() >= 2);

    let mut small = test_wing();
    small.chord = ChordProfile::Trapezoidal { root_chord_mm: 30.0, tip_chord_mm: 20.0 };
    // 30 mm chord · 0.15 = 4.5 mm of section < 6 mm needed: all slices skip
    assert!(cavity_profiles(&small, &shell).unwrap().is_empty());
}

#[test]
fn cavity_is_strictly_inside_the_outer_skin() {
    let cfg = test_wing();
    let shell = ShellConfig { wall_thickness_mm: 1.5 };
    let outer = wing_profiles(&cfg).unwrap();
    let cavity = cavity_profiles(&cfg, &shell).unwrap();

    let outer_bb = StubSolid::loft(&outer).bounding_box();
    let cavity_bb = StubSolid::loft(&cavity).bounding_box();
    assert!(cavity_bb.mins.x > outer_bb.mins.x);
    assert!(cavity_bb.maxs.x < outer_bb.maxs.x);
    assert!(cavity_bb.mins.y > outer_bb.mins.y);
    assert!(cavity_bb.maxs.y < outer_bb.maxs.y);
}

#[test]
fn hollow_build_falls_back_to_solid_when_too_thin() {
    let mut cfg = test_wing();
    cfg.chord = ChordProfile::Trapezoidal { root_chord_mm: 30.0, tip_chord_mm: 20.0 };
    let shell = ShellConfig { wall_thickness_mm: 2.0 };
    // no cavity profiles at all: generation still completes, wing stays solid
    let solid: StubSolid = build_hollow_wing_solid(&cfg, &shell).unwrap();
    let plain: StubSolid = StubSolid::loft(&wing_profiles(&cfg).unwrap());
    assert_eq!(solid.points.len(), plain.points.len());
}
