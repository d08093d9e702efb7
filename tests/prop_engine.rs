//! Property-based tests for the design engine using proptest.
//!
//! Covers: drag table clamping and interpolation, sectional density scaling,
//! profile ordering and closure, dimension solver volume consistency.

use bullet_designer::*;
use proptest::prelude::*;

// ── Drag Table Properties ────────────────────────────────────────────

proptest! {
    /// Below the first Mach entry the first Cd is returned.
    #[test]
    fn drag_clamps_below_table(mach in -10.0f64..=0.0) {
        let table = g7_table();
        prop_assert_eq!(drag_coefficient(mach), table.cd_values[0]);
    }

    /// Above the last Mach entry the last Cd is returned.
    #[test]
    fn drag_clamps_above_table(extra in 0.0f64..10.0) {
        let table = g7_table();
        let last = table.cd_values[table.cd_values.len() - 1];
        prop_assert_eq!(drag_coefficient(table.max_mach() + extra), last);
    }

    /// Between two adjacent entries the curve follows the direction of the
    /// entries and stays inside their range.
    #[test]
    fn drag_monotonic_between_entries(idx in 0usize..21, a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
        let table = g7_table();
        let (m0, m1) = (table.mach_values[idx], table.mach_values[idx + 1]);
        let (c0, c1) = (table.cd_values[idx], table.cd_values[idx + 1]);
        let (lo_t, hi_t) = if a <= b { (a, b) } else { (b, a) };

        let lo = drag_coefficient(m0 + lo_t * (m1 - m0));
        let hi = drag_coefficient(m0 + hi_t * (m1 - m0));

        let eps = 1e-12;
        prop_assert!(lo >= c0.min(c1) - eps && lo <= c0.max(c1) + eps);
        prop_assert!(hi >= c0.min(c1) - eps && hi <= c0.max(c1) + eps);
        if c1 >= c0 {
            prop_assert!(hi >= lo - eps);
        } else {
            prop_assert!(hi <= lo + eps);
        }
    }
}

// ── Ballistic Metric Properties ──────────────────────────────────────

proptest! {
    /// Scaling diameter by k and mass by k² leaves sectional density unchanged.
    #[test]
    fn sectional_density_scaling_law(
        d in 3.0f64..15.0,
        m in 20.0f64..400.0,
        k in 0.25f64..4.0,
    ) {
        let base = sectional_density(d, m);
        let scaled = sectional_density(d * k, m * k * k);
        prop_assert!((base - scaled).abs() <= base * 1e-12,
            "sd({}, {}) = {}, scaled = {}", d, m, base, scaled);
    }

    /// Non-positive inputs never produce a metric or a fault.
    #[test]
    fn sectional_density_non_positive(d in -10.0f64..=0.0, m in 1.0f64..300.0) {
        prop_assert_eq!(sectional_density(d, m), 0.0);
        prop_assert_eq!(sectional_density(m, d), 0.0);
    }

    /// Threshold depends only on material density.
    #[test]
    fn stability_threshold_by_density(density in 0.5f64..20.0, twist in 5.0f64..14.0) {
        let design = DesignParameters { density_g_cm3: density, ..DesignParameters::default() };
        let env = Environment { twist_inches: twist, ..Environment::default() };
        let report = analyze_design(&design, &env);
        let expected = if (7.0..=9.5).contains(&density) { 1.8 } else { 1.5 };
        prop_assert_eq!(report.stability.threshold, expected);
        prop_assert!(report.stability.factor > 0.0);
    }
}

// ── Profile Properties ───────────────────────────────────────────────

fn design_strategy() -> impl Strategy<Value = DesignParameters> {
    (
        (4.0f64..13.0, 0.9f64..1.0, 10.0f64..70.0, 0.0f64..12.0),
        (0usize..3, -1.0f64..16.0, -0.5f64..4.0),
        (0u32..9, -0.5f64..4.0, -1.0f64..5.0),
        (any::<bool>(), -2.0f64..20.0, -5.0f64..20.0, any::<bool>()),
    )
        .prop_map(
            |(
                (groove, land_fraction, length, ogive_extra),
                (ogive_idx, ratio, meplat),
                (bands, band_length, spacing),
                (boat_tail, bt_length, bt_angle, land_riding),
            )| {
                let ogive = [OgiveFamily::Tangent, OgiveFamily::Secant, OgiveFamily::Elliptical][ogive_idx];
                DesignParameters {
                    groove_diameter_mm: groove,
                    land_diameter_mm: groove * land_fraction,
                    length_mm: length + ogive_extra,
                    ogive,
                    ogive_caliber_ratio: ratio,
                    meplat_diameter_mm: meplat,
                    band_count: bands,
                    band_length_mm: band_length,
                    band_spacing_mm: spacing,
                    base: if boat_tail { BaseFamily::BoatTail } else { BaseFamily::Flat },
                    boat_tail_length_mm: bt_length,
                    boat_tail_angle_deg: bt_angle,
                    land_riding,
                    ..DesignParameters::default()
                }
            },
        )
}

proptest! {
    /// The profile starts and ends on the axis and never steps backwards.
    #[test]
    fn profile_closed_and_ordered(design in design_strategy()) {
        let profile = generate_profile(&design);
        let points = &profile.points;

        prop_assert!(points.len() >= 3);
        prop_assert_eq!(points[0], ProfilePoint::new(0.0, 0.0));
        let last = points[points.len() - 1];
        prop_assert_eq!(last.r_mm, 0.0);
        prop_assert!((last.z_mm - profile.params.length_mm).abs() < 1e-9);

        for w in points.windows(2) {
            prop_assert!(w[1].z_mm >= w[0].z_mm, "{:?} -> {:?}", w[0], w[1]);
        }
        for p in points {
            prop_assert!(p.z_mm >= 0.0 && p.r_mm >= 0.0);
            prop_assert!(p.r_mm <= profile.params.groove_diameter_mm / 2.0 * 1.01 + 1e-9);
        }
    }

    /// Corrected parameters satisfy the design invariants.
    #[test]
    fn corrected_parameters_are_valid(design in design_strategy()) {
        let (p, _) = correct_parameters(&design);
        prop_assert!(p.land_diameter_mm < p.groove_diameter_mm);
        prop_assert!(p.band_count <= 6);
        prop_assert!(p.meplat_diameter_mm / 2.0 <= p.body_diameter_mm() / 2.0);
        prop_assert!(p.effective_boat_tail_mm() <= 0.3 * p.length_mm + 1e-9);
        prop_assert!(p.band_spacing_mm >= 0.0);
    }

    /// Regenerating from the same parameters gives the same profile.
    #[test]
    fn profile_is_deterministic(design in design_strategy()) {
        prop_assert_eq!(generate_profile(&design).points, generate_profile(&design).points);
    }
}

// ── Dimension Solver Properties ──────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// A valid solution reproduces the target volume within 1%.
    #[test]
    fn solver_volume_matches_target(
        mass in 60.0f64..300.0,
        groove in prop_oneof![-2.0f64..=0.0, 5.5f64..8.5],
        land_fraction in prop_oneof![-0.5f64..=0.0, 0.9f64..1.1],
        bands in 0u32..9,
        band_length in prop_oneof![-1.0f64..=0.0, 1.0f64..3.0],
        spacing in -1.0f64..4.0,
        ratio in prop_oneof![-3.0f64..=0.0, 3.0f64..9.0],
        boat_tail in any::<bool>(),
        land_riding in any::<bool>(),
    ) {
        let params = DesignParameters {
            groove_diameter_mm: groove,
            land_diameter_mm: groove * land_fraction,
            mass_grains: mass,
            band_count: bands,
            band_length_mm: band_length,
            band_spacing_mm: spacing,
            ogive_caliber_ratio: ratio,
            base: if boat_tail { BaseFamily::BoatTail } else { BaseFamily::Flat },
            land_riding,
            ..DesignParameters::default()
        };

        let solution = solve_dimensions(&params, 40);
        if solution.is_valid {
            for length in [
                solution.total_length_mm,
                solution.bearing_length_mm,
                solution.ogive_length_mm,
                solution.gap_length_needed_mm,
            ] {
                prop_assert!(length.is_finite() && length > 0.0,
                    "non-physical section {} in {:?}", length, solution);
            }
            prop_assert!(solution.boat_tail_length_mm.is_finite() && solution.boat_tail_length_mm >= 0.0);

            let solved = solution.apply_to(&params);
            let target = volume_from_weight(mass, params.density_g_cm3);
            let actual = design_volume_mm3(&solved);
            prop_assert!((actual - target).abs() / target < 0.01,
                "volume {} vs target {}", actual, target);
            prop_assert!(solution.gap_length_needed_mm >= solution.gap_coverage_mm);
            prop_assert!(solved.effective_boat_tail_mm() <= 0.3 * solved.length_mm + 1e-9);
            prop_assert!(solution.total_length_mm > solution.ogive_length_mm);
        } else {
            prop_assert!(!solution.message.is_empty());
            prop_assert_eq!(solution.total_length_mm, 0.0);
            prop_assert_eq!(solution.apply_to(&params), params);
        }
    }
}
