use clap::{Args, Parser, Subcommand, ValueEnum};
use std::error::Error;
use std::path::PathBuf;

use bullet_designer::{
    analyze_design, default_materials, generate_profile, run_trajectory, solve_dimensions,
    twist_calibers, weight_from_volume, BallisticReport, BaseFamily, BulletProfile, DesignFile,
    DesignParameters, DesignPreset, DimensionSolution, Environment, MaterialDatabase,
    OgiveFamily, TrajectoryReport, TrajectoryRequest, ValidationReport, DEFAULT_MAX_ITERATIONS,
};

#[derive(Parser)]
#[command(name = "bullet-cli")]
#[command(author = "Bullet Designer Team")]
#[command(version)]
#[command(about = "Parametric bullet design and ballistics calculator", long_about = None)]
struct Cli {
    /// Suppress validation warnings on stderr
    #[arg(short = 'q', long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Emit the axial profile of a design
    Profile {
        #[command(flatten)]
        design: DesignArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Solve overall length and boat-tail length from the target weight
    Solve {
        #[command(flatten)]
        design: DesignArgs,

        /// Maximum solver iterations
        #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
        iterations: usize,

        /// Write the solved design to a JSON design file
        #[arg(long)]
        save: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Sectional density, ballistic coefficients, stability and twist
    Analyze {
        #[command(flatten)]
        design: DesignArgs,

        #[command(flatten)]
        environment: EnvironmentArgs,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// Calculate a sampled trajectory
    Trajectory {
        #[command(flatten)]
        design: DesignArgs,

        #[command(flatten)]
        environment: EnvironmentArgs,

        /// G1 ballistic coefficient to use instead of the estimate
        #[arg(short = 'b', long)]
        bc: Option<f64>,

        /// Time step (seconds)
        #[arg(long, default_value = "0.001")]
        time_step: f64,

        /// Distance between samples (meters)
        #[arg(long, default_value = "100.0")]
        sample_interval: f64,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },

    /// List the material table
    Materials {
        /// Load materials from a JSON file instead of the built-in table
        #[arg(long)]
        file: Option<PathBuf>,

        /// Output format
        #[arg(short = 'o', long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Args, Debug, Default)]
struct DesignArgs {
    /// JSON design file
    #[arg(long)]
    design: Option<PathBuf>,

    /// Starting design when no file supplies one
    #[arg(long)]
    preset: Option<PresetArg>,

    /// Groove diameter (mm)
    #[arg(long)]
    groove: Option<f64>,

    /// Land diameter (mm)
    #[arg(long)]
    land: Option<f64>,

    /// Overall length (mm)
    #[arg(short = 'l', long)]
    length: Option<f64>,

    /// Mass (grains)
    #[arg(short = 'm', long)]
    mass: Option<f64>,

    /// Ogive family (tangent, secant, elliptical)
    #[arg(long)]
    ogive: Option<String>,

    /// Ogive length in calibers
    #[arg(long)]
    ogive_ratio: Option<f64>,

    /// Meplat diameter (mm)
    #[arg(long)]
    meplat: Option<f64>,

    /// Number of driving bands
    #[arg(long)]
    bands: Option<u32>,

    /// Band length (mm)
    #[arg(long)]
    band_length: Option<f64>,

    /// Band spacing (mm)
    #[arg(long)]
    band_spacing: Option<f64>,

    /// Base family (flat, boat-tail)
    #[arg(long)]
    base: Option<String>,

    /// Boat-tail length (mm)
    #[arg(long)]
    boat_tail_length: Option<f64>,

    /// Boat-tail half-angle (degrees)
    #[arg(long)]
    boat_tail_angle: Option<f64>,

    /// Material name from the material table
    #[arg(long)]
    material: Option<String>,

    /// Material JSON file used to resolve --material
    #[arg(long)]
    materials_file: Option<PathBuf>,

    /// Material density (g/cm³), overrides --material
    #[arg(long)]
    density: Option<f64>,

    /// Body rides the groove diameter instead of the land diameter
    #[arg(long)]
    groove_riding: bool,
}

#[derive(Args, Debug, Default)]
struct EnvironmentArgs {
    /// Muzzle velocity (m/s)
    #[arg(short = 'v', long)]
    velocity: Option<f64>,

    /// Temperature (Celsius)
    #[arg(long)]
    temperature: Option<f64>,

    /// Pressure (hPa)
    #[arg(long)]
    pressure: Option<f64>,

    /// Barrel twist (inches per turn)
    #[arg(short = 't', long)]
    twist: Option<f64>,

    /// Bore elevation (degrees)
    #[arg(short = 'a', long)]
    elevation: Option<f64>,

    /// Maximum range (meters)
    #[arg(long)]
    max_range: Option<f64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Csv,
    Table,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PresetArg {
    Traditional,
    Vld,
}

impl From<PresetArg> for DesignPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Traditional => DesignPreset::Traditional,
            PresetArg::Vld => DesignPreset::Vld,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let quiet = cli.quiet;

    match cli.command {
        Commands::Profile { design, output } => {
            let (params, _) = load_design(&design, None)?;
            let profile = generate_profile(&params);
            report_issues(&profile.report, quiet);
            display_profile(&profile, output)?;
        },

        Commands::Solve { design, iterations, save, output } => {
            let (params, _) = load_design(&design, None)?;
            let solution = solve_dimensions(&params, iterations);
            report_issues(&solution.report, quiet);
            display_solution(&solution, output)?;

            if !solution.is_valid {
                return Err(solution.message.into());
            }

            if let Some(path) = save {
                let file = DesignFile {
                    design: Some(solution.apply_to(&params)),
                    ..DesignFile::default()
                };
                std::fs::write(&path, file.to_json_string()?)?;
                if !quiet {
                    eprintln!("Saved solved design to {}", path.display());
                }
            }
        },

        Commands::Analyze { design, environment, output } => {
            let (params, env) = load_design(&design, Some(&environment))?;
            let report = analyze_design(&params, &env);
            report_issues(&report.validation, quiet);
            display_analysis(&report, &env, output)?;
        },

        Commands::Trajectory {
            design, environment, bc, time_step, sample_interval, output
        } => {
            let (params, env) = load_design(&design, Some(&environment))?;
            let mut request = TrajectoryRequest::new(params, env);
            request.bc_g1_override = bc;
            request.time_step_s = time_step;
            request.sample_interval_m = sample_interval;

            let report = run_trajectory(&request);
            report_issues(&report.validation, quiet);
            display_trajectory(&report, output)?;
        },

        Commands::Materials { file, output } => {
            let db = match file {
                Some(path) => MaterialDatabase::from_path(&path)?,
                None => default_materials().clone(),
            };
            display_materials(&db, output)?;
        },
    }

    Ok(())
}

// Resolve the design file, material and command-line overrides
fn load_design(
    args: &DesignArgs,
    env_args: Option<&EnvironmentArgs>,
) -> Result<(DesignParameters, Environment), Box<dyn Error>> {
    let mut file = match &args.design {
        Some(path) => DesignFile::from_path(path)?,
        None => DesignFile::default(),
    };
    if let Some(preset) = args.preset {
        if file.design.is_none() {
            file.design = Some(DesignParameters::preset(preset.into()));
        } else {
            eprintln!("Design file supplied; ignoring --preset.");
        }
    }
    if let Some(material) = &args.material {
        file.material = Some(material.clone());
    }

    let mut params = match &args.materials_file {
        Some(path) => file.design_parameters(&MaterialDatabase::from_path(path)?)?,
        None => file.design_parameters(default_materials())?,
    };

    if let Some(v) = args.groove { params.groove_diameter_mm = v; }
    if let Some(v) = args.land { params.land_diameter_mm = v; }
    if let Some(v) = args.length { params.length_mm = v; }
    if let Some(v) = args.mass { params.mass_grains = v; }
    if let Some(name) = &args.ogive { params.ogive = OgiveFamily::parse(name)?; }
    if let Some(v) = args.ogive_ratio { params.ogive_caliber_ratio = v; }
    if let Some(v) = args.meplat { params.meplat_diameter_mm = v; }
    if let Some(v) = args.bands { params.band_count = v; }
    if let Some(v) = args.band_length { params.band_length_mm = v; }
    if let Some(v) = args.band_spacing { params.band_spacing_mm = v; }
    if let Some(name) = &args.base { params.base = BaseFamily::parse(name)?; }
    if let Some(v) = args.boat_tail_length { params.boat_tail_length_mm = v; }
    if let Some(v) = args.boat_tail_angle { params.boat_tail_angle_deg = v; }
    if let Some(v) = args.density { params.density_g_cm3 = v; }
    if args.groove_riding { params.land_riding = false; }

    let mut env = file.environment();
    if let Some(e) = env_args {
        if let Some(v) = e.velocity { env.velocity_mps = v; }
        if let Some(v) = e.temperature { env.temperature_c = v; }
        if let Some(v) = e.pressure { env.pressure_hpa = v; }
        if let Some(v) = e.twist { env.twist_inches = v; }
        if let Some(v) = e.elevation { env.elevation_deg = v; }
        if let Some(v) = e.max_range { env.max_range_m = v; }
    }

    Ok((params, env))
}

fn report_issues(report: &ValidationReport, quiet: bool) {
    if quiet {
        return;
    }
    for issue in report.iter() {
        eprintln!("Warning: {}", issue);
    }
}

fn display_profile(profile: &BulletProfile, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(profile)?);
        },

        OutputFormat::Csv => {
            println!("z_mm,r_mm");
            for p in &profile.points {
                println!("{:.4},{:.4}", p.z_mm, p.r_mm);
            }
        },

        OutputFormat::Table => {
            let volume = profile.volume_mm3();
            let weight = weight_from_volume(volume, profile.params.density_g_cm3);
            println!("╔════════════════════════════════════════╗");
            println!("║           BULLET PROFILE               ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Body:   {:<30} ║", format!("{:?}", profile.strategy));
            println!("║ Length:            {:>8.2} mm         ║", profile.params.length_mm);
            println!("║ Max Diameter:      {:>8.3} mm         ║", profile.max_radius_mm() * 2.0);
            println!("║ Points:            {:>8}            ║", profile.points.len());
            println!("║ Volume:            {:>8.1} mm³        ║", volume);
            println!("║ Weight:            {:>8.1} gr         ║", weight);
            println!("╚════════════════════════════════════════╝");

            println!();
            println!("┌──────────┬──────────┐");
            println!("│  Z (mm)  │  R (mm)  │");
            println!("├──────────┼──────────┤");
            for p in &profile.points {
                println!("│ {:>8.3} │ {:>8.3} │", p.z_mm, p.r_mm);
            }
            println!("└──────────┴──────────┘");
        },
    }

    Ok(())
}

fn display_solution(solution: &DimensionSolution, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(solution)?);
        },

        OutputFormat::Csv => {
            println!("metric,value");
            println!("valid,{}", solution.is_valid);
            println!("iterations,{}", solution.iterations);
            println!("total_length_mm,{:.3}", solution.total_length_mm);
            println!("boat_tail_length_mm,{:.3}", solution.boat_tail_length_mm);
            println!("bearing_length_mm,{:.3}", solution.bearing_length_mm);
            println!("ogive_length_mm,{:.3}", solution.ogive_length_mm);
            println!("gap_length_needed_mm,{:.3}", solution.gap_length_needed_mm);
            println!("gap_coverage_mm,{:.3}", solution.gap_coverage_mm);
            println!("calculated_weight_grains,{:.2}", solution.calculated_weight_grains);
            println!("weight_error_percent,{:.3}", solution.weight_error_percent);
            println!("sectional_density,{:.3}", solution.sectional_density);
            println!("ballistic_coefficient,{:.3}", solution.ballistic_coefficient.value);
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         DIMENSION SOLUTION             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Valid:             {:>8}            ║", solution.is_valid);
            println!("║ Iterations:        {:>8}            ║", solution.iterations);
            println!("║ Total Length:      {:>8.2} mm         ║", solution.total_length_mm);
            println!("║ Boat-tail:         {:>8.2} mm         ║", solution.boat_tail_length_mm);
            println!("║ Bearing:           {:>8.2} mm         ║", solution.bearing_length_mm);
            println!("║ Ogive:             {:>8.2} mm         ║", solution.ogive_length_mm);
            println!("║ Gap Needed:        {:>8.2} mm         ║", solution.gap_length_needed_mm);
            println!("║ Gap Coverage:      {:>8.2} mm         ║", solution.gap_coverage_mm);
            println!("╠════════════════════════════════════════╣");
            println!("║ Target Weight:     {:>8.1} gr         ║", solution.target_weight_grains);
            println!("║ Calculated:        {:>8.1} gr         ║", solution.calculated_weight_grains);
            println!("║ Error:             {:>8.2} %          ║", solution.weight_error_percent);
            println!("║ Sectional Density: {:>8.3}            ║", solution.sectional_density);
            println!("║ L/D:               {:>8.2}            ║", solution.length_diameter_ratio);
            println!("║ Form Factor:       {:>8.3}            ║", solution.form_factor);
            println!("║ BC:                {:>8.3} {:<10} ║",
                solution.ballistic_coefficient.value,
                solution.ballistic_coefficient.family.to_string());
            println!("╚════════════════════════════════════════╝");
            println!("{}", solution.message);
        },
    }

    Ok(())
}

fn display_analysis(
    report: &BallisticReport,
    env: &Environment,
    format: OutputFormat,
) -> Result<(), Box<dyn Error>> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        },

        OutputFormat::Csv => {
            println!("metric,value");
            println!("sectional_density,{:.3}", report.sectional_density);
            println!("bc_g1,{:.3}", report.bc_g1.value);
            println!("bc_g7,{:.3}", report.bc_g7.value);
            println!("stability_factor,{:.2}", report.stability.factor);
            println!("stability_threshold,{:.2}", report.stability.threshold);
            println!("stability_status,{}", report.stability.status);
            println!("recommended_twist_inches,{}", report.recommended_twist_inches);
            println!("bearing_surface_mm2,{:.2}", report.bearing_surface_mm2);
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         BALLISTIC ANALYSIS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ Sectional Density: {:>8.3} lb/in²     ║", report.sectional_density);
            println!("║ BC (G1):           {:>8.3}            ║", report.bc_g1.value);
            println!("║ BC (G7):           {:>8.3}            ║", report.bc_g7.value);
            println!("║ Bearing Surface:   {:>8.1} mm²        ║", report.bearing_surface_mm2);
            println!("╠════════════════════════════════════════╣");
            println!("║ Twist:             {:>8.1} in         ║", env.twist_inches);
            println!("║ Twist:             {:>8.1} cal        ║",
                twist_calibers(env.twist_inches, report.effective_diameter_mm));
            println!("║ Stability (Sg):    {:>8.2}            ║", report.stability.factor);
            println!("║ Threshold:         {:>8.2}            ║", report.stability.threshold);
            println!("║ Status:            {:>8}            ║", report.stability.status.to_string());
            println!("║ Recommended:       {:>8}            ║", report.recommended_twist_label);
            println!("╚════════════════════════════════════════╝");
        },
    }

    Ok(())
}

fn display_trajectory(report: &TrajectoryReport, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let trajectory = &report.trajectory;
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        },

        OutputFormat::Csv => {
            println!("range_m,velocity_mps,mach,drop_cm,spin_drift_mm,time_s");
            for s in &trajectory.samples {
                println!("{:.2},{:.2},{:.3},{:.2},{:.2},{:.4}",
                    s.range_m, s.velocity_mps, s.mach, s.drop_cm, s.spin_drift_mm, s.time_s);
            }
        },

        OutputFormat::Table => {
            println!("╔════════════════════════════════════════╗");
            println!("║         TRAJECTORY RESULTS             ║");
            println!("╠════════════════════════════════════════╣");
            println!("║ BC (G1):           {:>8.3}            ║", report.bc_g1.value);
            println!("║ BC (G7):           {:>8.3}            ║", report.bc_g7.value);
            println!("║ Form Factor (i7):  {:>8.3}            ║", report.projectile.form_factor);
            println!("║ Air Density:       {:>8.4} kg/m³      ║", report.conditions.air_density_kg_m3);
            println!("║ Speed of Sound:    {:>8.1} m/s        ║", report.conditions.speed_of_sound_mps);
            match trajectory.transonic_entry_m {
                Some(r) => println!("║ Transonic Entry:   {:>8.0} m          ║", r),
                None => println!("║ Transonic Entry:       none           ║"),
            }
            match trajectory.transonic_exit_m {
                Some(r) => println!("║ Transonic Exit:    {:>8.0} m          ║", r),
                None => println!("║ Transonic Exit:        none           ║"),
            }
            println!("╚════════════════════════════════════════╝");

            println!();
            println!("┌──────────┬──────────┬────────┬──────────┬──────────┬──────────┐");
            println!("│ Range(m) │ Vel(m/s) │  Mach  │ Drop(cm) │ Drift(mm)│ Time (s) │");
            println!("├──────────┼──────────┼────────┼──────────┼──────────┼──────────┤");
            for s in &trajectory.samples {
                println!("│ {:>8.0} │ {:>8.1} │ {:>6.3} │ {:>8.1} │ {:>8.1} │ {:>8.3} │",
                    s.range_m, s.velocity_mps, s.mach, s.drop_cm, s.spin_drift_mm, s.time_s);
            }
            println!("└──────────┴──────────┴────────┴──────────┴──────────┴──────────┘");
            if let Some(reason) = trajectory.termination {
                println!("Stopped: {:?} after {} steps", reason, trajectory.steps);
            }
        },
    }

    Ok(())
}

fn display_materials(db: &MaterialDatabase, format: OutputFormat) -> Result<(), Box<dyn Error>> {
    let entries: Vec<_> = db.entries().collect();
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        },

        OutputFormat::Csv => {
            println!("name,density,description");
            for m in &entries {
                println!("{},{:.2},{}", m.name, m.density, m.description);
            }
        },

        OutputFormat::Table => {
            println!("┌──────────────────────────┬─────────┬──────────────────────────┐");
            println!("│ Material                 │ g/cm³   │ Description              │");
            println!("├──────────────────────────┼─────────┼──────────────────────────┤");
            for m in &entries {
                println!("│ {:<24} │ {:>7.2} │ {:<24} │", m.name, m.density, m.description);
            }
            println!("└──────────────────────────┴─────────┴──────────────────────────┘");
        },
    }

    Ok(())
}
