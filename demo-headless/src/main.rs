use anyhow::{anyhow, ensure, Result};
use clap::Parser;
use ic_sim_core::{Event, EventConfig, GaussianProfile, Nucleon};
use rayon::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Initial-condition demo: two lattice nuclei, one event or an impact sweep
#[derive(Parser, Debug)]
#[command(name = "ic-sim-demo")]
#[command(about = "Reduced-thickness initial conditions for two colliding nuclei", long_about = None)]
struct Args {
    /// Impact parameter in fm (upper end of the range when sweeping)
    #[arg(short, long, default_value_t = 4.0)]
    impact: f64,

    /// Nucleus radius in fm
    #[arg(long, default_value_t = 6.5)]
    radius: f64,

    /// Lattice spacing between nucleons in fm
    #[arg(long, default_value_t = 1.8)]
    spacing: f64,

    /// Gaussian nucleon width in fm
    #[arg(short = 'w', long, default_value_t = 0.5)]
    nucleon_width: f64,

    /// Inelastic nucleon-nucleon cross section in fm²
    #[arg(long, default_value_t = 6.4)]
    cross_section: f64,

    /// Generalized-mean exponent p
    #[arg(short = 'p', long, default_value_t = 0.0, allow_negative_numbers = true)]
    reduced_thickness: f64,

    /// Overall normalization
    #[arg(short, long, default_value_t = 1.0)]
    normalization: f64,

    /// Grid cell size in fm
    #[arg(long, default_value_t = 0.2)]
    grid_step: f64,

    /// Grid half-width in fm
    #[arg(long, default_value_t = 10.0)]
    grid_max: f64,

    /// Also compute binary-collision density
    #[arg(long)]
    ncoll: bool,

    /// Sweep impact parameter from 0 in this many steps (0 = single event)
    #[arg(short, long, default_value_t = 0)]
    sweep: usize,
}

/// Reject geometry that would build an empty or unbounded lattice
fn check_geometry(args: &Args) -> Result<()> {
    for (name, value) in [
        ("radius", args.radius),
        ("spacing", args.spacing),
        ("cross-section", args.cross_section),
    ] {
        ensure!(value.is_finite() && value > 0.0, "--{name} must be positive, got {value}");
    }
    ensure!(args.impact.is_finite(), "--impact must be finite, got {}", args.impact);
    Ok(())
}

/// Gaussian profile whose collision distance matches the participant cut
fn collision_profile(args: &Args) -> Result<GaussianProfile> {
    let max_impact = (args.cross_section / std::f64::consts::PI).sqrt();
    Ok(GaussianProfile::new(args.nucleon_width)?.with_max_impact(max_impact)?)
}

/// Nucleons on a triangular lattice inside a disk centered at `(x0, 0)`
fn lattice_nucleus(radius: f64, spacing: f64, x0: f64) -> Vec<Nucleon> {
    let row_height = spacing * 3.0_f64.sqrt() / 2.0;
    let rows = (radius / row_height).ceil() as i32;
    let cols = (radius / spacing).ceil() as i32 + 1;

    let mut nucleons = Vec::new();
    for j in -rows..=rows {
        let y = f64::from(j) * row_height;
        let shift = if j % 2 == 0 { 0.0 } else { 0.5 * spacing };
        for i in -cols..=cols {
            let x = f64::from(i) * spacing + shift;
            if x * x + y * y <= radius * radius {
                nucleons.push(Nucleon::spectator(x + x0, y));
            }
        }
    }
    nucleons
}

/// Flag every nucleon that lies within `sqrt(σ/π)` of a nucleon in the other nucleus
fn mark_participants(a: &mut [Nucleon], b: &mut [Nucleon], cross_section: f64) {
    let max_dist_sq = cross_section / std::f64::consts::PI;
    for na in &mut *a {
        for nb in &mut *b {
            if na.distance_sq(nb) <= max_dist_sq {
                na.set_participant();
                nb.set_participant();
            }
        }
    }
}

fn build_nuclei(args: &Args, impact: f64) -> (Vec<Nucleon>, Vec<Nucleon>) {
    let mut a = lattice_nucleus(args.radius, args.spacing, -0.5 * impact);
    let mut b = lattice_nucleus(args.radius, args.spacing, 0.5 * impact);
    mark_participants(&mut a, &mut b, args.cross_section);
    (a, b)
}

fn report(event: &Event, impact: f64) {
    let centroid = event.centroid_position();
    println!("b = {impact:.2} fm");
    println!(
        "  npart {}, ncoll {}, multiplicity {:.4}",
        event.npart(),
        event.ncoll(),
        event.multiplicity()
    );
    println!("  centroid ({:+.4}, {:+.4}) fm", centroid.x, centroid.y);
    let harmonics = event.harmonics();
    println!("  entropy {:.4}", harmonics.entropy());
    for (n, moment) in harmonics.orders() {
        println!(
            "  n = {}: eps {:.4}, angle {:+.4}, radius {:.4}",
            n, moment.eccentricity, moment.angle, moment.radius
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    check_geometry(&args)?;

    let config = EventConfig::default()
        .with_normalization(args.normalization)
        .with_grid(args.grid_step, args.grid_max)
        .with_reduced_thickness(args.reduced_thickness)
        .with_ncoll(args.ncoll);
    let profile = collision_profile(&args)?;

    let mut event = Event::new(&config)?;
    info!(
        "Grid {}x{} at {} fm, {} mean, nucleon width {} fm",
        event.geometry().nsteps(),
        event.geometry().nsteps(),
        event.geometry().step(),
        event.mean(),
        profile.width()
    );

    if args.sweep == 0 {
        let (a, b) = build_nuclei(&args, args.impact);
        info!("Nuclei built: {} + {} nucleons", a.len(), b.len());
        event.compute(&a, &b, &profile);
        report(&event, args.impact);
        return Ok(());
    }

    let impacts: Vec<f64> = (0..=args.sweep)
        .map(|i| args.impact * i as f64 / args.sweep as f64)
        .collect();
    info!("Sweeping {} impact parameters", impacts.len());

    // One Event per worker; each is reset on every compute
    let rows = impacts
        .par_iter()
        .map_init(
            || Event::new(&config),
            |event, &impact| -> Result<(f64, usize, f64, f64, f64)> {
                let event = event.as_mut().map_err(|e| anyhow!(e.clone()))?;
                let (a, b) = build_nuclei(&args, impact);
                event.compute(&a, &b, &profile);
                let harmonics = event.harmonics();
                Ok((
                    impact,
                    event.npart(),
                    event.multiplicity(),
                    harmonics.eccentricity(2).unwrap_or_default(),
                    harmonics.eccentricity(3).unwrap_or_default(),
                ))
            },
        )
        .collect::<Result<Vec<_>>>()?;

    println!("{:>8} {:>6} {:>12} {:>8} {:>8}", "b", "npart", "mult", "eps2", "eps3");
    for (impact, npart, mult, e2, e3) in rows {
        println!("{impact:>8.2} {npart:>6} {mult:>12.4} {e2:>8.4} {e3:>8.4}");
    }

    Ok(())
}
