//! Renders the density of a correlated two-cluster cloud as a terminal heatmap.
//!
//! ```text
//! cargo run --example ascii_heatmap
//! ```

use gridkde::prelude::*;

const RAMP: &[u8] = b" .:-=+*#%@";

fn main() -> Result<()> {
    let mut rng = fastrand::Rng::with_seed(7);
    let mut normal = move || {
        let r = (-2.0 * (1.0 - rng.f64()).ln()).sqrt();
        r * (2.0 * core::f64::consts::PI * rng.f64()).cos()
    };

    let mut x = Vec::new();
    let mut y = Vec::new();
    for (cx, cy, n) in [(-1.5, -1.0, 6_000), (1.5, 1.0, 3_000)] {
        for _ in 0..n {
            let u = normal();
            let v = normal();
            x.push(cx + 0.8 * u);
            y.push(cy + 0.5 * u + 0.4 * v);
        }
    }

    let config = KdeConfig::builder()
        .grid_size(72, 24)
        .domain_extents(Extents::new(-4.5, 4.5, -3.5, 3.5)?)
        .build()?;
    let grid = estimate_density(&x, &y, None, &config)?;

    let peak = grid.max_value();
    let (rows, _) = grid.shape();
    // Highest y first so the picture is upright.
    for r in (0..rows).rev() {
        let line: String = grid
            .row(r)
            .iter()
            .map(|&v| {
                let level = ((v / peak) * (RAMP.len() - 1) as f64).round() as usize;
                RAMP[level.min(RAMP.len() - 1)] as char
            })
            .collect();
        println!("{line}");
    }

    let (r, c) = grid.argmax();
    println!(
        "mode at x = {:.2}, y = {:.2}; mass = {:.4}",
        grid.x_coords()[c],
        grid.y_coords()[r],
        grid.cell_mass()
    );
    Ok(())
}
