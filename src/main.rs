// Evaluates both forms of the hinge loss on a seeded random problem and
// reports how closely they agree. Set RUST_LOG=debug for per-call detail.
//   cargo run --example gradient_check
use log::info;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linear_svm::{Matrix, Result, SvmLoss};

const DIM: usize = 32;
const CLASSES: usize = 10;
const BATCH: usize = 64;
const REG: f64 = 5e-6;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(231);
    let weights = Matrix::random_with(DIM, CLASSES, &mut rng).scale(1e-2);
    let features = Matrix::random_with(BATCH, DIM, &mut rng);
    let labels: Vec<usize> = (0..BATCH).map(|_| rng.gen_range(0..CLASSES)).collect();

    let (naive_loss, naive_grad) = SvmLoss::evaluate_naive(&weights, &features, &labels, REG)?;
    let (vec_loss, vec_grad) = SvmLoss::evaluate_vectorized(&weights, &features, &labels, REG)?;

    info!("naive loss: {naive_loss:.9}");
    info!("vectorized loss: {vec_loss:.9}");
    info!("loss difference: {:e}", (naive_loss - vec_loss).abs());
    info!("gradient distance: {:e}", naive_grad.distance(&vec_grad)?);
    info!("gradient max abs difference: {:e}", naive_grad.max_abs_diff(&vec_grad)?);

    Ok(())
}
