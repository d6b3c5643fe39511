use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linear_svm::math::grad_check::{grad_check_sparse, DEFAULT_STEP};
use linear_svm::{Matrix, Result, SvmLoss};

type Evaluate = fn(&Matrix, &Matrix, &[usize], f64) -> Result<(f64, Matrix)>;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(7);
    let weights = Matrix::random_with(20, 5, &mut rng).scale(0.1);
    let features = Matrix::random_with(40, 20, &mut rng);
    let labels: Vec<usize> = (0..40).map(|_| rng.gen_range(0..5)).collect();

    let forms: [(&str, Evaluate); 2] = [
        ("naive", SvmLoss::evaluate_naive),
        ("vectorized", SvmLoss::evaluate_vectorized),
    ];

    for (name, evaluate) in forms {
        for reg in [0.0, 5e1] {
            println!("{name}, reg = {reg}");
            let (_, grad) = evaluate(&weights, &features, &labels, reg)?;
            let samples = grad_check_sparse(
                |w: &Matrix| evaluate(w, &features, &labels, reg).map(|(loss, _)| loss),
                &weights,
                &grad,
                10,
                DEFAULT_STEP,
                &mut rng,
            )?;
            let worst = samples.iter().map(|s| s.relative_error).fold(0.0, f64::max);
            println!("  worst relative error over {} samples: {worst:e}", samples.len());
        }
    }

    Ok(())
}
