use approx::{assert_abs_diff_eq, assert_relative_eq};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use linear_svm::math::grad_check::numerical_gradient;
use linear_svm::{EvaluatorConfig, HingeLossEvaluator, Matrix, Strategy, SvmLoss};

struct Problem {
    weights: Matrix,
    features: Matrix,
    labels: Vec<usize>,
}

fn problem(dim: usize, classes: usize, batch: usize, seed: u64) -> Problem {
    let mut rng = StdRng::seed_from_u64(seed);
    Problem {
        weights: Matrix::random_with(dim, classes, &mut rng),
        features: Matrix::random_with(batch, dim, &mut rng),
        labels: (0..batch).map(|_| rng.gen_range(0..classes)).collect(),
    }
}

fn assert_matrix_eq(a: &Matrix, b: &Matrix, epsilon: f64) {
    assert_eq!((a.rows, a.cols), (b.rows, b.cols));
    for (x, y) in a.data.iter().flatten().zip(b.data.iter().flatten()) {
        assert_abs_diff_eq!(*x, *y, epsilon = epsilon);
    }
}

#[test]
fn naive_and_vectorized_agree() {
    for (seed, reg) in [(1, 0.0), (2, 1e-3), (3, 0.5), (4, 2.0)] {
        let p = problem(12, 6, 20, seed);
        let (naive_loss, naive_grad) =
            SvmLoss::evaluate_naive(&p.weights, &p.features, &p.labels, reg).unwrap();
        let (vec_loss, vec_grad) =
            SvmLoss::evaluate_vectorized(&p.weights, &p.features, &p.labels, reg).unwrap();

        assert_relative_eq!(naive_loss, vec_loss, max_relative = 1e-7);
        assert_matrix_eq(&naive_grad, &vec_grad, 1e-7);
    }
}

#[test]
fn analytic_gradient_matches_finite_differences() {
    let p = problem(10, 4, 8, 42);
    let reg = 0.1;

    for strategy in [Strategy::Naive, Strategy::Vectorized] {
        let evaluator = HingeLossEvaluator::new(EvaluatorConfig::new(reg, strategy)).unwrap();
        let (_, analytic) = evaluator.evaluate(&p.weights, &p.features, &p.labels).unwrap();
        let numerical = numerical_gradient(
            |w: &Matrix| evaluator.evaluate(w, &p.features, &p.labels).map(|(loss, _)| loss),
            &p.weights,
            1e-6,
        )
        .unwrap();

        assert_matrix_eq(&analytic, &numerical, 1e-5);
    }
}

#[test]
fn loss_is_non_negative() {
    for seed in 0..10 {
        let p = problem(5, 3, 7, seed);
        for reg in [0.0, 0.3] {
            let (naive, _) = SvmLoss::evaluate_naive(&p.weights, &p.features, &p.labels, reg).unwrap();
            let (vectorized, _) =
                SvmLoss::evaluate_vectorized(&p.weights, &p.features, &p.labels, reg).unwrap();
            assert!(naive >= 0.0);
            assert!(vectorized >= -1e-12);
        }
    }
}

#[test]
fn separated_batch_has_zero_loss_and_gradient() {
    let weights = Matrix::from_data(vec![vec![10.0, 0.0], vec![0.0, 10.0]]);
    let features = Matrix::from_data(vec![vec![1.0, 0.0], vec![0.0, 1.0], vec![2.0, 0.5]]);
    let labels = [0, 1, 0];

    let (loss, grad) = SvmLoss::evaluate_naive(&weights, &features, &labels, 0.0).unwrap();
    assert_eq!(loss, 0.0);
    assert_eq!(grad, Matrix::zeros(2, 2));

    let (loss, grad) = SvmLoss::evaluate_vectorized(&weights, &features, &labels, 0.0).unwrap();
    assert_eq!(loss, 0.0);
    assert_eq!(grad, Matrix::zeros(2, 2));
}

#[test]
fn doubling_reg_doubles_its_contribution() {
    let p = problem(6, 4, 9, 17);
    let reg = 0.25;

    for evaluate in [SvmLoss::evaluate_naive, SvmLoss::evaluate_vectorized] {
        let (base_loss, base_grad) = evaluate(&p.weights, &p.features, &p.labels, 0.0).unwrap();
        let (loss, grad) = evaluate(&p.weights, &p.features, &p.labels, reg).unwrap();
        let (loss2, grad2) = evaluate(&p.weights, &p.features, &p.labels, 2.0 * reg).unwrap();

        assert_relative_eq!(loss2 - base_loss, 2.0 * (loss - base_loss), max_relative = 1e-10);
        assert_matrix_eq(
            &(grad2 - base_grad.clone()),
            &(grad - base_grad).scale(2.0),
            1e-12,
        );
    }
}

#[test]
fn example_order_does_not_matter() {
    let p = problem(7, 5, 11, 99);
    let mut order: Vec<usize> = (0..p.labels.len()).collect();
    order.reverse();
    order.swap(0, 5);

    let features = Matrix::from_data(order.iter().map(|&i| p.features.data[i].clone()).collect());
    let labels: Vec<usize> = order.iter().map(|&i| p.labels[i]).collect();

    for evaluate in [SvmLoss::evaluate_naive, SvmLoss::evaluate_vectorized] {
        let (loss, grad) = evaluate(&p.weights, &p.features, &p.labels, 0.1).unwrap();
        let (shuffled_loss, shuffled_grad) = evaluate(&p.weights, &features, &labels, 0.1).unwrap();
        assert_relative_eq!(loss, shuffled_loss, max_relative = 1e-12);
        assert_matrix_eq(&grad, &shuffled_grad, 1e-12);
    }
}

#[test]
fn inputs_are_left_untouched() {
    let p = problem(4, 3, 5, 8);
    let weights = p.weights.clone();
    let (_, grad) = SvmLoss::evaluate_vectorized(&p.weights, &p.features, &p.labels, 1.0).unwrap();
    assert_eq!(p.weights, weights);
    assert_ne!(grad, weights);
}

#[test]
fn shared_evaluator_across_threads() {
    let p = problem(8, 4, 16, 5);
    let evaluator = HingeLossEvaluator::new(EvaluatorConfig::new(0.05, Strategy::Vectorized)).unwrap();
    let expected = evaluator.evaluate(&p.weights, &p.features, &p.labels).unwrap();

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| evaluator.evaluate(&p.weights, &p.features, &p.labels).unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
