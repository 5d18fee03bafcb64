use chain_dp::utils::{left_to_right_cost, multiply_left_to_right};
use chain_dp::{
    ChainDims, ChainEngine, ChainError, LabelGenerator, LabelStyle, Matrix, Parenthesizer,
};
use proptest::prelude::*;

/// Small dimensions and entries keep every product well inside i64.
fn chain_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<Matrix>)> {
    proptest::collection::vec(1usize..6, 2..8).prop_flat_map(|p| {
        let shapes: Vec<(usize, usize)> = p.windows(2).map(|w| (w[0], w[1])).collect();
        let matrices: Vec<_> = shapes
            .into_iter()
            .map(|(r, c)| {
                proptest::collection::vec(-3i64..=3, r * c)
                    .prop_map(move |data| Matrix::from_vec(r, c, data).unwrap())
            })
            .collect();
        (Just(p), matrices)
    })
}

/// Long chains of 0/1 entries with dimensions 1..=2 stay far below i64.
fn long_chain_strategy() -> impl Strategy<Value = (Vec<usize>, Vec<Matrix>)> {
    proptest::collection::vec(1usize..=2, 28..34).prop_flat_map(|p| {
        let matrices: Vec<_> = p
            .windows(2)
            .map(|w| {
                let (r, c) = (w[0], w[1]);
                proptest::collection::vec(0i64..=1, r * c)
                    .prop_map(move |data| Matrix::from_vec(r, c, data).unwrap())
            })
            .collect();
        (Just(p), matrices)
    })
}

/// Split rendered text into leaf labels and brackets without knowing how
/// wide the labels are. Compact text (no spaces) has one letter per leaf;
/// spaced text has one alphanumeric run per leaf.
fn tokenize(text: &str) -> Vec<String> {
    let compact = !text.contains(' ');
    let mut tokens = Vec::new();
    let mut label = String::new();
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            label.push(ch);
            if compact {
                tokens.push(std::mem::take(&mut label));
            }
            continue;
        }
        if !label.is_empty() {
            tokens.push(std::mem::take(&mut label));
        }
        if ch != ' ' {
            tokens.push(ch.to_string());
        }
    }
    if !label.is_empty() {
        tokens.push(label);
    }
    tokens
}

/// Re-associate the chain by following the rendered bracketing, checking
/// that every leaf carries the label of its position.
fn eval_bracketing(text: &str, style: LabelStyle, matrices: &[Matrix]) -> Matrix {
    fn parse(
        tokens: &[String],
        pos: &mut usize,
        leaf: &mut usize,
        style: LabelStyle,
        ms: &[Matrix],
    ) -> Matrix {
        if tokens[*pos] == "(" {
            *pos += 1;
            let left = parse(tokens, pos, leaf, style, ms);
            let right = parse(tokens, pos, leaf, style, ms);
            assert_eq!(tokens[*pos], ")");
            *pos += 1;
            left.multiply(&right).unwrap()
        } else {
            assert_eq!(tokens[*pos], LabelGenerator::label_for(style, *leaf));
            *pos += 1;
            let m = ms[*leaf].clone();
            *leaf += 1;
            m
        }
    }
    let tokens = tokenize(text);
    let (mut pos, mut leaf) = (0, 0);
    let out = parse(&tokens, &mut pos, &mut leaf, style, matrices);
    assert_eq!(pos, tokens.len(), "trailing tokens in {text}");
    assert_eq!(leaf, matrices.len());
    out
}

proptest! {
    #[test]
    fn optimal_order_matches_left_to_right((p, matrices) in chain_strategy()) {
        let engine = ChainEngine::new(ChainDims::new(p).unwrap());
        let optimal = engine.evaluate(&matrices).unwrap();
        prop_assert_eq!(optimal, multiply_left_to_right(&matrices).unwrap());
    }

    #[test]
    fn reported_bracketing_is_executed_bracketing((p, matrices) in chain_strategy()) {
        let engine = ChainEngine::new(ChainDims::new(p).unwrap());
        let text = Parenthesizer::render(engine.plan(), LabelStyle::Letters);
        prop_assert_eq!(
            eval_bracketing(&text, LabelStyle::Letters, &matrices),
            engine.evaluate(&matrices).unwrap()
        );
    }

    #[test]
    fn long_chain_bracketing_reads_back_unambiguously((p, matrices) in long_chain_strategy()) {
        let engine = ChainEngine::new(ChainDims::new(p).unwrap());
        let expected = engine.evaluate(&matrices).unwrap();
        for style in [LabelStyle::Letters, LabelStyle::Indexed] {
            let text = Parenthesizer::render(engine.plan(), style);
            prop_assert_eq!(eval_bracketing(&text, style, &matrices), expected.clone());
        }
    }

    #[test]
    fn optimum_never_exceeds_naive_order(p in proptest::collection::vec(1usize..50, 2..20)) {
        let dims = ChainDims::new(p).unwrap();
        let engine = ChainEngine::new(dims.clone());
        prop_assert!(engine.min_cost() <= left_to_right_cost(&dims));
    }

    #[test]
    fn derived_dims_plan_like_declared_dims((p, matrices) in chain_strategy()) {
        let derived = ChainDims::from_matrices(&matrices).unwrap();
        prop_assert_eq!(derived.as_slice(), p.as_slice());
    }
}

#[test]
fn broken_link_surfaces_as_dimension_mismatch() {
    let engine = ChainEngine::new(ChainDims::new(vec![2, 3, 3, 2]).unwrap());
    let matrices = vec![
        Matrix::from_fn(2, 3, |i, j| (i + j) as i64),
        Matrix::from_fn(4, 3, |i, j| (i * j) as i64),
        Matrix::from_fn(3, 2, |i, j| i as i64 - j as i64),
    ];
    assert!(matches!(
        engine.evaluate(&matrices),
        Err(ChainError::DimensionMismatch { .. })
    ));
    assert!(matches!(
        multiply_left_to_right(&matrices),
        Err(ChainError::DimensionMismatch { .. })
    ));
}
