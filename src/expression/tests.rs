use bigdecimal::BigDecimal;

use crate::expression::builders::{binary, cascade};
use crate::expression::{
    ExpressionError, ExpressionTree, Node, NodeId, Operator, TreeError, normalize,
};

fn dec(s: &str) -> BigDecimal {
    s.parse().unwrap_or_default()
}

#[test]
fn test_expand_wraps_the_active_site() {
    let tree = ExpressionTree::constant(dec("1"));
    let result = tree.expand(tree.root(), Operator::Add, &dec("3"), true);
    assert!(result.is_ok());
    if let Ok(expansion) = result {
        assert_eq!(expansion.tree.to_string(), "1 + 3");
        assert_eq!(expansion.active_site, expansion.tree.root());
        assert!(matches!(
            expansion.tree.node(expansion.active_site),
            Some(Node::Binary { op: Operator::Add, .. })
        ));
    }
    // the source tree is untouched
    assert_eq!(tree.len(), 1);
    assert_eq!(tree.to_string(), "1");
}

#[test]
fn test_expand_with_constant_on_left() {
    let tree = cascade(1, &[(Operator::Subtract, 3, false)]);
    assert_eq!(tree.to_string(), "3 - 1");
}

#[test]
fn test_repeated_expansion_builds_a_cascade() {
    let tree = cascade(1, &[(Operator::Add, 3, true), (Operator::Multiply, 4, false)]);
    assert_eq!(tree.to_string(), "4 * (1 + 3)");
    assert!(tree.is_cascade());
    assert_eq!(tree.leaves(), vec![&dec("4"), &dec("1"), &dec("3")]);
    assert_eq!(tree.evaluate(), Ok(dec("16")));
}

#[test]
fn test_expand_inner_site_keeps_the_rest_of_the_tree() {
    let tree = binary("1", Operator::Add, "3");
    let inner = NodeId::new(0);
    let result = tree.expand(inner, Operator::Multiply, &dec("2"), true);
    assert!(result.is_ok());
    if let Ok(expansion) = result {
        assert_eq!(expansion.tree.to_string(), "1 * 2 + 3");
        assert_ne!(expansion.active_site, expansion.tree.root());
        assert_eq!(expansion.tree.evaluate(), Ok(dec("5")));
    }
    assert_eq!(tree.to_string(), "1 + 3");
}

#[test]
fn test_expand_rejects_unknown_site() {
    let tree = ExpressionTree::constant(dec("1"));
    let result = tree.expand(NodeId::new(99), Operator::Add, &dec("3"), true);
    assert_eq!(
        result.map(|e| e.tree.to_string()),
        Err(TreeError::ActiveSiteNotFound {
            site: NodeId::new(99),
            occurrences: 0,
        })
    );
}

#[test]
fn test_is_cascade_rejects_two_grown_subtrees() {
    let mut tree = binary("1", Operator::Add, "2");
    let left = tree.root();
    let three = tree.push(Node::Constant(dec("3")));
    let four = tree.push(Node::Constant(dec("4")));
    let right = tree.push(Node::Binary {
        op: Operator::Add,
        left: three,
        right: four,
    });
    tree.root = tree.push(Node::Binary {
        op: Operator::Multiply,
        left,
        right,
    });
    assert_eq!(tree.to_string(), "(1 + 2) * (3 + 4)");
    assert!(!tree.is_cascade());
}

#[test]
fn test_canonical_hash_is_stable() {
    let tree = cascade(1, &[(Operator::Divide, 3, true), (Operator::Subtract, 4, false)]);
    assert_eq!(tree.canonical_hash(), tree.canonical_hash());
    assert_eq!(tree.canonical_hash(), tree.clone().canonical_hash());
}

#[test]
fn test_canonical_hash_ignores_trailing_zeros() {
    let short = binary("1.5", Operator::Add, "2");
    let padded = binary("1.50", Operator::Add, "2.000");
    assert_eq!(short.canonical_hash(), padded.canonical_hash());

    let a = binary("1999021.176470588235294117647", Operator::Divide, "3");
    let b = binary("1999021.176470588235294117647000", Operator::Divide, "3.0");
    assert_eq!(a.canonical_hash(), b.canonical_hash());
}

#[test]
fn test_canonical_hash_folds_sign_under_multiplication() {
    let negative = binary("-1", Operator::Multiply, "-3");
    let positive = binary("1", Operator::Multiply, "3");
    assert_eq!(negative.canonical_hash(), positive.canonical_hash());

    let negative = binary("-1", Operator::Divide, "-3");
    let positive = binary("1", Operator::Divide, "3");
    assert_eq!(negative.canonical_hash(), positive.canonical_hash());
}

#[test]
fn test_canonical_hash_keeps_sign_under_addition() {
    let positive = binary("1", Operator::Add, "3");
    let negative = binary("-1", Operator::Add, "-3");
    assert_ne!(positive.canonical_hash(), negative.canonical_hash());
}

#[test]
fn test_canonical_hash_sign_flag_carries_forward() {
    // -3 is visited after the multiplication, so its sign is not folded
    let tree = cascade(-1, &[(Operator::Multiply, 2, true), (Operator::Add, -3, true)]);
    let mirrored = cascade(1, &[(Operator::Multiply, 2, true), (Operator::Add, 3, true)]);
    assert_eq!(tree.canonical_hash(), mirrored.canonical_hash());

    let additive = cascade(-1, &[(Operator::Add, 2, true), (Operator::Add, -3, true)]);
    let additive_mirror = cascade(1, &[(Operator::Add, 2, true), (Operator::Add, 3, true)]);
    assert_ne!(additive.canonical_hash(), additive_mirror.canonical_hash());
}

#[test]
fn test_canonical_hash_distinguishes_shape() {
    let add = binary("1", Operator::Add, "3");
    let mul = binary("1", Operator::Multiply, "3");
    let sub = binary("1", Operator::Subtract, "3");
    let bus = binary("3", Operator::Subtract, "1");
    assert_ne!(add.canonical_hash(), mul.canonical_hash());
    assert_ne!(sub.canonical_hash(), bus.canonical_hash());
}

#[test]
fn test_operator_counts() {
    let tree = cascade(
        1,
        &[
            (Operator::Divide, 3, true),
            (Operator::Divide, 4, false),
            (Operator::Add, 6, true),
        ],
    );
    let counts = tree.operator_counts();
    assert_eq!(counts.divide, 2);
    assert_eq!(counts.add, 1);
    assert_eq!(counts.multiply, 0);
    assert_eq!(counts.get(Operator::Subtract), 0);
    assert_eq!(tree.fingerprint().counts, counts);
}

#[test]
fn test_evaluate_division_keeps_28_digits() {
    let tree = binary("1", Operator::Divide, "3");
    assert_eq!(
        tree.evaluate().map(|v| v.to_string()),
        Ok("0.3333333333333333333333333333".to_string())
    );

    let back = cascade(1, &[(Operator::Divide, 3, true), (Operator::Multiply, 3, true)]);
    assert_eq!(back.evaluate(), Ok(dec("0.9999999999999999999999999999")));
    assert_eq!(back.evaluate().map(|v| normalize(&v)), Ok(dec("1.0000")));
}

#[test]
fn test_evaluate_division_by_zero() {
    let direct = binary("5", Operator::Divide, "0");
    assert_eq!(direct.evaluate(), Err(ExpressionError::DivisionByZero));

    let computed = cascade(5, &[(Operator::Subtract, 5, true), (Operator::Divide, 7, false)]);
    assert_eq!(computed.to_string(), "7 / (5 - 5)");
    assert_eq!(computed.evaluate(), Err(ExpressionError::DivisionByZero));
}

#[test]
fn test_evaluate_overflow() {
    let tree = binary("79228162514264337593543950335", Operator::Multiply, "10");
    assert_eq!(tree.evaluate(), Err(ExpressionError::Overflow));
}

#[test]
fn test_display_parenthesizes_negative_constants() {
    let tree = binary("-1", Operator::Add, "-3");
    assert_eq!(tree.to_string(), "(-1) + (-3)");
    assert_eq!(ExpressionTree::constant(dec("-3")).to_string(), "-3");
}

#[test]
fn test_display_keeps_non_commutative_grouping() {
    let tree = cascade(1, &[(Operator::Add, 3, true), (Operator::Subtract, 6, false)]);
    assert_eq!(tree.to_string(), "6 - (1 + 3)");
    let tree = cascade(1, &[(Operator::Multiply, 3, true), (Operator::Divide, 6, false)]);
    assert_eq!(tree.to_string(), "6 / (1 * 3)");
    let tree = cascade(1, &[(Operator::Subtract, 3, true), (Operator::Add, 6, true)]);
    assert_eq!(tree.to_string(), "1 - 3 + 6");
}

#[test]
fn test_display_honors_width_and_alignment() {
    let tree = binary("1", Operator::Add, "3");
    assert_eq!(format!("{:>8}", tree), "   1 + 3");
    assert_eq!(format!("{:<8}|", tree), "1 + 3   |");
    assert_eq!(format!("{:3}", tree), "1 + 3");
    assert_eq!(format!("{}", tree), "1 + 3");
}
