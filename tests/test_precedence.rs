mod support;

use cfg_normalize::precedence::Associativity::*;
use cfg_normalize::{
    AssignPrecedence, Cfg, History, NormalizeConfig, NormalizeError, Precedence, Symbol,
};

#[test]
fn test_simple_precedence() {
    support::init_logger();
    let mut cfg: Cfg = Cfg::new();
    let [start, top, num, var] = cfg.sym();
    let [l_paren, r_paren, exp, mul, div, plus, minus, eq] = cfg.sym();

    // top ::=
    //      num
    //   |  var
    //   |  assoc:Group '(' top ')'
    //   |> '-' top
    //   |> assoc:Right top '^' top
    //   |> top '*' top
    //   |  top '/' top
    //   |> top '+' top
    //   |  top '-' top
    //   |> var '=' top

    cfg.rule(start)
        .rhs([top])
        .precedenced_rule(top)
        .rhs([num])
        .rhs([var])
        .associativity(Group)
        .rhs([l_paren, top, r_paren])
        .lower_precedence()
        .rhs([minus, top])
        .associativity(Right)
        .rhs([top, exp, top])
        .lower_precedence()
        .rhs([top, mul, top])
        .rhs([top, div, top])
        .lower_precedence()
        .rhs([top, plus, top])
        .rhs([top, minus, top])
        .lower_precedence()
        .rhs([var, eq, top])
        .finalize()
        .unwrap();

    let mut equivalent: Cfg = Cfg::new();
    let [start, top, num, var] = equivalent.sym();
    let [l_paren, r_paren, exp, mul, div, plus, minus, eq] = equivalent.sym();
    let [g4, g3, g2, g1, g0] = equivalent.sym();

    // Order is significant.
    equivalent
        .rule(start)
        .rhs([top])
        .rule(g4)
        .rhs([num])
        .rhs([var])
        .rule(g3)
        .rhs([g4])
        .rhs([minus, g3])
        .rhs([g4, exp, g3])
        .rule(g2)
        .rhs([g3])
        .rhs([g2, mul, g3])
        .rhs([g2, div, g3])
        .rule(g1)
        .rhs([g2])
        .rhs([g1, plus, g2])
        .rhs([g1, minus, g2])
        .rule(g0)
        .rhs([g1])
        .rhs([var, eq, g0])
        .rule(g4)
        .rhs([l_paren, g0, r_paren])
        .rule(top)
        .rhs([g0]);

    support::assert_eq_rules(equivalent.rules(), cfg.rules());

    let precedence_of = |rhs: &[Symbol]| {
        cfg.rules()
            .find(|rule| rule.rhs() == rhs)
            .and_then(|rule| rule.history().precedence())
    };
    assert_eq!(precedence_of(&[num]), Some(Precedence::new(0, Left)));
    assert_eq!(
        precedence_of(&[l_paren, g0, r_paren]),
        Some(Precedence::new(0, Group))
    );
    assert_eq!(precedence_of(&[g4, exp, g3]), Some(Precedence::new(1, Right)));
    assert_eq!(precedence_of(&[g2, mul, g3]), Some(Precedence::new(2, Left)));
    assert_eq!(precedence_of(&[var, eq, g0]), Some(Precedence::new(4, Left)));
    assert_eq!(precedence_of(&[g0]), None);
}

#[test]
fn test_ternary_quaternary() {
    let mut cfg: Cfg = Cfg::new();
    let [start, top, num] = cfg.sym();
    let [ternary_op, quaternary_op, sep] = cfg.sym();

    cfg.rule(start)
        .rhs([top])
        .precedenced_rule(top)
        .rhs([num])
        .lower_precedence()
        .associativity(Right)
        .rhs([top, ternary_op, top, sep, top])
        .associativity(Right)
        .rhs([top, quaternary_op, top, sep, top, sep, top])
        .finalize()
        .unwrap();

    let mut equivalent: Cfg = Cfg::new();
    let [start, top, num] = equivalent.sym();
    let [ternary_op, quaternary_op, sep] = equivalent.sym();
    let [g1, g0] = equivalent.sym();

    // Order is significant.
    equivalent
        .rule(start)
        .rhs([top])
        .rule(g1)
        .rhs([num])
        .rule(g0)
        .rhs([g1])
        .rhs([g1, ternary_op, g1, sep, g0])
        .rhs([g1, quaternary_op, g1, sep, g1, sep, g0])
        .rule(top)
        .rhs([g0]);

    support::assert_eq_rules(equivalent.rules(), cfg.rules());
}

#[test]
fn test_conflicting_alternative_history() {
    let mut cfg: Cfg = Cfg::new();
    let [top, num] = cfg.sym();
    let history = History::new().assign_precedence(3, Right).unwrap();

    let result = cfg
        .precedenced_rule(top)
        .rhs_with_history([num], history)
        .finalize();

    assert!(matches!(
        result,
        Err(NormalizeError::PrecedenceConflict { .. })
    ));
}

#[test]
fn test_precedence_conflict() {
    let mut cfg: Cfg = Cfg::new();
    let [start, a] = cfg.sym();
    let rule = cfg.add_rule(start, [a]);

    cfg.set_precedence(rule, 1, Left).unwrap();
    cfg.set_precedence(rule, 1, Left).unwrap();

    assert_eq!(
        cfg.set_precedence(rule, 2, Left),
        Err(NormalizeError::PrecedenceConflict {
            existing: Precedence::new(1, Left),
            new: Precedence::new(2, Left),
        })
    );
    let history = cfg.rules().next().unwrap().history();
    assert_eq!(history.precedence(), Some(Precedence::new(1, Left)));
}

#[test]
fn test_symbol_precedence_conflict() {
    let mut cfg: Cfg = Cfg::new();
    let [plus] = cfg.sym();

    cfg.set_symbol_precedence(plus, 2, Left).unwrap();

    assert!(cfg.set_symbol_precedence(plus, 2, Right).is_err());
    assert_eq!(cfg.symbol_precedence(plus), Some(Precedence::new(2, Left)));
}

#[test]
fn test_precedence_from_rightmost_symbol() {
    let mut cfg: Cfg = Cfg::new();
    let [expr, a, b, c, plus, mul] = cfg.sym();
    cfg.set_symbol_precedence(plus, 2, Left).unwrap();
    cfg.set_symbol_precedence(mul, 1, Left).unwrap();

    cfg.add_rule(expr, [a, plus, b, mul, c]);
    cfg.add_rule(expr, [a]);
    let explicit = cfg.add_rule(expr, [a, plus, b]);
    cfg.set_precedence(explicit, 5, Right).unwrap();

    let normalized = cfg.normalize(&NormalizeConfig::default()).unwrap();

    let precedences: Vec<_> = normalized
        .rules()
        .map(|rule| rule.history().precedence())
        .collect();
    assert_eq!(
        precedences,
        vec![
            Some(Precedence::new(1, Left)),
            Some(Precedence::new(1, Left)),
            Some(Precedence::new(1, Left)),
            Some(Precedence::new(1, Left)),
            None,
            Some(Precedence::new(5, Right)),
            Some(Precedence::new(5, Right)),
        ]
    );
}

#[test]
fn test_precedence_before_binarization() {
    let mut cfg: Cfg = Cfg::new();
    let [expr, a, b, plus] = cfg.sym();
    cfg.set_symbol_precedence(plus, 2, Left).unwrap();
    cfg.add_rule(expr, [a, plus, b]);
    let config = NormalizeConfig::default();

    let resolved = cfg.resolve_precedence().unwrap();
    let binarized = resolved
        .expand_sequences(&config)
        .and_then(|cfg| cfg.eliminate_nulling(&config))
        .and_then(|cfg| cfg.binarize(&config))
        .unwrap();

    assert_eq!(binarized.num_rules(), 2);
    assert!(binarized
        .rules()
        .all(|rule| rule.history().precedence() == Some(Precedence::new(2, Left))));
}
