mod support;

use cfg_normalize::BinarizedRhsSubset::*;
use cfg_normalize::{
    Binarize, BinarizedChains, Cfg, EliminateNulling, NormalizeConfig, NormalizeError,
    Normalizer, Pass, Stage, Symbol, SymbolBitSet,
};

#[test]
fn test_four_symbol_rule_with_nullable_first_symbol() {
    support::init_logger();
    let mut cfg: Cfg = Cfg::new();
    let [start, a, b, c, d] = cfg.sym();
    cfg.add_rule(start, [a, b, c, d]);
    let config = NormalizeConfig::default();
    let nullable = SymbolBitSet::from_syms([a]);

    let expanded = cfg.expand_sequences(&config).unwrap();
    assert_eq!(expanded.stage(), Stage::SequenceExpanded);
    assert_eq!(support::shapes(&expanded), support::shapes(&cfg));

    let eliminated = expanded.eliminate_nulling_with(&nullable, &config).unwrap();
    assert_eq!(eliminated.stage(), Stage::NullingEliminated);
    assert_eq!(
        support::shapes(&eliminated),
        vec![(start, vec![a, b, c, d]), (start, vec![b, c, d])]
    );

    let binarized = eliminated.binarize(&config).unwrap();
    assert_eq!(binarized.stage(), Stage::Binarized);
    let [s1, s2, s3]: [Symbol; 3] = [5u32, 6, 7].map(Symbol::from);
    assert_eq!(
        support::shapes(&binarized),
        vec![
            (start, vec![s1, d]),
            (s1, vec![s2, c]),
            (s2, vec![a, b]),
            (start, vec![s3, d]),
            (s3, vec![b, c]),
        ]
    );
    let subsets: Vec<_> = binarized
        .rules()
        .map(|rule| rule.history().binarized().map(|piece| piece.subset))
        .collect();
    assert_eq!(
        subsets,
        vec![Some(Right), Some(Right), Some(Left), Some(Right), Some(Left)]
    );
}

#[test]
fn test_stage_progression() {
    let mut cfg: Cfg = Cfg::new();
    let [start, a, b, c] = cfg.sym();
    cfg.add_rule(start, [a, b, c]);
    let config = NormalizeConfig::default();

    assert_eq!(cfg.stage(), Stage::Authored);
    assert_eq!(
        cfg.eliminate_nulling(&config),
        Err(NormalizeError::PassOrder {
            pass: Pass::NullingElimination,
            stage: Stage::Authored,
        })
    );

    let expanded = cfg.expand_sequences(&config).unwrap();
    let resolved_early = expanded.resolve_precedence().unwrap();
    assert_eq!(resolved_early.stage(), Stage::SequenceExpanded);

    let binarized = expanded
        .eliminate_nulling(&config)
        .and_then(|cfg| cfg.binarize(&config))
        .unwrap();
    let resolved = binarized.resolve_precedence().unwrap();
    assert_eq!(resolved.stage(), Stage::PrecedenceResolved);

    let normalized = Normalizer::new(config).normalize(&cfg).unwrap();
    assert_eq!(normalized.stage(), Stage::Normalized);
    support::assert_eq(&normalized, &resolved);

    // Running a pass on a normalized grammar does not move it back.
    let binarized_again = normalized.binarize(&config).unwrap();
    assert_eq!(binarized_again.stage(), Stage::Normalized);
}

#[test]
fn test_normalize_is_idempotent() {
    let mut cfg: Cfg = Cfg::new();
    let [start, expr, a, b, plus, list, item, comma] = cfg.sym();
    cfg.set_symbol_precedence(plus, 1, cfg_normalize::Associativity::Left)
        .unwrap();
    cfg.rule(start)
        .rhs([expr, list])
        .rule(expr)
        .rhs([a, plus, b, plus, a])
        .rhs([])
        .rule(a)
        .rhs([])
        .rhs([item]);
    cfg.add_sequence_rule(list, item, 0, Some(5), Some(comma));
    let normalizer = Normalizer::default();

    let once = normalizer.normalize(&cfg).unwrap();
    let twice = normalizer.normalize(&once).unwrap();

    assert_eq!(once, twice);
    assert!(once.rules().all(|rule| rule.rhs().len() <= 2));
}

#[test]
fn test_failed_pass_leaves_grammar() {
    let mut cfg: Cfg = Cfg::new();
    let [start, a, b, c, d] = cfg.sym();
    cfg.add_rule(start, [a, b, c, d]);
    let snapshot = cfg.clone();
    let config = NormalizeConfig::new().rule_limit(Some(2));

    assert_eq!(
        cfg.normalize(&config),
        Err(NormalizeError::GrammarTooLarge {
            limit: 2,
            attempted: 3,
        })
    );
    assert_eq!(cfg, snapshot);
}

#[test]
fn test_provenance() {
    let mut cfg: Cfg = Cfg::new();
    let [start, a, b, c, d, e] = cfg.sym();
    cfg.rule(b).rhs([]).rhs([e]);
    cfg.add_rule(start, [a, b, c, d, e]);

    let normalized = cfg.normalize(&NormalizeConfig::default()).unwrap();
    let chains = BinarizedChains::new(&normalized);

    let tops: Vec<usize> = normalized
        .rules()
        .enumerate()
        .filter(|(_, rule)| rule.lhs() == start)
        .map(|(index, _)| index)
        .collect();
    assert_eq!(tops.len(), 2);

    assert_eq!(chains.full_rhs(&normalized, tops[0]), vec![a, b, c, d, e]);
    assert_eq!(chains.original_positions(&normalized, tops[0]), vec![0, 1, 2, 3, 4]);
    assert_eq!(chains.pieces(&normalized, tops[0]).len(), 4);

    assert_eq!(chains.full_rhs(&normalized, tops[1]), vec![a, c, d, e]);
    assert_eq!(chains.original_positions(&normalized, tops[1]), vec![0, 2, 3, 4]);
    assert_eq!(chains.pieces(&normalized, tops[1]).len(), 3);
    let nulling = normalized.rule_at(tops[1]).unwrap().history().nulling().unwrap();
    assert!(nulling.elided.contains(1));
    assert_eq!(nulling.original_len, 5);

    for &top in &tops {
        for piece in chains.pieces(&normalized, top).into_iter().skip(1) {
            let lhs = normalized.rule_at(piece).unwrap().lhs();
            assert!(chains.is_chain_symbol(lhs));
        }
    }
    assert!(!chains.is_chain_symbol(start));
}
