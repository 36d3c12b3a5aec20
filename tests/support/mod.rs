#![allow(dead_code)]

use cfg_normalize::{Cfg, GrammarRule, RuleHistory, Symbol};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn eq_rules<R, S>(i: impl Iterator<Item = R>, j: impl Iterator<Item = S>) -> bool
where
    R: GrammarRule,
    S: GrammarRule,
{
    let mut rules_i = i
        .map(|rule| (rule.lhs(), rule.rhs().to_vec()))
        .collect::<Vec<_>>();
    let mut rules_j = j
        .map(|rule| (rule.lhs(), rule.rhs().to_vec()))
        .collect::<Vec<_>>();

    rules_i.sort();
    rules_j.sort();

    if rules_i != rules_j {
        eprintln!("Left:");
        eprintln!("{:?}", rules_i);
        eprintln!("Right:");
        eprintln!("{:?}", rules_j);
    }

    rules_i == rules_j
}

pub fn assert_eq_rules<R, S>(i: impl Iterator<Item = R>, j: impl Iterator<Item = S>)
where
    R: GrammarRule,
    S: GrammarRule,
{
    assert!(eq_rules(i, j), "Rules expected to be equal");
}

pub fn assert_eq<H: RuleHistory>(left: &Cfg<H>, right: &Cfg<H>) {
    if !eq_rules(left.rules(), right.rules()) {
        let mut left_sorted = left.clone();
        let mut right_sorted = right.clone();
        left_sorted.sort();
        right_sorted.sort();
        eprintln!(
            "{}\n{}",
            left_sorted.stringify_to_bnf(),
            right_sorted.stringify_to_bnf()
        );
        panic!("Rules expected to be equal");
    }
}

/// Lists rules in grammar order as `(lhs, rhs)` pairs.
pub fn shapes<H>(cfg: &Cfg<H>) -> Vec<(Symbol, Vec<Symbol>)> {
    cfg.rules()
        .map(|rule| (rule.lhs(), rule.rhs().to_vec()))
        .collect()
}
