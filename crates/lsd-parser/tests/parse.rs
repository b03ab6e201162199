use proptest::prelude::*;

use lsd_core::scheme::EnergyKey;
use lsd_parser::{
    error::{ErrorCode, Severity},
    parse,
};

const COBALT_60: &str = "\
# 60Co beta decay, gammas in 60Ni
2505.7,4,1 > 1173.2,0.9985 > 1332.5,2,1
1332.5,2,1 > 1332.5         > 0,0,1
2158.6,2,1 > 826.1          > 1332.5
";

#[test]
fn test_parse_cobalt_scheme() {
    let scheme = parse(COBALT_60).unwrap();

    assert_eq!(scheme.energies(), vec![2505.7, 1332.5, 0.0, 2158.6]);
    assert_eq!(scheme.transitions().len(), 3);

    let first = &scheme.transitions()[0];
    assert_eq!(scheme.parent_of(first).energy(), 2505.7);
    assert_eq!(scheme.parent_of(first).spin(), Some(4.0));
    assert_eq!(scheme.parent_of(first).parity(), Some(1.0));
    assert_eq!(first.gamma(), Some(1173.2));
    assert_eq!(first.branching_ratio(), Some(0.9985));

    let last = &scheme.transitions()[2];
    assert_eq!(last.branching_ratio(), None);
    assert_eq!(scheme.daughter_of(last).energy(), 1332.5);
}

#[test]
fn test_first_occurrence_of_a_level_wins() {
    let scheme = parse("100,2,1 > 100 > 0\n200 > 100 > 100,5,0").unwrap();

    let (_, level) = scheme.find_level(EnergyKey::new(100.0)).unwrap();
    assert_eq!(level.spin(), Some(2.0));
    assert_eq!(level.parity(), Some(1.0));
    assert_eq!(scheme.levels().len(), 3);
}

#[test]
fn test_missing_values() {
    let scheme = parse("100,None,1 > None,0.2 > 0,,\n50 > > 0").unwrap();

    let first = &scheme.transitions()[0];
    assert_eq!(scheme.parent_of(first).spin(), None);
    assert_eq!(scheme.parent_of(first).parity(), Some(1.0));
    assert_eq!(first.gamma(), None);
    assert_eq!(first.branching_ratio(), Some(0.2));

    let second = &scheme.transitions()[1];
    assert_eq!(second.gamma(), None);
    assert_eq!(second.branching_ratio(), None);
}

#[test]
fn test_unparsable_optional_values_are_missing() {
    let scheme = parse("100,3/2,+ > strong > 0").unwrap();

    let transition = &scheme.transitions()[0];
    assert_eq!(scheme.parent_of(transition).spin(), None);
    assert_eq!(scheme.parent_of(transition).parity(), None);
    assert_eq!(transition.gamma(), None);
}

#[test]
fn test_whitespace_is_ignored() {
    let scheme = parse("\t 1 000 , 2 >  1 000 >   0  ").unwrap();

    assert_eq!(scheme.energies(), vec![1000.0, 0.0]);
    assert_eq!(scheme.transitions()[0].gamma(), Some(1000.0));
}

#[test]
fn test_blank_lines_and_comments_are_skipped() {
    let scheme = parse("\n\n# comment\n100 > 100 > 0 # ground state\n\n").unwrap();
    assert_eq!(scheme.transitions().len(), 1);
}

#[test]
fn test_errors_carry_codes_and_help() {
    let err = parse("100 > 0\nabc > 1 > 0").unwrap_err();

    let diagnostics = err.diagnostics();
    assert_eq!(diagnostics.len(), 2);
    assert!(diagnostics.iter().all(|diag| diag.severity() == Severity::Error));
    assert_eq!(diagnostics[0].code(), Some(ErrorCode::E100));
    assert_eq!(diagnostics[1].code(), Some(ErrorCode::E101));
    assert!(diagnostics.iter().all(|diag| diag.help().is_some()));
    assert_eq!(err.to_string(), format!("{} (+1 more)", diagnostics[0]));
}

#[test]
fn test_empty_input_is_an_error() {
    let err = parse("   \n# nothing here\n").unwrap_err();
    assert_eq!(err.diagnostics()[0].code(), Some(ErrorCode::E200));
}

proptest! {
    #[test]
    fn parse_never_panics(source in "\\PC*") {
        let _ = parse(&source);
    }

    #[test]
    fn every_valid_line_is_a_transition(
        pairs in prop::collection::vec((0u32..5000, 0u32..5000), 1..20)
    ) {
        let source: String = pairs
            .iter()
            .map(|(parent, daughter)| format!("{parent} > > {daughter}\n"))
            .collect();

        let scheme = parse(&source).unwrap();
        prop_assert_eq!(scheme.transitions().len(), pairs.len());
        prop_assert!(scheme.levels().len() <= pairs.len() * 2);
    }
}
