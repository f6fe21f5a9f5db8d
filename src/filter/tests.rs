//! Filter chain tests

use super::*;

fn stat(name: &str, inode: u64, size: u64, links: u64) -> FileStat {
    FileStat::new(name, inode, size, links)
}

#[test]
fn test_empty_chain_matches_everything() {
    let chain = FilterChain::new();
    assert!(chain.is_empty());
    assert!(chain.apply(&stat("a", 1, 0, 1)));
    assert!(chain.apply(&stat("", u64::MAX, u64::MAX, 0)));
}

#[test]
fn test_size_prefix_normalization() {
    let mut chain = FilterChain::new();
    chain.add_filter("-size", "+100").unwrap();

    let direct = FilterAtom::parse(FilterKind::SizeGreater, "100").unwrap();
    assert_eq!(chain.atoms(), &[direct]);

    chain.add_filter("-size", "-7").unwrap();
    chain.add_filter("-size", "=9").unwrap();
    assert_eq!(chain.atoms()[1], FilterAtom::SizeLess(7));
    assert_eq!(chain.atoms()[2], FilterAtom::SizeEqual(9));
}

#[test]
fn test_normalized_flags_can_be_given_directly() {
    let mut chain = FilterChain::new();
    chain.add_filter("-size+", "100").unwrap();
    assert_eq!(chain.atoms(), &[FilterAtom::SizeGreater(100)]);
}

#[test]
fn test_numeric_values_round_trip() {
    let mut chain = FilterChain::new();
    chain.add_filter("-inum", "123456789").unwrap();
    chain.add_filter("-nlinks", "3").unwrap();
    assert_eq!(
        chain.atoms(),
        &[FilterAtom::InodeEquals(123_456_789), FilterAtom::LinkCountEquals(3)]
    );
    assert!(chain.apply(&stat("x", 123_456_789, 10, 3)));
    assert!(!chain.apply(&stat("x", 123_456_789, 10, 2)));
}

#[test]
fn test_non_numeric_value_is_invalid_for_every_numeric_kind() {
    for kind in FilterKind::ALL.into_iter().filter(|k| k.is_numeric()) {
        for bad in ["abc", "", "12abc", " 5", "1.5", "+5", "-5"] {
            let mut chain = FilterChain::new();
            let err = chain.add_filter(kind.flag(), bad).unwrap_err();
            assert!(
                matches!(err, FilterError::InvalidValue { .. }),
                "{} {:?} gave {:?}",
                kind.flag(),
                bad,
                err
            );
            assert!(chain.is_empty());
        }
    }
}

#[test]
fn test_size_with_non_numeric_rest_is_invalid() {
    let mut chain = FilterChain::new();
    assert_eq!(
        chain.add_filter("-size", "+lots"),
        Err(FilterError::InvalidValue {
            flag: "-size+".to_string(),
            value: "lots".to_string(),
            reason: "expected an unsigned decimal integer".to_string(),
        })
    );
}

#[test]
fn test_unknown_filter_names_the_flag() {
    let mut chain = FilterChain::new();
    assert_eq!(
        chain.add_filter("-mtime", "3"),
        Err(FilterError::UnknownFilter("-mtime".to_string()))
    );
    // Comparator character is folded into the flag before lookup
    assert_eq!(
        chain.add_filter("-size", "100"),
        Err(FilterError::UnknownFilter("-size1".to_string()))
    );
    assert_eq!(
        chain.add_filter("-size", ""),
        Err(FilterError::UnknownFilter("-size".to_string()))
    );
}

#[test]
fn test_name_is_exact_and_case_sensitive() {
    let mut chain = FilterChain::new();
    chain.add_filter("-name", "Report.txt").unwrap();

    assert!(chain.apply(&stat("Report.txt", 1, 1, 1)));
    assert!(!chain.apply(&stat("report.txt", 1, 1, 1)));
    assert!(!chain.apply(&stat("Report.txt.bak", 1, 1, 1)));

    let mut glob = FilterChain::new();
    glob.add_filter("-name", "*.txt").unwrap();
    assert!(!glob.apply(&stat("Report.txt", 1, 1, 1)));
}

#[test]
fn test_size_comparisons() {
    let less = FilterAtom::SizeLess(100);
    let equal = FilterAtom::SizeEqual(100);
    let greater = FilterAtom::SizeGreater(100);

    for (size, expected) in [(99, [true, false, false]), (100, [false, true, false]), (101, [false, false, true])] {
        let s = stat("f", 1, size, 1);
        assert_eq!([less.matches(&s), equal.matches(&s), greater.matches(&s)], expected);
    }
}

#[test]
fn test_same_kind_atoms_narrow_the_range() {
    let mut chain = FilterChain::new();
    chain.add_filter("-size", "+100").unwrap();
    chain.add_filter("-size", "-200").unwrap();

    assert!(!chain.apply(&stat("f", 1, 100, 1)));
    assert!(chain.apply(&stat("f", 1, 150, 1)));
    assert!(!chain.apply(&stat("f", 1, 200, 1)));
}

#[test]
fn test_failed_add_leaves_chain_unchanged() {
    let mut chain = FilterChain::new();
    chain.add_filter("-name", "a").unwrap();
    assert!(chain.add_filter("-inum", "x").is_err());
    assert_eq!(chain.len(), 1);
}

#[test]
fn test_accepts_flag() {
    assert!(FilterChain::accepts_flag("-size"));
    assert!(FilterChain::accepts_flag("-inum"));
    assert!(FilterChain::accepts_flag("-nlinks"));
    assert!(!FilterChain::accepts_flag("-exec"));
    assert!(!FilterChain::accepts_flag("--silent"));
}

#[test]
fn test_atom_display_uses_normalized_flag() {
    assert_eq!(FilterAtom::SizeGreater(100).to_string(), "-size+ 100");
    assert_eq!(FilterAtom::NameEquals("a b".into()).to_string(), "-name a b");
}
