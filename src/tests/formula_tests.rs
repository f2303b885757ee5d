#[cfg(test)]
mod tests {
    use crate::models::formula::{ extract_identifiers, normalize, Formula, SYMBOL_TABLE };

    #[test]
    fn test_normalize_maps_every_symbol() {
        for (symbol, ascii) in SYMBOL_TABLE {
            let input = format!("H(a {} b)", symbol);
            assert_eq!(normalize(&input), format!("H(a {} b)", ascii));
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "H((OpState=1 → (alert ∧ ¬slowdown ∧ ¬halt ∧ ¬turnoffUVC)))",
            "O(x ≥ 3 ∨ y ≤ 2) ∧ z ≠ 4",
            "already ascii -> nothing & changes",
            "",
            "日本語 ∧ emoji 🚀",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
            for (symbol, _) in SYMBOL_TABLE {
                assert!(!once.contains(symbol));
            }
        }
    }

    #[test]
    fn test_normalize_leaves_other_characters() {
        assert_eq!(normalize("H(a -> Y b)"), "H(a -> Y b)");
        assert_eq!(normalize("¬"), "!");
        assert_eq!(normalize("a→b"), "a->b");
    }

    #[test]
    fn test_formula_normalized() {
        let formula = Formula::from("H(a ∧ b)");
        assert_eq!(formula.normalized().as_str(), "H(a & b)");
        assert!(Formula::from("   ").is_blank());
        assert!(!formula.is_blank());
    }

    #[test]
    fn test_extract_identifiers_skips_operators_and_literals() {
        let idents = extract_identifiers(
            "H((classifier = 1 & dgt_7) -> (OpState = 1)) & O(TRUE | Y alert) S halt"
        );
        let expected: Vec<&str> = vec!["OpState", "alert", "classifier", "dgt_7", "halt"];
        assert_eq!(idents.iter().map(String::as_str).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn test_extract_identifiers_after_normalization() {
        let idents = extract_identifiers("H(batteryFull→¬recharge)");
        assert!(idents.contains("batteryFull"));
        assert!(idents.contains("recharge"));
        assert_eq!(idents.len(), 2);
    }
}
