#[cfg(test)]
mod tests {
    use tokio::test;

    use crate::errors::BenchError;
    use crate::implementations::automata_oracle::{ decide_via_automata, AutomataOracle };
    use crate::implementations::ltl::{ normalize_keywords, parse, Ltl };
    use crate::implementations::tableau::{ are_equivalent, is_satisfiable };
    use crate::models::common::Domain;
    use crate::models::formula::Formula;
    use crate::models::verification::{ EquivalenceVerdict, InconclusiveReason };
    use crate::traits::EquivalenceOracle;

    fn ltl(text: &str) -> Ltl {
        parse(text).unwrap()
    }

    #[test]
    async fn test_parse_precedence() {
        assert_eq!(ltl("a & b | c").to_string(), "((a & b) | c)");
        assert_eq!(ltl("a -> b -> c").to_string(), "(a -> (b -> c))");
        assert_eq!(ltl("!a U b").to_string(), "(!a U b)");
        assert_eq!(ltl("G F a").to_string(), "G F a");
        assert_eq!(ltl("[] (a -> <> b)").to_string(), "G (a -> F b)");
        assert_eq!(ltl("a <-> b").to_string(), "(a <-> b)");
    }

    #[test]
    async fn test_parse_unicode_and_keywords() {
        assert_eq!(ltl("G(a → ¬b)"), ltl("G(a -> !b)"));
        assert_eq!(normalize_keywords("globally  (a and b)"), "G (a & b)");
        assert_eq!(ltl("finally a or b"), ltl("F a | b"));
        assert_eq!(ltl("TRUE & 1"), ltl("true & true"));
    }

    #[test]
    async fn test_parse_errors() {
        for bad in ["", "a &", "(a | b", "a b", "x >= 3", "a = 10"] {
            assert!(
                matches!(parse(bad), Err(BenchError::FormulaParseError { .. })),
                "{:?} should not parse",
                bad
            );
        }
    }

    #[test]
    async fn test_satisfiability() {
        assert!(is_satisfiable(&ltl("a")));
        assert!(is_satisfiable(&ltl("G F a")));
        assert!(is_satisfiable(&ltl("a U b")));
        assert!(!is_satisfiable(&ltl("a & !a")));
        assert!(!is_satisfiable(&ltl("G a & F !a")));
        assert!(!is_satisfiable(&ltl("(a U b) & G !b")));
        assert!(!is_satisfiable(&ltl("false")));
        assert!(is_satisfiable(&ltl("X X a & X !a")));
        assert!(!is_satisfiable(&ltl("X a & X !a")));
    }

    #[test]
    async fn test_known_equivalences() {
        let pairs = [
            ("G F a", "! F G ! a"),
            ("F a", "true U a"),
            ("G a", "false R a"),
            ("!(a U b)", "!a R !b"),
            ("a W b", "(a U b) | G a"),
            ("X (a & b)", "X a & X b"),
            ("F (a | b)", "F a | F b"),
            ("G (a & b)", "G a & G b"),
            ("a -> b", "!a | b"),
            ("F F a", "F a"),
            ("G G a", "G a"),
            ("a U (a U b)", "a U b"),
        ];
        for (f, g) in pairs {
            assert!(are_equivalent(&ltl(f), &ltl(g)), "{} should equal {}", f, g);
            assert!(are_equivalent(&ltl(g), &ltl(f)), "{} should equal {}", g, f);
        }
    }

    #[test]
    async fn test_known_differences() {
        let pairs = [
            ("F a", "G a"),
            ("F (a & b)", "F a & F b"),
            ("G (a | b)", "G a | G b"),
            ("a U b", "b U a"),
            ("X a", "a"),
            ("G F a", "F G a"),
            ("a W b", "a U b"),
        ];
        for (f, g) in pairs {
            assert!(!are_equivalent(&ltl(f), &ltl(g)), "{} should differ from {}", f, g);
        }
    }

    #[test]
    async fn test_reflexive_and_symmetric() {
        let formulas = ["G (req -> F ack)", "a U (b R c)", "X !a W b", "(a <-> b) & F c"];
        for f in formulas {
            assert!(decide_via_automata(f, f), "{} should equal itself", f);
            for g in formulas {
                assert_eq!(decide_via_automata(f, g), decide_via_automata(g, f));
            }
        }
    }

    #[test]
    async fn test_long_formulas() {
        // One tableau node per step of the chain
        let chain = |n: usize, body: &str| format!("{}{}", "X ".repeat(n), body);
        let split = parse(&format!("{} & {}", chain(150, "p"), chain(150, "q"))).unwrap();
        let joined = parse(&chain(150, "(p & q)")).unwrap();
        assert!(are_equivalent(&split, &joined));
        let later = parse(&chain(151, "(p & q)")).unwrap();
        assert!(!are_equivalent(&joined, &later));

        // Many interleaved obligations produce large cyclic graphs
        let responses: Vec<String> = (1..=4)
            .map(|i| format!("G (prop_{} -> F prop_{})", i, i + 4))
            .collect();
        let forward = parse(&responses.join(" & ")).unwrap();
        let backward = parse(&responses.iter().rev().cloned().collect::<Vec<_>>().join(" & ")).unwrap();
        assert!(are_equivalent(&forward, &backward));
        let weaker = parse(&responses[..3].join(" & ")).unwrap();
        assert!(!are_equivalent(&forward, &weaker));
    }

    #[test]
    async fn test_oracle_reports_parse_failure_as_inconclusive() {
        let oracle = AutomataOracle::new();
        let verdict = oracle
            .decide(&Domain::Pipeline, &Formula::from("G a"), &Formula::from("G (a &"))
            .await
            .unwrap();
        assert!(matches!(verdict, EquivalenceVerdict::Inconclusive(InconclusiveReason::ParseFailure(_))));
        assert!(!decide_via_automata("G a", "G (a &"));
    }

    #[test]
    async fn test_oracle_ignores_domain() {
        let oracle = AutomataOracle::new();
        let f = Formula::from("G (request -> F grant)");
        let g = Formula::from("!F (request & G !grant)");
        for domain in [Domain::Master, Domain::Custom("anything".into())] {
            let verdict = oracle.decide(&domain, &f, &g).await.unwrap();
            assert_eq!(verdict, EquivalenceVerdict::Equivalent);
        }
    }
}
