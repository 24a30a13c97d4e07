#![deny(warnings)]

use crate::config::{ParserConfig, TrainConfig, SENTINEL};
use crate::error::Error;
use crate::extract::Extraction;
use crate::grammar::Grammar;
use crate::parser::EarleyParser;
use crate::trees::Tree;
use crate::unknown::{restore, substitute};
use crate::vocab::{compact, WordSet};
use std::time::Duration;


fn parser(grammar: &str, terminals: &[&str]) -> EarleyParser {
    let grammar = Grammar::from_json(grammar).expect("Bad Grammar");
    let terminals = terminals.iter().collect();
    EarleyParser::new(grammar, terminals, ParserConfig::default()).expect("Bad Parser")
}

fn parser_dog() -> EarleyParser {
    parser(r#"{"S": [["NP", "VP"]], "NP": ["dog", "_UNK_"], "VP": ["barks"]}"#, &["NP", "VP"])
}

fn tree_json(p: &EarleyParser, sentence: &[&str]) -> String {
    p.parse(sentence).unwrap().tree().unwrap().to_json().unwrap()
}

#[test]
fn accepts_simple_sentence() {
    let derivation = parser_dog().parse(&["dog", "barks"]).unwrap();
    assert_eq!(derivation.root.to_string(), "(0 - 2) S -> NP VP \u{00b7} ");
    assert_eq!(derivation.root.backpointers().len(), 2);
    assert_eq!(derivation.chart.len(), 3);
    assert_eq!(derivation.tree().unwrap().to_json().unwrap(),
               r#"["S",["NP","dog"],["VP","barks"]]"#);
}

#[test]
fn rejects_unknown_word() {
    let p = parser_dog();
    assert!(matches!(p.parse(&["cat", "barks"]), Err(Error::NoParse)));
    assert!(matches!(p.parse(&["dog"]), Err(Error::NoParse)));
    assert!(matches!(p.parse(&["dog", "barks", "barks"]), Err(Error::NoParse)));
    assert!(matches!(p.parse::<&str>(&[]), Err(Error::EmptyInput)));
    // a substituted word scans through the sentinel rule
    assert_eq!(tree_json(&p, &["_UNK_", "barks"]), r#"["S",["NP","_UNK_"],["VP","barks"]]"#);
}

#[test]
fn unknown_word_through_sentinel() {
    let vocabulary: WordSet = ["dog", "barks"].into_iter().collect();
    let (tokens, replaced) = substitute(&["cat", "barks"], &vocabulary, SENTINEL);
    let json = parser_dog().parse(&tokens).unwrap().tree().unwrap().to_json().unwrap();
    assert_eq!(restore(&json, SENTINEL, &replaced).unwrap(),
               r#"["S",["NP","cat"],["VP","barks"]]"#);
}

#[test]
fn ambiguity_first_derivation_wins() {
    let p = parser(r#"{"S": [["X"], ["Y"]], "X": [["W"]], "Y": [["W"]], "W": ["a"]}"#, &["W"]);
    assert_eq!(tree_json(&p, &["a"]), r#"["S",["X",["W","a"]]]"#);
    // swapping alternatives swaps the result
    let p = parser(r#"{"S": [["Y"], ["X"]], "X": [["W"]], "Y": [["W"]], "W": ["a"]}"#, &["W"]);
    assert_eq!(tree_json(&p, &["a"]), r#"["S",["Y",["W","a"]]]"#);
}

#[test]
fn repeated_parses_agree() {
    let p = parser(r#"{
        "S": [["NP", "VP"]],
        "NP": [["NP", "PP"], ["N"]],
        "VP": [["V", "NP"], ["VP", "PP"]],
        "PP": [["P", "NP"]],
        "N": ["I", "man", "telescope"],
        "V": ["saw"],
        "P": ["with"]
    }"#, &["N", "V", "P"]);
    let sentence = ["I", "saw", "man", "with", "telescope"];
    let first = p.parse(&sentence).unwrap();
    for _ in 0..5 {
        let again = p.parse(&sentence).unwrap();
        assert_eq!(*again.root, *first.root);
        assert_eq!(again.chart.num_items(), first.chart.num_items());
        assert_eq!(again.tree().unwrap(), first.tree().unwrap());
    }
    assert_eq!(first.tree().unwrap().words(), sentence.to_vec());
}

#[test]
fn left_recursion() {
    let p = parser(r#"{
        "S": [["NP"]],
        "NP": [["NP", "PP"], ["N"]],
        "PP": [["P", "N"]],
        "N": ["dog", "cat", "hat"],
        "P": ["with"]
    }"#, &["N", "P"]);
    assert_eq!(tree_json(&p, &["dog", "with", "cat", "with", "hat"]), concat!(
        r#"["S",["NP",["NP",["NP",["N","dog"]],"#,
        r#"["PP",["P","with"],["N","cat"]]],"#,
        r#"["PP",["P","with"],["N","hat"]]]]"#));
}

#[test]
fn chart_growth_is_bounded() {
    let p = parser(r#"{"S": [["S", "S"], ["A"]], "A": ["a"]}"#, &["A"]);
    for n in [1, 4, 12] {
        let sentence = vec!["a"; n];
        let derivation = p.parse(&sentence).unwrap();
        assert!(derivation.chart.num_items() <= 8 * (n + 1) * (n + 1));
        // every cell only holds items ending there
        for (k, stateset) in derivation.chart.iter().enumerate() {
            assert!(stateset.iter().all(|item| item.end == k && item.start <= k));
        }
    }
}

#[test]
fn budget_aborts_parse() {
    let grammar = Grammar::from_json(r#"{"S": [["S", "S"], ["A"]], "A": ["a"]}"#).unwrap();
    let terminals: WordSet = ["A"].into_iter().collect();
    let sentence = vec!["a"; 30];

    let config = ParserConfig::default().max_steps(10);
    let p = EarleyParser::new(grammar.clone(), terminals.clone(), config).unwrap();
    assert!(matches!(p.parse(&sentence), Err(Error::Budget(10))));

    let config = ParserConfig::default().timeout(Duration::from_nanos(1));
    let p = EarleyParser::new(grammar, terminals, config).unwrap();
    assert!(matches!(p.parse(&sentence), Err(Error::Timeout)));
}

#[test]
fn parser_validates_setup() {
    let grammar = Grammar::from_json(r#"{"S": [["NP", "VP"]], "NP": ["dog"], "VP": ["barks"]}"#).unwrap();
    let terminals: WordSet = ["NP", "VP"].into_iter().collect();

    let config = ParserConfig::default().start("ROOT");
    let p = EarleyParser::new(grammar.clone(), terminals, config);
    assert!(matches!(p, Err(Error::MissingStart(s)) if s == "ROOT"));

    let terminals: WordSet = ["NP", "S"].into_iter().collect();
    let p = EarleyParser::new(grammar.clone(), terminals, ParserConfig::default());
    assert!(matches!(p, Err(Error::NotATerminal(s)) if s == "S"));

    // starting elsewhere works as long as the symbol exists
    let terminals: WordSet = ["NP", "VP"].into_iter().collect();
    let p = EarleyParser::new(grammar, terminals, ParserConfig::default().start("NP")).unwrap();
    assert_eq!(p.parse(&["dog"]).unwrap().tree().unwrap(),
               Tree::Leaf("NP".to_string(), "dog".to_string()));
}

#[test]
fn induced_grammar_round_trip() {
    let trees: Vec<Tree> = [
        "(S (NP (DT the) (NN dog)) (VP (VBZ barks)))",
        "(S (NP (DT a) (NN cat)) (VP (VBZ sleeps) (ADV soundly)))",
        "(S (NP (NNP Rex)) (VP (VBZ barks)))",
    ].iter().map(|t| t.parse().unwrap()).collect();
    let extraction: Extraction = trees.iter().collect();
    let config = TrainConfig{uncommon: 0, ..TrainConfig::default()};
    let (grammar, terminals, _) = compact(&extraction, &config).unwrap();
    let p = EarleyParser::new(grammar, terminals, ParserConfig::default()).unwrap();
    for tree in &trees {
        let derivation = p.parse(&tree.words()).unwrap();
        assert_eq!(&derivation.tree().unwrap(), tree);
    }
}
