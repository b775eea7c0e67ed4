use std::collections::{BTreeSet, HashMap};

use vlm_eval::top1_answers;

fn set(answers: &[&str]) -> BTreeSet<String> {
    answers.iter().map(|a| a.to_string()).collect()
}

#[test]
fn test_majority_answer() {
    let answers = ["dog", "dog", "cat"];
    assert_eq!(top1_answers(&answers), set(&["dog"]));
}

#[test]
fn test_ties_are_all_kept() {
    let answers = ["red", "blue", "red", "blue", "green"];
    assert_eq!(top1_answers(&answers), set(&["red", "blue"]));
}

#[test]
fn test_single_answer_repeated() {
    for n in 1..6 {
        let answers = vec!["umbrella"; n];
        assert_eq!(top1_answers(&answers), set(&["umbrella"]));
    }
}

#[test]
fn test_no_normalization() {
    let answers = ["Dog", "dog", "dog.", "Dog"];
    assert_eq!(top1_answers(&answers), set(&["Dog"]));
}

#[test]
fn test_empty_answers() {
    let answers: [&str; 0] = [];
    assert!(top1_answers(&answers).is_empty());
}

#[test]
fn test_only_max_frequency_answers_returned() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["a"],
        vec!["a", "b"],
        vec!["a", "b", "b", "c", "c", "c"],
        vec!["x", "y", "x", "y", "z", "z"],
        vec!["one", "two", "three", "two", "one", "one", "two"],
        vec!["ten"; 10],
    ];
    for answers in cases {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for answer in answers.iter() {
            *counts.entry(*answer).or_insert(0) += 1;
        }
        let max_count = *counts.values().max().unwrap();

        let top1 = top1_answers(&answers);
        assert!(!top1.is_empty());
        for (answer, count) in counts {
            assert_eq!(top1.contains(answer), count == max_count, "answers: {:?}", answers);
        }
    }
}
