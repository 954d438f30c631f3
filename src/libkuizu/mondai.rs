use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::libkuizu::dataset::Entry;
use crate::libkuizu::Error;

pub const CHOICE_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_option: String,
}

/// Samples `count` questions without repeating a correct entry. Produces
/// fewer when the dataset runs out before `count` is reached.
pub fn generate<R: Rng>(
    entries: &[Entry],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Question>, Error> {
    let distinct: HashSet<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();
    if distinct.len() < CHOICE_COUNT {
        return Err(Error::DatasetTooSmall(distinct.len()));
    }

    debug!("[Setup] Obtaining {} questions.", count);
    let mut questions = Vec::with_capacity(count.min(entries.len()));
    let mut used = HashSet::new();
    while questions.len() < count && used.len() < entries.len() {
        let idx = rng.random_range(0..entries.len());
        if !used.insert(idx) {
            continue;
        }
        let correct = &entries[idx];

        let mut wrong: Vec<&Entry> = Vec::with_capacity(CHOICE_COUNT - 1);
        while wrong.len() < CHOICE_COUNT - 1 {
            let pick = &entries[rng.random_range(0..entries.len())];
            if pick.name == correct.name || wrong.iter().any(|w| w.name == pick.name) {
                continue;
            }
            wrong.push(pick);
        }

        let mut options: Vec<String> = Vec::with_capacity(CHOICE_COUNT);
        options.push(correct.name.clone());
        options.extend(wrong.iter().map(|w| w.name.clone()));
        options.shuffle(rng);

        questions.push(Question {
            prompt: format!(".{}", correct.code),
            options,
            correct_option: correct.name.clone(),
        });
    }

    debug!("[Setup] Generated {} questions.", questions.len());
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entries(count: usize) -> Vec<Entry> {
        (0..count)
            .map(|i| Entry {
                code: format!("c{}", i),
                name: format!("Country {}", i),
            })
            .collect()
    }

    #[test]
    fn options_are_distinct_and_contain_the_answer_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let questions = generate(&entries(50), 20, &mut rng).unwrap();
        assert_eq!(questions.len(), 20);
        for question in &questions {
            assert_eq!(question.options.len(), CHOICE_COUNT);
            let distinct: HashSet<&str> =
                question.options.iter().map(String::as_str).collect();
            assert_eq!(distinct.len(), CHOICE_COUNT);
            let hits = question
                .options
                .iter()
                .filter(|o| **o == question.correct_option)
                .count();
            assert_eq!(hits, 1);
        }
    }

    #[test]
    fn correct_entries_are_unique_across_the_quiz() {
        let mut rng = StdRng::seed_from_u64(11);
        let questions = generate(&entries(30), 30, &mut rng).unwrap();
        let prompts: HashSet<&str> = questions.iter().map(|q| q.prompt.as_str()).collect();
        assert_eq!(prompts.len(), 30);
    }

    #[test]
    fn count_beyond_dataset_caps_at_dataset_size() {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = generate(&entries(6), 100, &mut rng).unwrap();
        assert_eq!(questions.len(), 6);
    }

    #[test]
    fn three_entries_are_too_small() {
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate(&entries(3), 2, &mut rng).unwrap_err();
        assert!(matches!(err, Error::DatasetTooSmall(3)));
    }

    #[test]
    fn duplicate_names_count_once() {
        let mut doubled = entries(3);
        doubled.extend(entries(3));
        let mut rng = StdRng::seed_from_u64(1);
        let err = generate(&doubled, 2, &mut rng).unwrap_err();
        assert!(matches!(err, Error::DatasetTooSmall(3)));
    }

    #[test]
    fn four_entry_dataset_uses_every_name_in_every_question() {
        let entries = vec![
            Entry { code: "jp".into(), name: "Japan".into() },
            Entry { code: "us".into(), name: "United States".into() },
            Entry { code: "fr".into(), name: "France".into() },
            Entry { code: "de".into(), name: "Germany".into() },
        ];
        let mut rng = StdRng::seed_from_u64(5);
        let questions = generate(&entries, 4, &mut rng).unwrap();
        assert_eq!(questions.len(), 4);
        let all_names: HashSet<&str> =
            entries.iter().map(|entry| entry.name.as_str()).collect();
        for question in &questions {
            let options: HashSet<&str> =
                question.options.iter().map(String::as_str).collect();
            assert_eq!(options, all_names);
            let source = entries
                .iter()
                .find(|entry| question.prompt == format!(".{}", entry.code))
                .unwrap();
            assert_eq!(question.correct_option, source.name);
        }
    }
}
