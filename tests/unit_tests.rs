// Unit tests for PetMatch

use pet_match::core::{calculate_compatibility, compare_ranked, Ranker};
use pet_match::models::{Candidate, Profile, ScoredCandidate, ScoringWeights, TraitCode};
use pet_match::queries::{
    above_threshold, all_scored, best_match, evaluate_best_match, search, BestMatch,
};
use pet_match::snapshot::{format_percentage, write_snapshot};
use std::cmp::Ordering;
use std::path::Path;

fn example_profile() -> Profile {
    Profile {
        gender: "Female".to_string(),
        preferred_gender: "Any".to_string(),
        trait_code: TraitCode::from("ENFP"),
        energy_level: 7,
        space: 500.0,
        budget: 200.0,
        allergic: false,
        has_yard: true,
        time_per_day: 4.0,
    }
}

fn candidate(name: &str, pet_type: &str, breed: &str) -> Candidate {
    Candidate {
        name: name.to_string(),
        pet_type: pet_type.to_string(),
        breed: breed.to_string(),
        gender: "Male".to_string(),
        trait_code: TraitCode::from("ENFP"),
        energy_level: 7,
        required_space: 500.0,
        monthly_cost: 200.0,
        allergenic: false,
        requires_yard: true,
        time_per_day: 4.0,
        image_path: format!("images/{}.jpg", name.to_lowercase()),
    }
}

fn write_scores(path: &Path, rows: &[(&Candidate, f64)]) {
    let ranked: Vec<ScoredCandidate> = rows
        .iter()
        .map(|(c, score)| ScoredCandidate::new((*c).clone(), *score))
        .collect();
    write_snapshot(path, &ranked).unwrap();
}

#[test]
fn test_example_perfect_score() {
    let score = calculate_compatibility(
        &example_profile(),
        &candidate("Cooper", "Dog", "Beagle"),
        &ScoringWeights::default(),
    );
    assert_eq!(score, 1.0);
}

#[test]
fn test_example_no_trait_overlap() {
    let mut c = candidate("Nemo", "Fish", "Betta");
    c.trait_code = TraitCode::from("ISTJ");

    let score = calculate_compatibility(&example_profile(), &c, &ScoringWeights::default());
    assert_eq!(score, 0.75);
}

#[test]
fn test_score_always_in_range() {
    let weights = ScoringWeights::default();
    let codes = ["ENFP", "ISTJ", "enfj", "IN", ""];

    for allergic in [false, true] {
        for allergenic in [false, true] {
            for (i, code) in codes.iter().enumerate() {
                let mut profile = example_profile();
                profile.allergic = allergic;
                profile.space = 1.0 + i as f64 * 100.0;
                profile.energy_level = (i as u8 * 3).max(1);

                let mut c = candidate("Pet", "Dog", "Mutt");
                c.allergenic = allergenic;
                c.trait_code = TraitCode::from(*code);
                c.required_space = 0.0;
                c.monthly_cost = 1000.0;

                let score = calculate_compatibility(&profile, &c, &weights);
                assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
                if allergic && allergenic {
                    assert_eq!(score, 0.0);
                }
            }
        }
    }
}

#[test]
fn test_gender_match_ranks_first_on_equal_scores() {
    let mut profile = example_profile();
    profile.preferred_gender = "Female".to_string();

    let mut female = candidate("Daisy", "Dog", "Bulldog");
    female.gender = "Female".to_string();
    let male = candidate("Rex", "Dog", "Bulldog");

    let a = ScoredCandidate::new(male, 0.9);
    let b = ScoredCandidate::new(female, 0.9);
    assert_eq!(compare_ranked(&profile, &b, &a), Ordering::Less);
    assert_eq!(compare_ranked(&profile, &a, &b), Ordering::Greater);
}

#[test]
fn test_any_preference_is_neutral() {
    let profile = example_profile();
    let a = ScoredCandidate::new(candidate("A", "Dog", "Mutt"), 0.5);
    let b = ScoredCandidate::new(candidate("B", "Dog", "Mutt"), 0.5);
    // Any treats every candidate alike, leaving later keys to decide
    assert_eq!(compare_ranked(&profile, &a, &b), Ordering::Equal);
}

#[test]
fn test_tie_break_cascade_order() {
    let profile = example_profile();
    let ranker = Ranker::new(|_: &Profile, _: &Candidate| 0.6);

    let base = candidate("Base", "Dog", "Mutt");

    let mut fewer_traits = candidate("Traits", "Dog", "Mutt");
    fewer_traits.trait_code = TraitCode::from("ENFJ");

    let mut cramped = candidate("Space", "Dog", "Mutt");
    cramped.required_space = 1000.0;

    let mut costly = candidate("Budget", "Dog", "Mutt");
    costly.monthly_cost = 400.0;

    let mut busy = candidate("Time", "Dog", "Mutt");
    busy.time_per_day = 8.0;

    let ranked = ranker.rank(&profile, &[costly, busy, cramped, fewer_traits, base]);
    let names: Vec<&str> = ranked.iter().map(|s| s.candidate.name.as_str()).collect();
    assert_eq!(names, vec!["Base", "Budget", "Time", "Space", "Traits"]);
}

#[test]
fn test_yard_is_last_tie_break() {
    let mut profile = example_profile();
    profile.has_yard = false;
    let ranker = Ranker::new(|_: &Profile, _: &Candidate| 0.6);

    let needs_yard = candidate("Yard", "Dog", "Mutt");
    let mut indoor = candidate("Indoor", "Cat", "Mutt");
    indoor.requires_yard = false;

    let ranked = ranker.rank(&profile, &[needs_yard, indoor]);
    assert_eq!(ranked[0].candidate.name, "Indoor");
}

#[test]
fn test_percentage_rounds_half_up() {
    assert_eq!(format_percentage(0.755), "76%");
    assert_eq!(format_percentage(0.0), "0%");
    assert_eq!(format_percentage(0.754), "75%");
}

#[test]
fn test_threshold_boundary_excluded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.csv");

    let a = candidate("A", "Dog", "Beagle");
    let b = candidate("B", "Dog", "Beagle");
    let c = candidate("C", "Cat", "Siamese");
    write_scores(&path, &[(&a, 0.95), (&b, 0.80), (&c, 0.81)]);

    let catalog = vec![a, b, c];
    let result = above_threshold(&path, &catalog, 0.80);
    let names: Vec<&str> = result.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A", "C"]);
}

#[test]
fn test_search_dogs_in_rank_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.csv");

    let rex = candidate("Rex", "Dog", "Beagle");
    let tom = candidate("Tom", "Cat", "Siamese");
    let fido = candidate("Fido", "Dog", "Poodle");
    let kit = candidate("Kit", "Cat", "Bengal");
    let spot = candidate("Spot", "Dog", "Beagle");
    write_scores(
        &path,
        &[(&rex, 0.9), (&tom, 0.85), (&fido, 0.7), (&kit, 0.6), (&spot, 0.5)],
    );

    let catalog = vec![spot, kit, fido, tom, rex];

    let dogs = search("dog", Some(""), &path, &catalog);
    assert_eq!(dogs.len(), 3);
    assert!(dogs.iter().all(|s| s.candidate.pet_type == "Dog"));
    let names: Vec<&str> = dogs.iter().map(|s| s.candidate.name.as_str()).collect();
    assert_eq!(names, vec!["Rex", "Fido", "Spot"]);
    assert_eq!(dogs[0].score, 0.9);

    let beagles = search("DOG", Some("beagle"), &path, &catalog);
    let names: Vec<&str> = beagles.iter().map(|s| s.candidate.name.as_str()).collect();
    assert_eq!(names, vec!["Rex", "Spot"]);

    assert!(search("Parrot", None, &path, &catalog).is_empty());
}

#[test]
fn test_best_match_outcomes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.csv");
    let top = candidate("Top", "Dog", "Beagle");
    let catalog = vec![top.clone()];

    assert_eq!(evaluate_best_match(&path, &catalog, 0.8), BestMatch::NoData);

    write_scores(&path, &[(&top, 0.80)]);
    assert_eq!(best_match(&path, &catalog), Some(top.clone()));

    write_scores(&path, &[(&top, 0.79)]);
    let outcome = evaluate_best_match(&path, &catalog, 0.8);
    assert!(matches!(outcome, BestMatch::BelowThreshold(_)));
    assert_eq!(outcome.top().unwrap().score, 0.79);
    assert_eq!(best_match(&path, &catalog), None);

    // Unknown key in the first row
    let stranger = candidate("Stranger", "Dog", "Beagle");
    write_scores(&path, &[(&stranger, 0.99), (&top, 0.95)]);
    assert_eq!(evaluate_best_match(&path, &catalog, 0.8), BestMatch::NoData);
}

#[test]
fn test_best_match_does_not_resort() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.csv");
    std::fs::write(
        &path,
        "Name,Breed,Type,Score,ImagePath\nLow,Mutt,Dog,81%,l.jpg\nHigh,Mutt,Dog,99%,h.jpg\n",
    )
    .unwrap();

    let catalog = vec![candidate("High", "Dog", "Mutt"), candidate("Low", "Dog", "Mutt")];
    assert_eq!(best_match(&path, &catalog).unwrap().name, "Low");
}

#[test]
fn test_malformed_rows_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.csv");
    std::fs::write(
        &path,
        "Name,Breed,Type,Score,ImagePath\n\
         A,Mutt,Dog,90%,a.jpg\n\
         B,Mutt,Dog,ninety%,b.jpg\n\
         C,Mutt,Dog,95%\n\
         D,Mutt,Dog,85%,d.jpg\n",
    )
    .unwrap();

    let catalog = vec![
        candidate("A", "Dog", "Mutt"),
        candidate("B", "Dog", "Mutt"),
        candidate("C", "Dog", "Mutt"),
        candidate("D", "Dog", "Mutt"),
    ];

    let names: Vec<String> = above_threshold(&path, &catalog, 0.8)
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, vec!["A", "D"]);
    assert_eq!(search("dog", None, &path, &catalog).len(), 2);
    assert_eq!(all_scored(&path, &catalog).len(), 2);
}

#[test]
fn test_missing_snapshot_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-written.csv");
    let catalog = vec![candidate("A", "Dog", "Mutt")];

    assert!(above_threshold(&path, &catalog, 0.8).is_empty());
    assert!(search("Dog", None, &path, &catalog).is_empty());
    assert!(all_scored(&path, &catalog).is_empty());
    assert!(best_match(&path, &catalog).is_none());
}
