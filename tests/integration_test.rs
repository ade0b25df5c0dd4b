// Integration tests for unimatch
use serde_json::json;
use std::io::Write;
use std::sync::Arc;
use unimatch_core::{Dataset, Error, FeatureVector, Institution, QueryProfile, Vocabulary};
use unimatch_similarity::{
    weighted_cosine_similarity, EligibilityFilter, EngineConfig, Recommender, Vectorizer,
};

fn recommender(institutions: Vec<Institution>) -> Recommender {
    let dataset = Dataset::new(institutions).unwrap();
    Recommender::new(Arc::new(dataset), EngineConfig::default()).unwrap()
}

fn sample_institutions() -> Vec<Institution> {
    vec![
        Institution::new(1, "Kathmandu Engineering College", "Kathmandu")
            .with_programs(["Computer Engineering", "Civil Engineering"])
            .with_streams(["Science"])
            .with_min_gpa(2.8)
            .with_budget_range("medium"),
        Institution::new(2, "Kathmandu Medical College", "Kathmandu")
            .with_programs(["MBBS", "BDS", "BSc Nursing"])
            .with_streams(["Science"])
            .with_min_gpa(3.2)
            .with_budget_range("high"),
        Institution::new(3, "Shankar Dev Campus", "Kathmandu")
            .with_programs(["BBS", "BBA"])
            .with_streams(["Management"])
            .with_min_gpa(2.4)
            .with_budget_range("low"),
        Institution::new(4, "Prithvi Narayan Campus", "Pokhara")
            .with_programs(["BSc CSIT", "BBS", "BA"])
            .with_streams(["Science", "Management", "Humanities"])
            .with_min_gpa(2.0)
            .with_budget_range("low"),
        Institution::new(5, "Pulchowk Campus", "Lalitpur")
            .with_programs(["Computer Engineering", "Civil Engineering", "Architecture"])
            .with_streams(["Science"])
            .with_min_gpa(3.2)
            .with_budget_range("low"),
    ]
}

#[test]
fn test_scenario_single_full_match() {
    let recommender = recommender(vec![Institution::new(1, "Kathmandu Engineering College", "Kathmandu")
        .with_programs(["Computer Engineering"])
        .with_streams(["Science"])
        .with_min_gpa(2.8)
        .with_budget_range("medium")]);

    let profile = QueryProfile::new("Science", 3.5, "Computer Engineering", "Kathmandu", "medium");
    let results = recommender.recommend(&profile);

    assert_eq!(results.len(), 1);
    let top = &results[0];
    assert_eq!(top.institution.id, 1);
    assert!(top.combined_score > 0.0);
    assert!(top.feature_matches.program);
    assert!(top.feature_matches.stream);
    assert!(top.feature_matches.location);
    assert!(top.feature_matches.budget);
    assert!(top.feature_matches.qualification);
}

#[test]
fn test_scenario_below_every_minimum() {
    let recommender = recommender(sample_institutions());
    let profile = QueryProfile::new("Science", 1.5, "", "any", "low");
    assert!(recommender.recommend(&profile).is_empty());
}

#[test]
fn test_scenario_short_program_does_not_match_superstring() {
    let recommender = recommender(vec![Institution::new(1, "Kathmandu Medical College", "Kathmandu")
        .with_programs(["MBBS"])
        .with_streams(["Science"])
        .with_min_gpa(3.0)
        .with_budget_range("high")]);

    let profile = QueryProfile::new("Science", 4.0, "BBS", "any", "high");
    assert!(recommender.recommend(&profile).is_empty());
}

#[test]
fn test_scenario_location_boost_outranks_similarity() {
    let recommender = recommender(vec![
        Institution::new(1, "Valley Institute of Technology", "Kathmandu")
            .with_programs([
                "Architecture",
                "Civil Engineering",
                "Computer Engineering",
                "Mechanical Engineering",
            ])
            .with_streams(["Management"])
            .with_min_gpa(3.0)
            .with_budget_range("high"),
        Institution::new(2, "Lakeside Engineering College", "Pokhara")
            .with_programs(["Computer Engineering"])
            .with_streams(["Science"])
            .with_min_gpa(3.0)
            .with_budget_range("medium"),
    ]);

    let profile = QueryProfile::new("Science", 3.5, "Computer Engineering", "Kathmandu", "medium");
    let results = recommender.recommend(&profile);

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].institution.id, 1);
    assert!(results[0].feature_matches.location);
    assert!(!results[1].feature_matches.location);
    assert!(results[0].similarity_score < results[1].similarity_score);
    assert!((results[0].combined_score - 1.546).abs() < 1e-9);
    assert!((results[1].combined_score - 1.365).abs() < 1e-9);
}

#[test]
fn test_vectors_share_vocabulary_dimension() {
    let institutions = sample_institutions();
    let vocabulary = Arc::new(Vocabulary::build(&institutions));
    let vectorizer = Vectorizer::new(Arc::clone(&vocabulary), &EngineConfig::default());

    for institution in &institutions {
        let embedding = vectorizer.embed_entity(institution);
        assert_eq!(embedding.vector.dim(), vocabulary.dim());
        assert_eq!(embedding.weights.dim(), vocabulary.dim());
    }
}

#[test]
fn test_qualification_filter_is_monotone() {
    let institutions = sample_institutions();
    let filter = EligibilityFilter::default();

    let mut previous = Vec::new();
    for step in 0..=40 {
        let gpa = step as f64 * 0.1;
        let profile = QueryProfile::new("Science", gpa, "", "any", "low");
        let eligible = filter.apply(&institutions, &profile);
        assert!(previous.iter().all(|i| eligible.contains(i)), "eligible set shrank at gpa {}", gpa);
        previous = eligible;
    }
    assert_eq!(previous.len(), institutions.len());
}

#[test]
fn test_similarity_symmetric_and_self_is_one() {
    let institutions = sample_institutions();
    let vocabulary = Arc::new(Vocabulary::build(&institutions));
    let vectorizer = Vectorizer::new(vocabulary, &EngineConfig::default());

    let a = vectorizer.embed_entity(&institutions[0]);
    let b = vectorizer.embed_entity(&institutions[4]);

    let ab = weighted_cosine_similarity(&a.vector, &b.vector, &a.weights);
    let ba = weighted_cosine_similarity(&b.vector, &a.vector, &a.weights);
    assert!((ab - ba).abs() < 1e-12);
    assert!((0.0..=1.0).contains(&ab));

    let self_similarity = weighted_cosine_similarity(&a.vector, &a.vector, &a.weights);
    assert!((self_similarity - 1.0).abs() < 1e-9);

    // weights are broadcast per category, so every entity carries the same weight vector
    assert_eq!(a.weights, b.weights);
    let with_b_weights = weighted_cosine_similarity(&a.vector, &b.vector, &b.weights);
    assert_eq!(ab, with_b_weights);

    // but the weights do shape the score
    let uniform = FeatureVector::from_slice(&vec![1.0; a.weights.dim()]);
    let unweighted = weighted_cosine_similarity(&a.vector, &b.vector, &uniform);
    assert!((ab - unweighted).abs() > 1e-6);
}

#[test]
fn test_ranking_is_deterministic() {
    let recommender = recommender(sample_institutions());
    let profile = QueryProfile::new("Science", 3.6, "", "any", "low").with_top_n(10);

    let first = recommender.recommend(&profile);
    for _ in 0..5 {
        let again = recommender.recommend(&profile);
        let ids: Vec<u64> = again.iter().map(|r| r.institution.id).collect();
        let expected: Vec<u64> = first.iter().map(|r| r.institution.id).collect();
        assert_eq!(ids, expected);
    }
}

#[test]
fn test_exact_ties_keep_dataset_order() {
    let institutions: Vec<Institution> = (1..=20)
        .rev()
        .map(|id| {
            Institution::new(id, format!("Campus {}", id), "Kathmandu")
                .with_programs(["BBS"])
                .with_streams(["Management"])
                .with_min_gpa(2.0)
                .with_budget_range("low")
        })
        .collect();
    let recommender = recommender(institutions);

    let profile = QueryProfile::new("Management", 3.0, "BBS", "Kathmandu", "low").with_top_n(20);
    let results = recommender.recommend(&profile);

    let ids: Vec<u64> = results.iter().map(|r| r.institution.id).collect();
    assert_eq!(ids, (1..=20).rev().collect::<Vec<u64>>());
    assert!(results.windows(2).all(|w| w[0].combined_score == w[1].combined_score));
}

#[test]
fn test_confidence_capped_with_all_bonuses() {
    let recommender = recommender(sample_institutions());
    let profile = QueryProfile::new("Science", 3.5, "Computer Engineering", "Kathmandu", "medium");
    for result in recommender.recommend(&profile) {
        assert!(result.confidence_score <= 1.0);
    }
}

#[test]
fn test_top_n_limits_results() {
    let recommender = recommender(sample_institutions());
    let all = QueryProfile::new("Science", 4.0, "", "any", "low");
    assert_eq!(recommender.recommend(&all).len(), 5);
    assert_eq!(recommender.recommend(&all.clone().with_top_n(2)).len(), 2);
}

#[test]
fn test_out_of_range_gpa_does_not_panic() {
    let recommender = recommender(sample_institutions());
    for gpa in [-1.0, 9.0, f64::INFINITY, f64::NAN] {
        let profile = QueryProfile::new("Science", gpa, "", "any", "low");
        for result in recommender.recommend(&profile) {
            assert!(result.combined_score.is_finite());
        }
    }
}

#[test]
fn test_load_from_file_keeps_passthrough_fields() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let records = json!([
        {
            "id": 1,
            "name": "Kathmandu Engineering College",
            "location": "Kathmandu",
            "programs": ["Computer Engineering"],
            "streams": ["Science"],
            "min_gpa": 2.8,
            "budget_range": "medium",
            "website": "https://kec.edu.np",
            "facilities": ["Library", "Labs"]
        },
        {
            "id": 2,
            "name": "Shankar Dev Campus",
            "location": "Kathmandu",
            "programs": ["BBS"],
            "streams": ["Management"],
            "min_gpa": 2.4,
            "budget_range": "low"
        }
    ]);
    write!(file, "{}", records).unwrap();

    let dataset = Dataset::load(file.path()).unwrap();
    assert_eq!(dataset.len(), 2);

    let recommender = Recommender::new(Arc::new(dataset), EngineConfig::default()).unwrap();
    let profile = QueryProfile::new("Science", 3.0, "Computer Engineering", "Kathmandu", "medium");
    let results = recommender.recommend(&profile);

    let json = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(json["website"], "https://kec.edu.np");
    assert_eq!(json["facilities"], json!(["Library", "Labs"]));
    assert!(json["explanation"].as_str().unwrap().starts_with("This college was recommended because it"));
}

#[test]
fn test_malformed_record_fails_load() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    let records = json!([
        {
            "id": 1,
            "name": "Kathmandu Engineering College",
            "location": "Kathmandu",
            "programs": ["Computer Engineering"],
            "streams": ["Science"],
            "min_gpa": 2.8,
            "budget_range": "medium"
        },
        {
            "id": 2,
            "name": "No Budget Campus",
            "location": "Kathmandu",
            "programs": ["BBS"],
            "streams": ["Management"],
            "min_gpa": 2.4
        }
    ]);
    write!(file, "{}", records).unwrap();

    match Dataset::load(file.path()) {
        Err(Error::MalformedRecord { index, .. }) => assert_eq!(index, 1),
        other => panic!("expected a malformed record error, got {:?}", other.map(|d| d.len())),
    }
}

#[test]
fn test_statistics_and_comparison() {
    let recommender = recommender(sample_institutions());

    let stats = recommender.statistics();
    assert_eq!(stats.total_institutions, 5);
    assert_eq!(stats.by_location.get("Kathmandu"), Some(&3));
    assert_eq!(stats.by_stream.get("Science"), Some(&4));
    assert_eq!(stats.average_min_gpa, 2.72);

    let comparison = recommender.compare(&[5, 1, 99]).unwrap();
    let ids: Vec<u64> = comparison.institutions.iter().map(|i| i.id).collect();
    assert_eq!(ids, vec![1, 5]);
    assert_eq!(
        comparison.common_features.programs,
        vec!["Computer Engineering".to_string(), "Civil Engineering".to_string()]
    );
    assert_eq!(comparison.differences.unique_programs[&5], vec!["Architecture".to_string()]);

    assert!(matches!(recommender.compare(&[98, 99]), Err(Error::NoMatchingInstitutions)));
}

#[test]
fn test_recommender_shared_across_threads() {
    let recommender = Arc::new(recommender(sample_institutions()));
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let recommender = Arc::clone(&recommender);
            std::thread::spawn(move || {
                let profile = QueryProfile::new("Science", 2.5 + i as f64 * 0.5, "", "any", "low");
                recommender.recommend(&profile).len()
            })
        })
        .collect();

    let counts: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(counts.windows(2).all(|w| w[0] <= w[1]));
}
