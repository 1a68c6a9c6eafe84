use rand::{rngs::StdRng, SeedableRng};

use module_recommender::models::{ModuleRecord, StudentProfile};
use module_recommender::services::scorer::{PREFERENCE_BOOST, PREFERENCE_PENALTY};
use module_recommender::services::{corpus, IndexSettings, RecommendationEngine, TextNormalizer};

const CORPUS: &str = "\
id,name,shortdescription,location,studycredit,level,module_tags
1,Data Analytics,Analyseer data met dashboards en statistiek,Amsterdam,15,NLQF5,data
2,UX Design,Ontwerp interfaces voor gebruikers,Utrecht,10,NLQF5,
3,Robotics,Programmeer robots en sensoren,Amsterdam,15,NLQF6,
";

fn settings() -> IndexSettings {
    IndexSettings {
        ngram_range: (1, 2),
        min_df: 1,
        max_df: 0.8,
    }
}

fn engine() -> RecommendationEngine {
    let records = corpus::read_records(CORPUS.as_bytes()).unwrap();
    RecommendationEngine::build(records, &settings()).unwrap()
}

fn data_profile() -> StudentProfile {
    StudentProfile::default().with_interests(["data", "analytics"])
}

#[test]
fn test_preferences_shift_ranking() {
    let engine = engine();
    let profile = data_profile()
        .with_location("Amsterdam")
        .with_study_credit(15)
        .with_level("NLQF5")
        .with_k(2);

    let outcome = engine.score(&profile);
    assert_eq!(outcome.ranked.len(), 2);

    let first = &outcome.ranked[0];
    let second = &outcome.ranked[1];
    assert_eq!(engine.modules()[first.index].name, "Data Analytics");
    assert_eq!(engine.modules()[second.index].name, "Robotics");

    // student: data x3, analytics x3, "data analytics" x1
    // module: data x2 plus nine terms once, all with the same idf
    let expected_raw = 10.0 / 247f64.sqrt();
    assert!((first.similarity_raw - expected_raw).abs() < 1e-9);
    assert!((first.hybrid_score - (expected_raw + 3.0 * PREFERENCE_BOOST)).abs() < 1e-9);

    // Robotics: location and credit boosts, level penalty
    assert_eq!(second.similarity_raw, 0.0);
    assert!((second.hybrid_score - (2.0 * PREFERENCE_BOOST - PREFERENCE_PENALTY)).abs() < 1e-9);
}

#[test]
fn test_all_penalties_clamp_to_zero() {
    let engine = engine();
    let profile = data_profile()
        .with_location("Amsterdam")
        .with_study_credit(15)
        .with_level("NLQF5")
        .with_k(3);
    let outcome = engine.score(&profile);
    let ux = outcome
        .ranked
        .iter()
        .find(|s| engine.modules()[s.index].name == "UX Design")
        .unwrap();
    assert_eq!(ux.index, 1);
    assert_eq!(ux.hybrid_score, 0.0);
    assert_eq!(outcome.ranked.last().unwrap().index, ux.index);
}

#[test]
fn test_no_preferences_keeps_raw_similarity() {
    let engine = engine();
    let outcome = engine.score(&data_profile().with_k(3));
    assert_eq!(outcome.ranked.len(), 3);
    for scored in &outcome.ranked {
        assert_eq!(scored.hybrid_score, scored.similarity_raw);
        assert!((0.0..=1.0).contains(&scored.hybrid_score));
    }
}

#[test]
fn test_single_preference_flips_by_boost_and_penalty() {
    let engine = engine();
    let base = engine.score(&data_profile().with_k(3));
    let with_credit = engine.score(&data_profile().with_study_credit(10).with_k(3));

    for scored in &with_credit.ranked {
        let raw = base
            .ranked
            .iter()
            .find(|s| s.index == scored.index)
            .unwrap()
            .similarity_raw;
        let module = &engine.modules()[scored.index];
        let expected = if module.study_credit == 10 {
            raw + PREFERENCE_BOOST
        } else {
            (raw - PREFERENCE_PENALTY).max(0.0)
        };
        assert!((scored.hybrid_score - expected).abs() < 1e-9, "{}", module.name);
    }
}

#[test]
fn test_recommendation_explains_match() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(5);
    let response = engine.recommend(&data_profile().with_location("Amsterdam").with_k(1), &mut rng);

    assert_eq!(response.total_found, 1);
    let item = &response.recommendations[0];
    assert_eq!(item.id, 1);
    assert_eq!(item.module_tags, "data");
    assert_eq!(item.match_terms, vec!["data analytics"]);
    assert!(item.reason.contains("'data analytics'"));
    assert!(item.reason.contains("'Data Analytics'"));
    assert!(item.reason_en.contains("'data analytics'"));
}

#[test]
fn test_match_terms_never_repeat_words_of_compounds() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(1);
    let profile = StudentProfile::default()
        .with_study_program("data analytics")
        .with_skills(["dashboards statistiek"])
        .with_favorites(["robots sensoren"])
        .with_k(3);
    let response = engine.recommend(&profile, &mut rng);

    for item in &response.recommendations {
        let compounds: Vec<&String> = item.match_terms.iter().filter(|t| t.contains(' ')).collect();
        for term in item.match_terms.iter().filter(|t| !t.contains(' ')) {
            assert!(
                compounds.iter().all(|c| !c.contains(term.as_str())),
                "{term} duplicated in {:?}",
                item.match_terms
            );
        }
        assert!(item.match_terms.len() <= 8);
    }
}

#[test]
fn test_result_count_is_min_of_k_and_corpus() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(0);
    for k in 1..=20 {
        let response = engine.recommend(&data_profile().with_k(k), &mut rng);
        assert_eq!(response.recommendations.len(), k.min(3));
        assert_eq!(response.total_found, k.min(3));
    }
}

#[test]
fn test_empty_profile_falls_back_to_placeholder() {
    let engine = engine();
    let mut rng = StdRng::seed_from_u64(0);
    let response = engine.recommend(&StudentProfile::default(), &mut rng);
    assert_eq!(response.total_found, 3);
    for item in &response.recommendations {
        assert_eq!(item.similarity, 0.0);
        assert!(item.match_terms.is_empty());
    }
}

#[test]
fn test_corpus_and_profile_share_normalization() {
    let engine = engine();
    let normalizer = TextNormalizer::new();
    for (record, text) in engine.modules().iter().zip(engine.texts()) {
        assert_eq!(text.clean_text, normalizer.normalize(&record.raw_text()));
    }
}

#[test]
fn test_records_are_kept_verbatim() {
    let engine = engine();
    let expected: Vec<ModuleRecord> = corpus::read_records(CORPUS.as_bytes()).unwrap();
    assert_eq!(engine.modules(), expected.as_slice());
}
