use draft_lens::analysis::grades::{round_tenths, GRADE_BANDS};
use draft_lens::analysis::{extract_sort_key, CardResult, Field, ResultValue, SetMetrics, StatField};
use draft_lens::config::{ResultFormat, Settings};
use draft_lens::data::models::{CardRecord, ALL_DECKS};
use proptest::prelude::*;

const PAIRS: [&str; 10] = ["WU", "WB", "WR", "WG", "UB", "UR", "UG", "BR", "BG", "RG"];

fn win_rate_settings() -> Settings {
    Settings {
        result_format: ResultFormat::WinRate,
        min_game_count: 0,
    }
}

fn format_gihwr(card: &CardRecord, filters: &[String]) -> String {
    let metrics = SetMetrics::new();
    let settings = win_rate_settings();
    let rows = CardResult::new(&metrics, None, &settings).return_results(
        std::slice::from_ref(card),
        filters,
        &[Field::Stat(StatField::Gihwr)],
    );
    match &rows[0].results[0] {
        ResultValue::Text(text) => text.clone(),
        other => panic!("unexpected cell {:?}", other),
    }
}

/// Values of every labelled component, in display order.
fn labelled_values(display: &str) -> Vec<(String, f64)> {
    let tokens: Vec<&str> = display.split_whitespace().collect();
    tokens
        .windows(2)
        .filter(|w| w[0].ends_with(':'))
        .map(|w| (w[0].trim_end_matches(':').to_string(), w[1].parse().unwrap()))
        .collect()
}

prop_compose! {
    fn arb_card()(
        aggregate in 30.0..75.0f64,
        pairs in proptest::collection::btree_map(
            proptest::sample::select(PAIRS.to_vec()),
            30.0..75.0f64,
            0..10,
        )
    ) -> CardRecord {
        let mut card = CardRecord::new("Prop Card").with_stat(ALL_DECKS, "gihwr", aggregate);
        for (pair, value) in pairs {
            card = card.with_stat(pair, "gihwr", value);
        }
        card
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn unfiltered_primary_is_rounded_aggregate(card in arb_card()) {
        let display = format_gihwr(&card, &[ALL_DECKS.to_string()]);
        let aggregate = card.stat(ALL_DECKS, "gihwr").unwrap();
        prop_assert_eq!(extract_sort_key(&display), round_tenths(aggregate));

        let values: Vec<f64> = labelled_values(&display).into_iter().map(|(_, v)| v).collect();
        prop_assert!(values.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn filtered_pair_leads_and_aggregate_trails(card in arb_card(), pick in 0usize..10) {
        let filter = PAIRS[pick];
        prop_assume!(card.stat(filter, "gihwr").is_some());

        let display = format_gihwr(&card, &[filter.to_string()]);
        let components = labelled_values(&display);

        prop_assert_eq!(&components[0].0, filter);
        prop_assert_eq!(components[0].1, round_tenths(card.stat(filter, "gihwr").unwrap()));
        prop_assert_eq!(&components[components.len() - 1].0, "AD");

        let middle: Vec<f64> = components[1..components.len() - 1].iter().map(|(_, v)| *v).collect();
        prop_assert!(middle.windows(2).all(|w| w[0] >= w[1]));
        prop_assert_eq!(extract_sort_key(&display), components[0].1);
    }

    #[test]
    fn grade_keys_sort_like_grades(indices in proptest::collection::vec(0usize..GRADE_BANDS.len(), 1..20)) {
        let mut cells: Vec<(usize, String)> = indices
            .iter()
            .map(|&idx| (idx, format!("{}  UB: 55.0", GRADE_BANDS[idx].grade)))
            .collect();
        cells.sort_by(|a, b| extract_sort_key(&b.1).total_cmp(&extract_sort_key(&a.1)));

        // Best band has the lowest index
        prop_assert!(cells.windows(2).all(|w| w[0].0 <= w[1].0));
    }

    #[test]
    fn extractor_never_panics(raw in ".{0,40}") {
        let key = extract_sort_key(&raw);
        prop_assert!(!key.is_nan());
    }
}
