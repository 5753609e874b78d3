use skillscape::core::filter::{filter, filter_owned};
use skillscape::domain::model::{FilterCriteria, Profile};
use skillscape::Catalog;

fn criteria_matrix() -> Vec<FilterCriteria> {
    vec![
        FilterCriteria::default(),
        FilterCriteria::new().with_search_term("PLUMB"),
        FilterCriteria::new().with_search_term("an"),
        FilterCriteria::new().with_search_term("zzz"),
        FilterCriteria::new().available_only(true),
        FilterCriteria::new().with_skill("Cooking").with_skill("Baking"),
        FilterCriteria::new()
            .with_skill("Gardening")
            .with_skill("Painting")
            .available_only(true),
        FilterCriteria::new()
            .with_search_term("o")
            .with_skill("Carpentry")
            .with_skill("Cleaning"),
    ]
}

fn ids(profiles: &[&Profile]) -> Vec<u32> {
    profiles.iter().map(|p| p.id).collect()
}

/// 結果必須是原始目錄的子序列
#[test]
fn test_result_is_ordered_subsequence() {
    let catalog = Catalog::sample();
    let all = ids(&catalog.profiles().iter().collect::<Vec<_>>());

    for criteria in criteria_matrix() {
        let result = ids(&filter(catalog.profiles(), &criteria));
        let mut remaining = all.iter();
        for id in &result {
            assert!(
                remaining.any(|candidate| candidate == id),
                "{:?} is not an ordered subsequence for {:?}",
                result,
                criteria
            );
        }
    }
}

#[test]
fn test_filter_is_idempotent() {
    let catalog = Catalog::sample();
    for criteria in criteria_matrix() {
        let once = filter_owned(catalog.profiles(), &criteria);
        let twice = filter_owned(&once, &criteria);
        assert_eq!(once, twice, "not idempotent for {:?}", criteria);
    }
}

#[test]
fn test_empty_constraints_return_whole_catalog() {
    let catalog = Catalog::sample();
    let result = filter_owned(catalog.profiles(), &FilterCriteria::default());
    assert_eq!(result, catalog.profiles());
}

#[test]
fn test_case_insensitive_skill_search() {
    let catalog = Catalog::sample();
    let result = filter(catalog.profiles(), &FilterCriteria::new().with_search_term("PLUMB"));
    assert!(result
        .iter()
        .any(|p| p.skills.iter().any(|s| s.name == "Plumbing")));
}

#[test]
fn test_availability_boundary() {
    let catalog = Catalog::sample();
    for criteria in criteria_matrix() {
        let criteria = criteria.available_only(true);
        let result = filter(catalog.profiles(), &criteria);
        assert!(result.iter().all(|p| p.is_available));
    }
}

#[test]
fn test_skill_selection_is_a_union() {
    let catalog = Catalog::sample();

    let cooking = ids(&filter(catalog.profiles(), &FilterCriteria::new().with_skill("Cooking")));
    let plumbing = ids(&filter(catalog.profiles(), &FilterCriteria::new().with_skill("Plumbing")));
    let both = ids(&filter(
        catalog.profiles(),
        &FilterCriteria::new().with_skill("Cooking").with_skill("Plumbing"),
    ));

    assert_eq!(cooking, vec![6]);
    assert_eq!(plumbing, vec![1]);
    assert_eq!(both, vec![1, 6]);
}

#[test]
fn test_gardening_and_available_yields_maya() {
    let catalog = Catalog::sample();
    let criteria = FilterCriteria::new()
        .with_search_term("")
        .with_skill("Gardening")
        .available_only(true);

    let result = filter(catalog.profiles(), &criteria);
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 2);
    assert_eq!(result[0].name, "Maya Rodriguez");
}

#[test]
fn test_kim_matches_unavailable_david() {
    let catalog = Catalog::sample();
    let result = filter(catalog.profiles(), &FilterCriteria::new().with_search_term("kim"));

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].id, 3);
    assert_eq!(result[0].name, "David Kim");
    assert!(!result[0].is_available);
}

#[test]
fn test_catalog_is_untouched() {
    let catalog = Catalog::sample();
    for criteria in criteria_matrix() {
        let _ = filter(catalog.profiles(), &criteria);
    }
    assert_eq!(catalog, Catalog::sample());
}

#[test]
fn test_json_criteria_with_nulls() {
    let catalog = Catalog::sample();
    let criteria: FilterCriteria =
        serde_json::from_str(r#"{"searchTerm": null, "selectedSkills": ["Baking"]}"#).unwrap();
    assert_eq!(ids(&filter(catalog.profiles(), &criteria)), vec![6]);
}
