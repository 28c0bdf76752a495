// src/taxonomy/flatten.rs
use serde::Serialize;

use super::Taxonomy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NicheLevel {
    Niche,
    SubNiche,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubNiche {
    pub name: String,
    pub trend: Option<String>,
    pub level: NicheLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Subcategory {
    pub name: String,
    pub sub_niches: Vec<SubNiche>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlattenedCategory {
    /// `<core market lowercased>-<running index>`; only stable within one fetch.
    pub id: String,
    pub name: String,
    pub subcategories: Vec<Subcategory>,
}

/// One entry per (core market, category) pair, in payload order.
///
/// Niches and their sub-niches share one list per subcategory: each niche is
/// followed directly by its children. `level` records which taxonomy level an
/// entry came from.
pub fn flatten(taxonomy: &Taxonomy) -> Vec<FlattenedCategory> {
    let mut categories = Vec::new();
    let mut index = 0usize;

    for core_market in &taxonomy.core_markets {
        let prefix = core_market.name.to_lowercase();

        for category in &core_market.children {
            let subcategories = category
                .children
                .iter()
                .map(|subcategory| Subcategory {
                    name: subcategory.name.clone(),
                    sub_niches: subcategory
                        .children
                        .iter()
                        .flat_map(|niche| {
                            std::iter::once(SubNiche {
                                name: niche.name.clone(),
                                trend: None,
                                level: NicheLevel::Niche,
                            })
                            .chain(niche.child_names().map(|name| SubNiche {
                                name: name.to_string(),
                                trend: None,
                                level: NicheLevel::SubNiche,
                            }))
                        })
                        .collect(),
                })
                .collect();

            categories.push(FlattenedCategory {
                id: format!("{}-{}", prefix, index),
                name: category.name.clone(),
                subcategories,
            });
            index += 1;
        }
    }

    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn taxonomy(raw: &str) -> Taxonomy {
        Taxonomy::from_json_str(raw).unwrap()
    }

    #[test]
    fn empty_taxonomy_flattens_to_nothing() {
        assert!(flatten(&taxonomy("{}")).is_empty());
    }

    #[test]
    fn single_chain_scenario() {
        let flat = flatten(&taxonomy(r#"{"Health": {"Sleep": {"Tracking": {"Apps": {}}}}}"#));
        assert_eq!(
            flat,
            vec![FlattenedCategory {
                id: "health-0".into(),
                name: "Sleep".into(),
                subcategories: vec![Subcategory {
                    name: "Tracking".into(),
                    sub_niches: vec![SubNiche {
                        name: "Apps".into(),
                        trend: None,
                        level: NicheLevel::Niche,
                    }],
                }],
            }]
        );
    }

    #[test]
    fn one_entry_per_market_category_pair_with_running_index() {
        let flat = flatten(&taxonomy(
            r#"{
                "Health": {"Sleep": {}, "Fitness": {}},
                "Wealth": {"Retirement": {}},
                "Relationships": {}
            }"#,
        ));
        let ids: Vec<_> = flat.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["health-0", "health-1", "wealth-2"]);
        let names: Vec<_> = flat.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Sleep", "Fitness", "Retirement"]);
    }

    #[test]
    fn niches_are_interleaved_with_their_sub_niches() {
        let flat = flatten(&taxonomy(
            r#"{"Health": {"Nutrition": {"Diets": {
                "Keto": {"Keto snacks": {}, "Keto for athletes": {}},
                "Fasting": {"16:8 protocols": {}}
            }}}}"#,
        ));
        let entries: Vec<_> = flat[0].subcategories[0]
            .sub_niches
            .iter()
            .map(|s| (s.name.as_str(), s.level))
            .collect();
        assert_eq!(
            entries,
            vec![
                ("Keto", NicheLevel::Niche),
                ("Keto snacks", NicheLevel::SubNiche),
                ("Keto for athletes", NicheLevel::SubNiche),
                ("Fasting", NicheLevel::Niche),
                ("16:8 protocols", NicheLevel::SubNiche),
            ]
        );
    }
}
