// src/taxonomy/results.rs
use serde::Serialize;

use super::Taxonomy;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubTopic {
    pub name: String,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultCategory {
    pub name: String,
    pub sub_topics: Vec<SubTopic>,
}

/// The results page drills into the first core market and its first category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultsView {
    pub main_topic: String,
    pub child_topic: String,
    pub categories: Vec<ResultCategory>,
}

impl ResultsView {
    pub fn category(&self, name: &str) -> Option<&ResultCategory> {
        self.categories.iter().find(|c| c.name == name)
    }
}

pub fn results_view(taxonomy: &Taxonomy) -> Option<ResultsView> {
    let main = taxonomy.core_markets.first()?;
    let child = main.children.first()?;

    let categories = child
        .children
        .iter()
        .map(|category| ResultCategory {
            name: category.name.clone(),
            sub_topics: category
                .children
                .iter()
                .map(|sub| SubTopic {
                    name: sub.name.clone(),
                    children: sub.child_names().map(str::to_string).collect(),
                })
                .collect(),
        })
        .collect();

    Some(ResultsView {
        main_topic: main.name.clone(),
        child_topic: child.name.clone(),
        categories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn drills_into_first_market_and_category() {
        let taxonomy = Taxonomy::from_json_str(
            r#"{
                "Health": {
                    "Health Drinks": {
                        "Functional Beverages": {
                            "Adaptogen drinks": {"Ashwagandha lattes": {}},
                            "Electrolyte mixes": {}
                        }
                    },
                    "Ignored": {"X": {}}
                },
                "Wealth": {"Ignored too": {}}
            }"#,
        )
        .unwrap();

        let view = results_view(&taxonomy).unwrap();
        assert_eq!(view.main_topic, "Health");
        assert_eq!(view.child_topic, "Health Drinks");
        assert_eq!(
            view.categories,
            vec![ResultCategory {
                name: "Functional Beverages".into(),
                sub_topics: vec![
                    SubTopic {
                        name: "Adaptogen drinks".into(),
                        children: vec!["Ashwagandha lattes".into()],
                    },
                    SubTopic { name: "Electrolyte mixes".into(), children: vec![] },
                ],
            }]
        );
    }

    #[test]
    fn missing_levels_yield_no_view() {
        assert!(results_view(&Taxonomy::from_json_str("{}").unwrap()).is_none());
        assert!(results_view(&Taxonomy::from_json_str(r#"{"Health": {}}"#).unwrap()).is_none());
    }
}
