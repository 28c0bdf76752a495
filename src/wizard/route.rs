// src/wizard/route.rs
use std::fmt;

use reqwest::Url;

// Only used to borrow Url's path/query handling
const ROUTE_BASE: &str = "app://wizard";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Search,
    Categories { query: Option<String>, category: Option<String> },
    Results { query: Option<String> },
    Threads { query: Option<String> },
    Options,
    LandingPageCreation,
    Settings,
    NotFound { path: String },
}

/// Position in the wizard sequence, used for progress and the default back target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Step {
    Search,
    Categories,
    Results,
    Threads,
    Options,
    LandingPageCreation,
}

impl Step {
    pub const PROGRESS_LABELS: [&'static str; 4] = ["Search", "Select", "Configure", "Choose"];

    pub fn progress_index(&self) -> usize {
        match self {
            Step::Search => 0,
            Step::Categories | Step::Results => 1,
            Step::Threads => 2,
            Step::Options | Step::LandingPageCreation => 3,
        }
    }
}

impl Route {
    pub fn results(query: &str) -> Self {
        Route::Results { query: Some(query.to_string()) }
    }

    pub fn threads(query: &str) -> Self {
        Route::Threads { query: Some(query.to_string()) }
    }

    pub fn categories(query: Option<&str>) -> Self {
        Route::Categories { query: query.map(str::to_string), category: None }
    }

    pub fn from_path(path: &str) -> Self {
        let normalized = if path.starts_with('/') { path.to_string() } else { format!("/{}", path) };
        let url = match Url::parse(&format!("{}{}", ROUTE_BASE, normalized)) {
            Ok(url) => url,
            Err(_) => return Route::NotFound { path: path.to_string() },
        };
        let param = |name: &str| {
            url.query_pairs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.into_owned())
        };

        match url.path().trim_end_matches('/') {
            "" => Route::Search,
            "/categories" => Route::Categories { query: param("q"), category: param("category") },
            "/results" => Route::Results { query: param("q") },
            "/threads" => Route::Threads { query: param("query") },
            "/options" => Route::Options,
            "/create-landing-page" => Route::LandingPageCreation,
            "/settings" => Route::Settings,
            _ => Route::NotFound { path: path.to_string() },
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::Search => "/".to_string(),
            Route::Categories { query, category } => with_params(
                "/categories",
                &[("q", query.as_deref()), ("category", category.as_deref())],
            ),
            Route::Results { query } => with_params("/results", &[("q", query.as_deref())]),
            Route::Threads { query } => with_params("/threads", &[("query", query.as_deref())]),
            Route::Options => "/options".to_string(),
            Route::LandingPageCreation => "/create-landing-page".to_string(),
            Route::Settings => "/settings".to_string(),
            Route::NotFound { path } => path.clone(),
        }
    }

    pub fn step(&self) -> Option<Step> {
        match self {
            Route::Search => Some(Step::Search),
            Route::Categories { .. } => Some(Step::Categories),
            Route::Results { .. } => Some(Step::Results),
            Route::Threads { .. } => Some(Step::Threads),
            Route::Options => Some(Step::Options),
            Route::LandingPageCreation => Some(Step::LandingPageCreation),
            Route::Settings | Route::NotFound { .. } => None,
        }
    }

    pub fn breadcrumb_label(&self) -> String {
        match self {
            Route::Search => "Search".to_string(),
            Route::Categories { category, .. } => category.clone().unwrap_or_else(|| "Categories".to_string()),
            Route::Results { query } => query.clone().unwrap_or_else(|| "Results".to_string()),
            Route::Threads { .. } => "Configure Threads".to_string(),
            Route::Options => "Choose Plan".to_string(),
            Route::LandingPageCreation => "Landing Page".to_string(),
            Route::Settings => "Settings".to_string(),
            Route::NotFound { .. } => "Not Found".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_path())
    }
}

fn with_params(path: &str, params: &[(&str, Option<&str>)]) -> String {
    let present: Vec<(&str, &str)> = params
        .iter()
        .filter_map(|(key, value)| value.map(|v| (*key, v)))
        .collect();
    if present.is_empty() {
        return path.to_string();
    }

    match Url::parse_with_params(&format!("{}{}", ROUTE_BASE, path), &present) {
        Ok(url) => format!("{}?{}", url.path(), url.query().unwrap_or_default()),
        Err(_) => path.to_string(),
    }
}

/// "sleep TRACKING apps" -> "Sleep Tracking Apps"
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_known_routes_and_params() {
        assert_eq!(Route::from_path("/"), Route::Search);
        assert_eq!(Route::from_path(""), Route::Search);
        assert_eq!(Route::from_path("/results?q=sleep%20apps"), Route::results("sleep apps"));
        assert_eq!(Route::from_path("/threads?query=Keto%2C+Fasting"), Route::threads("Keto, Fasting"));
        assert_eq!(
            Route::from_path("/categories?category=Wealth"),
            Route::Categories { query: None, category: Some("Wealth".into()) }
        );
        assert_eq!(Route::from_path("/options/"), Route::Options);
    }

    #[test]
    fn unmatched_paths_are_not_found() {
        assert_eq!(
            Route::from_path("/billing/invoices"),
            Route::NotFound { path: "/billing/invoices".into() }
        );
    }

    #[test]
    fn paths_round_trip_through_encoding() {
        let route = Route::threads("Keto & fasting, 16:8");
        assert_eq!(Route::from_path(&route.to_path()), route);
        assert_eq!(Route::Results { query: None }.to_path(), "/results");
    }

    #[test]
    fn progress_groups_steps() {
        assert_eq!(Step::Results.progress_index(), 1);
        assert_eq!(Step::LandingPageCreation.progress_index(), 3);
        assert_eq!(Route::Settings.step(), None);
    }

    #[test]
    fn title_cases_each_word() {
        assert_eq!(title_case("sleep TRACKING apps"), "Sleep Tracking Apps");
        assert_eq!(title_case(""), "");
    }
}
