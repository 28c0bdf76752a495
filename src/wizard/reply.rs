// src/wizard/reply.rs
use tracing::{error, info};

use crate::api::{ApiReply, MarketIdeas, Reply};
use crate::error::WizardError;
use crate::state::ui_state::{Notice, PageStatus};
use crate::state::AppState;

use super::{navigator, Route};

/// Applies a worker reply, unless a newer request or a navigation made it stale.
pub fn apply_reply(state: &mut AppState, reply: Reply) {
    if !state.requests.accept(&reply.ticket) {
        return;
    }
    let query = reply.ticket.query;

    match reply.payload {
        ApiReply::Ideas(result) => apply_ideas(state, &query, result),
        ApiReply::Threads(Ok(posts)) => {
            state.ui.threads.posts = posts;
            state.ui.threads.status = if state.ui.threads.posts.is_empty() {
                state.notify(Notice::info("No Reddit posts found for this query"));
                PageStatus::Empty
            } else {
                let count = state.ui.threads.posts.len();
                state.notify(Notice::success(format!("Found {} Reddit posts!", count)));
                PageStatus::Ready
            };
        }
        ApiReply::Threads(Err(e)) => {
            error!("thread search for {:?} failed: {}", query, e);
            state.notify(Notice::from_error(&e));
            state.ui.threads.posts.clear();
            state.ui.threads.status = PageStatus::Failed(e.to_string());
        }
        ApiReply::Analysis(Ok(report)) => {
            info!("analysis ready: {} pain points", report.pain_points.len());
            state.flow.set_analysis_results(Some(report));
            state.ui.options.analysis_status = PageStatus::Ready;
            state.notify(Notice::success("Analysis complete!"));
        }
        ApiReply::Analysis(Err(e)) => {
            error!("analysis failed: {}", e);
            state.notify(Notice::from_error(&e));
            state.ui.options.analysis_status = PageStatus::Failed(e.to_string());
        }
        ApiReply::Trending(Ok(topics)) => {
            state.ui.search.trending_status =
                if topics.is_empty() { PageStatus::Empty } else { PageStatus::Ready };
            state.ui.search.trending = topics;
        }
        ApiReply::Trending(Err(e)) => {
            error!("trending topics unavailable: {}", e);
            state.ui.search.trending.clear();
            state.ui.search.trending_status = PageStatus::Failed(e.to_string());
            state.notify(Notice::warning("Trending topics are unavailable right now"));
        }
    }
}

fn apply_ideas(state: &mut AppState, query: &str, result: Result<MarketIdeas, WizardError>) {
    let ideas = result.and_then(|ideas| {
        if ideas.taxonomy.is_empty() {
            Err(WizardError::parse("No market ideas were generated for this search"))
        } else {
            Ok(ideas)
        }
    });

    match ideas {
        Ok(ideas) => {
            state.session.store(query, &ideas.raw);
            state.flow.set_search_query(query);
            // Pages built from an earlier payload for the same query are stale now
            state.ui.results = Default::default();
            state.ui.categories = Default::default();
            state.ui.search.status = PageStatus::Ready;
            state.notify(Notice::success(format!("Results ready for: {}", query)));
            navigator::navigate(state, Route::results(query));
        }
        Err(e) => {
            error!("market idea generation for {:?} failed: {}", query, e);
            state.notify(Notice::from_error(&e));
            state.ui.search.status = PageStatus::Failed(e.to_string());
        }
    }
}
