// src/api/worker.rs
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;
use std::thread;

use tracing::{debug, warn};

use super::{AnalysisResult, MarketIdeas, Post, ResearchApi, TrendingTopic};
use crate::error::WizardError;
use crate::state::requests::Ticket;

#[derive(Debug, Clone, PartialEq)]
pub enum ApiRequest {
    GenerateIdeas { topic: String },
    SearchThreads { query: String },
    AnalyzeThreads { threads: Vec<Post> },
    Trending,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Ideas(Result<MarketIdeas, WizardError>),
    Threads(Result<Vec<Post>, WizardError>),
    Analysis(Result<AnalysisResult, WizardError>),
    Trending(Result<Vec<TrendingTopic>, WizardError>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub ticket: Ticket,
    pub payload: ApiReply,
}

type Waker = Arc<dyn Fn() + Send + Sync>;

/// Runs each request on its own thread and hands replies back to the UI thread.
/// Nothing is cancelled; the receiver decides whether a reply is still wanted.
pub struct ApiWorker {
    api: Arc<dyn ResearchApi>,
    tx: Sender<Reply>,
    rx: Receiver<Reply>,
    waker: Option<Waker>,
}

impl ApiWorker {
    pub fn new(api: Arc<dyn ResearchApi>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self { api, tx, rx, waker: None }
    }

    pub fn with_waker(mut self, waker: impl Fn() + Send + Sync + 'static) -> Self {
        self.waker = Some(Arc::new(waker));
        self
    }

    pub fn dispatch(&self, ticket: Ticket, request: ApiRequest) {
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();
        let waker = self.waker.clone();
        debug!("dispatching {:?} for {:?}", ticket.kind, ticket.query);

        thread::spawn(move || {
            let payload = match request {
                ApiRequest::GenerateIdeas { topic } => ApiReply::Ideas(api.generate_market_ideas(&topic)),
                ApiRequest::SearchThreads { query } => ApiReply::Threads(api.search_threads(&query)),
                ApiRequest::AnalyzeThreads { threads } => ApiReply::Analysis(api.analyze_threads(&threads)),
                ApiRequest::Trending => ApiReply::Trending(api.top_trending()),
            };

            if tx.send(Reply { ticket, payload }).is_err() {
                warn!("reply dropped: worker receiver is gone");
                return;
            }
            if let Some(wake) = waker {
                wake();
            }
        });
    }

    pub fn poll(&self) -> Vec<Reply> {
        self.rx.try_iter().collect()
    }
}
