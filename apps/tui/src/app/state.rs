use crate::app::forms::{LoginForm, YieldForm};
use krishi_mate::cache::SlotView;
use krishi_mate::config::AppConfig;
use krishi_mate::db::ProfileStore;
use krishi_mate::fetch::{
    fetch_market, fetch_recommendations, image_data_url, load_yield_metadata, predict_yield,
    send_chat, welcome_message, FetchContext, IMAGE_REPLY,
};
use krishi_mate::models::{
    ChatMessage, DomainData, FarmerProfile, MarketView, Recommendations, YieldMetadata,
    YieldPrediction, YieldRequest,
};
use krishi_mate::orchestrator::Orchestrator;
use krishi_mate::{DataDomain, Tab};
use std::path::{Path, PathBuf};
use throbber_widgets_tui::ThrobberState;
use tokio::task::{JoinError, JoinHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Login,
    Dashboard,
}

/// Work that needs the backend or the store. Input handlers queue it and
/// the event loop runs it between frames.
#[derive(Debug, Clone, PartialEq)]
pub enum PendingAction {
    SaveProfile(FarmerProfile),
    Logout,
    LoadYieldMetadata,
    PredictYield(YieldRequest),
    LoadRecommendations,
    RefreshMarket,
    SendChat(String),
    AttachImage(PathBuf),
}

impl PendingAction {
    pub const fn label(&self) -> &'static str {
        match self {
            Self::SaveProfile(_) => "Signing in...",
            Self::Logout => "Signing out...",
            Self::LoadYieldMetadata => "Loading yield data...",
            Self::PredictYield(_) => "Predicting yield...",
            Self::LoadRecommendations => "Fetching crop recommendations...",
            Self::RefreshMarket => "Refreshing market rates...",
            Self::SendChat(_) => "Krishi-Mate is typing...",
            Self::AttachImage(_) => "Reading image...",
        }
    }
}

/// Result of a backend call made for a queued action.
#[derive(Debug)]
pub enum ActionOutcome {
    YieldMetadata(Result<YieldMetadata, String>),
    Prediction(Result<YieldPrediction, String>),
    Recommendations(Result<Recommendations, String>),
    Market(MarketView),
    ChatReply(ChatMessage),
}

#[derive(Debug, Default)]
pub struct ChatState {
    pub messages: Vec<ChatMessage>,
    pub input: String,
    /// When set, the input line holds an image path instead of a message.
    pub attaching: bool,
    pub scroll: usize,
}

#[derive(Debug, Default)]
pub struct MarketState {
    pub selected: usize,
    /// Result of an explicit refresh. Shown instead of the cached view and
    /// never written back to the cache.
    pub refreshed: Option<MarketView>,
}

#[derive(Debug, Default)]
pub struct RecommendationsState {
    pub result: Option<Result<Recommendations, String>>,
    pub selected_favorable: bool,
}

pub struct App {
    pub running: bool,
    pub screen: AppScreen,
    pub tab: Tab,
    pub orchestrator: Orchestrator,
    pub profile: ProfileStore,
    pub config: AppConfig,
    pub login: LoginForm,
    pub chat: ChatState,
    pub market: MarketState,
    pub yield_form: YieldForm,
    pub recommendations: RecommendationsState,
    pub pending: Option<PendingAction>,
    pub status_message: String,
    pub show_help: bool,
    pub throbber: ThrobberState,
}

impl App {
    pub fn new(orchestrator: Orchestrator, profile: ProfileStore, config: AppConfig) -> Self {
        let screen = if profile.is_signed_in() {
            AppScreen::Dashboard
        } else {
            AppScreen::Login
        };

        let mut app = Self {
            running: true,
            screen,
            tab: Tab::Farm,
            orchestrator,
            profile,
            config,
            login: LoginForm::default(),
            chat: ChatState::default(),
            market: MarketState::default(),
            yield_form: YieldForm::default(),
            recommendations: RecommendationsState::default(),
            pending: None,
            status_message: String::new(),
            show_help: false,
            throbber: ThrobberState::default(),
        };

        if app.screen == AppScreen::Dashboard {
            app.enter_dashboard();
        }
        app
    }

    /// Fetch inputs for a profile: its location and main crop, or the
    /// configured default crop.
    pub fn fetch_context(profile: Option<&FarmerProfile>, config: &AppConfig) -> FetchContext {
        FetchContext {
            location: profile.map(|p| p.location.clone()).unwrap_or_default(),
            crop: profile
                .and_then(|p| p.main_crop.clone())
                .filter(|crop| !crop.trim().is_empty())
                .unwrap_or_else(|| config.default_crop.clone()),
            insights_count: config.insights_count,
        }
    }

    pub fn farmer(&self) -> Option<&FarmerProfile> {
        self.profile.get()
    }

    fn enter_dashboard(&mut self) {
        let context = Self::fetch_context(self.profile.get(), &self.config);
        self.orchestrator.set_context(context);
        self.screen = AppScreen::Dashboard;
        self.select_tab(self.tab);
    }

    /// Switches tabs and kicks off whatever the new tab needs.
    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        if self.orchestrator.select_tab(tab) {
            tracing::debug!(tab = tab.as_str(), "tab requested data");
        }

        match tab {
            Tab::Chat if self.chat.messages.is_empty() => {
                if let Some(profile) = self.profile.get() {
                    self.chat.messages.push(welcome_message(profile));
                }
            }
            Tab::Yield
                if self.yield_form.metadata.is_none()
                    && self.yield_form.metadata_error.is_none() =>
            {
                self.queue(PendingAction::LoadYieldMetadata);
            }
            Tab::Recommendations if self.recommendations.result.is_none() => {
                self.queue(PendingAction::LoadRecommendations);
            }
            _ => {}
        }
    }

    pub fn queue(&mut self, action: PendingAction) {
        if self.pending.is_none() {
            self.status_message = action.label().to_string();
            self.pending = Some(action);
        }
    }

    /// Per-frame housekeeping: advance the spinner and land finished fetches.
    pub fn tick(&mut self) {
        self.throbber.calc_next();
        if self.orchestrator.drain() > 0 {
            self.clamp_market_selection();
        }
    }

    pub fn slot(&self, domain: DataDomain) -> SlotView<'_> {
        self.orchestrator.cache().view(domain)
    }

    /// Market data to show: a manual refresh wins over the cached copy.
    pub fn market_view(&self) -> Option<&MarketView> {
        if let Some(view) = &self.market.refreshed {
            return Some(view);
        }
        match self.slot(DataDomain::Market).data() {
            Some(DomainData::Market(view)) => Some(view),
            _ => None,
        }
    }

    pub fn clamp_market_selection(&mut self) {
        let len = self.market_view().map_or(0, |view| view.prices.len());
        if self.market.selected >= len {
            self.market.selected = len.saturating_sub(1);
        }
    }

    /// Runs the queued action to completion. The event loop uses
    /// `begin_pending` and `finish_action` instead so it can keep drawing.
    pub async fn run_pending(&mut self) {
        if let Some(task) = self.begin_pending().await {
            let outcome = task.await;
            self.finish_action(outcome);
        }
    }

    /// Starts the queued action. Local work (profile store, image files)
    /// finishes here; backend calls are spawned and returned, with
    /// `pending` left set until `finish_action` lands the result.
    pub async fn begin_pending(&mut self) -> Option<JoinHandle<ActionOutcome>> {
        let action = self.pending.clone()?;
        let backend = self.orchestrator.backend();
        let location = self.orchestrator.context().location.clone();

        let task = match action {
            PendingAction::SaveProfile(profile) => {
                self.pending = None;
                self.status_message.clear();
                self.sign_in(profile).await;
                return None;
            }
            PendingAction::Logout => {
                self.pending = None;
                self.status_message.clear();
                self.sign_out().await;
                return None;
            }
            PendingAction::AttachImage(path) => {
                self.pending = None;
                self.status_message.clear();
                self.attach_image(&path);
                return None;
            }
            PendingAction::LoadYieldMetadata => tokio::spawn(async move {
                ActionOutcome::YieldMetadata(load_yield_metadata(backend.as_ref()).await)
            }),
            PendingAction::PredictYield(request) => tokio::spawn(async move {
                ActionOutcome::Prediction(predict_yield(backend.as_ref(), &request).await)
            }),
            PendingAction::LoadRecommendations => tokio::spawn(async move {
                ActionOutcome::Recommendations(
                    fetch_recommendations(backend.as_ref(), &location).await,
                )
            }),
            PendingAction::RefreshMarket => tokio::spawn(async move {
                ActionOutcome::Market(fetch_market(backend.as_ref(), &location).await)
            }),
            PendingAction::SendChat(text) => {
                let Some(profile) = self.profile.get().cloned() else {
                    self.pending = None;
                    self.status_message.clear();
                    return None;
                };
                self.chat.messages.push(ChatMessage::user(text.clone(), None));
                self.chat.scroll = 0;
                tokio::spawn(async move {
                    ActionOutcome::ChatReply(send_chat(backend.as_ref(), &profile, &text).await)
                })
            }
        };
        Some(task)
    }

    /// Lands the result of a spawned action and clears `pending`.
    pub fn finish_action(&mut self, outcome: Result<ActionOutcome, JoinError>) {
        self.pending = None;
        self.status_message.clear();

        let outcome = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                tracing::error!(%error, "queued action did not finish");
                self.status_message = "Error: the request stopped unexpectedly".to_string();
                return;
            }
        };

        match outcome {
            ActionOutcome::YieldMetadata(Ok(metadata)) => self.yield_form.set_metadata(metadata),
            ActionOutcome::YieldMetadata(Err(message)) => {
                self.yield_form.metadata_error = Some(message);
            }
            ActionOutcome::Prediction(result) => self.yield_form.result = Some(result),
            ActionOutcome::Recommendations(result) => self.recommendations.result = Some(result),
            ActionOutcome::Market(view) => {
                self.status_message = if view.source.is_demo() {
                    "Live rates unavailable, showing demo data".to_string()
                } else {
                    "Market rates refreshed".to_string()
                };
                self.market.refreshed = Some(view);
                self.clamp_market_selection();
            }
            ActionOutcome::ChatReply(reply) => {
                self.chat.messages.push(reply);
                self.chat.scroll = 0;
            }
        }
    }

    fn attach_image(&mut self, path: &Path) {
        match image_data_url(path) {
            Ok(data_url) => {
                self.chat.messages.push(ChatMessage::user(
                    "Uploaded an image for analysis",
                    Some(data_url),
                ));
                self.chat.messages.push(ChatMessage::bot(IMAGE_REPLY));
                self.chat.scroll = 0;
            }
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "could not read image");
                self.status_message = format!("Could not read {}: {error}", path.display());
            }
        }
    }

    async fn sign_in(&mut self, profile: FarmerProfile) {
        match self.profile.save(profile).await {
            Ok(()) => {
                self.login = LoginForm::default();
                self.reset_session();
                self.enter_dashboard();
                let name = self
                    .farmer()
                    .map(|farmer| farmer.display_name().to_string())
                    .unwrap_or_default();
                self.status_message = format!("Welcome, {name}!");
            }
            Err(error) => {
                self.status_message = format!("Error: {error}");
            }
        }
    }

    async fn sign_out(&mut self) {
        if let Err(error) = self.profile.clear().await {
            tracing::warn!(%error, "failed to clear stored profile");
            self.status_message = format!("Error: {error}");
            return;
        }
        self.orchestrator.reset();
        self.reset_session();
        self.screen = AppScreen::Login;
        self.tab = Tab::Farm;
        self.status_message = "Signed out".to_string();
    }

    /// Drops everything tied to the previous farmer's session.
    fn reset_session(&mut self) {
        self.chat = ChatState::default();
        self.market = MarketState::default();
        self.yield_form = YieldForm::default();
        self.recommendations = RecommendationsState::default();
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use async_trait::async_trait;
    use krishi_mate::backend::wire::{
        ChatReply, ChatRequest, ForecastResponse, GeoPoint, InsightsRequest, InsightsResponse,
        LocationQuery, MarketRecordWire, WeatherAnalysisRequest, WeatherAnalysisResponse,
    };
    use krishi_mate::backend::{BackendError, FarmBackend};
    use krishi_mate::db::setup_database;
    use sqlx::sqlite::SqlitePoolOptions;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    /// Backend with no network: every cached domain falls back, the form
    /// endpoints answer with fixed data.
    pub struct OfflineBackend;

    #[async_trait]
    impl FarmBackend for OfflineBackend {
        async fn market_rates(
            &self,
            _query: &LocationQuery,
        ) -> Result<Vec<MarketRecordWire>, BackendError> {
            Ok(Vec::new())
        }

        async fn general_insights(
            &self,
            _request: &InsightsRequest,
        ) -> Result<InsightsResponse, BackendError> {
            Err(BackendError::EmptyPayload)
        }

        async fn weather_analysis(
            &self,
            _request: &WeatherAnalysisRequest,
        ) -> Result<WeatherAnalysisResponse, BackendError> {
            Err(BackendError::EmptyPayload)
        }

        async fn yield_metadata(&self) -> Result<YieldMetadata, BackendError> {
            let mut state_district_map = BTreeMap::new();
            state_district_map.insert(
                "Maharashtra".to_string(),
                vec!["Pune".to_string(), "Nashik".to_string()],
            );
            Ok(YieldMetadata {
                states: vec!["Maharashtra".to_string()],
                districts: vec!["Pune".to_string(), "Nashik".to_string()],
                crops: vec!["Rice".to_string(), "Wheat".to_string()],
                seasons: vec!["Kharif".to_string(), "Rabi".to_string()],
                state_district_map,
            })
        }

        async fn yield_prediction(
            &self,
            request: &YieldRequest,
        ) -> Result<YieldPrediction, BackendError> {
            Ok(YieldPrediction {
                predicted_yield: 2.0,
                predicted_production: 2.0 * request.area,
            })
        }

        async fn crop_recommendations(
            &self,
            _query: &LocationQuery,
        ) -> Result<Recommendations, BackendError> {
            Err(BackendError::Status {
                status: 500,
                detail: "model offline".to_string(),
            })
        }

        async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, BackendError> {
            Ok(ChatReply {
                reply: format!("You said: {}", request.message),
            })
        }

        async fn geocode(&self, place: &str) -> Result<GeoPoint, BackendError> {
            Err(BackendError::NoGeocodingResult(place.to_string()))
        }

        async fn forecast(&self, _point: GeoPoint) -> Result<ForecastResponse, BackendError> {
            Err(BackendError::EmptyPayload)
        }
    }

    pub fn pune_farmer() -> FarmerProfile {
        FarmerProfile {
            name: "Asha".to_string(),
            mobile: "9876543210".to_string(),
            location: "Pune, Maharashtra".to_string(),
            main_crop: Some("Sugarcane".to_string()),
            farm_size: None,
        }
    }

    pub async fn test_app(profile: Option<FarmerProfile>) -> App {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        setup_database(&pool).await.unwrap();

        let mut store = ProfileStore::init(pool).await.unwrap();
        if let Some(profile) = profile {
            store.save(profile).await.unwrap();
        }

        let config = AppConfig::default();
        let context = App::fetch_context(store.get(), &config);
        let orchestrator = Orchestrator::new(Arc::new(OfflineBackend), context);
        App::new(orchestrator, store, config)
    }

    #[tokio::test]
    async fn signed_out_user_starts_on_login() {
        let app = test_app(None).await;
        assert_eq!(app.screen, AppScreen::Login);
        assert!(!app.orchestrator.cache().any_pending());
    }

    #[tokio::test]
    async fn stored_profile_opens_dashboard_and_fetches_farm_tab() {
        let app = test_app(Some(pune_farmer())).await;
        assert_eq!(app.screen, AppScreen::Dashboard);
        assert!(app.slot(DataDomain::Weather).is_loading());
        assert_eq!(app.orchestrator.context().crop, "Sugarcane");
    }

    #[tokio::test]
    async fn chat_tab_seeds_welcome_once() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        app.select_tab(Tab::Farm);
        app.select_tab(Tab::Chat);
        assert_eq!(app.chat.messages.len(), 1);
        assert_eq!(app.chat.messages[0].id, "welcome");
    }

    #[tokio::test]
    async fn chat_round_trip_appends_both_messages() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        app.queue(PendingAction::SendChat("When to sow?".to_string()));
        app.run_pending().await;

        let contents: Vec<&str> = app.chat.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents[1..], ["When to sow?", "You said: When to sow?"]);
    }

    #[tokio::test]
    async fn chat_stays_pending_while_reply_is_in_flight() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        app.queue(PendingAction::SendChat("Need rain?".to_string()));

        let task = app.begin_pending().await.unwrap();
        assert!(matches!(app.pending, Some(PendingAction::SendChat(_))));
        assert_eq!(app.chat.messages.last().map(|m| m.content.as_str()), Some("Need rain?"));

        // Frames keep landing cache fetches meanwhile
        app.tick();

        app.finish_action(task.await);
        assert!(app.pending.is_none());
        assert_eq!(
            app.chat.messages.last().map(|m| m.content.as_str()),
            Some("You said: Need rain?")
        );
    }

    #[tokio::test]
    async fn aborted_action_clears_pending_with_error() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.queue(PendingAction::LoadRecommendations);
        let task = app.begin_pending().await.unwrap();
        task.abort();

        app.finish_action(task.await);
        assert!(app.pending.is_none());
        assert!(app.status_message.starts_with("Error"));
    }

    #[tokio::test]
    async fn local_actions_finish_without_a_task() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.queue(PendingAction::Logout);
        assert!(app.begin_pending().await.is_none());
        assert!(app.pending.is_none());
        assert_eq!(app.screen, AppScreen::Login);
    }

    #[tokio::test]
    async fn recommendations_error_is_kept_for_display() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Recommendations);
        assert_eq!(app.pending, Some(PendingAction::LoadRecommendations));
        app.run_pending().await;

        assert_eq!(
            app.recommendations.result,
            Some(Err("model offline".to_string()))
        );
    }

    #[tokio::test]
    async fn market_refresh_stays_out_of_cache() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.queue(PendingAction::RefreshMarket);
        app.run_pending().await;

        assert!(app.market_view().is_some_and(|view| view.source.is_demo()));
        assert_eq!(app.slot(DataDomain::Market), SlotView::Idle);
    }

    #[tokio::test]
    async fn logout_clears_session_and_cache() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.select_tab(Tab::Chat);
        app.queue(PendingAction::Logout);
        app.run_pending().await;

        assert_eq!(app.screen, AppScreen::Login);
        assert!(app.chat.messages.is_empty());
        assert!(app.farmer().is_none());
        assert_eq!(app.slot(DataDomain::Weather), SlotView::Idle);
    }

    #[tokio::test]
    async fn only_one_action_is_queued_at_a_time() {
        let mut app = test_app(Some(pune_farmer())).await;
        app.queue(PendingAction::RefreshMarket);
        app.queue(PendingAction::Logout);
        assert_eq!(app.pending, Some(PendingAction::RefreshMarket));
    }
}
