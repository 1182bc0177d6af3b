use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context as _, Result};
use serde::de::DeserializeOwned;

use crate::api::{ApiClient, Endpoints};
use crate::cli::terminal::{TerminalNavigator, TerminalNotifier};
use crate::cli::{Cli, Command, PlayerAction};
use crate::config::{provider_from_config, Config};
use crate::data::{
    AuthState, FetchOptions, FetchOutcome, Fetcher, Mutation, MutationMethod, MutationOptions,
    SearchIntent, SearchReducer, SearchState, Searchable,
};
use crate::form::{
    render_form, ColumnCount, DynamicForm, FormIntent, FormMode, FormReducer, FormState,
    FormValues, RenderOptions,
};
use crate::model::{
    average_stats, empty_player_form, google_maps_url, player_to_form, Player, PlayerPayload,
    Turf, TurfDetail, PLAYER_FORM_FIELDS, PLAYER_SEARCH_FIELDS, TURF_SEARCH_FIELDS,
};
use crate::ui::mvi::Reducer;
use crate::ui::{buffer_lines, draw_form};

/// The session was missing or rejected by the server.
#[derive(Debug, thiserror::Error)]
#[error("sign in required, continue at {url}")]
pub struct SignInRequired {
    pub url: String,
}

struct Session {
    config: Config,
    client: ApiClient,
    auth: AuthState,
    navigator: Arc<TerminalNavigator>,
    notifier: Arc<TerminalNotifier>,
}

impl Session {
    fn open(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        if cli.config.is_some() {
            config.apply_env_overrides(|key| std::env::var(key).ok());
        }
        if let Some(url) = &cli.base_url {
            config.api.base_url = url.clone();
        }
        config.validate()?;

        let credentials = provider_from_config(&config.auth);
        let auth = if credentials.token().is_some() {
            AuthState::authenticated()
        } else {
            AuthState::anonymous()
        };
        let client = ApiClient::new(&config.api, credentials).context("building HTTP client")?;

        tracing::debug!(base_url = client.base_url(), ?auth, "Session ready");

        Ok(Self {
            config,
            client,
            auth,
            navigator: Arc::new(TerminalNavigator::new()),
            notifier: Arc::new(TerminalNotifier),
        })
    }

    fn sign_in_required(&self) -> SignInRequired {
        let path = self
            .navigator
            .target()
            .unwrap_or_else(|| self.config.auth.redirect_path.clone());
        SignInRequired {
            url: self.client.resolve_url(&path),
        }
    }

    async fn load<T>(&self, endpoint: &str) -> Result<T>
    where
        T: DeserializeOwned + Clone + PartialEq + Send + 'static,
    {
        let options = FetchOptions::default().redirect_to(self.config.auth.redirect_path.as_str());
        let fetcher: Fetcher<T> =
            Fetcher::new(self.client.clone(), endpoint, options, self.navigator.clone());

        match fetcher.on_auth_state(self.auth).await {
            FetchOutcome::Loaded => fetcher
                .data()
                .ok_or_else(|| anyhow!("{} returned no data", endpoint)),
            FetchOutcome::Redirected => Err(self.sign_in_required().into()),
            FetchOutcome::Failed(message) => Err(anyhow!(message)),
            other => Err(anyhow!("request to {} did not complete: {:?}", endpoint, other)),
        }
    }

    fn debounce(&self) -> Duration {
        Duration::from_millis(self.config.search.debounce_ms)
    }

    fn mutation(
        &self,
        endpoint: impl Into<String>,
        method: MutationMethod,
        options: MutationOptions,
    ) -> Mutation {
        Mutation::new(
            self.client.clone(),
            endpoint,
            method,
            options,
            self.notifier.clone(),
        )
    }
}

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let session = Session::open(&cli)?;

    match cli.command {
        Command::Players {
            query,
            action: None,
        } => {
            let players: Vec<Player> = session.load(Endpoints::PLAYERS).await?;
            print_filtered(&session, players, PLAYER_SEARCH_FIELDS, query, "players", |p| {
                format!(
                    "{:<24} {:<6} {:>3}y  {:<16} {}",
                    p.name,
                    p.position,
                    p.age,
                    p.nationality,
                    if p.is_active { "active" } else { "inactive" }
                )
            });
            Ok(ExitCode::SUCCESS)
        }
        Command::Players {
            action: Some(action),
            ..
        } => run_player_action(&session, action).await,
        Command::Turfs { query } => {
            let turfs: Vec<Turf> = session.load(Endpoints::TURFS).await?;
            print_filtered(&session, turfs, TURF_SEARCH_FIELDS, query, "turfs", |t| {
                format!(
                    "{:<28} {:<24} {} {}/h",
                    t.name,
                    t.location,
                    t.price_per_hour,
                    t.currency.as_deref().unwrap_or("")
                )
            });
            Ok(ExitCode::SUCCESS)
        }
        Command::Turf { id } => {
            let turf = session
                .load::<TurfDetail>(&Endpoints::turf(&id))
                .await?
                .into_turf();
            print_turf(&turf);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_filtered<T, F>(
    session: &Session,
    items: Vec<T>,
    fields: &[&str],
    query: Option<String>,
    noun: &str,
    line: F,
) where
    T: Searchable + Clone + PartialEq + Send + 'static,
    F: Fn(&T) -> String,
{
    let state = SearchState::new(items, fields.iter().copied(), session.debounce());
    let state = match query {
        Some(query) => SearchReducer::<T>::reduce_all(
            state,
            [
                SearchIntent::SetQuery {
                    query,
                    at: Instant::now(),
                },
                SearchIntent::Commit,
            ],
        ),
        None => state,
    };

    println!(
        "Showing {} of {} {}",
        state.filtered().len(),
        state.items().len(),
        noun
    );
    for item in state.filtered() {
        println!("  {}", line(item));
    }
}

fn print_turf(turf: &Turf) {
    println!("{}", turf.name);
    println!("  Location: {}", turf.location);
    println!(
        "  Price:    {} {}/h",
        turf.price_per_hour,
        turf.currency.as_deref().unwrap_or("")
    );
    println!("  Hours:    {}", turf.operating_hours());
    if let Some(sport) = &turf.sport_type {
        println!("  Sport:    {}", sport);
    }
    if let Some(amenities) = turf.amenities.as_ref().filter(|a| !a.is_empty()) {
        println!("  Amenities: {}", amenities.join(", "));
    }
    if let Some(description) = &turf.description {
        println!("  {}", description);
    }
    if let Some((lat, lng)) = turf.coordinates() {
        println!("  Map:      {}", google_maps_url(lat, lng));
    }
}

async fn run_player_action(session: &Session, action: PlayerAction) -> Result<ExitCode> {
    match action {
        PlayerAction::Show { id } => {
            let player: Player = session.load(&Endpoints::player(&id)).await?;
            print_player(&player);
            Ok(ExitCode::SUCCESS)
        }
        PlayerAction::Add { set } => save_player(session, FormMode::Create, set).await,
        PlayerAction::Edit { id, set } => save_player(session, FormMode::Edit { id }, set).await,
        PlayerAction::Delete { id } => {
            let mutation = session.mutation(
                Endpoints::player(&id),
                MutationMethod::Delete,
                MutationOptions::default()
                    .success_message("Player deleted")
                    .error_message("Failed to delete player"),
            );
            Ok(exit_code(mutation.mutate_empty().await))
        }
        PlayerAction::Form {
            edit,
            width,
            narrow,
        } => {
            let values = match &edit {
                Some(id) => player_to_form(&session.load(&Endpoints::player(id)).await?),
                None => empty_player_form(),
            };
            let columns = if narrow {
                ColumnCount::One
            } else {
                ColumnCount::Two
            };
            let prefix = if edit.is_some() { "edit-" } else { "new-" };
            let options = RenderOptions::default()
                .with_prefix(prefix)
                .with_columns(columns);
            let form = render_form(PLAYER_FORM_FIELDS, &values, &options);
            let buf = draw_form(&form, None, width);
            for line in buffer_lines(&buf) {
                println!("{}", line);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_player(player: &Player) {
    let stats = average_stats(player.performances.as_deref().unwrap_or_default());
    println!("{} ({})", player.name, player.position);
    println!("  Age:         {}", player.age);
    println!("  Nationality: {}", player.nationality);
    println!("  Height:      {} cm", player.height_cm);
    println!("  Weight:      {} kg", player.weight_kg);
    println!(
        "  Status:      {}",
        if player.is_active { "active" } else { "inactive" }
    );
    if let Some(notes) = player.notes.as_deref().filter(|n| !n.is_empty()) {
        println!("  Notes:       {}", notes);
    }
    println!(
        "  Averages:    {} pts, {} ast, {} reb, score {}",
        stats.points, stats.assists, stats.rebounds, stats.score
    );
}

/// Apply `assignments` to the player form, check it and submit it.
async fn save_player(
    session: &Session,
    mode: FormMode,
    assignments: Vec<(String, String)>,
) -> Result<ExitCode> {
    let (prefill, endpoint, method) = match &mode {
        FormMode::Create => (
            empty_player_form(),
            Endpoints::PLAYERS.to_string(),
            MutationMethod::Create,
        ),
        FormMode::Edit { id } => {
            let player: Player = session.load(&Endpoints::player(id)).await?;
            (
                player_to_form(&player),
                Endpoints::player(id),
                MutationMethod::Replace,
            )
        }
    };

    let is_new = mode.is_new();
    let state = FormReducer::reduce(
        FormState::Closed,
        FormIntent::Open {
            mode,
            fields: PLAYER_FORM_FIELDS,
            prefill,
        },
    );
    let values = apply_assignments(state, assignments)?;

    let form = render_form(PLAYER_FORM_FIELDS, &values, &RenderOptions::default());
    if let Err(errors) = form.check_validity() {
        for error in &errors {
            eprintln!("✗ {}", error);
        }
        return Ok(ExitCode::FAILURE);
    }

    let payload = PlayerPayload::from_form(&values, is_new)?;
    let (success, failure) = if is_new {
        ("Player added", "Failed to add player")
    } else {
        ("Player updated", "Failed to update player")
    };
    let mutation = session.mutation(
        endpoint,
        method,
        MutationOptions::default()
            .success_message(success)
            .error_message(failure),
    );
    Ok(exit_code(mutation.mutate(Some(&payload)).await))
}

/// Route each assignment through the form's change callback.
fn apply_assignments(state: FormState, assignments: Vec<(String, String)>) -> Result<FormValues> {
    let current = state.values().cloned().unwrap_or_default();
    let mut intents = Vec::new();
    {
        let mut form = DynamicForm::new(state.fields(), &current, |name: &str, value: &str| {
            intents.push(FormIntent::Change {
                name: name.to_string(),
                value: value.to_string(),
            });
        });
        for (name, value) in &assignments {
            if !form.input(name, value) {
                bail!("unknown player field '{}'", name);
            }
        }
    }

    let state = FormReducer::reduce_all(state, intents);
    state
        .values()
        .cloned()
        .ok_or_else(|| anyhow!("player form is not open"))
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
