use crate::audio::Sounds;
use crate::surface;
use crate::utils::*;
use clap::Args;
use gloo::events::{EventListener, EventListenerOptions};
use gloo::timers::callback::Interval;
use gloo::utils::{document, window};
use serde::{Deserialize, Serialize};
use snake_core as game;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, KeyboardEvent};
use yew::prelude::*;

/// Best score across sessions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub(crate) struct HighScore(pub game::Score);

impl StorageKey for HighScore {
    const KEY: &'static str = "snakeHighScore";
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Start,
    Tick,
    Turn(game::Direction),
    Resize,
}

#[derive(Args, Properties, Debug, Clone, Default, PartialEq)]
pub(crate) struct GameProps {
    /// Seed fruit placement instead of using a random seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Disable sound effects and music
    #[arg(long)]
    pub mute: bool,

    /// Milliseconds between two steps of the snake
    #[arg(long, value_name = "MS")]
    pub tick_ms: Option<u32>,

    /// Only accept quarter turns
    #[arg(long)]
    pub orthogonal: bool,

    /// Let fruit appear underneath the snake
    #[arg(long)]
    pub allow_fruit_on_snake: bool,
}

impl GameProps {
    pub(crate) fn game_config(&self) -> game::GameConfig {
        let mut config = game::GameConfig::default();
        if let Some(tick_ms) = self.tick_ms {
            config.tick_period_ms = tick_ms;
        }
        if self.orthogonal {
            config.turn_policy = game::TurnPolicy::OrthogonalOnly;
        }
        if self.allow_fruit_on_snake {
            config.spawn_policy = game::SpawnPolicy::AnyCell;
        }
        config
    }
}

fn viewport_size() -> (u32, u32) {
    let window = window();
    let px = |value: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
    };
    (px(window.inner_width()), px(window.inner_height()))
}

const fn end_reason_text(reason: game::EndReason) -> &'static str {
    use game::EndReason::*;
    match reason {
        HitWall => "You hit the wall",
        HitSelf => "You bit yourself",
        BoardFilled => "No room left, you filled the board!",
    }
}

/// Owns the game session and everything that drives it: the tick timer, input
/// listeners, the canvas and the sounds.
#[derive(Debug)]
pub(crate) struct GameView {
    engine: game::SnakeEngine,
    surface: game::SurfaceSize,
    canvas: NodeRef,
    sounds: Option<Sounds>,
    ticker: Option<Interval>,
    _keydown: EventListener,
    _resize: EventListener,
}

impl GameView {
    fn create_ticker(ctx: &Context<Self>, period_ms: u32) -> Interval {
        let link = ctx.link().clone();
        Interval::new(period_ms, move || link.send_message(Msg::Tick))
    }

    fn listen_keys(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        let options = EventListenerOptions::enable_prevent_default();
        EventListener::new_with_options(&document(), "keydown", options, move |event| {
            let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                return;
            };
            let key = event.key();
            if let Some(direction) = game::Direction::from_key(&key) {
                // keep arrow keys from scrolling the page
                event.prevent_default();
                link.send_message(Msg::Turn(direction));
            } else {
                log::trace!("ignored key {:?}", key);
            }
        })
    }

    fn listen_resize(ctx: &Context<Self>) -> EventListener {
        let link = ctx.link().clone();
        EventListener::new(&window(), "resize", move |_| link.send_message(Msg::Resize))
    }

    /// Recomputes the surface from the viewport and pushes new bounds into the engine.
    fn fit_to_viewport(&mut self) -> bool {
        let (width, height) = viewport_size();
        let (surface, grid) = self.engine.config().grid_for_viewport(width, height);
        if surface == self.surface {
            return false;
        }
        log::debug!("viewport {}x{}, surface {:?}, grid {:?}", width, height, surface, grid);
        self.surface = surface;
        self.engine.resize(grid);
        true
    }

    /// Starts a new round, also while one is still running.
    fn start_game(&mut self, ctx: &Context<Self>) -> bool {
        self.fit_to_viewport();

        // the old timer must be gone before a new one exists
        if self.ticker.take().is_some() {
            log::debug!("cancelled previous tick timer");
        }

        if let Err(err) = self.engine.start() {
            log::error!("could not start game: {}", err);
            return true;
        }
        if !self.engine.state().is_running() {
            return true;
        }

        if let Some(sounds) = &self.sounds {
            sounds.start_music();
        }

        let period_ms = self.engine.config().tick_period_ms();
        self.ticker = Some(Self::create_ticker(ctx, period_ms));
        log::info!("game started, tick every {} ms", period_ms);
        true
    }

    fn step(&mut self) -> bool {
        use game::TickOutcome::*;

        match self.engine.tick() {
            Ok(Moved) => true,
            Ok(Ate { score }) => {
                log::debug!("score: {}", score);
                if let Some(sounds) = &self.sounds {
                    sounds.play_eat();
                }
                true
            }
            Ok(GameOver(report)) => {
                self.game_over(report);
                true
            }
            Err(err) => {
                log::debug!("dropping stray tick: {}", err);
                self.ticker = None;
                false
            }
        }
    }

    fn game_over(&mut self, report: game::GameOverReport) {
        self.ticker = None;

        if let Some(sounds) = &self.sounds {
            sounds.stop_music();
            sounds.play_game_over();
        }

        if report.new_high_score {
            HighScore(report.score).local_save();
        }

        log::info!(
            "game over: {:?}, score {}, high score {}",
            report.reason,
            report.score,
            self.engine.high_score()
        );
    }

    fn draw(&self) {
        let Some(canvas) = self.canvas.cast::<HtmlCanvasElement>() else {
            log::warn!("canvas is not mounted, skipping frame");
            return;
        };
        if let Err(err) = surface::draw(&canvas, &self.engine) {
            log::error!("could not draw frame: {:#}", err);
        }
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let config = props.game_config();
        let (width, height) = viewport_size();
        let (surface, grid) = config.grid_for_viewport(width, height);

        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("fruit seed: {}", seed);
        let placer = game::RandomFruitPlacer::new(seed, config.spawn_policy);
        let HighScore(high_score) = LocalOrDefault::local_or_default();

        let sounds = if props.mute {
            None
        } else {
            Sounds::load()
                .inspect_err(|err| log::warn!("sound disabled: {:#}", err))
                .ok()
        };

        Self {
            engine: game::SnakeEngine::new(config, grid, placer, high_score),
            surface,
            canvas: NodeRef::default(),
            sounds,
            ticker: None,
            _keydown: Self::listen_keys(ctx),
            _resize: Self::listen_resize(ctx),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            Start => self.start_game(ctx),
            Tick => self.step(),
            Turn(direction) => {
                self.engine.turn(direction);
                false
            }
            Resize => self.fit_to_viewport(),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let state = self.engine.state();
        let idle = matches!(state, game::EngineState::Idle);
        let (final_score, reason) = match state {
            game::EngineState::GameOver { reason, score } => (score, Some(reason)),
            _ => (self.engine.score(), None),
        };
        let over = reason.is_some();

        let cb_start = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::Start
        });

        html! {
            <div class="snake">
                <nav>
                    <span id="score">{score_label(self.engine.score())}</span>
                    <span id="highscore">{high_score_label(self.engine.high_score())}</span>
                </nav>
                <canvas
                    id="gameCanvas"
                    ref={self.canvas.clone()}
                    width={self.surface.width.to_string()}
                    height={self.surface.height.to_string()}
                />
                <section id="startScreen" class={classes!("overlay", idle.then_some("active"))}>
                    <h1>{"Snake"}</h1>
                    <p>{"Steer with the arrow keys, eat the fruit, stay off the walls."}</p>
                    <button id="startBtn" onclick={cb_start.clone()}>{"Start"}</button>
                </section>
                <section id="gameoverScreen" class={classes!("overlay", over.then_some("active"))}>
                    <h2>{"Game Over"}</h2>
                    if let Some(reason) = reason {
                        <small>{end_reason_text(reason)}</small>
                    }
                    <p id="finalScore">{final_score_label(final_score)}</p>
                    <button id="restartBtn" onclick={cb_start}>{"Restart"}</button>
                </section>
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render {
            log::debug!("canvas mounted at {:?}", self.surface);
        }
        self.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_score_uses_legacy_storage_key() {
        assert_eq!(<HighScore as StorageKey>::KEY, "snakeHighScore");
    }

    #[test]
    fn high_score_is_stored_as_a_bare_number() {
        assert_eq!(serde_json::to_string(&HighScore(7)).unwrap(), "7");
        assert_eq!(serde_json::from_str::<HighScore>("7").unwrap(), HighScore(7));
        assert!(serde_json::from_str::<HighScore>("\"seven\"").is_err());
    }

    #[test]
    fn flags_map_onto_game_config() {
        let props = GameProps {
            tick_ms: Some(90),
            orthogonal: true,
            allow_fruit_on_snake: true,
            ..GameProps::default()
        };

        let config = props.game_config();

        assert_eq!(config.tick_period_ms(), 90);
        assert_eq!(config.turn_policy, game::TurnPolicy::OrthogonalOnly);
        assert_eq!(config.spawn_policy, game::SpawnPolicy::AnyCell);
    }

    #[test]
    fn default_props_keep_classic_rules() {
        let config = GameProps::default().game_config();

        assert_eq!(config, game::GameConfig::default());
        assert_eq!(config.tick_period_ms(), 120);
    }

    #[test]
    fn every_end_reason_has_text() {
        use game::EndReason::*;
        for reason in [HitWall, HitSelf, BoardFilled] {
            assert!(!end_reason_text(reason).is_empty());
        }
    }
}
