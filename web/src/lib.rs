use clap::Parser;
use wasm_bindgen::prelude::*;

mod audio;
mod game;
mod surface;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    #[command(flatten)]
    game: game::GameProps,
}

impl Args {
    /// Flags come from the URL fragment, e.g. `#-vv&--seed=42&--mute`.
    fn from_fragment(fragment: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(fragment.split(['#', '&']))
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_fragment(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    yew::Renderer::<game::GameView>::with_root_and_props(root, args.game).render();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fragment_uses_defaults() {
        let args = Args::from_fragment("").unwrap();

        assert_eq!(args.game, game::GameProps::default());
    }

    #[test]
    fn fragment_flags_are_parsed() {
        let args = Args::from_fragment("#-vv&--seed=42&--mute&--tick-ms=80&--orthogonal").unwrap();

        assert_eq!(args.game.seed, Some(42));
        assert!(args.game.mute);
        assert_eq!(args.game.tick_ms, Some(80));
        assert!(args.game.orthogonal);
        assert!(!args.game.allow_fruit_on_snake);
        assert_eq!(args.verbose.log_level(), Some(log::Level::Info));
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(Args::from_fragment("#--speed=9").is_err());
    }
}
