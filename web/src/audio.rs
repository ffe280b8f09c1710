use anyhow::anyhow;
use wasm_bindgen_futures::JsFuture;
use web_sys::HtmlAudioElement;

const EAT_SRC: &str = "assets/eat.mp3";
const GAME_OVER_SRC: &str = "assets/gameover.mp3";
const MUSIC_SRC: &str = "assets/bgm.mp3";

/// Sound cues. Every trigger is fire-and-forget.
#[derive(Debug)]
pub(crate) struct Sounds {
    eat: HtmlAudioElement,
    game_over: HtmlAudioElement,
    music: HtmlAudioElement,
}

impl Sounds {
    pub(crate) fn load() -> anyhow::Result<Self> {
        let music = load_audio(MUSIC_SRC)?;
        music.set_loop(true);
        Ok(Self {
            eat: load_audio(EAT_SRC)?,
            game_over: load_audio(GAME_OVER_SRC)?,
            music,
        })
    }

    pub(crate) fn play_eat(&self) {
        restart(&self.eat, EAT_SRC);
    }

    pub(crate) fn play_game_over(&self) {
        restart(&self.game_over, GAME_OVER_SRC);
    }

    pub(crate) fn start_music(&self) {
        restart(&self.music, MUSIC_SRC);
    }

    pub(crate) fn stop_music(&self) {
        if let Err(err) = self.music.pause() {
            log::warn!("could not pause {}: {:?}", MUSIC_SRC, err);
        }
    }
}

fn load_audio(src: &str) -> anyhow::Result<HtmlAudioElement> {
    HtmlAudioElement::new_with_src(src)
        .map_err(|err| anyhow!("could not create audio {}: {:?}", src, err))
}

fn restart(audio: &HtmlAudioElement, name: &'static str) {
    audio.set_current_time(0.0);
    match audio.play() {
        // autoplay policies reject the promise until the page saw a user gesture
        Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::debug!("playing {} was rejected: {:?}", name, err);
            }
        }),
        Err(err) => log::warn!("could not play {}: {:?}", name, err),
    }
}
