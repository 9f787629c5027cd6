use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;

use crate::audio::element::{AudioElement, AudioEvent, PlaybackError};
use crate::errors::{AfterimageError, Result};

/// `<audio>` element backend.
///
/// DOM callbacks and play promises resolve outside of the frame loop, so they
/// are forwarded through a channel and drained by [`AudioElement::poll_event`].
pub struct WebAudioElement {
    audio: HtmlAudioElement,
    src: String,
    tx: flume::Sender<AudioEvent>,
    rx: flume::Receiver<AudioEvent>,
    _on_ended: Closure<dyn FnMut(web_sys::Event)>,
    _on_error: Closure<dyn FnMut(web_sys::Event)>,
}

impl WebAudioElement {
    pub fn new() -> Result<Self> {
        let audio = HtmlAudioElement::new().map_err(|e| AfterimageError::WasmError(format!("{e:?}")))?;
        audio.set_preload("auto");

        let (tx, rx) = flume::unbounded();

        let ended_tx = tx.clone();
        let on_ended = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let _ = ended_tx.send(AudioEvent::Ended);
        });
        audio.set_onended(Some(on_ended.as_ref().unchecked_ref()));

        let error_tx = tx.clone();
        let error_audio = audio.clone();
        let on_error = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            let message = error_audio
                .error()
                .map_or_else(|| "unknown media error".to_string(), |e| format!("media error code {}", e.code()));
            let _ = error_tx.send(AudioEvent::Error(message));
        });
        audio.set_onerror(Some(on_error.as_ref().unchecked_ref()));

        Ok(Self {
            audio,
            src: String::new(),
            tx,
            rx,
            _on_ended: on_ended,
            _on_error: on_error,
        })
    }
}

fn classify_rejection(err: &JsValue) -> PlaybackError {
    let name = js_sys::Reflect::get(err, &JsValue::from_str("name"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_default();
    let message = js_sys::Reflect::get(err, &JsValue::from_str("message"))
        .ok()
        .and_then(|v| v.as_string())
        .unwrap_or_else(|| format!("{err:?}"));

    if name == "NotAllowedError" {
        PlaybackError::NotAllowed(message)
    } else {
        PlaybackError::Other(format!("{name}: {message}"))
    }
}

impl AudioElement for WebAudioElement {
    fn set_src(&mut self, url: &str) {
        self.src = url.to_string();
        self.audio.set_src(url);
    }

    fn src(&self) -> &str {
        &self.src
    }

    fn play(&mut self) {
        match self.audio.play() {
            Ok(promise) => {
                let tx = self.tx.clone();
                spawn_local(async move {
                    let event = match JsFuture::from(promise).await {
                        Ok(_) => AudioEvent::PlayStarted,
                        Err(err) => AudioEvent::PlayRejected(classify_rejection(&err)),
                    };
                    let _ = tx.send(event);
                });
            }
            Err(err) => {
                let _ = self.tx.send(AudioEvent::PlayRejected(classify_rejection(&err)));
            }
        }
    }

    fn pause(&mut self) {
        if let Err(err) = self.audio.pause() {
            log::warn!("Audio pause failed: {err:?}");
        }
    }

    fn current_time(&self) -> f64 {
        self.audio.current_time()
    }

    fn set_current_time(&mut self, time: f64) {
        self.audio.set_current_time(time);
    }

    fn poll_event(&mut self) -> Option<AudioEvent> {
        self.rx.try_recv().ok()
    }
}

impl Drop for WebAudioElement {
    fn drop(&mut self) {
        let _ = self.audio.pause();
        self.audio.set_onended(None);
        self.audio.set_onerror(None);
    }
}
